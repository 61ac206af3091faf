//! 2D rasterization
//!
//! Every primitive is computed in integer arithmetic and written one pixel at
//! a time through [`PixelTarget::set_pixel`]. Nothing here allocates.
//!
//! Coordinates are `i16` so shapes may start or extend off-screen; spans are
//! clipped to the target, everything else relies on the target dropping
//! out-of-range pixels.
//!
//! The column-packed bitmap blit is the one exception to the per-pixel rule:
//! it ORs whole page bytes and therefore lives on [`FrameBuffer`] directly
//! (see [`bitmap`]).
//!
//! [`FrameBuffer`]: crate::FrameBuffer

pub mod bitmap;
mod circle;
mod line;
mod triangle;

use crate::framebuffer::Color;
use crate::text::font;

/// Corner selector bits for [`Rasterizer::draw_circle_helper`]
pub mod corner {
    /// Upper-left quadrant
    pub const TOP_LEFT: u8 = 0x1;
    /// Upper-right quadrant
    pub const TOP_RIGHT: u8 = 0x2;
    /// Lower-right quadrant
    pub const BOTTOM_RIGHT: u8 = 0x4;
    /// Lower-left quadrant
    pub const BOTTOM_LEFT: u8 = 0x8;
}

/// Half selector bits for [`Rasterizer::fill_circle_helper`]
pub mod half {
    /// Right half (columns at and right of the center)
    pub const RIGHT: u8 = 0x1;
    /// Left half
    pub const LEFT: u8 = 0x2;
}

/// A surface that accepts single pixel writes
pub trait PixelTarget {
    /// Write one pixel; out-of-range handling is up to the target
    fn set_pixel(&mut self, x: i16, y: i16, color: Color);

    /// Width in pixels (span clipping bound)
    fn width(&self) -> i16;

    /// Height in pixels (span clipping bound)
    fn height(&self) -> i16;
}

/// Plot with wide intermediate coordinates, dropping anything that does not
/// even fit an `i16`
#[inline]
pub(crate) fn plot<T: PixelTarget + ?Sized>(target: &mut T, x: i32, y: i32, color: Color) {
    if let (Ok(x), Ok(y)) = (i16::try_from(x), i16::try_from(y)) {
        target.set_pixel(x, y, color);
    }
}

/// Vertical span of `h` pixels starting at (x, y), clipped to the target rows
pub(crate) fn vspan<T: PixelTarget + ?Sized>(target: &mut T, x: i32, y: i32, h: i32, color: Color) {
    let end = (y + h).min(target.height() as i32);
    for row in y.max(0)..end {
        plot(target, x, row, color);
    }
}

/// Horizontal span of `w` pixels starting at (x, y), clipped to the target columns
pub(crate) fn hspan<T: PixelTarget + ?Sized>(target: &mut T, x: i32, y: i32, w: i32, color: Color) {
    let end = (x + w).min(target.width() as i32);
    for col in x.max(0)..end {
        plot(target, col, y, color);
    }
}

/// Filled block, one vertical span per column
pub(crate) fn block<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Color,
) {
    for col in x..x + w {
        vspan(target, col, y, h, color);
    }
}

/// Drawing operations available on every [`PixelTarget`]
pub trait Rasterizer: PixelTarget {
    /// Single pixel
    fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.set_pixel(x, y, color);
    }

    /// Vertical line of `h` pixels going down from (x, y)
    fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: Color) {
        vspan(self, x.into(), y.into(), h.into(), color);
    }

    /// Horizontal line of `w` pixels going right from (x, y)
    fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Color) {
        hspan(self, x.into(), y.into(), w.into(), color);
    }

    /// Bresenham line between two points, both endpoints included
    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        line::draw_line(self, x0.into(), y0.into(), x1.into(), y1.into(), color);
    }

    /// Circle outline of radius `r`
    fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        circle::draw_circle(self, x0.into(), y0.into(), r.into(), color);
    }

    /// Quarter-circle outlines selected by a [`corner`] mask
    fn draw_circle_helper(&mut self, x0: i16, y0: i16, r: i16, corners: u8, color: Color) {
        circle::draw_circle_helper(self, x0.into(), y0.into(), r.into(), corners, color);
    }

    /// Filled circle of radius `r`
    fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        let (x0, y0, r) = (i32::from(x0), i32::from(y0), i32::from(r));
        vspan(self, x0, y0 - r, 2 * r + 1, color);
        circle::fill_circle_helper(self, x0, y0, r, half::RIGHT | half::LEFT, 0, color);
    }

    /// Filled half-circle selected by a [`half`] mask, every span stretched
    /// down by `delta` rows
    fn fill_circle_helper(&mut self, x0: i16, y0: i16, r: i16, halves: u8, delta: i16, color: Color) {
        circle::fill_circle_helper(self, x0.into(), y0.into(), r.into(), halves, delta.into(), color);
    }

    /// Rectangle outline
    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        hspan(self, x, y, w, color);
        hspan(self, x, y + h - 1, w, color);
        vspan(self, x, y, h, color);
        vspan(self, x + w - 1, y, h, color);
    }

    /// Filled rectangle
    fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        block(self, x.into(), y.into(), w.into(), h.into(), color);
    }

    /// Fill the whole target
    fn fill_screen(&mut self, color: Color) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0, 0, w, h, color);
    }

    /// Rectangle outline with corners of radius `r`
    fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        let (x, y, w, h, r) = (
            i32::from(x),
            i32::from(y),
            i32::from(w),
            i32::from(h),
            i32::from(r),
        );
        hspan(self, x + r, y, w - 2 * r, color);
        hspan(self, x + r, y + h - 1, w - 2 * r, color);
        vspan(self, x, y + r, h - 2 * r, color);
        vspan(self, x + w - 1, y + r, h - 2 * r, color);

        circle::draw_circle_helper(self, x + r, y + r, r, corner::TOP_LEFT, color);
        circle::draw_circle_helper(self, x + w - r - 1, y + r, r, corner::TOP_RIGHT, color);
        circle::draw_circle_helper(self, x + w - r - 1, y + h - r - 1, r, corner::BOTTOM_RIGHT, color);
        circle::draw_circle_helper(self, x + r, y + h - r - 1, r, corner::BOTTOM_LEFT, color);
    }

    /// Filled rectangle with corners of radius `r`
    fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        let (x, y, w, h, r) = (
            i32::from(x),
            i32::from(y),
            i32::from(w),
            i32::from(h),
            i32::from(r),
        );
        block(self, x + r, y, w - 2 * r, h, color);

        let delta = h - 2 * r - 1;
        circle::fill_circle_helper(self, x + w - r - 1, y + r, r, half::RIGHT, delta, color);
        circle::fill_circle_helper(self, x + r, y + r, r, half::LEFT, delta, color);
    }

    /// Triangle outline
    fn draw_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, color: Color) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Filled triangle (scanline fill)
    fn fill_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, color: Color) {
        triangle::fill_triangle(
            self,
            [(x0.into(), y0.into()), (x1.into(), y1.into()), (x2.into(), y2.into())],
            color,
        );
    }

    /// Row-packed bitmap: each byte holds 8 horizontal pixels, MSB first,
    /// rows padded to a whole byte. Only set bits are drawn.
    ///
    /// This tests every pixel individually; prefer the column-packed
    /// [`FrameBuffer::draw_bitmap`](crate::FrameBuffer::draw_bitmap) when the
    /// source can be stored in page layout.
    fn draw_slow_xy_bitmap(&mut self, x: i16, y: i16, bitmap: &[u8], w: i16, h: i16, color: Color) {
        bitmap::draw_slow_xy_bitmap(self, x.into(), y.into(), bitmap, w.into(), h.into(), color);
    }

    /// One 5x7 glyph in a 6x8 cell, scaled by `size`
    ///
    /// Unset glyph bits are painted with `bg` unless `bg == color`, in which
    /// case the background is left transparent.
    fn draw_char(&mut self, x: i16, y: i16, c: u8, color: Color, bg: Color, size: u8) {
        let (x, y, size) = (i32::from(x), i32::from(y), i32::from(size.max(1)));
        let (w, h) = (i32::from(self.width()), i32::from(self.height()));

        if x >= w || y >= h || x + 5 * size - 1 < 0 || y + 8 * size - 1 < 0 {
            return;
        }

        let glyph = font::glyph(c);
        for i in 0..font::CELL_WIDTH as i32 {
            let mut column = glyph.get(i as usize).copied().unwrap_or(0);
            for j in 0..font::CELL_HEIGHT as i32 {
                let paint = if column & 0x1 != 0 {
                    Some(color)
                } else if bg != color {
                    Some(bg)
                } else {
                    None
                };

                if let Some(paint) = paint {
                    if size == 1 {
                        plot(self, x + i, y + j, paint);
                    } else {
                        block(self, x + i * size, y + j * size, size, size, paint);
                    }
                }

                column >>= 1;
            }
        }
    }
}

impl<T: PixelTarget + ?Sized> Rasterizer for T {}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

    /// All lit pixels in row-major order
    pub fn lit_pixels(fb: &FrameBuffer) -> std::vec::Vec<(i16, i16)> {
        let mut out = std::vec::Vec::new();
        for y in 0..HEIGHT as i16 {
            for x in 0..WIDTH as i16 {
                if fb.get(x, y) == 1 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Records every write, including off-screen ones
    #[derive(Default)]
    pub struct Recorder {
        pub writes: std::vec::Vec<(i16, i16, Color)>,
    }

    impl PixelTarget for Recorder {
        fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
            self.writes.push((x, y, color));
        }

        fn width(&self) -> i16 {
            WIDTH as i16
        }

        fn height(&self) -> i16 {
            HEIGHT as i16
        }
    }
}
