//! Bitmap blits
//!
//! Two source layouts are supported:
//!
//! - **Column-packed**: each byte is 8 vertically stacked pixels of one
//!   column (bit 0 on top), `w` bytes per 8-row band. This is the
//!   framebuffer's own layout, so [`FrameBuffer::draw_bitmap`] ORs whole
//!   bytes into the pages, shifting by the sub-page y offset.
//! - **Row-packed**: each byte is 8 horizontally adjacent pixels (MSB on the
//!   left), rows padded to a whole byte. [`draw_slow_xy_bitmap`] tests and
//!   plots every pixel individually.

use super::{plot, PixelTarget};
use crate::framebuffer::{byte_index, Color, FrameBuffer, HEIGHT, PAGES, WIDTH};

impl FrameBuffer {
    /// Blit a column-packed bitmap with its top-left corner at (x, y)
    ///
    /// Set source bits are ORed in for [`Color::On`] and cleared for
    /// [`Color::Off`]; unset source bits leave the buffer untouched. A
    /// bitmap slice shorter than `w * ceil(h / 8)` is treated as zero-padded.
    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &[u8], w: i16, h: i16, color: Color) {
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        let (width, height, pages) = (WIDTH as i32, HEIGHT as i32, PAGES as i32);

        if x + w < 0 || x > width - 1 || y + h < 0 || y > height - 1 {
            return;
        }

        let mut offset = y.abs() % 8;
        let mut start_page = y / 8;
        if y < 0 {
            start_page -= 1;
            offset = 8 - offset;
        }

        let bands = (h + 7) / 8;
        for band in 0..bands {
            let page = start_page + band;
            if page > pages - 1 {
                break;
            }
            if page <= -2 {
                continue;
            }

            for col in 0..w {
                let dest_x = x + col;
                if dest_x > width - 1 {
                    break;
                }
                if dest_x < 0 {
                    continue;
                }

                let Some(&src) = bitmap.get((band * w + col) as usize) else {
                    continue;
                };

                if page >= 0 {
                    let upper = ((u16::from(src) << offset) & 0xFF) as u8;
                    self.merge(byte_index(dest_x as usize, page as usize), upper, color);
                }
                if offset != 0 && page < pages - 1 {
                    let lower = (u16::from(src) >> (8 - offset)) as u8;
                    self.merge(byte_index(dest_x as usize, (page + 1) as usize), lower, color);
                }
            }
        }
    }

    fn merge(&mut self, index: usize, bits: u8, color: Color) {
        if let Some(byte) = self.as_bytes_mut().get_mut(index) {
            match color {
                Color::On => *byte |= bits,
                Color::Off => *byte &= !bits,
            }
        }
    }
}

/// Plot a row-packed bitmap pixel by pixel
pub(super) fn draw_slow_xy_bitmap<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    bitmap: &[u8],
    w: i32,
    h: i32,
    color: Color,
) {
    let (width, height) = (i32::from(target.width()), i32::from(target.height()));
    if x + w < 0 || x > width - 1 || y + h < 0 || y > height - 1 {
        return;
    }

    let byte_width = (w + 7) / 8;
    for row in 0..h {
        for col in 0..w {
            let Some(&src) = bitmap.get((row * byte_width + col / 8) as usize) else {
                continue;
            };
            if src & (0x80 >> (col & 7)) != 0 {
                plot(target, x + col, y + row, color);
            }
        }
    }
}
