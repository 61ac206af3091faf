//! Bresenham line
//!
//! Steep lines are transposed so the error accumulator always steps along
//! the major axis, and endpoints are swapped so x is non-decreasing.

use super::{plot, PixelTarget};
use crate::framebuffer::Color;

pub(super) fn draw_line<T: PixelTarget + ?Sized>(
    target: &mut T,
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    color: Color,
) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        core::mem::swap(&mut x0, &mut y0);
        core::mem::swap(&mut x1, &mut y1);
    }

    if x0 > x1 {
        core::mem::swap(&mut x0, &mut x1);
        core::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;

    let mut y = y0;
    for x in x0..=x1 {
        if steep {
            plot(target, y, x, color);
        } else {
            plot(target, x, y, color);
        }

        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::framebuffer::{Color, FrameBuffer};
    use crate::raster::testing::*;
    use crate::raster::Rasterizer;
    use proptest::prelude::*;
    use std::{vec, vec::Vec};

    #[test]
    fn test_horizontal_exact() {
        let mut fb = FrameBuffer::default();
        fb.draw_line(0, 0, 4, 0, Color::On);
        assert_eq!(lit_pixels(&fb), (0..=4).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_vertical_exact() {
        let mut fb = FrameBuffer::default();
        fb.draw_line(0, 0, 0, 4, Color::On);
        assert_eq!(lit_pixels(&fb), (0..=4).map(|y| (0, y)).collect::<Vec<_>>());
    }

    #[test]
    fn test_diagonal_monotonic() {
        let mut fb = FrameBuffer::default();
        fb.draw_line(0, 0, 3, 3, Color::On);
        assert_eq!(lit_pixels(&fb), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_single_point() {
        let mut rec = Recorder::default();
        rec.draw_line(7, 9, 7, 9, Color::On);
        assert_eq!(rec.writes, vec![(7, 9, Color::On)]);
    }

    #[test]
    fn test_shallow_reference_pixels() {
        let mut rec = Recorder::default();
        rec.draw_line(0, 0, 5, 2, Color::On);
        let points: Vec<_> = rec.writes.iter().map(|&(x, y, _)| (x, y)).collect();
        // err starts at 2 and drops by 2 per column: y steps after x = 1 and x = 3
        assert_eq!(points, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_reversed_endpoints_match() {
        let mut a = FrameBuffer::default();
        let mut b = FrameBuffer::default();
        a.draw_line(2, 40, 90, 3, Color::On);
        b.draw_line(90, 3, 2, 40, Color::On);
        assert_eq!(lit_pixels(&a), lit_pixels(&b));
    }

    proptest! {
        #[test]
        fn prop_line_is_connected(
            x0 in 0i16..128, y0 in 0i16..64, x1 in 0i16..128, y1 in 0i16..64,
        ) {
            let mut rec = Recorder::default();
            rec.draw_line(x0, y0, x1, y1, Color::On);

            let points: Vec<_> = rec.writes.iter().map(|&(x, y, _)| (x, y)).collect();
            let major = (x1 - x0).abs().max((y1 - y0).abs()) as usize;
            prop_assert_eq!(points.len(), major + 1);
            prop_assert!(points.contains(&(x0, y0)));
            prop_assert!(points.contains(&(x1, y1)));

            for pair in points.windows(2) {
                let (ax, ay) = pair[0];
                let (bx, by) = pair[1];
                prop_assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
                prop_assert!(pair[0] != pair[1]);
            }
        }

        #[test]
        fn prop_line_never_panics(
            x0 in any::<i16>(), y0 in any::<i16>(), x1 in -300i16..300, y1 in -300i16..300,
        ) {
            let mut fb = FrameBuffer::default();
            fb.draw_line(x0, y0, x1, y1, Color::On);
        }
    }
}
