//! Midpoint circle
//!
//! All circle primitives share the same incremental walk over one octant;
//! the callers mirror each step into the quadrants they need.

use super::{corner, half, plot, vspan, PixelTarget};
use crate::framebuffer::Color;

/// Octant walk of the midpoint algorithm, yielding (x, y) with x < y
/// growing from (1, ~r) until the diagonal
struct Midpoint {
    f: i32,
    ddf_x: i32,
    ddf_y: i32,
    x: i32,
    y: i32,
}

impl Midpoint {
    fn new(r: i32) -> Self {
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for Midpoint {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.y {
            return None;
        }

        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }

        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;

        Some((self.x, self.y))
    }
}

pub(super) fn draw_circle<T: PixelTarget + ?Sized>(target: &mut T, x0: i32, y0: i32, r: i32, color: Color) {
    plot(target, x0, y0 + r, color);
    plot(target, x0, y0 - r, color);
    plot(target, x0 + r, y0, color);
    plot(target, x0 - r, y0, color);

    for (x, y) in Midpoint::new(r) {
        plot(target, x0 + x, y0 + y, color);
        plot(target, x0 - x, y0 + y, color);
        plot(target, x0 + x, y0 - y, color);
        plot(target, x0 - x, y0 - y, color);
        plot(target, x0 + y, y0 + x, color);
        plot(target, x0 - y, y0 + x, color);
        plot(target, x0 + y, y0 - x, color);
        plot(target, x0 - y, y0 - x, color);
    }
}

pub(super) fn draw_circle_helper<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    r: i32,
    corners: u8,
    color: Color,
) {
    for (x, y) in Midpoint::new(r) {
        if corners & corner::BOTTOM_RIGHT != 0 {
            plot(target, x0 + x, y0 + y, color);
            plot(target, x0 + y, y0 + x, color);
        }
        if corners & corner::TOP_RIGHT != 0 {
            plot(target, x0 + x, y0 - y, color);
            plot(target, x0 + y, y0 - x, color);
        }
        if corners & corner::BOTTOM_LEFT != 0 {
            plot(target, x0 - y, y0 + x, color);
            plot(target, x0 - x, y0 + y, color);
        }
        if corners & corner::TOP_LEFT != 0 {
            plot(target, x0 - y, y0 - x, color);
            plot(target, x0 - x, y0 - y, color);
        }
    }
}

pub(super) fn fill_circle_helper<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    r: i32,
    halves: u8,
    delta: i32,
    color: Color,
) {
    for (x, y) in Midpoint::new(r) {
        if halves & half::RIGHT != 0 {
            vspan(target, x0 + x, y0 - y, 2 * y + 1 + delta, color);
            vspan(target, x0 + y, y0 - x, 2 * x + 1 + delta, color);
        }
        if halves & half::LEFT != 0 {
            vspan(target, x0 - x, y0 - y, 2 * y + 1 + delta, color);
            vspan(target, x0 - y, y0 - x, 2 * x + 1 + delta, color);
        }
    }
}
