//! Scanline triangle fill
//!
//! Vertices are sorted by y, then each row's span is found by walking the
//! edges with accumulated `dx * rows` terms divided by the edge height.
//! Rows y0..y1 use edges 0-1 and 0-2, rows y1..=y2 use edges 1-2 and 0-2.

use super::{hspan, PixelTarget};
use crate::framebuffer::Color;

pub(super) fn fill_triangle<T: PixelTarget + ?Sized>(
    target: &mut T,
    mut v: [(i32, i32); 3],
    color: Color,
) {
    // Stable: equal y keeps the caller's vertex order
    // (insertion sort with strict comparisons; `sort_by_key` needs alloc)
    if v[1].1 < v[0].1 {
        v.swap(0, 1);
    }
    if v[2].1 < v[1].1 {
        v.swap(1, 2);
        if v[1].1 < v[0].1 {
            v.swap(0, 1);
        }
    }
    let [(x0, y0), (x1, y1), (x2, y2)] = v;

    if y0 == y2 {
        let a = x0.min(x1).min(x2);
        let b = x0.max(x1).max(x2);
        hspan(target, a, y0, b - a + 1, color);
        return;
    }

    let (dx01, dy01) = (i64::from(x1 - x0), i64::from(y1 - y0));
    let (dx02, dy02) = (i64::from(x2 - x0), i64::from(y2 - y0));
    let (dx12, dy12) = (i64::from(x2 - x1), i64::from(y2 - y1));

    // A flat bottom folds row y1 into the upper phase so the lower phase is
    // empty; otherwise y1 belongs to the lower phase and dy01 may be zero.
    let last = if y1 == y2 { y1 } else { y1 - 1 };

    // dx * rows overflows i32 for vertices spanning the full i16 range
    let mut sa: i64 = 0;
    let mut sb: i64 = 0;
    let mut y = y0;
    while y <= last {
        let a = x0 + (sa / dy01) as i32;
        let b = x0 + (sb / dy02) as i32;
        sa += dx01;
        sb += dx02;
        span(target, a, b, y, color);
        y += 1;
    }

    sa = dx12 * i64::from(y - y1);
    sb = dx02 * i64::from(y - y0);
    while y <= y2 {
        let a = x1 + (sa / dy12) as i32;
        let b = x0 + (sb / dy02) as i32;
        sa += dx12;
        sb += dx02;
        span(target, a, b, y, color);
        y += 1;
    }
}

fn span<T: PixelTarget + ?Sized>(target: &mut T, a: i32, b: i32, y: i32, color: Color) {
    let (left, right) = if a > b { (b, a) } else { (a, b) };
    hspan(target, left, y, right - left + 1, color);
}
