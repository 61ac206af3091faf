//! Scroll-follow window for zoomed streaming
//!
//! At 2x and 4x only part of the framebuffer fits on the panel. The
//! viewport tracks which part, and jumps (in 4-pixel steps) whenever the
//! cursor leaves it.

use monoframe_core::{Zoom, HEIGHT, WIDTH};

/// Grid the window origin snaps to
const SNAP: u8 = 4;

/// Visible framebuffer region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Viewport {
    /// Left column
    pub x: u8,
    /// Top row
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Viewport {
    /// Centred starting window for a zoom level
    pub const fn baseline(zoom: Zoom) -> Self {
        let (x, y) = match zoom {
            Zoom::X1 => (0, 0),
            Zoom::X2 => (32, 16),
            Zoom::X4 => (48, 24),
        };
        let scale = zoom.scale();
        Self {
            x,
            y,
            width: (WIDTH / scale as usize) as u8,
            height: (HEIGHT / scale as usize) as u8,
        }
    }

    /// Whether (x, y) is inside the window
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x >= self.x
            && u16::from(x) < u16::from(self.x) + u16::from(self.width)
            && y >= self.y
            && u16::from(y) < u16::from(self.y) + u16::from(self.height)
    }

    /// Move the window so the cursor is inside it
    ///
    /// Returns `true` if the window moved. The cursor must already be
    /// inside the framebuffer.
    pub fn follow(&mut self, x: u8, y: u8) -> bool {
        let before = (self.x, self.y);
        self.x = follow_axis(self.x, self.width, x);
        self.y = follow_axis(self.y, self.height, y);
        (self.x, self.y) != before
    }
}

fn follow_axis(origin: u8, size: u8, cursor: u8) -> u8 {
    let snapped = cursor & !(SNAP - 1);
    if cursor < origin {
        snapped
    } else if u16::from(cursor) >= u16::from(origin) + u16::from(size) {
        (snapped + SNAP).saturating_sub(size)
    } else {
        origin
    }
}
