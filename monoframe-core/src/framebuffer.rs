//! Bit-packed 1bpp framebuffer
//!
//! Layout matches the controller's horizontal addressing mode: the buffer is
//! a sequence of pages, each page `WIDTH` bytes long. Byte `page * WIDTH + x`
//! holds the 8 vertically stacked pixels of column `x` for rows
//! `page * 8 .. page * 8 + 8`, with bit 0 at the top.

use crate::raster::PixelTarget;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Buffer size in bytes
pub const BUFFER_LEN: usize = WIDTH * PAGES;

/// Pixel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// Pixel dark (bit clear)
    #[default]
    Off,
    /// Pixel lit (bit set)
    On,
}

impl Color {
    /// Opposite color
    pub const fn inverse(self) -> Self {
        match self {
            Color::Off => Color::On,
            Color::On => Color::Off,
        }
    }

    /// Whether the pixel is lit
    pub const fn is_on(self) -> bool {
        matches!(self, Color::On)
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

/// Pixel addressing policy
///
/// `Checked` drops any access outside the buffer. `Unchecked` skips the
/// per-axis range test: coordinates are truncated to `u8` and the byte
/// index is computed directly, so an x past the right edge lands in the
/// following page. Only the final index is kept inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Addressing {
    #[default]
    Checked,
    Unchecked,
}

/// Byte index of column `x` in `page`
#[inline]
pub const fn byte_index(x: usize, page: usize) -> usize {
    page * WIDTH + x
}

/// Bit mask selecting row `y` within its page byte
#[inline]
pub const fn bit_mask(y: usize) -> u8 {
    1 << (y % 8)
}

/// Off-screen framebuffer
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
    addressing: Addressing,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(Addressing::Checked)
    }
}

impl FrameBuffer {
    /// Create a zero-filled framebuffer
    pub const fn new(addressing: Addressing) -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
            addressing,
        }
    }

    /// Current addressing policy
    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Change the addressing policy
    pub fn set_addressing(&mut self, addressing: Addressing) {
        self.addressing = addressing;
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        WIDTH
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        HEIGHT
    }

    /// Resolve a coordinate to (byte index, bit mask)
    fn locate(&self, x: i16, y: i16) -> Option<(usize, u8)> {
        match self.addressing {
            Addressing::Checked => {
                if x < 0 || x >= WIDTH as i16 || y < 0 || y >= HEIGHT as i16 {
                    return None;
                }
                let (x, y) = (x as usize, y as usize);
                Some((byte_index(x, y / 8), bit_mask(y)))
            }
            Addressing::Unchecked => {
                let (x, y) = (x as u8 as usize, y as u8 as usize);
                let index = byte_index(x, y / 8);
                (index < BUFFER_LEN).then_some((index, bit_mask(y)))
            }
        }
    }

    /// Read one pixel, 1 = lit
    ///
    /// Out-of-range coordinates read as 0.
    pub fn get(&self, x: i16, y: i16) -> u8 {
        match self.locate(x, y) {
            Some((index, mask)) => (self.bytes[index] & mask != 0) as u8,
            None => 0,
        }
    }

    /// Write one pixel
    pub fn set(&mut self, x: i16, y: i16, color: Color) {
        if let Some((index, mask)) = self.locate(x, y) {
            match color {
                Color::On => self.bytes[index] |= mask,
                Color::Off => self.bytes[index] &= !mask,
            }
        }
    }

    /// Invert one pixel
    pub fn flip(&mut self, x: i16, y: i16) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.bytes[index] ^= mask;
        }
    }

    /// Fill every byte with 0x00 (Off) or 0xFF (On)
    pub fn clear(&mut self, color: Color) {
        let value = match color {
            Color::Off => 0x00,
            Color::On => 0xFF,
        };
        self.bytes.fill(value);
    }

    /// Raw page-ordered bytes
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.bytes
    }

    /// Mutable raw page-ordered bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8; BUFFER_LEN] {
        &mut self.bytes
    }

    /// One page (8 pixel rows) as a slice of `WIDTH` column bytes
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let start = byte_index(0, page);
        self.bytes.get(start..start + WIDTH)
    }
}

impl PixelTarget for FrameBuffer {
    fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.set(x, y, color);
    }

    fn width(&self) -> i16 {
        WIDTH as i16
    }

    fn height(&self) -> i16 {
        HEIGHT as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_blank() {
        let fb = FrameBuffer::default();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.as_bytes().len(), 1024);
    }

    #[test]
    fn test_page_bit_layout() {
        let mut fb = FrameBuffer::default();
        fb.set(5, 11, Color::On);
        // page 1, bit 3
        assert_eq!(fb.as_bytes()[WIDTH + 5], 0b0000_1000);
        assert_eq!(fb.get(5, 11), 1);
        assert_eq!(fb.get(5, 10), 0);
    }

    #[test]
    fn test_clear_fills_bytes() {
        let mut fb = FrameBuffer::default();
        fb.clear(Color::On);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        fb.clear(Color::Off);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_checked_out_of_range_is_noop() {
        let mut fb = FrameBuffer::default();
        fb.set(-1, 0, Color::On);
        fb.set(128, 0, Color::On);
        fb.set(0, -1, Color::On);
        fb.set(0, 64, Color::On);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.get(200, 3), 0);
        assert_eq!(fb.get(-5, -5), 0);
    }

    #[test]
    fn test_unchecked_aliases_into_next_page() {
        let mut fb = FrameBuffer::new(Addressing::Unchecked);
        // x = 130 wraps into page 1 column 2 via raw index arithmetic
        fb.set(130, 0, Color::On);
        assert_eq!(fb.as_bytes()[byte_index(2, 1)], 0x01);
        assert_eq!(fb.get(130, 0), 1);
    }

    #[test]
    fn test_unchecked_never_escapes_buffer() {
        let mut fb = FrameBuffer::new(Addressing::Unchecked);
        fb.set(255, 255, Color::On);
        fb.set(-1, -1, Color::On);
        assert_eq!(fb.get(255, 255), 0);
    }

    #[test]
    fn test_flip_toggles() {
        let mut fb = FrameBuffer::default();
        fb.flip(10, 20);
        assert_eq!(fb.get(10, 20), 1);
        fb.flip(10, 20);
        assert_eq!(fb.get(10, 20), 0);
    }

    #[test]
    fn test_page_slice() {
        let mut fb = FrameBuffer::default();
        fb.set(127, 63, Color::On);
        assert_eq!(fb.page(7).unwrap()[127], 0x80);
        assert!(fb.page(8).is_none());
    }

    proptest! {
        #[test]
        fn prop_set_get_independent(x in 0i16..128, y in 0i16..64, fill in any::<bool>()) {
            let mut fb = FrameBuffer::default();
            fb.clear(Color::from(fill));

            fb.set(x, y, Color::On);
            prop_assert_eq!(fb.get(x, y), 1);
            fb.set(x, y, Color::Off);
            prop_assert_eq!(fb.get(x, y), 0);

            // Neighbours sharing the same byte are untouched
            let page_top = y - y % 8;
            for row in page_top..page_top + 8 {
                if row != y {
                    prop_assert_eq!(fb.get(x, row), fill as u8);
                }
            }
        }

        #[test]
        fn prop_checked_ignores_out_of_range(x in any::<i16>(), y in any::<i16>()) {
            let mut fb = FrameBuffer::default();
            fb.set(x, y, Color::On);
            let inside = (0..128).contains(&x) && (0..64).contains(&y);
            let lit = fb.as_bytes().iter().map(|b| b.count_ones()).sum::<u32>();
            prop_assert_eq!(lit, inside as u32);
        }
    }
}
