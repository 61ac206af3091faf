//! Cursor-driven text output
//!
//! [`TextCursor`] owns the position and style; [`TextWriter`] pairs a cursor
//! with a [`PixelTarget`] for the duration of a write. The writer implements
//! [`core::fmt::Write`], so numbers and formatted values go through
//! `write!` like any other sink.

pub mod font;

use core::fmt;

use crate::framebuffer::Color;
use crate::raster::{PixelTarget, Rasterizer};

/// Sink for single text bytes
pub trait ByteWriter {
    fn write_byte(&mut self, byte: u8);

    /// Write every byte of a slice in order
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}

/// Text position and style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    x: i16,
    y: i16,
    size: u8,
    wrap: bool,
    color: Color,
    bg: Color,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCursor {
    /// Cursor at the origin, size 1, no wrap, lit text on a dark cell
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            size: 1,
            wrap: false,
            color: Color::On,
            bg: Color::Off,
        }
    }

    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    pub fn cursor(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Glyph scale factor; 0 is treated as 1
    pub fn set_text_size(&mut self, size: u8) {
        self.size = size.max(1);
    }

    pub fn text_size(&self) -> u8 {
        self.size
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn text_wrap(&self) -> bool {
        self.wrap
    }

    /// Foreground and background; `bg == color` leaves the cell transparent
    pub fn set_colors(&mut self, color: Color, bg: Color) {
        self.color = color;
        self.bg = bg;
    }

    pub fn colors(&self) -> (Color, Color) {
        (self.color, self.bg)
    }

    /// Borrow a target for writing at this cursor
    pub fn writer<'a, T: PixelTarget + ?Sized>(&'a mut self, target: &'a mut T) -> TextWriter<'a, T> {
        TextWriter { cursor: self, target }
    }

    fn line_feed(&mut self) {
        self.x = 0;
        self.y = self.y.saturating_add(i16::from(self.size) * font::CELL_HEIGHT as i16);
    }
}

/// A cursor bound to a drawing target
pub struct TextWriter<'a, T: PixelTarget + ?Sized> {
    cursor: &'a mut TextCursor,
    target: &'a mut T,
}

impl<T: PixelTarget + ?Sized> TextWriter<'_, T> {
    pub fn cursor(&self) -> &TextCursor {
        self.cursor
    }
}

impl<T: PixelTarget + ?Sized> ByteWriter for TextWriter<'_, T> {
    fn write_byte(&mut self, byte: u8) {
        let cursor = &mut *self.cursor;
        match byte {
            b'\n' => cursor.line_feed(),
            b'\r' => {}
            _ => {
                self.target
                    .draw_char(cursor.x, cursor.y, byte, cursor.color, cursor.bg, cursor.size);

                let advance = i16::from(cursor.size) * font::CELL_WIDTH as i16;
                cursor.x = cursor.x.saturating_add(advance);
                if cursor.wrap && cursor.x > self.target.width() - advance {
                    cursor.line_feed();
                }
            }
        }
    }
}

impl<T: PixelTarget + ?Sized> fmt::Write for TextWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::raster::testing::Recorder;
    use core::fmt::Write;

    #[test]
    fn test_defaults() {
        let cursor = TextCursor::default();
        assert_eq!(cursor.cursor(), (0, 0));
        assert_eq!(cursor.text_size(), 1);
        assert!(!cursor.text_wrap());
        assert_eq!(cursor.colors(), (Color::On, Color::Off));
    }

    #[test]
    fn test_text_size_zero_is_one() {
        let mut cursor = TextCursor::new();
        cursor.set_text_size(0);
        assert_eq!(cursor.text_size(), 1);
        cursor.set_text_size(3);
        assert_eq!(cursor.text_size(), 3);
    }

    #[test]
    fn test_advance_per_char() {
        let mut fb = FrameBuffer::default();
        let mut cursor = TextCursor::new();
        cursor.set_text_size(2);
        cursor.writer(&mut fb).write_bytes(b"AB");
        assert_eq!(cursor.cursor(), (24, 0));
    }

    #[test]
    fn test_newline_and_carriage_return() {
        let mut fb = FrameBuffer::default();
        let mut cursor = TextCursor::new();
        cursor.set_cursor(30, 4);

        let mut writer = cursor.writer(&mut fb);
        writer.write_byte(b'\r');
        assert_eq!(writer.cursor().cursor(), (30, 4));
        writer.write_byte(b'\n');
        assert_eq!(writer.cursor().cursor(), (0, 12));
    }

    #[test]
    fn test_control_bytes_draw_nothing() {
        let mut rec = Recorder::default();
        let mut cursor = TextCursor::new();
        cursor.writer(&mut rec).write_bytes(b"\r\n\r");
        assert!(rec.writes.is_empty());
    }

    #[test]
    fn test_wrap_moves_to_next_line() {
        let mut fb = FrameBuffer::default();
        let mut cursor = TextCursor::new();
        cursor.set_text_wrap(true);
        cursor.set_cursor(114, 0);

        let mut writer = cursor.writer(&mut fb);
        // 114 + 6 = 120 > 122? no
        writer.write_byte(b'x');
        assert_eq!(writer.cursor().cursor(), (120, 0));
        // 126 > 122
        writer.write_byte(b'x');
        assert_eq!(writer.cursor().cursor(), (0, 8));
    }

    #[test]
    fn test_no_wrap_runs_off_screen() {
        let mut fb = FrameBuffer::default();
        let mut cursor = TextCursor::new();
        cursor.set_cursor(120, 0);
        cursor.writer(&mut fb).write_bytes(b"abc");
        assert_eq!(cursor.cursor(), (138, 0));
    }

    #[test]
    fn test_fmt_write_prints_numbers() {
        let mut fb = FrameBuffer::default();
        let mut cursor = TextCursor::new();
        write!(cursor.writer(&mut fb), "{}", 42).unwrap();
        assert_eq!(cursor.cursor(), (12, 0));

        // '4' column 3 is the full-height stem
        for y in 0..7 {
            assert_eq!(fb.get(3, y), 1);
        }
    }

    #[test]
    fn test_opaque_background_paints_cell() {
        let mut rec = Recorder::default();
        let mut cursor = TextCursor::new();
        cursor.writer(&mut rec).write_byte(b' ');
        // 6x8 cell, every pixel painted with bg
        assert_eq!(rec.writes.len(), 48);
        assert!(rec.writes.iter().all(|&(_, _, c)| c == Color::Off));
    }

    #[test]
    fn test_transparent_background() {
        let mut rec = Recorder::default();
        let mut cursor = TextCursor::new();
        cursor.set_colors(Color::On, Color::On);
        cursor.writer(&mut rec).write_byte(b' ');
        assert!(rec.writes.is_empty());
    }
}
