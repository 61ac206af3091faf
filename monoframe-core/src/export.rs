//! Debug image export
//!
//! Dumps a fixed window of the framebuffer as text: a Rust array literal,
//! a compact hex blob, or SVG markup. Every encoder writes into any
//! [`core::fmt::Write`] sink (a UART adapter, a `heapless::String`, a
//! `String` in tests) and only reads the buffer.
//!
//! Windows are centred on the screen:
//!
//! | Window | Columns  | Rows   |
//! |--------|----------|--------|
//! | 8x8    | 60..68   | 28..36 |
//! | 16x16  | 56..72   | 24..40 |
//! | 32x32  | 48..80   | 16..48 |
//! | 64x64  | 32..96   | 0..64  |
//! | 128x64 | 0..128   | 0..64  |

use core::fmt::{self, Write};

use crate::framebuffer::{byte_index, FrameBuffer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Encoder failure from the output sink
pub type ExportError = fmt::Error;

/// Bytes per line in the array and hex dumps
const BYTES_PER_LINE: usize = 8;

/// SVG cell pitch; each lit pixel is a 4x4 square with a 1px gap
const SVG_PITCH: usize = 5;

/// Export window size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExportWindow {
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl ExportWindow {
    /// Every window, smallest first
    pub const ALL: [ExportWindow; 5] = [
        ExportWindow::W8,
        ExportWindow::W16,
        ExportWindow::W32,
        ExportWindow::W64,
        ExportWindow::W128,
    ];

    pub const fn width(self) -> usize {
        match self {
            ExportWindow::W8 => 8,
            ExportWindow::W16 => 16,
            ExportWindow::W32 => 32,
            ExportWindow::W64 => 64,
            ExportWindow::W128 => 128,
        }
    }

    pub const fn height(self) -> usize {
        match self {
            ExportWindow::W8 => 8,
            ExportWindow::W16 => 16,
            ExportWindow::W32 => 32,
            ExportWindow::W64 | ExportWindow::W128 => 64,
        }
    }

    /// Number of bytes the window produces
    pub const fn len(self) -> usize {
        self.width() * self.height() / 8
    }

    /// First source column
    const fn column(self) -> usize {
        match self {
            ExportWindow::W8 => 60,
            ExportWindow::W16 => 56,
            ExportWindow::W32 => 48,
            ExportWindow::W64 => 32,
            ExportWindow::W128 => 0,
        }
    }

    /// First source page
    const fn page(self) -> usize {
        match self {
            ExportWindow::W8 | ExportWindow::W16 => 3,
            ExportWindow::W32 => 2,
            ExportWindow::W64 | ExportWindow::W128 => 0,
        }
    }

    /// Window bytes in page-major order
    pub fn bytes(self, fb: &FrameBuffer) -> WindowBytes<'_> {
        WindowBytes {
            fb,
            window: self,
            index: 0,
        }
    }
}

/// Iterator over a window's column bytes
///
/// Yields `(column, page, byte)` relative to the window. The 8x8 window
/// straddles a page boundary, so its bytes are assembled from the lower
/// nibble-pair of pages 3 and 4.
pub struct WindowBytes<'a> {
    fb: &'a FrameBuffer,
    window: ExportWindow,
    index: usize,
}

impl Iterator for WindowBytes<'_> {
    type Item = (usize, usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.window.len() {
            return None;
        }
        let width = self.window.width();
        let (column, page) = (self.index % width, self.index / width);
        self.index += 1;

        let bytes = self.fb.as_bytes();
        let x = self.window.column() + column;
        let p = self.window.page() + page;
        let byte = match self.window {
            ExportWindow::W8 => {
                (bytes[byte_index(x, p)] >> 4) | (bytes[byte_index(x, p + 1)] << 4)
            }
            _ => bytes[byte_index(x, p)],
        };
        Some((column, page, byte))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WindowBytes<'_> {}

/// Rust array literal, eight bytes per line
pub fn write_array<W: Write>(
    out: &mut W,
    fb: &FrameBuffer,
    window: ExportWindow,
) -> Result<(), ExportError> {
    write!(out, "const IMAGE: [u8; {}] = [", window.len())?;
    for (i, (_, _, byte)) in window.bytes(fb).enumerate() {
        if i % BYTES_PER_LINE == 0 {
            out.write_str("\n    ")?;
        } else {
            out.write_char(' ')?;
        }
        write!(out, "0x{:02X},", byte)?;
    }
    out.write_str("\n];\n")
}

/// Width and height bytes followed by the window bytes as hex pairs
pub fn write_hex<W: Write>(
    out: &mut W,
    fb: &FrameBuffer,
    window: ExportWindow,
) -> Result<(), ExportError> {
    write!(out, "{:02X}{:02X}", window.width(), window.height())?;
    for (i, (_, _, byte)) in window.bytes(fb).enumerate() {
        if i % BYTES_PER_LINE == 0 {
            out.write_char('\n')?;
        }
        write!(out, "{:02X}", byte)?;
    }
    out.write_char('\n')
}

/// SVG with one rounded square per lit pixel on a black backdrop
pub fn write_svg<W: Write>(
    out: &mut W,
    fb: &FrameBuffer,
    window: ExportWindow,
) -> Result<(), ExportError> {
    let w = window.width() * SVG_PITCH + 1;
    let h = window.height() * SVG_PITCH + 1;
    writeln!(
        out,
        "<svg width=\"{w}\" height=\"{h}\" xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">"
    )?;
    writeln!(out, "  <rect width=\"{w}\" height=\"{h}\" fill=\"black\" />")?;

    for (column, page, byte) in window.bytes(fb) {
        for bit in 0..8 {
            if byte & (1 << bit) != 0 {
                let x = column * SVG_PITCH + 1;
                let y = (page * 8 + bit) * SVG_PITCH + 1;
                writeln!(
                    out,
                    "  <rect rx=\"1\" ry=\"1\" width=\"4\" height=\"4\" x=\"{x}\" y=\"{y}\" fill=\"white\" />"
                )?;
            }
        }
    }

    out.write_str("</svg>")
}
