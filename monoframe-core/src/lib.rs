//! Board-agnostic graphics core for 128x64 monochrome displays
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Bit-packed framebuffer with checked/unchecked addressing
//! - Rasterizer (lines, circles, rectangles, triangles, bitmaps, glyphs)
//! - Text cursor and byte-oriented text writer
//! - Frame pacer (frame-rate governor and load accounting)
//! - Button flag set
//! - Configuration type definitions
//! - Debug export encoders (array literal, hex, SVG)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod export;
pub mod framebuffer;
pub mod input;
pub mod pacer;
pub mod raster;
pub mod text;

pub use config::{Config, ConfigError, TextConfig, Zoom};
pub use export::{ExportError, ExportWindow};
pub use framebuffer::{Addressing, Color, FrameBuffer, BUFFER_LEN, HEIGHT, PAGES, WIDTH};
pub use input::{ButtonPins, Buttons};
pub use pacer::{FramePacer, PacerState};
pub use raster::{PixelTarget, Rasterizer};
pub use text::{ByteWriter, TextCursor, TextWriter};
