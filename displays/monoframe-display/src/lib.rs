//! Controller driver for 128x64 monochrome OLEDs
//!
//! This crate provides:
//! - [`DisplayController`]: boot handshake, command/data mode switching,
//!   full-frame and zoomed-window streaming over a [`ByteTransport`]
//! - [`protocol`]: controller command bytes and the fixed boot sequence
//! - [`Viewport`]: the scroll-follow window used by zoomed streaming
//!
//! # Wiring
//!
//! The controller sits on a write-only serial bus plus two control lines:
//! select (active low) and mode (low = command, high = data). After
//! [`DisplayController::boot`] the controller is left in data mode with the
//! address window covering the whole panel, so every frame is simply
//! `BUFFER_LEN` bytes in page order.
//!
//! [`ByteTransport`]: monoframe_hal::ByteTransport

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod controller;
pub mod error;
pub mod protocol;
pub mod viewport;

pub use controller::DisplayController;
pub use error::DisplayError;
pub use viewport::Viewport;
