//! Monoframe Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the display stack so that the
//! framebuffer, rasterizer, pacer and controller driver can run (and be
//! tested) without a board attached.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (monoframe-fw, tests)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ monoframe-    │       │ monoframe-    │
//! │    core       │       │   display     │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monoframe-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (select/mode lines, buttons)
//! - [`spi::ByteTransport`] - Synchronous single-byte bus transfer
//! - [`time::Clock`], [`time::Idle`] - Monotonic milliseconds and low-power wait
//!
//! The [`embedded`] module adapts `embedded-hal` 1.0 implementations to these traits.

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod spi;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use spi::ByteTransport;
pub use time::{Clock, Idle};
