//! Display configuration
//!
//! Board-agnostic settings. The firmware bakes them in at build time from
//! `display.toml`; with the `serde` feature they can also be stored as a
//! postcard blob.

pub mod types;

pub use types::*;
