//! Configuration type definitions

pub use crate::framebuffer::Addressing;
use crate::pacer::DEFAULT_FRAME_RATE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest text scale accepted by [`Config::validate`]
pub const MAX_TEXT_SIZE: u8 = 8;

/// Upper bound on a serialized [`Config`]
pub const MAX_CONFIG_SIZE: usize = 16;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame rate of zero
    InvalidFrameRate,
    /// Text size outside 1..=MAX_TEXT_SIZE
    InvalidTextSize,
    /// Stored blob did not decode
    Decode,
    /// Output buffer too small
    Encode,
}

/// Windowed streaming magnification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Zoom {
    /// 128x64 window, one source pixel per display pixel
    #[default]
    X1,
    /// 64x32 window, 2x2 blocks
    X2,
    /// 32x16 window, 4x4 blocks
    X4,
}

impl Zoom {
    /// Pixel replication factor
    pub const fn scale(self) -> u8 {
        match self {
            Zoom::X1 => 1,
            Zoom::X2 => 2,
            Zoom::X4 => 4,
        }
    }

    /// Parse a replication factor
    pub const fn from_scale(scale: u8) -> Option<Self> {
        match scale {
            1 => Some(Zoom::X1),
            2 => Some(Zoom::X2),
            4 => Some(Zoom::X4),
            _ => None,
        }
    }

    /// Next magnification, wrapping back to 1x
    pub const fn next(self) -> Self {
        match self {
            Zoom::X1 => Zoom::X2,
            Zoom::X2 => Zoom::X4,
            Zoom::X4 => Zoom::X1,
        }
    }
}

/// Text defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextConfig {
    /// Glyph scale factor
    pub size: u8,
    /// Wrap at the right edge
    pub wrap: bool,
}

impl TextConfig {
    pub const fn new() -> Self {
        Self { size: 1, wrap: false }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Target frames per second
    pub frame_rate: u8,
    /// Framebuffer addressing policy
    pub addressing: Addressing,
    /// Initial windowed-stream magnification
    pub zoom: Zoom,
    pub text: TextConfig,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            addressing: Addressing::Checked,
            zoom: Zoom::X1,
            text: TextConfig::new(),
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if !(1..=MAX_TEXT_SIZE).contains(&self.text.size) {
            return Err(ConfigError::InvalidTextSize);
        }
        Ok(())
    }

    /// Decode and validate a stored blob
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Config = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode into `buffer`, returning the number of bytes used
    #[cfg(feature = "serde")]
    pub fn to_postcard(&self, buffer: &mut [u8]) -> Result<usize, ConfigError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| ConfigError::Encode)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
