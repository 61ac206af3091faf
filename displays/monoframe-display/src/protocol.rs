//! Controller command protocol
//!
//! Command bytes for SSD1306-class controllers and the boot sequence sent
//! at power-on. The sequence values are panel configuration constants and
//! are sent exactly as listed.

use monoframe_core::{PAGES, WIDTH};

/// Controller commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

/// Horizontal addressing: the column pointer wraps into the next page
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Last column of the address window
pub const COLUMN_ADDRESS_END: u8 = (WIDTH - 1) as u8;

/// Last page of the address window
pub const PAGE_ADDRESS_END: u8 = (PAGES - 1) as u8;

/// Power-on configuration, sent in command mode
pub const BOOT_SEQUENCE: [u8; 25] = [
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0xF0,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // enable
    cmd::SET_MEMORY_MODE,
    MEMORY_MODE_HORIZONTAL,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_RESUME,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// Address window covering the whole panel, sent after a fresh
/// command-mode entry
pub const ADDRESS_WINDOW: [u8; 8] = [
    cmd::SET_MEMORY_MODE,
    MEMORY_MODE_HORIZONTAL,
    cmd::SET_COLUMN_ADDR,
    0x00,
    COLUMN_ADDRESS_END,
    cmd::SET_PAGE_ADDR,
    0x00,
    PAGE_ADDRESS_END,
];
