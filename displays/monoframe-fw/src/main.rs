//! Monoframe - demo firmware for RP2040 boards
//!
//! Boots a 128x64 SPI OLED, then renders a small animated scene at the
//! configured frame rate. Button A cycles the zoom (1x, 2x, 4x); the d-pad
//! moves the cursor the zoomed window follows; button B dumps the centre
//! 32x32 pixels over RTT as hex.
//!
//! Holding LEFT+UP at power-on enters safe mode: the panel is blanked and
//! the firmware parks so the board can be reflashed.
//!
//! # Wiring
//!
//! | Signal | Pin    |
//! |--------|--------|
//! | SCK    | GPIO18 |
//! | MOSI   | GPIO19 |
//! | CS     | GPIO17 |
//! | DC     | GPIO16 |
//! | RST    | GPIO20 |
//! | UP     | GPIO2  |
//! | DOWN   | GPIO3  |
//! | LEFT   | GPIO4  |
//! | RIGHT  | GPIO5  |
//! | A      | GPIO6  |
//! | B      | GPIO7  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use monoframe_core::config::Zoom;
use monoframe_core::export::{write_hex, ExportWindow};
use monoframe_core::input::SAFE_MODE;
use monoframe_core::{ButtonPins, Buttons, FrameBuffer, FramePacer, TextCursor};
use monoframe_display::DisplayController;
use monoframe_hal::embedded::{EhInput, EhOutput, EhTransport};

mod board;
mod demo;

mod config {
    use monoframe_core::config::{Addressing, Config, TextConfig, Zoom};

    include!(concat!(env!("OUT_DIR"), "/display_config.rs"));
}

/// SPI clock for the display bus
const SPI_FREQUENCY_HZ: u32 = 8_000_000;

/// Capacity for one hex dump of the 32x32 export window
const DUMP_CAPACITY: usize = 512;

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Monoframe firmware starting...");

    let p = embassy_rp::init(Default::default());
    let core = unwrap!(cortex_m::Peripherals::take());
    info!("Peripherals initialized");

    let config = config::CONFIG;
    unwrap!(config.validate());
    info!(
        "Config: {} fps, {}, zoom {}x, text size {}",
        config.frame_rate,
        config.addressing,
        config.zoom.scale(),
        config.text.size
    );

    // Display bus
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = EhOutput::new(Output::new(p.PIN_17, Level::High), true);
    let dc = EhOutput::new(Output::new(p.PIN_16, Level::Low), false);
    let mut rst = EhOutput::new(Output::new(p.PIN_20, Level::High), true);

    let buttons = ButtonPins {
        up: EhInput::new(Input::new(p.PIN_2, Pull::Up)),
        down: EhInput::new(Input::new(p.PIN_3, Pull::Up)),
        left: EhInput::new(Input::new(p.PIN_4, Pull::Up)),
        right: EhInput::new(Input::new(p.PIN_5, Pull::Up)),
        a: EhInput::new(Input::new(p.PIN_6, Pull::Up)),
        b: EhInput::new(Input::new(p.PIN_7, Pull::Up)),
    };

    let mut display = DisplayController::new(EhTransport::new(bus), cs, dc);
    display.reset(&mut rst, &mut Delay);
    unwrap!(display.boot());

    let mut fb = FrameBuffer::new(config.addressing);

    if buttons.read().pressed(SAFE_MODE) {
        safe_mode(&mut display, &fb);
    }

    let mut pacer = FramePacer::new(board::UptimeClock, board::TickIdle::new(core.SYST));
    pacer.configure(config.frame_rate);

    let mut text = TextCursor::new();
    text.set_text_size(config.text.size);
    text.set_text_wrap(config.text.wrap);

    let mut scene = demo::Scene::new();
    let mut zoom = config.zoom;
    let mut previous = Buttons::empty();

    info!(
        "Entering render loop ({} ms per frame)",
        pacer.target_interval_ms()
    );

    loop {
        if !pacer.poll() {
            continue;
        }

        let held = buttons.read();
        let pressed = held & !previous;
        previous = held;

        if pressed.contains(Buttons::A) {
            zoom = zoom.next();
            info!("Zoom {}x", zoom.scale());
        }
        if pressed.contains(Buttons::B) {
            dump(&fb);
        }

        scene.update(held);
        scene.render(&mut fb, &mut text, pacer.frame_count(), pacer.load());

        let (cx, cy) = scene.cursor();
        let streamed = match zoom {
            Zoom::X1 => display.stream_full(&fb),
            _ => display.stream_windowed(&fb, zoom, cx, cy),
        };
        if let Err(e) = streamed {
            error!("Display stream failed: {}", e);
        }

        if pacer.every_x_frames(u32::from(config.frame_rate) * 10) {
            debug!("{} frames, load {}%", pacer.frame_count(), pacer.load());
        }
    }
}

/// Show the (blank) buffer once and park
fn safe_mode<T, CS, DC>(display: &mut DisplayController<T, CS, DC>, fb: &FrameBuffer) -> !
where
    T: monoframe_hal::ByteTransport,
    CS: monoframe_hal::OutputPin,
    DC: monoframe_hal::OutputPin,
{
    warn!("Safe mode: LEFT+UP held at boot, parking for reflash");
    if display.stream_full(fb).is_err() {
        error!("Failed to blank display");
    }
    loop {
        cortex_m::asm::nop();
    }
}

/// Log the centre 32x32 pixels as hex
fn dump(fb: &FrameBuffer) {
    let mut out: String<DUMP_CAPACITY> = String::new();
    match write_hex(&mut out, fb, ExportWindow::W32) {
        Ok(()) => info!("Frame dump (32x32):\n{}", out.as_str()),
        Err(_) => warn!("Frame dump exceeds {} bytes", DUMP_CAPACITY),
    }
}
