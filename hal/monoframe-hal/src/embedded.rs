//! Adapters from `embedded-hal` 1.0 to the Monoframe HAL traits
//!
//! Chip HALs (embassy-rp, rp2040-hal, stm32 HALs, ...) implement the
//! `embedded-hal` traits. Wrapping their peripherals in these adapters lets
//! them drive the display controller and read buttons directly.

use core::cell::RefCell;

use embedded_hal::digital;
use embedded_hal::spi::SpiBus;

use crate::gpio::{InputPin, OutputPin};
use crate::spi::ByteTransport;

/// Byte transport over an `embedded-hal` SPI bus
///
/// Each transfer is flushed before returning so the caller can safely
/// toggle the select/mode lines afterwards.
pub struct EhTransport<B> {
    bus: B,
}

impl<B> EhTransport<B> {
    /// Wrap an SPI bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: SpiBus<u8>> ByteTransport for EhTransport<B> {
    type Error = B::Error;

    fn transfer(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.bus.write(&[byte])?;
        self.bus.flush()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(bytes)?;
        self.bus.flush()
    }
}

/// Output pin over an `embedded-hal` digital output
///
/// The last written level is cached, so `is_set_high` does not need a
/// stateful pin. Pin write errors are ignored: GPIO writes on the supported
/// chips are infallible register stores.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap an output pin, driving it to the given initial level
    pub fn new(mut pin: P, high: bool) -> Self {
        if high {
            pin.set_high().ok();
        } else {
            pin.set_low().ok();
        }
        Self { pin, high }
    }

    /// Release the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        self.pin.set_high().ok();
        self.high = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low().ok();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin over an `embedded-hal` digital input
///
/// A read error reads as high, i.e. released on an active-low button.
pub struct EhInput<P> {
    pin: RefCell<P>,
}

impl<P: digital::InputPin> EhInput<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self {
            pin: RefCell::new(pin),
        }
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&self) -> bool {
        self.pin.borrow_mut().is_high().unwrap_or(true)
    }
}
