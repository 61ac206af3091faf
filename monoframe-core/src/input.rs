//! Button flag set
//!
//! One bit per face button, laid out to match the handheld's port wiring.
//! Sampling is a plain level read; debouncing is left to the caller.

use bitflags::bitflags;
use monoframe_hal::InputPin;

bitflags! {
    /// Buttons held down, one bit each
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const B     = 0b0000_0001;
        const A     = 0b0000_0010;
        const RIGHT = 0b0000_0100;
        const UP    = 0b0001_0000;
        const LEFT  = 0b0010_0000;
        const DOWN  = 0b0100_0000;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Buttons {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Buttons({=u8:#b})", self.bits());
    }
}

/// Held at power-on to skip the application and park for reflashing
pub const SAFE_MODE: Buttons = Buttons::LEFT.union(Buttons::UP);

impl Buttons {
    /// Every button in `mask` is held
    pub fn pressed(self, mask: Buttons) -> bool {
        self.contains(mask)
    }

    /// No button in `mask` is held
    pub fn not_pressed(self, mask: Buttons) -> bool {
        !self.intersects(mask)
    }
}

/// Six active-low button inputs
pub struct ButtonPins<P> {
    pub up: P,
    pub down: P,
    pub left: P,
    pub right: P,
    pub a: P,
    pub b: P,
}

impl<P: InputPin> ButtonPins<P> {
    /// Sample all inputs; a low pin reads as held
    pub fn read(&self) -> Buttons {
        [
            (&self.up, Buttons::UP),
            (&self.down, Buttons::DOWN),
            (&self.left, Buttons::LEFT),
            (&self.right, Buttons::RIGHT),
            (&self.a, Buttons::A),
            (&self.b, Buttons::B),
        ]
        .into_iter()
        .filter(|(pin, _)| pin.is_low())
        .fold(Buttons::empty(), |held, (_, flag)| held | flag)
    }
}
