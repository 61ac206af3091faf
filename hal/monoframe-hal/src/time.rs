//! Time abstractions
//!
//! The frame pacer needs a monotonic millisecond clock and a way to put the
//! processor to sleep until the next periodic timer tick.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds elapsed since boot
    ///
    /// Must never go backwards.
    fn now_ms(&self) -> u64;
}

/// Low-power wait
pub trait Idle {
    /// Suspend the processor until the next wake event
    ///
    /// Implementations are expected to resume no later than the next
    /// periodic timer tick (typically 1 ms).
    fn idle(&mut self);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<T: Idle + ?Sized> Idle for &mut T {
    fn idle(&mut self) {
        (**self).idle()
    }
}
