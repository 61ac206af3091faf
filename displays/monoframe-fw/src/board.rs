//! Board glue for the pacer
//!
//! The monotonic clock comes from the embassy time driver. Idle parks the
//! core with WFI; a 1 ms SysTick guarantees a wake-up every tick.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use embassy_time::Instant;
use monoframe_hal::{Clock, Idle};

/// Core clock after `embassy_rp::init` with default config
const CORE_CLOCK_HZ: u32 = 125_000_000;

/// SysTick period
const TICK_HZ: u32 = 1_000;

/// Milliseconds since boot from the embassy time driver
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// WFI-based idle, woken by the 1 ms SysTick
pub struct TickIdle {
    _syst: SYST,
}

impl TickIdle {
    /// Start the 1 ms tick
    pub fn new(mut syst: SYST) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(CORE_CLOCK_HZ / TICK_HZ - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _syst: syst }
    }
}

impl Idle for TickIdle {
    fn idle(&mut self) {
        cortex_m::asm::wfi();
    }
}

#[exception]
fn SysTick() {}
