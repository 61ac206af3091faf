//! Frame-rate governor
//!
//! The render loop calls [`FramePacer::poll`] as fast as it likes. `poll`
//! returns `true` once per frame interval; in between it parks the
//! processor with [`Idle::idle`] whenever more than a millisecond remains.
//!
//! ```text
//!        poll() due                 next poll()
//!   Idle ───────────► Rendering ───────────────► Idle
//!    ▲  (start = now)          (duration = now - start)
//!    └─ poll() not due: idle if > 1 ms remains
//! ```

use monoframe_hal::{Clock, Idle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default target frame rate
pub const DEFAULT_FRAME_RATE: u8 = 60;

/// Pacer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PacerState {
    /// No frame in flight
    #[default]
    Idle,
    /// Frame started, closed out by the next poll
    Rendering,
}

/// Target interval for a rate, truncated to whole milliseconds
///
/// 60 fps gives 16 ms (62.5 fps effective). A rate of 0 is treated as 1.
pub const fn interval_for(rate: u8) -> u32 {
    let rate = if rate == 0 { 1 } else { rate };
    1000 / rate as u32
}

/// Frame pacer over an injected clock and idle primitive
pub struct FramePacer<C, I> {
    clock: C,
    idle: I,
    frame_rate: u8,
    interval_ms: u32,
    next_frame_ms: u64,
    frame_start_ms: u64,
    last_duration_ms: u32,
    frame_count: u32,
    state: PacerState,
}

impl<C: Clock, I: Idle> FramePacer<C, I> {
    /// Create a pacer at [`DEFAULT_FRAME_RATE`]; the first poll is due immediately
    pub fn new(clock: C, idle: I) -> Self {
        Self {
            clock,
            idle,
            frame_rate: DEFAULT_FRAME_RATE,
            interval_ms: interval_for(DEFAULT_FRAME_RATE),
            next_frame_ms: 0,
            frame_start_ms: 0,
            last_duration_ms: 0,
            frame_count: 0,
            state: PacerState::Idle,
        }
    }

    /// Set the target frame rate
    ///
    /// Takes effect when the next frame is scheduled.
    pub fn configure(&mut self, rate: u8) {
        self.frame_rate = rate.max(1);
        self.interval_ms = interval_for(rate);
    }

    /// Close out the previous frame and report whether a new one is due
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now_ms();

        if self.state == PacerState::Rendering {
            let elapsed = now.saturating_sub(self.frame_start_ms);
            self.last_duration_ms = u32::try_from(elapsed).unwrap_or(u32::MAX);
            self.frame_count = self.frame_count.wrapping_add(1);
            self.state = PacerState::Idle;

            #[cfg(feature = "defmt")]
            self.log_overrun();
        }

        if now < self.next_frame_ms {
            if self.next_frame_ms - now > 1 {
                self.idle.idle();
            }
            return false;
        }

        self.next_frame_ms = now + u64::from(self.interval_ms);
        self.frame_start_ms = now;
        self.state = PacerState::Rendering;
        true
    }

    /// Last frame's render time as a percentage of the interval
    ///
    /// Exceeds 100 when frames overrun.
    pub fn load(&self) -> u32 {
        self.last_duration_ms.saturating_mul(100) / self.interval_ms
    }

    /// Frames completed since construction
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn last_duration_ms(&self) -> u32 {
        self.last_duration_ms
    }

    pub fn target_interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn frame_rate(&self) -> u8 {
        self.frame_rate
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    #[cfg(feature = "defmt")]
    fn log_overrun(&self) {
        if self.last_duration_ms > self.interval_ms {
            defmt::warn!(
                "frame overrun: {} ms of {} ms ({}%)",
                self.last_duration_ms,
                self.interval_ms,
                self.load()
            );
        }
    }

    /// Whether `frames` divides the current frame count
    ///
    /// Handy for work that should run every Nth frame (blinking cursors,
    /// slow animations).
    pub fn every_x_frames(&self, frames: u32) -> bool {
        frames != 0 && self.frame_count % frames == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeClock<'a>(&'a Cell<u64>);

    impl Clock for FakeClock<'_> {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct CountingIdle {
        calls: u32,
    }

    impl Idle for CountingIdle {
        fn idle(&mut self) {
            self.calls += 1;
        }
    }

    fn pacer(now: &Cell<u64>) -> FramePacer<FakeClock<'_>, CountingIdle> {
        FramePacer::new(FakeClock(now), CountingIdle::default())
    }

    #[test]
    fn test_interval_truncates() {
        assert_eq!(interval_for(60), 16);
        assert_eq!(interval_for(30), 33);
        assert_eq!(interval_for(1), 1000);
        assert_eq!(interval_for(0), 1000);
        assert_eq!(interval_for(255), 3);
    }

    #[test]
    fn test_first_poll_is_due() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        assert!(pacer.poll());
        assert_eq!(pacer.state(), PacerState::Rendering);
    }

    #[test]
    fn test_frames_spaced_by_interval() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        assert_eq!(pacer.target_interval_ms(), 16);
        assert!(pacer.poll());

        now.set(10);
        assert!(!pacer.poll());
        now.set(15);
        assert!(!pacer.poll());
        now.set(16);
        assert!(pacer.poll());
    }

    #[test]
    fn test_due_poll_restarts_frame_timing() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        assert!(pacer.poll());
        now.set(16);
        assert!(pacer.poll());

        now.set(20);
        assert!(!pacer.poll());
        assert_eq!(pacer.last_duration_ms(), 4);
        now.set(30);
        assert!(!pacer.poll());

        now.set(32);
        assert!(pacer.poll());
        now.set(35);
        assert!(!pacer.poll());
        // measured from 32, not from the earlier frame at 16
        assert_eq!(pacer.last_duration_ms(), 3);
        assert_eq!(pacer.frame_count(), 3);
    }

    #[test]
    fn test_close_out_happens_on_every_poll() {
        let now = Cell::new(100);
        let mut pacer = pacer(&now);
        assert!(pacer.poll());

        now.set(105);
        assert!(!pacer.poll());
        assert_eq!(pacer.state(), PacerState::Idle);
        assert_eq!(pacer.frame_count(), 1);
        assert_eq!(pacer.last_duration_ms(), 5);

        // Not pending any more: duration stays put
        now.set(110);
        assert!(!pacer.poll());
        assert_eq!(pacer.frame_count(), 1);
        assert_eq!(pacer.last_duration_ms(), 5);
    }

    #[test]
    fn test_load_exceeds_hundred_on_overrun() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        assert!(pacer.poll());

        now.set(32);
        assert!(pacer.poll());
        assert_eq!(pacer.last_duration_ms(), 32);
        assert_eq!(pacer.load(), 200);
    }

    #[test]
    fn test_deadline_anchors_to_now_after_overrun() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        assert!(pacer.poll());

        now.set(50);
        assert!(pacer.poll());
        // next deadline is 66, not 32
        now.set(60);
        assert!(!pacer.poll());
        now.set(66);
        assert!(pacer.poll());
    }

    #[test]
    fn test_idles_only_when_more_than_a_tick_remains() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        assert!(pacer.poll());

        now.set(10);
        pacer.poll();
        assert_eq!(pacer.idle.calls, 1);

        now.set(15);
        pacer.poll();
        assert_eq!(pacer.idle.calls, 1);
    }

    #[test]
    fn test_configure_changes_interval() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        pacer.configure(30);
        assert_eq!(pacer.target_interval_ms(), 33);
        assert_eq!(pacer.frame_rate(), 30);

        pacer.configure(0);
        assert_eq!(pacer.target_interval_ms(), 1000);
        assert_eq!(pacer.frame_rate(), 1);
    }

    #[test]
    fn test_every_x_frames() {
        let now = Cell::new(0);
        let mut pacer = pacer(&now);
        for t in [0, 16, 32, 48] {
            now.set(t);
            assert!(pacer.poll());
        }
        assert_eq!(pacer.frame_count(), 3);
        assert!(pacer.every_x_frames(3));
        assert!(!pacer.every_x_frames(2));
        assert!(!pacer.every_x_frames(0));
    }
}
