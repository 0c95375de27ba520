//! Bind Heartbeat
//!
//! Alternates the two LEDs while the receiver waits for a transmitter.
//! [`Heartbeat::update`] never blocks: it returns at once unless more than
//! the rate interval has passed since the last toggle, so it can be called
//! on every poll.

use crate::hal::indicator::{Indicator, Indicators};

/// Which LED the heartbeat lit last
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeartbeatPhase {
    /// LED1 on, LED2 off (next toggle lights LED2)
    #[default]
    Led1Lit,
    /// LED1 off, LED2 on (next toggle lights LED1)
    Led2Lit,
}

impl HeartbeatPhase {
    /// Phase after one toggle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Led1Lit => Self::Led2Lit,
            Self::Led2Lit => Self::Led1Lit,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for HeartbeatPhase {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Led1Lit => defmt::write!(f, "LED1"),
            Self::Led2Lit => defmt::write!(f, "LED2"),
        }
    }
}

/// Alternating two-LED heartbeat
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heartbeat {
    phase: HeartbeatPhase,
    last_toggle_ms: u32,
}

impl Heartbeat {
    /// Create a heartbeat armed at `now_ms`
    #[must_use]
    pub const fn new(now_ms: u32) -> Self {
        Self {
            phase: HeartbeatPhase::Led1Lit,
            last_toggle_ms: now_ms,
        }
    }

    /// Restart the rate interval from `now_ms` without toggling
    pub fn arm(&mut self, now_ms: u32) {
        self.last_toggle_ms = now_ms;
    }

    /// Toggle the LEDs if strictly more than `rate_ms` has elapsed
    ///
    /// Returns `true` if the LEDs changed. Elapsed time uses wrapping
    /// arithmetic, so the millisecond counter rolling over is harmless.
    pub fn update<I: Indicators>(&mut self, now_ms: u32, rate_ms: u32, leds: &mut I) -> bool {
        if now_ms.wrapping_sub(self.last_toggle_ms) <= rate_ms {
            return false;
        }

        self.last_toggle_ms = now_ms;
        self.phase = self.phase.next();
        match self.phase {
            HeartbeatPhase::Led1Lit => {
                leds.set_indicator(Indicator::Led1, true);
                leds.set_indicator(Indicator::Led2, false);
            }
            HeartbeatPhase::Led2Lit => {
                leds.set_indicator(Indicator::Led1, false);
                leds.set_indicator(Indicator::Led2, true);
            }
        }
        true
    }

    /// Switch both LEDs off
    pub fn off<I: Indicators>(&self, leds: &mut I) {
        leds.set_indicator(Indicator::Led1, false);
        leds.set_indicator(Indicator::Led2, false);
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> HeartbeatPhase {
        self.phase
    }

    /// Time of the last toggle (or arm)
    #[must_use]
    pub const fn last_toggle_ms(&self) -> u32 {
        self.last_toggle_ms
    }
}
