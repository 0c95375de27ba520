//! Status Indicators
//!
//! The two board LEDs used as the bind heartbeat.

use embedded_hal::digital::OutputPin;

/// Board LED identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// First LED
    Led1,
    /// Second LED
    Led2,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Indicator {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Led1 => defmt::write!(f, "LED1"),
            Self::Led2 => defmt::write!(f, "LED2"),
        }
    }
}

/// Two independent indicator outputs
pub trait Indicators {
    /// Switch one indicator on or off
    fn set_indicator(&mut self, which: Indicator, on: bool);
}

/// LED pair on two GPIO outputs, lit when driven high
pub struct LedPair<P1, P2> {
    led1: P1,
    led2: P2,
    lit: [bool; 2],
}

impl<P1: OutputPin, P2: OutputPin> LedPair<P1, P2> {
    /// Create an LED pair, both recorded as off
    #[must_use]
    pub fn new(led1: P1, led2: P2) -> Self {
        Self {
            led1,
            led2,
            lit: [false; 2],
        }
    }

    /// Last commanded level of an indicator
    #[must_use]
    pub const fn is_lit(&self, which: Indicator) -> bool {
        match which {
            Indicator::Led1 => self.lit[0],
            Indicator::Led2 => self.lit[1],
        }
    }

    /// Release the pins
    pub fn release(self) -> (P1, P2) {
        (self.led1, self.led2)
    }
}

impl<P1: OutputPin, P2: OutputPin> Indicators for LedPair<P1, P2> {
    fn set_indicator(&mut self, which: Indicator, on: bool) {
        // A failing pin only loses the blink
        match which {
            Indicator::Led1 => {
                let _ = if on { self.led1.set_high() } else { self.led1.set_low() };
                self.lit[0] = on;
            }
            Indicator::Led2 => {
                let _ = if on { self.led2.set_high() } else { self.led2.set_low() };
                self.lit[1] = on;
            }
        }
    }
}
