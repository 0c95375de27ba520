//! Millisecond Clock
//!
//! Monotonic millisecond time source for heartbeat timing. Wraps at
//! `u32::MAX`; callers compare with wrapping subtraction.

/// Monotonic millisecond clock
pub trait MillisClock {
    /// Milliseconds since boot (wrapping)
    fn now_millis(&self) -> u32;
}

/// Clock backed by the embassy time driver
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embedded")]
impl MillisClock for EmbassyClock {
    fn now_millis(&self) -> u32 {
        // Truncation is the wrap the heartbeat arithmetic expects
        #[allow(clippy::cast_possible_truncation)]
        let ms = embassy_time::Instant::now().as_millis() as u32;
        ms
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EmbassyClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EmbassyClock({=u32}ms)", self.now_millis());
    }
}
