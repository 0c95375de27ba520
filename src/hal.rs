//! Hardware Abstraction Layer
//!
//! The seams between the link logic and the board: transceiver transport,
//! millisecond clock, and status LEDs. Concrete drivers are generic over
//! `embedded-hal` traits; the mock set backs the host tests.

pub mod clock;
pub mod indicator;
pub mod spi;
pub mod transport;

#[cfg(all(feature = "std", not(feature = "embedded")))]
pub mod mock;
