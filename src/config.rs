//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the receiver hardware.
//! RF parameters, bind timing, and pin mappings are centralized here.
//! Nothing in the RF setup is negotiated at runtime.

use crate::types::ChipVariant;

/// Payload size in bytes, shared by bind and command packets
pub const PAYLOAD_SIZE: usize = 9;

/// RF channel (2400 MHz + channel)
pub const RF_CHANNEL: u8 = 0x3C;

/// Address width in bytes
pub const ADDRESS_WIDTH: usize = 5;

/// Last byte of the command address derived at bind time
pub const COMMAND_ADDRESS_TERMINATOR: u8 = 0xC1;

/// Heartbeat rate while waiting for the broadcast packet (ms)
pub const BROADCAST_FLASH_RATE_MS: u32 = 500;

/// Heartbeat rate while waiting for the confirmation packet (ms)
pub const CONFIRMATION_FLASH_RATE_MS: u32 = 250;

/// Failsafe threshold in main loop ticks without a decoded frame
pub const FAILSAFE_LIMIT: u8 = 100;

/// Main loop poll interval while binding (ms)
pub const BIND_POLL_INTERVAL_MS: u64 = 1;

/// Main loop poll interval once bound (ms)
pub const STREAM_POLL_INTERVAL_MS: u64 = 2;

/// SPI bus frequency for the transceiver
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Transceiver fitted to this build
#[cfg(feature = "xn297")]
pub const CHIP_VARIANT: ChipVariant = ChipVariant::Xn297;

/// Transceiver fitted to this build
#[cfg(not(feature = "xn297"))]
pub const CHIP_VARIANT: ChipVariant = ChipVariant::Nrf24;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments for the CX-10 flight board

    /// SPI1 SCK to transceiver
    pub const RF_SCK: &str = "PA5";

    /// SPI1 MISO from transceiver
    pub const RF_MISO: &str = "PA6";

    /// SPI1 MOSI to transceiver
    pub const RF_MOSI: &str = "PA7";

    /// Transceiver chip select (active low)
    pub const RF_CSN: &str = "PA4";

    /// Transceiver chip enable (high = radio active)
    pub const RF_CE: &str = "PA3";

    /// First status LED
    pub const LED1: &str = "PA1";

    /// Second status LED
    pub const LED2: &str = "PA2";
}
