//! Shared types used across the receiver firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::config::{ADDRESS_WIDTH, COMMAND_ADDRESS_TERMINATOR, PAYLOAD_SIZE};

/// Five-byte radio link address
///
/// Written to both the receive pipe 0 register and the transmit register,
/// so the link address is always symmetric.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadioAddress([u8; ADDRESS_WIDTH]);

impl RadioAddress {
    /// Bind address used by nRF24L01 / BK2423 transmitters
    pub const BIND_NRF24: Self = Self([0x65; ADDRESS_WIDTH]);

    /// Bind address used by XN297 transmitters
    pub const BIND_XN297: Self = Self([0xCC; ADDRESS_WIDTH]);

    /// Create an address from raw bytes
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_WIDTH]) -> Self {
        Self(bytes)
    }

    /// Derive the private command address from a bind payload
    ///
    /// The transmitter's first four payload bytes identify it; the fifth
    /// address byte is always [`COMMAND_ADDRESS_TERMINATOR`].
    #[must_use]
    pub const fn command_from_payload(payload: &Payload) -> Self {
        let b = payload.as_bytes();
        Self([b[0], b[1], b[2], b[3], COMMAND_ADDRESS_TERMINATOR])
    }

    /// Get the address bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_WIDTH] {
        &self.0
    }
}

impl fmt::Debug for RadioAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "RadioAddress({a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X})")
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:x}", self.0.as_slice());
    }
}

/// Fixed-size packet payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Payload([u8; PAYLOAD_SIZE]);

impl Payload {
    /// Payload length in bytes
    pub const LEN: usize = PAYLOAD_SIZE;

    /// Create a payload from raw bytes
    #[must_use]
    pub const fn new(bytes: [u8; PAYLOAD_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the payload bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.0
    }

    /// Get the payload bytes for the transport to fill
    pub fn as_mut_bytes(&mut self) -> &mut [u8; PAYLOAD_SIZE] {
        &mut self.0
    }

    /// Get a single byte (the index is always in range for a layout)
    #[must_use]
    pub const fn byte(&self, index: usize) -> u8 {
        self.0[index]
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Payload {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:x}", self.0.as_slice());
    }
}

/// Flight-control channel, in the positional order the consumer expects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Throttle (0..=1000)
    Throttle = 0,
    /// Roll (aileron)
    Roll = 1,
    /// Pitch (elevator)
    Pitch = 2,
    /// Yaw (rudder)
    Yaw = 3,
    /// Aux 1, driven by flip-trick events
    Aux1 = 4,
    /// Aux 2 (unused by this link)
    Aux2 = 5,
}

impl Channel {
    /// All channels in positional order
    pub const ALL: [Self; 6] = [
        Self::Throttle,
        Self::Roll,
        Self::Pitch,
        Self::Yaw,
        Self::Aux1,
        Self::Aux2,
    ];

    /// Position of this channel in the command array
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Throttle => defmt::write!(f, "THR"),
            Self::Roll => defmt::write!(f, "ROLL"),
            Self::Pitch => defmt::write!(f, "PITCH"),
            Self::Yaw => defmt::write!(f, "YAW"),
            Self::Aux1 => defmt::write!(f, "AUX1"),
            Self::Aux2 => defmt::write!(f, "AUX2"),
        }
    }
}

/// Decoded channel command set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ChannelCommands([i16; 6]);

impl ChannelCommands {
    /// Throttle lower bound
    pub const THROTTLE_MIN: i16 = 0;

    /// Throttle upper bound
    pub const THROTTLE_MAX: i16 = 1000;

    /// Bound for roll, pitch and yaw (symmetric)
    pub const AXIS_LIMIT: i16 = 500;

    /// Aux channel high/low value
    pub const AUX_LIMIT: i16 = 500;

    /// Create an all-zero command set
    #[must_use]
    pub const fn new() -> Self {
        Self([0; 6])
    }

    /// Get a channel value
    #[must_use]
    pub const fn get(&self, channel: Channel) -> i16 {
        self.0[channel as usize]
    }

    /// Set a channel value
    pub fn set(&mut self, channel: Channel, value: i16) {
        self.0[channel.index()] = value;
    }

    /// Get all channel values in positional order
    #[must_use]
    pub const fn as_array(&self) -> &[i16; 6] {
        &self.0
    }
}

impl Index<Channel> for ChannelCommands {
    type Output = i16;

    fn index(&self, channel: Channel) -> &i16 {
        &self.0[channel.index()]
    }
}

impl IndexMut<Channel> for ChannelCommands {
    fn index_mut(&mut self, channel: Channel) -> &mut i16 {
        &mut self.0[channel.index()]
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelCommands {
    fn format(&self, f: defmt::Formatter) {
        let [t, r, p, y, a1, a2] = self.0;
        defmt::write!(f, "T{} R{} P{} Y{} A1 {} A2 {}", t, r, p, y, a1, a2);
    }
}

/// Link watchdog counter
///
/// Reset on every decoded frame; the consumer ticks it from its own loop
/// and treats an expired counter as link loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FailsafeCounter(u8);

impl FailsafeCounter {
    /// Create a counter at zero
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Signal "link alive"
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Advance by one consumer tick (saturating)
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Current count
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.0
    }

    /// Check if the counter has reached `limit`
    #[must_use]
    pub const fn is_expired(&self, limit: u8) -> bool {
        self.0 >= limit
    }
}

/// Transceiver family fitted to the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipVariant {
    /// nRF24L01 or a register-compatible BK2421/BK2423 clone
    Nrf24,
    /// Panchip XN297
    Xn297,
}

impl ChipVariant {
    /// Bind address transmitters of this family broadcast on
    #[must_use]
    pub const fn bind_address(self) -> RadioAddress {
        match self {
            Self::Nrf24 => RadioAddress::BIND_NRF24,
            Self::Xn297 => RadioAddress::BIND_XN297,
        }
    }

    /// Highest register address worth dumping
    #[must_use]
    pub const fn last_register(self) -> u8 {
        match self {
            Self::Nrf24 => 0x1D,
            Self::Xn297 => 0x1F,
        }
    }

    /// Short name for logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nrf24 => "nRF24L01",
            Self::Xn297 => "XN297",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChipVariant {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// Result of the clone-chip identity probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipIdentity {
    /// Genuine nRF24L01 (or anything not answering the Beken unlock)
    Nrf24,
    /// Beken BK2421/BK2423, calibrated by the probe
    Bk2423,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChipIdentity {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Nrf24 => defmt::write!(f, "nRF24L01"),
            Self::Bk2423 => defmt::write!(f, "BK2423"),
        }
    }
}

/// Bind handshake state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BindState {
    /// Listening on the bind address for the transmitter's broadcast
    #[default]
    WaitingBroadcast,
    /// Switched to the command address, waiting for the first packet on it
    WaitingConfirmation,
    /// Handshake complete (terminal)
    Bound,
}

#[cfg(feature = "embedded")]
impl defmt::Format for BindState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::WaitingBroadcast => defmt::write!(f, "WAIT-BCAST"),
            Self::WaitingConfirmation => defmt::write!(f, "WAIT-CONFIRM"),
            Self::Bound => defmt::write!(f, "BOUND"),
        }
    }
}
