//! Transceiver Profiles
//!
//! Register sequences that take each transceiver family from power-on to
//! "powered, PRIM_RX, listening on the bind address, FIFOs empty, status
//! clear". A profile is picked once at startup and never changes.
//!
//! None of the writes are read back. Whether the chip took them shows up
//! only as a successful bind; [`dump`](crate::radio::dump) is the
//! diagnostic for when it does not.

use crate::config::{PAYLOAD_SIZE, RF_CHANNEL};
use crate::hal::transport::Transport;
use crate::radio::decoder::PayloadLayout;
use crate::radio::dump;
use crate::radio::probe::probe_clone_chip;
use crate::radio::registers::{
    self as reg, config, ALL_PIPES, AW_5_BYTES, FEATURE_ALL, NRF24_1MBPS_0DBM, PIPE0_ONLY,
    RETR_500US_10, RX_PW, XN297_LNA, XN297_PWR_0DBM,
};
use crate::types::{ChipIdentity, ChipVariant, RadioAddress};

/// Per-family initialization and packet format
pub trait TransceiverProfile {
    /// Family this profile drives
    fn variant(&self) -> ChipVariant;

    /// Address the radio listens on until bound
    fn bind_address(&self) -> RadioAddress {
        self.variant().bind_address()
    }

    /// Run the full register sequence; call exactly once before binding
    fn initialize<T: Transport>(&mut self, transport: &mut T);

    /// Chip identified during [`initialize`](Self::initialize), if the
    /// family needs probing
    fn identify(&self) -> Option<ChipIdentity>;

    /// Byte positions of the command payload
    fn payload_layout(&self) -> PayloadLayout {
        PayloadLayout::CX10
    }
}

/// Power down, keep CRC and PRIM_RX set
const CONFIG_STANDBY: u8 = config::EN_CRC | config::PRIM_RX;

/// Power up in receive mode
const CONFIG_RX: u8 = config::EN_CRC | config::PWR_UP | config::PRIM_RX;

/// Flush both FIFOs, set the bind address on RX pipe 0 and TX, power up
fn listen_on_bind_address<T: Transport>(transport: &mut T, address: RadioAddress) {
    transport.flush_rx();
    transport.flush_tx();

    transport.write_register_block(reg::RX_ADDR_P0, address.as_bytes());
    transport.write_register_block(reg::TX_ADDR, address.as_bytes());

    transport.write_register(reg::CONFIG, CONFIG_RX);
    transport.set_radio_enabled(true);
}

/// nRF24L01, or a BK2421/BK2423 clone found by the probe
///
/// Auto-acknowledge and dynamic payload length on all six pipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nrf24Profile {
    channel: u8,
    identity: Option<ChipIdentity>,
}

impl Nrf24Profile {
    /// Profile on `channel`
    #[must_use]
    pub const fn new(channel: u8) -> Self {
        Self {
            channel,
            identity: None,
        }
    }
}

impl Default for Nrf24Profile {
    fn default() -> Self {
        Self::new(RF_CHANNEL)
    }
}

impl TransceiverProfile for Nrf24Profile {
    fn variant(&self) -> ChipVariant {
        ChipVariant::Nrf24
    }

    #[allow(clippy::cast_possible_truncation)]
    fn initialize<T: Transport>(&mut self, transport: &mut T) {
        info!("initializing {=str} on channel {=u8}", self.variant().name(), self.channel);
        transport.set_radio_enabled(false);
        transport.write_register(reg::CONFIG, CONFIG_STANDBY);

        transport.write_register(reg::EN_AA, ALL_PIPES);
        transport.write_register(reg::EN_RXADDR, ALL_PIPES);
        transport.write_register(reg::SETUP_AW, AW_5_BYTES);

        transport.write_register(reg::SETUP_RETR, RETR_500US_10);
        transport.write_register(reg::RF_CH, self.channel);
        transport.write_register(reg::RF_SETUP, NRF24_1MBPS_0DBM);
        transport.clear_status();

        for pipe_width in RX_PW {
            transport.write_register(pipe_width, PAYLOAD_SIZE as u8);
        }

        transport.write_register(reg::FIFO_STATUS, 0x00);

        // Written before and after ACTIVATE: chips that need the latch
        // ignore the first pair, the rest keep it.
        transport.write_register(reg::DYNPD, ALL_PIPES);
        transport.write_register(reg::FEATURE, FEATURE_ALL);
        let before = transport.read_register(reg::FEATURE);
        transport.activate_features();
        let after = transport.read_register(reg::FEATURE);
        debug!("FEATURE {=u8:x} -> {=u8:x} across ACTIVATE", before, after);
        transport.write_register(reg::DYNPD, ALL_PIPES);
        transport.write_register(reg::FEATURE, FEATURE_ALL);

        self.identity = Some(probe_clone_chip(transport));

        listen_on_bind_address(transport, self.bind_address());
    }

    fn identify(&self) -> Option<ChipIdentity> {
        self.identity
    }
}

/// XN297 calibration register contents
pub mod xn297_calibration {
    /// Baseband calibration (BB_CAL)
    pub const BB_CAL: [u8; 5] = [0x4C, 0x84, 0x67, 0x9C, 0x20];
    /// RF calibration (RF_CAL)
    pub const RF_CAL: [u8; 7] = [0xC9, 0x9A, 0xB0, 0x61, 0xBB, 0xAB, 0x9C];
    /// Demodulator calibration (DEM_CAL)
    pub const DEM_CAL: [u8; 5] = [0x0B, 0xDF, 0xC4, 0xA7, 0x03];
}

/// XN297: no auto-acknowledge, fixed payload on pipe 0 only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xn297Profile {
    channel: u8,
}

impl Xn297Profile {
    /// Profile on `channel`
    #[must_use]
    pub const fn new(channel: u8) -> Self {
        Self { channel }
    }
}

impl Default for Xn297Profile {
    fn default() -> Self {
        Self::new(RF_CHANNEL)
    }
}

impl TransceiverProfile for Xn297Profile {
    fn variant(&self) -> ChipVariant {
        ChipVariant::Xn297
    }

    #[allow(clippy::cast_possible_truncation)]
    fn initialize<T: Transport>(&mut self, transport: &mut T) {
        info!("initializing {=str} on channel {=u8}", self.variant().name(), self.channel);
        transport.set_radio_enabled(false);
        transport.write_register(reg::CONFIG, CONFIG_STANDBY);

        transport.write_register(reg::EN_AA, 0x00);
        transport.write_register(reg::EN_RXADDR, PIPE0_ONLY);
        transport.write_register(reg::SETUP_AW, AW_5_BYTES);
        transport.write_register(reg::SETUP_RETR, 0x00);

        transport.write_register(reg::RF_CH, self.channel);
        transport.clear_status();

        transport.write_register(reg::RF_SETUP, XN297_PWR_0DBM | XN297_LNA);

        transport.write_register(reg::RX_PW_P0, PAYLOAD_SIZE as u8);
        for pipe_width in &RX_PW[1..] {
            transport.write_register(*pipe_width, 0);
        }

        transport.write_register(reg::FIFO_STATUS, 0x00);

        transport.write_register(reg::DYNPD, 0x00);
        transport.write_register(reg::FEATURE, 0x00);
        transport.activate_features();
        transport.write_register(reg::DYNPD, 0x00);
        transport.write_register(reg::FEATURE, 0x00);

        transport.write_register_block(reg::BB_CAL, &xn297_calibration::BB_CAL);
        transport.write_register_block(reg::RF_CAL, &xn297_calibration::RF_CAL);
        transport.write_register_block(reg::DEM_CAL, &xn297_calibration::DEM_CAL);

        // Second ACTIVATE is required after the calibration writes; keep both.
        transport.activate_features();

        listen_on_bind_address(transport, self.bind_address());

        dump::log_registers(transport, self.variant());
    }

    fn identify(&self) -> Option<ChipIdentity> {
        None
    }
}

/// Profile chosen at runtime from a [`ChipVariant`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnyProfile {
    /// nRF24L01 / BK2423
    Nrf24(Nrf24Profile),
    /// XN297
    Xn297(Xn297Profile),
}

impl AnyProfile {
    /// Profile for `variant` on `channel`
    #[must_use]
    pub const fn for_variant(variant: ChipVariant, channel: u8) -> Self {
        match variant {
            ChipVariant::Nrf24 => Self::Nrf24(Nrf24Profile::new(channel)),
            ChipVariant::Xn297 => Self::Xn297(Xn297Profile::new(channel)),
        }
    }
}

impl Default for AnyProfile {
    fn default() -> Self {
        Self::for_variant(crate::config::CHIP_VARIANT, RF_CHANNEL)
    }
}

impl TransceiverProfile for AnyProfile {
    fn variant(&self) -> ChipVariant {
        match self {
            Self::Nrf24(p) => p.variant(),
            Self::Xn297(p) => p.variant(),
        }
    }

    fn initialize<T: Transport>(&mut self, transport: &mut T) {
        match self {
            Self::Nrf24(p) => p.initialize(transport),
            Self::Xn297(p) => p.initialize(transport),
        }
    }

    fn identify(&self) -> Option<ChipIdentity> {
        match self {
            Self::Nrf24(p) => p.identify(),
            Self::Xn297(p) => p.identify(),
        }
    }

    fn payload_layout(&self) -> PayloadLayout {
        match self {
            Self::Nrf24(p) => p.payload_layout(),
            Self::Xn297(p) => p.payload_layout(),
        }
    }
}
