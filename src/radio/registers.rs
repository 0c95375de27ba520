//! Transceiver register map
//!
//! nRF24L01 register addresses and bit values, with the XN297 additions.
//! BK2423 bank-1 calibration registers reuse addresses 0x00-0x0D while the
//! bank flag is set.

#![allow(missing_docs)]

pub use crate::hal::transport::reg::{FEATURE, FIFO_STATUS, REGISTER_MASK, RX_PW_P0, STATUS};

pub const CONFIG: u8 = 0x00;
pub const EN_AA: u8 = 0x01;
pub const EN_RXADDR: u8 = 0x02;
pub const SETUP_AW: u8 = 0x03;
pub const SETUP_RETR: u8 = 0x04;
pub const RF_CH: u8 = 0x05;
pub const RF_SETUP: u8 = 0x06;
pub const OBSERVE_TX: u8 = 0x08;
pub const RX_ADDR_P0: u8 = 0x0A;
pub const RX_ADDR_P1: u8 = 0x0B;
pub const TX_ADDR: u8 = 0x10;
pub const RX_PW_P1: u8 = 0x12;
pub const RX_PW_P2: u8 = 0x13;
pub const RX_PW_P3: u8 = 0x14;
pub const RX_PW_P4: u8 = 0x15;
pub const RX_PW_P5: u8 = 0x16;
/// Not a register on any supported chip; skipped by the dump
pub const RESERVED_18: u8 = 0x18;
pub const DEM_CAL: u8 = 0x19;
pub const DYNPD: u8 = 0x1C;
pub const RF_CAL: u8 = 0x1E;
pub const BB_CAL: u8 = 0x1F;

/// All six receive-pipe width registers, pipe 0 first
pub const RX_PW: [u8; 6] = [RX_PW_P0, RX_PW_P1, RX_PW_P2, RX_PW_P3, RX_PW_P4, RX_PW_P5];

/// CONFIG bits
pub mod config {
    pub const PRIM_RX: u8 = 0x01;
    pub const PWR_UP: u8 = 0x02;
    pub const CRCO: u8 = 0x04;
    pub const EN_CRC: u8 = 0x08;
}

/// EN_AA / EN_RXADDR / DYNPD value selecting all six pipes
pub const ALL_PIPES: u8 = 0x3F;

/// EN_RXADDR value selecting pipe 0 only
pub const PIPE0_ONLY: u8 = 0x01;

/// SETUP_AW value for 5-byte addresses
pub const AW_5_BYTES: u8 = 0x03;

/// RF_SETUP: 1 Mbps, 0 dBm (nRF24L01)
pub const NRF24_1MBPS_0DBM: u8 = 0x06;

/// RF_SETUP: 0 dBm output (XN297)
pub const XN297_PWR_0DBM: u8 = 0x06;

/// RF_SETUP: LNA high current (XN297)
pub const XN297_LNA: u8 = 0x01;

/// SETUP_RETR: 500 us delay, 10 retransmits
pub const RETR_500US_10: u8 = 0x1A;

/// FEATURE: dynamic payload, ACK payload, NOACK command
pub const FEATURE_ALL: u8 = 0x07;
