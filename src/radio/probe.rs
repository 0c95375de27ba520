//! Chip Identity Probe
//!
//! Tells a genuine nRF24L01 apart from a Beken BK2421/BK2423 clone and
//! applies the clone's bank-1 calibration.
//!
//! The Beken ACTIVATE code (0x53) toggles the register bank; on a BK2423
//! the status register then reports bank 1 in bit 7. A genuine nRF24L01
//! ignores the code, so the probe is harmless there. The closing ACTIVATE
//! returns a clone to bank 0 and is issued whatever the result.

use crate::hal::transport::{status, Transport};
use crate::radio::registers::STATUS;
use crate::types::ChipIdentity;

/// One 4-byte bank-1 register write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankWrite {
    /// Bank-1 register address
    pub reg: u8,
    /// Value, least significant byte first
    pub value: [u8; 4],
}

impl BankWrite {
    const fn new(reg: u8, value: [u8; 4]) -> Self {
        Self { reg, value }
    }
}

/// BK2423 bank-1 calibration, in write order
///
/// Register 4 is written three times. The last two writes must stay in this
/// order: the transient 0xDF value is superseded by the final 0xD9.
pub const BK2423_CALIBRATION: [BankWrite; 10] = [
    BankWrite::new(0x00, [0x40, 0x4B, 0x01, 0xE2]),
    BankWrite::new(0x01, [0xC0, 0x4B, 0x00, 0x00]),
    BankWrite::new(0x02, [0xD0, 0xFC, 0x8C, 0x02]),
    BankWrite::new(0x03, [0x99, 0x00, 0x39, 0x21]),
    BankWrite::new(0x04, [0xD9, 0x96, 0x82, 0x1B]),
    BankWrite::new(0x05, [0x24, 0x06, 0x7F, 0xA6]),
    BankWrite::new(0x0C, [0x00, 0x12, 0x73, 0x00]),
    BankWrite::new(0x0D, [0x46, 0xB4, 0x80, 0x00]),
    BankWrite::new(0x04, [0xDF, 0x96, 0x82, 0x1B]),
    BankWrite::new(0x04, [0xD9, 0x96, 0x82, 0x1B]),
];

/// Probe for a BK2423 and calibrate it if found
///
/// Must run after the bank-0 configuration and before the FIFOs are
/// flushed. Never fails: without the bank flag the calibration is skipped.
pub fn probe_clone_chip<T: Transport>(transport: &mut T) -> ChipIdentity {
    transport.activate_clone_unlock();

    let identity = if transport.read_register(STATUS) & status::BANK != 0 {
        for write in &BK2423_CALIBRATION {
            transport.write_register_block(write.reg, &write.value);
        }
        ChipIdentity::Bk2423
    } else {
        ChipIdentity::Nrf24
    };

    transport.activate_clone_unlock();

    match identity {
        ChipIdentity::Bk2423 => info!("BK2423 detected, bank 1 calibrated"),
        ChipIdentity::Nrf24 => debug!("no Beken bank flag, nRF24L01 assumed"),
    }

    identity
}
