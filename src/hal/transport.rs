//! Transceiver Transport
//!
//! Register, FIFO, and payload access to an nRF24L01-style transceiver.
//! The bind and decode logic only ever talks to the radio through this
//! trait, so it runs unchanged against real SPI or a recording mock.
//!
//! Methods are infallible. Implementations absorb bus failures and report
//! neutral values (no data ready, RX FIFO empty).

use crate::types::Payload;

/// Register addresses the transport itself depends on
pub mod reg {
    /// Register address bits in R_REGISTER / W_REGISTER
    pub const REGISTER_MASK: u8 = 0x1F;
    /// Interrupt flags and pipe number
    pub const STATUS: u8 = 0x07;
    /// Static payload width of pipe 0; pipe N is at `RX_PW_P0 + N`
    pub const RX_PW_P0: u8 = 0x11;
    /// FIFO occupancy
    pub const FIFO_STATUS: u8 = 0x17;
    /// Dynamic payload / ACK payload enables
    pub const FEATURE: u8 = 0x1D;
}

/// FEATURE register bits
pub mod feature {
    /// Dynamic payload length
    pub const EN_DPL: u8 = 0x04;
}

/// Status register bits
pub mod status {
    /// RX data ready (a payload arrived)
    pub const RX_DR: u8 = 0x40;
    /// Data sent (TX)
    pub const TX_DS: u8 = 0x20;
    /// Maximum retransmits reached
    pub const MAX_RT: u8 = 0x10;
    /// Write-1-to-clear mask for all three interrupt flags
    pub const CLEAR: u8 = RX_DR | TX_DS | MAX_RT;
    /// Register bank flag on BK2423 (set after the Beken unlock)
    pub const BANK: u8 = 0x80;
}

/// FIFO status register bits
pub mod fifo {
    /// RX FIFO empty
    pub const RX_EMPTY: u8 = 0x01;
    /// RX FIFO full
    pub const RX_FULL: u8 = 0x02;
    /// TX FIFO empty
    pub const TX_EMPTY: u8 = 0x10;
}

/// Second byte of the ACTIVATE command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivateCode {
    /// Latch FEATURE / DYNPD writes (nRF24L01+, XN297)
    Features = 0x73,
    /// Toggle the BK2423 register bank
    BekenBank = 0x53,
}

impl ActivateCode {
    /// Raw command data byte
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ActivateCode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Features => defmt::write!(f, "ACTIVATE(0x73)"),
            Self::BekenBank => defmt::write!(f, "ACTIVATE(0x53)"),
        }
    }
}

/// Transceiver access primitives
pub trait Transport {
    /// Read a single register
    fn read_register(&mut self, reg: u8) -> u8;

    /// Write a single register
    fn write_register(&mut self, reg: u8, value: u8);

    /// Write a multi-byte register (addresses, calibration banks)
    fn write_register_block(&mut self, reg: u8, data: &[u8]);

    /// Discard everything in the RX FIFO
    fn flush_rx(&mut self);

    /// Discard everything in the TX FIFO
    fn flush_tx(&mut self);

    /// Status register, as returned on every command
    fn status(&mut self) -> u8;

    /// Length of the payload waiting on `pipe`
    ///
    /// With dynamic payloads enabled this is the width of the frame at the
    /// head of the RX FIFO, otherwise the static width configured for `pipe`.
    fn rx_length(&mut self, pipe: u8) -> usize;

    /// Pop one payload from the RX FIFO into `buffer`
    fn read_payload(&mut self, buffer: &mut [u8]);

    /// Queue one payload in the TX FIFO
    fn write_payload(&mut self, data: &[u8]);

    /// Drive chip enable (radio active in RX/TX)
    fn set_radio_enabled(&mut self, enabled: bool);

    /// Issue ACTIVATE with the given code
    fn activate(&mut self, code: ActivateCode);

    /// Clear the RX_DR, TX_DS and MAX_RT flags
    fn clear_status(&mut self) {
        self.write_register(reg::STATUS, status::CLEAR);
    }

    /// Check the data-ready flag
    fn data_ready(&mut self) -> bool {
        self.status() & status::RX_DR != 0
    }

    /// Latch FEATURE / DYNPD register writes
    fn activate_features(&mut self) {
        self.activate(ActivateCode::Features);
    }

    /// Beken clone unlock (register bank toggle)
    fn activate_clone_unlock(&mut self) {
        self.activate(ActivateCode::BekenBank);
    }

    /// Read one fixed-size payload
    fn read_packet(&mut self, payload: &mut Payload) {
        self.read_payload(payload.as_mut_bytes());
    }
}
