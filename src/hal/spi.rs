//! SPI Transport
//!
//! [`Transport`] over an `embedded-hal` SPI device (chip select handled by
//! the device) plus the chip-enable GPIO, speaking the nRF24L01 command set
//! that BK2423 and XN297 share.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use super::transport::reg::{FEATURE, FIFO_STATUS, REGISTER_MASK, RX_PW_P0};
use super::transport::{feature, fifo, ActivateCode, Transport};

/// SPI command opcodes
mod cmd {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const ACTIVATE: u8 = 0x50;
    pub const NOP: u8 = 0xFF;
}

/// Transport failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// SPI transfer failed
    Spi,
    /// Chip-enable pin could not be driven
    ChipEnable,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransportError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Spi => defmt::write!(f, "SPI transfer failed"),
            Self::ChipEnable => defmt::write!(f, "CE pin failed"),
        }
    }
}

/// Transport operation result
pub type TransportResult<T> = Result<T, TransportError>;

/// nRF24L01-family transceiver on SPI
pub struct SpiTransport<SPI, CE> {
    spi: SPI,
    ce: CE,
    last_error: Option<TransportError>,
    /// Mirrors FEATURE.EN_DPL as last written
    dynamic_payloads: bool,
}

impl<SPI: SpiDevice, CE: OutputPin> SpiTransport<SPI, CE> {
    /// Create the transport with the radio disabled (CE low)
    pub fn new(spi: SPI, mut ce: CE) -> TransportResult<Self> {
        ce.set_low().map_err(|_| TransportError::ChipEnable)?;
        Ok(Self {
            spi,
            ce,
            last_error: None,
            dynamic_payloads: false,
        })
    }

    /// Most recent failure, if any
    #[must_use]
    pub const fn last_error(&self) -> Option<TransportError> {
        self.last_error
    }

    /// Take and clear the most recent failure
    pub fn take_error(&mut self) -> Option<TransportError> {
        self.last_error.take()
    }

    /// Release the bus and pin
    pub fn release(self) -> (SPI, CE) {
        (self.spi, self.ce)
    }

    fn record(&mut self, error: TransportError) {
        self.last_error = Some(error);
    }

    /// Single-byte command, returns the status byte clocked out with it
    fn command(&mut self, opcode: u8) -> u8 {
        let mut buf = [opcode];
        match self.spi.transfer_in_place(&mut buf) {
            Ok(()) => buf[0],
            Err(_) => {
                self.record(TransportError::Spi);
                0
            }
        }
    }

    /// Value reported for `reg` when the bus fails
    const fn neutral_value(reg: u8) -> u8 {
        if reg == FIFO_STATUS {
            fifo::RX_EMPTY | fifo::TX_EMPTY
        } else {
            0
        }
    }
}

impl<SPI: SpiDevice, CE: OutputPin> Transport for SpiTransport<SPI, CE> {
    fn read_register(&mut self, reg: u8) -> u8 {
        let mut buf = [cmd::R_REGISTER | (reg & REGISTER_MASK), cmd::NOP];
        match self.spi.transfer_in_place(&mut buf) {
            Ok(()) => buf[1],
            Err(_) => {
                self.record(TransportError::Spi);
                Self::neutral_value(reg)
            }
        }
    }

    fn write_register(&mut self, reg: u8, value: u8) {
        let buf = [cmd::W_REGISTER | (reg & REGISTER_MASK), value];
        if self.spi.write(&buf).is_err() {
            self.record(TransportError::Spi);
            return;
        }
        if reg & REGISTER_MASK == FEATURE {
            self.dynamic_payloads = value & feature::EN_DPL != 0;
        }
    }

    fn write_register_block(&mut self, reg: u8, data: &[u8]) {
        let opcode = [cmd::W_REGISTER | (reg & REGISTER_MASK)];
        let result = self
            .spi
            .transaction(&mut [Operation::Write(&opcode), Operation::Write(data)]);
        if result.is_err() {
            self.record(TransportError::Spi);
        }
    }

    fn flush_rx(&mut self) {
        self.command(cmd::FLUSH_RX);
    }

    fn flush_tx(&mut self) {
        self.command(cmd::FLUSH_TX);
    }

    fn status(&mut self) -> u8 {
        self.command(cmd::NOP)
    }

    fn rx_length(&mut self, pipe: u8) -> usize {
        let mut buf = if self.dynamic_payloads {
            [cmd::R_RX_PL_WID, cmd::NOP]
        } else {
            [cmd::R_REGISTER | (RX_PW_P0.wrapping_add(pipe) & REGISTER_MASK), cmd::NOP]
        };
        match self.spi.transfer_in_place(&mut buf) {
            Ok(()) => usize::from(buf[1]),
            Err(_) => {
                self.record(TransportError::Spi);
                0
            }
        }
    }

    fn read_payload(&mut self, buffer: &mut [u8]) {
        let opcode = [cmd::R_RX_PAYLOAD];
        let result = self
            .spi
            .transaction(&mut [Operation::Write(&opcode), Operation::Read(buffer)]);
        if result.is_err() {
            self.record(TransportError::Spi);
        }
    }

    fn write_payload(&mut self, data: &[u8]) {
        let opcode = [cmd::W_TX_PAYLOAD];
        let result = self
            .spi
            .transaction(&mut [Operation::Write(&opcode), Operation::Write(data)]);
        if result.is_err() {
            self.record(TransportError::Spi);
        }
    }

    fn set_radio_enabled(&mut self, enabled: bool) {
        let result = if enabled {
            self.ce.set_high()
        } else {
            self.ce.set_low()
        };
        if result.is_err() {
            self.record(TransportError::ChipEnable);
        }
    }

    fn activate(&mut self, code: ActivateCode) {
        if self.spi.write(&[cmd::ACTIVATE, code.as_byte()]).is_err() {
            self.record(TransportError::Spi);
        }
    }
}
