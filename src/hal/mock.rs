//! Mock hardware for host testing
//!
//! A register-file model of an nRF24L01-family transceiver that records
//! every transport call, plus a settable clock and recording LEDs.

use std::cell::Cell;
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use super::clock::MillisClock;
use super::indicator::{Indicator, Indicators};
use super::transport::{fifo, status, ActivateCode, Transport};
use super::transport::reg as registers;

/// Recorded transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOp {
    /// Single register read
    ReadRegister(u8),
    /// Single register write
    WriteRegister(u8, u8),
    /// Multi-byte register write
    WriteBlock(u8, Vec<u8>),
    /// RX FIFO flush
    FlushRx,
    /// TX FIFO flush
    FlushTx,
    /// Status poll
    Status,
    /// Received length query
    RxLength(u8),
    /// Payload read of the given length
    ReadPayload(usize),
    /// Payload write
    WritePayload(Vec<u8>),
    /// Chip enable change
    RadioEnabled(bool),
    /// ACTIVATE command
    Activate(ActivateCode),
}

/// Simulated transceiver
#[derive(Debug, Default)]
pub struct MockTransport {
    registers: [u8; 32],
    blocks: BTreeMap<u8, Vec<u8>>,
    rx_fifo: VecDeque<Vec<u8>>,
    tx_fifo: Vec<Vec<u8>>,
    rx_ready: bool,
    beken: bool,
    bank1: bool,
    radio_enabled: bool,
    ops: Vec<TransportOp>,
}

impl MockTransport {
    /// Create a genuine nRF24L01 / XN297 model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a BK2423 model (answers the bank-toggle unlock)
    #[must_use]
    pub fn beken() -> Self {
        Self {
            beken: true,
            ..Self::default()
        }
    }

    /// A packet arrives over the air
    pub fn arrive(&mut self, packet: &[u8]) {
        self.rx_fifo.push_back(packet.to_vec());
        self.rx_ready = true;
    }

    /// Recorded calls since creation or the last [`clear_ops`](Self::clear_ops)
    #[must_use]
    pub fn ops(&self) -> &[TransportOp] {
        &self.ops
    }

    /// Forget recorded calls
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Recorded calls that change chip state (reads and polls dropped)
    #[must_use]
    pub fn writes(&self) -> Vec<TransportOp> {
        self.ops
            .iter()
            .filter(|op| {
                !matches!(
                    op,
                    TransportOp::ReadRegister(_)
                        | TransportOp::Status
                        | TransportOp::RxLength(_)
                        | TransportOp::ReadPayload(_)
                )
            })
            .cloned()
            .collect()
    }

    /// Current value of a single-byte register
    #[must_use]
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[usize::from(reg & registers::REGISTER_MASK)]
    }

    /// Last block written to a multi-byte register
    #[must_use]
    pub fn block(&self, reg: u8) -> Option<&[u8]> {
        self.blocks.get(&reg).map(Vec::as_slice)
    }

    /// Number of frames waiting in the RX FIFO
    #[must_use]
    pub fn rx_pending(&self) -> usize {
        self.rx_fifo.len()
    }

    /// Payloads queued for transmission
    #[must_use]
    pub fn tx_queue(&self) -> &[Vec<u8>] {
        &self.tx_fifo
    }

    /// Chip enable level
    #[must_use]
    pub const fn radio_enabled(&self) -> bool {
        self.radio_enabled
    }

    fn status_byte(&self) -> u8 {
        let mut value = self.registers[usize::from(registers::STATUS)] & !status::RX_DR;
        if self.rx_ready {
            value |= status::RX_DR;
        }
        if self.bank1 {
            value |= status::BANK;
        }
        value
    }
}

impl Transport for MockTransport {
    fn read_register(&mut self, reg: u8) -> u8 {
        self.ops.push(TransportOp::ReadRegister(reg));
        match reg {
            registers::STATUS => self.status_byte(),
            registers::FIFO_STATUS => {
                let mut value = fifo::TX_EMPTY;
                if self.rx_fifo.is_empty() {
                    value |= fifo::RX_EMPTY;
                }
                if self.rx_fifo.len() >= 3 {
                    value |= fifo::RX_FULL;
                }
                value
            }
            _ => self.register(reg),
        }
    }

    fn write_register(&mut self, reg: u8, value: u8) {
        self.ops.push(TransportOp::WriteRegister(reg, value));
        if reg == registers::STATUS {
            if value & status::RX_DR != 0 {
                self.rx_ready = false;
            }
        } else {
            self.registers[usize::from(reg & registers::REGISTER_MASK)] = value;
        }
    }

    fn write_register_block(&mut self, reg: u8, data: &[u8]) {
        self.ops.push(TransportOp::WriteBlock(reg, data.to_vec()));
        self.blocks.insert(reg, data.to_vec());
    }

    fn flush_rx(&mut self) {
        self.ops.push(TransportOp::FlushRx);
        self.rx_fifo.clear();
    }

    fn flush_tx(&mut self) {
        self.ops.push(TransportOp::FlushTx);
        self.tx_fifo.clear();
    }

    fn status(&mut self) -> u8 {
        self.ops.push(TransportOp::Status);
        self.status_byte()
    }

    fn rx_length(&mut self, pipe: u8) -> usize {
        self.ops.push(TransportOp::RxLength(pipe));
        self.rx_fifo.front().map_or(0, Vec::len)
    }

    fn read_payload(&mut self, buffer: &mut [u8]) {
        self.ops.push(TransportOp::ReadPayload(buffer.len()));
        buffer.fill(0);
        if let Some(frame) = self.rx_fifo.pop_front() {
            let n = buffer.len().min(frame.len());
            buffer[..n].copy_from_slice(&frame[..n]);
        }
    }

    fn write_payload(&mut self, data: &[u8]) {
        self.ops.push(TransportOp::WritePayload(data.to_vec()));
        self.tx_fifo.push(data.to_vec());
    }

    fn set_radio_enabled(&mut self, enabled: bool) {
        self.ops.push(TransportOp::RadioEnabled(enabled));
        self.radio_enabled = enabled;
    }

    fn activate(&mut self, code: ActivateCode) {
        self.ops.push(TransportOp::Activate(code));
        if self.beken && code == ActivateCode::BekenBank {
            self.bank1 = !self.bank1;
        }
    }
}

/// Manually advanced clock
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    /// Create a clock at `start` ms
    #[must_use]
    pub fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    /// Move forward by `ms` (wrapping)
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl MillisClock for MockClock {
    fn now_millis(&self) -> u32 {
        self.now.get()
    }
}

/// LEDs that remember every change
#[derive(Debug, Default)]
pub struct MockIndicators {
    led1: bool,
    led2: bool,
    history: Vec<(Indicator, bool)>,
}

impl MockIndicators {
    /// Create with both LEDs off
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of an LED
    #[must_use]
    pub const fn is_on(&self, which: Indicator) -> bool {
        match which {
            Indicator::Led1 => self.led1,
            Indicator::Led2 => self.led2,
        }
    }

    /// Every change in order
    #[must_use]
    pub fn history(&self) -> &[(Indicator, bool)] {
        &self.history
    }
}

impl Indicators for MockIndicators {
    fn set_indicator(&mut self, which: Indicator, on: bool) {
        match which {
            Indicator::Led1 => self.led1 = on,
            Indicator::Led2 => self.led2 = on,
        }
        self.history.push((which, on));
    }
}
