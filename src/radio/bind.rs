//! Bind State Machine
//!
//! Discovers the transmitter's private command address.
//!
//! ```text
//!  WaitingBroadcast ──data ready──▶ WaitingConfirmation ──data ready──▶ Bound
//!   (bind address,                   (command address,                   (LEDs off,
//!    LEDs @ 500 ms)                   LEDs @ 250 ms)                      terminal)
//! ```
//!
//! The machine is a cooperative step: [`BindStateMachine::poll`] checks the
//! status flag once, drives the heartbeat, and returns. There is no timeout;
//! without a transmitter it stays in `WaitingBroadcast`.

use crate::config::{BROADCAST_FLASH_RATE_MS, CONFIRMATION_FLASH_RATE_MS, PAYLOAD_SIZE};
use crate::hal::clock::MillisClock;
use crate::hal::indicator::Indicators;
use crate::hal::transport::{fifo, Transport};
use crate::radio::heartbeat::Heartbeat;
use crate::radio::registers::{FIFO_STATUS, RX_ADDR_P0, TX_ADDR};
use crate::types::{BindState, Payload, RadioAddress};

/// Outcome of one poll
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindEvent {
    /// Nothing received yet
    Pending,
    /// Broadcast received; radio now listens on this command address
    AddressSwitched(RadioAddress),
    /// Handshake complete on this command address
    Bound(RadioAddress),
}

#[cfg(feature = "embedded")]
impl defmt::Format for BindEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Pending => defmt::write!(f, "Pending"),
            Self::AddressSwitched(addr) => defmt::write!(f, "AddressSwitched({})", addr),
            Self::Bound(addr) => defmt::write!(f, "Bound({})", addr),
        }
    }
}

/// Two-phase address-binding handshake
#[derive(Clone, Debug)]
pub struct BindStateMachine {
    state: BindState,
    address: RadioAddress,
    payload: Payload,
    heartbeat: Heartbeat,
    discarded: u32,
}

impl BindStateMachine {
    /// Start waiting on `bind_address`, heartbeat armed at `now_ms`
    ///
    /// The radio must already be listening on `bind_address`.
    #[must_use]
    pub const fn new(bind_address: RadioAddress, now_ms: u32) -> Self {
        Self {
            state: BindState::WaitingBroadcast,
            address: bind_address,
            payload: Payload::new([0; PAYLOAD_SIZE]),
            heartbeat: Heartbeat::new(now_ms),
            discarded: 0,
        }
    }

    /// Advance the handshake by at most one transition
    pub fn poll<T, C, I>(&mut self, transport: &mut T, clock: &C, leds: &mut I) -> BindEvent
    where
        T: Transport,
        C: MillisClock,
        I: Indicators,
    {
        match self.state {
            BindState::WaitingBroadcast => {
                if !transport.data_ready() {
                    self.heartbeat
                        .update(clock.now_millis(), BROADCAST_FLASH_RATE_MS, leds);
                    return BindEvent::Pending;
                }

                if !self.drain_broadcast(transport) {
                    self.heartbeat
                        .update(clock.now_millis(), BROADCAST_FLASH_RATE_MS, leds);
                    return BindEvent::Pending;
                }

                let address = RadioAddress::command_from_payload(&self.payload);
                self.switch_address(transport, address);
                self.heartbeat.arm(clock.now_millis());
                self.state = BindState::WaitingConfirmation;

                info!("bind broadcast received, command address {}", address);
                BindEvent::AddressSwitched(address)
            }
            BindState::WaitingConfirmation => {
                if !transport.data_ready() {
                    self.heartbeat
                        .update(clock.now_millis(), CONFIRMATION_FLASH_RATE_MS, leds);
                    return BindEvent::Pending;
                }

                self.state = BindState::Bound;
                self.heartbeat.off(leds);

                info!("bound to {}", self.address);
                BindEvent::Bound(self.address)
            }
            BindState::Bound => BindEvent::Bound(self.address),
        }
    }

    /// Read every queued broadcast frame, keeping the newest of the right size
    ///
    /// The transmitter bursts several bind packets; only a full drain
    /// guarantees the payload is the latest one. Frames of any other
    /// length are popped and dropped. Returns `false` when no frame of the
    /// right size was read, leaving the previous payload untouched.
    fn drain_broadcast<T: Transport>(&mut self, transport: &mut T) -> bool {
        let mut scratch = Payload::default();
        let mut received = false;

        while transport.read_register(FIFO_STATUS) & fifo::RX_EMPTY == 0 {
            if transport.rx_length(0) == PAYLOAD_SIZE {
                transport.read_packet(&mut self.payload);
                received = true;
            } else {
                transport.read_packet(&mut scratch);
                self.discarded = self.discarded.wrapping_add(1);
                debug!("dropped bind frame of unexpected length");
            }
        }

        transport.flush_rx();
        transport.clear_status();
        received
    }

    /// Point both RX pipe 0 and TX at `address`
    fn switch_address<T: Transport>(&mut self, transport: &mut T, address: RadioAddress) {
        transport.write_register_block(RX_ADDR_P0, address.as_bytes());
        transport.write_register_block(TX_ADDR, address.as_bytes());

        transport.flush_rx();
        transport.clear_status();

        self.address = address;
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> BindState {
        self.state
    }

    /// Check if the handshake is complete
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound)
    }

    /// Address the radio is listening on
    #[must_use]
    pub const fn address(&self) -> RadioAddress {
        self.address
    }

    /// Broadcast payload the command address was derived from
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Heartbeat state
    #[must_use]
    pub const fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    /// Broadcast frames dropped for having the wrong length
    #[must_use]
    pub const fn discarded_frames(&self) -> u32 {
        self.discarded
    }
}
