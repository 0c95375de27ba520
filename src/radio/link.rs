//! Link Receiver
//!
//! Owns everything the receiver keeps between polls: the chip profile, the
//! current phase (binding or streaming), the decoded channel values, and
//! the failsafe counter.
//!
//! The phase enum is what keeps bind and decode apart. Only one of them
//! exists at a time, so only one of them can read a payload.

use crate::config::{BIND_POLL_INTERVAL_MS, FAILSAFE_LIMIT, STREAM_POLL_INTERVAL_MS};
use crate::hal::clock::MillisClock;
use crate::hal::indicator::Indicators;
use crate::hal::transport::Transport;
use crate::radio::bind::{BindEvent, BindStateMachine};
use crate::radio::decoder::FrameDecoder;
use crate::radio::profile::TransceiverProfile;
use crate::types::{BindState, ChannelCommands, ChipIdentity, FailsafeCounter, RadioAddress};

/// What the receiver is doing
#[derive(Clone, Debug)]
pub enum LinkPhase {
    /// Handshake in progress
    Binding(BindStateMachine),
    /// Bound; decoding command frames
    Streaming(FrameDecoder),
}

/// Outcome of one [`LinkReceiver::poll`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// Nothing happened
    Idle,
    /// Bind broadcast received, now listening on the command address
    AddressSwitched(RadioAddress),
    /// Handshake complete
    Bound(RadioAddress),
    /// A command frame was decoded
    Frame,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "Idle"),
            Self::AddressSwitched(addr) => defmt::write!(f, "AddressSwitched({})", addr),
            Self::Bound(addr) => defmt::write!(f, "Bound({})", addr),
            Self::Frame => defmt::write!(f, "Frame"),
        }
    }
}

/// Receiver context
#[derive(Clone, Debug)]
pub struct LinkReceiver<P: TransceiverProfile> {
    profile: P,
    phase: LinkPhase,
    address: RadioAddress,
    commands: ChannelCommands,
    failsafe: FailsafeCounter,
}

impl<P: TransceiverProfile> LinkReceiver<P> {
    /// Initialize the radio with `profile` and start binding
    ///
    /// This is the only way to build a receiver, so the profile always runs
    /// exactly once before the first bind poll.
    pub fn start<T, C>(mut profile: P, transport: &mut T, clock: &C) -> Self
    where
        T: Transport,
        C: MillisClock,
    {
        profile.initialize(transport);

        let address = profile.bind_address();
        info!("listening on bind address {}", address);

        Self {
            phase: LinkPhase::Binding(BindStateMachine::new(address, clock.now_millis())),
            profile,
            address,
            commands: ChannelCommands::default(),
            failsafe: FailsafeCounter::new(),
        }
    }

    /// One cooperative step
    pub fn poll<T, C, I>(&mut self, transport: &mut T, clock: &C, leds: &mut I) -> LinkEvent
    where
        T: Transport,
        C: MillisClock,
        I: Indicators,
    {
        let event = match &mut self.phase {
            LinkPhase::Binding(bind) => match bind.poll(transport, clock, leds) {
                BindEvent::Pending => LinkEvent::Idle,
                BindEvent::AddressSwitched(address) => LinkEvent::AddressSwitched(address),
                BindEvent::Bound(address) => LinkEvent::Bound(address),
            },
            LinkPhase::Streaming(decoder) => {
                if decoder.poll(transport, &mut self.commands, &mut self.failsafe) {
                    LinkEvent::Frame
                } else {
                    LinkEvent::Idle
                }
            }
        };

        match event {
            LinkEvent::AddressSwitched(address) => self.address = address,
            LinkEvent::Bound(address) => {
                self.address = address;
                self.failsafe.reset();
                self.phase = LinkPhase::Streaming(FrameDecoder::new(self.profile.payload_layout()));
            }
            LinkEvent::Idle | LinkEvent::Frame => {}
        }

        event
    }

    /// Advance the failsafe counter by one consumer tick
    ///
    /// Returns `true` once the counter has reached [`FAILSAFE_LIMIT`].
    pub fn tick_failsafe(&mut self) -> bool {
        let was_expired = self.failsafe.is_expired(FAILSAFE_LIMIT);
        self.failsafe.tick();
        let expired = self.failsafe.is_expired(FAILSAFE_LIMIT);
        if expired && !was_expired {
            warn!("no frames for {=u8} ticks, failsafe", FAILSAFE_LIMIT);
        }
        expired
    }

    /// Latest channel values
    #[must_use]
    pub const fn commands(&self) -> &ChannelCommands {
        &self.commands
    }

    /// Failsafe counter
    #[must_use]
    pub const fn failsafe(&self) -> FailsafeCounter {
        self.failsafe
    }

    /// Bind progress; `Bound` for the whole streaming phase
    #[must_use]
    pub const fn bind_state(&self) -> BindState {
        match &self.phase {
            LinkPhase::Binding(bind) => bind.state(),
            LinkPhase::Streaming(_) => BindState::Bound,
        }
    }

    /// Check if the handshake is complete
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self.phase, LinkPhase::Streaming(_))
    }

    /// Address the radio is listening on
    #[must_use]
    pub const fn address(&self) -> RadioAddress {
        self.address
    }

    /// Chip found by the profile's probe, if it ran one
    #[must_use]
    pub fn chip_identity(&self) -> Option<ChipIdentity> {
        self.profile.identify()
    }

    /// Active profile
    #[must_use]
    pub const fn profile(&self) -> &P {
        &self.profile
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> &LinkPhase {
        &self.phase
    }

    /// Frames decoded since binding
    #[must_use]
    pub const fn frames(&self) -> u32 {
        match &self.phase {
            LinkPhase::Binding(_) => 0,
            LinkPhase::Streaming(decoder) => decoder.frames(),
        }
    }

    /// Delay before the next poll
    #[must_use]
    pub const fn poll_interval_ms(&self) -> u64 {
        match self.phase {
            LinkPhase::Binding(_) => BIND_POLL_INTERVAL_MS,
            LinkPhase::Streaming(_) => STREAM_POLL_INTERVAL_MS,
        }
    }
}
