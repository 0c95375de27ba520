//! Frame Decoder
//!
//! Turns a command payload into flight-control channel values.
//!
//! # Scaling
//!
//! The transmitter sends 8-bit sticks with mid-stick at 0x40. Shifting left
//! by two gives a 0..1020 working range; the -512 bias puts 0x40 at -256,
//! not at zero. That offset is kept as is: downstream trims are tuned
//! against it.

use crate::hal::transport::Transport;
use crate::types::{Channel, ChannelCommands, FailsafeCounter, Payload};

/// Byte positions of each field in the command payload
///
/// Every index is below [`Payload::LEN`]; [`PayloadLayout::new`] enforces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadLayout {
    throttle: usize,
    yaw: usize,
    pitch: usize,
    roll: usize,
    flags: usize,
}

impl PayloadLayout {
    /// Layout used by CX-10 transmitters
    pub const CX10: Self = Self::new(0, 1, 3, 4, 7);

    /// Layout from byte positions; the pitch byte doubles as the flip
    /// direction and a nonzero low nibble in the flags byte marks a flip
    ///
    /// # Panics
    ///
    /// If any index is outside the payload (at compile time in const context).
    #[must_use]
    pub const fn new(throttle: usize, yaw: usize, pitch: usize, roll: usize, flags: usize) -> Self {
        assert!(
            throttle < Payload::LEN
                && yaw < Payload::LEN
                && pitch < Payload::LEN
                && roll < Payload::LEN
                && flags < Payload::LEN,
            "payload layout index out of range"
        );
        Self {
            throttle,
            yaw,
            pitch,
            roll,
            flags,
        }
    }

    /// Throttle byte
    #[must_use]
    pub const fn throttle(&self) -> usize {
        self.throttle
    }

    /// Yaw byte
    #[must_use]
    pub const fn yaw(&self) -> usize {
        self.yaw
    }

    /// Pitch byte
    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.pitch
    }

    /// Roll byte
    #[must_use]
    pub const fn roll(&self) -> usize {
        self.roll
    }

    /// Flags byte
    #[must_use]
    pub const fn flags(&self) -> usize {
        self.flags
    }
}

impl Default for PayloadLayout {
    fn default() -> Self {
        Self::CX10
    }
}

/// Centering bias applied to roll, pitch and yaw after scaling
pub const AXIS_BIAS: i16 = 512;

/// Low nibble of the flags byte
const FLIP_MASK: u8 = 0x0F;

/// Pitch byte above this during a flip sets AUX1 high
const FLIP_HIGH_THRESHOLD: u8 = 0xF0;

/// Pitch byte below this during a flip sets AUX1 low
const FLIP_LOW_THRESHOLD: u8 = 0x0F;

fn scale(raw: u8) -> i16 {
    i16::from(raw) << 2
}

/// Throttle value for a raw stick byte
#[must_use]
pub fn throttle_from_raw(raw: u8) -> i16 {
    scale(raw).clamp(ChannelCommands::THROTTLE_MIN, ChannelCommands::THROTTLE_MAX)
}

/// Roll / pitch / yaw value for a raw stick byte
#[must_use]
pub fn axis_from_raw(raw: u8) -> i16 {
    (scale(raw) - AXIS_BIAS).clamp(-ChannelCommands::AXIS_LIMIT, ChannelCommands::AXIS_LIMIT)
}

/// Flip-trick event carried by a payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipEvent {
    /// Flip requested with the pitch stick fully forward
    Forward,
    /// Flip requested with the pitch stick fully back
    Backward,
    /// Flip flag set, pitch stick in the dead zone
    Undetermined,
}

impl FlipEvent {
    /// Extract the flip event from a payload, if any
    #[must_use]
    pub fn from_payload(payload: &Payload, layout: &PayloadLayout) -> Option<Self> {
        if payload.byte(layout.flags) & FLIP_MASK == 0 {
            return None;
        }
        let pitch = payload.byte(layout.pitch);
        Some(if pitch > FLIP_HIGH_THRESHOLD {
            Self::Forward
        } else if pitch < FLIP_LOW_THRESHOLD {
            Self::Backward
        } else {
            Self::Undetermined
        })
    }

    /// AUX1 value this event latches, if it decides one
    #[must_use]
    pub const fn aux_value(self) -> Option<i16> {
        match self {
            Self::Forward => Some(ChannelCommands::AUX_LIMIT),
            Self::Backward => Some(-ChannelCommands::AUX_LIMIT),
            Self::Undetermined => None,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FlipEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Forward => defmt::write!(f, "FLIP-FWD"),
            Self::Backward => defmt::write!(f, "FLIP-BACK"),
            Self::Undetermined => defmt::write!(f, "FLIP-?"),
        }
    }
}

/// Decode a command payload into `commands`
///
/// Throttle, roll, pitch and yaw are always overwritten. AUX1 only changes
/// on a decided flip event and otherwise keeps its previous value. AUX2 is
/// never touched.
pub fn decode_frame(payload: &Payload, layout: &PayloadLayout, commands: &mut ChannelCommands) {
    commands[Channel::Throttle] = throttle_from_raw(payload.byte(layout.throttle));
    commands[Channel::Roll] = axis_from_raw(payload.byte(layout.roll));
    commands[Channel::Pitch] = axis_from_raw(payload.byte(layout.pitch));
    commands[Channel::Yaw] = axis_from_raw(payload.byte(layout.yaw));

    if let Some(aux) = FlipEvent::from_payload(payload, layout).and_then(FlipEvent::aux_value) {
        commands[Channel::Aux1] = aux;
    }
}

/// Steady-state receiver: one frame per data-ready
#[derive(Clone, Debug)]
pub struct FrameDecoder {
    layout: PayloadLayout,
    payload: Payload,
    frames: u32,
}

impl FrameDecoder {
    /// Create a decoder for `layout`
    #[must_use]
    pub const fn new(layout: PayloadLayout) -> Self {
        Self {
            layout,
            payload: Payload::new([0; Payload::LEN]),
            frames: 0,
        }
    }

    /// Read and decode the newest frame if one arrived
    ///
    /// The FIFO is flushed right after the read, so frames that piled up
    /// since the last call are dropped, not queued. Returns `true` when a
    /// frame was decoded; the failsafe counter is reset in that case only.
    pub fn poll<T: Transport>(
        &mut self,
        transport: &mut T,
        commands: &mut ChannelCommands,
        failsafe: &mut FailsafeCounter,
    ) -> bool {
        if !transport.data_ready() {
            return false;
        }

        transport.read_packet(&mut self.payload);
        transport.flush_rx();
        transport.clear_status();

        decode_frame(&self.payload, &self.layout, commands);
        failsafe.reset();
        self.frames = self.frames.wrapping_add(1);

        trace!("frame {=u32}: {}", self.frames, commands);
        true
    }

    /// Last payload read
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Frames decoded so far (wrapping)
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Layout in use
    #[must_use]
    pub const fn layout(&self) -> &PayloadLayout {
        &self.layout
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(PayloadLayout::CX10)
    }
}
