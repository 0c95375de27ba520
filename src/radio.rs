//! Radio Link Logic
//!
//! Chip bring-up, the bind handshake and command-frame decoding.
//! Everything here talks to the transceiver through
//! [`Transport`](crate::hal::transport::Transport) and never blocks.

pub mod bind;
pub mod decoder;
pub mod dump;
pub mod heartbeat;
pub mod link;
pub mod probe;
pub mod profile;
pub mod registers;
