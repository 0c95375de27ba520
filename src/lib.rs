//! CX-10 Receiver Firmware Library
//!
//! Receiver side of a 2.4 GHz toy-quadcopter RC link. Brings up an
//! nRF24L01, a BK2423 clone or an XN297, binds to a transmitter, and
//! decodes its command frames into flight-control channel values.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      LINK LAYER                              │
//! │  LinkReceiver: Binding(BindStateMachine) → Streaming(Decoder)│
//! ├─────────────────────────────────────────────────────────────┤
//! │                    CHIP PROFILES                             │
//! │  nRF24L01 / BK2423 (probe + calibration)  │  XN297           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  Transport (SPI + CE)  │  MillisClock  │  Indicators (LEDs)  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Cooperative polling**: every step returns at once; the caller owns
//!   the loop and the delay between polls
//! - **Type-driven design**: addresses, payloads and channel sets are
//!   fixed-size newtypes
//! - **No unsafe in application code**
//! - **Functional core, imperative shell**: decoding is a pure function;
//!   register traffic sits behind the transport trait
//! - **Failures degrade to waiting**: a dead bus reads as "no data ready"

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must stay first so the logging macros are in scope for every module
#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Transceiver transport, clock and LED seams plus their drivers.
pub mod hal;

/// Radio Link Logic
///
/// Profiles, chip probe, bind handshake, frame decoding.
pub mod radio;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::hal::clock::MillisClock;
    pub use crate::hal::indicator::Indicators;
    pub use crate::hal::transport::Transport;
    pub use crate::radio::link::{LinkEvent, LinkReceiver};
    pub use crate::radio::profile::{AnyProfile, TransceiverProfile};

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal::spi::SpiDevice;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
