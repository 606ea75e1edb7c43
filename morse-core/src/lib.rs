#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! # Morse Core
//!
//! Transmission core for a two-LED Morse beacon.
//! Encodes a fixed pair of messages and drives dot/dash indicators with
//! fixed phase timing, while a foreground event source toggles the active
//! message or requests shutdown.

#[macro_use]
mod fmt;

pub mod error;
pub mod symbols;
pub mod timing;
pub mod message;
pub mod fsm;
pub mod sequencer;
pub mod controller;
pub mod driver;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use error::*;
pub use symbols::*;
pub use timing::*;
pub use message::*;
pub use fsm::*;
pub use sequencer::*;
pub use controller::*;
pub use driver::*;
pub use hal::{DisplaySink, Duration, EmbeddedHalIndicators, HalError, OutputSink};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: SOS / OK with the standard beacon timing
pub fn default_config() -> TransmitterConfig {
    TransmitterConfig::default()
}
