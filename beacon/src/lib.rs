//! Host application pieces for the Morse beacon: console-backed hardware,
//! settings, the console event source and the embassy transmission task.

pub use embassy_executor::Spawner;
pub use morse_core::*;

pub mod config;
pub mod console_hardware;
pub mod events;
pub mod tasks;

pub use crate::config::BeaconConfig;
pub use crate::console_hardware::{ConsoleDisplay, ConsoleIndicators};
pub use crate::events::{spawn_signal_watcher, spawn_stdin_reader, Command, ConsoleEvents};
pub use crate::tasks::{spawn_transmitter, TransmitterHandle, TransmitterResult};

/// Install the `tracing` subscriber. `RUST_LOG` overrides the default filter;
/// `log` records from the core are forwarded into it.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morse_beacon=info,morse_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
