//! SOS/OK Morse light beacon
//!
//! Press Enter to switch between the two messages. `q`, end of input,
//! Ctrl-C or SIGTERM stop after the current pass and clear the display.

use embassy_executor::Spawner;
use morse_beacon::*;
use tracing::{error, info};

// Static resources
static CONTROL: TransmitterControl = TransmitterControl::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    init_tracing();
    let code = run(spawner).await;
    std::process::exit(code);
}

/// Returns the process exit code
async fn run(spawner: Spawner) -> i32 {
    info!("Morse beacon v{} starting", VERSION);

    let config = match BeaconConfig::load_from_env().and_then(|c| c.to_transmitter_config()) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration rejected: {e:#}");
            return 1;
        }
    };
    let longest_pass = match config.longest_pass() {
        Ok(bound) => bound,
        Err(e) => {
            error!("Configuration rejected: {e}");
            return 1;
        }
    };
    info!(
        "Messages: {:?} / {:?}, longest pass {} ms",
        config.messages.get(MessageSlot::Primary).as_str(),
        config.messages.get(MessageSlot::Alternate).as_str(),
        longest_pass.as_millis()
    );

    let handle = match spawn_transmitter(spawner, config, &CONTROL) {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to spawn transmitter: {e:?}");
            return 1;
        }
    };

    if let Err(e) = spawn_stdin_reader(&CONTROL, longest_pass) {
        error!("Failed to start console reader: {e}");
        CONTROL.on_termination_requested();
    }
    if let Err(e) = spawn_signal_watcher(&CONTROL, longest_pass) {
        error!("Failed to install signal handlers: {e}");
    }
    info!("Beacon ready: Enter = toggle message, s = status, q = quit");

    match handle.join().await {
        Ok(passes) => {
            info!("Beacon stopped after {} passes", passes);
            0
        }
        Err(e) => {
            error!("Transmitter failed: {e}");
            1
        }
    }
}
