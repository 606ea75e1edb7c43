//! Embassy tasks

use embassy_executor::{SpawnError, Spawner};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Delay;
use morse_core::{run_transmitter, MorseError, TransmitterConfig, TransmitterControl};
use static_cell::StaticCell;
use tracing::info;

use crate::console_hardware::{ConsoleDisplay, ConsoleIndicators};

/// Outcome of the transmission task: completed passes or the failure that
/// stopped it
pub type TransmitterResult = Result<u32, MorseError>;

static TRANSMITTER_DONE: StaticCell<Signal<CriticalSectionRawMutex, TransmitterResult>> = StaticCell::new();

/// Background transmission task
#[embassy_executor::task]
pub async fn transmitter_task(
    config: TransmitterConfig,
    control: &'static TransmitterControl,
    done: &'static Signal<CriticalSectionRawMutex, TransmitterResult>,
) {
    info!("Transmitter task started");
    let result = run_transmitter(config, control, ConsoleIndicators::new(), Delay, ConsoleDisplay::new()).await;
    done.signal(result);
}

/// Owned handle to the running transmission task
pub struct TransmitterHandle {
    done: &'static Signal<CriticalSectionRawMutex, TransmitterResult>,
}

impl TransmitterHandle {
    /// Wait for the task to finish its last pass
    pub async fn join(self) -> TransmitterResult {
        self.done.wait().await
    }
}

/// Spawn the transmission task. Only one may run.
pub fn spawn_transmitter(
    spawner: Spawner,
    config: TransmitterConfig,
    control: &'static TransmitterControl,
) -> Result<TransmitterHandle, SpawnError> {
    let done: &'static Signal<_, _> = TRANSMITTER_DONE.try_init(Signal::new()).ok_or(SpawnError::Busy)?;
    spawner.spawn(transmitter_task(config, control, done))?;
    Ok(TransmitterHandle { done })
}
