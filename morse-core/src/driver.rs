//! Background transmission loop

use embedded_hal_async::delay::DelayNs;

use crate::controller::TransmitterControl;
use crate::error::MorseError;
use crate::fsm::TransmissionStateMachine;
use crate::hal::{DisplaySink, Duration, OutputSink};
use crate::message::{MessageBook, MessageSlot};
use crate::sequencer::{plan, send_message};
use crate::timing::TimingPolicy;

/// Transmitter configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransmitterConfig {
    /// Phase durations
    pub timing: TimingPolicy,
    /// Primary and alternate messages
    pub messages: MessageBook,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            timing: TimingPolicy::STANDARD,
            messages: MessageBook::default(),
        }
    }
}

impl TransmitterConfig {
    /// Create a configuration, validating both messages
    pub fn new(primary: &str, alternate: &str, timing: TimingPolicy) -> Result<Self, MorseError> {
        Ok(Self {
            timing,
            messages: MessageBook::from_text(primary, alternate)?,
        })
    }

    /// Duration of one pass of the message in `slot`
    pub fn pass_duration(&self, slot: MessageSlot) -> Result<Duration, MorseError> {
        let plan = plan(self.messages.get(slot))?;
        Ok(self.timing.plan_duration(&plan))
    }

    /// Upper bound on how long a shutdown request can wait for the current
    /// pass to finish
    pub fn longest_pass(&self) -> Result<Duration, MorseError> {
        let primary = self.pass_duration(MessageSlot::Primary)?;
        let alternate = self.pass_duration(MessageSlot::Alternate)?;
        Ok(if primary >= alternate { primary } else { alternate })
    }
}

/// Owns the state machine, the display and the message pair.
/// Runs as the single background transmission task.
pub struct Transmitter<'a, O, D, S> {
    machine: TransmissionStateMachine<'a, O, D>,
    display: S,
    messages: MessageBook,
    control: &'a TransmitterControl,
}

impl<'a, O, D, S> Transmitter<'a, O, D, S>
where
    O: OutputSink,
    D: DelayNs,
    S: DisplaySink,
{
    pub fn new(config: TransmitterConfig, control: &'a TransmitterControl, output: O, delay: D, display: S) -> Self {
        let machine = TransmissionStateMachine::new(output, delay, config.timing)
            .with_monitor(control.phase_monitor());
        Self {
            machine,
            display,
            messages: config.messages,
            control,
        }
    }

    /// Sample the active slot and send that message once.
    ///
    /// Toggles during the pass only affect the next pass.
    pub async fn run_pass(&mut self) -> Result<MessageSlot, MorseError> {
        let slot = self.control.active_message();
        let message = self.messages.get(slot);
        info!("Pass start: {:?} {}", slot, message.as_str());
        send_message(&mut self.machine, &mut self.display, message).await?;
        Ok(slot)
    }

    /// Send passes until a shutdown is requested.
    ///
    /// The shutdown flag is checked only between passes. The display is
    /// cleared once on the way out, also when a pass fails. Returns the
    /// number of completed passes.
    pub async fn run(&mut self) -> Result<u32, MorseError> {
        let mut passes = 0u32;
        loop {
            let slot = match self.run_pass().await {
                Ok(slot) => slot,
                Err(e) => {
                    warn!("Pass {} failed: {:?}", passes.wrapping_add(1), e);
                    if self.display.clear().is_err() {
                        warn!("Display clear failed");
                    }
                    return Err(e);
                }
            };
            passes = passes.wrapping_add(1);
            debug!("Pass {} done ({:?})", passes, slot);

            if self.control.shutdown_requested() {
                self.display.clear()?;
                info!("Transmitter stopped after {} passes", passes);
                return Ok(passes);
            }
        }
    }

    pub fn machine(&self) -> &TransmissionStateMachine<'a, O, D> {
        &self.machine
    }

    pub fn display(&self) -> &S {
        &self.display
    }
}

/// Build a [`Transmitter`] and run it to completion
pub async fn run_transmitter<O, D, S>(
    config: TransmitterConfig,
    control: &TransmitterControl,
    output: O,
    delay: D,
    display: S,
) -> Result<u32, MorseError>
where
    O: OutputSink,
    D: DelayNs,
    S: DisplaySink,
{
    Transmitter::new(config, control, output, delay, display).run().await
}
