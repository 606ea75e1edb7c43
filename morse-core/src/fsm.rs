//! Transmission state machine
//!
//! The transition table in [`transition`] is the single source of truth for
//! which trigger moves the machine between phases. Firing a trigger walks the
//! table twice: once to enter the phase (running its entry action) and once
//! more with the same trigger to complete it and return to `Idle` (running the
//! exit action).

use embedded_hal_async::delay::DelayNs;

use crate::controller::PhaseMonitor;
use crate::error::MorseError;
use crate::hal::{Duration, OutputSink};
use crate::timing::TimingPolicy;

/// Signal phase of the transmitter
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Both indicators dark, waiting for the next trigger
    Idle,
    /// Dot indicator lit
    EmittingDot,
    /// Dash indicator lit
    EmittingDash,
    /// Gap between symbols of a character
    InterSymbolPause,
    /// Gap between characters of a word
    InterLetterPause,
    /// Gap between words
    InterWordPause,
}

impl Phase {
    /// Returns true if an indicator may be lit in this phase
    pub const fn is_emitting(&self) -> bool {
        matches!(self, Phase::EmittingDot | Phase::EmittingDash)
    }

    pub(crate) const fn as_u8(&self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::EmittingDot => 1,
            Phase::EmittingDash => 2,
            Phase::InterSymbolPause => 3,
            Phase::InterLetterPause => 4,
            Phase::InterWordPause => 5,
        }
    }

    pub(crate) const fn from_u8(raw: u8) -> Phase {
        match raw {
            1 => Phase::EmittingDot,
            2 => Phase::EmittingDash,
            3 => Phase::InterSymbolPause,
            4 => Phase::InterLetterPause,
            5 => Phase::InterWordPause,
            _ => Phase::Idle,
        }
    }
}

/// Events fired at the state machine
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    EmitDot,
    EmitDash,
    PauseSymbol,
    PauseLetter,
    PauseWord,
}

impl Trigger {
    /// Phase this trigger enters from `Idle`
    pub const fn target(&self) -> Phase {
        match self {
            Trigger::EmitDot => Phase::EmittingDot,
            Trigger::EmitDash => Phase::EmittingDash,
            Trigger::PauseSymbol => Phase::InterSymbolPause,
            Trigger::PauseLetter => Phase::InterLetterPause,
            Trigger::PauseWord => Phase::InterWordPause,
        }
    }
}

/// Transition table: phase reached by firing `trigger` in `from`, if allowed
pub const fn transition(from: Phase, trigger: Trigger) -> Option<Phase> {
    use Phase::*;

    match (trigger, from) {
        (Trigger::EmitDot, Idle | EmittingDash | InterSymbolPause | InterLetterPause) => Some(EmittingDot),
        (Trigger::EmitDot, EmittingDot) => Some(Idle),

        (Trigger::EmitDash, Idle | EmittingDot | InterSymbolPause | InterLetterPause) => Some(EmittingDash),
        (Trigger::EmitDash, EmittingDash) => Some(Idle),

        (Trigger::PauseSymbol, Idle | EmittingDot | EmittingDash) => Some(InterSymbolPause),
        (Trigger::PauseSymbol, InterSymbolPause) => Some(Idle),

        (Trigger::PauseLetter, Idle | EmittingDot | EmittingDash | InterSymbolPause) => Some(InterLetterPause),
        (Trigger::PauseLetter, InterLetterPause) => Some(Idle),

        (Trigger::PauseWord, Idle) => Some(InterWordPause),
        (Trigger::PauseWord, InterWordPause) => Some(Idle),

        _ => None,
    }
}

/// Drives the indicator pair through timed phases
pub struct TransmissionStateMachine<'a, O, D> {
    phase: Phase,
    output: O,
    delay: D,
    timing: TimingPolicy,
    monitor: Option<&'a PhaseMonitor>,
}

impl<'a, O, D> TransmissionStateMachine<'a, O, D>
where
    O: OutputSink,
    D: DelayNs,
{
    /// Create a machine in `Idle`
    pub fn new(output: O, delay: D, timing: TimingPolicy) -> Self {
        Self {
            phase: Phase::Idle,
            output,
            delay,
            timing,
            monitor: None,
        }
    }

    /// Publish every phase change into `monitor`
    pub fn with_monitor(mut self, monitor: &'a PhaseMonitor) -> Self {
        monitor.publish(self.phase);
        self.monitor = Some(monitor);
        self
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timing(&self) -> &TimingPolicy {
        &self.timing
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Take the machine apart
    pub fn into_parts(self) -> (O, D) {
        (self.output, self.delay)
    }

    /// Fire `trigger`: enter its phase, run the entry action, then complete
    /// the phase and return to `Idle`.
    ///
    /// Indicators are forced off on the way out even if the entry action
    /// failed.
    pub async fn fire(&mut self, trigger: Trigger) -> Result<(), MorseError> {
        let from = self.phase;
        let entered = transition(from, trigger).ok_or(MorseError::InvalidTransition { from, trigger })?;
        self.set_phase(entered);
        trace!("{:?} -> {:?} ({:?})", from, entered, trigger);

        let entry = self.on_enter(entered).await;

        let completed = transition(entered, trigger).unwrap_or(Phase::Idle);
        let exit = self.on_exit();
        self.set_phase(completed);

        entry.and(exit)
    }

    /// Entry action of `phase`
    async fn on_enter(&mut self, phase: Phase) -> Result<(), MorseError> {
        match phase {
            Phase::EmittingDot => {
                self.output.set_dot_indicator(true)?;
                wait(&mut self.delay, self.timing.dot).await;
                self.output.set_dot_indicator(false)?;
            }
            Phase::EmittingDash => {
                self.output.set_dash_indicator(true)?;
                wait(&mut self.delay, self.timing.dash).await;
                self.output.set_dash_indicator(false)?;
            }
            Phase::InterSymbolPause => wait(&mut self.delay, self.timing.symbol_gap).await,
            Phase::InterLetterPause => wait(&mut self.delay, self.timing.letter_gap).await,
            Phase::InterWordPause => wait(&mut self.delay, self.timing.word_gap).await,
            Phase::Idle => {}
        }
        Ok(())
    }

    /// Exit action shared by every phase
    fn on_exit(&mut self) -> Result<(), MorseError> {
        self.output.all_off()?;
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        if let Some(monitor) = self.monitor {
            monitor.publish(phase);
        }
    }
}

async fn wait<D: DelayNs>(delay: &mut D, duration: Duration) {
    let ms = duration.as_millis();
    delay.delay_ms(u32::try_from(ms).unwrap_or(u32::MAX)).await;
}
