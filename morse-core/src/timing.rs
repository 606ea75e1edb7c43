//! Phase durations

use crate::fsm::Trigger;
use crate::hal::Duration;

/// Named durations for each signal phase
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimingPolicy {
    /// Dot indicator on-time
    pub dot: Duration,
    /// Dash indicator on-time
    pub dash: Duration,
    /// Dark gap between symbols of one character
    pub symbol_gap: Duration,
    /// Dark gap between characters of one word
    pub letter_gap: Duration,
    /// Dark gap between words
    pub word_gap: Duration,
}

impl TimingPolicy {
    /// Beacon timing: dot 500 ms, dash 1500 ms, gaps 250 / 750 / 3000 ms
    pub const STANDARD: TimingPolicy = TimingPolicy {
        dot: Duration::from_millis(500),
        dash: Duration::from_millis(1500),
        symbol_gap: Duration::from_millis(250),
        letter_gap: Duration::from_millis(750),
        word_gap: Duration::from_millis(3000),
    };

    /// Create a policy with validation
    pub fn new(
        dot: Duration,
        dash: Duration,
        symbol_gap: Duration,
        letter_gap: Duration,
        word_gap: Duration,
    ) -> Result<Self, &'static str> {
        let zero = Duration::from_millis(0);
        if dot == zero || dash == zero || symbol_gap == zero || letter_gap == zero || word_gap == zero {
            return Err("All phase durations must be non-zero");
        }
        if dash <= dot {
            return Err("Dash must be longer than dot");
        }
        if letter_gap < symbol_gap {
            return Err("Letter gap must be at least the symbol gap");
        }
        if word_gap < letter_gap {
            return Err("Word gap must be at least the letter gap");
        }

        Ok(Self {
            dot,
            dash,
            symbol_gap,
            letter_gap,
            word_gap,
        })
    }

    /// Same as [`TimingPolicy::new`] with millisecond values
    pub fn from_millis(
        dot: u64,
        dash: u64,
        symbol_gap: u64,
        letter_gap: u64,
        word_gap: u64,
    ) -> Result<Self, &'static str> {
        Self::new(
            Duration::from_millis(dot),
            Duration::from_millis(dash),
            Duration::from_millis(symbol_gap),
            Duration::from_millis(letter_gap),
            Duration::from_millis(word_gap),
        )
    }

    /// Time spent in the phase entered by `trigger`
    pub fn duration_of(&self, trigger: Trigger) -> Duration {
        match trigger {
            Trigger::EmitDot => self.dot,
            Trigger::EmitDash => self.dash,
            Trigger::PauseSymbol => self.symbol_gap,
            Trigger::PauseLetter => self.letter_gap,
            Trigger::PauseWord => self.word_gap,
        }
    }

    /// Total time of a trigger sequence
    pub fn plan_duration(&self, plan: &[Trigger]) -> Duration {
        let mut total = Duration::from_millis(0);
        for trigger in plan {
            total += self.duration_of(*trigger);
        }
        total
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
