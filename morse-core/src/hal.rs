//! Hardware Abstraction Layer for the beacon outputs

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::Duration;

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::Duration;

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock duration type (millisecond resolution)
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn from_secs(secs: u64) -> Self {
            Self(secs * 1000)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Add for Duration {
        type Output = Duration;

        fn add(self, rhs: Duration) -> Duration {
            Duration(self.0 + rhs.0)
        }
    }

    impl core::ops::AddAssign for Duration {
        fn add_assign(&mut self, rhs: Duration) {
            self.0 += rhs.0;
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }

    impl core::ops::Div<u32> for Duration {
        type Output = Duration;

        fn div(self, rhs: u32) -> Duration {
            Duration(self.0 / rhs as u64)
        }
    }
}

use embedded_hal::digital::OutputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Character display operation failed
    DisplayError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::DisplayError => write!(f, "Display operation failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Dot/dash indicator pair (red LED = dot, blue LED = dash)
///
/// Calls are idempotent: setting an indicator to its current state is a no-op
/// from the transmitter's point of view.
pub trait OutputSink {
    /// Switch the dot indicator on or off
    fn set_dot_indicator(&mut self, on: bool) -> Result<(), HalError>;

    /// Switch the dash indicator on or off
    fn set_dash_indicator(&mut self, on: bool) -> Result<(), HalError>;

    /// Force both indicators off
    fn all_off(&mut self) -> Result<(), HalError> {
        self.set_dot_indicator(false)?;
        self.set_dash_indicator(false)
    }
}

/// Character display showing the message being sent
pub trait DisplaySink {
    /// Replace the display contents with `text` (`\n` starts the second row)
    fn show(&mut self, text: &str) -> Result<(), HalError>;

    /// Blank the display
    fn clear(&mut self) -> Result<(), HalError>;
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn set_dot_indicator(&mut self, on: bool) -> Result<(), HalError> {
        (**self).set_dot_indicator(on)
    }

    fn set_dash_indicator(&mut self, on: bool) -> Result<(), HalError> {
        (**self).set_dash_indicator(on)
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn show(&mut self, text: &str) -> Result<(), HalError> {
        (**self).show(text)
    }

    fn clear(&mut self) -> Result<(), HalError> {
        (**self).clear()
    }
}

/// Indicator pair backed by two embedded-hal output pins
pub struct EmbeddedHalIndicators<DOT, DASH> {
    dot: DOT,
    dash: DASH,
    inverted: bool,
}

impl<DOT, DASH> EmbeddedHalIndicators<DOT, DASH>
where
    DOT: OutputPin,
    DASH: OutputPin,
{
    /// `inverted` selects active-low wiring (LED lit when the pin is low)
    pub fn new(dot: DOT, dash: DASH, inverted: bool) -> Self {
        Self { dot, dash, inverted }
    }

    /// Release the pins
    pub fn release(self) -> (DOT, DASH) {
        (self.dot, self.dash)
    }

    fn drive<P: OutputPin>(pin: &mut P, on: bool, inverted: bool) -> Result<(), HalError> {
        let level = if inverted { !on } else { on };
        if level {
            pin.set_high().map_err(|_| HalError::GpioError)
        } else {
            pin.set_low().map_err(|_| HalError::GpioError)
        }
    }
}

impl<DOT, DASH> OutputSink for EmbeddedHalIndicators<DOT, DASH>
where
    DOT: OutputPin,
    DASH: OutputPin,
{
    fn set_dot_indicator(&mut self, on: bool) -> Result<(), HalError> {
        Self::drive(&mut self.dot, on, self.inverted)
    }

    fn set_dash_indicator(&mut self, on: bool) -> Result<(), HalError> {
        Self::drive(&mut self.dash, on, self.inverted)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::{Cell, RefCell};
    use std::string::String;
    use std::vec::Vec;

    /// Indicator pair that tracks its state and panics if both LEDs are ever lit
    #[derive(Default)]
    pub struct MockIndicators {
        dot: Cell<bool>,
        dash: Cell<bool>,
        dot_pulses: Cell<usize>,
        dash_pulses: Cell<usize>,
        fail_next: Cell<bool>,
    }

    impl MockIndicators {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn dot_on(&self) -> bool {
            self.dot.get()
        }

        pub fn dash_on(&self) -> bool {
            self.dash.get()
        }

        /// Number of off→on edges on the dot LED
        pub fn dot_pulses(&self) -> usize {
            self.dot_pulses.get()
        }

        /// Number of off→on edges on the dash LED
        pub fn dash_pulses(&self) -> usize {
            self.dash_pulses.get()
        }

        /// Make the next `set_*` call fail with `GpioError`
        pub fn fail_next(&self) {
            self.fail_next.set(true);
        }

        fn check_failure(&self) -> Result<(), HalError> {
            if self.fail_next.replace(false) {
                Err(HalError::GpioError)
            } else {
                Ok(())
            }
        }
    }

    impl OutputSink for MockIndicators {
        fn set_dot_indicator(&mut self, on: bool) -> Result<(), HalError> {
            self.check_failure()?;
            assert!(!(on && self.dash.get()), "dot lit while dash is lit");
            if on && !self.dot.get() {
                self.dot_pulses.set(self.dot_pulses.get() + 1);
            }
            self.dot.set(on);
            Ok(())
        }

        fn set_dash_indicator(&mut self, on: bool) -> Result<(), HalError> {
            self.check_failure()?;
            assert!(!(on && self.dot.get()), "dash lit while dot is lit");
            if on && !self.dash.get() {
                self.dash_pulses.set(self.dash_pulses.get() + 1);
            }
            self.dash.set(on);
            Ok(())
        }
    }

    /// Display that keeps the current text and counts clears
    #[derive(Default)]
    pub struct MockDisplay {
        text: RefCell<String>,
        history: RefCell<Vec<String>>,
        clears: Cell<usize>,
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn text(&self) -> String {
            self.text.borrow().clone()
        }

        /// Every text shown, in order
        pub fn history(&self) -> Vec<String> {
            self.history.borrow().clone()
        }

        pub fn clear_count(&self) -> usize {
            self.clears.get()
        }
    }

    impl DisplaySink for MockDisplay {
        fn show(&mut self, text: &str) -> Result<(), HalError> {
            *self.text.borrow_mut() = String::from(text);
            self.history.borrow_mut().push(String::from(text));
            Ok(())
        }

        fn clear(&mut self) -> Result<(), HalError> {
            self.text.borrow_mut().clear();
            self.clears.set(self.clears.get() + 1);
            Ok(())
        }
    }
}
