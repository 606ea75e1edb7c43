//! Console-backed beacon hardware
//!
//! Stands in for the red/blue LED pair and the 16x2 character LCD on a host:
//! every change is written to the log.

use morse_core::hal::{DisplaySink, HalError, OutputSink};
use tracing::{debug, info};

/// LED pair rendered as log lines
#[derive(Debug, Default)]
pub struct ConsoleIndicators {
    dot: bool,
    dash: bool,
}

impl ConsoleIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current (dot, dash) state
    pub fn state(&self) -> (bool, bool) {
        (self.dot, self.dash)
    }
}

impl OutputSink for ConsoleIndicators {
    fn set_dot_indicator(&mut self, on: bool) -> Result<(), HalError> {
        if on != self.dot {
            if on {
                info!("red   ● dot");
            } else {
                debug!("red   ○");
            }
        }
        self.dot = on;
        Ok(())
    }

    fn set_dash_indicator(&mut self, on: bool) -> Result<(), HalError> {
        if on != self.dash {
            if on {
                info!("blue  ● dash");
            } else {
                debug!("blue  ○");
            }
        }
        self.dash = on;
        Ok(())
    }
}

/// Rows on the character display
pub const LCD_ROWS: usize = 2;
/// Characters per row
pub const LCD_COLUMNS: usize = 16;

/// Character LCD rendered as log lines.
///
/// Text is split on `\n` into rows; rows past the second and characters past
/// the sixteenth are cut off as on the real panel.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    rows: [String; LCD_ROWS],
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible rows
    pub fn rows(&self) -> &[String; LCD_ROWS] {
        &self.rows
    }
}

impl DisplaySink for ConsoleDisplay {
    fn show(&mut self, text: &str) -> Result<(), HalError> {
        let mut lines = text.split('\n');
        for row in self.rows.iter_mut() {
            *row = lines.next().unwrap_or("").chars().take(LCD_COLUMNS).collect();
        }
        info!("LCD [{:<16}] [{:<16}]", self.rows[0], self.rows[1]);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HalError> {
        for row in self.rows.iter_mut() {
            row.clear();
        }
        info!("LCD cleared");
        Ok(())
    }
}
