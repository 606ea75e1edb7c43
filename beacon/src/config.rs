//! Beacon settings

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use morse_core::{TimingPolicy, TransmitterConfig};
use serde::{Deserialize, Serialize};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "MORSE_BEACON_CONFIG";

/// Phase durations in milliseconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingMillis {
    pub dot: u64,
    pub dash: u64,
    pub symbol_gap: u64,
    pub letter_gap: u64,
    pub word_gap: u64,
}

impl Default for TimingMillis {
    fn default() -> Self {
        let standard = TimingPolicy::STANDARD;
        Self {
            dot: standard.dot.as_millis(),
            dash: standard.dash.as_millis(),
            symbol_gap: standard.symbol_gap.as_millis(),
            letter_gap: standard.letter_gap.as_millis(),
            word_gap: standard.word_gap.as_millis(),
        }
    }
}

/// Beacon settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BeaconConfig {
    /// Message sent at startup
    pub primary: String,
    /// Message selected by the button
    pub alternate: String,
    /// Phase durations
    pub timing_ms: TimingMillis,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            primary: "SOS".to_string(),
            alternate: "OK".to_string(),
            timing_ms: TimingMillis::default(),
        }
    }
}

impl BeaconConfig {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("malformed beacon settings")
    }

    /// Load settings from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Settings path from the first argument, falling back to `MORSE_BEACON_CONFIG`
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV))
            .map(PathBuf::from)
    }

    /// Load from [`BeaconConfig::path_from_env`], or defaults when no path is given
    pub fn load_from_env() -> Result<Self> {
        match Self::path_from_env() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Validate and convert into the core configuration
    pub fn to_transmitter_config(&self) -> Result<TransmitterConfig> {
        let t = &self.timing_ms;
        let timing = TimingPolicy::from_millis(t.dot, t.dash, t.symbol_gap, t.letter_gap, t.word_gap)
            .map_err(|e| anyhow!(e))
            .context("invalid timing")?;
        TransmitterConfig::new(&self.primary, &self.alternate, timing).context("invalid message")
    }
}
