//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// How a session treats the recording file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Ask the user for every answer
    Live,
    /// Feed recorded answers and compare output
    #[default]
    Replay,
    /// Feed recorded answers and record fresh output
    Rerecord,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Live => "live",
            Mode::Replay => "replay",
            Mode::Rerecord => "rerecord",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "replay" => Ok(Mode::Replay),
            "rerecord" | "re-record" => Ok(Mode::Rerecord),
            other => Err(format!(
                "unknown mode '{}' (expected live, replay or rerecord)",
                other
            )),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Recording file; a leading `~/` is expanded
    #[serde(default = "default_recording_file")]
    pub recording_file: String,
    #[serde(default)]
    pub mode: Mode,
    /// Append new I/O once the recorded inputs run out
    #[serde(default)]
    pub record_additional_io: bool,
    #[serde(default = "default_diff_extension")]
    pub diff_extension: String,
}

pub fn default_recording_file() -> String {
    "test_data/io_recorded".to_string()
}

pub fn default_diff_extension() -> String {
    crate::session::DEFAULT_DIFF_EXTENSION.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recording_file: default_recording_file(),
            mode: Mode::default(),
            record_additional_io: false,
            diff_extension: default_diff_extension(),
        }
    }
}

/// Timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause after each replayed answer, in milliseconds
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Automated test execution: no pauses, mismatches fail immediately
    #[serde(default)]
    pub automated: bool,
}

pub fn default_step_delay_ms() -> u64 {
    100
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            automated: false,
        }
    }
}
