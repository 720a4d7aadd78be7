//! Configuration management for ioreplay

mod env;
mod io;
mod types;

pub use env::{var_name, ENV_PREFIX};
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::files::expand_home;
use crate::session::SessionOptions;

impl Config {
    /// Get the config file path (~/.config/ioreplay/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/ioreplay)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from the default path, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from an explicit path, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Write a default configuration file at `path`
    pub fn init_at(path: &Path, force: bool) -> Result<Self> {
        io::init_at(path, force)
    }

    /// Recording file with `~` expanded
    pub fn recording_file(&self) -> PathBuf {
        expand_home(&self.session.recording_file)
    }

    /// Session options described by this configuration
    pub fn session_options(&self) -> SessionOptions {
        let mode = self.session.mode;
        SessionOptions::new(self.recording_file())
            .with_replay(matches!(mode, Mode::Replay | Mode::Rerecord))
            .with_rerecord(mode == Mode::Rerecord)
            .with_record_additional_io(self.session.record_additional_io)
            .with_automated(self.timing.automated)
            .with_step_delay(Duration::from_millis(self.timing.step_delay_ms))
            .with_diff_extension(self.session.diff_extension.clone())
    }
}
