//! Command handlers for the ioreplay CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod demo;
pub mod inspect;

use anyhow::Result;
use std::path::Path;

use ioreplay::Config;

/// Load the configuration file (explicit path or default location) and apply
/// `IOREPLAY_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;
    Ok(config)
}
