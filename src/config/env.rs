//! Environment-based configuration overrides.
//!
//! Variables are `IOREPLAY_<NAME>`; they win over the config file.

use anyhow::{anyhow, Result};

use super::types::{Config, Mode};

/// Environment configuration prefix.
pub const ENV_PREFIX: &str = "IOREPLAY";

/// Build the full environment variable name.
pub fn var_name(name: &str) -> String {
    format!("{}_{}", ENV_PREFIX, name.to_uppercase())
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("{}: expected a boolean, got '{}'", var, other)),
    }
}

impl Config {
    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when a value cannot be parsed.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            let var = var_name(name);
            lookup(&var).map(|value| (var, value))
        };

        if let Some((var, value)) = get("mode") {
            self.session.mode = value
                .parse::<Mode>()
                .map_err(|e| anyhow!("{}: {}", var, e))?;
        }
        if let Some((_, value)) = get("recording_file") {
            self.session.recording_file = value;
        }
        if let Some((var, value)) = get("record_additional_io") {
            self.session.record_additional_io = parse_bool(&var, &value)?;
        }
        if let Some((var, value)) = get("automated") {
            self.timing.automated = parse_bool(&var, &value)?;
        }
        if let Some((var, value)) = get("step_delay_ms") {
            self.timing.step_delay_ms = value
                .trim()
                .parse()
                .map_err(|_| anyhow!("{}: expected milliseconds, got '{}'", var, value))?;
        }

        Ok(())
    }
}
