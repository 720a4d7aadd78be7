//! Config subcommands handler

use anyhow::Result;
use std::path::Path;

use ioreplay::Config;

use super::load_config;

/// Show the effective configuration (file plus environment) as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", render(&config)?);
    Ok(())
}

/// Write the default configuration file.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    Config::init_at(&path, force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn render(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
