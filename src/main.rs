//! ioreplay - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};
use commands::demo::DemoArgs;
use ioreplay::HarnessError;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "IOREPLAY_LOG";

/// Exit code used when the operator quits from a mismatch prompt.
const EXIT_QUIT: u8 = 2;

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Inspect { file, json } => commands::inspect::handle(&file, json),
        Commands::Demo {
            mode,
            recording,
            record_additional,
            automated,
        } => commands::demo::handle(
            config_path,
            DemoArgs {
                mode,
                recording,
                record_additional,
                automated,
            },
        ),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Init { force } => commands::config::handle_init(config_path, force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err.downcast_ref::<HarnessError>(), Some(HarnessError::Quit)) {
                eprintln!("{}", err);
                return ExitCode::from(EXIT_QUIT);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
