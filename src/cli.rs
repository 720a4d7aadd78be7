//! CLI definitions for ioreplay
//!
//! The clap structure lives here, apart from main.rs, so the command tree can
//! be inspected in tests and by completion generation.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

use ioreplay::Mode;

/// Build clap styles for help output.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "ioreplay")]
#[command(about = "Record, replay and diff interactive console sessions")]
#[command(
    long_about = "ioreplay - record, replay and diff interactive console sessions.

A program talks to its user through ioreplay's session recorder. The first run
records every answer and every printed line to a recording file. Later runs
replay the recorded answers and report any output that no longer contains
what was recorded, writing each disagreement to <recording>.diff.

QUICK START:
    ioreplay demo --mode live --record-additional    Record a guestbook session
    ioreplay demo                                    Replay it and compare output
    ioreplay inspect test_data/io_recorded           Show what was recorded

CONFIGURATION:
    ~/.config/ioreplay/config.toml, overridden by IOREPLAY_* variables.
    Log verbosity comes from IOREPLAY_LOG (default: warn)."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/ioreplay/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the exchanges stored in a recording file
    #[command(long_about = "Parse a recording file and list its contents.

Prints the preamble (output recorded before the first answer) and every
exchange: its position, counter tag, recorded input and output lines.

EXAMPLES:
    ioreplay inspect test_data/io_recorded
    ioreplay inspect test_data/io_recorded --json")]
    Inspect {
        /// Recording file to inspect
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run a small guestbook program through the session recorder
    #[command(long_about = "Run a guestbook program through the session recorder.

The program greets you, asks for names until you decline, and says goodbye.
Use it to try recording and replaying a session end to end.

EXAMPLES:
    ioreplay demo --mode live --record-additional --recording /tmp/guests
    ioreplay demo --recording /tmp/guests
    ioreplay demo --recording /tmp/guests --automated
    ioreplay demo --mode rerecord --recording /tmp/guests")]
    Demo {
        /// Session mode (overrides the config file)
        #[arg(long, value_enum)]
        mode: Option<Mode>,
        /// Recording file (overrides the config file)
        #[arg(long, value_name = "FILE")]
        recording: Option<PathBuf>,
        /// Append new I/O once the recorded answers run out
        #[arg(long)]
        record_additional: bool,
        /// Automated execution: no pauses, mismatches fail immediately
        #[arg(long)]
        automated: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

The config file is read first, then IOREPLAY_* environment variables are
applied on top.

EXAMPLE:
    ioreplay config show")]
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
