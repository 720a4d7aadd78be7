//! Demo command handler: a guestbook driven through the session recorder.

use anyhow::Result;
use std::path::PathBuf;

use ioreplay::{Console, HarnessResult, Mode, SessionRecorder};

use super::load_config;

/// Flags given on the command line, applied over the configuration.
#[derive(Debug, Default)]
pub struct DemoArgs {
    pub mode: Option<Mode>,
    pub recording: Option<PathBuf>,
    pub record_additional: bool,
    pub automated: bool,
}

/// Run the guestbook on the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&std::path::Path>, args: DemoArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(mode) = args.mode {
        config.session.mode = mode;
    }

    let mut options = config.session_options();
    if let Some(recording) = args.recording {
        options.recording_file = recording;
    }
    if args.record_additional {
        options = options.with_record_additional_io(true);
    }
    if args.automated {
        options = options.with_automated(true);
    }

    let mut session = SessionRecorder::new(options)?;
    guestbook(&mut session)?;
    Ok(())
}

/// Greet guests until the operator declines to sign another, then check the
/// final output block. Returns the names that were signed.
pub fn guestbook<C: Console>(session: &mut SessionRecorder<C>) -> HarnessResult<Vec<String>> {
    let mut guests = Vec::new();
    session.emit("Welcome to the guestbook!")?;

    loop {
        let name = session.prompt("Name: ", Some("stranger"))?;
        session.emit(&format!("Hello {}", name))?;
        guests.push(name);

        let another = session.prompt("Sign another? [y/N] ", Some("n"))?;
        if !another.trim().eq_ignore_ascii_case("y") {
            break;
        }
    }

    session.emit(&format!("Goodbye, {} guest(s) signed", guests.len()))?;
    session.finalize()?;
    Ok(guests)
}
