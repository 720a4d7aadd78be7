//! ioreplay library
//!
//! Record, replay and diff the console I/O of interactive programs. A program
//! routes its output through [`SessionRecorder::emit`] and its questions
//! through [`SessionRecorder::prompt`]; the recorder answers from a recording
//! file and checks that the output still contains what was recorded.

pub mod config;
pub mod console;
pub mod diff;
pub mod error;
pub mod files;
pub mod recording;
pub mod session;

pub use config::{Config, Mode};
pub use console::{Console, ScriptedConsole, StdConsole};
pub use diff::MismatchReport;
pub use error::{HarnessError, HarnessResult};
pub use recording::Recording;
pub use session::{Resolution, SessionOptions, SessionRecorder};
