//! Errors raised by the session core.

use crate::diff::MismatchReport;

/// Result type for session operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving a recorded session.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The recording file contains a line that is neither an input nor an output record.
    #[error("Recorded IO file is corrupted (line {line}): {content:?}")]
    Format { line: usize, content: String },

    /// Observed output disagreed with the recording during an automated run.
    #[error("{0}")]
    Mismatch(Box<MismatchReport>),

    /// A block update referenced an exchange the recording file no longer has.
    #[error("Recording has no exchange #{index} to update")]
    MissingExchange { index: usize },

    /// The operator chose to quit while resolving a mismatch.
    #[error("Session aborted by operator")]
    Quit,

    /// The console reached end of input while an answer was required.
    #[error("Console input closed while waiting for an answer")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// The mismatch payload, if this is an output mismatch.
    pub fn mismatch(&self) -> Option<&MismatchReport> {
        match self {
            HarnessError::Mismatch(report) => Some(report),
            _ => None,
        }
    }
}
