//! Recording file format
//!
//! A recording is a plain UTF-8 text file of line records. Each line is either
//! an input record or an output record:
//!
//! ```text
//! O:Welcome!                 <- output shown before the first answer (preamble)
//! O:Name:
//! I(1):Alice                 <- input record with counter tag
//! O:Hello Alice              <- output block of input 1
//! I:Bob                      <- bare input record
//! ```
//!
//! Output records that follow an input record, up to the next input record or
//! end of file, form that input's output block.
//!
//! # Structure
//!
//! - `reader` - Tokenizing and parsing recordings
//! - `writer` - Rendering records and rewriting blocks in place

mod reader;
mod writer;

pub use reader::RecordLine;
pub use writer::{input_record, output_record, replace_block};

use serde::Serialize;
use std::collections::VecDeque;

/// Record kinds, keyed by their leading marker character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Input (an answer fed to a prompt)
    Input, // 'I'
    /// Output (one line printed by the program)
    Output, // 'O'
}

impl RecordKind {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'I' => Some(RecordKind::Input),
            'O' => Some(RecordKind::Output),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            RecordKind::Input => 'I',
            RecordKind::Output => 'O',
        }
    }
}

/// One recorded input together with the output block that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    /// Counter announced by an `I(<n>):` tag, if the record carried one.
    pub counter: Option<u64>,
    pub input: String,
    /// Output lines, each terminated by `\n`.
    pub output: String,
}

/// A parsed recording file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recording {
    /// Output recorded before the first input record.
    pub preamble: String,
    pub exchanges: Vec<Exchange>,
}

impl Recording {
    /// Number of recorded inputs.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// True when the file held no records at all.
    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.exchanges.is_empty()
    }

    pub fn inputs(&self) -> Vec<&str> {
        self.exchanges.iter().map(|e| e.input.as_str()).collect()
    }

    pub fn outputs(&self) -> Vec<&str> {
        self.exchanges.iter().map(|e| e.output.as_str()).collect()
    }

    /// Split into the input queue and the aligned recorded-output queue.
    ///
    /// Both queues always have the same length.
    pub fn into_queues(self) -> (VecDeque<String>, VecDeque<String>) {
        self.exchanges
            .into_iter()
            .map(|e| (e.input, e.output))
            .unzip()
    }
}
