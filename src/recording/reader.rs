//! Recording file parser.
//!
//! Parsing is two-staged: [`RecordLine::tokenize`] turns one line into a
//! structured record, and [`Recording::parse`] folds the records into the
//! preamble and per-input output blocks.
//!
//! # Skip widths
//!
//! - `I(<digits>):` tag present: the payload starts right after the tag's `:`.
//! - Any other input or output line: the payload starts after the first two
//!   characters (marker plus separator).

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Exchange, RecordKind, Recording};
use crate::error::{HarnessError, HarnessResult};
use crate::files;

/// A single tokenized line of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLine<'a> {
    pub kind: RecordKind,
    /// Counter from an `I(<n>):` tag.
    pub counter: Option<u64>,
    pub payload: &'a str,
}

/// Skip `n` characters (not bytes) from the start of `line`.
fn skip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

/// Parse a `(<digits>):` counter tag directly after the input marker.
///
/// Returns the announced counter and the payload after the tag.
fn counter_tag(after_marker: &str) -> Option<(Option<u64>, &str)> {
    let rest = after_marker.strip_prefix('(')?;
    let close = rest.find(')')?;
    let digits = &rest[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let payload = rest[close + 1..].strip_prefix(':')?;
    Some((digits.parse().ok(), payload))
}

impl<'a> RecordLine<'a> {
    /// Tokenize one line (without its line terminator).
    ///
    /// `line_no` is 1-based and only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Format`] when the line does not start with a
    /// known record marker.
    pub fn tokenize(line: &'a str, line_no: usize) -> HarnessResult<Self> {
        let corrupt = || HarnessError::Format {
            line: line_no,
            content: line.to_string(),
        };

        let mut chars = line.chars();
        let kind = chars
            .next()
            .and_then(RecordKind::from_marker)
            .ok_or_else(corrupt)?;

        let record = match kind {
            RecordKind::Input => match counter_tag(chars.as_str()) {
                Some((counter, payload)) => RecordLine {
                    kind,
                    counter,
                    payload,
                },
                None => RecordLine {
                    kind,
                    counter: None,
                    payload: skip_chars(line, 2),
                },
            },
            RecordKind::Output => RecordLine {
                kind,
                counter: None,
                payload: skip_chars(line, 2),
            },
        };

        Ok(record)
    }
}

/// Tokenize every line of `contents`, tolerating trailing blank lines only.
pub(crate) fn tokenize_all(contents: &str) -> HarnessResult<Vec<RecordLine<'_>>> {
    let lines: Vec<&str> = contents.lines().collect();
    let used = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |last| last + 1);

    lines[..used]
        .iter()
        .copied()
        .enumerate()
        .map(|(idx, line)| RecordLine::tokenize(line, idx + 1))
        .collect()
}

impl Recording {
    /// Parse a recording from its full text.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Format`] for the first line that is neither an
    /// input nor an output record. A corrupt file is never partially loaded.
    pub fn parse(contents: &str) -> HarnessResult<Self> {
        let mut recording = Recording::default();

        for record in tokenize_all(contents)? {
            match record.kind {
                RecordKind::Input => recording.exchanges.push(Exchange {
                    counter: record.counter,
                    input: record.payload.to_string(),
                    output: String::new(),
                }),
                RecordKind::Output => {
                    let block = match recording.exchanges.last_mut() {
                        Some(exchange) => &mut exchange.output,
                        None => &mut recording.preamble,
                    };
                    block.push_str(record.payload);
                    block.push('\n');
                }
            }
        }

        Ok(recording)
    }

    /// Load and parse a recording file, creating an empty one if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or read, or a
    /// format error if it is corrupt.
    pub fn load<P: AsRef<Path>>(path: P) -> HarnessResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "Creating empty recording");
            files::truncate(path)?;
        }

        let contents = fs::read_to_string(path)?;
        let recording = Self::parse(&contents)?;
        debug!(
            path = %path.display(),
            inputs = recording.len(),
            preamble_bytes = recording.preamble.len(),
            "Loaded recording"
        );
        Ok(recording)
    }
}
