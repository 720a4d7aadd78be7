//! Recording file writer
//!
//! Renders individual records for appending and rewrites a single output
//! block in place.

use std::fs;
use std::path::Path;

use tracing::info;

use super::reader::tokenize_all;
use super::RecordKind;
use crate::error::{HarnessError, HarnessResult};
use crate::files;

/// Render printed text as output records.
///
/// Embedded newlines become `\nO:` so every physical line stays an output
/// record and the text reads back as the same lines.
pub fn output_record(text: &str) -> String {
    format!("O:{}\n", text.replace('\n', "\nO:"))
}

/// Render an answer as a counter-tagged input record.
pub fn input_record(counter: u64, text: &str) -> String {
    format!("I({counter}):{text}\n")
}

/// Render an output block (newline-terminated lines) as output records.
fn block_records(block: &str) -> String {
    block
        .split_terminator('\n')
        .map(|line| format!("O:{line}\n"))
        .collect()
}

/// Replace the output block of exchange `index` in the recording at `path`.
///
/// `index` 0 addresses the preamble (output before the first input record);
/// `index` n addresses the output records following the n-th input record.
/// When `new_input` is given, that input record's text is replaced too,
/// keeping its counter tag. All other records are preserved verbatim.
///
/// # Errors
///
/// Returns a format error if the file is corrupt,
/// [`HarnessError::MissingExchange`] if it has fewer than `index` inputs, or
/// an I/O error if it cannot be read or replaced.
pub fn replace_block(
    path: &Path,
    index: usize,
    new_input: Option<&str>,
    block: &str,
) -> HarnessResult<()> {
    let contents = fs::read_to_string(path)?;
    let records = tokenize_all(&contents)?;
    let lines: Vec<&str> = contents.lines().take(records.len()).collect();

    let start = if index == 0 {
        0
    } else {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind == RecordKind::Input)
            .nth(index - 1)
            .map(|(pos, _)| pos + 1)
            .ok_or(HarnessError::MissingExchange { index })?
    };
    let end = records[start..]
        .iter()
        .position(|r| r.kind == RecordKind::Input)
        .map_or(records.len(), |offset| start + offset);

    let mut rewritten = String::with_capacity(contents.len() + block.len());
    for (pos, line) in lines[..start].iter().enumerate() {
        match new_input {
            Some(text) if pos + 1 == start && index > 0 => {
                let replacement = match records[pos].counter {
                    Some(counter) => input_record(counter, text),
                    None => format!("I:{text}\n"),
                };
                rewritten.push_str(&replacement);
            }
            _ => {
                rewritten.push_str(line);
                rewritten.push('\n');
            }
        }
    }
    rewritten.push_str(&block_records(block));
    for line in &lines[end..] {
        rewritten.push_str(line);
        rewritten.push('\n');
    }

    files::atomic_write(path, &rewritten)?;
    info!(
        path = %path.display(),
        exchange = index,
        replaced_records = end - start,
        "Updated recorded output block"
    );
    Ok(())
}
