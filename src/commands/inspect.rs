//! Inspect command handler

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ioreplay::Recording;

/// Parse `file` and print its preamble and exchanges.
///
/// The file is only read; a missing recording is an error here.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, json: bool) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read recording: {}", file.display()))?;
    let recording = Recording::parse(&contents)
        .with_context(|| format!("Failed to parse recording: {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recording)?);
    } else {
        print!("{}", format_recording(&recording));
    }
    Ok(())
}

fn push_block(out: &mut String, block: &str) {
    for line in block.lines() {
        let _ = writeln!(out, "    O:{}", line);
    }
}

/// Render a recording as indented text.
pub fn format_recording(recording: &Recording) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} exchange(s)", recording.len());
    if !recording.preamble.is_empty() {
        out.push_str("  preamble\n");
        push_block(&mut out, &recording.preamble);
    }

    for (idx, exchange) in recording.exchanges.iter().enumerate() {
        let tag = match exchange.counter {
            Some(counter) => format!("I({})", counter),
            None => "I".to_string(),
        };
        let _ = writeln!(out, "  #{} {}:{}", idx + 1, tag, exchange.input);
        push_block(&mut out, &exchange.output);
    }

    out
}
