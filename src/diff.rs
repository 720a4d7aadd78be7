//! Line diffs between recorded and observed output blocks.
//!
//! Only insertions and deletions are reported; unchanged context lines are
//! dropped so a report shows nothing but the disagreement.

use similar::{ChangeTag, TextDiff};
use std::fmt;

/// Compute a line diff of `recorded` against `observed`.
///
/// Deleted lines are prefixed with `- `, inserted lines with `+ `. Every
/// emitted line ends with a newline.
pub fn line_diff(recorded: &str, observed: &str) -> String {
    let diff = TextDiff::from_lines(recorded, observed);
    let mut out = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "- ",
            ChangeTag::Insert => "+ ",
            ChangeTag::Equal => continue,
        };
        out.push_str(sign);
        out.push_str(change.value());
        if change.missing_newline() {
            out.push('\n');
        }
    }

    out
}

/// Prefix every line of a block with `marker`, dropping trailing newlines.
fn prefix_lines(block: &str, marker: &str) -> String {
    let trimmed = block.trim_end_matches('\n');
    format!("{marker}{}", trimmed.replace('\n', &format!("\n{marker}")))
}

/// A single disagreement between a recorded output block and what the
/// program printed this time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReport {
    /// Input counter the block belongs to (0 for output before the first input).
    pub input_count: usize,
    /// Recorded input that preceded the block (empty before the first input).
    pub input: String,
    /// Output of [`line_diff`].
    pub difference: String,
    pub recorded: String,
    pub observed: String,
}

impl MismatchReport {
    pub fn new(
        input_count: usize,
        input: impl Into<String>,
        recorded: impl Into<String>,
        observed: impl Into<String>,
    ) -> Self {
        let recorded = recorded.into();
        let observed = observed.into();
        Self {
            input_count,
            input: input.into(),
            difference: line_diff(&recorded, &observed),
            recorded,
            observed,
        }
    }

    /// Render the human-readable block written to the diff file.
    pub fn render(&self) -> String {
        format!(
            "INPUT({}):{}\nDIFFERENCE:\n{}RECORDED:\n{}\nOBSERVED:\n{}\n",
            self.input_count,
            self.input,
            self.difference,
            prefix_lines(&self.recorded, "R:"),
            prefix_lines(&self.observed, "O:"),
        )
    }
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Output does not match recorded output!\nDIFFERENCE:\n{}RECORDED:\n{}OBSERVED:\n{}<-",
            self.difference, self.recorded, self.observed
        )
    }
}
