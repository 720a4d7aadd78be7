//! Console abstraction used by the session core.
//!
//! [`StdConsole`] talks to the real terminal. [`ScriptedConsole`] answers
//! prompts from a canned list and keeps everything that was printed, so a
//! session can be driven without a terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented console used for program output and operator input.
pub trait Console {
    /// Print one line of text.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Show `prompt` (without a newline) and read one line of input.
    ///
    /// Returns `None` at end of input. The line terminator is stripped.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Clear the screen before showing a report.
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console bound to the process's stdin and stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "\x1b[2J\x1b[H")?;
        stdout.flush()
    }
}

/// Console that answers prompts from a queue and records its transcript.
///
/// Each answered prompt is recorded as one line `prompt + answer`, the way it
/// would read on a terminal.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    lines: Vec<String>,
    prompts: Vec<String>,
    clears: usize,
}

impl ScriptedConsole {
    /// Create a console that will answer prompts with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue another answer.
    pub fn push_answer(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    /// Lines printed so far, including echoed prompts.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Prompts that were shown for live input.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not yet consumed.
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    /// Number of screen clears requested.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Everything printed, one line per entry, newline-terminated.
    pub fn transcript(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        let answer = self.answers.pop_front();
        if let Some(answer) = &answer {
            self.lines.push(format!("{prompt}{answer}"));
        }
        Ok(answer)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}
