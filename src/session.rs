//! Session recorder: the mediator between a program and its console.
//!
//! Every line the program prints goes through [`SessionRecorder::emit`] and
//! every question it asks goes through [`SessionRecorder::prompt`]. Depending
//! on the [`SessionOptions`], answers come from the user or from a recording,
//! output is compared against the recording, and new output/input pairs are
//! appended to it.
//!
//! # Deferred comparison
//!
//! The output block that follows an answer is only complete when the next
//! question is asked, so block *k* is checked when prompt *k+1* is reached.
//! [`SessionRecorder::finalize`] checks the last block.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::console::{Console, StdConsole};
use crate::diff::MismatchReport;
use crate::error::{HarnessError, HarnessResult};
use crate::files;
use crate::recording::{input_record, output_record, replace_block, Recording};

/// Default pause after echoing a replayed answer.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Default extension of the diff file written next to the recording.
pub const DEFAULT_DIFF_EXTENSION: &str = ".diff";

const RESOLUTION_PROMPT: &str =
    "Press ENTER to continue | (U)pdate recorded output to observed | (Q)uit: ";

/// Construction options for a [`SessionRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Where session data lives.
    pub recording_file: PathBuf,
    /// Consume the recorded inputs and compare output against the recording.
    pub replay: bool,
    /// Append newly produced I/O once the recorded inputs are exhausted.
    pub record_additional_io: bool,
    /// Replay inputs but treat all output as the new ground truth.
    pub rerecord: bool,
    /// Running under automated test execution: no delays, mismatches are fatal.
    pub automated: bool,
    /// Pause after each replayed answer in interactive runs.
    pub step_delay: Duration,
    /// Suffix appended to the recording path to name the diff file.
    pub diff_extension: String,
}

impl SessionOptions {
    /// Replay options for `recording_file`, interactive, nothing recorded.
    pub fn new(recording_file: impl Into<PathBuf>) -> Self {
        Self {
            recording_file: recording_file.into(),
            replay: true,
            record_additional_io: false,
            rerecord: false,
            automated: false,
            step_delay: DEFAULT_STEP_DELAY,
            diff_extension: DEFAULT_DIFF_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_replay(mut self, replay: bool) -> Self {
        self.replay = replay;
        self
    }

    #[must_use]
    pub fn with_record_additional_io(mut self, record: bool) -> Self {
        self.record_additional_io = record;
        self
    }

    #[must_use]
    pub fn with_rerecord(mut self, rerecord: bool) -> Self {
        self.rerecord = rerecord;
        self
    }

    #[must_use]
    pub fn with_automated(mut self, automated: bool) -> Self {
        self.automated = automated;
        self
    }

    #[must_use]
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    #[must_use]
    pub fn with_diff_extension(mut self, extension: impl Into<String>) -> Self {
        self.diff_extension = extension.into();
        self
    }

    /// Path of the diff file for this recording.
    pub fn diff_file(&self) -> PathBuf {
        files::diff_path_for(&self.recording_file, &self.diff_extension)
    }

    /// Delay actually applied: always zero under automated execution.
    pub fn effective_step_delay(&self) -> Duration {
        if self.automated {
            Duration::ZERO
        } else {
            self.step_delay
        }
    }
}

/// Operator's answer to a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Accept the discrepancy and carry on.
    Continue,
    /// Replace the recorded block with the observed one.
    Update,
    /// Stop the session.
    Quit,
}

impl Resolution {
    /// Parse an operator answer. A bare Enter means continue.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "" | "c" | "C" | "continue" | "Continue" => Some(Resolution::Continue),
            "u" | "U" | "update" | "Update" => Some(Resolution::Update),
            "q" | "Q" | "quit" | "Quit" => Some(Resolution::Quit),
            _ => None,
        }
    }
}

/// A recorded block waiting to be checked against the open output segment.
#[derive(Debug, Clone)]
struct PendingBlock {
    /// 0 for the preamble, otherwise the 1-based input the block follows.
    index: usize,
    input: String,
    expected: String,
}

/// Mediates every print/prompt pair of one interactive session.
pub struct SessionRecorder<C: Console = StdConsole> {
    options: SessionOptions,
    console: C,
    inputs: VecDeque<String>,
    expected: VecDeque<String>,
    observed: Vec<String>,
    input_count: usize,
    pending: Option<PendingBlock>,
}

impl SessionRecorder<StdConsole> {
    /// Start a session on the real terminal.
    ///
    /// # Errors
    ///
    /// See [`SessionRecorder::with_console`].
    pub fn new(options: SessionOptions) -> HarnessResult<Self> {
        Self::with_console(options, StdConsole)
    }
}

impl<C: Console> SessionRecorder<C> {
    /// Start a session on `console`.
    ///
    /// In replay mode the recording is loaded (created empty if absent) and
    /// the diff file is truncated. In rerecord mode the recording file is
    /// truncated after loading, so its inputs are still replayed.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Format`] if the recording is corrupt, or an
    /// I/O error if a file cannot be read or truncated.
    pub fn with_console(options: SessionOptions, console: C) -> HarnessResult<Self> {
        let mut recording = Recording::default();
        if options.replay {
            recording = Recording::load(&options.recording_file)?;
            files::truncate(&options.diff_file())?;
        }
        if options.rerecord {
            files::truncate(&options.recording_file)?;
            info!(path = %options.recording_file.display(), "Truncated recording for rerecord");
        }

        let pending = (options.replay && !options.rerecord && !recording.preamble.is_empty())
            .then(|| PendingBlock {
                index: 0,
                input: String::new(),
                expected: recording.preamble.clone(),
            });
        let (inputs, expected) = recording.into_queues();

        info!(
            path = %options.recording_file.display(),
            replay = options.replay,
            rerecord = options.rerecord,
            record_additional_io = options.record_additional_io,
            automated = options.automated,
            queued_inputs = inputs.len(),
            "Session started"
        );

        Ok(Self {
            options,
            console,
            inputs,
            expected,
            observed: vec![String::new()],
            input_count: 0,
            pending,
        })
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn recording_file(&self) -> &Path {
        &self.options.recording_file
    }

    /// Inputs consumed or typed so far.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Recorded inputs not yet replayed.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Output segments observed so far; the last one is still open.
    pub fn observed_segments(&self) -> &[String] {
        &self.observed
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Print `text` on behalf of the program.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console or the recording file fails.
    pub fn emit(&mut self, text: &str) -> HarnessResult<()> {
        self.console.write_line(text)?;
        self.open_segment().push_str(text);
        self.open_segment().push('\n');

        if self.captures_output() {
            files::append(&self.options.recording_file, &output_record(text))?;
        }
        Ok(())
    }

    /// Ask `question` on behalf of the program and return the answer.
    ///
    /// While recorded inputs remain (replay or rerecord mode) the next one is
    /// used and echoed; otherwise the user is asked, and an empty answer takes
    /// `default` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Mismatch`] when the previous output block
    /// disagrees with the recording in an automated run,
    /// [`HarnessError::Quit`] when the operator quits,
    /// [`HarnessError::InputClosed`] at end of console input, or an I/O error.
    pub fn prompt(&mut self, question: &str, default: Option<&str>) -> HarnessResult<String> {
        self.open_segment().push_str(question);
        self.open_segment().push('\n');
        self.observed.push(String::new());

        if let Some(pending) = self.pending.take() {
            let closed = self.observed.len() - 2;
            let extending = self.extends_recording();
            let (index, expected) = (pending.index, pending.expected.clone());
            self.compare(pending, closed)?;
            if extending {
                let segment = self.observed[closed].clone();
                let shown = segment
                    .strip_suffix(&format!("{question}\n"))
                    .unwrap_or(&segment);
                self.sync_block(index, &expected, shown)?;
            }
        }

        let replayed = if self.options.replay || self.options.rerecord {
            self.inputs.pop_front()
        } else {
            None
        };
        let replaying = replayed.is_some();
        let (answer, expected) = match replayed {
            Some(answer) => {
                let expected = self.expected.pop_front().unwrap_or_default();
                self.console.write_line(&format!("{question}{answer}"))?;
                self.pause();
                debug!(answer = %answer, remaining = self.inputs.len(), "Replayed input");
                (answer, Some(expected))
            }
            None => (self.read_answer(question, default)?, None),
        };

        self.input_count += 1;

        if let Some(expected) = expected {
            if !self.options.rerecord && !expected.is_empty() {
                self.pending = Some(PendingBlock {
                    index: self.input_count,
                    input: answer.clone(),
                    expected,
                });
            }
        }

        if self.options.rerecord || (self.options.record_additional_io && !replaying) {
            let records = format!(
                "{}{}",
                output_record(question),
                input_record(self.input_count as u64, &answer)
            );
            files::append(&self.options.recording_file, &records)?;
        }

        Ok(answer)
    }

    /// Check the last output block against the recording.
    ///
    /// Call once the program is done; calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Same as the comparison performed by [`prompt`](Self::prompt).
    pub fn finalize(&mut self) -> HarnessResult<()> {
        if let Some(pending) = self.pending.take() {
            let open = self.observed.len() - 1;
            let extending = self.extends_recording();
            let (index, expected) = (pending.index, pending.expected.clone());
            self.compare(pending, open)?;
            if extending {
                let segment = self.observed[open].clone();
                self.sync_block(index, &expected, &segment)?;
            }
        }
        debug!(
            inputs = self.input_count,
            unused_inputs = self.inputs.len(),
            "Session finalized"
        );
        Ok(())
    }

    fn open_segment(&mut self) -> &mut String {
        if self.observed.is_empty() {
            self.observed.push(String::new());
        }
        let last = self.observed.len() - 1;
        &mut self.observed[last]
    }

    /// New output is appended while rerecording, or while recording
    /// additional I/O past the end of the replayed inputs. A segment that
    /// still has a recorded block is never appended twice.
    fn captures_output(&self) -> bool {
        self.options.rerecord
            || (self.options.record_additional_io
                && self.inputs.is_empty()
                && self.pending.is_none())
    }

    /// Recording additional I/O with every recorded input consumed: the
    /// records written from here on follow the last recorded block.
    fn extends_recording(&self) -> bool {
        self.options.record_additional_io && !self.options.rerecord && self.inputs.is_empty()
    }

    /// Make a recorded block equal to the observed output before records are
    /// appended after it.
    fn sync_block(&mut self, index: usize, expected: &str, observed: &str) -> HarnessResult<()> {
        if observed == expected {
            return Ok(());
        }
        replace_block(&self.options.recording_file, index, None, observed)?;
        info!(exchange = index, "Recorded block extended with observed output");
        Ok(())
    }

    fn read_answer(&mut self, question: &str, default: Option<&str>) -> HarnessResult<String> {
        let typed = self
            .console
            .read_line(question)?
            .ok_or(HarnessError::InputClosed)?;
        Ok(match default {
            Some(default) if typed.is_empty() => default.to_string(),
            _ => typed,
        })
    }

    fn pause(&self) {
        let delay = self.options.effective_step_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    /// Containment check of a recorded block against an observed segment.
    fn compare(&mut self, pending: PendingBlock, segment: usize) -> HarnessResult<()> {
        let observed = self.observed[segment].clone();
        if observed.contains(&pending.expected) {
            debug!(exchange = pending.index, "Output matches recording");
            return Ok(());
        }

        let report = MismatchReport::new(
            pending.index,
            pending.input.as_str(),
            pending.expected.as_str(),
            observed.as_str(),
        );
        warn!(
            exchange = pending.index,
            input = %pending.input,
            "Output does not match recording"
        );

        if self.options.automated {
            return Err(HarnessError::Mismatch(Box::new(report)));
        }
        self.resolve(&report, &pending, &observed)
    }

    fn resolve(
        &mut self,
        report: &MismatchReport,
        pending: &PendingBlock,
        observed: &str,
    ) -> HarnessResult<()> {
        let rendered = report.render();
        files::append(&self.options.diff_file(), &rendered)?;

        self.console.clear()?;
        self.console.write_line("OUTPUT does not match RECORDED output!")?;
        self.console.write_line(rendered.trim_end_matches('\n'))?;
        self.pause();

        loop {
            let answer = self.console.read_line(RESOLUTION_PROMPT)?.unwrap_or_default();
            match Resolution::parse(&answer) {
                Some(Resolution::Continue) => return Ok(()),
                Some(Resolution::Update) => return self.update_recording(pending, observed),
                Some(Resolution::Quit) => return Err(HarnessError::Quit),
                None => self
                    .console
                    .write_line(&format!("Unknown choice '{answer}'"))?,
            }
        }
    }

    fn update_recording(&mut self, pending: &PendingBlock, observed: &str) -> HarnessResult<()> {
        let new_input = if pending.index > 0 {
            let question = format!(
                "Change the input or press ENTER to keep the old [{}] ",
                pending.input
            );
            self.console
                .read_line(&question)?
                .filter(|answer| !answer.is_empty())
        } else {
            None
        };

        replace_block(
            &self.options.recording_file,
            pending.index,
            new_input.as_deref(),
            observed,
        )?;
        warn!(exchange = pending.index, "Recorded output replaced with observed output");
        Ok(())
    }
}
