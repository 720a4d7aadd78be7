//! Unit tests for the session recorder

use std::fs;

use ioreplay::{HarnessError, ScriptedConsole, SessionRecorder};
use tempfile::TempDir;

use crate::helpers::{automated, greeter, interactive, load_fixture, temp_fixture};

// ============================================================================
// Replay
// ============================================================================

#[test]
fn bare_recording_matches_same_output() {
    let (_temp, path) = temp_fixture("bare.rec");
    let mut session =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();

    let name = session.prompt("", None).unwrap();
    session.emit("Hello Alice").unwrap();
    session.finalize().unwrap();

    assert_eq!(name, "Alice");
    assert_eq!(session.input_count(), 1);
}

#[test]
fn bare_recording_rejects_changed_output() {
    let (_temp, path) = temp_fixture("bare.rec");
    let mut session =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();

    session.prompt("", None).unwrap();
    session.emit("Hello, Alice").unwrap();
    let err = session.finalize().unwrap_err();

    let report = err.mismatch().unwrap();
    assert_eq!(report.recorded, "Hello Alice\n");
    assert_eq!(report.observed, "Hello, Alice\n");
    let message = err.to_string();
    assert!(message.contains("Hello Alice"));
    assert!(message.contains("Hello, Alice"));
}

#[test]
fn recorded_block_only_has_to_be_contained() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "I:go\nO:Hello\n").unwrap();

    let mut session =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();
    session.prompt("", None).unwrap();
    session.emit("Hi").unwrap();
    session.emit("Hello").unwrap();
    session.emit("there").unwrap();
    session.finalize().unwrap();
}

#[test]
fn mismatch_is_reported_at_next_prompt() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "I(1):a\nO:first\nO:Q: \nI(2):b\nO:second\n").unwrap();

    let mut session =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();
    session.prompt("Q: ", None).unwrap();
    session.emit("changed").unwrap();
    let err = session.prompt("Q: ", None).unwrap_err();

    let report = err.mismatch().unwrap();
    assert_eq!(report.input_count, 1);
    assert_eq!(report.input, "a");
}

#[test]
fn preamble_mismatch_uses_exchange_zero() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let mut session =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();

    session.emit("Good morning").unwrap();
    let err = session.prompt("Name: ", None).unwrap_err();
    let report = err.mismatch().unwrap();
    assert_eq!(report.input_count, 0);
    assert_eq!(report.input, "");
}

#[test]
fn corrupt_recording_fails_construction() {
    let (_temp, path) = temp_fixture("corrupt.rec");
    let err = SessionRecorder::with_console(automated(&path), ScriptedConsole::default())
        .err()
        .unwrap();
    assert!(matches!(err, HarnessError::Format { line: 1, .. }));
}

#[test]
fn replay_truncates_stale_diff_file() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let options = automated(&path);
    fs::write(options.diff_file(), "old report\n").unwrap();

    let _session =
        SessionRecorder::with_console(options.clone(), ScriptedConsole::default()).unwrap();
    assert_eq!(fs::read_to_string(options.diff_file()).unwrap(), "");
}

#[test]
fn falls_back_to_live_input_when_recording_runs_out() {
    let (_temp, path) = temp_fixture("bare.rec");
    let mut session =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::new(["Bob"])).unwrap();

    assert_eq!(session.prompt("Name: ", None).unwrap(), "Alice");
    session.emit("Hello Alice").unwrap();
    assert_eq!(session.prompt("Name: ", None).unwrap(), "Bob");
    assert_eq!(session.console().prompts(), ["Name: "]);
    session.finalize().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), load_fixture("bare.rec"));
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn live_recording_replays_cleanly_and_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data").join("io_recorded");

    let live = automated(&path)
        .with_replay(false)
        .with_record_additional_io(true);
    let mut session = SessionRecorder::with_console(live, ScriptedConsole::new(["Alice"])).unwrap();
    greeter(&mut session, "Hello").unwrap();
    let live_segments = session.observed_segments().to_vec();

    let recorded = fs::read_to_string(&path).unwrap();
    assert_eq!(recorded, load_fixture("greeter.rec"));

    let mut replayed_segments = Vec::new();
    for _ in 0..2 {
        let mut session =
            SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();
        assert_eq!(greeter(&mut session, "Hello").unwrap(), "Alice");
        assert_eq!(fs::read_to_string(&path).unwrap(), recorded);
        replayed_segments.push(session.observed_segments().to_vec());
    }

    assert_eq!(replayed_segments[0], replayed_segments[1]);
    assert_eq!(replayed_segments[0], live_segments);
}

/// Answers a question, prints `lines`, asks a second question, says done.
fn two_questions(
    session: &mut SessionRecorder<ScriptedConsole>,
    lines: &[&str],
) -> ioreplay::HarnessResult<()> {
    session.prompt("Q: ", None)?;
    for line in lines {
        session.emit(line)?;
    }
    session.prompt("Q2: ", None)?;
    session.emit("done")?;
    session.finalize()
}

#[test]
fn extending_recording_keeps_output_beyond_recorded_block() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "O:Q: \nI(1):a\nO:Bye\n").unwrap();

    let extend = automated(&path).with_record_additional_io(true);
    let mut session = SessionRecorder::with_console(extend, ScriptedConsole::new(["b"])).unwrap();
    two_questions(&mut session, &["Bye", "Extra"]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "O:Q: \nI(1):a\nO:Bye\nO:Extra\nO:Q2: \nI(2):b\nO:done\n"
    );

    let mut replay =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();
    two_questions(&mut replay, &["Bye", "Extra"]).unwrap();
    assert!(replay.console().prompts().is_empty());
}

#[test]
fn extending_at_finalize_keeps_trailing_output() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "I:a\nO:Bye\n").unwrap();

    let extend = automated(&path).with_record_additional_io(true);
    let mut session = SessionRecorder::with_console(extend, ScriptedConsole::default()).unwrap();
    session.prompt("", None).unwrap();
    session.emit("Bye").unwrap();
    session.emit("Extra").unwrap();
    session.finalize().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "I:a\nO:Bye\nO:Extra\n");
}

#[test]
fn extending_after_interactive_update_does_not_duplicate_question() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "O:Q: \nI(1):a\nO:Bye\n").unwrap();

    let extend = interactive(&path).with_record_additional_io(true);
    let mut session =
        SessionRecorder::with_console(extend, ScriptedConsole::new(["u", "", "b"])).unwrap();
    two_questions(&mut session, &["Ciao"]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "O:Q: \nI(1):a\nO:Ciao\nO:Q2: \nI(2):b\nO:done\n"
    );
}

#[test]
fn additional_io_is_appended_after_replayed_inputs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "O:Q: \nI(1):a\nO:got a\n").unwrap();

    let options = automated(&path).with_record_additional_io(true);
    let mut session = SessionRecorder::with_console(options, ScriptedConsole::new(["b"])).unwrap();
    for _ in 0..2 {
        let answer = session.prompt("Q: ", None).unwrap();
        session.emit(&format!("got {}", answer)).unwrap();
    }
    session.finalize().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "O:Q: \nI(1):a\nO:got a\nO:Q: \nI(2):b\nO:got b\n"
    );
}

#[test]
fn rerecord_replaces_file_with_new_session() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");
    fs::write(&path, "I:Old\nO:Old output\nI:unused\n").unwrap();

    let options = automated(&path).with_rerecord(true);
    let mut session = SessionRecorder::with_console(options, ScriptedConsole::default()).unwrap();
    assert_eq!(session.prompt("Q1: ", None).unwrap(), "Old");
    session.emit("New output").unwrap();
    session.finalize().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "O:Q1: \nI(1):Old\nO:New output\n"
    );
}

#[test]
fn multi_line_emit_is_stored_as_separate_records() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.rec");

    let live = automated(&path)
        .with_replay(false)
        .with_record_additional_io(true);
    let mut session = SessionRecorder::with_console(live, ScriptedConsole::default()).unwrap();
    session.emit("one\ntwo").unwrap();
    session.finalize().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "O:one\nO:two\n");
}

// ============================================================================
// Interactive resolution
// ============================================================================

#[test]
fn interactive_continue_writes_diff_file() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let options = interactive(&path);
    let mut session =
        SessionRecorder::with_console(options.clone(), ScriptedConsole::new([""])).unwrap();

    greeter(&mut session, "Hello,").unwrap();

    assert_eq!(
        fs::read_to_string(options.diff_file()).unwrap(),
        "INPUT(1):Alice\nDIFFERENCE:\n- Hello Alice\n+ Hello, Alice\n\
         RECORDED:\nR:Hello Alice\nOBSERVED:\nO:Hello, Alice\n"
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), load_fixture("greeter.rec"));
    assert_eq!(session.console().clears(), 1);
    assert!(session
        .console()
        .lines()
        .iter()
        .any(|line| line == "OUTPUT does not match RECORDED output!"));
}

#[test]
fn interactive_update_rewrites_recorded_block() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let mut session =
        SessionRecorder::with_console(interactive(&path), ScriptedConsole::new(["u", ""]))
            .unwrap();

    greeter(&mut session, "Hello,").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "O:Welcome\nO:Name: \nI(1):Alice\nO:Hello, Alice\n"
    );

    let mut replay =
        SessionRecorder::with_console(automated(&path), ScriptedConsole::default()).unwrap();
    greeter(&mut replay, "Hello,").unwrap();
}

#[test]
fn interactive_update_can_change_input() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let mut session =
        SessionRecorder::with_console(interactive(&path), ScriptedConsole::new(["Update", "Bob"]))
            .unwrap();

    greeter(&mut session, "Hello,").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "O:Welcome\nO:Name: \nI(1):Bob\nO:Hello, Alice\n"
    );
    assert!(session.console().prompts()[1].contains("[Alice]"));
}

#[test]
fn interactive_quit_stops_session() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let mut session =
        SessionRecorder::with_console(interactive(&path), ScriptedConsole::new(["q"])).unwrap();

    let err = greeter(&mut session, "Hello,").unwrap_err();
    assert!(matches!(err, HarnessError::Quit));
    assert_eq!(fs::read_to_string(&path).unwrap(), load_fixture("greeter.rec"));
}

#[test]
fn interactive_unknown_choice_asks_again() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let mut session =
        SessionRecorder::with_console(interactive(&path), ScriptedConsole::new(["maybe", "c"]))
            .unwrap();

    greeter(&mut session, "Hello,").unwrap();

    let console = session.console();
    assert_eq!(console.prompts().len(), 2);
    assert!(console
        .lines()
        .iter()
        .any(|line| line == "Unknown choice 'maybe'"));
}

#[test]
fn interactive_closed_input_continues() {
    let (_temp, path) = temp_fixture("greeter.rec");
    let mut session =
        SessionRecorder::with_console(interactive(&path), ScriptedConsole::default()).unwrap();
    greeter(&mut session, "Hello,").unwrap();
}
