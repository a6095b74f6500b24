//! Integration tests for top-level CLI behavior. Only paths that never
//! reach the network are exercised here.

use std::process::Command;

fn run_mitra(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_mitra");
    Command::new(bin).args(args).output().expect("failed to run mitra binary")
}

#[test]
fn help_lists_the_subcommands() {
    let output = run_mitra(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for name in ["chat", "ask", "summarize", "translate", "image", "suggest"] {
        assert!(stdout.contains(name), "missing subcommand {name} in help");
    }
}

#[test]
fn translate_help_shows_language_flags() {
    let output = run_mitra(&["translate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--from"));
    assert!(stdout.contains("--to"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_mitra(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn empty_prompt_is_rejected_before_any_call() {
    let output = run_mitra(&["chat", "   "]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Prompt cannot be empty."));
}

#[test]
fn out_of_range_grade_is_rejected() {
    let output = run_mitra(&["chat", "--grade", "0", "hello"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Grade must be between 1 and 10"));
}

#[test]
fn short_suggest_input_prints_placeholder_without_calling_out() {
    let output = run_mitra(&["suggest", "ab"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("(no suggestions)"));
}
