#![cfg(feature = "cli")]
//! Integration tests for `sql2csv completions`.

use clap::CommandFactory;
use sqlcsv::cli::app::Cli;

fn generate_completions(shell: clap_complete::Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "sql2csv", &mut buf);
    String::from_utf8(buf).expect("completions should be valid UTF-8")
}

#[test]
fn bash_completions_contain_subcommands() {
    let output = generate_completions(clap_complete::Shell::Bash);
    assert!(output.contains("sql2csv"));
    assert!(output.contains("convert"));
    assert!(output.contains("columns"));
    assert!(output.contains("completions"));
}

#[test]
fn zsh_completions_list_convert_flags() {
    let output = generate_completions(clap_complete::Shell::Zsh);
    assert!(output.contains("sql2csv"));
    assert!(output.contains("--output-dir"));
    assert!(output.contains("--require-schema"));
}

#[test]
fn fish_completions_are_valid() {
    let output = generate_completions(clap_complete::Shell::Fish);
    assert!(!output.is_empty());
    assert!(output.contains("sql2csv"));
}

#[test]
fn powershell_completions_are_valid() {
    let output = generate_completions(clap_complete::Shell::PowerShell);
    assert!(!output.is_empty());
    assert!(output.contains("sql2csv"));
}
