// Golite - A compiler for a small Go-like language emitting Jasmin assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! End-to-end CLI integration tests.

mod common;

use std::path::Path;
use std::process::{Command, Output};

const HELLO: &str = "package main\n\nfunc main() {\n    write(\"Hello\")\n}\n";

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_golite"))
}

fn write_source(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// Flag Tests
// ============================================================================

/// Test --help flag.
#[test]
fn test_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("golite"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--class-name"));
    assert!(stdout.contains("--dump-tables"));
}

/// Test --version flag.
#[test]
fn test_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("golite"));
    assert!(stdout.contains(golite::VERSION));
}

/// Test that a missing source argument is a usage error.
#[test]
fn test_missing_source() {
    let output = cargo_bin().output().expect("Failed to execute command");
    assert!(!output.status.success());
}

// ============================================================================
// Compilation Tests
// ============================================================================

/// Test compiling with the default output path.
#[test]
fn test_compile_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.go", HELLO);

    let output = cargo_bin()
        .arg(&source)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Compilation failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Compiled hello.go"));

    let asm = std::fs::read_to_string(dir.path().join("hello.j")).unwrap();
    assert!(asm.starts_with(".class public GoProgram\n"));
    assert_eq!(common::run(&asm, &[]), vec!["Hello"]);
}

/// Test the output and class name options.
#[test]
fn test_compile_with_options() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.go", HELLO);
    let target = dir.path().join("Hello.j");

    let output = cargo_bin()
        .arg(&source)
        .arg("-o")
        .arg(&target)
        .args(["--class-name", "Hello", "--stack-limit", "4"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Compilation failed: {}", stderr(&output));
    let asm = std::fs::read_to_string(&target).unwrap();
    assert!(asm.starts_with(".class public Hello\n"));
    assert!(asm.contains("\t.limit stack 4\n"));
}

/// Test --dump-tables prints both tables.
#[test]
fn test_dump_tables() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        dir.path(),
        "tables.go",
        "var g int\n\nfunc main() {\n    x := 1.5\n}\n",
    );

    let output = cargo_bin()
        .arg(&source)
        .arg("--dump-tables")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Compilation failed: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Variables table:"));
    assert!(stdout.contains("[vt] Entry 0 -- name: g, line: 1"));
    assert!(stdout.contains("Functions table:"));
    assert!(stdout.contains("[ft] Entry 0 -- name: main"));
}

/// Test --dot writes a Graphviz file.
#[test]
fn test_dot_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.go", HELLO);
    let dot = dir.path().join("hello.dot");

    let output = cargo_bin()
        .arg(&source)
        .arg("--dot")
        .arg(&dot)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Compilation failed: {}", stderr(&output));
    let text = std::fs::read_to_string(&dot).unwrap();
    assert!(text.starts_with("digraph {\n"));
    assert!(text.ends_with("}\n"));
}

// ============================================================================
// Failure Tests
// ============================================================================

/// Test that a syntax error exits with 1 and writes nothing.
#[test]
fn test_syntax_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "broken.go", "func main() {\n    1 + 2\n}\n");

    let output = cargo_bin()
        .arg(&source)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("E110"));
    assert!(!dir.path().join("broken.j").exists());
}

/// Test that semantic errors are all printed, exit with 1 and write nothing.
#[test]
fn test_semantic_errors() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        dir.path(),
        "wrong.go",
        "func main() {\n    a = 1\n    write(b)\n}\n",
    );

    let output = cargo_bin()
        .arg(&source)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("SEMANTIC ERROR (2): variable 'a' was not declared."));
    assert!(stderr.contains("SEMANTIC ERROR (3): variable 'b' was not declared."));
    assert!(!dir.path().join("wrong.j").exists());
}

/// Test that a failed compilation keeps an existing output file.
#[test]
fn test_failure_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "prog.go", "func main() {\n    x = 1\n}\n");
    let target = dir.path().join("prog.j");
    std::fs::write(&target, "previous").unwrap();

    let output = cargo_bin()
        .arg(&source)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "previous");
}

/// Test that an unreadable source exits with 3.
#[test]
fn test_missing_source_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = cargo_bin()
        .arg(dir.path().join("missing.go"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Cannot read"));
}
