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

//! Golite Compiler CLI
//!
//! Compiles one Golite source file into a Jasmin assembly file.

use clap::Parser;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::NamedTempFile;

use golite::ast::dot::to_dot;
use golite::codegen::{self, CodegenOptions, DEFAULT_CLASS_NAME, DEFAULT_STACK_LIMIT};
use golite::error::{format_error, CodegenError};
use golite::{analyzer, parser};

/// Golite - A compiler for a small Go-like language
#[derive(Parser, Debug)]
#[command(name = "golite")]
#[command(author = "Golite Team")]
#[command(version)]
#[command(about = "A compiler for a small Go-like language emitting Jasmin assembly")]
#[command(long_about = r#"
Golite compiles source files written in a small, statically typed Go-like
language into Jasmin assembly. The assembly can be turned into a JVM class
file with the Jasmin assembler.

Example usage:
  golite hello.go
  golite hello.go -o build/Hello.j --class-name Hello
  golite hello.go --dump-tables --dot hello.dot
"#)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Output file (defaults to the source path with a .j extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the generated class
    #[arg(long, default_value = DEFAULT_CLASS_NAME)]
    class_name: String,

    /// Operand stack limit of every generated method
    #[arg(long, default_value_t = DEFAULT_STACK_LIMIT)]
    stack_limit: usize,

    /// Write the typed AST as a Graphviz DOT file
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Print the variable and function tables
    #[arg(long)]
    dump_tables: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.source.with_extension("j"));
    let filename = cli
        .source
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    if cli.verbose {
        println!("Golite Compiler v{}", golite::VERSION);
        println!("Source: {}", cli.source.display());
        println!("Output: {}", output_path.display());
        println!();
    }

    let source = match std::fs::read_to_string(&cli.source) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", cli.source.display(), e);
            return ExitCode::from(3);
        }
    };

    let file = match parser::parse_source(&source) {
        Ok(file) => file,
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(filename)));
            return ExitCode::from(1);
        }
    };

    let analysis = match analyzer::analyze(&file) {
        Ok(analysis) => analysis,
        Err(diagnostics) => {
            eprint!("{}", diagnostics);
            return ExitCode::from(1);
        }
    };
    info!(
        "analysis succeeded: {} global(s), {} function(s), {} AST node(s)",
        analysis.tables.globals.len(),
        analysis.tables.functions.len(),
        analysis.program.size()
    );

    if cli.dump_tables {
        print!("{}", analysis.tables);
    }

    if let Some(dot_path) = &cli.dot {
        let dot = to_dot(&analysis.program, &analysis.tables);
        let written = write_output(dot_path, |sink| {
            sink.write_all(dot.as_bytes())?;
            Ok(())
        });
        if let Err(e) = written {
            eprintln!("Error: Cannot write {}: {}", dot_path.display(), e);
            return ExitCode::from(2);
        }
    }

    let options = CodegenOptions {
        class_name: cli.class_name.clone(),
        stack_limit: cli.stack_limit,
    };
    let generated = write_output(&output_path, |sink| {
        codegen::generate(&analysis.program, &analysis.tables, &options, sink)
    });
    match generated {
        Ok(()) => {}
        Err(CodegenError::Io(e)) => {
            eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    }

    if cli.verbose {
        println!("Done!");
    } else {
        println!("Compiled {} -> {}", filename, output_path.display());
    }

    ExitCode::SUCCESS
}

/// Write a file through a temporary file in the target directory.
///
/// The target is only replaced once `write` succeeded; on failure the
/// temporary file is removed.
fn write_output<F>(path: &Path, write: F) -> Result<(), CodegenError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), CodegenError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    debug!("writing {} via {}", path.display(), file.path().display());

    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
