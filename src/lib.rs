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

//! Golite Compiler Library
//!
//! This library compiles programs written in Golite, a small statically
//! typed Go-like language, into Jasmin assembly for the JVM.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tokenization of source code
//! - [`parser`] - Parsing tokens into a parse tree
//! - [`parse_tree`] - Concrete parse tree definitions
//! - [`ast`] - Typed Abstract Syntax Tree definitions
//! - [`analyzer`] - Semantic analysis, symbol tables and type checking
//! - [`codegen`] - Jasmin assembly generation
//!
//! # Example
//!
//! ```no_run
//! use golite::{analyzer, codegen, parser};
//!
//! fn compile(source: &str) -> Result<String, Box<dyn std::error::Error>> {
//!     // Parse
//!     let file = parser::parse_source(source)?;
//!
//!     // Analyze
//!     let analysis = analyzer::analyze(&file).map_err(|d| d.to_string())?;
//!
//!     // Generate code
//!     let options = codegen::CodegenOptions::default();
//!     Ok(codegen::generate_to_string(&analysis.program, &analysis.tables, &options)?)
//! }
//! ```

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parse_tree;
pub mod parser;

// Re-export commonly used types
pub use analyzer::{Analysis, SymbolTables};
pub use ast::{Node, NodeKind, Type};
pub use codegen::CodegenOptions;
pub use error::{
    format_error, CodegenError, CompileError, CompileFailure, Diagnostics, ErrorCode, Result,
    SemanticError, SourceLocation, Span,
};
pub use lexer::Token;

/// The version of the Golite compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "Golite";

/// Run the front end and the semantic analyzer.
pub fn analyze_source(source: &str) -> std::result::Result<Analysis, CompileFailure> {
    let file = parser::parse_source(source)?;
    Ok(analyzer::analyze(&file)?)
}

/// Compile source code to Jasmin assembly with the given options.
pub fn compile_with(
    source: &str,
    options: &CodegenOptions,
) -> std::result::Result<String, CompileFailure> {
    let analysis = analyze_source(source)?;
    Ok(codegen::generate_to_string(
        &analysis.program,
        &analysis.tables,
        options,
    )?)
}

/// Compile source code to Jasmin assembly.
///
/// This is the main entry point for compiling Golite source code. It
/// performs all compilation stages: lexing, parsing, analysis, and code
/// generation. Code generation only runs when the analysis succeeded.
///
/// # Example
///
/// ```no_run
/// let source = "func main() {\n    write(\"Hello, World!\")\n}\n";
///
/// match golite::compile(source) {
///     Ok(asm) => println!("{}", asm),
///     Err(e) => eprintln!("Compilation error: {}", e),
/// }
/// ```
pub fn compile(source: &str) -> std::result::Result<String, CompileFailure> {
    compile_with(source, &CodegenOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "Golite");
    }

    #[test]
    fn test_compile_hello() {
        let asm = compile("func main() {\n  write(\"hello\")\n}\n").unwrap();
        assert!(asm.contains("\tldc \"hello\"\n"));
        assert!(asm.contains("println(Ljava/lang/String;)V"));
    }

    #[test]
    fn test_compile_reports_stage() {
        assert!(matches!(
            compile("func main() {\n  x := \n}"),
            Err(CompileFailure::Syntax(_))
        ));
        assert!(matches!(
            compile("func main() {\n  x = 1\n}\n"),
            Err(CompileFailure::Semantic(_))
        ));
    }
}
