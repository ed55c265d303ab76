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

//! Error types for the Golite compiler.
//!
//! Three families of errors exist:
//! - [`CompileError`] - lexical and syntax errors, carrying a source [`Span`]
//! - [`SemanticError`] - recoverable analysis errors, collected in [`Diagnostics`]
//! - [`CodegenError`] - fatal code generation errors
//!
//! [`CompileFailure`] wraps all of them for the [`crate::compile`] pipeline.

use std::fmt;
use std::ops::Range;
use thiserror::Error;

use crate::ast::Type;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Error codes for the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E025)
    InvalidCharacter,
    UnterminatedString,
    UnterminatedComment,
    IntegerTooLarge,
    InvalidFloatLiteral,

    // Syntax errors (E100-E110)
    UnexpectedToken,
    UnexpectedEndOfFile,
    ExpectedExpression,
    ExpectedStatement,
    ExpectedIdentifier,
    ExpectedType,
    ExpectedNewline,
    InvalidAssignmentTarget,
    InvalidExpressionStatement,

    // Semantic errors (E200-E240)
    UndeclaredVariable,
    DuplicateDeclaration,
    TypeMismatch,
    UnknownType,
    NonConstantIndex,
    UndeclaredFunction,
    ArgumentCountMismatch,
    ArgumentTypeMismatch,
    ReturnArityMismatch,
    AssignmentArityMismatch,
    NotAValue,
    InvalidArrayLength,
    InvalidLiteral,
    ArrayIndexOutOfRange,

    // Code generation errors (E300)
    InvalidNodeKind,
    UnresolvedSymbol,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            // Lexical errors
            ErrorCode::InvalidCharacter => "E001",
            ErrorCode::UnterminatedString => "E010",
            ErrorCode::UnterminatedComment => "E011",
            ErrorCode::IntegerTooLarge => "E021",
            ErrorCode::InvalidFloatLiteral => "E025",

            // Syntax errors
            ErrorCode::UnexpectedToken => "E100",
            ErrorCode::UnexpectedEndOfFile => "E101",
            ErrorCode::ExpectedExpression => "E103",
            ErrorCode::ExpectedStatement => "E104",
            ErrorCode::ExpectedIdentifier => "E105",
            ErrorCode::ExpectedType => "E106",
            ErrorCode::ExpectedNewline => "E107",
            ErrorCode::InvalidAssignmentTarget => "E109",
            ErrorCode::InvalidExpressionStatement => "E110",

            // Semantic errors
            ErrorCode::UndeclaredVariable => "E200",
            ErrorCode::DuplicateDeclaration => "E201",
            ErrorCode::TypeMismatch => "E210",
            ErrorCode::UnknownType => "E211",
            ErrorCode::NonConstantIndex => "E214",
            ErrorCode::UndeclaredFunction => "E220",
            ErrorCode::ArgumentCountMismatch => "E222",
            ErrorCode::ArgumentTypeMismatch => "E223",
            ErrorCode::ReturnArityMismatch => "E224",
            ErrorCode::AssignmentArityMismatch => "E225",
            ErrorCode::NotAValue => "E226",
            ErrorCode::InvalidArrayLength => "E231",
            ErrorCode::InvalidLiteral => "E232",
            ErrorCode::ArrayIndexOutOfRange => "E240",

            ErrorCode::InvalidNodeKind => "E300",
            ErrorCode::UnresolvedSymbol => "E301",
        }
    }
}

/// A lexical or syntax error with source location.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for front end operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Which namespace a duplicate declaration collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Function => write!(f, "function"),
        }
    }
}

/// A recoverable error found during semantic analysis.
///
/// Every variant carries the source line it was detected on. The analyzer
/// records these and keeps going, so one run can report many of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("{kind} '{name}' already declared at line {first_line}.")]
    DuplicateDeclaration {
        kind: SymbolKind,
        name: String,
        line: usize,
        first_line: usize,
    },

    #[error("variable '{name}' was not declared.")]
    UndeclaredVariable { name: String, line: usize },

    #[error("function '{name}' was not declared.")]
    UndeclaredFunction { name: String, line: usize },

    #[error("function '{name}' expects {expected} argument(s) but {found} were given.")]
    ArgumentCountMismatch {
        name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("argument {position} of function '{name}' has type {actual}, expected {expected}.")]
    ArgumentTypeMismatch {
        name: String,
        line: usize,
        position: usize,
        expected: Type,
        actual: Type,
    },

    #[error("incompatible types {left} and {right} for operator {operator}.")]
    TypeMismatch {
        line: usize,
        operator: String,
        left: Type,
        right: Type,
    },

    #[error("position {index} is out of boundaries of array '{name}' with length {bound}.")]
    ArrayIndexOutOfRange {
        name: String,
        line: usize,
        index: i64,
        bound: usize,
    },

    #[error("different number of operands in assignment ({targets} targets, {values} values).")]
    AssignmentArityMismatch {
        line: usize,
        targets: usize,
        values: usize,
    },

    #[error("function '{name}' does not return a single value.")]
    NotAValue { name: String, line: usize },

    #[error("unknown type '{name}'.")]
    UnknownType { name: String, line: usize },

    #[error("array '{name}' needs a non-negative integer constant as length.")]
    InvalidArrayLength { name: String, line: usize },

    #[error("index into array '{name}' must be an integer constant.")]
    NonConstantIndex { name: String, line: usize },

    #[error("invalid literal '{text}'.")]
    InvalidLiteral { text: String, line: usize },

    #[error("function '{name}' returns {expected} value(s) but {found} were given.")]
    ReturnArityMismatch {
        name: String,
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl SemanticError {
    /// The source line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            SemanticError::DuplicateDeclaration { line, .. }
            | SemanticError::UndeclaredVariable { line, .. }
            | SemanticError::UndeclaredFunction { line, .. }
            | SemanticError::ArgumentCountMismatch { line, .. }
            | SemanticError::ArgumentTypeMismatch { line, .. }
            | SemanticError::TypeMismatch { line, .. }
            | SemanticError::ArrayIndexOutOfRange { line, .. }
            | SemanticError::AssignmentArityMismatch { line, .. }
            | SemanticError::NotAValue { line, .. }
            | SemanticError::UnknownType { line, .. }
            | SemanticError::InvalidArrayLength { line, .. }
            | SemanticError::NonConstantIndex { line, .. }
            | SemanticError::InvalidLiteral { line, .. }
            | SemanticError::ReturnArityMismatch { line, .. } => *line,
        }
    }

    /// The stable error code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SemanticError::DuplicateDeclaration { .. } => ErrorCode::DuplicateDeclaration,
            SemanticError::UndeclaredVariable { .. } => ErrorCode::UndeclaredVariable,
            SemanticError::UndeclaredFunction { .. } => ErrorCode::UndeclaredFunction,
            SemanticError::ArgumentCountMismatch { .. } => ErrorCode::ArgumentCountMismatch,
            SemanticError::ArgumentTypeMismatch { .. } => ErrorCode::ArgumentTypeMismatch,
            SemanticError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            SemanticError::ArrayIndexOutOfRange { .. } => ErrorCode::ArrayIndexOutOfRange,
            SemanticError::AssignmentArityMismatch { .. } => ErrorCode::AssignmentArityMismatch,
            SemanticError::NotAValue { .. } => ErrorCode::NotAValue,
            SemanticError::UnknownType { .. } => ErrorCode::UnknownType,
            SemanticError::InvalidArrayLength { .. } => ErrorCode::InvalidArrayLength,
            SemanticError::NonConstantIndex { .. } => ErrorCode::NonConstantIndex,
            SemanticError::InvalidLiteral { .. } => ErrorCode::InvalidLiteral,
            SemanticError::ReturnArityMismatch { .. } => ErrorCode::ReturnArityMismatch,
        }
    }

    /// Render the error as a one-line diagnostic.
    pub fn diagnostic(&self) -> String {
        format!("SEMANTIC ERROR ({}): {}", self.line(), self)
    }
}

/// The semantic errors collected during one analysis run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<SemanticError>,
}

impl Diagnostics {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: SemanticError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &SemanticError> {
        self.errors.iter()
    }

    /// Convert into a vector of errors.
    pub fn into_vec(self) -> Vec<SemanticError> {
        self.errors
    }
}

impl IntoIterator for Diagnostics {
    type Item = SemanticError;
    type IntoIter = std::vec::IntoIter<SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error.diagnostic())?;
        }
        Ok(())
    }
}

/// A fatal error raised while generating assembly.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The generator met a node kind it cannot emit in the current position.
    #[error("[E300] invalid node kind '{kind}' in {context} position")]
    InvalidNodeKind {
        kind: &'static str,
        context: &'static str,
    },

    /// A node refers to a table entry that does not exist.
    #[error("[E301] unresolved {kind} #{index}")]
    UnresolvedSymbol { kind: &'static str, index: usize },

    /// Writing to the output sink failed.
    #[error("cannot write assembly: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of the whole compilation pipeline.
#[derive(Debug, Error)]
pub enum CompileFailure {
    #[error(transparent)]
    Syntax(#[from] CompileError),

    #[error("semantic analysis failed with {} error(s)", .0.len())]
    Semantic(Diagnostics),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl From<Diagnostics> for CompileFailure {
    fn from(diagnostics: Diagnostics) -> Self {
        CompileFailure::Semantic(diagnostics)
    }
}

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format a syntax error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    let underline_start = loc.column - 1;
    let underline_len = error
        .span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_creation() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert_eq!(Span::from(3..3), Span::new(3, 3));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(ErrorCode::InvalidCharacter.code(), "E001");
        assert_eq!(ErrorCode::UnexpectedToken.code(), "E100");
        assert_eq!(ErrorCode::UndeclaredVariable.code(), "E200");
        assert_eq!(ErrorCode::InvalidNodeKind.code(), "E300");
    }

    #[test]
    fn test_compile_error() {
        let error = CompileError::new(ErrorCode::ExpectedType, "expected a type", Span::new(0, 3))
            .with_hint("try 'int'");

        assert_eq!(error.code_str(), "E106");
        assert_eq!(error.to_string(), "[E106] expected a type");
        assert!(error.hint.is_some());
    }

    #[test]
    fn test_duplicate_declaration_diagnostic() {
        let error = SemanticError::DuplicateDeclaration {
            kind: SymbolKind::Variable,
            name: "x".to_string(),
            line: 7,
            first_line: 3,
        };
        assert_eq!(
            error.diagnostic(),
            "SEMANTIC ERROR (7): variable 'x' already declared at line 3."
        );
        assert_eq!(error.code(), ErrorCode::DuplicateDeclaration);
    }

    #[test]
    fn test_type_mismatch_diagnostic() {
        let error = SemanticError::TypeMismatch {
            line: 4,
            operator: "+".to_string(),
            left: Type::Int,
            right: Type::String,
        };
        assert_eq!(
            error.diagnostic(),
            "SEMANTIC ERROR (4): incompatible types int and string for operator +."
        );
    }

    #[test]
    fn test_diagnostics_display_one_line_per_error() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(SemanticError::UndeclaredVariable {
            name: "a".to_string(),
            line: 2,
        });
        diagnostics.push(SemanticError::UndeclaredFunction {
            name: "f".to_string(),
            line: 5,
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.to_string(),
            "SEMANTIC ERROR (2): variable 'a' was not declared.\n\
             SEMANTIC ERROR (5): function 'f' was not declared.\n"
        );
    }

    #[test]
    fn test_format_error_points_at_column() {
        let source = "var x int\nvar y @\n";
        let error = CompileError::new(ErrorCode::InvalidCharacter, "invalid character '@'", Span::new(16, 17));
        let formatted = format_error(&error, source, Some("main.go"));

        assert!(formatted.starts_with("error[E001]: invalid character '@'\n"));
        assert!(formatted.contains("  --> main.go:2:7\n"));
        assert!(formatted.contains("2 | var y @\n"));
        assert!(formatted.contains("  |       ^\n"));
    }
}
