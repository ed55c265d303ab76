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

//! Negative tests for the Golite compiler.
//!
//! Every program here must be rejected. Syntax errors stop compilation at
//! the first problem; semantic errors are collected, so the tests check the
//! complete list of reported codes.

use golite::{compile, CompileFailure, ErrorCode, SemanticError};
use pretty_assertions::assert_eq;
use test_case::test_case;

/// Wrap statements into a `main` function.
fn in_main(body: &str) -> String {
    format!("package main\n\nfunc main() {{\n{}\n}}\n", body)
}

fn syntax_error(source: &str) -> ErrorCode {
    match compile(source) {
        Err(CompileFailure::Syntax(err)) => err.code,
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

fn semantic_errors(source: &str) -> Vec<SemanticError> {
    match compile(source) {
        Err(CompileFailure::Semantic(diagnostics)) => diagnostics.into_vec(),
        other => panic!("expected semantic errors, got {:?}", other),
    }
}

fn semantic_codes(source: &str) -> Vec<ErrorCode> {
    semantic_errors(source).iter().map(SemanticError::code).collect()
}

// ============================================================================
// Syntax Errors
// ============================================================================

#[test_case("func main() {\n  x := 1 @ 2\n}\n", ErrorCode::InvalidCharacter; "invalid character")]
#[test_case("func main() {\n  /* never closed\n}\n", ErrorCode::UnterminatedComment; "unterminated comment")]
#[test_case("func main() {\n  x := 99999999999\n}\n", ErrorCode::IntegerTooLarge; "integer too large")]
#[test_case("func main() {\n  1 + 2\n}\n", ErrorCode::InvalidExpressionStatement; "expression statement")]
#[test_case("func main() {\n  f() = 2\n}\n", ErrorCode::InvalidAssignmentTarget; "call as target")]
#[test_case("func main() {\n  x := 1\n", ErrorCode::UnexpectedEndOfFile; "missing brace")]
#[test_case("func main() {\n  x := 1 y := 2\n}\n", ErrorCode::ExpectedNewline; "two statements")]
#[test_case("x := 1\n", ErrorCode::ExpectedStatement; "statement at top level")]
fn test_syntax_errors(source: &str, expected: ErrorCode) {
    assert_eq!(syntax_error(source), expected);
}

// ============================================================================
// Semantic Errors
// ============================================================================

#[test_case("  x = 1", ErrorCode::UndeclaredVariable; "undeclared variable")]
#[test_case("  var x int\n  var x int", ErrorCode::DuplicateDeclaration; "duplicate variable")]
#[test_case("  var i int = 2.5", ErrorCode::TypeMismatch; "float into int")]
#[test_case("  x := 1 + \"a\"", ErrorCode::TypeMismatch; "int plus string")]
#[test_case("  var b byte", ErrorCode::UnknownType; "unknown type")]
#[test_case("  undefined()", ErrorCode::UndeclaredFunction; "undeclared function")]
#[test_case("  write(1, 2)", ErrorCode::ArgumentCountMismatch; "write with two values")]
#[test_case("  read(1)", ErrorCode::TypeMismatch; "read into literal")]
#[test_case("  var a [3]int\n  a[3] = 1", ErrorCode::ArrayIndexOutOfRange; "index past end")]
#[test_case("  var a [3]int\n  i := 0\n  a[i] = 1", ErrorCode::NonConstantIndex; "variable index")]
#[test_case("  var a [-1]int", ErrorCode::InvalidArrayLength; "negative length")]
#[test_case("  var a, b int\n  a, b = 1", ErrorCode::AssignmentArityMismatch; "too few values")]
#[test_case("  if 1 {\n  }", ErrorCode::TypeMismatch; "int condition")]
#[test_case("  for \"s\" {\n  }", ErrorCode::TypeMismatch; "string loop condition")]
fn test_semantic_error_in_main(body: &str, expected: ErrorCode) {
    assert_eq!(semantic_codes(&in_main(body)), vec![expected]);
}

#[test_case("func f() int {\n  return\n}\n", ErrorCode::ReturnArityMismatch; "missing return value")]
#[test_case("func f() int {\n  return \"s\"\n}\n", ErrorCode::TypeMismatch; "wrong return type")]
#[test_case("func f() {\n}\nfunc f() {\n}\n", ErrorCode::DuplicateDeclaration; "duplicate function")]
#[test_case("func f(a int) {\n}\nfunc g() {\n  f()\n}\n", ErrorCode::ArgumentCountMismatch; "missing argument")]
#[test_case("func f(a int) {\n}\nfunc g() {\n  f(\"s\")\n}\n", ErrorCode::ArgumentTypeMismatch; "wrong argument type")]
#[test_case("func f(x float64) {\n}\nfunc g() {\n  f(1)\n}\n", ErrorCode::ArgumentTypeMismatch; "int argument for float parameter")]
#[test_case("func f() {\n}\nfunc g() {\n  x := f()\n}\n", ErrorCode::AssignmentArityMismatch; "void call assigned")]
#[test_case("func f() {\n}\nfunc g() {\n  x := f() + 1\n}\n", ErrorCode::NotAValue; "void call as operand")]
fn test_semantic_error_in_function(decls: &str, expected: ErrorCode) {
    let source = format!("{}func main() {{\n}}\n", decls);
    assert_eq!(semantic_codes(&source), vec![expected]);
}

#[test]
fn test_missing_main() {
    assert_eq!(
        semantic_codes("func helper() {\n}\n"),
        vec![ErrorCode::UndeclaredFunction]
    );
}

// ============================================================================
// Error Collection
// ============================================================================

#[test]
fn test_all_errors_are_reported_in_order() {
    let source = in_main("  a = 1\n  var s string = 1\n  b = 2\n  write(c)");
    let lines: Vec<usize> = semantic_errors(&source).iter().map(SemanticError::line).collect();
    assert_eq!(lines, vec![4, 5, 6, 7]);
}

#[test]
fn test_diagnostic_format() {
    let errors = semantic_errors(&in_main("  write(y)"));
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].diagnostic(),
        "SEMANTIC ERROR (4): variable 'y' was not declared."
    );
}

#[test]
fn test_errors_prevent_code_generation() {
    let result = compile(&in_main("  x := 1\n  x := 2"));
    assert!(matches!(result, Err(CompileFailure::Semantic(_))));
}
