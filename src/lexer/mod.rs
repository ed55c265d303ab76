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

//! Lexer module for the Golite compiler.
//!
//! This module tokenizes Golite source code into a stream of tokens.
//! It handles:
//! - Keywords and identifiers
//! - Integer, float and string literals
//! - Operators and punctuation
//! - Newlines (they terminate statements)
//! - Comments (`//` and `/* */`)

mod tokens;

pub use tokens::Token;

use logos::Logos;

use crate::error::{CompileError, ErrorCode, Span};

/// Largest magnitude an integer literal may have (the magnitude of `i32::MIN`).
const MAX_INTEGER_MAGNITUDE: i64 = 1 << 31;

/// Tokenize source code into a vector of tokens with spans.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        let slice = lexer.slice();

        match result {
            Ok(Token::BlockComment) => {
                // A comment spanning lines still ends the statement before it.
                if slice.contains('\n') {
                    tokens.push((Token::Newline, span));
                }
            }
            Ok(Token::Integer(text)) => {
                let fits = text
                    .parse::<i64>()
                    .is_ok_and(|value| value <= MAX_INTEGER_MAGNITUDE);
                if !fits {
                    return Err(CompileError::new(
                        ErrorCode::IntegerTooLarge,
                        format!("integer literal '{}' does not fit into 32 bits", text),
                        span,
                    ));
                }
                tokens.push((Token::Integer(text), span));
            }
            Ok(Token::Decimal(text)) => {
                if !text.parse::<f32>().is_ok_and(f32::is_finite) {
                    return Err(CompileError::new(
                        ErrorCode::InvalidFloatLiteral,
                        format!("invalid float literal '{}'", text),
                        span,
                    ));
                }
                tokens.push((Token::Decimal(text), span));
            }
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(lexical_error(slice, span)),
        }
    }

    Ok(tokens)
}

/// Classify a slice the lexer could not turn into a token.
fn lexical_error(slice: &str, span: Span) -> CompileError {
    if slice.starts_with("/*") {
        CompileError::new(ErrorCode::UnterminatedComment, "unterminated block comment", span)
            .with_hint("close the comment with '*/'")
    } else if slice.starts_with('"') {
        CompileError::new(ErrorCode::UnterminatedString, "unterminated string literal", span)
            .with_hint("strings must end with '\"' on the same line")
    } else {
        let found = slice.chars().next().unwrap_or(' ');
        CompileError::new(
            ErrorCode::InvalidCharacter,
            format!("invalid character '{}'", found),
            span,
        )
    }
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build the index for a source text.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    /// The line containing a byte offset.
    pub fn line(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("var variable func if"),
            vec![
                Token::Var,
                Token::Identifier("variable".to_string()),
                Token::Func,
                Token::If,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"42 3.5 .25 1e3 "hi\n" true false"#),
            vec![
                Token::Integer("42".to_string()),
                Token::Decimal("3.5".to_string()),
                Token::Decimal(".25".to_string()),
                Token::Decimal("1e3".to_string()),
                Token::String("hi\\n".to_string()),
                Token::True,
                Token::False,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a := b <= c && d != e || f % g"),
            vec![
                Token::Identifier("a".to_string()),
                Token::ColonEqual,
                Token::Identifier("b".to_string()),
                Token::LessEqual,
                Token::Identifier("c".to_string()),
                Token::AndAnd,
                Token::Identifier("d".to_string()),
                Token::BangEqual,
                Token::Identifier("e".to_string()),
                Token::OrOr,
                Token::Identifier("f".to_string()),
                Token::Percent,
                Token::Identifier("g".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_and_newlines() {
        assert_eq!(
            kinds("x // trailing\n/* a\nb */ y /* inline */ z"),
            vec![
                Token::Identifier("x".to_string()),
                Token::Newline,
                Token::Newline,
                Token::Identifier("y".to_string()),
                Token::Identifier("z".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("x @ y").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCharacter);
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("x /* never closed").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnterminatedComment);
    }

    #[test]
    fn test_integer_too_large() {
        assert!(tokenize("2147483648").is_ok());
        let err = tokenize("2147483649").unwrap_err();
        assert_eq!(err.code, ErrorCode::IntegerTooLarge);
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line(0), 1);
        assert_eq!(index.line(2), 1);
        assert_eq!(index.line(3), 2);
        assert_eq!(index.line(6), 3);
        assert_eq!(index.line(7), 4);
        assert_eq!(index.line(8), 4);
    }
}
