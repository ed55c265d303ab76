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

//! Parser helper methods for token stream navigation and error handling.
//!
//! This module provides utility methods for the parser including:
//! - Token stream navigation (peek, advance, check)
//! - Token matching and expectation
//! - Statement terminators and line numbers
//! - Error creation

use super::Parser;
use crate::error::{CompileError, ErrorCode, Span};
use crate::lexer::Token;
use crate::parse_tree::Ident;

/// Trait for parser helper operations.
pub trait ParserHelpers<'a> {
    /// Check if we've reached the end of the token stream.
    fn is_at_end(&self) -> bool;

    /// Peek at the current token without advancing.
    fn peek(&self) -> Option<&Token>;

    /// Peek at the current token's span.
    fn peek_span(&self) -> Option<Span>;

    /// Get the previous token's span (for error reporting).
    fn previous_span(&self) -> Span;

    /// The source line of the current token.
    fn current_line(&self) -> usize;

    /// Advance to the next token and return the current one.
    fn advance(&mut self) -> Option<(Token, Span)>;

    /// Check if the current token matches the expected type.
    fn check(&self, expected: &Token) -> bool;

    /// Consume the current token if it matches the expected type.
    fn match_token(&mut self, expected: &Token) -> bool;

    /// Expect the current token to match, or return an error.
    fn expect(&mut self, expected: &Token, message: &str) -> Result<(Token, Span), CompileError>;

    /// Expect an identifier and return it with its line.
    fn expect_identifier(&mut self, what: &str) -> Result<Ident, CompileError>;

    /// Skip newlines.
    fn skip_newlines(&mut self);

    /// Skip newlines and semicolons between statements and declarations.
    fn skip_separators(&mut self);

    /// Check if the current token ends a statement.
    fn at_terminator(&self) -> bool;

    /// Consume a statement terminator. A closing brace or parenthesis
    /// also ends a statement but is left in place.
    fn expect_terminator(&mut self) -> Result<(), CompileError>;

    /// Create an error at the current position.
    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError;
}

impl<'a> ParserHelpers<'a> for Parser<'a> {
    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(t, _)| t)
    }

    fn peek_span(&self) -> Option<Span> {
        self.tokens.get(self.position).map(|(_, s)| s.clone())
    }

    fn previous_span(&self) -> Span {
        if self.position > 0 {
            self.tokens[self.position - 1].1.clone()
        } else if let Some((_, span)) = self.tokens.first() {
            span.clone()
        } else {
            Span::new(0, 0)
        }
    }

    fn current_line(&self) -> usize {
        let span = self.peek_span().unwrap_or_else(|| self.previous_span());
        self.lines.line(span.start)
    }

    fn advance(&mut self) -> Option<(Token, Span)> {
        let result = self.tokens.get(self.position).cloned();
        if result.is_some() {
            self.position += 1;
        }
        result
    }

    fn check(&self, expected: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    fn match_token(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token, message: &str) -> Result<(Token, Span), CompileError> {
        if self.check(expected) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }

        let span = self.peek_span().unwrap_or_else(|| self.previous_span());
        let (code, found) = match self.peek() {
            Some(token) => (ErrorCode::UnexpectedToken, token.to_string()),
            None => (ErrorCode::UnexpectedEndOfFile, "end of file".to_string()),
        };
        Err(CompileError::new(
            code,
            format!("{}, found {}", message, found),
            span,
        ))
    }

    fn expect_identifier(&mut self, what: &str) -> Result<Ident, CompileError> {
        let line = self.current_line();
        match self.peek() {
            Some(Token::Identifier(name)) => {
                let ident = Ident::new(name.clone(), line);
                self.advance();
                Ok(ident)
            }
            _ => Err(self.error(ErrorCode::ExpectedIdentifier, format!("Expected {}", what))),
        }
    }

    fn skip_newlines(&mut self) {
        while self.check(&Token::Newline) {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        while self.check(&Token::Newline) || self.check(&Token::Semicolon) {
            self.advance();
        }
    }

    fn at_terminator(&self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Newline)
                | Some(Token::Semicolon)
                | Some(Token::RightBrace)
                | Some(Token::RightParen)
        )
    }

    fn expect_terminator(&mut self) -> Result<(), CompileError> {
        match self.peek() {
            None | Some(Token::RightBrace) | Some(Token::RightParen) => Ok(()),
            Some(Token::Newline) | Some(Token::Semicolon) => {
                self.advance();
                Ok(())
            }
            Some(token) => {
                let message = format!("Expected end of statement, found {}", token);
                Err(self.error(ErrorCode::ExpectedNewline, message))
            }
        }
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError {
        let span = self.peek_span().unwrap_or_else(|| self.previous_span());
        CompileError::new(code, message, span)
    }
}
