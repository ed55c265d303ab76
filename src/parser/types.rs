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

//! Type parsing for the parser.
//!
//! This module handles parsing of type annotations:
//! - Named types (`int`, `float64`, ...); names are resolved by the analyzer
//! - Array types `[n]T`
//! - Function result lists

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::Parser;
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;
use crate::parse_tree::{Ident, TypeSpec};

/// Trait for type parsing operations.
pub trait TypeParser<'a> {
    /// Parse a type annotation.
    fn parse_type(&mut self) -> Result<TypeSpec, CompileError>;

    /// Parse a type name.
    fn parse_type_name(&mut self) -> Result<Ident, CompileError>;

    /// Parse the optional result list of a function signature.
    fn parse_result_types(&mut self) -> Result<Vec<Ident>, CompileError>;
}

impl<'a> TypeParser<'a> for Parser<'a> {
    fn parse_type(&mut self) -> Result<TypeSpec, CompileError> {
        if self.check(&Token::LeftBracket) {
            let line = self.current_line();
            self.advance();
            let length = self.parse_expression()?;
            self.expect(&Token::RightBracket, "Expected ']' after array length")?;
            let element = self.parse_type_name()?;
            return Ok(TypeSpec::Array {
                length: Box::new(length),
                element,
                line,
            });
        }

        Ok(TypeSpec::Named(self.parse_type_name()?))
    }

    fn parse_type_name(&mut self) -> Result<Ident, CompileError> {
        if !matches!(self.peek(), Some(Token::Identifier(_))) {
            let found = self
                .peek()
                .map_or("end of file".to_string(), |t| t.to_string());
            return Err(self.error(
                ErrorCode::ExpectedType,
                format!("Expected type, found {}", found),
            ));
        }
        self.expect_identifier("type name")
    }

    fn parse_result_types(&mut self) -> Result<Vec<Ident>, CompileError> {
        if self.match_token(&Token::LeftParen) {
            let mut results = Vec::new();
            if !self.check(&Token::RightParen) {
                loop {
                    results.push(self.parse_type_name()?);
                    if !self.match_token(&Token::Comma) {
                        break;
                    }
                }
            }
            self.expect(&Token::RightParen, "Expected ')' after result types")?;
            return Ok(results);
        }

        if matches!(self.peek(), Some(Token::Identifier(_))) {
            return Ok(vec![self.parse_type_name()?]);
        }

        Ok(Vec::new())
    }
}
