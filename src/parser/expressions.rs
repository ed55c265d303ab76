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

//! Expression parsing for the parser.
//!
//! This module provides expression parsing functionality:
//! - Precedence climbing for binary operators
//! - Unary signs
//! - Operands (literals, names, calls, array indexing, grouping)

use super::helpers::ParserHelpers;
use super::Parser;
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;
use crate::parse_tree::{BasicLit, Expression, Ident, LiteralKind, Operator, Primary, Sign};

/// Binding power of a binary operator; higher binds tighter.
fn precedence(text: &str) -> u8 {
    match text {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | ">" | "<=" | ">=" => 3,
        "+" | "-" => 4,
        _ => 5,
    }
}

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// Parse an expression.
    fn parse_expression(&mut self) -> Result<Expression, CompileError>;

    /// Parse a binary expression whose operators bind at least `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<Expression, CompileError>;

    /// Parse an optionally signed operand.
    fn parse_unary_expression(&mut self) -> Result<Expression, CompileError>;

    /// Parse an operand.
    fn parse_primary(&mut self) -> Result<Primary, CompileError>;

    /// Parse the arguments of a call after the opening parenthesis.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>, CompileError>;

    /// Parse a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<Expression>, CompileError>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expression(&mut self) -> Result<Expression, CompileError> {
        self.parse_binary_expression(1)
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<Expression, CompileError> {
        let mut left = self.parse_unary_expression()?;

        while let Some(text) = self.peek().and_then(Token::binary_operator) {
            let op_precedence = precedence(text);
            if op_precedence < min_precedence {
                break;
            }

            let op = Operator {
                text: text.to_string(),
                line: self.current_line(),
            };
            self.advance();
            self.skip_newlines();

            let right = self.parse_binary_expression(op_precedence + 1)?;
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<Expression, CompileError> {
        let line = self.current_line();
        let sign = if self.match_token(&Token::Minus) {
            Some(Sign::Minus)
        } else if self.match_token(&Token::Plus) {
            Some(Sign::Plus)
        } else {
            None
        };

        let primary = self.parse_primary()?;
        Ok(Expression::Operand {
            sign,
            primary,
            line,
        })
    }

    fn parse_primary(&mut self) -> Result<Primary, CompileError> {
        let line = self.current_line();
        let literal = |kind, text: &str| {
            Primary::Literal(BasicLit {
                kind,
                text: text.to_string(),
                line,
            })
        };

        let primary = match self.peek() {
            Some(Token::Integer(text)) => literal(LiteralKind::Int, text),
            Some(Token::Decimal(text)) => literal(LiteralKind::Float, text),
            Some(Token::String(text)) => literal(LiteralKind::String, text),
            Some(Token::True) => literal(LiteralKind::Bool, "true"),
            Some(Token::False) => literal(LiteralKind::Bool, "false"),
            Some(Token::Identifier(name)) => {
                let ident = Ident::new(name.clone(), line);
                self.advance();

                if self.match_token(&Token::LeftParen) {
                    let args = self.parse_arguments()?;
                    return Ok(Primary::Call {
                        callee: ident,
                        args,
                    });
                }

                if self.match_token(&Token::LeftBracket) {
                    self.skip_newlines();
                    let index = self.parse_expression()?;
                    self.skip_newlines();
                    self.expect(&Token::RightBracket, "Expected ']' after index")?;
                    return Ok(Primary::Index {
                        array: ident,
                        index: Box::new(index),
                    });
                }

                return Ok(Primary::Name(ident));
            }
            Some(Token::LeftParen) => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expression()?;
                self.skip_newlines();
                self.expect(&Token::RightParen, "Expected ')' after expression")?;
                return Ok(Primary::Paren(Box::new(inner)));
            }
            Some(token) => {
                let message = format!("Expected expression, found {}", token);
                return Err(self.error(ErrorCode::ExpectedExpression, message));
            }
            None => {
                return Err(self.error(
                    ErrorCode::UnexpectedEndOfFile,
                    "Expected expression, found end of file",
                ))
            }
        };

        // Literal tokens are consumed here.
        self.advance();
        Ok(primary)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, CompileError> {
        let mut args = Vec::new();
        self.skip_newlines();

        if !self.check(&Token::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                self.skip_newlines();
                if !self.match_token(&Token::Comma) {
                    break;
                }
                self.skip_newlines();
            }
        }

        self.expect(&Token::RightParen, "Expected ')' after arguments")?;
        Ok(args)
    }

    fn parse_expression_list(&mut self) -> Result<Vec<Expression>, CompileError> {
        let mut expressions = vec![self.parse_expression()?];
        while self.match_token(&Token::Comma) {
            self.skip_newlines();
            expressions.push(self.parse_expression()?);
        }
        Ok(expressions)
    }
}
