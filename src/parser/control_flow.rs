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

//! Control flow statement parsing for the parser.
//!
//! This module provides control flow statement parsing:
//! - If/else if/else chains
//! - Condition-only for loops

use super::blocks::BlockParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::Parser;
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;
use crate::parse_tree::{ElseBranch, ForStmt, IfStmt};

/// Extension trait for control flow parsing.
pub trait ControlFlowParser {
    /// Parse an if statement, including its else chain.
    fn parse_if_statement(&mut self) -> Result<IfStmt, CompileError>;

    /// Parse a for statement.
    fn parse_for_statement(&mut self) -> Result<ForStmt, CompileError>;
}

impl<'a> ControlFlowParser for Parser<'a> {
    fn parse_if_statement(&mut self) -> Result<IfStmt, CompileError> {
        let line = self.current_line();
        self.expect(&Token::If, "Expected 'if'")?;

        let condition = self.parse_expression()?;
        let then_block = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            match self.peek() {
                Some(Token::If) => Some(ElseBranch::If(Box::new(self.parse_if_statement()?))),
                Some(Token::LeftBrace) => Some(ElseBranch::Block(self.parse_block()?)),
                _ => {
                    return Err(self.error(
                        ErrorCode::UnexpectedToken,
                        "Expected 'if' or '{' after 'else'",
                    ))
                }
            }
        } else {
            None
        };

        Ok(IfStmt {
            condition,
            then_block,
            else_branch,
            line,
        })
    }

    fn parse_for_statement(&mut self) -> Result<ForStmt, CompileError> {
        let line = self.current_line();
        self.expect(&Token::For, "Expected 'for'")?;

        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(ForStmt {
            condition,
            body,
            line,
        })
    }
}
