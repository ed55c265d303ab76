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

//! Statement parsing for the parser.
//!
//! This module provides statement parsing functionality:
//! - Variable declarations (`var`, short `:=`)
//! - Assignments and call statements
//! - Return statements
//! - Dispatch to control flow and nested blocks

use super::blocks::BlockParser;
use super::control_flow::ControlFlowParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::types::TypeParser;
use super::Parser;
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;
use crate::parse_tree::{AssignTarget, Expression, Ident, Primary, Statement, VarDecl, VarSpec};

/// Extension trait for statement parsing.
pub trait StatementParser {
    /// Parse a statement.
    fn parse_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse an assignment, short declaration or call statement.
    fn parse_simple_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse a `var` declaration (single spec or parenthesized group).
    fn parse_var_decl(&mut self) -> Result<VarDecl, CompileError>;

    /// Parse one `names [type] [= values]` spec.
    fn parse_var_spec(&mut self) -> Result<VarSpec, CompileError>;

    /// Parse a return statement.
    fn parse_return_statement(&mut self) -> Result<Statement, CompileError>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        match self.peek() {
            Some(Token::Var) => Ok(Statement::Var(self.parse_var_decl()?)),
            Some(Token::If) => Ok(Statement::If(self.parse_if_statement()?)),
            Some(Token::For) => Ok(Statement::For(self.parse_for_statement()?)),
            Some(Token::Return) => self.parse_return_statement(),
            Some(Token::LeftBrace) => Ok(Statement::Block(self.parse_block()?)),
            _ => self.parse_simple_statement(),
        }
    }

    fn parse_simple_statement(&mut self) -> Result<Statement, CompileError> {
        let line = self.current_line();
        let start = self.peek_span();
        let left = self.parse_expression_list()?;

        if self.match_token(&Token::ColonEqual) {
            let names = left
                .into_iter()
                .map(into_declared_name)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    self.error(
                        ErrorCode::InvalidAssignmentTarget,
                        "Only names can be declared with ':='",
                    )
                })?;
            self.skip_newlines();
            let values = self.parse_expression_list()?;
            return Ok(Statement::ShortVarDecl {
                names,
                values,
                line,
            });
        }

        if self.match_token(&Token::Equal) {
            let targets = left
                .into_iter()
                .map(into_assign_target)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    self.error(
                        ErrorCode::InvalidAssignmentTarget,
                        "Only variables and array elements can be assigned to",
                    )
                })?;
            self.skip_newlines();
            let values = self.parse_expression_list()?;
            return Ok(Statement::Assignment {
                targets,
                values,
                line,
            });
        }

        match left.as_slice() {
            [single] => match single.as_call() {
                Some((callee, args)) => Ok(Statement::Call {
                    callee: callee.clone(),
                    args: args.to_vec(),
                    line,
                }),
                None => Err(CompileError::new(
                    ErrorCode::InvalidExpressionStatement,
                    "Expression is not a statement",
                    start.unwrap_or_else(|| self.previous_span()),
                )
                .with_hint("only calls, assignments and declarations can stand alone")),
            },
            _ => Err(self.error(
                ErrorCode::UnexpectedToken,
                "Expected '=' or ':=' after expression list",
            )),
        }
    }

    fn parse_var_decl(&mut self) -> Result<VarDecl, CompileError> {
        let line = self.current_line();
        self.expect(&Token::Var, "Expected 'var'")?;

        let mut specs = Vec::new();
        if self.match_token(&Token::LeftParen) {
            self.skip_separators();
            while !self.check(&Token::RightParen) && !self.is_at_end() {
                specs.push(self.parse_var_spec()?);
                self.expect_terminator()?;
                self.skip_separators();
            }
            self.expect(&Token::RightParen, "Expected ')' to close var group")?;
        } else {
            specs.push(self.parse_var_spec()?);
        }

        Ok(VarDecl { specs, line })
    }

    fn parse_var_spec(&mut self) -> Result<VarSpec, CompileError> {
        let line = self.current_line();
        let mut names = vec![self.expect_identifier("variable name")?];
        while self.match_token(&Token::Comma) {
            names.push(self.expect_identifier("variable name")?);
        }

        let ty = if self.check(&Token::Equal) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let values = if self.match_token(&Token::Equal) {
            self.skip_newlines();
            self.parse_expression_list()?
        } else {
            Vec::new()
        };

        Ok(VarSpec {
            names,
            ty,
            values,
            line,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, CompileError> {
        let line = self.current_line();
        self.expect(&Token::Return, "Expected 'return'")?;

        let values = if self.at_terminator() {
            Vec::new()
        } else {
            self.parse_expression_list()?
        };

        Ok(Statement::Return { values, line })
    }
}

fn into_declared_name(expr: Expression) -> Option<Ident> {
    match expr {
        Expression::Operand {
            sign: None,
            primary: Primary::Name(ident),
            ..
        } => Some(ident),
        _ => None,
    }
}

fn into_assign_target(expr: Expression) -> Option<AssignTarget> {
    match expr {
        Expression::Operand {
            sign: None,
            primary: Primary::Name(ident),
            ..
        } => Some(AssignTarget::Name(ident)),
        Expression::Operand {
            sign: None,
            primary: Primary::Index { array, index },
            ..
        } => Some(AssignTarget::Index { array, index }),
        _ => None,
    }
}
