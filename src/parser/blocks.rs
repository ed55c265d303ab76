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

//! Block and function parsing for the parser.
//!
//! This module provides block and function parsing functionality:
//! - The source file with its `package` and `import` clauses
//! - Function declarations and parameter groups
//! - Statement blocks

use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::types::TypeParser;
use super::Parser;
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;
use crate::parse_tree::{Block, FuncDecl, ParamGroup, SourceFile, TopLevelDecl};

/// Extension trait for block and function parsing.
pub trait BlockParser {
    /// Parse a whole source file.
    fn parse_source_file(&mut self) -> Result<SourceFile, CompileError>;

    /// Skip `import "path"` and `import ( ... )` clauses.
    fn skip_imports(&mut self) -> Result<(), CompileError>;

    /// Parse a top-level declaration.
    fn parse_top_level_decl(&mut self) -> Result<TopLevelDecl, CompileError>;

    /// Parse a function declaration.
    fn parse_function_decl(&mut self) -> Result<FuncDecl, CompileError>;

    /// Parse the parameter groups of a function signature.
    fn parse_param_groups(&mut self) -> Result<Vec<ParamGroup>, CompileError>;

    /// Parse a block of statements.
    fn parse_block(&mut self) -> Result<Block, CompileError>;
}

impl<'a> BlockParser for Parser<'a> {
    fn parse_source_file(&mut self) -> Result<SourceFile, CompileError> {
        let mut file = SourceFile::default();

        self.skip_separators();
        if self.match_token(&Token::Package) {
            file.package = Some(self.expect_identifier("package name")?);
            self.expect_terminator()?;
        }

        self.skip_separators();
        self.skip_imports()?;

        loop {
            self.skip_separators();
            if self.is_at_end() {
                break;
            }
            let decl = self.parse_top_level_decl()?;
            file.declarations.push(decl);
            self.expect_terminator()?;
        }

        Ok(file)
    }

    fn skip_imports(&mut self) -> Result<(), CompileError> {
        while self.match_token(&Token::Import) {
            if self.match_token(&Token::LeftParen) {
                self.skip_separators();
                while self.match_token(&Token::String(String::new())) {
                    self.skip_separators();
                }
                self.expect(&Token::RightParen, "Expected ')' after imports")?;
            } else {
                self.expect(&Token::String(String::new()), "Expected import path")?;
            }
            self.expect_terminator()?;
            self.skip_separators();
        }
        Ok(())
    }

    fn parse_top_level_decl(&mut self) -> Result<TopLevelDecl, CompileError> {
        match self.peek() {
            Some(Token::Var) => Ok(TopLevelDecl::Var(self.parse_var_decl()?)),
            Some(Token::Func) => Ok(TopLevelDecl::Func(self.parse_function_decl()?)),
            Some(token) => {
                let message = format!("Expected 'var' or 'func' at top level, found {}", token);
                Err(self.error(ErrorCode::ExpectedStatement, message))
            }
            None => Err(self.error(ErrorCode::UnexpectedEndOfFile, "Unexpected end of file")),
        }
    }

    fn parse_function_decl(&mut self) -> Result<FuncDecl, CompileError> {
        let line = self.current_line();
        self.expect(&Token::Func, "Expected 'func'")?;

        let name = self.expect_identifier("function name")?;
        self.expect(&Token::LeftParen, "Expected '(' after function name")?;
        let params = self.parse_param_groups()?;
        self.expect(&Token::RightParen, "Expected ')' after parameters")?;

        let results = self.parse_result_types()?;
        let body = self.parse_block()?;

        Ok(FuncDecl {
            name,
            params,
            results,
            body,
            line,
        })
    }

    fn parse_param_groups(&mut self) -> Result<Vec<ParamGroup>, CompileError> {
        let mut groups = Vec::new();
        self.skip_newlines();

        while !self.check(&Token::RightParen) {
            let mut names = vec![self.expect_identifier("parameter name")?];
            while self.match_token(&Token::Comma) {
                names.push(self.expect_identifier("parameter name")?);
            }
            let ty = self.parse_type_name()?;
            groups.push(ParamGroup { names, ty });

            self.skip_newlines();
            if !self.match_token(&Token::Comma) {
                break;
            }
            self.skip_newlines();
        }

        Ok(groups)
    }

    fn parse_block(&mut self) -> Result<Block, CompileError> {
        let line = self.current_line();
        self.expect(&Token::LeftBrace, "Expected '{'")?;

        let mut statements = Vec::new();
        self.skip_separators();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.expect_terminator()?;
            self.skip_separators();
        }

        let end_line = self.current_line();
        self.expect(&Token::RightBrace, "Expected '}' to close block")?;

        Ok(Block {
            statements,
            line,
            end_line,
        })
    }
}
