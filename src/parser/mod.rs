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

//! Parser module for the Golite compiler.
//!
//! This module parses a token stream into a [`SourceFile`] parse tree.
//! It uses recursive descent parsing with precedence climbing for expressions.
//!
//! # Module Structure
//!
//! - `blocks` - Source file, function and block parsing (BlockParser trait)
//! - `control_flow` - If and for parsing (ControlFlowParser trait)
//! - `expressions` - Expression parsing (ExpressionParser trait)
//! - `helpers` - Token stream navigation and error handling (ParserHelpers trait)
//! - `statements` - Statement parsing (StatementParser trait)
//! - `types` - Type parsing (TypeParser trait)

pub mod blocks;
pub mod control_flow;
pub mod expressions;
pub mod helpers;
pub mod statements;
pub mod types;

use blocks::BlockParser;

use crate::error::{CompileError, Span};
use crate::lexer::{tokenize, LineIndex, Token};
use crate::parse_tree::SourceFile;

/// The parser state.
pub struct Parser<'a> {
    /// The token stream to parse.
    pub(crate) tokens: &'a [(Token, Span)],
    /// Current position in the token stream.
    pub(crate) position: usize,
    /// Line lookup for token spans.
    pub(crate) lines: LineIndex,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the token stream of `source`.
    pub fn new(tokens: &'a [(Token, Span)], source: &str) -> Self {
        Self {
            tokens,
            position: 0,
            lines: LineIndex::new(source),
        }
    }

    /// Parse the complete source file.
    pub fn parse(&mut self) -> Result<SourceFile, CompileError> {
        self.parse_source_file()
    }
}

/// Parse the token stream of `source` into a parse tree.
pub fn parse(tokens: &[(Token, Span)], source: &str) -> Result<SourceFile, CompileError> {
    let mut parser = Parser::new(tokens, source);
    parser.parse()
}

/// Tokenize and parse source code in one step.
pub fn parse_source(source: &str) -> Result<SourceFile, CompileError> {
    let tokens = tokenize(source)?;
    parse(&tokens, source)
}
