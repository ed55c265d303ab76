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

//! Statement nodes of the parse tree.

use super::{Expression, Ident, VarDecl};

/// A braced block of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// Line of the opening brace.
    pub line: usize,
    /// Line of the closing brace.
    pub end_line: usize,
}

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var ...`
    Var(VarDecl),
    /// `a, b := x, y`
    ShortVarDecl {
        names: Vec<Ident>,
        values: Vec<Expression>,
        line: usize,
    },
    /// `a, b[0] = x, y`
    Assignment {
        targets: Vec<AssignTarget>,
        values: Vec<Expression>,
        line: usize,
    },
    If(IfStmt),
    For(ForStmt),
    /// `return [values]`
    Return {
        values: Vec<Expression>,
        line: usize,
    },
    /// A call whose results are discarded (this includes `read` and `write`).
    Call {
        callee: Ident,
        args: Vec<Expression>,
        line: usize,
    },
    Block(Block),
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(Ident),
    Index {
        array: Ident,
        index: Box<Expression>,
    },
}

impl AssignTarget {
    pub fn line(&self) -> usize {
        match self {
            AssignTarget::Name(ident) => ident.line,
            AssignTarget::Index { array, .. } => array.line,
        }
    }
}

/// `if cond { ... } [else ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_block: Block,
    pub else_branch: Option<ElseBranch>,
    pub line: usize,
}

/// What follows `else`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStmt>),
}

/// `for cond { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub condition: Expression,
    pub body: Block,
    pub line: usize,
}
