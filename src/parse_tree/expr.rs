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

//! Expression nodes of the parse tree.

use super::Ident;

/// The lexical class of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Bool,
}

/// A literal with its source text.
///
/// String text excludes the surrounding quotes but keeps escapes as written.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub kind: LiteralKind,
    pub text: String,
    pub line: usize,
}

/// A unary sign in front of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Plus => "+",
            Sign::Minus => "-",
        }
    }
}

/// A binary operator token.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub text: String,
    pub line: usize,
}

/// An expression: either a binary operation or a single (signed) operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Operand {
        sign: Option<Sign>,
        primary: Primary,
        line: usize,
    },
}

impl Expression {
    /// The line the expression is reported at.
    pub fn line(&self) -> usize {
        match self {
            Expression::Binary { op, .. } => op.line,
            Expression::Operand { line, .. } => *line,
        }
    }

    /// The callee and arguments, if this is an unsigned call.
    pub fn as_call(&self) -> Option<(&Ident, &[Expression])> {
        match self {
            Expression::Operand {
                sign: None,
                primary: Primary::Call { callee, args },
                ..
            } => Some((callee, args)),
            _ => None,
        }
    }
}

/// The alternatives of an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Literal(BasicLit),
    Name(Ident),
    Call {
        callee: Ident,
        args: Vec<Expression>,
    },
    Index {
        array: Ident,
        index: Box<Expression>,
    },
    Paren(Box<Expression>),
}
