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

//! Typed Abstract Syntax Tree (AST) for the Golite compiler.
//!
//! The analyzer lowers the parse tree into this tree and the code generator
//! consumes it. Every node has a [`NodeKind`] (which also carries the
//! kind-specific payload), a [`Type`] and an ordered list of owned children.
//!
//! Child positions are significant:
//! - `If`: `[then, else?, condition]`
//! - `Repeat`: `[body, condition]`
//! - `Assign`: `[target, value]` or `[VarList, Call]`
//! - `Function`: `[body]`

pub mod dot;
mod types;

pub use types::*;

/// Identifies the variable table a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The global variable table.
    Global,
    /// The local variable table of the function with this index.
    Function(usize),
}

impl Scope {
    /// Numeric scope id: 0 is global, `i + 1` is function `i`.
    pub fn id(&self) -> usize {
        match self {
            Scope::Global => 0,
            Scope::Function(index) => index + 1,
        }
    }
}

/// A resolved reference to a variable table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarRef {
    /// Index of the entry in its table.
    pub slot: usize,
    /// The table the entry lives in.
    pub scope: Scope,
}

impl VarRef {
    pub fn new(slot: usize, scope: Scope) -> Self {
        Self { slot, scope }
    }
}

/// The closed set of AST node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    Plus,
    Minus,
    Times,
    Over,
    Mod,
    And,
    Or,
    Block,
    If,
    Repeat,
    IntVal(i32),
    FloatVal(f32),
    BoolVal(bool),
    StrVal(String),
    VarDecl(VarRef),
    VarUse(VarRef),
    /// An array element with a compile-time offset.
    ArrayUse {
        var: VarRef,
        offset: usize,
    },
    /// A function declaration, carrying its function table index.
    Function(usize),
    /// A call site, carrying the callee's function table index.
    Call(usize),
    Program,
    Read,
    Write,
    VarList,
    Return,
}

impl NodeKind {
    /// Map a binary operator's source text to its node kind.
    pub fn from_operator(text: &str) -> Option<NodeKind> {
        let kind = match text {
            "==" => NodeKind::Eq,
            "!=" => NodeKind::Neq,
            "<" => NodeKind::Lt,
            ">" => NodeKind::Gt,
            "<=" => NodeKind::Le,
            ">=" => NodeKind::Ge,
            "+" => NodeKind::Plus,
            "-" => NodeKind::Minus,
            "*" => NodeKind::Times,
            "/" => NodeKind::Over,
            "%" => NodeKind::Mod,
            "&&" => NodeKind::And,
            "||" => NodeKind::Or,
            _ => return None,
        };
        Some(kind)
    }

    /// A short, stable name used in diagnostics and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Assign => "assign",
            NodeKind::Eq => "==",
            NodeKind::Neq => "!=",
            NodeKind::Lt => "<",
            NodeKind::Gt => ">",
            NodeKind::Le => "<=",
            NodeKind::Ge => ">=",
            NodeKind::Plus => "+",
            NodeKind::Minus => "-",
            NodeKind::Times => "*",
            NodeKind::Over => "/",
            NodeKind::Mod => "%",
            NodeKind::And => "&&",
            NodeKind::Or => "||",
            NodeKind::Block => "block",
            NodeKind::If => "if",
            NodeKind::Repeat => "repeat",
            NodeKind::IntVal(_) => "int_val",
            NodeKind::FloatVal(_) => "float_val",
            NodeKind::BoolVal(_) => "bool_val",
            NodeKind::StrVal(_) => "str_val",
            NodeKind::VarDecl(_) => "var_decl",
            NodeKind::VarUse(_) => "var_use",
            NodeKind::ArrayUse { .. } => "array_use",
            NodeKind::Function(_) => "func",
            NodeKind::Call(_) => "call",
            NodeKind::Program => "program",
            NodeKind::Read => "read",
            NodeKind::Write => "write",
            NodeKind::VarList => "var_list",
            NodeKind::Return => "return",
        }
    }

    /// Check if this is one of the six comparison operators.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            NodeKind::Eq | NodeKind::Neq | NodeKind::Lt | NodeKind::Gt | NodeKind::Le | NodeKind::Ge
        )
    }

    /// Check if this is `&&` or `||`.
    pub fn is_logical(&self) -> bool {
        matches!(self, NodeKind::And | NodeKind::Or)
    }

    /// Check if this is an arithmetic operator.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            NodeKind::Plus | NodeKind::Minus | NodeKind::Times | NodeKind::Over | NodeKind::Mod
        )
    }
}

/// A node of the typed AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub ty: Type,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with children.
    pub fn new(kind: NodeKind, ty: Type, children: Vec<Node>) -> Self {
        Self { kind, ty, children }
    }

    /// Create a node without children.
    pub fn leaf(kind: NodeKind, ty: Type) -> Self {
        Self::new(kind, ty, Vec::new())
    }

    /// Create a statement-level node of type `no_type`.
    pub fn statement(kind: NodeKind, children: Vec<Node>) -> Self {
        Self::new(kind, Type::NoType, children)
    }

    /// Check if this node can only appear as an `if`/`for` condition.
    pub fn is_jump_only(&self) -> bool {
        self.kind.is_comparison() || self.kind.is_logical()
    }

    /// Check if this node is usable as a condition.
    pub fn is_condition(&self) -> bool {
        self.is_jump_only() || self.ty == Type::Bool
    }

    /// Check if this node denotes storage or a call result rather than a
    /// computed value. Widening never rewrites the type of such nodes.
    pub fn is_reference(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::VarUse(_) | NodeKind::VarDecl(_) | NodeKind::ArrayUse { .. } | NodeKind::Call(_)
        )
    }

    /// Count this node and all of its descendants.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}
