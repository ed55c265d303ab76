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

//! Control flow lowering for the semantic analyzer.
//!
//! This module provides control flow statement lowering:
//! - If/else if/else chains
//! - Condition-only for loops
//! - Conditions and blocks

use super::expressions::ExpressionAnalyzer;
use super::statements::StatementAnalyzer;
use super::Analyzer;
use crate::ast::{Node, NodeKind, Type};
use crate::error::SemanticError;
use crate::parse_tree::{Block, ElseBranch, Expression, ForStmt, IfStmt};

/// Extension trait for control flow lowering.
pub trait ControlFlowAnalyzer {
    /// Lower an if statement to `If[then, else?, condition]`.
    fn lower_if(&mut self, stmt: &IfStmt) -> Option<Node>;

    /// Lower a for statement to `Repeat[body, condition]`.
    fn lower_for(&mut self, stmt: &ForStmt) -> Option<Node>;

    /// Lower the condition of `construct`.
    fn lower_condition(&mut self, expr: &Expression, construct: &str, line: usize) -> Option<Node>;

    /// Lower a block, splicing each statement's nodes in order.
    fn lower_block(&mut self, block: &Block) -> Node;
}

impl ControlFlowAnalyzer for Analyzer {
    fn lower_if(&mut self, stmt: &IfStmt) -> Option<Node> {
        let condition = self.lower_condition(&stmt.condition, "if", stmt.line);
        let then_block = self.lower_block(&stmt.then_block);

        let else_part = match &stmt.else_branch {
            None => None,
            Some(ElseBranch::Block(block)) => Some(Some(self.lower_block(block))),
            Some(ElseBranch::If(nested)) => Some(self.lower_if(nested)),
        };

        let mut children = vec![then_block];
        match else_part {
            Some(Some(node)) => children.push(node),
            Some(None) => return None,
            None => {}
        }
        children.push(condition?);

        Some(Node::statement(NodeKind::If, children))
    }

    fn lower_for(&mut self, stmt: &ForStmt) -> Option<Node> {
        let condition = self.lower_condition(&stmt.condition, "for", stmt.line);
        let body = self.lower_block(&stmt.body);
        Some(Node::statement(NodeKind::Repeat, vec![body, condition?]))
    }

    fn lower_condition(&mut self, expr: &Expression, construct: &str, line: usize) -> Option<Node> {
        let node = self.lower_expression(expr)?;
        if !node.is_condition() {
            self.error(SemanticError::TypeMismatch {
                line,
                operator: construct.to_string(),
                left: Type::Bool,
                right: node.ty,
            });
            return None;
        }
        Some(node)
    }

    fn lower_block(&mut self, block: &Block) -> Node {
        let statements = block
            .statements
            .iter()
            .flat_map(|stmt| self.lower_statement(stmt))
            .collect();
        Node::statement(NodeKind::Block, statements)
    }
}
