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

//! Control flow code generation.
//!
//! This module provides code generation for statements:
//! - Statement dispatch
//! - Blocks
//! - if/else if/else chains
//! - Condition-controlled loops

use std::io::Write;

use log::trace;

use super::assignments::AssignmentEmitter;
use super::comparisons::ConditionEmitter;
use super::emit::EmitHelpers;
use super::functions::FunctionEmitter;
use super::io::IoEmitter;
use super::labels::{FrameContext, Jump};
use super::CodeGenerator;
use crate::ast::{Node, NodeKind};
use crate::error::CodegenError;

/// Extension trait for statement and control flow code generation.
pub trait ControlFlowEmitter {
    /// Generate code for one statement node.
    fn emit_statement(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Generate code for the statements of a block.
    fn emit_block(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Generate code for an if statement.
    ///
    /// `exit` is the exit label of the enclosing chain when this `if` is an
    /// `else if` arm.
    fn emit_if(
        &mut self,
        node: &Node,
        exit: Option<&str>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;

    /// Generate code for a loop.
    fn emit_repeat(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;
}

impl<'a, W: Write> ControlFlowEmitter for CodeGenerator<'a, W> {
    fn emit_statement(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        match &node.kind {
            NodeKind::Assign => self.emit_assign(node, ctx),
            NodeKind::VarDecl(var) => self.emit_default_init(*var, ctx),
            NodeKind::Block => self.emit_block(node, ctx),
            NodeKind::If => self.emit_if(node, None, ctx),
            NodeKind::Repeat => self.emit_repeat(node, ctx),
            NodeKind::Call(index) => self.emit_call(*index, &node.children, ctx),
            NodeKind::Return => self.emit_return(node, ctx),
            NodeKind::Read => self.emit_read(node, ctx),
            NodeKind::Write => self.emit_write(node, ctx),
            NodeKind::Eq
            | NodeKind::Neq
            | NodeKind::Lt
            | NodeKind::Gt
            | NodeKind::Le
            | NodeKind::Ge
            | NodeKind::Plus
            | NodeKind::Minus
            | NodeKind::Times
            | NodeKind::Over
            | NodeKind::Mod
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::IntVal(_)
            | NodeKind::FloatVal(_)
            | NodeKind::BoolVal(_)
            | NodeKind::StrVal(_)
            | NodeKind::VarUse(_)
            | NodeKind::ArrayUse { .. }
            | NodeKind::Function(_)
            | NodeKind::Program
            | NodeKind::VarList => Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "statement",
            }),
        }
    }

    fn emit_block(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        for statement in &node.children {
            self.emit_statement(statement, ctx)?;
        }
        Ok(())
    }

    fn emit_if(
        &mut self,
        node: &Node,
        exit: Option<&str>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        let (then_block, else_part, condition) = match node.children.as_slice() {
            [then_block, condition] => (then_block, None, condition),
            [then_block, else_part, condition] => (then_block, Some(else_part), condition),
            _ => {
                return Err(CodegenError::InvalidNodeKind {
                    kind: node.kind.name(),
                    context: "if statement",
                })
            }
        };

        let labels = ctx.labels.next_if();
        let exit_label = exit.unwrap_or(labels.exit_label.as_str()).to_string();
        trace!("if {} -> {}", labels.else_label, exit_label);

        match else_part {
            None => {
                self.emit_condition(condition, Jump::IfFalse(exit_label.as_str()), ctx)?;
                self.emit_block(then_block, ctx)?;
            }
            Some(else_part) => {
                self.emit_condition(condition, Jump::IfFalse(labels.else_label.as_str()), ctx)?;
                self.emit_block(then_block, ctx)?;
                self.emit_arg("goto", &exit_label)?;
                self.emit_label(&labels.else_label)?;
                if matches!(else_part.kind, NodeKind::If) {
                    self.emit_if(else_part, Some(exit_label.as_str()), ctx)?;
                } else {
                    self.emit_statement(else_part, ctx)?;
                }
            }
        }

        if exit.is_none() {
            self.emit_label(&exit_label)?;
        }
        Ok(())
    }

    fn emit_repeat(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let [body, condition] = node.children.as_slice() else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "loop",
            });
        };

        let labels = ctx.labels.next_while();
        self.emit_label(&labels.top_label)?;
        self.emit_condition(condition, Jump::IfFalse(labels.exit_label.as_str()), ctx)?;
        self.emit_block(body, ctx)?;
        self.emit_arg("goto", &labels.top_label)?;
        self.emit_label(&labels.exit_label)
    }
}
