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

//! Expression code generation.
//!
//! Values are pushed onto the operand stack in post-order. `int` operands
//! of `float` operations are converted with `i2f` after they are pushed.

use std::io::Write;

use super::emit::EmitHelpers;
use super::functions::FunctionEmitter;
use super::labels::FrameContext;
use super::types::{float_literal, type_prefix};
use super::variables::VariableEmitter;
use super::CodeGenerator;
use crate::ast::{Node, NodeKind, Type};
use crate::error::CodegenError;

/// Extension trait for expression code generation.
pub trait ExpressionEmitter {
    /// Push the value of an expression.
    fn emit_value(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Push the value of an expression converted to `target`.
    fn emit_value_as(
        &mut self,
        node: &Node,
        target: Type,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;

    /// Push the result of an arithmetic node.
    fn emit_arithmetic(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;
}

impl<'a, W: Write> ExpressionEmitter for CodeGenerator<'a, W> {
    fn emit_value(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        match &node.kind {
            NodeKind::IntVal(value) => match node.ty {
                Type::Float => self.emit_arg("ldc", float_literal(*value as f32)),
                _ => self.emit_arg("ldc", value),
            },
            NodeKind::FloatVal(value) => self.emit_arg("ldc", float_literal(*value)),
            NodeKind::BoolVal(true) => self.emit("iconst_1"),
            NodeKind::BoolVal(false) => self.emit("iconst_0"),
            NodeKind::StrVal(text) => self.emit_arg("ldc", format!("\"{}\"", text)),
            NodeKind::VarUse(var) => self.emit_load(*var, ctx),
            NodeKind::ArrayUse { var, offset } => {
                self.emit_element_address(*var, *offset, ctx)?;
                self.emit_element_load(node.ty)
            }
            NodeKind::Call(index) => {
                self.emit_call(*index, &node.children, ctx)?;
                let field = self.result_field(*index, 0)?;
                self.emit_arg("getstatic", field)
            }
            NodeKind::Plus
            | NodeKind::Minus
            | NodeKind::Times
            | NodeKind::Over
            | NodeKind::Mod => self.emit_arithmetic(node, ctx),
            NodeKind::Eq
            | NodeKind::Neq
            | NodeKind::Lt
            | NodeKind::Gt
            | NodeKind::Le
            | NodeKind::Ge
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::Assign
            | NodeKind::Block
            | NodeKind::If
            | NodeKind::Repeat
            | NodeKind::VarDecl(_)
            | NodeKind::Function(_)
            | NodeKind::Program
            | NodeKind::Read
            | NodeKind::Write
            | NodeKind::VarList
            | NodeKind::Return => Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "value",
            }),
        }
    }

    fn emit_value_as(
        &mut self,
        node: &Node,
        target: Type,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        self.emit_value(node, ctx)?;
        if node.ty == Type::Int && target == Type::Float {
            self.emit("i2f")?;
        }
        Ok(())
    }

    fn emit_arithmetic(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let [left, right] = node.children.as_slice() else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "binary operator",
            });
        };

        if node.ty == Type::String {
            if node.kind != NodeKind::Plus {
                return Err(CodegenError::InvalidNodeKind {
                    kind: node.kind.name(),
                    context: "string operator",
                });
            }
            self.emit_value(left, ctx)?;
            self.emit_value(right, ctx)?;
            return self.emit_arg(
                "invokevirtual",
                "java/lang/String/concat(Ljava/lang/String;)Ljava/lang/String;",
            );
        }

        self.emit_value_as(left, node.ty, ctx)?;
        self.emit_value_as(right, node.ty, ctx)?;

        let op = match node.kind {
            NodeKind::Plus => "add",
            NodeKind::Minus => "sub",
            NodeKind::Times => "mul",
            NodeKind::Over => "div",
            NodeKind::Mod => "rem",
            _ => {
                return Err(CodegenError::InvalidNodeKind {
                    kind: node.kind.name(),
                    context: "arithmetic",
                })
            }
        };
        self.emit(&format!("{}{}", type_prefix(node.ty), op))
    }
}
