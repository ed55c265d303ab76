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

//! Assignment and declaration code generation.

use std::io::Write;

use super::emit::EmitHelpers;
use super::expressions::ExpressionEmitter;
use super::functions::FunctionEmitter;
use super::labels::FrameContext;
use super::types::new_array;
use super::variables::VariableEmitter;
use super::CodeGenerator;
use crate::ast::{Node, NodeKind, Type, VarRef};
use crate::error::CodegenError;

/// Extension trait for assignments and variable initialization.
pub trait AssignmentEmitter {
    /// Generate code for an `Assign` node.
    fn emit_assign(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Initialize a declared variable with its zero value (or a new array).
    fn emit_default_init(&mut self, var: VarRef, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Store the results of a call into the targets of a `VarList`.
    fn emit_result_targets(
        &mut self,
        function: usize,
        targets: &Node,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;
}

fn invalid_target(node: &Node) -> CodegenError {
    CodegenError::InvalidNodeKind {
        kind: node.kind.name(),
        context: "assignment target",
    }
}

impl<'a, W: Write> AssignmentEmitter for CodeGenerator<'a, W> {
    fn emit_assign(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let [target, value] = node.children.as_slice() else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "assignment",
            });
        };

        match &target.kind {
            NodeKind::VarDecl(var) | NodeKind::VarUse(var) => {
                self.emit_value_as(value, target.ty, ctx)?;
                self.emit_store(*var, ctx)
            }
            NodeKind::ArrayUse { var, offset } => {
                self.emit_element_address(*var, *offset, ctx)?;
                self.emit_value_as(value, target.ty, ctx)?;
                self.emit_element_store(target.ty)
            }
            NodeKind::VarList => {
                let NodeKind::Call(function) = value.kind else {
                    return Err(CodegenError::InvalidNodeKind {
                        kind: value.kind.name(),
                        context: "multi-result assignment",
                    });
                };
                self.emit_call(function, &value.children, ctx)?;
                self.emit_result_targets(function, target, ctx)
            }
            _ => Err(invalid_target(target)),
        }
    }

    fn emit_default_init(&mut self, var: VarRef, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let entry = self.variable(var)?;
        match entry.array {
            Some(info) => {
                let (opcode, operand) = new_array(info.element);
                self.emit_arg("ldc", info.len)?;
                self.emit_arg(opcode, operand)?;
            }
            None => match entry.ty {
                Type::Int | Type::Bool => self.emit("iconst_0")?,
                Type::Float => self.emit("fconst_0")?,
                Type::String => self.emit_arg("ldc", "\"\"")?,
                Type::Array | Type::Null | Type::NoType => self.emit("aconst_null")?,
            },
        }
        self.emit_store(var, ctx)
    }

    fn emit_result_targets(
        &mut self,
        function: usize,
        targets: &Node,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        let returns = &self.function(function)?.returns;

        for (i, target) in targets.children.iter().enumerate() {
            let result = returns.get(i).copied().unwrap_or(Type::NoType);
            let field = self.result_field(function, i)?;

            match &target.kind {
                NodeKind::VarDecl(var) | NodeKind::VarUse(var) => {
                    self.emit_arg("getstatic", field)?;
                    if result == Type::Int && target.ty == Type::Float {
                        self.emit("i2f")?;
                    }
                    self.emit_store(*var, ctx)?;
                }
                NodeKind::ArrayUse { var, offset } => {
                    self.emit_element_address(*var, *offset, ctx)?;
                    self.emit_arg("getstatic", field)?;
                    if result == Type::Int && target.ty == Type::Float {
                        self.emit("i2f")?;
                    }
                    self.emit_element_store(target.ty)?;
                }
                _ => return Err(invalid_target(target)),
            }
        }
        Ok(())
    }
}
