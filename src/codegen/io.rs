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

//! Console I/O code generation.
//!
//! `write` prints through `System.out.println`, `read` creates a
//! `java.util.Scanner` over `System.in` and reads one value of the target's
//! type.

use std::io::Write;

use super::emit::EmitHelpers;
use super::expressions::ExpressionEmitter;
use super::labels::FrameContext;
use super::types::descriptor;
use super::variables::VariableEmitter;
use super::CodeGenerator;
use crate::ast::{Node, NodeKind, Type};
use crate::error::CodegenError;

/// The `Scanner` method reading a value of `ty`.
fn scanner_method(ty: Type) -> Option<&'static str> {
    match ty {
        Type::Int => Some("java/util/Scanner/nextInt()I"),
        Type::Float => Some("java/util/Scanner/nextFloat()F"),
        Type::Bool => Some("java/util/Scanner/nextBoolean()Z"),
        Type::String => Some("java/util/Scanner/nextLine()Ljava/lang/String;"),
        Type::Array | Type::Null | Type::NoType => None,
    }
}

/// Extension trait for console I/O.
pub trait IoEmitter {
    /// Generate code for a `Write` node.
    fn emit_write(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Generate code for a `Read` node.
    fn emit_read(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;

    /// Push one value of `ty` read from standard input.
    fn emit_scan(&mut self, ty: Type) -> Result<(), CodegenError>;
}

impl<'a, W: Write> IoEmitter for CodeGenerator<'a, W> {
    fn emit_write(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let [value] = node.children.as_slice() else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "write",
            });
        };

        self.emit_arg("getstatic", "java/lang/System/out Ljava/io/PrintStream;")?;
        self.emit_value(value, ctx)?;
        self.emit_arg(
            "invokevirtual",
            format!("java/io/PrintStream/println({})V", descriptor(value.ty)),
        )
    }

    fn emit_read(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let invalid = |node: &Node| CodegenError::InvalidNodeKind {
            kind: node.kind.name(),
            context: "read target",
        };
        let [target] = node.children.as_slice() else {
            return Err(invalid(node));
        };

        match &target.kind {
            NodeKind::VarUse(var) => {
                self.emit_scan(target.ty)?;
                self.emit_store(*var, ctx)
            }
            NodeKind::ArrayUse { var, offset } => {
                self.emit_element_address(*var, *offset, ctx)?;
                self.emit_scan(target.ty)?;
                self.emit_element_store(target.ty)
            }
            _ => Err(invalid(target)),
        }
    }

    fn emit_scan(&mut self, ty: Type) -> Result<(), CodegenError> {
        let method = scanner_method(ty).ok_or(CodegenError::InvalidNodeKind {
            kind: "read",
            context: "non-scalar read",
        })?;
        self.emit_arg("new", "java/util/Scanner")?;
        self.emit("dup")?;
        self.emit_arg("getstatic", "java/lang/System/in Ljava/io/InputStream;")?;
        self.emit_arg(
            "invokespecial",
            "java/util/Scanner/<init>(Ljava/io/InputStream;)V",
        )?;
        self.emit_arg("invokevirtual", method)
    }
}
