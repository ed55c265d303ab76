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

//! Class layout and function code generation.
//!
//! This module provides:
//! - The class header and static field declarations
//! - The constructor and the static initializer for global statements
//! - One static method per function
//! - Calls and returns; results travel through `name$ret<i>` fields

use std::io::Write;

use log::debug;

use super::control_flow::ControlFlowEmitter;
use super::emit::EmitHelpers;
use super::expressions::ExpressionEmitter;
use super::labels::FrameContext;
use super::types::{descriptor, method_descriptor, var_descriptor};
use super::CodeGenerator;
use crate::analyzer::FuncEntry;
use crate::ast::{Node, NodeKind};
use crate::error::CodegenError;

/// Name of the program entry point.
pub const MAIN_FUNCTION: &str = "main";

/// Whether `entry` becomes the JVM entry point `main(String[])`.
fn is_entry_point(entry: &FuncEntry) -> bool {
    entry.name == MAIN_FUNCTION && entry.params.is_empty()
}

/// Extension trait for class layout and function code generation.
pub trait FunctionEmitter {
    /// The `Class/name$ret<i> descriptor` operand of a result field.
    fn result_field(&self, function: usize, result: usize) -> Result<String, CodegenError>;

    /// The `name(descriptor)V` signature of a function's method.
    fn method_signature(&self, function: usize) -> Result<String, CodegenError>;

    /// Emit the class header and all static fields.
    fn emit_class_header(&mut self) -> Result<(), CodegenError>;

    /// Emit the default constructor.
    fn emit_constructor(&mut self) -> Result<(), CodegenError>;

    /// Emit `<clinit>` running the global statements.
    fn emit_initializer(&mut self, statements: &[&Node]) -> Result<(), CodegenError>;

    /// Emit the method of a `Function` node.
    fn emit_method(&mut self, node: &Node) -> Result<(), CodegenError>;

    /// Emit a call with its arguments.
    fn emit_call(
        &mut self,
        function: usize,
        args: &[Node],
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;

    /// Emit a return statement.
    fn emit_return(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError>;
}

impl<'a, W: Write> FunctionEmitter for CodeGenerator<'a, W> {
    fn result_field(&self, function: usize, result: usize) -> Result<String, CodegenError> {
        let entry = self.function(function)?;
        let ty = entry
            .returns
            .get(result)
            .ok_or(CodegenError::UnresolvedSymbol {
                kind: "result",
                index: result,
            })?;
        Ok(format!(
            "{}/{}$ret{} {}",
            self.options.class_name,
            entry.name,
            result,
            descriptor(*ty)
        ))
    }

    fn method_signature(&self, function: usize) -> Result<String, CodegenError> {
        let entry = self.function(function)?;
        if is_entry_point(entry) {
            return Ok(format!("{}([Ljava/lang/String;)V", MAIN_FUNCTION));
        }
        Ok(format!("{}{}", entry.name, method_descriptor(&entry.params)))
    }

    fn emit_class_header(&mut self) -> Result<(), CodegenError> {
        let class = format!(".class public {}", self.options.class_name);
        self.emit_directive(&class)?;
        self.emit_directive(".super java/lang/Object")?;
        self.emit_blank()?;

        let tables = self.tables;
        for entry in tables.globals.iter() {
            let field = format!(".field public static {} {}", entry.name, var_descriptor(entry));
            self.emit_directive(&field)?;
        }
        for entry in tables.functions.iter() {
            for (i, ty) in entry.returns.iter().enumerate() {
                let field = format!(
                    ".field public static {}$ret{} {}",
                    entry.name,
                    i,
                    descriptor(*ty)
                );
                self.emit_directive(&field)?;
            }
        }
        if !tables.globals.is_empty() || tables.functions.iter().any(|f| !f.returns.is_empty()) {
            self.emit_blank()?;
        }
        Ok(())
    }

    fn emit_constructor(&mut self) -> Result<(), CodegenError> {
        self.emit_directive(".method public <init>()V")?;
        self.emit("aload_0")?;
        self.emit_arg("invokespecial", "java/lang/Object/<init>()V")?;
        self.emit("return")?;
        self.emit_directive(".end method")
    }

    fn emit_initializer(&mut self, statements: &[&Node]) -> Result<(), CodegenError> {
        debug!("Generating <clinit> with {} statement(s)", statements.len());
        let mut ctx = FrameContext::initializer();

        self.emit_blank()?;
        self.emit_directive(".method static <clinit>()V")?;
        self.emit_arg(".limit stack", self.options.stack_limit)?;
        self.emit_arg(".limit locals", 1)?;
        for statement in statements {
            self.emit_statement(statement, &mut ctx)?;
        }
        self.emit("return")?;
        self.emit_directive(".end method")
    }

    fn emit_method(&mut self, node: &Node) -> Result<(), CodegenError> {
        let (NodeKind::Function(index), [body]) = (&node.kind, node.children.as_slice()) else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "function",
            });
        };
        let index = *index;
        let entry = self.function(index)?;
        let mut ctx = FrameContext::function(index, entry.params.len(), is_entry_point(entry));
        let locals = (ctx.frame_base + entry.vars.len()).max(1);

        debug!(
            "Generating method {} ({} parameter(s), {} local slot(s))",
            entry.name,
            ctx.param_count,
            locals
        );

        let signature = self.method_signature(index)?;
        self.emit_blank()?;
        self.emit_directive(&format!(".method public static {}", signature))?;
        self.emit_arg(".limit stack", self.options.stack_limit)?;
        self.emit_arg(".limit locals", locals)?;
        self.emit_block(body, &mut ctx)?;
        if !matches!(body.children.last(), Some(Node { kind: NodeKind::Return, .. })) {
            self.emit("return")?;
        }
        self.emit_directive(".end method")
    }

    fn emit_call(
        &mut self,
        function: usize,
        args: &[Node],
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        let entry = self.function(function)?;
        if is_entry_point(entry) {
            self.emit("aconst_null")?;
        }
        for (arg, param) in args.iter().zip(&entry.params) {
            self.emit_value_as(arg, *param, ctx)?;
        }
        let target = format!("{}/{}", self.options.class_name, self.method_signature(function)?);
        self.emit_arg("invokestatic", target)
    }

    fn emit_return(&mut self, node: &Node, ctx: &mut FrameContext) -> Result<(), CodegenError> {
        let Some(function) = ctx.function else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "initializer",
            });
        };
        let entry = self.function(function)?;

        // Evaluate every value first; a nested call may rewrite the fields.
        for (value, ty) in node.children.iter().zip(&entry.returns) {
            self.emit_value_as(value, *ty, ctx)?;
        }
        for i in (0..node.children.len()).rev() {
            let field = self.result_field(function, i)?;
            self.emit_arg("putstatic", field)?;
        }
        self.emit("return")
    }
}
