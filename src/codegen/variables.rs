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

//! Variable access code generation.
//!
//! Globals live in static fields of the generated class, locals in the
//! method frame. Array variables hold a reference; their elements are
//! addressed with a compile-time offset.

use std::io::Write;

use super::emit::EmitHelpers;
use super::labels::FrameContext;
use super::types::{array_prefix, type_prefix, var_descriptor};
use super::CodeGenerator;
use crate::ast::{Scope, Type, VarRef};
use crate::error::CodegenError;

/// Extension trait for loading and storing variables.
pub trait VariableEmitter {
    /// The `Class/name descriptor` operand of a global's static field.
    fn global_field(&self, var: VarRef) -> Result<String, CodegenError>;

    /// Push the value of a scalar variable, or the reference of an array.
    fn emit_load(&mut self, var: VarRef, ctx: &FrameContext) -> Result<(), CodegenError>;

    /// Pop the top of the stack into a variable.
    fn emit_store(&mut self, var: VarRef, ctx: &FrameContext) -> Result<(), CodegenError>;

    /// Push the array reference and the element offset.
    fn emit_element_address(
        &mut self,
        var: VarRef,
        offset: usize,
        ctx: &FrameContext,
    ) -> Result<(), CodegenError>;

    /// Load an element whose address is on the stack.
    fn emit_element_load(&mut self, element: Type) -> Result<(), CodegenError>;

    /// Store the value on top of an element address into the element.
    fn emit_element_store(&mut self, element: Type) -> Result<(), CodegenError>;
}

impl<'a, W: Write> VariableEmitter for CodeGenerator<'a, W> {
    fn global_field(&self, var: VarRef) -> Result<String, CodegenError> {
        let entry = self.variable(var)?;
        Ok(format!(
            "{}/{} {}",
            self.options.class_name,
            entry.name,
            var_descriptor(entry)
        ))
    }

    fn emit_load(&mut self, var: VarRef, ctx: &FrameContext) -> Result<(), CodegenError> {
        match var.scope {
            Scope::Global => {
                let field = self.global_field(var)?;
                self.emit_arg("getstatic", field)
            }
            Scope::Function(_) => {
                let prefix = type_prefix(self.variable(var)?.ty);
                self.emit_arg(&format!("{}load", prefix), ctx.local(var.slot))
            }
        }
    }

    fn emit_store(&mut self, var: VarRef, ctx: &FrameContext) -> Result<(), CodegenError> {
        match var.scope {
            Scope::Global => {
                let field = self.global_field(var)?;
                self.emit_arg("putstatic", field)
            }
            Scope::Function(_) => {
                let prefix = type_prefix(self.variable(var)?.ty);
                self.emit_arg(&format!("{}store", prefix), ctx.local(var.slot))
            }
        }
    }

    fn emit_element_address(
        &mut self,
        var: VarRef,
        offset: usize,
        ctx: &FrameContext,
    ) -> Result<(), CodegenError> {
        self.emit_load(var, ctx)?;
        self.emit_arg("ldc", offset)
    }

    fn emit_element_load(&mut self, element: Type) -> Result<(), CodegenError> {
        self.emit(&format!("{}aload", array_prefix(element)))
    }

    fn emit_element_store(&mut self, element: Type) -> Result<(), CodegenError> {
        self.emit(&format!("{}astore", array_prefix(element)))
    }
}
