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

//! Emit helper methods for code generation.
//!
//! This module provides the low-level text emission used by every other
//! part of the generator. It includes:
//! - The assembly sink wrapper (flushed when released)
//! - Instruction, label and directive emission

use std::io::{self, Write};

use super::CodeGenerator;
use crate::error::CodegenError;

/// Line-oriented writer for assembly text.
///
/// The sink is flushed when the writer is dropped, so partial output is
/// never left buffered after a fatal error.
pub struct AsmWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl<W: Write> AsmWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    /// Write one line of text.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        self.lines += 1;
        writeln!(self.inner, "{}", text)
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush the sink.
    pub fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Drop for AsmWriter<W> {
    fn drop(&mut self) {
        let _ = self.inner.flush();
    }
}

/// Extension trait for assembly text emission.
pub trait EmitHelpers {
    /// Emit an instruction without operand.
    fn emit(&mut self, opcode: &str) -> Result<(), CodegenError>;

    /// Emit an instruction with one operand.
    fn emit_arg(&mut self, opcode: &str, operand: impl std::fmt::Display) -> Result<(), CodegenError>;

    /// Emit a label definition.
    fn emit_label(&mut self, label: &str) -> Result<(), CodegenError>;

    /// Emit a directive or other unindented line.
    fn emit_directive(&mut self, text: &str) -> Result<(), CodegenError>;

    /// Emit an empty line.
    fn emit_blank(&mut self) -> Result<(), CodegenError>;
}

impl<'a, W: Write> EmitHelpers for CodeGenerator<'a, W> {
    fn emit(&mut self, opcode: &str) -> Result<(), CodegenError> {
        self.out.line(&format!("\t{}", opcode))?;
        Ok(())
    }

    fn emit_arg(&mut self, opcode: &str, operand: impl std::fmt::Display) -> Result<(), CodegenError> {
        self.out.line(&format!("\t{} {}", opcode, operand))?;
        Ok(())
    }

    fn emit_label(&mut self, label: &str) -> Result<(), CodegenError> {
        self.out.line(&format!("{}:", label))?;
        Ok(())
    }

    fn emit_directive(&mut self, text: &str) -> Result<(), CodegenError> {
        self.out.line(text)?;
        Ok(())
    }

    fn emit_blank(&mut self) -> Result<(), CodegenError> {
        self.out.line("")?;
        Ok(())
    }
}
