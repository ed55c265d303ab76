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

//! Code generation module for the Golite compiler.
//!
//! This module lowers the analyzed AST into Jasmin assembly text for the
//! JVM. The whole program becomes one class:
//! - Globals and function results are static fields
//! - Global statements run in the static initializer
//! - Every function is a static method with its own frame
//!
//! # Module Structure
//!
//! - `assignments` - Assignments and default initialization (AssignmentEmitter trait)
//! - `comparisons` - Jump code for conditions (ConditionEmitter trait)
//! - `control_flow` - Statements, if and loops (ControlFlowEmitter trait)
//! - `emit` - Text emission (EmitHelpers trait, AsmWriter)
//! - `expressions` - Value code (ExpressionEmitter trait)
//! - `functions` - Class layout, methods, calls (FunctionEmitter trait)
//! - `io` - Console read/write (IoEmitter trait)
//! - `labels` - Label counters and the per-method frame context
//! - `types` - JVM descriptors and typed instruction prefixes
//! - `variables` - Loads and stores (VariableEmitter trait)

pub mod assignments;
pub mod comparisons;
pub mod control_flow;
pub mod emit;
pub mod expressions;
pub mod functions;
pub mod io;
pub mod labels;
pub mod types;
pub mod variables;

use std::io::Write;

use log::debug;

pub use emit::AsmWriter;
pub use labels::{FrameContext, Jump, LabelCounters};

use crate::analyzer::{FuncEntry, SymbolTables, VarEntry};
use crate::ast::{Node, NodeKind, VarRef};
use crate::error::CodegenError;
use functions::FunctionEmitter;

/// Default name of the generated class.
pub const DEFAULT_CLASS_NAME: &str = "GoProgram";

/// Default `.limit stack` of every method.
pub const DEFAULT_STACK_LIMIT: usize = 32;

/// Settings of one code generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Name of the generated class.
    pub class_name: String,
    /// Operand stack limit declared for every method.
    pub stack_limit: usize,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            stack_limit: DEFAULT_STACK_LIMIT,
        }
    }
}

/// The Jasmin code generator.
pub struct CodeGenerator<'a, W: Write> {
    /// The assembly sink.
    pub(crate) out: AsmWriter<W>,
    /// Tables built by the analyzer.
    pub(crate) tables: &'a SymbolTables,
    pub(crate) options: &'a CodegenOptions,
}

impl<'a, W: Write> CodeGenerator<'a, W> {
    /// Create a new code generator writing into `sink`.
    pub fn new(sink: W, tables: &'a SymbolTables, options: &'a CodegenOptions) -> Self {
        Self {
            out: AsmWriter::new(sink),
            tables,
            options,
        }
    }

    /// The table entry of a variable reference.
    pub(crate) fn variable(&self, var: VarRef) -> Result<&'a VarEntry, CodegenError> {
        let tables: &'a SymbolTables = self.tables;
        tables
            .variable(var)
            .ok_or(CodegenError::UnresolvedSymbol {
                kind: "variable",
                index: var.slot,
            })
    }

    /// The table entry of a function.
    pub(crate) fn function(&self, index: usize) -> Result<&'a FuncEntry, CodegenError> {
        let tables: &'a SymbolTables = self.tables;
        tables
            .functions
            .get(index)
            .ok_or(CodegenError::UnresolvedSymbol {
                kind: "function",
                index,
            })
    }

    /// Generate the class for a `Program` node.
    pub fn generate(&mut self, program: &Node) -> Result<(), CodegenError> {
        if !matches!(program.kind, NodeKind::Program) {
            return Err(CodegenError::InvalidNodeKind {
                kind: program.kind.name(),
                context: "program",
            });
        }

        let (functions, globals): (Vec<&Node>, Vec<&Node>) = program
            .children
            .iter()
            .partition(|node| matches!(node.kind, NodeKind::Function(_)));

        debug!(
            "Generating class {} with {} global statement(s) and {} method(s)",
            self.options.class_name,
            globals.len(),
            functions.len()
        );

        self.emit_class_header()?;
        self.emit_constructor()?;
        if !globals.is_empty() {
            self.emit_initializer(&globals)?;
        }
        for function in functions {
            self.emit_method(function)?;
        }

        self.out.finish()?;
        debug!("Wrote {} line(s) of assembly", self.out.lines());
        Ok(())
    }
}

/// Generate assembly for an analyzed program into `sink`.
pub fn generate<W: Write>(
    program: &Node,
    tables: &SymbolTables,
    options: &CodegenOptions,
    sink: W,
) -> Result<(), CodegenError> {
    let mut generator = CodeGenerator::new(sink, tables, options);
    generator.generate(program)
}

/// Generate assembly for an analyzed program into a string.
pub fn generate_to_string(
    program: &Node,
    tables: &SymbolTables,
    options: &CodegenOptions,
) -> Result<String, CodegenError> {
    let mut buffer = Vec::new();
    generate(program, tables, options, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::ast::Type;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn compile_with(source: &str, options: &CodegenOptions) -> String {
        let _ = env_logger::builder().is_test(true).try_init();
        let file = parse_source(source).expect("parse failed");
        let analysis = analyze(&file).expect("analysis failed");
        generate_to_string(&analysis.program, &analysis.tables, options).expect("codegen failed")
    }

    fn compile(source: &str) -> String {
        compile_with(source, &CodegenOptions::default())
    }

    // ========================================
    // Class Layout Tests
    // ========================================

    #[test]
    fn test_minimal_program() {
        assert_eq!(
            compile("func main() {\n}\n"),
            ".class public GoProgram\n\
             .super java/lang/Object\n\
             \n\
             .method public <init>()V\n\
             \taload_0\n\
             \tinvokespecial java/lang/Object/<init>()V\n\
             \treturn\n\
             .end method\n\
             \n\
             .method public static main([Ljava/lang/String;)V\n\
             \t.limit stack 32\n\
             \t.limit locals 1\n\
             \treturn\n\
             .end method\n"
        );
    }

    #[test]
    fn test_options_are_applied() {
        let options = CodegenOptions {
            class_name: "Demo".to_string(),
            stack_limit: 8,
        };
        let asm = compile_with("var g int\nfunc main() {\n  g = 1\n}\n", &options);
        assert!(asm.starts_with(".class public Demo\n"));
        assert!(asm.contains("\t.limit stack 8\n"));
        assert!(asm.contains("\tputstatic Demo/g I\n"));
    }

    #[test]
    fn test_globals_run_in_static_initializer() {
        let asm = compile("var g int = 5\nfunc main() {\n  write(g)\n}\n");
        assert!(asm.contains(".field public static g I\n"));
        assert!(asm.contains(
            ".method static <clinit>()V\n\
             \t.limit stack 32\n\
             \t.limit locals 1\n\
             \tldc 5\n\
             \tputstatic GoProgram/g I\n\
             \treturn\n\
             .end method\n"
        ));
        assert!(asm.contains("\tgetstatic GoProgram/g I\n\tinvokevirtual java/io/PrintStream/println(I)V\n"));
    }

    #[test]
    fn test_main_locals_start_after_args() {
        let asm = compile("func main() {\n  x := 1\n  y := x\n}\n");
        assert!(asm.contains("\t.limit locals 3\n"));
        assert!(asm.contains("\tldc 1\n\tistore 1\n\tiload 1\n\tistore 2\n"));
    }

    #[test]
    fn test_function_params_use_first_slots() {
        let source = "func add(a, b int) int {\n  return a + b\n}\nfunc main() {\n  write(add(1, 2))\n}\n";
        let asm = compile(source);
        assert!(asm.contains(".method public static add(II)V\n"));
        assert!(asm.contains("\tiload 0\n\tiload 1\n\tiadd\n\tputstatic GoProgram/add$ret0 I\n"));
        assert!(asm.contains(
            "\tinvokestatic GoProgram/add(II)V\n\tgetstatic GoProgram/add$ret0 I\n"
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let source = "var a [3]int\nfunc main() {\n  if a[0] < 1 || a[1] > 2 {\n    a[2] = 3\n  }\n}\n";
        assert_eq!(compile(source), compile(source));
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_root_must_be_program() {
        let tables = SymbolTables::new();
        let node = Node::leaf(NodeKind::IntVal(1), Type::Int);
        let err = generate_to_string(&node, &tables, &CodegenOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::InvalidNodeKind {
                context: "program",
                ..
            }
        ));
    }
}
