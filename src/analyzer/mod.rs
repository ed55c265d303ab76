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

//! Semantic analyzer module for the Golite compiler.
//!
//! This module lowers the parse tree into the typed AST:
//! - Symbol tables (globals, functions, per-function locals)
//! - Name resolution and type checking with int to float widening
//! - Structural checks (arities, array bounds, `main`)
//!
//! Errors are collected rather than returned early, so one run reports as
//! many of them as possible. Code generation must only run on a successful
//! [`Analysis`].
//!
//! # Module Structure
//!
//! - `context` - Current scope and function (AnalysisContext)
//! - `control_flow` - If, for, conditions and blocks (ControlFlowAnalyzer trait)
//! - `expressions` - Expression lowering (ExpressionAnalyzer trait)
//! - `functions` - Signatures, bodies and `main` (FunctionAnalyzer trait)
//! - `statements` - Declarations, assignments, calls, I/O (StatementAnalyzer trait)
//! - `symbol_table` - Variable and function tables
//! - `type_check` - Type rules (TypeChecker trait)

pub mod context;
pub mod control_flow;
pub mod expressions;
pub mod functions;
pub mod statements;
pub mod symbol_table;
pub mod type_check;

pub use symbol_table::{ArrayInfo, FuncEntry, FuncTable, SymbolTables, VarEntry, VarTable};

use log::debug;

use crate::ast::{Node, NodeKind, Scope, Type, VarRef};
use crate::error::{Diagnostics, SemanticError};
use crate::parse_tree::{Ident, SourceFile};
use context::AnalysisContext;
use functions::FunctionAnalyzer;
use statements::StatementAnalyzer;

/// The result of a successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// The `Program` node: global statements, then one `Function` node per
    /// function in declaration order.
    pub program: Node,
    /// The tables the AST's slots and indices refer to.
    pub tables: SymbolTables,
}

/// The semantic analyzer.
pub struct Analyzer {
    /// The symbol tables under construction.
    pub(crate) tables: SymbolTables,
    /// Collected errors.
    diagnostics: Diagnostics,
    /// Analysis context.
    pub(crate) context: AnalysisContext,
}

impl Analyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self {
            tables: SymbolTables::new(),
            diagnostics: Diagnostics::new(),
            context: AnalysisContext::global(),
        }
    }

    /// Analyze a source file.
    ///
    /// Globals are lowered first, then every function signature is
    /// registered, then the bodies are lowered. Signatures are known before
    /// any body, so forward and recursive calls resolve.
    pub fn analyze(mut self, file: &SourceFile) -> Result<Analysis, Diagnostics> {
        let mut statements = Vec::new();
        for decl in file.variables() {
            statements.extend(self.lower_var_decl(decl));
        }
        debug!(
            "lowered {} global statement(s), {} global(s)",
            statements.len(),
            self.tables.globals.len()
        );

        let indices: Vec<Option<usize>> = file
            .functions()
            .map(|func| self.declare_function(func))
            .collect();
        self.check_main(file);

        for (func, index) in file.functions().zip(indices) {
            if let Some(index) = index {
                statements.push(self.lower_function(func, index));
            }
        }

        if self.has_errors() {
            debug!("analysis failed with {} error(s)", self.diagnostics.len());
            return Err(self.diagnostics);
        }

        Ok(Analysis {
            program: Node::statement(NodeKind::Program, statements),
            tables: self.tables,
        })
    }

    /// Record an error.
    pub(crate) fn error(&mut self, error: SemanticError) {
        debug!("{}", error.diagnostic());
        self.diagnostics.push(error);
    }

    /// Check if any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// The errors recorded so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Declare a variable in the current scope.
    pub(crate) fn declare_variable(
        &mut self,
        name: &Ident,
        ty: Type,
        array: Option<ArrayInfo>,
    ) -> Option<VarRef> {
        self.declare_in(self.context.scope, name, ty, array)
    }

    /// Declare a variable in `scope`, recording `DuplicateDeclaration` if
    /// the name is already taken there.
    pub(crate) fn declare_in(
        &mut self,
        scope: Scope,
        name: &Ident,
        ty: Type,
        array: Option<ArrayInfo>,
    ) -> Option<VarRef> {
        let result = self
            .tables
            .table_mut(scope)?
            .add_variable(&name.name, name.line, ty, array);
        match result {
            Ok(slot) => Some(VarRef::new(slot, scope)),
            Err(err) => {
                self.error(err);
                None
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze a source file.
pub fn analyze(file: &SourceFile) -> Result<Analysis, Diagnostics> {
    Analyzer::new().analyze(file)
}
