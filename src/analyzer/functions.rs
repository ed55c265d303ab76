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

//! Function lowering for the semantic analyzer.
//!
//! This module provides function-related analysis:
//! - Signature registration (before any body is lowered)
//! - Function body lowering in the function's own scope
//! - The `main` entry point check

use log::debug;

use super::context::AnalysisContext;
use super::control_flow::ControlFlowAnalyzer;
use super::type_check::TypeChecker;
use super::Analyzer;
use crate::ast::{Node, NodeKind, Scope};
use crate::error::SemanticError;
use crate::parse_tree::{FuncDecl, SourceFile};

/// Extension trait for function analysis.
pub trait FunctionAnalyzer {
    /// Register a function's signature and parameters.
    ///
    /// Parameters become the first entries of the function's variable
    /// table. Returns the function table index.
    fn declare_function(&mut self, func: &FuncDecl) -> Option<usize>;

    /// Lower the body of a declared function to `Function[body]`.
    fn lower_function(&mut self, func: &FuncDecl, index: usize) -> Node;

    /// Check that a parameterless `main` exists.
    fn check_main(&mut self, file: &SourceFile);
}

impl FunctionAnalyzer for Analyzer {
    fn declare_function(&mut self, func: &FuncDecl) -> Option<usize> {
        let mut resolved = true;

        let mut params = Vec::new();
        for group in &func.params {
            match self.resolve_type_name(&group.ty) {
                Some(ty) => params.extend(group.names.iter().map(|name| (name, ty))),
                None => resolved = false,
            }
        }

        let mut returns = Vec::with_capacity(func.results.len());
        for result in &func.results {
            match self.resolve_type_name(result) {
                Some(ty) => returns.push(ty),
                None => resolved = false,
            }
        }

        if !resolved {
            return None;
        }

        let param_types = params.iter().map(|(_, ty)| *ty).collect();
        let index = match self.tables.functions.add_function(
            &func.name.name,
            func.line,
            param_types,
            returns,
        ) {
            Ok(index) => index,
            Err(err) => {
                self.error(err);
                return None;
            }
        };

        for (name, ty) in params {
            self.declare_in(Scope::Function(index), name, ty, None);
        }

        debug!(
            "declared function '{}' as #{} with {} parameter(s)",
            func.name.name,
            index,
            func.params.iter().map(|g| g.names.len()).sum::<usize>()
        );
        Some(index)
    }

    fn lower_function(&mut self, func: &FuncDecl, index: usize) -> Node {
        let previous = std::mem::replace(&mut self.context, AnalysisContext::function(index));
        let body = self.lower_block(&func.body);
        self.context = previous;

        debug!("lowered body of '{}' ({} nodes)", func.name.name, body.size());
        Node::statement(NodeKind::Function(index), vec![body])
    }

    fn check_main(&mut self, file: &SourceFile) {
        let Some(index) = self.tables.functions.lookup_function("main") else {
            self.error(SemanticError::UndeclaredFunction {
                name: "main".to_string(),
                line: file.last_line(),
            });
            return;
        };

        let Some(main) = self.tables.functions.get(index) else {
            return;
        };
        if !main.params.is_empty() {
            let error = SemanticError::ArgumentCountMismatch {
                name: "main".to_string(),
                line: main.line,
                expected: 0,
                found: main.params.len(),
            };
            self.error(error);
        }
    }
}
