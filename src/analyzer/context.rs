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

//! Analysis context for the semantic analyzer.
//!
//! This module defines the context used while lowering: which variable
//! table new declarations go into and which function body is being lowered.

use crate::ast::Scope;

/// Context for semantic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisContext {
    /// The table new variables are declared in.
    pub scope: Scope,
    /// The function whose body is being lowered, if any.
    pub function: Option<usize>,
}

impl AnalysisContext {
    /// Context for global declarations.
    pub fn global() -> Self {
        Self {
            scope: Scope::Global,
            function: None,
        }
    }

    /// Context for the body of function `index`.
    pub fn function(index: usize) -> Self {
        Self {
            scope: Scope::Function(index),
            function: Some(index),
        }
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::global()
    }
}
