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

//! Type checking utilities for the semantic analyzer.
//!
//! This module provides type checking functionality:
//! - Resolving source type names
//! - The binary operator rule and int to float widening
//! - The assignment rule shared by every assignment path
//! - Compile-time integer constants (array lengths and indices)

use super::Analyzer;
use crate::ast::{Node, NodeKind, Type};
use crate::error::SemanticError;
use crate::parse_tree::{Expression, Ident, LiteralKind, Primary, Sign};

/// Extension trait for type checking utilities.
pub trait TypeChecker {
    /// Map a type name to a type, recording `UnknownType` on failure.
    fn resolve_type_name(&mut self, name: &Ident) -> Option<Type>;

    /// The result type of `left op right`, recording `TypeMismatch` if the
    /// operand types do not combine under `kind`.
    fn binary_result_type(
        &mut self,
        kind: &NodeKind,
        operator: &str,
        left: &Node,
        right: &Node,
        line: usize,
    ) -> Option<Type>;

    /// Check that `value` may be stored into a `target` and widen it if
    /// needed. Records `TypeMismatch` and returns false otherwise.
    fn check_assignable(&mut self, target: Type, value: &mut Node, operator: &str, line: usize) -> bool;

    /// Reject comparison and logical nodes where a value is required.
    fn check_is_value(&mut self, node: &Node, line: usize) -> bool;
}

impl TypeChecker for Analyzer {
    fn resolve_type_name(&mut self, name: &Ident) -> Option<Type> {
        let ty = Type::from_name(&name.name);
        if ty.is_none() {
            self.error(SemanticError::UnknownType {
                name: name.name.clone(),
                line: name.line,
            });
        }
        ty
    }

    fn binary_result_type(
        &mut self,
        kind: &NodeKind,
        operator: &str,
        left: &Node,
        right: &Node,
        line: usize,
    ) -> Option<Type> {
        let mismatch = SemanticError::TypeMismatch {
            line,
            operator: operator.to_string(),
            left: left.ty,
            right: right.ty,
        };

        if kind.is_logical() {
            if left.is_condition() && right.is_condition() {
                return Some(Type::Bool);
            }
            self.error(mismatch);
            return None;
        }

        let applicable = match Type::unify(left.ty, right.ty) {
            Some(ty) if kind.is_comparison() => ty.is_comparable().then_some(ty),
            Some(Type::String) if *kind == NodeKind::Plus => Some(Type::String),
            Some(ty) if ty.is_numeric() => Some(ty),
            _ => None,
        };
        if applicable.is_none() {
            self.error(mismatch);
        }
        applicable
    }

    fn check_assignable(&mut self, target: Type, value: &mut Node, operator: &str, line: usize) -> bool {
        if !Type::is_assignable(target, value.ty) {
            self.error(SemanticError::TypeMismatch {
                line,
                operator: operator.to_string(),
                left: target,
                right: value.ty,
            });
            return false;
        }
        if target == Type::Float {
            widen(value);
        }
        true
    }

    fn check_is_value(&mut self, node: &Node, line: usize) -> bool {
        if node.is_jump_only() {
            self.error(SemanticError::TypeMismatch {
                line,
                operator: node.kind.name().to_string(),
                left: Type::Bool,
                right: node.ty,
            });
            return false;
        }
        true
    }
}

/// Widen an `int` node to `float`.
///
/// Computed values get their recorded type rewritten. References (variables,
/// array elements and call results) keep `int`; the code generator converts
/// them where a `float` is expected.
pub fn widen(node: &mut Node) {
    if node.ty == Type::Int && !node.is_reference() {
        node.ty = Type::Float;
    }
}

/// Evaluate an integer constant: an optionally signed integer literal,
/// possibly in parentheses.
pub fn constant_int(expr: &Expression) -> Option<i64> {
    match expr {
        Expression::Operand { sign, primary, .. } => {
            let value = match primary {
                Primary::Literal(lit) if lit.kind == LiteralKind::Int => lit.text.parse::<i64>().ok()?,
                Primary::Paren(inner) => constant_int(inner)?,
                _ => return None,
            };
            match sign {
                Some(Sign::Minus) => Some(-value),
                Some(Sign::Plus) | None => Some(value),
            }
        }
        Expression::Binary { .. } => None,
    }
}
