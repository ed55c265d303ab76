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

//! Expression lowering for the semantic analyzer.
//!
//! This module lowers parse tree expressions into typed AST nodes:
//! - Binary operators with widening and type checks
//! - Signed operands and literal folding
//! - Variable references, array elements and calls

use log::trace;

use super::type_check::{constant_int, widen, TypeChecker};
use super::Analyzer;
use crate::ast::{Node, NodeKind, Type};
use crate::error::SemanticError;
use crate::parse_tree::{BasicLit, Expression, Ident, LiteralKind, Operator, Primary, Sign};

/// Extension trait for expression lowering.
pub trait ExpressionAnalyzer {
    /// Lower an expression. Comparison and logical nodes are allowed.
    fn lower_expression(&mut self, expr: &Expression) -> Option<Node>;

    /// Lower an expression that must produce a value.
    fn lower_value(&mut self, expr: &Expression) -> Option<Node>;

    /// Lower a binary operation.
    fn lower_binary(&mut self, op: &Operator, left: &Expression, right: &Expression) -> Option<Node>;

    /// Lower an optionally signed operand.
    fn lower_operand(&mut self, sign: Option<Sign>, primary: &Primary, line: usize) -> Option<Node>;

    /// Lower a literal, folding a leading minus into its value.
    fn lower_literal(&mut self, lit: &BasicLit, negate: bool) -> Option<Node>;

    /// Lower a variable reference.
    fn lower_variable(&mut self, name: &Ident) -> Option<Node>;

    /// Lower an array element access with a constant index.
    fn lower_index(&mut self, array: &Ident, index: &Expression) -> Option<Node>;

    /// Lower a call to a declared function. The node has the type of the
    /// single result, `no_type` otherwise.
    fn lower_call(&mut self, callee: &Ident, args: &[Expression], line: usize) -> Option<Node>;
}

impl ExpressionAnalyzer for Analyzer {
    fn lower_expression(&mut self, expr: &Expression) -> Option<Node> {
        match expr {
            Expression::Binary { op, left, right } => self.lower_binary(op, left, right),
            Expression::Operand { sign, primary, line } => self.lower_operand(*sign, primary, *line),
        }
    }

    fn lower_value(&mut self, expr: &Expression) -> Option<Node> {
        let node = self.lower_expression(expr)?;
        self.check_is_value(&node, expr.line()).then_some(node)
    }

    fn lower_binary(&mut self, op: &Operator, left: &Expression, right: &Expression) -> Option<Node> {
        let kind = NodeKind::from_operator(&op.text)?;

        let (left, right) = if kind.is_logical() {
            (self.lower_expression(left), self.lower_expression(right))
        } else {
            (self.lower_value(left), self.lower_value(right))
        };
        let (mut left, mut right) = (left?, right?);

        let ty = self.binary_result_type(&kind, &op.text, &left, &right, op.line)?;
        if Type::unify(left.ty, right.ty) == Some(Type::Float) && !kind.is_logical() {
            widen(&mut left);
            widen(&mut right);
        }

        trace!("lowered '{}' at line {} as {}", op.text, op.line, ty);
        Some(Node::new(kind, ty, vec![left, right]))
    }

    fn lower_operand(&mut self, sign: Option<Sign>, primary: &Primary, line: usize) -> Option<Node> {
        if let (Some(Sign::Minus), Primary::Literal(lit)) = (sign, primary) {
            if matches!(lit.kind, LiteralKind::Int | LiteralKind::Float) {
                return self.lower_literal(lit, true);
            }
        }

        let node = match primary {
            Primary::Literal(lit) => self.lower_literal(lit, false)?,
            Primary::Name(name) => self.lower_variable(name)?,
            Primary::Call { callee, args } => {
                let call = self.lower_call(callee, args, line)?;
                if call.ty == Type::NoType {
                    self.error(SemanticError::NotAValue {
                        name: callee.name.clone(),
                        line,
                    });
                    return None;
                }
                call
            }
            Primary::Index { array, index } => self.lower_index(array, index)?,
            Primary::Paren(inner) => self.lower_expression(inner)?,
        };

        let Some(sign) = sign else {
            return Some(node);
        };

        if !self.check_is_value(&node, line) {
            return None;
        }
        if !node.ty.is_numeric() {
            self.error(SemanticError::TypeMismatch {
                line,
                operator: sign.as_str().to_string(),
                left: node.ty,
                right: node.ty,
            });
            return None;
        }

        match sign {
            Sign::Plus => Some(node),
            Sign::Minus => {
                let zero = match node.ty {
                    Type::Float => Node::leaf(NodeKind::FloatVal(0.0), Type::Float),
                    _ => Node::leaf(NodeKind::IntVal(0), Type::Int),
                };
                Some(Node::new(NodeKind::Minus, node.ty, vec![zero, node]))
            }
        }
    }

    fn lower_literal(&mut self, lit: &BasicLit, negate: bool) -> Option<Node> {
        let invalid = |lit: &BasicLit| SemanticError::InvalidLiteral {
            text: lit.text.clone(),
            line: lit.line,
        };

        let node = match lit.kind {
            LiteralKind::Int => {
                let value = lit
                    .text
                    .parse::<i64>()
                    .ok()
                    .map(|v| if negate { -v } else { v })
                    .and_then(|v| i32::try_from(v).ok());
                match value {
                    Some(v) => Node::leaf(NodeKind::IntVal(v), Type::Int),
                    None => {
                        self.error(invalid(lit));
                        return None;
                    }
                }
            }
            LiteralKind::Float => match lit.text.parse::<f32>() {
                Ok(v) if v.is_finite() => {
                    let v = if negate { -v } else { v };
                    Node::leaf(NodeKind::FloatVal(v), Type::Float)
                }
                _ => {
                    self.error(invalid(lit));
                    return None;
                }
            },
            LiteralKind::String => Node::leaf(NodeKind::StrVal(lit.text.clone()), Type::String),
            LiteralKind::Bool => Node::leaf(NodeKind::BoolVal(lit.text == "true"), Type::Bool),
        };
        Some(node)
    }

    fn lower_variable(&mut self, name: &Ident) -> Option<Node> {
        let Some(var) = self.tables.resolve_variable(&name.name, self.context.scope) else {
            self.error(SemanticError::UndeclaredVariable {
                name: name.name.clone(),
                line: name.line,
            });
            return None;
        };
        let ty = self.tables.variable(var)?.ty;
        Some(Node::leaf(NodeKind::VarUse(var), ty))
    }

    fn lower_index(&mut self, array: &Ident, index: &Expression) -> Option<Node> {
        let Some(var) = self.tables.resolve_variable(&array.name, self.context.scope) else {
            self.error(SemanticError::UndeclaredVariable {
                name: array.name.clone(),
                line: array.line,
            });
            return None;
        };
        let entry = self.tables.variable(var)?;
        let (entry_ty, info) = (entry.ty, entry.array);

        let Some(info) = info else {
            self.error(SemanticError::TypeMismatch {
                line: array.line,
                operator: "[]".to_string(),
                left: entry_ty,
                right: Type::Int,
            });
            return None;
        };

        let Some(offset) = constant_int(index) else {
            self.error(SemanticError::NonConstantIndex {
                name: array.name.clone(),
                line: array.line,
            });
            return None;
        };

        if offset < 0 || offset as usize >= info.len {
            self.error(SemanticError::ArrayIndexOutOfRange {
                name: array.name.clone(),
                line: array.line,
                index: offset,
                bound: info.len,
            });
            return None;
        }

        Some(Node::leaf(
            NodeKind::ArrayUse {
                var,
                offset: offset as usize,
            },
            info.element,
        ))
    }

    fn lower_call(&mut self, callee: &Ident, args: &[Expression], line: usize) -> Option<Node> {
        let lowered: Vec<Option<Node>> = args.iter().map(|arg| self.lower_value(arg)).collect();

        let Some(index) = self.tables.functions.lookup_function(&callee.name) else {
            self.error(SemanticError::UndeclaredFunction {
                name: callee.name.clone(),
                line,
            });
            return None;
        };
        let entry = self.tables.functions.get(index)?;
        let (params, value_type) = (entry.params.clone(), entry.value_type());

        if params.len() != args.len() {
            self.error(SemanticError::ArgumentCountMismatch {
                name: callee.name.clone(),
                line,
                expected: params.len(),
                found: args.len(),
            });
            return None;
        }

        let mut children = Vec::with_capacity(args.len());
        let mut ok = true;
        for (position, (arg, expected)) in lowered.into_iter().zip(params).enumerate() {
            let Some(arg) = arg else {
                ok = false;
                continue;
            };
            if arg.ty != expected {
                self.error(SemanticError::ArgumentTypeMismatch {
                    name: callee.name.clone(),
                    line,
                    position: position + 1,
                    expected,
                    actual: arg.ty,
                });
                ok = false;
                continue;
            }
            children.push(arg);
        }

        ok.then(|| Node::new(NodeKind::Call(index), value_type, children))
    }
}
