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

//! Condition code generation.
//!
//! Conditions never produce a boolean on the stack. They are compiled into
//! branches towards a label given by a [`Jump`], and `&&`/`||` are
//! short-circuited through that jump context.

use std::io::Write;

use super::emit::EmitHelpers;
use super::expressions::ExpressionEmitter;
use super::labels::{FrameContext, Jump};
use super::CodeGenerator;
use crate::ast::{Node, NodeKind, Type};
use crate::error::CodegenError;

/// The branch condition suffix of a comparison, optionally negated.
pub fn condition_code(kind: &NodeKind, negate: bool) -> Option<&'static str> {
    let code = match (kind, negate) {
        (NodeKind::Eq, false) | (NodeKind::Neq, true) => "eq",
        (NodeKind::Neq, false) | (NodeKind::Eq, true) => "ne",
        (NodeKind::Lt, false) | (NodeKind::Ge, true) => "lt",
        (NodeKind::Ge, false) | (NodeKind::Lt, true) => "ge",
        (NodeKind::Gt, false) | (NodeKind::Le, true) => "gt",
        (NodeKind::Le, false) | (NodeKind::Gt, true) => "le",
        _ => return None,
    };
    Some(code)
}

/// Extension trait for condition code generation.
pub trait ConditionEmitter {
    /// Emit a condition that branches according to `jump`.
    fn emit_condition(
        &mut self,
        node: &Node,
        jump: Jump<'_>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;

    /// Emit a comparison followed by a single branch.
    fn emit_comparison(
        &mut self,
        node: &Node,
        jump: Jump<'_>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;

    /// Emit a short-circuit `&&` or `||`.
    fn emit_logical(
        &mut self,
        node: &Node,
        jump: Jump<'_>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError>;
}

impl<'a, W: Write> ConditionEmitter for CodeGenerator<'a, W> {
    fn emit_condition(
        &mut self,
        node: &Node,
        jump: Jump<'_>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        match &node.kind {
            NodeKind::Eq
            | NodeKind::Neq
            | NodeKind::Lt
            | NodeKind::Gt
            | NodeKind::Le
            | NodeKind::Ge => self.emit_comparison(node, jump, ctx),
            NodeKind::And | NodeKind::Or => self.emit_logical(node, jump, ctx),
            NodeKind::BoolVal(_)
            | NodeKind::VarUse(_)
            | NodeKind::ArrayUse { .. }
            | NodeKind::Call(_)
                if node.ty == Type::Bool =>
            {
                self.emit_value(node, ctx)?;
                match jump {
                    Jump::IfFalse(label) => self.emit_arg("ifeq", label),
                    Jump::IfTrue(label) => self.emit_arg("ifne", label),
                }
            }
            NodeKind::BoolVal(_)
            | NodeKind::VarUse(_)
            | NodeKind::ArrayUse { .. }
            | NodeKind::Call(_)
            | NodeKind::IntVal(_)
            | NodeKind::FloatVal(_)
            | NodeKind::StrVal(_)
            | NodeKind::Plus
            | NodeKind::Minus
            | NodeKind::Times
            | NodeKind::Over
            | NodeKind::Mod
            | NodeKind::Assign
            | NodeKind::Block
            | NodeKind::If
            | NodeKind::Repeat
            | NodeKind::VarDecl(_)
            | NodeKind::Function(_)
            | NodeKind::Program
            | NodeKind::Read
            | NodeKind::Write
            | NodeKind::VarList
            | NodeKind::Return => Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "condition",
            }),
        }
    }

    fn emit_comparison(
        &mut self,
        node: &Node,
        jump: Jump<'_>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        let invalid = || CodegenError::InvalidNodeKind {
            kind: node.kind.name(),
            context: "comparison",
        };
        let [left, right] = node.children.as_slice() else {
            return Err(invalid());
        };
        let negate = matches!(jump, Jump::IfFalse(_));
        let cc = condition_code(&node.kind, negate).ok_or_else(invalid)?;

        self.emit_value_as(left, node.ty, ctx)?;
        self.emit_value_as(right, node.ty, ctx)?;

        match node.ty {
            Type::Int | Type::Bool => self.emit_arg(&format!("if_icmp{}", cc), jump.label()),
            Type::Float => {
                // fcmpg makes NaN compare greater, so `<` and `<=` are false for it.
                let compare = match node.kind {
                    NodeKind::Lt | NodeKind::Le => "fcmpg",
                    _ => "fcmpl",
                };
                self.emit(compare)?;
                self.emit_arg(&format!("if{}", cc), jump.label())
            }
            Type::String => {
                self.emit_arg(
                    "invokevirtual",
                    "java/lang/String/compareTo(Ljava/lang/String;)I",
                )?;
                self.emit_arg(&format!("if{}", cc), jump.label())
            }
            Type::Array | Type::Null | Type::NoType => Err(invalid()),
        }
    }

    fn emit_logical(
        &mut self,
        node: &Node,
        jump: Jump<'_>,
        ctx: &mut FrameContext,
    ) -> Result<(), CodegenError> {
        let [left, right] = node.children.as_slice() else {
            return Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "logical operator",
            });
        };

        match (&node.kind, jump) {
            (NodeKind::And, Jump::IfFalse(_)) | (NodeKind::Or, Jump::IfTrue(_)) => {
                self.emit_condition(left, jump, ctx)?;
                self.emit_condition(right, jump, ctx)
            }
            (NodeKind::And, Jump::IfTrue(target)) => {
                let skip = ctx.labels.next_join();
                self.emit_condition(left, Jump::IfFalse(skip.as_str()), ctx)?;
                self.emit_condition(right, Jump::IfTrue(target), ctx)?;
                self.emit_label(&skip)
            }
            (NodeKind::Or, Jump::IfFalse(target)) => {
                let join = ctx.labels.next_join();
                self.emit_condition(left, Jump::IfTrue(join.as_str()), ctx)?;
                self.emit_condition(right, Jump::IfFalse(target), ctx)?;
                self.emit_label(&join)
            }
            _ => Err(CodegenError::InvalidNodeKind {
                kind: node.kind.name(),
                context: "logical operator",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::SymbolTables;
    use crate::codegen::CodegenOptions;
    use pretty_assertions::assert_eq;

    fn int(value: i32) -> Node {
        Node::leaf(NodeKind::IntVal(value), Type::Int)
    }

    fn less(a: i32, b: i32) -> Node {
        Node::new(NodeKind::Lt, Type::Int, vec![int(a), int(b)])
    }

    fn emit(node: &Node, jump: Jump<'_>) -> String {
        let tables = SymbolTables::new();
        let options = CodegenOptions::default();
        let mut buffer = Vec::new();
        {
            let mut generator = CodeGenerator::new(&mut buffer, &tables, &options);
            let mut ctx = FrameContext::initializer();
            generator.emit_condition(node, jump, &mut ctx).unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    // ========================================
    // Comparison Tests
    // ========================================

    #[test]
    fn test_condition_codes() {
        assert_eq!(condition_code(&NodeKind::Lt, false), Some("lt"));
        assert_eq!(condition_code(&NodeKind::Lt, true), Some("ge"));
        assert_eq!(condition_code(&NodeKind::Eq, true), Some("ne"));
        assert_eq!(condition_code(&NodeKind::Le, true), Some("gt"));
        assert_eq!(condition_code(&NodeKind::Plus, false), None);
    }

    #[test]
    fn test_comparison_if_false_negates() {
        assert_eq!(
            emit(&less(1, 2), Jump::IfFalse("endif_0")),
            "\tldc 1\n\tldc 2\n\tif_icmpge endif_0\n"
        );
        assert_eq!(
            emit(&less(1, 2), Jump::IfTrue("t")),
            "\tldc 1\n\tldc 2\n\tif_icmplt t\n"
        );
    }

    #[test]
    fn test_float_comparison() {
        let a = Node::leaf(NodeKind::FloatVal(1.5), Type::Float);
        let b = Node::leaf(NodeKind::FloatVal(2.0), Type::Float);
        let lt = Node::new(NodeKind::Lt, Type::Float, vec![a.clone(), b.clone()]);
        let eq = Node::new(NodeKind::Eq, Type::Float, vec![a, b]);
        assert!(emit(&lt, Jump::IfFalse("x")).ends_with("\tfcmpg\n\tifge x\n"));
        assert!(emit(&eq, Jump::IfFalse("x")).ends_with("\tfcmpl\n\tifne x\n"));
    }

    #[test]
    fn test_bool_value_condition() {
        let flag = Node::leaf(NodeKind::BoolVal(false), Type::Bool);
        assert_eq!(emit(&flag, Jump::IfFalse("e")), "\ticonst_0\n\tifeq e\n");
        assert_eq!(emit(&flag, Jump::IfTrue("e")), "\ticonst_0\n\tifne e\n");
    }

    // ========================================
    // Short-Circuit Tests
    // ========================================

    #[test]
    fn test_and_if_false_shares_target() {
        let node = Node::new(NodeKind::And, Type::Bool, vec![less(1, 2), less(3, 4)]);
        assert_eq!(
            emit(&node, Jump::IfFalse("end")),
            "\tldc 1\n\tldc 2\n\tif_icmpge end\n\tldc 3\n\tldc 4\n\tif_icmpge end\n"
        );
    }

    #[test]
    fn test_or_if_false_uses_join_label() {
        let node = Node::new(NodeKind::Or, Type::Bool, vec![less(1, 2), less(3, 4)]);
        assert_eq!(
            emit(&node, Jump::IfFalse("end")),
            "\tldc 1\n\tldc 2\n\tif_icmplt sc_0\n\tldc 3\n\tldc 4\n\tif_icmpge end\nsc_0:\n"
        );
    }

    #[test]
    fn test_and_if_true_uses_skip_label() {
        let node = Node::new(NodeKind::And, Type::Bool, vec![less(1, 2), less(3, 4)]);
        assert_eq!(
            emit(&node, Jump::IfTrue("yes")),
            "\tldc 1\n\tldc 2\n\tif_icmpge sc_0\n\tldc 3\n\tldc 4\n\tif_icmplt yes\nsc_0:\n"
        );
    }

    #[test]
    fn test_int_value_is_not_a_condition() {
        let tables = SymbolTables::new();
        let options = CodegenOptions::default();
        let mut generator = CodeGenerator::new(Vec::new(), &tables, &options);
        let err = generator
            .emit_condition(&int(1), Jump::IfFalse("x"), &mut FrameContext::initializer())
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::InvalidNodeKind {
                context: "condition",
                ..
            }
        ));
    }
}
