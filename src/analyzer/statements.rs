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

//! Statement lowering for the semantic analyzer.
//!
//! This module provides statement lowering functionality:
//! - Variable declarations (`var`, short `:=`)
//! - Assignments in their three shapes
//! - Call statements and the `read`/`write` builtins
//! - Return statements
//!
//! Every method returns the nodes the statement produces, in execution
//! order. An erroneous construct produces no node.

use log::trace;

use super::control_flow::ControlFlowAnalyzer;
use super::expressions::ExpressionAnalyzer;
use super::symbol_table::ArrayInfo;
use super::type_check::{constant_int, TypeChecker};
use super::Analyzer;
use crate::ast::{Node, NodeKind, Type};
use crate::error::SemanticError;
use crate::parse_tree::{
    AssignTarget, Expression, Ident, Primary, Statement, TypeSpec, VarDecl, VarSpec,
};

/// Extension trait for statement lowering.
pub trait StatementAnalyzer {
    /// Lower a statement.
    fn lower_statement(&mut self, stmt: &Statement) -> Vec<Node>;

    /// Lower a `var` declaration with all of its specs.
    fn lower_var_decl(&mut self, decl: &VarDecl) -> Vec<Node>;

    /// Lower one `names [type] [= values]` spec.
    fn lower_var_spec(&mut self, spec: &VarSpec) -> Vec<Node>;

    /// Declare `names` initialized from `values`, shared by `var` and `:=`.
    fn lower_declaration(
        &mut self,
        names: &[Ident],
        declared: Option<Type>,
        values: &[Expression],
        operator: &str,
        line: usize,
    ) -> Vec<Node>;

    /// Lower `targets = values`.
    fn lower_assignment(&mut self, targets: &[AssignTarget], values: &[Expression], line: usize) -> Vec<Node>;

    /// Lower an assignment target to a variable or array element node.
    fn lower_target(&mut self, target: &AssignTarget) -> Option<Node>;

    /// Lower a call statement, including the `read` and `write` builtins.
    fn lower_call_statement(&mut self, callee: &Ident, args: &[Expression], line: usize) -> Vec<Node>;

    /// Lower `write(value)`.
    fn lower_write(&mut self, args: &[Expression], line: usize) -> Option<Node>;

    /// Lower `read(target)`.
    fn lower_read(&mut self, args: &[Expression], line: usize) -> Option<Node>;

    /// Lower a return statement.
    fn lower_return(&mut self, values: &[Expression], line: usize) -> Option<Node>;
}

impl StatementAnalyzer for Analyzer {
    fn lower_statement(&mut self, stmt: &Statement) -> Vec<Node> {
        match stmt {
            Statement::Var(decl) => self.lower_var_decl(decl),
            Statement::ShortVarDecl {
                names,
                values,
                line,
            } => self.lower_declaration(names, None, values, ":=", *line),
            Statement::Assignment {
                targets,
                values,
                line,
            } => self.lower_assignment(targets, values, *line),
            Statement::If(stmt) => self.lower_if(stmt).into_iter().collect(),
            Statement::For(stmt) => self.lower_for(stmt).into_iter().collect(),
            Statement::Return { values, line } => {
                self.lower_return(values, *line).into_iter().collect()
            }
            Statement::Call { callee, args, line } => self.lower_call_statement(callee, args, *line),
            Statement::Block(block) => vec![self.lower_block(block)],
        }
    }

    fn lower_var_decl(&mut self, decl: &VarDecl) -> Vec<Node> {
        decl.specs
            .iter()
            .flat_map(|spec| self.lower_var_spec(spec))
            .collect()
    }

    fn lower_var_spec(&mut self, spec: &VarSpec) -> Vec<Node> {
        match &spec.ty {
            Some(TypeSpec::Array {
                length,
                element,
                line,
            }) => {
                let element = self.resolve_type_name(element);
                let len = constant_int(length).and_then(|n| usize::try_from(n).ok());
                if len.is_none() {
                    self.error(SemanticError::InvalidArrayLength {
                        name: spec.names.first().map(|n| n.name.clone()).unwrap_or_default(),
                        line: *line,
                    });
                }

                if let Some(value) = spec.values.first() {
                    let value_ty = self.lower_value(value).map_or(Type::NoType, |v| v.ty);
                    self.error(SemanticError::TypeMismatch {
                        line: spec.line,
                        operator: "=".to_string(),
                        left: Type::Array,
                        right: value_ty,
                    });
                    return Vec::new();
                }

                let (Some(element), Some(len)) = (element, len) else {
                    return Vec::new();
                };
                let info = ArrayInfo { element, len };
                spec.names
                    .iter()
                    .filter_map(|name| self.declare_variable(name, Type::Array, Some(info)))
                    .map(|var| Node::leaf(NodeKind::VarDecl(var), Type::Array))
                    .collect()
            }
            Some(TypeSpec::Named(type_name)) => {
                let declared = self.resolve_type_name(type_name);
                if spec.values.is_empty() {
                    let Some(ty) = declared else {
                        return Vec::new();
                    };
                    return spec
                        .names
                        .iter()
                        .filter_map(|name| self.declare_variable(name, ty, None))
                        .map(|var| Node::leaf(NodeKind::VarDecl(var), ty))
                        .collect();
                }
                if declared.is_none() {
                    for value in &spec.values {
                        self.lower_expression(value);
                    }
                    return Vec::new();
                }
                self.lower_declaration(&spec.names, declared, &spec.values, "=", spec.line)
            }
            None => self.lower_declaration(&spec.names, None, &spec.values, "=", spec.line),
        }
    }

    fn lower_declaration(
        &mut self,
        names: &[Ident],
        declared: Option<Type>,
        values: &[Expression],
        operator: &str,
        line: usize,
    ) -> Vec<Node> {
        if let Some((callee, args)) = self.multi_result_call(names.len(), values) {
            let Some((call, returns)) = self.lower_result_call(callee, args, names.len(), line) else {
                return Vec::new();
            };

            let mut targets = Vec::with_capacity(names.len());
            let mut ok = true;
            for (name, result) in names.iter().zip(returns) {
                let ty = declared.unwrap_or(result);
                if !Type::is_assignable(ty, result) {
                    self.error(SemanticError::TypeMismatch {
                        line,
                        operator: operator.to_string(),
                        left: ty,
                        right: result,
                    });
                    ok = false;
                }
                match self.declare_variable(name, ty, None) {
                    Some(var) => targets.push(Node::leaf(NodeKind::VarDecl(var), ty)),
                    None => ok = false,
                }
            }

            if !ok {
                return Vec::new();
            }
            let list = Node::statement(NodeKind::VarList, targets);
            return vec![Node::statement(NodeKind::Assign, vec![list, call])];
        }

        if names.len() != values.len() {
            for value in values {
                self.lower_expression(value);
            }
            self.error(SemanticError::AssignmentArityMismatch {
                line,
                targets: names.len(),
                values: values.len(),
            });
            return Vec::new();
        }

        // Initializers are lowered before any name is declared.
        let lowered: Vec<Option<Node>> = values.iter().map(|v| self.lower_value(v)).collect();

        let mut nodes = Vec::new();
        for (name, value) in names.iter().zip(lowered) {
            let Some(mut value) = value else {
                if let Some(ty) = declared {
                    self.declare_variable(name, ty, None);
                }
                continue;
            };

            let ty = declared.unwrap_or(value.ty);
            if !ty.is_scalar() {
                self.error(SemanticError::TypeMismatch {
                    line,
                    operator: operator.to_string(),
                    left: ty,
                    right: value.ty,
                });
                continue;
            }

            let assignable = self.check_assignable(ty, &mut value, operator, line);
            let Some(var) = self.declare_variable(name, ty, None) else {
                continue;
            };
            if assignable {
                let target = Node::leaf(NodeKind::VarDecl(var), ty);
                nodes.push(Node::statement(NodeKind::Assign, vec![target, value]));
            }
        }
        nodes
    }

    fn lower_assignment(&mut self, targets: &[AssignTarget], values: &[Expression], line: usize) -> Vec<Node> {
        let lowered_targets: Vec<Option<Node>> =
            targets.iter().map(|t| self.lower_target(t)).collect();

        if let Some((callee, args)) = self.multi_result_call(targets.len(), values) {
            let Some((call, returns)) = self.lower_result_call(callee, args, targets.len(), line) else {
                return Vec::new();
            };

            let mut list = Vec::with_capacity(targets.len());
            for (target, result) in lowered_targets.into_iter().zip(returns) {
                let Some(target) = target else {
                    return Vec::new();
                };
                if !Type::is_assignable(target.ty, result) {
                    self.error(SemanticError::TypeMismatch {
                        line,
                        operator: "=".to_string(),
                        left: target.ty,
                        right: result,
                    });
                    return Vec::new();
                }
                list.push(target);
            }

            let list = Node::statement(NodeKind::VarList, list);
            return vec![Node::statement(NodeKind::Assign, vec![list, call])];
        }

        if targets.len() != values.len() {
            for value in values {
                self.lower_expression(value);
            }
            self.error(SemanticError::AssignmentArityMismatch {
                line,
                targets: targets.len(),
                values: values.len(),
            });
            return Vec::new();
        }

        let mut nodes = Vec::new();
        for (target, value) in lowered_targets.into_iter().zip(values) {
            let value = self.lower_value(value);
            let (Some(target), Some(mut value)) = (target, value) else {
                continue;
            };
            if self.check_assignable(target.ty, &mut value, "=", line) {
                nodes.push(Node::statement(NodeKind::Assign, vec![target, value]));
            }
        }
        nodes
    }

    fn lower_target(&mut self, target: &AssignTarget) -> Option<Node> {
        let node = match target {
            AssignTarget::Name(name) => self.lower_variable(name)?,
            AssignTarget::Index { array, index } => self.lower_index(array, index)?,
        };

        if !node.ty.is_scalar() {
            self.error(SemanticError::TypeMismatch {
                line: target.line(),
                operator: "=".to_string(),
                left: node.ty,
                right: node.ty,
            });
            return None;
        }
        Some(node)
    }

    fn lower_call_statement(&mut self, callee: &Ident, args: &[Expression], line: usize) -> Vec<Node> {
        // Declared functions shadow the builtins.
        if self.tables.functions.lookup_function(&callee.name).is_none() {
            match callee.name.as_str() {
                "write" => return self.lower_write(args, line).into_iter().collect(),
                "read" => return self.lower_read(args, line).into_iter().collect(),
                _ => {}
            }
        }
        self.lower_call(callee, args, line).into_iter().collect()
    }

    fn lower_write(&mut self, args: &[Expression], line: usize) -> Option<Node> {
        let [arg] = args else {
            self.error(SemanticError::ArgumentCountMismatch {
                name: "write".to_string(),
                line,
                expected: 1,
                found: args.len(),
            });
            return None;
        };

        let value = self.lower_value(arg)?;
        if !value.ty.is_scalar() {
            self.error(SemanticError::TypeMismatch {
                line,
                operator: "write".to_string(),
                left: value.ty,
                right: value.ty,
            });
            return None;
        }
        Some(Node::statement(NodeKind::Write, vec![value]))
    }

    fn lower_read(&mut self, args: &[Expression], line: usize) -> Option<Node> {
        let [arg] = args else {
            self.error(SemanticError::ArgumentCountMismatch {
                name: "read".to_string(),
                line,
                expected: 1,
                found: args.len(),
            });
            return None;
        };

        let target = match arg {
            Expression::Operand {
                sign: None,
                primary: Primary::Name(name),
                ..
            } => self.lower_target(&AssignTarget::Name(name.clone()))?,
            Expression::Operand {
                sign: None,
                primary: Primary::Index { array, index },
                ..
            } => self.lower_target(&AssignTarget::Index {
                array: array.clone(),
                index: index.clone(),
            })?,
            other => {
                let ty = self.lower_expression(other).map_or(Type::NoType, |n| n.ty);
                self.error(SemanticError::TypeMismatch {
                    line,
                    operator: "read".to_string(),
                    left: Type::NoType,
                    right: ty,
                });
                return None;
            }
        };
        Some(Node::statement(NodeKind::Read, vec![target]))
    }

    fn lower_return(&mut self, values: &[Expression], line: usize) -> Option<Node> {
        let index = self.context.function?;
        let entry = self.tables.functions.get(index)?;
        let (name, returns) = (entry.name.clone(), entry.returns.clone());

        let lowered: Vec<Option<Node>> = values.iter().map(|v| self.lower_value(v)).collect();
        if returns.len() != values.len() {
            self.error(SemanticError::ReturnArityMismatch {
                name,
                line,
                expected: returns.len(),
                found: values.len(),
            });
            return None;
        }

        let mut children = Vec::with_capacity(values.len());
        let mut ok = true;
        for (value, ty) in lowered.into_iter().zip(returns) {
            match value {
                Some(mut value) => {
                    if self.check_assignable(ty, &mut value, "return", line) {
                        children.push(value);
                    } else {
                        ok = false;
                    }
                }
                None => ok = false,
            }
        }

        trace!("lowered return of {} value(s) at line {}", children.len(), line);
        ok.then(|| Node::statement(NodeKind::Return, children))
    }
}

impl Analyzer {
    /// Detect the `N targets = 1 call` shape: a single call value whose
    /// result list must be matched against all targets.
    fn multi_result_call<'e>(
        &self,
        targets: usize,
        values: &'e [Expression],
    ) -> Option<(&'e Ident, &'e [Expression])> {
        let [value] = values else {
            return None;
        };
        let (callee, args) = value.as_call()?;
        if targets > 1 {
            return Some((callee, args));
        }
        let index = self.tables.functions.lookup_function(&callee.name)?;
        let results = self.tables.functions.get(index)?.returns.len();
        (results != 1).then_some((callee, args))
    }

    /// Lower the call of a multi-result assignment and check its result
    /// count against the number of targets.
    fn lower_result_call(
        &mut self,
        callee: &Ident,
        args: &[Expression],
        targets: usize,
        line: usize,
    ) -> Option<(Node, Vec<Type>)> {
        let call = self.lower_call(callee, args, line)?;
        let NodeKind::Call(index) = call.kind else {
            return None;
        };
        let returns = self.tables.functions.get(index)?.returns.clone();

        if returns.len() != targets {
            self.error(SemanticError::AssignmentArityMismatch {
                line,
                targets,
                values: returns.len(),
            });
            return None;
        }
        Some((call, returns))
    }
}
