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

//! Graphviz dump of the typed AST.

use std::fmt::Write;

use super::{Node, NodeKind, Type, VarRef};
use crate::analyzer::SymbolTables;

/// Render `root` as a DOT digraph.
///
/// Nodes are numbered in pre-order. Variables and functions are shown by
/// name, resolved through `tables`, followed by `@` and their slot.
pub fn to_dot(root: &Node, tables: &SymbolTables) -> String {
    let mut out = String::from("digraph {\ngraph [ordering=\"out\"];\n");
    let mut next = 0;
    write_node(root, tables, &mut next, &mut out);
    out.push_str("}\n");
    out
}

fn write_node(node: &Node, tables: &SymbolTables, next: &mut usize, out: &mut String) -> usize {
    let id = *next;
    *next += 1;

    let mut label = String::new();
    if node.ty != Type::NoType {
        let _ = write!(label, "({}) ", node.ty);
    }
    label.push_str(&node_label(node, tables));

    let _ = writeln!(out, "node{}[label=\"{}\"];", id, escape(&label));
    for child in &node.children {
        let child_id = write_node(child, tables, next, out);
        let _ = writeln!(out, "node{} -> node{};", id, child_id);
    }
    id
}

fn var_name(tables: &SymbolTables, var: VarRef) -> &str {
    tables.variable(var).map_or("?", |entry| entry.name.as_str())
}

fn node_label(node: &Node, tables: &SymbolTables) -> String {
    match &node.kind {
        NodeKind::VarDecl(var) | NodeKind::VarUse(var) => {
            format!("{}@{}", var_name(tables, *var), var.slot)
        }
        NodeKind::ArrayUse { var, offset } => {
            format!("{}[{}]@{}", var_name(tables, *var), offset, var.slot)
        }
        NodeKind::Function(index) | NodeKind::Call(index) => {
            let name = tables
                .functions
                .get(*index)
                .map_or("?", |entry| entry.name.as_str());
            format!("{}@{}", name, index)
        }
        NodeKind::IntVal(value) => value.to_string(),
        NodeKind::FloatVal(value) => format!("{:.2}", value),
        NodeKind::BoolVal(value) => value.to_string(),
        NodeKind::StrVal(value) => value.clone(),
        other => other.name().to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
