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

//! JVM type descriptors and instruction selection by type.

use crate::analyzer::VarEntry;
use crate::ast::Type;

/// The field descriptor of a scalar type.
pub fn descriptor(ty: Type) -> &'static str {
    match ty {
        Type::Bool => "Z",
        Type::Int => "I",
        Type::Float => "F",
        Type::String => "Ljava/lang/String;",
        Type::Array | Type::Null => "Ljava/lang/Object;",
        Type::NoType => "V",
    }
}

/// The field descriptor of a variable, including array variables.
pub fn var_descriptor(entry: &VarEntry) -> String {
    match entry.array {
        Some(info) => format!("[{}", descriptor(info.element)),
        None => descriptor(entry.ty).to_string(),
    }
}

/// The descriptor of a static method taking `params` and returning nothing.
pub fn method_descriptor(params: &[Type]) -> String {
    let params: String = params.iter().map(|ty| descriptor(*ty)).collect();
    format!("({})V", params)
}

/// Instruction prefix for loads, stores and arithmetic of a type.
pub fn type_prefix(ty: Type) -> &'static str {
    match ty {
        Type::Bool | Type::Int => "i",
        Type::Float => "f",
        Type::String | Type::Array | Type::Null | Type::NoType => "a",
    }
}

/// Prefix of the array element load/store instructions (`iaload`, ...).
pub fn array_prefix(element: Type) -> &'static str {
    match element {
        Type::Bool => "b",
        other => type_prefix(other),
    }
}

/// The allocation instruction for a new array of `element`.
pub fn new_array(element: Type) -> (&'static str, &'static str) {
    match element {
        Type::Bool => ("newarray", "boolean"),
        Type::Int => ("newarray", "int"),
        Type::Float => ("newarray", "float"),
        _ => ("anewarray", "java/lang/String"),
    }
}

/// Render a float constant for `ldc` in plain decimal form, always with a
/// decimal point and never with an exponent.
pub fn float_literal(value: f32) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}
