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

//! Type definitions for the Golite compiler.

use std::fmt;

/// A type in the Golite language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit floating point number.
    Float,
    /// Text string.
    String,
    /// Fixed-size array; the element type lives in the variable table.
    Array,
    /// The type of the nil value.
    Null,
    /// Statements and other nodes that produce no value.
    NoType,
}

impl Type {
    /// Map a source type name to a type.
    ///
    /// All sized integer and float names collapse onto `int` and `float`.
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "bool" => Some(Type::Bool),
            "int" | "int8" | "int16" | "int32" | "int64" => Some(Type::Int),
            "float32" | "float64" => Some(Type::Float),
            "string" => Some(Type::String),
            _ => None,
        }
    }

    /// Check if this is `int` or `float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// Check if values of this type can be compared with each other.
    pub fn is_comparable(&self) -> bool {
        matches!(self, Type::Bool | Type::Int | Type::Float | Type::String)
    }

    /// Check if this type can be printed and read.
    pub fn is_scalar(&self) -> bool {
        self.is_comparable()
    }

    /// The result type of combining two operand types.
    ///
    /// Identical types combine to themselves, `int` with `float` widens
    /// to `float`, and every other pair is incompatible.
    pub fn unify(left: Type, right: Type) -> Option<Type> {
        match (left, right) {
            (l, r) if l == r => Some(l),
            (Type::Int, Type::Float) | (Type::Float, Type::Int) => Some(Type::Float),
            _ => None,
        }
    }

    /// Check if a value of type `value` may be stored into a `target`.
    pub fn is_assignable(target: Type, value: Type) -> bool {
        target == value || (target == Type::Float && value == Type::Int)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Array => write!(f, "array"),
            Type::Null => write!(f, "null"),
            Type::NoType => write!(f, "no_type"),
        }
    }
}
