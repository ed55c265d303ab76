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

//! Concrete parse tree produced by the parser.
//!
//! The tree mirrors the grammar. Wherever a rule has alternatives, the
//! matched alternative is an enum variant, so the analyzer branches on the
//! tag instead of probing for children. Every node keeps the source line
//! it started on.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

/// An identifier with its source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub line: usize,
}

impl Ident {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A complete source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFile {
    /// The `package` clause, if present.
    pub package: Option<Ident>,
    /// Top-level declarations in source order.
    pub declarations: Vec<TopLevelDecl>,
}

impl SourceFile {
    /// All global variable declarations, in source order.
    pub fn variables(&self) -> impl Iterator<Item = &VarDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            TopLevelDecl::Var(var) => Some(var),
            TopLevelDecl::Func(_) => None,
        })
    }

    /// All function declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            TopLevelDecl::Func(func) => Some(func),
            TopLevelDecl::Var(_) => None,
        })
    }

    /// The last line any declaration starts on.
    pub fn last_line(&self) -> usize {
        self.declarations
            .iter()
            .map(|decl| match decl {
                TopLevelDecl::Var(var) => var.line,
                TopLevelDecl::Func(func) => func.body.end_line,
            })
            .max()
            .unwrap_or(1)
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelDecl {
    Var(VarDecl),
    Func(FuncDecl),
}

/// A `var` declaration, possibly a parenthesized group of specs.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub specs: Vec<VarSpec>,
    pub line: usize,
}

/// One `names [type] [= values]` spec of a `var` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    pub names: Vec<Ident>,
    pub ty: Option<TypeSpec>,
    pub values: Vec<Expression>,
    pub line: usize,
}

/// A type as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    /// A plain type name such as `int` or `float64`.
    Named(Ident),
    /// `[length]element`.
    Array {
        length: Box<Expression>,
        element: Ident,
        line: usize,
    },
}

impl TypeSpec {
    pub fn line(&self) -> usize {
        match self {
            TypeSpec::Named(ident) => ident.line,
            TypeSpec::Array { line, .. } => *line,
        }
    }
}

/// A group of parameters sharing one type: `a, b int`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamGroup {
    pub names: Vec<Ident>,
    pub ty: Ident,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    pub params: Vec<ParamGroup>,
    pub results: Vec<Ident>,
    pub body: Block,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_partitions_declarations() {
        let var = VarDecl {
            specs: vec![],
            line: 1,
        };
        let func = FuncDecl {
            name: Ident::new("main", 2),
            params: vec![],
            results: vec![],
            body: Block {
                statements: vec![],
                line: 2,
                end_line: 4,
            },
            line: 2,
        };
        let file = SourceFile {
            package: None,
            declarations: vec![TopLevelDecl::Func(func), TopLevelDecl::Var(var)],
        };

        assert_eq!(file.variables().count(), 1);
        assert_eq!(file.functions().count(), 1);
        assert_eq!(file.last_line(), 4);
    }
}
