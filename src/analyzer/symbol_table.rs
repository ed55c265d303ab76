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

//! Variable and function tables.
//!
//! There is one [`VarTable`] for the global scope and one per function body,
//! owned by that function's [`FuncEntry`]. Entries are kept in declaration
//! order; the index of an entry is its slot.

use std::collections::HashMap;
use std::fmt;

use crate::ast::{Scope, Type, VarRef};
use crate::error::{SemanticError, SymbolKind};

/// Shape of an array variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayInfo {
    /// Element type.
    pub element: Type,
    /// Number of elements.
    pub len: usize,
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarEntry {
    pub name: String,
    /// Line of the declaration.
    pub line: usize,
    /// Declared type (`array` for arrays).
    pub ty: Type,
    /// Array shape, if this is an array.
    pub array: Option<ArrayInfo>,
}

impl VarEntry {
    /// Array length, 0 for scalars.
    pub fn array_len(&self) -> usize {
        self.array.map_or(0, |info| info.len)
    }

    /// Type of the stored values (element type for arrays).
    pub fn value_type(&self) -> Type {
        self.array.map_or(self.ty, |info| info.element)
    }

    fn type_name(&self) -> String {
        match self.array {
            Some(info) => format!("[{}]{}", info.len, info.element),
            None => self.ty.to_string(),
        }
    }
}

/// An ordered table of variables with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarTable {
    entries: Vec<VarEntry>,
    index: HashMap<String, usize>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable and return its slot.
    ///
    /// Fails with `DuplicateDeclaration` if the name is already in this table.
    pub fn add_variable(
        &mut self,
        name: &str,
        line: usize,
        ty: Type,
        array: Option<ArrayInfo>,
    ) -> Result<usize, SemanticError> {
        if let Some(&existing) = self.index.get(name) {
            return Err(SemanticError::DuplicateDeclaration {
                kind: SymbolKind::Variable,
                name: name.to_string(),
                line,
                first_line: self.entries[existing].line,
            });
        }

        let slot = self.entries.len();
        self.entries.push(VarEntry {
            name: name.to_string(),
            line,
            ty,
            array,
        });
        self.index.insert(name.to_string(), slot);
        Ok(slot)
    }

    /// Find the slot of a variable by name.
    pub fn lookup_variable(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Get an entry by slot.
    pub fn get(&self, slot: usize) -> Option<&VarEntry> {
        self.entries.get(slot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VarEntry> {
        self.entries.iter()
    }
}

impl fmt::Display for VarTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "[vt] Entry {} -- name: {}, line: {}, type: {}, array: {}",
                slot,
                entry.name,
                entry.line,
                entry.type_name(),
                entry.array_len()
            )?;
        }
        Ok(())
    }
}

/// A declared function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncEntry {
    pub name: String,
    /// Line of the declaration.
    pub line: usize,
    /// Parameter types in declaration order.
    pub params: Vec<Type>,
    /// Result types in declaration order.
    pub returns: Vec<Type>,
    /// Parameters (first) and locals of the body.
    pub vars: VarTable,
}

impl FuncEntry {
    /// The type a call produces when used as a value.
    pub fn value_type(&self) -> Type {
        match self.returns.as_slice() {
            [single] => *single,
            _ => Type::NoType,
        }
    }
}

/// An ordered table of functions with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncTable {
    entries: Vec<FuncEntry>,
    index: HashMap<String, usize>,
}

impl FuncTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a function and return its index.
    pub fn add_function(
        &mut self,
        name: &str,
        line: usize,
        params: Vec<Type>,
        returns: Vec<Type>,
    ) -> Result<usize, SemanticError> {
        if let Some(&existing) = self.index.get(name) {
            return Err(SemanticError::DuplicateDeclaration {
                kind: SymbolKind::Function,
                name: name.to_string(),
                line,
                first_line: self.entries[existing].line,
            });
        }

        let index = self.entries.len();
        self.entries.push(FuncEntry {
            name: name.to_string(),
            line,
            params,
            returns,
            vars: VarTable::new(),
        });
        self.index.insert(name.to_string(), index);
        Ok(index)
    }

    /// Find the index of a function by name.
    pub fn lookup_function(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<&FuncEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FuncEntry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuncEntry> {
        self.entries.iter()
    }
}

fn join_types(types: &[Type]) -> String {
    types
        .iter()
        .map(Type::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for FuncTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "[ft] Entry {} -- name: {}, line: {}, params: ({}), returns: ({})",
                index,
                entry.name,
                entry.line,
                join_types(&entry.params),
                join_types(&entry.returns)
            )?;
            for line in entry.vars.to_string().lines() {
                writeln!(f, "    {}", line)?;
            }
        }
        Ok(())
    }
}

/// All tables built by one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTables {
    pub globals: VarTable,
    pub functions: FuncTable,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// The variable table of a scope.
    pub fn table(&self, scope: Scope) -> Option<&VarTable> {
        match scope {
            Scope::Global => Some(&self.globals),
            Scope::Function(index) => self.functions.get(index).map(|f| &f.vars),
        }
    }

    /// The mutable variable table of a scope.
    pub fn table_mut(&mut self, scope: Scope) -> Option<&mut VarTable> {
        match scope {
            Scope::Global => Some(&mut self.globals),
            Scope::Function(index) => self.functions.get_mut(index).map(|f| &mut f.vars),
        }
    }

    /// Resolve a name as seen from `scope`: locals first, then globals.
    pub fn resolve_variable(&self, name: &str, scope: Scope) -> Option<VarRef> {
        if let Scope::Function(_) = scope {
            if let Some(slot) = self.table(scope).and_then(|t| t.lookup_variable(name)) {
                return Some(VarRef::new(slot, scope));
            }
        }
        self.globals
            .lookup_variable(name)
            .map(|slot| VarRef::new(slot, Scope::Global))
    }

    /// The entry a reference points to.
    pub fn variable(&self, var: VarRef) -> Option<&VarEntry> {
        self.table(var.scope).and_then(|t| t.get(var.slot))
    }
}

impl fmt::Display for SymbolTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variables table:")?;
        write!(f, "{}", self.globals)?;
        writeln!(f)?;
        writeln!(f, "Functions table:")?;
        write!(f, "{}", self.functions)
    }
}
