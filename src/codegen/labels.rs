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

//! Label and frame management for code generation.
//!
//! This module handles:
//! - Per-family label counters (`if`, `while`, short-circuit joins)
//! - The per-method frame context (frame base, parameter count)
//! - The jump direction used by condition code

/// Label counters of one method, one counter per label family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCounters {
    if_count: usize,
    while_count: usize,
    join_count: usize,
}

/// Labels of one `if` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfLabels {
    pub else_label: String,
    pub exit_label: String,
}

/// Labels of one loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopLabels {
    pub top_label: String,
    pub exit_label: String,
}

impl LabelCounters {
    /// Allocate the labels of the next `if` statement.
    pub fn next_if(&mut self) -> IfLabels {
        let n = self.if_count;
        self.if_count += 1;
        IfLabels {
            else_label: format!("else_{}", n),
            exit_label: format!("endif_{}", n),
        }
    }

    /// Allocate the labels of the next loop.
    pub fn next_while(&mut self) -> LoopLabels {
        let n = self.while_count;
        self.while_count += 1;
        LoopLabels {
            top_label: format!("while_top_{}", n),
            exit_label: format!("while_end_{}", n),
        }
    }

    /// Allocate a join label for short-circuit code.
    pub fn next_join(&mut self) -> String {
        let n = self.join_count;
        self.join_count += 1;
        format!("sc_{}", n)
    }
}

/// Per-method state threaded through code generation.
///
/// A fresh context is created for every method, so label numbering only
/// depends on the traversal order inside that method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameContext {
    /// Function table index, `None` for the static initializer.
    pub function: Option<usize>,
    /// First local slot available to the function's own variables.
    pub frame_base: usize,
    /// Number of declared parameters.
    pub param_count: usize,
    pub labels: LabelCounters,
}

impl FrameContext {
    /// Context of the static initializer running the global statements.
    pub fn initializer() -> Self {
        Self::default()
    }

    /// Context of a function body.
    ///
    /// `main` receives a `String[]` in slot 0, so its variables start at 1.
    pub fn function(index: usize, param_count: usize, is_main: bool) -> Self {
        Self {
            function: Some(index),
            frame_base: usize::from(is_main),
            param_count,
            labels: LabelCounters::default(),
        }
    }

    /// The local slot of a variable table slot.
    pub fn local(&self, slot: usize) -> usize {
        self.frame_base + slot
    }
}

/// Where condition code transfers control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump<'l> {
    /// Jump to the label when the condition is false, fall through otherwise.
    IfFalse(&'l str),
    /// Jump to the label when the condition is true, fall through otherwise.
    IfTrue(&'l str),
}

impl<'l> Jump<'l> {
    pub fn label(&self) -> &'l str {
        match self {
            Jump::IfFalse(label) | Jump::IfTrue(label) => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_families_count_independently() {
        let mut labels = LabelCounters::default();
        assert_eq!(labels.next_if().else_label, "else_0");
        assert_eq!(labels.next_join(), "sc_0");
        let second = labels.next_if();
        assert_eq!(second.else_label, "else_1");
        assert_eq!(second.exit_label, "endif_1");
        let loop_labels = labels.next_while();
        assert_eq!(loop_labels.top_label, "while_top_0");
        assert_eq!(loop_labels.exit_label, "while_end_0");
        assert_eq!(labels.next_join(), "sc_1");
    }

    #[test]
    fn test_main_frame_starts_at_one() {
        assert_eq!(FrameContext::function(0, 0, true).local(0), 1);
        assert_eq!(FrameContext::function(2, 2, false).local(1), 1);
        assert_eq!(FrameContext::initializer().function, None);
    }

    #[test]
    fn test_jump_label() {
        assert_eq!(Jump::IfFalse("endif_0").label(), "endif_0");
        assert_eq!(Jump::IfTrue("sc_3").label(), "sc_3");
    }
}
