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

//! Fuzz target for the complete Golite pipeline.
//!
//! The input is a structured program body wrapped into `main`, so most
//! runs get past the parser. Successful compilations must be
//! deterministic and produce balanced method blocks.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_compiler

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    globals: String,
    body: String,
}

fuzz_target!(|input: Input| {
    let source = format!(
        "package main\n{}\nfunc main() {{\n{}\n}}\n",
        input.globals, input.body
    );
    if let Ok(first) = golite::compile(&source) {
        let second = golite::compile(&source).expect("second compilation failed");
        assert_eq!(first, second);
        assert_eq!(
            first.matches("\n.method ").count(),
            first.matches("\n.end method").count()
        );
    }
});
