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

//! Shared test helpers.
//!
//! Contains a small interpreter for the subset of Jasmin assembly the
//! compiler emits, so compiled programs can be executed in tests. Besides
//! running the code it checks the declared `.limit` values, local slot
//! bounds and that every branch target is defined.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Upper bound of executed instructions per program run.
const STEP_LIMIT: usize = 1_000_000;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Str(String),
    Array(Rc<RefCell<Vec<Value>>>),
    Null,
    Out,
    In,
    Scanner,
}

impl Value {
    fn int(&self) -> i32 {
        match self {
            Value::Int(v) => *v,
            other => panic!("expected int on stack, found {:?}", other),
        }
    }

    fn float(&self) -> f32 {
        match self {
            Value::Float(v) => *v,
            other => panic!("expected float on stack, found {:?}", other),
        }
    }

    fn string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => panic!("expected string on stack, found {:?}", other),
        }
    }

    fn array(&self) -> Rc<RefCell<Vec<Value>>> {
        match self {
            Value::Array(a) => Rc::clone(a),
            other => panic!("expected array on stack, found {:?}", other),
        }
    }
}

#[derive(Debug, Clone)]
struct Instruction {
    op: String,
    arg: String,
}

#[derive(Debug, Default)]
struct Method {
    code: Vec<Instruction>,
    labels: HashMap<String, usize>,
    locals: usize,
    stack: usize,
}

/// A parsed class.
#[derive(Debug, Default)]
pub struct Class {
    pub name: String,
    fields: HashMap<String, String>,
    /// Methods keyed by name and descriptor, e.g. `main([Ljava/lang/String;)V`.
    methods: HashMap<String, Method>,
}

impl Class {
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn field_descriptor(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn is_branch(op: &str) -> bool {
    op == "goto" || op.starts_with("if")
}

/// Parse assembly text into a class.
pub fn parse_class(asm: &str) -> Class {
    let mut class = Class::default();
    let mut current: Option<(String, Method)> = None;

    for line in asm.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let words: Vec<&str> = trimmed.split_whitespace().collect();

        if trimmed.starts_with(".class") {
            class.name = words.last().unwrap().to_string();
        } else if trimmed.starts_with(".super") {
            continue;
        } else if trimmed.starts_with(".field") {
            assert_eq!(words.len(), 5, "malformed field: {}", trimmed);
            class.fields.insert(words[3].to_string(), words[4].to_string());
        } else if trimmed.starts_with(".method") {
            assert!(current.is_none(), "nested method: {}", trimmed);
            let signature = words.last().unwrap();
            assert!(signature.contains('('), "method without descriptor: {}", trimmed);
            current = Some((signature.to_string(), Method::default()));
        } else if trimmed.starts_with(".limit") {
            let (_, method) = current.as_mut().expect(".limit outside method");
            let value: usize = words[2].parse().unwrap();
            match words[1] {
                "stack" => method.stack = value,
                "locals" => method.locals = value,
                other => panic!("unknown limit {}", other),
            }
        } else if trimmed == ".end method" {
            let (name, method) = current.take().expect(".end method outside method");
            for ins in method.code.iter().filter(|i| is_branch(&i.op)) {
                assert!(
                    method.labels.contains_key(&ins.arg),
                    "undefined label {} in {}",
                    ins.arg,
                    name
                );
            }
            assert!(
                class.methods.insert(name.clone(), method).is_none(),
                "duplicate method {}",
                name
            );
        } else if let Some(label) = trimmed.strip_suffix(':') {
            assert!(!line.starts_with('\t'), "indented label: {}", line);
            let (_, method) = current.as_mut().expect("label outside method");
            let position = method.code.len();
            assert!(
                method.labels.insert(label.to_string(), position).is_none(),
                "duplicate label {}",
                label
            );
        } else {
            assert!(line.starts_with('\t'), "instruction without tab: {}", line);
            let (_, method) = current.as_mut().expect("instruction outside method");
            let (op, arg) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
            method.code.push(Instruction {
                op: op.to_string(),
                arg: arg.trim().to_string(),
            });
        }
    }

    assert!(current.is_none(), "unterminated method");
    class
}

fn unescape(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => {}
        }
    }
    result
}

fn parse_constant(arg: &str) -> Value {
    if let Some(text) = arg.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Value::Str(unescape(text));
    }
    if arg.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        return Value::Float(arg.parse().unwrap_or_else(|_| panic!("bad float {}", arg)));
    }
    Value::Int(arg.parse().unwrap_or_else(|_| panic!("bad int {}", arg)))
}

fn param_count(signature: &str) -> usize {
    let open = signature.find('(').unwrap();
    let close = signature.find(')').unwrap();
    let mut chars = signature[open + 1..close].chars();
    let mut count = 0;
    while let Some(c) = chars.next() {
        match c {
            '[' => continue,
            'L' => {
                for c in chars.by_ref() {
                    if c == ';' {
                        break;
                    }
                }
                count += 1;
            }
            _ => count += 1,
        }
    }
    count
}

/// Format a float the way `PrintStream.println(float)` does for the
/// values used in tests.
pub fn format_float(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e7 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn compare(cc: &str, a: i32, b: i32) -> bool {
    match cc {
        "eq" => a == b,
        "ne" => a != b,
        "lt" => a < b,
        "ge" => a >= b,
        "gt" => a > b,
        "le" => a <= b,
        other => panic!("unknown condition {}", other),
    }
}

fn default_value(descriptor: &str) -> Value {
    match descriptor {
        "I" | "Z" => Value::Int(0),
        "F" => Value::Float(0.0),
        _ => Value::Null,
    }
}

/// Executes a parsed class.
pub struct Machine<'c> {
    class: &'c Class,
    statics: HashMap<String, Value>,
    input: VecDeque<String>,
    pub output: Vec<String>,
    steps: usize,
}

impl<'c> Machine<'c> {
    pub fn new(class: &'c Class, input: &[&str]) -> Self {
        let statics = class
            .fields
            .iter()
            .map(|(name, desc)| (name.clone(), default_value(desc)))
            .collect();
        Self {
            class,
            statics,
            input: input.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
            steps: 0,
        }
    }

    /// The current value of a static field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.statics.get(name)
    }

    fn next_input(&mut self) -> String {
        self.input.pop_front().expect("program read past end of input")
    }

    /// Run `<clinit>` (if present), then `main`.
    pub fn run_program(&mut self) {
        if self.class.has_method("<clinit>()V") {
            self.invoke("<clinit>()V", Vec::new());
        }
        self.invoke("main([Ljava/lang/String;)V", vec![Value::Null]);
    }

    pub fn invoke(&mut self, name: &str, args: Vec<Value>) {
        let class = self.class;
        let method = class
            .methods
            .get(name)
            .unwrap_or_else(|| panic!("no method {}", name));
        assert!(
            args.len() <= method.locals,
            "{} takes {} argument(s) but has {} local(s)",
            name,
            args.len(),
            method.locals
        );

        let mut locals = vec![Value::Null; method.locals];
        for (slot, arg) in args.into_iter().enumerate() {
            locals[slot] = arg;
        }
        let mut stack: Vec<Value> = Vec::new();
        let mut pc = 0;

        loop {
            self.steps += 1;
            assert!(self.steps < STEP_LIMIT, "step limit exceeded");
            let ins = method
                .code
                .get(pc)
                .unwrap_or_else(|| panic!("fell off the end of {}", name));
            pc += 1;
            let op = ins.op.as_str();
            let arg = ins.arg.as_str();
            let jump = |pc: &mut usize, taken: bool| {
                if taken {
                    *pc = method.labels[arg];
                }
            };

            match op {
                "ldc" => stack.push(parse_constant(arg)),
                "iconst_0" => stack.push(Value::Int(0)),
                "iconst_1" => stack.push(Value::Int(1)),
                "fconst_0" => stack.push(Value::Float(0.0)),
                "aconst_null" => stack.push(Value::Null),
                "aload_0" => stack.push(locals[0].clone()),
                "iload" | "fload" | "aload" => {
                    let slot: usize = arg.parse().unwrap();
                    assert!(slot < method.locals, "local {} out of range in {}", slot, name);
                    stack.push(locals[slot].clone());
                }
                "istore" | "fstore" | "astore" => {
                    let slot: usize = arg.parse().unwrap();
                    assert!(slot < method.locals, "local {} out of range in {}", slot, name);
                    locals[slot] = stack.pop().unwrap();
                }
                "getstatic" => {
                    let value = if arg.starts_with("java/lang/System/out") {
                        Value::Out
                    } else if arg.starts_with("java/lang/System/in") {
                        Value::In
                    } else {
                        let field = field_name(arg, &class.name);
                        self.statics
                            .get(field)
                            .unwrap_or_else(|| panic!("undeclared field {}", field))
                            .clone()
                    };
                    stack.push(value);
                }
                "putstatic" => {
                    let field = field_name(arg, &class.name).to_string();
                    assert!(class.fields.contains_key(&field), "undeclared field {}", field);
                    let value = stack.pop().unwrap();
                    self.statics.insert(field, value);
                }
                "iadd" | "isub" | "imul" | "idiv" | "irem" => {
                    let b = stack.pop().unwrap().int();
                    let a = stack.pop().unwrap().int();
                    stack.push(Value::Int(match op {
                        "iadd" => a.wrapping_add(b),
                        "isub" => a.wrapping_sub(b),
                        "imul" => a.wrapping_mul(b),
                        "idiv" => a.wrapping_div(b),
                        _ => a.wrapping_rem(b),
                    }));
                }
                "fadd" | "fsub" | "fmul" | "fdiv" | "frem" => {
                    let b = stack.pop().unwrap().float();
                    let a = stack.pop().unwrap().float();
                    stack.push(Value::Float(match op {
                        "fadd" => a + b,
                        "fsub" => a - b,
                        "fmul" => a * b,
                        "fdiv" => a / b,
                        _ => a % b,
                    }));
                }
                "i2f" => {
                    let v = stack.pop().unwrap().int();
                    stack.push(Value::Float(v as f32));
                }
                "fcmpl" | "fcmpg" => {
                    let b = stack.pop().unwrap().float();
                    let a = stack.pop().unwrap().float();
                    let result = match a.partial_cmp(&b) {
                        Some(std::cmp::Ordering::Less) => -1,
                        Some(std::cmp::Ordering::Equal) => 0,
                        Some(std::cmp::Ordering::Greater) => 1,
                        None if op == "fcmpg" => 1,
                        None => -1,
                    };
                    stack.push(Value::Int(result));
                }
                "goto" => jump(&mut pc, true),
                _ if op.starts_with("if_icmp") => {
                    let b = stack.pop().unwrap().int();
                    let a = stack.pop().unwrap().int();
                    jump(&mut pc, compare(&op[7..], a, b));
                }
                _ if op.starts_with("if") => {
                    let v = stack.pop().unwrap().int();
                    jump(&mut pc, compare(&op[2..], v, 0));
                }
                "newarray" | "anewarray" => {
                    let len = stack.pop().unwrap().int();
                    assert!(len >= 0, "negative array size");
                    let element = match arg {
                        "int" | "boolean" => Value::Int(0),
                        "float" => Value::Float(0.0),
                        _ => Value::Null,
                    };
                    let items = vec![element; len as usize];
                    stack.push(Value::Array(Rc::new(RefCell::new(items))));
                }
                "iaload" | "faload" | "baload" | "aaload" => {
                    let index = stack.pop().unwrap().int();
                    let array = stack.pop().unwrap().array();
                    let value = array.borrow()[index as usize].clone();
                    stack.push(value);
                }
                "iastore" | "fastore" | "bastore" | "aastore" => {
                    let value = stack.pop().unwrap();
                    let index = stack.pop().unwrap().int();
                    let array = stack.pop().unwrap().array();
                    array.borrow_mut()[index as usize] = value;
                }
                "new" => {
                    assert_eq!(arg, "java/util/Scanner");
                    stack.push(Value::Scanner);
                }
                "dup" => {
                    let top = stack.last().unwrap().clone();
                    stack.push(top);
                }
                "invokespecial" => match arg {
                    "java/util/Scanner/<init>(Ljava/io/InputStream;)V" => {
                        assert_eq!(stack.pop(), Some(Value::In));
                        assert_eq!(stack.pop(), Some(Value::Scanner));
                    }
                    "java/lang/Object/<init>()V" => {
                        stack.pop();
                    }
                    other => panic!("unsupported constructor {}", other),
                },
                "invokevirtual" => self.invoke_virtual(arg, &mut stack),
                "invokestatic" => {
                    let paren = arg.find('(').unwrap();
                    let slash = arg[..paren].rfind('/').unwrap();
                    assert_eq!(&arg[..slash], self.class.name, "foreign method {}", arg);
                    let args = stack.split_off(stack.len() - param_count(arg));
                    self.invoke(&arg[slash + 1..], args);
                }
                "return" => return,
                other => panic!("unsupported instruction {} in {}", other, name),
            }

            assert!(
                stack.len() <= method.stack,
                "stack limit {} exceeded in {}",
                method.stack,
                name
            );
        }
    }

    fn invoke_virtual(&mut self, target: &str, stack: &mut Vec<Value>) {
        match target {
            "java/lang/String/concat(Ljava/lang/String;)Ljava/lang/String;" => {
                let b = stack.pop().unwrap().string();
                let a = stack.pop().unwrap().string();
                stack.push(Value::Str(a + &b));
            }
            "java/lang/String/compareTo(Ljava/lang/String;)I" => {
                let b = stack.pop().unwrap().string();
                let a = stack.pop().unwrap().string();
                stack.push(Value::Int(a.cmp(&b) as i32));
            }
            "java/util/Scanner/nextInt()I" => {
                assert_eq!(stack.pop(), Some(Value::Scanner));
                let token = self.next_input();
                stack.push(Value::Int(token.trim().parse().unwrap()));
            }
            "java/util/Scanner/nextFloat()F" => {
                assert_eq!(stack.pop(), Some(Value::Scanner));
                let token = self.next_input();
                stack.push(Value::Float(token.trim().parse().unwrap()));
            }
            "java/util/Scanner/nextBoolean()Z" => {
                assert_eq!(stack.pop(), Some(Value::Scanner));
                let token = self.next_input();
                stack.push(Value::Int(i32::from(token.trim() == "true")));
            }
            "java/util/Scanner/nextLine()Ljava/lang/String;" => {
                assert_eq!(stack.pop(), Some(Value::Scanner));
                let token = self.next_input();
                stack.push(Value::Str(token));
            }
            _ if target.starts_with("java/io/PrintStream/println(") => {
                let value = stack.pop().unwrap();
                assert_eq!(stack.pop(), Some(Value::Out));
                let text = match &target["java/io/PrintStream/println(".len()..] {
                    "I)V" => value.int().to_string(),
                    "F)V" => format_float(value.float()),
                    "Z)V" => (value.int() != 0).to_string(),
                    "Ljava/lang/String;)V" => value.string(),
                    other => panic!("unsupported println overload {}", other),
                };
                self.output.push(text);
            }
            other => panic!("unsupported method {}", other),
        }
    }
}

fn field_name<'a>(operand: &'a str, class: &str) -> &'a str {
    let path = operand.split_whitespace().next().unwrap();
    let (owner, field) = path.rsplit_once('/').unwrap();
    assert_eq!(owner, class, "field of foreign class: {}", operand);
    field
}

/// Run assembly text with the given input tokens and return printed lines.
pub fn run(asm: &str, input: &[&str]) -> Vec<String> {
    let class = parse_class(asm);
    let mut machine = Machine::new(&class, input);
    machine.run_program();
    machine.output
}

/// Compile a program, panicking on any error.
pub fn compile(source: &str) -> String {
    golite::compile(source).unwrap_or_else(|e| match e {
        golite::CompileFailure::Semantic(diagnostics) => {
            panic!("semantic errors:\n{}", diagnostics)
        }
        other => panic!("compile failed: {}", other),
    })
}

/// Compile and run a program.
pub fn compile_and_run(source: &str, input: &[&str]) -> Vec<String> {
    run(&compile(source), input)
}
