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

//! Token definitions for the Golite language.

use logos::Logos;

/// A token in the Golite language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Literals
    /// Decimal integer literal, as written.
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Integer(String),
    /// Floating point literal, as written.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().to_string())]
    Decimal(String),
    /// String literal without the quotes; escapes are kept as written.
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    String(String),
    /// Identifier (variable, function or type name).
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("var")]
    Var,
    #[token("func")]
    Func,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("=")]
    Equal,
    #[token(":=")]
    ColonEqual,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("\n")]
    Newline,

    /// A `/* ... */` comment. Never reaches the parser.
    #[token("/*", block_comment)]
    BlockComment,
}

/// Consume a block comment body; `false` marks it unterminated.
fn block_comment(lex: &mut logos::Lexer<Token>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

impl Token {
    /// Get a human-readable name for this token type.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Integer(_) => "integer",
            Token::Decimal(_) => "float",
            Token::String(_) => "string",
            Token::Identifier(_) => "identifier",
            Token::Package => "'package'",
            Token::Import => "'import'",
            Token::Var => "'var'",
            Token::Func => "'func'",
            Token::If => "'if'",
            Token::Else => "'else'",
            Token::For => "'for'",
            Token::Return => "'return'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Percent => "'%'",
            Token::EqualEqual => "'=='",
            Token::BangEqual => "'!='",
            Token::Less => "'<'",
            Token::Greater => "'>'",
            Token::LessEqual => "'<='",
            Token::GreaterEqual => "'>='",
            Token::AndAnd => "'&&'",
            Token::OrOr => "'||'",
            Token::Equal => "'='",
            Token::ColonEqual => "':='",
            Token::LeftParen => "'('",
            Token::RightParen => "')'",
            Token::LeftBrace => "'{'",
            Token::RightBrace => "'}'",
            Token::LeftBracket => "'['",
            Token::RightBracket => "']'",
            Token::Comma => "','",
            Token::Semicolon => "';'",
            Token::Newline => "newline",
            Token::BlockComment => "comment",
        }
    }

    /// The source text of a binary operator token.
    pub fn binary_operator(&self) -> Option<&'static str> {
        let text = match self {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::EqualEqual => "==",
            Token::BangEqual => "!=",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            _ => return None,
        };
        Some(text)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Integer(s) | Token::Decimal(s) | Token::Identifier(s) => write!(f, "{}", s),
            Token::String(s) => write!(f, "\"{}\"", s),
            _ => write!(f, "{}", self.name()),
        }
    }
}
