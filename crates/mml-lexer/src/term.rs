//! Lexer for the term syntax `f(x, g(y), A)`.
//!
//! Grounded on `original_source/unification/parse_term.py`'s regex token
//! specification, re-expressed with the workspace's `Cursor`/`Token` idiom.

use std::fmt;

use mml_common::Span;

use crate::cursor::Cursor;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `[A-Za-z][A-Za-z0-9_]*`, carries its text.
    Name(String),
    LParen,
    RParen,
    Comma,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenizes `source` in full, returning every token (including a trailing
/// `Eof`) or the first lexical error encountered.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    loop {
        cursor.eat_while(|c| c.is_whitespace());
        let start = cursor.pos();
        let Some(c) = cursor.peek() else {
            tokens.push(Token::new(TokenKind::Eof, start, start));
            break;
        };

        if is_name_start(c) {
            cursor.eat_while(is_name_continue);
            let end = cursor.pos();
            let text = cursor.slice(start, end).to_string();
            tokens.push(Token::new(TokenKind::Name(text), start, end));
            continue;
        }

        cursor.advance();
        let end = cursor.pos();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            _ => {
                return Err(LexError {
                    message: format!("unexpected character {c:?}"),
                    span: Span::new(start, end),
                })
            }
        };
        tokens.push(Token::new(kind, start, end));
    }

    Ok(tokens)
}
