//! Lexer for Micro-ML source.
//!
//! Grounded on `original_source/type-inference/microml/scanner.py`'s token
//! specification, re-expressed with the workspace's `Cursor`/`Token` idiom
//! (`snow-lexer`) rather than a regex scan.

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

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Fun,
    Fn,
    If,
    Then,
    Else,
    Let,
    In,
    True,
    False,
    And,
    Or,
    Not,

    // Punctuation / operators
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    FatArrow,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    Eq,
    Lt,
    Gt,
    Semicolon,

    // Literals / identifiers
    Int(i64),
    Real(f64),
    Ident(String),

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Fun => "fun",
            TokenKind::Fn => "fn",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::Let => "let",
            TokenKind::In => "in",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::FatArrow => "=>",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Eq => "=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Semicolon => ";",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Real(_) => "real literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{s}")
    }
}

fn keyword_from_str(s: &str) -> Option<TokenKind> {
    Some(match s {
        "fun" => TokenKind::Fun,
        "fn" => TokenKind::Fn,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "let" => TokenKind::Let,
        "in" => TokenKind::In,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        _ => return None,
    })
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

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    loop {
        cursor.eat_while(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n');
        if cursor.peek() == Some('#') {
            cursor.eat_while(|c| c != '\n');
            continue;
        }

        let start = cursor.pos();
        let Some(c) = cursor.peek() else {
            tokens.push(Token::new(TokenKind::Eof, start, start));
            break;
        };

        if c.is_ascii_digit() {
            cursor.eat_while(|c| c.is_ascii_digit());
            if cursor.peek() == Some('.') && cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
            {
                cursor.advance();
                cursor.eat_while(|c| c.is_ascii_digit());
                let end = cursor.pos();
                let text = cursor.slice(start, end);
                let value: f64 = text.parse().map_err(|_| LexError {
                    message: format!("invalid real literal: {text}"),
                    span: Span::new(start, end),
                })?;
                tokens.push(Token::new(TokenKind::Real(value), start, end));
            } else {
                let end = cursor.pos();
                let text = cursor.slice(start, end);
                let value: i64 = text.parse().map_err(|_| LexError {
                    message: format!("invalid integer literal: {text}"),
                    span: Span::new(start, end),
                })?;
                tokens.push(Token::new(TokenKind::Int(value), start, end));
            }
            continue;
        }

        if is_ident_start(c) {
            cursor.eat_while(is_ident_continue);
            let end = cursor.pos();
            let text = cursor.slice(start, end);
            let kind = keyword_from_str(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()));
            tokens.push(Token::new(kind, start, end));
            continue;
        }

        cursor.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            ';' => TokenKind::Semicolon,
            '<' => {
                if cursor.peek() == Some('=') {
                    cursor.advance();
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if cursor.peek() == Some('=') {
                    cursor.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '=' => {
                if cursor.peek() == Some('=') {
                    cursor.advance();
                    TokenKind::EqEq
                } else if cursor.peek() == Some('>') {
                    cursor.advance();
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if cursor.peek() == Some('=') {
                    cursor.advance();
                    TokenKind::NotEq
                } else {
                    let end = cursor.pos();
                    return Err(LexError {
                        message: "unexpected character '!'".into(),
                        span: Span::new(start, end),
                    });
                }
            }
            _ => {
                let end = cursor.pos();
                return Err(LexError {
                    message: format!("unexpected character {c:?}"),
                    span: Span::new(start, end),
                });
            }
        };
        let end = cursor.pos();
        tokens.push(Token::new(kind, start, end));
    }

    Ok(tokens)
}
