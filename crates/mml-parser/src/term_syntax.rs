//! Recursive-descent parser for the term syntax `f(x, g(y), A)`.
//!
//! Grounded on `original_source/unification/parse_term.py`'s `_term`
//! function, re-expressed over `mml_lexer::term` tokens instead of a regex
//! scanner.

use mml_common::Term;
use mml_lexer::term::{lex, Token, TokenKind};

use crate::error::ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                format!("expected {kind:?}, found {:?}", self.peek().kind),
                self.peek().span,
            ))
        }
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        let name_tok = self.expect(&TokenKind::Name(String::new()))?;
        let TokenKind::Name(name) = name_tok.kind else {
            unreachable!()
        };
        if matches!(self.peek().kind, TokenKind::LParen) {
            self.advance();
            let mut args = Vec::new();
            if !matches!(self.peek().kind, TokenKind::RParen) {
                args.push(self.term()?);
                while matches!(self.peek().kind, TokenKind::Comma) {
                    self.advance();
                    args.push(self.term()?);
                }
            }
            self.expect(&TokenKind::RParen)?;
            // Explicit parens always make an Application, even with zero
            // args (`f()`), regardless of leading case.
            Ok(Term::application(name, args))
        } else {
            // A bare name with no argument list is a Variable or a nullary
            // Constant depending purely on leading case.
            match Term::classify(&name) {
                mml_common::TermKind::Constant => Ok(Term::constant(name)),
                mml_common::TermKind::Variable => Ok(Term::variable(name)),
            }
        }
    }
}

/// Parses a single term from `source`.
pub fn parse_term(source: &str) -> Result<Term, ParseError> {
    let tokens = lex(source).map_err(|e| ParseError::new(e.message, e.span))?;
    let mut parser = Parser::new(tokens);
    let term = parser.term()?;
    parser.expect(&TokenKind::Eof)?;
    Ok(term)
}

/// Parses a comma-separated list of top-level terms, e.g. the multi-term
/// fixtures the `unify` subcommand accepts on one line.
pub fn parse_term_list(source: &str) -> Result<Vec<Term>, ParseError> {
    let tokens = lex(source).map_err(|e| ParseError::new(e.message, e.span))?;
    let mut parser = Parser::new(tokens);
    let mut terms = vec![parser.term()?];
    while matches!(parser.peek().kind, TokenKind::Comma) {
        parser.advance();
        terms.push(parser.term()?);
    }
    parser.expect(&TokenKind::Eof)?;
    Ok(terms)
}
