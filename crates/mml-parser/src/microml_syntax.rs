//! Recursive-descent parser for Micro-ML.
//!
//! Grounded on `original_source/type-inference/microml/parser.py`, matching
//! its precedence ladder (`_expr0` .. `_expr6`) statement for statement, but
//! built over `mml_lexer::microml` tokens and producing AST nodes that carry
//! spans and fresh type-symbol cells, following this workspace's parser
//! convention of a spanned tree rather than bare Python tuples.

use mml_common::Span;
use mml_lexer::microml::{lex, Token, TokenKind};

use crate::ast::{fresh_cell, Expr, FunctionDefinition};
use crate::error::ParseError;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
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

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                format!("expected {kind}, found {}", self.peek().kind),
                self.peek().span,
            ))
        }
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        let tok = self.expect(TokenKind::Ident(String::new()))?;
        let TokenKind::Ident(name) = tok.kind else {
            unreachable!()
        };
        Ok(name)
    }

    fn program(&mut self) -> Result<Vec<FunctionDefinition>, ParseError> {
        let mut defs = Vec::new();
        while self.check(&TokenKind::Fun) {
            defs.push(self.func_def()?);
            self.expect(TokenKind::Semicolon)?;
        }
        self.expect(TokenKind::Eof)?;
        Ok(defs)
    }

    fn func_def(&mut self) -> Result<FunctionDefinition, ParseError> {
        let start = self.peek().span;
        self.expect(TokenKind::Fun)?;
        let name = self.ident()?;
        let mut params = Vec::new();
        while matches!(self.peek().kind, TokenKind::Ident(_)) {
            params.push(self.ident()?);
        }
        self.expect(TokenKind::Eq)?;
        let body = self.expr()?;
        let span = start.merge(body.span());
        Ok(FunctionDefinition {
            name,
            params,
            body,
            span,
        })
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::If => self.if_expr(),
            TokenKind::Let => self.let_expr(),
            TokenKind::Fn => self.fn_expr(),
            _ => self.expr0(),
        }
    }

    fn if_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.peek().span;
        self.expect(TokenKind::If)?;
        let cond = self.expr()?;
        self.expect(TokenKind::Then)?;
        let then_branch = self.expr()?;
        self.expect(TokenKind::Else)?;
        let else_branch = self.expr()?;
        let span = start.merge(else_branch.span());
        Ok(Expr::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            span,
            symbol: fresh_cell(),
        })
    }

    fn let_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.peek().span;
        self.expect(TokenKind::Let)?;
        let var = self.ident()?;
        self.expect(TokenKind::Eq)?;
        let val = self.expr()?;
        self.expect(TokenKind::In)?;
        let body = self.expr()?;
        let span = start.merge(body.span());
        Ok(Expr::Let {
            var,
            val: Box::new(val),
            body: Box::new(body),
            span,
            symbol: fresh_cell(),
        })
    }

    fn fn_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.peek().span;
        self.expect(TokenKind::Fn)?;
        let mut params = Vec::new();
        while matches!(self.peek().kind, TokenKind::Ident(_)) {
            params.push(self.ident()?);
        }
        self.expect(TokenKind::FatArrow)?;
        let body = self.expr()?;
        let span = start.merge(body.span());
        Ok(Expr::Fn {
            params,
            body: Box::new(body),
            span,
            symbol: fresh_cell(),
        })
    }

    // expr1 { "or" expr1 }
    fn expr0(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.expr1()?;
        while matches!(self.peek().kind, TokenKind::Or) {
            self.advance();
            let right = self.expr1()?;
            left = binary("or", left, right);
        }
        Ok(left)
    }

    // expr2 { "and" expr2 }
    fn expr1(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.expr2()?;
        while matches!(self.peek().kind, TokenKind::And) {
            self.advance();
            let right = self.expr2()?;
            left = binary("and", left, right);
        }
        Ok(left)
    }

    // expr3 [ cmp_op expr3 ]
    fn expr2(&mut self) -> Result<Expr, ParseError> {
        let left = self.expr3()?;
        if let Some(op) = cmp_op(&self.peek().kind) {
            self.advance();
            let right = self.expr3()?;
            return Ok(binary(op, left, right));
        }
        Ok(left)
    }

    // expr4 { ("+"|"-") expr4 }
    fn expr3(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.expr4()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                _ => break,
            };
            self.advance();
            let right = self.expr4()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    // expr5 { ("*"|"/") expr5 }
    fn expr4(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.expr5()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                _ => break,
            };
            self.advance();
            let right = self.expr5()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    // { "-" | "not" } expr6
    fn expr5(&mut self) -> Result<Expr, ParseError> {
        let mut ops = Vec::new();
        loop {
            let (op, span) = match self.peek().kind {
                TokenKind::Minus => ("-", self.peek().span),
                TokenKind::Not => ("not", self.peek().span),
                _ => break,
            };
            self.advance();
            ops.push((op, span));
        }
        let mut expr = self.expr6(true)?;
        for (op, op_span) in ops.into_iter().rev() {
            let span = op_span.merge(expr.span());
            expr = Expr::Unary {
                op: op.to_string(),
                expr: Box::new(expr),
                span,
                symbol: fresh_cell(),
            };
        }
        Ok(expr)
    }

    // atom { atom } — juxtaposition is left-associative curried application
    fn expr6(&mut self, parse_call: bool) -> Result<Expr, ParseError> {
        let start = self.peek().span;
        let mut expr = match self.peek().kind.clone() {
            TokenKind::Int(v) => {
                self.advance();
                Expr::IntLit {
                    value: v,
                    span: start,
                    symbol: fresh_cell(),
                }
            }
            TokenKind::Real(v) => {
                self.advance();
                Expr::RealLit {
                    value: v,
                    span: start,
                    symbol: fresh_cell(),
                }
            }
            TokenKind::True => {
                self.advance();
                Expr::BoolLit {
                    value: true,
                    span: start,
                    symbol: fresh_cell(),
                }
            }
            TokenKind::False => {
                self.advance();
                Expr::BoolLit {
                    value: false,
                    span: start,
                    symbol: fresh_cell(),
                }
            }
            TokenKind::Ident(name) => {
                self.advance();
                Expr::Id { name, span: start }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = if matches!(self.peek().kind, TokenKind::RParen) {
                    Expr::Unit {
                        span: start,
                        symbol: fresh_cell(),
                    }
                } else {
                    self.expr()?
                };
                let end = self.expect(TokenKind::RParen)?.span;
                set_span(inner, start.merge(end))
            }
            other => {
                return Err(ParseError::new(
                    format!("unexpected token {other}"),
                    self.peek().span,
                ))
            }
        };

        if parse_call {
            while starts_atom(&self.peek().kind) {
                let arg = self.expr6(false)?;
                let span = expr.span().merge(arg.span());
                expr = Expr::Call {
                    func: Box::new(expr),
                    arg: Box::new(arg),
                    span,
                    symbol: fresh_cell(),
                };
            }
        }

        Ok(expr)
    }
}

fn set_span(expr: Expr, span: Span) -> Expr {
    // Parenthesized expressions keep their inner node but widen the span to
    // include the parens, for accurate diagnostics.
    match expr {
        Expr::If { cond, then_branch, else_branch, symbol, .. } => Expr::If {
            cond,
            then_branch,
            else_branch,
            span,
            symbol,
        },
        Expr::Let { var, val, body, symbol, .. } => Expr::Let {
            var,
            val,
            body,
            span,
            symbol,
        },
        Expr::Fn { params, body, symbol, .. } => Expr::Fn {
            params,
            body,
            span,
            symbol,
        },
        Expr::Call { func, arg, symbol, .. } => Expr::Call {
            func,
            arg,
            span,
            symbol,
        },
        Expr::Binary { op, left, right, symbol, .. } => Expr::Binary {
            op,
            left,
            right,
            span,
            symbol,
        },
        Expr::Unary { op, expr, symbol, .. } => Expr::Unary {
            op,
            expr,
            span,
            symbol,
        },
        Expr::Id { name, .. } => Expr::Id { name, span },
        Expr::Unit { symbol, .. } => Expr::Unit { span, symbol },
        Expr::IntLit { value, symbol, .. } => Expr::IntLit { value, span, symbol },
        Expr::RealLit { value, symbol, .. } => Expr::RealLit { value, span, symbol },
        Expr::BoolLit { value, symbol, .. } => Expr::BoolLit { value, span, symbol },
    }
}

fn starts_atom(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Int(_)
            | TokenKind::Real(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Ident(_)
            | TokenKind::LParen
    )
}

fn cmp_op(kind: &TokenKind) -> Option<&'static str> {
    Some(match kind {
        TokenKind::NotEq => "!=",
        TokenKind::Lt => "<",
        TokenKind::LtEq => "<=",
        TokenKind::EqEq => "==",
        TokenKind::Gt => ">",
        TokenKind::GtEq => ">=",
        _ => return None,
    })
}

fn binary(op: &str, left: Expr, right: Expr) -> Expr {
    let span = left.span().merge(right.span());
    Expr::Binary {
        op: op.to_string(),
        left: Box::new(left),
        right: Box::new(right),
        span,
        symbol: fresh_cell(),
    }
}

/// Parses a full Micro-ML program into its list of top-level function
/// definitions.
pub fn parse_program(source: &str) -> Result<Vec<FunctionDefinition>, ParseError> {
    let tokens = lex(source).map_err(|e| ParseError::new(e.message, e.span))?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.program()
}
