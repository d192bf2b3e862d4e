use std::fmt;

use mml_common::{Term, Type};

/// Errors raised by the Robinson and multiequation unifiers, which operate
/// over untyped first-order `Term`s.
#[derive(Debug, Clone, PartialEq)]
pub enum UnifyError {
    /// Two distinct constants, or two applications with differing head or
    /// arity.
    Clash(Term, Term),
    /// Binding a variable to a term that contains it would build an
    /// infinite term.
    Occurs(Term, Term),
    /// The multiequation system has no selectable multiequation (Algorithm
    /// 3) or the frontier re-introduces a top-level variable (Algorithm 2).
    Cycle(String),
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::Clash(a, b) => write!(f, "clash: {a} and {b} are not unifiable"),
            UnifyError::Occurs(v, t) => {
                write!(f, "occurs check failed: {v} occurs in {t}")
            }
            UnifyError::Cycle(detail) => write!(f, "cycle detected: {detail}"),
        }
    }
}

impl std::error::Error for UnifyError {}

/// Errors raised by the equation-list unifier operating over Micro-ML
/// `Type`s.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    Clash(Type, Type),
    Occurs(Type, Type),
    /// An (lhs, rhs) pair matched none of the Delete/Decompose/Swap/
    /// Eliminate rules; indicates an equation-generator bug.
    Stuck(Type, Type),
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::Clash(a, b) => write!(f, "type clash: {a} and {b} are not unifiable"),
            TypeError::Occurs(v, t) => {
                write!(f, "occurs check failed: {v} occurs in {t}")
            }
            TypeError::Stuck(a, b) => write!(f, "stuck: no rule applies to {a} = {b}"),
        }
    }
}

impl std::error::Error for TypeError {}

/// Duplicate identifier in the current frame, or lookup of an identifier
/// absent from every enclosing frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeError {
    AlreadyExists(String),
    NotFound(String),
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::AlreadyExists(name) => {
                write!(f, "identifier '{name}' already exists in scope")
            }
            ScopeError::NotFound(name) => write!(f, "'{name}' not found"),
        }
    }
}

impl std::error::Error for ScopeError {}

/// The union of every fatal error this crate can raise, for callers (the
/// CLI) that just want one `Result` type to report through `mml-common`'s
/// diagnostics layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InferError {
    Scope(ScopeError),
    Type(TypeError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Scope(e) => write!(f, "{e}"),
            InferError::Type(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<ScopeError> for InferError {
    fn from(e: ScopeError) -> Self {
        InferError::Scope(e)
    }
}

impl From<TypeError> for InferError {
    fn from(e: TypeError) -> Self {
        InferError::Type(e)
    }
}
