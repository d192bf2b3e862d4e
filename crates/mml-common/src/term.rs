//! First-order term algebra.
//!
//! Grounded on `original_source/unification/terms.py`: `Variable`, a generic
//! `Application`, and `Constant` as an `Application` with no arguments.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A first-order term: a variable, or an (possibly nullary) application of a
/// named head to an ordered list of argument terms.
#[derive(Debug, Clone, Eq)]
pub enum Term {
    Variable(String),
    Application(String, Vec<Term>),
}

impl Term {
    /// A nullary application, i.e. a constant.
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Application(name.into(), Vec::new())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn application(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Application(name.into(), args)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Term::Variable(name) | Term::Application(name, _) => name,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Variable(_) => &[],
            Term::Application(_, args) => args,
        }
    }

    /// `name[0].is_uppercase()` denotes a constant, matching the term-syntax
    /// parsing convention here (the opposite of Prolog).
    pub fn classify(name: &str) -> TermKind {
        match name.chars().next() {
            Some(c) if c.is_uppercase() => TermKind::Constant,
            _ => TermKind::Variable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Variable,
    Constant,
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Variable(a), Term::Variable(b)) => a == b,
            (Term::Application(na, aa), Term::Application(nb, ab)) => na == nb && aa == ab,
            _ => false,
        }
    }
}

impl Hash for Term {
    /// Hashing uses the head name only; collisions between a
    /// variable and a same-named application are tolerated and resolved by
    /// the (structural) `Eq` impl on lookup.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{name}"),
            Term::Application(name, args) if args.is_empty() => write!(f, "{name}"),
            Term::Application(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
