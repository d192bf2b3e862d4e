//! Substitution utilities over `Term`.
//!
//! Grounded on `original_source/unification/util.py`'s `occurs`,
//! `substitute`, `apply_substitution`, and `term_vars`.

use rustc_hash::{FxHashMap, FxHashSet};

use mml_common::Term;

/// True iff `var` occurs anywhere in `term`.
pub fn occurs(var: &Term, term: &Term) -> bool {
    if var == term {
        return true;
    }
    match term {
        Term::Variable(_) => false,
        Term::Application(_, args) => args.iter().any(|arg| occurs(var, arg)),
    }
}

/// Replaces every occurrence of variable `x` in `t` with `r`. Pure: `t` is
/// left unchanged, a new term is returned.
pub fn substitute(t: &Term, x: &Term, r: &Term) -> Term {
    match t {
        Term::Variable(_) if t == x => r.clone(),
        Term::Variable(_) => t.clone(),
        Term::Application(name, args) => {
            Term::application(name.clone(), args.iter().map(|a| substitute(a, x, r)).collect())
        }
    }
}

/// Applies substitution map `sigma` (name -> term) to `t`. Names absent from
/// `sigma` pass through unchanged.
pub fn apply_substitution(t: &Term, sigma: &FxHashMap<String, Term>) -> Term {
    match t {
        Term::Variable(name) => sigma.get(name).cloned().unwrap_or_else(|| t.clone()),
        Term::Application(name, args) => Term::application(
            name.clone(),
            args.iter().map(|a| apply_substitution(a, sigma)).collect(),
        ),
    }
}

/// The set of variable names occurring in `t`.
pub fn term_vars(t: &Term) -> FxHashSet<String> {
    let mut out = FxHashSet::default();
    collect_term_vars(t, &mut out);
    out
}

fn collect_term_vars(t: &Term, out: &mut FxHashSet<String>) {
    match t {
        Term::Variable(name) => {
            out.insert(name.clone());
        }
        Term::Application(_, args) => {
            for arg in args {
                collect_term_vars(arg, out);
            }
        }
    }
}
