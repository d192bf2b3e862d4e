//! Robinson's (1965) unification algorithm over a set of terms.
//!
//! Grounded on `original_source/unification/robinson_algorithm.py`.

use rustc_hash::{FxHashMap, FxHashSet};

use mml_common::Term;

use crate::error::UnifyError;
use crate::subst::{apply_substitution, occurs, substitute};

fn substitution_all(terms: &FxHashSet<Term>, sigma: &FxHashMap<String, Term>) -> FxHashSet<Term> {
    terms.iter().map(|t| apply_substitution(t, sigma)).collect()
}

/// The disagreement set of `terms`: empty if they already agree, the whole
/// set if any is a Variable, otherwise the first argument position (in
/// left-to-right order) at which they diverge.
fn disagreement_set(terms: &FxHashSet<Term>) -> Result<FxHashSet<Term>, UnifyError> {
    if terms.len() <= 1 {
        return Ok(FxHashSet::default());
    }
    if terms.iter().any(Term::is_variable) {
        return Ok(terms.clone());
    }

    let first = terms.iter().next().unwrap();
    let name = first.name();
    let arity = first.args().len();
    if terms
        .iter()
        .any(|t| t.name() != name || t.args().len() != arity)
    {
        let mut iter = terms.iter();
        let a = iter.next().unwrap().clone();
        let b = iter.next().unwrap().clone();
        return Err(UnifyError::Clash(a, b));
    }

    for i in 0..arity {
        let ith: FxHashSet<Term> = terms.iter().map(|t| t.args()[i].clone()).collect();
        let disagreement = disagreement_set(&ith)?;
        if !disagreement.is_empty() {
            return Ok(disagreement);
        }
    }
    Ok(FxHashSet::default())
}

/// Variables sort before applications; order within each group is
/// otherwise unspecified (matches the Python reference's stable sort key).
fn lexical_order(terms: FxHashSet<Term>) -> Vec<Term> {
    let mut v: Vec<Term> = terms.into_iter().collect();
    v.sort_by_key(|t| if t.is_variable() { -1 } else { 1 });
    v
}

/// Unifies the set of terms, returning a substitution map on success.
pub fn unify(terms: &FxHashSet<Term>) -> Result<FxHashMap<String, Term>, UnifyError> {
    let mut substitution: FxHashMap<String, Term> = FxHashMap::default();

    loop {
        let applied = substitution_all(terms, &substitution);
        if applied.len() == 1 {
            return Ok(substitution);
        }

        let disagreement = lexical_order(disagreement_set(&applied)?);
        let s = &disagreement[0];
        let t = &disagreement[1];

        if s.is_variable() && !occurs(s, t) {
            for term in substitution.values_mut() {
                *term = substitute(term, s, t);
            }
            substitution.insert(s.name().to_string(), t.clone());
        } else {
            return Err(UnifyError::Occurs(s.clone(), t.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: Vec<Term>) -> FxHashSet<Term> {
        terms.into_iter().collect()
    }

    #[test]
    fn unify_single_term_trivially_succeeds() {
        let terms = set(vec![Term::variable("x")]);
        assert!(unify(&terms).unwrap().is_empty());
    }

    #[test]
    fn unify_variable_with_constant() {
        let terms = set(vec![Term::variable("x"), Term::constant("A")]);
        let sigma = unify(&terms).unwrap();
        assert_eq!(sigma.get("x"), Some(&Term::constant("A")));
    }

    #[test]
    fn unify_nested_example_from_reference() {
        // x1, f(x2, g(x4), x3, x5), f(x3, g(a), b, x6)
        let terms = set(vec![
            Term::variable("x1"),
            Term::application(
                "f",
                vec![
                    Term::variable("x2"),
                    Term::application("g", vec![Term::variable("x4")]),
                    Term::variable("x3"),
                    Term::variable("x5"),
                ],
            ),
            Term::application(
                "f",
                vec![
                    Term::variable("x3"),
                    Term::application("g", vec![Term::constant("a")]),
                    Term::constant("b"),
                    Term::variable("x6"),
                ],
            ),
        ]);
        let sigma = unify(&terms).unwrap();
        assert_eq!(sigma.get("x2"), Some(&Term::variable("x3")));
        assert_eq!(sigma.get("x4"), Some(&Term::constant("a")));
        assert_eq!(sigma.get("x3"), Some(&Term::constant("b")));
        assert_eq!(sigma.get("x5"), Some(&Term::variable("x6")));
    }

    #[test]
    fn unify_fails_on_occurs_check() {
        let terms = set(vec![
            Term::variable("x"),
            Term::application("f", vec![Term::variable("x")]),
        ]);
        assert!(matches!(unify(&terms), Err(UnifyError::Occurs(_, _))));
    }

    #[test]
    fn unify_fails_on_clash() {
        let terms = set(vec![Term::constant("A"), Term::constant("B")]);
        assert!(matches!(unify(&terms), Err(UnifyError::Clash(_, _))));
    }

    #[test]
    fn unify_fails_on_head_mismatch() {
        let terms = set(vec![
            Term::application("f", vec![Term::variable("x")]),
            Term::application("g", vec![Term::variable("x")]),
        ]);
        assert!(matches!(unify(&terms), Err(UnifyError::Clash(_, _))));
    }

    #[test]
    fn unify_decomposes_matching_applications() {
        let terms = set(vec![
            Term::application("f", vec![Term::variable("a"), Term::variable("b")]),
            Term::application("f", vec![Term::constant("A"), Term::constant("B")]),
        ]);
        let sigma = unify(&terms).unwrap();
        assert_eq!(sigma.get("a"), Some(&Term::constant("A")));
        assert_eq!(sigma.get("b"), Some(&Term::constant("B")));
    }
}
