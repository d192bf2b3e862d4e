//! Equation-list unification over first-order `Term`s — the same
//! Delete/Clash/Decompose/Swap/Eliminate rules as [`crate::eqlist`], read
//! back from `Type`'s two fixed-arity constructors (`App`, `List`) to
//! `Term`'s single variable-arity `Application`, generalizing the same
//! rule table (grounded on
//! `original_source/type-inference/type_unification.py`).
//!
//! This is the engine behind `mmlc unify --engine equations`: the other two
//! term unifiers ([`crate::robinson`], [`crate::multieq`]) already operate
//! on `Term` directly, so this module exists to offer the same equation-list
//! algorithm the type checker uses, at the term-unification CLI surface.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use mml_common::Term;

use crate::error::UnifyError;
use crate::subst::{apply_substitution, occurs};

fn apply_one(t: &Term, x: &str, r: &Term) -> Term {
    match t {
        Term::Variable(name) if name == x => r.clone(),
        Term::Variable(_) => t.clone(),
        Term::Application(name, args) => {
            Term::application(name.clone(), args.iter().map(|a| apply_one(a, x, r)).collect())
        }
    }
}

/// Runs the Delete/Decompose/Swap/Eliminate rules over a list of term
/// equations until the queue is empty, returning an idempotent substitution
/// on success.
pub fn unify(equations: Vec<(Term, Term)>) -> Result<FxHashMap<String, Term>, UnifyError> {
    let mut queue: VecDeque<(Term, Term)> = equations.into();
    let mut substitution: FxHashMap<String, Term> = FxHashMap::default();

    while let Some((t1, t2)) = queue.pop_front() {
        match (&t1, &t2) {
            // Delete
            _ if t1 == t2 => {}

            // Decompose: same head name and arity.
            (Term::Application(n1, a1), Term::Application(n2, a2))
                if n1 == n2 && a1.len() == a2.len() =>
            {
                for (x, y) in a1.iter().zip(a2.iter()).rev() {
                    queue.push_front((x.clone(), y.clone()));
                }
            }

            // Clash: two applications that disagree on head or arity.
            (Term::Application(_, _), Term::Application(_, _)) => {
                return Err(UnifyError::Clash(t1, t2))
            }

            // Swap (orient the variable onto the left)
            (Term::Application(_, _), Term::Variable(_)) => {
                queue.push_front((t2, t1));
            }

            // Occurs / Eliminate
            (Term::Variable(name), _) => {
                if occurs(&t1, &t2) {
                    return Err(UnifyError::Occurs(t1.clone(), t2));
                }
                for (lhs, rhs) in queue.iter_mut() {
                    *lhs = apply_one(lhs, name, &t2);
                    *rhs = apply_one(rhs, name, &t2);
                }
                for value in substitution.values_mut() {
                    *value = apply_one(value, name, &t2);
                }
                substitution.insert(name.clone(), t2);
            }
        }
    }

    Ok(substitution)
}

/// Unifies a flat list of terms (the CLI's `unify` entry point for this
/// engine) by pairing the first term against every other, mirroring how
/// [`crate::robinson::unify`] and [`crate::multieq::unify`] both take a
/// flat collection rather than a pre-built equation list.
pub fn unify_terms(terms: &[Term]) -> Result<FxHashMap<String, Term>, UnifyError> {
    let equations = match terms.split_first() {
        Some((first, rest)) => rest.iter().map(|t| (first.clone(), t.clone())).collect(),
        None => Vec::new(),
    };
    let substitution = unify(equations)?;
    Ok(substitution)
}

/// Applies a substitution map (name -> term) throughout `t`.
pub fn apply(t: &Term, sigma: &FxHashMap<String, Term>) -> Term {
    apply_substitution(t, sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_removes_identical_terms() {
        let result = unify(vec![(Term::constant("A"), Term::constant("A"))]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn decompose_matches_nested_applications() {
        let t1 = Term::application("f", vec![Term::variable("x"), Term::constant("A")]);
        let t2 = Term::application("f", vec![Term::constant("B"), Term::constant("A")]);
        let result = unify(vec![(t1, t2)]).unwrap();
        assert_eq!(result.get("x"), Some(&Term::constant("B")));
    }

    #[test]
    fn clash_on_different_head_names() {
        let t1 = Term::application("f", vec![Term::constant("A")]);
        let t2 = Term::application("g", vec![Term::constant("A")]);
        let err = unify(vec![(t1, t2)]).unwrap_err();
        assert!(matches!(err, UnifyError::Clash(_, _)));
    }

    #[test]
    fn occurs_check_rejects_infinite_term() {
        let x = Term::variable("x");
        let fx = Term::application("f", vec![x.clone()]);
        let err = unify(vec![(x, fx)]).unwrap_err();
        assert!(matches!(err, UnifyError::Occurs(_, _)));
    }

    #[test]
    fn unify_terms_pairs_first_against_the_rest() {
        let terms = vec![
            Term::variable("x1"),
            Term::application("f", vec![Term::variable("x2"), Term::constant("A")]),
        ];
        let result = unify_terms(&terms).unwrap();
        assert!(result.contains_key("x1"));
    }
}
