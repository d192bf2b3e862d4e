//! Multiequation-based unification, Martelli & Montanari's (1982) Algorithm
//! 3.
//!
//! Grounded on `original_source/unification/martelli_algorithm_3.py`: a
//! multiequation groups a non-empty set of variables with a multiset of
//! non-variable terms; `DEC` finds their common part and residual
//! frontier, `compactify` merges multiequations whose variable sets
//! overlap via [`crate::uf::UnionFind`], and `select_multiequation` folds
//! Algorithm 2's post-hoc cycle check into the selection predicate itself
//! (a multiequation is selectable only if no other multiequation in `U`
//! mentions its variables, left or right).

use std::fmt;

use rustc_hash::FxHashSet;

use mml_common::Term;

use crate::error::UnifyError;
use crate::subst::term_vars;
use crate::uf::UnionFind;

/// `S = M`: a non-empty set of variable names equated with a multiset of
/// non-variable terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Multiequation {
    pub vars: FxHashSet<String>,
    pub terms: Vec<Term>,
}

impl Multiequation {
    fn new(vars: FxHashSet<String>, terms: Vec<Term>) -> Self {
        Self { vars, terms }
    }
}

/// Renders as `{v1, v2} = {t1, t2}`, variables sorted for a stable rendering
/// (the unnamed root multiequation's empty-string variable prints as `_`).
/// Used by `mmlc unify --engine multiequation` and by the snapshot test
/// below.
impl fmt::Display for Multiequation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vars: Vec<&str> = self.vars.iter().map(String::as_str).collect();
        vars.sort();
        let vars = vars
            .iter()
            .map(|v| if v.is_empty() { "_" } else { v })
            .collect::<Vec<_>>()
            .join(", ");
        let terms = self
            .terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{vars}}} = {{{terms}}}")
    }
}

/// Splits a multiset of terms into its variable names and its (possibly
/// empty) multiset of non-variable terms.
fn make_multeq(m: &[Term]) -> Multiequation {
    let mut vars = FxHashSet::default();
    let mut terms = Vec::new();
    for term in m {
        match term {
            Term::Variable(name) => {
                vars.insert(name.clone());
            }
            app => terms.push(app.clone()),
        }
    }
    Multiequation::new(vars, terms)
}

/// `DEC(M)`: the common part and frontier of a multiset of non-variable
/// terms. If any term in `M` is a Variable, the common
/// part is that variable and the frontier is `[make_multeq(M)]`; otherwise
/// every term must share head name and arity (else a clash), and `DEC`
/// recurses pointwise over argument positions.
fn dec(m: &[Term]) -> Result<(Term, Vec<Multiequation>), UnifyError> {
    if let Some(v) = m.iter().find(|t| t.is_variable()) {
        return Ok((v.clone(), vec![make_multeq(m)]));
    }

    let first = &m[0];
    let name = first.name();
    let arity = first.args().len();
    for t in m {
        if t.name() != name || t.args().len() != arity {
            return Err(UnifyError::Clash(first.clone(), t.clone()));
        }
    }

    let mut common_args = Vec::with_capacity(arity);
    let mut frontier = Vec::new();
    for i in 0..arity {
        let leaves: Vec<Term> = m.iter().map(|t| t.args()[i].clone()).collect();
        let (common_i, frontier_i) = dec(&leaves)?;
        common_args.push(common_i);
        frontier.extend(frontier_i);
    }
    Ok((Term::application(name.to_string(), common_args), frontier))
}

/// Merges multiequations whose variable sets intersect, directly or
/// transitively, via union-find over variable names ("compactification").
fn compactify(multiequations: Vec<Multiequation>) -> Vec<Multiequation> {
    let mut uf = UnionFind::new();
    for meq in &multiequations {
        let names: Vec<&str> = meq.vars.iter().map(String::as_str).collect();
        uf.union_all(names);
    }

    let mut groups: Vec<(String, Multiequation)> = Vec::new();
    for meq in multiequations {
        let Some(any_var) = meq.vars.iter().next() else {
            groups.push((String::new(), meq));
            continue;
        };
        let root = uf.find(any_var);
        if let Some((_, existing)) = groups.iter_mut().find(|(r, _)| *r == root) {
            existing.vars.extend(meq.vars);
            existing.terms.extend(meq.terms);
        } else {
            groups.push((root, meq));
        }
    }
    groups.into_iter().map(|(_, meq)| meq).collect()
}

/// Selects the index of a multiequation in `u` whose variables occur
/// neither in any other multiequation's left-hand side nor in any other
/// multiequation's right-hand-side terms (Algorithm 3's selection
/// predicate).
fn select_multiequation(u: &[Multiequation]) -> Option<usize> {
    'candidates: for (i, candidate) in u.iter().enumerate() {
        for (j, other) in u.iter().enumerate() {
            // A variable occurs in the left-hand side of some other
            // multiequation.
            if i != j && !candidate.vars.is_disjoint(&other.vars) {
                continue 'candidates;
            }
            // A variable occurs in a right-hand-side term of `other` --
            // checked against `other == candidate` too, since that is
            // exactly what catches a direct self-cycle like `x = f(x)`.
            for term in &other.terms {
                if !candidate.vars.is_disjoint(&term_vars(term)) {
                    continue 'candidates;
                }
            }
        }
        return Some(i);
    }
    None
}

/// Solves a system of multiequations, producing the solved sequence `T`
///. Fails with [`UnifyError::Cycle`] when no
/// multiequation in the unsolved part `U` is selectable while `U` is
/// non-empty, or with [`UnifyError::Clash`] when `DEC` finds incompatible
/// heads or arities.
pub fn solve(system: Vec<Multiequation>) -> Result<Vec<Multiequation>, UnifyError> {
    let mut u = system;
    let mut t: Vec<Multiequation> = Vec::new();

    while !u.is_empty() {
        let idx = select_multiequation(&u).ok_or_else(|| {
            UnifyError::Cycle("no multiequation in the unsolved system is selectable".to_string())
        })?;
        let mut selected = u.remove(idx);

        if selected.terms.is_empty() {
            t.push(selected);
            continue;
        }

        let (common, frontier) = dec(&selected.terms)?;
        selected.terms = vec![common];
        let selected_vars = selected.vars.clone();
        u.push(selected);
        u.extend(frontier);
        u = compactify(u);

        // Re-locate the selected multiequation (compactify may have merged
        // it with others) by the variable it contributed, then move it
        // from U to the end of T.
        let anchor = selected_anchor(&u, &selected_vars);
        let moved = u.remove(anchor);
        t.push(moved);
    }

    Ok(t)
}

/// After `compactify`, finds the (possibly merged) multiequation in `u`
/// that now carries one of `selected_vars`.
fn selected_anchor(u: &[Multiequation], selected_vars: &FxHashSet<String>) -> usize {
    u.iter()
        .position(|meq| !meq.vars.is_disjoint(selected_vars))
        .expect("the selected multiequation's variables must survive compactification")
}

/// Top-level entry point mirroring the Python reference's `unify`: builds
/// one multiequation per variable appearing in `terms` plus a single
/// "root" multiequation (an unnamed fresh variable) equating all of
/// `terms`, then solves the system.
pub fn unify(terms: &[Term]) -> Result<Vec<Multiequation>, UnifyError> {
    let mut all_vars: FxHashSet<String> = FxHashSet::default();
    for t in terms {
        all_vars.extend(term_vars(t));
    }

    let mut system = vec![Multiequation::new(
        [String::new()].into_iter().collect(),
        terms.to_vec(),
    )];
    for name in all_vars {
        system.push(Multiequation::new([name].into_iter().collect(), Vec::new()));
    }

    solve(system)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(src: &str) -> Term {
        mml_parser::parse_term(src).unwrap()
    }

    #[test]
    fn dec_finds_common_part_over_matching_applications() {
        let terms = vec![
            t("f(x1, g(A, f(x5, B)))"),
            t("f(h(C), g(x2, f(B, x5)))"),
            t("f(h(x4), g(x6, x3))"),
        ];
        let (common, _frontier) = dec(&terms).unwrap();
        assert_eq!(common, t("f(h(C), g(A, f(B, B)))"));
    }

    #[test]
    fn dec_clashes_on_mismatched_arity() {
        let terms = vec![t("f(x, y)"), t("f(x)")];
        assert!(matches!(dec(&terms), Err(UnifyError::Clash(_, _))));
    }

    #[test]
    fn compactify_merges_overlapping_multiequations() {
        let meqs = vec![
            Multiequation::new(["x1".into(), "x2".into()].into_iter().collect(), vec![t("A")]),
            Multiequation::new(["x2".into(), "x3".into()].into_iter().collect(), vec![t("B")]),
            Multiequation::new(["x4".into()].into_iter().collect(), vec![t("C")]),
        ];
        let merged = compactify(meqs);
        assert_eq!(merged.len(), 2);
        let big = merged.iter().find(|m| m.vars.len() == 3).unwrap();
        assert_eq!(big.vars, ["x1".into(), "x2".into(), "x3".into()].into_iter().collect());
        assert_eq!(big.terms.len(), 2);
    }

    #[test]
    fn compactify_is_idempotent() {
        let meqs = vec![
            Multiequation::new(["a".into(), "b".into()].into_iter().collect(), vec![t("A")]),
            Multiequation::new(["b".into(), "c".into()].into_iter().collect(), vec![t("B")]),
        ];
        let once = compactify(meqs);
        let twice = compactify(once.clone());
        let mut once_sorted: Vec<Vec<String>> = once
            .iter()
            .map(|m| {
                let mut v: Vec<String> = m.vars.iter().cloned().collect();
                v.sort();
                v
            })
            .collect();
        let mut twice_sorted: Vec<Vec<String>> = twice
            .iter()
            .map(|m| {
                let mut v: Vec<String> = m.vars.iter().cloned().collect();
                v.sort();
                v
            })
            .collect();
        once_sorted.sort();
        twice_sorted.sort();
        assert_eq!(once_sorted, twice_sorted);
    }

    #[test]
    fn unify_example_one_from_reference() {
        let terms = vec![
            t("f(x1, g(A, f(x5, B)))"),
            t("f(h(C), g(x2, f(B, x5)))"),
            t("f(h(x4), g(x6, x3))"),
        ];
        let solved = unify(&terms).unwrap();
        let root = solved.iter().find(|m| m.vars.contains("")).unwrap();
        assert_eq!(root.terms, vec![t("f(h(C), g(A, f(B, B)))")]);
    }

    #[test]
    fn unify_example_one_solved_root_renders_as_expected() {
        // Same fixture as `unify_example_one_from_reference`, snapshotting
        // the root multiequation's `Display` rendering end to end (this is
        // the line `mmlc unify --engine multiequation` prints for it).
        let terms = vec![
            t("f(x1, g(A, f(x5, B)))"),
            t("f(h(C), g(x2, f(B, x5)))"),
            t("f(h(x4), g(x6, x3))"),
        ];
        let solved = unify(&terms).unwrap();
        let root = solved.iter().find(|m| m.vars.contains("")).unwrap();
        insta::assert_snapshot!(root.to_string(), @"{_} = {f(h(C), g(A, f(B, B)))}");
    }

    #[test]
    fn unify_example_two_from_reference() {
        let terms = vec![
            t("f(x1, g(x2,x3), x2, B)"),
            t("f(g(h(A,x5), x2), x1, h(A,x4), x4)"),
        ];
        let solved = unify(&terms).unwrap();
        let root = solved.iter().find(|m| m.vars.contains("")).unwrap();
        assert_eq!(
            root.terms,
            vec![t("f(g(h(A,B), h(A,B)), g(h(A,B), h(A,B)), h(A,B), B)")]
        );
    }

    #[test]
    fn unify_detects_structural_cycle() {
        // x = f(x): the only multiequation in the system mentions its own
        // variable on the right-hand side, so it is never selectable.
        let system = vec![Multiequation::new(
            ["x".to_string()].into_iter().collect(),
            vec![t("f(x)")],
        )];
        let result = solve(system);
        assert!(matches!(result, Err(UnifyError::Cycle(_))));
    }

    #[test]
    fn unify_topologically_orders_solved_system() {
        // x1 = f(x2), x2 = A: x2 must be solved before x1 so that reading
        // T front-to-back never references a not-yet-defined variable on
        // the right.
        let system = vec![
            Multiequation::new(["x1".to_string()].into_iter().collect(), vec![t("f(x2)")]),
            Multiequation::new(["x2".to_string()].into_iter().collect(), vec![t("A")]),
        ];
        let solved = solve(system).unwrap();
        let pos_x1 = solved.iter().position(|m| m.vars.contains("x1")).unwrap();
        let pos_x2 = solved.iter().position(|m| m.vars.contains("x2")).unwrap();
        assert!(pos_x2 < pos_x1);
    }
}
