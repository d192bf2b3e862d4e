//! Equation-list unifier over Micro-ML `Type`s.
//!
//! Grounded on `original_source/type-inference/type_unification.py`'s
//! `unify`: a front-popped queue of `(Type, Type)` pairs reduced by the
//! Delete/Clash/Decompose/Swap/Occurs/Eliminate rules, producing an
//! idempotent substitution map keyed by type-variable name. This is the
//! solver the inference driver (`infer.rs`) actually runs.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use mml_common::Type;

use crate::error::TypeError;

fn occurs(var_name: &str, ty: &Type) -> bool {
    match ty {
        Type::Var(name) => name == var_name,
        Type::Con(_) => false,
        Type::App(arg, ret) => occurs(var_name, arg) || occurs(var_name, ret),
        Type::List(el) => occurs(var_name, el),
    }
}

/// Replaces every occurrence of the type variable `x` in `t` with `r`.
fn apply_one(t: &Type, x: &str, r: &Type) -> Type {
    match t {
        Type::Var(name) if name == x => r.clone(),
        Type::Var(_) | Type::Con(_) => t.clone(),
        Type::App(arg, ret) => Type::app(apply_one(arg, x, r), apply_one(ret, x, r)),
        Type::List(el) => Type::list(apply_one(el, x, r)),
    }
}

/// Applies a substitution map (name -> type) throughout `t`, the way
/// `mml-cli`'s `check` command finalizes a function's solved type.
pub fn apply_substitution(t: &Type, sigma: &FxHashMap<String, Type>) -> Type {
    match t {
        Type::Var(name) => sigma.get(name).cloned().unwrap_or_else(|| t.clone()),
        Type::Con(_) => t.clone(),
        Type::App(arg, ret) => Type::app(apply_substitution(arg, sigma), apply_substitution(ret, sigma)),
        Type::List(el) => Type::list(apply_substitution(el, sigma)),
    }
}

/// Runs the Delete/Decompose/Swap/Eliminate rules over `equations` until the
/// queue is empty, returning an idempotent substitution on success.
pub fn unify(equations: Vec<(Type, Type)>) -> Result<FxHashMap<String, Type>, TypeError> {
    let mut queue: VecDeque<(Type, Type)> = equations.into();
    let mut substitution: FxHashMap<String, Type> = FxHashMap::default();

    while let Some((t1, t2)) = queue.pop_front() {
        match (&t1, &t2) {
            // Delete
            _ if t1 == t2 => {}

            // Clash
            (Type::Con(_), Type::Con(_)) => return Err(TypeError::Clash(t1, t2)),

            // Decompose (function types)
            (Type::App(a1, r1), Type::App(a2, r2)) => {
                queue.push_front((*r1.clone(), *r2.clone()));
                queue.push_front((*a1.clone(), *a2.clone()));
            }

            // Decompose (lists)
            (Type::List(e1), Type::List(e2)) => {
                queue.push_front((*e1.clone(), *e2.clone()));
            }

            // Swap (orient the variable onto the left)
            (t1, Type::Var(_)) if !matches!(t1, Type::Var(_)) => {
                queue.push_front((t2, t1.clone()));
            }

            // Occurs / Eliminate
            (Type::Var(name), _) => {
                if occurs(name, &t2) {
                    return Err(TypeError::Occurs(t1.clone(), t2));
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

            // Stuck
            _ => return Err(TypeError::Stuck(t1, t2)),
        }
    }

    Ok(substitution)
}
