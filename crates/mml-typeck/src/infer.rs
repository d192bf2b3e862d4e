//! Per-definition type-inference driver.
//!
//! Grounded on `original_source/type-inference/type_inference.py`'s
//! `type_infer`: every top-level `FunctionDefinition` gets a brand-new
//! global scope, a brand-new prelude, and its own `TypeVarGenerator`
//! starting back at `t0`. There is no cross-definition type sharing, a
//! deliberate monomorphic-`let` design (see DESIGN.md): two definitions
//! that both call `hd` each get their own fresh `'a`, and two calls to `hd`
//! *within* the same definition conflate their element types, by design.

use mml_common::Type;
use mml_parser::ast::fresh_cell;
use mml_parser::{FunctionDefinition, TypeCell};

use crate::eqlist;
use crate::error::InferError;
use crate::generator::{generate_function_equations, TypeVarGenerator};
use crate::scope::Scope;

fn cell_of(ty: Type) -> TypeCell {
    let cell = fresh_cell();
    *cell.borrow_mut() = Some(ty);
    cell
}

/// Installs the list-processing prelude, each binding drawing its own
/// fresh type variable from `tvg` rather than sharing one.
fn install_builtins(scope: &Scope, tvg: &mut TypeVarGenerator) -> Result<(), InferError> {
    let a = tvg.next();
    scope.create("nil", cell_of(Type::list(a)))?;

    let a = tvg.next();
    scope.create("hd", cell_of(Type::app(Type::list(a.clone()), a)))?;

    let a = tvg.next();
    scope.create("tl", cell_of(Type::app(Type::list(a.clone()), Type::list(a))))?;

    let a = tvg.next();
    scope.create("null", cell_of(Type::app(Type::list(a), Type::bool())))?;

    let a = tvg.next();
    scope.create(
        "cons",
        cell_of(Type::app(a.clone(), Type::app(Type::list(a.clone()), Type::list(a)))),
    )?;

    Ok(())
}

/// Infers the principal type of one top-level definition, from a fresh
/// global scope and prelude.
pub fn infer_definition(def: &FunctionDefinition) -> Result<Type, InferError> {
    let scope = Scope::root();
    let mut tvg = TypeVarGenerator::new();
    install_builtins(&scope, &mut tvg)?;

    let equations = generate_function_equations(def, &scope, &mut tvg)?;
    let substitution = eqlist::unify(equations)?;

    let fn_cell = scope.lookup(&def.name)?;
    let fn_ty = fn_cell
        .borrow()
        .clone()
        .expect("generate_function_equations always assigns the definition's own cell");
    let solved = eqlist::apply_substitution(&fn_ty, &substitution);
    *fn_cell.borrow_mut() = Some(solved.clone());
    Ok(solved)
}

/// Infers every top-level definition in a program, in source order,
/// independently.
pub fn infer_program(defs: &[FunctionDefinition]) -> Vec<(String, Result<Type, InferError>)> {
    defs.iter()
        .map(|def| (def.name.clone(), infer_definition(def)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mml_parser::parse_program;

    fn infer_first(src: &str) -> Type {
        let defs = parse_program(src).unwrap();
        infer_definition(&defs[0]).unwrap()
    }

    #[test]
    fn identity_is_polymorphic_in_the_param() {
        let ty = infer_first("fun id x = x;");
        assert_eq!(ty.to_principal_string(), "'a -> 'a");
    }

    #[test]
    fn const_function_ignores_second_argument() {
        let ty = infer_first("fun const x y = x;");
        assert_eq!(ty.to_principal_string(), "'a -> 'b -> 'a");
    }

    #[test]
    fn arithmetic_pins_parameter_to_int() {
        let ty = infer_first("fun inc x = x + 1;");
        assert_eq!(ty.to_principal_string(), "int -> int");
    }

    #[test]
    fn recursive_factorial_infers_int_to_int() {
        let ty = infer_first("fun fact n = if n == 0 then 1 else n * fact(n - 1);");
        assert_eq!(ty.to_principal_string(), "int -> int");
    }

    #[test]
    fn list_length_uses_builtin_prelude() {
        let ty = infer_first("fun len xs = if null xs then 0 else 1 + len(tl xs);");
        assert_eq!(ty.to_principal_string(), "'a[] -> int");
    }

    #[test]
    fn builtin_hd_is_independently_polymorphic_per_definition() {
        let ty = infer_first("fun first xs = hd xs;");
        assert_eq!(ty.to_principal_string(), "'a[] -> 'a");
    }

    #[test]
    fn occurs_check_failure_surfaces_as_type_error() {
        // self-application has no finite principal type.
        let defs = parse_program("fun omega x = x x;").unwrap();
        let err = infer_definition(&defs[0]).unwrap_err();
        assert!(matches!(err, InferError::Type(_)));
    }

    #[test]
    fn two_definitions_do_not_share_fresh_variable_counters() {
        let defs = parse_program("fun id x = x; fun id2 y = y;").unwrap();
        let results = infer_program(&defs);
        assert_eq!(results.len(), 2);
        for (_, result) in &results {
            assert_eq!(result.as_ref().unwrap().to_principal_string(), "'a -> 'a");
        }
    }
}
