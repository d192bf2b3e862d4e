//! Type-equation generator: the AST walk that feeds the equation-list
//! solver.
//!
//! Grounded on `original_source/type-inference/type_inference.py`'s
//! `gen_type_eqs` / `TypeVarGenerator`: every non-`Id` expression is
//! decorated with a fresh `t0, t1, t2, ...` type variable before its
//! sub-expressions are walked, `Id` borrows its type from the enclosing
//! scope, and each syntax construct emits its own fixed equation shape.

use std::rc::Rc;

use mml_common::Type;
use mml_parser::ast::fresh_cell;
use mml_parser::{Expr, FunctionDefinition};

use crate::error::ScopeError;
use crate::scope::Scope;

/// Supplies `t0, t1, t2, ...` by a monotonic counter, shared across one
/// definition's worth of equation generation.
pub struct TypeVarGenerator {
    next: u64,
}

impl TypeVarGenerator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next(&mut self) -> Type {
        let ty = Type::var(format!("t{}", self.next));
        self.next += 1;
        ty
    }
}

impl Default for TypeVarGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the current type assigned to `expr`'s symbol: a scope lookup for
/// `Id`, or the expression's own cell for everything else.
fn symbol_type(expr: &Expr, scope: &Rc<Scope>) -> Result<Type, ScopeError> {
    match expr {
        Expr::Id { name, .. } => {
            let cell = scope.lookup(name)?;
            let ty = cell
                .borrow()
                .clone()
                .expect("an in-scope identifier's type symbol is always set before use");
            Ok(ty)
        }
        _ => {
            let cell = expr
                .symbol()
                .expect("every non-Id expression carries its own type-symbol cell");
            let ty = cell
                .borrow()
                .clone()
                .expect("generate_expr_equations assigns a fresh type before reading it back");
            Ok(ty)
        }
    }
}

/// Generates the equations for one top-level `FunctionDefinition`: creates
/// `f` in `scope` before walking the body, so a self-recursive call
/// resolves to the same fresh type variable.
pub fn generate_function_equations(
    def: &FunctionDefinition,
    scope: &Rc<Scope>,
    tvg: &mut TypeVarGenerator,
) -> Result<Vec<(Type, Type)>, ScopeError> {
    let fn_cell = fresh_cell();
    let fn_ty = tvg.next();
    *fn_cell.borrow_mut() = Some(fn_ty.clone());
    scope.create(def.name.clone(), fn_cell)?;

    let inner = Scope::child(scope);
    let mut param_tys = Vec::with_capacity(def.params.len());
    for param in &def.params {
        let cell = fresh_cell();
        let ty = tvg.next();
        *cell.borrow_mut() = Some(ty.clone());
        inner.create(param.clone(), cell)?;
        param_tys.push(ty);
    }

    let mut equations = Vec::new();
    generate_expr_equations(&def.body, &inner, tvg, &mut equations)?;
    let body_ty = symbol_type(&def.body, &inner)?;
    equations.push((fn_ty, Type::curried_fn(&param_tys, body_ty)));
    Ok(equations)
}

/// Generates the equations for a single expression, recursing into its
/// sub-expressions first.
pub fn generate_expr_equations(
    expr: &Expr,
    scope: &Rc<Scope>,
    tvg: &mut TypeVarGenerator,
    out: &mut Vec<(Type, Type)>,
) -> Result<(), ScopeError> {
    if let Some(cell) = expr.symbol() {
        *cell.borrow_mut() = Some(tvg.next());
    }

    match expr {
        Expr::IntLit { .. } => out.push((symbol_type(expr, scope)?, Type::int())),
        Expr::RealLit { .. } => out.push((symbol_type(expr, scope)?, Type::real())),
        Expr::BoolLit { .. } => out.push((symbol_type(expr, scope)?, Type::bool())),
        Expr::Unit { .. } => out.push((symbol_type(expr, scope)?, Type::unit())),

        // No equation: an `Id`'s type comes entirely from its scope lookup.
        Expr::Id { .. } => {}

        Expr::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            generate_expr_equations(cond, scope, tvg, out)?;
            generate_expr_equations(then_branch, scope, tvg, out)?;
            generate_expr_equations(else_branch, scope, tvg, out)?;
            out.push((symbol_type(cond, scope)?, Type::bool()));
            let result = symbol_type(expr, scope)?;
            out.push((result.clone(), symbol_type(then_branch, scope)?));
            out.push((result, symbol_type(else_branch, scope)?));
        }

        Expr::Let { var, val, body, .. } => {
            generate_expr_equations(val, scope, tvg, out)?;
            let inner = Scope::child(scope);
            let var_cell = fresh_cell();
            let var_ty = tvg.next();
            *var_cell.borrow_mut() = Some(var_ty.clone());
            inner.create(var.clone(), var_cell)?;
            generate_expr_equations(body, &inner, tvg, out)?;
            out.push((var_ty, symbol_type(val, scope)?));
            out.push((symbol_type(expr, scope)?, symbol_type(body, &inner)?));
        }

        Expr::Fn { params, body, .. } => {
            let inner = Scope::child(scope);
            let mut param_tys = Vec::with_capacity(params.len());
            for param in params {
                let cell = fresh_cell();
                let ty = tvg.next();
                *cell.borrow_mut() = Some(ty.clone());
                inner.create(param.clone(), cell)?;
                param_tys.push(ty);
            }
            generate_expr_equations(body, &inner, tvg, out)?;
            let body_ty = symbol_type(body, &inner)?;
            out.push((symbol_type(expr, scope)?, Type::curried_fn(&param_tys, body_ty)));
        }

        Expr::Call { func, arg, .. } => {
            generate_expr_equations(func, scope, tvg, out)?;
            generate_expr_equations(arg, scope, tvg, out)?;
            out.push((
                symbol_type(func, scope)?,
                Type::app(symbol_type(arg, scope)?, symbol_type(expr, scope)?),
            ));
        }

        Expr::Binary { op, left, right, .. } => {
            generate_expr_equations(left, scope, tvg, out)?;
            generate_expr_equations(right, scope, tvg, out)?;
            let result = symbol_type(expr, scope)?;
            let lt = symbol_type(left, scope)?;
            let rt = symbol_type(right, scope)?;
            match op.as_str() {
                "==" | "!=" | "<" | "<=" | ">" | ">=" => {
                    out.push((result, Type::bool()));
                    out.push((lt, rt));
                }
                "+" | "-" | "*" => {
                    out.push((result, Type::int()));
                    out.push((lt, Type::int()));
                    out.push((rt, Type::int()));
                }
                "/" => {
                    out.push((result, Type::real()));
                    out.push((lt, Type::real()));
                    out.push((rt, Type::real()));
                }
                "and" | "or" => {
                    out.push((result, Type::bool()));
                    out.push((lt, Type::bool()));
                    out.push((rt, Type::bool()));
                }
                other => unreachable!("parser never produces binary operator {other}"),
            }
        }

        Expr::Unary {
            op, expr: operand, ..
        } => {
            generate_expr_equations(operand, scope, tvg, out)?;
            let result = symbol_type(expr, scope)?;
            let operand_ty = symbol_type(operand, scope)?;
            match op.as_str() {
                "-" => {
                    out.push((result, Type::int()));
                    out.push((operand_ty, Type::int()));
                }
                "not" => {
                    out.push((result, Type::bool()));
                    out.push((operand_ty, Type::bool()));
                }
                other => unreachable!("parser never produces unary operator {other}"),
            }
        }
    }

    Ok(())
}
