//! End-to-end parsing tests: source text all the way to a complete AST or
//! term tree, exercising both external grammars this crate supports.

use mml_parser::{parse_program, parse_term, parse_term_list, Expr};

#[test]
fn term_syntax_parses_nested_application() {
    let term = parse_term("f(x, g(A, y))").unwrap();
    assert_eq!(term.to_string(), "f(x, g(A, y))");
}

#[test]
fn term_syntax_rejects_unbalanced_parens() {
    let err = parse_term("f(x, g(A, y)").unwrap_err();
    assert!(!err.message.is_empty());
}

#[test]
fn term_list_splits_top_level_terms_on_comma() {
    let terms = parse_term_list("x, A, f(x, B)").unwrap();
    assert_eq!(terms.len(), 3);
}

#[test]
fn microml_program_parses_multiple_definitions() {
    let defs = parse_program(
        "fun fact n = if n == 0 then 1 else n * fact(n - 1);\n\
         fun id x = x;",
    )
    .unwrap();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "fact");
    assert_eq!(defs[1].name, "id");
    assert_eq!(defs[1].params, vec!["x".to_string()]);
}

#[test]
fn microml_let_and_fn_expressions_nest_correctly() {
    let defs = parse_program("fun f x = let g = fn y => y + 1 in g x;").unwrap();
    match &defs[0].body {
        Expr::Let { var, .. } => assert_eq!(var, "g"),
        other => panic!("expected a let expression, got {other:?}"),
    }
}

#[test]
fn microml_rejects_missing_semicolon() {
    let err = parse_program("fun f x = x").unwrap_err();
    assert!(!err.message.is_empty());
}
