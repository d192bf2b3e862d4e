//! End-to-end tests for the `mmlc` binary: write a source file to a temp
//! directory, invoke the compiled binary against it, and assert on its
//! stdout/stderr/exit code.

use std::io::Write;
use std::process::Command;

fn mmlc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mmlc"))
}

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(contents.as_bytes()).expect("failed to write temp file");
    file
}

fn run_check(src: &str) -> std::process::Output {
    let file = write_temp(src, ".mml");
    mmlc()
        .args(["check", file.path().to_str().unwrap()])
        .output()
        .expect("failed to invoke mmlc check")
}

fn run_unify(src: &str, engine: &str) -> std::process::Output {
    let file = write_temp(src, ".term");
    mmlc()
        .args(["unify", file.path().to_str().unwrap(), "--engine", engine])
        .output()
        .expect("failed to invoke mmlc unify")
}

#[test]
fn check_identity_prints_polymorphic_type() {
    let output = run_check("fun id x = x;");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"id : 'a -> 'a");
}

#[test]
fn check_const_prints_two_polymorphic_vars() {
    let output = run_check("fun const x y = x;");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"const : 'a -> 'b -> 'a");
}

#[test]
fn check_factorial_infers_int_to_int() {
    let output = run_check("fun fact x = if x == 0 then 1 else x * fact(x - 1);");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"fact : int -> int");
}

#[test]
fn check_apply1_prints_higher_order_type() {
    let output = run_check("fun apply1 f x = f x;");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"apply1 : ('a -> 'b) -> 'a -> 'b");
}

#[test]
fn check_list_length_uses_prelude() {
    let output = run_check("fun len xs = if null xs then 0 else 1 + len (tl xs);");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"len : 'a[] -> int");
}

#[test]
fn check_bad_addition_reports_clash_and_exits_nonzero() {
    let output = run_check("fun bad x = x + true;");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("int"));
    assert!(stderr.contains("bool"));
}

#[test]
fn check_malformed_program_reports_parse_error() {
    let output = run_check("fun id x = x");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unify_equations_engine_solves_simple_substitution() {
    let output = run_unify("x, f(y, A)", "equations");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"x = f(y, A)");
}

#[test]
fn unify_robinson_engine_unifies_variable_with_constant() {
    let output = run_unify("x, A", "robinson");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim(), @"x = A");
}

#[test]
fn unify_multiequation_engine_prints_solved_root() {
    let output = run_unify("f(x1, g(A, f(x5,B))), f(h(C), g(x2, f(B,x5))), f(h(x4), g(x6, x3))", "multiequation");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("{_} = {f(h(C), g(A, f(B, B)))}"));
}

#[test]
fn unify_detects_clash_between_distinct_constants() {
    let output = run_unify("A, B", "equations");
    assert!(!output.status.success());
}

#[test]
fn unify_detects_occurs_check_violation() {
    let output = run_unify("x, f(x)", "robinson");
    assert!(!output.status.success());
}
