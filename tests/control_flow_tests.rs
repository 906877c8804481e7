// ABOUTME: Tests for break/continue/return propagation through loops and closures

use lunar::eval::{results, run};
use lunar::parser::parse_line;
use lunar::scope::Scope;
use lunar::value::Value;
use std::rc::Rc;

fn run_line(scope: &Rc<Scope>, line: &str) {
    let tokens = parse_line(line).expect("parse failed");
    run(&tokens, scope).expect("run failed");
}

fn results_line(scope: &Rc<Scope>, line: &str) -> Vec<Value> {
    let tokens = parse_line(line).expect("parse failed");
    results(&tokens, scope).expect("results failed")
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int).collect())
}

#[test]
fn test_break_stops_the_nearest_loop() {
    let scope = Scope::new();
    run_line(&scope, "make acc []");
    run_line(
        &scope,
        "for i 1 10 1 [ if gt :i 3 [ break ] make acc lput :i :acc ]",
    );
    assert_eq!(scope.get("acc"), Some(ints(&[1, 2, 3])));
    // Consumed by the loop: nothing left for the caller to see
    assert!(!scope.breaking.get());
}

#[test]
fn test_continue_skips_the_rest_of_the_body() {
    let scope = Scope::new();
    run_line(&scope, "make acc []");
    run_line(
        &scope,
        "for i 1 5 1 [ if eq mod :i 2 0 [ continue ] make acc lput :i :acc ]",
    );
    assert_eq!(scope.get("acc"), Some(ints(&[1, 3, 5])));
    assert!(!scope.continuing.get());
}

#[test]
fn test_break_in_while() {
    let scope = Scope::new();
    run_line(&scope, "make i 0");
    run_line(
        &scope,
        "while [ true ] [ make i add :i 1 if gte :i 4 [ break ] ]",
    );
    assert_eq!(scope.get("i"), Some(Value::Int(4)));
}

#[test]
fn test_break_in_foreach() {
    let scope = Scope::new();
    run_line(&scope, "make out []");
    run_line(
        &scope,
        "foreach w [a b stop c] [ if eq :w stop [ break ] make out lput :w :out ]",
    );
    assert_eq!(
        scope.get("out"),
        Some(Value::list(vec![
            Value::Str("a".to_string()),
            Value::Str("b".to_string()),
        ]))
    );
}

#[test]
fn test_return_escapes_a_loop_inside_a_closure() {
    let scope = Scope::new();
    run_line(
        &scope,
        "function find-first-big [items] [ foreach n :items [ if gt :n 10 [ return :n ] ] return nil ]",
    );
    assert_eq!(
        results_line(&scope, "find-first-big iseq 8 20"),
        vec![Value::Int(11)]
    );
    assert!(!scope.returning.get());
}

#[test]
fn test_return_is_not_consumed_by_loops() {
    // A return inside nested loops unwinds through both and stops at the
    // closure call
    let scope = Scope::new();
    run_line(
        &scope,
        "function grid [] [ for i 1 3 1 [ for j 1 3 1 [ if eq :j 2 [ return :i ] ] ] return 0 ]",
    );
    assert_eq!(results_line(&scope, "grid"), vec![Value::Int(1)]);
}

#[test]
fn test_nested_loops_break_only_the_inner_one() {
    let scope = Scope::new();
    run_line(&scope, "make acc []");
    run_line(
        &scope,
        "for i 1 3 1 [ for j 1 5 1 [ if gt :j 1 [ break ] make acc lput :i :acc ] ]",
    );
    assert_eq!(scope.get("acc"), Some(ints(&[1, 2, 3])));
}

#[test]
fn test_results_stops_collecting_on_break() {
    let scope = Scope::new();
    let tokens = parse_line("add 1 2 break add 3 4").unwrap();
    let values = results(&tokens, &scope).unwrap();
    assert_eq!(values, vec![Value::Int(3)]);
    assert!(scope.breaking.get());
}

#[test]
fn test_results_returns_a_singleton_on_return() {
    let scope = Scope::new();
    let tokens = parse_line("add 1 2 return 42 add 3 4").unwrap();
    let values = results(&tokens, &scope).unwrap();
    assert_eq!(values, vec![Value::Int(42)]);
}

#[test]
fn test_return_value_survives_an_if_wrapper() {
    let scope = Scope::new();
    run_line(
        &scope,
        "function sign [n] [ if lt :n 0 [ return -1 ] if gt :n 0 [ return 1 ] return 0 ]",
    );
    assert_eq!(results_line(&scope, "sign -5"), vec![Value::Int(-1)]);
    assert_eq!(results_line(&scope, "sign 9"), vec![Value::Int(1)]);
    assert_eq!(results_line(&scope, "sign 0"), vec![Value::Int(0)]);
}

#[test]
fn test_closure_without_return_yields_nil() {
    let scope = Scope::new();
    run_line(&scope, "function noisy [] [ make touched true ]");
    assert_eq!(results_line(&scope, "noisy"), vec![Value::Nil]);
    assert_eq!(scope.get("touched"), Some(Value::Bool(true)));
}

#[test]
fn test_catch_does_not_swallow_control_flow() {
    // break inside catch is ordinary control flow, not an error: the
    // enclosing loop still consumes it and err is bound to nil
    let scope = Scope::new();
    run_line(&scope, "make acc []");
    run_line(
        &scope,
        "for i 1 5 1 [ catch err [ if gt :i 2 [ break ] ] make acc lput :i :acc ]",
    );
    assert_eq!(scope.get("acc"), Some(ints(&[1, 2])));
    assert_eq!(scope.get("err"), Some(Value::Nil));
}
