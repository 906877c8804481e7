// ABOUTME: The built-in procedure catalogue exercised through whole programs

use lunar::error::EvalError;
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

fn error_line(scope: &Rc<Scope>, line: &str) -> EvalError {
    let tokens = parse_line(line).expect("parse failed");
    results(&tokens, scope).expect_err("expected an error")
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int).collect())
}

fn strs(values: &[&str]) -> Value {
    Value::list(values.iter().map(|s| Value::Str(s.to_string())).collect())
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_int_arithmetic_stays_int() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "add 2 3 sub 1 4 mul -4 3"),
        vec![Value::Int(5), Value::Int(-3), Value::Int(-12)]
    );
}

#[test]
fn test_floats_promote() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "add 1 0.5"), vec![Value::Float(1.5)]);
}

#[test]
fn test_div_always_yields_float() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "div 6 3"), vec![Value::Float(2.0)]);
    assert!(matches!(
        error_line(&scope, "div 1 0"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_mod_follows_divisor_sign() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "mod -7 3"), vec![Value::Int(2)]);
    assert_eq!(results_line(&scope, "mod 7 -3"), vec![Value::Int(-2)]);
    assert!(matches!(
        error_line(&scope, "mod 1 0"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_overflow_is_an_error_not_a_wrap() {
    let scope = Scope::new();
    assert!(matches!(
        error_line(&scope, "add 9223372036854775807 1"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_pow_negative_exponent_goes_float() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "pow 2 10"), vec![Value::Int(1024)]);
    assert_eq!(results_line(&scope, "pow 2 -1"), vec![Value::Float(0.5)]);
}

#[test]
fn test_unary_number_operations() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "minus 5"), vec![Value::Int(-5)]);
    assert_eq!(results_line(&scope, "abs -3"), vec![Value::Int(3)]);
    assert_eq!(results_line(&scope, "int 2.9"), vec![Value::Int(2)]);
    assert_eq!(results_line(&scope, "int -2.9"), vec![Value::Int(-2)]);
}

#[test]
fn test_sqrt_rejects_negative_input() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "sqrt 9"), vec![Value::Float(3.0)]);
    assert!(matches!(
        error_line(&scope, "sqrt -1"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_min_max_return_the_operand() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "min 2 1.5"), vec![Value::Float(1.5)]);
    assert_eq!(results_line(&scope, "max 2 1.5"), vec![Value::Int(2)]);
}

// ============================================================================
// Comparison and logic
// ============================================================================

#[test]
fn test_ordering_across_int_and_float() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "lt 1 1.5"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "gte 2 2"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "gt 1 2"), vec![Value::Bool(false)]);
    assert!(matches!(
        error_line(&scope, "lt 1 foo"),
        EvalError::TypeMismatch { .. }
    ));
}

#[test]
fn test_equality_is_structural() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "eq list 1 2 list 1 2"),
        vec![Value::Bool(true)]
    );
    // Int and Float compare numerically
    assert_eq!(results_line(&scope, "neq 1 1.0"), vec![Value::Bool(false)]);
}

#[test]
fn test_and_or_return_operands() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "and 1 foo"),
        vec![Value::Str("foo".to_string())]
    );
    assert_eq!(results_line(&scope, "and 0 9"), vec![Value::Int(0)]);
    assert_eq!(results_line(&scope, "or nil 9"), vec![Value::Int(9)]);
}

#[test]
fn test_not_uses_truthiness() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "not empty"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "not 1"), vec![Value::Bool(false)]);
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_first_and_last_on_lists_and_strings() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "first iseq 1 3"), vec![Value::Int(1)]);
    assert_eq!(results_line(&scope, "last iseq 1 3"), vec![Value::Int(3)]);
    assert_eq!(
        results_line(&scope, "first word ab c"),
        vec![Value::Str("a".to_string())]
    );
    assert!(matches!(
        error_line(&scope, "first []"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_butfirst_butlast() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "butfirst iseq 1 3"), vec![ints(&[2, 3])]);
    assert_eq!(results_line(&scope, "butlast iseq 1 3"), vec![ints(&[1, 2])]);
    assert_eq!(
        results_line(&scope, "butfirst word ab c"),
        vec![Value::Str("bc".to_string())]
    );
}

#[test]
fn test_count_over_lists_strings_and_dicts() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "count [a b c]"), vec![Value::Int(3)]);
    assert_eq!(results_line(&scope, "count word ab c"), vec![Value::Int(3)]);
    assert_eq!(results_line(&scope, "count dict"), vec![Value::Int(0)]);
}

#[test]
fn test_item_indexes_from_zero_and_from_the_end() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "item 0 iseq 10 12"),
        vec![Value::Int(10)]
    );
    assert_eq!(
        results_line(&scope, "item -1 iseq 10 12"),
        vec![Value::Int(12)]
    );
    assert!(matches!(
        error_line(&scope, "item 3 iseq 10 12"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_iseq_runs_both_directions() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "iseq 1 4"), vec![ints(&[1, 2, 3, 4])]);
    assert_eq!(results_line(&scope, "iseq 3 1"), vec![ints(&[3, 2, 1])]);
}

#[test]
fn test_fput_lput_build_fresh_lists() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "fput 0 iseq 1 2"),
        vec![ints(&[0, 1, 2])]
    );
    assert_eq!(
        results_line(&scope, "lput 3 iseq 1 2"),
        vec![ints(&[1, 2, 3])]
    );
}

#[test]
fn test_slice_clamps_like_python() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "slice iseq 1 5 1 3"),
        vec![ints(&[2, 3])]
    );
    assert_eq!(
        results_line(&scope, "slice iseq 1 5 -2 99"),
        vec![ints(&[4, 5])]
    );
    assert_eq!(results_line(&scope, "slice iseq 1 5 4 2"), vec![ints(&[])]);
}

#[test]
fn test_sorted_leaves_the_original_alone() {
    let scope = Scope::new();
    run_line(&scope, "make xs list 3 1");
    run_line(&scope, "make ys sorted :xs");
    assert_eq!(scope.get("ys"), Some(ints(&[1, 3])));
    assert_eq!(scope.get("xs"), Some(ints(&[3, 1])));
}

#[test]
fn test_sorted_rejects_mixed_types() {
    let scope = Scope::new();
    assert!(matches!(
        error_line(&scope, "sorted list 1 a"),
        EvalError::TypeMismatch { .. }
    ));
}

#[test]
fn test_concat_joins_lists_and_strings() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "concat iseq 1 2 iseq 3 3"),
        vec![ints(&[1, 2, 3])]
    );
    assert_eq!(
        results_line(&scope, "concat word a b word c d"),
        vec![Value::Str("abcd".to_string())]
    );
    assert!(matches!(
        error_line(&scope, "concat iseq 1 1 2"),
        EvalError::TypeMismatch { .. }
    ));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_case_and_trim() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "uppercase abc"),
        vec![Value::Str("ABC".to_string())]
    );
    assert_eq!(
        results_line(&scope, "lowercase ABC"),
        vec![Value::Str("abc".to_string())]
    );
    // " x " assembled from the whitespace constants
    assert_eq!(
        results_line(&scope, "trim word space word x space"),
        vec![Value::Str("x".to_string())]
    );
    assert_eq!(
        results_line(&scope, "ltrim word space x"),
        vec![Value::Str("x".to_string())]
    );
    assert_eq!(
        results_line(&scope, "rtrim word x space"),
        vec![Value::Str("x".to_string())]
    );
}

#[test]
fn test_split_and_join() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "split word a word space b"),
        vec![strs(&["a", "b"])]
    );
    assert_eq!(
        results_line(&scope, "join [a b c]"),
        vec![Value::Str("a b c".to_string())]
    );
}

#[test]
fn test_split_by_keeps_empty_fields() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "split-by , a,,b"),
        vec![strs(&["a", "", "b"])]
    );
    assert_eq!(
        results_line(&scope, "join-by - [a b]"),
        vec![Value::Str("a-b".to_string())]
    );
}

#[test]
fn test_word_concatenates_textual_forms() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "word foo 7"),
        vec![Value::Str("foo7".to_string())]
    );
}

#[test]
fn test_affix_predicates() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "starts-with abcdef abc"),
        vec![Value::Bool(true)]
    );
    assert_eq!(
        results_line(&scope, "ends-with abcdef def"),
        vec![Value::Bool(true)]
    );
    assert_eq!(
        results_line(&scope, "starts-with abc xyz"),
        vec![Value::Bool(false)]
    );
}

#[test]
fn test_to_string_uses_the_display_form() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "to-string 3.0"),
        vec![Value::Str("3.0".to_string())]
    );
}

#[test]
fn test_parse_int_and_float() {
    let scope = Scope::new();
    // Quoting keeps the literal a word instead of a number token
    assert_eq!(
        results_line(&scope, "parse-int \"-12\""),
        vec![Value::Int(-12)]
    );
    assert_eq!(
        results_line(&scope, "parse-float \"2.5\""),
        vec![Value::Float(2.5)]
    );
    assert!(matches!(
        error_line(&scope, "parse-int nope"),
        EvalError::Runtime(_)
    ));
}

// ============================================================================
// Type predicates
// ============================================================================

#[test]
fn test_variant_predicates() {
    let scope = Scope::new();
    assert_eq!(results_line(&scope, "is-int 1"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-int 1.0"), vec![Value::Bool(false)]);
    assert_eq!(results_line(&scope, "is-float 1.0"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-string foo"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-bool true"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-list []"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-dict dict"), vec![Value::Bool(true)]);
    assert_eq!(
        results_line(&scope, "is-fn fn [] []"),
        vec![Value::Bool(true)]
    );
    assert_eq!(results_line(&scope, "is-proc 1"), vec![Value::Bool(false)]);
}

#[test]
fn test_char_classes_reject_the_empty_string() {
    let scope = Scope::new();
    assert_eq!(
        results_line(&scope, "is-digit \"123\""),
        vec![Value::Bool(true)]
    );
    assert_eq!(
        results_line(&scope, "is-digit empty"),
        vec![Value::Bool(false)]
    );
    assert_eq!(results_line(&scope, "is-alpha abc"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-alpha ab1"), vec![Value::Bool(false)]);
    assert_eq!(results_line(&scope, "is-alnum ab1"), vec![Value::Bool(true)]);
    assert_eq!(results_line(&scope, "is-space space"), vec![Value::Bool(true)]);
}

// ============================================================================
// Dicts
// ============================================================================

#[test]
fn test_put_get_del_round() {
    let scope = Scope::new();
    run_line(&scope, "make d dict");
    run_line(&scope, "put :d answer 42");
    assert_eq!(results_line(&scope, "get :d answer"), vec![Value::Int(42)]);
    run_line(&scope, "del :d answer");
    assert_eq!(results_line(&scope, "get :d answer"), vec![Value::Nil]);
    // Deleting a missing key is a no-op
    run_line(&scope, "del :d answer");
}

#[test]
fn test_missing_key_is_nil() {
    let scope = Scope::new();
    run_line(&scope, "make d dict");
    assert_eq!(results_line(&scope, "get :d ghost"), vec![Value::Nil]);
}

#[test]
fn test_keys_keep_insertion_order() {
    let scope = Scope::new();
    run_line(&scope, "make d dict");
    run_line(&scope, "put :d c 0 put :d a 0 put :d b 0");
    assert_eq!(
        results_line(&scope, "keys :d"),
        vec![strs(&["c", "a", "b"])]
    );
}

#[test]
fn test_int_and_whole_float_share_a_slot() {
    let scope = Scope::new();
    run_line(&scope, "make d dict");
    run_line(&scope, "put :d 1 10");
    assert_eq!(results_line(&scope, "get :d 1.0"), vec![Value::Int(10)]);
}

#[test]
fn test_unhashable_keys_are_rejected() {
    let scope = Scope::new();
    run_line(&scope, "make d dict");
    assert!(matches!(
        error_line(&scope, "put :d [] 1"),
        EvalError::TypeMismatch { .. }
    ));
}

// ============================================================================
// Randomness and timing
// ============================================================================

#[test]
fn test_random_stays_in_range() {
    let scope = Scope::new();
    for _ in 0..100 {
        match &results_line(&scope, "random 1 6")[0] {
            Value::Int(n) => assert!((1..=6).contains(n)),
            other => panic!("expected int, got {:?}", other),
        }
    }
    assert!(matches!(
        error_line(&scope, "random 5 1"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_rerandom_replays_the_sequence() {
    let scope = Scope::new();
    run_line(&scope, "rerandom 1234 make a rnd rerandom 1234 make b rnd");
    assert_eq!(scope.get("a"), scope.get("b"));
}

#[test]
fn test_pick_returns_a_member() {
    let scope = Scope::new();
    match &results_line(&scope, "pick iseq 1 3")[0] {
        Value::Int(n) => assert!((1..=3).contains(n)),
        other => panic!("expected int, got {:?}", other),
    }
    assert!(matches!(
        error_line(&scope, "pick []"),
        EvalError::Runtime(_)
    ));
}

#[test]
fn test_timer_is_monotonic() {
    let scope = Scope::new();
    let first = results_line(&scope, "timer");
    let second = results_line(&scope, "timer");
    match (&first[0], &second[0]) {
        (Value::Float(x), Value::Float(y)) => assert!(y >= x),
        other => panic!("expected floats, got {:?}", other),
    }
}
