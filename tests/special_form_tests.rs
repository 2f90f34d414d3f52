//! Tests for special forms - def!, let*, do, if, fn*, quote
//!
//! Special forms are recognized by head symbol before any binding or macro
//! lookup, with strict arities.

use mallow::{Evaluator, Value};

/// Helper function to execute mallow code
fn eval(code: &str) -> Result<Value, mallow::Error> {
    Evaluator::new().eval_source(code)
}

/// Helper to assert successful evaluation
fn assert_eval(code: &str, expected: Value) {
    let result = eval(code);
    assert!(result.is_ok(), "Failed to evaluate: {:?}", result);
    assert_eq!(result.unwrap(), expected);
}

#[test]
fn test_def_returns_value() {
    assert_eval("(def! x 3)", Value::Int(3));
}

#[test]
fn test_def_binds_in_current_env() {
    assert_eval("(def! x 3) (+ x 4)", Value::Int(7));
}

#[test]
fn test_def_rebinding_replaces() {
    assert_eval("(def! x 1) (def! x 2) x", Value::Int(2));
}

#[test]
fn test_def_requires_symbol() {
    assert!(eval("(def! 1 2)").is_err());
}

#[test]
fn test_def_arity() {
    assert!(eval("(def! x)").is_err());
    assert!(eval("(def! x 1 2)").is_err());
}

#[test]
fn test_def_error_leaves_env_untouched() {
    let evaluator = Evaluator::new();
    assert!(evaluator.eval_source("(def! x (throw 1))").is_err());
    assert!(evaluator.eval_source("x").is_err());
}

#[test]
fn test_let_star_creates_child_scope() {
    assert_eval("(let* (x 1) (let* (x 2) x))", Value::Int(2));
}

#[test]
fn test_let_star_outer_binding_survives() {
    assert_eval("(def! x 1) (let* (x 2) x) x", Value::Int(1));
}

#[test]
fn test_let_star_sequential_bindings() {
    assert_eval("(let* (a 1 b (+ a 1)) (* a b))", Value::Int(2));
}

#[test]
fn test_let_star_accepts_vector_bindings() {
    assert_eval("(let* [a 2 b 3] (+ a b))", Value::Int(5));
}

#[test]
fn test_let_star_rejects_odd_bindings() {
    assert!(eval("(let* (a 1 b) a)").is_err());
}

#[test]
fn test_let_star_body_sees_closure_over_bindings() {
    assert_eval(
        "(def! f (let* (n 10) (fn* (x) (+ x n)))) (f 5)",
        Value::Int(15),
    );
}

#[test]
fn test_do_returns_last() {
    assert_eval("(do 1 2 3)", Value::Int(3));
}

#[test]
fn test_do_evaluates_for_effect() {
    assert_eval("(def! a (atom 0)) (do (reset! a 1) (reset! a 2)) @a", Value::Int(2));
}

#[test]
fn test_do_requires_a_form() {
    assert!(eval("(do)").is_err());
}

#[test]
fn test_if_branches() {
    assert_eval("(if true 1 2)", Value::Int(1));
    assert_eval("(if false 1 2)", Value::Int(2));
}

#[test]
fn test_if_without_else_yields_nil() {
    assert_eval("(if false 1)", Value::Nil);
}

#[test]
fn test_if_truthiness_law() {
    // Everything except nil and false selects the then branch
    for (cond, expected) in [
        ("nil", 2),
        ("false", 2),
        ("true", 1),
        ("0", 1),
        ("\"\"", 1),
        ("()", 1),
        ("(list)", 1),
    ] {
        assert_eval(&format!("(if {} 1 2)", cond), Value::Int(expected));
    }
}

#[test]
fn test_if_arity() {
    assert!(eval("(if true)").is_err());
    assert!(eval("(if true 1 2 3)").is_err());
}

#[test]
fn test_if_only_evaluates_taken_branch() {
    assert_eval(
        "(def! a (atom 0))
         (if true (reset! a 1) (reset! a 2))
         @a",
        Value::Int(1),
    );
}

#[test]
fn test_fn_star_basic_application() {
    assert_eval("((fn* (a b) (+ a b)) 2 3)", Value::Int(5));
}

#[test]
fn test_fn_star_closure_capture() {
    assert_eval(
        "(def! make-adder (fn* (n) (fn* (x) (+ x n))))
         (def! add2 (make-adder 2))
         (add2 40)",
        Value::Int(42),
    );
}

#[test]
fn test_fn_star_variadic() {
    assert_eval(
        "((fn* (a & rest) rest) 1 2 3)",
        Value::list(vec![Value::Int(2), Value::Int(3)]),
    );
    assert_eval("((fn* (a & rest) rest) 1)", Value::list(vec![]));
    assert_eval("((fn* (& all) (count all)))", Value::Int(0));
}

#[test]
fn test_fn_star_arity_mismatch() {
    assert!(eval("((fn* (a b) a) 1)").is_err());
    assert!(eval("((fn* (a) a) 1 2)").is_err());
}

#[test]
fn test_fn_star_params_must_be_symbols() {
    assert!(eval("(fn* (1) 1)").is_err());
}

#[test]
fn test_recursive_function_via_def() {
    assert_eval(
        "(def! fact (fn* (n) (if (= n 0) 1 (* n (fact (- n 1))))))
         (fact 10)",
        Value::Int(3628800),
    );
}

#[test]
fn test_quote_returns_form_unevaluated() {
    assert_eval("(quote x)", Value::symbol("x"));
    assert_eval(
        "(quote (1 2))",
        Value::list(vec![Value::Int(1), Value::Int(2)]),
    );
    assert_eval("'(+ 1 2)", eval("(list (quote +) 1 2)").unwrap());
}

#[test]
fn test_quote_arity() {
    assert!(eval("(quote)").is_err());
    assert!(eval("(quote a b)").is_err());
}

#[test]
fn test_special_forms_cannot_be_shadowed() {
    // A binding named like a special form never wins in head position
    assert_eval("(def! do (fn* (x) x)) (do 1 2)", Value::Int(2));
    assert_eval(
        "(defmacro! if* (fn* () 9)) (let* (if 1) (if false 1 2))",
        Value::Int(2),
    );
}

#[test]
fn test_empty_list_self_evaluates() {
    assert_eval("()", Value::list(vec![]));
}

#[test]
fn test_not_callable_error() {
    let err = eval("(\"s\" 1)").unwrap_err();
    assert!(err.to_string().contains("not a callable"));
}
