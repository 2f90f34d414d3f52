//! Tests for the macro system - defmacro!, macroexpand, application-time
//! expansion
//!
//! Macros receive raw, unevaluated forms; their result is evaluated again.

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
fn test_defmacro_defines_macro() {
    let result = eval("(defmacro! m (fn* (x) x)) m").unwrap();
    assert!(matches!(result, Value::Macro(_)));
}

#[test]
fn test_defmacro_requires_a_function() {
    assert!(eval("(defmacro! m 1)").is_err());
    assert!(eval("(defmacro! m (atom 1))").is_err());
}

#[test]
fn test_unless_macro() {
    assert_eval(
        "(defmacro! unless (fn* (c t f) (list (quote if) c f t)))
         (unless false 1 2)",
        Value::Int(1),
    );
    assert_eval(
        "(defmacro! unless (fn* (c t f) (list (quote if) c f t)))
         (unless true 1 2)",
        Value::Int(2),
    );
}

#[test]
fn test_macro_sees_unevaluated_arguments() {
    // The argument is an undefined symbol; a function would fail to
    // evaluate it, a macro receives it as data
    assert_eval(
        "(defmacro! name-of (fn* (x) (str x)))
         (name-of undefined-thing)",
        Value::Str("undefined-thing".to_string()),
    );
}

#[test]
fn test_macroexpand_returns_unevaluated_form() {
    assert_eval(
        "(defmacro! unless (fn* (c t f) (list (quote if) c f t)))
         (macroexpand (unless false 1 2))",
        eval("(list (quote if) false 2 1)").unwrap(),
    );
}

#[test]
fn test_macroexpand_transparency() {
    // Evaluating the expansion equals evaluating the macro call
    let expansion = "(defmacro! twice (fn* (e) (list (quote do) e e)))
                     (def! a (atom 0))
                     (macroexpand (twice (swap! a + 1)))";
    let direct = "(defmacro! twice (fn* (e) (list (quote do) e e)))
                  (def! a (atom 0))
                  (twice (swap! a + 1))
                  @a";
    let expanded_form = eval(expansion).unwrap();
    assert_eq!(
        expanded_form,
        eval("(list (quote do) (list (quote swap!) (quote a) (quote +) 1) (list (quote swap!) (quote a) (quote +) 1))")
            .unwrap()
    );
    assert_eval(direct, Value::Int(2));
}

#[test]
fn test_macroexpand_of_non_macro_form_is_identity() {
    assert_eval("(macroexpand (+ 1 2))", eval("(list (quote +) 1 2)").unwrap());
    assert_eval("(macroexpand 7)", Value::Int(7));
}

#[test]
fn test_expansion_runs_to_fixed_point() {
    // outer expands to an inner macro call, which must expand again
    assert_eval(
        "(defmacro! inner (fn* () 42))
         (defmacro! outer (fn* () (list (quote inner))))
         (outer)",
        Value::Int(42),
    );
    assert_eval(
        "(defmacro! inner (fn* () 42))
         (defmacro! outer (fn* () (list (quote inner))))
         (macroexpand (outer))",
        Value::Int(42),
    );
}

#[test]
fn test_variadic_macro() {
    assert_eval(
        "(defmacro! ignore-rest (fn* (x & rest) x))
         (ignore-rest 1 undefined also-undefined)",
        Value::Int(1),
    );
}

#[test]
fn test_macro_with_quasiquote_template() {
    assert_eval(
        "(defmacro! unless (fn* (c t f) `(if ~c ~f ~t)))
         (unless false 7 8)",
        Value::Int(7),
    );
}

#[test]
fn test_macro_not_expanded_in_argument_position() {
    // Referencing a macro as a value does not expand it
    let result = eval("(defmacro! m (fn* () 1)) (macro? m)").unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_recursive_macro_expansion_in_body() {
    assert_eval(
        "(defmacro! my-or (fn* (a b) `(if ~a ~a ~b)))
         (my-or false :fallback)",
        Value::keyword("fallback"),
    );
}

#[test]
fn test_defmacro_arity() {
    assert!(eval("(defmacro! m)").is_err());
}
