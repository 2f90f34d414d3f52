//! Type predicate builtins

use std::rc::Rc;

use super::check_arity;
use crate::error::Result;
use crate::runtime::{Environment, Value};

pub(super) fn register(env: &Rc<Environment>) {
    env.set("nil?", Value::native("nil?", is_nil));
    env.set("true?", Value::native("true?", is_true));
    env.set("false?", Value::native("false?", is_false));
    env.set("number?", Value::native("number?", is_number));
    env.set("string?", Value::native("string?", is_string));
    env.set("symbol?", Value::native("symbol?", is_symbol));
    env.set("keyword?", Value::native("keyword?", is_keyword));
    env.set("list?", Value::native("list?", is_list));
    env.set("vector?", Value::native("vector?", is_vector));
    env.set("sequential?", Value::native("sequential?", is_sequential));
    env.set("map?", Value::native("map?", is_map));
    env.set("fn?", Value::native("fn?", is_fn));
    env.set("macro?", Value::native("macro?", is_macro));
    env.set("atom?", Value::native("atom?", is_atom));
}

fn predicate(name: &str, args: &[Value], test: fn(&Value) -> bool) -> Result<Value> {
    check_arity(name, args, 1)?;
    Ok(Value::Bool(test(&args[0])))
}

fn is_nil(args: &[Value]) -> Result<Value> {
    predicate("nil?", args, |v| matches!(v, Value::Nil))
}

fn is_true(args: &[Value]) -> Result<Value> {
    predicate("true?", args, |v| matches!(v, Value::Bool(true)))
}

fn is_false(args: &[Value]) -> Result<Value> {
    predicate("false?", args, |v| matches!(v, Value::Bool(false)))
}

fn is_number(args: &[Value]) -> Result<Value> {
    predicate("number?", args, |v| matches!(v, Value::Int(_)))
}

fn is_string(args: &[Value]) -> Result<Value> {
    predicate("string?", args, |v| matches!(v, Value::Str(_)))
}

fn is_symbol(args: &[Value]) -> Result<Value> {
    predicate("symbol?", args, |v| matches!(v, Value::Symbol(_)))
}

fn is_keyword(args: &[Value]) -> Result<Value> {
    predicate("keyword?", args, |v| matches!(v, Value::Keyword(_)))
}

fn is_list(args: &[Value]) -> Result<Value> {
    predicate("list?", args, |v| matches!(v, Value::List(_)))
}

fn is_vector(args: &[Value]) -> Result<Value> {
    predicate("vector?", args, |v| matches!(v, Value::Vector(_)))
}

fn is_sequential(args: &[Value]) -> Result<Value> {
    predicate("sequential?", args, Value::is_sequential)
}

fn is_map(args: &[Value]) -> Result<Value> {
    predicate("map?", args, |v| matches!(v, Value::Map(_)))
}

/// Callable check: lambdas and builtins, but not macros
fn is_fn(args: &[Value]) -> Result<Value> {
    predicate("fn?", args, |v| {
        matches!(v, Value::Lambda(_) | Value::Native(_))
    })
}

fn is_macro(args: &[Value]) -> Result<Value> {
    predicate("macro?", args, |v| matches!(v, Value::Macro(_)))
}

fn is_atom(args: &[Value]) -> Result<Value> {
    predicate("atom?", args, |v| matches!(v, Value::Atom(_)))
}
