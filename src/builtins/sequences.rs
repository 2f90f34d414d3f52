//! List and vector builtins
//!
//! `cons`, `concat` and `vec` double as the expansion targets of the
//! quasiquote rewrite, so their semantics are load-bearing for the
//! evaluator.

use std::rc::Rc;

use super::check_arity;
use crate::error::{Error, Result};
use crate::runtime::{apply, Environment, Value};

pub(super) fn register(env: &Rc<Environment>) {
    env.set("list", Value::native("list", list));
    env.set("cons", Value::native("cons", cons));
    env.set("concat", Value::native("concat", concat));
    env.set("vec", Value::native("vec", vec_));
    env.set("vector", Value::native("vector", vector));
    env.set("nth", Value::native("nth", nth));
    env.set("first", Value::native("first", first));
    env.set("rest", Value::native("rest", rest));
    env.set("count", Value::native("count", count));
    env.set("empty?", Value::native("empty?", is_empty));
    env.set("apply", Value::native("apply", apply_fn));
    env.set("map", Value::native("map", map_fn));
}

/// (list a b ...) - List of the arguments
fn list(args: &[Value]) -> Result<Value> {
    Ok(Value::list(args.to_vec()))
}

/// (cons x seq) - New list with x prepended
fn cons(args: &[Value]) -> Result<Value> {
    check_arity("cons", args, 2)?;
    let tail = args[1].as_seq()?;

    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(args[0].clone());
    items.extend_from_slice(tail);
    Ok(Value::list(items))
}

/// (concat seq ...) - All elements of all sequences, as one list
fn concat(args: &[Value]) -> Result<Value> {
    let mut items = Vec::new();
    for arg in args {
        items.extend_from_slice(arg.as_seq()?);
    }
    Ok(Value::list(items))
}

/// (vec seq) - The sequence as a vector
fn vec_(args: &[Value]) -> Result<Value> {
    check_arity("vec", args, 1)?;
    Ok(Value::vector(args[0].as_seq()?.to_vec()))
}

/// (vector a b ...) - Vector of the arguments
fn vector(args: &[Value]) -> Result<Value> {
    Ok(Value::vector(args.to_vec()))
}

/// (nth seq i) - Element at index, error when out of range
fn nth(args: &[Value]) -> Result<Value> {
    check_arity("nth", args, 2)?;
    let items = args[0].as_seq()?;
    let index = args[1].as_int()?;

    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or(Error::IndexOutOfBounds {
            index,
            length: items.len(),
        })
}

/// (first seq) - First element, nil on empty or nil input
fn first(args: &[Value]) -> Result<Value> {
    check_arity("first", args, 1)?;
    match &args[0] {
        Value::Nil => Ok(Value::Nil),
        other => Ok(other.as_seq()?.first().cloned().unwrap_or(Value::Nil)),
    }
}

/// (rest seq) - All but the first element, () on empty or nil input
fn rest(args: &[Value]) -> Result<Value> {
    check_arity("rest", args, 1)?;
    match &args[0] {
        Value::Nil => Ok(Value::list(vec![])),
        other => {
            let items = other.as_seq()?;
            Ok(Value::list(items.get(1..).unwrap_or(&[]).to_vec()))
        }
    }
}

/// (count seq) - Element count, 0 for nil
fn count(args: &[Value]) -> Result<Value> {
    check_arity("count", args, 1)?;
    match &args[0] {
        Value::Nil => Ok(Value::Int(0)),
        other => Ok(Value::Int(other.as_seq()?.len() as i64)),
    }
}

/// (empty? seq) - True when the sequence has no elements
fn is_empty(args: &[Value]) -> Result<Value> {
    check_arity("empty?", args, 1)?;
    match &args[0] {
        Value::Nil => Ok(Value::Bool(true)),
        other => Ok(Value::Bool(other.as_seq()?.is_empty())),
    }
}

/// (apply f a b (c d)) - Call f with the leading args plus the final
/// sequence flattened in
fn apply_fn(args: &[Value]) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::WrongArgumentCount {
            form: "apply".to_string(),
            expected: "at least 2".to_string(),
            got: args.len(),
        });
    }

    let callable = &args[0];
    let trailing = args[args.len() - 1].as_seq()?;

    let mut call_args = args[1..args.len() - 1].to_vec();
    call_args.extend_from_slice(trailing);
    apply(callable, call_args)
}

/// (map f seq) - List of f applied to each element
fn map_fn(args: &[Value]) -> Result<Value> {
    check_arity("map", args, 2)?;
    let callable = &args[0];

    let mut results = Vec::new();
    for item in args[1].as_seq()? {
        results.push(apply(callable, vec![item.clone()])?);
    }
    Ok(Value::list(results))
}
