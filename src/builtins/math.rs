//! Arithmetic and comparison builtins

use std::rc::Rc;

use super::check_arity;
use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

pub(super) fn register(env: &Rc<Environment>) {
    env.set("+", Value::native("+", add));
    env.set("-", Value::native("-", sub));
    env.set("*", Value::native("*", mul));
    env.set("/", Value::native("/", div));
    env.set("=", Value::native("=", eq));
    env.set("<", Value::native("<", lt));
    env.set("<=", Value::native("<=", le));
    env.set(">", Value::native(">", gt));
    env.set(">=", Value::native(">=", ge));
}

/// (+ a b ...) - Sum, 0 with no arguments
fn add(args: &[Value]) -> Result<Value> {
    let mut sum: i64 = 0;
    for arg in args {
        sum = sum.wrapping_add(arg.as_int()?);
    }
    Ok(Value::Int(sum))
}

/// (- a b ...) - Subtraction; a single argument negates
fn sub(args: &[Value]) -> Result<Value> {
    let (first, rest) = split_first("-", args)?;
    if rest.is_empty() {
        return Ok(Value::Int(first.wrapping_neg()));
    }

    let mut result = first;
    for arg in rest {
        result = result.wrapping_sub(arg.as_int()?);
    }
    Ok(Value::Int(result))
}

/// (* a b ...) - Product, 1 with no arguments
fn mul(args: &[Value]) -> Result<Value> {
    let mut product: i64 = 1;
    for arg in args {
        product = product.wrapping_mul(arg.as_int()?);
    }
    Ok(Value::Int(product))
}

/// (/ a b ...) - Integer division, left to right
fn div(args: &[Value]) -> Result<Value> {
    let (first, rest) = split_first("/", args)?;
    if rest.is_empty() {
        return Err(Error::WrongArgumentCount {
            form: "/".to_string(),
            expected: "at least 2".to_string(),
            got: args.len(),
        });
    }

    let mut result = first;
    for arg in rest {
        let divisor = arg.as_int()?;
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }
        result = result.wrapping_div(divisor);
    }
    Ok(Value::Int(result))
}

/// (= a b) - Deep structural equality
///
/// Lists and vectors with equal elements compare equal; callables and atoms
/// compare by identity.
fn eq(args: &[Value]) -> Result<Value> {
    check_arity("=", args, 2)?;
    Ok(Value::Bool(args[0] == args[1]))
}

fn lt(args: &[Value]) -> Result<Value> {
    compare("<", args, |a, b| a < b)
}

fn le(args: &[Value]) -> Result<Value> {
    compare("<=", args, |a, b| a <= b)
}

fn gt(args: &[Value]) -> Result<Value> {
    compare(">", args, |a, b| a > b)
}

fn ge(args: &[Value]) -> Result<Value> {
    compare(">=", args, |a, b| a >= b)
}

fn compare(name: &str, args: &[Value], op: fn(i64, i64) -> bool) -> Result<Value> {
    check_arity(name, args, 2)?;
    Ok(Value::Bool(op(args[0].as_int()?, args[1].as_int()?)))
}

fn split_first<'a>(name: &str, args: &'a [Value]) -> Result<(i64, &'a [Value])> {
    match args.split_first() {
        Some((first, rest)) => Ok((first.as_int()?, rest)),
        None => Err(Error::WrongArgumentCount {
            form: name.to_string(),
            expected: "at least 1".to_string(),
            got: 0,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{Evaluator, Value};

    fn eval(source: &str) -> crate::error::Result<Value> {
        Evaluator::new().eval_source(source)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("(+ 1 2 3)").unwrap(), Value::Int(6));
        assert_eq!(eval("(+)").unwrap(), Value::Int(0));
        assert_eq!(eval("(- 10 3 2)").unwrap(), Value::Int(5));
        assert_eq!(eval("(- 4)").unwrap(), Value::Int(-4));
        assert_eq!(eval("(* 2 3 4)").unwrap(), Value::Int(24));
        assert_eq!(eval("(/ 20 2 5)").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_division_by_zero() {
        let err = eval("(/ 1 0)").unwrap_err();
        assert_eq!(err.to_string(), "Division by zero");
    }

    #[test]
    fn test_type_errors() {
        assert!(eval("(+ 1 \"x\")").is_err());
        assert!(eval("(< 1 nil)").is_err());
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval("(< 1 2)").unwrap(), Value::Bool(true));
        assert_eq!(eval("(<= 2 2)").unwrap(), Value::Bool(true));
        assert_eq!(eval("(> 1 2)").unwrap(), Value::Bool(false));
        assert_eq!(eval("(>= 3 2)").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_equality() {
        assert_eq!(eval("(= 1 1)").unwrap(), Value::Bool(true));
        assert_eq!(eval("(= 1 2)").unwrap(), Value::Bool(false));
        assert_eq!(eval("(= \"a\" \"a\")").unwrap(), Value::Bool(true));
        assert_eq!(eval("(= (list 1 2) [1 2])").unwrap(), Value::Bool(true));
        assert_eq!(eval("(= nil nil)").unwrap(), Value::Bool(true));
        assert_eq!(eval("(= 1 \"1\")").unwrap(), Value::Bool(false));
    }
}
