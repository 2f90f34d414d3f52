//! Atom builtins: the dialect's only mutable state

use std::rc::Rc;

use super::check_arity;
use crate::error::{Error, Result};
use crate::runtime::{apply, Environment, Value};

pub(super) fn register(env: &Rc<Environment>) {
    env.set("atom", Value::native("atom", atom));
    env.set("deref", Value::native("deref", deref));
    env.set("reset!", Value::native("reset!", reset));
    env.set("swap!", Value::native("swap!", swap));
}

/// (atom x) - New atom holding x
fn atom(args: &[Value]) -> Result<Value> {
    check_arity("atom", args, 1)?;
    Ok(Value::atom(args[0].clone()))
}

/// (deref a) - Current value; `@a` is reader sugar for this
fn deref(args: &[Value]) -> Result<Value> {
    check_arity("deref", args, 1)?;
    Ok(args[0].as_atom()?.borrow().clone())
}

/// (reset! a x) - Replace the value, returning x
fn reset(args: &[Value]) -> Result<Value> {
    check_arity("reset!", args, 2)?;
    *args[0].as_atom()?.borrow_mut() = args[1].clone();
    Ok(args[1].clone())
}

/// (swap! a f x ...) - Replace the value with (f current x ...), returning it
fn swap(args: &[Value]) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::WrongArgumentCount {
            form: "swap!".to_string(),
            expected: "at least 2".to_string(),
            got: args.len(),
        });
    }

    let cell = args[0].as_atom()?;

    let mut call_args = vec![cell.borrow().clone()];
    call_args.extend_from_slice(&args[2..]);

    // The borrow is released before the callable runs, so a function that
    // itself touches the atom does not panic the cell
    let new_value = apply(&args[1], call_args)?;
    *cell.borrow_mut() = new_value.clone();
    Ok(new_value)
}
