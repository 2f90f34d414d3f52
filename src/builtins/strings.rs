//! String, printing and I/O builtins

use std::rc::Rc;

use super::check_arity;
use crate::error::{Error, Result};
use crate::printer::pr_seq;
use crate::runtime::{Environment, Value};

pub(super) fn register(env: &Rc<Environment>) {
    env.set("pr-str", Value::native("pr-str", pr_str_fn));
    env.set("str", Value::native("str", str_fn));
    env.set("prn", Value::native("prn", prn));
    env.set("println", Value::native("println", println_fn));
    env.set("read-string", Value::native("read-string", read_string));
    env.set("slurp", Value::native("slurp", slurp));
    env.set("symbol", Value::native("symbol", symbol));
    env.set("keyword", Value::native("keyword", keyword));
}

/// (pr-str a b ...) - Readable rendering, space separated
fn pr_str_fn(args: &[Value]) -> Result<Value> {
    Ok(Value::Str(pr_seq(args, true, " ")))
}

/// (str a b ...) - Display rendering, concatenated
fn str_fn(args: &[Value]) -> Result<Value> {
    Ok(Value::Str(pr_seq(args, false, "")))
}

/// (prn a b ...) - Print readably to stdout, return nil
fn prn(args: &[Value]) -> Result<Value> {
    println!("{}", pr_seq(args, true, " "));
    Ok(Value::Nil)
}

/// (println a b ...) - Print for display to stdout, return nil
fn println_fn(args: &[Value]) -> Result<Value> {
    println!("{}", pr_seq(args, false, " "));
    Ok(Value::Nil)
}

/// (read-string s) - Read the first form in s, nil when s holds none
fn read_string(args: &[Value]) -> Result<Value> {
    check_arity("read-string", args, 1)?;
    let forms = crate::reader::read_source(args[0].as_str()?)?;
    Ok(forms.into_iter().next().unwrap_or(Value::Nil))
}

/// (slurp path) - File contents as a string
fn slurp(args: &[Value]) -> Result<Value> {
    check_arity("slurp", args, 1)?;
    let path = args[0].as_str()?;
    std::fs::read_to_string(path)
        .map(Value::Str)
        .map_err(|e| Error::Io(format!("{}: {}", path, e)))
}

/// (symbol s) - Symbol named by the string
fn symbol(args: &[Value]) -> Result<Value> {
    check_arity("symbol", args, 1)?;
    Ok(Value::symbol(args[0].as_str()?))
}

/// (keyword s) - Keyword named by the string; keywords pass through
fn keyword(args: &[Value]) -> Result<Value> {
    check_arity("keyword", args, 1)?;
    match &args[0] {
        Value::Keyword(_) => Ok(args[0].clone()),
        other => Ok(Value::keyword(other.as_str()?)),
    }
}
