//! Hash-map builtins
//!
//! Keys are strings or keywords, stored in the sentinel encoding from
//! [`crate::runtime::Value::map_key`]. Maps are immutable: `assoc` and
//! `dissoc` build new maps.

use std::rc::Rc;

use super::check_arity;
use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

pub(super) fn register(env: &Rc<Environment>) {
    env.set("hash-map", Value::native("hash-map", hash_map));
    env.set("assoc", Value::native("assoc", assoc));
    env.set("dissoc", Value::native("dissoc", dissoc));
    env.set("get", Value::native("get", get));
    env.set("contains?", Value::native("contains?", contains));
    env.set("keys", Value::native("keys", keys));
    env.set("vals", Value::native("vals", vals));
}

/// (hash-map k v ...) - Map from alternating keys and values
fn hash_map(args: &[Value]) -> Result<Value> {
    if args.len() % 2 != 0 {
        return Err(Error::WrongArgumentCount {
            form: "hash-map".to_string(),
            expected: "an even number".to_string(),
            got: args.len(),
        });
    }

    let mut entries = std::collections::HashMap::with_capacity(args.len() / 2);
    for pair in args.chunks(2) {
        entries.insert(pair[0].map_key()?, pair[1].clone());
    }
    Ok(Value::map(entries))
}

/// (assoc map k v ...) - Map with the given entries added or replaced
fn assoc(args: &[Value]) -> Result<Value> {
    if args.is_empty() || args.len() % 2 != 1 {
        return Err(Error::WrongArgumentCount {
            form: "assoc".to_string(),
            expected: "a map plus an even number".to_string(),
            got: args.len(),
        });
    }

    let mut entries = args[0].as_map()?.clone();
    for pair in args[1..].chunks(2) {
        entries.insert(pair[0].map_key()?, pair[1].clone());
    }
    Ok(Value::map(entries))
}

/// (dissoc map k ...) - Map with the given keys removed
fn dissoc(args: &[Value]) -> Result<Value> {
    if args.is_empty() {
        return Err(Error::WrongArgumentCount {
            form: "dissoc".to_string(),
            expected: "at least 1".to_string(),
            got: 0,
        });
    }

    let mut entries = args[0].as_map()?.clone();
    for key in &args[1..] {
        entries.remove(&key.map_key()?);
    }
    Ok(Value::map(entries))
}

/// (get map k) - Value for the key, nil when absent or the map is nil
fn get(args: &[Value]) -> Result<Value> {
    check_arity("get", args, 2)?;
    match &args[0] {
        Value::Nil => Ok(Value::Nil),
        other => {
            let entries = other.as_map()?;
            Ok(entries
                .get(&args[1].map_key()?)
                .cloned()
                .unwrap_or(Value::Nil))
        }
    }
}

/// (contains? map k) - True when the key is present
fn contains(args: &[Value]) -> Result<Value> {
    check_arity("contains?", args, 2)?;
    let entries = args[0].as_map()?;
    Ok(Value::Bool(entries.contains_key(&args[1].map_key()?)))
}

/// (keys map) - List of the keys, decoded to their original form
fn keys(args: &[Value]) -> Result<Value> {
    check_arity("keys", args, 1)?;
    let entries = args[0].as_map()?;
    Ok(Value::list(
        entries.keys().map(|k| Value::from_map_key(k)).collect(),
    ))
}

/// (vals map) - List of the values
fn vals(args: &[Value]) -> Result<Value> {
    check_arity("vals", args, 1)?;
    let entries = args[0].as_map()?;
    Ok(Value::list(entries.values().cloned().collect()))
}
