//! Quasiquote: syntactic rewrite into `cons`/`concat`/`vec` calls
//!
//! The transform is pure — no environment access. Evaluating the rewritten
//! form against the root builtins yields the templated structure.

use crate::error::{Error, Result};
use crate::runtime::Value;

/// Rewrites a quasiquoted form into plain code
///
/// - Maps and symbols become `(quote x)` so they survive evaluation.
/// - Other non-collections pass through: literals self-quote.
/// - `(unquote x)` and a top-level `(splice-unquote x)` unwrap to `x`.
/// - Lists and vectors fold right-to-left into nested `cons` calls, with
///   `(splice-unquote e)` elements contributing a `concat` layer. Vector
///   results are wrapped in `(vec ...)`.
pub fn quasiquote(ast: &Value) -> Result<Value> {
    match ast {
        Value::Map(_) | Value::Symbol(_) => {
            return Ok(Value::list(vec![Value::symbol("quote"), ast.clone()]));
        }
        Value::List(_) | Value::Vector(_) => {}
        _ => return Ok(ast.clone()),
    }

    // `~x and a bare `~@x both unwrap to x
    if let Some(unquoted) = starts_with(ast, "unquote")? {
        return Ok(unquoted);
    }
    if let Some(spliced) = starts_with(ast, "splice-unquote")? {
        return Ok(spliced);
    }

    let items = ast.as_seq()?;
    let mut result = Value::list(vec![]);

    for element in items.iter().rev() {
        if let Some(spliced) = starts_with(element, "splice-unquote")? {
            // `(1 ~@(list 2 2) 3) => (cons 1 (concat (list 2 2) (cons 3 ())))
            result = Value::list(vec![Value::symbol("concat"), spliced, result]);
        } else {
            result = Value::list(vec![Value::symbol("cons"), quasiquote(element)?, result]);
        }
    }

    match ast {
        Value::Vector(_) => Ok(Value::list(vec![Value::symbol("vec"), result])),
        _ => Ok(result),
    }
}

/// If `ast` is a list headed by `symbol`, returns the single argument
///
/// Only lists count; a vector headed by the same symbol is ordinary data.
/// A matching head with the wrong argument count is an arity error.
fn starts_with(ast: &Value, symbol: &str) -> Result<Option<Value>> {
    let items = match ast {
        Value::List(items) => items,
        _ => return Ok(None),
    };

    match items.first() {
        Some(Value::Symbol(head)) if head == symbol => {
            if items.len() != 2 {
                return Err(Error::arity(symbol, 1, items.len() - 1));
            }
            Ok(Some(items[1].clone()))
        }
        _ => Ok(None),
    }
}
