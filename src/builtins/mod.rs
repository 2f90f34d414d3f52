//! Builtin function library
//!
//! Native callables installed into the root environment before the first
//! evaluation. The evaluator itself only requires `cons`, `concat` and `vec`
//! (quasiquote expands into calls to them) plus `throw`; everything else is
//! the standard vocabulary of the dialect.

mod atoms;
mod maps;
mod math;
mod predicates;
mod sequences;
mod strings;

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

/// Installs the builtin library into an environment
pub fn install(env: &Rc<Environment>) {
    math::register(env);
    sequences::register(env);
    maps::register(env);
    strings::register(env);
    predicates::register(env);
    atoms::register(env);

    env.set("throw", Value::native("throw", throw));
}

/// (throw x) - Record x as the active exception
///
/// The payload travels as an error to the nearest enclosing `try*`.
fn throw(args: &[Value]) -> Result<Value> {
    check_arity("throw", args, 1)?;
    Err(Error::Exception(args[0].clone()))
}

/// Checks an exact builtin arity
fn check_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::arity(name, expected, args.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Evaluator;

    #[test]
    fn test_install_provides_quasiquote_contract() {
        let env = Environment::new();
        install(&env);

        for name in ["cons", "concat", "vec", "throw"] {
            assert!(env.has(name), "missing builtin {}", name);
        }
    }

    #[test]
    fn test_throw_raises_exception() {
        let err = Evaluator::new().eval_source("(throw 42)").unwrap_err();
        assert!(matches!(err, Error::Exception(Value::Int(42))));
    }
}
