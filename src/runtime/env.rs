use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Value;

/// Variadic marker inside parameter lists
const VARIADIC_MARKER: &str = "&";

/// Lexically nested symbol-to-value bindings
///
/// Environments form a chain through `parent`; lookups walk outward from the
/// innermost frame and the first match wins. Frames are shared by reference:
/// a closure holds its definition environment alive for as long as the
/// closure itself is reachable.
#[derive(Debug)]
pub struct Environment {
    /// Bindings in this frame
    bindings: RefCell<HashMap<String, Value>>,
    /// Enclosing frame (None for the root)
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a root environment
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a child environment of `parent`
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Creates a child environment with `params` bound to `args`
    ///
    /// A literal `&` in `params` makes the following name bind a list of all
    /// remaining arguments, which may be empty. Fixed parameters must be
    /// matched exactly: too few arguments, or extras without a variadic
    /// tail, raise an arity error.
    pub fn bind(
        parent: Rc<Environment>,
        params: &[String],
        mut args: Vec<Value>,
    ) -> Result<Rc<Self>> {
        let env = Environment::with_parent(parent);

        for (idx, param) in params.iter().enumerate() {
            if param == VARIADIC_MARKER {
                let rest_name = params.get(idx + 1).ok_or_else(|| {
                    Error::ParseError("& must be followed by a parameter name".to_string())
                })?;
                // Parameters before the marker have all been bound, so the
                // split point is in range
                env.set(rest_name, Value::list(args.split_off(idx)));
                return Ok(env);
            }

            match args.get(idx) {
                Some(value) => {
                    env.set(param, value.clone());
                }
                None => {
                    return Err(Error::WrongArgumentCount {
                        form: "function".to_string(),
                        expected: expected_arity(params),
                        got: args.len(),
                    });
                }
            }
        }

        if args.len() > params.len() {
            return Err(Error::WrongArgumentCount {
                form: "function".to_string(),
                expected: expected_arity(params),
                got: args.len(),
            });
        }

        Ok(env)
    }

    /// Stores a binding in this frame, shadowing any parent binding
    ///
    /// Returns the stored value so definition forms can hand it back.
    pub fn set(&self, name: &str, value: Value) -> Value {
        self.bindings
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        value
    }

    /// Looks a symbol up, walking the chain from innermost outward
    pub fn get(&self, name: &str) -> Result<Value> {
        let mut env = self;
        loop {
            if let Some(value) = env.bindings.borrow().get(name) {
                return Ok(value.clone());
            }
            match &env.parent {
                Some(parent) => env = parent,
                None => {
                    return Err(Error::UndefinedSymbol {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Returns true if the symbol resolves anywhere in the chain
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }
}

fn expected_arity(params: &[String]) -> String {
    match params.iter().position(|p| p == VARIADIC_MARKER) {
        Some(fixed) => format!("at least {}", fixed),
        None => params.len().to_string(),
    }
}
