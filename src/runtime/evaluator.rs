use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::quasiquote::quasiquote;
use crate::runtime::{Closure, Environment, Value};

/// Reserved head symbols
///
/// Recognized syntactically before any binding or macro lookup, so `if` and
/// friends can never be shadowed or redefined.
const SPECIAL_FORMS: &[&str] = &[
    "def!",
    "defmacro!",
    "let*",
    "do",
    "if",
    "fn*",
    "quote",
    "quasiquote",
    "quasiquoteexpand",
    "unquote",
    "splice-unquote",
    "macroexpand",
    "try*",
    "catch*",
];

/// Returns true for reserved head symbols
pub(crate) fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS.contains(&name)
}

/// Tree-walking evaluator
///
/// Owns the root environment. Construction installs the builtin library, so
/// `cons`, `concat`, `vec` and `throw` resolve before the first evaluation.
pub struct Evaluator {
    /// Root environment holding builtins and top-level definitions
    env: Rc<Environment>,
}

impl Evaluator {
    /// Creates an evaluator with the builtin library installed
    pub fn new() -> Self {
        let env = Environment::new();
        crate::builtins::install(&env);
        Evaluator { env }
    }

    /// Creates an evaluator over an existing root environment
    pub fn with_env(env: Rc<Environment>) -> Self {
        Evaluator { env }
    }

    /// The root environment
    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }

    /// Evaluates a single form against the root environment
    pub fn eval(&self, ast: &Value) -> Result<Value> {
        eval(ast.clone(), self.env.clone())
    }

    /// Scans, reads and evaluates a source string, returning the last result
    pub fn eval_source(&self, source: &str) -> Result<Value> {
        let forms = crate::reader::read_source(source)?;
        let mut last = Value::Nil;
        for form in &forms {
            last = self.eval(form)?;
        }
        Ok(last)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates `ast` in `env`
///
/// One iteration of the loop handles macro expansion, special-form dispatch
/// and application. Tail positions — `do`/`if`/`let*` bodies, quasiquote
/// rewrites, `catch*` handlers and lambda bodies — rewrite `(ast, env)` and
/// continue the loop instead of recursing, so self-recursion in tail
/// position runs in constant stack space. Argument evaluation and native
/// calls recurse as usual.
pub fn eval(mut ast: Value, mut env: Rc<Environment>) -> Result<Value> {
    loop {
        ast = macroexpand(ast, &env)?;

        let items = match &ast {
            Value::List(items) => items.clone(),
            _ => return eval_ast(&ast, &env),
        };
        if items.is_empty() {
            return Ok(ast);
        }

        if let Value::Symbol(head) = &items[0] {
            let args = &items[1..];
            match head.as_str() {
                "def!" => return eval_def(args, &env),
                "defmacro!" => return eval_defmacro(args, &env),
                "let*" => {
                    let (body, let_env) = eval_let(args, &env)?;
                    ast = body;
                    env = let_env;
                    continue;
                }
                "do" => {
                    ast = eval_do(args, &env)?;
                    continue;
                }
                "if" => {
                    ast = eval_if(args, &env)?;
                    continue;
                }
                "fn*" => return eval_fn(args, &env),
                "quote" => {
                    check_arity("quote", args, 1)?;
                    return Ok(args[0].clone());
                }
                "quasiquote" => {
                    check_arity("quasiquote", args, 1)?;
                    ast = quasiquote(&args[0])?;
                    continue;
                }
                "quasiquoteexpand" => {
                    check_arity("quasiquoteexpand", args, 1)?;
                    return quasiquote(&args[0]);
                }
                "macroexpand" => {
                    check_arity("macroexpand", args, 1)?;
                    return macroexpand(args[0].clone(), &env);
                }
                "try*" => {
                    if args.is_empty() || args.len() > 2 {
                        return Err(Error::WrongArgumentCount {
                            form: "try*".to_string(),
                            expected: "1 or 2".to_string(),
                            got: args.len(),
                        });
                    }
                    match eval(args[0].clone(), env.clone()) {
                        Ok(value) => return Ok(value),
                        Err(err) => {
                            if args.len() == 1 {
                                return Err(err);
                            }
                            let (binding, handler) = parse_catch(&args[1])?;
                            let catch_env = Environment::with_parent(env.clone());
                            catch_env.set(&binding, err.into_thrown_value());
                            ast = handler;
                            env = catch_env;
                            continue;
                        }
                    }
                }
                _ => {}
            }
        }

        // Application: evaluate the head, then every argument left-to-right
        let callee = eval(items[0].clone(), env.clone())?;
        let mut args = Vec::with_capacity(items.len() - 1);
        for item in &items[1..] {
            args.push(eval(item.clone(), env.clone())?);
        }

        match callee {
            Value::Native(native) => return (native.func)(&args),
            Value::Lambda(closure) => {
                env = Environment::bind(closure.env.clone(), &closure.params, args)?;
                ast = closure.body.clone();
            }
            other => {
                return Err(Error::NotCallable {
                    type_name: other.type_name().to_string(),
                })
            }
        }
    }
}

/// Applies a callable to already-evaluated arguments
///
/// Used by builtins such as `apply`, `map` and `swap!`. Lambda application
/// here is a fresh evaluation, not a tail call of the caller.
pub fn apply(callable: &Value, args: Vec<Value>) -> Result<Value> {
    match callable {
        Value::Native(native) => (native.func)(&args),
        Value::Lambda(closure) => {
            let env = Environment::bind(closure.env.clone(), &closure.params, args)?;
            eval(closure.body.clone(), env)
        }
        other => Err(Error::NotCallable {
            type_name: other.type_name().to_string(),
        }),
    }
}

/// Expands macro calls at the head of `ast` to a fixed point
///
/// A form is a macro call when it is a non-empty list whose head symbol is
/// not reserved and resolves to a Macro in `env`. The macro body is
/// evaluated against the raw, unevaluated argument forms; its result
/// replaces the form and expansion restarts.
pub fn macroexpand(mut ast: Value, env: &Rc<Environment>) -> Result<Value> {
    while let Some((closure, args)) = as_macro_call(&ast, env) {
        let macro_env = Environment::bind(closure.env.clone(), &closure.params, args)?;
        ast = eval(closure.body.clone(), macro_env)?;
    }
    Ok(ast)
}

fn as_macro_call(ast: &Value, env: &Rc<Environment>) -> Option<(Rc<Closure>, Vec<Value>)> {
    let items = match ast {
        Value::List(items) => items,
        _ => return None,
    };
    let head = match items.first() {
        Some(Value::Symbol(head)) if !is_special_form(head) => head,
        _ => return None,
    };
    match env.get(head) {
        Ok(Value::Macro(closure)) => Some((closure, items[1..].to_vec())),
        _ => None,
    }
}

/// Non-list evaluation: symbol lookup, element-wise collections, literals
fn eval_ast(ast: &Value, env: &Rc<Environment>) -> Result<Value> {
    match ast {
        Value::Symbol(name) => env.get(name),
        Value::Vector(items) => {
            let evaluated = items
                .iter()
                .map(|item| eval(item.clone(), env.clone()))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::vector(evaluated))
        }
        Value::Map(entries) => {
            let mut evaluated = std::collections::HashMap::with_capacity(entries.len());
            for (key, value) in entries.iter() {
                evaluated.insert(key.clone(), eval(value.clone(), env.clone())?);
            }
            Ok(Value::map(evaluated))
        }
        other => Ok(other.clone()),
    }
}

// (def! x 2)
fn eval_def(args: &[Value], env: &Rc<Environment>) -> Result<Value> {
    check_arity("def!", args, 2)?;
    let symbol = args[0].as_symbol()?;

    // A failed evaluation leaves the environment untouched
    let value = eval(args[1].clone(), env.clone())?;
    Ok(env.set(symbol, value))
}

// (defmacro! x (fn* (x) x))
fn eval_defmacro(args: &[Value], env: &Rc<Environment>) -> Result<Value> {
    check_arity("defmacro!", args, 2)?;
    let symbol = args[0].as_symbol()?;

    let value = eval(args[1].clone(), env.clone())?;
    let closure = match value {
        Value::Lambda(closure) => closure,
        other => return Err(Error::type_mismatch("function", other.type_name())),
    };

    Ok(env.set(symbol, Value::Macro(closure)))
}

// (let* (x 1) x), body is tail-called by the caller
fn eval_let(args: &[Value], env: &Rc<Environment>) -> Result<(Value, Rc<Environment>)> {
    check_arity("let*", args, 2)?;

    let bindings = args[0].as_seq()?;
    if bindings.len() % 2 != 0 {
        return Err(Error::WrongArgumentCount {
            form: "let* bindings".to_string(),
            expected: "an even number".to_string(),
            got: bindings.len(),
        });
    }

    // Sequential binding: each pair sees the ones before it
    let let_env = Environment::with_parent(env.clone());
    for pair in bindings.chunks(2) {
        let name = pair[0].as_symbol()?;
        let value = eval(pair[1].clone(), let_env.clone())?;
        let_env.set(name, value);
    }

    Ok((args[1].clone(), let_env))
}

// (do 1 2 3), last form is tail-called by the caller
fn eval_do(args: &[Value], env: &Rc<Environment>) -> Result<Value> {
    if args.is_empty() {
        return Err(Error::WrongArgumentCount {
            form: "do".to_string(),
            expected: "at least 1".to_string(),
            got: 0,
        });
    }

    for form in &args[..args.len() - 1] {
        eval(form.clone(), env.clone())?;
    }
    Ok(args[args.len() - 1].clone())
}

// (if c t f), chosen branch is tail-called by the caller
fn eval_if(args: &[Value], env: &Rc<Environment>) -> Result<Value> {
    if args.len() != 2 && args.len() != 3 {
        return Err(Error::WrongArgumentCount {
            form: "if".to_string(),
            expected: "2 or 3".to_string(),
            got: args.len(),
        });
    }

    let condition = eval(args[0].clone(), env.clone())?;
    if condition.is_truthy() {
        Ok(args[1].clone())
    } else {
        Ok(args.get(2).cloned().unwrap_or(Value::Nil))
    }
}

// (fn* (x) x)
fn eval_fn(args: &[Value], env: &Rc<Environment>) -> Result<Value> {
    check_arity("fn*", args, 2)?;

    let params = args[0]
        .as_seq()?
        .iter()
        .map(|p| p.as_symbol().map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    Ok(Value::Lambda(Rc::new(Closure {
        params,
        body: args[1].clone(),
        env: env.clone(),
    })))
}

// (catch* e handler), shape enforced syntactically
fn parse_catch(clause: &Value) -> Result<(String, Value)> {
    let items = clause.as_list()?;

    match items.first() {
        Some(Value::Symbol(head)) if head == "catch*" => {}
        _ => {
            return Err(Error::ParseError(
                "catch block must begin with catch*".to_string(),
            ))
        }
    }
    check_arity("catch*", &items[1..], 2)?;

    let binding = items[1].as_symbol()?;
    Ok((binding.to_string(), items[2].clone()))
}

fn check_arity(form: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::arity(form, expected, args.len()));
    }
    Ok(())
}
