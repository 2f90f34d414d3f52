//! # mallow - A MAL-family Lisp interpreter
//!
//! A tree-walking interpreter for a small Lisp dialect: textual
//! S-expressions are scanned into tokens, read into an AST of runtime
//! values, evaluated against a lexically-scoped environment chain and
//! printed back as text. The evaluator runs an iterative loop with
//! tail-call optimization, a macro system (`defmacro!`, `macroexpand`),
//! quasiquote templating and `try*`/`catch*` exception handling.
//!
//! ## Quick Start
//!
//! ```rust
//! use mallow::{Evaluator, Value};
//!
//! # fn main() -> mallow::Result<()> {
//! let evaluator = Evaluator::new();
//! let result = evaluator.eval_source("(def! x 3) (+ x 4)")?;
//! assert_eq!(result, Value::Int(7));
//! # Ok(())
//! # }
//! ```
//!
//! ### Driving the pipeline by hand
//!
//! ```rust
//! use mallow::{Evaluator, Reader, Scanner};
//!
//! # fn main() -> mallow::Result<()> {
//! let mut scanner = Scanner::new("(* 6 7)");
//! let tokens = scanner.scan_tokens()?;
//!
//! let mut reader = Reader::new(tokens);
//! let forms = reader.read_all()?;
//!
//! let evaluator = Evaluator::new();
//! let result = evaluator.eval(&forms[0])?;
//! assert_eq!(mallow::pr_str(&result, true), "42");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Values**: `nil`, booleans, 64-bit integers, strings, `:keywords`,
//!   symbols, lists `(1 2)`, vectors `[1 2]`, maps `{:a 1}`, functions,
//!   macros and atoms. Only `nil` and `false` are falsy.
//! - **Special forms**: `def!`, `defmacro!`, `let*`, `do`, `if`, `fn*`,
//!   `quote`, `quasiquote`, `quasiquoteexpand`, `macroexpand`,
//!   `try*`/`catch*`. Recognized by head symbol before any binding lookup,
//!   so they cannot be shadowed.
//! - **Tail calls**: `do`/`if`/`let*` bodies, lambda application and
//!   `catch*` handlers evaluate without stack growth; a self-recursive
//!   function looping a million times runs in constant stack space.
//! - **Macros**: applied to unevaluated forms, expanded to a fixed point
//!   before evaluation.
//! - **Quasiquote**: `` `(a ~x ~@(list 1 2)) `` rewrites into
//!   `cons`/`concat`/`vec` calls and evaluates the rewrite.
//! - **Errors**: `(throw x)` raises any value; `(try* body (catch* e h))`
//!   is the only recovery point.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Scanner → Tokens → Reader → Value AST → Evaluator → Value
//!                                                          ↓
//!                                                       Printer → Text
//! ```
//!
//! ### Main Components
//!
//! - [`Scanner`] - Tokenizes source code
//! - [`Reader`] - Reads tokens into Value trees (the AST *is* the value type)
//! - [`Evaluator`] - The TCO evaluation loop over an [`Environment`] chain
//! - [`Value`] - Runtime value representation
//! - [`pr_str`] - Renders values back to text
//! - [`builtins::install`] - Populates a root environment with the native
//!   function library

// Module declarations
/// Version of the mallow interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builtins;
pub mod error;
pub mod lexer;
pub mod printer;
pub mod reader;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use printer::pr_str;
pub use reader::{read_source, Reader};
pub use runtime::{Environment, Evaluator, Value};
