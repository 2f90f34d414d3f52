//! Error types for the mallow interpreter

use thiserror::Error;

use crate::runtime::Value;

/// Interpreter errors
///
/// Every failure in the pipeline — scanning, reading, evaluation — is a
/// variant here. Evaluation propagates errors through `Result`; the only
/// recovery point is the `try*` special form, which catches any variant and
/// hands the payload to its `catch*` clause.
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Scanner errors
    /// Malformed token encountered while scanning
    ///
    /// **Example:** `"unterminated` (string without a closing quote)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where the error occurred (1-indexed)
        line: usize,
        /// Column number where the error occurred (1-indexed)
        col: usize,
        /// Error description
        message: String,
    },

    // Reader errors
    /// General reader error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Ran out of tokens mid-form
    ///
    /// **Example:** `(+ 1 2` (missing closing parenthesis)
    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Evaluation errors
    /// Wrong number of arguments to a special form or callable
    ///
    /// **Example:** `(def! x)` (def! takes exactly two arguments)
    #[error("wrong argument count: {form} expects {expected}, got {got}")]
    WrongArgumentCount {
        /// Name of the form or callable
        form: String,
        /// Human-readable expected count ("2", "at least 1", "an even number")
        expected: String,
        /// Actual argument count
        got: usize,
    },

    /// Value used where an incompatible variant was required
    ///
    /// **Example:** `(def! 1 2)` (def! needs a symbol, got a number)
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Symbol lookup walked the whole environment chain without a match
    #[error("symbol not found: {name}")]
    UndefinedSymbol {
        /// Symbol name
        name: String,
    },

    /// Head of an applied list evaluated to something not callable
    #[error("not a callable: {type_name}")]
    NotCallable {
        /// Type of the non-callable value
        type_name: String,
    },

    /// Division or remainder by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Sequence index beyond valid range
    ///
    /// **Example:** `(nth (list 1 2) 5)`
    #[error("Index out of bounds: {index} for sequence of length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: i64,
        /// Sequence length
        length: usize,
    },

    /// File system failure surfaced by `slurp`
    #[error("I/O error: {0}")]
    Io(String),

    // User-raised
    /// Value raised via `(throw x)`
    ///
    /// Not an interpreter fault: carries an arbitrary user Value to the
    /// nearest enclosing `try*`.
    #[error("{0}")]
    Exception(Value),
}

impl Error {
    /// Create a type error from an expectation and the offending value's type
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create an arity error for a form with a fixed argument count
    pub fn arity(form: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::WrongArgumentCount {
            form: form.into(),
            expected: expected.to_string(),
            got,
        }
    }

    /// The payload handed to a `catch*` clause
    ///
    /// A thrown Value passes through untouched; every other variant is
    /// rendered to its message string.
    pub fn into_thrown_value(self) -> Value {
        match self {
            Error::Exception(value) => value,
            other => Value::Str(other.to_string()),
        }
    }
}

/// Result type for mallow operations
pub type Result<T> = std::result::Result<T, Error>;
