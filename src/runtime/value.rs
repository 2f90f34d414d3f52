use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Sentinel byte prefixed to keyword map keys
///
/// String keys are stored raw; keyword keys get this prefix so the two can
/// never collide. Only the key codec below and the printer decode it.
pub const KEYWORD_SENTINEL: char = '\u{7f}';

/// Runtime value representation
///
/// The reader's output IS this type: AST nodes and runtime values share one
/// universe, which is what makes macros and quasiquote plain data
/// manipulation. Collections are reference-counted and logically immutable
/// once built; `Atom` is the only mutable cell.
#[derive(Debug, Clone)]
pub enum Value {
    /// Nil constant
    Nil,
    /// Boolean constant (only `false` and `nil` are falsy)
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Immutable string
    Str(String),
    /// Keyword, stored without the leading colon
    Keyword(String),
    /// Identifier referencing an environment binding
    Symbol(String),
    /// Ordered sequence that evaluates by application
    List(Rc<Vec<Value>>),
    /// Ordered sequence that evaluates element-wise
    Vector(Rc<Vec<Value>>),
    /// Mapping from string-or-keyword keys to values
    ///
    /// Keys are encoded strings, see [`Value::map_key`].
    Map(Rc<HashMap<String, Value>>),
    /// User closure: parameters, body form, captured environment
    Lambda(Rc<Closure>),
    /// Same shape as Lambda, but applied to unevaluated forms
    Macro(Rc<Closure>),
    /// Native builtin function
    Native(Rc<NativeFn>),
    /// Mutable cell holding one value
    Atom(Rc<RefCell<Value>>),
}

/// Closure payload shared by Lambda and Macro
///
/// `params` may contain the literal `&` marker: the parameter after it binds
/// a list of all remaining arguments.
#[derive(Debug)]
pub struct Closure {
    /// Parameter names, possibly with a `&` variadic marker
    pub params: Vec<String>,
    /// Body form, evaluated on application
    pub body: Value,
    /// Environment captured at definition time
    pub env: Rc<crate::runtime::Environment>,
}

/// Native builtin: a name and a plain function pointer
pub struct NativeFn {
    /// Builtin name as bound in the root environment
    pub name: &'static str,
    /// Implementation; arguments arrive already evaluated
    pub func: fn(&[Value]) -> Result<Value>,
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NativeFn").field("name", &self.name).finish()
    }
}

impl Value {
    /// Creates a list value from a vector of values
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Rc::new(values))
    }

    /// Creates a vector value from a vector of values
    pub fn vector(values: Vec<Value>) -> Self {
        Value::Vector(Rc::new(values))
    }

    /// Creates a map value from a hashmap of encoded keys
    pub fn map(entries: HashMap<String, Value>) -> Self {
        Value::Map(Rc::new(entries))
    }

    /// Creates a symbol value
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Creates a keyword value from its bare name
    pub fn keyword(name: impl Into<String>) -> Self {
        Value::Keyword(name.into())
    }

    /// Creates an atom holding the given value
    pub fn atom(value: Value) -> Self {
        Value::Atom(Rc::new(RefCell::new(value)))
    }

    /// Creates a native builtin value
    pub fn native(name: &'static str, func: fn(&[Value]) -> Result<Value>) -> Self {
        Value::Native(Rc::new(NativeFn { name, func }))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "number",
            Value::Str(_) => "string",
            Value::Keyword(_) => "keyword",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::Map(_) => "map",
            Value::Lambda(_) => "function",
            Value::Macro(_) => "macro",
            Value::Native(_) => "builtin",
            Value::Atom(_) => "atom",
        }
    }

    /// Returns true if the value is truthy in a boolean context
    ///
    /// Only `nil` and `false` are falsy; `0`, `""` and empty collections are
    /// all truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    // Type cast helpers

    /// Returns the integer payload
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(Error::type_mismatch("number", self.type_name())),
        }
    }

    /// Returns a reference to the string payload
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(Error::type_mismatch("string", self.type_name())),
        }
    }

    /// Returns the symbol name
    pub fn as_symbol(&self) -> Result<&str> {
        match self {
            Value::Symbol(s) => Ok(s),
            _ => Err(Error::type_mismatch("symbol", self.type_name())),
        }
    }

    /// Returns the elements of a list
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(Error::type_mismatch("list", self.type_name())),
        }
    }

    /// Returns the elements of a list or vector
    pub fn as_seq(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) | Value::Vector(items) => Ok(items),
            _ => Err(Error::type_mismatch("list or vector", self.type_name())),
        }
    }

    /// Returns a reference to the map payload
    pub fn as_map(&self) -> Result<&HashMap<String, Value>> {
        match self {
            Value::Map(entries) => Ok(entries),
            _ => Err(Error::type_mismatch("map", self.type_name())),
        }
    }

    /// Returns the atom's cell
    pub fn as_atom(&self) -> Result<&Rc<RefCell<Value>>> {
        match self {
            Value::Atom(cell) => Ok(cell),
            _ => Err(Error::type_mismatch("atom", self.type_name())),
        }
    }

    /// Returns true for lists and vectors
    pub fn is_sequential(&self) -> bool {
        matches!(self, Value::List(_) | Value::Vector(_))
    }

    // Map key codec

    /// Encodes a string-or-keyword value into a map key
    ///
    /// Keyword keys carry the sentinel prefix so they never collide with
    /// string keys. Equality stays byte-exact.
    pub fn map_key(&self) -> Result<String> {
        match self {
            Value::Str(s) => Ok(s.clone()),
            Value::Keyword(k) => Ok(format!("{}{}", KEYWORD_SENTINEL, k)),
            _ => Err(Error::type_mismatch("string or keyword", self.type_name())),
        }
    }

    /// Decodes a map key back into its string-or-keyword value
    pub fn from_map_key(key: &str) -> Value {
        match key.strip_prefix(KEYWORD_SENTINEL) {
            Some(name) => Value::Keyword(name.to_string()),
            None => Value::Str(key.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", crate::printer::pr_str(self, false))
    }
}

// Callables and atoms compare by identity; everything else structurally.
// Lists and vectors compare equal when their elements do, matching the
// language's `=` builtin.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (
                Value::List(a) | Value::Vector(a),
                Value::List(b) | Value::Vector(b),
            ) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            (Value::Macro(a), Value::Macro(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Atom(a), Value::Atom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
