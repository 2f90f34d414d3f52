//! Printer: renders a value back to text
//!
//! Two modes: readable output escapes strings so the result scans back to an
//! equal value; display output prints strings raw. `Display for Value` is the
//! display mode.

use crate::runtime::Value;

/// Renders a value to text
///
/// With `readably` set, strings are quoted and escaped; otherwise they are
/// emitted verbatim. All other variants print the same in both modes.
pub fn pr_str(value: &Value, readably: bool) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Str(s) => {
            if readably {
                escape_string(s)
            } else {
                s.clone()
            }
        }
        Value::Keyword(k) => format!(":{}", k),
        Value::Symbol(s) => s.clone(),
        Value::List(items) => format!("({})", join(items, readably)),
        Value::Vector(items) => format!("[{}]", join(items, readably)),
        Value::Map(entries) => {
            let body = entries
                .iter()
                .map(|(key, val)| {
                    format!(
                        "{} {}",
                        pr_str(&Value::from_map_key(key), readably),
                        pr_str(val, readably)
                    )
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("{{{}}}", body)
        }
        Value::Lambda(closure) => format!("<function({} params)>", closure.params.len()),
        Value::Macro(closure) => format!("<macro({} params)>", closure.params.len()),
        Value::Native(native) => format!("<builtin {}>", native.name),
        Value::Atom(cell) => format!("(atom {})", pr_str(&cell.borrow(), readably)),
    }
}

/// Renders a sequence of values separated by `sep`
pub fn pr_seq(values: &[Value], readably: bool, sep: &str) -> String {
    values
        .iter()
        .map(|v| pr_str(v, readably))
        .collect::<Vec<_>>()
        .join(sep)
}

fn join(values: &[Value], readably: bool) -> String {
    pr_seq(values, readably, " ")
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
