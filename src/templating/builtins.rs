//! Built-in helper functions that themes may opt into.
//!
//! Tera already ships string, number and collection filters; these helpers
//! cover the few conveniences it lacks. All take named arguments.
//!
//! | Function | Arguments | Result |
//! |----------|-----------|--------|
//! | `ternary` | `cond`, `yes`, `no` | `yes` when `cond` is truthy, else `no` |
//! | `empty` | `value` | whether `value` is null, false, zero or empty |
//! | `dump` | `value` | pretty-printed JSON of `value` |
//! | `has` | `map`, `key` | whether an object has `key` (or an array contains it) |

use std::collections::HashMap;
use tera::Value;

use super::functions::{FuncMap, function};

/// Registry containing every built-in helper.
#[must_use]
pub fn builtin_functions() -> FuncMap {
    let mut funcs = FuncMap::new();
    funcs.insert("ternary".to_string(), function(ternary));
    funcs.insert("empty".to_string(), function(empty));
    funcs.insert("dump".to_string(), function(dump));
    funcs.insert("has".to_string(), function(has));
    funcs
}

fn required<'a>(args: &'a HashMap<String, Value>, func: &str, key: &str) -> tera::Result<&'a Value> {
    args.get(key).ok_or_else(|| {
        tera::Error::msg(format!("Function `{func}` requires the `{key}` argument"))
    })
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn ternary(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let cond = required(args, "ternary", "cond")?;
    let yes = required(args, "ternary", "yes")?;
    let no = required(args, "ternary", "no")?;

    Ok(if is_empty(cond) {
        no.clone()
    } else {
        yes.clone()
    })
}

fn empty(args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::Bool(args.get("value").is_none_or(is_empty)))
}

fn dump(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let value = required(args, "dump", "value")?;
    serde_json::to_string_pretty(value)
        .map(Value::String)
        .map_err(|e| tera::Error::msg(format!("Function `dump` failed to encode value: {e}")))
}

fn has(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let map = required(args, "has", "map")?;
    let key = required(args, "has", "key")?;

    let found = match map {
        Value::Object(obj) => key.as_str().is_some_and(|k| obj.contains_key(k)),
        Value::Array(items) => items.contains(key),
        _ => false,
    };
    Ok(Value::Bool(found))
}
