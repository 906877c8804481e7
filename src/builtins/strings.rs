//! String operations: lowercase, uppercase, trim, ltrim, rtrim, empty,
//! space, tab, nl, split, join, split-by, join-by, word, starts-with,
//! ends-with, to-string, parse-int, parse-float
//!
//! `empty`/`space`/`tab`/`nl` are zero-arity constants so whitespace can
//! be spelled inside whitespace-tokenised source.

use super::{def, list_arg, str_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::Value;
use std::rc::Rc;

fn builtin_lowercase(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(str_arg("lowercase", &args[0])?.to_lowercase()))
}

fn builtin_uppercase(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(str_arg("uppercase", &args[0])?.to_uppercase()))
}

fn builtin_trim(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(str_arg("trim", &args[0])?.trim().to_string()))
}

fn builtin_ltrim(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(
        str_arg("ltrim", &args[0])?.trim_start().to_string(),
    ))
}

fn builtin_rtrim(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(str_arg("rtrim", &args[0])?.trim_end().to_string()))
}

fn builtin_empty(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(String::new()))
}

fn builtin_space(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(" ".to_string()))
}

fn builtin_tab(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str("\t".to_string()))
}

fn builtin_nl(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str("\n".to_string()))
}

/// Splits on runs of whitespace.
fn builtin_split(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let s = str_arg("split", &args[0])?;
    Ok(Value::list(
        s.split_whitespace()
            .map(|word| Value::Str(word.to_string()))
            .collect(),
    ))
}

fn joined(function: &str, separator: &str, items: &Value) -> Result<Value, EvalError> {
    let items = list_arg(function, items)?;
    let mut parts = Vec::with_capacity(items.borrow().len());
    for item in items.borrow().iter() {
        parts.push(str_arg(function, item)?.to_string());
    }
    Ok(Value::Str(parts.join(separator)))
}

/// Joins a list of strings with single spaces.
fn builtin_join(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    joined("join", " ", &args[0])
}

/// `split-by sep s`
fn builtin_split_by(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let separator = str_arg("split-by", &args[0])?;
    let s = str_arg("split-by", &args[1])?;
    if separator.is_empty() {
        return Err(EvalError::runtime("split-by: empty separator"));
    }
    Ok(Value::list(
        s.split(separator)
            .map(|part| Value::Str(part.to_string()))
            .collect(),
    ))
}

/// `join-by sep list`
fn builtin_join_by(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let separator = str_arg("join-by", &args[0])?;
    joined("join-by", separator, &args[1])
}

/// Concatenates the textual forms of two values into one word.
fn builtin_word(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(format!("{}{}", args[0], args[1])))
}

fn builtin_starts_with(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let s = str_arg("starts-with", &args[0])?;
    let prefix = str_arg("starts-with", &args[1])?;
    Ok(Value::Bool(s.starts_with(prefix)))
}

fn builtin_ends_with(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let s = str_arg("ends-with", &args[0])?;
    let suffix = str_arg("ends-with", &args[1])?;
    Ok(Value::Bool(s.ends_with(suffix)))
}

fn builtin_to_string(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(args[0].to_string()))
}

fn builtin_parse_int(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let s = str_arg("parse-int", &args[0])?;
    s.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| EvalError::runtime(format!("parse-int: invalid integer: {}", s)))
}

fn builtin_parse_float(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let s = str_arg("parse-float", &args[0])?;
    s.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| EvalError::runtime(format!("parse-float: invalid number: {}", s)))
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "lowercase", 1, builtin_lowercase);
    def(table, "uppercase", 1, builtin_uppercase);
    def(table, "trim", 1, builtin_trim);
    def(table, "ltrim", 1, builtin_ltrim);
    def(table, "rtrim", 1, builtin_rtrim);
    def(table, "empty", 0, builtin_empty);
    def(table, "space", 0, builtin_space);
    def(table, "tab", 0, builtin_tab);
    def(table, "nl", 0, builtin_nl);
    def(table, "split", 1, builtin_split);
    def(table, "join", 1, builtin_join);
    def(table, "split-by", 2, builtin_split_by);
    def(table, "join-by", 2, builtin_join_by);
    def(table, "word", 2, builtin_word);
    def(table, "starts-with", 2, builtin_starts_with);
    def(table, "ends-with", 2, builtin_ends_with);
    def(table, "to-string", 1, builtin_to_string);
    def(table, "parse-int", 1, builtin_parse_int);
    def(table, "parse-float", 1, builtin_parse_float);
}
