//! List operations: first, last, butfirst, butlast, count, sorted, list,
//! fput, lput, item, iseq, concat, slice, setitem
//!
//! Lists are shared by reference; `setitem` mutates in place and the
//! change is visible through every alias. `fput`/`lput`/`sorted`/`slice`
//! build fresh lists instead. The sequence accessors also accept strings,
//! where elements are one-character strings.
//!
//! Indexing is zero-based; negative indexes count from the end.

use super::{def, int_arg, list_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::{compare, Value};
use std::rc::Rc;

fn builtin_first(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::List(items) => items
            .borrow()
            .first()
            .cloned()
            .ok_or_else(|| EvalError::runtime("first: empty list")),
        Value::Str(s) => s
            .chars()
            .next()
            .map(|c| Value::Str(c.to_string()))
            .ok_or_else(|| EvalError::runtime("first: empty string")),
        other => Err(EvalError::type_error("first", "list or str", other)),
    }
}

fn builtin_last(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::List(items) => items
            .borrow()
            .last()
            .cloned()
            .ok_or_else(|| EvalError::runtime("last: empty list")),
        Value::Str(s) => s
            .chars()
            .last()
            .map(|c| Value::Str(c.to_string()))
            .ok_or_else(|| EvalError::runtime("last: empty string")),
        other => Err(EvalError::type_error("last", "list or str", other)),
    }
}

fn builtin_butfirst(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::List(items) => {
            let items = items.borrow();
            Ok(Value::list(items.iter().skip(1).cloned().collect()))
        }
        Value::Str(s) => {
            let mut chars = s.chars();
            chars.next();
            Ok(Value::Str(chars.as_str().to_string()))
        }
        other => Err(EvalError::type_error("butfirst", "list or str", other)),
    }
}

fn builtin_butlast(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::List(items) => {
            let items = items.borrow();
            let keep = items.len().saturating_sub(1);
            Ok(Value::list(items[..keep].to_vec()))
        }
        Value::Str(s) => {
            let mut out = s.clone();
            out.pop();
            Ok(Value::Str(out))
        }
        other => Err(EvalError::type_error("butlast", "list or str", other)),
    }
}

fn builtin_count(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::List(items) => Ok(Value::Int(items.borrow().len() as i64)),
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::Dict(map) => Ok(Value::Int(map.borrow().len() as i64)),
        other => Err(EvalError::type_error("count", "list, str, or dict", other)),
    }
}

/// A freshly sorted copy; the argument is left alone.
fn builtin_sorted(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let mut items = list_arg("sorted", &args[0])?.borrow().clone();
    let mut failed = None;
    items.sort_by(|a, b| match compare("sorted", a, b) {
        Ok(ordering) => ordering,
        Err(error) => {
            failed.get_or_insert(error);
            std::cmp::Ordering::Equal
        }
    });
    match failed {
        Some(error) => Err(error),
        None => Ok(Value::list(items)),
    }
}

fn builtin_list(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::list(vec![args[0].clone(), args[1].clone()]))
}

/// A new list with the item prepended.
fn builtin_fput(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let items = list_arg("fput", &args[1])?;
    let mut out = vec![args[0].clone()];
    out.extend(items.borrow().iter().cloned());
    Ok(Value::list(out))
}

/// A new list with the item appended.
fn builtin_lput(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let items = list_arg("lput", &args[1])?;
    let mut out = items.borrow().clone();
    out.push(args[0].clone());
    Ok(Value::list(out))
}

fn resolve_index(function: &str, index: i64, len: usize) -> Result<usize, EvalError> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    if resolved < 0 || resolved >= len as i64 {
        return Err(EvalError::runtime(format!(
            "{}: index {} out of range",
            function, index
        )));
    }
    Ok(resolved as usize)
}

fn builtin_item(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let index = int_arg("item", &args[0])?;
    match &args[1] {
        Value::List(items) => {
            let items = items.borrow();
            let at = resolve_index("item", index, items.len())?;
            Ok(items[at].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let at = resolve_index("item", index, chars.len())?;
            Ok(Value::Str(chars[at].to_string()))
        }
        other => Err(EvalError::type_error("item", "list or str", other)),
    }
}

/// Inclusive integer range, descending when the limit is below the start.
fn builtin_iseq(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let (from, to) = (int_arg("iseq", &args[0])?, int_arg("iseq", &args[1])?);
    let range: Vec<Value> = if from <= to {
        (from..=to).map(Value::Int).collect()
    } else {
        (to..=from).rev().map(Value::Int).collect()
    };
    Ok(Value::list(range))
}

fn builtin_concat(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::List(a), Value::List(b)) => {
            let mut out = a.borrow().clone();
            out.extend(b.borrow().iter().cloned());
            Ok(Value::list(out))
        }
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        (Value::List(_) | Value::Str(_), other) => {
            Err(EvalError::type_error("concat", "two lists or two strs", other))
        }
        (other, _) => Err(EvalError::type_error("concat", "two lists or two strs", other)),
    }
}

fn clamp_range(start: i64, end: i64, len: usize) -> (usize, usize) {
    let len = len as i64;
    let resolve = |i: i64| -> i64 {
        let i = if i < 0 { i + len } else { i };
        i.clamp(0, len)
    };
    let (start, end) = (resolve(start), resolve(end));
    if start >= end {
        (0, 0)
    } else {
        (start as usize, end as usize)
    }
}

/// `slice seq start end`: the half-open range [start, end), clamped the
/// way Python slices are, so out-of-range bounds never error.
fn builtin_slice(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let start = int_arg("slice", &args[1])?;
    let end = int_arg("slice", &args[2])?;
    match &args[0] {
        Value::List(items) => {
            let items = items.borrow();
            let (a, b) = clamp_range(start, end, items.len());
            Ok(Value::list(items[a..b].to_vec()))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let (a, b) = clamp_range(start, end, chars.len());
            Ok(Value::Str(chars[a..b].iter().collect()))
        }
        other => Err(EvalError::type_error("slice", "list or str", other)),
    }
}

/// Mutates a list element in place; visible through every alias.
fn builtin_setitem(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let index = int_arg("setitem", &args[0])?;
    let items = list_arg("setitem", &args[1])?;
    let at = resolve_index("setitem", index, items.borrow().len())?;
    items.borrow_mut()[at] = args[2].clone();
    Ok(Value::Nil)
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "first", 1, builtin_first);
    def(table, "last", 1, builtin_last);
    def(table, "butfirst", 1, builtin_butfirst);
    def(table, "butlast", 1, builtin_butlast);
    def(table, "count", 1, builtin_count);
    def(table, "sorted", 1, builtin_sorted);
    def(table, "list", 2, builtin_list);
    def(table, "fput", 2, builtin_fput);
    def(table, "lput", 2, builtin_lput);
    def(table, "item", 2, builtin_item);
    def(table, "iseq", 2, builtin_iseq);
    def(table, "concat", 2, builtin_concat);
    def(table, "slice", 3, builtin_slice);
    def(table, "setitem", 3, builtin_setitem);
}
