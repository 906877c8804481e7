//! # Built-in Procedure Table
//!
//! The registry of every built-in the tokeniser can embed: name, fixed
//! arity, and handler. The evaluator decides how many following
//! expressions to consume from the arity alone.
//!
//! ## Categories
//!
//! - **[meta]**: parse, run, results, load, ignore, throw, catch
//! - **[flow]**: break, continue, return, if, ifelse, test, iftrue,
//!   iffalse, while, for, foreach
//! - **[io]**: print, type, show, readlist, readword
//! - **[bindings]**: make, name, local, localmake, thing
//! - **[functions]**: fn, function, apply, map, filter, arity
//! - **[arithmetic]**: add, sub, mul, div, mod, pow, minus, abs, int, pi,
//!   sqrt, sin, cos, rad, deg, hypot, min, max
//! - **[comparison]**: lt, lte, eq, neq, gt, gte, and, or, not
//! - **[lists]**: first, last, butfirst, butlast, count, sorted, list,
//!   fput, lput, item, iseq, concat, slice, setitem
//! - **[strings]**: lowercase, uppercase, trim, ltrim, rtrim, empty,
//!   space, tab, nl, split, join, split-by, join-by, word, starts-with,
//!   ends-with, to-string, parse-int, parse-float
//! - **[types]**: is-string, is-bool, is-int, is-float, is-list, is-dict,
//!   is-fn, is-proc, is-space, is-alpha, is-alnum, is-digit
//! - **[dicts]**: dict, get, put, del, keys
//! - **[random]**: rnd, random, rerandom, pick, timer

use crate::error::EvalError;
use crate::value::{BuiltinFn, DictMap, Procedure, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::LazyLock;

pub mod arithmetic;
pub mod bindings;
pub mod comparison;
pub mod dicts;
pub mod flow;
pub mod functions;
pub mod io;
pub mod lists;
pub mod meta;
pub mod random;
pub mod strings;
pub mod types;

pub type ProcedureTable = HashMap<&'static str, Procedure>;

static PROCEDURES: LazyLock<ProcedureTable> = LazyLock::new(|| {
    let mut table = ProcedureTable::new();
    meta::register(&mut table);
    flow::register(&mut table);
    io::register(&mut table);
    bindings::register(&mut table);
    functions::register(&mut table);
    arithmetic::register(&mut table);
    comparison::register(&mut table);
    lists::register(&mut table);
    strings::register(&mut table);
    types::register(&mut table);
    dicts::register(&mut table);
    random::register(&mut table);
    table
});

/// Looks up a procedure handle by lowercased name.
pub fn lookup(name: &str) -> Option<Procedure> {
    PROCEDURES.get(name).copied()
}

pub(crate) fn def(table: &mut ProcedureTable, name: &'static str, arity: usize, func: BuiltinFn) {
    table.insert(name, Procedure { name, arity, func });
}

// ============================================================================
// Shared argument accessors
// ============================================================================

pub(crate) fn int_arg(function: &str, value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(EvalError::type_error(function, "int", other)),
    }
}

pub(crate) fn float_arg(function: &str, value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(x) => Ok(*x),
        other => Err(EvalError::type_error(function, "number", other)),
    }
}

pub(crate) fn str_arg<'a>(function: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(EvalError::type_error(function, "str", other)),
    }
}

/// Name arguments (`make`, `for`, `function`, ...) arrive as bare words.
pub(crate) fn word_arg(function: &str, value: &Value) -> Result<String, EvalError> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(EvalError::type_error(function, "name", other)),
    }
}

pub(crate) fn list_arg(
    function: &str,
    value: &Value,
) -> Result<Rc<RefCell<Vec<Value>>>, EvalError> {
    match value {
        Value::List(items) => Ok(items.clone()),
        other => Err(EvalError::type_error(function, "list", other)),
    }
}

pub(crate) fn dict_arg(function: &str, value: &Value) -> Result<Rc<RefCell<DictMap>>, EvalError> {
    match value {
        Value::Dict(map) => Ok(map.clone()),
        other => Err(EvalError::type_error(function, "dict", other)),
    }
}
