//! Type predicates: is-string, is-bool, is-int, is-float, is-list,
//! is-dict, is-fn, is-proc, is-space, is-alpha, is-alnum, is-digit
//!
//! The character-class predicates take a string and are true when it is
//! nonempty and every character matches, so the empty string fails all
//! four.

use super::{def, str_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::Value;
use std::rc::Rc;

fn builtin_is_string(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Str(_))))
}

fn builtin_is_bool(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Bool(_))))
}

fn builtin_is_int(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Int(_))))
}

fn builtin_is_float(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Float(_))))
}

fn builtin_is_list(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::List(_))))
}

fn builtin_is_dict(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Dict(_))))
}

fn builtin_is_fn(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Closure(_))))
}

fn builtin_is_proc(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(args[0], Value::Proc(_))))
}

fn char_class(
    function: &str,
    args: &[Value],
    predicate: fn(char) -> bool,
) -> Result<Value, EvalError> {
    let s = str_arg(function, &args[0])?;
    Ok(Value::Bool(!s.is_empty() && s.chars().all(predicate)))
}

fn builtin_is_space(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    char_class("is-space", args, char::is_whitespace)
}

fn builtin_is_alpha(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    char_class("is-alpha", args, char::is_alphabetic)
}

fn builtin_is_alnum(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    char_class("is-alnum", args, char::is_alphanumeric)
}

fn builtin_is_digit(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    char_class("is-digit", args, char::is_numeric)
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "is-string", 1, builtin_is_string);
    def(table, "is-bool", 1, builtin_is_bool);
    def(table, "is-int", 1, builtin_is_int);
    def(table, "is-float", 1, builtin_is_float);
    def(table, "is-list", 1, builtin_is_list);
    def(table, "is-dict", 1, builtin_is_dict);
    def(table, "is-fn", 1, builtin_is_fn);
    def(table, "is-proc", 1, builtin_is_proc);
    def(table, "is-space", 1, builtin_is_space);
    def(table, "is-alpha", 1, builtin_is_alpha);
    def(table, "is-alnum", 1, builtin_is_alnum);
    def(table, "is-digit", 1, builtin_is_digit);
}
