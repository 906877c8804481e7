//! Functions as values: fn, function, apply, map, filter, arity
//!
//! Closures capture the scope they are constructed in; invoking one runs
//! its body in a fresh child of that captured scope, never the caller's.
//! Bodies given as word lists are parsed once, at construction.

use super::{def, list_arg, word_arg, ProcedureTable};
use crate::error::EvalError;
use crate::eval::{call_value, code_block};
use crate::scope::Scope;
use crate::value::{Closure, Value};
use std::rc::Rc;

fn make_closure(
    function: &str,
    scope: &Rc<Scope>,
    arglist: &Value,
    body: &Value,
) -> Result<Value, EvalError> {
    let formals = list_arg(function, arglist)?;
    let mut params = Vec::with_capacity(formals.borrow().len());
    for item in formals.borrow().iter() {
        params.push(word_arg(function, item)?.to_lowercase());
    }
    let body = code_block(function, body)?;
    Ok(Value::Closure(Rc::new(Closure {
        params,
        body,
        scope: scope.clone(),
    })))
}

/// An anonymous closure capturing the current scope.
fn builtin_fn(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    make_closure("fn", scope, &args[0], &args[1])
}

/// Defines a named closure in the current frame.
fn builtin_function(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("function", &args[0])?;
    let closure = make_closure("function", scope, &args[1], &args[2])?;
    scope.define_local(&name, closure);
    Ok(Value::Nil)
}

/// Calls a closure or procedure with arguments taken from a list.
fn builtin_apply(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let call_args = list_arg("apply", &args[1])?.borrow().clone();
    call_value(scope, "apply", &args[0], call_args)
}

fn builtin_map(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let items = list_arg("map", &args[1])?.borrow().clone();
    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        mapped.push(call_value(scope, "map", &args[0], vec![item])?);
    }
    Ok(Value::list(mapped))
}

fn builtin_filter(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let items = list_arg("filter", &args[1])?.borrow().clone();
    let mut kept = Vec::new();
    for item in items {
        if call_value(scope, "filter", &args[0], vec![item.clone()])?.truthy() {
            kept.push(item);
        }
    }
    Ok(Value::list(kept))
}

/// Reports the declared argument count of a closure or procedure.
fn builtin_arity(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Closure(closure) => Ok(Value::Int(closure.params.len() as i64)),
        Value::Proc(proc) => Ok(Value::Int(proc.arity as i64)),
        other => Err(EvalError::type_error("arity", "fn or proc", other)),
    }
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "fn", 2, builtin_fn);
    def(table, "function", 3, builtin_function);
    def(table, "apply", 2, builtin_apply);
    def(table, "map", 2, builtin_map);
    def(table, "filter", 2, builtin_filter);
    def(table, "arity", 1, builtin_arity);
}
