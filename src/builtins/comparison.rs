//! Comparison and logic: lt, lte, eq, neq, gt, gte, and, or, not
//!
//! Equality is structural (Int and Float compare numerically); ordering
//! works on numbers, strings, and lists. `and`/`or` return one of their
//! operands rather than a coerced Bool; both operands are already
//! evaluated by the time the handler runs, so there is no short-circuit.

use super::{def, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::{compare, Value};
use std::cmp::Ordering;
use std::rc::Rc;

fn builtin_lt(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(
        compare("lt", &args[0], &args[1])? == Ordering::Less,
    ))
}

fn builtin_lte(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(
        compare("lte", &args[0], &args[1])? != Ordering::Greater,
    ))
}

fn builtin_gt(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(
        compare("gt", &args[0], &args[1])? == Ordering::Greater,
    ))
}

fn builtin_gte(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(
        compare("gte", &args[0], &args[1])? != Ordering::Less,
    ))
}

fn builtin_eq(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(args[0] == args[1]))
}

fn builtin_neq(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(args[0] != args[1]))
}

fn builtin_and(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    if args[0].truthy() {
        Ok(args[1].clone())
    } else {
        Ok(args[0].clone())
    }
}

fn builtin_or(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    if args[0].truthy() {
        Ok(args[0].clone())
    } else {
        Ok(args[1].clone())
    }
}

fn builtin_not(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(!args[0].truthy()))
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "lt", 2, builtin_lt);
    def(table, "lte", 2, builtin_lte);
    def(table, "eq", 2, builtin_eq);
    def(table, "neq", 2, builtin_neq);
    def(table, "gt", 2, builtin_gt);
    def(table, "gte", 2, builtin_gte);
    def(table, "and", 2, builtin_and);
    def(table, "or", 2, builtin_or);
    def(table, "not", 1, builtin_not);
}
