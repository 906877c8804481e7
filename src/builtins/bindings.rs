//! Variable bindings: make, name, local, localmake, thing
//!
//! `make` is the write-through assignment: it mutates the nearest
//! existing binding up the scope chain and falls back to creating an
//! implicit global at the root. `local`/`localmake` pin a binding to the
//! current frame instead.

use super::{def, word_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::Value;
use std::rc::Rc;

fn builtin_make(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("make", &args[0])?;
    scope.assign(&name, args[1].clone());
    Ok(Value::Nil)
}

/// `make` with the operands reversed, for pipeline-flavored code.
fn builtin_name(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("name", &args[1])?;
    scope.assign(&name, args[0].clone());
    Ok(Value::Nil)
}

/// Declares one name (or a list of names) in the current frame, bound to
/// Nil until something assigns them.
fn builtin_local(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Str(name) => scope.define_local(name, Value::Nil),
        Value::List(items) => {
            for item in items.borrow().iter() {
                let name = word_arg("local", item)?;
                scope.define_local(&name, Value::Nil);
            }
        }
        other => return Err(EvalError::type_error("local", "name or list of names", other)),
    }
    Ok(Value::Nil)
}

fn builtin_localmake(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("localmake", &args[0])?;
    scope.define_local(&name, args[1].clone());
    Ok(Value::Nil)
}

/// Looks a name up by its textual form; unbound names are an error.
fn builtin_thing(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("thing", &args[0])?;
    scope.lookup(&name)
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "make", 2, builtin_make);
    def(table, "name", 2, builtin_name);
    def(table, "local", 1, builtin_local);
    def(table, "localmake", 2, builtin_localmake);
    def(table, "thing", 1, builtin_thing);
}
