//! Dictionary operations: dict, get, put, del, keys
//!
//! Dicts are shared by reference and iterate their keys in insertion
//! order. Keys may be nil, bools, numbers, or strings; containers and
//! functions are not hashable.

use super::{def, dict_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::{DictKey, DictMap, Value};
use std::rc::Rc;

fn builtin_dict(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::dict(DictMap::new()))
}

/// A missing key is Nil, not an error.
fn builtin_get(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let map = dict_arg("get", &args[0])?;
    let key = DictKey::new("get", &args[1])?;
    let value = map.borrow().get(&key).map(|(_, value)| value.clone());
    Ok(value.unwrap_or(Value::Nil))
}

fn builtin_put(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let map = dict_arg("put", &args[0])?;
    let key = DictKey::new("put", &args[1])?;
    map.borrow_mut()
        .insert(key, (args[1].clone(), args[2].clone()));
    Ok(Value::Nil)
}

/// Removes a key if present; deleting a missing key is not an error.
fn builtin_del(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let map = dict_arg("del", &args[0])?;
    let key = DictKey::new("del", &args[1])?;
    map.borrow_mut().shift_remove(&key);
    Ok(Value::Nil)
}

/// The keys as they were inserted, in order.
fn builtin_keys(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let map = dict_arg("keys", &args[0])?;
    let keys = map
        .borrow()
        .values()
        .map(|(key, _)| key.clone())
        .collect();
    Ok(Value::list(keys))
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "dict", 0, builtin_dict);
    def(table, "get", 2, builtin_get);
    def(table, "put", 3, builtin_put);
    def(table, "del", 2, builtin_del);
    def(table, "keys", 1, builtin_keys);
}
