//! Control flow: break, continue, return, conditionals, and loops
//!
//! `break`/`continue`/`return` are not errors; they set per-scope flags
//! the evaluator consults after every expression. Loops consume
//! `breaking` and `continuing` here, a closure call consumes `returning`
//! in the evaluator, and the flags never cross the user/host boundary.

use super::{def, word_arg, ProcedureTable};
use crate::error::EvalError;
use crate::eval::{code_block, results, run};
use crate::scope::Scope;
use crate::token::Token;
use crate::value::{compare, Value};
use std::cmp::Ordering;
use std::rc::Rc;

fn builtin_break(scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    scope.breaking.set(true);
    Ok(Value::Nil)
}

fn builtin_continue(scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    scope.continuing.set(true);
    Ok(Value::Nil)
}

fn builtin_return(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    scope.returning.set(true);
    Ok(args[0].clone())
}

/// Runs a body for its effects. A `return` inside the body must keep its
/// value alive on the way up, so that one case passes the value through.
fn run_body(scope: &Rc<Scope>, tokens: &[Token]) -> Result<Value, EvalError> {
    let value = run(tokens, scope)?;
    if scope.returning.get() {
        Ok(value)
    } else {
        Ok(Value::Nil)
    }
}

fn builtin_if(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    if args[0].truthy() {
        run_body(scope, &code_block("if", &args[1])?)
    } else {
        Ok(Value::Nil)
    }
}

/// The expression-producing conditional: parses and evaluates the chosen
/// branch, returning its first result.
fn builtin_ifelse(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let branch = if args[0].truthy() { &args[1] } else { &args[2] };
    let tokens = code_block("ifelse", branch)?;
    let values = results(&tokens, scope)?;
    Ok(values.into_iter().next().unwrap_or(Value::Nil))
}

/// Stores a condition for later `iftrue`/`iffalse` checks.
fn builtin_test(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    scope.test.set(args[0].truthy());
    Ok(Value::Nil)
}

fn builtin_iftrue(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    if scope.test.get() {
        run_body(scope, &code_block("iftrue", &args[0])?)
    } else {
        Ok(Value::Nil)
    }
}

fn builtin_iffalse(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    if !scope.test.get() {
        run_body(scope, &code_block("iffalse", &args[0])?)
    } else {
        Ok(Value::Nil)
    }
}

/// `while cond body`: the condition list is reparsed and re-evaluated
/// before every iteration; the loop continues while its first result is
/// truthy.
fn builtin_while(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let body = code_block("while", &args[1])?;
    loop {
        let cond = code_block("while", &args[0])?;
        let values = results(&cond, scope)?;
        if !values.first().is_some_and(Value::truthy) {
            return Ok(Value::Nil);
        }
        let value = run(&body, scope)?;
        if scope.returning.get() {
            return Ok(value);
        }
        if scope.breaking.get() {
            scope.breaking.set(false);
            return Ok(Value::Nil);
        }
        if scope.continuing.get() {
            scope.continuing.set(false);
        }
    }
}

/// `for varname from to step body`: counts while the variable has not
/// passed `to`, upward when `to >= from`, downward otherwise (the caller
/// supplies a negative step for that direction).
fn builtin_for(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("for", &args[0])?;
    let (from, to, step) = (&args[1], &args[2], &args[3]);
    let body = code_block("for", &args[4])?;

    scope.define_local(&name, from.clone());
    let ascending = compare("for", to, from)? != Ordering::Less;
    loop {
        let current = scope.lookup(&name)?;
        let in_range = if ascending {
            compare("for", &current, to)? != Ordering::Greater
        } else {
            compare("for", &current, to)? != Ordering::Less
        };
        if !in_range {
            return Ok(Value::Nil);
        }
        let value = run(&body, scope)?;
        if scope.returning.get() {
            return Ok(value);
        }
        if scope.breaking.get() {
            scope.breaking.set(false);
            return Ok(Value::Nil);
        }
        if scope.continuing.get() {
            scope.continuing.set(false);
        }
        let current = scope.lookup(&name)?;
        let next = super::arithmetic::add_values("for", &current, step)?;
        scope.define_local(&name, next);
    }
}

/// `foreach varname items body`: rebinds the variable to each item in
/// order. Strings iterate per character, dicts over their keys.
fn builtin_foreach(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("foreach", &args[0])?;
    let body = code_block("foreach", &args[2])?;
    let items: Vec<Value> = match &args[1] {
        Value::List(items) => items.borrow().clone(),
        Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
        Value::Dict(map) => map.borrow().values().map(|(key, _)| key.clone()).collect(),
        other => return Err(EvalError::type_error("foreach", "list, str, or dict", other)),
    };
    for item in items {
        scope.define_local(&name, item);
        let value = run(&body, scope)?;
        if scope.returning.get() {
            return Ok(value);
        }
        if scope.breaking.get() {
            scope.breaking.set(false);
            return Ok(Value::Nil);
        }
        if scope.continuing.get() {
            scope.continuing.set(false);
        }
    }
    Ok(Value::Nil)
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "break", 0, builtin_break);
    def(table, "continue", 0, builtin_continue);
    def(table, "return", 1, builtin_return);
    def(table, "if", 2, builtin_if);
    def(table, "ifelse", 3, builtin_ifelse);
    def(table, "test", 1, builtin_test);
    def(table, "iftrue", 1, builtin_iftrue);
    def(table, "iffalse", 1, builtin_iffalse);
    def(table, "while", 2, builtin_while);
    def(table, "for", 5, builtin_for);
    def(table, "foreach", 3, builtin_foreach);
}
