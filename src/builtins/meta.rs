//! Meta procedures: parse, run, results, load, ignore, throw, catch
//!
//! Code-as-data entry points. `parse` turns a list of words into a runnable
//! block, `run` and `results` execute one, `load` pulls in a whole file,
//! and `throw`/`catch` are the error-handling pair.

use super::{def, str_arg, word_arg, ProcedureTable};
use crate::error::EvalError;
use crate::eval::{code_block, results, run};
use crate::parser;
use crate::scope::Scope;
use crate::value::Value;
use std::fs;
use std::rc::Rc;

/// Parses a list of words into a block.
fn builtin_parse(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Block(code_block("parse", &args[0])?))
}

/// Runs a block (or list of words) in statement position.
fn builtin_run(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let tokens = code_block("run", &args[0])?;
    run(&tokens, scope)
}

/// Runs a block (or list of words) and collects every value it produces.
fn builtin_results(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let tokens = code_block("results", &args[0])?;
    Ok(Value::list(results(&tokens, scope)?))
}

/// Loads a source file: every line is tokenised, the tokens concatenated,
/// and the whole program run in a fresh child scope. Bindings the file
/// creates with `make` land in the root scope and survive the load.
fn builtin_load(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let filename = str_arg("load", &args[0])?;
    let contents = fs::read_to_string(filename)
        .map_err(|e| EvalError::runtime(format!("load: {}: {}", filename, e)))?;
    let mut code = Vec::new();
    for line in contents.lines() {
        code.extend(parser::parse_line(line)?);
    }
    let file_scope = Scope::with_parent(scope.clone());
    run(&code, &file_scope)
}

/// Discards a value; the statement-position escape hatch.
fn builtin_ignore(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Nil)
}

/// Raises a runtime error whose message is the argument's textual form.
fn builtin_throw(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Err(EvalError::runtime(args[0].to_string()))
}

/// Runs a body and binds the error message (or Nil on success) to the
/// named variable. Errors never escape a catch.
fn builtin_catch(scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let name = word_arg("catch", &args[0])?;
    match code_block("catch", &args[1]).and_then(|tokens| run(&tokens, scope)) {
        Ok(value) => {
            scope.define_local(&name, Value::Nil);
            if scope.returning.get() {
                Ok(value)
            } else {
                Ok(Value::Nil)
            }
        }
        Err(error) => {
            scope.define_local(&name, Value::Str(error.to_string()));
            Ok(Value::Nil)
        }
    }
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "parse", 1, builtin_parse);
    def(table, "run", 1, builtin_run);
    def(table, "results", 1, builtin_results);
    def(table, "load", 1, builtin_load);
    def(table, "ignore", 1, builtin_ignore);
    def(table, "throw", 1, builtin_throw);
    def(table, "catch", 2, builtin_catch);
}
