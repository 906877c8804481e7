//! Console I/O: print, type, show, readlist, readword
//!
//! `print` renders a list as its space-joined items; `show` keeps the
//! quoting repr so lists and dicts stay recognisable. Output goes to
//! stdout, and stdout is flushed before any read so prompt-style
//! `type`/`readword` pairs work.

use super::{def, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::Value;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

fn builtin_print(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    println!("{}", args[0]);
    Ok(Value::Nil)
}

/// `print` without the trailing newline.
fn builtin_type(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    print!("{}", args[0]);
    let _ = io::stdout().flush();
    Ok(Value::Nil)
}

fn builtin_show(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        value @ (Value::List(_) | Value::Dict(_) | Value::Block(_)) => {
            println!("{}", value.repr());
        }
        other => println!("{}", other),
    }
    Ok(Value::Nil)
}

fn read_line(function: &str) -> Result<String, EvalError> {
    let _ = io::stdout().flush();
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| EvalError::runtime(format!("{}: {}", function, e)))?;
    if read == 0 {
        return Err(EvalError::runtime(format!("{}: end of input", function)));
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Reads one line from stdin as a single word.
fn builtin_readword(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(read_line("readword")?))
}

/// Reads one line from stdin and splits it into a list of words.
fn builtin_readlist(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    let line = read_line("readlist")?;
    Ok(Value::list(
        line.split_whitespace()
            .map(|word| Value::Str(word.to_string()))
            .collect(),
    ))
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "print", 1, builtin_print);
    def(table, "type", 1, builtin_type);
    def(table, "show", 1, builtin_show);
    def(table, "readlist", 0, builtin_readlist);
    def(table, "readword", 0, builtin_readword);
}
