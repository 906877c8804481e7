// ABOUTME: The pull-evaluator: eval_next, block scanning, run/results, closure calls

use crate::error::EvalError;
use crate::parser;
use crate::scope::Scope;
use crate::token::Token;
use crate::value::{Closure, Value};
use std::rc::Rc;

/// Evaluates exactly one expression starting at `cursor` and returns the
/// value along with the cursor past everything it consumed.
///
/// Procedure handles and closure-bound words pull as many further
/// expressions from the stream as their declared arity, recursively; this
/// is the whole parsing strategy, so there are no precedence rules.
pub fn eval_next(
    tokens: &[Token],
    cursor: usize,
    scope: &Rc<Scope>,
) -> Result<(Value, usize), EvalError> {
    let token = tokens
        .get(cursor)
        .ok_or_else(|| EvalError::syntax("Unexpected end of input in eval."))?;

    match token {
        Token::Literal(Value::Proc(proc)) => {
            let (args, cursor) = pull_args(tokens, cursor + 1, scope, proc.arity, proc.name)?;
            Ok(((proc.func)(scope, &args)?, cursor))
        }
        Token::Literal(value) => Ok((value.clone(), cursor + 1)),
        Token::Var(name) => Ok((scope.lookup(name)?, cursor + 1)),
        Token::Do => {
            let (block, cursor) = scan_block(tokens, cursor + 1)?;
            Ok((Value::Block(block), cursor))
        }
        Token::End => Err(EvalError::syntax("end without a matching do")),
        Token::Word(word) => {
            if let Some(Value::Closure(closure)) = scope.get(word) {
                let (args, cursor) =
                    pull_args(tokens, cursor + 1, scope, closure.params.len(), word)?;
                Ok((apply_closure(&closure, args)?, cursor))
            } else {
                Ok((Value::Str(word.clone()), cursor + 1))
            }
        }
    }
}

fn pull_args(
    tokens: &[Token],
    mut cursor: usize,
    scope: &Rc<Scope>,
    arity: usize,
    name: &str,
) -> Result<(Vec<Value>, usize), EvalError> {
    let mut args = Vec::with_capacity(arity);
    for _ in 0..arity {
        if cursor >= tokens.len() {
            return Err(EvalError::NotEnoughArguments {
                name: name.to_string(),
            });
        }
        let (value, next) = eval_next(tokens, cursor, scope)?;
        args.push(value);
        cursor = next;
    }
    Ok((args, cursor))
}

/// Collects tokens from `cursor` up to the matching `end`. A nested `do`
/// is scanned recursively and lands in the block as a single Block literal.
pub fn scan_block(tokens: &[Token], mut cursor: usize) -> Result<(Rc<Vec<Token>>, usize), EvalError> {
    let mut block = Vec::new();
    loop {
        match tokens.get(cursor) {
            None => return Err(EvalError::syntax("Unexpected end of input in block.")),
            Some(Token::End) => return Ok((Rc::new(block), cursor + 1)),
            Some(Token::Do) => {
                let (inner, next) = scan_block(tokens, cursor + 1)?;
                block.push(Token::Literal(Value::Block(inner)));
                cursor = next;
            }
            Some(token) => {
                block.push(token.clone());
                cursor += 1;
            }
        }
    }
}

/// Statement-oriented execution: evaluates expressions until the stream is
/// exhausted. A non-Nil statement value is an error; break/continue unwind
/// immediately with the flag left set for the enclosing loop, and a return
/// unwinds carrying the produced value.
pub fn run(tokens: &[Token], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    let mut cursor = 0;
    while cursor < tokens.len() {
        let (value, next) = eval_next(tokens, cursor, scope)?;
        cursor = next;
        if scope.breaking.get() || scope.continuing.get() {
            return Ok(Value::Nil);
        }
        if scope.returning.get() {
            return Ok(value);
        }
        if !matches!(value, Value::Nil) {
            return Err(EvalError::UnusedValue(value.to_string()));
        }
    }
    Ok(Value::Nil)
}

/// Expression-oriented execution: collects every produced value. A return
/// yields a singleton; break/continue stop the collection.
pub fn results(tokens: &[Token], scope: &Rc<Scope>) -> Result<Vec<Value>, EvalError> {
    let mut values = Vec::new();
    let mut cursor = 0;
    while cursor < tokens.len() {
        let (value, next) = eval_next(tokens, cursor, scope)?;
        cursor = next;
        if scope.returning.get() {
            return Ok(vec![value]);
        }
        if scope.breaking.get() || scope.continuing.get() {
            break;
        }
        values.push(value);
    }
    Ok(values)
}

/// Invokes a closure: a fresh child of the *captured* scope (never the
/// caller's), formals bound locally, body run to completion. The returning
/// flag is consumed here and nowhere else.
pub fn apply_closure(closure: &Closure, args: Vec<Value>) -> Result<Value, EvalError> {
    let scope = Scope::with_parent(closure.scope.clone());
    for (param, arg) in closure.params.iter().zip(args) {
        scope.define_local(param, arg);
    }
    let value = run(&closure.body, &scope)?;
    if scope.returning.get() {
        scope.returning.set(false);
        Ok(value)
    } else {
        Ok(Value::Nil)
    }
}

/// Calls a closure or procedure with an argument list assembled by the
/// caller (`apply`, `map`, `filter`) instead of pulled from the stream.
pub fn call_value(
    scope: &Rc<Scope>,
    function: &str,
    callee: &Value,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    match callee {
        Value::Closure(closure) => {
            if args.len() != closure.params.len() {
                return Err(EvalError::runtime(format!(
                    "{}: fn takes {} arguments, got {}",
                    function,
                    closure.params.len(),
                    args.len()
                )));
            }
            apply_closure(closure, args)
        }
        Value::Proc(proc) => {
            if args.len() != proc.arity {
                return Err(EvalError::runtime(format!(
                    "{}: {} takes {} arguments, got {}",
                    function,
                    proc.name,
                    proc.arity,
                    args.len()
                )));
            }
            (proc.func)(scope, &args)
        }
        other => Err(EvalError::type_error(function, "fn or proc", other)),
    }
}

/// Interprets a code-valued argument: a Block is used as-is, a List is
/// treated as words and parsed on the spot.
pub fn code_block(function: &str, value: &Value) -> Result<Rc<Vec<Token>>, EvalError> {
    match value {
        Value::Block(tokens) => Ok(tokens.clone()),
        Value::List(items) => {
            let mut words = Vec::with_capacity(items.borrow().len());
            for item in items.borrow().iter() {
                match item {
                    Value::Str(word) => words.push(word.clone()),
                    other => return Err(EvalError::type_error(function, "list of words", other)),
                }
            }
            Ok(Rc::new(parser::parse(words.iter().map(String::as_str))?))
        }
        other => Err(EvalError::type_error(function, "block or list", other)),
    }
}
