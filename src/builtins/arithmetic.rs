//! Arithmetic: add, sub, mul, div, mod, pow, minus, abs, int, pi, sqrt,
//! sin, cos, rad, deg, hypot, min, max
//!
//! Int operands stay Int (with checked overflow); a Float anywhere
//! promotes the operation to Float. `div` always yields a Float, and
//! `mod` follows the sign of the divisor.

use super::{def, float_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::{compare, Value};
use std::cmp::Ordering;
use std::rc::Rc;

fn overflow(function: &str) -> EvalError {
    EvalError::runtime(format!("{}: integer overflow", function))
}

fn binary(
    function: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => int_op(*x, *y)
            .map(Value::Int)
            .ok_or_else(|| overflow(function)),
        _ => {
            let (x, y) = (float_arg(function, a)?, float_arg(function, b)?);
            Ok(Value::Float(float_op(x, y)))
        }
    }
}

/// Shared with the `for` loop's step increment.
pub(crate) fn add_values(function: &str, a: &Value, b: &Value) -> Result<Value, EvalError> {
    binary(function, a, b, i64::checked_add, |x, y| x + y)
}

fn builtin_add(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    add_values("add", &args[0], &args[1])
}

fn builtin_sub(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    binary("sub", &args[0], &args[1], i64::checked_sub, |x, y| x - y)
}

fn builtin_mul(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    binary("mul", &args[0], &args[1], i64::checked_mul, |x, y| x * y)
}

/// True division: the result is always a Float.
fn builtin_div(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let (x, y) = (float_arg("div", &args[0])?, float_arg("div", &args[1])?);
    if y == 0.0 {
        return Err(EvalError::runtime("div: division by zero"));
    }
    Ok(Value::Float(x / y))
}

/// Remainder with the divisor's sign, so `mod -7 3` is 2 and `mod 7 -3`
/// is -2.
fn builtin_mod(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(_), Value::Int(0)) => Err(EvalError::runtime("mod: division by zero")),
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int((x % y + y) % y)),
        (a, b) => {
            let (x, y) = (float_arg("mod", a)?, float_arg("mod", b)?);
            if y == 0.0 {
                return Err(EvalError::runtime("mod: division by zero"));
            }
            Ok(Value::Float((x % y + y) % y))
        }
    }
}

fn builtin_pow(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Int(x), Value::Int(y)) if *y >= 0 => u32::try_from(*y)
            .ok()
            .and_then(|exp| x.checked_pow(exp))
            .map(Value::Int)
            .ok_or_else(|| overflow("pow")),
        (a, b) => {
            let (x, y) = (float_arg("pow", a)?, float_arg("pow", b)?);
            Ok(Value::Float(x.powf(y)))
        }
    }
}

fn builtin_minus(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Int(n) => n.checked_neg().map(Value::Int).ok_or_else(|| overflow("minus")),
        Value::Float(x) => Ok(Value::Float(-x)),
        other => Err(EvalError::type_error("minus", "number", other)),
    }
}

fn builtin_abs(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Int(n) => n.checked_abs().map(Value::Int).ok_or_else(|| overflow("abs")),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        other => Err(EvalError::type_error("abs", "number", other)),
    }
}

/// Truncates toward zero.
fn builtin_int(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(x) => {
            let truncated = x.trunc();
            if !truncated.is_finite()
                || truncated < i64::MIN as f64
                || truncated > i64::MAX as f64
            {
                return Err(EvalError::runtime("int: out of range"));
            }
            Ok(Value::Int(truncated as i64))
        }
        other => Err(EvalError::type_error("int", "number", other)),
    }
}

fn builtin_pi(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(std::f64::consts::PI))
}

fn builtin_sqrt(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let x = float_arg("sqrt", &args[0])?;
    if x < 0.0 {
        return Err(EvalError::runtime("sqrt: math domain error"));
    }
    Ok(Value::Float(x.sqrt()))
}

fn builtin_sin(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(float_arg("sin", &args[0])?.sin()))
}

fn builtin_cos(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(float_arg("cos", &args[0])?.cos()))
}

/// Degrees to radians.
fn builtin_rad(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(float_arg("rad", &args[0])?.to_radians()))
}

/// Radians to degrees.
fn builtin_deg(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(float_arg("deg", &args[0])?.to_degrees()))
}

fn builtin_hypot(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let (x, y) = (float_arg("hypot", &args[0])?, float_arg("hypot", &args[1])?);
    Ok(Value::Float(x.hypot(y)))
}

fn builtin_min(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match compare("min", &args[0], &args[1])? {
        Ordering::Greater => Ok(args[1].clone()),
        _ => Ok(args[0].clone()),
    }
}

fn builtin_max(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    match compare("max", &args[0], &args[1])? {
        Ordering::Less => Ok(args[1].clone()),
        _ => Ok(args[0].clone()),
    }
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "add", 2, builtin_add);
    def(table, "sub", 2, builtin_sub);
    def(table, "mul", 2, builtin_mul);
    def(table, "div", 2, builtin_div);
    def(table, "mod", 2, builtin_mod);
    def(table, "pow", 2, builtin_pow);
    def(table, "minus", 1, builtin_minus);
    def(table, "abs", 1, builtin_abs);
    def(table, "int", 1, builtin_int);
    def(table, "pi", 0, builtin_pi);
    def(table, "sqrt", 1, builtin_sqrt);
    def(table, "sin", 1, builtin_sin);
    def(table, "cos", 1, builtin_cos);
    def(table, "rad", 1, builtin_rad);
    def(table, "deg", 1, builtin_deg);
    def(table, "hypot", 2, builtin_hypot);
    def(table, "min", 2, builtin_min);
    def(table, "max", 2, builtin_max);
}
