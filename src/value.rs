// ABOUTME: Runtime values for Lunar programs and the operations shared by built-ins

use crate::error::EvalError;
use crate::scope::Scope;
use crate::token::Token;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Handler signature for built-in procedures. Every handler receives the
/// scope the call site is evaluating in plus exactly `arity` values.
pub type BuiltinFn = fn(&Rc<Scope>, &[Value]) -> Result<Value, EvalError>;

/// A built-in procedure: a name, a declared arity, and a host handler.
/// The evaluator consumes exactly `arity` following expressions per call.
#[derive(Debug, Clone, Copy)]
pub struct Procedure {
    pub name: &'static str,
    pub arity: usize,
    pub func: BuiltinFn,
}

/// A user-defined function: formal argument names, a parsed body, and the
/// scope that was active when it was constructed.
#[derive(Debug)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Rc<Vec<Token>>,
    pub scope: Rc<Scope>,
}

/// Dictionaries are insertion-ordered and keep the original key value next
/// to each entry so `keys` can hand it back unchanged.
pub type DictMap = IndexMap<DictKey, (Value, Value)>;

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Rc<RefCell<Vec<Value>>>),
    Dict(Rc<RefCell<DictMap>>),
    Closure(Rc<Closure>),
    Proc(Procedure),
    Block(Rc<Vec<Token>>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn dict(map: DictMap) -> Value {
        Value::Dict(Rc::new(RefCell::new(map)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Closure(_) => "fn",
            Value::Proc(_) => "proc",
            Value::Block(_) => "block",
        }
    }

    /// Nil and false are falsy, as are zero numbers and empty containers.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Dict(map) => !map.borrow().is_empty(),
            Value::Closure(_) | Value::Proc(_) | Value::Block(_) => true,
        }
    }

    /// Quoting form used by `show`: strings get quotes, containers render
    /// with brackets and quoted elements, scalars fall back to Display.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("\"{}\"", s),
            Value::List(items) => {
                let parts: Vec<String> = items.borrow().iter().map(Value::repr).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Dict(map) => {
                let parts: Vec<String> = map
                    .borrow()
                    .values()
                    .map(|(key, value)| format!("{}: {}", key.repr(), value.repr()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Block(tokens) => format!("[{}]", join_tokens(tokens)),
            other => other.to_string(),
        }
    }
}

fn join_tokens(tokens: &[Token]) -> String {
    let parts: Vec<String> = tokens.iter().map(Token::to_string).collect();
    parts.join(" ")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => {
                // Keep whole floats distinguishable from ints: 3.0, not 3
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Dict(_) => write!(f, "{}", self.repr()),
            Value::Closure(c) => write!(f, "#<fn/{}>", c.params.len()),
            Value::Proc(p) => write!(f, "#<proc {}>", p.name),
            Value::Block(tokens) => write!(f, "[{}]", join_tokens(tokens)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Dict(a), Value::Dict(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(key, (_, value))| {
                        b.get(key).is_some_and(|(_, theirs)| value == theirs)
                    })
            }
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Proc(a), Value::Proc(b)) => a.name == b.name,
            (Value::Block(a), Value::Block(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Total order used by the comparison procedures and `sorted`. Numbers
/// compare across Int/Float, strings and lists compare lexicographically,
/// everything else is a type error.
pub fn compare(function: &str, a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let (x, y) = (number(a), number(b));
            x.partial_cmp(&y)
                .ok_or_else(|| EvalError::runtime(format!("{}: values are not comparable", function)))
        }
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        (Value::List(x), Value::List(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            for (a, b) in x.iter().zip(y.iter()) {
                match compare(function, a, b)? {
                    Ordering::Equal => continue,
                    other => return Ok(other),
                }
            }
            Ok(x.len().cmp(&y.len()))
        }
        _ => Err(EvalError::type_error(function, "comparable values", b)),
    }
}

fn number(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(x) => *x,
        _ => unreachable!("checked by caller"),
    }
}

/// Hashable projection of a Value used as a dictionary key. Whole floats
/// collapse onto the matching Int so `1` and `1.0` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictKey {
    Nil,
    Bool(bool),
    Int(i64),
    Bits(u64),
    Str(String),
}

impl DictKey {
    pub fn new(function: &str, value: &Value) -> Result<DictKey, EvalError> {
        match value {
            Value::Nil => Ok(DictKey::Nil),
            Value::Bool(b) => Ok(DictKey::Bool(*b)),
            Value::Int(n) => Ok(DictKey::Int(*n)),
            Value::Float(x) if x.fract() == 0.0 && x.is_finite() => Ok(DictKey::Int(*x as i64)),
            Value::Float(x) => Ok(DictKey::Bits(x.to_bits())),
            Value::Str(s) => Ok(DictKey::Str(s.clone())),
            other => Err(EvalError::type_error(function, "hashable key", other)),
        }
    }
}
