// ABOUTME: Error types for parse and evaluation failures in the Lunar interpreter

use crate::value::Value;
use thiserror::Error;

/// Everything the interpreter can raise. `break`/`continue`/`return` are
/// deliberately absent: they are ordinary control flow carried by scope
/// flags and never cross the user/host boundary as errors.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Unclosed list, end of input inside a block, stray `end`
    #[error("{0}")]
    Syntax(String),

    /// A call site ran out of tokens before its declared arity was met
    #[error("Not enough arguments to: {name}")]
    NotEnoughArguments { name: String },

    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// A statement-position expression produced a value nothing consumes
    #[error("You don't say what to do with: {0}")]
    UnusedValue(String),

    /// A built-in received an argument of the wrong variant
    #[error("{function}: expected {expected}, got {actual}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
    },

    /// `throw`, division by zero, out-of-range index, I/O failures
    #[error("{0}")]
    Runtime(String),
}

impl EvalError {
    pub fn syntax(message: impl Into<String>) -> Self {
        EvalError::Syntax(message.into())
    }

    pub fn type_error(function: &str, expected: &str, actual: &Value) -> Self {
        EvalError::TypeMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        EvalError::Runtime(message.into())
    }
}
