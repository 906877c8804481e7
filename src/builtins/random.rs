//! Randomness and timing: rnd, random, rerandom, pick, timer
//!
//! One RNG per thread, reseedable with `rerandom` for reproducible runs.
//! `timer` reports seconds since the interpreter first looked at the
//! clock, as a float.

use super::{def, int_arg, list_arg, ProcedureTable};
use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;
use std::time::Instant;

thread_local! {
    static RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// A uniform float in [0, 1).
fn builtin_rnd(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(RNG.with(|rng| rng.borrow_mut().gen::<f64>())))
}

/// A uniform integer in [a, b], both ends included.
fn builtin_random(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let (low, high) = (int_arg("random", &args[0])?, int_arg("random", &args[1])?);
    if low > high {
        return Err(EvalError::runtime(format!(
            "random: empty range {} to {}",
            low, high
        )));
    }
    Ok(Value::Int(RNG.with(|rng| {
        rng.borrow_mut().gen_range(low..=high)
    })))
}

/// Reseeds the generator; the same seed replays the same sequence.
fn builtin_rerandom(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let seed = int_arg("rerandom", &args[0])?;
    RNG.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(seed as u64));
    Ok(Value::Nil)
}

/// A uniformly chosen element of a nonempty list.
fn builtin_pick(_scope: &Rc<Scope>, args: &[Value]) -> Result<Value, EvalError> {
    let items = list_arg("pick", &args[0])?;
    let items = items.borrow();
    if items.is_empty() {
        return Err(EvalError::runtime("pick: empty list"));
    }
    let at = RNG.with(|rng| rng.borrow_mut().gen_range(0..items.len()));
    Ok(items[at].clone())
}

fn builtin_timer(_scope: &Rc<Scope>, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Float(EPOCH.elapsed().as_secs_f64()))
}

pub fn register(table: &mut ProcedureTable) {
    def(table, "rnd", 0, builtin_rnd);
    def(table, "random", 2, builtin_random);
    def(table, "rerandom", 1, builtin_rerandom);
    def(table, "pick", 1, builtin_pick);
    def(table, "timer", 0, builtin_timer);
}
