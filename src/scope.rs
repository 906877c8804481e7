// ABOUTME: Lexical scope chain with write-through assignment and control-flow flags

use crate::error::EvalError;
use crate::value::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of the environment tree. Names are stored lowercased.
///
/// The four flags are per-frame state consulted by the evaluator after each
/// expression: `breaking`/`continuing` are consumed by the nearest loop,
/// `returning` by the nearest closure invocation, and `test` backs the
/// `test`/`iftrue`/`iffalse` procedures.
#[derive(Debug)]
pub struct Scope {
    names: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Scope>>,
    pub test: Cell<bool>,
    pub breaking: Cell<bool>,
    pub continuing: Cell<bool>,
    pub returning: Cell<bool>,
}

impl Scope {
    /// Creates a root scope with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Scope {
            names: RefCell::new(HashMap::new()),
            parent: None,
            test: Cell::new(false),
            breaking: Cell::new(false),
            continuing: Cell::new(false),
            returning: Cell::new(false),
        })
    }

    /// Creates a child scope. Lookups fall through to the parent chain.
    pub fn with_parent(parent: Rc<Scope>) -> Rc<Self> {
        Rc::new(Scope {
            names: RefCell::new(HashMap::new()),
            parent: Some(parent),
            test: Cell::new(false),
            breaking: Cell::new(false),
            continuing: Cell::new(false),
            returning: Cell::new(false),
        })
    }

    /// Walks the parent chain; a missing name is None.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.get_raw(&name.to_lowercase())
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.names.borrow().get(key) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get_raw(key),
            None => None,
        }
    }

    /// Walks the parent chain; a missing name is an error.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.get(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_lowercase()))
    }

    /// Write-through assignment: mutates the nearest binding up the chain,
    /// or creates the name in the root scope when it is unbound everywhere.
    pub fn assign(&self, name: &str, value: Value) {
        self.assign_raw(name.to_lowercase(), value);
    }

    fn assign_raw(&self, key: String, value: Value) {
        if self.names.borrow().contains_key(&key) {
            self.names.borrow_mut().insert(key, value);
            return;
        }
        match &self.parent {
            Some(parent) => parent.assign_raw(key, value),
            None => {
                self.names.borrow_mut().insert(key, value);
            }
        }
    }

    /// Creates or overwrites a binding in this frame only.
    pub fn define_local(&self, name: &str, value: Value) {
        self.names.borrow_mut().insert(name.to_lowercase(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let scope = Scope::new();
        scope.define_local("x", Value::Int(42));
        assert_eq!(scope.get("x"), Some(Value::Int(42)));
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let scope = Scope::new();
        scope.define_local("Counter", Value::Int(1));
        assert_eq!(scope.get("counter"), Some(Value::Int(1)));
        assert_eq!(scope.get("COUNTER"), Some(Value::Int(1)));
    }

    #[test]
    fn test_lookup_reports_undefined_names() {
        let scope = Scope::new();
        assert!(matches!(
            scope.lookup("missing"),
            Err(EvalError::UndefinedVariable(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_child_sees_parent_bindings() {
        let parent = Scope::new();
        parent.define_local("x", Value::Int(42));
        let child = Scope::with_parent(parent);
        assert_eq!(child.get("x"), Some(Value::Int(42)));
    }

    #[test]
    fn test_shadowing() {
        let parent = Scope::new();
        parent.define_local("x", Value::Int(42));
        let child = Scope::with_parent(parent);
        child.define_local("x", Value::Int(100));
        assert_eq!(child.get("x"), Some(Value::Int(100)));
    }

    #[test]
    fn test_assign_mutates_nearest_outer_binding() {
        let root = Scope::new();
        root.define_local("x", Value::Int(1));
        let child = Scope::with_parent(root.clone());
        child.assign("x", Value::Int(2));

        assert_eq!(root.get("x"), Some(Value::Int(2)));
        // The child frame itself gained no binding of its own
        let grandchild = Scope::with_parent(child);
        grandchild.define_local("x", Value::Int(3));
        assert_eq!(root.get("x"), Some(Value::Int(2)));
    }

    #[test]
    fn test_assign_creates_implicit_global_at_root() {
        let root = Scope::new();
        let child = Scope::with_parent(root.clone());
        let grandchild = Scope::with_parent(child);
        grandchild.assign("fresh", Value::Int(7));
        assert_eq!(root.get("fresh"), Some(Value::Int(7)));
    }

    #[test]
    fn test_flags_are_per_frame() {
        let parent = Scope::new();
        let child = Scope::with_parent(parent.clone());
        child.returning.set(true);
        assert!(child.returning.get());
        assert!(!parent.returning.get());
    }
}
