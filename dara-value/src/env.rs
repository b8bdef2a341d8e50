use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Value;

/// A lexical scope frame: bindings plus an optional link to the enclosing
/// frame.
///
/// Frames are shared by reference (`Rc`): a closure and its defining scope
/// alias the same frame, so writes through either are observed by both.
/// New frames are created at program start and per function call only;
/// blocks do not open scopes.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Self::with_outer(None)
    }

    /// A fresh frame enclosed by `outer`; used at every function call, with
    /// the function's captured environment as the parent.
    pub fn enclosed(outer: Rc<Environment>) -> Rc<Environment> {
        Self::with_outer(Some(outer))
    }

    fn with_outer(outer: Option<Rc<Environment>>) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer,
        })
    }

    /// Looks `name` up, climbing the scope chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.borrow().get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Whether `name` resolves anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        if self.bindings.borrow().contains_key(name) {
            return true;
        }
        self.outer
            .as_ref()
            .map_or(false, |outer| outer.contains(name))
    }

    /// Binds `name` in this frame. Writes never climb the chain, so binding
    /// a name that resolves in an outer frame shadows it.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_climbs_the_chain() {
        let global = Environment::new();
        global.set("a", Value::Number(1.0));

        let inner = Environment::enclosed(global.clone());
        assert_eq!(inner.get("a"), Some(Value::Number(1.0)));
        assert_eq!(inner.get("b"), None);
        assert!(inner.contains("a"));
        assert!(!inner.contains("b"));
    }

    #[test]
    fn test_writes_stay_in_the_current_frame() {
        let global = Environment::new();
        global.set("a", Value::Number(1.0));

        let inner = Environment::enclosed(global.clone());
        inner.set("a", Value::Number(2.0));

        assert_eq!(inner.get("a"), Some(Value::Number(2.0)));
        // the outer binding is shadowed, not mutated
        assert_eq!(global.get("a"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_shared_frames_observe_writes() {
        let global = Environment::new();
        let alias = global.clone();

        global.set("x", Value::Number(1.0));
        alias.set("x", Value::Number(2.0));

        assert_eq!(global.get("x"), Some(Value::Number(2.0)));
    }
}
