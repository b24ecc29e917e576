use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of name bindings with an optional parent frame.
///
/// Frames are shared through `Rc`: a closure keeps its defining frame alive
/// past the call that created it, and several closures may hang off the same
/// frame. Lookup walks toward the root; definition always writes the frame
/// it is called on.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        }
    }

    pub fn with_parent(parent: Rc<Environment>) -> Self {
        Self {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this frame, shadowing any binding further up.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Look `name` up here, then in each ancestor frame in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Whether `name` is bound in this frame itself, ignoring ancestors.
    pub fn defines_locally(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }
}
