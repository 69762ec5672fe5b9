use super::value::Value;
use compact_str::ToCompactString;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// A frame of name bindings plus a handle on the enclosing frame.
///
/// Environments are shared: every closure holds the environment that was
/// current at its definition site, and that environment may outlive the
/// scope that created it. `outer` is fixed at construction, so the chain
/// can never form a cycle.
#[derive(Debug, Clone)]
pub struct Environment {
    inner: Arc<Mutex<EnvironmentImpl>>,
}

#[derive(Debug)]
struct EnvironmentImpl {
    values: HashMap<compact_str::CompactString, Value>,
    outer: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EnvironmentImpl {
                values: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_scope(&self) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EnvironmentImpl {
                values: HashMap::new(),
                outer: Some(self.clone()),
            })),
        }
    }

    /// Looks a name up, walking outward through enclosing frames.
    pub fn get(&self, name: &str) -> Option<Value> {
        let inner = self.inner.lock().unwrap();
        inner.get(name)
    }

    /// Binds a name in this frame only. Enclosing frames are never written.
    pub fn set(&mut self, name: &str, value: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner.set(name, value)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentImpl {
    fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            Some(value.clone())
        } else if let Some(outer) = self.outer.clone() {
            outer.get(name)
        } else {
            None
        }
    }

    fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_compact_string(), value);
    }
}
