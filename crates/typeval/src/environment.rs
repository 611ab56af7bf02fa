//! Variable environment mapping identifiers to values

use indexmap::IndexMap;

use crate::value::Value;

/// The variable environment consulted and mutated during evaluation.
///
/// One environment belongs to exactly one evaluator session at a time;
/// the type is deliberately not shareable across threads.
///
/// # Example
///
/// ```
/// use typeval::{Environment, Value};
///
/// let mut env = Environment::new();
/// env.set("ncpus", Value::int(4));
///
/// assert_eq!(env.get("ncpus"), Some(&Value::int(4)));
/// assert_eq!(env.get("physmem"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: IndexMap<String, Value>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value to an identifier, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Check if a binding exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// Load a decoded record into the environment.
    ///
    /// With `replace` the existing bindings are dropped first;
    /// otherwise the record's entries are merged over them.
    pub fn bulk_load(&mut self, vars: IndexMap<String, Value>, replace: bool) {
        if replace {
            self.clear();
        }
        for (name, value) in vars {
            self.vars.insert(name, value);
        }
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A copy of the bindings as a plain mapping.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        self.vars.clone()
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl From<IndexMap<String, Value>> for Environment {
    fn from(vars: IndexMap<String, Value>) -> Self {
        Self { vars }
    }
}
