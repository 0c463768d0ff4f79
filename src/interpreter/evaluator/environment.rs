use std::collections::HashMap;

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// The table of variables bound while a program runs.
///
/// Names are case-sensitive. Every binding owns its value; lookups hand out
/// copies, so two variables never share a matrix buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns a copy of the value bound to `name`.
    ///
    /// # Errors
    /// Returns `UnknownVariable` if `name` is not bound.
    ///
    /// # Example
    /// ```
    /// use matcalc::interpreter::{
    ///     evaluator::environment::Environment,
    ///     value::core::{Scalar, Value},
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.bind("x", Value::from(Scalar::integer(4.0)));
    ///
    /// assert_eq!(env.lookup("x", 1).unwrap(), Value::from(Scalar::integer(4.0)));
    /// assert!(env.lookup("X", 1).is_err());
    /// ```
    pub fn lookup(&self, name: &str, line: usize) -> Result<Value, RuntimeError> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                          line })
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn bind(&mut self, name: &str, value: Value) {
        tracing::trace!(name, value = %value.describe(), "bind");
        self.bindings.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The bindings sorted by name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

