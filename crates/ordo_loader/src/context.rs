//! Shared key/value context.
//!
//! The [`Context`] is handed to the ignore predicate, the module hook and
//! every [`LoadHook`](crate::LoadHook). Values are JSON so the same bag can be
//! written in a configuration file and read back with typed accessors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An arbitrary key/value bag shared by all hooks of a run.
///
/// # Example
///
/// ```
/// use ordo_loader::Context;
///
/// let ctx = Context::new()
///     .with("environment", "staging")
///     .with("workers", 4);
///
/// assert_eq!(ctx.get_as::<String>("environment").as_deref(), Some("staging"));
/// assert_eq!(ctx.get_as::<u32>("workers"), Some(4));
/// assert_eq!(ctx.get_as::<u32>("environment"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value and returns self for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Gets the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Gets a value deserialized as `T`.
    ///
    /// Returns `None` if the key is absent or the value has another shape.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the context holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_previous_value() {
        let mut ctx = Context::new().with("mode", "dev");
        let previous = ctx.insert("mode", "prod");
        assert_eq!(previous, Some(Value::from("dev")));
        assert_eq!(ctx.get_as::<String>("mode").as_deref(), Some("prod"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn missing_key_reads_as_none() {
        let ctx = Context::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.get_as::<bool>("debug"), None);
    }

    #[test]
    fn deserializes_from_plain_object() {
        let ctx: Context = serde_json::from_str(r#"{"region": "eu", "retries": 3}"#).unwrap();
        assert!(ctx.contains_key("region"));
        assert_eq!(ctx.get_as::<u8>("retries"), Some(3));
    }
}
