//! Open key-value payload attached to a task.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type- and status-dependent custom data carried by a task.
///
/// Keys are field names; values are arbitrary JSON scalars or arrays. Fields
/// written at earlier statuses stay in the map as an audit trail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFields(Map<String, Value>);

impl CustomFields {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field map from a JSON value.
    ///
    /// Returns `None` unless the value is a JSON object; `null` maps to an
    /// empty field set.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts or replaces a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Adds a field, consuming and returning the map.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the number of stored fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no fields are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy of `self` overlaid with `provided`.
    ///
    /// Provided values win on key collisions; keys absent from `provided`
    /// keep their existing values.
    #[must_use]
    pub fn merged_with(&self, provided: &Self) -> Self {
        let mut merged = self.0.clone();
        for (key, value) in &provided.0 {
            merged.insert(key.clone(), value.clone());
        }
        Self(merged)
    }

    /// Converts the fields into a JSON object value.
    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for CustomFields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}
