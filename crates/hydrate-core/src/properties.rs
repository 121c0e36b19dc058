//! # Input Property Mappings
//!
//! An insertion-ordered map from property name to [`Value`]. Keys are
//! unique; inserting an existing key replaces its value in place. Input
//! order only matters for reporting redundant keys.

use crate::value::Value;

/// Property name → value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, Value)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace, returning the previous value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let position = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(position).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Properties {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Properties {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Properties {
    fn from(members: serde_json::Map<String, serde_json::Value>) -> Self {
        members
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect()
    }
}

impl TryFrom<serde_json::Value> for Properties {
    /// The rejected document, when it is not a JSON object.
    type Error = serde_json::Value;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Object(members) => Ok(Self::from(members)),
            other => Err(other),
        }
    }
}

/// Build a [`Properties`] mapping from `name => value` pairs.
///
/// ```
/// use hydrate_core::{properties, Value};
///
/// let props = properties! { "name" => "Ada", "age" => 36_i64 };
/// assert_eq!(props.get("age"), Some(&Value::Int(36)));
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::Properties::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut properties = $crate::Properties::new();
        $(properties.insert($name, $value);)+
        properties
    }};
}
