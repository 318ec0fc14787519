//! Generic KV3 document tree.

use std::collections::HashMap;

/// A node of a parsed KV3 document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Key/value mapping, in source order
    Object(Object),

    /// Ordered list of values
    Array(Vec<Value>),

    /// Raw token text, verbatim (quoted strings keep their quotes)
    Scalar(String),

    /// Inline `#[ .. ]` byte array, normalized to single-space-separated hex pairs
    ByteBlob(String),
}

impl Value {
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Leaf text: the scalar token or the normalized byte blob.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) | Value::ByteBlob(text) => Some(text),
            Value::Object(_) | Value::Array(_) => None,
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Scalar(_) => "scalar",
            Value::ByteBlob(_) => "byte array",
        }
    }
}

/// Insertion-ordered map with unique keys.
///
/// Re-inserting an existing key replaces its value in place; the key keeps
/// its original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_last_write_wins() {
        let mut obj = Object::new();
        assert!(obj.insert("a", Value::Scalar("1".into())).is_none());
        obj.insert("b", Value::Scalar("2".into()));
        let old = obj.insert("a", Value::Scalar("3".into()));

        assert_eq!(old, Some(Value::Scalar("1".into())));
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a").and_then(Value::as_text), Some("3"));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_value_accessors() {
        let blob = Value::ByteBlob("00 01".into());
        assert_eq!(blob.as_text(), Some("00 01"));
        assert!(blob.as_object().is_none());
        assert_eq!(blob.kind(), "byte array");

        let arr = Value::Array(vec![Value::Scalar("x".into())]);
        assert_eq!(arr.as_array().map(<[Value]>::len), Some(1));
        assert_eq!(arr.as_text(), None);
    }
}
