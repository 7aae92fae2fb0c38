use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key-value fields attached to a summary record
///
/// Stores arbitrary JSON values under string keys. Keys are kept sorted so
/// that two summaries with the same fields serialize identically. Later
/// writers win on key collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CustomFields {
    data: BTreeMap<String, serde_json::Value>,
}

impl CustomFields {
    /// Create a new empty CustomFields instance
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Set a value by key, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Merge every entry of `other` into `self`; `other` wins on collision
    pub fn merge(&mut self, other: CustomFields) {
        self.data.extend(other.data);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_later_writer_wins() {
        let mut base = CustomFields::new();
        base.set("orderId", json!("o-1"));
        base.set("retries", json!(1));

        let mut later = CustomFields::new();
        later.set("retries", json!(3));

        base.merge(later);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("retries"), Some(&json!(3)));
        assert_eq!(base.get("orderId"), Some(&json!("o-1")));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut fields = CustomFields::new();
        fields.set("b", json!(2));
        fields.set("a", json!(1));

        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }
}
