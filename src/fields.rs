//! Flat key/value field sets exchanged with the payment gateway.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Keys carrying this prefix take part in signing. Everything else,
/// including the `signature` field itself, is ignored by the signer.
pub const SIGNED_PREFIX: &str = "vads_";

/// An ordered field set. Iteration yields keys in lexicographic order,
/// which is also the canonical signing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values of the signed fields, in key order.
    pub fn signed_values(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(k, _)| k.starts_with(SIGNED_PREFIX))
            .map(|(_, v)| v.as_str())
    }
}

impl From<HashMap<String, String>> for FieldSet {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl FromIterator<(String, String)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
