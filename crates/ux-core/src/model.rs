//! Flat key/value store that components bind their values to.
//!
//! A component's value is whatever string is stored under its own name.
//! Lookups are linear scans and the first matching key wins, so two
//! components sharing a name also share a value.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{UxError, UxResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    key: String,
    value: String,
}

/// Ordered key/value entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    entries: Vec<Entry>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// `"true"` is true, anything else (including a missing key) is false.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Update the first entry named `key`, or append a new one.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.value.clear();
                entry.value.push_str(value);
            }
            None => self.entries.push(Entry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    /// Entry at `offset` in insertion order.
    pub fn at(&self, offset: usize) -> Option<(&str, &str)> {
        self.entries
            .get(offset)
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }

    /// Remove the first entry named `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index).value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode the model for persistence.
    pub fn to_bytes(&self) -> UxResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| UxError::Serialization)
    }

    pub fn from_bytes(bytes: &[u8]) -> UxResult<Self> {
        postcard::from_bytes(bytes).map_err(|_| UxError::Serialization)
    }
}
