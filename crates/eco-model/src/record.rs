//! Flat report record handed to the document template.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat `key → text` map of measurements, derived indices and diagnostic
/// statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportRecord {
    fields: BTreeMap<String, String>,
}

impl ReportRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys from `expected` that are missing from this record.
    pub fn missing_keys<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        expected
            .iter()
            .copied()
            .filter(|key| !self.fields.contains_key(*key))
            .collect()
    }

    /// Replace every empty value with `sentinel`.
    pub fn fill_empty(&mut self, sentinel: &str) {
        for value in self.fields.values_mut() {
            if value.trim().is_empty() {
                *value = sentinel.to_string();
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReportRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = ReportRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
