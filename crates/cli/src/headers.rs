// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Case-insensitive, insertion-ordered header storage.

/// Normalize a header name for lookup.
pub fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct HeaderEntry {
    key: String,
    name: String,
    value: String,
}

/// Ordered header map with case-insensitive lookup.
///
/// Iteration follows first insertion. Writing a name that is already present
/// (under any casing) replaces that entry in place: last write wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderStore {
    entries: Vec<HeaderEntry>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any value stored under the same normalized name.
    pub fn set(&mut self, name: &str, value: &str) {
        let key = normalize(name);
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.name = name.trim().to_string();
                entry.value = value.to_string();
            }
            None => self.entries.push(HeaderEntry {
                key,
                name: name.trim().to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = normalize(name);
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = normalize(name);
        let idx = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(idx).value)
    }

    /// Iterate `(name, value)` pairs in insertion order, names as last written.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
    }

    /// Owned `(name, value)` pairs in insertion order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    /// Render as `name: value\r\n` lines with lowercased names.
    pub fn to_raw(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}\r\n", e.key, e.value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for HeaderStore {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
