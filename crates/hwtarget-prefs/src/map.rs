//! Ordered dotted-key preference map.
//!
//! Keys such as `uno.build.mcu` are stored flat, in insertion order. The
//! hierarchy is recovered on demand: [`KeyPathMap::first_level_split`]
//! partitions entries by their first path segment and
//! [`KeyPathMap::sub_tree`] projects the entries below a prefix.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ParseError;

/// Separator between key path segments.
pub const SEPARATOR: char = '.';

/// An ordered string-keyed map that understands dotted key paths.
#[derive(Debug, Clone, Default)]
pub struct KeyPathMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PartialEq for KeyPathMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for KeyPathMap {}

impl KeyPathMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` lines into a new map.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        map.load(lines)?;
        Ok(map)
    }

    /// Parse `key=value` lines into this map.
    ///
    /// Blank lines and lines starting with `#` are skipped. The first `=`
    /// splits key from value; the key is trimmed, the value is kept verbatim.
    /// A redeclared key takes the new value but keeps its original position.
    pub fn load<I, S>(&mut self, lines: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (number, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line = line.strip_suffix('\r').unwrap_or(line);
            let trimmed = line.trim_start();
            if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ParseError {
                    line: number + 1,
                    content: line.to_string(),
                });
            };
            self.put(key.trim(), value);
        }
        Ok(())
    }

    /// Insert or replace a value. Replacing keeps the key's position.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Merge every entry of `other` into this map; `other` wins on conflicts.
    pub fn put_all(&mut self, other: &KeyPathMap) {
        for (key, value) in other.iter() {
            self.put(key, value);
        }
    }

    /// Look up a value by its full key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Interpret a value as a boolean flag.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Whether any key lives under `id.` (the first-level group exists).
    pub fn has_group(&self, id: &str) -> bool {
        self.keys().any(|key| strip_prefix_segment(key, id).is_some())
    }

    /// Remove a single key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.index.remove(key)?;
        let (_, value) = self.entries.remove(pos);
        self.reindex_from(pos);
        Some(value)
    }

    /// Remove `prefix` and every key below `prefix.`.
    ///
    /// Returns the number of removed entries.
    pub fn remove_subtree(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|(key, _)| key != prefix && strip_prefix_segment(key, prefix).is_none());
        let removed = before - self.entries.len();
        if removed > 0 {
            self.index.clear();
            self.reindex_from(0);
        }
        removed
    }

    /// Entries below `prefix.`, with the prefix stripped.
    ///
    /// Returns an empty map when nothing matches.
    pub fn sub_tree(&self, prefix: &str) -> KeyPathMap {
        let mut sub = KeyPathMap::new();
        for (key, value) in self.iter() {
            if let Some(rest) = strip_prefix_segment(key, prefix) {
                sub.put(rest, value);
            }
        }
        sub
    }

    /// Group entries by their first path segment.
    ///
    /// Each group holds the entries whose key starts with `<group>.`, with
    /// that segment stripped. Keys without a `.` belong to no group and are
    /// left out. Groups appear in order of first occurrence.
    pub fn first_level_split(&self) -> Vec<(String, KeyPathMap)> {
        let mut groups: Vec<(String, KeyPathMap)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (key, value) in self.iter() {
            let Some((group, rest)) = key.split_once(SEPARATOR) else {
                continue;
            };
            let pos = *positions.entry(group).or_insert_with(|| {
                groups.push((group.to_string(), KeyPathMap::new()));
                groups.len() - 1
            });
            groups[pos].1.put(rest, value);
        }
        groups
    }

    /// Only the keys without a `.` separator.
    pub fn top_level_map(&self) -> KeyPathMap {
        let mut top = KeyPathMap::new();
        for (key, value) in self.iter() {
            if !key.contains(SEPARATOR) {
                top.put(key, value);
            }
        }
        top
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, (key, _)) in self.entries.iter().enumerate().skip(start) {
            self.index.insert(key.clone(), pos);
        }
    }
}

/// `key` with `prefix.` removed, if `key` lives below `prefix`.
fn strip_prefix_segment<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_prefix(SEPARATOR)
}

impl fmt::Display for KeyPathMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyPathMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = KeyPathMap::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

impl Serialize for KeyPathMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
