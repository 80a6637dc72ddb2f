//! Value objects making up a canvas: ordered sections and their fields.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered mapping of named entries.
///
/// Order is the order the model wrote the entries in; it is never sorted,
/// since loop and flow ordering can carry meaning. Keys are unique: the
/// first entry for a key wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<V> {
    entries: Vec<(String, V)>,
}

impl<V> Section<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Insert unless the key is already present. Returns whether it was inserted.
    pub(crate) fn insert_first(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }
}

impl<V> Default for Section<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Section<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (key, value) in iter {
            section.insert_first(key, value);
        }
        section
    }
}

impl<V: Serialize> Serialize for Section<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One entry of a stocks or flows section.
///
/// Models describe a category either as a sentence, a list, or (for things
/// like `operations.bottleneck`) a nested group of named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Text(String),
    List(Vec<String>),
    Group(Section<Field>),
}

impl Field {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Section<Field>> {
        match self {
            Field::Group(group) => Some(group),
            _ => None,
        }
    }

    /// True for an empty string, list or group.
    pub fn is_empty(&self) -> bool {
        match self {
            Field::Text(text) => text.is_empty(),
            Field::List(items) => items.is_empty(),
            Field::Group(group) => group.is_empty(),
        }
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Field::Text(text.to_string())
    }
}
