use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::Category;

/// Demographic groups keyed by category.
///
/// Used both for a bill's classification and for a user's selection.
/// Values are always sequences: singleton strings are normalized to
/// one-element lists and nulls to empty lists when decoding. Keys that are
/// not a known [`Category`] are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    groups: BTreeMap<Category, Vec<String>>,
}

impl Demographics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixed selections.
    pub fn with<I, S>(mut self, category: Category, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert(&mut self, category: Category, values: Vec<String>) {
        self.groups.insert(category, values);
    }

    /// Values for a category; empty when the category is absent.
    pub fn get(&self, category: Category) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, category: Category) -> bool {
        self.groups.contains_key(&category)
    }

    /// True when no category carries a value.
    pub fn is_blank(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.groups.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Decode from an arbitrary JSON value. Only objects decode.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_map)
    }

    pub fn from_map(map: &serde_json::Map<String, Value>) -> Self {
        let mut groups = BTreeMap::new();
        for (key, raw) in map {
            if let Some(category) = Category::from_key(key) {
                groups.insert(category, normalize_values(raw));
            }
        }
        Self { groups }
    }

    /// Parse a comma-separated query parameter value into a list.
    ///
    /// Items are trimmed and empty items dropped.
    pub fn split_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn normalize_values(raw: &Value) -> Vec<String> {
    match raw {
        Value::Null => Vec::new(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Object(_) => Vec::new(),
    }
}

impl Serialize for Demographics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (category, values) in &self.groups {
            map.serialize_entry(category.key(), values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Demographics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(&map))
    }
}
