use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Story data keyed by entry name.
///
/// Values are kept as raw JSON; only the top-level keys take part in hydration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoriesState(BTreeMap<String, Value>);

impl StoriesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Layer `other` on top of `self`: keys in `other` win, keys only in `self` survive.
    pub fn overlay(&mut self, other: StoriesState) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for StoriesState {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<BTreeMap<String, Value>> for StoriesState {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}
