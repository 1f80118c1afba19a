//! Attribute storage
//!
//! Ordered name → value storage backing every entity instance. Result rows
//! use the same shape.

use serde::ser::{Serialize, SerializeMap, Serializer};
use type_mapping::FieldValue;

/// Ordered, mutable mapping from field name to value.
///
/// Iteration follows first insertion; overwriting a field keeps its position.
/// Lookups are linear, which is fine for row-sized maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    entries: Vec<(String, FieldValue)>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value, or overwrite the existing one in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// `None` means the field was never set. A stored `FieldValue::Null` is a value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &FieldValue),
    {
        for (name, value) in &self.entries {
            f(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeStore
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = AttributeStore::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}

impl Serialize for AttributeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_absent_not_default() {
        let mut store = AttributeStore::new();
        assert_eq!(store.get("name"), None);
        assert!(!store.has("name"));

        store.set("name", FieldValue::Null);
        assert_eq!(store.get("name"), Some(&FieldValue::Null));
        assert!(store.has("name"));
    }

    #[test]
    fn test_overwrite_keeps_insertion_order() {
        let mut store = AttributeStore::new();
        store.set("id", 1);
        store.set("name", "A");
        store.set("id", 2);

        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(store.get("id"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_values_keep_their_type() {
        let mut store = AttributeStore::new();
        store.set("age", "42");
        assert_eq!(store.get("age"), Some(&FieldValue::Text("42".to_string())));
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let store: AttributeStore = vec![("b", 2), ("a", 1)].into_iter().collect();
        let mut seen = Vec::new();
        store.for_each(|name, value| seen.push(format!("{}={}", name, value)));
        assert_eq!(seen, vec!["b=2", "a=1"]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let store: AttributeStore = vec![("name", "A"), ("email", "a@x.com")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"name":"A","email":"a@x.com"}"#);
    }
}
