//! Path parameters captured during one resolution.

use std::collections::HashMap;

use serde::Serialize;

/// Mapping from parameter name to the captured segment text.
///
/// Allocated fresh for every resolution and owned by the caller, so
/// concurrent lookups never share one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_lookup() {
        let params: Params = [("id", "42"), ("name", "hello")].into_iter().collect();

        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("name"), Some("hello"));
        assert_eq!(params.get("missing"), None);
        assert!(params.contains("id"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_params_serialize_as_map() {
        let params: Params = [("id", "7")].into_iter().collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "7" }));
    }
}
