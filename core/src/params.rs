//! Request parameters and their two wire encodings.
//!
//! `Parameters` keeps insertion order, so the query string and the JSON body
//! list keys in the order the caller added them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BuildError;

/// Ordered key-value parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any previous value for `key` in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Parameters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        let mut params = Parameters::new();
        for (k, v) in pairs {
            params.insert(k, v);
        }
        params
    }
}

/// Render parameters as URL query items.
///
/// Strings are used as-is, `null` becomes an empty value, and everything else
/// uses its JSON text (`5`, `true`, `[1,2]`).
pub fn to_query_items(params: &Parameters) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), stringify(v)))
        .collect()
}

/// Render parameters as a JSON object body.
pub fn to_json_body(params: &Parameters) -> Result<String, BuildError> {
    serde_json::to_string(params).map_err(|e| BuildError::Serialization(e.to_string()))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn listing() -> Parameters {
        Parameters::new()
            .with("page", 1)
            .with("per_page", 5)
            .with("strategy", "relevant")
    }

    #[test]
    fn query_items_keep_insertion_order() {
        let items = to_query_items(&listing());
        assert_eq!(
            items,
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "5".to_string()),
                ("strategy".to_string(), "relevant".to_string()),
            ]
        );
    }

    #[test]
    fn query_items_stringify_scalars() {
        let params = Parameters::from([
            ("flag", Value::Bool(true)),
            ("none", Value::Null),
            ("ratio", serde_json::json!(0.5)),
        ]);
        let items = to_query_items(&params);
        assert_eq!(items[0].1, "true");
        assert_eq!(items[1].1, "");
        assert_eq!(items[2].1, "0.5");
    }

    #[test]
    fn query_round_trip_through_url() {
        let params = Parameters::new()
            .with("q", "rust & go")
            .with("page", 2)
            .with("tag", "ação");
        let mut url = Url::parse("https://example.com/contents").unwrap();
        url.query_pairs_mut().extend_pairs(to_query_items(&params));

        let mut parsed: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let mut expected = to_query_items(&params);
        parsed.sort();
        expected.sort();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn json_body_is_an_object() {
        let body = to_json_body(&listing()).unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["page"], 1);
        assert_eq!(value["per_page"], 5);
        assert_eq!(value["strategy"], "relevant");
    }

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(to_json_body(&Parameters::new()).unwrap(), "{}");
    }

    #[test]
    fn insert_replaces_existing_key() {
        let params = Parameters::new().with("page", 1).with("page", 3);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page"), Some(&Value::from(3)));
    }
}
