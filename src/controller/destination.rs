use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named URL parameters. Keys are unique and their order carries no meaning.
pub type Parameters = BTreeMap<String, String>;

/// Where a redirect should lead: a parameter mapping handed to the URL
/// builder, or a single URI string (internal URI, path or absolute URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    Params(Parameters),
    Uri(String),
}

impl Destination {
    pub fn uri(uri: impl Into<String>) -> Self {
        Destination::Uri(uri.into())
    }

    pub fn params<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Destination::Params(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Destination::Params(params) => params.is_empty(),
            Destination::Uri(uri) => uri.is_empty(),
        }
    }
}

impl From<&str> for Destination {
    fn from(uri: &str) -> Self {
        Destination::Uri(uri.to_string())
    }
}

impl From<String> for Destination {
    fn from(uri: String) -> Self {
        Destination::Uri(uri)
    }
}

impl From<Parameters> for Destination {
    fn from(params: Parameters) -> Self {
        Destination::Params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_destinations() {
        assert!(Destination::uri("").is_empty());
        assert!(Destination::Params(Parameters::new()).is_empty());
        assert!(!Destination::uri("item/show").is_empty());
    }

    #[test]
    fn params_stringify_values() {
        let dest = Destination::params([("action", "show".to_string()), ("id", 42.to_string())]);

        match dest {
            Destination::Params(params) => {
                assert_eq!(params.get("id").map(String::as_str), Some("42"));
                assert_eq!(params.get("action").map(String::as_str), Some("show"));
            }
            Destination::Uri(_) => panic!("expected parameters"),
        }
    }

    #[test]
    fn deserializes_either_shape() {
        let params: Destination = serde_json::from_str(r#"{"module":"item","action":"show"}"#).unwrap();
        assert_eq!(params, Destination::params([("module", "item"), ("action", "show")]));

        let uri: Destination = serde_json::from_str(r#""@homepage""#).unwrap();
        assert_eq!(uri, Destination::uri("@homepage"));
    }
}
