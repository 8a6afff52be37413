use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{LiveError, Result};

/// Query parameter naming the monitored node.
pub const NODE_PARAM: &str = "comonode";

/// Inbound query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(HashMap<String, String>);

impl RequestParams {
    /// Parse a raw (still percent-encoded) query string.
    pub fn parse(query: &str) -> Result<Self> {
        serde_urlencoded::from_str(query)
            .map_err(|e| LiveError::Internal(format!("Malformed query string: {}", e)))
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a parameter, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Return the node identifier, failing when it is missing or empty.
    pub fn require_node(&self) -> Result<&str> {
        self.get_non_empty(NODE_PARAM)
            .ok_or_else(|| LiveError::MissingParameter(NODE_PARAM.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = RequestParams::parse("comonode=n1%3A9&module=ports&stime=100").unwrap();
        assert_eq!(params.get("comonode"), Some("n1:9"));
        assert_eq!(params.get("module"), Some("ports"));
        assert_eq!(params.get("etime"), None);
    }

    #[test]
    fn test_require_node() {
        let params: RequestParams = [("comonode", "host1:1234")].into_iter().collect();
        assert_eq!(params.require_node().unwrap(), "host1:1234");
    }

    #[test]
    fn test_require_node_missing() {
        let params = RequestParams::parse("module=alert").unwrap();
        let err = params.require_node().unwrap_err();
        assert!(matches!(err, LiveError::MissingParameter(ref p) if p == "comonode"));
    }

    #[test]
    fn test_require_node_empty_value() {
        let params = RequestParams::parse("comonode=").unwrap();
        assert!(params.require_node().is_err());
    }

    #[test]
    fn test_parse_empty_query() {
        let params = RequestParams::parse("").unwrap();
        assert_eq!(params, RequestParams::default());
    }
}
