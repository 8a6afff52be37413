use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where node descriptions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Query the live node over HTTP.
    #[default]
    Http,
    /// Use the nodes declared in the configuration file.
    Static,
}

/// Node catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog backend.
    #[serde(default)]
    pub kind: CatalogKind,

    /// Nodes known to the static catalog.
    #[serde(default)]
    pub nodes: Vec<StaticNode>,
}

/// A node declared in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticNode {
    /// Node identifier (`host:port`).
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub interface: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    /// Node clock, used as the reference for default time windows.
    #[serde(default)]
    pub current_time: Option<i64>,

    /// Loaded modules and their filters.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_kind() {
        let config: CatalogConfig = toml::from_str(r#"kind = "static""#).unwrap();
        assert_eq!(config.kind, CatalogKind::Static);
        assert!(config.nodes.is_empty());
    }

    #[test]
    fn test_parse_static_node() {
        let toml = r#"
            [[nodes]]
            id = "sniffer.example.net:44444"
            location = "rack 4"
            current_time = 1200

            [nodes.modules]
            alert = "all"
            topdest = "ip"
        "#;

        let config: CatalogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.kind, CatalogKind::Http);
        let node = &config.nodes[0];
        assert_eq!(node.id, "sniffer.example.net:44444");
        assert_eq!(node.location.as_deref(), Some("rack 4"));
        assert_eq!(node.current_time, Some(1200));
        assert_eq!(node.modules.len(), 2);
        assert!(node.name.is_none());
    }
}
