use std::collections::BTreeMap;

use crate::config::{NodeSettings, StaticNode};

/// Filter a node applies to a module that does not declare one.
pub const DEFAULT_FILTER: &str = "all";

/// Descriptive metadata a node reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: Option<String>,
    pub location: Option<String>,
    pub interface: Option<String>,
    pub comment: Option<String>,
    /// When the node started capturing.
    pub start_time: Option<i64>,
    /// The node's own clock.
    pub current_time: Option<i64>,
}

/// Resolved configuration of one monitored node.
///
/// Built once per request by a [`NodeCatalog`](super::NodeCatalog) and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    id: String,
    info: NodeInfo,
    filters: BTreeMap<String, String>,
    time_period: i64,
    time_bound: i64,
}

impl NodeConfig {
    /// Create a node configuration.
    pub fn new(
        id: impl Into<String>,
        info: NodeInfo,
        filters: BTreeMap<String, String>,
        settings: &NodeSettings,
    ) -> Self {
        Self {
            id: id.into(),
            info,
            filters,
            time_period: settings.time_period_secs,
            time_bound: settings.time_bound_secs,
        }
    }

    /// Build from a node declared in the configuration file.
    pub fn from_static(node: &StaticNode, settings: &NodeSettings) -> Self {
        let info = NodeInfo {
            name: node.name.clone(),
            location: node.location.clone(),
            interface: node.interface.clone(),
            comment: node.comment.clone(),
            start_time: None,
            current_time: node.current_time,
        };
        Self::new(node.id.clone(), info, node.modules.clone(), settings)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    pub fn time_period(&self) -> i64 {
        self.time_period
    }

    pub fn time_bound(&self) -> i64 {
        self.time_bound
    }

    /// Loaded modules with their filters, ordered by module name.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(m, f)| (m.as_str(), f.as_str()))
    }

    /// Filter of a loaded module, by exact name.
    pub fn filter(&self, module: &str) -> Option<&str> {
        self.filters.get(module).map(String::as_str)
    }

    /// Filter of a module, or the empty string when the node does not run it.
    pub fn filter_or_empty(&self, module: &str) -> &str {
        match self.filter(module) {
            Some(filter) => filter,
            None => {
                tracing::warn!(
                    node = %self.id,
                    module,
                    "Selected module is not loaded on node, using empty filter"
                );
                ""
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_node() -> NodeConfig {
        let filters = BTreeMap::from([
            ("ports".to_string(), "tcp or udp".to_string()),
            ("traffic".to_string(), "all".to_string()),
        ]);
        NodeConfig::new("n1:9", NodeInfo::default(), filters, &NodeSettings::default())
    }

    #[test]
    fn test_filter_lookup_is_exact() {
        let node = sample_node();
        assert_eq!(node.filter("ports"), Some("tcp or udp"));
        assert_eq!(node.filter("Ports"), None);
        assert_eq!(node.filter("port"), None);
    }

    #[test]
    fn test_filter_or_empty_on_miss() {
        let node = sample_node();
        assert_eq!(node.filter_or_empty("traffic"), "all");
        assert_eq!(node.filter_or_empty("topdest"), "");
    }

    #[test]
    fn test_modules_are_ordered() {
        let node = sample_node();
        let names: Vec<_> = node.modules().map(|(m, _)| m).collect();
        assert_eq!(names, vec!["ports", "traffic"]);
    }

    #[test]
    fn test_from_static_carries_settings() {
        let declared = StaticNode {
            id: "n2:44444".to_string(),
            name: Some("edge".to_string()),
            location: None,
            interface: Some("eth0".to_string()),
            comment: None,
            current_time: Some(900),
            modules: BTreeMap::from([("alert".to_string(), "ip".to_string())]),
        };
        let settings = NodeSettings {
            time_period_secs: 600,
            ..NodeSettings::default()
        };

        let node = NodeConfig::from_static(&declared, &settings);
        assert_eq!(node.id(), "n2:44444");
        assert_eq!(node.info().interface.as_deref(), Some("eth0"));
        assert_eq!(node.info().current_time, Some(900));
        assert_eq!(node.time_period(), 600);
        assert_eq!(node.time_bound(), 300);
        assert_eq!(node.filter("alert"), Some("ip"));
    }
}
