use std::collections::BTreeMap;
use std::time::Duration;

use comolive_core::config::NodeSettings;
use comolive_core::node::{NodeCatalog, NodeConfig, NodeFuture, NodeInfo, DEFAULT_FILTER};
use comolive_core::{LiveError, Result};

/// Catalog that asks the live node for its status.
///
/// The node answers `GET /?status` with `Key: value` lines. Each loaded
/// module is reported as `Module: <name>` optionally followed by a tab and
/// `Filter: <expression>`.
#[derive(Debug, Clone)]
pub struct HttpNodeCatalog {
    client: reqwest::Client,
}

impl HttpNodeCatalog {
    /// Create a catalog whose status queries give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LiveError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn fetch_status(&self, node: &str) -> Result<String> {
        if node.is_empty() || node.contains(&['/', '?', '#', '@', ' '][..]) {
            return Err(LiveError::node_unavailable(node, "not a host:port address"));
        }
        let url = format!("http://{}/?status", node);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LiveError::node_unavailable(node, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LiveError::node_unavailable(
                node,
                format!("status query returned {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| LiveError::node_unavailable(node, e.to_string()))
    }
}

impl NodeCatalog for HttpNodeCatalog {
    fn resolve<'a>(&'a self, node: &'a str, settings: &'a NodeSettings) -> NodeFuture<'a> {
        Box::pin(async move {
            let body = self.fetch_status(node).await?;
            let (info, filters) = parse_status(node, &body)?;
            tracing::debug!(node, modules = filters.len(), "Resolved node status");
            Ok(NodeConfig::new(node, info, filters, settings))
        })
    }
}

/// Parse a node status reply into metadata and module filters.
pub fn parse_status(node: &str, body: &str) -> Result<(NodeInfo, BTreeMap<String, String>)> {
    let mut info = NodeInfo::default();
    let mut filters = BTreeMap::new();
    let mut recognized = false;

    for line in body.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "name" => info.name = Some(value.to_string()),
            "location" => info.location = Some(value.to_string()),
            "interface" => info.interface = Some(value.to_string()),
            "comment" => info.comment = Some(value.to_string()),
            "start" => info.start_time = Some(parse_epoch(node, "Start", value)?),
            "current" => info.current_time = Some(parse_epoch(node, "Current", value)?),
            "module" => {
                let (name, filter) = parse_module(value);
                if name.is_empty() {
                    return Err(LiveError::node_unavailable(node, "module line without a name"));
                }
                filters.insert(name.to_string(), filter.to_string());
            }
            _ => continue,
        }
        recognized = true;
    }

    if !recognized {
        return Err(LiveError::node_unavailable(node, "malformed status reply"));
    }
    Ok((info, filters))
}

fn parse_module(value: &str) -> (&str, &str) {
    match value.split_once("Filter:") {
        Some((name, filter)) => {
            let filter = filter.trim();
            let filter = if filter.is_empty() { DEFAULT_FILTER } else { filter };
            (name.trim(), filter)
        }
        None => (value.trim(), DEFAULT_FILTER),
    }
}

fn parse_epoch(node: &str, field: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| LiveError::node_unavailable(node, format!("bad {} time {:?}", field, value)))
}
