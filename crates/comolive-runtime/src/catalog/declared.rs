use std::collections::HashMap;

use comolive_core::config::{NodeSettings, StaticNode};
use comolive_core::node::{NodeCatalog, NodeConfig, NodeFuture};
use comolive_core::LiveError;

/// Catalog of nodes declared in the configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticNodeCatalog {
    nodes: HashMap<String, StaticNode>,
}

impl StaticNodeCatalog {
    pub fn new(nodes: impl IntoIterator<Item = StaticNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl NodeCatalog for StaticNodeCatalog {
    fn resolve<'a>(&'a self, node: &'a str, settings: &'a NodeSettings) -> NodeFuture<'a> {
        Box::pin(async move {
            self.nodes
                .get(node)
                .map(|declared| NodeConfig::from_static(declared, settings))
                .ok_or_else(|| LiveError::node_unavailable(node, "not in catalog"))
        })
    }
}
