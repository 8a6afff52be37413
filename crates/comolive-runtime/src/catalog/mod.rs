mod declared;
mod http;

pub use declared::StaticNodeCatalog;
pub use http::{parse_status, HttpNodeCatalog};

use std::sync::Arc;

use comolive_core::config::{CatalogKind, LiveConfig};
use comolive_core::node::NodeCatalog;
use comolive_core::Result;

/// Build the node catalog selected by the configuration.
pub fn from_config(config: &LiveConfig) -> Result<Arc<dyn NodeCatalog>> {
    let catalog: Arc<dyn NodeCatalog> = match config.catalog.kind {
        CatalogKind::Http => Arc::new(HttpNodeCatalog::new(config.node.status_timeout())?),
        CatalogKind::Static => {
            let catalog = StaticNodeCatalog::new(config.catalog.nodes.clone());
            tracing::info!(nodes = catalog.len(), "Loaded declared nodes");
            Arc::new(catalog)
        }
    };
    tracing::debug!(kind = ?config.catalog.kind, "Node catalog ready");
    Ok(catalog)
}
