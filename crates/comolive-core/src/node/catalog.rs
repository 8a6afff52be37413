use std::future::Future;
use std::pin::Pin;

use super::NodeConfig;
use crate::config::NodeSettings;
use crate::error::Result;

/// Boxed future returned by [`NodeCatalog::resolve`].
pub type NodeFuture<'a> = Pin<Box<dyn Future<Output = Result<NodeConfig>> + Send + 'a>>;

/// Resolves a node identifier into its loaded modules and filters.
///
/// Fails with [`LiveError::NodeUnavailable`](crate::LiveError::NodeUnavailable)
/// when the node is unknown or cannot be reached.
pub trait NodeCatalog: Send + Sync {
    fn resolve<'a>(&'a self, node: &'a str, settings: &'a NodeSettings) -> NodeFuture<'a>;
}
