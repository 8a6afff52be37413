mod catalog;
mod config;

pub use catalog::{NodeCatalog, NodeFuture};
pub use config::{NodeConfig, NodeInfo, DEFAULT_FILTER};
