pub mod assets;
pub mod catalog;
pub mod gateway;
pub mod page;

pub use catalog::{HttpNodeCatalog, StaticNodeCatalog};
pub use gateway::GatewayServer;
pub use page::{DashboardOutcome, DashboardPage};
