pub mod config;
pub mod error;
pub mod frame;
pub mod node;
pub mod request;
pub mod time;

pub use config::LiveConfig;
pub use error::{LiveError, Result};
pub use frame::{FrameModule, FrameSpec, QueryBuilder};
pub use node::{NodeCatalog, NodeConfig, NodeInfo};
pub use request::RequestParams;
pub use time::TimeWindow;
