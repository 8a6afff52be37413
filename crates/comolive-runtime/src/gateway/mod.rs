mod server;
mod tracing;

pub use server::{GatewayServer, HealthResponse};
pub use tracing::{REQUEST_ID_HEADER, TRACE_ID_HEADER};
