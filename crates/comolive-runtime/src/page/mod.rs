mod dashboard;
mod furniture;
mod sysinfo;

pub use dashboard::{DashboardOutcome, DashboardPage, MISSING_NODE_MESSAGE};
pub use furniture::{escape_html, PageFrame, RenderContext};
pub use sysinfo::render_panel;
