use std::sync::Arc;

use comolive_core::config::LiveConfig;
use comolive_core::node::NodeCatalog;
use comolive_core::{FrameModule, FrameSpec, LiveError, NodeConfig, RequestParams, TimeWindow};

use super::furniture::{escape_html, PageFrame, RenderContext};
use super::sysinfo;

/// Text shown when the node parameter is missing.
pub const MISSING_NODE_MESSAGE: &str = "This file requires the comonode=host:port arg passed to it";

/// How a dashboard render ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardOutcome {
    /// The node parameter was missing; the page holds only the apology.
    AbortedMissingParam(String),
    /// The full page was assembled.
    Rendered(String),
}

impl DashboardOutcome {
    pub fn html(&self) -> &str {
        match self {
            Self::AbortedMissingParam(html) | Self::Rendered(html) => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            Self::AbortedMissingParam(html) | Self::Rendered(html) => html,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// The per-node dashboard page.
#[derive(Clone)]
pub struct DashboardPage {
    config: Arc<LiveConfig>,
    catalog: Arc<dyn NodeCatalog>,
    frame: PageFrame,
}

impl DashboardPage {
    pub fn new(config: Arc<LiveConfig>, catalog: Arc<dyn NodeCatalog>) -> Self {
        let frame = PageFrame::new(config.project.title.clone());
        Self {
            config,
            catalog,
            frame,
        }
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    /// Render the dashboard.
    ///
    /// `raw_query` is forwarded untouched to the main visualization frame;
    /// `now` is the wall clock used when neither the request nor the node
    /// provide a time reference.
    pub async fn render(&self, raw_query: &str, params: &RequestParams, now: i64) -> DashboardOutcome {
        let mut ctx = RenderContext::new();
        let mut html = self.frame.header(&mut ctx);

        let node_id = match params.require_node() {
            Ok(node_id) => node_id,
            Err(e) => {
                tracing::debug!("Dashboard request rejected: {}", e);
                html.push_str(&apology());
                html.push_str(&self.frame.footer(&mut ctx));
                return DashboardOutcome::AbortedMissingParam(html);
            }
        };

        let node = self.resolve_node(node_id).await;

        html.push_str("<table class=\"fence\">\n  <tr>\n    <td class=\"leftcontent\">\n");
        html.push_str(&sysinfo::render_panel(node_id, node.as_ref().ok()));
        html.push_str(&FrameSpec::mainstage(raw_query, &self.config.frames).to_html());
        html.push_str("    </td>\n    <td class=\"rightcontent\">\n");
        html.push_str(&self.right_pane(node, params, now));
        html.push_str("    </td>\n  </tr>\n</table>\n");

        html.push_str(&self.frame.footer(&mut ctx));
        DashboardOutcome::Rendered(html)
    }

    /// Render the node information panel on its own page.
    pub async fn render_sysinfo(&self, params: &RequestParams) -> DashboardOutcome {
        let mut ctx = RenderContext::without_banner();
        let mut html = self.frame.header(&mut ctx);

        let Ok(node_id) = params.require_node() else {
            html.push_str(&apology());
            html.push_str(&self.frame.footer(&mut ctx));
            return DashboardOutcome::AbortedMissingParam(html);
        };

        let node = self.resolve_node(node_id).await;
        html.push_str(&sysinfo::render_panel(node_id, node.as_ref().ok()));
        html.push_str(&self.frame.footer(&mut ctx));
        DashboardOutcome::Rendered(html)
    }

    async fn resolve_node(&self, node_id: &str) -> Result<NodeConfig, LiveError> {
        let node = self.catalog.resolve(node_id, &self.config.node).await;
        if let Err(e) = &node {
            log_failure(node_id, "node", e);
        }
        node
    }

    fn right_pane(
        &self,
        node: Result<NodeConfig, LiveError>,
        params: &RequestParams,
        now: i64,
    ) -> String {
        let node = match node {
            Ok(node) => node,
            Err(e) => return error_panel("node", &e),
        };

        let window = match TimeWindow::resolve(params, &node, &self.config.node.default_module, now)
        {
            Ok(window) => window,
            Err(e) => {
                log_failure(node.id(), "time range", &e);
                return error_panel("time range", &e);
            }
        };

        let mut html = String::new();
        for module in FrameModule::ALL {
            match FrameSpec::query(module, &node, &window, &self.config.frames) {
                Ok(frame) => html.push_str(&frame.to_html()),
                Err(e) => {
                    log_failure(node.id(), module.as_str(), &e);
                    html.push_str(&error_panel(module.as_str(), &e));
                }
            }
        }

        tracing::info!(
            node = node.id(),
            module = %window.module,
            stime = window.stime,
            etime = window.etime,
            "Rendered dashboard"
        );
        html
    }
}

fn apology() -> String {
    format!(
        "{}<br>\nThanks for playing!<br><br><br><br><br><br><br>\n",
        MISSING_NODE_MESSAGE
    )
}

fn log_failure(node: &str, what: &str, err: &LiveError) {
    if err.is_collaborator_failure() {
        tracing::warn!(node, what, "Dashboard section unavailable: {}", err);
    } else {
        tracing::error!(node, what, "Failed to build dashboard section: {}", err);
    }
}

fn error_panel(what: &str, err: &LiveError) -> String {
    format!(
        "<div class=\"frame-error\">Unable to load {}: {}</div>\n",
        escape_html(what),
        escape_html(&err.to_string())
    )
}
