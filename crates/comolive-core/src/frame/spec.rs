use std::fmt;

use super::query::QueryBuilder;
use crate::config::FramesConfig;
use crate::error::{LiveError, Result};
use crate::node::NodeConfig;
use crate::time::TimeWindow;

/// Selected module that makes the alert frame query tuples over the window.
pub const SPECIAL_MODULE: &str = "ports";

/// Number of entries the top-N frames ask for.
pub const TOP_N: u32 = 5;

/// The secondary query frames of the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameModule {
    Alert,
    TopDest,
    TopPorts,
}

impl FrameModule {
    pub const ALL: [FrameModule; 3] = [FrameModule::Alert, FrameModule::TopDest, FrameModule::TopPorts];

    /// Module name understood by the query endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::TopDest => "topdest",
            Self::TopPorts => "topports",
        }
    }

    /// Fixed traffic filter of the top-N frames.
    pub fn fixed_filter(&self) -> Option<&'static str> {
        match self {
            Self::Alert => None,
            Self::TopDest => Some("ip"),
            Self::TopPorts => Some("tcp or udp"),
        }
    }

    fn height(&self) -> Option<u32> {
        match self {
            Self::TopPorts => Some(150),
            _ => None,
        }
    }
}

impl fmt::Display for FrameModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame dimension as written in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Pixels(u32),
    Percent(u32),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Pixels(px) => write!(f, "{}", px),
            Dimension::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// One embedded frame: where it points and how big it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    pub width: Dimension,
    pub height: Option<Dimension>,
    pub src: String,
}

impl FrameSpec {
    /// Build the frame for one of the secondary query modules.
    ///
    /// The forwarded `urlargs=filter=` is the filter of the module selected
    /// on the page, not of `module` itself.
    pub fn query(
        module: FrameModule,
        node: &NodeConfig,
        window: &TimeWindow,
        frames: &FramesConfig,
    ) -> Result<Self> {
        let query = match module {
            FrameModule::Alert => alert_query(node, window, frames)?,
            FrameModule::TopDest | FrameModule::TopPorts => top_query(module, node, window, frames)?,
        };

        Ok(Self {
            width: Dimension::Percent(100),
            height: module.height().map(Dimension::Pixels),
            src: query.to_string(),
        })
    }

    /// The primary visualization frame, forwarding the raw query string.
    pub fn mainstage(raw_query: &str, frames: &FramesConfig) -> Self {
        Self {
            width: Dimension::Pixels(620),
            height: Some(Dimension::Pixels(520)),
            src: format!("{}?{}", frames.mainstage_url, super::attribute_safe(raw_query)),
        }
    }

    /// Frame markup.
    pub fn to_html(&self) -> String {
        let height = self
            .height
            .map(|h| format!(" height={}", h))
            .unwrap_or_default();
        format!(
            "<iframe width={}{} frameborder=0 src=\"{}\"></iframe>\n",
            self.width, height, self.src
        )
    }
}

/// Query for the alert frame.
pub fn alert_query(
    node: &NodeConfig,
    window: &TimeWindow,
    frames: &FramesConfig,
) -> Result<QueryBuilder> {
    let special = window.module == SPECIAL_MODULE;
    let interval = if special { Some(interval(window)?) } else { None };

    let mut query = QueryBuilder::new(&frames.query_url)
        .param("comonode", node.id())
        .param("module", FrameModule::Alert)
        .param("format", "html")
        .param("stime", window.stime)
        .param("etime", window.etime)
        .param("url", &frames.alert_link)
        .urlarg("comonode", node.id())
        .urlarg("module", &window.module);
    if let Some(interval) = interval {
        query = query.urlarg("source", "tuple").urlarg("interval", interval);
    }
    Ok(query.urlarg("filter", node.filter_or_empty(&window.module)))
}

/// Query for the top destinations and top ports frames.
pub fn top_query(
    module: FrameModule,
    node: &NodeConfig,
    window: &TimeWindow,
    frames: &FramesConfig,
) -> Result<QueryBuilder> {
    let filter = module
        .fixed_filter()
        .ok_or_else(|| LiveError::Frame(format!("{} is not a top-N frame", module)))?;
    let interval = interval(window)?;

    Ok(QueryBuilder::new(&frames.query_url)
        .param("comonode", node.id())
        .param("module", module)
        .param("format", "html")
        .param("filter", filter)
        .param("topn", TOP_N)
        .param("source", "tuple")
        .param("interval", interval)
        .param("stime", window.stime)
        .param("etime", window.etime)
        .param("url", &frames.top_link)
        .urlarg("comonode", node.id())
        .urlarg("stime", window.stime)
        .urlarg("etime", window.etime)
        .urlarg("module", &window.module)
        .urlarg("filter", node.filter_or_empty(&window.module)))
}

fn interval(window: &TimeWindow) -> Result<i64> {
    window
        .interval()
        .map_err(|e| LiveError::Frame(format!("cannot compute interval: {}", e)))
}
