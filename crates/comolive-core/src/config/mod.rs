mod catalog;
mod observability;

pub use catalog::{CatalogConfig, CatalogKind, StaticNode};
pub use observability::{LoggingConfig, ObservabilityConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{LiveError, Result};

/// Root configuration for the dashboard service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Gateway configuration.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Node query defaults.
    #[serde(default)]
    pub node: NodeSettings,

    /// Node catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Embedded frame endpoints.
    #[serde(default)]
    pub frames: FramesConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl LiveConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LiveError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);
        let config: LiveConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| LiveError::Config(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.node.time_bound_secs <= 0 {
            return Err(LiveError::Config(
                "node.time_bound_secs must be greater than zero".into(),
            ));
        }
        if self.node.time_period_secs <= 0 {
            return Err(LiveError::Config(
                "node.time_period_secs must be greater than zero".into(),
            ));
        }
        if self.node.default_module.is_empty() {
            return Err(LiveError::Config("node.default_module is empty".into()));
        }
        if self.catalog.kind == CatalogKind::Static && self.catalog.nodes.is_empty() {
            tracing::warn!("Static catalog configured without any nodes");
        }
        Ok(())
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Title shown in the page banner.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            title: default_title(),
        }
    }
}

fn default_project_name() -> String {
    "comolive".to_string()
}

fn default_title() -> String {
    "CoMo Live!".to_string()
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port.
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Defaults applied when resolving a node and its time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSettings {
    /// Default window length in seconds.
    #[serde(default = "default_time_period")]
    pub time_period_secs: i64,

    /// Granularity the default end time is aligned to, in seconds.
    #[serde(default = "default_time_bound")]
    pub time_bound_secs: i64,

    /// Module selected when the request does not name one.
    #[serde(default = "default_module")]
    pub default_module: String,

    /// Timeout for the node status query in seconds.
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
}

impl NodeSettings {
    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            time_period_secs: default_time_period(),
            time_bound_secs: default_time_bound(),
            default_module: default_module(),
            status_timeout_secs: default_status_timeout(),
        }
    }
}

fn default_time_period() -> i64 {
    3600 // 1 hour
}

fn default_time_bound() -> i64 {
    300 // 5 minutes
}

fn default_module() -> String {
    "traffic".to_string()
}

fn default_status_timeout() -> u64 {
    5
}

/// Endpoints the dashboard frames point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramesConfig {
    /// Primary visualization page.
    #[serde(default = "default_mainstage_url")]
    pub mainstage_url: String,

    /// Generic query rendering endpoint.
    #[serde(default = "default_query_url")]
    pub query_url: String,

    /// Page the alert frame links back to.
    #[serde(default = "default_alert_link")]
    pub alert_link: String,

    /// Page the top-N frames link back to.
    #[serde(default = "default_top_link")]
    pub top_link: String,
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            mainstage_url: default_mainstage_url(),
            query_url: default_query_url(),
            alert_link: default_alert_link(),
            top_link: default_top_link(),
        }
    }
}

fn default_mainstage_url() -> String {
    "mainstage.php".to_string()
}

fn default_query_url() -> String {
    "generic_query.php".to_string()
}

fn default_alert_link() -> String {
    "dashboard.php".to_string()
}

fn default_top_link() -> String {
    "broadcast.php".to_string()
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
        return result;
    };

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
