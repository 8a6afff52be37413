//! Service runtime: wires the configuration, node catalog and dashboard
//! page into a running gateway.

use std::sync::Arc;

use comolive_core::config::LiveConfig;
use comolive_core::node::NodeCatalog;
use comolive_core::{LiveError, Result};
use comolive_runtime::catalog;
use comolive_runtime::{DashboardPage, GatewayServer};

/// The dashboard service.
pub struct Live {
    config: Arc<LiveConfig>,
    page: DashboardPage,
}

impl Live {
    /// Create a new builder.
    pub fn builder() -> LiveBuilder {
        LiveBuilder::new()
    }

    /// Get the configuration.
    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    /// Get the dashboard page.
    pub fn page(&self) -> &DashboardPage {
        &self.page
    }

    /// Serve the dashboard until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        tracing::info!(project = %self.config.project.name, "Dashboard service starting");

        let server = GatewayServer::new(self.page);
        server
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
                tracing::info!("Received shutdown signal");
            })
            .await?;

        tracing::info!("Dashboard service stopped");
        Ok(())
    }
}

/// Builder for [`Live`].
#[derive(Default)]
pub struct LiveBuilder {
    config: Option<LiveConfig>,
    catalog: Option<Arc<dyn NodeCatalog>>,
}

impl LiveBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn config(mut self, config: LiveConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a specific node catalog instead of the configured one.
    pub fn catalog(mut self, catalog: Arc<dyn NodeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the service.
    pub fn build(self) -> Result<Live> {
        let config = self
            .config
            .ok_or_else(|| LiveError::Config("Configuration is required".into()))?;

        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => catalog::from_config(&config)?,
        };

        let config = Arc::new(config);
        let page = DashboardPage::new(config.clone(), catalog);
        Ok(Live { config, page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comolive_runtime::StaticNodeCatalog;

    #[test]
    fn test_build_requires_config() {
        assert!(Live::builder().build().is_err());
    }

    #[test]
    fn test_build_with_default_config() {
        let live = Live::builder().config(LiveConfig::default()).build().unwrap();
        assert_eq!(live.config().gateway.port, 8080);
    }

    #[tokio::test]
    async fn test_build_with_custom_catalog() {
        let live = Live::builder()
            .config(LiveConfig::default())
            .catalog(Arc::new(StaticNodeCatalog::default()))
            .build()
            .unwrap();

        let params = comolive_core::RequestParams::parse("comonode=x:1").unwrap();
        let outcome = live.page().render("comonode=x:1", &params, 0).await;
        assert!(outcome.html().contains("frame-error"));
    }
}
