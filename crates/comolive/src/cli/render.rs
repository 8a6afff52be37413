use anyhow::Result;
use clap::Parser;
use comolive_core::RequestParams;

use super::{init_tracing, load_config};
use crate::runtime::Live;

/// Render the dashboard for a query string and print the HTML.
#[derive(Parser)]
pub struct RenderCommand {
    /// Raw query string, e.g. `comonode=host:port&module=ports`.
    pub query: String,

    /// Configuration file path.
    #[arg(short, long, default_value = "comolive.toml")]
    pub config: String,

    /// Reference time for default windows (defaults to now).
    #[arg(long)]
    pub now: Option<i64>,
}

impl RenderCommand {
    /// Execute the render command.
    pub async fn execute(self) -> Result<()> {
        let config = load_config(&self.config)?;
        init_tracing(&config.observability.logging, false);

        let live = Live::builder().config(config).build()?;
        let query = self.query.trim_start_matches('?');
        let params = RequestParams::parse(query)?;
        let now = self.now.unwrap_or_else(|| chrono::Utc::now().timestamp());

        let outcome = live.page().render(query, &params, now).await;
        let rendered = outcome.is_rendered();
        print!("{}", outcome.into_html());

        if !rendered {
            anyhow::bail!("the query string has no comonode parameter");
        }
        Ok(())
    }
}
