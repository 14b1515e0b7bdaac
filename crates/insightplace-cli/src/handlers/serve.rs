//! Serve command handler.

use anyhow::Result;
use insightplace_core::PortalConfig;

/// Run the HTTP API until Ctrl-C.
pub async fn execute(config: &PortalConfig) -> Result<()> {
    tracing::info!(port = config.port, "Starting InsightPlace portal API");
    insightplace_axum::start_server(config).await
}
