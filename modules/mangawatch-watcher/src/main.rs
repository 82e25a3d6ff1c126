use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use browserless_client::BrowserlessClient;
use line_notify::LineNotifier;
use mangawatch_core::AppConfig;
use mangawatch_watcher::pipeline;
use mangawatch_watcher::render::BrowserlessRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("mangawatch_watcher=info".parse()?),
        )
        .init();

    info!("Mangawatch starting...");

    // Load config; a missing required key aborts before any extraction
    let config = AppConfig::from_env()?;
    config.log_redacted();

    // Rendering-engine version probe (best effort, informational)
    if let Some(url) = &config.latest_release_url {
        match browserless_client::latest_stable_version(url).await {
            Some(version) => info!(version = %version, "Rendering engine stable channel"),
            None => warn!("Could not resolve rendering engine version"),
        }
    }

    let client = BrowserlessClient::new(
        &config.browserless_url,
        config.browserless_token.as_deref(),
    );
    let renderer = BrowserlessRenderer::new(client);
    let notifier = LineNotifier::new(&config.line_token);

    let summary = pipeline::run(Path::new(&config.registry_path), &renderer, &notifier).await?;

    info!(
        checked = summary.feeds_checked,
        failed = summary.feeds_failed,
        advanced = summary.feeds_advanced,
        notified = summary.notifications_sent,
        written = summary.registry_written,
        "Run complete"
    );

    Ok(())
}
