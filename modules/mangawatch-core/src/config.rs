use crate::error::WatchError;

const DEFAULT_BROWSERLESS_URL: &str = "http://localhost:3000";

/// Application configuration loaded from environment variables (with .env
/// support). Only secrets and env-specific values live here; the feed list
/// itself is the CSV registry.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the CSV registry, relative to the working directory.
    pub registry_path: String,

    /// LINE Notify bearer credential.
    pub line_token: String,

    /// Optional release-metadata endpoint for the rendering-engine
    /// version probe.
    pub latest_release_url: Option<String>,

    // Rendering endpoint (Browserless)
    pub browserless_url: String,
    pub browserless_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, WatchError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            registry_path: require("CSV")?,
            line_token: require("LINE_TOKEN")?,
            latest_release_url: std::env::var("LATEST_RELEASE_URL").ok(),
            browserless_url: std::env::var("BROWSERLESS_URL")
                .unwrap_or_else(|_| DEFAULT_BROWSERLESS_URL.to_string()),
            browserless_token: std::env::var("BROWSERLESS_TOKEN").ok(),
        })
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  CSV: {}", self.registry_path);
        tracing::info!("  LINE_TOKEN: {}", preview(&self.line_token));
        tracing::info!(
            "  LATEST_RELEASE_URL: {}",
            self.latest_release_url.as_deref().unwrap_or("<not set>")
        );
        tracing::info!("  BROWSERLESS_URL: {}", self.browserless_url);
        tracing::info!(
            "  BROWSERLESS_TOKEN: {}",
            match &self.browserless_token {
                Some(t) if !t.is_empty() => preview(t),
                _ => "<not set>".to_string(),
            }
        );
    }
}

fn require(key: &str) -> Result<String, WatchError> {
    std::env::var(key).map_err(|_| WatchError::Config(format!("{key} is not set")))
}

/// First few characters of a secret, never the whole value. Counts chars,
/// not bytes; env input may be multi-byte.
fn preview(val: &str) -> String {
    let head: String = val.chars().take(5).collect();
    format!("{}...({} chars)", head, val.chars().count())
}
