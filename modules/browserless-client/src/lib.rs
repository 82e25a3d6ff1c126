pub mod error;
pub mod page;

pub use error::{BrowserlessError, Result};
pub use page::RenderedPage;

use std::time::Duration;

use tracing::{debug, warn};

/// Hard upper bound on a single render. A hung page load must not be able
/// to hang the whole run.
const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Default settle budget applied after navigation, before the page is
/// considered rendered. Client-side rendered sites need this.
pub const DEFAULT_RENDER_WAIT: Duration = Duration::from_secs(3);

/// Configuration for a Browserless /content endpoint.
///
/// The client itself holds no connection; call [`BrowserlessClient::open_session`]
/// to get a [`RenderSession`] for actual rendering. Sessions are not
/// reentrant — each concurrent task must open its own.
#[derive(Debug, Clone)]
pub struct BrowserlessClient {
    base_url: String,
    token: Option<String>,
    render_wait: Duration,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            render_wait: DEFAULT_RENDER_WAIT,
        }
    }

    pub fn with_render_wait(mut self, render_wait: Duration) -> Self {
        self.render_wait = render_wait;
        self
    }

    /// Open an independent rendering session with its own HTTP client.
    pub fn open_session(&self) -> RenderSession {
        let http = reqwest::Client::builder()
            .timeout(RENDER_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }

        RenderSession {
            http,
            endpoint,
            render_wait: self.render_wait,
        }
    }
}

/// One rendering session. Owns its HTTP client; dropped when the task that
/// opened it finishes, on every exit path.
pub struct RenderSession {
    http: reqwest::Client,
    endpoint: String,
    render_wait: Duration,
}

impl RenderSession {
    /// Fetch fully-rendered HTML for a URL via the Browserless /content
    /// endpoint, letting the page settle for the configured wait budget.
    pub async fn render(&self, url: &str) -> Result<RenderedPage> {
        let body = serde_json::json!({
            "url": url,
            "gotoOptions": { "waitUntil": "networkidle2" },
            "waitForTimeout": self.render_wait.as_millis() as u64,
        });

        debug!(url, wait_ms = self.render_wait.as_millis() as u64, "Requesting page render");

        let resp = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BrowserlessError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(RenderedPage::new(resp.text().await?))
    }
}

/// Resolve the current stable rendering-engine version from a release
/// metadata endpoint (JSON shape: `channels.Stable.version`). Best effort;
/// a miss is logged and reported as `None`.
pub async fn latest_stable_version(release_url: &str) -> Option<String> {
    let resp = match reqwest::get(release_url).await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(release_url, error = %e, "Version probe request failed");
            return None;
        }
    };

    if !resp.status().is_success() {
        warn!(release_url, status = %resp.status(), "Version probe returned non-success");
        return None;
    }

    let json: serde_json::Value = match resp.json().await {
        Ok(json) => json,
        Err(e) => {
            warn!(release_url, error = %e, "Version probe returned invalid JSON");
            return None;
        }
    };

    stable_version_from(&json)
}

/// Pull `channels.Stable.version` out of a release-metadata document.
/// Any shape mismatch is `None`.
fn stable_version_from(json: &serde_json::Value) -> Option<String> {
    json.pointer("/channels/Stable/version")
        .and_then(|v| v.as_str())
        .map(String::from)
}
