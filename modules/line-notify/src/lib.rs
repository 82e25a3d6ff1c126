pub mod error;

pub use error::{LineNotifyError, Result};

use std::time::Duration;

use tracing::debug;

const NOTIFY_ENDPOINT: &str = "https://notify-api.line.me/api/notify";

/// What the API said about one push. Recorded verbatim; callers decide
/// whether a non-2xx status matters.
#[derive(Debug, Clone)]
pub struct PushOutcome {
    pub status: u16,
    pub body: String,
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// LINE Notify push client.
#[derive(Debug, Clone)]
pub struct LineNotifier {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl LineNotifier {
    pub fn new(token: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: NOTIFY_ENDPOINT.to_string(),
            token: token.to_string(),
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Push one message. Errors only on transport failure; any HTTP status
    /// is returned as a normal [`PushOutcome`].
    pub async fn push(&self, message: &str) -> Result<PushOutcome> {
        debug!(endpoint = %self.endpoint, "Sending LINE notification");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .form(&[("message", message)])
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        Ok(PushOutcome { status, body })
    }
}
