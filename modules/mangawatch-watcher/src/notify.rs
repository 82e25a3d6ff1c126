//! The notification seam.

use anyhow::Result;
use async_trait::async_trait;

use line_notify::{LineNotifier, PushOutcome};

#[async_trait]
pub trait NotifyBackend: Send + Sync {
    /// Send one message. `Err` means the transport failed; an unhappy
    /// HTTP status is still `Ok` and only recorded.
    async fn send(&self, message: &str) -> Result<PushOutcome>;
}

#[async_trait]
impl NotifyBackend for LineNotifier {
    async fn send(&self, message: &str) -> Result<PushOutcome> {
        Ok(self.push(message).await?)
    }
}
