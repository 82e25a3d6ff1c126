//! The rendering seam. The pipeline only ever sees [`PageRenderer`];
//! production wires in Browserless, tests substitute fakes.

use anyhow::Result;
use async_trait::async_trait;

use browserless_client::{BrowserlessClient, RenderedPage};

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render one URL to a page. Implementations must be safe to call
    /// concurrently; any per-call rendering resources belong to the call,
    /// not the renderer.
    async fn render(&self, url: &str) -> Result<RenderedPage>;

    fn name(&self) -> &str;
}

/// Browserless-backed renderer. Each render opens its own session;
/// sessions are not reentrant across concurrent tasks.
pub struct BrowserlessRenderer {
    client: BrowserlessClient,
}

impl BrowserlessRenderer {
    pub fn new(client: BrowserlessClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageRenderer for BrowserlessRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        let session = self.client.open_session();
        Ok(session.render(url).await?)
    }

    fn name(&self) -> &str {
        "browserless"
    }
}
