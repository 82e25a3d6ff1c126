//! Update tier, second half: one push per advanced feed, fanned out
//! concurrently. A failed send is recorded and logged, never retried and
//! never allowed to block the other sends or the registry commit.

use futures::stream::{self, StreamExt};
use line_notify::PushOutcome;
use tracing::{info, warn};

use mangawatch_core::NotificationTask;

use crate::notify::NotifyBackend;

const MAX_CONCURRENT_SENDS: usize = 4;

/// Per-task send record, kept for observability.
#[derive(Debug)]
pub struct SendReport {
    pub feed_name: String,
    pub result: Result<PushOutcome, String>,
}

/// The outbound message for one advanced feed. Carries all four task
/// fields: name, new value, prior value, URL.
pub fn message_for(task: &NotificationTask) -> String {
    format!(
        "{} newer ep.{} is out! Last read ep.{}. Continue at {}",
        task.feed_name, task.new_watermark, task.prior_watermark, task.url
    )
}

pub async fn dispatch<N>(backend: &N, tasks: &[NotificationTask]) -> Vec<SendReport>
where
    N: NotifyBackend + ?Sized,
{
    stream::iter(tasks.iter().map(|task| async move {
        let report = match backend.send(&message_for(task)).await {
            Ok(outcome) => {
                info!(
                    feed = %task.feed_name,
                    status = outcome.status,
                    body = %outcome.body,
                    "Notification sent"
                );
                SendReport {
                    feed_name: task.feed_name.clone(),
                    result: Ok(outcome),
                }
            }
            Err(e) => {
                warn!(feed = %task.feed_name, error = %e, "Notification send failed");
                SendReport {
                    feed_name: task.feed_name.clone(),
                    result: Err(e.to_string()),
                }
            }
        };
        report
    }))
    .buffer_unordered(MAX_CONCURRENT_SENDS)
    .collect()
    .await
}
