//! Check tier: one render + extraction per feed, fanned out over a bounded
//! pool. Every fault is converted to a [`CheckFailure`] at the task
//! boundary; nothing a single feed does can abort or delay its siblings.

use futures::stream::{self, StreamExt};
use tracing::info;

use mangawatch_core::{CheckFailure, Feed, Watermark};

use crate::episode;
use crate::render::PageRenderer;

/// Concurrent renders. Each one holds a live browser session on the
/// rendering endpoint, so keep this small.
const MAX_CONCURRENT_RENDERS: usize = 4;

pub type CheckResult = Result<Watermark, CheckFailure>;

/// Check every feed concurrently. The returned vec has the same length
/// and order as `feeds`, whatever order the checks completed in.
pub async fn check_feeds<R>(renderer: &R, feeds: &[Feed]) -> Vec<CheckResult>
where
    R: PageRenderer + ?Sized,
{
    info!(feeds = feeds.len(), renderer = renderer.name(), "Starting feed checks");

    let mut indexed: Vec<(usize, CheckResult)> =
        stream::iter(feeds.iter().enumerate().map(|(index, feed)| async move {
            (index, check_one(renderer, feed).await)
        }))
        .buffer_unordered(MAX_CONCURRENT_RENDERS)
        .collect()
        .await;

    // Completion order is unconstrained; the resolver zips by position.
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}

async fn check_one<R>(renderer: &R, feed: &Feed) -> CheckResult
where
    R: PageRenderer + ?Sized,
{
    let page = renderer
        .render(&feed.url)
        .await
        .map_err(|e| CheckFailure::Fetch(e.to_string()))?;

    if let Some(title) = page.title() {
        info!(feed = %feed.name, title = %title, "Page rendered");
    }

    let fragments = page
        .locate(&feed.locator)
        .map_err(|e| CheckFailure::LocatorNotFound(e.to_string()))?;

    if fragments.is_empty() {
        return Err(CheckFailure::NoElementsMatched);
    }

    let latest = episode::parse_latest(&fragments)?;
    info!(feed = %feed.name, latest = %latest, "Latest episode on the web");
    Ok(latest)
}
