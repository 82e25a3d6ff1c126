//! One full run: load → check → resolve → notify → commit.
//!
//! The two concurrent tiers (checks, sends) run sequentially relative to
//! each other; the resolver sits between them on the run thread. The
//! registry is committed at most once, and only when a feed advanced —
//! a run with nothing new leaves the file byte-identical.

use std::path::Path;

use tracing::info;

use mangawatch_core::WatchError;

use crate::dispatcher;
use crate::notify::NotifyBackend;
use crate::orchestrator;
use crate::registry::Registry;
use crate::render::PageRenderer;
use crate::resolver;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub feeds_checked: usize,
    pub feeds_failed: usize,
    pub feeds_advanced: usize,
    pub notifications_sent: usize,
    pub registry_written: bool,
}

pub async fn run<R, N>(
    registry_path: &Path,
    renderer: &R,
    notifier: &N,
) -> Result<RunSummary, WatchError>
where
    R: PageRenderer + ?Sized,
    N: NotifyBackend + ?Sized,
{
    let registry = Registry::load(registry_path)?;
    let feeds = registry.feeds()?;

    if feeds.is_empty() {
        info!("Registry has no feeds, nothing to check");
        return Ok(RunSummary::default());
    }

    let results = orchestrator::check_feeds(renderer, &feeds).await;
    let failed = results.iter().filter(|r| r.is_err()).count();

    let resolution = resolver::resolve(&registry, &feeds, &results);

    let mut summary = RunSummary {
        feeds_checked: feeds.len(),
        feeds_failed: failed,
        feeds_advanced: resolution.tasks.len(),
        ..RunSummary::default()
    };

    if !resolution.has_updates() {
        info!("No update to the registry");
        return Ok(summary);
    }

    let reports = dispatcher::dispatch(notifier, &resolution.tasks).await;
    summary.notifications_sent = reports.iter().filter(|r| r.result.is_ok()).count();

    // Send failures are already logged; they never block the commit.
    resolution.registry.save(registry_path)?;
    summary.registry_written = true;

    Ok(summary)
}
