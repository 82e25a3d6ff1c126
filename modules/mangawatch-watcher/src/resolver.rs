//! Update tier, first half: diff fresh check results against the loaded
//! snapshot. Pure with respect to I/O — produces a new registry snapshot
//! and the notification tasks, touches nothing on disk.

use tracing::{info, warn};

use mangawatch_core::{Feed, NotificationTask};

use crate::orchestrator::CheckResult;
use crate::registry::Registry;

/// What a run decided: the next registry snapshot and the alerts owed.
#[derive(Debug)]
pub struct Resolution {
    pub registry: Registry,
    pub tasks: Vec<NotificationTask>,
}

impl Resolution {
    pub fn has_updates(&self) -> bool {
        !self.tasks.is_empty()
    }
}

/// Compare each feed's extracted value to its stored watermark. Strictly
/// greater advances the feed; equal or lower leaves the row unchanged, as
/// does any per-feed failure.
pub fn resolve(registry: &Registry, feeds: &[Feed], results: &[CheckResult]) -> Resolution {
    debug_assert_eq!(feeds.len(), results.len());

    let mut next = registry.clone();
    let mut tasks = Vec::new();

    for (index, (feed, result)) in feeds.iter().zip(results).enumerate() {
        match result {
            Ok(latest) if *latest > feed.watermark => {
                info!(
                    feed = %feed.name,
                    current = %feed.watermark,
                    latest = %latest,
                    "New episode"
                );
                next = next.with_watermark(index, *latest);
                tasks.push(NotificationTask {
                    feed_name: feed.name.clone(),
                    url: feed.url.clone(),
                    prior_watermark: feed.watermark,
                    new_watermark: *latest,
                });
            }
            Ok(latest) => {
                info!(feed = %feed.name, current = %feed.watermark, latest = %latest, "No new episode");
            }
            Err(failure) => {
                warn!(feed = %feed.name, error = %failure, "Check failed, feed skipped");
            }
        }
    }

    Resolution { registry: next, tasks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mangawatch_core::{CheckFailure, Watermark};

    fn registry_of(feeds: &[(&str, &str, &str, &str)]) -> Registry {
        let mut rows = vec![vec![
            "name".to_string(),
            "url".to_string(),
            "locator".to_string(),
            "watermark".to_string(),
        ]];
        for (name, url, locator, wm) in feeds {
            rows.push(vec![
                name.to_string(),
                url.to_string(),
                locator.to_string(),
                wm.to_string(),
            ]);
        }
        Registry::from_rows(rows)
    }

    fn wm(v: f64) -> Watermark {
        Watermark::new(v).unwrap()
    }

    #[test]
    fn advance_produces_task_and_rewrites_watermark() {
        let registry = registry_of(&[("Alpha", "http://a.example", "a.ep", "3")]);
        let feeds = registry.feeds().unwrap();

        let resolution = resolve(&registry, &feeds, &[Ok(wm(5.0))]);

        assert_eq!(
            resolution.tasks,
            vec![NotificationTask {
                feed_name: "Alpha".into(),
                url: "http://a.example".into(),
                prior_watermark: wm(3.0),
                new_watermark: wm(5.0),
            }]
        );
        assert_eq!(
            resolution.registry.rows()[1],
            vec!["Alpha", "http://a.example", "a.ep", "5"]
        );
    }

    #[test]
    fn equal_value_is_not_an_update() {
        let registry = registry_of(&[("Alpha", "http://a.example", "a.ep", "4")]);
        let feeds = registry.feeds().unwrap();

        let resolution = resolve(&registry, &feeds, &[Ok(wm(4.0))]);

        assert!(!resolution.has_updates());
        assert_eq!(resolution.registry, registry);
    }

    #[test]
    fn failed_feed_row_is_untouched_while_neighbors_advance() {
        let registry = registry_of(&[
            ("A", "http://a.example", "a.ep", "1"),
            ("B", "http://b.example", "b.ep", "2"),
            ("C", "http://c.example", "c.ep", "3"),
        ]);
        let feeds = registry.feeds().unwrap();

        let results = vec![
            Ok(wm(2.0)),
            Err(CheckFailure::LocatorNotFound("b.ep".into())),
            Ok(wm(9.0)),
        ];
        let resolution = resolve(&registry, &feeds, &results);

        assert_eq!(resolution.tasks.len(), 2);
        assert_eq!(resolution.tasks[0].feed_name, "A");
        assert_eq!(resolution.tasks[1].feed_name, "C");
        assert_eq!(resolution.registry.rows()[1][3], "2");
        assert_eq!(resolution.registry.rows()[2], registry.rows()[2]);
        assert_eq!(resolution.registry.rows()[3][3], "9");
    }

    #[test]
    fn fractional_advance_is_kept_fractional() {
        let registry = registry_of(&[("Alpha", "http://a.example", "a.ep", "10")]);
        let feeds = registry.feeds().unwrap();

        let resolution = resolve(&registry, &feeds, &[Ok(wm(10.5))]);
        assert_eq!(resolution.registry.rows()[1][3], "10.5");
    }

    #[test]
    fn lower_value_never_regresses_the_watermark() {
        let registry = registry_of(&[("Alpha", "http://a.example", "a.ep", "8")]);
        let feeds = registry.feeds().unwrap();

        let resolution = resolve(&registry, &feeds, &[Ok(wm(6.0))]);
        assert!(!resolution.has_updates());
        assert_eq!(resolution.registry.rows()[1][3], "8");
    }
}
