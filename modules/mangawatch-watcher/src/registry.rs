//! The durable feed registry: a CSV file whose first row is the header and
//! whose remaining rows are `name, url, locator, watermark`.
//!
//! Rows are kept verbatim as strings so that feeds untouched by a run
//! round-trip byte-identically; the parsed [`Feed`] list is a derived view.

use std::fs;
use std::path::Path;

use tracing::info;

use mangawatch_core::{Feed, WatchError, Watermark};

/// Column positions within a feed row.
const COL_NAME: usize = 0;
const COL_URL: usize = 1;
const COL_LOCATOR: usize = 2;
const COL_WATERMARK: usize = 3;

/// An immutable snapshot of the registry file.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    rows: Vec<Vec<String>>,
}

impl Registry {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Load the full tabular content verbatim, header row included. No
    /// semantic validation happens here.
    pub fn load(path: &Path) -> Result<Self, WatchError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| WatchError::Io(format!("{}: {e}", path.display())))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| WatchError::Io(format!("{}: {e}", path.display())))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(WatchError::RegistryEmpty(path.display().to_string()));
        }

        Ok(Self { rows })
    }

    /// Full overwrite of the destination. The output is built in memory
    /// first and committed in a single write, so a failure cannot leave a
    /// half-written file behind.
    pub fn save(&self, path: &Path) -> Result<(), WatchError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| WatchError::Io(e.to_string()))?;
        }
        let buf = writer
            .into_inner()
            .map_err(|e| WatchError::Io(e.to_string()))?;

        fs::write(path, buf).map_err(|e| WatchError::Io(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), rows = self.rows.len(), "Registry written");
        Ok(())
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Parse rows `1..N` as feeds. Row 0 is the header and is never a
    /// feed; a header-only registry is valid and yields zero feeds.
    pub fn feeds(&self) -> Result<Vec<Feed>, WatchError> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(row_index, row)| parse_feed(row_index, row))
            .collect()
    }

    /// A new snapshot with the watermark cell of the given feed rewritten
    /// in canonical form. `feed_index` is positional within [`feeds`],
    /// i.e. row `feed_index + 1`.
    pub fn with_watermark(&self, feed_index: usize, watermark: Watermark) -> Self {
        let mut rows = self.rows.clone();
        rows[feed_index + 1][COL_WATERMARK] = watermark.to_string();
        Self { rows }
    }
}

fn parse_feed(row_index: usize, row: &[String]) -> Result<Feed, WatchError> {
    if row.len() < 4 {
        return Err(WatchError::RegistryMalformed(format!(
            "row {row_index} has {} columns, expected 4",
            row.len()
        )));
    }

    let watermark: Watermark = row[COL_WATERMARK].parse().map_err(|e| {
        WatchError::RegistryMalformed(format!("row {row_index} watermark: {e}"))
    })?;

    Ok(Feed {
        name: row[COL_NAME].clone(),
        url: row[COL_URL].clone(),
        locator: row[COL_LOCATOR].clone(),
        watermark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_registry(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_preserves_header_and_rows_verbatim() {
        let file = write_registry("name,url,locator,watermark\nAlpha,http://a.example,a.ep,3\n");
        let registry = Registry::load(file.path()).unwrap();

        assert_eq!(registry.rows().len(), 2);
        assert_eq!(registry.rows()[0], vec!["name", "url", "locator", "watermark"]);
        assert_eq!(registry.rows()[1], vec!["Alpha", "http://a.example", "a.ep", "3"]);
    }

    #[test]
    fn empty_file_is_a_registry_empty_error() {
        let file = write_registry("");
        let err = Registry::load(file.path()).unwrap_err();
        assert!(matches!(err, WatchError::RegistryEmpty(_)));
    }

    #[test]
    fn header_only_registry_is_valid_and_has_zero_feeds() {
        let file = write_registry("name,url,locator,watermark\n");
        let registry = Registry::load(file.path()).unwrap();
        assert!(registry.feeds().unwrap().is_empty());
    }

    #[test]
    fn feeds_parses_positional_columns() {
        let file = write_registry(
            "name,url,locator,watermark\nAlpha,http://a.example,a.ep,3\nBeta,http://b.example,div.latest,10.5\n",
        );
        let feeds = Registry::load(file.path()).unwrap().feeds().unwrap();

        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0].name, "Alpha");
        assert_eq!(feeds[0].watermark, Watermark::new(3.0).unwrap());
        assert_eq!(feeds[1].locator, "div.latest");
        assert_eq!(feeds[1].watermark, Watermark::new(10.5).unwrap());
    }

    #[test]
    fn short_row_and_bad_watermark_are_malformed() {
        let short = write_registry("name,url,locator,watermark\nAlpha,http://a.example\n");
        let err = Registry::load(short.path()).unwrap().feeds().unwrap_err();
        assert!(matches!(err, WatchError::RegistryMalformed(_)));

        let bad = write_registry("name,url,locator,watermark\nAlpha,http://a.example,a.ep,three\n");
        let err = Registry::load(bad.path()).unwrap().feeds().unwrap_err();
        assert!(matches!(err, WatchError::RegistryMalformed(_)));
    }

    #[test]
    fn save_then_load_round_trips() {
        let file = write_registry("name,url,locator,watermark\nAlpha,http://a.example,a.ep,3\n");
        let registry = Registry::load(file.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        registry.save(out.path()).unwrap();

        let reloaded = Registry::load(out.path()).unwrap();
        assert_eq!(reloaded, registry);
    }

    #[test]
    fn with_watermark_rewrites_only_the_one_cell() {
        let file = write_registry(
            "name,url,locator,watermark\nAlpha,http://a.example,a.ep,3\nBeta,http://b.example,b.ep,7\n",
        );
        let registry = Registry::load(file.path()).unwrap();
        let updated = registry.with_watermark(0, Watermark::new(5.0).unwrap());

        assert_eq!(updated.rows()[1], vec!["Alpha", "http://a.example", "a.ep", "5"]);
        assert_eq!(updated.rows()[2], registry.rows()[2]);
        assert_eq!(updated.rows()[0], registry.rows()[0]);
    }
}
