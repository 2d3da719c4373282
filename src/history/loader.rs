//! Reading export files from disk into a table

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{LoadError, Result};
use crate::types::Milliseconds;

use super::record::PlayEvent;
use super::table::Table;

/// Default extension of streaming-history export files.
pub const DEFAULT_EXTENSION: &str = "json";

/// Totals computed once, at load time, over the full unfiltered table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of events in the table.
    pub total_rows: usize,
    /// Number of distinct record keys seen across all loaded rows.
    pub total_columns: usize,
    /// Sum of `ms_played` over the table.
    pub total_ms_played: Milliseconds,
    /// Files that parsed as a record array.
    pub files_loaded: usize,
    /// Files that could not be read or parsed.
    pub files_failed: usize,
    /// Rows dropped because of a row error.
    pub rows_skipped: usize,
}

/// Rows decoded from one export file.
#[derive(Debug, Default)]
struct FileRows {
    events: Vec<PlayEvent>,
    columns: BTreeSet<String>,
    skipped: usize,
}

/// List export files in `dir` with the given extension, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load every export file in `dir` into one table.
///
/// Files that fail to parse are skipped with a warning, as are individual
/// rows that fail validation. The load only fails if there are no files or
/// none of them parse.
pub fn load_dir(dir: &Path, extension: &str) -> Result<(Table, LoadSummary)> {
    let files = discover_files(dir, extension)?;
    if files.is_empty() {
        return Err(LoadError::NoInputFiles {
            dir: dir.to_path_buf(),
        }
        .into());
    }

    let mut events = Vec::new();
    let mut columns = BTreeSet::new();
    let mut summary = LoadSummary::default();

    for path in &files {
        match load_file(path) {
            Ok(rows) => {
                debug!(
                    "Loaded {} rows from {} ({} skipped)",
                    rows.events.len(),
                    path.display(),
                    rows.skipped
                );
                summary.files_loaded += 1;
                summary.rows_skipped += rows.skipped;
                columns.extend(rows.columns);
                events.extend(rows.events);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.files_failed += 1;
            }
        }
    }

    if summary.files_loaded == 0 {
        return Err(LoadError::AllFilesFailed {
            dir: dir.to_path_buf(),
            failed: summary.files_failed,
        }
        .into());
    }

    if summary.rows_skipped > 0 {
        warn!("Skipped {} malformed rows", summary.rows_skipped);
    }

    let table = Table::from_events(events);
    summary.total_rows = table.len();
    summary.total_columns = columns.len();
    summary.total_ms_played = table.events().iter().map(|e| e.ms_played).sum();

    info!(
        "Loaded {} play events from {} files in {}",
        summary.total_rows,
        summary.files_loaded,
        dir.display()
    );

    Ok((table, summary))
}

/// Decode one export file. Only a file that is not a JSON array is an error.
fn load_file(path: &Path) -> Result<FileRows> {
    let contents = std::fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents)?;

    let mut rows = FileRows::default();
    for (index, record) in records.into_iter().enumerate() {
        if let Some(object) = record.as_object() {
            rows.columns.extend(object.keys().cloned());
        }
        match PlayEvent::from_json(record) {
            Ok(event) => rows.events.push(event),
            Err(e) => {
                debug!("{} row {}: {}", path.display(), index, e);
                rows.skipped += 1;
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    const FILE_A: &str = r#"[
        {"ts": "2020-01-01T10:00:00Z", "ms_played": 60000,
         "master_metadata_track_name": "X", "master_metadata_album_artist_name": "A",
         "skipped": false},
        {"ts": "not a date", "ms_played": 1000,
         "master_metadata_track_name": "X", "master_metadata_album_artist_name": "A",
         "skipped": false}
    ]"#;

    const FILE_B: &str = r#"[
        {"ts": "2021-01-01T10:00:00Z", "ms_played": 30000,
         "master_metadata_track_name": "Y", "master_metadata_album_artist_name": "A",
         "skipped": true, "platform": "ios"}
    ]"#;

    #[test]
    fn test_discover_sorted_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("c.JSON"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names: Vec<String> = discover_files(dir.path(), DEFAULT_EXTENSION)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.JSON"]);
    }

    #[test]
    fn test_load_concatenates_in_file_order() {
        let dir = tempdir().unwrap();
        // Written out of order on purpose
        fs::write(dir.path().join("Streaming_History_1.json"), FILE_B).unwrap();
        fs::write(dir.path().join("Streaming_History_0.json"), FILE_A).unwrap();

        let (table, summary) = load_dir(dir.path(), DEFAULT_EXTENSION).unwrap();

        let stamps: Vec<&str> = table.events().iter().map(|e| e.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["2020-01-01T10:00:00Z", "2021-01-01T10:00:00Z"]);

        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.rows_skipped, 1);
        assert_eq!(summary.files_loaded, 2);
        assert_eq!(summary.files_failed, 0);
        assert_eq!(summary.total_ms_played, Milliseconds::new(90_000));
        // Five export fields plus "platform"
        assert_eq!(summary.total_columns, 6);
    }

    #[test]
    fn test_load_skips_unparseable_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.json"), FILE_B).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let (table, summary) = load_dir(dir.path(), DEFAULT_EXTENSION).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_loaded, 1);
    }

    #[test]
    fn test_load_no_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "nothing here").unwrap();

        let err = load_dir(dir.path(), DEFAULT_EXTENSION).unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::NoInputFiles { .. })));
    }

    #[test]
    fn test_load_all_files_fail() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "garbage").unwrap();

        let err = load_dir(dir.path(), DEFAULT_EXTENSION).unwrap_err();
        assert!(matches!(
            err,
            Error::Load(LoadError::AllFilesFailed { failed: 2, .. })
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempdir().unwrap();
        let err = load_dir(&dir.path().join("absent"), DEFAULT_EXTENSION).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_empty_array() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.json"), "[]").unwrap();

        let (table, summary) = load_dir(dir.path(), DEFAULT_EXTENSION).unwrap();
        assert!(table.is_empty());
        assert_eq!(summary.total_columns, 0);
        assert!(summary.total_ms_played.is_zero());
    }
}
