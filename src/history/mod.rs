//! Listening history store
//!
//! Loads streaming-history export files into an immutable in-memory table
//! and hands out read-only selections of it for the analytics queries.

mod loader;
mod record;
mod table;

pub use loader::{discover_files, LoadSummary, DEFAULT_EXTENSION};
pub use record::{parse_timestamp, PlayEvent};
pub use table::{Selection, Table};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::selector::YearSelector;

/// The loaded listening history of one export directory.
#[derive(Debug, Clone)]
pub struct ListeningHistory {
    dir: PathBuf,
    table: Table,
    summary: LoadSummary,
}

impl ListeningHistory {
    /// Load every `*.json` export in `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_extension(dir, DEFAULT_EXTENSION)
    }

    /// Load every export in `dir` whose file extension is `extension`.
    pub fn load_with_extension(dir: impl AsRef<Path>, extension: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let (table, summary) = loader::load_dir(dir, extension)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            table,
            summary,
        })
    }

    /// Wrap an already-built table, computing its summary.
    #[must_use]
    pub fn from_table(table: Table) -> Self {
        let summary = LoadSummary {
            total_rows: table.len(),
            total_ms_played: table.events().iter().map(|e| e.ms_played).sum(),
            ..LoadSummary::default()
        };
        Self {
            dir: PathBuf::new(),
            table,
            summary,
        }
    }

    /// Directory the history was loaded from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Totals over the full table, computed at load time.
    #[must_use]
    pub const fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Distinct calendar years present, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.table.years()
    }

    /// Events for a dropdown value: "All Time" or a year.
    pub fn filter(&self, selector: &str) -> Result<Selection<'_>> {
        let selector: YearSelector = selector.parse()?;
        Ok(self.select(selector))
    }

    /// Events for an already-parsed selector.
    #[must_use]
    pub fn select(&self, selector: YearSelector) -> Selection<'_> {
        self.table.select(selector)
    }
}
