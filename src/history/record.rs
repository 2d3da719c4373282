//! Play event records as they appear in streaming-history exports

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::RowError;
use crate::types::Milliseconds;

/// Naive date-time layouts accepted after RFC 3339 fails.
/// `%.f` also matches when there is no fractional part.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One record of an export file, field names as written by the exporter.
///
/// Any other keys in the record are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    ts: String,
    ms_played: i64,
    master_metadata_track_name: Option<String>,
    master_metadata_album_artist_name: Option<String>,
    skipped: Option<bool>,
}

/// A single play of a track, validated at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEvent {
    /// Timestamp exactly as it appeared in the export
    pub timestamp: String,
    /// Parsed wall-clock time of the play, in the offset it was written with
    pub played_at: NaiveDateTime,
    pub ms_played: Milliseconds,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub skipped: bool,
}

impl PlayEvent {
    /// Build an event, parsing its timestamp.
    pub fn new(
        timestamp: impl Into<String>,
        ms_played: i64,
        track_name: Option<&str>,
        artist_name: Option<&str>,
        skipped: bool,
    ) -> Result<Self, RowError> {
        let timestamp = timestamp.into();
        if ms_played < 0 {
            return Err(RowError::NegativeDuration(ms_played));
        }
        let played_at =
            parse_timestamp(&timestamp).ok_or_else(|| RowError::Timestamp(timestamp.clone()))?;

        Ok(Self {
            timestamp,
            played_at,
            ms_played: Milliseconds::new(ms_played),
            track_name: track_name.map(str::to_string),
            artist_name: artist_name.map(str::to_string),
            skipped,
        })
    }

    /// Decode one JSON record from an export file.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RowError> {
        let raw: RawRecord = serde_json::from_value(value)?;
        Self::new(
            raw.ts,
            raw.ms_played,
            raw.master_metadata_track_name.as_deref(),
            raw.master_metadata_album_artist_name.as_deref(),
            raw.skipped.unwrap_or(false),
        )
    }

    /// Calendar year of the play.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.played_at.year()
    }
}

/// Parse an ISO-8601-like timestamp.
///
/// Offsets are kept as written rather than converted, so the year of
/// `2020-12-31T23:30:00-05:00` is 2020.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
