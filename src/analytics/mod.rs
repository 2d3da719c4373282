//! Analytics and statistics module
//!
//! Pure aggregate queries over a [`Selection`] of the listening history.
//! None of them keep state between calls.
//!
//! Ranked lists order groups by summed `ms_played`, descending. Equal totals
//! are ordered by their group key in reverse lexicographic order, so for a
//! tie between artists "A" and "B", "B" ranks first.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::history::{PlayEvent, Selection};
use crate::types::{Milliseconds, PlayCount};

/// Default number of entries in a top list.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Skip counts for a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipRate {
    pub skipped: PlayCount,
    pub total: PlayCount,
}

impl SkipRate {
    /// Percentage of plays that were skipped. An empty period gives 0.
    #[must_use]
    pub fn rate(self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.skipped.get() as f64 / self.total.get() as f64 * 100.0
    }

    /// [`rate`](Self::rate) rounded to the nearest integer, ties to even.
    ///
    /// Agrees with the `{:.0}` rendering used by `Display`, so 1 of 8 is
    /// 12% and 5 of 8 is 62%.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(self) -> u32 {
        // Bounded to 0..=100 by construction
        self.rate().round_ties_even() as u32
    }
}

impl fmt::Display for SkipRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.rate())
    }
}

/// A ranked song: one (track, artist) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongStats {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub track: String,
    pub artist: String,
    /// Total listening time in milliseconds.
    pub total_ms: Milliseconds,
    /// Number of plays.
    pub play_count: PlayCount,
}

impl SongStats {
    /// Minutes played, unrounded.
    #[must_use]
    pub fn minutes_played(&self) -> f64 {
        self.total_ms.as_minutes_f64()
    }
}

/// A ranked artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistStats {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub artist: String,
    /// Total listening time in milliseconds.
    pub total_ms: Milliseconds,
    /// Number of plays.
    pub play_count: PlayCount,
}

impl ArtistStats {
    /// Minutes played, unrounded.
    #[must_use]
    pub fn minutes_played(&self) -> f64 {
        self.total_ms.as_minutes_f64()
    }
}

/// Listening totals for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearStats {
    pub year: i32,
    pub total_ms: Milliseconds,
    pub play_count: PlayCount,
}

/// Overview statistics for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewStats {
    /// Total number of plays.
    pub total_plays: PlayCount,
    /// Total listening time in milliseconds.
    pub total_ms: Milliseconds,
    /// Count of distinct non-null artists.
    pub unique_artists: usize,
    /// Count of distinct (track, artist) pairs.
    pub unique_tracks: usize,
    pub skip_rate: SkipRate,
}

/// Sum of `ms_played` over the selection.
#[must_use]
pub fn total_listening_time(selection: &Selection<'_>) -> Milliseconds {
    selection.iter().map(|e| e.ms_played).sum()
}

/// Number of play events in the selection.
#[must_use]
pub fn total_tracks(selection: &Selection<'_>) -> PlayCount {
    PlayCount::of_len(selection.len())
}

/// Count of distinct artist names. Events without an artist are not counted.
#[must_use]
pub fn unique_artist_count(selection: &Selection<'_>) -> usize {
    selection
        .iter()
        .filter_map(|e| e.artist_name.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Count of distinct (track, artist) pairs with both fields present.
#[must_use]
pub fn unique_track_count(selection: &Selection<'_>) -> usize {
    selection
        .iter()
        .filter_map(song_key)
        .collect::<HashSet<_>>()
        .len()
}

/// How many of the selected plays were skipped.
#[must_use]
pub fn skip_rate(selection: &Selection<'_>) -> SkipRate {
    SkipRate {
        skipped: PlayCount::of_len(selection.iter().filter(|e| e.skipped).count()),
        total: total_tracks(selection),
    }
}

/// Top songs by listening time.
///
/// Events missing either the track or the artist name are left out.
#[must_use]
pub fn top_songs(selection: &Selection<'_>, limit: usize) -> Vec<SongStats> {
    let totals = group_totals(
        selection
            .iter()
            .filter_map(|e| song_key(e).map(|key| (key, e.ms_played))),
    );

    rank(totals, limit)
        .map(|(rank, (track, artist), (total_ms, play_count))| SongStats {
            rank,
            track: track.to_string(),
            artist: artist.to_string(),
            total_ms,
            play_count,
        })
        .collect()
}

/// Top artists by listening time.
///
/// Events without an artist name are left out.
#[must_use]
pub fn top_artists(selection: &Selection<'_>, limit: usize) -> Vec<ArtistStats> {
    let totals = group_totals(
        selection
            .iter()
            .filter_map(|e| e.artist_name.as_deref().map(|artist| (artist, e.ms_played))),
    );

    rank(totals, limit)
        .map(|(rank, artist, (total_ms, play_count))| ArtistStats {
            rank,
            artist: artist.to_string(),
            total_ms,
            play_count,
        })
        .collect()
}

/// Listening time and play count per calendar year, ascending by year.
#[must_use]
pub fn yearly_breakdown(selection: &Selection<'_>) -> Vec<YearStats> {
    let mut years: BTreeMap<i32, (Milliseconds, PlayCount)> = BTreeMap::new();
    for event in selection.iter() {
        let entry = years.entry(event.year()).or_default();
        entry.0 += event.ms_played;
        entry.1 += PlayCount::new(1);
    }

    years
        .into_iter()
        .map(|(year, (total_ms, play_count))| YearStats {
            year,
            total_ms,
            play_count,
        })
        .collect()
}

/// All the headline numbers for a period.
#[must_use]
pub fn overview(selection: &Selection<'_>) -> OverviewStats {
    OverviewStats {
        total_plays: total_tracks(selection),
        total_ms: total_listening_time(selection),
        unique_artists: unique_artist_count(selection),
        unique_tracks: unique_track_count(selection),
        skip_rate: skip_rate(selection),
    }
}

fn song_key(event: &PlayEvent) -> Option<(&str, &str)> {
    Some((event.track_name.as_deref()?, event.artist_name.as_deref()?))
}

/// Sum listening time and plays per key.
fn group_totals<K, I>(rows: I) -> HashMap<K, (Milliseconds, PlayCount)>
where
    K: Eq + Hash,
    I: Iterator<Item = (K, Milliseconds)>,
{
    let mut totals: HashMap<K, (Milliseconds, PlayCount)> = HashMap::new();
    for (key, ms) in rows {
        let entry = totals.entry(key).or_default();
        entry.0 += ms;
        entry.1 += PlayCount::new(1);
    }
    totals
}

/// Order groups by listening time, then by key descending, and number them from 1.
fn rank<K, V>(
    totals: HashMap<K, (Milliseconds, V)>,
    limit: usize,
) -> impl Iterator<Item = (usize, K, (Milliseconds, V))>
where
    K: Ord,
{
    let mut groups: Vec<(K, (Milliseconds, V))> = totals.into_iter().collect();
    groups.sort_unstable_by(|(ka, (ma, _)), (kb, (mb, _))| {
        (Reverse(ma), Reverse(ka)).cmp(&(Reverse(mb), Reverse(kb)))
    });

    groups
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (key, value))| (i + 1, key, value))
}
