//! Display utilities for formatting statistics output.
//!
//! This module provides the formatting functions used by the CLI for
//! rendering the listening dashboard in the terminal.
//!
//! # Functions
//!
//! - [`truncate`] - Truncate strings to a maximum length with ellipsis
//! - [`make_bar`] - Create visual bar charts for relative values
//! - [`format_listening_time`] - Milliseconds as whole or thousands of hours
//! - [`print_section`] / [`print_section_simple`] - Print section headers
//! - [`display_overview`] / [`display_top_artists`] / etc. - Display formatted stats

use crate::analytics::{ArtistStats, OverviewStats, SongStats, YearStats};
use crate::history::LoadSummary;
use crate::selector::YearSelector;
use crate::types::Milliseconds;

/// Format a listening time the way the dashboard cards show it.
///
/// # Examples
///
/// ```
/// use listening_history::display::format_listening_time;
/// use listening_history::types::Milliseconds;
///
/// assert_eq!(format_listening_time(Milliseconds::new(7_200_000)), "2 hours");
/// assert_eq!(format_listening_time(Milliseconds::new(4_320_000_000)), "1.2k hours");
/// ```
#[must_use]
pub fn format_listening_time(ms: Milliseconds) -> String {
    let hours = ms.as_hours_f64();
    if hours >= 1000.0 {
        format!("{:.1}k hours", hours / 1000.0)
    } else {
        format!("{hours:.0} hours")
    }
}

/// Format minutes with one decimal, as in the ranked lists.
///
/// The exact value is rounded once, ties to even.
///
/// ```
/// use listening_history::display::format_minutes;
/// use listening_history::types::Milliseconds;
///
/// assert_eq!(format_minutes(Milliseconds::new(15_000)), "0.2");
/// ```
#[must_use]
pub fn format_minutes(ms: Milliseconds) -> String {
    format!("{:.1}", ms.as_minutes_f64())
}

/// Truncate a string to a maximum length, adding "..." if truncated.
///
/// Counts characters rather than bytes. For `max_len < 3`, truncates
/// without ellipsis since there's no room for "...".
///
/// # Examples
///
/// ```
/// use listening_history::display::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 2), "he");
/// ```
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len < 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

/// Create a visual bar for displaying relative values.
///
/// Uses Unicode block characters to create a proportional bar chart.
///
/// # Arguments
///
/// * `value` - The value to represent (negative values treated as 0)
/// * `max_value` - The maximum value (determines 100% width)
/// * `width` - The total width of the bar in characters
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn make_bar(value: i64, max_value: i64, width: usize) -> String {
    if max_value <= 0 || value <= 0 {
        return " ".repeat(width);
    }
    let ratio = (value as f64 / max_value as f64).clamp(0.0, 1.0);
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Print a section header with equals signs.
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("  {title}");
    println!("{}", "=".repeat(50));
}

/// Print a simple section header with dashes.
pub fn print_section_simple(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(30));
}

/// Print the dashboard banner for a period.
pub fn print_banner(selector: YearSelector) {
    println!("\n{}", "*".repeat(50));
    println!("     LISTENING STATS - {}", selector.to_string().to_uppercase());
    println!("{}", "*".repeat(50));
}

/// Display the period selector values, marking the current one.
pub fn display_selector(options: &[YearSelector], current: YearSelector) {
    for option in options {
        let marker = if *option == current { '>' } else { ' ' };
        println!("  {marker} {option}");
    }
}

/// Display the four stat cards.
pub fn display_overview(overview: &OverviewStats) {
    println!(
        "  Total listening time: {:>14}",
        format_listening_time(overview.total_ms)
    );
    println!("  Total tracks played:  {:>14}", overview.total_plays);
    println!("  Unique artists:       {:>14}", overview.unique_artists);
    println!("  Unique tracks:        {:>14}", overview.unique_tracks);
    println!("  Skip rate:            {:>14}", overview.skip_rate.to_string());
}

/// Display top songs list.
pub fn display_top_songs(songs: &[SongStats], show_bar: bool) {
    let max_ms = songs.first().map_or(1, |s| s.total_ms.get());

    for song in songs {
        let minutes = format_minutes(song.total_ms);
        if show_bar {
            let bar = make_bar(song.total_ms.get(), max_ms, 15);
            println!(
                "  {:2}. {:<25} - {:<15} {} {:>8} minutes",
                song.rank,
                truncate(&song.track, 25),
                truncate(&song.artist, 15),
                bar,
                minutes
            );
        } else {
            println!(
                "  {:2}. {} - {} ({} minutes)",
                song.rank, song.track, song.artist, minutes
            );
        }
    }
}

/// Display top artists list.
pub fn display_top_artists(artists: &[ArtistStats], show_bar: bool) {
    let max_ms = artists.first().map_or(1, |a| a.total_ms.get());

    for artist in artists {
        let minutes = format_minutes(artist.total_ms);
        if show_bar {
            let bar = make_bar(artist.total_ms.get(), max_ms, 20);
            println!(
                "  {:2}. {:<30} {} {:>8} minutes ({} plays)",
                artist.rank,
                truncate(&artist.artist, 30),
                bar,
                minutes,
                artist.play_count
            );
        } else {
            println!("  {:2}. {} ({} minutes)", artist.rank, artist.artist, minutes);
        }
    }
}

/// Display the listening-habits chart: hours listened per year.
pub fn display_listening_habits(years: &[YearStats]) {
    let max_ms = years.iter().map(|y| y.total_ms.get()).max().unwrap_or(1);

    for year in years {
        let bar = make_bar(year.total_ms.get(), max_ms, 25);
        println!(
            "  {:<6} {} {:>8.1}h {:>6} plays",
            year.year,
            bar,
            year.total_ms.as_hours_f64(),
            year.play_count
        );
    }
}

/// Display the totals computed when the history was loaded.
pub fn display_load_summary(summary: &LoadSummary) {
    println!("  Rows:             {:>10}", summary.total_rows);
    println!("  Columns:          {:>10}", summary.total_columns);
    println!(
        "  Listening time:   {:>10}",
        format_listening_time(summary.total_ms_played)
    );
    println!("  Files loaded:     {:>10}", summary.files_loaded);
    println!("  Files failed:     {:>10}", summary.files_failed);
    println!("  Rows skipped:     {:>10}", summary.rows_skipped);
}
