//! # Listening History
//!
//! Listening statistics from streaming-history JSON exports.
//!
//! This crate provides:
//! - Loading a directory of export files into one immutable table
//! - Year selection ("All Time" or a single calendar year)
//! - Aggregates over a selection: totals, unique artists, skip rate,
//!   top songs and top artists by minutes played
//! - Terminal rendering of the resulting dashboard
//!
//! ```no_run
//! use listening_history::{analytics, ListeningHistory};
//!
//! let history = ListeningHistory::load("data_folder")?;
//! let selection = history.filter("2021")?;
//! for song in analytics::top_songs(&selection, analytics::DEFAULT_TOP_LIMIT) {
//!     println!("{}. {} - {} ({:.1} minutes)", song.rank, song.track, song.artist, song.minutes_played());
//! }
//! # Ok::<(), listening_history::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod analytics;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod selector;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use history::ListeningHistory;
pub use selector::YearSelector;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "listening-history";
