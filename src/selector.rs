//! Period selector for filtering statistics queries.
//!
//! This module provides the `YearSelector` type used by the CLI to pick the
//! period a dashboard is computed over: the whole history, or one
//! calendar year.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Display name of the unfiltered period.
pub const ALL_TIME: &str = "All Time";

/// A period for filtering statistics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearSelector {
    /// No filter, every event.
    #[default]
    AllTime,
    /// Events whose timestamp falls in this calendar year.
    Year(i32),
}

impl YearSelector {
    /// Whether an event from `year` belongs to this period.
    #[must_use]
    pub const fn matches(self, year: i32) -> bool {
        match self {
            Self::AllTime => true,
            Self::Year(y) => y == year,
        }
    }
}

impl FromStr for YearSelector {
    type Err = Error;

    /// Parse a selector as it appears in the period dropdown.
    ///
    /// Accepts "All Time" (any case) or an integer year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_TIME) {
            return Ok(Self::AllTime);
        }
        trimmed
            .parse::<i32>()
            .map(Self::Year)
            .map_err(|_| Error::invalid_year(s))
    }
}

impl fmt::Display for YearSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTime => f.write_str(ALL_TIME),
            Self::Year(y) => write!(f, "{y}"),
        }
    }
}

/// The dropdown values for a set of years: "All Time" first, then each year.
#[must_use]
pub fn options(years: &[i32]) -> Vec<YearSelector> {
    std::iter::once(YearSelector::AllTime)
        .chain(years.iter().copied().map(YearSelector::Year))
        .collect()
}

/// Build a selector from CLI flags.
///
/// # Priority
///
/// Flags are checked in order: `all_time` > `period` > `year` > default (all time).
/// A `period` string goes through the same parsing as the dropdown values.
pub fn from_cli_flags(
    all_time: bool,
    period: Option<&str>,
    year: Option<i32>,
) -> crate::Result<YearSelector> {
    if all_time {
        Ok(YearSelector::AllTime)
    } else if let Some(p) = period {
        p.parse()
    } else if let Some(y) = year {
        Ok(YearSelector::Year(y))
    } else {
        Ok(YearSelector::AllTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_time() {
        assert_eq!("All Time".parse::<YearSelector>().unwrap(), YearSelector::AllTime);
        assert_eq!("all time".parse::<YearSelector>().unwrap(), YearSelector::AllTime);
        assert_eq!("  All Time ".parse::<YearSelector>().unwrap(), YearSelector::AllTime);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!("2021".parse::<YearSelector>().unwrap(), YearSelector::Year(2021));
        assert_eq!(" 2019".parse::<YearSelector>().unwrap(), YearSelector::Year(2019));
    }

    #[test]
    fn test_parse_invalid() {
        let err = "banana".parse::<YearSelector>().unwrap_err();
        assert!(matches!(err, Error::InvalidYear(ref s) if s == "banana"));

        assert!("20.21".parse::<YearSelector>().is_err());
        assert!("".parse::<YearSelector>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(YearSelector::AllTime.to_string(), "All Time");
        assert_eq!(YearSelector::Year(2024).to_string(), "2024");
    }

    #[test]
    fn test_display_parses_back() {
        for selector in [YearSelector::AllTime, YearSelector::Year(2020)] {
            assert_eq!(selector.to_string().parse::<YearSelector>().unwrap(), selector);
        }
    }

    #[test]
    fn test_matches() {
        assert!(YearSelector::AllTime.matches(1999));
        assert!(YearSelector::Year(2021).matches(2021));
        assert!(!YearSelector::Year(2021).matches(2022));
    }

    #[test]
    fn test_options() {
        let opts = options(&[2019, 2020]);
        assert_eq!(
            opts,
            vec![
                YearSelector::AllTime,
                YearSelector::Year(2019),
                YearSelector::Year(2020)
            ]
        );
        assert_eq!(options(&[]), vec![YearSelector::AllTime]);
    }

    #[test]
    fn test_cli_flags_default() {
        assert_eq!(from_cli_flags(false, None, None).unwrap(), YearSelector::AllTime);
    }

    #[test]
    fn test_cli_flags_priority() {
        // all_time takes precedence
        let selector = from_cli_flags(true, Some("2020"), Some(2023)).unwrap();
        assert_eq!(selector, YearSelector::AllTime);

        // period takes precedence over year
        let selector = from_cli_flags(false, Some("2020"), Some(2023)).unwrap();
        assert_eq!(selector, YearSelector::Year(2020));

        let selector = from_cli_flags(false, None, Some(2023)).unwrap();
        assert_eq!(selector, YearSelector::Year(2023));
    }

    #[test]
    fn test_cli_flags_bad_period() {
        assert!(from_cli_flags(false, Some("banana"), None).is_err());
    }
}
