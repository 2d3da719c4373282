//! In-memory listening history table and read-only selections over it

use std::collections::BTreeSet;

use crate::selector::YearSelector;

use super::record::PlayEvent;

/// Every loaded play event, in file-name then in-file order.
///
/// A `Table` is never mutated after it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    events: Vec<PlayEvent>,
}

impl Table {
    #[must_use]
    pub const fn from_events(events: Vec<PlayEvent>) -> Self {
        Self { events }
    }

    #[must_use]
    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct calendar years present, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.events
            .iter()
            .map(PlayEvent::year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every event.
    #[must_use]
    pub fn all(&self) -> Selection<'_> {
        self.select(YearSelector::AllTime)
    }

    /// Events belonging to the selected period, in table order.
    #[must_use]
    pub fn select(&self, selector: YearSelector) -> Selection<'_> {
        Selection {
            events: self
                .events
                .iter()
                .filter(|e| selector.matches(e.year()))
                .collect(),
        }
    }
}

impl FromIterator<PlayEvent> for Table {
    fn from_iter<I: IntoIterator<Item = PlayEvent>>(iter: I) -> Self {
        Self::from_events(iter.into_iter().collect())
    }
}

/// A read-only view of some rows of a [`Table`].
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    events: Vec<&'a PlayEvent>,
}

impl<'a> Selection<'a> {
    /// Number of play events in the selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PlayEvent> + '_ {
        self.events.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ts: &str) -> PlayEvent {
        PlayEvent::new(ts, 1000, Some("t"), Some("a"), false).unwrap()
    }

    fn sample() -> Table {
        [
            "2021-06-01T00:00:00Z",
            "2019-01-01T00:00:00Z",
            "2021-01-01T00:00:00Z",
            "2020-12-31T23:59:59Z",
        ]
        .into_iter()
        .map(event)
        .collect()
    }

    #[test]
    fn test_years_sorted_and_deduplicated() {
        assert_eq!(sample().years(), vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_years_empty_and_single() {
        assert!(Table::default().years().is_empty());
        let one: Table = std::iter::once(event("2018-03-03T00:00:00Z")).collect();
        assert_eq!(one.years(), vec![2018]);
    }

    #[test]
    fn test_all_returns_every_row() {
        let table = sample();
        let all = table.all();
        assert_eq!(all.len(), table.len());
        assert!(all.iter().zip(table.events()).all(|(a, b)| a == b));
    }

    #[test]
    fn test_select_year() {
        let table = sample();
        let sel = table.select(YearSelector::Year(2021));
        assert_eq!(sel.len(), 2);
        assert!(sel.iter().all(|e| e.year() == 2021));

        assert!(table.select(YearSelector::Year(1990)).is_empty());
    }

    #[test]
    fn test_select_preserves_table_order() {
        let table = sample();
        let stamps: Vec<&str> = table
            .select(YearSelector::Year(2021))
            .iter()
            .map(|e| e.timestamp.as_str())
            .collect();
        assert_eq!(stamps, vec!["2021-06-01T00:00:00Z", "2021-01-01T00:00:00Z"]);
    }
}
