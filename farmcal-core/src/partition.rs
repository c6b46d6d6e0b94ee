//! Grouping events into per-date buckets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::event::{Event, date_key};

/// Events grouped by their `date` string, each bucket in arrival order.
///
/// Keys are the events' own date strings with no normalization, so every
/// event lands in exactly one bucket. ISO dates sort lexically, so iteration
/// is chronological for well-formed input.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EventsByDate<'a> {
    buckets: BTreeMap<&'a str, Vec<&'a Event>>,
}

impl<'a> EventsByDate<'a> {
    /// Events recorded under `key`, empty if there are none.
    pub fn get(&self, key: &str) -> &[&'a Event] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Events recorded on `date`.
    pub fn on(&self, date: NaiveDate) -> &[&'a Event] {
        self.get(&date_key(date))
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        !self.on(date).is_empty()
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of events across all buckets.
    pub fn total_events(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Event])> + '_ {
        self.buckets.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

/// Group events by their own `date` field.
///
/// Accepts anything yielding `&Event`, so callers can pass a slice or the
/// output of [`crate::EventFilter::apply`].
pub fn partition_by_date<'a, I>(events: I) -> EventsByDate<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut buckets: BTreeMap<&'a str, Vec<&'a Event>> = BTreeMap::new();

    for event in events {
        buckets.entry(event.date.as_str()).or_default().push(event);
    }

    let partition = EventsByDate { buckets };
    debug!(
        dates = partition.len(),
        events = partition.total_events(),
        "partitioned events by date"
    );
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ev(date: &str, title: &str) -> Event {
        Event::new(date, title, "health")
    }

    #[test]
    fn test_buckets_keep_arrival_order() {
        let events = vec![
            ev("2024-03-17", "Vaccinate"),
            ev("2024-03-15", "Shear"),
            ev("2024-03-17", "Deworm"),
            ev("2024-03-17", "Weigh"),
        ];

        let by_date = partition_by_date(&events);

        assert_eq!(by_date.len(), 2);
        let titles: Vec<_> = by_date.get("2024-03-17").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Vaccinate", "Deworm", "Weigh"]);
        assert_eq!(by_date.get("2024-03-15").len(), 1);
    }

    #[test]
    fn test_missing_date_is_empty_bucket() {
        let events = vec![ev("2024-03-17", "Vaccinate")];
        let by_date = partition_by_date(&events);

        assert!(by_date.get("2024-03-18").is_empty());
        let date = NaiveDate::from_ymd_opt(2024, 3, 18).expect("valid date");
        assert!(!by_date.has_events(date));
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let events = vec![ev("2024-3-7", "Odd"), ev("2024-03-07", "Iso")];
        let by_date = partition_by_date(&events);

        assert_eq!(by_date.len(), 2);
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(by_date.on(date).len(), 1);
        assert_eq!(by_date.on(date)[0].title, "Iso");
    }

    #[test]
    fn test_empty_input() {
        let events: Vec<Event> = Vec::new();
        let by_date = partition_by_date(&events);
        assert!(by_date.is_empty());
        assert_eq!(by_date.total_events(), 0);
    }

    #[test]
    fn test_keys_iterate_chronologically() {
        let events = vec![ev("2024-12-01", "c"), ev("2023-01-05", "a"), ev("2024-02-10", "b")];
        let by_date = partition_by_date(&events);
        let keys: Vec<_> = by_date.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["2023-01-05", "2024-02-10", "2024-12-01"]);
    }

    proptest! {
        #[test]
        fn prop_partition_preserves_every_event(
            days in prop::collection::vec(1u32..=28, 1..60)
        ) {
            let events: Vec<Event> = days
                .iter()
                .enumerate()
                .map(|(i, d)| ev(&format!("2024-05-{:02}", d), &format!("event {}", i)))
                .collect();

            let by_date = partition_by_date(&events);

            prop_assert_eq!(by_date.total_events(), events.len());
            for (key, bucket) in by_date.iter() {
                for event in bucket {
                    prop_assert_eq!(event.date.as_str(), key);
                }
            }
            for event in &events {
                let hits = by_date
                    .get(&event.date)
                    .iter()
                    .filter(|e| e.title == event.title)
                    .count();
                prop_assert_eq!(hits, 1);
            }
        }
    }
}
