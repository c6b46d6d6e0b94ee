//! Farm calendar events as delivered by the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CalendarError, CalendarResult};

/// ISO date format used for event dates and bucket keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar entry (health treatment, maintenance job, breeding record, ...).
///
/// Events are owned by the caller and only ever read by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Calendar date as `YYYY-MM-DD`. Kept as the raw string so partitioning
    /// keys on exactly what the backend sent.
    pub date: String,
    pub title: String,
    pub entry_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Any other fields the backend attached, preserved untouched.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Event {
    pub fn new(date: impl Into<String>, title: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Event {
            date: date.into(),
            title: title.into(),
            entry_type: entry_type.into(),
            category: None,
            payload: Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Parse the event's date field.
    pub fn naive_date(&self) -> CalendarResult<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Format a date the way event dates are keyed.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a JSON array of events.
pub fn events_from_json(json: &str) -> CalendarResult<Vec<Event>> {
    serde_json::from_str(json).map_err(|e| CalendarError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_keeps_unknown_fields() {
        let json = r#"[{
            "date": "2024-03-17",
            "title": "Vaccinate",
            "entry_type": "health",
            "category": "livestock",
            "animal_id": 42,
            "notes": "booster"
        }]"#;

        let events = events_from_json(json).expect("Should parse");
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.date, "2024-03-17");
        assert_eq!(event.category.as_deref(), Some("livestock"));
        assert_eq!(event.payload.get("animal_id"), Some(&Value::from(42)));
        assert_eq!(event.payload.get("notes"), Some(&Value::from("booster")));
        assert!(!event.payload.contains_key("title"));
    }

    #[test]
    fn test_naive_date_rejects_non_iso() {
        let event = Event::new("03/17/2024", "Vaccinate", "health");
        let err = event.naive_date().expect_err("Should reject");
        assert!(matches!(err, CalendarError::InvalidDate(ref s) if s == "03/17/2024"));

        let event = Event::new("2024-03-17", "Vaccinate", "health");
        assert_eq!(
            event.naive_date().expect("Should parse"),
            NaiveDate::from_ymd_opt(2024, 3, 17).expect("valid date")
        );
    }

    #[test]
    fn test_events_from_json_reports_missing_fields() {
        let err = events_from_json(r#"[{"date": "2024-03-17"}]"#).expect_err("Should fail");
        assert!(matches!(err, CalendarError::Serialization(_)));
    }
}
