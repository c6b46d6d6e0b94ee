//! Entry-type and category filters applied before partitioning.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Equality filters; `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EventFilter {
    pub fn is_empty(&self) -> bool {
        self.entry_type.is_none() && self.category.is_none()
    }

    pub fn matches(&self, event: &Event) -> bool {
        let entry_type_ok = self
            .entry_type
            .as_deref()
            .is_none_or(|wanted| event.entry_type == wanted);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|wanted| event.category.as_deref() == Some(wanted));
        entry_type_ok && category_ok
    }

    /// Matching events, in their original order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }

    /// Filter as query parameters for the events endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(entry_type) = &self.entry_type {
            pairs.push(("entry_type", entry_type.as_str()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.as_str()));
        }
        pairs
    }
}
