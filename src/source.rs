//! Where events come from: a local JSON file or the farm backend.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use farmcal_core::config::CalendarConfig;
use farmcal_core::event::{date_key, events_from_json};
use farmcal_core::label::DateSpan;
use farmcal_core::{Event, EventFilter};
use serde::Deserialize;
use tracing::info;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum EventSource {
    File(PathBuf),
    Http(String),
}

#[derive(Deserialize)]
struct ErrorResponse {
    detail: String,
}

impl EventSource {
    /// Command-line flags win over the config file.
    pub fn resolve(
        events: Option<PathBuf>,
        url: Option<String>,
        config: &CalendarConfig,
    ) -> Result<Self> {
        if let Some(path) = events {
            return Ok(EventSource::File(expand(&path)));
        }
        if let Some(url) = url {
            return Ok(EventSource::Http(url));
        }
        if let Some(path) = &config.events_file {
            return Ok(EventSource::File(expand(path)));
        }
        if let Some(url) = &config.events_url {
            return Ok(EventSource::Http(url.clone()));
        }

        anyhow::bail!(
            "No event source configured.\n\n\
            Pass one with:\n  \
            farmcal show --events events.json\n  \
            farmcal show --url http://homeassistant.local:8000/api/calendar/events\n\n\
            or set events_file / events_url in the config (see `farmcal config`)"
        )
    }

    /// Fetch events for `span`. The backend is asked to filter; the caller
    /// still applies `filter` itself so both sources behave the same.
    pub async fn fetch(&self, span: DateSpan, filter: &EventFilter) -> Result<Vec<Event>> {
        match self {
            EventSource::File(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read events from {}", path.display()))?;
                let events = events_from_json(&contents).map_err(|e| anyhow::anyhow!(e))?;
                info!(path = %path.display(), count = events.len(), "loaded events");
                Ok(events)
            }
            EventSource::Http(url) => fetch_http(url, span, filter).await,
        }
    }
}

async fn fetch_http(url: &str, span: DateSpan, filter: &EventFilter) -> Result<Vec<Event>> {
    let client = reqwest::Client::builder()
        .user_agent(format!("farmcal/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;

    let start = date_key(span.start);
    let end = date_key(span.end);
    let mut query = vec![("start_date", start.as_str()), ("end_date", end.as_str())];
    query.extend(filter.query_pairs());

    let resp = client
        .get(url)
        .query(&query)
        .send()
        .await
        .with_context(|| format!("Failed to connect to {}", url))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);
        anyhow::bail!("Backend returned HTTP {}: {}", status, detail);
    }

    let events: Vec<Event> = resp.json().await.context("Backend sent malformed events")?;
    info!(%url, count = events.len(), start = %span.start, end = %span.end, "fetched events");
    Ok(events)
}

fn expand(path: &std::path::Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
