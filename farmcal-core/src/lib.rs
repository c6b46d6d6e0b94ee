//! Calendar view builder for farm events.
//!
//! This crate turns a reference date, a [`Granularity`] and a list of
//! [`Event`]s into a renderable [`Layout`]:
//! - `partition` groups events into per-date buckets
//! - `builder` produces day/week/month/year layouts
//! - `view` holds the caller-owned navigation state and its commands
//!
//! Nothing here performs I/O except `config`, which reads the user's
//! `config.toml`.

pub mod builder;
pub mod config;
pub mod date_math;
pub mod error;
pub mod event;
pub mod filter;
pub mod granularity;
pub mod label;
pub mod layout;
pub mod partition;
pub mod view;

pub use builder::{CalendarViewBuilder, DaylightHours};
pub use error::{CalendarError, CalendarResult};
pub use event::Event;
pub use filter::EventFilter;
pub use granularity::Granularity;
pub use layout::Layout;
pub use partition::{EventsByDate, partition_by_date};
pub use view::{CalendarView, Direction, NavigateAction, ViewCommand};
