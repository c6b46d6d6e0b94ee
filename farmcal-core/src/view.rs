//! Caller-owned view state and the commands that move it.
//!
//! A [`CalendarView`] is a plain value: applying a [`ViewCommand`] returns
//! the next view, after which the caller refetches events for
//! [`CalendarView::span`] and rebuilds the layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_math::shift;
use crate::error::CalendarResult;
use crate::granularity::Granularity;
use crate::label::{DateSpan, display_label, view_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn steps(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Step one unit of `granularity` in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateAction {
    pub direction: Direction,
    pub granularity: Granularity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewCommand {
    Navigate(NavigateAction),
    SetGranularity(Granularity),
    JumpTo(NaiveDate),
    /// Jump to the given "today" while keeping the granularity.
    Today(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub reference: NaiveDate,
    pub granularity: Granularity,
}

impl CalendarView {
    pub fn new(reference: NaiveDate, granularity: Granularity) -> Self {
        CalendarView {
            reference,
            granularity,
        }
    }

    pub fn apply(self, command: ViewCommand) -> CalendarResult<Self> {
        let next = match command {
            ViewCommand::Navigate(action) => CalendarView {
                reference: shift(self.reference, action.granularity, action.direction.steps())?,
                ..self
            },
            ViewCommand::SetGranularity(granularity) => CalendarView { granularity, ..self },
            ViewCommand::JumpTo(date) | ViewCommand::Today(date) => CalendarView {
                reference: date,
                ..self
            },
        };

        debug!(?command, from = %self.reference, to = %next.reference, "applied view command");
        Ok(next)
    }

    /// Step back one unit of the active granularity.
    pub fn previous(self) -> CalendarResult<Self> {
        self.apply(ViewCommand::Navigate(self.action(Direction::Previous)))
    }

    /// Step forward one unit of the active granularity.
    pub fn next(self) -> CalendarResult<Self> {
        self.apply(ViewCommand::Navigate(self.action(Direction::Next)))
    }

    pub fn with_granularity(self, granularity: Granularity) -> Self {
        CalendarView { granularity, ..self }
    }

    /// Navigate `steps` times; negative steps go backwards. Each step is a
    /// separate one-unit move, so month-end overflow compounds the way
    /// repeated clicks would.
    pub fn step(self, steps: i32) -> CalendarResult<Self> {
        let direction = if steps < 0 { Direction::Previous } else { Direction::Next };
        (0..steps.unsigned_abs()).try_fold(self, |view, _| {
            view.apply(ViewCommand::Navigate(view.action(direction)))
        })
    }

    pub fn action(&self, direction: Direction) -> NavigateAction {
        NavigateAction {
            direction,
            granularity: self.granularity,
        }
    }

    pub fn span(&self) -> CalendarResult<DateSpan> {
        view_span(self.reference, self.granularity)
    }

    pub fn label(&self) -> CalendarResult<String> {
        display_label(self.reference, self.granularity)
    }
}
