use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar range describing one instance of a budget period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Builds a window, swapping the bounds when they arrive reversed so that
    /// `start <= end` always holds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, never less than one.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// Iterates every date from `start` to `end` inclusive.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days()).map(move |offset| start + Duration::days(offset))
    }

    pub fn scope(&self, today: NaiveDate) -> WindowScope {
        if self.contains(today) {
            WindowScope::Current
        } else if self.end < today {
            WindowScope::Past
        } else {
            WindowScope::Future
        }
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Position of a window relative to today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WindowScope {
    Past,
    Current,
    Future,
}

impl fmt::Display for WindowScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WindowScope::Past => "Past",
            WindowScope::Current => "Current",
            WindowScope::Future => "Future",
        };
        f.write_str(label)
    }
}
