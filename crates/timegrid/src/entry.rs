//! Scheduled class entries.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimegridError};
use crate::time::{ClockTime, DAYS_PER_WEEK, DAY_END, DAY_START, MINUTES_PER_DAY};

/// One class block on the weekly grid.
///
/// `title`, `location` and `color` are display payload: the core passes them
/// through untouched and never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Opaque identifier, stable for the lifetime of the entry.
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Day index, 0 = Monday ... 6 = Sunday.
    pub day: u8,
    pub start: ClockTime,
    pub end: ClockTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub color: String,
}

impl ScheduleEntry {
    /// Length of the entry in minutes (negative for a malformed entry).
    pub fn duration_minutes(&self) -> i32 {
        self.end.minutes() - self.start.minutes()
    }

    /// The entry as a half-open `[start, end)` range of absolute week minutes.
    ///
    /// Performs no validation; use [`ScheduleEntry::validate`] first when the
    /// entry comes from an untrusted source.
    pub fn absolute_span(&self) -> (i32, i32) {
        let base = i32::from(self.day) * MINUTES_PER_DAY;
        (base + self.start.minutes(), base + self.end.minutes())
    }

    /// Check the entry invariants: a valid day, `start < end`, and both times
    /// inside the visible window.
    ///
    /// # Errors
    /// Returns `TimegridError::InvalidEntry` naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| TimegridError::InvalidEntry {
            id: self.id.clone(),
            message,
        };

        if self.day >= DAYS_PER_WEEK {
            return Err(invalid(format!("day {} is outside 0..=6", self.day)));
        }
        if self.start >= self.end {
            return Err(invalid(format!(
                "start {} is not before end {}",
                self.start, self.end
            )));
        }
        if self.start.minutes() < DAY_START || self.end.minutes() > DAY_END {
            return Err(invalid(format!(
                "{}-{} leaves the 08:00-22:00 window",
                self.start, self.end
            )));
        }
        Ok(())
    }
}
