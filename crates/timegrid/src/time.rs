//! Clock-time model for the weekly grid.
//!
//! Times of day are zero-padded 24-hour `HH:MM` strings at the edges and plain
//! minute counts inside the engine. Overlap checks use a single linear coordinate,
//! "absolute minutes since the start of the week", computed as
//! `day * MINUTES_PER_DAY + minutes_past_midnight`.
//!
//! Every function here is pure: identical inputs always produce identical outputs.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimegridError};

/// Number of day columns on the grid (0 = Monday ... 6 = Sunday).
pub const DAYS_PER_WEEK: u8 = 7;

/// Minutes in one day; the stride between days in absolute coordinates.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// First visible minute of a day (08:00).
pub const DAY_START: i32 = 8 * 60;

/// Last visible minute of a day (22:00).
pub const DAY_END: i32 = 22 * 60;

/// Snap granularity for drag and resize, in minutes.
pub const SNAP: i32 = 15;

/// Largest valid minutes-past-midnight value (23:59).
const LAST_MINUTE: i32 = MINUTES_PER_DAY - 1;

/// Parse a zero-padded 24-hour `HH:MM` string into minutes past midnight.
///
/// # Errors
/// Returns `TimegridError::Format` unless the input is exactly five characters of
/// the form `HH:MM` with `00 <= HH <= 23` and `00 <= MM <= 59`.
pub fn time_to_minutes(hm: &str) -> Result<i32> {
    let bytes = hm.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(TimegridError::Format(hm.to_string()));
    }

    let digit = |i: usize| i32::from(bytes[i] - b'0');
    let hours = digit(0) * 10 + digit(1);
    let minutes = digit(3) * 10 + digit(4);
    if hours > 23 || minutes > 59 {
        return Err(TimegridError::Format(hm.to_string()));
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes past midnight as a zero-padded `HH:MM` string.
///
/// # Errors
/// Returns `TimegridError::Range` when `minutes` is outside `0..=1439`. Values are
/// never wrapped into the next or previous day.
pub fn minutes_to_time(minutes: i32) -> Result<String> {
    check_minutes(minutes)?;
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Absolute minutes since week start for a day index and an `HH:MM` string.
///
/// # Errors
/// Returns `TimegridError::Range` when `day` is not a valid day index and
/// `TimegridError::Format` when the time string is malformed.
pub fn absolute_start(day: u8, hm: &str) -> Result<i32> {
    check_day(day)?;
    Ok(i32::from(day) * MINUTES_PER_DAY + time_to_minutes(hm)?)
}

pub(crate) fn check_day(day: u8) -> Result<()> {
    if day >= DAYS_PER_WEEK {
        return Err(TimegridError::Range(format!(
            "day {} is outside 0..={}",
            day,
            DAYS_PER_WEEK - 1
        )));
    }
    Ok(())
}

fn check_minutes(minutes: i32) -> Result<()> {
    if !(0..=LAST_MINUTE).contains(&minutes) {
        return Err(TimegridError::Range(format!(
            "{} minutes is outside 0..={}",
            minutes, LAST_MINUTE
        )));
    }
    Ok(())
}

/// A validated time of day with minute precision.
///
/// Serializes as its `HH:MM` string so stored timetables stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build a clock time from minutes past midnight.
    ///
    /// # Errors
    /// Returns `TimegridError::Range` when `minutes` is outside `0..=1439`.
    pub fn from_minutes(minutes: i32) -> Result<Self> {
        check_minutes(minutes)?;
        Ok(Self(minutes as u16))
    }

    /// Build a clock time from an hour and a minute.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(TimegridError::Range(format!(
                "{}:{} is not a time of day",
                hour, minute
            )));
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Clamp `minutes` into the day instead of failing. Used where input must
    /// degrade rather than error, such as pointer-driven arithmetic.
    pub(crate) fn saturating(minutes: i32) -> Self {
        Self(minutes.clamp(0, LAST_MINUTE) as u16)
    }

    /// Minutes past midnight.
    pub fn minutes(self) -> i32 {
        i32::from(self.0)
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimegridError;

    fn from_str(s: &str) -> Result<Self> {
        time_to_minutes(s).map(|m| Self(m as u16))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimegridError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// Seconds and sub-second precision are truncated.
impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(t: ClockTime) -> Self {
        NaiveTime::from_hms_opt(u32::from(t.hour()), u32::from(t.minute()), 0).unwrap_or_default()
    }
}
