//! Pixel geometry of the weekly grid.
//!
//! Each day column spans `DAY_START..DAY_END` vertically. Columns may differ in
//! height, so the minute-to-pixel scale is kept per day; column width is uniform.

use serde::{Deserialize, Serialize};

use crate::time::{DAYS_PER_WEEK, DAY_END, DAY_START};

/// Column header labels, indexed by day.
pub const DAY_NAMES: [&str; DAYS_PER_WEEK as usize] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Header label for a day index, if it is one.
pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day)).copied()
}

/// Vertical scale of a column whose content area is `column_height` pixels tall.
pub fn px_per_minute(column_height: f64) -> f64 {
    column_height / f64::from(DAY_END - DAY_START)
}

/// Position of a block inside its day column, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockGeometry {
    /// Offset from the top of the column's content area.
    pub top: f64,
    pub height: f64,
}

/// Place a block spanning `start..end` (minutes past midnight) on a column with
/// the given scale.
pub fn block_geometry(start: i32, end: i32, px_per_minute: f64) -> BlockGeometry {
    BlockGeometry {
        top: f64::from(start - DAY_START) * px_per_minute,
        height: f64::from(end - start) * px_per_minute,
    }
}

/// Measurements of the rendered grid, captured when a gesture starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    /// Pixels per minute for each day column, indexed by day.
    pub px_per_minute_by_day: Vec<f64>,
    /// Width of one day column.
    pub column_width: f64,
}

impl GridMetrics {
    pub fn new(px_per_minute_by_day: Vec<f64>, column_width: f64) -> Self {
        Self {
            px_per_minute_by_day,
            column_width,
        }
    }

    /// Metrics from measured column heights and the full grid width, which is
    /// split evenly between the columns.
    pub fn from_columns(column_heights: &[f64], grid_width: f64) -> Self {
        let columns = column_heights.len().max(1) as f64;
        Self {
            px_per_minute_by_day: column_heights.iter().copied().map(px_per_minute).collect(),
            column_width: grid_width / columns,
        }
    }

    /// Seven identical columns.
    pub fn uniform(column_height: f64, grid_width: f64) -> Self {
        Self::from_columns(&[column_height; DAYS_PER_WEEK as usize], grid_width)
    }

    /// Scale of a day column, falling back to the first column when the day
    /// has no measurement and to zero when nothing was measured.
    pub fn px_per_minute(&self, day: u8) -> f64 {
        self.px_per_minute_by_day
            .get(usize::from(day))
            .or_else(|| self.px_per_minute_by_day.first())
            .copied()
            .unwrap_or(0.0)
    }
}
