//! Detect overlapping entries on the weekly grid.
//!
//! Entries are mapped to half-open `[s, e)` intervals in absolute week minutes,
//! sorted by start, and swept once from left to right. Entries that touch
//! (one ends exactly when the next starts) are NOT conflicts.
//!
//! The sweep compares each interval only against the furthest-reaching interval
//! seen so far. Any interval that overlaps an earlier one also overlaps that
//! furthest-reaching one, so every conflicting entry is reported at least once,
//! but two short intervals nested inside a longer one are each reported against
//! the long interval and never against each other.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::entry::ScheduleEntry;

/// A detected overlap between two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The furthest-reaching entry at the point of overlap.
    pub id_a: String,
    /// The entry whose start fell inside `id_a`.
    pub id_b: String,
    pub overlap_minutes: i32,
}

impl Conflict {
    /// The pair as an order-independent key, smaller id first.
    pub fn unordered(&self) -> (&str, &str) {
        if self.id_a <= self.id_b {
            (self.id_a.as_str(), self.id_b.as_str())
        } else {
            (self.id_b.as_str(), self.id_a.as_str())
        }
    }

    pub fn involves(&self, id: &str) -> bool {
        self.id_a == id || self.id_b == id
    }
}

struct Interval<'a> {
    id: &'a str,
    s: i32,
    e: i32,
}

/// Find overlapping entries with a sort-and-sweep in O(n log n).
///
/// Each reported pair appears once. Ties on start are ordered by end and then
/// by id, so permuting the input never changes the set of reported pairs.
/// Entries on different days never conflict, since days sit 1440 minutes apart
/// in absolute coordinates. Entry invariants are not checked here; malformed
/// entries give unspecified (but safe) results.
pub fn find_conflicts(entries: &[ScheduleEntry]) -> Vec<Conflict> {
    let mut intervals: Vec<Interval<'_>> = entries
        .iter()
        .map(|entry| {
            let (s, e) = entry.absolute_span();
            Interval {
                id: &entry.id,
                s,
                e,
            }
        })
        .collect();

    intervals.sort_by(|a, b| (a.s, a.e, a.id).cmp(&(b.s, b.e, b.id)));

    let mut conflicts = Vec::new();
    let mut furthest: Option<&Interval<'_>> = None;

    for cur in &intervals {
        if let Some(open) = furthest {
            if cur.s < open.e {
                conflicts.push(Conflict {
                    id_a: open.id.to_string(),
                    id_b: cur.id.to_string(),
                    overlap_minutes: open.e.min(cur.e) - cur.s,
                });
            }
        }
        if furthest.is_none_or(|open| cur.e > open.e) {
            furthest = Some(cur);
        }
    }

    debug!(
        "conflict sweep: {} entries, {} conflicts",
        entries.len(),
        conflicts.len()
    );
    conflicts
}

/// Conflicts plus the derived data a renderer needs: which blocks to
/// highlight and what to announce to assistive technology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
    /// Every id that takes part in at least one conflict.
    pub conflicting_ids: BTreeSet<String>,
}

impl ConflictReport {
    pub fn from_entries(entries: &[ScheduleEntry]) -> Self {
        let conflicts = find_conflicts(entries);
        let conflicting_ids = conflicts
            .iter()
            .flat_map(|c| [c.id_a.clone(), c.id_b.clone()])
            .collect();
        Self {
            conflicts,
            conflicting_ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn is_conflicting(&self, id: &str) -> bool {
        self.conflicting_ids.contains(id)
    }

    /// Live-region text; empty when there is nothing to report.
    pub fn announcement(&self) -> String {
        if self.conflicts.is_empty() {
            String::new()
        } else {
            format!("Warning: {} conflict(s) detected", self.conflicts.len())
        }
    }
}
