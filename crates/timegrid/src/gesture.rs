//! Drag and resize gestures on the weekly grid.
//!
//! A gesture turns a stream of pointer samples into a new day/start/end for one
//! entry. While the pointer is down every sample yields a [`ProvisionalEntry`],
//! which is preview data only; the authoritative entry is left alone until the
//! gesture ends, at which point [`end_gesture`] hands back the finalized entry
//! (or `None` when nothing changed). Cancelling discards the session outright.
//!
//! Pointer input never produces an error. Degenerate measurements and wild
//! deltas are clamped so a gesture always degrades to "no change" at worst.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::entry::ScheduleEntry;
use crate::layout::{block_geometry, BlockGeometry, GridMetrics};
use crate::time::{ClockTime, DAYS_PER_WEEK, DAY_END, DAY_START, MINUTES_PER_DAY, SNAP};

/// Fraction of a column width the pointer must travel sideways before the
/// entry changes day.
pub const DAY_SHIFT_THRESHOLD: f64 = 0.3;

/// Offsets beyond one day of snap slots are meaningless after clamping.
const MAX_SLOTS: f64 = (MINUTES_PER_DAY / SNAP) as f64;

const LAST_DAY: i32 = DAYS_PER_WEEK as i32 - 1;

/// What the gesture does to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureMode {
    /// Shift start and end together, possibly onto another day.
    #[default]
    Move,
    /// Drag the bottom edge: only `end` changes.
    ResizeEnd,
}

/// A pointer position in grid pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// State captured when a gesture starts. Lives only as long as the gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    entry: ScheduleEntry,
    mode: GestureMode,
    origin: Point,
    original_day: u8,
    original_start: i32,
    original_end: i32,
    /// Scale of the column the gesture started in; vertical deltas are always
    /// measured against it, even after the entry changes day.
    px_per_minute: f64,
    metrics: GridMetrics,
}

impl DragSession {
    pub fn entry_id(&self) -> &str {
        &self.entry.id
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// The entry as it was when the gesture started.
    pub fn original(&self) -> &ScheduleEntry {
        &self.entry
    }

    fn shifted_day(&self, dx: f64) -> u8 {
        let width = self.metrics.column_width;
        if !(width.is_finite() && width > 0.0) || !dx.is_finite() {
            return self.original_day;
        }
        if dx.abs() <= width * DAY_SHIFT_THRESHOLD {
            return self.original_day;
        }
        let shift = round_half_up(dx / width).clamp(-f64::from(LAST_DAY), f64::from(LAST_DAY));
        (i32::from(self.original_day) + shift as i32).clamp(0, LAST_DAY) as u8
    }

    fn snapped_offset(&self, dy: f64) -> i32 {
        let ppm = self.px_per_minute;
        if !(ppm.is_finite() && ppm > 0.0) || !dy.is_finite() {
            return 0;
        }
        let slots = round_half_up(dy / ppm / f64::from(SNAP)).clamp(-MAX_SLOTS, MAX_SLOTS);
        slots as i32 * SNAP
    }
}

/// The placement an entry would take if the gesture ended now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalEntry {
    pub id: String,
    pub day: u8,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl ProvisionalEntry {
    /// Where to draw the preview block, scaled for the target day's column.
    pub fn geometry(&self, metrics: &GridMetrics) -> BlockGeometry {
        block_geometry(
            self.start.minutes(),
            self.end.minutes(),
            metrics.px_per_minute(self.day),
        )
    }
}

/// Start a gesture on `entry`, snapshotting its placement and the grid scale.
pub fn begin_gesture(
    entry: &ScheduleEntry,
    mode: GestureMode,
    origin: Point,
    metrics: &GridMetrics,
) -> DragSession {
    debug!(
        "gesture begin: id={} mode={:?} day={} {}-{}",
        entry.id, mode, entry.day, entry.start, entry.end
    );
    DragSession {
        entry: entry.clone(),
        mode,
        origin,
        original_day: entry.day,
        original_start: entry.start.minutes(),
        original_end: entry.end.minutes(),
        px_per_minute: metrics.px_per_minute(entry.day),
        metrics: metrics.clone(),
    }
}

/// Compute the provisional placement for the current pointer position.
///
/// Pure: depends only on the session and `pointer`.
pub fn update_gesture(session: &DragSession, pointer: Point) -> ProvisionalEntry {
    let dx = pointer.x - session.origin.x;
    let dy = pointer.y - session.origin.y;
    let offset = session.snapped_offset(dy);

    let (day, start, end) = match session.mode {
        GestureMode::Move => {
            let duration = session.original_end - session.original_start;
            let start = (session.original_start + offset)
                .min(DAY_END - duration)
                .max(DAY_START);
            (session.shifted_day(dx), start, start + duration)
        }
        GestureMode::ResizeEnd => {
            let mut end = session.original_end + offset;
            if end - session.original_start < SNAP {
                end = session.original_start + SNAP;
            }
            end = end.min(DAY_END);
            (session.original_day, session.original_start, end)
        }
    };

    ProvisionalEntry {
        id: session.entry.id.clone(),
        day,
        start: ClockTime::saturating(start),
        end: ClockTime::saturating(end),
    }
}

/// Finish a gesture.
///
/// Returns the entry with the last provisional placement applied, or `None`
/// when there was no provisional placement or it matches the original one.
/// Only the final placement counts: a gesture that moved the entry and then
/// brought it back to where it started also yields `None`. The session is
/// consumed either way.
pub fn end_gesture(
    session: DragSession,
    last: Option<ProvisionalEntry>,
) -> Option<ScheduleEntry> {
    let Some(provisional) = last else {
        debug!("gesture end: id={} never moved", session.entry.id);
        return None;
    };
    if provisional.id != session.entry.id {
        warn!(
            "gesture end: provisional for '{}' does not belong to session '{}'",
            provisional.id, session.entry.id
        );
        return None;
    }
    let unchanged = provisional.day == session.original_day
        && provisional.start.minutes() == session.original_start
        && provisional.end.minutes() == session.original_end;
    if unchanged {
        debug!("gesture end: id={} unchanged", session.entry.id);
        return None;
    }

    let mut entry = session.entry;
    entry.day = provisional.day;
    entry.start = provisional.start;
    entry.end = provisional.end;
    debug!(
        "gesture end: id={} -> day={} {}-{}",
        entry.id, entry.day, entry.start, entry.end
    );
    Some(entry)
}

/// Abandon a gesture, e.g. after losing pointer capture. The entry is untouched.
pub fn cancel_gesture(session: DragSession) {
    debug!("gesture cancelled: id={}", session.entry.id);
}

/// Observable state of an [`InteractionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging(GestureMode),
}

/// Idle/Dragging state machine around the gesture functions.
///
/// Holds at most one session together with the most recent provisional
/// placement, so callers only have to forward pointer events.
#[derive(Debug, Default)]
pub struct InteractionEngine {
    session: Option<DragSession>,
    last: Option<ProvisionalEntry>,
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        match &self.session {
            Some(session) => GestureState::Dragging(session.mode),
            None => GestureState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Most recent provisional placement of the active gesture.
    pub fn provisional(&self) -> Option<&ProvisionalEntry> {
        self.last.as_ref()
    }

    /// Start a gesture. Only one gesture runs at a time; an active one is
    /// discarded as if cancelled.
    pub fn begin(
        &mut self,
        entry: &ScheduleEntry,
        mode: GestureMode,
        origin: Point,
        metrics: &GridMetrics,
    ) {
        if let Some(previous) = self.session.take() {
            warn!(
                "gesture on '{}' replaced by a new gesture on '{}'",
                previous.entry_id(),
                entry.id
            );
            cancel_gesture(previous);
        }
        self.last = None;
        self.session = Some(begin_gesture(entry, mode, origin, metrics));
    }

    /// Feed a pointer sample. Returns `None` when idle.
    pub fn update(&mut self, pointer: Point) -> Option<ProvisionalEntry> {
        let session = self.session.as_ref()?;
        let provisional = update_gesture(session, pointer);
        self.last = Some(provisional.clone());
        Some(provisional)
    }

    /// Pointer released. Returns the finalized entry to persist, if any.
    pub fn end(&mut self) -> Option<ScheduleEntry> {
        let session = self.session.take()?;
        end_gesture(session, self.last.take())
    }

    /// Drop the active gesture, if there is one. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            cancel_gesture(session);
        }
        self.last = None;
    }
}

/// Round half toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
