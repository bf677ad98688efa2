//! # timegrid
//!
//! UI-independent core of a weekly timetable editor.
//!
//! Class blocks live on a 7-day grid between 08:00 and 22:00. This crate owns the
//! arithmetic behind that grid: clock-time parsing, the linear "minutes since week
//! start" coordinate, sweep-line overlap detection, and the snapping and clamping
//! that turn pointer movement into a new day/start/end for a dragged or resized
//! block. Rendering, form bindings and theming stay with the caller.
//!
//! ## Modules
//!
//! - [`time`] — Clock-time conversions, `ClockTime`, and the scheduling constants
//! - [`entry`] — `ScheduleEntry` and its invariants
//! - [`conflict`] — Detect overlapping entries with an O(n log n) sweep
//! - [`gesture`] — Drag/resize state machine with provisional vs. finalized results
//! - [`layout`] — Pixel geometry of the grid columns and blocks
//! - [`editor`] — Headless add/edit form controller
//! - [`store`] — In-memory timetable, JSON import/export, file persistence
//! - [`error`] — Error types

pub mod conflict;
pub mod editor;
pub mod entry;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod store;
pub mod time;

pub use conflict::{find_conflicts, Conflict, ConflictReport};
pub use editor::{EntryDraft, EntryEditor};
pub use entry::ScheduleEntry;
pub use error::TimegridError;
pub use gesture::{
    begin_gesture, cancel_gesture, end_gesture, update_gesture, DragSession, GestureMode,
    GestureState, InteractionEngine, Point, ProvisionalEntry,
};
pub use layout::{BlockGeometry, GridMetrics};
pub use store::{export_json, import_json, FileStore, Timetable};
pub use time::{absolute_start, minutes_to_time, time_to_minutes, ClockTime};
