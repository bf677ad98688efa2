//! Headless controller for the add/edit entry form.
//!
//! The controller owns which entry is being edited and the current form values.
//! Rendering the form and binding its fields stay with the caller, which reads
//! and writes the [`EntryDraft`] and calls [`EntryEditor::submit`].

use log::debug;
use uuid::Uuid;

use crate::entry::ScheduleEntry;
use crate::error::Result;
use crate::time::ClockTime;

/// Color used for new entries.
pub const DEFAULT_COLOR: &str = "#6aa9ff";

const ID_PREFIX: &str = "cls_";
const ID_RANDOM_LEN: usize = 8;

/// Raw form values. Times stay strings until submit so a half-typed value can
/// sit in the form without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub day: u8,
    pub start: String,
    pub end: String,
    pub location: String,
    pub color: String,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            day: 0,
            start: "08:00".to_string(),
            end: "09:00".to_string(),
            location: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl EntryDraft {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            title: entry.title.clone(),
            day: entry.day,
            start: entry.start.to_string(),
            end: entry.end.to_string(),
            location: entry.location.clone(),
            color: entry.color.clone(),
        }
    }
}

/// Form state machine: closed, or open on a new or existing entry.
#[derive(Debug, Clone, Default)]
pub struct EntryEditor {
    current_edit_id: Option<String>,
    draft: EntryDraft,
    open: bool,
}

impl EntryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form pre-filled from `entry`, or blank for a new entry.
    pub fn open(&mut self, entry: Option<&ScheduleEntry>) {
        self.current_edit_id = entry.map(|e| e.id.clone());
        self.draft = entry.map(EntryDraft::from_entry).unwrap_or_default();
        self.open = true;
        debug!("editor open: editing={:?}", self.current_edit_id);
    }

    /// Close without saving.
    pub fn close(&mut self) {
        self.open = false;
        self.current_edit_id = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Id of the entry being edited; `None` when adding a new one.
    pub fn current_edit_id(&self) -> Option<&str> {
        self.current_edit_id.as_deref()
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EntryDraft {
        &mut self.draft
    }

    /// Build the entry from the form and close it.
    ///
    /// Title and location are trimmed. An edited entry keeps its id; a new one
    /// gets a fresh id from [`generate_id`].
    ///
    /// # Errors
    /// Returns `TimegridError::Format` for a malformed time field and
    /// `TimegridError::InvalidEntry` when the result breaks an entry invariant.
    /// The form stays open on error.
    pub fn submit(&mut self) -> Result<ScheduleEntry> {
        let start: ClockTime = self.draft.start.parse()?;
        let end: ClockTime = self.draft.end.parse()?;
        let entry = ScheduleEntry {
            id: self.current_edit_id.clone().unwrap_or_else(generate_id),
            title: self.draft.title.trim().to_string(),
            day: self.draft.day,
            start,
            end,
            location: self.draft.location.trim().to_string(),
            color: self.draft.color.clone(),
        };
        entry.validate()?;

        debug!("editor submit: id={}", entry.id);
        self.close();
        Ok(entry)
    }
}

/// A new random entry id such as `cls_3f9a0c1e`.
pub fn generate_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", ID_PREFIX, &random[..ID_RANDOM_LEN])
}
