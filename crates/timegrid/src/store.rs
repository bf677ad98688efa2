//! The caller-side timetable: an ordered entry list, JSON import/export, and a
//! file-backed store.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::conflict::ConflictReport;
use crate::entry::ScheduleEntry;
use crate::error::{Result, TimegridError};

/// Default file name for exports and the on-disk store.
pub const DEFAULT_FILE_NAME: &str = "timetable.json";

/// Authoritative list of entries, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    entries: Vec<ScheduleEntry>,
}

impl Timetable {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the entry with the same id in place, or append it.
    /// Returns `true` when an existing entry was replaced.
    pub fn upsert(&mut self, entry: ScheduleEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ScheduleEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn conflicts(&self) -> ConflictReport {
        ConflictReport::from_entries(&self.entries)
    }
}

/// Serialize entries as pretty-printed JSON.
pub fn export_json(entries: &[ScheduleEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parse an exported timetable.
///
/// # Errors
/// Returns `TimegridError::Json` for malformed JSON or entry fields,
/// `TimegridError::Import` when the document is not an array, and
/// `TimegridError::InvalidEntry` for the first entry that breaks an invariant.
pub fn import_json(json: &str) -> Result<Vec<ScheduleEntry>> {
    let entries = parse_entries(json)?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}

/// Shape check and deserialization only; entry invariants are left to the caller.
fn parse_entries(json: &str) -> Result<Vec<ScheduleEntry>> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(TimegridError::Import(
            "imported file is not an array".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// A timetable persisted as a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored entries.
    ///
    /// A missing file is an empty timetable. An unreadable or corrupt file is
    /// logged and also treated as empty so the editor always starts; saving
    /// after that replaces the file. Entries that break an invariant are
    /// skipped one by one and the rest are kept.
    pub fn load(&self) -> Vec<ScheduleEntry> {
        if !self.path.exists() {
            debug!("store {} does not exist yet", self.path.display());
            return Vec::new();
        }
        let parsed = std::fs::read_to_string(&self.path)
            .map_err(TimegridError::from)
            .and_then(|json| parse_entries(&json));
        match parsed {
            Ok(entries) => {
                let entries: Vec<ScheduleEntry> = entries
                    .into_iter()
                    .filter(|entry| match entry.validate() {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("skipping stored entry: {}", e);
                            false
                        }
                    })
                    .collect();
                debug!(
                    "loaded {} entries from {}",
                    entries.len(),
                    self.path.display()
                );
                entries
            }
            Err(e) => {
                error!("failed to load schedule from {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Load the stored entries, surfacing every failure.
    pub fn try_load(&self) -> Result<Vec<ScheduleEntry>> {
        let json = std::fs::read_to_string(&self.path)?;
        import_json(&json)
    }

    pub fn save(&self, entries: &[ScheduleEntry]) -> Result<()> {
        let json = export_json(entries)?;
        std::fs::write(&self.path, json)?;
        info!("saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}
