//! WASM bindings for timegrid.
//!
//! Exposes conflict detection, clock-time conversion, block geometry and the
//! drag/resize engine to the browser grid via `wasm-bindgen`. Entries cross the
//! boundary as JSON strings in the same shape as an exported timetable.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timegrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/timegrid_wasm.wasm
//! ```

use serde::Serialize;
use timegrid::layout::{block_geometry, px_per_minute};
use timegrid::{
    ClockTime, Conflict, ConflictReport, GestureMode, GridMetrics, InteractionEngine, Point,
    ProvisionalEntry, ScheduleEntry,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ConflictReportDto<'a> {
    conflicts: &'a [Conflict],
    conflicting_ids: Vec<&'a str>,
    announcement: String,
}

#[derive(Serialize)]
struct ProvisionalDto<'a> {
    #[serde(flatten)]
    entry: &'a ProvisionalEntry,
    top: f64,
    height: f64,
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn parse_entries(json: &str) -> Result<Vec<ScheduleEntry>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid entries JSON: {}", e))
}

fn parse_mode(mode: &str) -> Result<GestureMode, String> {
    match mode {
        "move" => Ok(GestureMode::Move),
        "resize" | "resize_end" | "resize-end" => Ok(GestureMode::ResizeEnd),
        other => Err(format!(
            "Unknown gesture mode '{}': expected 'move' or 'resize'",
            other
        )),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn conflicts_json(entries_json: &str) -> Result<String, String> {
    let entries = parse_entries(entries_json)?;
    let report = ConflictReport::from_entries(&entries);
    to_json(&ConflictReportDto {
        conflicts: &report.conflicts,
        conflicting_ids: report.conflicting_ids.iter().map(String::as_str).collect(),
        announcement: report.announcement(),
    })
}

fn geometry_json(start: &str, end: &str, column_height: f64) -> Result<String, String> {
    let start: ClockTime = start.parse().map_err(|e| format!("{}", e))?;
    let end: ClockTime = end.parse().map_err(|e| format!("{}", e))?;
    to_json(&block_geometry(
        start.minutes(),
        end.minutes(),
        px_per_minute(column_height),
    ))
}

fn provisional_json(provisional: &ProvisionalEntry, metrics: &GridMetrics) -> Result<String, String> {
    let geometry = provisional.geometry(metrics);
    to_json(&ProvisionalDto {
        entry: provisional,
        top: geometry.top,
        height: geometry.height,
    })
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find overlapping entries.
///
/// `entries_json` must be a JSON array of entries (`id`, `day`, `start`, `end`,
/// and optional `title`, `location`, `color`). Returns a JSON object with
/// `conflicts` (`id_a`, `id_b`, `overlap_minutes`), `conflicting_ids` and the
/// live-region `announcement` text.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(entries_json: &str) -> Result<String, JsValue> {
    conflicts_json(entries_json).map_err(|e| JsValue::from_str(&e))
}

/// Parse `HH:MM` into minutes past midnight.
#[wasm_bindgen(js_name = "timeToMinutes")]
pub fn time_to_minutes(hm: &str) -> Result<i32, JsValue> {
    timegrid::time_to_minutes(hm).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format minutes past midnight as `HH:MM`.
#[wasm_bindgen(js_name = "minutesToTime")]
pub fn minutes_to_time(minutes: i32) -> Result<String, JsValue> {
    timegrid::minutes_to_time(minutes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Position of a `start`-`end` block in a column `column_height` pixels tall.
/// Returns `{top, height}` as JSON.
#[wasm_bindgen(js_name = "blockGeometry")]
pub fn block_geometry_json(start: &str, end: &str, column_height: f64) -> Result<String, JsValue> {
    geometry_json(start, end, column_height).map_err(|e| JsValue::from_str(&e))
}

/// Pointer-gesture driver for one grid.
///
/// Call `begin` on pointerdown, `update` on every pointermove (returns the
/// preview placement plus its `top`/`height`), `end` on pointerup (returns the
/// entry to persist, or `undefined`), and `cancel` on lost pointer capture.
#[wasm_bindgen]
#[derive(Default)]
pub struct GestureController {
    engine: InteractionEngine,
}

impl GestureController {
    fn begin_impl(
        &mut self,
        entry_json: &str,
        mode: &str,
        x: f64,
        y: f64,
        px_per_minute_by_day: Vec<f64>,
        column_width: f64,
    ) -> Result<(), String> {
        let entry: ScheduleEntry =
            serde_json::from_str(entry_json).map_err(|e| format!("Invalid entry JSON: {}", e))?;
        let mode = parse_mode(mode)?;
        let metrics = GridMetrics::new(px_per_minute_by_day, column_width);
        self.engine.begin(&entry, mode, Point::new(x, y), &metrics);
        Ok(())
    }

    fn update_impl(&mut self, x: f64, y: f64) -> Result<Option<String>, String> {
        let Some(provisional) = self.engine.update(Point::new(x, y)) else {
            return Ok(None);
        };
        match self.engine.session() {
            Some(session) => provisional_json(&provisional, session.metrics()).map(Some),
            None => Ok(None),
        }
    }

    fn end_impl(&mut self) -> Result<Option<String>, String> {
        self.engine.end().map(|entry| to_json(&entry)).transpose()
    }
}

#[wasm_bindgen]
impl GestureController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture. `mode` is `"move"` or `"resize"`; `px_per_minute_by_day`
    /// holds the vertical scale of each day column.
    pub fn begin(
        &mut self,
        entry_json: &str,
        mode: &str,
        x: f64,
        y: f64,
        px_per_minute_by_day: Vec<f64>,
        column_width: f64,
    ) -> Result<(), JsValue> {
        self.begin_impl(entry_json, mode, x, y, px_per_minute_by_day, column_width)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn update(&mut self, x: f64, y: f64) -> Result<Option<String>, JsValue> {
        self.update_impl(x, y).map_err(|e| JsValue::from_str(&e))
    }

    pub fn end(&mut self) -> Result<Option<String>, JsValue> {
        self.end_impl().map_err(|e| JsValue::from_str(&e))
    }

    pub fn cancel(&mut self) {
        self.engine.cancel();
    }

    #[wasm_bindgen(js_name = "isActive")]
    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }
}
