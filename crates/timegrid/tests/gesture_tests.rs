//! Tests for drag/resize gestures: snapping, clamping, day changes, and the
//! provisional vs. finalized split.

use timegrid::gesture::GestureState;
use timegrid::time::{DAY_END, DAY_START, SNAP};
use timegrid::{
    begin_gesture, cancel_gesture, end_gesture, update_gesture, GestureMode, GridMetrics,
    InteractionEngine, Point, ScheduleEntry,
};

/// Helper to create an entry on `day` from `HH:MM` strings.
fn entry(day: u8, start: &str, end: &str) -> ScheduleEntry {
    ScheduleEntry {
        id: "cls_1".to_string(),
        title: "Linear Algebra".to_string(),
        day,
        start: start.parse().unwrap(),
        end: end.parse().unwrap(),
        location: "Room 101".to_string(),
        color: "#ff8800".to_string(),
    }
}

/// Seven 1680px columns (2 px per minute), each 100px wide.
fn metrics() -> GridMetrics {
    GridMetrics::uniform(1680.0, 700.0)
}

const PPM: f64 = 2.0;
const ORIGIN: Point = Point { x: 250.0, y: 400.0 };

fn at(dx: f64, dy: f64) -> Point {
    Point::new(ORIGIN.x + dx, ORIGIN.y + dy)
}

fn times(p: &timegrid::ProvisionalEntry) -> (u8, String, String) {
    (p.day, p.start.to_string(), p.end.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Move
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn move_by_one_snap_shifts_both_ends() {
    let e = entry(2, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    let down = update_gesture(&session, at(0.0, f64::from(SNAP) * PPM));
    assert_eq!(times(&down), (2, "09:15".into(), "10:15".into()));

    let up = update_gesture(&session, at(0.0, -f64::from(SNAP) * PPM));
    assert_eq!(times(&up), (2, "08:45".into(), "09:45".into()));
}

#[test]
fn move_snaps_to_nearest_slot() {
    let e = entry(0, "12:00", "13:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    // 7 minutes rounds down to no change, 8 minutes rounds up to one slot.
    assert_eq!(update_gesture(&session, at(0.0, 14.0)).start.to_string(), "12:00");
    assert_eq!(update_gesture(&session, at(0.0, 16.0)).start.to_string(), "12:15");
    // 52 minutes → 3.47 slots → 45 minutes.
    assert_eq!(update_gesture(&session, at(0.0, 104.0)).start.to_string(), "12:45");
}

#[test]
fn half_slot_rounds_toward_later_times() {
    let e = entry(0, "12:00", "13:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    // Exactly 7.5 minutes either way.
    assert_eq!(update_gesture(&session, at(0.0, 15.0)).start.to_string(), "12:15");
    assert_eq!(update_gesture(&session, at(0.0, -15.0)).start.to_string(), "12:00");
}

#[test]
fn move_clamps_to_top_of_window() {
    let e = entry(1, "08:30", "09:30");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    let p = update_gesture(&session, at(0.0, -5000.0));
    assert_eq!(times(&p), (1, "08:00".into(), "09:00".into()));
}

#[test]
fn move_clamps_to_bottom_of_window_preserving_duration() {
    let e = entry(1, "20:00", "21:30");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    let p = update_gesture(&session, at(0.0, 5000.0));
    assert_eq!(times(&p), (1, "20:30".into(), "22:00".into()));
    assert_eq!(p.end.minutes() - p.start.minutes(), 90);
}

#[test]
fn full_window_entry_cannot_move() {
    let e = entry(3, "08:00", "22:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    for dy in [-300.0, 300.0] {
        let p = update_gesture(&session, at(0.0, dy));
        assert_eq!(p.start.minutes(), DAY_START);
        assert_eq!(p.end.minutes(), DAY_END);
    }
}

#[test]
fn vertical_scale_comes_from_the_starting_column() {
    // Monday is twice as tall as the other days.
    let mut heights = [840.0; 7];
    heights[0] = 1680.0;
    let metrics = GridMetrics::from_columns(&heights, 700.0);
    let e = entry(0, "10:00", "11:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics);

    // 60px on a 2 px/min column is 30 minutes, even after crossing into Tuesday.
    let p = update_gesture(&session, at(100.0, 60.0));
    assert_eq!(times(&p), (1, "10:30".into(), "11:30".into()));

    // The preview is drawn with Tuesday's scale.
    let geometry = p.geometry(&metrics);
    assert_eq!(geometry.top, 150.0);
    assert_eq!(geometry.height, 60.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Day changes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn small_horizontal_drift_keeps_the_day() {
    let e = entry(3, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    assert_eq!(update_gesture(&session, at(30.0, 0.0)).day, 3, "exactly 30% stays");
    assert_eq!(update_gesture(&session, at(-29.0, 0.0)).day, 3);
    // Past the threshold but still rounding to zero columns.
    assert_eq!(update_gesture(&session, at(45.0, 0.0)).day, 3);
}

#[test]
fn horizontal_drag_shifts_by_rounded_columns() {
    let e = entry(3, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    assert_eq!(update_gesture(&session, at(50.0, 0.0)).day, 4);
    assert_eq!(update_gesture(&session, at(-60.0, 0.0)).day, 2);
    assert_eq!(update_gesture(&session, at(220.0, 0.0)).day, 5);
    assert_eq!(update_gesture(&session, at(-149.0, 0.0)).day, 2);
}

#[test]
fn day_is_clamped_to_the_week() {
    let sunday = entry(6, "09:00", "10:00");
    let session = begin_gesture(&sunday, GestureMode::Move, ORIGIN, &metrics());
    assert_eq!(update_gesture(&session, at(10_000.0, 0.0)).day, 6);

    let monday = entry(0, "09:00", "10:00");
    let session = begin_gesture(&monday, GestureMode::Move, ORIGIN, &metrics());
    assert_eq!(update_gesture(&session, at(-10_000.0, 0.0)).day, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Resize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resize_moves_only_the_end() {
    let e = entry(2, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::ResizeEnd, ORIGIN, &metrics());

    let p = update_gesture(&session, at(400.0, 60.0));
    assert_eq!(times(&p), (2, "09:00".into(), "10:30".into()), "day ignores dx");
}

#[test]
fn resize_never_shrinks_below_one_slot() {
    let e = entry(2, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::ResizeEnd, ORIGIN, &metrics());

    let p = update_gesture(&session, at(0.0, -400.0));
    assert_eq!(p.start.to_string(), "09:00");
    assert_eq!(p.end.to_string(), "09:15");

    let p = update_gesture(&session, at(0.0, -90.0));
    assert_eq!(p.end.to_string(), "09:15", "exactly one slot remains allowed");
}

#[test]
fn resize_stops_at_end_of_window() {
    let e = entry(2, "20:00", "21:00");
    let session = begin_gesture(&e, GestureMode::ResizeEnd, ORIGIN, &metrics());

    let p = update_gesture(&session, at(0.0, 5000.0));
    assert_eq!(p.end.minutes(), DAY_END);
}

// ─────────────────────────────────────────────────────────────────────────────
// Degenerate input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn non_finite_pointer_input_changes_nothing() {
    let e = entry(4, "11:00", "12:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());

    for p in [
        Point::new(f64::NAN, f64::NAN),
        Point::new(f64::INFINITY, f64::NEG_INFINITY),
    ] {
        assert_eq!(times(&update_gesture(&session, p)), (4, "11:00".into(), "12:00".into()));
    }
}

#[test]
fn unmeasured_grid_changes_nothing() {
    let e = entry(4, "11:00", "12:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &GridMetrics::new(vec![], 0.0));

    let p = update_gesture(&session, at(500.0, 500.0));
    assert_eq!(times(&p), (4, "11:00".into(), "12:00".into()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Ending and cancelling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn end_without_update_returns_none() {
    let e = entry(0, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());
    assert_eq!(end_gesture(session, None), None);
}

#[test]
fn end_with_unchanged_placement_returns_none() {
    let e = entry(0, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());
    let p = update_gesture(&session, at(5.0, 3.0));
    assert_eq!(end_gesture(session, Some(p)), None);
}

#[test]
fn end_applies_last_placement_and_keeps_payload() {
    let e = entry(0, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());
    let _ = update_gesture(&session, at(0.0, 30.0));
    let last = update_gesture(&session, at(100.0, 120.0));

    let finalized = end_gesture(session, Some(last)).expect("placement changed");
    assert_eq!(finalized.day, 1);
    assert_eq!(finalized.start.to_string(), "10:00");
    assert_eq!(finalized.end.to_string(), "11:00");
    assert_eq!(finalized.id, e.id);
    assert_eq!(finalized.title, e.title);
    assert_eq!(finalized.location, e.location);
    assert_eq!(finalized.color, e.color);

    // The authoritative entry was never touched.
    assert_eq!(e.start.to_string(), "09:00");
    assert_eq!(e.day, 0);
}

#[test]
fn end_ignores_provisional_from_another_entry() {
    let e = entry(0, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());
    let mut stray = update_gesture(&session, at(0.0, 60.0));
    stray.id = "someone_else".to_string();
    assert_eq!(end_gesture(session, Some(stray)), None);
}

#[test]
fn cancel_discards_session() {
    let e = entry(0, "09:00", "10:00");
    let session = begin_gesture(&e, GestureMode::Move, ORIGIN, &metrics());
    let _ = update_gesture(&session, at(0.0, 60.0));
    cancel_gesture(session);
    assert_eq!(e.start.to_string(), "09:00");
}

// ─────────────────────────────────────────────────────────────────────────────
// InteractionEngine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn engine_runs_a_full_gesture() {
    let e = entry(2, "09:00", "10:00");
    let mut engine = InteractionEngine::new();
    assert_eq!(engine.state(), GestureState::Idle);
    assert_eq!(engine.update(at(0.0, 30.0)), None, "idle engine ignores samples");

    engine.begin(&e, GestureMode::ResizeEnd, ORIGIN, &metrics());
    assert_eq!(engine.state(), GestureState::Dragging(GestureMode::ResizeEnd));
    assert_eq!(engine.session().map(|s| s.entry_id()), Some("cls_1"));

    let p = engine.update(at(0.0, 30.0)).expect("dragging");
    assert_eq!(p.end.to_string(), "10:15");
    assert_eq!(engine.provisional(), Some(&p));

    let finalized = engine.end().expect("changed");
    assert_eq!(finalized.end.to_string(), "10:15");
    assert!(!engine.is_active());
    assert_eq!(engine.provisional(), None);
    assert_eq!(engine.end(), None, "second end is a no-op");
}

#[test]
fn engine_end_without_movement_returns_none() {
    let e = entry(2, "09:00", "10:00");
    let mut engine = InteractionEngine::new();
    engine.begin(&e, GestureMode::Move, ORIGIN, &metrics());
    assert_eq!(engine.end(), None);
    assert_eq!(engine.state(), GestureState::Idle);
}

#[test]
fn engine_end_after_dragging_back_to_origin_returns_none() {
    let e = entry(2, "09:00", "10:00");
    let mut engine = InteractionEngine::new();
    engine.begin(&e, GestureMode::Move, ORIGIN, &metrics());

    let away = engine.update(at(100.0, 90.0)).expect("dragging");
    assert_eq!(times(&away), (3, "09:45".into(), "10:45".into()));
    let back = engine.update(at(2.0, -4.0)).expect("dragging");
    assert_eq!(times(&back), (2, "09:00".into(), "10:00".into()));

    assert_eq!(engine.end(), None, "only the final placement counts");
    assert_eq!(engine.state(), GestureState::Idle);
}

#[test]
fn engine_cancel_is_idempotent() {
    let e = entry(2, "09:00", "10:00");
    let mut engine = InteractionEngine::new();
    engine.cancel();

    engine.begin(&e, GestureMode::Move, ORIGIN, &metrics());
    engine.update(at(0.0, 90.0));
    engine.cancel();
    engine.cancel();

    assert_eq!(engine.state(), GestureState::Idle);
    assert_eq!(engine.end(), None);
}

#[test]
fn engine_begin_replaces_active_gesture() {
    let first = entry(2, "09:00", "10:00");
    let mut second = entry(5, "14:00", "15:00");
    second.id = "cls_2".to_string();

    let mut engine = InteractionEngine::new();
    engine.begin(&first, GestureMode::Move, ORIGIN, &metrics());
    engine.update(at(0.0, 90.0));
    engine.begin(&second, GestureMode::Move, ORIGIN, &metrics());

    assert_eq!(engine.provisional(), None, "stale preview dropped");
    engine.update(at(0.0, -60.0));
    let finalized = engine.end().expect("changed");
    assert_eq!(finalized.id, "cls_2");
    assert_eq!(finalized.start.to_string(), "13:30");
}
