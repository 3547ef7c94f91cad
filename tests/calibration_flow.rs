//! End-to-end: calibrate an unknown pad, persist the map, query it back

use padmap::input::{classify, RawButton, RawDeviceState};
use padmap::mapping::{Database, Destination, Origin};

const PAD_ID: &str = "0810-0001-USB Gamepad";

fn idle_pad() -> RawDeviceState {
    RawDeviceState {
        axes: vec![0.0; 4],
        buttons: vec![RawButton::default(); 12],
        connected: true,
        timestamp: 42.0,
        id: PAD_ID.to_string(),
        mapping: String::new(),
        index: 0,
    }
}

/// One calibration prompt: what the user was asked for and what they did
fn actuate(
    destination: Destination,
    act: impl Fn(&mut RawDeviceState),
) -> (Destination, RawDeviceState) {
    let mut state = idle_pad();
    act(&mut state);
    (destination, state)
}

fn calibration_session() -> Vec<(Destination, RawDeviceState)> {
    vec![
        actuate(Destination::A, |s| s.buttons[2] = RawButton::new(true, 1.0)),
        actuate(Destination::B, |s| s.buttons[1] = RawButton::new(true, 1.0)),
        actuate(Destination::Start, |s| s.buttons[9] = RawButton::new(true, 1.0)),
        actuate(Destination::LeftTrigger, |s| s.buttons[6] = RawButton::new(true, 0.7)),
        actuate(Destination::LeftLeft, |s| s.axes[0] = -0.95),
        actuate(Destination::LeftRight, |s| s.axes[0] = 0.97),
        actuate(Destination::LeftUp, |s| s.axes[1] = -0.9),
        actuate(Destination::LeftDown, |s| s.axes[1] = 0.92),
        // Right stick on inverted axes 3 (x) and 2 (y)
        actuate(Destination::RightLeft, |s| s.axes[3] = 0.8),
        actuate(Destination::RightRight, |s| s.axes[3] = -0.85),
        // User hesitated: jitter only, nothing recorded
        actuate(Destination::RightUp, |s| s.axes[2] = 0.2),
    ]
}

fn calibrate() -> Database {
    let mut bindings = Vec::new();

    for (destination, state) in calibration_session() {
        let snapshot = vec![Some(state)];
        let db = Database::new();
        let classified = classify(&snapshot, &db);
        assert_eq!(classified.unknown.len(), 1, "pad must be unknown while calibrating");

        if let Some(detection) = classified.unknown[0].estimate_origin() {
            bindings.push((destination, detection.origin));
        }
    }

    Database::new().with_mapping(PAD_ID, bindings)
}

#[test]
fn test_calibrated_map_is_stored_decoupled() {
    let db = calibrate();
    assert_eq!(
        db.get_encoded(PAD_ID),
        Some("a:b2,b:b1,leftdown:a1,leftright:a0,lefttrigger:b6,rightright:-a3,start:b9")
    );
}

#[test]
fn test_persisted_map_answers_queries() {
    let text = calibrate().encode();
    let report = Database::decode(&text);
    assert_eq!(report.dropped_lines, 0);
    let db = report.database;

    let mut state = idle_pad();
    state.buttons[2] = RawButton::new(true, 1.0);
    state.buttons[6] = RawButton::new(false, 0.4);
    state.axes[0] = -0.5;
    state.axes[1] = 0.25;
    state.axes[3] = -0.6;
    let snapshot = vec![None, Some(state)];

    let classified = classify(&snapshot, &db);
    assert!(classified.unknown.is_empty());
    let pad = &classified.known[0];

    assert!(pad.a());
    assert!(!pad.b());
    assert!(!pad.start());
    assert_eq!(pad.left_trigger(), 0.4);
    assert!(!pad.pressed(Destination::LeftTrigger));
    assert_eq!(pad.left_x(), -0.5);
    assert_eq!(pad.left_y(), -0.25);
    assert_eq!(pad.right_x(), 0.6);
    assert_eq!(pad.right_y(), 0.0);
    assert_eq!(pad.origin(Destination::RightUp), None);
}

#[test]
fn test_recalibration_replaces_previous_map() {
    let db = calibrate();
    let db = db.with_mapping(PAD_ID, [(Destination::A, Origin::button(0))]);

    assert_eq!(db.len(), 1);
    assert_eq!(db.get_encoded(PAD_ID), Some("a:b0"));
}

#[test]
fn test_standard_pad_needs_no_calibration() {
    let state = RawDeviceState {
        axes: vec![0.0, -1.0, 0.0, 0.0],
        buttons: {
            let mut b = vec![RawButton::default(); 17];
            b[12] = RawButton::new(true, 1.0);
            b[7] = RawButton::new(true, 0.9);
            b
        },
        connected: true,
        timestamp: 7.0,
        id: "Xbox 360 Controller (XInput STANDARD GAMEPAD)".to_string(),
        mapping: "standard".to_string(),
        index: 2,
    };
    let snapshot = vec![None, None, Some(state)];
    let db = Database::new();

    let classified = classify(&snapshot, &db);
    let pad = classified.known_by_index(2).unwrap();
    assert!(pad.dpad_up());
    assert_eq!(pad.dpad_y(), 1);
    assert_eq!(pad.right_trigger(), 0.9);
    assert_eq!(pad.left_y(), 1.0);
}

#[test]
fn test_calibrate_alongside_known_devices() {
    let mut db = Database::new().with_mapping("Known Pad", [(Destination::A, Origin::button(0))]);

    let mut known = idle_pad();
    known.id = "Known Pad".to_string();
    known.buttons[0] = RawButton::new(true, 1.0);
    let mut fresh = idle_pad();
    fresh.index = 1;
    fresh.buttons[4] = RawButton::new(true, 1.0);
    let snapshot = vec![Some(known), Some(fresh)];

    // Detections outlive the classification that borrowed the database
    let mut detected = Vec::new();
    {
        let classified = classify(&snapshot, &db);
        assert!(classified.known_by_index(0).unwrap().a());
        for pad in &classified.unknown {
            if let Some(detection) = pad.estimate_origin() {
                detected.push((pad.id().to_string(), detection.origin));
            }
        }
    }

    for (id, origin) in detected {
        db = db.with_mapping(&id, [(Destination::A, origin)]);
    }

    assert_eq!(db.get_encoded(PAD_ID), Some("a:b4"));
    let classified = classify(&snapshot, &db);
    assert_eq!(classified.known.len(), 2);
    assert!(classified.unknown.is_empty());
}
