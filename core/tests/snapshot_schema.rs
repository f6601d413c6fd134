use twogether_core::{is_valid_room_code, Phase, RoomCode, RoomCodeError, Session};

#[test]
fn snapshots_serialize_with_the_stored_field_names() {
    let mut session = Session::new("session-1", "ABCDEF", 42);
    session.current_phase = Phase::Playing;
    session.started_at = Some(100);
    let raw = serde_json::to_string(&session).unwrap();
    assert!(raw.contains("\"sessionId\":\"session-1\""));
    assert!(raw.contains("\"currentPhase\":\"playing\""));
    assert!(raw.contains("\"roomsCompleted\""));
    assert!(raw.contains("\"totalPauseTime\""));
}

#[test]
fn snapshots_round_trip_deep_equal() {
    let mut session = Session::new("session-1", "ABCDEF", 42);
    session.current_phase = Phase::Paused;
    session.started_at = Some(1_000);
    session.paused_at = Some(5_000);
    session.time_limit = Some(60_000);
    twogether_core::progression::record_attempt(&mut session, "music_box");
    twogether_core::progression::solve(&mut session, "music_box");
    twogether_core::hints::use_hint(&mut session, "music_box", 1, 2_000);

    let raw = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, session);
}

#[test]
fn missing_fields_merge_over_defaults() {
    let raw = r#"{"sessionId":"session-1","roomCode":"ABCDEF","currentPhase":"playing"}"#;
    let restored: Session = serde_json::from_str(raw).unwrap();
    assert_eq!(restored.session_id, "session-1");
    assert_eq!(restored.current_phase, Phase::Playing);
    assert_eq!(restored.current_room, "attic");
    assert_eq!(restored.total_pause_time, 0);
    assert!(restored.puzzle_states.is_empty());
    assert!(restored.time_limit.is_none());
}

#[test]
fn unknown_fields_are_tolerated() {
    let raw = r#"{"sessionId":"session-1","futureFeature":{"nested":true}}"#;
    let restored: Session = serde_json::from_str(raw).unwrap();
    assert_eq!(restored.session_id, "session-1");
}

#[test]
fn room_codes_normalize_and_validate() {
    let code = RoomCode::parse(" abcdef ").unwrap();
    assert_eq!(code.as_str(), "ABCDEF");
    assert!(is_valid_room_code("ABCDEF"));
    assert!(!is_valid_room_code("ABCDE"));

    assert_eq!(
        RoomCode::parse("ABC"),
        Err(RoomCodeError::InvalidLength {
            expected: 6,
            found: 3,
        })
    );
    assert!(matches!(
        RoomCode::parse("ABCDE0"),
        Err(RoomCodeError::InvalidCharacter { ch: '0', index: 5 })
    ));
}
