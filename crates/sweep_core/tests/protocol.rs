use pretty_assertions::assert_eq;
use serde_json::json;
use sweep_core::{
    ControllerCommand, ControllerEvent, ControllerReply, DeletionStats, Msg, PersistedState,
    StatusSnapshot,
};

#[test]
fn commands_parse_from_controller_json() {
    let parsed: ControllerCommand = serde_json::from_value(json!({"type": "GET_STATUS"})).unwrap();
    assert_eq!(parsed, ControllerCommand::GetStatus);
    assert_eq!(parsed.into_msg(), None);

    let parsed: ControllerCommand = serde_json::from_value(json!({"type": "DELETE_ALL"})).unwrap();
    assert_eq!(parsed.into_msg(), Some(Msg::DeleteAllClicked));

    assert!(serde_json::from_value::<ControllerCommand>(json!({"type": "EXPLODE"})).is_err());
}

#[test]
fn status_reply_uses_camel_case() {
    let reply = ControllerReply::Status(StatusSnapshot {
        is_enabled: true,
        selected_count: 4,
        total_videos: 10,
        is_deleting: false,
    });
    assert_eq!(
        serde_json::to_value(reply).unwrap(),
        json!({"isEnabled": true, "selectedCount": 4, "totalVideos": 10, "isDeleting": false})
    );
    assert_eq!(
        serde_json::to_value(ControllerReply::Ack { success: true }).unwrap(),
        json!({"success": true})
    );
}

#[test]
fn lifecycle_events_match_controller_names() {
    let events = [
        ControllerEvent::DeleteStarted { count: 3 },
        ControllerEvent::DeleteProgress { current: 1, total: 3 },
        ControllerEvent::DeleteCompleted { count: 3 },
        ControllerEvent::DeleteCancelled { deleted_count: 1 },
    ];
    let values: Vec<_> = events
        .iter()
        .map(|event| serde_json::to_value(event).unwrap())
        .collect();
    assert_eq!(
        values,
        vec![
            json!({"type": "DELETE_STARTED", "count": 3}),
            json!({"type": "DELETE_PROGRESS", "current": 1, "total": 3}),
            json!({"type": "DELETE_COMPLETED", "count": 3}),
            json!({"type": "DELETE_CANCELLED", "deletedCount": 1}),
        ]
    );
}

#[test]
fn persisted_state_tolerates_missing_fields() {
    let state: PersistedState = serde_json::from_value(json!({"selectedIds": ["a", "b"]})).unwrap();
    assert!(!state.is_enabled);
    assert_eq!(state.selected_ids, vec!["a", "b"]);
}

#[test]
fn statistics_accumulate_per_day() {
    let mut stats = DeletionStats::default();
    stats.record("2026-10-17", 3);
    stats.record("2026-10-18", 2);
    stats.record("2026-10-18", 0);
    stats.record("2026-10-18", 4);
    assert_eq!(stats.on_day("2026-10-18"), 6);
    assert_eq!(stats.on_day("2026-10-16"), 0);
    assert_eq!(stats.total, 9);
}
