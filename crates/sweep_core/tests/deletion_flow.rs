use pretty_assertions::assert_eq;
use sweep_core::{
    update, AppState, ControllerEvent, DeleteScope, DeletionProgress, DeletionSummary, Effect,
    Item, Msg, Notice,
};

fn init_logging() {
    sweep_logging::initialize_for_tests();
}

fn scanned(count: usize) -> AppState {
    let items = (0..count)
        .map(|pos| Item {
            id: format!("v{}", pos + 1),
            display_index: Some(pos as u32 + 1),
            title: format!("Video {}", pos + 1),
            channel_name: String::new(),
            position: pos,
        })
        .collect();
    let (state, _) = update(AppState::new(), Msg::ItemsScanned(items));
    let (state, _) = update(state, Msg::ToggleModeClicked);
    state
}

fn emitted(effects: &[Effect]) -> Vec<ControllerEvent> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Emit(event) => Some(*event),
            _ => None,
        })
        .collect()
}

fn started_targets(effects: &[Effect]) -> Option<Vec<String>> {
    effects.iter().find_map(|effect| match effect {
        Effect::StartDeletion { targets } => {
            Some(targets.iter().map(|item| item.id.clone()).collect())
        }
        _ => None,
    })
}

fn start_selected(state: AppState, ids: &[&str]) -> (AppState, Vec<Effect>) {
    let mut state = state;
    for id in ids {
        let (next, _) = update(state, Msg::ItemToggled { id: id.to_string() });
        state = next;
    }
    let (state, _) = update(state, Msg::DeleteSelectedClicked);
    update(state, Msg::DeletionConfirmed)
}

#[test]
fn delete_selected_asks_for_confirmation_first() {
    init_logging();
    let state = scanned(3);
    let (state, _) = update(state, Msg::ItemToggled { id: "v2".into() });
    let (state, effects) = update(state, Msg::DeleteSelectedClicked);

    assert_eq!(
        effects.last(),
        Some(&Effect::RequestConfirmation {
            scope: DeleteScope::Selected,
            count: 1
        })
    );
    assert!(started_targets(&effects).is_none());
    assert!(!state.is_deleting());
    assert_eq!(state.view().pending_confirmation.map(|p| p.count), Some(1));
}

#[test]
fn declining_keeps_selection() {
    init_logging();
    let state = scanned(2);
    let (state, _) = update(state, Msg::ItemToggled { id: "v1".into() });
    let (state, _) = update(state, Msg::DeleteSelectedClicked);
    let (state, effects) = update(state, Msg::DeletionDeclined);

    assert_eq!(effects, vec![Effect::Notify(Notice::DeletionDeclined)]);
    assert!(state.selection().contains("v1"));
    assert!(state.view().pending_confirmation.is_none());

    // A stray confirmation after declining starts nothing.
    let (state, effects) = update(state, Msg::DeletionConfirmed);
    assert!(effects.is_empty());
    assert!(!state.is_deleting());
}

#[test]
fn confirming_starts_job_in_page_order() {
    init_logging();
    let (state, effects) = start_selected(scanned(4), &["v3", "v1"]);

    assert!(state.is_deleting());
    assert_eq!(started_targets(&effects), Some(vec!["v1".to_string(), "v3".to_string()]));
    assert_eq!(emitted(&effects), vec![ControllerEvent::DeleteStarted { count: 2 }]);
    assert!(state.status().is_deleting);
}

#[test]
fn delete_selected_without_selection_is_refused() {
    init_logging();
    let (_, effects) = update(scanned(2), Msg::DeleteSelectedClicked);
    assert_eq!(effects, vec![Effect::Notify(Notice::NoSelection)]);
}

#[test]
fn delete_all_targets_visible_items_only() {
    init_logging();
    let (state, _) = update(scanned(5), Msg::RangeFilterChanged("4-".into()));
    let (state, effects) = update(state, Msg::DeleteAllClicked);
    assert!(effects.contains(&Effect::RequestConfirmation {
        scope: DeleteScope::AllVisible,
        count: 2
    }));
    let (_, effects) = update(state, Msg::DeletionConfirmed);
    assert_eq!(started_targets(&effects), Some(vec!["v4".to_string(), "v5".to_string()]));
}

#[test]
fn second_job_is_rejected_while_one_runs() {
    init_logging();
    let (state, _) = start_selected(scanned(3), &["v1"]);
    let progress = DeletionProgress {
        cursor: 0,
        total: 1,
        succeeded: 0,
        failed: 0,
    };

    let (state, effects) = update(state, Msg::DeleteAllClicked);
    assert_eq!(effects, vec![Effect::Notify(Notice::DeletionBusy)]);
    assert_eq!(state.view().deletion, Some(progress));
    assert!(state.view().pending_confirmation.is_none());

    let (state, effects) = update(state, Msg::DeleteSelectedClicked);
    assert_eq!(effects, vec![Effect::Notify(Notice::DeletionBusy)]);
    assert_eq!(state.view().deletion, Some(progress));
}

#[test]
fn progress_is_forwarded_on_every_step() {
    init_logging();
    let (state, _) = start_selected(scanned(3), &["v1", "v2", "v3"]);
    let mut state = state;
    for (cursor, failed) in [(1, 0), (2, 1), (3, 1)] {
        let progress = DeletionProgress {
            cursor,
            total: 3,
            succeeded: cursor - failed,
            failed,
        };
        let (next, effects) = update(state, Msg::DeletionProgress(progress));
        assert_eq!(
            emitted(&effects),
            vec![ControllerEvent::DeleteProgress { current: cursor, total: 3 }]
        );
        assert_eq!(next.view().deletion, Some(progress));
        state = next;
    }
    assert_eq!(state.view().deletion.map(|p| p.percent()), Some(100));
}

#[test]
fn finishing_clears_selection_and_reports_once() {
    init_logging();
    let (state, _) = start_selected(scanned(3), &["v1", "v2", "v3"]);
    let summary = DeletionSummary {
        succeeded: 2,
        failed: 1,
        total: 3,
        cursor: 3,
        cancelled: false,
    };
    let (state, effects) = update(state, Msg::DeletionFinished(summary));

    assert!(!state.is_deleting());
    assert!(state.selection().is_empty());
    let summaries: Vec<_> = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Notify(_)))
        .collect();
    assert_eq!(
        summaries,
        vec![&Effect::Notify(Notice::DeletionFinished {
            succeeded: 2,
            failed: 1,
            total: 3
        })]
    );
    assert_eq!(
        Notice::DeletionFinished {
            succeeded: 2,
            failed: 1,
            total: 3
        }
        .to_string(),
        "Removal finished: 2 succeeded, 1 failed (of 3)"
    );
    assert_eq!(emitted(&effects), vec![ControllerEvent::DeleteCompleted { count: 2 }]);
    assert!(effects.contains(&Effect::RecordStatistics { removed: 2 }));
    assert!(effects.contains(&Effect::RequestScan));
    assert!(state.view().enabled);
}

#[test]
fn cancel_is_forwarded_and_reported_separately() {
    init_logging();
    let (state, _) = start_selected(scanned(4), &["v1", "v2", "v3", "v4"]);
    let (state, effects) = update(state, Msg::CancelClicked);
    assert_eq!(
        effects,
        vec![
            Effect::CancelDeletion,
            Effect::Notify(Notice::CancelRequested)
        ]
    );

    let (state, effects) = update(
        state,
        Msg::DeletionFinished(DeletionSummary {
            succeeded: 1,
            failed: 0,
            total: 4,
            cursor: 1,
            cancelled: true,
        }),
    );
    assert!(!state.is_deleting());
    assert!(state.selection().is_empty());
    assert_eq!(
        emitted(&effects),
        vec![ControllerEvent::DeleteCancelled { deleted_count: 1 }]
    );
    assert!(effects.contains(&Effect::Notify(Notice::DeletionCancelled {
        succeeded: 1,
        failed: 0,
        total: 4
    })));
}

#[test]
fn cancel_without_job_is_a_notice() {
    init_logging();
    let (_, effects) = update(scanned(1), Msg::CancelClicked);
    assert_eq!(effects, vec![Effect::Notify(Notice::NothingToCancel)]);
}

#[test]
fn nothing_removed_records_no_statistics() {
    init_logging();
    let (state, _) = start_selected(scanned(1), &["v1"]);
    let (_, effects) = update(
        state,
        Msg::DeletionFinished(DeletionSummary {
            succeeded: 0,
            failed: 1,
            total: 1,
            cursor: 1,
            cancelled: false,
        }),
    );
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::RecordStatistics { .. })));
}
