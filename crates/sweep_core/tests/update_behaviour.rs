use std::sync::Once;

use pretty_assertions::assert_eq;
use sweep_core::{update, AppState, Effect, Item, Mode, Msg, Notice, PersistedState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sweep_logging::initialize_for_tests);
}

fn items(titles: &[&str]) -> Vec<Item> {
    titles
        .iter()
        .enumerate()
        .map(|(pos, title)| Item {
            id: format!("id-{}", title.to_lowercase()),
            display_index: Some(pos as u32 + 1),
            title: title.to_string(),
            channel_name: "Channel".to_string(),
            position: pos,
        })
        .collect()
}

fn enabled_state(titles: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::ItemsScanned(items(titles)));
    let (state, _) = update(state, Msg::ToggleModeClicked);
    assert_eq!(state.mode(), Mode::Enabled);
    state
}

fn selected(state: &AppState) -> Vec<String> {
    state.selection().iter().map(str::to_string).collect()
}

fn notices(effects: &[Effect]) -> Vec<Notice> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notice) => Some(notice.clone()),
            _ => None,
        })
        .collect()
}

fn persisted(effects: &[Effect]) -> Option<PersistedState> {
    effects.iter().find_map(|effect| match effect {
        Effect::PersistState(state) => Some(state.clone()),
        _ => None,
    })
}

#[test]
fn mode_is_only_enabled_by_explicit_toggle() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::RestoreState(PersistedState {
            is_enabled: true,
            selected_ids: vec!["id-alpha".to_string()],
        }),
    );
    let (state, _) = update(state, Msg::ItemsScanned(items(&["Alpha", "Beta"])));
    assert_eq!(state.mode(), Mode::Disabled);
    assert!(state.selection().is_empty());

    // Activation adopts restored ids that are on the page.
    let (state, effects) = update(state, Msg::ToggleModeClicked);
    assert!(state.is_enabled());
    assert_eq!(selected(&state), vec!["id-alpha"]);
    assert_eq!(
        persisted(&effects),
        Some(PersistedState {
            is_enabled: true,
            selected_ids: vec!["id-alpha".to_string()],
        })
    );
    assert!(effects.contains(&Effect::RequestScan));
}

#[test]
fn disabling_clears_selection_and_persists() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta"]);
    let (state, _) = update(state, Msg::SelectAllVisibleClicked);
    assert_eq!(state.selection().len(), 2);

    let (state, effects) = update(state, Msg::ToggleModeClicked);
    assert_eq!(state.mode(), Mode::Disabled);
    assert!(state.selection().is_empty());
    assert_eq!(persisted(&effects), Some(PersistedState::default()));
    assert_eq!(notices(&effects), vec![Notice::ModeDisabled]);
}

#[test]
fn enabling_without_items_reports_nothing_found() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ToggleModeClicked);
    assert_eq!(state.mode(), Mode::Disabled);
    assert_eq!(notices(&effects), vec![Notice::NothingFound]);
}

#[test]
fn selection_operations_without_items_mutate_nothing() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ItemsScanned(Vec::new()));
    for msg in [
        Msg::SelectAllVisibleClicked,
        Msg::DeselectAllVisibleClicked,
        Msg::ItemToggled {
            id: "id-alpha".to_string(),
        },
        Msg::TitleFilterChanged("x".to_string()),
        Msg::DeleteAllClicked,
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(notices(&effects), vec![Notice::NothingFound]);
        assert!(persisted(&effects).is_none());
        assert_eq!(next.selection(), state.selection());
    }
}

#[test]
fn selection_needs_bulk_mode() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ItemsScanned(items(&["Alpha"])));
    let (state, effects) = update(state, Msg::SelectAllVisibleClicked);
    assert!(state.selection().is_empty());
    assert_eq!(notices(&effects), vec![Notice::ModeRequired]);
}

#[test]
fn select_all_visible_is_idempotent() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta", "Gamma"]);
    let (once, effects) = update(state, Msg::SelectAllVisibleClicked);
    assert_eq!(
        notices(&effects),
        vec![Notice::SelectedVisible {
            newly: 3,
            already: 0,
            skipped_hidden: 0,
            total: 3
        }]
    );

    let (twice, effects) = update(once.clone(), Msg::SelectAllVisibleClicked);
    assert_eq!(twice.selection(), once.selection());
    assert_eq!(
        notices(&effects),
        vec![Notice::AllVisibleAlreadySelected { count: 3 }]
    );
    assert!(persisted(&effects).is_none());
}

#[test]
fn select_all_then_deselect_all_leaves_no_visible_selection() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta", "Gamma", "Delta"]);
    // Pre-select Alpha while everything is visible, then narrow the view.
    let (state, _) = update(
        state,
        Msg::ItemToggled {
            id: "id-alpha".to_string(),
        },
    );
    let (state, _) = update(state, Msg::RangeFilterChanged("1-3".to_string()));
    let before = selected(&state);
    assert_eq!(before, vec!["id-alpha"]);

    let (state, effects) = update(state, Msg::SelectAllVisibleClicked);
    assert_eq!(selected(&state), vec!["id-alpha", "id-beta", "id-gamma"]);
    let expected = Notice::SelectedVisible {
        newly: 2,
        already: 1,
        skipped_hidden: 1,
        total: 3,
    };
    assert_eq!(notices(&effects), vec![expected.clone()]);
    assert_eq!(
        expected.to_string(),
        "Selected 2 visible items (1 already selected; 1 hidden skipped; total selected: 3)"
    );
    assert!(!state.selection().contains("id-delta"));

    let (state, effects) = update(state, Msg::DeselectAllVisibleClicked);
    assert!(state.selection().is_empty());
    assert_eq!(
        notices(&effects),
        vec![Notice::DeselectedVisible {
            count: 3,
            already: 0,
            skipped_hidden: 1,
            remaining: 0
        }]
    );
}

#[test]
fn filter_recompute_evicts_hidden_selections() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]);
    let (state, _) = update(state, Msg::SelectAllVisibleClicked);
    assert_eq!(state.selection().len(), 5);

    let (state, effects) = update(state, Msg::RangeFilterChanged("2-4".to_string()));
    assert_eq!(selected(&state), vec!["id-beta", "id-delta", "id-gamma"]);
    for id in state.selection().iter() {
        assert!(state.is_visible(id), "{id} selected but hidden");
    }
    assert!(effects.contains(&Effect::ApplyVisibility(vec![
        false, true, true, true, false
    ])));
    assert!(persisted(&effects).is_some());
    match notices(&effects).as_slice() {
        [Notice::FilterApplied {
            outcome, evicted, ..
        }] => {
            assert_eq!(outcome.shown, 3);
            assert_eq!(*evicted, 2);
        }
        other => panic!("unexpected notices {other:?}"),
    }

    // Widening the filter again does not bring evicted ids back.
    let (state, _) = update(state, Msg::ClearFiltersClicked);
    assert_eq!(state.selection().len(), 3);
    assert_eq!(state.visible_items().count(), 5);
}

#[test]
fn hidden_items_are_skipped_by_bulk_selection() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta", "Gamma"]);
    let (state, _) = update(state, Msg::TitleFilterChanged("gam".to_string()));
    let (state, _) = update(state, Msg::SelectAllVisibleClicked);
    assert_eq!(selected(&state), vec!["id-gamma"]);
}

#[test]
fn toggle_flips_one_visible_item() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta"]);
    let toggle = || Msg::ItemToggled {
        id: "id-beta".to_string(),
    };

    let (state, effects) = update(state, toggle());
    assert!(state.selection().contains("id-beta"));
    assert_eq!(
        notices(&effects),
        vec![Notice::ItemSelected {
            id: "id-beta".to_string(),
            total: 1
        }]
    );

    let (state, effects) = update(state, toggle());
    assert!(state.selection().is_empty());
    assert_eq!(persisted(&effects), Some(PersistedState {
        is_enabled: true,
        selected_ids: Vec::new(),
    }));
}

#[test]
fn toggle_rejects_unknown_and_hidden_ids() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta"]);
    let (state, effects) = update(
        state,
        Msg::ItemToggled {
            id: "id-nope".to_string(),
        },
    );
    assert!(state.selection().is_empty());
    assert_eq!(
        notices(&effects),
        vec![Notice::UnknownItem("id-nope".to_string())]
    );

    let (state, _) = update(state, Msg::RangeFilterChanged("1".to_string()));
    let (state, _) = update(
        state,
        Msg::ItemToggled {
            id: "id-beta".to_string(),
        },
    );
    assert!(state.selection().is_empty());
}

#[test]
fn rescan_reapplies_the_active_filter() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta", "Gamma"]);
    let (state, _) = update(state, Msg::TitleFilterChanged("beta".to_string()));
    let (state, effects) = update(state, Msg::ItemsScanned(items(&["Beta", "Gamma"])));
    assert_eq!(state.visible_items().count(), 1);
    assert!(effects.contains(&Effect::ApplyVisibility(vec![true, false])));
    assert!(state.has_seen("id-alpha"));
}

#[test]
fn status_snapshot_reflects_state() {
    init_logging();
    let state = enabled_state(&["Alpha", "Beta", "Gamma"]);
    let (state, _) = update(
        state,
        Msg::ItemToggled {
            id: "id-alpha".to_string(),
        },
    );
    let status = state.status();
    assert!(status.is_enabled);
    assert_eq!(status.selected_count, 1);
    assert_eq!(status.total_videos, 3);
    assert!(!status.is_deleting);

    let view = state.view();
    assert!(view.can_delete_selected);
    assert_eq!(view.find_visible_row("2").map(|row| row.id.as_str()), Some("id-beta"));
    assert_eq!(
        view.find_visible_row("id-gamma").map(|row| row.display_index),
        Some(Some(3))
    );
}
