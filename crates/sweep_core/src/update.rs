use crate::{
    AppState, ControllerEvent, DeleteScope, DeletionProgress, DeletionSummary, Effect, Item, Msg,
    Notice,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ItemsScanned(items) => {
            let was_empty = items.is_empty();
            let selected_before = state.selection().len();
            state.replace_items(items);
            let (_outcome, _evicted) = state.recompute_visibility();

            let mut effects = Vec::new();
            if was_empty {
                effects.push(notify(&mut state, Notice::NothingFound));
            }
            if !state.filter().is_identity() {
                effects.push(Effect::ApplyVisibility(state.visibility()));
            }
            if state.selection().len() != selected_before {
                effects.push(Effect::PersistState(state.persisted()));
            }
            effects
        }
        Msg::ScanFailed(reason) => vec![notify(&mut state, Notice::ScanFailed(reason))],
        Msg::RestoreState(persisted) => {
            state.restore(persisted);
            Vec::new()
        }
        Msg::ToggleModeClicked => {
            if state.is_enabled() {
                state.disable();
                vec![
                    Effect::PersistState(state.persisted()),
                    notify(&mut state, Notice::ModeDisabled),
                ]
            } else if !state.has_items() {
                vec![notify(&mut state, Notice::NothingFound)]
            } else {
                state.enable();
                let items = state.items().count();
                vec![
                    Effect::PersistState(state.persisted()),
                    notify(&mut state, Notice::ModeEnabled { items }),
                    Effect::RequestScan,
                ]
            }
        }
        Msg::TitleFilterChanged(value) => {
            state.set_title_input(value);
            refilter(&mut state)
        }
        Msg::RangeFilterChanged(value) => {
            state.set_range_input(value);
            refilter(&mut state)
        }
        Msg::ClearFiltersClicked => {
            state.clear_filter_inputs();
            refilter(&mut state)
        }
        Msg::SelectAllVisibleClicked => {
            if let Some(blocked) = selection_guard(&mut state) {
                return (state, vec![blocked]);
            }
            let tally = state.select_all_visible();
            let total = state.selection().len();
            let notice = if tally.changed > 0 {
                Notice::SelectedVisible {
                    newly: tally.changed,
                    already: tally.unchanged,
                    skipped_hidden: tally.skipped_hidden,
                    total,
                }
            } else if tally.unchanged > 0 {
                Notice::AllVisibleAlreadySelected {
                    count: tally.unchanged,
                }
            } else {
                Notice::NothingToSelect
            };
            let mut effects = Vec::with_capacity(2);
            if tally.changed > 0 {
                effects.push(Effect::PersistState(state.persisted()));
            }
            effects.push(notify(&mut state, notice));
            effects
        }
        Msg::DeselectAllVisibleClicked => {
            if let Some(blocked) = selection_guard(&mut state) {
                return (state, vec![blocked]);
            }
            let tally = state.deselect_all_visible();
            let notice = if tally.changed > 0 {
                Notice::DeselectedVisible {
                    count: tally.changed,
                    already: tally.unchanged,
                    skipped_hidden: tally.skipped_hidden,
                    remaining: state.selection().len(),
                }
            } else if tally.unchanged > 0 {
                Notice::AllVisibleAlreadyDeselected
            } else {
                Notice::NothingToDeselect
            };
            let mut effects = Vec::with_capacity(2);
            if tally.changed > 0 {
                effects.push(Effect::PersistState(state.persisted()));
            }
            effects.push(notify(&mut state, notice));
            effects
        }
        Msg::ItemToggled { id } => {
            if let Some(blocked) = selection_guard(&mut state) {
                return (state, vec![blocked]);
            }
            if !state.is_visible(&id) {
                let effect = notify(&mut state, Notice::UnknownItem(id));
                return (state, vec![effect]);
            }
            let selected = state.toggle(&id);
            let total = state.selection().len();
            let notice = if selected {
                Notice::ItemSelected { id, total }
            } else {
                Notice::ItemDeselected { id, total }
            };
            vec![
                Effect::PersistState(state.persisted()),
                notify(&mut state, notice),
            ]
        }
        Msg::DeleteSelectedClicked => {
            if state.is_deleting() {
                vec![notify(&mut state, Notice::DeletionBusy)]
            } else if state.selection().is_empty() {
                vec![notify(&mut state, Notice::NoSelection)]
            } else if !state.has_items() {
                vec![notify(&mut state, Notice::NothingFound)]
            } else {
                let targets = state.selected_targets();
                if targets.is_empty() {
                    vec![notify(&mut state, Notice::NoMatchingTargets)]
                } else {
                    request_confirmation(&mut state, DeleteScope::Selected, targets)
                }
            }
        }
        Msg::DeleteAllClicked => {
            if state.is_deleting() {
                vec![notify(&mut state, Notice::DeletionBusy)]
            } else if !state.has_items() {
                vec![notify(&mut state, Notice::NothingFound)]
            } else {
                let targets = state.all_visible_targets();
                if targets.is_empty() {
                    vec![notify(&mut state, Notice::NothingFound)]
                } else {
                    request_confirmation(&mut state, DeleteScope::AllVisible, targets)
                }
            }
        }
        Msg::DeletionConfirmed => match state.take_pending() {
            None => Vec::new(),
            Some(_) if state.is_deleting() => {
                vec![notify(&mut state, Notice::DeletionBusy)]
            }
            Some(pending) => {
                let count = pending.targets.len();
                state.set_deletion(Some(DeletionProgress::starting(count)));
                vec![
                    Effect::StartDeletion {
                        targets: pending.targets,
                    },
                    Effect::Emit(ControllerEvent::DeleteStarted { count }),
                    notify(&mut state, Notice::DeletionStarted { count }),
                ]
            }
        },
        Msg::DeletionDeclined => match state.take_pending() {
            None => Vec::new(),
            Some(_) => vec![notify(&mut state, Notice::DeletionDeclined)],
        },
        Msg::CancelClicked => {
            if state.is_deleting() {
                vec![
                    Effect::CancelDeletion,
                    notify(&mut state, Notice::CancelRequested),
                ]
            } else {
                vec![notify(&mut state, Notice::NothingToCancel)]
            }
        }
        Msg::DeletionRejected => {
            state.set_deletion(None);
            vec![notify(&mut state, Notice::DeletionBusy)]
        }
        Msg::DeletionProgress(progress) => {
            state.set_deletion(Some(progress));
            vec![Effect::Emit(ControllerEvent::DeleteProgress {
                current: progress.cursor,
                total: progress.total,
            })]
        }
        Msg::DeletionFinished(summary) => finish_deletion(&mut state, summary),
    };

    (state, effects)
}

fn notify(state: &mut AppState, notice: Notice) -> Effect {
    state.set_notice(notice.clone());
    Effect::Notify(notice)
}

/// Selection operations need items on the page and bulk mode switched on.
fn selection_guard(state: &mut AppState) -> Option<Effect> {
    if !state.has_items() {
        return Some(notify(state, Notice::NothingFound));
    }
    if !state.is_enabled() {
        return Some(notify(state, Notice::ModeRequired));
    }
    None
}

fn refilter(state: &mut AppState) -> Vec<Effect> {
    if !state.has_items() {
        return vec![notify(state, Notice::NothingFound)];
    }
    let (outcome, evicted) = state.recompute_visibility();
    let filter = state.filter();
    let notice = Notice::FilterApplied {
        text_query: filter.text_query().to_string(),
        range_input: filter.range_input().to_string(),
        has_range: filter.has_range(),
        outcome,
        evicted,
    };

    let mut effects = vec![Effect::ApplyVisibility(state.visibility())];
    if evicted > 0 {
        effects.push(Effect::PersistState(state.persisted()));
    }
    effects.push(notify(state, notice));
    effects
}

fn request_confirmation(
    state: &mut AppState,
    scope: DeleteScope,
    targets: Vec<Item>,
) -> Vec<Effect> {
    let count = targets.len();
    state.set_pending(scope, targets);
    vec![
        notify(state, Notice::ConfirmationRequired { scope, count }),
        Effect::RequestConfirmation { scope, count },
    ]
}

fn finish_deletion(state: &mut AppState, summary: DeletionSummary) -> Vec<Effect> {
    state.set_deletion(None);
    state.clear_selection();

    let DeletionSummary {
        succeeded,
        failed,
        total,
        cancelled,
        ..
    } = summary;
    let (notice, event) = if cancelled {
        (
            Notice::DeletionCancelled {
                succeeded,
                failed,
                total,
            },
            ControllerEvent::DeleteCancelled {
                deleted_count: succeeded,
            },
        )
    } else {
        (
            Notice::DeletionFinished {
                succeeded,
                failed,
                total,
            },
            ControllerEvent::DeleteCompleted { count: succeeded },
        )
    };

    let mut effects = vec![Effect::PersistState(state.persisted())];
    effects.push(notify(state, notice));
    effects.push(Effect::Emit(event));
    if succeeded > 0 {
        effects.push(Effect::RecordStatistics { removed: succeeded });
    }
    effects.push(Effect::RequestScan);
    effects
}
