use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, ItemRowView, PendingConfirmationView};
use crate::{
    DeleteScope, DeletionProgress, FilterOutcome, FilterSpec, Item, ItemId, Notice, PersistedState,
    SelectionSet, StatusSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScannedItem {
    pub(crate) item: Item,
    pub(crate) visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingDeletion {
    pub(crate) scope: DeleteScope,
    pub(crate) targets: Vec<Item>,
}

/// Counts produced by a visible-only bulk selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BulkTally {
    pub(crate) changed: usize,
    pub(crate) unchanged: usize,
    pub(crate) skipped_hidden: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    mode: Mode,
    items: Vec<ScannedItem>,
    seen_ids: BTreeSet<ItemId>,
    selection: SelectionSet,
    restored_ids: Vec<ItemId>,
    title_input: String,
    range_input: String,
    filter: FilterSpec,
    last_outcome: Option<FilterOutcome>,
    pending: Option<PendingDeletion>,
    deletion: Option<DeletionProgress>,
    last_notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.mode == Mode::Enabled
    }

    pub fn is_deleting(&self) -> bool {
        self.deletion.is_some()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().map(|scanned| &scanned.item)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|scanned| scanned.visible)
            .map(|scanned| &scanned.item)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.items
            .iter()
            .any(|scanned| scanned.visible && scanned.item.id == id)
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            is_enabled: self.is_enabled(),
            selected_count: self.selection.len(),
            total_videos: self.items.len(),
            is_deleting: self.is_deleting(),
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            is_enabled: self.is_enabled(),
            selected_ids: self.selection.to_vec(),
        }
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .items
            .iter()
            .map(|scanned| ItemRowView {
                id: scanned.item.id.clone(),
                position: scanned.item.position,
                display_index: scanned.item.display_index,
                title: scanned.item.title.clone(),
                channel_name: scanned.item.channel_name.clone(),
                visible: scanned.visible,
                selected: self.selection.contains(&scanned.item.id),
            })
            .collect::<Vec<_>>();

        AppViewModel {
            enabled: self.is_enabled(),
            total_items: rows.len(),
            visible_items: rows.iter().filter(|row| row.visible).count(),
            selected_count: self.selection.len(),
            can_delete_selected: !self.selection.is_empty() && !self.is_deleting(),
            title_filter: self.title_input.clone(),
            range_filter: self.range_input.clone(),
            filter_outcome: self.last_outcome,
            rows,
            deletion: self.deletion,
            pending_confirmation: self.pending.as_ref().map(|pending| PendingConfirmationView {
                scope: pending.scope,
                count: pending.targets.len(),
            }),
            last_notice: self.last_notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.last_notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn replace_items(&mut self, items: Vec<Item>) {
        self.seen_ids.extend(items.iter().map(|item| item.id.clone()));
        self.items = items
            .into_iter()
            .map(|item| ScannedItem {
                item,
                visible: true,
            })
            .collect();
        self.mark_dirty();
    }

    pub(crate) fn set_title_input(&mut self, value: String) {
        self.title_input = value;
        self.rebuild_filter();
    }

    pub(crate) fn set_range_input(&mut self, value: String) {
        self.range_input = value;
        self.rebuild_filter();
    }

    pub(crate) fn clear_filter_inputs(&mut self) {
        self.title_input.clear();
        self.range_input.clear();
        self.rebuild_filter();
    }

    fn rebuild_filter(&mut self) {
        self.filter = FilterSpec::from_inputs(&self.title_input, &self.range_input);
        self.mark_dirty();
    }

    /// Recomputes visibility for every scanned item, then evicts selections
    /// that became hidden. Returns the outcome and the eviction count.
    pub(crate) fn recompute_visibility(&mut self) -> (FilterOutcome, usize) {
        let plain: Vec<Item> = self.items.iter().map(|s| s.item.clone()).collect();
        let (visibility, outcome) = self.filter.apply(&plain);
        for (scanned, visible) in self.items.iter_mut().zip(visibility) {
            scanned.visible = visible;
        }
        self.last_outcome = Some(outcome);
        let evicted = self.cleanup_hidden_selections();
        self.mark_dirty();
        (outcome, evicted)
    }

    /// Drops every selected id whose item is not currently visible.
    pub(crate) fn cleanup_hidden_selections(&mut self) -> usize {
        let visible: BTreeSet<&str> = self
            .items
            .iter()
            .filter(|scanned| scanned.visible)
            .map(|scanned| scanned.item.id.as_str())
            .collect();
        self.selection.retain(|id| visible.contains(id))
    }

    pub(crate) fn visibility(&self) -> Vec<bool> {
        self.items.iter().map(|scanned| scanned.visible).collect()
    }

    pub(crate) fn enable(&mut self) {
        self.mode = Mode::Enabled;
        self.selection.clear();
        let restored = std::mem::take(&mut self.restored_ids);
        for id in restored {
            if self.is_visible(&id) {
                self.selection.insert(&id);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn disable(&mut self) {
        self.mode = Mode::Disabled;
        self.selection.clear();
        self.pending = None;
        self.mark_dirty();
    }

    pub(crate) fn restore(&mut self, persisted: PersistedState) {
        // The enabled flag is intentionally not applied on startup.
        self.restored_ids = persisted.selected_ids;
        self.mark_dirty();
    }

    pub(crate) fn select_all_visible(&mut self) -> BulkTally {
        let mut tally = BulkTally::default();
        for scanned in &self.items {
            if !scanned.visible {
                tally.skipped_hidden += 1;
            } else if self.selection.insert(&scanned.item.id) {
                tally.changed += 1;
            } else {
                tally.unchanged += 1;
            }
        }
        self.mark_dirty();
        tally
    }

    pub(crate) fn deselect_all_visible(&mut self) -> BulkTally {
        let mut tally = BulkTally::default();
        for scanned in &self.items {
            if !scanned.visible {
                tally.skipped_hidden += 1;
            } else if self.selection.remove(&scanned.item.id) {
                tally.changed += 1;
            } else {
                tally.unchanged += 1;
            }
        }
        self.mark_dirty();
        tally
    }

    pub(crate) fn toggle(&mut self, id: &str) -> bool {
        let selected = self.selection.toggle(id);
        self.mark_dirty();
        selected
    }

    /// Visible items whose id is selected, in page order.
    pub(crate) fn selected_targets(&self) -> Vec<Item> {
        self.visible_items()
            .filter(|item| self.selection.contains(&item.id))
            .cloned()
            .collect()
    }

    pub(crate) fn all_visible_targets(&self) -> Vec<Item> {
        self.visible_items().cloned().collect()
    }

    pub(crate) fn set_pending(&mut self, scope: DeleteScope, targets: Vec<Item>) {
        self.pending = Some(PendingDeletion { scope, targets });
        self.mark_dirty();
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingDeletion> {
        let pending = self.pending.take();
        if pending.is_some() {
            self.mark_dirty();
        }
        pending
    }

    pub(crate) fn set_deletion(&mut self, progress: Option<DeletionProgress>) {
        self.deletion = progress;
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.mark_dirty();
    }
}
