use crate::{DeleteScope, DeletionProgress, FilterOutcome, Notice};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub enabled: bool,
    pub total_items: usize,
    pub visible_items: usize,
    pub selected_count: usize,
    pub can_delete_selected: bool,
    pub title_filter: String,
    pub range_filter: String,
    pub filter_outcome: Option<FilterOutcome>,
    pub rows: Vec<ItemRowView>,
    pub deletion: Option<DeletionProgress>,
    pub pending_confirmation: Option<PendingConfirmationView>,
    pub last_notice: Option<Notice>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Resolves user input (a displayed index or an id) to a visible row.
    pub fn find_visible_row(&self, reference: &str) -> Option<&ItemRowView> {
        let reference = reference.trim();
        let by_index = reference.parse::<u32>().ok().and_then(|index| {
            self.rows
                .iter()
                .find(|row| row.visible && row.display_index == Some(index))
        });
        by_index.or_else(|| {
            self.rows
                .iter()
                .find(|row| row.visible && row.id == reference)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowView {
    pub id: String,
    pub position: usize,
    pub display_index: Option<u32>,
    pub title: String,
    pub channel_name: String,
    pub visible: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConfirmationView {
    pub scope: DeleteScope,
    pub count: usize,
}
