use crate::{DeletionProgress, DeletionSummary, Item, PersistedState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Fresh scan of the host page's item list.
    ItemsScanned(Vec<Item>),
    /// The host page could not be read.
    ScanFailed(String),
    /// State loaded from the durable store at startup.
    RestoreState(PersistedState),
    /// User toggled bulk mode.
    ToggleModeClicked,
    /// User edited the title/channel filter input.
    TitleFilterChanged(String),
    /// User edited the range filter input.
    RangeFilterChanged(String),
    /// User cleared both filter inputs.
    ClearFiltersClicked,
    SelectAllVisibleClicked,
    DeselectAllVisibleClicked,
    /// Per-item selection control changed.
    ItemToggled { id: String },
    DeleteSelectedClicked,
    DeleteAllClicked,
    /// Answer to the pending confirmation prompt.
    DeletionConfirmed,
    DeletionDeclined,
    /// User asked the running removal to stop.
    CancelClicked,
    /// The engine refused to start a job because one is active.
    DeletionRejected,
    /// Engine progress after one item.
    DeletionProgress(DeletionProgress),
    /// Engine finished, failed through, or was cancelled.
    DeletionFinished(DeletionSummary),
}
