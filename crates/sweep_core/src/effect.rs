use crate::{ControllerEvent, Item, Notice, PersistedState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-read the item list from the host page.
    RequestScan,
    /// Write the durable state blob.
    PersistState(PersistedState),
    Notify(Notice),
    /// Best-effort event for the external controller.
    Emit(ControllerEvent),
    /// Per-item visibility, indexed by scan position.
    ApplyVisibility(Vec<bool>),
    RequestConfirmation { scope: DeleteScope, count: usize },
    StartDeletion { targets: Vec<Item> },
    CancelDeletion,
    RecordStatistics { removed: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Selected,
    AllVisible,
}
