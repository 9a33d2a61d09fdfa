//! Sweep core: pure filter engine, selection state machine and view-model helpers.
mod deletion;
mod effect;
mod filter;
mod item;
mod msg;
pub mod normalize;
mod notice;
mod protocol;
mod range;
mod selection;
mod state;
mod stats;
mod update;
mod view_model;

pub use deletion::{DeletionProgress, DeletionSummary};
pub use effect::{DeleteScope, Effect};
pub use filter::{FilterOutcome, FilterSpec, Verdict};
pub use item::{Item, ItemId};
pub use msg::Msg;
pub use normalize::{matches_text, TextVariants};
pub use notice::Notice;
pub use protocol::{
    ControllerCommand, ControllerEvent, ControllerReply, PersistedState, StatusSnapshot,
};
pub use range::RangeFilter;
pub use selection::SelectionSet;
pub use state::{AppState, Mode};
pub use stats::DeletionStats;
pub use update::update;
pub use view_model::{AppViewModel, ItemRowView, PendingConfirmationView};
