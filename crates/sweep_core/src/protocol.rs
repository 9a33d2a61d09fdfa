//! Wire shapes shared with the external controller and the state store.

use serde::{Deserialize, Serialize};

use crate::{ItemId, Msg};

/// Commands an external controller may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerCommand {
    GetStatus,
    ToggleMode,
    DeleteSelected,
    DeleteAll,
}

impl ControllerCommand {
    /// The message this command drives, if any. `GetStatus` is answered from
    /// a snapshot and changes nothing.
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            ControllerCommand::GetStatus => None,
            ControllerCommand::ToggleMode => Some(Msg::ToggleModeClicked),
            ControllerCommand::DeleteSelected => Some(Msg::DeleteSelectedClicked),
            ControllerCommand::DeleteAll => Some(Msg::DeleteAllClicked),
        }
    }
}

/// Reply to `GET_STATUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub is_enabled: bool,
    pub selected_count: usize,
    pub total_videos: usize,
    pub is_deleting: bool,
}

/// Reply to any controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControllerReply {
    Status(StatusSnapshot),
    Ack { success: bool },
}

/// Fire-and-forget lifecycle notifications for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerEvent {
    DeleteStarted {
        count: usize,
    },
    DeleteProgress {
        current: usize,
        total: usize,
    },
    DeleteCompleted {
        count: usize,
    },
    DeleteCancelled {
        #[serde(rename = "deletedCount")]
        deleted_count: usize,
    },
}

/// The only durable entity: mode flag plus selected ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub is_enabled: bool,
    pub selected_ids: Vec<ItemId>,
}
