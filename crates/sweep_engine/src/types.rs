use std::fmt;

use sweep_core::{DeletionProgress, DeletionSummary, Item, ItemId};
use thiserror::Error;

/// Snapshot of a running job, sent after every processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobProgress {
    pub cursor: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl From<JobProgress> for DeletionProgress {
    fn from(progress: JobProgress) -> Self {
        DeletionProgress {
            cursor: progress.cursor,
            total: progress.total,
            succeeded: progress.succeeded,
            failed: progress.failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub id: ItemId,
    pub kind: FailureKind,
}

/// Final tally of a removal job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobReport {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    pub cursor: usize,
    pub cancelled: bool,
    pub failures: Vec<ItemFailure>,
}

impl JobReport {
    pub fn summary(&self) -> DeletionSummary {
        DeletionSummary {
            succeeded: self.succeeded,
            failed: self.failed,
            total: self.total,
            cursor: self.cursor,
            cancelled: self.cancelled,
        }
    }
}

/// Why a single item could not be removed. Never fatal to the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    TriggerNotFound,
    MenuTimeout,
    NoRemovalAction { entries: Vec<String> },
    Host(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::TriggerNotFound => write!(f, "action menu button not found"),
            FailureKind::MenuTimeout => write!(f, "menu did not open in time"),
            FailureKind::NoRemovalAction { entries } => {
                write!(f, "no removal entry among {entries:?}")
            }
            FailureKind::Host(message) => write!(f, "host error: {message}"),
        }
    }
}

impl From<HostError> for FailureKind {
    fn from(err: HostError) -> Self {
        FailureKind::Host(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("webdriver unreachable: {0}")]
    Transport(String),
    #[error("webdriver error {error}: {message}")]
    Protocol { error: String, message: String },
    #[error("unexpected webdriver response: {0}")]
    InvalidResponse(String),
}

/// What `probe` learned about one entry without touching the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub item: Item,
    pub trigger_locator: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Scanned(Result<Vec<Item>, HostError>),
    Progress(JobProgress),
    JobCompleted(JobReport),
    Probed(Result<Vec<ProbeReport>, HostError>),
    VisibilityFailed(HostError),
}
