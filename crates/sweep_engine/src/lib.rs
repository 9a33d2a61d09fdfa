//! Sweep engine: host page access and the sequential removal pipeline.
mod engine;
mod host;
mod intent;
pub mod locator;
mod pipeline;
mod scan;
mod store;
mod types;
mod wait;
mod webdriver;

pub use engine::{EngineError, EngineHandle};
pub use host::{ElementHandle, HostPage, LocatedTrigger, MenuEntry};
pub use intent::RemovalIntent;
pub use pipeline::{ChannelProgressSink, DeletionJob, PipelineSettings, ProgressSink, RemovalPipeline};
pub use scan::{video_id_from_href, ItemScanner, SYNTHETIC_ID_PREFIX};
pub use store::{ensure_state_dir, AtomicFileWriter, FileStore, KeyValueStore, StoreError};
pub use types::{
    EngineEvent, FailureKind, HostError, ItemFailure, JobProgress, JobReport, ProbeReport,
};
pub use wait::{poll_until, WaitPolicy};
pub use webdriver::{Browser, WebDriverPage, WebDriverSettings, ELEMENT_KEY};
