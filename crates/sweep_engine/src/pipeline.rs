//! Sequential removal of confirmed targets through the host page's menus.
//!
//! Items are processed strictly one at a time: every removal re-renders the
//! live list, so positions of the remaining entries shift underneath us.

use std::sync::mpsc;
use std::time::Duration;

use sweep_core::{Item, ItemId};
use tokio_util::sync::CancellationToken;

use crate::host::{ElementHandle, HostPage};
use crate::intent::RemovalIntent;
use crate::wait::{poll_until, WaitPolicy};
use crate::{EngineEvent, FailureKind, HostError, ItemFailure, JobProgress, JobReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub menu_wait: WaitPolicy,
    pub confirm_wait: WaitPolicy,
    /// Pause after choosing the removal entry, before looking for a dialog.
    pub menu_settle: Duration,
    /// Throttle between items to stay clear of host rate limiting.
    pub inter_item_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            menu_wait: WaitPolicy::MENU,
            confirm_wait: WaitPolicy::CONFIRM,
            menu_settle: Duration::from_millis(300),
            inter_item_delay: Duration::from_millis(1000),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Mutable bookkeeping of one removal pass.
///
/// `succeeded + failed == cursor <= total` holds after every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionJob {
    targets: Vec<Item>,
    cursor: usize,
    succeeded: usize,
    failed: usize,
    cancelled: bool,
    failures: Vec<ItemFailure>,
}

impl DeletionJob {
    pub fn new(targets: Vec<Item>) -> Self {
        Self {
            targets,
            cursor: 0,
            succeeded: 0,
            failed: 0,
            cancelled: false,
            failures: Vec::new(),
        }
    }

    pub fn next_target(&self) -> Option<&Item> {
        if self.cancelled {
            return None;
        }
        self.targets.get(self.cursor)
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
        self.cursor += 1;
    }

    pub fn record_failure(&mut self, id: ItemId, kind: FailureKind) {
        self.failed += 1;
        self.cursor += 1;
        self.failures.push(ItemFailure { id, kind });
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.cursor >= self.targets.len()
    }

    pub fn progress(&self) -> JobProgress {
        JobProgress {
            cursor: self.cursor,
            total: self.targets.len(),
            succeeded: self.succeeded,
            failed: self.failed,
        }
    }

    pub fn into_report(self) -> JobReport {
        JobReport {
            succeeded: self.succeeded,
            failed: self.failed,
            total: self.targets.len(),
            cursor: self.cursor,
            cancelled: self.cancelled,
            failures: self.failures,
        }
    }
}

pub struct RemovalPipeline<'a> {
    host: &'a dyn HostPage,
    settings: PipelineSettings,
    intent: RemovalIntent,
}

impl<'a> RemovalPipeline<'a> {
    pub fn new(host: &'a dyn HostPage, settings: PipelineSettings) -> Self {
        Self {
            host,
            settings,
            intent: RemovalIntent::default(),
        }
    }

    pub fn with_intent(mut self, intent: RemovalIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Removes `targets` in order. Cancellation is honoured between items
    /// only; an item in flight always runs to the end of its steps.
    pub async fn run(
        &self,
        targets: Vec<Item>,
        cancel: &CancellationToken,
        sink: &dyn ProgressSink,
    ) -> JobReport {
        let mut job = DeletionJob::new(targets);
        sweep_logging::sweep_info!("Removal started for {} items", job.progress().total);

        while let Some(item) = job.next_target().cloned() {
            if cancel.is_cancelled() {
                sweep_logging::sweep_info!("Removal cancelled before item {}", item.id);
                job.cancel();
                break;
            }

            match self.remove_one(&item).await {
                Ok(()) => {
                    sweep_logging::sweep_debug!("Removed {} ({})", item.id, item.title);
                    job.record_success();
                }
                Err(kind) => {
                    sweep_logging::sweep_warn!("Failed to remove {}: {kind}", item.id);
                    job.record_failure(item.id.clone(), kind);
                }
            }
            sink.emit(EngineEvent::Progress(job.progress()));

            if !job.is_finished() {
                tokio::time::sleep(self.settings.inter_item_delay).await;
            }
        }

        let report = job.into_report();
        sweep_logging::sweep_info!(
            "Removal ended: {} succeeded, {} failed of {}{}",
            report.succeeded,
            report.failed,
            report.total,
            if report.cancelled { " (cancelled)" } else { "" }
        );
        report
    }

    async fn remove_one(&self, item: &Item) -> Result<(), FailureKind> {
        let host = self.host;

        let trigger = host
            .locate_trigger(item)
            .await?
            .ok_or(FailureKind::TriggerNotFound)?;
        sweep_logging::sweep_debug!("Trigger for {} found via {}", item.id, trigger.locator);
        host.click(&trigger.element).await?;

        let entries = poll_until(self.settings.menu_wait, || async move {
            let entries = host.menu_entries().await?;
            Ok::<_, HostError>((!entries.is_empty()).then_some(entries))
        })
        .await?
        .ok_or(FailureKind::MenuTimeout)?;

        let texts: Vec<&str> = entries.iter().map(|entry| entry.text.as_str()).collect();
        let Some(choice) = self.intent.pick(&texts) else {
            self.dismiss_menu().await;
            return Err(FailureKind::NoRemovalAction {
                entries: entries.into_iter().map(|entry| entry.text).collect(),
            });
        };
        sweep_logging::sweep_debug!("Choosing menu entry {:?}", entries[choice].text);
        if let Err(err) = self.confirm_removal(item, &entries[choice].element).await {
            self.dismiss_menu().await;
            return Err(err.into());
        }
        Ok(())
    }

    /// Clicks the removal entry, then the confirmation when one appears.
    async fn confirm_removal(&self, item: &Item, entry: &ElementHandle) -> Result<(), HostError> {
        let host = self.host;
        host.click(entry).await?;

        tokio::time::sleep(self.settings.menu_settle).await;

        let confirm = poll_until(self.settings.confirm_wait, || host.find_confirm_button()).await?;
        match confirm {
            Some(button) => host.click(&button).await?,
            None => sweep_logging::sweep_debug!("No confirmation shown for {}", item.id),
        }
        Ok(())
    }

    async fn dismiss_menu(&self) {
        if let Err(err) = self.host.dismiss_menu().await {
            sweep_logging::sweep_warn!("Could not dismiss menu: {err}");
        }
    }
}
