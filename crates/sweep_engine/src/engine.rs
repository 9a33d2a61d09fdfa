use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use sweep_core::Item;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::host::HostPage;
use crate::pipeline::{ChannelProgressSink, PipelineSettings, RemovalPipeline};
use crate::EngineEvent;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("a removal job is already running")]
    Busy,
    #[error("engine worker has stopped")]
    Stopped,
}

enum EngineCommand {
    Scan,
    ApplyVisibility { items: Vec<Item>, visible: Vec<bool> },
    StartDeletion { targets: Vec<Item>, cancel: CancellationToken },
    Probe { limit: usize },
}

/// Owns the worker thread that talks to the host page.
///
/// Commands are fire-and-forget; results arrive as [`EngineEvent`]s polled
/// with [`EngineHandle::try_recv`] or [`EngineHandle::recv_timeout`].
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
    event_rx: mpsc::Receiver<EngineEvent>,
    busy: Arc<AtomicBool>,
    active_job: Arc<Mutex<Option<CancellationToken>>>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(host: Arc<dyn HostPage>, settings: PipelineSettings) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let busy = Arc::new(AtomicBool::new(false));
        let active_job = Arc::new(Mutex::new(None));
        let runtime = tokio::runtime::Runtime::new()?;

        let worker = {
            let busy = busy.clone();
            let active_job = active_job.clone();
            thread::spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let host = host.clone();
                    let event_tx = event_tx.clone();
                    let busy = busy.clone();
                    let active_job = active_job.clone();
                    runtime.spawn(async move {
                        handle_command(host, settings, command, event_tx, busy, active_job).await;
                    });
                }
                runtime.block_on(host.close());
                sweep_logging::sweep_debug!("Engine worker stopped");
            })
        };

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            busy,
            active_job,
            worker: Some(worker),
        })
    }

    pub fn scan(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Scan)
    }

    pub fn apply_visibility(&self, items: Vec<Item>, visible: Vec<bool>) -> Result<(), EngineError> {
        self.send(EngineCommand::ApplyVisibility { items, visible })
    }

    pub fn probe(&self, limit: usize) -> Result<(), EngineError> {
        self.send(EngineCommand::Probe { limit })
    }

    /// Starts a removal job. At most one job runs at a time.
    pub fn start_deletion(&self, targets: Vec<Item>) -> Result<(), EngineError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(EngineError::Busy);
        }
        let cancel = CancellationToken::new();
        *self.lock_job() = Some(cancel.clone());
        let sent = self.send(EngineCommand::StartDeletion { targets, cancel });
        if sent.is_err() {
            self.lock_job().take();
            self.busy.store(false, Ordering::SeqCst);
        }
        sent
    }

    /// Requests cancellation of the running job. Returns false when idle.
    pub fn cancel(&self) -> bool {
        match self.lock_job().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx
            .as_ref()
            .ok_or(EngineError::Stopped)?
            .send(command)
            .map_err(|_| EngineError::Stopped)
    }

    fn lock_job(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.active_job
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel();
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                sweep_logging::sweep_error!("Engine worker panicked");
            }
        }
    }
}

async fn handle_command(
    host: Arc<dyn HostPage>,
    settings: PipelineSettings,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
    busy: Arc<AtomicBool>,
    active_job: Arc<Mutex<Option<CancellationToken>>>,
) {
    match command {
        EngineCommand::Scan => {
            let result = host.scan().await;
            if let Err(err) = &result {
                sweep_logging::sweep_warn!("Scan failed: {err}");
            }
            let _ = event_tx.send(EngineEvent::Scanned(result));
        }
        EngineCommand::ApplyVisibility { items, visible } => {
            if let Err(err) = host.apply_visibility(&items, &visible).await {
                sweep_logging::sweep_warn!("Applying visibility failed: {err}");
                let _ = event_tx.send(EngineEvent::VisibilityFailed(err));
            }
        }
        EngineCommand::StartDeletion { targets, cancel } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let report = RemovalPipeline::new(host.as_ref(), settings)
                .run(targets, &cancel, &sink)
                .await;
            active_job
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            busy.store(false, Ordering::SeqCst);
            let _ = event_tx.send(EngineEvent::JobCompleted(report));
        }
        EngineCommand::Probe { limit } => {
            let _ = event_tx.send(EngineEvent::Probed(host.probe(limit).await));
        }
    }
}
