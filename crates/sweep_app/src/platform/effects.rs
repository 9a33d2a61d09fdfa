use std::io::Write;

use chrono::Local;
use sweep_core::{AppState, Effect, Msg};
use sweep_engine::{EngineError, EngineHandle};
use sweep_logging::{sweep_debug, sweep_error, sweep_info, sweep_warn};

use super::console::{constants, render};
use super::events::EventSink;
use super::persistence::Persistence;

/// Carries out the side effects the core asks for.
pub struct EffectRunner<W: Write> {
    engine: EngineHandle,
    persistence: Persistence,
    events: EventSink,
    out: W,
}

impl<W: Write> EffectRunner<W> {
    pub fn new(engine: EngineHandle, persistence: Persistence, events: EventSink, out: W) -> Self {
        Self {
            engine,
            persistence,
            events,
            out,
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Runs `effects` in order. Returns follow-up messages for the core,
    /// e.g. when the engine turns a start request down.
    pub fn run(&mut self, effects: Vec<Effect>, state: &AppState) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::RequestScan => self.request(self.engine.scan(), "scan"),
                Effect::PersistState(persisted) => self.persistence.save_state(&persisted),
                Effect::Notify(notice) => self.line(&render::notice(&notice)),
                Effect::Emit(event) => self.events.emit(&event),
                Effect::ApplyVisibility(visible) => {
                    let items = state.items().cloned().collect();
                    self.request(self.engine.apply_visibility(items, visible), "visibility");
                }
                Effect::RequestConfirmation { scope, count } => {
                    sweep_debug!("Awaiting confirmation for {count} items ({scope:?})");
                    self.prompt(constants::CONFIRM_PROMPT);
                }
                Effect::StartDeletion { targets } => {
                    let count = targets.len();
                    match self.engine.start_deletion(targets) {
                        Ok(()) => sweep_info!("Removal job started for {count} items"),
                        Err(EngineError::Busy) => {
                            sweep_warn!("Engine already busy; start rejected");
                            follow_ups.push(Msg::DeletionRejected);
                        }
                        Err(err) => {
                            sweep_error!("Could not start removal: {err}");
                            follow_ups.push(Msg::DeletionRejected);
                        }
                    }
                }
                Effect::CancelDeletion => {
                    if !self.engine.cancel() {
                        sweep_debug!("Cancel requested but the engine is idle");
                    }
                }
                Effect::RecordStatistics { removed } => {
                    let today = today();
                    let stats = self.persistence.record_removals(&today, removed);
                    sweep_info!("Recorded {removed} removals; {} today", stats.on_day(&today));
                }
            }
        }
        follow_ups
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            sweep_debug!("Console write failed: {err}");
        }
    }

    pub fn lines(&mut self, lines: Vec<String>) {
        for text in lines {
            self.line(&text);
        }
    }

    pub fn prompt(&mut self, text: &str) {
        let written = write!(self.out, "{text}").and_then(|()| self.out.flush());
        if let Err(err) = written {
            sweep_debug!("Console write failed: {err}");
        }
    }

    fn request(&self, sent: Result<(), EngineError>, what: &str) {
        if let Err(err) = sent {
            sweep_error!("Engine {what} request failed: {err}");
        }
    }
}

/// Local calendar day, as the statistics key.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
