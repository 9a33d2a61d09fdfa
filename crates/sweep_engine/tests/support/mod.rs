#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use sweep_core::Item;
use sweep_engine::{
    ElementHandle, EngineEvent, HostError, HostPage, JobProgress, LocatedTrigger, MenuEntry,
    PipelineSettings, ProbeReport, ProgressSink, WaitPolicy,
};
use tokio_util::sync::CancellationToken;

pub fn init_logging() {
    sweep_logging::initialize_for_tests();
}

pub fn items(ids: &[&str]) -> Vec<Item> {
    ids.iter()
        .enumerate()
        .map(|(position, id)| Item {
            id: id.to_string(),
            display_index: Some(position as u32 + 1),
            title: format!("Clip {id}"),
            channel_name: "Channel".to_string(),
            position,
        })
        .collect()
}

pub fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        menu_wait: WaitPolicy::new(3, Duration::from_millis(1)),
        confirm_wait: WaitPolicy::new(2, Duration::from_millis(1)),
        menu_settle: Duration::ZERO,
        inter_item_delay: Duration::from_millis(1),
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub open_menu_for: Option<String>,
    pub confirm_for: Option<String>,
    pub removed: Vec<String>,
    pub clicks: Vec<String>,
    pub dismissed: usize,
}

/// Scripted playlist page. Each set names the ids that misbehave.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub listed: Vec<Item>,
    pub no_trigger: HashSet<String>,
    pub menu_never_opens: HashSet<String>,
    pub menu_without_removal: HashSet<String>,
    pub asks_confirmation: HashSet<String>,
    pub removal_click_fails: HashSet<String>,
    pub state: Mutex<FakeState>,
}

impl FakeHost {
    pub fn removed(&self) -> Vec<String> {
        self.state.lock().unwrap().removed.clone()
    }

    pub fn dismissed(&self) -> usize {
        self.state.lock().unwrap().dismissed
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }
}

fn set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

impl FakeHost {
    pub fn with_no_trigger(mut self, ids: &[&str]) -> Self {
        self.no_trigger = set(ids);
        self
    }

    pub fn with_menu_never_opening(mut self, ids: &[&str]) -> Self {
        self.menu_never_opens = set(ids);
        self
    }

    pub fn with_menu_without_removal(mut self, ids: &[&str]) -> Self {
        self.menu_without_removal = set(ids);
        self
    }

    pub fn with_confirmation(mut self, ids: &[&str]) -> Self {
        self.asks_confirmation = set(ids);
        self
    }

    pub fn with_failing_removal_click(mut self, ids: &[&str]) -> Self {
        self.removal_click_fails = set(ids);
        self
    }
}

#[async_trait::async_trait]
impl HostPage for FakeHost {
    async fn scan(&self) -> Result<Vec<Item>, HostError> {
        let removed = self.removed();
        Ok(self
            .listed
            .iter()
            .filter(|item| !removed.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn locate_trigger(&self, item: &Item) -> Result<Option<LocatedTrigger>, HostError> {
        if self.no_trigger.contains(&item.id) {
            return Ok(None);
        }
        Ok(Some(LocatedTrigger {
            element: ElementHandle(format!("trigger:{}", item.id)),
            locator: "fake trigger",
        }))
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.clicks.push(element.0.clone());
        let mut parts = element.0.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("trigger"), Some(id), None) => {
                if !self.menu_never_opens.contains(id) {
                    state.open_menu_for = Some(id.to_string());
                }
            }
            (Some("entry"), Some(id), Some("remove")) => {
                if self.removal_click_fails.contains(id) {
                    return Err(HostError::Transport("connection reset".to_string()));
                }
                state.open_menu_for = None;
                if self.asks_confirmation.contains(id) {
                    state.confirm_for = Some(id.to_string());
                } else {
                    state.removed.push(id.to_string());
                }
            }
            (Some("confirm"), Some(id), None) => {
                state.confirm_for = None;
                state.removed.push(id.to_string());
            }
            _ => {}
        }
        Ok(())
    }

    async fn menu_entries(&self) -> Result<Vec<MenuEntry>, HostError> {
        let state = self.state.lock().unwrap();
        let Some(id) = state.open_menu_for.as_deref() else {
            return Ok(Vec::new());
        };
        let entry = |key: &str, text: &str| MenuEntry {
            element: ElementHandle(format!("entry:{id}:{key}")),
            text: text.to_string(),
        };
        if self.menu_without_removal.contains(id) {
            Ok(vec![entry("share", "Share"), entry("save", "Save to playlist")])
        } else {
            Ok(vec![
                entry("queue", "Add to queue"),
                entry("remove", "Remove from Watch later"),
            ])
        }
    }

    async fn find_confirm_button(&self) -> Result<Option<ElementHandle>, HostError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .confirm_for
            .as_ref()
            .map(|id| ElementHandle(format!("confirm:{id}"))))
    }

    async fn dismiss_menu(&self) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.open_menu_for = None;
        state.dismissed += 1;
        Ok(())
    }

    async fn apply_visibility(&self, _items: &[Item], _visible: &[bool]) -> Result<(), HostError> {
        Ok(())
    }

    async fn probe(&self, limit: usize) -> Result<Vec<ProbeReport>, HostError> {
        Ok(self
            .listed
            .iter()
            .take(limit)
            .map(|item| ProbeReport {
                item: item.clone(),
                trigger_locator: Some("fake trigger"),
            })
            .collect())
    }
}

/// Records events; optionally cancels the job after `cancel_after` progress events.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<EngineEvent>>,
    pub cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingSink {
    pub fn cancelling_after(count: usize, token: CancellationToken) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            cancel_after: Some((count, token)),
        }
    }

    pub fn progress(&self) -> Vec<JobProgress> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress(progress) => Some(*progress),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        let mut events = self.events.lock().unwrap();
        events.push(event);
        if let Some((count, token)) = &self.cancel_after {
            if events.len() >= *count {
                token.cancel();
            }
        }
    }
}
