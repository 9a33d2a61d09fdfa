use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use sweep_core::{update, AppState, ControllerCommand, ControllerReply, Msg};
use sweep_engine::{EngineEvent, EngineHandle, FileStore, WebDriverPage};
use sweep_logging::{sweep_debug, sweep_info, sweep_trace, sweep_warn};

use super::config::SweepConfig;
use super::console::commands::{self, Command};
use super::console::{constants, render};
use super::effects::{self, EffectRunner};
use super::events::EventSink;
use super::logging;
use super::persistence::Persistence;
use crate::Args;

const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app(args: Args) -> anyhow::Result<()> {
    logging::initialize(args.log);
    let config = SweepConfig::resolve(&args)?;
    sweep_info!(
        "Starting sweep against {} (state in {})",
        config.webdriver,
        config.state_dir.display()
    );

    let persistence = Persistence::new(Box::new(FileStore::new(config.state_dir.clone(), "ron")));
    let events = match &config.events {
        Some(path) => EventSink::open(path),
        None => EventSink::disabled(),
    };
    let host = WebDriverPage::new(config.webdriver_settings())
        .context("creating the WebDriver client")?;
    let engine = EngineHandle::new(Arc::new(host), config.pipeline_settings())
        .context("starting the engine")?;

    let restored = persistence.load_state();
    let mut app = App::new(EffectRunner::new(engine, persistence, events, io::stdout()));
    app.dispatch(Msg::RestoreState(restored));
    app.rescan();
    app.runner.line("Reading the playlist page; type `help` for commands.");

    app.run(spawn_input_reader());
    sweep_info!("Shutting down");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner<W>,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner<W>) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    fn run(&mut self, input: mpsc::Receiver<String>) {
        let mut input_open = true;
        self.prompt();
        loop {
            if self.pump_engine() {
                self.prompt();
            }
            if !input_open {
                // Stdin is gone; let a running job finish before exiting.
                if !self.state.is_deleting() {
                    break;
                }
                thread::sleep(INPUT_POLL);
                continue;
            }
            match input.recv_timeout(INPUT_POLL) {
                Ok(line) => {
                    if self.handle_line(&line) == Flow::Quit {
                        break;
                    }
                    self.prompt();
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    sweep_debug!("Input closed");
                    input_open = false;
                }
            }
        }
    }

    /// Feeds `msg` and any follow-ups through the core, running effects as
    /// they come out.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            queue.extend(self.runner.run(effects, &state));
            self.state = state;

            if was_dirty {
                sweep_trace!("View changed");
                if let Some(progress) = self.state.view().deletion {
                    self.runner.line(&render::progress(&progress));
                }
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if self.state.view().pending_confirmation.is_some() {
            self.dispatch(commands::parse_answer(line));
            return Flow::Continue;
        }

        match commands::parse(line) {
            Command::Core(msg) => self.dispatch(msg),
            Command::Toggle(reference) => {
                let id = self
                    .state
                    .view()
                    .find_visible_row(&reference)
                    .map(|row| row.id.clone())
                    .unwrap_or(reference);
                self.dispatch(Msg::ItemToggled { id });
            }
            Command::Controller(command) => self.answer_controller(command),
            Command::List => self.runner.lines(render::rows(&self.state.view())),
            Command::Status => self.runner.lines(render::status(&self.state.view())),
            Command::Rescan => self.rescan(),
            Command::Stats => {
                let stats = self.runner.persistence().load_stats();
                self.runner.line(&render::stats(&stats, &effects::today()));
            }
            Command::Probe => {
                if let Err(err) = self.runner.engine().probe(constants::PROBE_LIMIT) {
                    sweep_warn!("Probe request failed: {err}");
                }
            }
            Command::Help => self.runner.line(constants::HELP),
            Command::Quit => return Flow::Quit,
            Command::Empty => {}
            Command::Unknown(text) => {
                self.runner
                    .line(&format!("Unknown command {text:?}; type `help` for a list"));
            }
        }
        Flow::Continue
    }

    fn answer_controller(&mut self, command: ControllerCommand) {
        let reply = match command.into_msg() {
            None => ControllerReply::Status(self.state.status()),
            Some(msg) => {
                self.dispatch(msg);
                ControllerReply::Ack { success: true }
            }
        };
        match serde_json::to_string(&reply) {
            Ok(json) => self.runner.line(&json),
            Err(err) => sweep_warn!("Could not encode controller reply: {err}"),
        }
    }

    fn rescan(&mut self) {
        if let Err(err) = self.runner.engine().scan() {
            sweep_warn!("Scan request failed: {err}");
        }
    }

    /// Drains engine events into the core. Returns whether anything arrived.
    fn pump_engine(&mut self) -> bool {
        let mut any = false;
        while let Some(event) = self.runner.engine().try_recv() {
            any = true;
            self.handle_engine_event(event);
        }
        any
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Scanned(Ok(items)) => self.dispatch(Msg::ItemsScanned(items)),
            EngineEvent::Scanned(Err(err)) => self.dispatch(Msg::ScanFailed(err.to_string())),
            EngineEvent::Progress(progress) => self.dispatch(Msg::DeletionProgress(progress.into())),
            EngineEvent::JobCompleted(report) => {
                for failure in &report.failures {
                    self.runner
                        .line(&format!("  could not remove {}: {}", failure.id, failure.kind));
                }
                self.dispatch(Msg::DeletionFinished(report.summary()));
            }
            EngineEvent::Probed(result) => self.runner.lines(render::probe(&result)),
            EngineEvent::VisibilityFailed(err) => {
                self.runner
                    .line(&format!("Could not update the page's item visibility: {err}"));
            }
        }
    }

    fn prompt(&mut self) {
        if self.state.view().pending_confirmation.is_none() {
            self.runner.prompt(constants::PROMPT);
        }
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    sweep_warn!("Reading stdin failed: {err}");
                    break;
                }
            }
        }
    });
    rx
}
