//! RON configuration file with CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sweep_engine::{Browser, PipelineSettings, WaitPolicy, WebDriverSettings};

use crate::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrowserChoice {
    #[default]
    Chrome,
    Firefox,
}

impl From<BrowserChoice> for Browser {
    fn from(choice: BrowserChoice) -> Self {
        match choice {
            BrowserChoice::Chrome => Browser::Chrome,
            BrowserChoice::Firefox => Browser::Firefox,
        }
    }
}

/// A bounded poll as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    pub attempts: u32,
    pub interval_ms: u64,
}

impl From<PollConfig> for WaitPolicy {
    fn from(poll: PollConfig) -> Self {
        WaitPolicy::new(poll.attempts, Duration::from_millis(poll.interval_ms))
    }
}

impl From<WaitPolicy> for PollConfig {
    fn from(policy: WaitPolicy) -> Self {
        Self {
            attempts: policy.attempts,
            interval_ms: policy.interval.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub webdriver: String,
    pub page: Option<String>,
    pub state_dir: PathBuf,
    pub events: Option<PathBuf>,
    pub browser: BrowserChoice,
    pub menu_poll: PollConfig,
    pub confirm_poll: PollConfig,
    pub page_ready_poll: PollConfig,
    pub menu_settle_ms: u64,
    pub inter_item_delay_ms: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let driver = WebDriverSettings::default();
        let pipeline = PipelineSettings::default();
        Self {
            webdriver: driver.endpoint,
            page: driver.page_url,
            state_dir: PathBuf::from(".sweep"),
            events: None,
            browser: BrowserChoice::default(),
            menu_poll: pipeline.menu_wait.into(),
            confirm_poll: pipeline.confirm_wait.into(),
            page_ready_poll: driver.page_ready.into(),
            menu_settle_ms: pipeline.menu_settle.as_millis() as u64,
            inter_item_delay_ms: pipeline.inter_item_delay.as_millis() as u64,
        }
    }
}

impl SweepConfig {
    /// Reads the config file named on the command line, if any, then applies
    /// the remaining flags on top.
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    fn apply_overrides(&mut self, args: &Args) {
        if let Some(endpoint) = &args.webdriver {
            self.webdriver = endpoint.clone();
        }
        if let Some(page) = &args.page {
            self.page = Some(page.clone());
        }
        if let Some(dir) = &args.state_dir {
            self.state_dir = dir.clone();
        }
        if let Some(events) = &args.events {
            self.events = Some(events.clone());
        }
        if let Some(browser) = args.browser {
            self.browser = browser;
        }
    }

    pub fn webdriver_settings(&self) -> WebDriverSettings {
        WebDriverSettings {
            endpoint: self.webdriver.clone(),
            page_url: self.page.clone(),
            browser: self.browser.into(),
            page_ready: self.page_ready_poll.into(),
            ..WebDriverSettings::default()
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            menu_wait: self.menu_poll.into(),
            confirm_wait: self.confirm_poll.into(),
            menu_settle: Duration::from_millis(self.menu_settle_ms),
            inter_item_delay: Duration::from_millis(self.inter_item_delay_ms),
        }
    }
}
