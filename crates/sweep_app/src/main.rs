use std::path::PathBuf;

use clap::Parser;

mod platform;

use platform::config::BrowserChoice;
use platform::logging::LogDestination;

/// Bulk removal of playlist entries through a WebDriver-controlled browser.
#[derive(Parser, Debug)]
#[command(name = "sweep", about = "Filter, select and bulk-remove playlist entries", version)]
pub struct Args {
    /// WebDriver endpoint, e.g. http://localhost:4444
    #[arg(short, long)]
    webdriver: Option<String>,

    /// Playlist page opened when the browser session starts
    #[arg(short, long)]
    page: Option<String>,

    /// Directory holding the persisted selection and statistics
    #[arg(short, long)]
    state_dir: Option<PathBuf>,

    /// Optional RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append controller events as JSON lines to this file
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Where log records go
    #[arg(short, long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Browser requested from the WebDriver server
    #[arg(short, long, value_enum)]
    browser: Option<BrowserChoice>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    platform::run_app(args)
}
