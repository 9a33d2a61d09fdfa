//! Parsing of console input lines.

use sweep_core::{ControllerCommand, Msg};

/// One line of console input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feeds straight into the core.
    Core(Msg),
    /// Selection toggle by displayed index or id; resolved against the view.
    Toggle(String),
    Controller(ControllerCommand),
    List,
    Status,
    Rescan,
    Stats,
    Probe,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if line.starts_with('{') {
        return match serde_json::from_str::<ControllerCommand>(line) {
            Ok(command) => Command::Controller(command),
            Err(_) => Command::Unknown(line.to_string()),
        };
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "mode" => Command::Core(Msg::ToggleModeClicked),
        "filter" => Command::Core(Msg::TitleFilterChanged(rest.to_string())),
        "range" => Command::Core(Msg::RangeFilterChanged(rest.to_string())),
        "clear-filters" => Command::Core(Msg::ClearFiltersClicked),
        "select-all" => Command::Core(Msg::SelectAllVisibleClicked),
        "deselect-all" => Command::Core(Msg::DeselectAllVisibleClicked),
        "toggle" if !rest.is_empty() => Command::Toggle(rest.to_string()),
        "delete-selected" => Command::Core(Msg::DeleteSelectedClicked),
        "delete-all" => Command::Core(Msg::DeleteAllClicked),
        "cancel" => Command::Core(Msg::CancelClicked),
        "list" => Command::List,
        "status" => Command::Status,
        "rescan" => Command::Rescan,
        "stats" => Command::Stats,
        "probe" => Command::Probe,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Reads the answer to a pending confirmation. Anything but an explicit
/// yes declines.
pub fn parse_answer(line: &str) -> Msg {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Msg::DeletionConfirmed,
        _ => Msg::DeletionDeclined,
    }
}
