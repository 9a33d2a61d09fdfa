use std::fmt;

use crate::{DeleteScope, FilterOutcome};

/// Transient, user-facing outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ModeEnabled { items: usize },
    ModeDisabled,
    ModeRequired,
    NothingFound,
    ScanFailed(String),
    FilterApplied {
        text_query: String,
        range_input: String,
        has_range: bool,
        outcome: FilterOutcome,
        evicted: usize,
    },
    SelectedVisible {
        newly: usize,
        already: usize,
        skipped_hidden: usize,
        total: usize,
    },
    AllVisibleAlreadySelected { count: usize },
    NothingToSelect,
    DeselectedVisible {
        count: usize,
        already: usize,
        skipped_hidden: usize,
        remaining: usize,
    },
    AllVisibleAlreadyDeselected,
    NothingToDeselect,
    ItemSelected { id: String, total: usize },
    ItemDeselected { id: String, total: usize },
    UnknownItem(String),
    NoSelection,
    NoMatchingTargets,
    ConfirmationRequired { scope: DeleteScope, count: usize },
    DeletionDeclined,
    DeletionBusy,
    DeletionStarted { count: usize },
    CancelRequested,
    NothingToCancel,
    DeletionFinished { succeeded: usize, failed: usize, total: usize },
    DeletionCancelled { succeeded: usize, failed: usize, total: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ModeEnabled { items } => {
                write!(f, "Bulk mode enabled ({items} items on the page)")
            }
            Notice::ModeDisabled => write!(f, "Bulk mode disabled, selection cleared"),
            Notice::ModeRequired => write!(f, "Enable bulk mode first"),
            Notice::NothingFound => write!(f, "No playlist items found on the page"),
            Notice::ScanFailed(reason) => write!(f, "Could not read the playlist: {reason}"),
            Notice::FilterApplied {
                text_query,
                range_input,
                has_range,
                outcome,
                evicted,
            } => {
                let has_text = !text_query.is_empty();
                let description = match (has_text, *has_range) {
                    (false, false) => {
                        return write!(f, "Showing all items ({})", outcome.total);
                    }
                    (true, true) => format!("\"{text_query}\" + range \"{range_input}\""),
                    (true, false) => format!("\"{text_query}\""),
                    (false, true) => format!("range \"{range_input}\""),
                };
                if outcome.shown == 0 {
                    write!(f, "No items match {description}")?;
                } else {
                    write!(
                        f,
                        "Filter {description}: {} shown of {}",
                        outcome.shown, outcome.total
                    )?;
                }
                if *evicted > 0 {
                    write!(f, " ({evicted} hidden selections dropped)")?;
                }
                Ok(())
            }
            Notice::SelectedVisible {
                newly,
                already,
                skipped_hidden,
                total,
            } => {
                let mut details = tally_details(*already, "already selected", *skipped_hidden);
                details.push(format!("total selected: {total}"));
                write!(f, "Selected {newly} visible items ({})", details.join("; "))
            }
            Notice::AllVisibleAlreadySelected { count } => {
                write!(f, "All {count} visible items are already selected")
            }
            Notice::NothingToSelect => write!(f, "No visible items to select"),
            Notice::DeselectedVisible {
                count,
                already,
                skipped_hidden,
                remaining,
            } => {
                let mut details = tally_details(*already, "not selected", *skipped_hidden);
                details.push(format!("remaining: {remaining}"));
                write!(f, "Deselected {count} visible items ({})", details.join("; "))
            }
            Notice::AllVisibleAlreadyDeselected => {
                write!(f, "No visible item was selected")
            }
            Notice::NothingToDeselect => write!(f, "No visible items to deselect"),
            Notice::ItemSelected { id, total } => {
                write!(f, "Selected {id} ({total} selected)")
            }
            Notice::ItemDeselected { id, total } => {
                write!(f, "Deselected {id} ({total} selected)")
            }
            Notice::UnknownItem(id) => write!(f, "No visible item matches \"{id}\""),
            Notice::NoSelection => write!(f, "No items selected for removal"),
            Notice::NoMatchingTargets => {
                write!(f, "None of the selected items are on the page any more")
            }
            Notice::ConfirmationRequired { scope, count } => match scope {
                DeleteScope::Selected => {
                    write!(f, "Remove {count} selected items? This cannot be undone. [y/N]")
                }
                DeleteScope::AllVisible => write!(
                    f,
                    "Remove ALL {count} visible items from Watch later? This cannot be undone. [y/N]"
                ),
            },
            Notice::DeletionDeclined => write!(f, "Removal declined, selection kept"),
            Notice::DeletionBusy => write!(f, "A removal is already running"),
            Notice::DeletionStarted { count } => write!(f, "Removing {count} items..."),
            Notice::CancelRequested => {
                write!(f, "Cancelling after the current item finishes")
            }
            Notice::NothingToCancel => write!(f, "No removal is running"),
            Notice::DeletionFinished {
                succeeded,
                failed,
                total,
            } => write!(
                f,
                "Removal finished: {succeeded} succeeded, {failed} failed (of {total})"
            ),
            Notice::DeletionCancelled {
                succeeded,
                failed,
                total,
            } => write!(
                f,
                "Removal cancelled: {succeeded} succeeded, {failed} failed (of {total})"
            ),
        }
    }
}

/// Optional breakdown parts of a bulk selection notice.
fn tally_details(already: usize, already_label: &str, skipped_hidden: usize) -> Vec<String> {
    let mut details = Vec::new();
    if already > 0 {
        details.push(format!("{already} {already_label}"));
    }
    if skipped_hidden > 0 {
        details.push(format!("{skipped_hidden} hidden skipped"));
    }
    details
}
