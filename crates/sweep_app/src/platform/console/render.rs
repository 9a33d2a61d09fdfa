use sweep_core::{AppViewModel, DeletionProgress, DeletionStats, ItemRowView, Notice};
use sweep_engine::{HostError, ProbeReport};

const BAR_WIDTH: usize = 20;

pub fn notice(notice: &Notice) -> String {
    format!("* {notice}")
}

pub fn status(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!(
        "Bulk mode {} | {} items, {} shown | {} selected",
        if view.enabled { "on" } else { "off" },
        view.total_items,
        view.visible_items,
        view.selected_count
    )];

    let mut filters = Vec::new();
    if !view.title_filter.is_empty() {
        filters.push(format!("text \"{}\"", view.title_filter));
    }
    if !view.range_filter.is_empty() {
        filters.push(format!("range \"{}\"", view.range_filter));
    }
    if !filters.is_empty() {
        lines.push(format!("Filters: {}", filters.join(", ")));
    }

    if let Some(progress) = &view.deletion {
        lines.push(self::progress(progress));
    } else if view.can_delete_selected {
        lines.push(format!("delete-selected will remove {} items", view.selected_count));
    }
    lines
}

/// Visible rows only; hidden rows are what the filters are for.
pub fn rows(view: &AppViewModel) -> Vec<String> {
    let lines: Vec<String> = view.rows.iter().filter(|row| row.visible).map(row).collect();
    if lines.is_empty() {
        return vec!["(no visible items)".to_string()];
    }
    lines
}

fn row(row: &ItemRowView) -> String {
    let mark = if row.selected { "[x]" } else { "[ ]" };
    let index = row
        .display_index
        .map(|index| format!("{index:>4}"))
        .unwrap_or_else(|| "   -".to_string());
    if row.channel_name.is_empty() {
        format!("{mark} {index}  {}  ({})", row.title, row.id)
    } else {
        format!("{mark} {index}  {} / {}  ({})", row.title, row.channel_name, row.id)
    }
}

pub fn progress(progress: &DeletionProgress) -> String {
    let percent = progress.percent() as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {}/{} ({percent}%) ok {}, failed {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        progress.cursor,
        progress.total,
        progress.succeeded,
        progress.failed
    )
}

pub fn stats(stats: &DeletionStats, today: &str) -> String {
    format!(
        "Removed today: {} | all time: {}",
        stats.on_day(today),
        stats.total
    )
}

pub fn probe(result: &Result<Vec<ProbeReport>, HostError>) -> Vec<String> {
    let reports = match result {
        Ok(reports) => reports,
        Err(err) => return vec![format!("Probe failed: {err}")],
    };
    if reports.is_empty() {
        return vec!["Probe found no items".to_string()];
    }
    reports
        .iter()
        .map(|report| {
            let index = report
                .item
                .display_index
                .map(|index| index.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "#{index} {} \"{}\": menu button {}",
                report.item.id,
                report.item.title,
                report.trigger_locator.unwrap_or("NOT FOUND")
            )
        })
        .collect()
}
