use chrono::NaiveDate;

use crate::config::Targets;
use crate::scan::ScanReport;

/// Exact table header the README patcher anchors on
pub const TABLE_HEADER: &str = "| Category | Notebooks | Published |";

/// Badge fragment in the shields URL encoding: `label-done%20%2F%20target`
pub fn notebook_badge(done: usize, target: usize) -> String {
    format!("Notebooks%20Published-{}%20%2F%20{}", done, target)
}

pub fn dataset_badge(done: usize, target: usize) -> String {
    format!("Datasets%20Published-{}%20%2F%20{}", done, target)
}

/// Inline counter fragment, e.g. `**Published:** 12`
pub fn published_counter(done: usize) -> String {
    format!("**Published:** {}", done)
}

/// README table data rows: one per category plus the bold Total row.
/// The Notebooks column carries the planned count.
pub fn table_rows(report: &ScanReport) -> Vec<String> {
    let mut rows: Vec<String> = report
        .categories
        .iter()
        .map(|c| format!("| {} | {} | {} |", c.title, c.planned, c.published))
        .collect();
    rows.push(format!(
        "| **Total** | **{}** | **{}** |",
        report.planned_total(),
        report.notebooks_published()
    ));
    rows
}

/// Full progress log document, regenerated from scratch each run
pub fn progress_log(report: &ScanReport, targets: Targets, today: NaiveDate) -> String {
    let mut lines = Vec::new();
    lines.push("# Progress Log".to_string());
    lines.push(String::new());
    lines.push(format!("Last updated: {}", today.format("%B %d, %Y")));
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!(
        "| Notebooks Published | {} / {} |",
        report.notebooks_published(),
        targets.notebooks
    ));
    lines.push(format!(
        "| Datasets Published | {} / {} |",
        report.datasets_published, targets.datasets
    ));
    lines.push(String::new());
    lines.push("## By Category".to_string());
    lines.push(String::new());
    lines.push("| Category | Planned | Published |".to_string());
    lines.push("|----------|---------|-----------|".to_string());
    for row in &report.categories {
        lines.push(format!(
            "| {} | {} | {} |",
            row.title, row.planned, row.published
        ));
    }
    lines.push(format!(
        "| **Total** | **{}** | **{}** |",
        report.planned_total(),
        report.notebooks_published()
    ));
    lines.push(String::new());
    lines.join("\n")
}

/// Static changelog stub describing the commit-message convention
pub fn changelog() -> String {
    let mut lines = Vec::new();
    lines.push("# Changelog".to_string());
    lines.push(String::new());
    lines.push("Track every notebook and dataset published to Kaggle.".to_string());
    lines.push(String::new());
    lines.push("## How to add an entry".to_string());
    lines.push(String::new());
    lines.push(
        "Entries are added via commit messages starting with `[publish]` or `[dataset]`."
            .to_string(),
    );
    lines.push("Run `pubtrack update` after every publish to keep counts current.".to_string());
    lines.push(String::new());
    lines.join("\n")
}
