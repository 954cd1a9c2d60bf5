use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Targets;
use crate::error::Result;
use crate::format;
use crate::scan::ScanReport;

static NOTEBOOK_BADGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Notebooks%20Published-\d+%20%2F%20\d+").expect("valid pattern"));
static DATASET_BADGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Datasets%20Published-\d+%20%2F%20\d+").expect("valid pattern"));
static COUNTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*Published:\*\* \d+").expect("valid pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// Content changed and was written (or would be, under dry-run)
    Updated,
    /// Already up to date; nothing written
    Unchanged,
    /// Target file absent; soft skip
    MissingFile,
}

/// Result of one README patch pass
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub status: PatchStatus,
    pub warnings: Vec<String>,
}

/// Patch the three README regions (badges, table, counter) in place,
/// leaving all other content untouched. The file is written only when
/// the patched text differs from the original.
pub fn patch_readme(
    path: &Path,
    report: &ScanReport,
    targets: Targets,
    dry_run: bool,
) -> Result<PatchOutcome> {
    if !path.exists() {
        return Ok(PatchOutcome {
            status: PatchStatus::MissingFile,
            warnings: Vec::new(),
        });
    }

    let original = fs::read_to_string(path)?;
    let mut warnings = Vec::new();

    let mut updated = update_badges(&original, report, targets);
    match update_table(&updated, report) {
        Some(text) => updated = text,
        None => warnings.push(format!(
            "table header `{}` not found; table left untouched",
            format::TABLE_HEADER
        )),
    }
    updated = update_counter(&updated, report.notebooks_published());

    if updated == original {
        return Ok(PatchOutcome {
            status: PatchStatus::Unchanged,
            warnings,
        });
    }

    if !dry_run {
        fs::write(path, &updated)?;
    }

    Ok(PatchOutcome {
        status: PatchStatus::Updated,
        warnings,
    })
}

/// Badge region: two anchored substitutions over the shields fragments
fn update_badges(text: &str, report: &ScanReport, targets: Targets) -> String {
    let notebooks = format::notebook_badge(report.notebooks_published(), targets.notebooks);
    let datasets = format::dataset_badge(report.datasets_published, targets.datasets);

    let text = NOTEBOOK_BADGE.replace_all(text, notebooks.as_str());
    DATASET_BADGE.replace_all(&text, datasets.as_str()).into_owned()
}

/// Table region: locate the exact header, keep it and the separator line,
/// replace the contiguous block of data rows that follows. Returns None
/// when the header (or its separator) is absent.
fn update_table(text: &str, report: &ScanReport) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let header_idx = lines
        .iter()
        .position(|l| l.trim() == format::TABLE_HEADER)?;

    let sep_idx = header_idx + 1;
    if sep_idx >= lines.len() || !is_separator(lines[sep_idx]) {
        return None;
    }

    let mut end = sep_idx + 1;
    while end < lines.len() && lines[end].trim_start().starts_with('|') {
        end += 1;
    }

    let mut out: Vec<String> = lines[..=sep_idx].iter().map(|s| s.to_string()).collect();
    out.extend(format::table_rows(report));
    out.extend(lines[end..].iter().map(|s| s.to_string()));

    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    Some(result)
}

fn is_separator(line: &str) -> bool {
    let t = line.trim();
    t.starts_with('|') && t.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Counter region: the inline bold label
fn update_counter(text: &str, published: usize) -> String {
    COUNTER
        .replace_all(text, format::published_counter(published).as_str())
        .into_owned()
}
