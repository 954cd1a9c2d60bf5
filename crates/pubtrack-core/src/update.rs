use std::path::Path;

use chrono::Local;

use crate::artifact::{write_artifact, WriteStatus};
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::format;
use crate::readme::{patch_readme, PatchOutcome};
use crate::scan::{ScanReport, Scanner};

/// Everything one update run did, for the CLI to render
#[derive(Debug, Clone)]
pub struct UpdateSummary {
    pub report: ScanReport,
    pub readme: PatchOutcome,
    pub progress: WriteStatus,
    pub changelog: WriteStatus,
    pub dry_run: bool,
}

/// Linear pipeline: scan, patch the README, regenerate the progress log
/// and changelog. With `dry_run` set nothing is written; the summary
/// still reports what would have happened.
pub fn run_update(config: &TrackerConfig, root: &Path, dry_run: bool) -> Result<UpdateSummary> {
    if !root.is_dir() {
        return Err(TrackerError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let report = Scanner::new(root, config).scan();

    let readme = patch_readme(
        &root.join(&config.artifacts.readme),
        &report,
        config.targets,
        dry_run,
    )?;

    let progress_text = format::progress_log(&report, config.targets, Local::now().date_naive());
    let progress = write_artifact(&root.join(&config.artifacts.progress), &progress_text, dry_run)?;

    let changelog = write_artifact(
        &root.join(&config.artifacts.changelog),
        &format::changelog(),
        dry_run,
    )?;

    Ok(UpdateSummary {
        report,
        readme,
        progress,
        changelog,
        dry_run,
    })
}
