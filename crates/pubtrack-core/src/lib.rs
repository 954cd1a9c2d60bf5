pub mod artifact;
pub mod config;
pub mod error;
pub mod format;
pub mod readme;
pub mod scan;
pub mod update;

pub use artifact::{compute_hash, write_artifact, WriteStatus};
pub use config::{ArtifactConfig, Category, ScanConfig, Targets, TrackerConfig};
pub use error::{Result, TrackerError};
pub use readme::{patch_readme, PatchOutcome, PatchStatus};
pub use scan::{CategoryCount, ScanFilter, ScanReport, ScanStatus, Scanner};
pub use update::{run_update, UpdateSummary};
