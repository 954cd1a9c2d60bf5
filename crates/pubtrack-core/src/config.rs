use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::scan::ScanFilter;

const CONFIG_FILE: &str = "pubtrack.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# pubtrack configuration file
# Location: <portfolio root>/pubtrack.toml
#
# Every key is optional; missing keys fall back to the defaults below.

# Dataset folders, counted in aggregate. Top-level key: must stay above
# the first [section].
datasets = [
    "datasets/image-datasets",
    "datasets/tabular-datasets",
    "datasets/nlp-datasets",
    "datasets/time-series-datasets",
    "datasets/competition-ready-datasets",
]

[targets]
# Badge denominators for the portfolio README.
notebooks = 150
datasets = 30

[scan]
# File extension that marks a notebook.
notebook_ext = "ipynb"
# Directory segment that marks a file as published.
published_dir = "published"
# Glob patterns excluded from scanning.
# Example: exclude = [".git", ".ipynb_checkpoints", "drafts/**"]
exclude = [".git", ".ipynb_checkpoints"]
# Patterns to always include (overrides exclude).
include = []

[artifacts]
readme = "README.md"
progress = "PROGRESS.md"
changelog = "CHANGELOG.md"

# One entry per category: folder name, display title, planned notebook count.
[[categories]]
folder = "computer-vision"
title = "Computer Vision"
planned = 25

[[categories]]
folder = "machine-learning"
title = "Machine Learning"
planned = 25

[[categories]]
folder = "deep-learning-gpu"
title = "Deep Learning (GPU)"
planned = 25

[[categories]]
folder = "nlp"
title = "NLP"
planned = 25

[[categories]]
folder = "math-statistics"
title = "Math & Statistics"
planned = 25

[[categories]]
folder = "eda-visualization"
title = "EDA & Visualization"
planned = 25
"#;

/// A topical grouping of notebooks, backed by one directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Directory name under the portfolio root
    pub folder: String,
    /// Display name used in tables and summaries
    pub title: String,
    /// Planned notebook count for this category
    pub planned: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Targets {
    #[serde(default = "default_notebook_target")]
    pub notebooks: usize,
    #[serde(default = "default_dataset_target")]
    pub datasets: usize,
}

fn default_notebook_target() -> usize {
    150
}

fn default_dataset_target() -> usize {
    30
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            notebooks: default_notebook_target(),
            datasets: default_dataset_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Extension that marks a notebook file
    #[serde(default = "default_notebook_ext")]
    pub notebook_ext: String,

    /// Directory segment that marks a file as published
    #[serde(default = "default_published_dir")]
    pub published_dir: String,

    /// Glob patterns excluded from scanning
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Patterns to always include (overrides exclude)
    #[serde(default)]
    pub include: Vec<String>,
}

fn default_notebook_ext() -> String {
    "ipynb".to_string()
}

fn default_published_dir() -> String {
    "published".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![".git".to_string(), ".ipynb_checkpoints".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            notebook_ext: default_notebook_ext(),
            published_dir: default_published_dir(),
            exclude: default_exclude(),
            include: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactConfig {
    #[serde(default = "default_readme")]
    pub readme: String,
    #[serde(default = "default_progress")]
    pub progress: String,
    #[serde(default = "default_changelog")]
    pub changelog: String,
}

fn default_readme() -> String {
    "README.md".to_string()
}

fn default_progress() -> String {
    "PROGRESS.md".to_string()
}

fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            readme: default_readme(),
            progress: default_progress(),
            changelog: default_changelog(),
        }
    }
}

/// Tracker configuration, loaded from pubtrack.toml at the portfolio root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Dataset folders, counted in aggregate. Serialized first: a plain
    /// key must precede the table sections in the emitted TOML.
    #[serde(default = "default_dataset_folders")]
    pub datasets: Vec<String>,

    #[serde(default)]
    pub targets: Targets,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub artifacts: ArtifactConfig,

    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

fn default_categories() -> Vec<Category> {
    let entries = [
        ("computer-vision", "Computer Vision"),
        ("machine-learning", "Machine Learning"),
        ("deep-learning-gpu", "Deep Learning (GPU)"),
        ("nlp", "NLP"),
        ("math-statistics", "Math & Statistics"),
        ("eda-visualization", "EDA & Visualization"),
    ];
    entries
        .iter()
        .map(|(folder, title)| Category {
            folder: folder.to_string(),
            title: title.to_string(),
            planned: 25,
        })
        .collect()
}

fn default_dataset_folders() -> Vec<String> {
    [
        "datasets/image-datasets",
        "datasets/tabular-datasets",
        "datasets/nlp-datasets",
        "datasets/time-series-datasets",
        "datasets/competition-ready-datasets",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            targets: Targets::default(),
            scan: ScanConfig::default(),
            artifacts: ArtifactConfig::default(),
            categories: default_categories(),
            datasets: default_dataset_folders(),
        }
    }
}

impl TrackerConfig {
    /// Load config from the portfolio root, falling back to defaults
    /// when no config file exists
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_file(&root.join(CONFIG_FILE))
    }

    /// Load config from an explicit file path (--config override)
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: TrackerConfig =
            toml::from_str(&content).map_err(|e| TrackerError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Save config to the portfolio root
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path for a root
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Write the commented default template, refusing to clobber an
    /// existing file unless `force` is set
    pub fn init(root: &Path, force: bool) -> Result<PathBuf> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        if path.exists() && !force {
            return Err(TrackerError::ConfigExists { path });
        }

        fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(path)
    }

    /// Build the scan filter from the exclude/include patterns
    pub fn scan_filter(&self) -> ScanFilter {
        ScanFilter::new(&self.scan.exclude, &self.scan.include)
    }

    /// Sum of configured planned counts across categories
    pub fn planned_total(&self) -> usize {
        self.categories.iter().map(|c| c.planned).sum()
    }
}
