use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::{Category, TrackerConfig};

/// Which files a scan counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every matching file, regardless of publish state
    All,
    /// Only files under a published directory segment
    Published,
}

/// Filter that skips bookkeeping paths during scans.
/// Include patterns override exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    exclude: Vec<Pattern>,
    include: Vec<Pattern>,
}

impl ScanFilter {
    pub fn new(exclude: &[String], include: &[String]) -> Self {
        Self {
            exclude: exclude
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
            include: include
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }

    /// Check whether a path (relative to its scan root) should be skipped.
    /// Patterns match the full relative path and each single component, so
    /// `.git` covers `.git/HEAD` without needing `**` spelling.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        if self.matches_any(&self.include, relative) {
            return false;
        }
        self.matches_any(&self.exclude, relative)
    }

    fn matches_any(&self, patterns: &[Pattern], relative: &Path) -> bool {
        let full = relative.to_string_lossy();
        for pattern in patterns {
            if pattern.matches(&full) {
                return true;
            }
            for component in relative.components() {
                if pattern.matches(&component.as_os_str().to_string_lossy()) {
                    return true;
                }
            }
        }
        false
    }
}

/// Per-category scan result row (config order preserved)
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub folder: String,
    pub title: String,
    pub planned: usize,
    pub published: usize,
    /// Files actually present on disk, regardless of publish state
    pub discovered: usize,
}

/// Counts for one invocation; recomputed every run
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub categories: Vec<CategoryCount>,
    pub datasets_published: usize,
}

impl ScanReport {
    pub fn notebooks_published(&self) -> usize {
        self.categories.iter().map(|c| c.published).sum()
    }

    pub fn notebooks_discovered(&self) -> usize {
        self.categories.iter().map(|c| c.discovered).sum()
    }

    pub fn planned_total(&self) -> usize {
        self.categories.iter().map(|c| c.planned).sum()
    }
}

/// Walks category and dataset directories and counts matching files
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a TrackerConfig,
    filter: ScanFilter,
}

impl<'a> Scanner<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a TrackerConfig) -> Self {
        Self {
            root: root.into(),
            config,
            filter: config.scan_filter(),
        }
    }

    /// Scan everything the update pipeline needs in one pass
    pub fn scan(&self) -> ScanReport {
        let categories = self
            .config
            .categories
            .iter()
            .map(|cat| CategoryCount {
                folder: cat.folder.clone(),
                title: cat.title.clone(),
                planned: cat.planned,
                published: self.count_notebooks(cat, ScanStatus::Published),
                discovered: self.count_notebooks(cat, ScanStatus::All),
            })
            .collect();

        ScanReport {
            categories,
            datasets_published: self.count_datasets(ScanStatus::Published),
        }
    }

    /// Count notebook files in one category directory.
    /// A missing directory counts as zero.
    pub fn count_notebooks(&self, category: &Category, status: ScanStatus) -> usize {
        let cat_path = self.root.join(&category.folder);
        if !cat_path.is_dir() {
            return 0;
        }

        WalkDir::new(&cat_path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| {
                let relative = match e.path().strip_prefix(&cat_path) {
                    Ok(r) => r,
                    Err(_) => return false,
                };
                if self.filter.is_excluded(relative) {
                    return false;
                }
                if !self.has_notebook_ext(relative) {
                    return false;
                }
                match status {
                    ScanStatus::All => true,
                    ScanStatus::Published => self.in_published_segment(relative),
                }
            })
            .count()
    }

    /// Count dataset files across all configured dataset folders.
    /// Published mode counts recursively under `<folder>/<published>/`;
    /// All mode counts the folder's own entries only.
    pub fn count_datasets(&self, status: ScanStatus) -> usize {
        self.config
            .datasets
            .iter()
            .map(|folder| self.count_dataset_folder(&self.root.join(folder), status))
            .sum()
    }

    fn count_dataset_folder(&self, path: &Path, status: ScanStatus) -> usize {
        match status {
            ScanStatus::Published => {
                let published = path.join(&self.config.scan.published_dir);
                if !published.is_dir() {
                    return 0;
                }
                WalkDir::new(&published)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_file())
                    .filter(|e| {
                        let relative = match e.path().strip_prefix(&published) {
                            Ok(r) => r,
                            Err(_) => return false,
                        };
                        !self.filter.is_excluded(relative) && has_any_ext(e.path())
                    })
                    .count()
            }
            ScanStatus::All => {
                let entries = match fs::read_dir(path) {
                    Ok(entries) => entries,
                    Err(_) => return 0,
                };
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.is_file() && has_any_ext(p))
                    .filter(|p| {
                        p.file_name()
                            .map(|n| !self.filter.is_excluded(Path::new(n)))
                            .unwrap_or(false)
                    })
                    .count()
            }
        }
    }

    fn has_notebook_ext(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy() == self.config.scan.notebook_ext)
            .unwrap_or(false)
    }

    fn in_published_segment(&self, relative: &Path) -> bool {
        let published = self.config.scan.published_dir.as_str();
        relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .any(|c| c.as_os_str().to_string_lossy() == published)
            })
            .unwrap_or(false)
    }
}

fn has_any_ext(path: &Path) -> bool {
    path.extension()
        .map(|ext| !ext.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;
    use tempfile::TempDir;

    fn test_config() -> TrackerConfig {
        let mut config = TrackerConfig::default();
        config.categories = vec![
            Category {
                folder: "computer-vision".to_string(),
                title: "Computer Vision".to_string(),
                planned: 10,
            },
            Category {
                folder: "nlp".to_string(),
                title: "NLP".to_string(),
                planned: 5,
            },
        ];
        config.datasets = vec!["datasets/tabular".to_string()];
        config
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn missing_category_dir_counts_zero() {
        let tmp = TempDir::new().unwrap();
        let config = test_config();
        let scanner = Scanner::new(tmp.path(), &config);

        let report = scanner.scan();
        assert_eq!(report.notebooks_published(), 0);
        assert_eq!(report.notebooks_discovered(), 0);
        assert_eq!(report.datasets_published, 0);
    }

    #[test]
    fn published_is_subset_of_discovered() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "computer-vision/intro.ipynb");
        touch(tmp.path(), "computer-vision/published/cnn.ipynb");
        touch(tmp.path(), "computer-vision/advanced/published/gan.ipynb");
        touch(tmp.path(), "nlp/drafts/tokenizers.ipynb");

        let config = test_config();
        let report = Scanner::new(tmp.path(), &config).scan();

        for row in &report.categories {
            assert!(row.published <= row.discovered, "{}", row.folder);
        }
        assert_eq!(report.notebooks_published(), 2);
        assert_eq!(report.notebooks_discovered(), 4);
    }

    #[test]
    fn published_requires_directory_segment() {
        let tmp = TempDir::new().unwrap();
        // A file merely named "published.ipynb" is not published
        touch(tmp.path(), "nlp/published.ipynb");
        touch(tmp.path(), "nlp/published/bert.ipynb");

        let config = test_config();
        let scanner = Scanner::new(tmp.path(), &config);
        assert_eq!(
            scanner.count_notebooks(&config.categories[1], ScanStatus::Published),
            1
        );
    }

    #[test]
    fn non_notebook_files_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "nlp/published/notes.md");
        touch(tmp.path(), "nlp/published/data.csv");
        touch(tmp.path(), "nlp/published/rnn.ipynb");

        let config = test_config();
        let scanner = Scanner::new(tmp.path(), &config);
        assert_eq!(
            scanner.count_notebooks(&config.categories[1], ScanStatus::Published),
            1
        );
    }

    #[test]
    fn checkpoint_dirs_excluded_by_default() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "nlp/published/rnn.ipynb");
        touch(
            tmp.path(),
            "nlp/published/.ipynb_checkpoints/rnn-checkpoint.ipynb",
        );

        let config = test_config();
        let scanner = Scanner::new(tmp.path(), &config);
        assert_eq!(
            scanner.count_notebooks(&config.categories[1], ScanStatus::Published),
            1
        );
    }

    #[test]
    fn include_overrides_exclude() {
        let filter = ScanFilter::new(
            &["drafts".to_string()],
            &["drafts/keep.ipynb".to_string()],
        );
        assert!(filter.is_excluded(Path::new("drafts/wip.ipynb")));
        assert!(!filter.is_excluded(Path::new("drafts/keep.ipynb")));
    }

    #[test]
    fn dataset_published_counts_recursively() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "datasets/tabular/published/housing.csv");
        touch(tmp.path(), "datasets/tabular/published/v2/housing.parquet");
        touch(tmp.path(), "datasets/tabular/staging.csv");

        let config = test_config();
        let scanner = Scanner::new(tmp.path(), &config);
        assert_eq!(scanner.count_datasets(ScanStatus::Published), 2);
    }

    #[test]
    fn dataset_all_counts_top_level_only() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "datasets/tabular/housing.csv");
        touch(tmp.path(), "datasets/tabular/wine.csv");
        touch(tmp.path(), "datasets/tabular/nested/deep.csv");
        // Extensionless files never count as datasets
        touch(tmp.path(), "datasets/tabular/LICENSE");

        let config = test_config();
        let scanner = Scanner::new(tmp.path(), &config);
        assert_eq!(scanner.count_datasets(ScanStatus::All), 2);
    }

    #[test]
    fn scan_report_totals() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "computer-vision/published/a.ipynb");
        touch(tmp.path(), "nlp/published/b.ipynb");
        touch(tmp.path(), "nlp/c.ipynb");

        let config = test_config();
        let report = Scanner::new(tmp.path(), &config).scan();
        assert_eq!(report.notebooks_published(), 2);
        assert_eq!(report.notebooks_discovered(), 3);
        assert_eq!(report.planned_total(), 15);
    }
}
