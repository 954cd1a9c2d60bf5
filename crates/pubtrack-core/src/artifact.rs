use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// What a regenerating write did to the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// File did not exist before
    Created,
    /// Existing content differed and was replaced
    Updated,
    /// New content is identical to what was on disk
    Unchanged,
}

/// Overwrite an owned artifact (progress log, changelog) with freshly
/// generated content. The tool owns the whole file, so no merge logic:
/// the previous content is compared by hash only to report the outcome.
pub fn write_artifact(path: &Path, content: &str, dry_run: bool) -> Result<WriteStatus> {
    let status = match fs::read(path) {
        Ok(existing) => {
            if compute_hash(&existing) == compute_hash(content.as_bytes()) {
                WriteStatus::Unchanged
            } else {
                WriteStatus::Updated
            }
        }
        Err(_) => WriteStatus::Created,
    };

    if !dry_run {
        fs::write(path, content)?;
    }

    Ok(status)
}

pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    format!("sha256:{}", hex::encode(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_write_creates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("PROGRESS.md");

        let status = write_artifact(&path, "# Progress Log\n", false).unwrap();
        assert_eq!(status, WriteStatus::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Progress Log\n");
    }

    #[test]
    fn rewrite_with_same_content_reports_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("PROGRESS.md");

        write_artifact(&path, "same\n", false).unwrap();
        let status = write_artifact(&path, "same\n", false).unwrap();
        assert_eq!(status, WriteStatus::Unchanged);
    }

    #[test]
    fn rewrite_with_new_content_reports_updated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");

        write_artifact(&path, "old\n", false).unwrap();
        let status = write_artifact(&path, "new\n", false).unwrap();
        assert_eq!(status, WriteStatus::Updated);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn dry_run_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("PROGRESS.md");

        let status = write_artifact(&path, "content\n", true).unwrap();
        assert_eq!(status, WriteStatus::Created);
        assert!(!path.exists());
    }

    #[test]
    fn hash_is_prefixed_and_stable() {
        let a = compute_hash(b"abc");
        let b = compute_hash(b"abc");
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
        assert_ne!(a, compute_hash(b"abd"));
    }
}
