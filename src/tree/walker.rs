//! Filesystem walker collecting the regular files under a scan root

use crate::error::ReshapeError;
use crate::tree::path::to_manifest_path;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A regular file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path as reachable from the process (root joined with the relative part)
    pub path: PathBuf,
    /// Forward-slash path relative to the root, as written to the manifest
    pub relative: String,
    pub size: u64,
}

/// Result of a walk: files in manifest-path order plus the entries that could
/// not be examined.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub files: Vec<FileEntry>,
    pub skipped: Vec<ReshapeError>,
}

impl WalkOutcome {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Path component names to prune (e.g. ".git"). Empty by default.
    pub ignore_patterns: Vec<String>,
}

/// Filesystem walker. Symbolic links are never followed.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the root and collect every regular file.
    ///
    /// Fails only when the root itself is unusable. Entries below the root
    /// that cannot be read are returned in `skipped`.
    pub fn walk(&self) -> Result<WalkOutcome, ReshapeError> {
        validate_root(&self.root)?;

        let mut outcome = WalkOutcome::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.should_ignore(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ReshapeError::invalid_root(&self.root, e.to_string()));
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                    outcome.skipped.push(ReshapeError::UnreadableFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let file_type = entry.file_type();
            if !file_type.is_file() {
                if !file_type.is_dir() {
                    debug!(path = %entry.path().display(), "Skipping non-regular entry");
                }
                continue;
            }

            let relative = match entry
                .path()
                .strip_prefix(&self.root)
                .ok()
                .and_then(to_manifest_path)
            {
                Some(relative) => relative,
                None => {
                    warn!(path = %entry.path().display(), "Skipping path not representable in a manifest");
                    outcome.skipped.push(ReshapeError::UnreadableFile {
                        path: entry.path().to_path_buf(),
                        reason: "path is not valid UTF-8".to_string(),
                    });
                    continue;
                }
            };

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Skipping file without metadata");
                    outcome.skipped.push(ReshapeError::UnreadableFile {
                        path: entry.path().to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            outcome.files.push(FileEntry {
                path: entry.into_path(),
                relative,
                size,
            });
        }

        // Directory-first traversal order differs from plain string order
        // ("a.txt" < "a/b"), so sort on the manifest form.
        outcome.files.sort_by(|a, b| a.relative.cmp(&b.relative));

        Ok(outcome)
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}

/// Ensure `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), ReshapeError> {
    let metadata = std::fs::metadata(root)
        .map_err(|e| ReshapeError::invalid_root(root, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(ReshapeError::invalid_root(root, "not a directory"));
    }
    Ok(())
}
