//! Scanning: walk a root and hash every regular file under it.
//!
//! Hashing runs on a rayon pool; results come back in walk order (sorted by
//! manifest path), so output is deterministic regardless of scheduling.

use crate::config::ScanConfig;
use crate::error::ReshapeError;
use crate::progress::ByteProgress;
use crate::tree::hasher::ContentHasher;
use crate::tree::walker::{FileEntry, Walker};
use crate::types::ContentHash;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A regular file and its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedFile {
    pub entry: FileEntry,
    pub hash: ContentHash,
}

/// Everything a scan produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub root: PathBuf,
    /// Hashed files sorted by manifest path
    pub files: Vec<HashedFile>,
    /// Entries that could not be read (`UnreadableFile`)
    pub skipped: Vec<ReshapeError>,
    pub total_bytes: u64,
}

impl ScanReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Walk `root` and hash each regular file.
///
/// Fails only when `root` is not a usable directory or the worker pool cannot
/// be built. Files that fail to hash are reported in `skipped`.
pub fn scan_tree<H: ContentHasher + ?Sized>(
    root: &Path,
    hasher: &H,
    config: &ScanConfig,
) -> Result<ScanReport, ReshapeError> {
    config.validate().map_err(ReshapeError::ConfigError)?;

    let walked = Walker::with_config(root.to_path_buf(), config.walker_config()).walk()?;
    let total_bytes = walked.total_bytes();
    info!(
        root = %root.display(),
        files = walked.files.len(),
        bytes = total_bytes,
        "Hashing source tree"
    );

    let progress = ByteProgress::new(total_bytes);
    let chunk_size = config.chunk_size;

    let hash_all = || -> Vec<Result<HashedFile, ReshapeError>> {
        walked
            .files
            .par_iter()
            .map(|entry| hash_entry(entry, hasher, chunk_size, &progress))
            .collect()
    };

    let results = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ReshapeError::ConfigError(format!("Failed to build hashing pool: {}", e)))?
            .install(hash_all),
        None => hash_all(),
    };

    let mut report = ScanReport {
        root: root.to_path_buf(),
        files: Vec::with_capacity(results.len()),
        skipped: walked.skipped,
        total_bytes,
    };
    for result in results {
        match result {
            Ok(file) => report.files.push(file),
            Err(e) => report.skipped.push(e),
        }
    }

    Ok(report)
}

fn hash_entry<H: ContentHasher + ?Sized>(
    entry: &FileEntry,
    hasher: &H,
    chunk_size: usize,
    progress: &ByteProgress,
) -> Result<HashedFile, ReshapeError> {
    match hasher.hash_file(&entry.path, chunk_size) {
        Ok(hash) => {
            let snapshot = progress.advance(entry.size);
            info!("{} {} {}", snapshot, hash, entry.relative);
            Ok(HashedFile {
                entry: entry.clone(),
                hash,
            })
        }
        Err(e) => {
            warn!(path = %entry.path.display(), error = %e, "Skipping unreadable file");
            Err(ReshapeError::UnreadableFile {
                path: entry.path.clone(),
                reason: e.to_string(),
            })
        }
    }
}
