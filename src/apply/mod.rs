//! Single `apply` entry point: rescan a content root and hardlink manifest
//! records into the output root by hash.
//!
//! The whole hash index is built before any link is made. A hash produced by
//! more than one source file is never resolved: every record naming it is
//! skipped and reported once as a collision.

pub mod linker;

use crate::config::ScanConfig;
use crate::error::ReshapeError;
use crate::index::{Collision, HashIndex, Lookup};
use crate::manifest::Manifest;
use crate::scan::scan_tree;
use crate::tree::hasher::ContentHasher;
use crate::tree::walker::validate_root;
use crate::types::ContentHash;
use linker::{device_of, link_file, LinkOptions, LinkOutcome};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Inputs for one `apply` run.
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    /// Root rescanned for content
    pub source_root: PathBuf,
    /// Root manifest paths are resolved against
    pub target_root: PathBuf,
    pub replace_conflicts: bool,
    pub dry_run: bool,
}

/// A record that resolved to a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedRecord {
    pub path: String,
    pub source: PathBuf,
    pub outcome: LinkOutcome,
}

/// A record that was skipped because its link could not be made.
#[derive(Debug)]
pub struct RecordFailure {
    pub path: String,
    pub error: ReshapeError,
}

/// Per-record results of an `apply` run.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub dry_run: bool,
    pub linked: Vec<LinkedRecord>,
    /// Manifest paths whose hash no source file produced
    pub missing: Vec<String>,
    /// One entry per colliding hash referenced by the manifest
    pub collisions: Vec<Collision>,
    /// Conflicts, cross-device failures and other per-record I/O errors
    pub failures: Vec<RecordFailure>,
    /// Source files that could not be read during the rescan
    pub unreadable_sources: Vec<ReshapeError>,
}

impl ApplyReport {
    pub fn count(&self, outcome: LinkOutcome) -> usize {
        self.linked.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Records that did not end up linked.
    pub fn skipped_records(&self) -> usize {
        self.missing.len()
            + self.collisions.iter().map(|c| c.targets.len()).sum::<usize>()
            + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped_records() == 0 && self.unreadable_sources.is_empty()
    }
}

/// Link every record of `manifest` it can and report the rest.
///
/// Fatal errors (bad roots, malformed manifest, output root on another
/// device) are returned before any link is created.
pub fn run_apply<H: ContentHasher + ?Sized>(
    request: &ApplyRequest,
    manifest: &Manifest,
    hasher: &H,
    config: &ScanConfig,
) -> Result<ApplyReport, ReshapeError> {
    manifest.validate()?;
    validate_root(&request.source_root)?;
    check_target_root(&request.target_root)?;
    check_same_device(&request.source_root, &request.target_root)?;

    let scan = scan_tree(&request.source_root, hasher, config)?;
    let index = HashIndex::from_scan(&scan);
    info!(
        records = manifest.len(),
        sources = scan.file_count(),
        hashes = index.len(),
        "Source index built"
    );
    if index.is_empty() && !manifest.is_empty() {
        warn!(
            root = %request.source_root.display(),
            "Source root has no readable files; every record will be missing"
        );
    }

    let protected: HashSet<PathBuf> = if request.replace_conflicts {
        scan.files
            .iter()
            .filter_map(|f| dunce::canonicalize(&f.entry.path).ok())
            .collect()
    } else {
        HashSet::new()
    };
    let is_protected = |path: &Path| {
        dunce::canonicalize(path)
            .map(|p| protected.contains(&p))
            .unwrap_or(false)
    };

    let options = LinkOptions {
        replace: request.replace_conflicts,
        dry_run: request.dry_run,
    };

    let mut report = ApplyReport {
        dry_run: request.dry_run,
        unreadable_sources: scan.skipped,
        ..ApplyReport::default()
    };
    let mut collisions: BTreeMap<ContentHash, Collision> = BTreeMap::new();

    for record in manifest.records() {
        match index.lookup(record.hash) {
            Lookup::Missing => {
                debug!(path = %record.path, hash = %record.hash, "No source file for hash");
                report.missing.push(record.path.clone());
            }
            Lookup::Collision(sources) => {
                collisions
                    .entry(record.hash)
                    .or_insert_with(|| Collision {
                        hash: record.hash,
                        sources: sources.to_vec(),
                        targets: Vec::new(),
                    })
                    .targets
                    .push(record.path.clone());
            }
            Lookup::Unique(source) => {
                let target = request.target_root.join(record.relative_path()?);
                match link_file(source, &target, options, &is_protected) {
                    Ok(outcome) => {
                        info!(
                            source = %source.display(),
                            target = %target.display(),
                            ?outcome,
                            "Linked"
                        );
                        report.linked.push(LinkedRecord {
                            path: record.path.clone(),
                            source: source.to_path_buf(),
                            outcome,
                        });
                    }
                    Err(error) => {
                        warn!(path = %record.path, %error, "Skipping record");
                        report.failures.push(RecordFailure {
                            path: record.path.clone(),
                            error,
                        });
                    }
                }
            }
        }
    }

    for collision in collisions.values() {
        warn!(
            error = %collision.to_error(),
            sources = ?collision.sources,
            targets = ?collision.targets,
            "Omitting hard links for colliding hash"
        );
    }
    report.collisions = collisions.into_values().collect();

    Ok(report)
}

fn check_target_root(target_root: &Path) -> Result<(), ReshapeError> {
    match std::fs::metadata(target_root) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(ReshapeError::invalid_root(target_root, "not a directory")),
        // Created on demand by the first link
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReshapeError::invalid_root(target_root, e.to_string())),
    }
}

fn check_same_device(source_root: &Path, target_root: &Path) -> Result<(), ReshapeError> {
    match (device_of(source_root), device_of(target_root)) {
        (Some(source_dev), Some(target_dev)) if source_dev != target_dev => {
            Err(ReshapeError::CrossDeviceLink {
                source_path: source_root.to_path_buf(),
                target: target_root.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}
