//! Single `gen` entry point: scan a root and build its manifest.

use crate::config::ScanConfig;
use crate::error::ReshapeError;
use crate::index::{Collision, HashIndex};
use crate::manifest::{FileRecord, Manifest};
use crate::scan::scan_tree;
use crate::tree::hasher::ContentHasher;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

/// Inputs for one `gen` run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub root: PathBuf,
    /// Leave files whose hash is shared within the root out of the manifest
    pub omit_collisions: bool,
}

/// Manifest plus everything the operator should hear about.
#[derive(Debug)]
pub struct GenerateResult {
    pub manifest: Manifest,
    /// Entries that could not be read (`UnreadableFile`)
    pub skipped: Vec<ReshapeError>,
    /// Hashes shared by several files in the scanned root. `targets` lists the
    /// manifest paths involved.
    pub collisions: Vec<Collision>,
    pub omitted: usize,
    pub total_bytes: u64,
}

/// Scan `request.root` and produce a manifest sorted by path.
pub fn run_generate<H: ContentHasher + ?Sized>(
    request: &GenerateRequest,
    hasher: &H,
    config: &ScanConfig,
) -> Result<GenerateResult, ReshapeError> {
    let report = scan_tree(&request.root, hasher, config)?;
    let index = HashIndex::from_scan(&report);

    let mut collisions = Vec::new();
    let mut colliding = HashSet::new();
    for (hash, sources) in index.collisions() {
        colliding.insert(hash);
        let targets: Vec<String> = report
            .files
            .iter()
            .filter(|f| f.hash == hash)
            .map(|f| f.entry.relative.clone())
            .collect();
        let collision = Collision {
            hash,
            sources: sources.to_vec(),
            targets,
        };
        warn!(
            error = %collision.to_error(),
            files = ?collision.targets,
            omitted = request.omit_collisions,
            "Files share a content hash"
        );
        collisions.push(collision);
    }

    let mut omitted = 0;
    let manifest: Manifest = report
        .files
        .iter()
        .filter(|f| {
            let keep = !(request.omit_collisions && colliding.contains(&f.hash));
            if !keep {
                omitted += 1;
            }
            keep
        })
        .map(|f| FileRecord::new(f.entry.relative.clone(), f.hash))
        .collect();

    Ok(GenerateResult {
        manifest,
        skipped: report.skipped,
        collisions,
        omitted,
        total_bytes: report.total_bytes,
    })
}
