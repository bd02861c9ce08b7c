//! HashIndex: content hash to the source files that produce it.

use crate::error::ReshapeError;
use crate::scan::{HashedFile, ScanReport};
use crate::types::ContentHash;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of looking a hash up in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Exactly one source file has this hash
    Unique(&'a Path),
    /// Several source files share this hash; none may be chosen
    Collision(&'a [PathBuf]),
    /// No source file has this hash
    Missing,
}

/// Mapping from content hash to the source paths producing it.
///
/// Built fresh from one scan and dropped when the run ends.
#[derive(Debug, Default)]
pub struct HashIndex {
    by_hash: BTreeMap<ContentHash, Vec<PathBuf>>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a HashedFile>,
    {
        let mut index = Self::new();
        for file in files {
            index.insert(file.hash, file.entry.path.clone());
        }
        index
    }

    pub fn from_scan(report: &ScanReport) -> Self {
        Self::from_files(&report.files)
    }

    pub fn insert(&mut self, hash: ContentHash, path: PathBuf) {
        let paths = self.by_hash.entry(hash).or_default();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    pub fn lookup(&self, hash: ContentHash) -> Lookup<'_> {
        match self.by_hash.get(&hash).map(Vec::as_slice) {
            None | Some([]) => Lookup::Missing,
            Some([single]) => Lookup::Unique(single.as_path()),
            Some(many) => Lookup::Collision(many),
        }
    }

    /// Number of distinct hashes.
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Hashes shared by more than one source path, in hash order.
    pub fn collisions(&self) -> impl Iterator<Item = (ContentHash, &[PathBuf])> {
        self.by_hash
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(hash, paths)| (*hash, paths.as_slice()))
    }
}

/// One hash shared by several source files, with the manifest paths that
/// referenced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub hash: ContentHash,
    pub sources: Vec<PathBuf>,
    /// Manifest paths left unlinked because of this collision
    pub targets: Vec<String>,
}

impl Collision {
    pub fn to_error(&self) -> ReshapeError {
        ReshapeError::HashCollision {
            hash: self.hash,
            sources: self.sources.clone(),
        }
    }
}
