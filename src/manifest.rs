//! Manifest: the JSON list of `{path, hash}` records shared by `gen` and `apply`.

use crate::error::ReshapeError;
use crate::tree::path::parse_manifest_path;
use crate::types::ContentHash;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::PathBuf;

/// One regular file: its manifest path and content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRecord {
    pub path: String,
    pub hash: ContentHash,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, hash: ContentHash) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }

    /// The record's path as a relative filesystem path.
    pub fn relative_path(&self) -> Result<PathBuf, ReshapeError> {
        parse_manifest_path(&self.path).map_err(ReshapeError::MalformedManifest)
    }
}

/// Ordered list of records. Order carries no meaning to `apply`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    records: Vec<FileRecord>,
}

impl Manifest {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check every path is a safe relative path and no path repeats.
    pub fn validate(&self) -> Result<(), ReshapeError> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for (index, record) in self.records.iter().enumerate() {
            record.relative_path().map_err(|e| match e {
                ReshapeError::MalformedManifest(msg) => {
                    ReshapeError::MalformedManifest(format!("record {}: {}", index, msg))
                }
                other => other,
            })?;
            if !seen.insert(record.path.as_str()) {
                return Err(ReshapeError::MalformedManifest(format!(
                    "record {}: duplicate path {:?}",
                    index, record.path
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a manifest from JSON.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, ReshapeError> {
        let manifest: Manifest = serde_json::from_reader(reader)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Write the manifest as JSON followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W, pretty: bool) -> Result<(), ReshapeError> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl FromIterator<FileRecord> for Manifest {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Manifest {
    type Item = FileRecord;
    type IntoIter = std::vec::IntoIter<FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
