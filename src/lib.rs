//! Reshape: reorganize a directory tree by content identity
//!
//! `gen` records each regular file's relative path and XXH64 content hash as a
//! JSON manifest. `apply` reads an edited manifest, rescans a content root, and
//! hardlinks files into the manifest's layout by hash rather than by path.

pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod progress;
pub mod scan;
pub mod tree;
pub mod types;
