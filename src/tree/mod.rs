//! Source tree traversal and content hashing
//!
//! Walks a root directory for regular files and hashes their full content.
//! Both `gen` and `apply` scan through here so their hashes agree.

pub mod hasher;
pub mod path;
pub mod walker;
