//! Manifest path conversion and validation utilities
//!
//! Manifest paths are relative, forward-slash separated, and never escape the
//! directory they are resolved against.

use std::path::{Component, Path, PathBuf};

/// Convert a path relative to a scan root into its manifest form.
///
/// Returns `None` when the path has a component that is not valid UTF-8 or
/// is not a plain name (root, prefix, `.` or `..`).
pub fn to_manifest_path(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_str()?),
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Check a manifest path and turn it into a relative `PathBuf`.
///
/// Rejects empty paths, leading slashes, empty segments, `.` and `..`
/// segments, and backslashes (which would be separators on Windows).
pub fn parse_manifest_path(raw: &str) -> Result<PathBuf, String> {
    if raw.is_empty() {
        return Err("path is empty".to_string());
    }
    if raw.starts_with('/') {
        return Err(format!("path {:?} has a leading slash", raw));
    }
    if raw.contains('\\') {
        return Err(format!("path {:?} contains a backslash", raw));
    }

    let mut path = PathBuf::new();
    for segment in raw.split('/') {
        match segment {
            "" => return Err(format!("path {:?} has an empty segment", raw)),
            "." | ".." => {
                return Err(format!("path {:?} has a {:?} segment", raw, segment));
            }
            _ => path.push(segment),
        }
    }

    // Drive prefixes such as "C:" survive the segment checks on Windows.
    if !matches!(path.components().next(), Some(Component::Normal(_))) {
        return Err(format!("path {:?} is not relative", raw));
    }

    Ok(path)
}
