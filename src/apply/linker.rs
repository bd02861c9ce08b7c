//! Hardlink creation for a single manifest record.

use crate::error::ReshapeError;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// What happened at one target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    /// New hardlink created
    Linked,
    /// Target already was this exact file; nothing to do
    AlreadyLinked,
    /// A different file was removed and the link created in its place
    Replaced,
    /// Dry run: a link would be created (or replace a file)
    Planned,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOptions {
    /// Remove a different regular file found at the target
    pub replace: bool,
    /// Decide the outcome without touching the filesystem
    pub dry_run: bool,
}

/// Hardlink `target` to `source`, creating parent directories as needed.
///
/// `is_protected` is consulted before removing an existing target under
/// `replace`; a protected path is reported as a conflict instead.
pub fn link_file(
    source: &Path,
    target: &Path,
    options: LinkOptions,
    is_protected: &dyn Fn(&Path) -> bool,
) -> Result<LinkOutcome, ReshapeError> {
    match fs::symlink_metadata(target) {
        Ok(existing) => {
            if existing.is_file() && same_file(source, target)? {
                return Ok(LinkOutcome::AlreadyLinked);
            }
            if !options.replace || existing.is_dir() || is_protected(target) {
                return Err(ReshapeError::LinkConflict {
                    target: target.to_path_buf(),
                });
            }
            if options.dry_run {
                return Ok(LinkOutcome::Planned);
            }
            fs::remove_file(target)?;
            hard_link(source, target)?;
            Ok(LinkOutcome::Replaced)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if options.dry_run {
                return Ok(LinkOutcome::Planned);
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            hard_link(source, target)?;
            Ok(LinkOutcome::Linked)
        }
        Err(e) => Err(ReshapeError::IoError(e)),
    }
}

fn hard_link(source: &Path, target: &Path) -> Result<(), ReshapeError> {
    fs::hard_link(source, target).map_err(|e| {
        if is_cross_device(&e) {
            ReshapeError::CrossDeviceLink {
                source_path: source.to_path_buf(),
                target: target.to_path_buf(),
            }
        } else if e.kind() == io::ErrorKind::AlreadyExists {
            ReshapeError::LinkConflict {
                target: target.to_path_buf(),
            }
        } else {
            ReshapeError::IoError(e)
        }
    })
}

/// Whether two paths name the same inode.
#[cfg(unix)]
pub fn same_file(a: &Path, b: &Path) -> Result<bool, ReshapeError> {
    use std::os::unix::fs::MetadataExt;

    let a = fs::metadata(a)?;
    let b = fs::metadata(b)?;
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

/// Without inode identity every existing target counts as different.
#[cfg(not(unix))]
pub fn same_file(_a: &Path, _b: &Path) -> Result<bool, ReshapeError> {
    Ok(false)
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV on Linux, macOS and the BSDs
    e.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}

/// Device id of `path`, or of its nearest existing ancestor.
#[cfg(unix)]
pub fn device_of(path: &Path) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;

    path.ancestors()
        .find_map(|p| fs::metadata(p).ok())
        .map(|m| m.dev())
}

#[cfg(not(unix))]
pub fn device_of(_path: &Path) -> Option<u64> {
    None
}
