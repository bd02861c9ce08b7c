//! Byte-level progress for hashing runs.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Format a byte count in binary units with two decimals, e.g. `1.50 KiB`.
pub fn humanize_bytes(num_bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = num_bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} PiB", value)
}

/// Running total of bytes hashed against a known total. Shared across
/// hashing workers.
#[derive(Debug)]
pub struct ByteProgress {
    total: u64,
    done: AtomicU64,
}

/// Point-in-time view of a [`ByteProgress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub done: u64,
    pub total: u64,
}

impl ByteProgress {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            done: AtomicU64::new(0),
        }
    }

    /// Record `bytes` more as hashed and return the updated snapshot.
    pub fn advance(&self, bytes: u64) -> ProgressSnapshot {
        let done = self.done.fetch_add(bytes, Ordering::Relaxed) + bytes;
        ProgressSnapshot {
            done,
            total: self.total,
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            done: self.done.load(Ordering::Relaxed),
            total: self.total,
        }
    }
}

impl ProgressSnapshot {
    /// Fraction complete in `[0, 1]`. An empty run counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        }
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[bytes: {} / {} ({:.2}%)]",
            humanize_bytes(self.done),
            humanize_bytes(self.total),
            self.fraction() * 100.0
        )
    }
}
