//! Shared test utilities for integration tests
//!
//! Tree fixtures, a collision-forcing hasher, and serialized access to the
//! environment variables config discovery reads.

use reshape::apply::{run_apply, ApplyReport, ApplyRequest};
use reshape::config::ScanConfig;
use reshape::generate::{run_generate, GenerateRequest};
use reshape::manifest::Manifest;
use reshape::tree::hasher::{ContentHasher, Xxh64Hasher};
use reshape::types::ContentHash;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Write `files` (relative path, content) under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Hasher that maps every input to the same value, forcing collisions.
pub struct ConstantHasher(pub u64);

impl ContentHasher for ConstantHasher {
    fn hash_reader(&self, reader: &mut dyn Read, _chunk_size: usize) -> io::Result<ContentHash> {
        io::copy(reader, &mut io::sink())?;
        Ok(ContentHash::new(self.0))
    }
}

/// Run `gen` over `root` with the real hasher and default settings.
pub fn generate(root: &Path) -> Manifest {
    let request = GenerateRequest {
        root: root.to_path_buf(),
        omit_collisions: false,
    };
    run_generate(&request, &Xxh64Hasher, &ScanConfig::default())
        .unwrap()
        .manifest
}

/// Run `apply` linking from `source` into `target` with the real hasher.
pub fn apply(source: &Path, target: &Path, manifest: &Manifest) -> ApplyReport {
    apply_with(source, target, manifest, &Xxh64Hasher)
}

pub fn apply_with<H: ContentHasher>(
    source: &Path,
    target: &Path,
    manifest: &Manifest,
    hasher: &H,
) -> ApplyReport {
    let request = ApplyRequest {
        source_root: source.to_path_buf(),
        target_root: target.to_path_buf(),
        replace_conflicts: false,
        dry_run: false,
    };
    run_apply(&request, manifest, hasher, &ScanConfig::default()).unwrap()
}

/// Inode identity of two paths.
#[cfg(unix)]
pub fn same_inode(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let a = fs::metadata(a).unwrap();
    let b = fs::metadata(b).unwrap();
    a.dev() == b.dev() && a.ino() == b.ino()
}

/// Relative paths of every entry (files and directories) under `root`, sorted.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            entry
                .unwrap()
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    out.sort();
    out
}

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        if let Some(orig) = self.home {
            std::env::set_var("HOME", orig);
        } else {
            std::env::remove_var("HOME");
        }

        if let Some(orig) = self.xdg_config_home {
            std::env::set_var("XDG_CONFIG_HOME", orig);
        } else {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }
}

/// Point HOME and XDG_CONFIG_HOME into `test_dir` for the duration of `f`.
///
/// Uses a global mutex to prevent races between parallel tests.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_home = test_dir.path().join("home");

    fs::create_dir_all(&test_config_home).unwrap();
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}
