//! Integration tests for layered configuration loading

use super::test_utils::with_xdg_env;
use reshape::config::{global_config_path, ConfigLoader, WORKSPACE_CONFIG_FILE};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let work = test_dir.path().join("work");
        fs::create_dir_all(&work).unwrap();

        let config = ConfigLoader::load(&work).unwrap();

        assert_eq!(config.scan.chunk_size, 64 * 1024);
        assert!(config.scan.threads.is_none());
        assert_eq!(config.logging.output, "stderr");
    });
}

#[cfg(target_os = "linux")]
#[test]
fn test_working_dir_file_overrides_global_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let global = global_config_path().unwrap();
        assert!(global.starts_with(test_dir.path()));
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(
            &global,
            "[scan]\nchunk_size = 1024\nthreads = 3\n\n[apply]\ntarget = \"/srv/library\"\n",
        )
        .unwrap();

        let work = test_dir.path().join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(work.join(WORKSPACE_CONFIG_FILE), "[scan]\nchunk_size = 2048\n").unwrap();

        let config = ConfigLoader::load(&work).unwrap();

        assert_eq!(config.scan.chunk_size, 2048);
        assert_eq!(config.scan.threads, Some(3));
        assert_eq!(config.apply.target, Some(PathBuf::from("/srv/library")));
    });
}

#[test]
fn test_invalid_working_dir_file_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let work = test_dir.path().join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(work.join(WORKSPACE_CONFIG_FILE), "[scan]\nthreads = 0\n").unwrap();

        assert!(ConfigLoader::load(&work).is_err());
    });
}
