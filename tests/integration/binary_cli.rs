//! Integration tests that run the built `reshape` binary with default logging.
//!
//! Each run is bounded: a child still alive after the deadline is killed and
//! the test fails.

use super::test_utils::write_tree;
use reshape::manifest::Manifest;
use reshape::tree::hasher::compute_content_hash;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const RUN_DEADLINE: Duration = Duration::from_secs(30);

/// A command with an isolated HOME/XDG environment and no log overrides.
fn reshape_command(temp_dir: &TempDir, working_dir: &Path) -> Command {
    let home = temp_dir.path().join("home");
    let config_home = temp_dir.path().join("config");
    let data_home = temp_dir.path().join("data");
    for dir in [&home, &config_home, &data_home] {
        fs::create_dir_all(dir).unwrap();
    }

    let mut command = Command::new(env!("CARGO_BIN_EXE_reshape"));
    command
        .current_dir(working_dir)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env("XDG_DATA_HOME", &data_home)
        .env_remove("RESHAPE_LOG")
        .env_remove("RESHAPE_LOG_FORMAT")
        .env_remove("RESHAPE_LOG_OUTPUT")
        .env_remove("RESHAPE_LOG_MODULES");
    command
}

/// Run `command`, feeding `stdin`, and wait at most [`RUN_DEADLINE`].
fn run_bounded(mut command: Command, stdin: &[u8]) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        // `gen` may exit without reading its input
        let mut child_stdin = child.stdin.take().unwrap();
        child_stdin.write_all(stdin).ok();
    }

    let started = Instant::now();
    loop {
        if child.try_wait().unwrap().is_some() {
            break;
        }
        if started.elapsed() > RUN_DEADLINE {
            child.kill().ok();
            let output = child.wait_with_output().unwrap();
            panic!(
                "reshape still running after {:?}; stderr={}",
                RUN_DEADLINE,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        thread::sleep(Duration::from_millis(20));
    }
    child.wait_with_output().unwrap()
}

#[test]
fn test_binary_gen_with_default_logging_finishes() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    write_tree(&work.join("src"), &[("a.txt", "hello"), ("b/c.txt", "world")]);

    let mut command = reshape_command(&temp_dir, &work);
    command.args(["gen", "src"]);
    let output = run_bounded(command, b"");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "reshape gen failed: stderr={}", stderr);

    let manifest = Manifest::read_from(output.stdout.as_slice()).unwrap();
    let records: Vec<(&str, u64)> = manifest
        .records()
        .iter()
        .map(|r| (r.path.as_str(), r.hash.value()))
        .collect();
    assert_eq!(
        records,
        vec![
            ("a.txt", compute_content_hash(b"hello").value()),
            ("b/c.txt", compute_content_hash(b"world").value()),
        ]
    );

    // Per-file progress is logged on stderr by default
    assert!(stderr.contains("Hashing source tree"));
    assert!(stderr.contains("b/c.txt"));
    assert!(stderr.contains("Scanned 2 files"));
}

#[cfg(unix)]
#[test]
fn test_binary_gen_then_apply_with_default_logging() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    write_tree(&work.join("src"), &[("a.txt", "hello"), ("b/c.txt", "world")]);

    let mut gen = reshape_command(&temp_dir, &work);
    gen.args(["gen", "src"]);
    let generated = run_bounded(gen, b"");
    assert!(generated.status.success());

    let edited = String::from_utf8(generated.stdout)
        .unwrap()
        .replace("b/c.txt", "renamed/c.txt");

    let mut apply = reshape_command(&temp_dir, &work);
    apply.args(["apply", "src", "--target", "out"]);
    let applied = run_bounded(apply, edited.as_bytes());

    let stderr = String::from_utf8_lossy(&applied.stderr);
    assert!(applied.status.success(), "reshape apply failed: stderr={}", stderr);
    assert!(applied.stdout.is_empty());
    assert!(stderr.contains("linked:          2"));
    assert!(super::test_utils::same_inode(
        &work.join("src").join("a.txt"),
        &work.join("out").join("a.txt")
    ));
    assert!(super::test_utils::same_inode(
        &work.join("src").join("b").join("c.txt"),
        &work.join("out").join("renamed").join("c.txt")
    ));
}

#[test]
fn test_binary_malformed_manifest_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    write_tree(&work.join("src"), &[("a.txt", "hello")]);

    let mut apply = reshape_command(&temp_dir, &work);
    apply.args(["apply", "src", "--target", "out"]);
    let output = run_bounded(apply, b"{not json");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed manifest"));
    assert!(!work.join("out").exists());
}
