//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use reshape::manifest::{FileRecord, Manifest};
use reshape::tree::hasher::{self, ContentHasher, Xxh64Hasher};
use reshape::tree::path::{parse_manifest_path, to_manifest_path};
use reshape::types::ContentHash;

/// Test that content hashing is deterministic
#[test]
fn test_content_hash_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<Vec<u8>>(), any::<Vec<u8>>()), |(content1, content2)| {
            let hash1 = hasher::compute_content_hash(&content1);
            let hash2 = hasher::compute_content_hash(&content2);

            if content1 == content2 {
                assert_eq!(hash1, hash2);
            }

            // 64-bit collisions are possible, just rare enough to skip
            if content1 != content2 {
                prop_assume!(hash1 != hash2);
            }

            Ok(())
        })
        .unwrap();
}

/// Test that the chunk size never changes the streamed hash
#[test]
fn test_streamed_hash_matches_one_shot_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(any::<u8>(), 0..4096), 1usize..512),
            |(content, chunk_size)| {
                let streamed = Xxh64Hasher
                    .hash_reader(&mut content.as_slice(), chunk_size)
                    .unwrap();
                assert_eq!(streamed, hasher::compute_content_hash(&content));
                Ok(())
            },
        )
        .unwrap();
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ -][a-zA-Z0-9_. -]{0,11}".prop_filter("dot segments", |s| s != "." && s != "..")
}

/// Test that a valid manifest path survives parse then render unchanged
#[test]
fn test_manifest_path_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(segment(), 1..5), |segments| {
            let raw = segments.join("/");
            let parsed = parse_manifest_path(&raw).unwrap();
            assert_eq!(to_manifest_path(&parsed).as_deref(), Some(raw.as_str()));
            Ok(())
        })
        .unwrap();
}

/// Test that any path with a `..` segment is refused
#[test]
fn test_parent_segment_always_rejected_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(segment(), 0..3), prop::collection::vec(segment(), 0..3)),
            |(before, after)| {
                let mut parts = before;
                parts.push("..".to_string());
                parts.extend(after);
                assert!(parse_manifest_path(&parts.join("/")).is_err());
                Ok(())
            },
        )
        .unwrap();
}

/// Test that hashes read back identically whether written as numbers or strings
#[test]
fn test_hash_serialization_forms_agree_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(segment(), any::<u64>()), |(path, value)| {
            let manifest = Manifest::new(vec![FileRecord::new(path.clone(), ContentHash::new(value))]);
            let mut numeric = Vec::new();
            manifest.write_to(&mut numeric, false).unwrap();

            let quoted = serde_json::json!([{ "path": path, "hash": value.to_string() }]).to_string();

            let from_numeric = Manifest::read_from(numeric.as_slice()).unwrap();
            let from_quoted = Manifest::read_from(quoted.as_bytes()).unwrap();
            assert_eq!(from_numeric, from_quoted);
            assert_eq!(from_numeric.records()[0].hash.value(), value);
            Ok(())
        })
        .unwrap();
}
