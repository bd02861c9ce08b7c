//! Content hashing for regular files using XXH64

use crate::types::ContentHash;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use xxhash_rust::xxh64::Xxh64;

/// Seed shared by `gen` and `apply`. A different seed is a different hash
/// function and will match nothing.
pub const XXH64_SEED: u64 = 0;

/// Default read size when streaming file content into the hasher.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// A content hash function over a whole byte stream.
///
/// The scanner and the linker are generic over this so tests can force
/// collisions with a substitute implementation.
pub trait ContentHasher: Send + Sync {
    /// Hash everything `reader` yields, reading at most `chunk_size` bytes at a time.
    fn hash_reader(&self, reader: &mut dyn Read, chunk_size: usize) -> io::Result<ContentHash>;

    /// Hash the full content of the file at `path`.
    fn hash_file(&self, path: &Path, chunk_size: usize) -> io::Result<ContentHash> {
        let mut file = File::open(path)?;
        self.hash_reader(&mut file, chunk_size)
    }
}

/// XXH64 with the fixed [`XXH64_SEED`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh64Hasher;

impl ContentHasher for Xxh64Hasher {
    fn hash_reader(&self, reader: &mut dyn Read, chunk_size: usize) -> io::Result<ContentHash> {
        let mut hasher = Xxh64::new(XXH64_SEED);
        let mut buf = vec![0u8; chunk_size.max(1)];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buf[..n]);
        }
        Ok(ContentHash::new(hasher.digest()))
    }
}

/// Compute the content hash of an in-memory byte slice.
pub fn compute_content_hash(content: &[u8]) -> ContentHash {
    ContentHash::new(xxhash_rust::xxh64::xxh64(content, XXH64_SEED))
}
