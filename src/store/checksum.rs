//! CRC32 integrity checks for submission records
//!
//! Every record carries a CRC32 (IEEE polynomial) over its framed bytes, and
//! every read verifies it. A mismatch means the log is unreliable and is
//! treated as fatal.

use crc32fast::Hasher;

/// Computes the CRC32 of the given bytes. Deterministic.
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Returns whether the bytes hash to the expected checksum.
pub fn verify(data: &[u8], expected: u32) -> bool {
    crc32(data) == expected
}
