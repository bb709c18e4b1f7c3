//! Length-prefixed binary workload files.
//!
//! Format: an 8-byte little-endian record count, followed by that many
//! fixed-width little-endian records of the key type. No header versioning,
//! no checksum.

use std::path::Path;

use crate::error::BenchError;
use crate::index::BenchKey;

/// Loads all records of a binary workload file.
///
/// # Errors
///
/// [`BenchError::Io`] if the file cannot be read,
/// [`BenchError::MalformedWorkload`] if the payload is shorter than the
/// record count promises.
pub fn load_binary_file<K: BenchKey>(path: &Path) -> Result<Vec<K>, BenchError> {
    let bytes = std::fs::read(path).map_err(|source| BenchError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.len() < 8 {
        return Err(BenchError::MalformedWorkload(format!(
            "{}: too short for the 8-byte record count header",
            path.display()
        )));
    }
    let mut header = [0u8; 8];
    header.copy_from_slice(&bytes[..8]);
    let count = usize::try_from(u64::from_le_bytes(header)).map_err(|_| {
        BenchError::MalformedWorkload(format!(
            "{}: record count does not fit this platform",
            path.display()
        ))
    })?;

    let payload = &bytes[8..];
    // the count comes straight from the file and must not be trusted
    let expected = count.checked_mul(K::ENCODED_LEN).ok_or_else(|| {
        BenchError::MalformedWorkload(format!(
            "{}: record count {count} overflows the addressable payload size",
            path.display()
        ))
    })?;
    if payload.len() < expected {
        return Err(BenchError::MalformedWorkload(format!(
            "{}: header promises {count} records ({expected} bytes) but only \
             {} payload bytes are present",
            path.display(),
            payload.len()
        )));
    }

    Ok(payload[..expected]
        .chunks_exact(K::ENCODED_LEN)
        .map(K::decode)
        .collect())
}

/// Serializes keys into the binary workload format, for fixtures and ad hoc
/// file generation.
#[must_use]
pub fn encode_binary_file<K: BenchKey + Into<u64>>(keys: &[K]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + keys.len() * K::ENCODED_LEN);
    bytes.extend_from_slice(&(keys.len() as u64).to_le_bytes());
    for key in keys {
        let encoded: u64 = (*key).into();
        bytes.extend_from_slice(&encoded.to_le_bytes()[..K::ENCODED_LEN]);
    }
    bytes
}
