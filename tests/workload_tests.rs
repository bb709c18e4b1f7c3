//! End-to-end workload generation tests against real files on disk.

#![expect(clippy::unwrap_used, reason = "fail fast in tests")]

use std::fs;
use std::path::PathBuf;

use imibench::error::BenchError;
use imibench::workload::binary::encode_binary_file;
use imibench::workload::{Dataset, generate_equality_lookups, generate_range_lookups};

fn write_workload(dir: &tempfile::TempDir, name: &str, keys: &[u64]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, encode_binary_file(keys)).unwrap();
    path
}

fn write_workload_u32(dir: &tempfile::TempDir, name: &str, keys: &[u32]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, encode_binary_file(keys)).unwrap();
    path
}

#[test]
fn dataset_assigns_positional_tids() {
    let dir = tempfile::tempdir().unwrap();
    let keys: Vec<u64> = vec![286_631_063, 9_501_002, 74_021_799, 1];
    let path = write_workload(&dir, "data.bin", &keys);

    let dataset: Dataset<u64, u64> = Dataset::generate(&path).unwrap();
    assert_eq!(dataset.keys, keys);
    assert_eq!(dataset.values, vec![1, 2, 3, 4]);
    assert_eq!(dataset.entries[2], (74_021_799, 3));
    assert_eq!(dataset.float_keys.len(), 4);
}

#[test]
fn dataset_generation_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let keys: Vec<u64> = (0..256).map(|i| i * 37 + 5).collect();
    let path = write_workload(&dir, "data.bin", &keys);

    let first: Dataset<u64, u64> = Dataset::generate(&path).unwrap();
    let second: Dataset<u64, u64> = Dataset::generate(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn u32_records_are_four_bytes_wide() {
    let dir = tempfile::tempdir().unwrap();
    let keys: Vec<u32> = vec![7, 42, 0xffff_ffff];
    let path = write_workload_u32(&dir, "data32.bin", &keys);

    assert_eq!(fs::metadata(&path).unwrap().len(), 8 + 3 * 4);
    let dataset: Dataset<u32, u64> = Dataset::generate(&path).unwrap();
    assert_eq!(dataset.keys, keys);
}

#[test]
fn equality_lookups_preserve_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workload(&dir, "eq.bin", &[30, 11, 30, 9999]);

    let lookups = generate_equality_lookups::<u64>(&path).unwrap();
    let probed: Vec<u64> = lookups.iter().map(|lookup| lookup.key).collect();
    assert_eq!(probed, vec![30, 11, 30, 9999]);
}

#[test]
fn range_lookups_are_built_pairwise_with_ordered_bounds() {
    let dir = tempfile::tempdir().unwrap();
    // second pair arrives reversed in the file
    let path = write_workload(&dir, "range.bin", &[11, 25, 34, 28]);

    let lookups = generate_range_lookups::<u64>(&path).unwrap();
    assert_eq!(lookups.len(), 2);
    assert_eq!((lookups[0].lower_bound, lookups[0].upper_bound), (11, 25));
    assert_eq!((lookups[1].lower_bound, lookups[1].upper_bound), (28, 34));
}

#[test]
fn odd_range_record_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workload(&dir, "range.bin", &[11, 25, 34]);

    assert!(matches!(
        generate_range_lookups::<u64>(&path),
        Err(BenchError::MalformedWorkload(_))
    ));
}

#[test]
fn missing_workload_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_written.bin");

    let result: Result<Dataset<u64, u64>, _> = Dataset::generate(&path);
    assert!(matches!(result, Err(BenchError::Io { .. })));
}

#[test]
fn truncated_workload_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = encode_binary_file(&[1u64, 2, 3]);
    bytes.truncate(bytes.len() - 4);
    let path = dir.path().join("short.bin");
    fs::write(&path, bytes).unwrap();

    let result: Result<Dataset<u64, u64>, _> = Dataset::generate(&path);
    assert!(matches!(result, Err(BenchError::MalformedWorkload(_))));
}

#[test]
fn empty_workload_file_yields_an_empty_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workload(&dir, "empty.bin", &[]);

    let dataset: Dataset<u64, u64> = Dataset::generate(&path).unwrap();
    assert!(dataset.is_empty());
}
