//! Error taxonomy for the benchmark harness.
//!
//! Every error in this crate is fatal to the run: there is no retry and no
//! partial-result mode. A failing case aborts the whole benchmark.

use std::fmt as StdFmt;
use std::path::PathBuf;

use crate::index::IndexOperation;

/// Errors that can occur while generating workloads or executing cases.
#[derive(Debug)]
pub enum BenchError {
    /// An index adapter was asked to perform an operation outside its
    /// declared capability set.
    UnsupportedOperation {
        /// Name of the offending index adapter.
        index: &'static str,
        /// The operation that is not supported.
        operation: IndexOperation,
    },

    /// A workload file could not be opened or read.
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A workload file violates the binary format contract, e.g. a
    /// range-lookup file with an odd record count.
    MalformedWorkload(String),

    /// The benchmark configuration is invalid, e.g. a thread count other
    /// than 1 or a missing allocator-statistics facility.
    Configuration(String),
}

impl BenchError {
    /// Shorthand for the capability-violation error raised by adapters.
    #[must_use]
    pub const fn unsupported(index: &'static str, operation: IndexOperation) -> Self {
        Self::UnsupportedOperation { index, operation }
    }
}

impl StdFmt::Display for BenchError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::UnsupportedOperation { index, operation } => {
                write!(f, "index '{index}' does not support operation {operation}")
            }
            Self::Io { path, source } => {
                write!(f, "opening {} failed: {source}", path.display())
            }
            Self::MalformedWorkload(message) => {
                write!(f, "malformed workload: {message}")
            }
            Self::Configuration(message) => {
                write!(f, "invalid configuration: {message}")
            }
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
