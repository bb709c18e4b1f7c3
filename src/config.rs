//! Benchmark run configuration.

use std::path::PathBuf;

use crate::error::BenchError;

/// Configuration of one benchmark run.
///
/// The measurement protocol is strictly single-threaded: the allocator
/// statistics facility is process-global and not reentrant, so thread counts
/// other than 1 are rejected by [`BenchmarkConfiguration::validate`].
#[derive(Debug, Clone)]
pub struct BenchmarkConfiguration {
    /// How often each case is executed.
    pub iterations: usize,
    /// Number of worker threads. Must be 1.
    pub threads: usize,
    /// Binary file holding the keys to index.
    pub data_file: PathBuf,
    /// Binary file holding the equality-lookup probe keys.
    pub equality_lookup_file: PathBuf,
    /// Binary file holding the range bounds, consumed pairwise.
    pub range_lookup_file: PathBuf,
    /// Where to write the JSON report. `None` prints to stdout instead.
    pub output_file: Option<PathBuf>,
}

impl BenchmarkConfiguration {
    /// Checks the configuration before any case executes.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Configuration`] for a zero iteration count or a
    /// thread count other than 1.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.iterations == 0 {
            return Err(BenchError::Configuration(
                "at least one iteration is required".into(),
            ));
        }
        if self.threads != 1 {
            return Err(BenchError::Configuration(format!(
                "multi-threaded execution is not supported (requested {} threads)",
                self.threads
            )));
        }
        Ok(())
    }
}
