//! Benchmark execution loop and measurement hygiene.

use std::hint::black_box;

use crate::case::BenchmarkCase;
use crate::config::BenchmarkConfiguration;
use crate::error::BenchError;
use crate::report::{CaseStatistics, Report, RunConfiguration};

/// Larger than any realistic CPU cache hierarchy.
const CACHE_BUSTER_BYTES: usize = 200 * 1024 * 1024;

/// Executes an ordered list of cases for a configured iteration count and
/// assembles the [`Report`].
///
/// Between iterations (and before the first) the runner busts CPU caches by
/// writing every byte of a 200 MiB buffer, so no timed operation benefits
/// from data a previous iteration left behind. This is measurement hygiene,
/// not benchmark payload.
pub struct BenchmarkRunner {
    cases: Vec<Box<dyn BenchmarkCase>>,
    config: BenchmarkConfiguration,
}

impl BenchmarkRunner {
    /// Builds a runner over `cases`.
    ///
    /// # Errors
    ///
    /// [`BenchError::Configuration`] if the configuration is invalid, e.g.
    /// a thread count other than 1. Surfaced before any case executes.
    pub fn new(
        cases: Vec<Box<dyn BenchmarkCase>>,
        config: BenchmarkConfiguration,
    ) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self { cases, config })
    }

    /// Runs all cases for the configured iteration count.
    ///
    /// # Errors
    ///
    /// The first error of any case execution; a failing case aborts the
    /// whole run.
    pub fn run(&self) -> Result<Report, BenchError> {
        let mut case_statistics = Vec::with_capacity(self.cases.len());

        for case in &self.cases {
            tracing::info!(
                case = case.name(),
                index = case.index_name(),
                key_type = case.key_type(),
                value_type = case.value_type(),
                "running case"
            );

            let mut executions = Vec::with_capacity(self.config.iterations);
            for iteration in 0..self.config.iterations {
                tracing::debug!(iteration = iteration + 1, "iteration");
                Self::clear_cache();
                executions.push(case.execute()?);
            }

            case_statistics.push(CaseStatistics {
                case_name: case.name().to_owned(),
                index_name: case.index_name().to_owned(),
                key_type: case.key_type().to_owned(),
                value_type: case.value_type().to_owned(),
                data_size: case.data_size(),
                executions,
            });
        }

        Ok(Report {
            configuration: RunConfiguration {
                iterations: self.config.iterations,
                threads: self.config.threads,
            },
            cases: case_statistics,
        })
    }

    /// Evicts case-irrelevant data from CPU caches by touching every byte of
    /// a buffer larger than the cache hierarchy. `black_box` keeps the
    /// optimizer from deleting the otherwise dead writes.
    fn clear_cache() {
        let mut data = vec![42u8; CACHE_BUSTER_BYTES];
        for byte in &mut data {
            *byte = byte.wrapping_add(1);
        }
        black_box(&mut data);
    }
}
