//! # imibench
//!
//! A microbenchmark harness for comparing in-memory index structures under
//! uniform workloads: bulk load, bulk insert, point insert, point erase,
//! equality lookup and range lookup.
//!
//! Every competitor is wrapped behind the same capability-based contract
//! ([`index::IndexAdapter`]); the harness guarantees unbiased, repeatable
//! measurement of whatever structure is plugged in, not the performance of
//! any particular one.
//!
//! | Component | Module |
//! |-----------|--------|
//! | Workload generation | [`workload`] |
//! | Adapter contract + competitors | [`index`] |
//! | Benchmark cases | [`case`] |
//! | Runner / measurement protocol | [`runner`] |
//! | Structured report | [`report`] |
//!
//! ## Measurement protocol
//!
//! Execution is strictly single-threaded. A fresh adapter instance is built
//! per iteration, CPU caches are busted between iterations, and memory
//! deltas come from jemalloc's allocator statistics (`jemalloc` feature,
//! default on), epoch-bumped before every sample.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use imibench::case::{BenchmarkCase, CaseBulkInsert};
//! use imibench::config::BenchmarkConfiguration;
//! use imibench::index::{BTreeMapIndex, KeyColumn};
//! use imibench::runner::BenchmarkRunner;
//! use imibench::workload::Dataset;
//!
//! # fn main() -> Result<(), imibench::error::BenchError> {
//! let dataset: Arc<Dataset<u64, u64>> =
//!     Arc::new(Dataset::generate(Path::new("data_uint64.bin"))?);
//! let column = Arc::new(KeyColumn::from_entries(&dataset.entries));
//!
//! let cases: Vec<Box<dyn BenchmarkCase>> = vec![Box::new(
//!     CaseBulkInsert::<BTreeMapIndex<u64, u64>, u64, u64>::new(&dataset, &column),
//! )];
//! let config = BenchmarkConfiguration {
//!     iterations: 3,
//!     threads: 1,
//!     data_file: "data_uint64.bin".into(),
//!     equality_lookup_file: "eq_uint64.bin".into(),
//!     range_lookup_file: "range_uint64.bin".into(),
//!     output_file: None,
//! };
//! let report = BenchmarkRunner::new(cases, config)?.run()?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod case;
pub mod config;
pub mod error;
pub mod index;
pub mod memory;
pub mod report;
pub mod runner;
pub mod timer;
pub mod workload;

pub use case::BenchmarkCase;
pub use config::BenchmarkConfiguration;
pub use error::BenchError;
pub use index::{IndexAdapter, IndexOperation, KeyColumn};
pub use report::Report;
pub use runner::BenchmarkRunner;
pub use workload::Dataset;
