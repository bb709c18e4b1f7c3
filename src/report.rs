//! The structured record of one benchmark run.
//!
//! A [`Report`] is assembled incrementally by the runner and immutable once
//! returned. It serializes to JSON via serde and prints in a compact
//! human-readable form via `Display`.

use std::fmt as StdFmt;
use std::path::Path;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::BenchError;

fn serialize_nanos<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
}

/// One timed sample: wall-clock duration and allocator-reported byte delta.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Measurement {
    /// Wall-clock duration of the measured operation.
    #[serde(rename = "duration_ns", serialize_with = "serialize_nanos")]
    pub duration: Duration,
    /// Allocated-byte delta attributed to the index; fixed zero for cases
    /// whose allocation belongs to setup rather than the measured operation.
    pub index_size_bytes: u64,
}

/// All measurements of a single case execution (one iteration).
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionStatistics {
    /// The samples taken during this execution.
    pub measurements: Vec<Measurement>,
}

/// Aggregated statistics of one benchmark case across all iterations.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStatistics {
    /// Name of the case kind, e.g. `BulkLoad`.
    pub case_name: String,
    /// Name of the index adapter under test.
    pub index_name: String,
    /// Key type name.
    pub key_type: String,
    /// Value type name.
    pub value_type: String,
    /// Number of dataset rows the case operated on.
    pub data_size: usize,
    /// Per-iteration statistics, in execution order.
    pub executions: Vec<ExecutionStatistics>,
}

/// The configuration subset recorded in the report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunConfiguration {
    /// How often each case was executed.
    pub iterations: usize,
    /// Number of worker threads (always 1).
    pub threads: usize,
}

/// Configuration plus ordered per-case statistics of one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// The run configuration.
    pub configuration: RunConfiguration,
    /// Per-case statistics, in case order.
    pub cases: Vec<CaseStatistics>,
}

impl Report {
    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`BenchError::Io`] if the file cannot be created or written.
    pub fn export_json(&self, path: &Path) -> Result<(), BenchError> {
        let to_io_error = |source: std::io::Error| BenchError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path).map_err(to_io_error)?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|error| to_io_error(std::io::Error::other(error)))
    }
}

impl StdFmt::Display for Report {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        writeln!(f, "==== Configuration ====")?;
        writeln!(f, "iterations: {}", self.configuration.iterations)?;
        writeln!(f, "threads:    {}", self.configuration.threads)?;
        writeln!(f, "======== Cases ========")?;
        for case in &self.cases {
            writeln!(f, "case name:  {}", case.case_name)?;
            writeln!(f, "index name: {}", case.index_name)?;
            writeln!(f, "key type:   {}", case.key_type)?;
            writeln!(f, "value type: {}", case.value_type)?;
            writeln!(f, "data size:  {}", case.data_size)?;
            writeln!(f, "executions:")?;
            for execution in &case.executions {
                writeln!(f, "  measurements:")?;
                for measurement in &execution.measurements {
                    writeln!(
                        f,
                        "    duration: {} ns, index size: {} bytes",
                        measurement.duration.as_nanos(),
                        measurement.index_size_bytes
                    )?;
                }
            }
            writeln!(f, "-----------------------")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report {
            configuration: RunConfiguration {
                iterations: 2,
                threads: 1,
            },
            cases: vec![CaseStatistics {
                case_name: "BulkLoad".into(),
                index_name: "STD B-Tree Map".into(),
                key_type: "u64".into(),
                value_type: "u64".into(),
                data_size: 20,
                executions: vec![ExecutionStatistics {
                    measurements: vec![Measurement {
                        duration: Duration::from_nanos(1234),
                        index_size_bytes: 4096,
                    }],
                }],
            }],
        }
    }

    #[test]
    fn json_shape_matches_the_export_contract() {
        let value = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(value["configuration"]["iterations"], 2);
        assert_eq!(value["configuration"]["threads"], 1);
        let case = &value["cases"][0];
        assert_eq!(case["case_name"], "BulkLoad");
        assert_eq!(case["index_name"], "STD B-Tree Map");
        assert_eq!(case["key_type"], "u64");
        assert_eq!(case["value_type"], "u64");
        assert_eq!(case["data_size"], 20);
        let measurement = &case["executions"][0]["measurements"][0];
        assert_eq!(measurement["duration_ns"], 1234);
        assert_eq!(measurement["index_size_bytes"], 4096);
    }

    #[test]
    fn display_lists_every_measurement() {
        let text = sample_report().to_string();
        assert!(text.contains("==== Configuration ===="));
        assert!(text.contains("duration: 1234 ns, index size: 4096 bytes"));
    }
}
