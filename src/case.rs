//! Benchmark cases: one composable unit of work each.
//!
//! A case binds one adapter type to one operation under test plus the shared
//! workload. Every execution follows the same protocol:
//!
//! 1. Setup (untimed): construct a fresh adapter instance and, for lookup
//!    and erase cases, pre-populate it.
//! 2. Measurement window: sample allocated bytes (load/insert cases only),
//!    run exactly the operation under test across the full workload between
//!    two timer laps, sample allocated bytes again.
//! 3. Teardown: the adapter instance is dropped with the iteration, so no
//!    state leaks between measurements.
//!
//! Lookup and erase cases report a fixed zero memory delta: their allocation
//! is attributable to setup, not the measured operation.

use std::hint::black_box;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};
use crate::memory;
use crate::report::{ExecutionStatistics, Measurement};
use crate::timer::Timer;
use crate::workload::{Dataset, EqualityLookup, RangeLookup};

/// The object-safe face of a benchmark case, as consumed by the runner.
pub trait BenchmarkCase {
    /// Runs one full execution (setup, measurement window, teardown).
    ///
    /// # Errors
    ///
    /// Any [`BenchError`]; a failing case aborts the whole run.
    fn execute(&self) -> Result<ExecutionStatistics, BenchError>;

    /// Name of the case kind, e.g. `BulkLoad`.
    fn name(&self) -> &'static str;

    /// Name of the index adapter under test.
    fn index_name(&self) -> &'static str;

    /// Key type name.
    fn key_type(&self) -> &'static str;

    /// Value type name.
    fn value_type(&self) -> &'static str;

    /// Number of dataset rows the case operates on.
    fn data_size(&self) -> usize;
}

/// Shared state of every concrete case: the read-only dataset and the
/// tid→key column handed to adapter constructors.
#[derive(Debug)]
struct CaseContext<A, K, V> {
    dataset: Arc<Dataset<K, V>>,
    column: Arc<KeyColumn<K>>,
    _adapter: PhantomData<fn() -> A>,
}

impl<A, K: BenchKey, V: BenchValue> CaseContext<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn new(dataset: &Arc<Dataset<K, V>>, column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            dataset: Arc::clone(dataset),
            column: Arc::clone(column),
            _adapter: PhantomData,
        }
    }

    fn fresh_index(&self) -> A {
        A::create(&self.column)
    }

    /// Pre-populates an index along the load path the adapter declares:
    /// bulk insert when supported, sequential single inserts otherwise.
    fn populate(&self, index: &mut A) -> Result<(), BenchError> {
        if A::supports(IndexOperation::BulkInsert) {
            index.bulk_insert(&self.dataset.entries)
        } else {
            for (key, value) in &self.dataset.entries {
                index.insert(*key, *value)?;
            }
            Ok(())
        }
    }
}

macro_rules! case_metadata {
    () => {
        fn index_name(&self) -> &'static str {
            A::name()
        }

        fn key_type(&self) -> &'static str {
            std::any::type_name::<K>()
        }

        fn value_type(&self) -> &'static str {
            std::any::type_name::<V>()
        }

        fn data_size(&self) -> usize {
            self.context.dataset.len()
        }
    };
}

// ============================================================================
//  BulkLoad
// ============================================================================

/// Populate an empty index from the full entry set in one call.
///
/// For adapters that require pre-sorted input, sorting happens inside the
/// measurement window: it is part of the cost of taking the bulk-load path.
#[derive(Debug)]
pub struct CaseBulkLoad<A, K, V> {
    context: CaseContext<A, K, V>,
}

impl<A, K: BenchKey, V: BenchValue> CaseBulkLoad<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    /// Creates the case over the shared workload.
    #[must_use]
    pub fn new(dataset: &Arc<Dataset<K, V>>, column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            context: CaseContext::new(dataset, column),
        }
    }
}

impl<A, K: BenchKey, V: BenchValue> BenchmarkCase for CaseBulkLoad<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn execute(&self) -> Result<ExecutionStatistics, BenchError> {
        let memory_before = memory::allocated_bytes()?;
        let mut index = self.context.fresh_index();

        let duration = if A::requires_sorted_bulk_load() {
            let mut entries = self.context.dataset.entries.clone();
            let mut timer = Timer::start();
            entries.sort_unstable();
            index.bulk_load(&entries)?;
            timer.lap()
        } else {
            let mut timer = Timer::start();
            index.bulk_load(&self.context.dataset.entries)?;
            timer.lap()
        };

        let memory_after = memory::allocated_bytes()?;
        Ok(ExecutionStatistics {
            measurements: vec![Measurement {
                duration,
                index_size_bytes: memory_after.saturating_sub(memory_before),
            }],
        })
    }

    fn name(&self) -> &'static str {
        "BulkLoad"
    }

    case_metadata!();
}

// ============================================================================
//  BulkInsert
// ============================================================================

/// Populate a (here: fresh) index from the full entry set in one call.
#[derive(Debug)]
pub struct CaseBulkInsert<A, K, V> {
    context: CaseContext<A, K, V>,
}

impl<A, K: BenchKey, V: BenchValue> CaseBulkInsert<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    /// Creates the case over the shared workload.
    #[must_use]
    pub fn new(dataset: &Arc<Dataset<K, V>>, column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            context: CaseContext::new(dataset, column),
        }
    }
}

impl<A, K: BenchKey, V: BenchValue> BenchmarkCase for CaseBulkInsert<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn execute(&self) -> Result<ExecutionStatistics, BenchError> {
        let memory_before = memory::allocated_bytes()?;
        let mut index = self.context.fresh_index();

        let mut timer = Timer::start();
        index.bulk_insert(&self.context.dataset.entries)?;
        let duration = timer.lap();

        let memory_after = memory::allocated_bytes()?;
        Ok(ExecutionStatistics {
            measurements: vec![Measurement {
                duration,
                index_size_bytes: memory_after.saturating_sub(memory_before),
            }],
        })
    }

    fn name(&self) -> &'static str {
        "BulkInsert"
    }

    case_metadata!();
}

// ============================================================================
//  Insert
// ============================================================================

/// Insert every entry one by one.
#[derive(Debug)]
pub struct CaseInsert<A, K, V> {
    context: CaseContext<A, K, V>,
}

impl<A, K: BenchKey, V: BenchValue> CaseInsert<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    /// Creates the case over the shared workload.
    #[must_use]
    pub fn new(dataset: &Arc<Dataset<K, V>>, column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            context: CaseContext::new(dataset, column),
        }
    }
}

impl<A, K: BenchKey, V: BenchValue> BenchmarkCase for CaseInsert<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn execute(&self) -> Result<ExecutionStatistics, BenchError> {
        let memory_before = memory::allocated_bytes()?;
        let mut index = self.context.fresh_index();

        let mut timer = Timer::start();
        for (key, value) in &self.context.dataset.entries {
            index.insert(*key, *value)?;
        }
        let duration = timer.lap();

        let memory_after = memory::allocated_bytes()?;
        Ok(ExecutionStatistics {
            measurements: vec![Measurement {
                duration,
                index_size_bytes: memory_after.saturating_sub(memory_before),
            }],
        })
    }

    fn name(&self) -> &'static str {
        "Insert"
    }

    case_metadata!();
}

// ============================================================================
//  Erase
// ============================================================================

/// Erase every entry one by one from a pre-populated index. Time only.
#[derive(Debug)]
pub struct CaseErase<A, K, V> {
    context: CaseContext<A, K, V>,
}

impl<A, K: BenchKey, V: BenchValue> CaseErase<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    /// Creates the case over the shared workload.
    #[must_use]
    pub fn new(dataset: &Arc<Dataset<K, V>>, column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            context: CaseContext::new(dataset, column),
        }
    }
}

impl<A, K: BenchKey, V: BenchValue> BenchmarkCase for CaseErase<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn execute(&self) -> Result<ExecutionStatistics, BenchError> {
        // preparation: fill index, untimed
        let mut index = self.context.fresh_index();
        for (key, value) in &self.context.dataset.entries {
            index.insert(*key, *value)?;
        }

        let mut timer = Timer::start();
        for (key, value) in &self.context.dataset.entries {
            index.erase(*key, *value)?;
        }
        let duration = timer.lap();

        Ok(ExecutionStatistics {
            measurements: vec![Measurement {
                duration,
                index_size_bytes: 0,
            }],
        })
    }

    fn name(&self) -> &'static str {
        "Erase"
    }

    case_metadata!();
}

// ============================================================================
//  EqualityLookup
// ============================================================================

/// Run every equality probe against a pre-populated index. Time only.
#[derive(Debug)]
pub struct CaseEqualityLookup<A, K, V> {
    context: CaseContext<A, K, V>,
    lookups: Arc<Vec<EqualityLookup<K>>>,
}

impl<A, K: BenchKey, V: BenchValue> CaseEqualityLookup<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    /// Creates the case over the shared workload and probe list.
    #[must_use]
    pub fn new(
        dataset: &Arc<Dataset<K, V>>,
        column: &Arc<KeyColumn<K>>,
        lookups: &Arc<Vec<EqualityLookup<K>>>,
    ) -> Self {
        Self {
            context: CaseContext::new(dataset, column),
            lookups: Arc::clone(lookups),
        }
    }
}

impl<A, K: BenchKey, V: BenchValue> BenchmarkCase for CaseEqualityLookup<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn execute(&self) -> Result<ExecutionStatistics, BenchError> {
        // preparation: fill index, untimed
        let mut index = self.context.fresh_index();
        self.context.populate(&mut index)?;

        let mut timer = Timer::start();
        for lookup in self.lookups.iter() {
            black_box(index.equality_lookup(black_box(lookup.key))?);
        }
        let duration = timer.lap();

        Ok(ExecutionStatistics {
            measurements: vec![Measurement {
                duration,
                index_size_bytes: 0,
            }],
        })
    }

    fn name(&self) -> &'static str {
        "EqualityLookup"
    }

    case_metadata!();
}

// ============================================================================
//  RangeLookup
// ============================================================================

/// Run every range probe against a pre-populated index. Time only.
#[derive(Debug)]
pub struct CaseRangeLookup<A, K, V> {
    context: CaseContext<A, K, V>,
    lookups: Arc<Vec<RangeLookup<K>>>,
}

impl<A, K: BenchKey, V: BenchValue> CaseRangeLookup<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    /// Creates the case over the shared workload and probe list.
    #[must_use]
    pub fn new(
        dataset: &Arc<Dataset<K, V>>,
        column: &Arc<KeyColumn<K>>,
        lookups: &Arc<Vec<RangeLookup<K>>>,
    ) -> Self {
        Self {
            context: CaseContext::new(dataset, column),
            lookups: Arc::clone(lookups),
        }
    }
}

impl<A, K: BenchKey, V: BenchValue> BenchmarkCase for CaseRangeLookup<A, K, V>
where
    A: IndexAdapter<K, V>,
{
    fn execute(&self) -> Result<ExecutionStatistics, BenchError> {
        // preparation: fill index, untimed
        let mut index = self.context.fresh_index();
        self.context.populate(&mut index)?;

        let mut timer = Timer::start();
        for lookup in self.lookups.iter() {
            black_box(index.range_lookup(
                black_box(lookup.lower_bound),
                black_box(lookup.upper_bound),
            )?);
        }
        let duration = timer.lap();

        Ok(ExecutionStatistics {
            measurements: vec![Measurement {
                duration,
                index_size_bytes: 0,
            }],
        })
    }

    fn name(&self) -> &'static str {
        "RangeLookup"
    }

    case_metadata!();
}
