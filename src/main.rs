//! Benchmark binary: reads the workload files, builds the full case roster
//! and writes a timestamped JSON report.
//!
//! Run with:
//! ```bash
//! RUST_LOG=imibench=info imibench uint64_t 3 data.bin eq.bin range.bin results/run
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use imibench::case::{
    BenchmarkCase, CaseBulkInsert, CaseBulkLoad, CaseEqualityLookup, CaseErase, CaseInsert,
    CaseRangeLookup,
};
use imibench::config::BenchmarkConfiguration;
use imibench::error::BenchError;
use imibench::index::{
    BTreeMapIndex, BenchKey, DashMapIndex, HashMapIndex, IndexsetBTreeMap, KeyColumn, QpTrieIndex,
    SimpleVectorIndex, SkipMapIndex, SortedVectorIndex,
};
use imibench::runner::BenchmarkRunner;
use imibench::workload::{Dataset, EqualityLookup, RangeLookup, generate_equality_lookups,
    generate_range_lookups};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static ALLOC: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Values are fixed to 64-bit tids; only the key width is configurable.
type Value = u64;

struct CliArguments {
    key_type: String,
    iterations: usize,
    data_file: PathBuf,
    equality_lookup_file: PathBuf,
    range_lookup_file: PathBuf,
    result_file_prefix: String,
}

fn parse_arguments() -> Result<CliArguments, String> {
    let mut args = std::env::args().skip(1);
    let mut next = |name: &str| {
        args.next()
            .ok_or_else(|| format!("missing argument <{name}>"))
    };

    let key_type = next("key_type")?;
    let iterations_raw = next("iterations")?;
    let iterations = iterations_raw
        .parse::<usize>()
        .map_err(|_| format!("iteration count '{iterations_raw}' is not a number"))?;
    let data_file = PathBuf::from(next("data binary file")?);
    let equality_lookup_file = PathBuf::from(next("equality lookup file")?);
    let range_lookup_file = PathBuf::from(next("range lookup file")?);
    let result_file_prefix = next("result file prefix (w/o extension)")?;
    if args.next().is_some() {
        return Err("too many arguments".into());
    }

    Ok(CliArguments {
        key_type,
        iterations,
        data_file,
        equality_lookup_file,
        range_lookup_file,
        result_file_prefix,
    })
}

fn now_as_string() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Builds the full case roster over one dataset.
///
/// Every adapter appears for every operation it supports, with two
/// exceptions kept out on purpose: the vector family for `Erase` and the
/// plain vector for `EqualityLookup` take excessively long on realistic
/// workload sizes and drown out the other cases.
fn build_cases<K: BenchKey>(
    dataset: &Arc<Dataset<K, Value>>,
    column: &Arc<KeyColumn<K>>,
    equality_lookups: &Arc<Vec<EqualityLookup<K>>>,
    range_lookups: &Arc<Vec<RangeLookup<K>>>,
) -> Vec<Box<dyn BenchmarkCase>> {
    type BTree<K> = BTreeMapIndex<K, Value>;
    type Indexset<K> = IndexsetBTreeMap<K, Value>;
    type Hash<K> = HashMapIndex<K, Value>;
    type Dash<K> = DashMapIndex<K, Value>;
    type Skip<K> = SkipMapIndex<K, Value>;
    type Trie<K> = QpTrieIndex<K, Value>;
    type SimpleVec<K> = SimpleVectorIndex<K, Value>;
    type SortedVec<K> = SortedVectorIndex<K, Value>;

    vec![
        // bulk load
        Box::new(CaseBulkLoad::<BTree<K>, K, Value>::new(dataset, column)),
        // bulk insert
        Box::new(CaseBulkInsert::<BTree<K>, K, Value>::new(dataset, column)),
        Box::new(CaseBulkInsert::<Indexset<K>, K, Value>::new(dataset, column)),
        Box::new(CaseBulkInsert::<Hash<K>, K, Value>::new(dataset, column)),
        Box::new(CaseBulkInsert::<Dash<K>, K, Value>::new(dataset, column)),
        Box::new(CaseBulkInsert::<Skip<K>, K, Value>::new(dataset, column)),
        Box::new(CaseBulkInsert::<SimpleVec<K>, K, Value>::new(dataset, column)),
        Box::new(CaseBulkInsert::<SortedVec<K>, K, Value>::new(dataset, column)),
        // equality lookup
        Box::new(CaseEqualityLookup::<BTree<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        Box::new(CaseEqualityLookup::<Indexset<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        Box::new(CaseEqualityLookup::<Hash<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        Box::new(CaseEqualityLookup::<Dash<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        Box::new(CaseEqualityLookup::<Skip<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        Box::new(CaseEqualityLookup::<Trie<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        Box::new(CaseEqualityLookup::<SortedVec<K>, K, Value>::new(
            dataset,
            column,
            equality_lookups,
        )),
        // range lookup
        Box::new(CaseRangeLookup::<BTree<K>, K, Value>::new(
            dataset,
            column,
            range_lookups,
        )),
        Box::new(CaseRangeLookup::<Indexset<K>, K, Value>::new(
            dataset,
            column,
            range_lookups,
        )),
        Box::new(CaseRangeLookup::<Skip<K>, K, Value>::new(
            dataset,
            column,
            range_lookups,
        )),
        Box::new(CaseRangeLookup::<SortedVec<K>, K, Value>::new(
            dataset,
            column,
            range_lookups,
        )),
        // insert
        Box::new(CaseInsert::<BTree<K>, K, Value>::new(dataset, column)),
        Box::new(CaseInsert::<Indexset<K>, K, Value>::new(dataset, column)),
        Box::new(CaseInsert::<Hash<K>, K, Value>::new(dataset, column)),
        Box::new(CaseInsert::<Dash<K>, K, Value>::new(dataset, column)),
        Box::new(CaseInsert::<Skip<K>, K, Value>::new(dataset, column)),
        Box::new(CaseInsert::<Trie<K>, K, Value>::new(dataset, column)),
        Box::new(CaseInsert::<SimpleVec<K>, K, Value>::new(dataset, column)),
        // erase
        Box::new(CaseErase::<BTree<K>, K, Value>::new(dataset, column)),
        Box::new(CaseErase::<Indexset<K>, K, Value>::new(dataset, column)),
        Box::new(CaseErase::<Hash<K>, K, Value>::new(dataset, column)),
        Box::new(CaseErase::<Dash<K>, K, Value>::new(dataset, column)),
        Box::new(CaseErase::<Skip<K>, K, Value>::new(dataset, column)),
        Box::new(CaseErase::<Trie<K>, K, Value>::new(dataset, column)),
    ]
}

fn setup_and_run_benchmark<K: BenchKey>(config: BenchmarkConfiguration) -> Result<(), BenchError> {
    let dataset: Arc<Dataset<K, Value>> = Arc::new(Dataset::generate(&config.data_file)?);
    let equality_lookups = Arc::new(generate_equality_lookups::<K>(&config.equality_lookup_file)?);
    let range_lookups = Arc::new(generate_range_lookups::<K>(&config.range_lookup_file)?);
    let column = Arc::new(KeyColumn::from_entries(&dataset.entries));

    tracing::info!(
        rows = dataset.len(),
        equality_lookups = equality_lookups.len(),
        range_lookups = range_lookups.len(),
        "workload loaded"
    );

    let cases = build_cases(&dataset, &column, &equality_lookups, &range_lookups);
    let output_file = config.output_file.clone();
    let report = BenchmarkRunner::new(cases, config)?.run()?;

    match output_file {
        Some(path) => {
            report.export_json(&path)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = match parse_arguments() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!(
                "Usage: imibench <key_type> <iterations> <data binary file> \
                 <equality lookup file> <range lookup file> <result file prefix (w/o extension)>"
            );
            return ExitCode::FAILURE;
        }
    };

    let result_file = PathBuf::from(format!(
        "{}_{}.json",
        args.result_file_prefix,
        now_as_string()
    ));
    println!(
        "Benchmark Configuration:\n\
         \x20 Key type:               {}\n\
         \x20 Value type:             u64\n\
         \x20 Number of iterations:   {}\n\
         \x20 Data file:              {}\n\
         \x20 Equality lookup file:   {}\n\
         \x20 Range lookup file:      {}\n\
         \x20 Result file:            {}\n",
        args.key_type,
        args.iterations,
        args.data_file.display(),
        args.equality_lookup_file.display(),
        args.range_lookup_file.display(),
        result_file.display(),
    );

    let config = BenchmarkConfiguration {
        iterations: args.iterations,
        threads: 1,
        data_file: args.data_file,
        equality_lookup_file: args.equality_lookup_file,
        range_lookup_file: args.range_lookup_file,
        output_file: Some(result_file),
    };

    let outcome = match args.key_type.as_str() {
        "u32" | "uint32_t" => setup_and_run_benchmark::<u32>(config),
        "u64" | "uint64_t" => setup_and_run_benchmark::<u64>(config),
        other => {
            eprintln!("Key type '{other}' is not supported.");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = outcome {
        eprintln!("benchmark failed: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
