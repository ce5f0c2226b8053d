//! Verifold CLI entrypoint.
//!
//! ```text
//! verifold [--sequential] [PATH ...]      evaluate .rkyv / .json records or record directories
//! verifold import <IN.json> <OUT.rkyv>    convert a JSON feature export into a sealed record
//! ```
//!
//! Paths default to `VERIFOLD_FEATURE_PATHS`; see [`verifold::Config`] for the
//! other environment overrides. Logging is controlled by `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;

use verifold::storage::{self, FeatureStore, JsonFeatureRecord};
use verifold::{AccuracyReport, CheckpointTracker, Config, Evaluator, FeaturePairSet};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: verifold [--sequential] [PATH ...]\n       verifold import <IN.json> <OUT.rkyv>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    if args.first().map(String::as_str) == Some("import") {
        return match args.as_slice() {
            [_, input, output] => import_json(Path::new(input), Path::new(output)),
            _ => bail!("{USAGE}"),
        };
    }

    let mut config = Config::from_env()?;
    if args.iter().any(|a| a == "--sequential") {
        config.parallel = false;
    }
    let cli_paths: Vec<PathBuf> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .collect();
    if !cli_paths.is_empty() {
        config.feature_paths = cli_paths;
    }
    config.validate()?;

    if config.feature_paths.is_empty() {
        bail!("no feature records given\n{USAGE}");
    }

    tracing::info!(
        folds = config.fold_count,
        threshold_steps = config.threshold_steps,
        parallel = config.parallel,
        sources = config.feature_paths.len(),
        "Verifold starting"
    );

    let evaluator = Evaluator::new(config.eval_settings())?;
    let mut tracker = CheckpointTracker::new();

    for (label, path) in collect_sources(&config.feature_paths)? {
        let pairs = load_file(&path)?;
        tracing::info!(checkpoint = %label, pairs = pairs.len(), dim = pairs.dim(), "Evaluating");

        let result = if config.parallel {
            evaluator.evaluate_parallel(Arc::new(pairs)).await
        } else {
            evaluator.evaluate(&pairs)
        }
        .with_context(|| format!("evaluation of {label} failed"))?;

        println!("{label}");
        println!("{}", AccuracyReport::new(&result));
        tracker.observe(label, &result);
    }

    if tracker.observed() > 1
        && let Some(best) = tracker.best()
    {
        println!("{best}");
    }

    Ok(())
}

/// `(label, record path)` per source; directories expand to their `.rkyv` records.
fn collect_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<(String, PathBuf)>> {
    let mut sources = Vec::new();

    for path in paths {
        if path.is_dir() {
            let store = FeatureStore::new(path.clone());
            let names = store
                .list()
                .with_context(|| format!("failed to list records in {}", path.display()))?;
            if names.is_empty() {
                tracing::warn!(dir = %path.display(), "No feature records found");
            }
            for name in names {
                let record_path = store.record_path(&name);
                sources.push((name, record_path));
            }
        } else {
            let label = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            sources.push((label, path.clone()));
        }
    }

    Ok(sources)
}

fn load_file(path: &Path) -> anyhow::Result<FeaturePairSet> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let pairs = if is_json {
        storage::read_json_pair_set(path)
    } else {
        storage::read_pair_set(path)
    };
    pairs.with_context(|| format!("failed to load {}", path.display()))
}

fn import_json(input: &Path, output: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let record = JsonFeatureRecord::from_reader(std::io::BufReader::new(file))?.into_record()?;

    // Reject records that cannot be evaluated.
    let pairs = record.clone().into_pair_set()?;
    let handle = storage::write_record(output, &record)?;

    tracing::info!(
        output = %handle.path().display(),
        pairs = pairs.len(),
        dim = pairs.dim(),
        bytes = handle.len(),
        "Imported feature record"
    );
    println!("imported {} pairs (dim {}) into {}", pairs.len(), pairs.dim(), output.display());
    Ok(())
}
