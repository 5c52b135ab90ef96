use std::env;
use std::process;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use tools::timer::Stopwatch;
use tools::verify;
use tools::{DistanceMatrix, Engine, GroupLimits, Weight};
use v0_sequential::Sequential;
use v1_direct::Direct;
use v2_staged::Staged;

const SEED_ENV: &str = "FW_SEED";
const MAX_WEIGHT_ENV: &str = "FW_MAX_WEIGHT";
const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_MAX_WEIGHT: Weight = 100;

/// Exit status when a parallel result disagrees with the sequential one
const MISMATCH_EXIT: i32 = 2;

struct Config {
    n: usize,
    workers: usize,
    repetitions: usize,
    seed: u64,
    max_weight: Weight,
}

fn parse_positive(name: &str, s: &str) -> Result<usize> {
    let v = usize::from_str(s).with_context(|| format!("{} must be a positive integer, got '{}'", name, s))?;
    if v == 0 {
        bail!("{} must be a positive integer, got 0", name);
    }
    Ok(v)
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().with_context(|| format!("invalid {}='{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_config(args: &[String]) -> Result<Config> {
    let repetitions = match args.get(3) {
        Some(s) => parse_positive("REPETITIONS", s)?,
        None => 1,
    };
    Ok(Config {
        n: parse_positive("N", &args[1])?,
        workers: parse_positive("WORKERS", &args[2])?,
        repetitions,
        seed: env_or(SEED_ENV, DEFAULT_SEED)?,
        max_weight: env_or(MAX_WEIGHT_ENV, DEFAULT_MAX_WEIGHT)?,
    })
}

fn init_tracing() {
    // stdout carries the timing report, diagnostics go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run all three engines on copies of one random matrix.
/// Returns the number of parallel results that disagree with the sequential one.
fn benchmark(config: &Config) -> Result<usize> {
    let limits = GroupLimits::query();
    limits.check_workers(config.workers)?;
    limits.check_staging(config.n)?;

    let sequential = Sequential::with_repetitions(config.repetitions)?;
    let direct = Direct::with_limits(config.workers, config.repetitions, &limits)?;
    let staged = Staged::with_limits(config.workers, config.repetitions, limits)?;

    let data = DistanceMatrix::random(config.n, config.max_weight, config.seed)?;
    debug!(n = config.n, seed = config.seed, max_weight = config.max_weight, "generated input");
    let mut results = vec![data.clone(), data.clone(), data];

    let engines: [&dyn Engine; 3] = [&sequential, &direct, &staged];
    let mut stopwatch = Stopwatch::new();
    for (engine, m) in engines.iter().zip(results.iter_mut()) {
        stopwatch.measure(engine.name(), || engine.run(m))?;
    }
    stopwatch.report();

    let mut mismatches = 0;
    for (engine, m) in engines.iter().zip(&results).skip(1) {
        if let Err(e) = verify::compare(&results[0], m) {
            error!(engine = engine.name(), "{}", e);
            eprintln!("{} disagrees with {}: {}", engine.name(), sequential.name(), e);
            mismatches += 1;
        }
    }
    info!(n = config.n, workers = config.workers, mismatches, "benchmark finished");
    Ok(mismatches)
}

/// Process exit status for the outcome of a benchmark run.
fn exit_status(outcome: &Result<usize>) -> i32 {
    match outcome {
        Ok(0) => 0,
        Ok(_) => MISMATCH_EXIT,
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    }
}

fn run(args: &[String]) -> i32 {
    if !(3..=4).contains(&args.len()) {
        let program = args.first().map_or("floyd_bench", String::as_str);
        eprintln!("benchmark usage: {} N WORKERS [REPETITIONS]", program);
        return 1;
    }
    init_tracing();
    let outcome = parse_config(args).and_then(|config| benchmark(&config));
    exit_status(&outcome)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    process::exit(run(&args));
}
