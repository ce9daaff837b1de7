//! Benchmark runner for the cache micro-benchmarks.
//!
//! Results go to stdout as CSV; progress and diagnostics go through `log`
//! to stderr, filtered by `CACHEBENCH_LOG`.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::{LevelFilter, info};
use std::io::{self, Write};

use cachebench::driver::{DEFAULT_SIZES, MatmulConfig, run_benchmark};
use cachebench::false_sharing::{self, FalseSharingConfig, run_false_sharing};
use cachebench::numeric::{self, NumericConfig, run_numeric};
use cachebench::{Strategy, rng_from_seed};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("CACHEBENCH_LOG", "warn"))
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("false-sharing", sub)) => false_sharing_command(sub),
        Some(("numeric", sub)) => numeric_command(sub),
        Some(("matmul", sub)) => matmul_command(sub),
        _ => matmul_command(&matches),
    }
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .value_parser(clap::value_parser!(u64))
        .help("Seed the random number generator for reproducible inputs")
}

fn matmul_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("sizes")
            .short('n')
            .long("sizes")
            .value_delimiter(',')
            .value_parser(clap::value_parser!(usize))
            .help("Comma separated, ascending matrix sides to benchmark [default: 4,32,64,128,256,512]"),
    )
    .arg(
        Arg::new("strategies")
            .short('s')
            .long("strategies")
            .value_delimiter(',')
            .value_parser(|s: &str| s.parse::<Strategy>())
            .help("Comma separated strategies to time (default: all)"),
    )
    .arg(
        Arg::new("validation_side")
            .long("validation-size")
            .value_parser(clap::value_parser!(usize))
            .default_value("64")
            .help("Matrix side used to validate strategies before timing"),
    )
    .arg(seed_arg())
}

fn cli() -> Command {
    matmul_args(
        Command::new("cachebench")
            .version(clap::crate_version!())
            .about("Micro-benchmarks for cache effects on numeric code")
            .args_conflicts_with_subcommands(true),
    )
    .subcommand(matmul_args(
        Command::new("matmul").about("Time four square matrix multiplication strategies (default)"),
    ))
    .subcommand(
        Command::new("false-sharing")
            .about("Time a parallel sum with result slots spaced at increasing offsets")
            .arg(
                Arg::new("length")
                    .long("length")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("10000")
                    .help("Number of floats to sum"),
            )
            .arg(
                Arg::new("threads")
                    .short('t')
                    .long("threads")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("16")
                    .help("Number of worker threads"),
            )
            .arg(
                Arg::new("offsets")
                    .long("offsets")
                    .value_delimiter(',')
                    .value_parser(clap::value_parser!(usize))
                    .default_value("1,2,4,8,16,32,64,128")
                    .help("Comma separated distances, in floats, between thread result slots"),
            )
            .arg(seed_arg()),
    )
    .subcommand(
        Command::new("numeric")
            .about("Time add, multiply and divide across numeric types")
            .arg(
                Arg::new("length")
                    .long("length")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("10000000")
                    .help("Number of elements per array"),
            )
            .arg(
                Arg::new("repeats")
                    .long("repeats")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("1000")
                    .help("How many times the Add benchmark sums the array"),
            )
            .arg(seed_arg()),
    )
}

fn matmul_command(matches: &ArgMatches) -> Result<()> {
    let mut config = MatmulConfig {
        sizes: matches
            .get_many::<usize>("sizes")
            .map(|v| v.copied().collect())
            .unwrap_or_else(|| DEFAULT_SIZES.to_vec()),
        seed: matches.get_one::<u64>("seed").copied(),
        ..MatmulConfig::default()
    };
    if let Some(strategies) = matches.get_many::<Strategy>("strategies") {
        config.strategies = strategies.copied().collect();
    }
    if let Some(&side) = matches.get_one::<usize>("validation_side") {
        config.validation_side = side;
    }

    info!(
        "matmul: sizes {:?}, strategies {:?}",
        config.sizes, config.strategies
    );
    let mut rng = rng_from_seed(config.seed);
    let report = run_benchmark(&config, &mut rng).context("matrix multiplication benchmark aborted")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.write_csv(&mut out)?;
    out.flush()?;
    Ok(())
}

fn false_sharing_command(matches: &ArgMatches) -> Result<()> {
    let defaults = FalseSharingConfig::default();
    let config = FalseSharingConfig {
        length: matches.get_one::<usize>("length").copied().unwrap_or(defaults.length),
        threads: matches.get_one::<usize>("threads").copied().unwrap_or(defaults.threads),
        offsets: matches
            .get_many::<usize>("offsets")
            .map(|v| v.copied().collect())
            .unwrap_or(defaults.offsets),
        seed: matches.get_one::<u64>("seed").copied(),
    };

    info!(
        "false sharing: {} floats on {} threads",
        config.length, config.threads
    );
    let mut rng = rng_from_seed(config.seed);
    let timings = run_false_sharing(&config, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    false_sharing::write_csv(&timings, &mut out)?;
    out.flush()?;
    Ok(())
}

fn numeric_command(matches: &ArgMatches) -> Result<()> {
    let defaults = NumericConfig::default();
    let config = NumericConfig {
        length: matches.get_one::<usize>("length").copied().unwrap_or(defaults.length),
        repeats: matches.get_one::<usize>("repeats").copied().unwrap_or(defaults.repeats),
        seed: matches.get_one::<u64>("seed").copied(),
    };

    info!(
        "numeric: {} elements, {} add repeats",
        config.length, config.repeats
    );
    let mut rng = rng_from_seed(config.seed);
    let timings = run_numeric(&config, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    numeric::write_csv(&timings, &mut out)?;
    out.flush()?;
    Ok(())
}
