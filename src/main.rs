//! Binary entry point for the `benchpress` command-line tool.
//!
//! Runs one or more codec families against a corpus directory with the
//! wall-clock [`TimedHost`], then prints one summary line per
//! (file, case) pair. The first fatal error stops the run with exit code 1.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use benchpress::bench::{self, BenchConfig, CaseReport, Family, Sample, TimedHost};

/// Measure compression throughput and ratio over a corpus of sample files.
#[derive(Debug, Parser)]
#[command(name = "benchpress", version)]
struct Cli {
    /// Codec families to run, in order. Runs all of them when omitted.
    #[arg(value_enum)]
    families: Vec<Family>,

    /// Corpus directory (defaults to $BENCHPRESS_CORPUS_DIR, then ./testdata).
    #[arg(short = 'd', long = "corpus")]
    corpus: Option<PathBuf>,

    /// Seconds spent repeating each measured block.
    #[arg(short = 's', long)]
    seconds: Option<u32>,

    /// Minimum iterations per measured block.
    #[arg(short = 'n', long)]
    min_iterations: Option<u32>,

    /// Log at debug level instead of info.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> BenchConfig {
        let mut config = BenchConfig::from_env();
        if let Some(dir) = &self.corpus {
            config.set_corpus_dir(dir);
        }
        if let Some(seconds) = self.seconds {
            config.set_nb_seconds(seconds);
        }
        if let Some(n) = self.min_iterations {
            config.set_min_iterations(n);
        }
        config
    }

    fn families(&self) -> Vec<Family> {
        if self.families.is_empty() {
            Family::ALL.to_vec()
        } else {
            self.families.clone()
        }
    }
}

fn print_summary(family: Family, reports: &[CaseReport], samples: &[Sample]) {
    println!("== {family}");
    // Each report owns two consecutive samples: compress, then decompress.
    for (report, pair) in reports.iter().zip(samples.chunks(2)) {
        let speed = |i: usize| pair.get(i).map_or(0.0, Sample::throughput_mb_s);
        println!(
            "{:<24} {:<32} {:>10} -> {:>10} ({:>6.2}%)  C {:>8.1} MB/s  D {:>8.1} MB/s",
            report.entry,
            report.case,
            report.original_size,
            report.compressed_size,
            report.ratio(),
            speed(0),
            speed(1),
        );
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();
    for family in cli.families() {
        let mut host = TimedHost::from_config(&config);
        let reports = bench::run_family(&mut host, &config, family)
            .with_context(|| format!("{family} benchmark failed"))?;
        print_summary(family, &reports, host.samples());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = run(&cli) {
        eprintln!("benchpress: {e:#}");
        std::process::exit(1);
    }
}
