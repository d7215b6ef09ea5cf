//! Benchmark entry points.
//!
//! [`run_family`] is the per-family entry point: it builds the family's
//! default cases and hands them to [`run`]. [`run`] checks the case names,
//! loads the corpus named by [`BenchConfig`] and drives
//! [`measure::measure_all`] through the supplied [`host::BenchHost`].
//!
//! The corpus is loaded before anything is measured, so a missing or empty
//! corpus stops the run without a single measurement.

pub mod config;
pub mod case;
pub mod host;
pub mod measure;

pub use case::{BenchmarkCase, Family};
pub use config::BenchConfig;
pub use host::{BenchHost, Sample, TimedHost};
pub use measure::CaseReport;

use tracing::debug;

use crate::corpus::load_corpus;
use crate::error::BenchError;

/// Benchmark `cases` against the corpus in `config.corpus_dir`.
pub fn run(
    host: &mut dyn BenchHost,
    config: &BenchConfig,
    cases: &[BenchmarkCase],
) -> Result<Vec<CaseReport>, BenchError> {
    case::ensure_unique(cases)?;
    let corpus = load_corpus(&config.corpus_dir)?;
    debug!(
        dir = %config.corpus_dir.display(),
        files = corpus.len(),
        cases = cases.len(),
        "corpus loaded"
    );
    measure::measure_all(host, &corpus, cases)
}

/// Benchmark the default cases of one codec family.
pub fn run_family(
    host: &mut dyn BenchHost,
    config: &BenchConfig,
    family: Family,
) -> Result<Vec<CaseReport>, BenchError> {
    run(host, config, &family.cases())
}
