//! Benchmark configuration: corpus location and timing knobs.
//!
//! [`BenchConfig`] holds the settings for one run. Its builder-style setters
//! allow callers to adjust a default configuration before handing it to
//! [`super::run`] or [`super::host::TimedHost::from_config`].

use std::env;
use std::path::{Path, PathBuf};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Corpus directory used when nothing else is configured, relative to the
/// working directory.
pub const DEFAULT_CORPUS_DIR: &str = "testdata";

/// Environment variable that overrides the corpus directory.
pub const CORPUS_DIR_ENV: &str = "BENCHPRESS_CORPUS_DIR";

/// Default time budget per measured block, in seconds.
pub const NBSECONDS: u32 = 3;

pub const MB: usize = 1 << 20;

// ── BenchConfig ───────────────────────────────────────────────────────────────

/// Runtime parameters for a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Directory whose visible files make up the corpus.
    pub corpus_dir: PathBuf,

    /// Minimum wall-clock time spent repeating each measured block
    /// (default: [`NBSECONDS`]). `0` runs exactly `min_iterations` times.
    pub nb_seconds: u32,

    /// Minimum number of iterations per measured block (default: 1).
    pub min_iterations: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            nb_seconds: NBSECONDS,
            min_iterations: 1,
        }
    }
}

impl BenchConfig {
    /// Default configuration, with the corpus directory taken from
    /// [`CORPUS_DIR_ENV`] when it is set and non-empty.
    pub fn from_env() -> Self {
        let mut config = BenchConfig::default();
        if let Some(dir) = env::var_os(CORPUS_DIR_ENV).filter(|d| !d.is_empty()) {
            config.corpus_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn set_corpus_dir(&mut self, dir: impl AsRef<Path>) -> &mut Self {
        self.corpus_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn set_nb_seconds(&mut self, nb_seconds: u32) -> &mut Self {
        self.nb_seconds = nb_seconds;
        self
    }

    /// Set the minimum iteration count. Values below 1 are raised to 1.
    pub fn set_min_iterations(&mut self, min_iterations: u32) -> &mut Self {
        self.min_iterations = min_iterations.max(1);
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
