//! Benchmark cases: a label plus the codec adapter it measures.
//!
//! Case construction is pure data transformation. Parameterized families fan
//! a list of levels out into one case per level; the rest produce exactly one
//! case. A level with no known name is labelled `"invalid"` instead of being
//! rejected, so the listing stays complete even when misconfigured.

use std::collections::HashSet;
use std::fmt;

use crate::codec::{self, CodecAdapter, Gzip, Lzma, Lzma2, Xz, Zstd};
use crate::error::BenchError;

// ── BenchmarkCase ─────────────────────────────────────────────────────────────

/// One named codec configuration.
pub struct BenchmarkCase {
    name: String,
    codec: Box<dyn CodecAdapter>,
}

impl BenchmarkCase {
    pub fn new(name: impl Into<String>, codec: impl CodecAdapter + 'static) -> Self {
        BenchmarkCase { name: name.into(), codec: Box::new(codec) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &dyn CodecAdapter {
        self.codec.as_ref()
    }
}

impl fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .field("family", &self.codec.family())
            .finish()
    }
}

/// Fail on the first case name that appears twice.
pub fn ensure_unique(cases: &[BenchmarkCase]) -> Result<(), BenchError> {
    let mut seen = HashSet::with_capacity(cases.len());
    for case in cases {
        if !seen.insert(case.name()) {
            return Err(BenchError::DuplicateCase(case.name().to_owned()));
        }
    }
    Ok(())
}

// ── Per-family fan-out ────────────────────────────────────────────────────────

/// One case per gzip level, named `gzip level "<label>"`.
pub fn gzip_cases(levels: &[i32]) -> Vec<BenchmarkCase> {
    levels
        .iter()
        .map(|&level| {
            BenchmarkCase::new(
                format!("gzip level {:?}", codec::gzip::level_name(level)),
                Gzip::new(level),
            )
        })
        .collect()
}

/// One case per zstd level, named `zstd level "<label>"`.
pub fn zstd_cases(levels: &[i32]) -> Vec<BenchmarkCase> {
    levels
        .iter()
        .map(|&level| {
            BenchmarkCase::new(
                format!("zstd level {:?}", codec::zstd::level_name(level)),
                Zstd::new(level),
            )
        })
        .collect()
}

pub fn xz_cases() -> Vec<BenchmarkCase> {
    vec![BenchmarkCase::new("xz", Xz::default())]
}

pub fn lzma_cases() -> Vec<BenchmarkCase> {
    vec![BenchmarkCase::new("lzma", Lzma::default())]
}

pub fn lzma2_cases() -> Vec<BenchmarkCase> {
    vec![BenchmarkCase::new("lzma2", Lzma2::default())]
}

// ── Family ────────────────────────────────────────────────────────────────────

/// The codec families with a benchmark entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Family {
    Gzip,
    Zstd,
    Xz,
    Lzma,
    Lzma2,
}

impl Family {
    pub const ALL: [Family; 5] = [Family::Gzip, Family::Zstd, Family::Xz, Family::Lzma, Family::Lzma2];

    pub fn name(self) -> &'static str {
        match self {
            Family::Gzip => "gzip",
            Family::Zstd => "zstd",
            Family::Xz => "xz",
            Family::Lzma => "lzma",
            Family::Lzma2 => "lzma2",
        }
    }

    /// The default case list for this family.
    pub fn cases(self) -> Vec<BenchmarkCase> {
        match self {
            Family::Gzip => gzip_cases(&codec::gzip::LEVELS),
            Family::Zstd => zstd_cases(&codec::zstd::LEVELS),
            Family::Xz => xz_cases(),
            Family::Lzma => lzma_cases(),
            Family::Lzma2 => lzma2_cases(),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
