//! The measurement loop.
//!
//! For every (corpus entry, case) pair:
//!
//! 1. **compress**: the host repeats a full compression of the entry into a
//!    fresh buffer, finalizing the stream each time.
//! 2. **reference**: one unmeasured compression produces the bytes whose
//!    size and ratio are reported.
//! 3. **decompress**: the host repeats a full decompression of exactly those
//!    reference bytes into a fresh buffer.
//!
//! Entries are the outer loop and cases the inner one. Any codec failure
//! aborts the whole run with the phase and pair attached.

use tracing::info;

use super::case::BenchmarkCase;
use super::config::MB;
use super::host::BenchHost;
use crate::codec::{compress_once, decompress_once};
use crate::corpus::CorpusEntry;
use crate::error::{BenchError, CodecError, Phase};

/// Size figures for one (entry, case) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub entry: String,
    pub case: String,
    pub original_size: usize,
    pub compressed_size: usize,
}

impl CaseReport {
    /// Compressed size as a percentage of the original.
    ///
    /// An empty original yields `inf` (or `NaN` when the output is empty too).
    pub fn ratio(&self) -> f64 {
        100.0 * self.compressed_size as f64 / self.original_size as f64
    }

    pub fn compressed_mb(&self) -> f64 {
        self.compressed_size as f64 / MB as f64
    }
}

/// Measurement id for the compression phase of a pair.
pub fn compress_id(entry: &CorpusEntry, case: &BenchmarkCase) -> String {
    format!("{}_compress_{}", entry.name(), case.name())
}

/// Measurement id for the decompression phase of a pair.
pub fn decompress_id(entry: &CorpusEntry, case: &BenchmarkCase) -> String {
    format!("{}_decompress_{}", entry.name(), case.name())
}

fn codec_failure(entry: &CorpusEntry, case: &BenchmarkCase, phase: Phase) -> impl FnOnce(CodecError) -> BenchError {
    let entry = entry.name().to_owned();
    let case = case.name().to_owned();
    move |source| BenchError::Codec { entry, case, phase, source }
}

/// Measure one (entry, case) pair and report its compressed size.
pub fn measure_pair(
    host: &mut dyn BenchHost,
    entry: &CorpusEntry,
    case: &BenchmarkCase,
) -> Result<CaseReport, BenchError> {
    let codec = case.codec();
    let bytes = entry.len() as u64;

    host.measure(&compress_id(entry, case), bytes, &mut || {
        compress_once(codec, entry.data()).map(drop)
    })
    .map_err(codec_failure(entry, case, Phase::Compress))?;

    let reference = compress_once(codec, entry.data())
        .map_err(codec_failure(entry, case, Phase::Compress))?;

    let report = CaseReport {
        entry: entry.name().to_owned(),
        case: case.name().to_owned(),
        original_size: entry.len(),
        compressed_size: reference.len(),
    };
    info!(
        "{}: {}: {:.2} MB ({:.2}%)",
        report.entry,
        report.case,
        report.compressed_mb(),
        report.ratio(),
    );

    host.measure(&decompress_id(entry, case), bytes, &mut || {
        decompress_once(codec, &reference).map(drop)
    })
    .map_err(codec_failure(entry, case, Phase::Decompress))?;

    Ok(report)
}

/// Measure every case against every corpus entry, sequentially.
pub fn measure_all(
    host: &mut dyn BenchHost,
    corpus: &[CorpusEntry],
    cases: &[BenchmarkCase],
) -> Result<Vec<CaseReport>, BenchError> {
    let mut reports = Vec::with_capacity(corpus.len() * cases.len());
    for entry in corpus {
        info!("{}: initial size: {} MB", entry.name(), entry.len() / MB);
        for case in cases {
            reports.push(measure_pair(host, entry, case)?);
        }
    }
    Ok(reports)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
