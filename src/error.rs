//! Error taxonomy for a benchmark run.
//!
//! Every variant is fatal: a measurement is only meaningful when all of its
//! iterations completed identically, so nothing here is retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while enumerating or reading the corpus directory.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("listing {dir}: {source}")]
    List {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no corpus files in {dir}")]
    Empty { dir: PathBuf },
}

/// A codec failed while processing one input.
///
/// The wrapped [`io::Error`] is whatever the codec binding reported.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The compressing or decompressing stream could not be constructed.
    #[error("init: {0}")]
    Init(#[source] io::Error),

    /// Copying bytes through the stream failed mid-way.
    #[error("copy: {0}")]
    Copy(#[source] io::Error),

    /// Finalizing a compressing stream failed.
    #[error("flush: {0}")]
    Flush(#[source] io::Error),
}

/// Which half of a (entry, case) pair was running when a codec failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Compress,
    Decompress,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compress => f.write_str("compress"),
            Phase::Decompress => f.write_str("decompress"),
        }
    }
}

/// Top-level error for a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("{entry}: {case}: {phase}: {source}")]
    Codec {
        entry: String,
        case: String,
        phase: Phase,
        #[source]
        source: CodecError,
    },

    #[error("duplicate benchmark case name {0:?}")]
    DuplicateCase(String),
}

impl BenchError {
    /// The phase a codec failure happened in, if this is a codec failure.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            BenchError::Codec { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
