// benchpress: throughput and ratio benchmarks for compression codecs

//! Every codec family is plugged in through [`codec::CodecAdapter`], the
//! corpus is read once by [`corpus::load_corpus`], and [`bench`] pairs each
//! corpus entry with each benchmark case, timing compression and
//! decompression through a [`bench::host::BenchHost`].

pub mod error;
pub mod codec;
pub mod corpus;
pub mod bench;

pub use error::{BenchError, CodecError, CorpusError, Phase};
