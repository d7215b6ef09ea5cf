//! Codec adapters: one compression family behind a uniform streaming contract.
//!
//! A [`CodecAdapter`] knows how to wrap a byte sink in a compressing stream and
//! a byte source in a decompressing stream. Nothing else about the codec is
//! visible to the benchmark loop.
//!
//! | Adapter              | Family | Format                 |
//! |----------------------|--------|------------------------|
//! | [`gzip::Gzip`]       | gzip   | RFC 1952 member        |
//! | [`zstd::Zstd`]       | zstd   | zstd frame             |
//! | [`xz::Xz`]           | xz     | .xz container          |
//! | [`xz::Lzma`]         | lzma   | legacy .lzma ("alone") |
//! | [`xz::Lzma2`]        | lzma2  | raw LZMA2 chunks       |
//!
//! Compressing streams always need [`CompressWriter::finalize`]; most codecs
//! buffer internally and the sink is truncated until it runs. Decompressing
//! streams check the stream header before they are handed out, so input that
//! is not in the adapter's format fails at construction.

pub mod gzip;
pub mod xz;
pub mod zstd;

use std::io::{self, Cursor, Read, Write};

use crate::error::CodecError;

pub use self::gzip::Gzip;
pub use self::xz::{Lzma, Lzma2, Xz};
pub use self::zstd::Zstd;

/// Destination for compressed bytes.
pub type Sink<'a> = Box<dyn Write + 'a>;

/// Source of compressed bytes.
pub type Source<'a> = Box<dyn Read + 'a>;

// ── Capability traits ─────────────────────────────────────────────────────────

/// A compressing stream over a [`Sink`].
pub trait CompressWriter: Write {
    /// Flush buffered input through the encoder and write the trailer.
    fn finalize(self: Box<Self>) -> io::Result<()>;
}

/// One compression family in one fixed configuration.
///
/// Adapters are stateless; a single instance is shared across every file and
/// iteration that benchmarks it.
pub trait CodecAdapter {
    /// Short family name, e.g. `"gzip"`.
    fn family(&self) -> &'static str;

    /// Wrap `sink` in a stream that compresses whatever is written to it.
    fn compressor<'a>(&self, sink: Sink<'a>) -> io::Result<Box<dyn CompressWriter + 'a>>;

    /// Wrap `source` in a stream that yields the decompressed bytes.
    fn decompressor<'a>(&self, source: Source<'a>) -> io::Result<Box<dyn Read + 'a>>;
}

/// Read the first `len` bytes of `source` and fail with
/// [`io::ErrorKind::InvalidData`] unless `valid` accepts them.
///
/// The header bytes are put back in front of the returned source, so the
/// decoder still sees the whole stream.
pub(crate) fn expect_header<'a>(
    mut source: Source<'a>,
    len: usize,
    family: &str,
    valid: impl Fn(&[u8]) -> bool,
) -> io::Result<Source<'a>> {
    let mut head = Vec::with_capacity(len);
    source.by_ref().take(len as u64).read_to_end(&mut head)?;
    if !valid(&head) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{family}: unrecognized stream header"),
        ));
    }
    Ok(Box::new(Cursor::new(head).chain(source)))
}

// ── One-shot helpers ──────────────────────────────────────────────────────────

/// Compress `input` into a fresh buffer.
///
/// The input is read through a new cursor on every call so repeated calls
/// are independent of each other.
pub fn compress_once(codec: &dyn CodecAdapter, input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut compressed = Vec::new();
    let mut writer = codec
        .compressor(Box::new(&mut compressed))
        .map_err(CodecError::Init)?;
    io::copy(&mut Cursor::new(input), &mut writer).map_err(CodecError::Copy)?;
    writer.finalize().map_err(CodecError::Flush)?;
    Ok(compressed)
}

/// Decompress `compressed` into a fresh buffer.
pub fn decompress_once(codec: &dyn CodecAdapter, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut reader = codec
        .decompressor(Box::new(Cursor::new(compressed)))
        .map_err(CodecError::Init)?;
    let mut out = Vec::new();
    io::copy(&mut reader, &mut out).map_err(CodecError::Copy)?;
    Ok(out)
}
