//! LZMA-family codecs via `liblzma`.
//!
//! Three containers share one encoder core:
//! - [`Xz`]: the `.xz` container with integrity check.
//! - [`Lzma`]: the legacy `.lzma` ("alone") header plus end marker.
//! - [`Lzma2`]: raw LZMA2 chunks with no container at all.
//!
//! None of the three is parameterized in the benchmark, so each defaults to
//! liblzma's standard preset.

use std::io::{self, Read, Write};

use liblzma::read::XzDecoder;
use liblzma::stream::{Check, Filters, LzmaOptions, Stream};
use liblzma::write::XzEncoder;

use super::{expect_header, CodecAdapter, CompressWriter, Sink, Source};

/// liblzma's default preset (`xz -6`).
pub const DEFAULT_PRESET: u32 = 6;

/// Stream header magic of the `.xz` container.
const XZ_MAGIC: [u8; 6] = [0xfd, b'7', b'z', b'X', b'Z', 0x00];

/// Properties byte, dictionary size (u32 LE) and uncompressed size (u64 LE).
const LZMA_HEADER_LEN: usize = 13;

/// Largest valid `(pb * 5 + lp) * 9 + lc`.
const LZMA_MAX_PROPERTIES: u8 = 224;

impl<W: Write> CompressWriter for XzEncoder<W> {
    fn finalize(self: Box<Self>) -> io::Result<()> {
        (*self).finish().map(drop)
    }
}

fn lzma_options(preset: u32) -> io::Result<LzmaOptions> {
    Ok(LzmaOptions::new_preset(preset)?)
}

/// Accepts the `.lzma` headers liblzma writes: valid properties, a dictionary
/// size of `2^n` or `2^n + 2^(n-1)` (or all ones), and an uncompressed size
/// that is either unknown or below 256 GiB.
fn is_lzma_header(head: &[u8]) -> bool {
    if head.len() != LZMA_HEADER_LEN {
        return false;
    }
    let properties = head[0];
    let dict = u32::from_le_bytes([head[1], head[2], head[3], head[4]]);
    let mut size = [0u8; 8];
    size.copy_from_slice(&head[5..]);
    let size = u64::from_le_bytes(size);

    let dict_ok = dict == u32::MAX
        || dict.is_power_of_two()
        || (dict != 0 && dict / (dict & dict.wrapping_neg()) == 3);
    properties <= LZMA_MAX_PROPERTIES && dict_ok && (size == u64::MAX || size < 1 << 38)
}

/// Raw LZMA2 has no header; the first control byte must be the end marker, an
/// uncompressed chunk with dictionary reset, or an LZMA chunk that resets
/// both dictionary and state.
fn is_lzma2_start(head: &[u8]) -> bool {
    matches!(head.first(), Some(0x00 | 0x01 | 0xe0..=0xff))
}

// ── xz ────────────────────────────────────────────────────────────────────────

/// `.xz` container.
#[derive(Debug, Clone, Copy)]
pub struct Xz {
    preset: u32,
}

impl Xz {
    pub fn new(preset: u32) -> Self {
        Xz { preset }
    }
}

impl Default for Xz {
    fn default() -> Self {
        Xz::new(DEFAULT_PRESET)
    }
}

impl CodecAdapter for Xz {
    fn family(&self) -> &'static str {
        "xz"
    }

    fn compressor<'a>(&self, sink: Sink<'a>) -> io::Result<Box<dyn CompressWriter + 'a>> {
        let stream = Stream::new_easy_encoder(self.preset, Check::Crc64)?;
        Ok(Box::new(XzEncoder::new_stream(sink, stream)))
    }

    fn decompressor<'a>(&self, source: Source<'a>) -> io::Result<Box<dyn Read + 'a>> {
        let source = expect_header(source, XZ_MAGIC.len(), "xz", |head| head == XZ_MAGIC)?;
        let stream = Stream::new_stream_decoder(u64::MAX, 0)?;
        Ok(Box::new(XzDecoder::new_stream(source, stream)))
    }
}

// ── lzma ──────────────────────────────────────────────────────────────────────

/// Legacy `.lzma` container.
#[derive(Debug, Clone, Copy)]
pub struct Lzma {
    preset: u32,
}

impl Lzma {
    pub fn new(preset: u32) -> Self {
        Lzma { preset }
    }
}

impl Default for Lzma {
    fn default() -> Self {
        Lzma::new(DEFAULT_PRESET)
    }
}

impl CodecAdapter for Lzma {
    fn family(&self) -> &'static str {
        "lzma"
    }

    fn compressor<'a>(&self, sink: Sink<'a>) -> io::Result<Box<dyn CompressWriter + 'a>> {
        let stream = Stream::new_lzma_encoder(&lzma_options(self.preset)?)?;
        Ok(Box::new(XzEncoder::new_stream(sink, stream)))
    }

    fn decompressor<'a>(&self, source: Source<'a>) -> io::Result<Box<dyn Read + 'a>> {
        let source = expect_header(source, LZMA_HEADER_LEN, "lzma", is_lzma_header)?;
        let stream = Stream::new_lzma_decoder(u64::MAX)?;
        Ok(Box::new(XzDecoder::new_stream(source, stream)))
    }
}

// ── lzma2 ─────────────────────────────────────────────────────────────────────

/// Raw LZMA2 stream.
///
/// The decoder has no header to learn the dictionary size from, so it is
/// built from the same preset as the encoder.
#[derive(Debug, Clone, Copy)]
pub struct Lzma2 {
    preset: u32,
}

impl Lzma2 {
    pub fn new(preset: u32) -> Self {
        Lzma2 { preset }
    }

    fn filters(&self) -> io::Result<Filters> {
        let mut filters = Filters::new();
        filters.lzma2(&lzma_options(self.preset)?);
        Ok(filters)
    }
}

impl Default for Lzma2 {
    fn default() -> Self {
        Lzma2::new(DEFAULT_PRESET)
    }
}

impl CodecAdapter for Lzma2 {
    fn family(&self) -> &'static str {
        "lzma2"
    }

    fn compressor<'a>(&self, sink: Sink<'a>) -> io::Result<Box<dyn CompressWriter + 'a>> {
        let stream = Stream::new_raw_encoder(&self.filters()?)?;
        Ok(Box::new(XzEncoder::new_stream(sink, stream)))
    }

    fn decompressor<'a>(&self, source: Source<'a>) -> io::Result<Box<dyn Read + 'a>> {
        let source = expect_header(source, 1, "lzma2", is_lzma2_start)?;
        let stream = Stream::new_raw_decoder(&self.filters()?)?;
        Ok(Box::new(XzDecoder::new_stream(source, stream)))
    }
}
