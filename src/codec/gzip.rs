//! gzip via `flate2`.
//!
//! Levels follow the zlib convention: `0..=9`, with `-1` selecting the
//! library default and `-2` naming the huffman-only strategy.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::{expect_header, CodecAdapter, CompressWriter, Sink, Source};

/// ID1 and ID2 of every gzip member.
const MAGIC: [u8; 2] = [0x1f, 0x8b];

pub const NO_COMPRESSION: i32 = 0;
pub const BEST_SPEED: i32 = 1;
pub const BEST_COMPRESSION: i32 = 9;
pub const DEFAULT_COMPRESSION: i32 = -1;
pub const HUFFMAN_ONLY: i32 = -2;

/// Levels benchmarked by default.
pub const LEVELS: [i32; 3] = [BEST_SPEED, BEST_COMPRESSION, DEFAULT_COMPRESSION];

/// Human-readable name of a gzip level, `"invalid"` for anything unnamed.
pub fn level_name(level: i32) -> &'static str {
    match level {
        NO_COMPRESSION => "no compression",
        BEST_SPEED => "best speed",
        BEST_COMPRESSION => "best compression",
        DEFAULT_COMPRESSION => "default",
        HUFFMAN_ONLY => "huffman only",
        _ => "invalid",
    }
}

/// gzip at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: i32,
}

impl Gzip {
    pub fn new(level: i32) -> Self {
        Gzip { level }
    }

    fn compression(&self) -> io::Result<Compression> {
        match self.level {
            DEFAULT_COMPRESSION => Ok(Compression::default()),
            0..=9 => Ok(Compression::new(self.level as u32)),
            HUFFMAN_ONLY => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "huffman-only strategy is not available in this deflate backend",
            )),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("gzip: invalid compression level {other}"),
            )),
        }
    }
}

impl<W: Write> CompressWriter for GzEncoder<W> {
    fn finalize(self: Box<Self>) -> io::Result<()> {
        (*self).finish().map(drop)
    }
}

impl CodecAdapter for Gzip {
    fn family(&self) -> &'static str {
        "gzip"
    }

    fn compressor<'a>(&self, sink: Sink<'a>) -> io::Result<Box<dyn CompressWriter + 'a>> {
        Ok(Box::new(GzEncoder::new(sink, self.compression()?)))
    }

    fn decompressor<'a>(&self, source: Source<'a>) -> io::Result<Box<dyn Read + 'a>> {
        let source = expect_header(source, MAGIC.len(), "gzip", |head| head == MAGIC)?;
        Ok(Box::new(GzDecoder::new(source)))
    }
}
