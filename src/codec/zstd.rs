//! zstd via the `zstd` crate.
//!
//! The four named speed presets map onto plain zstd levels.

use std::io::{self, Read, Write};

use ::zstd::stream::read::Decoder;
use ::zstd::stream::write::Encoder;

use super::{expect_header, CodecAdapter, CompressWriter, Sink, Source};

/// Frame magic number, little-endian `0xFD2FB528`.
const MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

pub const SPEED_FASTEST: i32 = 1;
pub const SPEED_DEFAULT: i32 = 3;
pub const SPEED_BETTER_COMPRESSION: i32 = 7;
pub const SPEED_BEST_COMPRESSION: i32 = 11;

/// Levels benchmarked by default.
pub const LEVELS: [i32; 4] = [
    SPEED_FASTEST,
    SPEED_DEFAULT,
    SPEED_BETTER_COMPRESSION,
    SPEED_BEST_COMPRESSION,
];

/// Human-readable name of a zstd preset, `"invalid"` for anything unnamed.
pub fn level_name(level: i32) -> &'static str {
    match level {
        SPEED_FASTEST => "fastest",
        SPEED_DEFAULT => "default",
        SPEED_BETTER_COMPRESSION => "better compression",
        SPEED_BEST_COMPRESSION => "best compression",
        _ => "invalid",
    }
}

/// zstd at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct Zstd {
    level: i32,
}

impl Zstd {
    pub fn new(level: i32) -> Self {
        Zstd { level }
    }
}

impl<W: Write> CompressWriter for Encoder<'static, W> {
    fn finalize(self: Box<Self>) -> io::Result<()> {
        (*self).finish().map(drop)
    }
}

impl CodecAdapter for Zstd {
    fn family(&self) -> &'static str {
        "zstd"
    }

    fn compressor<'a>(&self, sink: Sink<'a>) -> io::Result<Box<dyn CompressWriter + 'a>> {
        // libzstd clamps out-of-range levels silently; reject them instead.
        if !::zstd::compression_level_range().contains(&self.level) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("zstd: invalid compression level {}", self.level),
            ));
        }
        Ok(Box::new(Encoder::new(sink, self.level)?))
    }

    fn decompressor<'a>(&self, source: Source<'a>) -> io::Result<Box<dyn Read + 'a>> {
        let source = expect_header(source, MAGIC.len(), "zstd", |head| head == MAGIC)?;
        Ok(Box::new(Decoder::new(source)?))
    }
}
