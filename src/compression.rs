//! Opening the input and picking a decompressor for it.
//!
//! The codec comes, in order of preference, from an explicit choice, from the
//! file extension, or from the magic bytes at the start of the stream.
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "compression")]
use bzip2::read::BzDecoder;
#[cfg(feature = "compression")]
use flate2::read::MultiGzDecoder;
use log::debug;
#[cfg(feature = "compression")]
use xz2::read::XzDecoder;

use crate::errors::ParseError;

// Magic bytes for each compression format
const GZ_MAGIC: [u8; 2] = [0x1F, 0x8B];
const BZ_MAGIC: [u8; 2] = [0x42, 0x5A];
const XZ_MAGIC: [u8; 2] = [0xFD, 0x37];

/// How the input is compressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gz,
    Bz2,
    Xz,
}

impl Compression {
    /// Guess from the file extension; anything but `gz`, `bz2` and `xz` is
    /// taken as plain text.
    pub fn from_path(path: &Path) -> Option<Compression> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Some(Compression::Gz),
            Some("bz2") => Some(Compression::Bz2),
            Some("xz") => Some(Compression::Xz),
            _ => None,
        }
    }

    /// Guess from the first two bytes of the stream
    pub fn from_magic(first: &[u8]) -> Compression {
        match first {
            [a, b] if [*a, *b] == GZ_MAGIC => Compression::Gz,
            [a, b] if [*a, *b] == BZ_MAGIC => Compression::Bz2,
            [a, b] if [*a, *b] == XZ_MAGIC => Compression::Xz,
            _ => Compression::None,
        }
    }
}

impl FromStr for Compression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Compression::None),
            "gz" => Ok(Compression::Gz),
            "bz2" => Ok(Compression::Bz2),
            "xz" => Ok(Compression::Xz),
            _ => Err(ParseError::new_invalid_argument(format!(
                "invalid compression method '{}' (expected one of: gz, xz, bz2)",
                s
            ))),
        }
    }
}

/// Opens `path`, or stdin when it is `None`, and wraps it in the right
/// decompressor.
pub fn open_input(
    path: Option<&Path>,
    compression: Option<Compression>,
) -> Result<Box<dyn Read + Send>, ParseError> {
    match path {
        Some(path) => {
            let f = File::open(path).map_err(|e| ParseError::new_read_failure(&e, 0))?;
            debug!("reading from {}", path.display());
            decompress(f, compression.or_else(|| Compression::from_path(path)))
        }
        None => {
            debug!("reading from stdin");
            decompress(io::stdin(), compression)
        }
    }
}

/// Wraps `reader` in a decompressor for `compression`, sniffing the first two
/// bytes when it is `None`. The sniffed bytes are not lost.
pub fn decompress<R>(
    mut reader: R,
    compression: Option<Compression>,
) -> Result<Box<dyn Read + Send>, ParseError>
where
    R: Read + Send + 'static,
{
    let compression = match compression {
        Some(c) => c,
        None => {
            let mut first = [0; 2];
            let mut filled = 0;
            while filled < first.len() {
                match reader.read(&mut first[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(ParseError::new_read_failure(&e, 1)),
                }
            }
            let detected = Compression::from_magic(&first[..filled]);
            let head = Cursor::new(first[..filled].to_vec());
            return wrap(head.chain(reader), detected);
        }
    };
    wrap(reader, compression)
}

#[cfg(feature = "compression")]
fn wrap<R>(reader: R, compression: Compression) -> Result<Box<dyn Read + Send>, ParseError>
where
    R: Read + Send + 'static,
{
    debug!("input compression: {:?}", compression);
    Ok(match compression {
        Compression::None => Box::new(reader),
        Compression::Gz => Box::new(MultiGzDecoder::new(reader)),
        Compression::Bz2 => Box::new(BzDecoder::new(reader)),
        Compression::Xz => Box::new(XzDecoder::new(reader)),
    })
}

#[cfg(not(feature = "compression"))]
fn wrap<R>(reader: R, compression: Compression) -> Result<Box<dyn Read + Send>, ParseError>
where
    R: Read + Send + 'static,
{
    match compression {
        Compression::None => Ok(Box::new(reader)),
        c => Err(ParseError::new_invalid_argument(format!(
            "{:?} input needs the `compression` feature",
            c
        ))),
    }
}
