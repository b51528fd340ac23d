//! Conditional response compression.
//!
//! # Responsibilities
//! - Negotiate an encoding from the client's Accept-Encoding header
//! - Compress text bodies above the size floor
//! - Guarantee the returned body is never larger than the input
//!
//! # Design Decisions
//! - Accept-Encoding is a case-insensitive substring scan, no q-value
//!   parsing; gzip is preferred over deflate, brotli is unsupported
//! - Whole-body compression; bodies are bounded in size, so no streaming
//! - A failed compression degrades silently to the identity body

use std::io::Write;

use bytes::Bytes;
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;

/// Bodies below this many bytes are never compressed.
pub const MIN_COMPRESS_SIZE: usize = 1024;

/// Supported content codings, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
    Deflate,
}

impl Encoding {
    /// Token used in Content-Encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
            Encoding::Deflate => "deflate",
        }
    }
}

/// Pick the preferred supported coding out of an Accept-Encoding value.
pub fn negotiate(accept_encoding: &str) -> Option<Encoding> {
    let accepted = accept_encoding.to_ascii_lowercase();
    if accepted.contains("gzip") {
        return Some(Encoding::Gzip);
    }
    if accepted.contains("deflate") {
        return Some(Encoding::Deflate);
    }
    None
}

/// Try to compress `body` for a client that sent `accept_encoding`.
///
/// Returns the body to serve and the coding applied, if any. Compression is
/// skipped for non-text bodies, bodies under [`MIN_COMPRESS_SIZE`], clients
/// that accept neither gzip nor deflate, and results that fail to shrink the
/// input strictly.
pub fn try_compress(
    body: Bytes,
    accept_encoding: Option<&str>,
    is_text: bool,
) -> (Bytes, Option<Encoding>) {
    if !is_text || body.len() < MIN_COMPRESS_SIZE {
        return (body, None);
    }
    let Some(encoding) = accept_encoding.and_then(negotiate) else {
        return (body, None);
    };

    match compress(&body, encoding) {
        Ok(compressed) if compressed.len() < body.len() => {
            (Bytes::from(compressed), Some(encoding))
        }
        Ok(_) => (body, None),
        Err(error) => {
            tracing::warn!(error = %error, encoding = encoding.as_str(), "Compression failed, serving identity");
            (body, None)
        }
    }
}

fn compress(data: &[u8], encoding: Encoding) -> std::io::Result<Vec<u8>> {
    match encoding {
        Encoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()
        }
        Encoding::Deflate => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()
        }
    }
}
