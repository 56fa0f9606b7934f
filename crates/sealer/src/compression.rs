//! Zlib compression applied to plaintext before sealing, only on request.

use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use thiserror::Error;

/// Errors produced by the compression codec.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The encoder failed to write or finish the stream.
    #[error("compression failed: {0}")]
    Compress(String),

    /// The input is not a valid zlib stream.
    #[error("decompression failed: {0}")]
    Decompress(String),
}

/// Compress `input` as a single zlib stream at the default level.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(input)
        .map_err(|e| CompressionError::Compress(e.to_string()))?;
    enc.finish()
        .map_err(|e| CompressionError::Compress(e.to_string()))
}

/// Inflate a zlib stream produced by [`compress`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut dec = ZlibDecoder::new(input);
    let mut out = Vec::new();
    dec.read_to_end(&mut out)
        .map_err(|e| CompressionError::Decompress(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_round_trip() {
        let input = b"session-data ".repeat(64);
        let packed = compress(&input).unwrap();
        assert!(packed.len() < input.len());
        assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(decompress(&compress(b"").unwrap()).unwrap(), b"");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decompress(b"definitely not zlib").is_err());
    }
}
