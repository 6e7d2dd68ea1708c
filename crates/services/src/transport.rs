use std::io::{Read, Write};

use base64::Engine;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// gzip-compresses `data` and encodes it as standard base64.
pub fn encode(data: &[u8]) -> Result<String, TransportError> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    Ok(base64::engine::general_purpose::STANDARD.encode(compressed))
}

/// Inverse of [`encode`].
pub fn decode(blob: &str) -> Result<Vec<u8>, TransportError> {
    let compressed = base64::engine::general_purpose::STANDARD.decode(blob.trim())?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut data = Vec::new();
    decoder.read_to_end(&mut data)?;
    Ok(data)
}
