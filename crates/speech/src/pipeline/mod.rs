pub mod decoder;
pub mod normalizer;
pub mod resampler;

pub use decoder::{DecodedAudio, decode_to_mono};
pub use normalizer::{NormalizedAudio, TARGET_CHANNELS, TARGET_SAMPLE_RATE, normalize};
pub use resampler::Resampler;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("Audio decode error: {0}")]
    Decode(String),
    #[error("Resample error: {0}")]
    Resample(String),
    #[error("WAV encode error: {0}")]
    Encode(String),
}
