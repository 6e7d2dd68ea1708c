use std::io::Cursor;

use tracing::debug;

use super::AudioError;
use super::decoder::decode_to_mono;
use super::resampler::{DEFAULT_CHUNK_SIZE, Resampler};

pub const TARGET_SAMPLE_RATE: u32 = 16_000;
pub const TARGET_CHANNELS: u16 = 1;

/// Mono waveform at 16kHz, f32 normalized [-1.0, 1.0].
#[derive(Debug, Clone, Default)]
pub struct NormalizedAudio {
    samples: Vec<f32>,
}

impl NormalizedAudio {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        TARGET_SAMPLE_RATE
    }

    pub fn channels(&self) -> u16 {
        TARGET_CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / TARGET_SAMPLE_RATE as f64
    }

    /// Encodes the waveform as 16-bit PCM WAV, the format sent to recognition backends.
    pub fn to_wav(&self) -> Result<Vec<u8>, AudioError> {
        let spec = hound::WavSpec {
            channels: TARGET_CHANNELS,
            sample_rate: TARGET_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::with_capacity(44 + self.samples.len() * 2));
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| AudioError::Encode(e.to_string()))?;
            for &sample in &self.samples {
                let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(pcm)
                    .map_err(|e| AudioError::Encode(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| AudioError::Encode(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}

/// Decodes arbitrary container bytes and converts them to mono 16kHz.
///
/// CPU-bound; async callers should run this on a blocking thread.
pub fn normalize(bytes: &[u8]) -> Result<NormalizedAudio, AudioError> {
    let decoded = decode_to_mono(bytes)?;

    let samples = if decoded.sample_rate == TARGET_SAMPLE_RATE || decoded.samples.is_empty() {
        decoded.samples
    } else {
        let mut resampler = Resampler::new(decoded.sample_rate, TARGET_SAMPLE_RATE, DEFAULT_CHUNK_SIZE)?;
        resampler.resample_all(&decoded.samples)?
    };

    debug!(
        source_rate = decoded.sample_rate,
        samples = samples.len(),
        "Normalized audio to 16kHz mono"
    );

    Ok(NormalizedAudio { samples })
}
