use audioadapter_buffers::direct::InterleavedSlice;
use rubato::{
    Async as AsyncResampler, FixedAsync, Resampler as RubatoResampler,
    SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use super::AudioError;

/// Input frames per resampling call.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Resamples mono audio from an arbitrary source rate to a fixed target rate using sinc
/// interpolation.
pub struct Resampler {
    inner: AsyncResampler<f32>,
    /// Accumulator for input samples that don't fill a complete chunk.
    pending: Vec<f32>,
    /// Number of input frames the resampler expects per process() call.
    chunk_size: usize,
    ratio: f64,
}

impl Resampler {
    /// Creates a new `input_rate` -> `output_rate` mono resampler.
    pub fn new(input_rate: u32, output_rate: u32, chunk_size: usize) -> Result<Self, AudioError> {
        if input_rate == 0 || output_rate == 0 {
            return Err(AudioError::Resample(format!(
                "invalid rates {input_rate} -> {output_rate}"
            )));
        }

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let ratio = output_rate as f64 / input_rate as f64;
        let inner = AsyncResampler::<f32>::new_sinc(
            ratio,
            2.0,               // max relative ratio
            &params,
            chunk_size,
            1,                 // mono channel
            FixedAsync::Input, // fixed input size
        )
        .map_err(|e| AudioError::Resample(format!("Failed to create resampler: {}", e)))?;

        Ok(Self {
            inner,
            pending: Vec::with_capacity(chunk_size * 2),
            chunk_size,
            ratio,
        })
    }

    /// Feeds mono samples and returns resampled output.
    ///
    /// Buffers internally if input doesn't fill a complete resampler chunk.
    /// Returns an empty vec if not enough data yet.
    pub fn process(&mut self, input: &[f32]) -> Result<Vec<f32>, AudioError> {
        self.pending.extend_from_slice(input);

        let mut output = Vec::new();

        while self.pending.len() >= self.chunk_size {
            let chunk: Vec<f32> = self.pending.drain(..self.chunk_size).collect();
            let frames = chunk.len(); // mono: 1 sample = 1 frame
            let input_adapter = InterleavedSlice::new(&chunk, 1, frames)
                .map_err(|e| AudioError::Resample(format!("Input adapter error: {}", e)))?;

            let resampled = self
                .inner
                .process(&input_adapter, 0, None)
                .map_err(|e| AudioError::Resample(e.to_string()))?;

            output.extend(resampled.take_data());
        }

        Ok(output)
    }

    /// Flushes any remaining buffered samples (with zero-padding).
    pub fn flush(&mut self) -> Result<Vec<f32>, AudioError> {
        if self.pending.is_empty() {
            return Ok(Vec::new());
        }

        self.pending.resize(self.chunk_size, 0.0);
        self.process(&[])
    }

    /// Resamples a complete buffer in one go.
    ///
    /// The filter's output delay is dropped from the front and the result is exactly
    /// `ceil(len * ratio)` frames, time-aligned with the input.
    pub fn resample_all(&mut self, input: &[f32]) -> Result<Vec<f32>, AudioError> {
        let expected = (input.len() as f64 * self.ratio).ceil() as usize;
        let delay = self.inner.output_delay();

        let mut output = self.process(input)?;
        output.extend(self.flush()?);

        let silence = vec![0.0f32; self.chunk_size];
        while output.len() < expected + delay {
            let tail = self.process(&silence)?;
            if tail.is_empty() {
                break;
            }
            output.extend(tail);
        }

        output.drain(..delay.min(output.len()));
        output.truncate(expected);

        Ok(output)
    }
}
