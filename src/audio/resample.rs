//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 1;
const CHANNELS: usize = 1;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate. The output is
/// trimmed to the expected length so that sample positions keep mapping to
/// the same points in time.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        CHANNELS,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_chunk = resampler.input_frames_next();
    let expected_len = scaled_len(samples.len(), from_rate, to_rate);
    let mut output = Vec::with_capacity(expected_len + CHUNK_SIZE);

    // Feed fixed-size chunks; the final partial chunk is zero-padded and the
    // surplus output trimmed afterwards.
    let mut tail = Vec::new();
    for chunk in samples.chunks(frames_per_chunk) {
        let chunk = if chunk.len() == frames_per_chunk {
            chunk
        } else {
            tail.clear();
            tail.extend_from_slice(chunk);
            tail.resize(frames_per_chunk, 0.0);
            tail.as_slice()
        };

        let input_adapter =
            SequentialSlice::new(chunk, CHANNELS, frames_per_chunk).map_err(|e| {
                Error::Resample {
                    reason: format!("failed to create input adapter: {e}"),
                }
            })?;

        let resampled =
            resampler
                .process(&input_adapter, 0, None)
                .map_err(|e| Error::Resample {
                    reason: e.to_string(),
                })?;

        output.extend_from_slice(&resampled.take_data());
    }

    output.truncate(expected_len);
    Ok(output)
}

/// Length of `input_len` samples after rate conversion, rounded up.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    (input_len as f64 * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
