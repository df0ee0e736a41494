//! Cross-correlation via FFT convolution.
//!
//! Correlating an input recording with the time-reversed jingle is a linear
//! convolution; computing it in the frequency domain keeps the cost at
//! O(n log n) even for inputs that run tens of minutes.

use crate::error::{Error, Result};
use realfft::RealFftPlanner;

/// Convolve `input` with `reversed_clip` and return the magnitude of the
/// centered, same-length-as-input window of the result.
///
/// This is `fftconvolve(input, reversed_clip, mode="same")` followed by an
/// elementwise absolute value. The output length always equals the input
/// length; implicit zero-padding handles the edges whichever of the two
/// signals is shorter.
pub fn correlate_magnitude(input: &[f32], reversed_clip: &[f32]) -> Result<Vec<f32>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if reversed_clip.is_empty() {
        return Err(Error::Correlation {
            reason: "reference clip is empty".to_string(),
        });
    }

    let full_len = input.len() + reversed_clip.len() - 1;
    let fft_len = full_len.next_power_of_two();

    let mut planner = RealFftPlanner::<f32>::new();
    let r2c = planner.plan_fft_forward(fft_len);
    let c2r = planner.plan_fft_inverse(fft_len);

    let mut input_padded = r2c.make_input_vec();
    input_padded[..input.len()].copy_from_slice(input);
    let mut input_spectrum = r2c.make_output_vec();
    r2c.process(&mut input_padded, &mut input_spectrum)
        .map_err(|e| Error::Correlation {
            reason: e.to_string(),
        })?;

    let mut clip_padded = r2c.make_input_vec();
    clip_padded[..reversed_clip.len()].copy_from_slice(reversed_clip);
    let mut clip_spectrum = r2c.make_output_vec();
    r2c.process(&mut clip_padded, &mut clip_spectrum)
        .map_err(|e| Error::Correlation {
            reason: e.to_string(),
        })?;

    // Pointwise product in the frequency domain is convolution in time.
    for (a, b) in input_spectrum.iter_mut().zip(&clip_spectrum) {
        *a *= *b;
    }

    let mut full = c2r.make_output_vec();
    c2r.process(&mut input_spectrum, &mut full)
        .map_err(|e| Error::Correlation {
            reason: e.to_string(),
        })?;

    // realfft leaves a factor of fft_len on the round trip.
    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / fft_len as f32;

    // Centered window of the full convolution, same length as the input.
    let start = (reversed_clip.len() - 1) / 2;
    Ok(full[start..start + input.len()]
        .iter()
        .map(|v| (v * scale).abs())
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Direct O(n*m) "same" convolution for cross-checking.
    fn naive_convolve_same(input: &[f32], kernel: &[f32]) -> Vec<f32> {
        let full_len = input.len() + kernel.len() - 1;
        let mut full = vec![0.0f32; full_len];
        for (i, a) in input.iter().enumerate() {
            for (j, b) in kernel.iter().enumerate() {
                full[i + j] += a * b;
            }
        }
        let start = (kernel.len() - 1) / 2;
        full[start..start + input.len()]
            .iter()
            .map(|v| v.abs())
            .collect()
    }

    /// Deterministic pseudo-random samples in [-1, 1).
    fn noise(len: usize, mut state: u32) -> Vec<f32> {
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                #[allow(clippy::cast_precision_loss)]
                let unit = f64::from(state >> 8) / f64::from(1u32 << 24);
                #[allow(clippy::cast_possible_truncation)]
                let v = (unit * 2.0 - 1.0) as f32;
                v
            })
            .collect()
    }

    #[test]
    fn test_output_length_matches_input() {
        let input = noise(500, 1);
        for kernel_len in [1, 7, 499, 500, 501, 1200] {
            let kernel = noise(kernel_len, 2);
            let out = correlate_magnitude(&input, &kernel).unwrap();
            assert_eq!(out.len(), input.len(), "kernel_len={kernel_len}");
        }
    }

    #[test]
    fn test_unit_impulse_kernel_is_identity() {
        let input = vec![0.5, -0.25, 0.0, 1.0, -1.0];
        let out = correlate_magnitude(&input, &[1.0]).unwrap();
        for (got, want) in out.iter().zip(&input) {
            assert!((got - want.abs()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_matches_naive_convolution() {
        let input = noise(257, 3);
        let kernel = noise(31, 4);
        let fft = correlate_magnitude(&input, &kernel).unwrap();
        let naive = naive_convolve_same(&input, &kernel);
        for (i, (a, b)) in fft.iter().zip(&naive).enumerate() {
            assert!((a - b).abs() < 1e-3, "sample {i}: {a} vs {b}");
        }
    }

    #[test]
    fn test_embedded_kernel_peaks_near_insert_point() {
        // Reversed-kernel convolution peaks roughly at insert + len/2.
        let kernel = noise(64, 5);
        let mut reversed = kernel.clone();
        reversed.reverse();

        let insert = 300;
        let mut input = vec![0.0f32; 1024];
        input[insert..insert + kernel.len()].copy_from_slice(&kernel);

        let trace = correlate_magnitude(&input, &reversed).unwrap();
        let peak = trace
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();

        let expected = insert + kernel.len() / 2;
        assert!(
            peak.abs_diff(expected) <= 2,
            "peak at {peak}, expected near {expected}"
        );
    }

    #[test]
    fn test_empty_input_yields_empty_trace() {
        let out = correlate_magnitude(&[], &[1.0, 2.0]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_kernel_is_error() {
        assert!(correlate_magnitude(&[1.0, 2.0], &[]).is_err());
    }
}
