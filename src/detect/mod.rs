//! Detection decision: turn a correlation magnitude trace into a
//! keep/reject verdict and a trim offset.

use crate::constants::{DEFAULT_FP_THRESHOLD_FACTOR, DEFAULT_PERCENTILE, MIN_SEEK_SECS};

/// Tunable detection parameters.
///
/// The defaults are empirically chosen, not derived from first principles.
#[derive(Debug, Clone, Copy)]
pub struct DetectionParams {
    /// Percentile (0..100) that defines the event detection threshold.
    pub percentile: f64,
    /// False-positive bound factor: max must exceed `mean + k * stddev`.
    pub fp_threshold_factor: i32,
    /// Detections that would seek earlier than this many seconds are rejected.
    pub min_seek_secs: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            fp_threshold_factor: DEFAULT_FP_THRESHOLD_FACTOR,
            min_seek_secs: MIN_SEEK_SECS,
        }
    }
}

/// Outcome of evaluating one correlation trace.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    /// Whether the jingle was found and the file should be trimmed.
    pub keep: bool,
    /// Seconds to seek into the file; 0 whenever `keep` is false.
    pub seek_secs: f64,
    /// Estimated first sample of the jingle, clamped to 0.
    pub event_start_sample: usize,
    /// Value of the trace at the configured percentile.
    pub event_threshold: f64,
    /// False-positive bound: `mean + factor * stddev`.
    pub fp_threshold: f64,
    /// Maximum of the trace.
    pub max: f64,
    /// Population standard deviation of the trace.
    pub stddev: f64,
    /// Mean of the trace.
    pub mean: f64,
}

/// Evaluate a correlation magnitude trace.
///
/// `clip_len` is the reference clip length in samples at the input's sample
/// rate. The event position is the *first* trace sample at or above the
/// percentile threshold, not the global maximum: the correlation peak lags
/// the true onset slightly, and scanning from the left compensates. The
/// peak sits roughly in the middle of a clip-length window, so the onset
/// estimate backs off by half the clip length.
pub fn evaluate(
    trace: &[f32],
    clip_len: usize,
    sample_rate: u32,
    params: &DetectionParams,
) -> Detection {
    if trace.is_empty() {
        return Detection {
            keep: false,
            seek_secs: 0.0,
            event_start_sample: 0,
            event_threshold: 0.0,
            fp_threshold: 0.0,
            max: 0.0,
            stddev: 0.0,
            mean: 0.0,
        };
    }

    let event_threshold = percentile(trace, params.percentile);

    let event_pos = trace
        .iter()
        .position(|&v| f64::from(v) >= event_threshold)
        .unwrap_or(0);

    // Percentile-based scanning tends to fire early; clamp at 0.
    let event_start_sample = event_pos.saturating_sub(clip_len / 2);
    let mut seek_secs = to_secs(event_start_sample, sample_rate);

    let (mean, stddev, max) = trace_stats(trace);
    let fp_threshold = f64::from(params.fp_threshold_factor).mul_add(stddev, mean);

    let keep = max > fp_threshold && seek_secs > params.min_seek_secs;
    if !keep {
        seek_secs = 0.0;
    }

    Detection {
        keep,
        seek_secs,
        event_start_sample,
        event_threshold,
        fp_threshold,
        max,
        stddev,
        mean,
    }
}

/// Value below which `p` percent of the samples fall, with linear
/// interpolation between order statistics.
fn percentile(values: &[f32], p: f64) -> f64 {
    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    if sorted.len() == 1 {
        return f64::from(sorted[0]);
    }

    #[allow(clippy::cast_precision_loss)]
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - rank.floor();

    frac.mul_add(
        f64::from(sorted[hi]) - f64::from(sorted[lo]),
        f64::from(sorted[lo]),
    )
}

/// Mean, population standard deviation, and maximum of the trace.
fn trace_stats(trace: &[f32]) -> (f64, f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let n = trace.len() as f64;

    let mut sum = 0.0f64;
    let mut max = f64::MIN;
    for &v in trace {
        let v = f64::from(v);
        sum += v;
        if v > max {
            max = v;
        }
    }
    let mean = sum / n;

    let variance = trace
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    (mean, variance.sqrt(), max)
}

fn to_secs(sample: usize, sample_rate: u32) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let sample = sample as f64;
    sample / f64::from(sample_rate)
}
