//! End-to-end detection tests over synthetic signals.

#![allow(clippy::unwrap_used)]

use jinglecut::audio::resample;
use jinglecut::clip::{ClipCache, ReferenceClip};
use jinglecut::correlate::correlate_magnitude;
use jinglecut::detect::{Detection, DetectionParams, evaluate};

const RATE: u32 = 44100;

/// 2-second synthetic sweep, 200 Hz to 2 kHz, full amplitude.
fn sweep(rate: u32, secs: f32) -> Vec<f32> {
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    let n = (rate as f32 * secs) as usize;
    #[allow(clippy::cast_precision_loss)]
    let samples = (0..n)
        .map(|i| {
            let t = i as f32 / rate as f32;
            (2.0 * std::f32::consts::PI * (200.0 + 450.0 * t) * t).sin()
        })
        .collect();
    samples
}

/// Deterministic white-ish noise in [-1, 1).
fn noise(len: usize, mut state: u32) -> Vec<f32> {
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            #[allow(clippy::cast_possible_truncation)]
            let v = (f64::from(state >> 8) / f64::from(1u32 << 24) * 2.0 - 1.0) as f32;
            v
        })
        .collect()
}

/// Silence of `secs` seconds with `clip` mixed in at `at_secs`.
fn silence_with_clip(rate: u32, secs: f32, clip: &[f32], at_secs: f32) -> Vec<f32> {
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    let mut input = vec![0.0f32; (rate as f32 * secs) as usize];
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    let offset = (rate as f32 * at_secs) as usize;
    input[offset..offset + clip.len()].copy_from_slice(clip);
    input
}

fn detect(input: &[f32], rate: u32, cache: &mut ClipCache) -> Detection {
    let reversed = cache.reversed_for(rate).unwrap();
    let clip_len = reversed.len();
    let trace = correlate_magnitude(input, reversed).unwrap();
    assert_eq!(trace.len(), input.len());
    evaluate(&trace, clip_len, rate, &DetectionParams::default())
}

#[test]
fn clip_at_15s_is_found_within_tolerance() {
    let clip = sweep(RATE, 2.0);
    let input = silence_with_clip(RATE, 30.0, &clip, 15.0);

    let mut cache = ClipCache::new(ReferenceClip::from_samples(clip, RATE));
    let detection = detect(&input, RATE, &mut cache);

    assert!(detection.keep);
    assert!(
        (14.9..=15.1).contains(&detection.seek_secs),
        "seek was {:.3}s",
        detection.seek_secs
    );
}

#[test]
fn white_noise_without_clip_is_rejected() {
    let clip = sweep(RATE, 2.0);
    let input = noise(30 * RATE as usize, 0xDEAD_BEEF);

    let mut cache = ClipCache::new(ReferenceClip::from_samples(clip, RATE));
    let detection = detect(&input, RATE, &mut cache);

    assert!(!detection.keep);
    assert_eq!(detection.seek_secs, 0.0);
}

#[test]
fn pure_silence_is_rejected() {
    let clip = sweep(RATE, 2.0);
    let input = vec![0.0f32; 30 * RATE as usize];

    let mut cache = ClipCache::new(ReferenceClip::from_samples(clip, RATE));
    let detection = detect(&input, RATE, &mut cache);

    assert!(!detection.keep);
    assert_eq!(detection.seek_secs, 0.0);
}

#[test]
fn clip_before_min_seek_is_rejected() {
    let clip = sweep(RATE, 2.0);
    // Strong match at 5s: earlier than the 10s guard allows.
    let input = silence_with_clip(RATE, 30.0, &clip, 5.0);

    let mut cache = ClipCache::new(ReferenceClip::from_samples(clip, RATE));
    let detection = detect(&input, RATE, &mut cache);

    assert!(!detection.keep);
    assert_eq!(detection.seek_secs, 0.0);
    // The rejected candidate was still well correlated.
    assert!(detection.max > detection.fp_threshold);
}

#[test]
fn detection_works_across_sample_rates() {
    let clip = sweep(RATE, 2.0);
    // Input recorded at half the clip's rate.
    let input_rate = 22050;
    let clip_at_input_rate = resample(&clip, RATE, input_rate).unwrap();
    let input = silence_with_clip(input_rate, 30.0, &clip_at_input_rate, 15.0);

    let mut cache = ClipCache::new(ReferenceClip::from_samples(clip, RATE));
    let detection = detect(&input, input_rate, &mut cache);

    assert!(detection.keep);
    assert!(
        (14.8..=15.2).contains(&detection.seek_secs),
        "seek was {:.3}s",
        detection.seek_secs
    );
}

#[test]
fn clip_longer_than_input_collapses_to_start() {
    let clip = sweep(RATE, 2.0);
    let input = sweep(RATE, 1.0);

    let mut cache = ClipCache::new(ReferenceClip::from_samples(clip, RATE));
    let detection = detect(&input, RATE, &mut cache);

    assert_eq!(detection.event_start_sample, 0);
    assert!(!detection.keep);
}
