//! Reference clip handling and the per-sample-rate reversed-clip cache.

use crate::audio::{decode_audio_file, resample};
use crate::error::Result;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::debug;

/// The jingle to search for: immutable samples at their native sample rate.
#[derive(Debug, Clone)]
pub struct ReferenceClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl ReferenceClip {
    /// Load the reference clip from an audio file.
    pub fn load(path: &Path, max_duration_secs: f32) -> Result<Self> {
        let decoded = decode_audio_file(path, max_duration_secs)?;
        debug!(
            "Loaded reference clip: {} samples at {} Hz ({:.2}s)",
            decoded.samples.len(),
            decoded.sample_rate,
            decoded.duration_secs
        );
        Ok(Self {
            samples: decoded.samples,
            sample_rate: decoded.sample_rate,
        })
    }

    /// Build a clip directly from samples. Used by tests and callers that
    /// synthesize the reference signal.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Native sample rate of the clip in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples at the native rate.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the clip holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Memoized map from sample rate to the time-reversed (and, when the rate
/// differs from the clip's native rate, resampled) reference clip.
///
/// Entries are created lazily and never evicted; the number of distinct
/// sample rates seen across a run is small. Resampling for a given rate
/// happens at most once regardless of how many input files share it.
pub struct ClipCache {
    clip: ReferenceClip,
    reversed: HashMap<u32, Vec<f32>>,
}

impl ClipCache {
    /// Create a cache seeded with the clip's own reversed samples at its
    /// native sample rate.
    pub fn new(clip: ReferenceClip) -> Self {
        let mut reversed = HashMap::new();
        let mut native: Vec<f32> = clip.samples.clone();
        native.reverse();
        reversed.insert(clip.sample_rate, native);
        Self { clip, reversed }
    }

    /// The reversed clip at the given sample rate, resampling on first use.
    pub fn reversed_for(&mut self, sample_rate: u32) -> Result<&[f32]> {
        match self.reversed.entry(sample_rate) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                debug!(
                    "Resampling reference clip {} Hz -> {} Hz",
                    self.clip.sample_rate, sample_rate
                );
                let mut resampled =
                    resample(&self.clip.samples, self.clip.sample_rate, sample_rate)?;
                resampled.reverse();
                Ok(entry.insert(resampled).as_slice())
            }
        }
    }

    /// The reference clip backing this cache.
    pub fn clip(&self) -> &ReferenceClip {
        &self.clip
    }
}
