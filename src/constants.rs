//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "jinglecut";

/// Default false-positive threshold factor.
///
/// The correlation maximum must exceed `mean + factor * stddev` of the trace
/// for a detection to count. Empirically tuned, not derived; treat as a
/// tunable parameter.
pub const DEFAULT_FP_THRESHOLD_FACTOR: i32 = 16;

/// Default percentile used to pick the event detection threshold.
///
/// The first trace sample at or above this percentile marks the event.
/// Empirically tuned by listening tests on real recordings.
pub const DEFAULT_PERCENTILE: f64 = 99.99;

/// Minimum seek offset in seconds for a detection to be trusted.
///
/// Matches that start earlier than this are rejected regardless of
/// correlation strength.
pub const MIN_SEEK_SECS: f64 = 10.0;

/// Maximum audio duration loaded from any file, in seconds.
///
/// The jingle always sits near the start of a recording, so decoding more
/// than this only slows the correlation down.
pub const DEFAULT_MAX_LOAD_SECS: f32 = 240.0;

/// Width of the padded basename column in the per-file result line.
pub const RESULT_LINE_WIDTH: usize = 64;

/// Input file extension matched when scanning a directory.
pub const INPUT_EXTENSION: &str = "mp3";

/// Diagnostics plot settings.
pub mod plot {
    /// Seconds of trace rendered past the detected event start.
    pub const TAIL_SECS: usize = 5;

    /// Plot image width in pixels.
    pub const WIDTH: u32 = 1024;

    /// Plot image height in pixels.
    pub const HEIGHT: u32 = 480;
}
