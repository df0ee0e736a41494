//! Single file processing pipeline.

use crate::audio::decode_audio_file;
use crate::clip::ClipCache;
use crate::constants::RESULT_LINE_WIDTH;
use crate::correlate::correlate_magnitude;
use crate::detect::{Detection, DetectionParams, evaluate};
use crate::error::{Error, Result};
use crate::pipeline::output_path_for;
use crate::report::DetectionReporter;
use crate::trim::trim_file;
use std::path::Path;
use tracing::{debug, info};

/// Per-run settings shared by every file.
pub struct ProcessOptions<'a> {
    /// Detection parameters (percentile, fp factor, min seek).
    pub params: DetectionParams,
    /// Maximum duration decoded from each file, in seconds.
    pub max_load_secs: f32,
    /// Output directory, when trimmed files are wanted.
    pub output_dir: Option<&'a Path>,
    /// Analyze and log without writing anything.
    pub dry_run: bool,
}

/// Result of processing a single file.
#[derive(Debug)]
pub struct FileOutcome {
    /// The detection decision with diagnostics.
    pub detection: Detection,
    /// Sample rate of the input file in Hz.
    pub sample_rate: u32,
}

/// Run detection on one input file and produce its trimmed output.
///
/// Flow: decode, look up the reversed clip for the file's rate, correlate,
/// decide, report, trim. The stable result line is printed by the caller.
pub fn process_file(
    input: &Path,
    cache: &mut ClipCache,
    reporter: &dyn DetectionReporter,
    options: &ProcessOptions<'_>,
) -> Result<FileOutcome> {
    debug!("Processing: {}", input.display());

    let decoded = decode_audio_file(input, options.max_load_secs)?;
    debug!(
        "Decoded {:.1}s at {} Hz",
        decoded.duration_secs, decoded.sample_rate
    );

    let reversed = cache.reversed_for(decoded.sample_rate)?;
    let clip_len = reversed.len();

    let trace = correlate_magnitude(&decoded.samples, reversed)?;
    let detection = evaluate(&trace, clip_len, decoded.sample_rate, &options.params);

    reporter.report(input, &trace, &detection, decoded.sample_rate)?;

    if let Some(output_dir) = options.output_dir
        && !options.dry_run
    {
        std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        let output = output_path_for(input, output_dir);
        trim_file(input, &output, detection.seek_secs)?;
        info!("Wrote: {}", output.display());
    }

    Ok(FileOutcome {
        detection,
        sample_rate: decoded.sample_rate,
    })
}

/// The stable one-line-per-file result record.
///
/// Format is load-bearing for downstream log scraping; keep it unchanged.
pub fn format_result_line(input: &Path, detection: &Detection, sample_rate: u32) -> String {
    let verdict = if detection.keep { "KEEP" } else { "NOPE" };
    format!(
        "{}: {verdict} {sample_rate}hz \
         event_detection_threshold={:.2} fp_max_threshold={:.2} \
         zmax={:.2} zstd={:.2} zmean={:.2} z_event_start={} seek:{:.2}s",
        padded_basename(input),
        detection.event_threshold,
        detection.fp_threshold,
        detection.max,
        detection.stddev,
        detection.mean,
        detection.event_start_sample,
        detection.seek_secs,
    )
}

/// The skip record for inputs whose output already exists.
pub fn format_skip_line(input: &Path) -> String {
    format!(
        "{}: SKIPPED - output file already exists",
        padded_basename(input)
    )
}

/// First 64 characters of the basename, padded to a fixed-width column.
fn padded_basename(input: &Path) -> String {
    let name = input.file_name().map_or_else(
        || std::borrow::Cow::Borrowed(""),
        |n| n.to_string_lossy(),
    );
    let width = RESULT_LINE_WIDTH;
    let truncated: String = name.chars().take(width).collect();
    format!("{truncated:<width$}")
}
