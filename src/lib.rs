//! Jinglecut - locate a known jingle in recordings and trim everything up
//! to it.
//!
//! The jingle is found by FFT cross-correlation against a time-reversed
//! reference clip; a percentile scan localizes the event and a
//! `mean + k * stddev` bound rejects false positives.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod clip;
pub mod config;
pub mod constants;
pub mod correlate;
pub mod detect;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod trim;

use clap::Parser;
use cli::Cli;
use clip::{ClipCache, ReferenceClip};
use constants::MIN_SEEK_SECS;
use detect::DetectionParams;
use pipeline::{
    ProcessCheck, ProcessOptions, collect_input_files, format_result_line, format_skip_line,
    process_file, should_process,
};
use report::{DetectionReporter, NullReporter, PlotReporter, progress};
use std::path::PathBuf;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the jinglecut CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = config::load_default_config()?;

    // Fatal configuration problems surface before any file is touched.
    if cli.output_dir.is_none() && !cli.dry_run {
        return Err(Error::ConfigValidation {
            message: "needs --output-dir or --dry-run".to_string(),
        });
    }

    let params = DetectionParams {
        percentile: cli.percentile.unwrap_or(config.defaults.percentile),
        fp_threshold_factor: cli
            .fp_threshold_factor
            .unwrap_or(config.defaults.fp_threshold_factor),
        min_seek_secs: MIN_SEEK_SECS,
    };
    let max_load_secs = config.defaults.max_load_secs;

    let files: Vec<PathBuf> = match (&cli.input_file, &cli.input_dir) {
        (Some(file), _) => vec![file.clone()],
        (None, Some(dir)) => collect_input_files(dir)?,
        (None, None) => {
            // clap's input group enforces this; keep a real error anyway.
            return Err(Error::ConfigValidation {
                message: "either --input-dir or --input-file is required".to_string(),
            });
        }
    };

    info!("Found {} file(s) to process", files.len());

    info!("Loading reference clip: {}", cli.clip.display());
    let reference = ReferenceClip::load(&cli.clip, max_load_secs)?;
    debug!(
        "Reference clip: {} samples at {} Hz",
        reference.len(),
        reference.sample_rate()
    );
    let mut cache = ClipCache::new(reference);

    let reporter: Box<dyn DetectionReporter> = match cli.plots_dir {
        Some(dir) => Box::new(PlotReporter::new(dir)),
        None => Box::new(NullReporter),
    };

    let options = ProcessOptions {
        params,
        max_load_secs,
        output_dir: cli.output_dir.as_deref(),
        dry_run: cli.dry_run,
    };

    let total_start = std::time::Instant::now();
    let file_progress = progress::create_file_progress(files.len(), !cli.quiet);

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut trimmed = 0usize;

    for file in &files {
        if should_process(file, options.output_dir, options.dry_run) == ProcessCheck::SkipExists {
            println!("{}", format_skip_line(file));
            skipped += 1;
            progress::inc_progress(file_progress.as_ref());
            continue;
        }

        // A decode failure aborts the whole batch.
        let outcome = process_file(file, &mut cache, reporter.as_ref(), &options)?;
        println!(
            "{}",
            format_result_line(file, &outcome.detection, outcome.sample_rate)
        );

        processed += 1;
        if outcome.detection.keep {
            trimmed += 1;
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    info!(
        "Complete: {} processed, {} skipped, {} with jingle found in {:.2}s",
        processed,
        skipped,
        trimmed,
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Result lines own stdout; logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
