//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Locate a known jingle in recordings and trim everything up to it.
#[derive(Debug, Parser)]
#[command(name = "jinglecut")]
#[command(author, version, about, long_about = None)]
#[command(group(
    clap::ArgGroup::new("input")
        .required(true)
        .args(["input_dir", "input_file"])
))]
pub struct Cli {
    /// Process all mp3 files from this directory.
    #[arg(short = 'd', long, env = "JINGLECUT_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Single audio file to process.
    #[arg(short = 'i', long)]
    pub input_file: Option<PathBuf>,

    /// Audio clip to locate in the input file(s).
    #[arg(short, long, env = "JINGLECUT_CLIP")]
    pub clip: PathBuf,

    /// Directory in which to save trimmed files.
    #[arg(long, env = "JINGLECUT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analyze and log without writing any files.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Directory in which to save a correlation plot for each detection.
    #[arg(long)]
    pub plots_dir: Option<PathBuf>,

    /// False positive threshold factor: the correlation max must exceed
    /// `mean + factor * stddev` to trigger a detection.
    #[arg(long, value_parser = parse_fp_threshold_factor, env = "JINGLECUT_FP_THRESHOLD_FACTOR")]
    pub fp_threshold_factor: Option<i32>,

    /// Percentile whose first crossing marks the event position.
    #[arg(long, value_parser = parse_percentile, env = "JINGLECUT_PERCENTILE")]
    pub percentile: Option<f64>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate the false positive threshold factor.
fn parse_fp_threshold_factor(s: &str) -> Result<i32, String> {
    let value: i32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;

    if value < 1 {
        return Err(format!("threshold factor must be at least 1, got {value}"));
    }

    Ok(value)
}

/// Parse and validate the detection percentile.
fn parse_percentile(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(value > 0.0 && value < 100.0) {
        return Err(format!(
            "percentile must be between 0 and 100 exclusive, got {value}"
        ));
    }

    Ok(value)
}
