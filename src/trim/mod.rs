//! Trimmed output production.
//!
//! Writing the trimmed file is a stream copy, not a re-encode: ffmpeg seeks
//! to the offset and copies the audio codec data as-is. A zero offset means
//! "no trim" and degenerates to a plain byte copy.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Copy `input` to `output`, dropping everything before `seek_secs`.
pub fn trim_file(input: &Path, output: &Path, seek_secs: f64) -> Result<()> {
    if seek_secs <= 0.0 {
        debug!("Copying unchanged: {}", input.display());
        std::fs::copy(input, output)?;
        return Ok(());
    }

    debug!(
        "Trimming {} at {:.2}s -> {}",
        input.display(),
        seek_secs,
        output.display()
    );

    let result = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-nostdin")
        .arg("-y")
        .arg("-ss")
        .arg(format!("{seek_secs:.6}"))
        .arg("-i")
        .arg(input)
        .arg("-acodec")
        .arg("copy")
        .arg(output)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::TrimSpawn {
            path: input.to_path_buf(),
            source: e,
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let detail = stderr
            .lines()
            .last()
            .map_or_else(|| result.status.to_string(), ToString::to_string);
        return Err(Error::TrimFailed {
            path: input.to_path_buf(),
            detail,
        });
    }

    Ok(())
}
