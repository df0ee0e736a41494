//! Diagnostics reporting.
//!
//! The detection core stays free of visualization concerns: it hands each
//! result to a [`DetectionReporter`], and the plotting implementation lives
//! behind that seam.

mod plot;
pub mod progress;

use crate::detect::Detection;
use crate::error::Result;
use std::path::Path;

pub use plot::PlotReporter;

/// Receives each per-file detection result together with its trace.
pub trait DetectionReporter {
    /// Report one file's detection outcome.
    fn report(
        &self,
        input: &Path,
        trace: &[f32],
        detection: &Detection,
        sample_rate: u32,
    ) -> Result<()>;
}

/// Reporter that does nothing. Used when no plots directory is configured.
pub struct NullReporter;

impl DetectionReporter for NullReporter {
    fn report(&self, _: &Path, _: &[f32], _: &Detection, _: u32) -> Result<()> {
        Ok(())
    }
}
