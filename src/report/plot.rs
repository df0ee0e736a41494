//! Correlation trace plots rendered to PNG.

use crate::constants::plot;
use crate::detect::Detection;
use crate::error::{Error, Result};
use crate::report::DetectionReporter;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Renders the correlation magnitude trace around the detected event to
/// `<basename>.png` in the plots directory.
pub struct PlotReporter {
    plots_dir: PathBuf,
}

impl PlotReporter {
    /// Create a reporter writing into `plots_dir` (created on demand).
    pub fn new(plots_dir: PathBuf) -> Self {
        Self { plots_dir }
    }

    fn plot_path(&self, input: &Path) -> PathBuf {
        let name = input.file_name().map_or_else(
            || std::borrow::Cow::Borrowed("output"),
            |n| n.to_string_lossy(),
        );
        self.plots_dir.join(format!("{name}.png"))
    }
}

impl DetectionReporter for PlotReporter {
    fn report(
        &self,
        input: &Path,
        trace: &[f32],
        detection: &Detection,
        sample_rate: u32,
    ) -> Result<()> {
        if trace.is_empty() {
            return Ok(());
        }

        std::fs::create_dir_all(&self.plots_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: self.plots_dir.clone(),
            source: e,
        })?;

        let path = self.plot_path(input);
        debug!("Writing plot: {}", path.display());

        // Window from the start of the file to a few seconds past the event.
        let tail = plot::TAIL_SECS * sample_rate as usize;
        let end = detection
            .event_start_sample
            .saturating_add(tail)
            .min(trace.len());
        let window = &trace[..end.max(1)];

        let y_max = window.iter().copied().fold(f32::MIN, f32::max).max(1e-6);

        render_trace(&path, window, y_max).map_err(|reason| Error::PlotWrite { path, reason })
    }
}

/// Draw the trace as a line series. Kept free of text so the bitmap backend
/// needs no font support.
fn render_trace(
    path: &Path,
    window: &[f32],
    y_max: f32,
) -> std::result::Result<(), String> {
    let root = BitMapBackend::new(path, (plot::WIDTH, plot::HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .margin(8)
        .build_cartesian_2d(0..window.len(), 0f32..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(LineSeries::new(
            window.iter().enumerate().map(|(i, &v)| (i, v)),
            &BLUE,
        ))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}
