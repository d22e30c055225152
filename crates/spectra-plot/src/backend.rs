//! Rendering seam.
//!
//! Chart data is backend-neutral; a backend draws it with whatever
//! library it wraps.

use tracing::trace;

use crate::chart::Chart;
use crate::error::PlotError;
use crate::pole_zero::PoleZeroChart;

/// Something that can draw charts.
pub trait PlotBackend {
    /// Draws a line chart.
    ///
    /// # Errors
    ///
    /// [`PlotError::Backend`] on rendering failure.
    fn render(&mut self, chart: &Chart) -> Result<(), PlotError>;

    /// Draws a pole-zero diagram.
    ///
    /// # Errors
    ///
    /// [`PlotError::Backend`] on rendering failure or if the backend has no
    /// pole-zero support, which is the default.
    fn render_pole_zero(&mut self, chart: &PoleZeroChart) -> Result<(), PlotError> {
        let _ = chart;
        Err(PlotError::Backend(
            "pole-zero diagrams are not supported".to_string(),
        ))
    }
}

/// Keeps every chart it is given.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    /// Line charts in the order rendered.
    pub charts: Vec<Chart>,
    /// Pole-zero diagrams in the order rendered.
    pub pole_zero_charts: Vec<PoleZeroChart>,
}

impl PlotBackend for RecordingBackend {
    fn render(&mut self, chart: &Chart) -> Result<(), PlotError> {
        trace!(x_label = %chart.x_label, "recording chart");
        self.charts.push(chart.clone());
        Ok(())
    }

    fn render_pole_zero(&mut self, chart: &PoleZeroChart) -> Result<(), PlotError> {
        trace!(poles = chart.poles.len(), zeros = chart.zeros.len(), "recording pole-zero chart");
        self.pole_zero_charts.push(chart.clone());
        Ok(())
    }
}
