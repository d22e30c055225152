//! Frequency-domain plots.

use tracing::debug;

use spectra_core::{ExprArena, ExprHandle, SymbolId};

use crate::backend::PlotBackend;
use crate::chart::{axis_label, AxisScale, Chart, LineStyle, Sampled, Scaling};
use crate::error::PlotError;
use crate::eval::Evaluator;
use crate::kind::PlotLayout;

/// Builds a chart of a spectrum sampled at caller-supplied frequencies.
///
/// Complex spectra default to magnitude in dB with phase on a secondary
/// axis. Impulses are drawn as markers when they fall inside the sampled
/// range.
///
/// # Example
///
/// ```
/// use spectra_core::ExprArena;
/// use spectra_plot::{Evaluator, FrequencyPlot, PlotKind};
///
/// let mut arena = ExprArena::new();
/// let f = arena.real_symbol("f");
/// let one = arena.one();
/// let k = arena.two_pi_i();
/// let kf = arena.mul([k, f]);
/// let denom = arena.add([one, kf]);
/// let spectrum = arena.recip(denom);
///
/// let chart = FrequencyPlot::new(spectrum, f)
///     .plot_type("mag-phase")
///     .chart(&mut arena, &Evaluator::new(), &[0.0, 1.0, 10.0])
///     .unwrap();
/// assert_eq!(chart.primary.kind, PlotKind::Magnitude);
/// assert!(chart.secondary.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct FrequencyPlot {
    expr: ExprHandle,
    var: ExprHandle,
    plot_type: Option<String>,
    log_frequency: bool,
    log_magnitude: bool,
    normalized: bool,
    title: Option<String>,
    quantity: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    y_label2: Option<String>,
    scaling: Scaling,
}

impl FrequencyPlot {
    /// A plot of `expr` against the frequency symbol `var`.
    #[must_use]
    pub fn new(expr: ExprHandle, var: ExprHandle) -> Self {
        Self {
            expr,
            var,
            plot_type: None,
            log_frequency: false,
            log_magnitude: false,
            normalized: false,
            title: None,
            quantity: None,
            x_label: None,
            y_label: None,
            y_label2: None,
            scaling: Scaling::default(),
        }
    }

    /// Selects the quantities drawn, e.g. `"dB-phase"` or `"real-imag"`.
    #[must_use]
    pub fn plot_type(mut self, plot_type: impl Into<String>) -> Self {
        self.plot_type = Some(plot_type.into());
        self
    }

    /// Uses a logarithmic frequency axis.
    #[must_use]
    pub fn log_frequency(mut self, on: bool) -> Self {
        self.log_frequency = on;
        self
    }

    /// Uses a logarithmic vertical axis for magnitudes and positive data.
    #[must_use]
    pub fn log_magnitude(mut self, on: bool) -> Self {
        self.log_magnitude = on;
        self
    }

    /// Labels the frequency axis as normalized.
    #[must_use]
    pub fn normalized(mut self, on: bool) -> Self {
        self.normalized = on;
        self
    }

    /// Sets the chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Names the plotted quantity in default axis labels, e.g. `"Voltage"`.
    #[must_use]
    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Overrides the horizontal axis label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Overrides the primary vertical axis label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Overrides the secondary vertical axis label.
    #[must_use]
    pub fn y_label2(mut self, label: impl Into<String>) -> Self {
        self.y_label2 = Some(label.into());
        self
    }

    /// Multiplies plotted frequencies by `factor`.
    #[must_use]
    pub fn x_scale(mut self, factor: f64) -> Self {
        self.scaling.x = factor;
        self
    }

    /// Multiplies plotted values by `factor`.
    #[must_use]
    pub fn y_scale(mut self, factor: f64) -> Self {
        self.scaling.y = factor;
        self
    }

    /// Evaluates the spectrum at `points` and lays out the chart.
    ///
    /// # Errors
    ///
    /// Plot-type errors from [`PlotLayout::for_data`], symbolic values as
    /// [`PlotError::TypeMismatch`], and evaluation failures.
    pub fn chart(
        &self,
        arena: &mut ExprArena,
        evaluator: &Evaluator,
        points: &[f64],
    ) -> Result<Chart, PlotError> {
        let var = plot_variable(arena, self.var)?;
        let is_complex = !arena.is_real(self.expr);
        let layout = PlotLayout::for_data(self.plot_type.as_deref(), is_complex)?;
        debug!(?layout, points = points.len(), "frequency plot");

        let sampled = Sampled::new(arena, evaluator, self.expr, var, points)?;
        let quantity = self.quantity.as_deref();

        let label = self
            .y_label
            .clone()
            .unwrap_or_else(|| axis_label(layout.primary, quantity));
        let mut primary = sampled.series(layout.primary, label, self.scaling)?;
        let positive = primary.values().all(|y| y > 0.0);
        if self.log_magnitude && (layout.primary.is_magnitude() || positive) {
            primary.y_scale = AxisScale::Log;
        }

        let secondary = layout
            .secondary
            .map(|kind| {
                let label = self
                    .y_label2
                    .clone()
                    .unwrap_or_else(|| axis_label(kind, quantity));
                let mut series = sampled.series(kind, label, self.scaling)?;
                series.style = LineStyle::Dashed;
                Ok::<_, PlotError>(series)
            })
            .transpose()?;

        let x_label = self.x_label.clone().unwrap_or_else(|| {
            if self.normalized {
                "Normalized frequency".to_string()
            } else {
                "Frequency (Hz)".to_string()
            }
        });

        Ok(Chart {
            title: self.title.clone(),
            x_label,
            x_scale: if self.log_frequency {
                AxisScale::Log
            } else {
                AxisScale::Linear
            },
            primary,
            secondary,
        })
    }

    /// Lays out the chart and hands it to `backend`.
    ///
    /// # Errors
    ///
    /// As [`chart`](Self::chart), plus backend failures.
    pub fn plot(
        &self,
        arena: &mut ExprArena,
        evaluator: &Evaluator,
        points: &[f64],
        backend: &mut dyn PlotBackend,
    ) -> Result<(), PlotError> {
        let chart = self.chart(arena, evaluator, points)?;
        backend.render(&chart)
    }
}

pub(crate) fn plot_variable(arena: &ExprArena, var: ExprHandle) -> Result<SymbolId, PlotError> {
    arena
        .as_symbol(var)
        .ok_or_else(|| PlotError::symbolic(format!("plot variable {}", arena.display(var))))
}
