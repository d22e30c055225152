//! Time-domain plots.

use tracing::debug;

use spectra_core::{ExprArena, ExprHandle};

use crate::backend::PlotBackend;
use crate::chart::{axis_label, AxisScale, Chart, Sampled, Scaling};
use crate::error::PlotError;
use crate::eval::Evaluator;
use crate::frequency::plot_variable;
use crate::kind::PlotKind;

/// Builds a chart of a signal sampled at caller-supplied times.
///
/// Only one quantity is drawn: the real part unless `"imag"` or `"abs"`
/// is selected.
#[derive(Clone, Debug)]
pub struct TimePlot {
    expr: ExprHandle,
    var: ExprHandle,
    plot_type: Option<String>,
    title: Option<String>,
    quantity: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    scaling: Scaling,
}

impl TimePlot {
    /// A plot of `expr` against the time symbol `var`.
    #[must_use]
    pub fn new(expr: ExprHandle, var: ExprHandle) -> Self {
        Self {
            expr,
            var,
            plot_type: None,
            title: None,
            quantity: None,
            x_label: None,
            y_label: None,
            scaling: Scaling::default(),
        }
    }

    /// One of `"real"`, `"imag"`, `"abs"` or `"magnitude"`.
    #[must_use]
    pub fn plot_type(mut self, plot_type: impl Into<String>) -> Self {
        self.plot_type = Some(plot_type.into());
        self
    }

    /// Sets the chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Names the plotted quantity in the default vertical label.
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

    /// Overrides the vertical axis label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Multiplies plotted times by `factor`.
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

    /// Evaluates the signal at `points` and lays out the chart.
    ///
    /// # Errors
    ///
    /// [`PlotError::UnknownPlotType`] for an unsupported plot type, plus
    /// the failures of [`FrequencyPlot::chart`](crate::FrequencyPlot::chart).
    pub fn chart(
        &self,
        arena: &mut ExprArena,
        evaluator: &Evaluator,
        points: &[f64],
    ) -> Result<Chart, PlotError> {
        let var = plot_variable(arena, self.var)?;
        let kind = match self.plot_type.as_deref() {
            None | Some("real") => PlotKind::Real,
            Some("imag") => PlotKind::Imag,
            Some("abs" | "magnitude") => PlotKind::Magnitude,
            Some(other) => return Err(PlotError::UnknownPlotType(other.to_string())),
        };
        debug!(?kind, points = points.len(), "time plot");

        let sampled = Sampled::new(arena, evaluator, self.expr, var, points)?;
        let label = self
            .y_label
            .clone()
            .unwrap_or_else(|| axis_label(kind, self.quantity.as_deref()));
        Ok(Chart {
            title: self.title.clone(),
            x_label: self.x_label.clone().unwrap_or_else(|| "Time (s)".to_string()),
            x_scale: AxisScale::Linear,
            primary: sampled.series(kind, label, self.scaling)?,
            secondary: None,
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_causal_exponential_with_impulse() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let minus_t = arena.neg(t);
        let e = arena.exp(minus_t);
        let u = arena.step(t);
        let decay = arena.mul([e, u]);
        let three = arena.integer(3);
        let d = arena.delta(t);
        let kick = arena.mul([three, d]);
        let expr = arena.add([decay, kick]);

        let chart = TimePlot::new(expr, t)
            .chart(&mut arena, &Evaluator::new(), &[-1.0, 0.0, 1.0])
            .unwrap();

        let y: Vec<f64> = chart.primary.values().collect();
        assert_relative_eq!(y[0], 0.0);
        assert_relative_eq!(y[1], 0.5);
        assert_relative_eq!(y[2], (-1.0f64).exp());
        assert_eq!(chart.primary.impulses.len(), 1);
        assert_relative_eq!(chart.primary.impulses[0].height, 3.0);
        assert_eq!(chart.x_label, "Time (s)");
        assert_eq!(chart.primary.label, "Real part");
    }

    #[test]
    fn test_magnitude_of_complex_signal() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let k = arena.two_pi_i();
        let arg = arena.mul([k, t]);
        let carrier = arena.exp(arg);
        let chart = TimePlot::new(carrier, t)
            .plot_type("abs")
            .quantity("Voltage")
            .chart(&mut arena, &Evaluator::new(), &[0.1, 0.3])
            .unwrap();
        for y in chart.primary.values() {
            assert_relative_eq!(y, 1.0, epsilon = 1e-12);
        }
        assert_eq!(chart.primary.label, "Voltage magnitude");
    }

    #[test]
    fn test_phase_is_not_a_time_plot() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        assert!(matches!(
            TimePlot::new(t, t)
                .plot_type("phase")
                .chart(&mut arena, &Evaluator::new(), &[0.0]),
            Err(PlotError::UnknownPlotType(_))
        ));
    }
}
