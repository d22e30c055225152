//! Pole-zero diagrams.

use num_complex::Complex64;
use tracing::debug;

use spectra_core::{ExprArena, ExprHandle};

use crate::backend::PlotBackend;
use crate::error::PlotError;
use crate::eval::Evaluator;

/// A pole or zero and how many times it repeats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    /// Position in the complex plane.
    pub location: Complex64,
    /// Repetition count; annotated on the diagram when above one.
    pub multiplicity: usize,
}

impl Root {
    /// The annotation drawn beside the marker, if any.
    #[must_use]
    pub fn annotation(&self) -> Option<String> {
        (self.multiplicity > 1).then(|| self.multiplicity.to_string())
    }
}

/// Visible region of the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

/// Numeric pole-zero diagram data.
#[derive(Clone, Debug, PartialEq)]
pub struct PoleZeroChart {
    /// Chart title.
    pub title: Option<String>,
    /// Poles, drawn as crosses.
    pub poles: Vec<Root>,
    /// Zeros, drawn as circles.
    pub zeros: Vec<Root>,
    /// Visible region.
    pub bounds: Bounds,
    /// Draw the unit circle.
    pub unit_circle: bool,
    /// Horizontal axis label, e.g. `"Re(s)"`.
    pub x_label: String,
    /// Vertical axis label, e.g. `"Im(s)"`.
    pub y_label: String,
}

/// Collects poles and zeros and computes the diagram layout.
#[derive(Clone, Debug)]
pub struct PoleZeroPlot {
    var_name: String,
    poles: Vec<(ExprHandle, usize)>,
    zeros: Vec<(ExprHandle, usize)>,
    unit_circle: bool,
    title: Option<String>,
}

impl PoleZeroPlot {
    /// A diagram in the plane of the variable named `var_name`.
    #[must_use]
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            poles: Vec::new(),
            zeros: Vec::new(),
            unit_circle: false,
            title: None,
        }
    }

    /// Adds a pole at `location` repeated `multiplicity` times.
    #[must_use]
    pub fn pole(mut self, location: ExprHandle, multiplicity: usize) -> Self {
        self.poles.push((location, multiplicity));
        self
    }

    /// Adds a zero at `location` repeated `multiplicity` times.
    #[must_use]
    pub fn zero(mut self, location: ExprHandle, multiplicity: usize) -> Self {
        self.zeros.push((location, multiplicity));
        self
    }

    /// Draws the unit circle and keeps it in view.
    #[must_use]
    pub fn unit_circle(mut self, on: bool) -> Self {
        self.unit_circle = on;
        self
    }

    /// Sets the chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Evaluates every location and computes the bounds.
    ///
    /// # Errors
    ///
    /// [`PlotError::TypeMismatch`] if any location is symbolic.
    pub fn chart(&self, arena: &ExprArena, evaluator: &Evaluator) -> Result<PoleZeroChart, PlotError> {
        let evaluate = |roots: &[(ExprHandle, usize)]| {
            roots
                .iter()
                .map(|&(expr, multiplicity)| {
                    let location = evaluator.eval(arena, expr).map_err(|_| {
                        PlotError::symbolic(format!("pole or zero {}", arena.display(expr)))
                    })?;
                    Ok::<_, PlotError>(Root {
                        location,
                        multiplicity,
                    })
                })
                .collect::<Result<Vec<_>, PlotError>>()
        };
        let poles = evaluate(&self.poles)?;
        let zeros = evaluate(&self.zeros)?;

        let locations: Vec<Complex64> = poles
            .iter()
            .chain(&zeros)
            .map(|root| root.location)
            .collect();
        let (x_min, x_max) = padded_range(locations.iter().map(|z| z.re), self.unit_circle);
        let (y_min, y_max) = padded_range(locations.iter().map(|z| z.im), self.unit_circle);
        debug!(poles = poles.len(), zeros = zeros.len(), "pole-zero plot");

        Ok(PoleZeroChart {
            title: self.title.clone(),
            poles,
            zeros,
            bounds: Bounds {
                x_min,
                x_max,
                y_min,
                y_max,
            },
            unit_circle: self.unit_circle,
            x_label: format!("Re({})", self.var_name),
            y_label: format!("Im({})", self.var_name),
        })
    }

    /// Computes the diagram and hands it to `backend`.
    ///
    /// # Errors
    ///
    /// As [`chart`](Self::chart), plus backend failures.
    pub fn plot(
        &self,
        arena: &ExprArena,
        evaluator: &Evaluator,
        backend: &mut dyn PlotBackend,
    ) -> Result<(), PlotError> {
        let chart = self.chart(arena, evaluator)?;
        backend.render_pole_zero(&chart)
    }
}

/// The range of `values` widened by a tenth of its span, or by one unit
/// when the span is empty.
fn padded_range(values: impl Iterator<Item = f64>, unit_circle: bool) -> (f64, f64) {
    let mut count = 0usize;
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
        count += 1;
    }
    if count == 0 {
        lo = 0.0;
        hi = 0.0;
    }
    if unit_circle {
        lo = lo.min(-1.0);
        hi = hi.max(1.0);
    }
    let mut extra = if count >= 2 { 0.1 * (hi - lo) } else { 0.0 };
    if extra <= 0.0 {
        extra = 1.0;
    }
    (lo - 0.5 * extra, hi + 0.5 * extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_pad_the_span() {
        let mut arena = ExprArena::new();
        let minus_two = arena.integer(-2);
        let one = arena.one();
        let i = arena.imaginary_unit();
        let j = arena.add([one, i]);

        let chart = PoleZeroPlot::new("s")
            .pole(minus_two, 2)
            .zero(j, 1)
            .chart(&arena, &Evaluator::new())
            .unwrap();

        assert_relative_eq!(chart.bounds.x_min, -2.15, epsilon = 1e-12);
        assert_relative_eq!(chart.bounds.x_max, 1.15, epsilon = 1e-12);
        assert_relative_eq!(chart.bounds.y_min, -0.05, epsilon = 1e-12);
        assert_relative_eq!(chart.bounds.y_max, 1.05, epsilon = 1e-12);
        assert_eq!(chart.poles[0].annotation().as_deref(), Some("2"));
        assert_eq!(chart.zeros[0].annotation(), None);
        assert_eq!(chart.x_label, "Re(s)");
        assert_eq!(chart.y_label, "Im(s)");
    }

    #[test]
    fn test_single_root_gets_unit_padding() {
        let mut arena = ExprArena::new();
        let half = arena.rational(1, 2);
        let chart = PoleZeroPlot::new("z")
            .pole(half, 1)
            .chart(&arena, &Evaluator::new())
            .unwrap();
        assert_relative_eq!(chart.bounds.x_min, 0.0, epsilon = 1e-12);
        assert_relative_eq!(chart.bounds.x_max, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_circle_stays_in_view() {
        let mut arena = ExprArena::new();
        let half = arena.rational(1, 2);
        let zero = arena.zero();
        let chart = PoleZeroPlot::new("z")
            .pole(half, 1)
            .zero(zero, 1)
            .unit_circle(true)
            .chart(&arena, &Evaluator::new())
            .unwrap();
        assert_relative_eq!(chart.bounds.x_min, -1.1, epsilon = 1e-12);
        assert_relative_eq!(chart.bounds.x_max, 1.1, epsilon = 1e-12);
        assert!(chart.unit_circle);
    }

    #[test]
    fn test_symbolic_root_is_rejected() {
        let mut arena = ExprArena::new();
        let a = arena.symbol("a");
        let err = PoleZeroPlot::new("s")
            .pole(a, 1)
            .chart(&arena, &Evaluator::new())
            .unwrap_err();
        assert!(matches!(err, PlotError::TypeMismatch { .. }));
    }
}
