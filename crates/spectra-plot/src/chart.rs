//! Backend-neutral chart data.

use num_complex::Complex64;

use spectra_core::{ExprArena, ExprHandle, SymbolId};

use crate::error::PlotError;
use crate::eval::Evaluator;
use crate::impulses::{separate_impulses, Impulse};
use crate::kind::PlotKind;

/// How an axis maps values to positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisScale {
    /// Linear.
    #[default]
    Linear,
    /// Base-10 logarithmic.
    Log,
}

/// Stroke of a series line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashed line, used for the secondary axis.
    Dashed,
}

/// An arrow marking an impulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpulseMarker {
    /// Position on the horizontal axis.
    pub location: f64,
    /// Arrow height in the series' quantity.
    pub height: f64,
}

/// One plotted quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// The quantity drawn.
    pub kind: PlotKind,
    /// Vertical axis label.
    pub label: String,
    /// Sample points as `[x, y]`.
    pub points: Vec<[f64; 2]>,
    /// Impulses within the sampled domain.
    pub impulses: Vec<ImpulseMarker>,
    /// Line stroke.
    pub style: LineStyle,
    /// Vertical axis scale.
    pub y_scale: AxisScale,
}

impl Series {
    /// Pairs up abscissae and ordinates.
    ///
    /// # Errors
    ///
    /// [`PlotError::LengthMismatch`] if the slices differ in length.
    pub fn new(
        kind: PlotKind,
        label: impl Into<String>,
        x: &[f64],
        y: &[f64],
    ) -> Result<Self, PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Ok(Self {
            kind,
            label: label.into(),
            points: x.iter().zip(y).map(|(&x, &y)| [x, y]).collect(),
            impulses: Vec::new(),
            style: LineStyle::Solid,
            y_scale: AxisScale::Linear,
        })
    }

    /// Number of sample points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no sample points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The ordinates.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p[1])
    }
}

/// A line chart with an optional secondary vertical axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    /// Chart title.
    pub title: Option<String>,
    /// Horizontal axis label.
    pub x_label: String,
    /// Horizontal axis scale.
    pub x_scale: AxisScale,
    /// Series on the left axis.
    pub primary: Series,
    /// Series on the right axis.
    pub secondary: Option<Series>,
}

impl Chart {
    /// All series in drawing order.
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }
}

/// Linear factors applied to plotted coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Scaling {
    pub x: f64,
    pub y: f64,
}

impl Default for Scaling {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// An expression evaluated over a set of points, with its impulses held
/// apart.
pub(crate) struct Sampled {
    x: Vec<f64>,
    values: Vec<Complex64>,
    impulses: Vec<Impulse>,
}

impl Sampled {
    pub(crate) fn new(
        arena: &mut ExprArena,
        evaluator: &Evaluator,
        expr: ExprHandle,
        var: SymbolId,
        points: &[f64],
    ) -> Result<Self, PlotError> {
        let (smooth, impulses) = separate_impulses(arena, expr, var, evaluator)?;
        let values = evaluator.sample(arena, smooth, var, points)?;

        let domain = points
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, &x| match acc {
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
                None => Some((x, x)),
            });
        let impulses = impulses
            .into_iter()
            .filter(|imp| domain.is_some_and(|(lo, hi)| (lo..=hi).contains(&imp.location)))
            .collect();

        Ok(Self {
            x: points.to_vec(),
            values,
            impulses,
        })
    }

    pub(crate) fn series(
        &self,
        kind: PlotKind,
        label: String,
        scaling: Scaling,
    ) -> Result<Series, PlotError> {
        let x: Vec<f64> = self.x.iter().map(|&x| x * scaling.x).collect();
        let y: Vec<f64> = self
            .values
            .iter()
            .map(|&z| kind.apply(z) * scaling.y)
            .collect();
        let mut series = Series::new(kind, label, &x, &y)?;
        series.impulses = self
            .impulses
            .iter()
            .map(|imp| ImpulseMarker {
                location: imp.location * scaling.x,
                height: kind.apply(imp.weight) * scaling.y,
            })
            .collect();
        Ok(series)
    }
}

/// Vertical axis label for `kind`, e.g. `"Voltage magnitude (dB)"`.
pub(crate) fn axis_label(kind: PlotKind, quantity: Option<&str>) -> String {
    let base = match quantity {
        Some(quantity) => format!("{quantity} {}", kind.part()),
        None => capitalize(kind.part()),
    };
    match kind.units() {
        Some(units) => format!("{base} ({units})"),
        None => base,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
