//! # spectra-plot
//!
//! Turns time and frequency domain expressions into plot-ready data.
//!
//! Expressions are sampled numerically at caller-supplied points with
//! [`Evaluator`]. Impulses have no pointwise value and are separated out
//! as markers. The resulting [`Chart`] is handed to any [`PlotBackend`].
//!
//! - [`FrequencyPlot`]: magnitude, dB, phase, real and imaginary parts,
//!   with an optional secondary axis and logarithmic axes
//! - [`TimePlot`]: real part, imaginary part or magnitude
//! - [`PoleZeroPlot`]: pole and zero markers with multiplicities

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod chart;
pub mod error;
pub mod eval;
pub mod frequency;
pub mod impulses;
pub mod kind;
pub mod pole_zero;
pub mod time;

pub use backend::{PlotBackend, RecordingBackend};
pub use chart::{AxisScale, Chart, ImpulseMarker, LineStyle, Series};
pub use error::PlotError;
pub use eval::Evaluator;
pub use frequency::FrequencyPlot;
pub use impulses::{separate_impulses, Impulse};
pub use kind::{PlotKind, PlotLayout};
pub use pole_zero::{Bounds, PoleZeroChart, PoleZeroPlot, Root};
pub use time::TimePlot;
