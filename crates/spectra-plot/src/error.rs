//! Error types for plot preparation.

use thiserror::Error;

/// Errors raised while turning expressions into chart data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlotError {
    /// Numeric data was required but the expression is symbolic.
    #[error("cannot plot symbolic {what}")]
    TypeMismatch {
        /// What was symbolic.
        what: String,
    },

    /// An expression has no numeric value.
    #[error("cannot evaluate {0}")]
    Evaluation(String),

    /// A plot-type string was not recognized.
    #[error("unknown plot type: {0}")]
    UnknownPlotType(String),

    /// A phase or imaginary-part plot of real data was requested.
    #[error("data not complex for {0} plot type")]
    NotComplex(String),

    /// Sample abscissae and ordinates differ in length.
    #[error("{x} sample points but {y} values")]
    LengthMismatch {
        /// Number of abscissae.
        x: usize,
        /// Number of ordinates.
        y: usize,
    },

    /// The rendering backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}

impl PlotError {
    pub(crate) fn symbolic(what: impl Into<String>) -> Self {
        PlotError::TypeMismatch { what: what.into() }
    }
}
