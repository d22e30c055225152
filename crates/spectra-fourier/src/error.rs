//! Error types for transform computation.

use thiserror::Error;

use spectra_simplify::ConvertError;

/// Errors raised while computing a transform.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FourierError {
    /// An expression does not have the shape a rule expects, e.g. a signal
    /// argument that is not affine in the domain variable.
    #[error("malformed argument: {reason}")]
    MalformedArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// No rule matched and the solver could not produce a closed form.
    #[error("could not compute Fourier transform for {expr}: {reason}")]
    Unsupported {
        /// The caller's original expression, rendered.
        expr: String,
        /// The failure that aborted the computation.
        reason: String,
    },

    /// A transform variable is not a bare symbol.
    #[error("transform variable must be a symbol")]
    NotASymbol,

    /// Post-processing an inverse transform failed.
    #[error("simplification failed: {0}")]
    Simplification(#[from] ConvertError),
}

impl FourierError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FourierError::MalformedArgument {
            reason: reason.into(),
        }
    }

    /// Returns true for [`FourierError::Unsupported`].
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FourierError::Unsupported { .. })
    }
}
