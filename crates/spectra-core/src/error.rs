//! Errors raised by the expression arena.

use thiserror::Error;

/// Errors from arena bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A signal name was already declared with a different dual.
    #[error("signal `{name}` is already paired with `{existing}`")]
    ConflictingSignal {
        /// The name being declared.
        name: String,
        /// The dual it is already paired with.
        existing: String,
    },

    /// A signal cannot be its own dual.
    #[error("signal `{0}` cannot be paired with itself")]
    SelfDualSignal(String),
}
