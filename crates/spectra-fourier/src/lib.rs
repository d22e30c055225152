//! # spectra-fourier
//!
//! Symbolic bilateral Fourier transforms over generalized functions.
//!
//! The transform convention is
//!
//! ```text
//! S(f) = ∫ s(t)·exp(-2πi·f·t) dt        s(t) = ∫ S(f)·exp(2πi·f·t) df
//! ```
//!
//! with both integrals over the whole real line.
//!
//! ## Pipeline
//!
//! 1. Symbols spelled like the transform variable are unified with it.
//! 2. Trigonometric functions become complex exponentials and the input is
//!    expanded into a sum.
//! 3. Each term is matched against closed-form rules (constants, ramps,
//!    real poles, complex exponentials) or, for abstract signals, the
//!    scaling, shift and convolution theorems.
//! 4. Whatever is left goes to a [`TransformSolver`].
//!
//! Transforms are linear, so a failing term aborts the whole transform
//! rather than dropping out of the sum.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod classify;
pub mod engine;
pub mod error;
pub mod normalize;
#[cfg(test)]
mod proptests;
mod rules;
mod signal;
pub mod solver;
mod term;

pub use cache::{CacheKey, CacheStats, TransformCache};
pub use classify::{factor_const, scale_shift, split_complex, Affine, TermParts};
pub use engine::{
    fourier_transform, inverse_fourier_transform, Direction, FourierConfig, FourierEngine,
};
pub use error::FourierError;
pub use normalize::{normalize, unify_symbol};
pub use solver::{NullSolver, SolverOutcome, TableSolver, TransformSolver};
