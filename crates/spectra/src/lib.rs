//! # Spectra
//!
//! Symbolic bilateral Fourier transforms.
//!
//! Spectra maps expressions in a time variable to expressions in a
//! frequency variable and back, using the convention
//! `S(f) = ∫ s(t)·exp(-2πi·f·t) dt`, and prepares numeric chart data for
//! the results.
//!
//! ## Features
//!
//! - **Hash-consed core**: canonical expressions with impulses, steps and
//!   abstract signals
//! - **Rule-driven transforms**: constants, ramps, complex exponentials
//!   and first-order poles, with a table solver for the rest
//! - **Signal theorems**: scaling, shifting and convolution of declared
//!   signal pairs
//! - **Simplification**: equality saturation via e-graphs for inverse
//!   results
//! - **Plot data**: dB/phase spectra, time responses and pole-zero diagrams
//!
//! ## Quick Start
//!
//! ```rust
//! use spectra::prelude::*;
//!
//! let mut arena = ExprArena::new();
//! let t = arena.real_symbol("t");
//! let f = arena.real_symbol("f");
//! let d = arena.delta(t);
//!
//! let spectrum = fourier_transform(&mut arena, d, t, f).unwrap();
//! assert!(arena.is_one(spectrum));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use spectra_core as core;
pub use spectra_fourier as fourier;
pub use spectra_plot as plot;
pub use spectra_simplify as simplify;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use spectra_core::{ExprArena, ExprHandle, ExprNode, SymbolDomain};
    pub use spectra_fourier::{
        fourier_transform, inverse_fourier_transform, Direction, FourierConfig, FourierEngine,
        FourierError,
    };
    pub use spectra_plot::{Evaluator, FrequencyPlot, PlotBackend, PoleZeroPlot, TimePlot};
    pub use spectra_simplify::Simplifier;
}
