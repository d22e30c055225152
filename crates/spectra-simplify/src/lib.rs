//! # spectra-simplify
//!
//! Equality saturation-based simplification for Spectra expressions.
//!
//! This crate uses the `egg` library to provide:
//! - Conversion between arena expressions and e-graph terms
//! - Algebraic, exponential and trigonometric rewrite rules
//! - A cost function that prefers sinusoids over exponential pairs
//!
//! ## Equality Saturation vs. Greedy Rewriting
//!
//! Unlike greedy term rewriting, equality saturation explores all
//! possible rewrite paths simultaneously, avoiding local minima
//! and the phase ordering problem. The arena's canonical constructors
//! handle numeric folding when the extracted term is converted back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod convert;
pub mod cost;
pub mod engine;
pub mod language;
pub mod rules;

pub use convert::{from_rec_expr, to_rec_expr, ConvertError};
pub use engine::{SimplificationStats, Simplifier, SimplifierConfig};
pub use language::SpectraLang;
