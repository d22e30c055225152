//! # spectra-core
//!
//! Expression engine underneath the Spectra transform crates.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Canonical constructors for arithmetic and the generalized functions
//!   (impulse, step, sign) used by transform pairs
//! - Substitution, expansion and trigonometric rewriting passes
//! - Conservative reality and sign predicates driven by symbol domains
//! - Infix display
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: Every structurally unique expression stored exactly once
//! - **Canonical construction**: equal expressions built through the
//!   constructors share one handle, so equality is a handle comparison
//! - **Zero-Cost Handles**: 32-bit indices instead of pointers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod assume;
pub mod build;
pub mod display;
pub mod error;
pub mod expand;
pub mod expr;
pub mod handle;
pub mod number;
pub mod rewrite;
#[cfg(test)]
mod proptests;
pub mod traverse;

pub use arena::ExprArena;
pub use display::ExprDisplay;
pub use error::CoreError;
pub use expr::{
    functions, Constant, ExprNode, FunctionId, SignalId, SignalInfo, SymbolDomain, SymbolId,
    SymbolInfo,
};
pub use handle::ExprHandle;
pub use number::Number;
