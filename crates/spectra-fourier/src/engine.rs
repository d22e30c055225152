//! The transform orchestrator.
//!
//! An input is normalized into a sum of terms, each term is transformed on
//! its own and the results are summed. Outcomes are memoized per engine.

use tracing::debug;

use spectra_core::{ExprArena, ExprHandle, SymbolId};
use spectra_simplify::{Simplifier, SimplifierConfig};

use crate::cache::{CacheKey, TransformCache};
use crate::error::FourierError;
use crate::normalize::normalize;
use crate::solver::{TableSolver, TransformSolver};
use crate::term::{transform_term, TermContext};

/// Which way a transform goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Time to frequency: `S(f) = ∫ s(t)·exp(-2πi·f·t) dt`.
    Forward,
    /// Frequency to time: `s(t) = ∫ S(f)·exp(2πi·f·t) df`.
    Inverse,
}

/// Configuration for [`FourierEngine`].
#[derive(Clone, Debug)]
pub struct FourierConfig {
    /// Base name for convolution dummies of forward transforms.
    pub forward_dummy: String,
    /// Base name for convolution dummies of inverse transforms.
    pub inverse_dummy: String,
    /// Run the simplifier over inverse transform results.
    pub simplify_inverse: bool,
    /// Memoize outcomes.
    pub use_cache: bool,
    /// Limits for the simplifier.
    pub simplifier: SimplifierConfig,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            forward_dummy: "nu".to_string(),
            inverse_dummy: "tau".to_string(),
            simplify_inverse: true,
            use_cache: true,
            simplifier: SimplifierConfig::default(),
        }
    }
}

/// Computes forward and inverse Fourier transforms.
///
/// # Example
///
/// ```
/// use spectra_core::ExprArena;
/// use spectra_fourier::FourierEngine;
///
/// let mut arena = ExprArena::new();
/// let t = arena.real_symbol("t");
/// let f = arena.real_symbol("f");
/// let a = arena.positive_symbol("a");
///
/// let mut engine = FourierEngine::new();
/// let spectrum = engine.forward_transform(&mut arena, a, t, f).unwrap();
/// assert_eq!(arena.display(spectrum).to_string(), "a*DiracDelta(f)");
/// ```
pub struct FourierEngine<S = TableSolver> {
    solver: S,
    simplifier: Simplifier,
    cache: TransformCache,
    config: FourierConfig,
}

impl Default for FourierEngine<TableSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl FourierEngine<TableSolver> {
    /// Creates an engine with the table solver and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FourierConfig::default())
    }

    /// Creates an engine with the table solver.
    #[must_use]
    pub fn with_config(config: FourierConfig) -> Self {
        Self::with_solver(TableSolver, config)
    }
}

impl<S: TransformSolver> FourierEngine<S> {
    /// Creates an engine around a custom solver.
    pub fn with_solver(solver: S, config: FourierConfig) -> Self {
        Self {
            solver,
            simplifier: Simplifier::with_config(config.simplifier.clone()),
            cache: TransformCache::new(),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FourierConfig {
        &self.config
    }

    /// The solver used for terms no rule covers.
    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// The outcome cache.
    #[must_use]
    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }

    /// Forgets every memoized outcome.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// The forward transform of `expr` from `time` to `freq`.
    ///
    /// # Errors
    ///
    /// Fails with [`FourierError::NotASymbol`] if either variable is not a
    /// symbol, and with [`FourierError::Unsupported`] naming `expr` if any
    /// term cannot be transformed.
    pub fn forward_transform(
        &mut self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        time: ExprHandle,
        freq: ExprHandle,
    ) -> Result<ExprHandle, FourierError> {
        self.transform(arena, expr, time, freq, Direction::Forward)
    }

    /// The inverse transform of `expr` from `freq` to `time`.
    ///
    /// The result is passed through the simplifier unless
    /// [`FourierConfig::simplify_inverse`] is off.
    ///
    /// # Errors
    ///
    /// As [`forward_transform`](Self::forward_transform); simplifier
    /// conversion failures are reported as
    /// [`FourierError::Simplification`].
    pub fn inverse_transform(
        &mut self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        freq: ExprHandle,
        time: ExprHandle,
    ) -> Result<ExprHandle, FourierError> {
        let result = self.transform(arena, expr, freq, time, Direction::Inverse)?;
        if !self.config.simplify_inverse {
            return Ok(result);
        }
        Ok(self.simplifier.simplify_expr(arena, result)?)
    }

    /// Transforms `expr`, integrating over `source` and producing an
    /// expression in `target`.
    ///
    /// # Errors
    ///
    /// See [`forward_transform`](Self::forward_transform).
    pub fn transform(
        &mut self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        source: ExprHandle,
        target: ExprHandle,
        direction: Direction,
    ) -> Result<ExprHandle, FourierError> {
        let (Some(source), Some(target)) = (arena.as_symbol(source), arena.as_symbol(target))
        else {
            return Err(FourierError::NotASymbol);
        };
        let key = CacheKey {
            arena: arena.id(),
            expr,
            source,
            target,
            direction,
        };
        if self.config.use_cache {
            if let Some(outcome) = self.cache.get(&key) {
                debug!(?direction, expr = %arena.display(expr), "transform cache hit");
                return outcome;
            }
        }

        let outcome = self.compute(arena, expr, source, target, direction);
        if self.config.use_cache {
            self.cache.insert(key, outcome.clone());
        }
        outcome
    }

    fn compute(
        &self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        source: SymbolId,
        target: SymbolId,
        direction: Direction,
    ) -> Result<ExprHandle, FourierError> {
        debug!(?direction, expr = %arena.display(expr), "computing transform");
        let original = arena.display(expr).to_string();

        let normal = normalize(arena, expr, source);
        let terms = arena.terms(normal);
        let prefix = match direction {
            Direction::Forward => self.config.forward_dummy.as_str(),
            Direction::Inverse => self.config.inverse_dummy.as_str(),
        };

        let mut results = Vec::with_capacity(terms.len());
        for term in terms {
            // Dummy names restart for every term.
            let mut ctx = TermContext::new(arena, &self.solver, source, target, direction, prefix);
            ctx.reserve_names(term);
            let result = transform_term(&mut ctx, term).map_err(|err| {
                debug!(%err, term = %ctx.display(term), "term failed");
                let reason = match err {
                    FourierError::Unsupported { reason, .. } => reason,
                    other => other.to_string(),
                };
                FourierError::Unsupported {
                    expr: original.clone(),
                    reason,
                }
            })?;
            results.push(result);
        }
        let result = arena.add(results);
        debug!(result = %arena.display(result), "transform complete");
        Ok(result)
    }
}

/// The forward transform of `expr` using a fresh default engine.
///
/// # Errors
///
/// See [`FourierEngine::forward_transform`].
pub fn fourier_transform(
    arena: &mut ExprArena,
    expr: ExprHandle,
    time: ExprHandle,
    freq: ExprHandle,
) -> Result<ExprHandle, FourierError> {
    FourierEngine::new().forward_transform(arena, expr, time, freq)
}

/// The inverse transform of `expr` using a fresh default engine.
///
/// # Errors
///
/// See [`FourierEngine::inverse_transform`].
pub fn inverse_fourier_transform(
    arena: &mut ExprArena,
    expr: ExprHandle,
    freq: ExprHandle,
    time: ExprHandle,
) -> Result<ExprHandle, FourierError> {
    FourierEngine::new().inverse_transform(arena, expr, freq, time)
}
