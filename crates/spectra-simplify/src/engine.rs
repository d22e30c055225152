//! The main simplification engine.
//!
//! This module provides the high-level API for simplifying expressions
//! using equality saturation.

use std::time::Duration;

use egg::{Extractor, RecExpr, Rewrite, Runner};
use tracing::{debug, trace};

use spectra_core::{ExprArena, ExprHandle};

use crate::convert::{from_rec_expr, to_rec_expr, ConvertError};
use crate::cost::TransformCost;
use crate::language::SpectraLang;
use crate::rules;

/// Configuration for the simplification engine.
#[derive(Clone, Debug)]
pub struct SimplifierConfig {
    /// Maximum number of iterations.
    pub iter_limit: usize,
    /// Maximum number of nodes in the e-graph.
    pub node_limit: usize,
    /// Time limit in seconds.
    pub time_limit_secs: u64,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            iter_limit: 10,
            node_limit: 10_000,
            time_limit_secs: 5,
        }
    }
}

/// The main simplification engine.
#[derive(Clone)]
pub struct Simplifier {
    /// Configuration.
    config: SimplifierConfig,
    /// Rewrite rules.
    rules: Vec<Rewrite<SpectraLang, ()>>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplifier {
    /// Creates a new simplifier with default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimplifierConfig::default())
    }

    /// Creates a simplifier with custom configuration.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            config,
            rules: rules::all_rules(),
        }
    }

    /// Sets custom rules (replaces default rules).
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rewrite<SpectraLang, ()>>) -> Self {
        self.rules = rules;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Simplifies an expression given as an s-expression string.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be parsed.
    pub fn simplify_str(&self, expr: &str) -> Result<String, String> {
        let parsed: RecExpr<SpectraLang> =
            expr.parse().map_err(|e| format!("parse error: {e}"))?;

        let simplified = self.simplify(&parsed);
        Ok(simplified.to_string())
    }

    /// Simplifies a parsed expression.
    #[must_use]
    pub fn simplify(&self, expr: &RecExpr<SpectraLang>) -> RecExpr<SpectraLang> {
        self.simplify_with_stats(expr).0
    }

    /// Simplifies and returns both the result and statistics.
    #[must_use]
    pub fn simplify_with_stats(
        &self,
        expr: &RecExpr<SpectraLang>,
    ) -> (RecExpr<SpectraLang>, SimplificationStats) {
        let runner = Runner::default()
            .with_expr(expr)
            .with_iter_limit(self.config.iter_limit)
            .with_node_limit(self.config.node_limit)
            .with_time_limit(Duration::from_secs(self.config.time_limit_secs))
            .run(&self.rules);

        let stats = SimplificationStats {
            iterations: runner.iterations.len(),
            egraph_nodes: runner.egraph.total_number_of_nodes(),
            egraph_classes: runner.egraph.number_of_classes(),
            stop_reason: format!("{:?}", runner.stop_reason),
        };
        trace!(?stats, "equality saturation finished");

        let extractor = Extractor::new(&runner.egraph, TransformCost);
        let (_, best) = extractor.find_best(runner.roots[0]);

        (best, stats)
    }

    /// Simplifies an arena expression in place.
    ///
    /// The extracted term is rebuilt through the canonical constructors
    /// and accepted only if its tree is strictly smaller than the input's;
    /// otherwise `expr` is returned unchanged.
    ///
    /// # Errors
    ///
    /// Propagates conversion failures in either direction.
    pub fn simplify_expr(
        &self,
        arena: &mut ExprArena,
        expr: ExprHandle,
    ) -> Result<ExprHandle, ConvertError> {
        let term = to_rec_expr(arena, expr)?;
        let best = self.simplify(&term);
        let rebuilt = from_rec_expr(arena, &best)?;

        let (before, after) = (arena.tree_size(expr), arena.tree_size(rebuilt));
        if after < before {
            debug!(before, after, "simplified expression");
            Ok(rebuilt)
        } else {
            Ok(expr)
        }
    }
}

/// Statistics about the simplification process.
#[derive(Clone, Debug)]
pub struct SimplificationStats {
    /// Number of iterations run.
    pub iterations: usize,
    /// Total nodes in the e-graph.
    pub egraph_nodes: usize,
    /// Number of equivalence classes.
    pub egraph_classes: usize,
    /// Reason the runner stopped.
    pub stop_reason: String,
}
