//! Per-term dispatch shared by the rules and the signal handler.

use hashbrown::HashSet;
use tracing::trace;

use spectra_core::{ExprArena, ExprHandle, ExprNode, SymbolDomain, SymbolId};

use crate::classify::TermParts;
use crate::engine::Direction;
use crate::error::FourierError;
use crate::rules::RULES;
use crate::signal;
use crate::solver::{SolverOutcome, TransformSolver};

/// Everything a rule needs to transform one term.
pub(crate) struct TermContext<'a> {
    pub arena: &'a mut ExprArena,
    pub solver: &'a dyn TransformSolver,
    /// Variable integrated over.
    pub var: SymbolId,
    /// Variable of the result.
    pub target: SymbolId,
    pub direction: Direction,
    dummy_prefix: &'a str,
    /// Names that a fresh dummy must avoid.
    reserved: HashSet<String>,
}

impl<'a> TermContext<'a> {
    pub fn new(
        arena: &'a mut ExprArena,
        solver: &'a dyn TransformSolver,
        var: SymbolId,
        target: SymbolId,
        direction: Direction,
        dummy_prefix: &'a str,
    ) -> Self {
        let reserved = [var, target]
            .iter()
            .filter_map(|&id| arena.symbol_name(id).map(str::to_owned))
            .collect();
        TermContext {
            arena,
            solver,
            var,
            target,
            direction,
            dummy_prefix,
            reserved,
        }
    }

    /// Marks every name used in `expr` as taken.
    pub fn reserve_names(&mut self, expr: ExprHandle) {
        let names = self.arena.symbol_names(expr);
        self.reserved.extend(names);
    }

    pub fn var_expr(&mut self) -> ExprHandle {
        self.arena.intern(ExprNode::Symbol(self.var))
    }

    pub fn target_expr(&mut self) -> ExprHandle {
        self.arena.intern(ExprNode::Symbol(self.target))
    }

    /// The target as it appears in the kernel: negated for inverse
    /// transforms.
    pub fn signed_target(&mut self) -> ExprHandle {
        let target = self.target_expr();
        match self.direction {
            Direction::Forward => target,
            Direction::Inverse => self.arena.neg(target),
        }
    }

    /// A real symbol named `prefix`, `prefix_1`, `prefix_2`, ... that
    /// clashes with no reserved name.
    pub fn fresh_dummy(&mut self) -> SymbolId {
        let name = (0..)
            .map(|k| {
                if k == 0 {
                    self.dummy_prefix.to_string()
                } else {
                    format!("{}_{k}", self.dummy_prefix)
                }
            })
            .find(|name| !self.reserved.contains(name))
            .unwrap_or_default();
        let id = self.arena.intern_symbol(&name, SymbolDomain::Real);
        self.reserved.insert(name);
        id
    }

    pub fn display(&self, expr: ExprHandle) -> String {
        self.arena.display(expr).to_string()
    }
}

/// Transforms a single additive term.
pub(crate) fn transform_term(
    ctx: &mut TermContext<'_>,
    term: ExprHandle,
) -> Result<ExprHandle, FourierError> {
    if ctx.arena.contains_signal_in(term, ctx.var) {
        return signal::transform_signal_term(ctx, term);
    }

    let parts = TermParts::split(ctx.arena, term, ctx.var);
    for &(name, rule) in RULES {
        if let Some(result) = rule(ctx, &parts) {
            trace!(rule = name, term = %ctx.display(term), "rule matched");
            return Ok(result);
        }
    }

    let target = ctx.signed_target();
    match ctx.solver.solve(ctx.arena, term, ctx.var, target) {
        SolverOutcome::Solved(result) if !ctx.arena.is_zero(result) || ctx.arena.is_zero(term) => {
            trace!(term = %ctx.display(term), "solved by integration");
            Ok(result)
        }
        _ => Err(FourierError::Unsupported {
            expr: ctx.display(term),
            reason: "no transform rule applies".to_string(),
        }),
    }
}
