//! Terms built from abstract signals.
//!
//! A lone signal maps to its dual by the scaling and shift theorems. A
//! product of several operands maps to a chain of convolution integrals
//! over fresh dummy variables.

use smallvec::SmallVec;
use tracing::trace;

use spectra_core::{ExprHandle, ExprNode, SignalId};

use crate::classify::{factor_const, scale_shift};
use crate::engine::Direction;
use crate::error::FourierError;
use crate::term::{transform_term, TermContext};

/// Transforms a term containing at least one signal of the variable.
pub(crate) fn transform_signal_term(
    ctx: &mut TermContext<'_>,
    term: ExprHandle,
) -> Result<ExprHandle, FourierError> {
    let (constant, rest) = factor_const(ctx.arena, term, ctx.var)?;

    if let Some((id, arg)) = ctx.arena.as_signal(rest) {
        let result = transform_application(ctx, id, arg)?;
        return Ok(ctx.arena.mul([result, constant]));
    }

    let var = ctx.var_expr();
    let mut operands: SmallVec<[ExprHandle; 4]> = SmallVec::new();
    let mut others = Vec::new();
    for factor in ctx.arena.factors(rest) {
        let Some((signal, arg, count)) = signal_power(ctx, factor) else {
            others.push(factor);
            continue;
        };
        if arg != var {
            return Err(FourierError::malformed(format!(
                "signal argument in a product must be the bare variable: {}",
                ctx.display(factor)
            )));
        }
        operands.extend(std::iter::repeat(signal).take(count));
    }

    let mut other = ctx.arena.mul(others);
    if ctx.arena.contains_signal(other) {
        return Err(FourierError::malformed(format!(
            "cannot transform {}",
            ctx.display(other)
        )));
    }
    if ctx.arena.has_symbol(other, ctx.var) {
        operands.push(other);
        other = ctx.arena.one();
    }

    let Some((&first, tail)) = operands.split_first() else {
        return Err(FourierError::malformed(format!(
            "no signal operands in {}",
            ctx.display(term)
        )));
    };
    let first = transform_term(ctx, first)?;
    let mut result = ctx.arena.mul([first, other]);

    let target = ctx.target_expr();
    for &operand in tail {
        let dummy = ctx.fresh_dummy();
        let spectrum = transform_term(ctx, operand)?;
        let arena = &mut *ctx.arena;
        let d = arena.intern(ExprNode::Symbol(dummy));
        let lagged = arena.sub(target, d);
        let shifted = arena.subs(result, ctx.target, lagged);
        let moved = arena.subs(spectrum, ctx.target, d);
        let integrand = arena.mul([shifted, moved]);
        result = arena.integral_over_reals(integrand, dummy);
        trace!(dummy = %ctx.display(d), "convolution");
    }

    Ok(ctx.arena.mul([result, constant]))
}

/// A signal factor `s(x)` or `s(x)^k` with `k` a positive integer, as the
/// bare signal, its argument and its multiplicity.
fn signal_power(
    ctx: &TermContext<'_>,
    factor: ExprHandle,
) -> Option<(ExprHandle, ExprHandle, usize)> {
    match *ctx.arena.get(factor) {
        ExprNode::Signal { arg, .. } => Some((factor, arg, 1)),
        ExprNode::Pow { base, exp } => {
            let (_, arg) = ctx.arena.as_signal(base)?;
            let k = ctx
                .arena
                .as_number(exp)
                .and_then(|n| n.as_integer())
                .and_then(|k| usize::try_from(k).ok())
                .filter(|&k| k > 0)?;
            Some((base, arg, k))
        }
        _ => None,
    }
}

/// `s(a·t + b)` maps to `S(f/a)·exp(±2πi·f·b/a)/abs(a)`, the sign of the
/// phase following the transform direction.
fn transform_application(
    ctx: &mut TermContext<'_>,
    id: SignalId,
    arg: ExprHandle,
) -> Result<ExprHandle, FourierError> {
    let affine = scale_shift(ctx.arena, arg, ctx.var)?;
    let Some(dual) = ctx.arena.signal_dual(id) else {
        return Err(FourierError::malformed(format!(
            "undeclared signal in {}",
            ctx.display(arg)
        )));
    };

    let target = ctx.target_expr();
    let shift = match ctx.direction {
        Direction::Forward => affine.shift,
        Direction::Inverse => ctx.arena.neg(affine.shift),
    };
    let arena = &mut *ctx.arena;
    let scaled = arena.div(target, affine.scale);
    let spectrum = arena.signal(dual, scaled);
    let magnitude = arena.abs(affine.scale);
    let k = arena.two_pi_i();
    let phase_arg = arena.mul([k, target, shift]);
    let phase_arg = arena.div(phase_arg, affine.scale);
    let phase = arena.exp(phase_arg);
    let inv = arena.recip(magnitude);
    Ok(arena.mul([spectrum, phase, inv]))
}
