//! Closed-form rules for generalized-function terms.
//!
//! Rules are tried in the order of [`RULES`]; the first match wins. Each
//! rule sees the term split into [`TermParts`] and either produces the
//! transform or declines.

use spectra_core::{Constant, ExprHandle, ExprNode, Number};

use crate::classify::{scale_shift, split_complex, TermParts};
use crate::term::TermContext;

/// Highest power of the variable the ramp rule maps to an impulse
/// derivative.
const MAX_RAMP_ORDER: u32 = 2;

pub(crate) type Rule = fn(&mut TermContext<'_>, &TermParts) -> Option<ExprHandle>;

pub(crate) const RULES: &[(&str, Rule)] = &[
    ("constant", constant),
    ("ramp", ramp),
    ("pole", pole),
    ("complex exponential", complex_exponential),
];

/// `c` transforms to `c·δ(f)`.
fn constant(ctx: &mut TermContext<'_>, parts: &TermParts) -> Option<ExprHandle> {
    if !parts.is_constant(ctx.arena) {
        return None;
    }
    let target = ctx.target_expr();
    let delta = ctx.arena.delta(target);
    Some(ctx.arena.mul([parts.constant, delta]))
}

/// `c·t` transforms to `c·2πi·δ′(f)` and `c·t²` to `c·(2πi)²·δ″(f)`.
///
/// Higher powers are left to the solver.
fn ramp(ctx: &mut TermContext<'_>, parts: &TermParts) -> Option<ExprHandle> {
    if parts.exp_arg.is_some() {
        return None;
    }
    let n = match *ctx.arena.get(parts.other) {
        ExprNode::Symbol(id) if id == ctx.var => 1,
        ExprNode::Pow { base, exp } if ctx.arena.as_symbol(base) == Some(ctx.var) => ctx
            .arena
            .as_number(exp)
            .and_then(|n| n.as_integer())
            .and_then(|k| u32::try_from(k).ok())
            .filter(|k| (1..=MAX_RAMP_ORDER).contains(k))?,
        _ => return None,
    };

    let unit = ctx.arena.two_pi_i();
    let order = ctx.arena.integer(i64::from(n));
    let coefficient = ctx.arena.pow(unit, order);

    let target = ctx.target_expr();
    let delta = ctx.arena.delta_derivative(target, n);
    Some(ctx.arena.mul([parts.constant, coefficient, delta]))
}

/// `c/(A + B·t)` with `B` imaginary transforms to a one-sided
/// exponential, `a = -2πi·A/B`:
/// `c·exp(-a·f)·u(sign(a)·f)`.
fn pole(ctx: &mut TermContext<'_>, parts: &TermParts) -> Option<ExprHandle> {
    if parts.exp_arg.is_some() {
        return None;
    }
    let ExprNode::Pow { base, exp } = *ctx.arena.get(parts.other) else {
        return None;
    };
    if ctx.arena.as_number(exp) != Some(Number::MINUS_ONE) {
        return None;
    }
    let (bound, free): (Vec<_>, Vec<_>) = ctx
        .arena
        .terms(base)
        .into_iter()
        .partition(|&t| ctx.arena.has_symbol(t, ctx.var));
    let [dependent] = bound[..] else {
        return None;
    };
    if free.is_empty() {
        return None;
    }

    let var = ctx.var_expr();
    let arena = &mut *ctx.arena;
    let offset = arena.add(free);
    if arena.is_zero(offset) {
        return None;
    }
    let slope = arena.div(dependent, var);
    if arena.has_symbol(slope, ctx.var) || !arena.has_constant(slope, Constant::I) {
        return None;
    }
    let k = arena.two_pi_i();
    let scaled = arena.mul([offset, k]);
    let ratio = arena.div(scaled, slope);
    let a = arena.neg(ratio);

    let target = ctx.signed_target();
    let arena = &mut *ctx.arena;
    let decay = arena.mul([a, target]);
    let decay = arena.neg(decay);
    let envelope = arena.exp(decay);
    let sign = arena.sign(a);
    let window = arena.mul([sign, target]);
    let window = arena.step(window);
    Some(arena.mul([parts.constant, envelope, window]))
}

/// `c·exp(2πi·a·t + b)` transforms to `c·exp(b)·δ(f - a)`.
fn complex_exponential(ctx: &mut TermContext<'_>, parts: &TermParts) -> Option<ExprHandle> {
    let exp_arg = parts.exp_arg?;
    if !ctx.arena.is_one(parts.other) {
        return None;
    }
    let affine = scale_shift(ctx.arena, exp_arg, ctx.var).ok()?;
    let (re, im) = split_complex(ctx.arena, affine.scale)?;
    if !ctx.arena.is_zero(re) || ctx.arena.is_zero(im) {
        return None;
    }

    let target = ctx.signed_target();
    let arena = &mut *ctx.arena;
    let k = arena.two_pi_i();
    let frequency = arena.div(affine.scale, k);
    let offset = arena.sub(target, frequency);
    let delta = arena.delta(offset);
    let phase = arena.exp(affine.shift);
    Some(arena.mul([parts.constant, phase, delta]))
}
