//! Closed-form integration of transform integrals.
//!
//! The engine's own rules cover the generalized-function terms. Anything
//! else is handed to a [`TransformSolver`], which either produces the value
//! of `∫ expr·exp(-2πi·target·var) dvar` over the real line or gives up.

use smallvec::SmallVec;
use tracing::trace;

use spectra_core::{functions, ExprArena, ExprHandle, ExprNode, Number, SymbolId};

use crate::classify::{factor_const, scale_shift, split_complex};

/// What a solver made of a transform integral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverOutcome {
    /// The integral has this closed form.
    Solved(ExprHandle),
    /// No closed form could be produced.
    Unresolved,
}

/// A symbolic integrator for `∫ expr·exp(-2πi·target·var) dvar`.
///
/// `target` is an arbitrary expression (the engine passes the negated
/// frequency for inverse transforms), not necessarily a symbol.
pub trait TransformSolver {
    /// Attempts the integral.
    fn solve(
        &self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        var: SymbolId,
        target: ExprHandle,
    ) -> SolverOutcome;
}

/// A solver that never finds anything.
///
/// Useful to exercise the engine's rules in isolation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSolver;

impl TransformSolver for NullSolver {
    fn solve(&self, _: &mut ExprArena, _: ExprHandle, _: SymbolId, _: ExprHandle) -> SolverOutcome {
        SolverOutcome::Unresolved
    }
}

/// Table-driven solver for the standard transform pairs.
///
/// With `w` the target and `a != 0`:
///
/// | time domain | transform |
/// |---|---|
/// | `δ⁽ⁿ⁾(a·t + b)` | `(2πiw)ⁿ·exp(2πiw·b/a) / (aⁿ·abs(a))` |
/// | `u(a·t + b)`, `a` of known sign | `δ(w)/2 + sign(a)·exp(2πiw·b/a)/(2πiw)` |
/// | `tⁿ·exp(p·t + q)·u(t - t₀)`, `Re p < 0` | `n!·exp(q + p·t₀ - 2πiw·t₀)/(2πiw - p)ⁿ⁺¹` |
/// | `exp(p·t + q)·u(-t)`, `Re p > 0` | `exp(q)/(p - 2πiw)` |
/// | `exp(-α·abs(t))`, `α > 0` | `2α/(α² + 4π²w²)` |
/// | `exp(-α·t²)`, `α > 0` | `sqrt(π/α)·exp(-π²w²/α)` |
/// | `sign(t)` | `1/(πiw)` |
/// | `1/t` | `-πi·sign(w)` |
///
/// For `n > 0` the one-sided exponential requires `t₀ = 0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableSolver;

/// Largest power for which `n!` is formed exactly.
const MAX_FACTORIAL: u32 = 20;

/// The variable-dependent factors of a term, sorted by kind.
struct Shape {
    power: u32,
    exp: Option<ExprHandle>,
    step: Option<ExprHandle>,
    others: SmallVec<[ExprHandle; 2]>,
}

impl Shape {
    fn of(arena: &ExprArena, rest: ExprHandle, var: SymbolId) -> Self {
        let mut shape = Shape {
            power: 0,
            exp: None,
            step: None,
            others: SmallVec::new(),
        };
        for factor in arena.factors(rest) {
            match arena.get(factor) {
                ExprNode::Symbol(id) if *id == var => shape.power += 1,
                ExprNode::Pow { base, exp } if arena.as_symbol(*base) == Some(var) => {
                    let k = arena
                        .as_number(*exp)
                        .and_then(|n| n.as_integer())
                        .and_then(|k| u32::try_from(k).ok());
                    match k {
                        Some(k) => shape.power += k,
                        None => shape.others.push(factor),
                    }
                }
                ExprNode::Exp(arg) if shape.exp.is_none() => shape.exp = Some(*arg),
                ExprNode::Step(arg) if shape.step.is_none() => shape.step = Some(*arg),
                _ => shape.others.push(factor),
            }
        }
        shape
    }

    fn single_other(&self) -> Option<ExprHandle> {
        match (self.power, self.exp, self.step, &self.others[..]) {
            (0, None, None, [only]) => Some(*only),
            _ => None,
        }
    }
}

type Pair = fn(&mut ExprArena, &Shape, SymbolId, ExprHandle) -> Option<ExprHandle>;

const PAIRS: &[(&str, Pair)] = &[
    ("impulse", impulse),
    ("step", step),
    ("one-sided exponential", one_sided_exponential),
    ("two-sided exponential", two_sided_exponential),
    ("signum", signum),
    ("reciprocal", reciprocal),
];

impl TransformSolver for TableSolver {
    fn solve(
        &self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        var: SymbolId,
        target: ExprHandle,
    ) -> SolverOutcome {
        if arena.is_free_of(expr, var) {
            let delta = arena.delta(target);
            return SolverOutcome::Solved(arena.mul([expr, delta]));
        }
        let Ok((constant, rest)) = factor_const(arena, expr, var) else {
            return SolverOutcome::Unresolved;
        };
        let shape = Shape::of(arena, rest, var);
        for &(name, pair) in PAIRS {
            if let Some(result) = pair(arena, &shape, var, target) {
                trace!(pair = name, "table match");
                return SolverOutcome::Solved(arena.mul([constant, result]));
            }
        }
        SolverOutcome::Unresolved
    }
}

/// `2πi·w`.
fn two_pi_i_times(arena: &mut ExprArena, w: ExprHandle) -> ExprHandle {
    let k = arena.two_pi_i();
    arena.mul([k, w])
}

fn impulse(arena: &mut ExprArena, shape: &Shape, var: SymbolId, w: ExprHandle) -> Option<ExprHandle> {
    let ExprNode::Delta { arg, order } = *arena.get(shape.single_other()?) else {
        return None;
    };
    let affine = scale_shift(arena, arg, var).ok()?;
    let (a, b) = (affine.scale, affine.shift);

    let n = arena.integer(i64::from(order));
    let iw = two_pi_i_times(arena, w);
    let numer = arena.pow(iw, n);
    let phase_arg = arena.mul([iw, b]);
    let phase_arg = arena.div(phase_arg, a);
    let phase = arena.exp(phase_arg);
    let a_n = arena.pow(a, n);
    let a_abs = arena.abs(a);
    let denom = arena.mul([a_n, a_abs]);
    let inv = arena.recip(denom);
    Some(arena.mul([numer, phase, inv]))
}

fn step(arena: &mut ExprArena, shape: &Shape, var: SymbolId, w: ExprHandle) -> Option<ExprHandle> {
    let arg = match (shape.power, shape.exp, shape.step, shape.others.is_empty()) {
        (0, None, Some(arg), true) => arg,
        _ => return None,
    };
    let affine = scale_shift(arena, arg, var).ok()?;
    let sign = if arena.is_positive(affine.scale) {
        1
    } else if arena.is_negative(affine.scale) {
        -1
    } else {
        return None;
    };

    let half = arena.rational(1, 2);
    let delta = arena.delta(w);
    let impulse = arena.mul([half, delta]);

    let iw = two_pi_i_times(arena, w);
    let shift = arena.div(affine.shift, affine.scale);
    let phase_arg = arena.mul([iw, shift]);
    let phase = arena.exp(phase_arg);
    let sign = arena.integer(sign);
    let inv = arena.recip(iw);
    let tail = arena.mul([sign, phase, inv]);
    Some(arena.add([impulse, tail]))
}

fn factorial(n: u32) -> Option<i64> {
    if n > MAX_FACTORIAL {
        return None;
    }
    Some((1..=i64::from(n)).product())
}

fn one_sided_exponential(
    arena: &mut ExprArena,
    shape: &Shape,
    var: SymbolId,
    w: ExprHandle,
) -> Option<ExprHandle> {
    let (Some(exp_arg), Some(step_arg)) = (shape.exp, shape.step) else {
        return None;
    };
    if !shape.others.is_empty() {
        return None;
    }
    let growth = scale_shift(arena, exp_arg, var).ok()?;
    let window = scale_shift(arena, step_arg, var).ok()?;
    let (p, q) = (growth.scale, growth.shift);
    let (re_p, _) = split_complex(arena, p)?;
    let iw = two_pi_i_times(arena, w);

    if arena.is_one(window.scale) {
        // Right-sided: u(t - t0).
        if !arena.is_negative(re_p) {
            return None;
        }
        let t0 = arena.neg(window.shift);
        if shape.power > 0 && !arena.is_zero(t0) {
            return None;
        }
        let n_fact = arena.integer(factorial(shape.power)?);
        let p_t0 = arena.mul([p, t0]);
        let iw_t0 = arena.mul([iw, t0]);
        let iw_t0 = arena.neg(iw_t0);
        let phase_arg = arena.add([q, p_t0, iw_t0]);
        let phase = arena.exp(phase_arg);
        let neg_p = arena.neg(p);
        let s = arena.add([neg_p, iw]);
        let k = arena.integer(-(i64::from(shape.power) + 1));
        let denom = arena.pow(s, k);
        return Some(arena.mul([n_fact, phase, denom]));
    }

    // Left-sided: u(-t).
    let minus_one = arena.as_number(window.scale) == Some(Number::MINUS_ONE);
    if !minus_one || !arena.is_zero(window.shift) || shape.power > 0 || !arena.is_positive(re_p) {
        return None;
    }
    let phase = arena.exp(q);
    let s = arena.sub(p, iw);
    let inv = arena.recip(s);
    Some(arena.mul([phase, inv]))
}

fn two_sided_exponential(
    arena: &mut ExprArena,
    shape: &Shape,
    var: SymbolId,
    w: ExprHandle,
) -> Option<ExprHandle> {
    let exp_arg = match (shape.power, shape.exp, shape.step, shape.others.is_empty()) {
        (0, Some(arg), None, true) => arg,
        _ => return None,
    };
    let (c, r) = factor_const(arena, exp_arg, var).ok()?;
    let alpha = arena.neg(c);
    if !arena.is_positive(alpha) {
        return None;
    }
    let t = arena.intern(ExprNode::Symbol(var));
    let two = arena.integer(2);
    let pi = arena.pi();
    let w2 = arena.pow(w, two);

    let abs_t = arena.abs(t);
    if r == abs_t {
        // 2α/(α² + 4π²w²)
        let alpha2 = arena.pow(alpha, two);
        let four = arena.integer(4);
        let pi2 = arena.pow(pi, two);
        let spread = arena.mul([four, pi2, w2]);
        let denom = arena.add([alpha2, spread]);
        let inv = arena.recip(denom);
        return Some(arena.mul([two, alpha, inv]));
    }

    let t2 = arena.pow(t, two);
    if r == t2 {
        // sqrt(π/α)·exp(-π²w²/α)
        let half = arena.rational(1, 2);
        let ratio = arena.div(pi, alpha);
        let amplitude = arena.pow(ratio, half);
        let pi2 = arena.pow(pi, two);
        let num = arena.mul([pi2, w2]);
        let num = arena.neg(num);
        let decay = arena.div(num, alpha);
        let envelope = arena.exp(decay);
        return Some(arena.mul([amplitude, envelope]));
    }
    None
}

fn signum(arena: &mut ExprArena, shape: &Shape, var: SymbolId, w: ExprHandle) -> Option<ExprHandle> {
    let ExprNode::Function {
        id: functions::SIGN,
        arg,
    } = *arena.get(shape.single_other()?)
    else {
        return None;
    };
    if arena.as_symbol(arg) != Some(var) {
        return None;
    }
    let i = arena.imaginary_unit();
    let pi = arena.pi();
    let denom = arena.mul([i, pi, w]);
    Some(arena.recip(denom))
}

fn reciprocal(arena: &mut ExprArena, shape: &Shape, var: SymbolId, w: ExprHandle) -> Option<ExprHandle> {
    let ExprNode::Pow { base, exp } = *arena.get(shape.single_other()?) else {
        return None;
    };
    if arena.as_symbol(base) != Some(var) || arena.as_number(exp) != Some(Number::MINUS_ONE) {
        return None;
    }
    let minus_one = arena.integer(-1);
    let i = arena.imaginary_unit();
    let pi = arena.pi();
    let sign = arena.sign(w);
    Some(arena.mul([minus_one, i, pi, sign]))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        arena: ExprArena,
        t: ExprHandle,
        f: ExprHandle,
        var: SymbolId,
    }

    fn fixture() -> Fixture {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let f = arena.real_symbol("f");
        let var = arena.as_symbol(t).unwrap();
        Fixture { arena, t, f, var }
    }

    fn solve(fx: &mut Fixture, expr: ExprHandle) -> SolverOutcome {
        TableSolver.solve(&mut fx.arena, expr, fx.var, fx.f)
    }

    #[test]
    fn test_impulse_is_flat() {
        let mut fx = fixture();
        let d = fx.arena.delta(fx.t);
        assert_eq!(solve(&mut fx, d), SolverOutcome::Solved(fx.arena.one()));
    }

    #[test]
    fn test_shifted_impulse_is_a_phase() {
        let mut fx = fixture();
        let three = fx.arena.integer(3);
        let shifted = fx.arena.sub(fx.t, three);
        let d = fx.arena.delta(shifted);

        let arena = &mut fx.arena;
        let k = arena.integer(-6);
        let pi = arena.pi();
        let i = arena.imaginary_unit();
        let arg = arena.mul([k, pi, i, fx.f]);
        let expected = arena.exp(arg);

        assert_eq!(solve(&mut fx, d), SolverOutcome::Solved(expected));
    }

    #[test]
    fn test_causal_exponential() {
        let mut fx = fixture();
        let a = fx.arena.positive_symbol("a");
        let at = fx.arena.mul([a, fx.t]);
        let decay = fx.arena.neg(at);
        let e = fx.arena.exp(decay);
        let u = fx.arena.step(fx.t);
        let signal = fx.arena.mul([e, u]);

        let k = fx.arena.two_pi_i();
        let kf = fx.arena.mul([k, fx.f]);
        let denom = fx.arena.add([a, kf]);
        let expected = fx.arena.recip(denom);

        assert_eq!(solve(&mut fx, signal), SolverOutcome::Solved(expected));
    }

    #[test]
    fn test_growing_exponential_is_unresolved() {
        let mut fx = fixture();
        let a = fx.arena.positive_symbol("a");
        let at = fx.arena.mul([a, fx.t]);
        let e = fx.arena.exp(at);
        let u = fx.arena.step(fx.t);
        let signal = fx.arena.mul([e, u]);
        assert_eq!(solve(&mut fx, signal), SolverOutcome::Unresolved);
    }

    #[test]
    fn test_gaussian() {
        let mut fx = fixture();
        let two = fx.arena.integer(2);
        let t2 = fx.arena.pow(fx.t, two);
        let arg = fx.arena.neg(t2);
        let g = fx.arena.exp(arg);

        let SolverOutcome::Solved(result) = solve(&mut fx, g) else {
            panic!("gaussian should be in the table");
        };
        let shown = fx.arena.display(result).to_string();
        assert!(shown.contains("exp("), "got {shown}");
        assert!(shown.contains("pi"), "got {shown}");
    }

    #[test]
    fn test_laplacian_pulse() {
        let mut fx = fixture();
        let abs_t = fx.arena.abs(fx.t);
        let arg = fx.arena.neg(abs_t);
        let e = fx.arena.exp(arg);

        let arena = &mut fx.arena;
        let one = arena.one();
        let two = arena.integer(2);
        let four = arena.integer(4);
        let pi = arena.pi();
        let pi2 = arena.pow(pi, two);
        let f2 = arena.pow(fx.f, two);
        let spread = arena.mul([four, pi2, f2]);
        let denom = arena.add([one, spread]);
        let inv = arena.recip(denom);
        let expected = arena.mul([two, inv]);

        assert_eq!(solve(&mut fx, e), SolverOutcome::Solved(expected));
    }

    #[test]
    fn test_signum_and_reciprocal() {
        let mut fx = fixture();
        let s = fx.arena.sign(fx.t);
        let i = fx.arena.imaginary_unit();
        let pi = fx.arena.pi();
        let denom = fx.arena.mul([i, pi, fx.f]);
        let expected = fx.arena.recip(denom);
        assert_eq!(solve(&mut fx, s), SolverOutcome::Solved(expected));

        let inv_t = fx.arena.recip(fx.t);
        let minus_one = fx.arena.integer(-1);
        let sign_f = fx.arena.sign(fx.f);
        let expected = fx.arena.mul([minus_one, i, pi, sign_f]);
        assert_eq!(solve(&mut fx, inv_t), SolverOutcome::Solved(expected));
    }

    #[test]
    fn test_step() {
        let mut fx = fixture();
        let u = fx.arena.step(fx.t);

        let arena = &mut fx.arena;
        let half = arena.rational(1, 2);
        let d = arena.delta(fx.f);
        let impulse = arena.mul([half, d]);
        let k = arena.two_pi_i();
        let kf = arena.mul([k, fx.f]);
        let tail = arena.recip(kf);
        let expected = arena.add([impulse, tail]);

        assert_eq!(solve(&mut fx, u), SolverOutcome::Solved(expected));
    }

    #[test]
    fn test_unknown_shape() {
        let mut fx = fixture();
        let s = fx.arena.sin(fx.t);
        let ln = fx.arena.ln(s);
        assert_eq!(solve(&mut fx, ln), SolverOutcome::Unresolved);
        assert_eq!(
            NullSolver.solve(&mut fx.arena, fx.t, fx.var, fx.f),
            SolverOutcome::Unresolved
        );
    }
}
