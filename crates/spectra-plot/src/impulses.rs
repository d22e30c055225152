//! Separating impulses from the smooth part of an expression.
//!
//! Impulses cannot be sampled, so each `w·δ(a·x + b)` term is drawn as an
//! arrow of height `w/abs(a)` at `x = -b/a`.

use num_complex::Complex64;

use spectra_core::{ExprArena, ExprHandle, ExprNode, SymbolId};
use spectra_fourier::scale_shift;

use crate::error::PlotError;
use crate::eval::Evaluator;

/// An impulse at a numeric location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impulse {
    /// Where the impulse sits on the variable's axis.
    pub location: f64,
    /// The impulse area.
    pub weight: Complex64,
}

/// Splits `expr` into its impulse-free part and its impulses in `var`.
///
/// Impulses are returned in ascending order of location.
///
/// # Errors
///
/// [`PlotError::TypeMismatch`] when a location or weight is symbolic or an
/// impulse argument is not affine in `var`, and [`PlotError::Evaluation`]
/// for impulse derivatives.
pub fn separate_impulses(
    arena: &mut ExprArena,
    expr: ExprHandle,
    var: SymbolId,
    evaluator: &Evaluator,
) -> Result<(ExprHandle, Vec<Impulse>), PlotError> {
    let expanded = arena.expand(expr);
    let mut rest = Vec::new();
    let mut impulses = Vec::new();

    for term in arena.terms(expanded) {
        let mut deltas = Vec::new();
        let mut others = Vec::new();
        for factor in arena.factors(term) {
            match *arena.get(factor) {
                ExprNode::Delta { arg, order } if arena.has_symbol(arg, var) => {
                    deltas.push((arg, order));
                }
                _ => others.push(factor),
            }
        }
        let (arg, order) = match deltas.as_slice() {
            [] => {
                rest.push(term);
                continue;
            }
            [single] => *single,
            _ => {
                return Err(PlotError::symbolic(format!(
                    "product of impulses {}",
                    arena.display(term)
                )))
            }
        };
        if order > 0 {
            return Err(PlotError::Evaluation(format!(
                "impulse derivative in {}",
                arena.display(term)
            )));
        }

        let weight = arena.mul(others);
        if arena.has_symbol(weight, var) {
            return Err(PlotError::symbolic(format!(
                "impulse weight {}",
                arena.display(weight)
            )));
        }
        let affine = scale_shift(arena, arg, var)
            .map_err(|_| PlotError::symbolic(format!("impulse location in {}", arena.display(term))))?;
        let offset = arena.neg(affine.shift);
        let location = arena.div(offset, affine.scale);
        let magnitude = arena.abs(affine.scale);
        let area = arena.div(weight, magnitude);

        impulses.push(Impulse {
            location: evaluator.eval_real(arena, location)?,
            weight: evaluator.eval(arena, area)?,
        });
    }

    impulses.sort_by(|a, b| a.location.total_cmp(&b.location));
    Ok((arena.add(rest), impulses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn freq(arena: &mut ExprArena) -> (ExprHandle, SymbolId) {
        let f = arena.real_symbol("f");
        let id = arena.as_symbol(f).unwrap();
        (f, id)
    }

    #[test]
    fn test_pair_of_impulses() {
        let mut arena = ExprArena::new();
        let (f, id) = freq(&mut arena);
        let one = arena.one();
        let half = arena.rational(1, 2);
        let below = arena.sub(f, one);
        let above = arena.add([f, one]);
        let d1 = arena.delta(below);
        let d2 = arena.delta(above);
        let t1 = arena.mul([half, d1]);
        let t2 = arena.mul([half, d2]);
        let expr = arena.add([t1, t2]);

        let (rest, impulses) = separate_impulses(&mut arena, expr, id, &Evaluator::new()).unwrap();

        assert!(arena.is_zero(rest));
        assert_eq!(impulses.len(), 2);
        assert_relative_eq!(impulses[0].location, -1.0);
        assert_relative_eq!(impulses[1].location, 1.0);
        assert_relative_eq!(impulses[0].weight.re, 0.5);
    }

    #[test]
    fn test_scaled_impulse_area() {
        let mut arena = ExprArena::new();
        let (f, id) = freq(&mut arena);
        let two = arena.integer(2);
        let two_f = arena.mul([two, f]);
        let arg = arena.sub(two_f, two);
        let d = arena.delta(arg);

        let (_, impulses) = separate_impulses(&mut arena, d, id, &Evaluator::new()).unwrap();

        assert_relative_eq!(impulses[0].location, 1.0);
        assert_relative_eq!(impulses[0].weight.re, 0.5);
    }

    #[test]
    fn test_smooth_part_is_kept() {
        let mut arena = ExprArena::new();
        let (f, id) = freq(&mut arena);
        let one = arena.one();
        let k = arena.two_pi_i();
        let kf = arena.mul([k, f]);
        let denom = arena.add([one, kf]);
        let smooth = arena.recip(denom);
        let d = arena.delta(f);
        let expr = arena.add([smooth, d]);

        let (rest, impulses) = separate_impulses(&mut arena, expr, id, &Evaluator::new()).unwrap();

        assert_eq!(rest, smooth);
        assert_eq!(impulses.len(), 1);
        assert_relative_eq!(impulses[0].location, 0.0);
    }

    #[test]
    fn test_symbolic_location_needs_a_binding() {
        let mut arena = ExprArena::new();
        let (f, id) = freq(&mut arena);
        let a = arena.positive_symbol("a");
        let arg = arena.sub(f, a);
        let d = arena.delta(arg);

        let err = separate_impulses(&mut arena, d, id, &Evaluator::new()).unwrap_err();
        assert!(matches!(err, PlotError::TypeMismatch { .. }));

        let bound = Evaluator::new().bind_expr(&arena, a, 3.0).unwrap();
        let (_, impulses) = separate_impulses(&mut arena, d, id, &bound).unwrap();
        assert_relative_eq!(impulses[0].location, 3.0);
    }

    #[test]
    fn test_impulse_derivative_is_rejected() {
        let mut arena = ExprArena::new();
        let (f, id) = freq(&mut arena);
        let d = arena.delta_derivative(f, 1);
        assert!(matches!(
            separate_impulses(&mut arena, d, id, &Evaluator::new()),
            Err(PlotError::Evaluation(_))
        ));
    }
}
