//! Numeric evaluation of expressions over the complex plane.

use std::f64::consts::PI;

use hashbrown::HashMap;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rayon::prelude::*;
use tracing::trace;

use spectra_core::{functions, Constant, ExprArena, ExprHandle, ExprNode, SymbolId};

use crate::error::PlotError;

/// Imaginary parts below this are treated as zero when a real value is
/// required.
const REAL_TOLERANCE: f64 = 1e-12;

/// Evaluates expressions with numeric values bound to symbols.
///
/// Unbound symbols are [`PlotError::TypeMismatch`]. Signals, impulses and
/// integrals have no pointwise value and are [`PlotError::Evaluation`].
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    bindings: HashMap<SymbolId, Complex64>,
}

impl Evaluator {
    /// An evaluator with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `symbol` to `value`.
    #[must_use]
    pub fn bind(mut self, symbol: SymbolId, value: impl Into<Complex64>) -> Self {
        self.bindings.insert(symbol, value.into());
        self
    }

    /// Binds the symbol expression `symbol` to `value`.
    ///
    /// # Errors
    ///
    /// [`PlotError::TypeMismatch`] if `symbol` is not a symbol.
    pub fn bind_expr(
        self,
        arena: &ExprArena,
        symbol: ExprHandle,
        value: impl Into<Complex64>,
    ) -> Result<Self, PlotError> {
        let id = arena
            .as_symbol(symbol)
            .ok_or_else(|| PlotError::symbolic(format!("binding target {}", arena.display(symbol))))?;
        Ok(self.bind(id, value))
    }

    /// The value bound to `symbol`, if any.
    #[must_use]
    pub fn binding(&self, symbol: SymbolId) -> Option<Complex64> {
        self.bindings.get(&symbol).copied()
    }

    /// Evaluates `expr` with the current bindings.
    ///
    /// # Errors
    ///
    /// See [`Evaluator`].
    pub fn eval(&self, arena: &ExprArena, expr: ExprHandle) -> Result<Complex64, PlotError> {
        self.eval_node(arena, expr, None)
    }

    /// Evaluates `expr` with `var` set to the real number `x`.
    ///
    /// # Errors
    ///
    /// See [`Evaluator`].
    pub fn eval_at(
        &self,
        arena: &ExprArena,
        expr: ExprHandle,
        var: SymbolId,
        x: f64,
    ) -> Result<Complex64, PlotError> {
        self.eval_node(arena, expr, Some((var, Complex64::new(x, 0.0))))
    }

    /// Evaluates `expr` at every point in parallel.
    ///
    /// # Errors
    ///
    /// The first failure among the points.
    pub fn sample(
        &self,
        arena: &ExprArena,
        expr: ExprHandle,
        var: SymbolId,
        points: &[f64],
    ) -> Result<Vec<Complex64>, PlotError> {
        trace!(points = points.len(), expr = %arena.display(expr), "sampling");
        points
            .par_iter()
            .map(|&x| self.eval_at(arena, expr, var, x))
            .collect()
    }

    /// Evaluates `expr` and requires the result to be real.
    ///
    /// # Errors
    ///
    /// As [`eval`](Self::eval), plus [`PlotError::TypeMismatch`] for a
    /// complex value.
    pub fn eval_real(&self, arena: &ExprArena, expr: ExprHandle) -> Result<f64, PlotError> {
        let z = self.eval(arena, expr)?;
        as_real(z).ok_or_else(|| PlotError::symbolic(format!("complex value of {}", arena.display(expr))))
    }

    fn eval_node(
        &self,
        arena: &ExprArena,
        expr: ExprHandle,
        var: Option<(SymbolId, Complex64)>,
    ) -> Result<Complex64, PlotError> {
        let value = match arena.get(expr) {
            ExprNode::Number(n) => Complex64::new(n.to_f64(), 0.0),
            ExprNode::Constant(Constant::I) => Complex64::i(),
            ExprNode::Constant(Constant::Pi) => Complex64::new(PI, 0.0),
            ExprNode::Constant(Constant::Infinity) => {
                return Err(PlotError::Evaluation("infinity".to_string()))
            }
            ExprNode::Symbol(id) => match var {
                Some((v, x)) if v == *id => x,
                _ => self.binding(*id).ok_or_else(|| {
                    PlotError::symbolic(format!("unbound symbol {}", arena.display(expr)))
                })?,
            },
            ExprNode::Add(args) => args.iter().try_fold(Complex64::zero(), |acc, &arg| {
                Ok::<_, PlotError>(acc + self.eval_node(arena, arg, var)?)
            })?,
            ExprNode::Mul(args) => args.iter().try_fold(Complex64::one(), |acc, &arg| {
                Ok::<_, PlotError>(acc * self.eval_node(arena, arg, var)?)
            })?,
            ExprNode::Pow { base, exp } => {
                let b = self.eval_node(arena, *base, var)?;
                let integer = arena
                    .as_number(*exp)
                    .and_then(|n| n.as_integer())
                    .and_then(|k| i32::try_from(k).ok());
                match integer {
                    Some(k) => b.powi(k),
                    None => b.powc(self.eval_node(arena, *exp, var)?),
                }
            }
            ExprNode::Exp(arg) => self.eval_node(arena, *arg, var)?.exp(),
            ExprNode::Function { id, arg } => {
                let z = self.eval_node(arena, *arg, var)?;
                match *id {
                    functions::SIN => z.sin(),
                    functions::COS => z.cos(),
                    functions::TAN => z.tan(),
                    functions::LN => z.ln(),
                    functions::ABS => Complex64::new(z.norm(), 0.0),
                    functions::SIGN if z.is_zero() => Complex64::zero(),
                    functions::SIGN => z / z.norm(),
                    _ => return Err(PlotError::Evaluation(arena.display(expr).to_string())),
                }
            }
            ExprNode::Step(arg) => {
                let z = self.eval_node(arena, *arg, var)?;
                let x = as_real(z)
                    .ok_or_else(|| PlotError::Evaluation(arena.display(expr).to_string()))?;
                let step = if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    0.0
                } else {
                    0.5
                };
                Complex64::new(step, 0.0)
            }
            ExprNode::Signal { .. } | ExprNode::Delta { .. } | ExprNode::Integral { .. } => {
                return Err(PlotError::Evaluation(arena.display(expr).to_string()))
            }
        };
        Ok(value)
    }
}

fn as_real(z: Complex64) -> Option<f64> {
    (z.im.abs() <= REAL_TOLERANCE * z.re.abs().max(1.0)).then_some(z.re)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic() {
        let mut arena = ExprArena::new();
        let x = arena.real_symbol("x");
        let id = arena.as_symbol(x).unwrap();
        let three = arena.integer(3);
        let half = arena.rational(1, 2);
        let x2 = arena.pow(x, three);
        let expr = arena.add([x2, half]);

        let value = Evaluator::new().eval_at(&arena, expr, id, 2.0).unwrap();
        assert_relative_eq!(value.re, 8.5);
        assert_relative_eq!(value.im, 0.0);
    }

    #[test]
    fn test_complex_exponential_is_on_unit_circle() {
        let mut arena = ExprArena::new();
        let f = arena.real_symbol("f");
        let id = arena.as_symbol(f).unwrap();
        let k = arena.two_pi_i();
        let arg = arena.mul([k, f]);
        let e = arena.exp(arg);

        let value = Evaluator::new().eval_at(&arena, e, id, 0.25).unwrap();
        assert_relative_eq!(value.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(value.im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bindings() {
        let mut arena = ExprArena::new();
        let a = arena.positive_symbol("a");
        let t = arena.real_symbol("t");
        let at = arena.mul([a, t]);
        let eval = Evaluator::new().bind_expr(&arena, a, 3.0).unwrap();
        let id = arena.as_symbol(t).unwrap();
        assert_relative_eq!(eval.eval_at(&arena, at, id, 2.0).unwrap().re, 6.0);
        assert!(Evaluator::new().bind_expr(&arena, at, 1.0).is_err());
    }

    #[test]
    fn test_unbound_symbol_is_a_type_mismatch() {
        let mut arena = ExprArena::new();
        let a = arena.symbol("a");
        assert!(matches!(
            Evaluator::new().eval(&arena, a),
            Err(PlotError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_step_takes_half_at_origin() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let id = arena.as_symbol(t).unwrap();
        let u = arena.step(t);
        let eval = Evaluator::new();
        let values = eval.sample(&arena, u, id, &[-1.0, 0.0, 1.0]).unwrap();
        let re: Vec<f64> = values.iter().map(|z| z.re).collect();
        assert_eq!(re, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_impulse_has_no_value() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let id = arena.as_symbol(t).unwrap();
        let d = arena.delta(t);
        assert!(matches!(
            Evaluator::new().eval_at(&arena, d, id, 1.0),
            Err(PlotError::Evaluation(_))
        ));
    }
}
