//! Canonical constructors.
//!
//! Every compound expression built through these methods is in canonical
//! form, so two mathematically identical inputs that differ only in
//! operand order, grouping or numeric bookkeeping intern to the same
//! handle. The rules are deliberately local (no expansion, no
//! factoring):
//!
//! - sums and products are flattened, numeric parts folded, like terms
//!   collected (`2*x + 3*x = 5*x`) and like bases combined (`x * x = x^2`);
//! - all exponential factors of a product merge into one `exp`;
//! - powers of `I` are reduced, `exp(I*pi*q)` folds for half-integer `q`;
//! - a number times a lone sum is distributed;
//! - operands are ordered by handle index.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::expr::{functions, Constant, ExprNode, FunctionId, SignalId, SymbolId};
use crate::handle::ExprHandle;
use crate::number::Number;

type Args = SmallVec<[ExprHandle; 4]>;

impl ExprArena {
    /// Canonical sum.
    pub fn add(&mut self, args: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut flat = Args::new();
        for arg in args {
            match self.get(arg) {
                ExprNode::Add(children) => flat.extend(children.iter().copied()),
                _ => flat.push(arg),
            }
        }

        let mut constant = Number::ZERO;
        let mut order: Vec<ExprHandle> = Vec::new();
        let mut coeffs: HashMap<ExprHandle, Number> = HashMap::new();

        for term in flat {
            if let Some(n) = self.as_number(term) {
                constant = constant + n;
                continue;
            }
            let (c, rest) = self.split_coefficient(term);
            if let Some(existing) = coeffs.get_mut(&rest) {
                *existing = &*existing + &c;
            } else {
                coeffs.insert(rest, c);
                order.push(rest);
            }
        }

        let mut terms = Args::new();
        let mut reflatten = false;
        for rest in order {
            let Some(c) = coeffs.remove(&rest) else {
                continue;
            };
            if c.is_zero() {
                continue;
            }
            let term = self.scale_by(c, rest);
            reflatten |= matches!(self.get(term), ExprNode::Add(_));
            terms.push(term);
        }
        if !constant.is_zero() {
            let c = self.number(constant);
            terms.push(c);
        }
        if reflatten {
            return self.add(terms);
        }

        terms.sort_unstable_by_key(|h| (!self.get(*h).is_number(), h.index()));
        match terms.len() {
            0 => self.zero(),
            1 => terms[0],
            _ => self.intern(ExprNode::Add(terms)),
        }
    }

    /// Canonical product.
    pub fn mul(&mut self, args: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut flat = Args::new();
        for arg in args {
            match self.get(arg) {
                ExprNode::Mul(children) => flat.extend(children.iter().copied()),
                _ => flat.push(arg),
            }
        }

        let mut coeff = Number::ONE;
        let mut i_power: i64 = 0;
        let mut exp_args = Args::new();
        let mut bases: Vec<ExprHandle> = Vec::new();
        let mut exponents: HashMap<ExprHandle, Args> = HashMap::new();

        for factor in flat {
            let node = self.get(factor).clone();
            if let ExprNode::Number(n) = node {
                if n.is_zero() {
                    return self.zero();
                }
                coeff = coeff * n;
                continue;
            }
            let (base, exp) = match node {
                ExprNode::Constant(Constant::I) => {
                    i_power += 1;
                    continue;
                }
                ExprNode::Exp(arg) => {
                    exp_args.push(arg);
                    continue;
                }
                ExprNode::Pow { base, exp } => {
                    if matches!(self.get(base), ExprNode::Constant(Constant::I)) {
                        if let Some(k) = self.as_number(exp).and_then(|n| n.as_integer()) {
                            i_power += k;
                            continue;
                        }
                    }
                    (base, exp)
                }
                _ => (factor, self.one()),
            };
            exponents
                .entry(base)
                .or_insert_with(|| {
                    bases.push(base);
                    Args::new()
                })
                .push(exp);
        }

        let mut factors = Args::new();
        let mut regroup = false;
        for base in bases {
            let exps = exponents.remove(&base).unwrap_or_default();
            let exp = if exps.len() == 1 { exps[0] } else { self.add(exps) };
            let power = self.pow(base, exp);
            match self.get(power) {
                node if node.is_one() => {}
                node if node.is_number() => regroup = true,
                ExprNode::Mul(_) | ExprNode::Exp(_) | ExprNode::Constant(Constant::I) => {
                    regroup = true;
                }
                _ => {}
            }
            if !self.is_one(power) {
                factors.push(power);
            }
        }

        let i_power = i_power.rem_euclid(4);
        if i_power >= 2 {
            coeff = -coeff;
        }
        if i_power % 2 == 1 {
            factors.push(self.imaginary_unit());
        }

        if !exp_args.is_empty() {
            let arg = self.add(exp_args);
            let e = self.exp(arg);
            if !self.is_one(e) {
                regroup |= !matches!(self.get(e), ExprNode::Exp(_));
                factors.push(e);
            }
        }

        if regroup {
            if !coeff.is_one() {
                factors.push(self.number(coeff));
            }
            return self.mul(factors);
        }

        factors.sort_unstable_by_key(|h| h.index());

        if factors.is_empty() {
            return self.number(coeff);
        }
        if coeff.is_one() && factors.len() == 1 {
            return factors[0];
        }
        if factors.len() == 1 {
            if let ExprNode::Add(terms) = self.get(factors[0]).clone() {
                let c = self.number(coeff);
                let scaled: Args = terms.iter().map(|&t| self.mul([c, t])).collect();
                return self.add(scaled);
            }
        }

        let mut out = Args::new();
        if !coeff.is_one() {
            out.push(self.number(coeff));
        }
        out.extend(factors);
        self.intern(ExprNode::Mul(out))
    }

    /// Canonical power `base^exp`.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        let exp_value = self.as_number(exp);
        let base_value = self.as_number(base);

        match &exp_value {
            Some(e) if e.is_zero() => return self.one(),
            Some(e) if e.is_one() => return base,
            _ => {}
        }
        if base_value.as_ref().is_some_and(Number::is_one) {
            return self.one();
        }
        let exp_int = exp_value.as_ref().and_then(|n| n.as_integer());

        if let (Some(b), Some(k)) = (&base_value, exp_int) {
            if let Some(value) = b.pow(k) {
                return self.number(value);
            }
        }
        if base_value.as_ref().is_some_and(Number::is_zero)
            && exp_value.as_ref().is_some_and(Number::is_positive)
        {
            return self.zero();
        }

        if let Some(k) = exp_int {
            match self.get(base).clone() {
                ExprNode::Constant(Constant::I) => return self.i_power(k),
                ExprNode::Pow {
                    base: inner,
                    exp: inner_exp,
                } => {
                    let e = self.mul([inner_exp, exp]);
                    return self.pow(inner, e);
                }
                ExprNode::Mul(args) => {
                    let parts: Args = args.iter().map(|&a| self.pow(a, exp)).collect();
                    return self.mul(parts);
                }
                ExprNode::Exp(arg) => {
                    let scaled = self.mul([exp, arg]);
                    return self.exp(scaled);
                }
                _ => {}
            }
        }

        self.intern(ExprNode::Pow { base, exp })
    }

    /// `I^k` reduced modulo 4.
    fn i_power(&mut self, k: i64) -> ExprHandle {
        match k.rem_euclid(4) {
            0 => self.one(),
            1 => self.imaginary_unit(),
            2 => self.integer(-1),
            _ => {
                let minus_one = self.integer(-1);
                let i = self.imaginary_unit();
                self.intern(ExprNode::Mul(smallvec::smallvec![minus_one, i]))
            }
        }
    }

    /// `-expr`.
    pub fn neg(&mut self, expr: ExprHandle) -> ExprHandle {
        let minus_one = self.integer(-1);
        self.mul([minus_one, expr])
    }

    /// `a - b`.
    pub fn sub(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let nb = self.neg(b);
        self.add([a, nb])
    }

    /// `num / den`.
    pub fn div(&mut self, num: ExprHandle, den: ExprHandle) -> ExprHandle {
        let minus_one = self.integer(-1);
        let inv = self.pow(den, minus_one);
        self.mul([num, inv])
    }

    /// `1 / expr`.
    pub fn recip(&mut self, expr: ExprHandle) -> ExprHandle {
        let minus_one = self.integer(-1);
        self.pow(expr, minus_one)
    }

    /// `2*pi*I`, the factor that recurs in every transform pair.
    pub fn two_pi_i(&mut self) -> ExprHandle {
        let two = self.integer(2);
        let pi = self.pi();
        let i = self.imaginary_unit();
        self.mul([two, pi, i])
    }

    /// Canonical exponential.
    pub fn exp(&mut self, arg: ExprHandle) -> ExprHandle {
        if self.is_zero(arg) {
            return self.one();
        }
        if let ExprNode::Function {
            id: functions::LN,
            arg: inner,
        } = self.get(arg)
        {
            return *inner;
        }
        if let Some(q) = self.i_pi_multiple(arg) {
            if let Some(k) = (q * Number::integer(2)).as_integer() {
                return self.i_power(k);
            }
        }
        self.intern(ExprNode::Exp(arg))
    }

    /// If `expr` is `q*I*pi` for a rational `q`, returns `q`.
    fn i_pi_multiple(&self, expr: ExprHandle) -> Option<Number> {
        let ExprNode::Mul(args) = self.get(expr) else {
            return None;
        };
        let mut q = Number::ONE;
        let (mut has_i, mut has_pi) = (false, false);
        for &arg in args {
            match self.get(arg) {
                ExprNode::Constant(Constant::I) => has_i = true,
                ExprNode::Constant(Constant::Pi) => has_pi = true,
                node => q = node.as_number()?.clone(),
            }
        }
        (has_i && has_pi && args.len() <= 3).then_some(q)
    }

    /// Applies an elementary function with its evaluation rules.
    pub fn function(&mut self, id: FunctionId, arg: ExprHandle) -> ExprHandle {
        match id {
            functions::SIN => self.sin(arg),
            functions::COS => self.cos(arg),
            functions::TAN => self.tan(arg),
            functions::LN => self.ln(arg),
            functions::ABS => self.abs(arg),
            functions::SIGN => self.sign(arg),
            _ => self.intern(ExprNode::Function { id, arg }),
        }
    }

    /// Sine, with `sin(-x) = -sin(x)`.
    pub fn sin(&mut self, arg: ExprHandle) -> ExprHandle {
        self.odd_function(functions::SIN, arg)
    }

    /// Cosine, with `cos(-x) = cos(x)`.
    pub fn cos(&mut self, arg: ExprHandle) -> ExprHandle {
        if self.is_zero(arg) {
            return self.one();
        }
        let arg = if self.leading_coefficient(arg).is_negative() {
            self.neg(arg)
        } else {
            arg
        };
        self.intern(ExprNode::Function {
            id: functions::COS,
            arg,
        })
    }

    /// Tangent, with `tan(-x) = -tan(x)`.
    pub fn tan(&mut self, arg: ExprHandle) -> ExprHandle {
        self.odd_function(functions::TAN, arg)
    }

    fn odd_function(&mut self, id: FunctionId, arg: ExprHandle) -> ExprHandle {
        if self.is_zero(arg) {
            return arg;
        }
        if self.leading_coefficient(arg).is_negative() {
            let pos = self.neg(arg);
            let f = self.intern(ExprNode::Function { id, arg: pos });
            return self.neg(f);
        }
        self.intern(ExprNode::Function { id, arg })
    }

    /// Natural logarithm.
    pub fn ln(&mut self, arg: ExprHandle) -> ExprHandle {
        if self.is_one(arg) {
            return self.zero();
        }
        if let ExprNode::Exp(inner) = *self.get(arg) {
            if self.is_real(inner) {
                return inner;
            }
        }
        self.intern(ExprNode::Function {
            id: functions::LN,
            arg,
        })
    }

    /// Absolute value.
    pub fn abs(&mut self, arg: ExprHandle) -> ExprHandle {
        if let Some(n) = self.as_number(arg) {
            return self.number(n.abs());
        }
        if self.is_positive(arg) {
            return arg;
        }
        match self.get(arg).clone() {
            ExprNode::Constant(Constant::I) => return self.one(),
            ExprNode::Mul(args) => {
                let parts: Args = args.iter().map(|&a| self.abs(a)).collect();
                return self.mul(parts);
            }
            ExprNode::Function {
                id: functions::ABS, ..
            } => return arg,
            ExprNode::Pow { base, exp } if self.as_number(exp).is_some() => {
                let b = self.abs(base);
                return self.pow(b, exp);
            }
            _ => {}
        }
        self.intern(ExprNode::Function {
            id: functions::ABS,
            arg,
        })
    }

    /// Sign of a real quantity.
    pub fn sign(&mut self, arg: ExprHandle) -> ExprHandle {
        if let Some(n) = self.as_number(arg) {
            return self.integer(n.signum());
        }
        if self.is_positive(arg) {
            return self.one();
        }
        if self.is_negative(arg) {
            return self.integer(-1);
        }
        match self.get(arg).clone() {
            ExprNode::Mul(args) if args.iter().all(|&a| self.is_real(a)) => {
                let parts: Args = args.iter().map(|&a| self.sign(a)).collect();
                return self.mul(parts);
            }
            ExprNode::Function {
                id: functions::SIGN, ..
            } => return arg,
            _ => {}
        }
        self.intern(ExprNode::Function {
            id: functions::SIGN,
            arg,
        })
    }

    /// Applies an abstract signal.
    pub fn signal(&mut self, id: SignalId, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Signal { id, arg })
    }

    /// The Dirac impulse `δ(arg)`.
    pub fn delta(&mut self, arg: ExprHandle) -> ExprHandle {
        self.delta_derivative(arg, 0)
    }

    /// The `order`-th derivative of the impulse, `δ⁽ⁿ⁾(arg)`.
    ///
    /// The impulse vanishes for arguments known to be nonzero, and the
    /// argument is oriented so that `δ⁽ⁿ⁾(-x)` and `(-1)ⁿ δ⁽ⁿ⁾(x)` intern
    /// identically.
    pub fn delta_derivative(&mut self, arg: ExprHandle, order: u32) -> ExprHandle {
        if self.is_positive(arg) || self.is_negative(arg) {
            return self.zero();
        }
        let negated = self.neg(arg);
        let own = self.negative_term_count(arg);
        let other = self.negative_term_count(negated);
        let flip = other < own || (other == own && negated.index() < arg.index());
        if !flip {
            return self.intern(ExprNode::Delta { arg, order });
        }
        let delta = self.intern(ExprNode::Delta {
            arg: negated,
            order,
        });
        if order % 2 == 1 {
            self.neg(delta)
        } else {
            delta
        }
    }

    fn negative_term_count(&self, expr: ExprHandle) -> usize {
        let terms: Args = match self.get(expr) {
            ExprNode::Add(args) => args.clone(),
            _ => smallvec::smallvec![expr],
        };
        terms
            .iter()
            .filter(|&&t| self.leading_coefficient(t).is_negative())
            .count()
    }

    /// The Heaviside step `u(arg)`, with `u(0) = 1/2`.
    pub fn step(&mut self, arg: ExprHandle) -> ExprHandle {
        if let Some(n) = self.as_number(arg) {
            return match n.signum() {
                1 => self.one(),
                -1 => self.zero(),
                _ => self.rational(1, 2),
            };
        }
        if self.is_positive(arg) {
            return self.one();
        }
        if self.is_negative(arg) {
            return self.zero();
        }
        self.intern(ExprNode::Step(arg))
    }

    /// Definite integral of `integrand` over `var` from `lower` to `upper`.
    pub fn integral(
        &mut self,
        integrand: ExprHandle,
        var: SymbolId,
        lower: ExprHandle,
        upper: ExprHandle,
    ) -> ExprHandle {
        if self.is_zero(integrand) || lower == upper {
            return self.zero();
        }
        self.intern(ExprNode::Integral {
            integrand,
            var,
            lower,
            upper,
        })
    }

    /// Integral over the whole real line.
    pub fn integral_over_reals(&mut self, integrand: ExprHandle, var: SymbolId) -> ExprHandle {
        let upper = self.infinity();
        let lower = self.neg(upper);
        self.integral(integrand, var, lower, upper)
    }

    // === Coefficient helpers ===

    /// Splits a canonical term into its numeric coefficient and the rest.
    pub fn split_coefficient(&mut self, term: ExprHandle) -> (Number, ExprHandle) {
        if let Some(n) = self.as_number(term) {
            return (n, self.one());
        }
        if let ExprNode::Mul(args) = self.get(term) {
            if let Some(n) = self.as_number(args[0]) {
                let rest: Args = args[1..].iter().copied().collect();
                let rest = if rest.len() == 1 {
                    rest[0]
                } else {
                    self.intern(ExprNode::Mul(rest))
                };
                return (n, rest);
            }
        }
        (Number::ONE, term)
    }

    /// The numeric coefficient of a canonical term (1 if there is none).
    #[must_use]
    pub fn leading_coefficient(&self, term: ExprHandle) -> Number {
        if let Some(n) = self.as_number(term) {
            return n;
        }
        match self.get(term) {
            ExprNode::Mul(args) => self.as_number(args[0]).unwrap_or(Number::ONE),
            _ => Number::ONE,
        }
    }

    fn scale_by(&mut self, c: Number, rest: ExprHandle) -> ExprHandle {
        if c.is_one() {
            return rest;
        }
        let c = self.number(c);
        self.mul([c, rest])
    }

    /// The additive terms of an expression (the expression itself if it is
    /// not a sum).
    #[must_use]
    pub fn terms(&self, expr: ExprHandle) -> SmallVec<[ExprHandle; 4]> {
        match self.get(expr) {
            ExprNode::Add(args) => args.clone(),
            _ => smallvec::smallvec![expr],
        }
    }

    /// The multiplicative factors of an expression (the expression itself
    /// if it is not a product).
    #[must_use]
    pub fn factors(&self, expr: ExprHandle) -> SmallVec<[ExprHandle; 4]> {
        match self.get(expr) {
            ExprNode::Mul(args) => args.clone(),
            _ => smallvec::smallvec![expr],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_collects_like_terms() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let three = arena.integer(3);
        let two_x = arena.mul([two, x]);
        let three_x = arena.mul([three, x]);
        let sum = arena.add([two_x, three_x]);

        let five = arena.integer(5);
        assert_eq!(sum, arena.mul([five, x]));
    }

    #[test]
    fn test_add_is_order_independent() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let one = arena.one();
        let a = arena.add([x, y, one]);
        let b = arena.add([one, y, x]);
        assert_eq!(a, b);
        assert_eq!(arena.terms(a)[0], one);
    }

    #[test]
    fn test_cancellation_gives_zero() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let diff = arena.sub(x, x);
        assert!(arena.is_zero(diff));
        let ratio = arena.div(x, x);
        assert!(arena.is_one(ratio));
    }

    #[test]
    fn test_mul_combines_bases() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sq = arena.mul([x, x]);
        let two = arena.integer(2);
        assert_eq!(sq, arena.pow(x, two));
    }

    #[test]
    fn test_imaginary_unit_powers() {
        let mut arena = ExprArena::new();
        let i = arena.imaginary_unit();
        let i2 = arena.mul([i, i]);
        assert_eq!(i2, arena.integer(-1));

        let inv = arena.recip(i);
        let minus_i = arena.neg(i);
        assert_eq!(inv, minus_i);
    }

    #[test]
    fn test_exponentials_merge() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let ex = arena.exp(x);
        let ey = arena.exp(y);
        let prod = arena.mul([ex, ey]);
        let sum = arena.add([x, y]);
        assert_eq!(prod, arena.exp(sum));

        let nx = arena.neg(x);
        let enx = arena.exp(nx);
        let __v = arena.mul([ex, enx]);
        assert!(arena.is_one(__v));
    }

    #[test]
    fn test_exp_of_i_pi() {
        let mut arena = ExprArena::new();
        let i = arena.imaginary_unit();
        let pi = arena.pi();
        let arg = arena.mul([i, pi]);
        assert_eq!(arena.exp(arg), arena.integer(-1));

        let half = arena.rational(1, 2);
        let arg = arena.mul([half, i, pi]);
        assert_eq!(arena.exp(arg), i);
    }

    #[test]
    fn test_number_distributes_over_sum() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let sum = arena.add([x, one]);
        let neg = arena.neg(sum);

        let nx = arena.neg(x);
        let minus_one = arena.integer(-1);
        assert_eq!(neg, arena.add([nx, minus_one]));
    }

    #[test]
    fn test_abs_and_sign_use_assumptions() {
        let mut arena = ExprArena::new();
        let a = arena.positive_symbol("a");
        let minus_three = arena.integer(-3);
        let prod = arena.mul([minus_three, a]);

        let three = arena.integer(3);
        assert_eq!(arena.abs(prod), arena.mul([three, a]));
        assert_eq!(arena.sign(prod), arena.integer(-1));

        let x = arena.symbol("x");
        let sx = arena.sign(x);
        assert!(matches!(arena.get(sx), ExprNode::Function { .. }));
    }

    #[test]
    fn test_delta_orientation() {
        let mut arena = ExprArena::new();
        let f = arena.real_symbol("f");
        let a = arena.positive_symbol("a");
        let f_minus_a = arena.sub(f, a);
        let a_minus_f = arena.sub(a, f);

        assert_eq!(arena.delta(f_minus_a), arena.delta(a_minus_f));

        let d1 = arena.delta_derivative(f, 1);
        let nf = arena.neg(f);
        let d1_neg = arena.delta_derivative(nf, 1);
        assert_eq!(d1_neg, arena.neg(d1));
    }

    #[test]
    fn test_delta_vanishes_away_from_origin() {
        let mut arena = ExprArena::new();
        let a = arena.positive_symbol("a");
        let __v = arena.delta(a);
        assert!(arena.is_zero(__v));
        let two = arena.integer(2);
        let __v = arena.delta(two);
        assert!(arena.is_zero(__v));
    }

    #[test]
    fn test_step_of_numbers() {
        let mut arena = ExprArena::new();
        let zero = arena.zero();
        let minus = arena.integer(-2);
        assert_eq!(arena.step(zero), arena.rational(1, 2));
        let __v = arena.step(minus);
        assert!(arena.is_zero(__v));
    }

    #[test]
    fn test_trig_parity() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let nx = arena.neg(x);
        assert_eq!(arena.cos(nx), arena.cos(x));
        let sx = arena.sin(x);
        assert_eq!(arena.sin(nx), arena.neg(sx));
    }

    #[test]
    fn test_power_of_product_distributes_for_integers() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let xy = arena.mul([x, y]);
        let two = arena.integer(2);
        let sq = arena.pow(xy, two);
        let x2 = arena.pow(x, two);
        let y2 = arena.pow(y, two);
        assert_eq!(sq, arena.mul([x2, y2]));
    }

    #[test]
    fn test_coefficients_past_i64_fold_to_one_leaf() {
        let mut arena = ExprArena::new();
        let big = arena.integer(1 << 62);
        let four = arena.integer(4);
        let x = arena.mul([big, four]);
        let y = arena.mul([four, big]);

        assert_eq!(x, y);
        assert!(arena.get(x).is_number());
        assert_eq!(arena.display(x).to_string(), "18446744073709551616");
        let __v = arena.sub(x, y);
        assert!(arena.is_zero(__v));

        let two = arena.integer(2);
        let doubled = arena.add([x, x]);
        assert_eq!(doubled, arena.mul([two, x]));
    }

    #[test]
    fn test_large_coefficients_still_collect_like_terms() {
        let mut arena = ExprArena::new();
        let t = arena.symbol("t");
        let big = arena.integer(i64::MAX);
        let big_t = arena.mul([big, t]);
        let sum = arena.add([big_t, big_t, t]);

        let (c, rest) = arena.split_coefficient(sum);
        assert_eq!(rest, t);
        assert_eq!(c.to_string(), "18446744073709551615");
        let __v = arena.sub(sum, sum);
        assert!(arena.is_zero(__v));
    }
}
