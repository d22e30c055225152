//! Infix rendering of expressions.

use std::fmt;

use dashu::integer::{IBig, UBig};

use crate::arena::ExprArena;
use crate::expr::{functions, Constant, ExprNode};
use crate::handle::ExprHandle;
use crate::number::Number;

const ADD: u8 = 1;
const MUL: u8 = 2;
const POW: u8 = 3;
const ATOM: u8 = 4;

/// Borrowed view of an expression that implements [`fmt::Display`].
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    expr: ExprHandle,
}

impl ExprArena {
    /// Renders `expr` in infix notation, e.g. `DiracDelta(f - a)/2`.
    #[must_use]
    pub fn display(&self, expr: ExprHandle) -> ExprDisplay<'_> {
        ExprDisplay { arena: self, expr }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, self.expr, 0)
    }
}

impl ExprDisplay<'_> {
    fn precedence(&self, expr: ExprHandle) -> u8 {
        match self.arena.get(expr) {
            ExprNode::Number(n) if n.is_negative() => ADD,
            ExprNode::Number(n) if !n.is_integer() => MUL,
            ExprNode::Add(_) => ADD,
            ExprNode::Mul(_) if self.arena.leading_coefficient(expr).is_negative() => ADD,
            ExprNode::Mul(_) => MUL,
            ExprNode::Pow { exp, .. } if self.negative_exponent(*exp).is_some() => MUL,
            ExprNode::Pow { .. } => POW,
            _ => ATOM,
        }
    }

    fn negative_exponent(&self, exp: ExprHandle) -> Option<Number> {
        self.arena
            .as_number(exp)
            .filter(Number::is_negative)
            .map(|n| -n)
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, expr: ExprHandle, min_prec: u8) -> fmt::Result {
        if self.precedence(expr) < min_prec {
            f.write_str("(")?;
            self.write_bare(f, expr)?;
            f.write_str(")")
        } else {
            self.write_bare(f, expr)
        }
    }

    fn write_bare(&self, f: &mut fmt::Formatter<'_>, expr: ExprHandle) -> fmt::Result {
        match self.arena.get(expr) {
            ExprNode::Number(n) => write!(f, "{n}"),
            ExprNode::Constant(Constant::I) => f.write_str("I"),
            ExprNode::Constant(Constant::Pi) => f.write_str("pi"),
            ExprNode::Constant(Constant::Infinity) => f.write_str("oo"),
            ExprNode::Symbol(id) => f.write_str(self.arena.symbol_name(*id).unwrap_or("?")),
            ExprNode::Add(args) => self.write_sum(f, args),
            ExprNode::Mul(args) => self.write_product(f, args, false),
            ExprNode::Pow { base, exp } => {
                if self.negative_exponent(*exp).is_some() {
                    return self.write_product(f, &[expr], false);
                }
                self.write(f, *base, ATOM)?;
                f.write_str("^")?;
                let plain = self
                    .arena
                    .as_number(*exp)
                    .is_some_and(|n| n.is_integer())
                    || self.precedence(*exp) == ATOM;
                if plain {
                    self.write_bare(f, *exp)
                } else {
                    f.write_str("(")?;
                    self.write_bare(f, *exp)?;
                    f.write_str(")")
                }
            }
            ExprNode::Exp(arg) => self.write_call(f, "exp", *arg),
            ExprNode::Function { id, arg } => self.write_call(f, functions::name(*id), *arg),
            ExprNode::Signal { id, arg } => {
                let name = self
                    .arena
                    .signal_info(*id)
                    .map_or("?", |info| info.name.as_str());
                self.write_call(f, name, *arg)
            }
            ExprNode::Delta { arg, order } => {
                f.write_str("DiracDelta(")?;
                self.write(f, *arg, 0)?;
                if *order > 0 {
                    write!(f, ", {order}")?;
                }
                f.write_str(")")
            }
            ExprNode::Step(arg) => self.write_call(f, "Heaviside", *arg),
            ExprNode::Integral {
                integrand,
                var,
                lower,
                upper,
            } => {
                f.write_str("Integral(")?;
                self.write(f, *integrand, 0)?;
                write!(f, ", ({}, ", self.arena.symbol_name(*var).unwrap_or("?"))?;
                self.write(f, *lower, 0)?;
                f.write_str(", ")?;
                self.write(f, *upper, 0)?;
                f.write_str("))")
            }
        }
    }

    fn write_call(&self, f: &mut fmt::Formatter<'_>, name: &str, arg: ExprHandle) -> fmt::Result {
        write!(f, "{name}(")?;
        self.write(f, arg, 0)?;
        f.write_str(")")
    }

    fn write_sum(&self, f: &mut fmt::Formatter<'_>, args: &[ExprHandle]) -> fmt::Result {
        // Numbers first in canonical order; print them last.
        let ordered = args
            .iter()
            .filter(|&&a| !self.arena.get(a).is_number())
            .chain(args.iter().filter(|&&a| self.arena.get(a).is_number()));
        for (k, &term) in ordered.enumerate() {
            let negative = self.arena.leading_coefficient(term).is_negative();
            match (k, negative) {
                (0, _) => self.write(f, term, ADD)?,
                (_, true) => {
                    f.write_str(" - ")?;
                    self.write_negated(f, term)?;
                }
                (_, false) => {
                    f.write_str(" + ")?;
                    self.write(f, term, MUL)?;
                }
            }
        }
        Ok(())
    }

    fn write_negated(&self, f: &mut fmt::Formatter<'_>, term: ExprHandle) -> fmt::Result {
        match self.arena.get(term) {
            ExprNode::Mul(args) => self.write_product(f, args, true),
            ExprNode::Number(n) => write!(f, "{}", n.abs()),
            _ => self.write(f, term, MUL),
        }
    }

    /// Writes a product as `coeff*num/den`, flipping the sign if `negate`.
    fn write_product(
        &self,
        f: &mut fmt::Formatter<'_>,
        args: &[ExprHandle],
        negate: bool,
    ) -> fmt::Result {
        let mut coeff = Number::ONE;
        let mut numer = Vec::new();
        let mut denom = Vec::new();
        for &arg in args {
            if let Some(n) = self.arena.as_number(arg) {
                coeff = coeff * n;
                continue;
            }
            match self.arena.get(arg) {
                ExprNode::Pow { base, exp } => match self.negative_exponent(*exp) {
                    Some(e) => denom.push((*base, e)),
                    None => numer.push(arg),
                },
                _ => numer.push(arg),
            }
        }

        if coeff.is_negative() != negate {
            f.write_str("-")?;
        }
        let magnitude = coeff.abs();
        let c_num = magnitude.numer();
        let c_den = magnitude.denom();

        let mut first = true;
        if *c_num != IBig::ONE || numer.is_empty() {
            write!(f, "{c_num}")?;
            first = false;
        }
        for &factor in &numer {
            if !first {
                f.write_str("*")?;
            }
            self.write(f, factor, MUL)?;
            first = false;
        }

        let count = usize::from(*c_den != UBig::ONE) + denom.len();
        if count == 0 {
            return Ok(());
        }
        f.write_str("/")?;
        if count > 1 {
            f.write_str("(")?;
        }
        let mut first = true;
        if *c_den != UBig::ONE {
            write!(f, "{c_den}")?;
            first = false;
        }
        for (base, exp) in &denom {
            let base = *base;
            if !first {
                f.write_str("*")?;
            }
            first = false;
            if exp.is_one() {
                self.write(f, base, if count > 1 { MUL } else { ATOM })?;
            } else {
                self.write(f, base, ATOM)?;
                match exp.as_integer() {
                    Some(k) => write!(f, "^{k}")?,
                    None => write!(f, "^({exp})")?,
                }
            }
        }
        if count > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}
