//! Structural sign and reality queries.
//!
//! These are conservative: `true` means the property is proven from
//! symbol domains and node structure, `false` means "not known".

use crate::arena::ExprArena;
use crate::expr::{functions, Constant, ExprNode};
use crate::handle::ExprHandle;

impl ExprArena {
    /// Returns true if `expr` is known to be real.
    #[must_use]
    pub fn is_real(&self, expr: ExprHandle) -> bool {
        match self.get(expr) {
            ExprNode::Number(_) => true,
            ExprNode::Constant(c) => matches!(c, Constant::Pi | Constant::Infinity),
            ExprNode::Symbol(id) => self
                .symbol_info(*id)
                .is_some_and(|info| info.domain.is_real()),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.iter().all(|&a| self.is_real(a)),
            ExprNode::Pow { base, exp } => {
                let integer_exp = self
                    .as_number(*exp)
                    .is_some_and(|n| n.is_integer());
                (self.is_real(*base) && integer_exp)
                    || (self.is_positive(*base) && self.is_real(*exp))
            }
            ExprNode::Exp(arg) | ExprNode::Step(arg) | ExprNode::Delta { arg, .. } => {
                self.is_real(*arg)
            }
            ExprNode::Function { id, arg } => match *id {
                functions::ABS => true,
                functions::SIN | functions::COS | functions::SIGN => self.is_real(*arg),
                functions::LN => self.is_positive(*arg),
                _ => false,
            },
            ExprNode::Signal { .. } | ExprNode::Integral { .. } => false,
        }
    }

    /// Returns true if `expr` is known to be strictly positive.
    #[must_use]
    pub fn is_positive(&self, expr: ExprHandle) -> bool {
        match self.get(expr) {
            ExprNode::Number(n) => n.is_positive(),
            ExprNode::Constant(c) => matches!(c, Constant::Pi | Constant::Infinity),
            ExprNode::Symbol(id) => self
                .symbol_info(*id)
                .is_some_and(|info| info.domain == crate::expr::SymbolDomain::Positive),
            ExprNode::Add(args) | ExprNode::Mul(args)
                if args.iter().all(|&a| self.is_positive(a)) =>
            {
                true
            }
            ExprNode::Mul(args) => self.negative_factor_parity(args) == Some(0),
            ExprNode::Pow { base, exp } => self.is_positive(*base) && self.is_real(*exp),
            ExprNode::Exp(arg) => self.is_real(*arg),
            _ => false,
        }
    }

    /// Returns true if `expr` is known to be strictly negative.
    #[must_use]
    pub fn is_negative(&self, expr: ExprHandle) -> bool {
        match self.get(expr) {
            ExprNode::Number(n) => n.is_negative(),
            ExprNode::Add(args) => args.iter().all(|&a| self.is_negative(a)),
            ExprNode::Mul(args) => self.negative_factor_parity(args) == Some(1),
            _ => false,
        }
    }

    /// Returns true if `expr` is known to be nonzero.
    #[must_use]
    pub fn is_nonzero(&self, expr: ExprHandle) -> bool {
        match self.get(expr) {
            ExprNode::Number(n) => !n.is_zero(),
            ExprNode::Constant(_) | ExprNode::Exp(_) => true,
            ExprNode::Mul(args) => args.iter().all(|&a| self.is_nonzero(a)),
            ExprNode::Pow { base, .. } => self.is_nonzero(*base),
            _ => self.is_positive(expr) || self.is_negative(expr),
        }
    }

    /// Parity of the count of negative factors when every factor has a
    /// known sign.
    fn negative_factor_parity(&self, args: &[ExprHandle]) -> Option<usize> {
        let mut negatives = 0;
        for &a in args {
            if self.is_negative(a) {
                negatives += 1;
            } else if !self.is_positive(a) {
                return None;
            }
        }
        Some(negatives % 2)
    }
}
