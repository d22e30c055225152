//! Expression node types.
//!
//! The node set is closed: every consumer dispatches with an exhaustive
//! `match`, so adding a variant is a compile-time checklist of the places
//! that must learn about it.

use smallvec::SmallVec;

use crate::handle::ExprHandle;
use crate::number::Number;

/// Unique identifier for a symbol.
pub type SymbolId = u32;

/// Unique identifier for an elementary function (see [`functions`]).
pub type FunctionId = u32;

/// Unique identifier for a declared abstract signal.
pub type SignalId = u32;

/// Distinguished mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// The imaginary unit.
    I,
    /// π.
    Pi,
    /// Positive real infinity, used for integration limits.
    Infinity,
}

/// The domain assumption carried by a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolDomain {
    /// No assumption.
    #[default]
    Complex,
    /// Real valued.
    Real,
    /// Strictly positive real.
    Positive,
}

impl SymbolDomain {
    /// Returns true if the symbol is known to be real.
    #[must_use]
    pub fn is_real(self) -> bool {
        matches!(self, SymbolDomain::Real | SymbolDomain::Positive)
    }
}

/// Interned symbol metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolInfo {
    /// Printed name.
    pub name: String,
    /// Domain assumption.
    pub domain: SymbolDomain,
}

/// A declared abstract signal and its dual-domain partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalInfo {
    /// Printed name, e.g. `v`.
    pub name: String,
    /// The signal this one maps to under a transform, e.g. `V`.
    pub dual: SignalId,
}

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// An exact rational literal, integers included.
    Number(Number),

    /// A mathematical constant.
    Constant(Constant),

    /// A symbolic variable.
    Symbol(SymbolId),

    // === Compound Expressions ===
    /// Sum of expressions.
    ///
    /// Invariant: at least 2 arguments, none of them a sum, at most one
    /// number (placed first).
    Add(SmallVec<[ExprHandle; 4]>),

    /// Product of expressions.
    ///
    /// Invariant: at least 2 arguments, none of them a product, at most
    /// one number (placed first), at most one exponential.
    Mul(SmallVec<[ExprHandle; 4]>),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// The natural exponential.
    Exp(ExprHandle),

    /// A unary elementary function.
    Function {
        /// The function identifier.
        id: FunctionId,
        /// The argument.
        arg: ExprHandle,
    },

    /// An abstract signal applied to an argument, e.g. `v(2*t - 1)`.
    Signal {
        /// The declared signal.
        id: SignalId,
        /// The argument.
        arg: ExprHandle,
    },

    /// The Dirac impulse or its `order`-th derivative.
    Delta {
        /// The argument.
        arg: ExprHandle,
        /// Derivative order; 0 is the impulse itself.
        order: u32,
    },

    /// The Heaviside unit step.
    Step(ExprHandle),

    /// A definite integral.
    Integral {
        /// The integrand.
        integrand: ExprHandle,
        /// The bound variable.
        var: SymbolId,
        /// Lower limit.
        lower: ExprHandle,
        /// Upper limit.
        upper: ExprHandle,
    },
}

impl ExprNode {
    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Number(_) | ExprNode::Constant(_) | ExprNode::Symbol(_)
        )
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Number(_))
    }

    /// Returns true if this is the integer zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, ExprNode::Number(n) if n.is_zero())
    }

    /// Returns true if this is the integer one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, ExprNode::Number(n) if n.is_one())
    }

    /// Returns the numeric value of a literal.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            ExprNode::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the children of this node.
    ///
    /// The bound variable of an integral is not a child.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 4]> {
        match self {
            ExprNode::Number(_) | ExprNode::Constant(_) | ExprNode::Symbol(_) => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Exp(arg)
            | ExprNode::Function { arg, .. }
            | ExprNode::Signal { arg, .. }
            | ExprNode::Delta { arg, .. }
            | ExprNode::Step(arg) => smallvec::smallvec![*arg],
            ExprNode::Integral {
                integrand,
                lower,
                upper,
                ..
            } => smallvec::smallvec![*integrand, *lower, *upper],
        }
    }
}

/// Standard function identifiers.
pub mod functions {
    use super::FunctionId;

    /// Sine function.
    pub const SIN: FunctionId = 0;
    /// Cosine function.
    pub const COS: FunctionId = 1;
    /// Tangent function.
    pub const TAN: FunctionId = 2;
    /// Natural logarithm.
    pub const LN: FunctionId = 3;
    /// Absolute value.
    pub const ABS: FunctionId = 4;
    /// Sign of a real number (-1, 0, 1).
    pub const SIGN: FunctionId = 5;

    /// Printed name of a function.
    #[must_use]
    pub fn name(id: FunctionId) -> &'static str {
        match id {
            SIN => "sin",
            COS => "cos",
            TAN => "tan",
            LN => "ln",
            ABS => "abs",
            SIGN => "sign",
            _ => "unknown",
        }
    }

    /// Returns true for sin, cos and tan.
    #[must_use]
    pub fn is_trig(id: FunctionId) -> bool {
        matches!(id, SIN | COS | TAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(ExprNode::Number(Number::integer(42)).is_atom());
        assert!(ExprNode::Constant(Constant::Pi).is_atom());
        assert!(!ExprNode::Step(ExprHandle::new(0)).is_atom());
    }

    #[test]
    fn test_as_number() {
        let three = ExprNode::Number(Number::integer(3));
        assert_eq!(three.as_number(), Some(&Number::integer(3)));
        assert!(!three.is_one());
        assert!(ExprNode::Number(Number::ONE).is_one());
        assert_eq!(ExprNode::Symbol(0).as_number(), None);
    }

    #[test]
    fn test_integral_children_skip_bound_variable() {
        let node = ExprNode::Integral {
            integrand: ExprHandle::new(1),
            var: 9,
            lower: ExprHandle::new(2),
            upper: ExprHandle::new(3),
        };
        assert_eq!(node.children().len(), 3);
    }
}
