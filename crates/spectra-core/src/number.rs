//! Exact rational coefficients.
//!
//! Numeric leaves of the expression tree are arbitrary precision
//! rationals, so folding a sum or product never overflows and every
//! numeric part of a canonical expression collapses to one leaf.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};

/// Integer powers above this magnitude are left symbolic.
pub const MAX_EXACT_EXPONENT: u64 = 4096;

/// An arbitrary precision rational number.
///
/// Always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Number(RBig);

impl Number {
    /// Zero.
    pub const ZERO: Number = Number(RBig::ZERO);
    /// One.
    pub const ONE: Number = Number(RBig::ONE);
    /// Minus one.
    pub const MINUS_ONE: Number = Number(RBig::NEG_ONE);

    /// An integer.
    #[must_use]
    pub fn integer(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Builds `num / den`, reducing to lowest terms.
    ///
    /// Returns `None` if `den` is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let num = if den < 0 {
            -IBig::from(num)
        } else {
            IBig::from(num)
        };
        Some(Self(RBig::from_parts(num, UBig::from(den.unsigned_abs()))))
    }

    /// The numerator.
    #[must_use]
    pub fn numer(&self) -> &IBig {
        self.0.numerator()
    }

    /// The (positive) denominator.
    #[must_use]
    pub fn denom(&self) -> &UBig {
        self.0.denominator()
    }

    /// Returns true if the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Returns the value as an `i64` if it is an integer in range.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        if self.is_integer() {
            self.0.numerator().clone().try_into().ok()
        } else {
            None
        }
    }

    /// Returns true for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true for one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    /// Returns true for values below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true for values above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Sign as `-1`, `0` or `1`.
    #[must_use]
    pub fn signum(&self) -> i64 {
        if self.is_zero() {
            0
        } else if self.is_positive() {
            1
        } else {
            -1
        }
    }

    /// `1 / self`, or `None` for zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        (!self.is_zero()).then(|| Self(self.0.clone().inv()))
    }

    /// Integer power.
    ///
    /// Returns `None` for a negative power of zero and for exponents
    /// larger than [`MAX_EXACT_EXPONENT`] in magnitude.
    #[must_use]
    pub fn pow(&self, exp: i64) -> Option<Self> {
        let magnitude = exp.unsigned_abs();
        if magnitude > MAX_EXACT_EXPONENT {
            return None;
        }
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let magnitude = usize::try_from(magnitude).ok()?;
        Some(Self(base.0.pow(magnitude)))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

/// Parses `p` or `p/q` in decimal.
impl FromStr for Number {
    type Err = <RBig as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Number {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({self})")
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Number> for Number {
    type Output = Self;

    fn add(self, rhs: &Number) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: Self) -> Self::Output {
        Number(&self.0 + &rhs.0)
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, rhs: Self) -> Self::Output {
        Number(&self.0 - &rhs.0)
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Number> for Number {
    type Output = Self;

    fn mul(self, rhs: &Number) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: Self) -> Self::Output {
        Number(&self.0 * &rhs.0)
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        Number(-self.0.clone())
    }
}
