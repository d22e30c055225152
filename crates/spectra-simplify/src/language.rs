//! The expression language for egg-based simplification.
//!
//! Arena symbols appear as `s<id>`, signal heads as `fn<id>`, and the
//! constants as `I`, `pi` and `oo`. Literals are exact nonnegative
//! rationals such as `3/2`; a negative literal is `(neg 3/2)`.

use egg::{define_language, Id, Symbol};
use spectra_core::Number;

/// Prefix of an encoded arena symbol.
pub const SYMBOL_PREFIX: &str = "s";
/// Prefix of an encoded signal head.
pub const SIGNAL_PREFIX: &str = "fn";

define_language! {
    /// The symbolic expression language for Spectra.
    pub enum SpectraLang {
        // Numeric literals
        Num(Number),
        // Variables, constants and signal heads
        Symbol(Symbol),

        // Basic arithmetic
        "+" = Add([Id; 2]),
        "-" = Sub([Id; 2]),
        "*" = Mul([Id; 2]),
        "/" = Div([Id; 2]),
        "neg" = Neg(Id),
        "^" = Pow([Id; 2]),

        // Elementary functions
        "exp" = Exp(Id),
        "ln" = Ln(Id),
        "sin" = Sin(Id),
        "cos" = Cos(Id),
        "tan" = Tan(Id),
        "abs" = Abs(Id),
        "sign" = Sign(Id),

        // Generalized functions: (delta arg order), (step arg)
        "delta" = Delta([Id; 2]),
        "step" = Step(Id),

        // (apply head arg) and (integral body var lower upper)
        "apply" = Apply([Id; 2]),
        "integral" = Integral([Id; 4]),
    }
}

impl SpectraLang {
    /// Returns true if this node is a number.
    #[must_use]
    pub fn is_num(&self) -> bool {
        matches!(self, SpectraLang::Num(_))
    }

    /// Extracts the numeric value if this is a number.
    #[must_use]
    pub fn as_num(&self) -> Option<&Number> {
        match self {
            SpectraLang::Num(n) => Some(n),
            _ => None,
        }
    }
}
