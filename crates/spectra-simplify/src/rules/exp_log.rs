//! Exponential and logarithmic simplification rules.

use egg::{rewrite, Rewrite};

use crate::language::SpectraLang;

/// Returns exponential and logarithmic rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<SpectraLang, ()>> {
    vec![
        // exp(0) = 1
        rewrite!("exp-zero"; "(exp 0)" => "1"),

        // ln(1) = 0
        rewrite!("ln-one"; "(ln 1)" => "0"),

        // exp(ln(x)) = x
        rewrite!("exp-ln"; "(exp (ln ?x))" => "?x"),

        // exp(a) * exp(b) = exp(a + b)
        rewrite!("exp-add-fold"; "(* (exp ?a) (exp ?b))" => "(exp (+ ?a ?b))"),

        // exp(a) * exp(-a) = 1
        rewrite!("exp-cancel"; "(* (exp ?a) (exp (neg ?a)))" => "1"),
    ]
}
