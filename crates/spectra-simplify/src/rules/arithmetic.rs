//! Basic algebraic simplification rules.

use egg::{rewrite, Rewrite};

use crate::language::SpectraLang;

/// Returns basic arithmetic rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<SpectraLang, ()>> {
    vec![
        // Additive identity
        rewrite!("add-zero"; "(+ ?a 0)" => "?a"),

        // Multiplicative identity and zero
        rewrite!("mul-one"; "(* ?a 1)" => "?a"),
        rewrite!("mul-zero"; "(* ?a 0)" => "0"),

        // Negation
        rewrite!("neg-neg"; "(neg (neg ?a))" => "?a"),
        rewrite!("neg-zero"; "(neg 0)" => "0"),
        rewrite!("add-neg-self"; "(+ ?a (neg ?a))" => "0"),
        rewrite!("sub-to-add"; "(- ?a ?b)" => "(+ ?a (neg ?b))"),
        rewrite!("neg-mul"; "(* (neg ?a) ?b)" => "(neg (* ?a ?b))"),
        rewrite!("neg-mul-fold"; "(neg (* ?a ?b))" => "(* (neg ?a) ?b)"),

        // Commutativity
        rewrite!("add-comm"; "(+ ?a ?b)" => "(+ ?b ?a)"),
        rewrite!("mul-comm"; "(* ?a ?b)" => "(* ?b ?a)"),

        // Associativity
        rewrite!("add-assoc"; "(+ (+ ?a ?b) ?c)" => "(+ ?a (+ ?b ?c))"),
        rewrite!("mul-assoc"; "(* (* ?a ?b) ?c)" => "(* ?a (* ?b ?c))"),

        // Factoring a shared coefficient
        rewrite!("factor"; "(+ (* ?a ?b) (* ?a ?c))" => "(* ?a (+ ?b ?c))"),

        // The imaginary unit
        rewrite!("i-squared"; "(* I I)" => "(neg 1)"),

        // Power rules
        rewrite!("pow-zero"; "(^ ?a 0)" => "1"),
        rewrite!("pow-one"; "(^ ?a 1)" => "?a"),

        // Division rules
        rewrite!("div-one"; "(/ ?a 1)" => "?a"),
    ]
}
