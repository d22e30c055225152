//! Trigonometric simplification rules.
//!
//! Besides the usual identities this recombines exponential pairs into
//! sinusoids: `e^{y} + e^{-y} = 2 cos(-iy)` and
//! `e^{y} - e^{-y} = 2i sin(-iy)`.

use egg::{rewrite, Rewrite};

use crate::language::SpectraLang;

/// Returns trigonometric rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<SpectraLang, ()>> {
    vec![
        // Pythagorean identity: sin²(x) + cos²(x) = 1
        rewrite!("pythag"; "(+ (^ (sin ?x) 2) (^ (cos ?x) 2))" => "1"),

        // sin(0) = 0, cos(0) = 1
        rewrite!("sin-zero"; "(sin 0)" => "0"),
        rewrite!("cos-zero"; "(cos 0)" => "1"),

        // Parity
        rewrite!("sin-neg"; "(sin (neg ?x))" => "(neg (sin ?x))"),
        rewrite!("cos-neg"; "(cos (neg ?x))" => "(cos ?x)"),

        // Exponential pairs
        rewrite!("cos-from-exp";
            "(+ (exp ?y) (exp (neg ?y)))" => "(* 2 (cos (* (neg I) ?y)))"),
        rewrite!("sin-from-exp";
            "(+ (exp ?y) (neg (exp (neg ?y))))" => "(* (* 2 I) (sin (* (neg I) ?y)))"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg::{AstSize, Extractor, Runner};

    #[test]
    fn test_pythag() {
        let rules = rules();
        let start = "(+ (^ (sin x) 2) (^ (cos x) 2))".parse().unwrap();
        let runner = Runner::default().with_expr(&start).run(&rules);
        let extractor = Extractor::new(&runner.egraph, AstSize);
        let (_, best) = extractor.find_best(runner.roots[0]);
        assert_eq!(best.to_string(), "1");
    }
}
