//! Property-based tests for canonical construction.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{ExprArena, ExprHandle, Number};

    // Strategy for monomials c * x^i * y^j
    fn monomial() -> impl Strategy<Value = (i64, i64, i64)> {
        (
            prop_oneof![(-50i64..=-1i64), (1i64..=50i64)],
            0i64..4,
            0i64..4,
        )
    }

    fn build(arena: &mut ExprArena, (c, i, j): (i64, i64, i64)) -> ExprHandle {
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let c = arena.integer(c);
        let i = arena.integer(i);
        let j = arena.integer(j);
        let xi = arena.pow(x, i);
        let yj = arena.pow(y, j);
        arena.mul([c, xi, yj])
    }

    proptest! {
        #[test]
        fn add_commutative(a in monomial(), b in monomial()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, a);
            let b = build(&mut arena, b);
            prop_assert_eq!(arena.add([a, b]), arena.add([b, a]));
        }

        #[test]
        fn add_associative(a in monomial(), b in monomial(), c in monomial()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, a);
            let b = build(&mut arena, b);
            let c = build(&mut arena, c);
            let ab = arena.add([a, b]);
            let bc = arena.add([b, c]);
            prop_assert_eq!(arena.add([ab, c]), arena.add([a, bc]));
        }

        #[test]
        fn mul_commutative(a in monomial(), b in monomial()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, a);
            let b = build(&mut arena, b);
            prop_assert_eq!(arena.mul([a, b]), arena.mul([b, a]));
        }

        #[test]
        fn mul_associative(a in monomial(), b in monomial(), c in monomial()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, a);
            let b = build(&mut arena, b);
            let c = build(&mut arena, c);
            let ab = arena.mul([a, b]);
            let bc = arena.mul([b, c]);
            prop_assert_eq!(arena.mul([ab, c]), arena.mul([a, bc]));
        }

        #[test]
        fn subtraction_cancels(a in monomial()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, a);
            let diff = arena.sub(a, a);
            prop_assert!(arena.is_zero(diff));
        }

        #[test]
        fn number_add_matches_literals(p in -1000i64..1000, q in 1i64..100, r in -1000i64..1000) {
            let mut arena = ExprArena::new();
            let a = arena.rational(p, q);
            let b = arena.integer(r);
            let sum = arena.add([a, b]);
            let expected = Number::new(p, q).unwrap() + Number::integer(r);
            prop_assert_eq!(arena.as_number(sum), Some(expected));
        }

        #[test]
        fn big_products_commute(p in i64::MIN..i64::MAX, q in i64::MIN..i64::MAX) {
            let mut arena = ExprArena::new();
            let a = arena.integer(p);
            let b = arena.integer(q);
            let ab = arena.mul([a, b]);
            let ba = arena.mul([b, a]);
            prop_assert_eq!(ab, ba);
            let __v = arena.sub(ab, ba);
            prop_assert!(arena.is_zero(__v));
            prop_assert_eq!(
                arena.as_number(ab),
                Some(Number::integer(p) * Number::integer(q))
            );
        }
    }
}
