//! Property-based tests for the transform theorems.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use spectra_core::{ExprArena, ExprHandle};

    use crate::FourierEngine;

    struct Vars {
        t: ExprHandle,
        f: ExprHandle,
    }

    fn vars(arena: &mut ExprArena) -> Vars {
        Vars {
            t: arena.real_symbol("t"),
            f: arena.real_symbol("f"),
        }
    }

    // Strategy for (shape, parameter) pairs with a known transform
    fn primitive() -> impl Strategy<Value = (u8, i64)> {
        prop_oneof![
            Just((0u8, 0i64)),
            (-3i64..=3).prop_map(|k| (1u8, k)),
            (1i64..=3).prop_map(|k| (2u8, k)),
            (1i64..=4).prop_map(|k| (3u8, k)),
            (-3i64..=3).prop_map(|k| (4u8, k)),
            Just((5u8, 0i64)),
        ]
    }

    fn build(arena: &mut ExprArena, v: &Vars, (shape, k): (u8, i64)) -> ExprHandle {
        let k = arena.integer(k);
        match shape {
            0 => arena.one(),
            1 => {
                let phase = arena.two_pi_i();
                let arg = arena.mul([phase, k, v.t]);
                arena.exp(arg)
            }
            2 => {
                let two = arena.integer(2);
                let pi = arena.pi();
                let arg = arena.mul([two, pi, k, v.t]);
                arena.cos(arg)
            }
            3 => {
                let kt = arena.mul([k, v.t]);
                let decay = arena.neg(kt);
                let e = arena.exp(decay);
                let u = arena.step(v.t);
                arena.mul([e, u])
            }
            4 => {
                let shifted = arena.sub(v.t, k);
                arena.delta(shifted)
            }
            _ => v.t,
        }
    }

    proptest! {
        #[test]
        fn forward_is_linear(a in -5i64..=5, x in primitive(), y in primitive()) {
            let mut arena = ExprArena::new();
            let v = vars(&mut arena);
            let x = build(&mut arena, &v, x);
            let y = build(&mut arena, &v, y);
            let a = arena.integer(a);
            let ax = arena.mul([a, x]);
            let combined = arena.add([ax, y]);

            let mut engine = FourierEngine::new();
            let lhs = engine.forward_transform(&mut arena, combined, v.t, v.f).unwrap();
            let fx = engine.forward_transform(&mut arena, x, v.t, v.f).unwrap();
            let fy = engine.forward_transform(&mut arena, y, v.t, v.f).unwrap();
            let afx = arena.mul([a, fx]);
            let rhs = arena.add([afx, fy]);
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn time_shift_is_a_phase(k in -4i64..=4) {
            let mut arena = ExprArena::new();
            let v = vars(&mut arena);
            let (sig, dual) = arena.declare_signal_pair("v", "V").unwrap();
            let k = arena.integer(k);
            let shifted = arena.sub(v.t, k);
            let delayed = arena.signal(sig, shifted);

            let result = FourierEngine::new()
                .forward_transform(&mut arena, delayed, v.t, v.f)
                .unwrap();

            let spectrum = arena.signal(dual, v.f);
            let phase = arena.two_pi_i();
            let minus_k = arena.neg(k);
            let arg = arena.mul([phase, v.f, minus_k]);
            let rotation = arena.exp(arg);
            prop_assert_eq!(result, arena.mul([spectrum, rotation]));
        }

        #[test]
        fn time_scaling_compresses_spectrum(c in 1i64..=6) {
            let mut arena = ExprArena::new();
            let v = vars(&mut arena);
            let (sig, dual) = arena.declare_signal_pair("v", "V").unwrap();
            let c = arena.integer(c);
            let arg = arena.mul([c, v.t]);
            let squeezed = arena.signal(sig, arg);

            let result = FourierEngine::new()
                .forward_transform(&mut arena, squeezed, v.t, v.f)
                .unwrap();

            let scaled = arena.div(v.f, c);
            let spectrum = arena.signal(dual, scaled);
            let inv = arena.recip(c);
            prop_assert_eq!(result, arena.mul([spectrum, inv]));
        }
    }
}
