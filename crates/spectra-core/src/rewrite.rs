//! Rewriting trigonometric functions as complex exponentials.

use crate::arena::ExprArena;
use crate::expr::{functions, ExprNode};
use crate::handle::ExprHandle;

impl ExprArena {
    /// Rewrites every `sin`, `cos` and `tan` in `expr` with exponentials:
    ///
    /// - `cos x = (e^{ix} + e^{-ix}) / 2`
    /// - `sin x = -i/2 (e^{ix} - e^{-ix})`
    /// - `tan x = -i (e^{ix} - e^{-ix}) / (e^{ix} + e^{-ix})`
    pub fn rewrite_trig_as_exp(&mut self, expr: ExprHandle) -> ExprHandle {
        if !self.has_trig(expr) {
            return expr;
        }
        let rebuilt = self.map_children(expr, |arena, child| arena.rewrite_trig_as_exp(child));
        let ExprNode::Function { id, arg } = *self.get(rebuilt) else {
            return rebuilt;
        };
        if !functions::is_trig(id) {
            return rebuilt;
        }

        let i = self.imaginary_unit();
        let ix = self.mul([i, arg]);
        let nix = self.neg(ix);
        let pos = self.exp(ix);
        let neg = self.exp(nix);
        let sum = self.add([pos, neg]);
        let diff = self.sub(pos, neg);
        let minus_i = self.neg(i);

        match id {
            functions::COS => {
                let half = self.rational(1, 2);
                self.mul([half, sum])
            }
            functions::SIN => {
                let half = self.rational(1, 2);
                self.mul([half, minus_i, diff])
            }
            _ => {
                let inv = self.recip(sum);
                self.mul([minus_i, diff, inv])
            }
        }
    }

    /// Returns true if `expr` contains `sin`, `cos` or `tan`.
    #[must_use]
    pub fn has_trig(&self, expr: ExprHandle) -> bool {
        match self.get(expr) {
            ExprNode::Function { id, .. } if functions::is_trig(*id) => true,
            node => node.children().iter().any(|&c| self.has_trig(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cos_as_exponentials() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let c = arena.cos(t);
        let rewritten = arena.rewrite_trig_as_exp(c);

        assert!(!arena.has_trig(rewritten));
        assert_eq!(arena.terms(rewritten).len(), 2);
    }

    #[test]
    fn test_sin_rewrite_recombines_nested() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let s = arena.sin(t);
        let c = arena.cos(s);
        let rewritten = arena.rewrite_trig_as_exp(c);
        assert!(!arena.has_trig(rewritten));
    }

    #[test]
    fn test_untouched_without_trig() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let e = arena.exp(t);
        assert_eq!(arena.rewrite_trig_as_exp(e), e);
    }
}
