//! Distribution of products over sums.

use crate::arena::ExprArena;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

/// Largest integer power of a sum that is multiplied out.
pub const MAX_EXPAND_POWER: i64 = 32;

impl ExprArena {
    /// Expands `expr` into a sum of products.
    ///
    /// Products are distributed over sums and positive integer powers of
    /// sums (up to [`MAX_EXPAND_POWER`]) are multiplied out. Exponential
    /// arguments are expanded too, but an exponential of a sum is kept as
    /// a single factor.
    pub fn expand(&mut self, expr: ExprHandle) -> ExprHandle {
        match self.get(expr).clone() {
            ExprNode::Mul(args) => {
                let expanded: Vec<_> = args.iter().map(|&a| self.expand(a)).collect();
                let mut acc = self.one();
                for factor in expanded {
                    acc = self.distribute(acc, factor);
                }
                acc
            }
            ExprNode::Pow { base, exp } => {
                let base = self.expand(base);
                let exp = self.expand(exp);
                match self.as_number(exp).and_then(|n| n.as_integer()) {
                    Some(k)
                        if (2..=MAX_EXPAND_POWER).contains(&k)
                            && matches!(self.get(base), ExprNode::Add(_)) =>
                    {
                        let mut acc = base;
                        for _ in 1..k {
                            acc = self.distribute(acc, base);
                        }
                        acc
                    }
                    _ => self.pow(base, exp),
                }
            }
            _ => self.map_children(expr, |arena, child| arena.expand(child)),
        }
    }

    /// Multiplies two expanded expressions term by term.
    fn distribute(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let lhs = self.terms(a);
        let rhs = self.terms(b);
        if lhs.len() == 1 && rhs.len() == 1 {
            return self.mul([a, b]);
        }
        let mut products = Vec::with_capacity(lhs.len() * rhs.len());
        for &l in &lhs {
            for &r in &rhs {
                let p = self.mul([l, r]);
                products.push(p);
            }
        }
        self.add(products)
    }
}
