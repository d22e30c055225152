//! Tree queries and rebuilding passes.

use hashbrown::{HashMap, HashSet};

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode, SignalId, SymbolId};
use crate::handle::ExprHandle;

impl ExprArena {
    /// Rebuilds `expr` with every child replaced by `f(child)`.
    ///
    /// The node is reassembled through the canonical constructors, so the
    /// result is canonical whenever the mapped children are. The bound
    /// variable of an integral is kept as is.
    pub fn map_children<F>(&mut self, expr: ExprHandle, mut f: F) -> ExprHandle
    where
        F: FnMut(&mut Self, ExprHandle) -> ExprHandle,
    {
        match self.get(expr).clone() {
            ExprNode::Number(_) | ExprNode::Constant(_) | ExprNode::Symbol(_) => expr,
            ExprNode::Add(args) => {
                let mapped: Vec<_> = args.iter().map(|&a| f(self, a)).collect();
                self.add(mapped)
            }
            ExprNode::Mul(args) => {
                let mapped: Vec<_> = args.iter().map(|&a| f(self, a)).collect();
                self.mul(mapped)
            }
            ExprNode::Pow { base, exp } => {
                let base = f(self, base);
                let exp = f(self, exp);
                self.pow(base, exp)
            }
            ExprNode::Exp(arg) => {
                let arg = f(self, arg);
                self.exp(arg)
            }
            ExprNode::Function { id, arg } => {
                let arg = f(self, arg);
                self.function(id, arg)
            }
            ExprNode::Signal { id, arg } => {
                let arg = f(self, arg);
                self.signal(id, arg)
            }
            ExprNode::Delta { arg, order } => {
                let arg = f(self, arg);
                self.delta_derivative(arg, order)
            }
            ExprNode::Step(arg) => {
                let arg = f(self, arg);
                self.step(arg)
            }
            ExprNode::Integral {
                integrand,
                var,
                lower,
                upper,
            } => {
                let integrand = f(self, integrand);
                let lower = f(self, lower);
                let upper = f(self, upper);
                self.integral(integrand, var, lower, upper)
            }
        }
    }

    /// Returns true if `var` occurs free in `expr`.
    #[must_use]
    pub fn has_symbol(&self, expr: ExprHandle, var: SymbolId) -> bool {
        match self.get(expr) {
            ExprNode::Symbol(id) => *id == var,
            ExprNode::Integral {
                integrand,
                var: bound,
                lower,
                upper,
            } => {
                (*bound != var && self.has_symbol(*integrand, var))
                    || self.has_symbol(*lower, var)
                    || self.has_symbol(*upper, var)
            }
            node => node.children().iter().any(|&c| self.has_symbol(c, var)),
        }
    }

    /// Returns true if `expr` is free of `var`.
    #[must_use]
    pub fn is_free_of(&self, expr: ExprHandle, var: SymbolId) -> bool {
        !self.has_symbol(expr, var)
    }

    /// All symbol ids in `expr` that print as `name`, whatever their domain.
    #[must_use]
    pub fn symbols_named(&self, expr: ExprHandle, name: &str) -> Vec<SymbolId> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        self.collect_symbols(expr, &mut |id| {
            if seen.insert(id) && self.symbol_name(id) == Some(name) {
                found.push(id);
            }
        });
        found
    }

    /// Every symbol name used anywhere in `expr`, bound variables included.
    #[must_use]
    pub fn symbol_names(&self, expr: ExprHandle) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_symbols(expr, &mut |id| {
            if let Some(name) = self.symbol_name(id) {
                names.insert(name.to_string());
            }
        });
        names
    }

    fn collect_symbols(&self, expr: ExprHandle, visit: &mut dyn FnMut(SymbolId)) {
        match self.get(expr) {
            ExprNode::Symbol(id) => visit(*id),
            ExprNode::Integral { var, .. } => {
                visit(*var);
                for c in self.get(expr).children() {
                    self.collect_symbols(c, visit);
                }
            }
            node => {
                for c in node.children() {
                    self.collect_symbols(c, visit);
                }
            }
        }
    }

    /// Returns true if any abstract signal occurs in `expr`.
    #[must_use]
    pub fn contains_signal(&self, expr: ExprHandle) -> bool {
        match self.get(expr) {
            ExprNode::Signal { .. } => true,
            node => node.children().iter().any(|&c| self.contains_signal(c)),
        }
    }

    /// Returns true if a signal whose argument depends on `var` occurs in
    /// `expr`.
    #[must_use]
    pub fn contains_signal_in(&self, expr: ExprHandle, var: SymbolId) -> bool {
        match self.get(expr) {
            ExprNode::Signal { arg, .. } => self.has_symbol(*arg, var),
            node => node
                .children()
                .iter()
                .any(|&c| self.contains_signal_in(c, var)),
        }
    }

    /// The signal id and argument if `expr` is a bare signal application.
    #[must_use]
    pub fn as_signal(&self, expr: ExprHandle) -> Option<(SignalId, ExprHandle)> {
        match self.get(expr) {
            ExprNode::Signal { id, arg } => Some((*id, *arg)),
            _ => None,
        }
    }

    /// Returns true if `constant` occurs in `expr`.
    #[must_use]
    pub fn has_constant(&self, expr: ExprHandle, constant: Constant) -> bool {
        match self.get(expr) {
            ExprNode::Constant(c) => *c == constant,
            node => node
                .children()
                .iter()
                .any(|&c| self.has_constant(c, constant)),
        }
    }

    /// Substitutes `to` for every free occurrence of the symbol `from`.
    pub fn subs(&mut self, expr: ExprHandle, from: SymbolId, to: ExprHandle) -> ExprHandle {
        let mut memo = HashMap::new();
        self.subs_memo(expr, from, to, &mut memo)
    }

    fn subs_memo(
        &mut self,
        expr: ExprHandle,
        from: SymbolId,
        to: ExprHandle,
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&done) = memo.get(&expr) {
            return done;
        }
        let result = match self.get(expr) {
            ExprNode::Symbol(id) if *id == from => to,
            ExprNode::Integral { var, .. } if *var == from => expr,
            _ if self.is_free_of(expr, from) => expr,
            _ => self.map_children(expr, |arena, child| {
                arena.subs_memo(child, from, to, memo)
            }),
        };
        memo.insert(expr, result);
        result
    }

    /// Replaces the symbol `from` with the symbol `to`.
    pub fn replace_symbol(&mut self, expr: ExprHandle, from: SymbolId, to: SymbolId) -> ExprHandle {
        let target = self.intern(ExprNode::Symbol(to));
        self.subs(expr, from, target)
    }

    /// Counts nodes in the tree rooted at `expr`, shared subtrees counted
    /// once per occurrence.
    #[must_use]
    pub fn tree_size(&self, expr: ExprHandle) -> usize {
        1 + self
            .get(expr)
            .children()
            .iter()
            .map(|&c| self.tree_size(c))
            .sum::<usize>()
    }
}
