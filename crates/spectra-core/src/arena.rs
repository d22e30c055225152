//! Arena storage for expressions.
//!
//! Nodes live contiguously in a `Vec` and are hash-consed, so every
//! structurally distinct expression is stored exactly once. The raw
//! [`ExprArena::intern`] entry point stores a node as given; the canonical
//! constructors in [`crate::build`] are what callers normally use.

use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;

use crate::error::CoreError;
use crate::expr::{Constant, ExprNode, SignalId, SignalInfo, SymbolDomain, SymbolId, SymbolInfo};
use crate::handle::ExprHandle;
use crate::number::Number;

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// The main arena for storing expressions.
#[derive(Debug)]
pub struct ExprArena {
    id: u64,
    nodes: Vec<ExprNode>,
    intern_map: HashMap<ExprNode, ExprHandle>,
    symbols: Vec<SymbolInfo>,
    symbol_map: HashMap<SymbolInfo, SymbolId>,
    signals: Vec<SignalInfo>,
    signal_map: HashMap<String, SignalId>,
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::with_capacity(capacity),
            intern_map: HashMap::with_capacity(capacity),
            symbols: Vec::new(),
            symbol_map: HashMap::new(),
            signals: Vec::new(),
            signal_map: HashMap::new(),
        }
    }

    /// Process-unique identity of this arena.
    ///
    /// Handles are only meaningful relative to the arena that issued them;
    /// caches keyed on handles include this id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Interns an expression node exactly as given, returning its handle.
    ///
    /// No canonicalization is applied.
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = u32::try_from(self.nodes.len()).expect("arena capacity exceeded");
        let handle = ExprHandle::new(index);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Symbols ===

    /// Interns a symbol with a domain assumption, returning its id.
    pub fn intern_symbol(&mut self, name: &str, domain: SymbolDomain) -> SymbolId {
        let info = SymbolInfo {
            name: name.to_string(),
            domain,
        };
        if let Some(&id) = self.symbol_map.get(&info) {
            return id;
        }
        let id = u32::try_from(self.symbols.len()).expect("symbol table exceeded");
        self.symbols.push(info.clone());
        self.symbol_map.insert(info, id);
        id
    }

    /// Metadata for a symbol id.
    #[must_use]
    pub fn symbol_info(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id as usize)
    }

    /// Gets the name of a symbol by its id.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbol_info(id).map(|info| info.name.as_str())
    }

    /// Creates a symbol with the given domain.
    pub fn symbol_with(&mut self, name: &str, domain: SymbolDomain) -> ExprHandle {
        let id = self.intern_symbol(name, domain);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates a symbol without assumptions.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        self.symbol_with(name, SymbolDomain::Complex)
    }

    /// Creates a real symbol.
    pub fn real_symbol(&mut self, name: &str) -> ExprHandle {
        self.symbol_with(name, SymbolDomain::Real)
    }

    /// Creates a strictly positive symbol.
    pub fn positive_symbol(&mut self, name: &str) -> ExprHandle {
        self.symbol_with(name, SymbolDomain::Positive)
    }

    /// Returns the symbol id if `expr` is a bare symbol.
    #[must_use]
    pub fn as_symbol(&self, expr: ExprHandle) -> Option<SymbolId> {
        match self.get(expr) {
            ExprNode::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    // === Signals ===

    /// Declares a pair of dual signals, e.g. `("v", "V")`.
    ///
    /// Re-declaring an existing pair returns the existing ids.
    ///
    /// # Errors
    ///
    /// Fails if either name is already paired with a different partner, or
    /// if both names are equal.
    pub fn declare_signal_pair(
        &mut self,
        name: &str,
        dual: &str,
    ) -> Result<(SignalId, SignalId), CoreError> {
        if name == dual {
            return Err(CoreError::SelfDualSignal(name.to_string()));
        }
        match (self.signal_map.get(name), self.signal_map.get(dual)) {
            (Some(&a), Some(&b)) if self.signals[a as usize].dual == b => return Ok((a, b)),
            (Some(&a), _) => {
                return Err(self.conflict(name, a));
            }
            (None, Some(&b)) => {
                return Err(self.conflict(dual, b));
            }
            (None, None) => {}
        }
        let a = u32::try_from(self.signals.len()).expect("signal table exceeded");
        let b = a + 1;
        self.signals.push(SignalInfo {
            name: name.to_string(),
            dual: b,
        });
        self.signals.push(SignalInfo {
            name: dual.to_string(),
            dual: a,
        });
        self.signal_map.insert(name.to_string(), a);
        self.signal_map.insert(dual.to_string(), b);
        Ok((a, b))
    }

    fn conflict(&self, name: &str, id: SignalId) -> CoreError {
        let partner = self.signals[id as usize].dual;
        CoreError::ConflictingSignal {
            name: name.to_string(),
            existing: self.signals[partner as usize].name.clone(),
        }
    }

    /// Metadata for a signal id.
    #[must_use]
    pub fn signal_info(&self, id: SignalId) -> Option<&SignalInfo> {
        self.signals.get(id as usize)
    }

    /// Looks a declared signal up by name.
    #[must_use]
    pub fn signal_by_name(&self, name: &str) -> Option<SignalId> {
        self.signal_map.get(name).copied()
    }

    /// The dual-domain partner of a signal.
    #[must_use]
    pub fn signal_dual(&self, id: SignalId) -> Option<SignalId> {
        self.signal_info(id).map(|info| info.dual)
    }

    // === Atoms ===

    /// Creates an integer expression.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.number(Number::integer(value))
    }

    /// Creates a numeric literal from an exact rational.
    pub fn number(&mut self, value: Number) -> ExprHandle {
        self.intern(ExprNode::Number(value))
    }

    /// Creates `num / den` as a literal.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn rational(&mut self, num: i64, den: i64) -> ExprHandle {
        assert!(den != 0, "denominator cannot be zero");
        let value = Number::new(num, den).unwrap_or_default();
        self.number(value)
    }

    /// The literal 0.
    pub fn zero(&mut self) -> ExprHandle {
        self.integer(0)
    }

    /// The literal 1.
    pub fn one(&mut self) -> ExprHandle {
        self.integer(1)
    }

    /// Creates a constant.
    pub fn constant(&mut self, constant: Constant) -> ExprHandle {
        self.intern(ExprNode::Constant(constant))
    }

    /// The imaginary unit.
    pub fn imaginary_unit(&mut self) -> ExprHandle {
        self.constant(Constant::I)
    }

    /// π.
    pub fn pi(&mut self) -> ExprHandle {
        self.constant(Constant::Pi)
    }

    /// Positive infinity.
    pub fn infinity(&mut self) -> ExprHandle {
        self.constant(Constant::Infinity)
    }

    /// Returns the numeric value if `expr` is a literal.
    #[must_use]
    pub fn as_number(&self, expr: ExprHandle) -> Option<Number> {
        self.get(expr).as_number().cloned()
    }

    /// Returns true if `expr` is the literal zero.
    #[must_use]
    pub fn is_zero(&self, expr: ExprHandle) -> bool {
        self.get(expr).is_zero()
    }

    /// Returns true if `expr` is the literal one.
    #[must_use]
    pub fn is_one(&self, expr: ExprHandle) -> bool {
        self.get(expr).is_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let y = arena.symbol("y");
        assert_eq!(x, arena.symbol("x"));
        assert_ne!(x, y);
    }

    #[test]
    fn test_symbols_differ_by_domain() {
        let mut arena = ExprArena::new();
        let complex_t = arena.symbol("t");
        let real_t = arena.real_symbol("t");
        assert_ne!(complex_t, real_t);

        let a = arena.as_symbol(complex_t).unwrap();
        let b = arena.as_symbol(real_t).unwrap();
        assert_eq!(arena.symbol_name(a), arena.symbol_name(b));
    }

    #[test]
    fn test_hash_consing() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let a = arena.intern(ExprNode::Step(x));
        let b = arena.intern(ExprNode::Step(x));
        assert_eq!(a, b);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_signal_pairs() {
        let mut arena = ExprArena::new();
        let (v, big_v) = arena.declare_signal_pair("v", "V").unwrap();
        assert_eq!(arena.signal_dual(v), Some(big_v));
        assert_eq!(arena.signal_dual(big_v), Some(v));
        assert_eq!(arena.declare_signal_pair("v", "V").unwrap(), (v, big_v));
        assert_eq!(arena.signal_by_name("V"), Some(big_v));

        let err = arena.declare_signal_pair("v", "W").unwrap_err();
        assert!(matches!(err, CoreError::ConflictingSignal { .. }));
        assert!(arena.declare_signal_pair("x", "x").is_err());
    }

    #[test]
    fn test_arena_ids_are_unique() {
        let a = ExprArena::new();
        let b = ExprArena::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_number_literals() {
        let mut arena = ExprArena::new();
        let half = arena.rational(2, 4);
        assert_eq!(arena.get(half), &ExprNode::Number(Number::new(1, 2).unwrap()));
        let two = arena.rational(4, 2);
        assert_eq!(two, arena.integer(2));
    }

    #[test]
    fn test_rational_at_the_edge_of_i64() {
        let mut arena = ExprArena::new();
        let flipped = arena.rational(i64::MIN, -1);
        let expected = Number::new(i64::MIN, 1).map(|n| -n).unwrap();
        assert_eq!(arena.as_number(flipped), Some(expected));
        assert_eq!(arena.display(flipped).to_string(), "9223372036854775808");
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn test_rational_rejects_zero_denominator() {
        let mut arena = ExprArena::new();
        let _ = arena.rational(1, 0);
    }
}
