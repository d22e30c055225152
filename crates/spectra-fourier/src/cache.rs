//! Memoization of completed transforms.

use rustc_hash::FxHashMap;

use spectra_core::{ExprHandle, SymbolId};

use crate::engine::Direction;
use crate::error::FourierError;

/// Identifies one transform request.
///
/// Handles are only meaningful inside the arena that issued them, so the
/// arena id is part of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Id of the arena holding `expr`.
    pub arena: u64,
    /// The expression as passed by the caller.
    pub expr: ExprHandle,
    /// Variable integrated over.
    pub source: SymbolId,
    /// Variable of the result.
    pub target: SymbolId,
    /// Forward or inverse.
    pub direction: Direction,
}

/// Hit and miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
}

/// Cache of transform outcomes, failures included.
#[derive(Debug, Default)]
pub struct TransformCache {
    entries: FxHashMap<CacheKey, Result<ExprHandle, FourierError>>,
    stats: CacheStats,
}

impl TransformCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a previous outcome.
    pub fn get(&mut self, key: &CacheKey) -> Option<Result<ExprHandle, FourierError>> {
        let found = self.entries.get(key).cloned();
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Records an outcome.
    pub fn insert(&mut self, key: CacheKey, outcome: Result<ExprHandle, FourierError>) {
        self.entries.insert(key, outcome);
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    /// Number of stored outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters since creation or the last [`clear`](Self::clear).
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(expr: u32, direction: Direction) -> CacheKey {
        CacheKey {
            arena: 1,
            expr: ExprHandle::new(expr),
            source: 0,
            target: 1,
            direction,
        }
    }

    #[test]
    fn test_hits_and_misses() {
        let mut cache = TransformCache::new();
        assert!(cache.get(&key(3, Direction::Forward)).is_none());

        cache.insert(key(3, Direction::Forward), Ok(ExprHandle::new(7)));
        assert_eq!(
            cache.get(&key(3, Direction::Forward)),
            Some(Ok(ExprHandle::new(7)))
        );
        assert!(cache.get(&key(3, Direction::Inverse)).is_none());

        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_are_remembered() {
        let mut cache = TransformCache::new();
        let failure = Err(FourierError::NotASymbol);
        cache.insert(key(1, Direction::Inverse), failure.clone());
        assert_eq!(cache.get(&key(1, Direction::Inverse)), Some(failure));
    }

    #[test]
    fn test_clear() {
        let mut cache = TransformCache::new();
        cache.insert(key(1, Direction::Forward), Ok(ExprHandle::new(2)));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
