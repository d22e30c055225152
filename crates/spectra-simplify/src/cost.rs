//! Cost functions for expression extraction.
//!
//! After equality saturation, we need to pick the "best" expression
//! from each equivalence class. Cost functions define what "best" means.

use egg::{CostFunction, Id, Language};

use crate::language::SpectraLang;

/// A size-based cost that charges exponentials more than sinusoids.
///
/// With this weighting `(exp x) + (exp (neg x))` extracts as a cosine, so
/// inverse transforms of symmetric impulse pairs come back as real
/// sinusoids.
#[derive(Default)]
pub struct TransformCost;

impl CostFunction<SpectraLang> for TransformCost {
    type Cost = usize;

    fn cost<C>(&mut self, enode: &SpectraLang, mut costs: C) -> Self::Cost
    where
        C: FnMut(Id) -> Self::Cost,
    {
        let base_cost = match enode {
            SpectraLang::Exp(_) => 3,
            SpectraLang::Sin(_) | SpectraLang::Cos(_) | SpectraLang::Tan(_) => 2,
            SpectraLang::Integral(_) => 4,
            _ => 1,
        };

        enode.fold(base_cost, |sum, id| sum + costs(id))
    }
}
