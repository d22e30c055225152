//! Simplification rules organized by category.
//!
//! Every rule is an identity over the complex numbers; branch-dependent
//! rewrites such as `ln(exp x) = x` are left to the arena, which applies
//! them only for real arguments.

pub mod arithmetic;
pub mod exp_log;
pub mod trig;

use egg::Rewrite;

use crate::language::SpectraLang;

/// Collects all simplification rules.
#[must_use]
pub fn all_rules() -> Vec<Rewrite<SpectraLang, ()>> {
    let mut rules = Vec::new();
    rules.extend(arithmetic::rules());
    rules.extend(trig::rules());
    rules.extend(exp_log::rules());
    rules
}
