//! Input normalization ahead of term-by-term transformation.

use spectra_core::{ExprArena, ExprHandle, SymbolId};

/// Rewrites every symbol that prints like `var` into `var` itself.
///
/// Callers often build `t` once as a plain symbol and once as a real one;
/// both must be integrated over.
pub fn unify_symbol(arena: &mut ExprArena, expr: ExprHandle, var: SymbolId) -> ExprHandle {
    let Some(name) = arena.symbol_name(var).map(str::to_owned) else {
        return expr;
    };
    arena
        .symbols_named(expr, &name)
        .into_iter()
        .filter(|&id| id != var)
        .fold(expr, |acc, id| arena.replace_symbol(acc, id, var))
}

/// Unifies `var`, rewrites trigonometric functions as exponentials and
/// expands the result into a sum of terms.
pub fn normalize(arena: &mut ExprArena, expr: ExprHandle, var: SymbolId) -> ExprHandle {
    let unified = unify_symbol(arena, expr, var);
    let rewritten = if arena.has_trig(unified) {
        arena.rewrite_trig_as_exp(unified)
    } else {
        unified
    };
    arena.expand(rewritten)
}
