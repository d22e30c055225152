//! Structural classification of transform terms.
//!
//! Every rule works on a term that has been split into the part that is
//! constant in the domain variable and the part that is not. Arguments of
//! signals, impulses and steps are further read as `scale*var + shift`.

use spectra_core::{ExprArena, ExprHandle, ExprNode, SymbolId};

use crate::error::FourierError;

/// An argument of the form `scale*var + shift`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affine {
    /// Coefficient of the variable, free of the variable.
    pub scale: ExprHandle,
    /// Remaining additive part, free of the variable.
    pub shift: ExprHandle,
}

fn var_name(arena: &ExprArena, var: SymbolId) -> &str {
    arena.symbol_name(var).unwrap_or("?")
}

/// Splits `expr` into `(constant, rest)` with `expr = constant * rest`,
/// where `constant` is free of `var` and every factor of `rest` depends on
/// it.
///
/// # Errors
///
/// Returns [`FourierError::MalformedArgument`] if `expr` does not depend on
/// `var` at all.
pub fn factor_const(
    arena: &mut ExprArena,
    expr: ExprHandle,
    var: SymbolId,
) -> Result<(ExprHandle, ExprHandle), FourierError> {
    if arena.is_free_of(expr, var) {
        return Err(FourierError::malformed(format!(
            "{} does not depend on {}",
            arena.display(expr),
            var_name(arena, var)
        )));
    }
    let (free, bound): (Vec<_>, Vec<_>) = arena
        .factors(expr)
        .into_iter()
        .partition(|&f| arena.is_free_of(f, var));
    let constant = arena.mul(free);
    let rest = arena.mul(bound);
    Ok((constant, rest))
}

/// Reads `expr` as `scale*var + shift`.
///
/// # Errors
///
/// Returns [`FourierError::MalformedArgument`] if `expr` does not contain
/// `var`, has more than two additive terms, or is not affine in `var`.
pub fn scale_shift(
    arena: &mut ExprArena,
    expr: ExprHandle,
    var: SymbolId,
) -> Result<Affine, FourierError> {
    let not_affine = |arena: &ExprArena| {
        FourierError::malformed(format!(
            "{} is not a scale and shift of {}",
            arena.display(expr),
            var_name(arena, var)
        ))
    };

    if arena.is_free_of(expr, var) {
        return Err(FourierError::malformed(format!(
            "{} does not depend on {}",
            arena.display(expr),
            var_name(arena, var)
        )));
    }
    let terms = arena.terms(expr);
    if terms.len() > 2 {
        return Err(FourierError::malformed(format!(
            "{} has too many terms",
            arena.display(expr)
        )));
    }

    let (bound, free): (Vec<_>, Vec<_>) = terms
        .into_iter()
        .partition(|&t| arena.has_symbol(t, var));
    let [dependent] = bound[..] else {
        return Err(not_affine(arena));
    };
    let var_expr = arena.intern(ExprNode::Symbol(var));
    let scale = arena.div(dependent, var_expr);
    if arena.has_symbol(scale, var) {
        return Err(not_affine(arena));
    }
    let shift = arena.add(free);
    Ok(Affine { scale, shift })
}

/// Splits a complex quantity into real and imaginary parts, term by term.
///
/// Returns `None` if some term is neither provably real nor a real multiple
/// of the imaginary unit.
pub fn split_complex(arena: &mut ExprArena, expr: ExprHandle) -> Option<(ExprHandle, ExprHandle)> {
    let i = arena.imaginary_unit();
    let mut re = Vec::new();
    let mut im = Vec::new();
    for term in arena.terms(expr) {
        if arena.is_real(term) {
            re.push(term);
            continue;
        }
        let q = arena.div(term, i);
        if !arena.is_real(q) {
            return None;
        }
        im.push(q);
    }
    Some((arena.add(re), arena.add(im)))
}

/// A term split into the pieces the closed-form rules look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TermParts {
    /// Product of the factors free of the variable.
    pub constant: ExprHandle,
    /// Argument of the exponential factor, if it depends on the variable.
    pub exp_arg: Option<ExprHandle>,
    /// Product of the remaining variable-dependent factors (1 if none).
    pub other: ExprHandle,
}

impl TermParts {
    /// Splits `term` with respect to `var`.
    pub fn split(arena: &mut ExprArena, term: ExprHandle, var: SymbolId) -> Self {
        let mut free = Vec::new();
        let mut bound = Vec::new();
        let mut exp_arg = None;
        for factor in arena.factors(term) {
            if arena.is_free_of(factor, var) {
                free.push(factor);
                continue;
            }
            match arena.get(factor) {
                ExprNode::Exp(arg) if exp_arg.is_none() => exp_arg = Some(*arg),
                _ => bound.push(factor),
            }
        }
        TermParts {
            constant: arena.mul(free),
            exp_arg,
            other: arena.mul(bound),
        }
    }

    /// Returns true if nothing in the term depends on the variable.
    #[must_use]
    pub fn is_constant(&self, arena: &ExprArena) -> bool {
        self.exp_arg.is_none() && arena.is_one(self.other)
    }
}
