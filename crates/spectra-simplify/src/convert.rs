//! Conversion between arena expressions and e-graph terms.
//!
//! Encoding is structural: n-ary sums and products become right-nested
//! binary nodes in canonical operand order, and a product with a negative
//! coefficient is written as a negation so that `x` and `-x` share a
//! subterm. Decoding goes through the arena's canonical constructors.

use egg::{Id, RecExpr, Symbol};
use hashbrown::HashMap;
use thiserror::Error;

use spectra_core::{functions, Constant, ExprArena, ExprHandle, ExprNode, Number, SignalId};

use crate::language::{SpectraLang, SIGNAL_PREFIX, SYMBOL_PREFIX};

/// Errors from converting between the two representations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The term names a symbol or signal this arena does not know.
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),

    /// A node has children of the wrong kind.
    #[error("malformed term: {0}")]
    Malformed(&'static str),

    /// A literal division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Encodes an arena expression as an e-graph term.
///
/// # Errors
///
/// Fails on an elementary function the e-graph language does not know.
pub fn to_rec_expr(
    arena: &ExprArena,
    expr: ExprHandle,
) -> Result<RecExpr<SpectraLang>, ConvertError> {
    let mut encoder = Encoder {
        arena,
        out: RecExpr::default(),
        memo: HashMap::new(),
    };
    encoder.encode(expr)?;
    Ok(encoder.out)
}

struct Encoder<'a> {
    arena: &'a ExprArena,
    out: RecExpr<SpectraLang>,
    memo: HashMap<ExprHandle, Id>,
}

impl Encoder<'_> {
    fn encode(&mut self, expr: ExprHandle) -> Result<Id, ConvertError> {
        if let Some(&id) = self.memo.get(&expr) {
            return Ok(id);
        }
        let id = match self.arena.get(expr).clone() {
            ExprNode::Number(n) if n.is_negative() => {
                let abs = self.out.add(SpectraLang::Num(n.abs()));
                self.out.add(SpectraLang::Neg(abs))
            }
            ExprNode::Number(n) => self.out.add(SpectraLang::Num(n)),
            ExprNode::Constant(c) => {
                let name = match c {
                    Constant::I => "I",
                    Constant::Pi => "pi",
                    Constant::Infinity => "oo",
                };
                self.out.add(SpectraLang::Symbol(Symbol::from(name)))
            }
            ExprNode::Symbol(id) => self.symbol(SYMBOL_PREFIX, id),
            ExprNode::Add(args) => self.nest(&args, SpectraLang::Add)?,
            ExprNode::Mul(args) => {
                let coeff = self.arena.leading_coefficient(expr);
                if coeff.is_negative() {
                    let rest = &args[1..];
                    let magnitude = coeff.abs();
                    let inner = if magnitude.is_one() {
                        self.nest(rest, SpectraLang::Mul)?
                    } else {
                        let m = self.out.add(SpectraLang::Num(magnitude));
                        let r = self.nest(rest, SpectraLang::Mul)?;
                        self.out.add(SpectraLang::Mul([m, r]))
                    };
                    self.out.add(SpectraLang::Neg(inner))
                } else {
                    self.nest(&args, SpectraLang::Mul)?
                }
            }
            ExprNode::Pow { base, exp } => {
                let b = self.encode(base)?;
                let e = self.encode(exp)?;
                self.out.add(SpectraLang::Pow([b, e]))
            }
            ExprNode::Exp(arg) => {
                let a = self.encode(arg)?;
                self.out.add(SpectraLang::Exp(a))
            }
            ExprNode::Function { id, arg } => {
                let a = self.encode(arg)?;
                self.out.add(match id {
                    functions::SIN => SpectraLang::Sin(a),
                    functions::COS => SpectraLang::Cos(a),
                    functions::TAN => SpectraLang::Tan(a),
                    functions::LN => SpectraLang::Ln(a),
                    functions::ABS => SpectraLang::Abs(a),
                    functions::SIGN => SpectraLang::Sign(a),
                    _ => return Err(ConvertError::Malformed("unknown function")),
                })
            }
            ExprNode::Signal { id, arg } => {
                let head = self.symbol(SIGNAL_PREFIX, id);
                let a = self.encode(arg)?;
                self.out.add(SpectraLang::Apply([head, a]))
            }
            ExprNode::Delta { arg, order } => {
                let a = self.encode(arg)?;
                let n = self.out.add(SpectraLang::Num(Number::from(i64::from(order))));
                self.out.add(SpectraLang::Delta([a, n]))
            }
            ExprNode::Step(arg) => {
                let a = self.encode(arg)?;
                self.out.add(SpectraLang::Step(a))
            }
            ExprNode::Integral {
                integrand,
                var,
                lower,
                upper,
            } => {
                let body = self.encode(integrand)?;
                let v = self.symbol(SYMBOL_PREFIX, var);
                let lo = self.encode(lower)?;
                let hi = self.encode(upper)?;
                self.out.add(SpectraLang::Integral([body, v, lo, hi]))
            }
        };
        self.memo.insert(expr, id);
        Ok(id)
    }

    fn symbol(&mut self, prefix: &str, id: u32) -> Id {
        self.out
            .add(SpectraLang::Symbol(Symbol::from(format!("{prefix}{id}").as_str())))
    }

    fn nest(
        &mut self,
        args: &[ExprHandle],
        node: fn([Id; 2]) -> SpectraLang,
    ) -> Result<Id, ConvertError> {
        let Some((&last, init)) = args.split_last() else {
            return Err(ConvertError::Malformed("empty operand list"));
        };
        let mut acc = self.encode(last)?;
        for &arg in init.iter().rev() {
            let a = self.encode(arg)?;
            acc = self.out.add(node([a, acc]));
        }
        Ok(acc)
    }
}

enum Slot {
    Expr(ExprHandle),
    Signal(SignalId),
}

/// Decodes an e-graph term into the arena.
///
/// # Errors
///
/// Fails on symbols the arena has not interned, signal heads outside an
/// application, literal division by zero, or malformed integrals.
pub fn from_rec_expr(
    arena: &mut ExprArena,
    term: &RecExpr<SpectraLang>,
) -> Result<ExprHandle, ConvertError> {
    let nodes = term.as_ref();
    let mut slots: Vec<Slot> = Vec::with_capacity(nodes.len());

    for node in nodes {
        let expr = |slots: &[Slot], id: Id| -> Result<ExprHandle, ConvertError> {
            match slots[usize::from(id)] {
                Slot::Expr(h) => Ok(h),
                Slot::Signal(_) => Err(ConvertError::Malformed("signal head used as a value")),
            }
        };
        let slot = match node {
            SpectraLang::Num(n) => Slot::Expr(arena.number(n.clone())),
            SpectraLang::Symbol(sym) => decode_symbol(arena, sym.as_str())?,
            SpectraLang::Add([a, b]) => {
                let (a, b) = (expr(&slots, *a)?, expr(&slots, *b)?);
                Slot::Expr(arena.add([a, b]))
            }
            SpectraLang::Sub([a, b]) => {
                let (a, b) = (expr(&slots, *a)?, expr(&slots, *b)?);
                Slot::Expr(arena.sub(a, b))
            }
            SpectraLang::Mul([a, b]) => {
                let (a, b) = (expr(&slots, *a)?, expr(&slots, *b)?);
                Slot::Expr(arena.mul([a, b]))
            }
            SpectraLang::Div([a, b]) => {
                let (a, b) = (expr(&slots, *a)?, expr(&slots, *b)?);
                if arena.is_zero(b) {
                    return Err(ConvertError::DivisionByZero);
                }
                Slot::Expr(arena.div(a, b))
            }
            SpectraLang::Neg(a) => {
                let a = expr(&slots, *a)?;
                Slot::Expr(arena.neg(a))
            }
            SpectraLang::Pow([a, b]) => {
                let (a, b) = (expr(&slots, *a)?, expr(&slots, *b)?);
                if arena.is_zero(a) && arena.as_number(b).is_some_and(|n| n.is_negative()) {
                    return Err(ConvertError::DivisionByZero);
                }
                Slot::Expr(arena.pow(a, b))
            }
            SpectraLang::Exp(a) => {
                let a = expr(&slots, *a)?;
                Slot::Expr(arena.exp(a))
            }
            SpectraLang::Ln(a) => unary(arena, &slots, *a, functions::LN)?,
            SpectraLang::Sin(a) => unary(arena, &slots, *a, functions::SIN)?,
            SpectraLang::Cos(a) => unary(arena, &slots, *a, functions::COS)?,
            SpectraLang::Tan(a) => unary(arena, &slots, *a, functions::TAN)?,
            SpectraLang::Abs(a) => unary(arena, &slots, *a, functions::ABS)?,
            SpectraLang::Sign(a) => unary(arena, &slots, *a, functions::SIGN)?,
            SpectraLang::Delta([a, n]) => {
                let a = expr(&slots, *a)?;
                let n = expr(&slots, *n)?;
                let order = arena
                    .as_number(n)
                    .and_then(|k| k.as_integer())
                    .and_then(|k| u32::try_from(k).ok())
                    .ok_or(ConvertError::Malformed("impulse order must be a natural number"))?;
                Slot::Expr(arena.delta_derivative(a, order))
            }
            SpectraLang::Step(a) => {
                let a = expr(&slots, *a)?;
                Slot::Expr(arena.step(a))
            }
            SpectraLang::Apply([head, a]) => {
                let Slot::Signal(id) = slots[usize::from(*head)] else {
                    return Err(ConvertError::Malformed("application head is not a signal"));
                };
                let a = expr(&slots, *a)?;
                Slot::Expr(arena.signal(id, a))
            }
            SpectraLang::Integral([body, var, lo, hi]) => {
                let body = expr(&slots, *body)?;
                let var = expr(&slots, *var)?;
                let var = arena
                    .as_symbol(var)
                    .ok_or(ConvertError::Malformed("integration variable is not a symbol"))?;
                let (lo, hi) = (expr(&slots, *lo)?, expr(&slots, *hi)?);
                Slot::Expr(arena.integral(body, var, lo, hi))
            }
        };
        slots.push(slot);
    }

    match slots.last() {
        Some(Slot::Expr(h)) => Ok(*h),
        Some(Slot::Signal(_)) => Err(ConvertError::Malformed("bare signal head")),
        None => Err(ConvertError::Malformed("empty term")),
    }
}

fn unary(
    arena: &mut ExprArena,
    slots: &[Slot],
    arg: Id,
    id: u32,
) -> Result<Slot, ConvertError> {
    let Slot::Expr(arg) = slots[usize::from(arg)] else {
        return Err(ConvertError::Malformed("signal head used as a value"));
    };
    Ok(Slot::Expr(arena.function(id, arg)))
}

fn decode_symbol(arena: &mut ExprArena, name: &str) -> Result<Slot, ConvertError> {
    match name {
        "I" => return Ok(Slot::Expr(arena.imaginary_unit())),
        "pi" => return Ok(Slot::Expr(arena.pi())),
        "oo" => return Ok(Slot::Expr(arena.infinity())),
        _ => {}
    }
    let unknown = || ConvertError::UnknownSymbol(name.to_string());
    if let Some(rest) = name.strip_prefix(SIGNAL_PREFIX) {
        let id: SignalId = rest.parse().map_err(|_| unknown())?;
        arena.signal_info(id).ok_or_else(unknown)?;
        return Ok(Slot::Signal(id));
    }
    if let Some(rest) = name.strip_prefix(SYMBOL_PREFIX) {
        let id: u32 = rest.parse().map_err(|_| unknown())?;
        let info = arena.symbol_info(id).ok_or_else(unknown)?;
        let (name, domain) = (info.name.clone(), info.domain);
        return Ok(Slot::Expr(arena.symbol_with(&name, domain)));
    }
    Err(unknown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_shares_negated_subterms() {
        let mut arena = ExprArena::new();
        let a = arena.positive_symbol("a");
        let t = arena.real_symbol("t");
        let at = arena.mul([a, t]);
        let neg = arena.neg(at);
        let sum = arena.add([at, neg]);
        assert!(arena.is_zero(sum));

        let term = to_rec_expr(&arena, neg).unwrap();
        assert_eq!(term.to_string(), "(neg (* s0 s1))");
    }

    #[test]
    fn test_round_trip_preserves_handles() {
        let mut arena = ExprArena::new();
        let (v, _) = arena.declare_signal_pair("v", "V").unwrap();
        let t = arena.real_symbol("t");
        let t_id = arena.as_symbol(t).unwrap();
        let half = arena.rational(-1, 2);
        let vt = arena.signal(v, t);
        let d = arena.delta_derivative(t, 2);
        let u = arena.step(t);
        let body = arena.mul([half, vt, d, u]);
        let integral = arena.integral_over_reals(body, t_id);

        let term = to_rec_expr(&arena, integral).unwrap();
        let back = from_rec_expr(&mut arena, &term).unwrap();
        assert_eq!(back, integral);
    }

    #[test]
    fn test_coefficients_past_i64_survive_encoding() {
        let mut arena = ExprArena::new();
        let t = arena.real_symbol("t");
        let big = arena.integer(i64::MIN);
        let three = arena.rational(3, 7);
        let scaled = arena.mul([big, three, t]);

        let term = to_rec_expr(&arena, scaled).unwrap();
        assert_eq!(term.to_string(), "(neg (* 27670116110564327424/7 s0))");
        assert_eq!(from_rec_expr(&mut arena, &term).unwrap(), scaled);
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let mut arena = ExprArena::new();
        let term: RecExpr<SpectraLang> = "(+ s7 1)".parse().unwrap();
        assert_eq!(
            from_rec_expr(&mut arena, &term),
            Err(ConvertError::UnknownSymbol("s7".to_string()))
        );
    }

    #[test]
    fn test_division_by_zero_is_rejected() {
        let mut arena = ExprArena::new();
        let term: RecExpr<SpectraLang> = "(/ 1 0)".parse().unwrap();
        assert_eq!(
            from_rec_expr(&mut arena, &term),
            Err(ConvertError::DivisionByZero)
        );
    }
}
