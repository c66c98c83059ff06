//! Expression constructors.
//!
//! Every constructor here returns a node in canonical form; see the module
//! docs of [`crate::core::expr`] for the rules.

use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use rustc_hash::FxHashMap;

use super::{Expr, ExprKind, compute_expr_hash, expr_cmp, next_id};
use crate::core::constants::Constant;
use crate::core::error::{Result, SymError};
use crate::core::number::Number;
use crate::core::symbol::intern;
use crate::functions::Function;

impl Expr {
    /// Create a new node with a fresh id. No canonicalization is performed.
    pub(crate) fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Self {
            id: next_id(),
            hash,
            kind,
        }
    }

    /// Construction id of this node
    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Structural hash of this node
    #[inline]
    pub const fn structural_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Identity check: true only for clones of the same constructed node.
    ///
    /// Diagnostic only. Two separately built `x` are `==` but not the same node.
    #[inline]
    pub fn same_node(&self, other: &Expr) -> bool {
        self.id == other.id
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn as_number(&self) -> Option<&Number> {
        match &self.kind {
            ExprKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Name of a `Symbol` node
    pub fn as_symbol_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s.name()),
            _ => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self.kind, ExprKind::Number(_))
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self.kind, ExprKind::Symbol(_))
    }

    /// True for predefined and custom constants
    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Constant(_) | ExprKind::CustomConstant(_)
        )
    }

    /// Exact zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Number::is_exact_zero)
    }

    /// Exact one
    #[inline]
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(Number::is_one)
    }

    // -------------------------------------------------------------------------
    // Atoms
    // -------------------------------------------------------------------------

    pub fn number(n: Number) -> Self {
        Self::new(ExprKind::Number(n))
    }

    pub fn integer(n: i64) -> Self {
        Self::number(Number::integer(n))
    }

    pub fn bigint(n: BigInt) -> Self {
        Self::number(Number::Integer(n))
    }

    /// Exact rational `p/q` in lowest terms
    ///
    /// # Errors
    /// `SymError::Domain` when `q` is zero.
    pub fn rational(p: impl Into<BigInt>, q: impl Into<BigInt>) -> Result<Self> {
        Ok(Self::number(Number::rational(p.into(), q.into())?))
    }

    /// Exact `p/q` for a nonzero literal denominator
    pub(crate) fn small_ratio(p: i64, q: i64) -> Self {
        debug_assert!(q != 0);
        Self::number(Number::from_ratio(BigRational::new(
            BigInt::from(p),
            BigInt::from(q),
        )))
    }

    /// Double precision approximation
    pub fn real(x: f64) -> Self {
        Self::number(Number::real(x))
    }

    /// `re + im*I` with real-approximate parts
    pub fn complex(re: f64, im: f64) -> Self {
        Self::number(Number::complex(Number::real(re), Number::real(im)))
    }

    /// `re + im*I` with exact integer parts
    pub fn integer_complex(re: i64, im: i64) -> Self {
        Self::number(Number::complex(Number::integer(re), Number::integer(im)))
    }

    pub fn zero() -> Self {
        Self::number(Number::zero())
    }

    pub fn one() -> Self {
        Self::number(Number::one())
    }

    pub fn minus_one() -> Self {
        Self::number(Number::minus_one())
    }

    /// A differentiable unknown named `name`
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::new(ExprKind::Symbol(intern(name.as_ref())))
    }

    /// A user-named constant. It is not a symbol: its derivative is 0 and
    /// it never equals `Expr::symbol` with the same name.
    pub fn custom_constant(name: impl AsRef<str>) -> Self {
        Self::new(ExprKind::CustomConstant(intern(name.as_ref())))
    }

    pub(crate) fn from_constant(c: Constant) -> Self {
        Self::new(ExprKind::Constant(c))
    }

    /// Unwrap an Arc, cloning only if shared
    pub(crate) fn unwrap_arc(arc: Arc<Self>) -> Self {
        Arc::try_unwrap(arc).unwrap_or_else(|shared| (*shared).clone())
    }

    // -------------------------------------------------------------------------
    // N-ary Sum
    // -------------------------------------------------------------------------

    /// Canonical sum of `terms`
    pub fn sum(terms: Vec<Self>) -> Self {
        Self::sum_from_arcs(terms.into_iter().map(Arc::new).collect())
    }

    /// Canonical sum of already shared terms.
    ///
    /// Flattens nested sums, folds numbers into one leading constant and
    /// collects like terms by their non-numeric part.
    pub fn sum_from_arcs(terms: Vec<Arc<Self>>) -> Self {
        if terms.len() == 1 {
            return terms
                .into_iter()
                .next()
                .map_or_else(Self::zero, Self::unwrap_arc);
        }

        let mut constant = Number::zero();
        let mut collected: Vec<(Number, Arc<Self>)> = Vec::with_capacity(terms.len());
        let mut index: FxHashMap<Arc<Self>, usize> = FxHashMap::default();

        let mut add_term = |term: &Arc<Self>| {
            if let ExprKind::Number(n) = &term.kind {
                constant = constant.add(n);
                return;
            }
            let (coeff, rest) = split_coeff(term);
            if let Some(&i) = index.get(&rest) {
                collected[i].0 = collected[i].0.add(&coeff);
            } else {
                index.insert(Arc::clone(&rest), collected.len());
                collected.push((coeff, rest));
            }
        };

        for t in &terms {
            match &t.kind {
                ExprKind::Sum(inner) => inner.iter().for_each(&mut add_term),
                _ => add_term(t),
            }
        }

        let mut out: Vec<Arc<Self>> = Vec::with_capacity(collected.len() + 1);
        for (coeff, rest) in collected {
            if coeff.is_zero() {
                continue;
            }
            if coeff.is_one() {
                out.push(rest);
            } else {
                out.push(Arc::new(Self::product_from_arcs(vec![
                    Arc::new(Self::number(coeff)),
                    rest,
                ])));
            }
        }
        out.sort_by(|a, b| expr_cmp(a, b));
        if !constant.is_zero() {
            out.insert(0, Arc::new(Self::number(constant)));
        }

        match out.len() {
            0 => Self::zero(),
            1 => out.pop().map_or_else(Self::zero, Self::unwrap_arc),
            _ => Self::new(ExprKind::Sum(out)),
        }
    }

    // -------------------------------------------------------------------------
    // N-ary Product
    // -------------------------------------------------------------------------

    /// Canonical product of `factors`
    pub fn product(factors: Vec<Self>) -> Self {
        Self::product_from_arcs(factors.into_iter().map(Arc::new).collect())
    }

    /// Canonical product of already shared factors.
    ///
    /// Flattens nested products, folds numbers into one leading coefficient
    /// and merges equal bases by adding their exponents.
    pub fn product_from_arcs(factors: Vec<Arc<Self>>) -> Self {
        if factors.len() == 1 {
            return factors
                .into_iter()
                .next()
                .map_or_else(Self::one, Self::unwrap_arc);
        }

        let mut coeff = Number::one();
        // (base, exponents, first original factor)
        let mut groups: Vec<(Arc<Self>, Vec<Arc<Self>>, Arc<Self>)> =
            Vec::with_capacity(factors.len());
        let mut index: FxHashMap<Arc<Self>, usize> = FxHashMap::default();

        let mut add_factor = |f: &Arc<Self>| match &f.kind {
            ExprKind::Number(n) => coeff = coeff.mul(n),
            _ => {
                let (base, exp) = match &f.kind {
                    ExprKind::Pow(b, e) => (Arc::clone(b), Arc::clone(e)),
                    _ => (Arc::clone(f), Arc::new(Self::one())),
                };
                if let Some(&i) = index.get(&base) {
                    groups[i].1.push(exp);
                } else {
                    index.insert(Arc::clone(&base), groups.len());
                    groups.push((base, vec![exp], Arc::clone(f)));
                }
            }
        };

        for f in &factors {
            match &f.kind {
                ExprKind::Product(inner) => inner.iter().for_each(&mut add_factor),
                _ => add_factor(f),
            }
        }

        if coeff.is_zero() {
            return Self::number(coeff);
        }

        let mut out: Vec<Arc<Self>> = Vec::with_capacity(groups.len() + 1);
        let mut needs_refold = false;
        for (base, exps, original) in groups {
            if exps.len() == 1 {
                out.push(original);
                continue;
            }
            let factor = Self::pow_from_arcs(base, Arc::new(Self::sum_from_arcs(exps)));
            match &factor.kind {
                ExprKind::Number(n) => coeff = coeff.mul(n),
                ExprKind::Product(_) => {
                    needs_refold = true;
                    out.push(Arc::new(factor));
                }
                _ => out.push(Arc::new(factor)),
            }
        }

        if needs_refold {
            out.push(Arc::new(Self::number(coeff)));
            return Self::product_from_arcs(out);
        }
        if coeff.is_zero() {
            return Self::number(coeff);
        }

        out.sort_by(|a, b| expr_cmp(a, b));
        if !coeff.is_one() {
            if out.is_empty() {
                return Self::number(coeff);
            }
            // c*(a + b) = c*a + c*b
            if let [only] = out.as_slice()
                && let ExprKind::Sum(terms) = &only.kind
            {
                let scaled = terms
                    .iter()
                    .map(|t| {
                        Arc::new(Self::product_from_arcs(vec![
                            Arc::new(Self::number(coeff.clone())),
                            Arc::clone(t),
                        ]))
                    })
                    .collect();
                return Self::sum_from_arcs(scaled);
            }
            out.insert(0, Arc::new(Self::number(coeff)));
        }

        match out.len() {
            0 => Self::one(),
            1 => out.pop().map_or_else(Self::one, Self::unwrap_arc),
            _ => Self::new(ExprKind::Product(out)),
        }
    }

    // -------------------------------------------------------------------------
    // Binary helpers
    // -------------------------------------------------------------------------

    pub fn add_expr(a: Self, b: Self) -> Self {
        Self::sum(vec![a, b])
    }

    /// `a - b` as `a + (-1)*b`
    pub fn sub_expr(a: Self, b: Self) -> Self {
        Self::sum(vec![a, b.negate()])
    }

    pub fn mul_expr(a: Self, b: Self) -> Self {
        Self::product(vec![a, b])
    }

    /// `a / b` as `a * b^-1`
    ///
    /// # Errors
    /// `SymError::DivideByZero` when `b` is exact zero.
    pub fn div_expr(a: Self, b: Self) -> Result<Self> {
        if b.is_zero() {
            return Err(SymError::DivideByZero);
        }
        Ok(Self::product(vec![a, Self::pow_expr(b, Self::minus_one())]))
    }

    /// Canonical power `base ** exp`
    pub fn pow_expr(base: Self, exp: Self) -> Self {
        Self::pow_from_arcs(Arc::new(base), Arc::new(exp))
    }

    /// `-1 * self`
    pub fn negate(self) -> Self {
        match &self.kind {
            ExprKind::Number(n) => Self::number(n.neg()),
            _ => Self::product(vec![Self::minus_one(), self]),
        }
    }

    /// Canonical power of shared operands.
    ///
    /// Identities: `x**0 = 1` (also for `x = 0`), `x**1 = x`, `1**x = 1`.
    pub fn pow_from_arcs(base: Arc<Self>, exp: Arc<Self>) -> Self {
        if let ExprKind::Number(e) = &exp.kind {
            if e.is_exact_zero() {
                return Self::one();
            }
            if e.is_one() {
                return Self::unwrap_arc(base);
            }
            if e.is_zero() {
                return Self::real(1.0);
            }
        }

        match (&base.kind, &exp.kind) {
            (ExprKind::Number(b), _) if b.is_one() => Self::one(),
            (ExprKind::Number(b), ExprKind::Number(e)) => {
                number_pow(b, e).unwrap_or_else(|| Self::new(ExprKind::Pow(base, exp)))
            }
            // (b^e)^n = b^(e*n) for integer n
            (ExprKind::Pow(inner_base, inner_exp), ExprKind::Number(Number::Integer(_))) => {
                let new_exp = Self::product_from_arcs(vec![Arc::clone(inner_exp), Arc::clone(&exp)]);
                Self::pow_from_arcs(Arc::clone(inner_base), Arc::new(new_exp))
            }
            // (a*b)^n = a^n * b^n for integer n
            (ExprKind::Product(factors), ExprKind::Number(Number::Integer(_))) => {
                let powered = factors
                    .iter()
                    .map(|f| Arc::new(Self::pow_from_arcs(Arc::clone(f), Arc::clone(&exp))))
                    .collect();
                Self::product_from_arcs(powered)
            }
            // E^log(u) = u
            (
                ExprKind::Constant(Constant::E),
                ExprKind::FunctionCall {
                    func: Function::Log,
                    arg,
                },
            ) => Self::unwrap_arc(Arc::clone(arg)),
            _ => Self::new(ExprKind::Pow(base, exp)),
        }
    }
}

/// Split a term into its numeric coefficient and the remaining factors
pub(crate) fn split_coeff(term: &Arc<Expr>) -> (Number, Arc<Expr>) {
    if let ExprKind::Product(factors) = &term.kind
        && let Some(ExprKind::Number(n)) = factors.first().map(|f| &f.kind)
    {
        let rest = if factors.len() == 2 {
            Arc::clone(&factors[1])
        } else {
            // Remaining factors of a canonical product are still canonical
            Arc::new(Expr::new(ExprKind::Product(factors[1..].to_vec())))
        };
        return (n.clone(), rest);
    }
    (Number::one(), Arc::clone(term))
}

/// Fold `b ** e` for numeric operands, or `None` to keep it symbolic
fn number_pow(b: &Number, e: &Number) -> Option<Expr> {
    if b.is_exact_zero() {
        return if e.is_positive() {
            Some(Expr::zero())
        } else if e.is_negative() {
            Some(Expr::from_constant(Constant::ComplexInfinity))
        } else {
            None
        };
    }

    match e {
        Number::Integer(n) => {
            if b.is_exact() {
                let bits = b.bit_size().saturating_mul(n.abs().to_u64().unwrap_or(u64::MAX));
                if bits > crate::MAX_EXACT_POW_BITS {
                    return None;
                }
            }
            b.pow_int(n).ok().map(Expr::number)
        }
        Number::Real(y) if b.is_real() => real_pow(b.to_f64(), *y),
        Number::Rational(r) => match b {
            Number::Real(x) => real_pow(*x, r.to_f64().unwrap_or(f64::NAN)),
            Number::Integer(_) | Number::Rational(_) => exact_rational_pow(b, r),
            Number::Complex(..) => None,
        },
        _ => None,
    }
}

fn real_pow(x: f64, y: f64) -> Option<Expr> {
    if x >= 0.0 || y.fract() == 0.0 {
        Some(Expr::real(x.powf(y)))
    } else {
        None
    }
}

/// Exact base with rational exponent `p/q`
fn exact_rational_pow(b: &Number, r: &BigRational) -> Option<Expr> {
    let q = r.denom().to_u32()?;
    let p = r.numer();

    if b.is_negative() {
        if q != 2 {
            return None;
        }
        // (-b)^(p/2) * I^p
        let positive = Expr::pow_expr(Expr::number(b.neg()), Expr::number(Number::Rational(r.clone())));
        let i_power = Number::imaginary_unit().pow_int(p).ok()?;
        return Some(Expr::product(vec![Expr::number(i_power), positive]));
    }

    if let Some(root) = b.exact_root(q) {
        return root.pow_int(p).ok().map(Expr::number);
    }

    // 2^(3/2) = 2 * 2^(1/2)
    if p.is_positive() && *p > BigInt::from(q) {
        let (whole, frac) = p.div_rem(&BigInt::from(q));
        let int_part = b.pow_int(&whole).ok()?;
        let frac_exp = Number::from_ratio(BigRational::new(frac, BigInt::from(q)));
        return Some(Expr::product(vec![
            Expr::number(int_part),
            Expr::new(ExprKind::Pow(
                Arc::new(Expr::number(b.clone())),
                Arc::new(Expr::number(frac_exp)),
            )),
        ]));
    }
    None
}
