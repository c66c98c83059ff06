//! Polynomial expansion
//!
//! Products are distributed over sums and integer powers of sums are
//! multiplied out. Function arguments are left untouched. Results are
//! re-canonicalized after every step, so like terms are collected as the
//! expansion grows instead of at the end.

use std::sync::Arc;

use crate::MAX_EXPANSION_TERMS;
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;

/// Rounds of the fixpoint loop; expansion settles in one or two
const MAX_EXPAND_ROUNDS: usize = 16;

impl Expr {
    /// Expand products and integer powers of sums
    ///
    /// Idempotent: `e.expand().expand() == e.expand()`. When multiplying out
    /// a product would create more than [`MAX_EXPANSION_TERMS`] terms, a
    /// warning is logged and that product is kept as is.
    ///
    /// # Example
    /// ```
    /// use symb_cas::{Expr, parse};
    ///
    /// let e = parse("(x + 1)*(x - 1)").unwrap();
    /// assert_eq!(e.expand(), parse("x^2 - 1").unwrap());
    /// ```
    pub fn expand(&self) -> Expr {
        tracing::debug!(nodes = self.node_count(), "expand");
        let mut current = expand_once(self);
        for round in 1..MAX_EXPAND_ROUNDS {
            let next = expand_once(&current);
            if next == current {
                tracing::trace!(round, "expand reached fixpoint");
                break;
            }
            current = next;
        }
        current
    }
}

fn expand_once(e: &Expr) -> Expr {
    match e.kind() {
        ExprKind::Sum(terms) => Expr::sum(terms.iter().map(|t| expand_once(t)).collect()),
        ExprKind::Product(factors) => distribute(factors.iter().map(|f| expand_once(f)).collect()),
        ExprKind::Pow(base, exp) => {
            let base = expand_once(base);
            let exp = expand_once(exp);
            let n = exp.as_number().and_then(Number::as_i64);
            match (base.kind(), n) {
                (ExprKind::Sum(_), Some(n)) if n >= 2 => power_of_sum(&base, n),
                (ExprKind::Sum(_), Some(n)) if n <= -2 => {
                    Expr::pow_expr(power_of_sum(&base, -n), Expr::minus_one())
                }
                _ => Expr::pow_expr(base, exp),
            }
        }
        _ => e.clone(),
    }
}

fn terms_of(e: &Expr) -> Vec<Arc<Expr>> {
    match e.kind() {
        ExprKind::Sum(terms) => terms.clone(),
        _ => vec![Arc::new(e.clone())],
    }
}

/// `a * b` with both sides multiplied out, or `None` past the term limit
fn multiply_out(a: &Expr, b: &Expr) -> Option<Expr> {
    let (lhs, rhs) = (terms_of(a), terms_of(b));
    let count = lhs.len().saturating_mul(rhs.len());
    if count > MAX_EXPANSION_TERMS {
        tracing::warn!(
            count,
            limit = MAX_EXPANSION_TERMS,
            "expansion would exceed term limit, keeping product unexpanded"
        );
        return None;
    }

    let mut products = Vec::with_capacity(count);
    for x in &lhs {
        for y in &rhs {
            products.push(Arc::new(Expr::product_from_arcs(vec![Arc::clone(x), Arc::clone(y)])));
        }
    }
    Some(Expr::sum_from_arcs(products))
}

/// Distribute a product of already expanded factors
fn distribute(factors: Vec<Expr>) -> Expr {
    let (sums, others): (Vec<Expr>, Vec<Expr>) = factors
        .into_iter()
        .partition(|f| matches!(f.kind(), ExprKind::Sum(_)));

    let mut acc = Expr::product(others);
    let mut kept = Vec::new();
    for s in sums {
        match multiply_out(&acc, &s) {
            Some(p) => acc = p,
            None => kept.push(s),
        }
    }

    if kept.is_empty() {
        acc
    } else {
        kept.push(acc);
        Expr::product(kept)
    }
}

/// `base ** n` for a sum `base` and `n >= 2`, by repeated multiplication
fn power_of_sum(base: &Expr, n: i64) -> Expr {
    let keep = || Expr::pow_expr(base.clone(), Expr::integer(n));
    // A sum of k >= 2 terms raised to n has at least n + 1 terms
    if usize::try_from(n).map_or(true, |n| n >= MAX_EXPANSION_TERMS) {
        tracing::warn!(n, limit = MAX_EXPANSION_TERMS, "power of sum too large to expand");
        return keep();
    }

    let mut acc = base.clone();
    for _ in 1..n {
        match multiply_out(&acc, base) {
            Some(p) => acc = p,
            None => return keep(),
        }
    }
    acc
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_distribute() {
        let y = Expr::symbol("y");
        let e = (x() + 1) * (&y + 2);
        assert_eq!(e.expand(), 2 + 2 * x() + &y + x() * &y);
        assert_eq!((2 * (x() + 1)).expand(), 2 + 2 * x());
    }

    #[test]
    fn test_power_of_sum() {
        let e = (x() + 1).pow(2);
        assert_eq!(e.expand(), x().pow(2) + 2 * x() + 1);
        let inv = (x() + 1).pow(-2);
        assert_eq!(inv.expand(), (x().pow(2) + 2 * x() + 1).pow(-1));
        // non-integer powers of sums stay
        assert_eq!((x() + 1).sqrt().expand(), (x() + 1).sqrt());
    }

    #[test]
    fn test_cancellation() {
        let e = (x() + 1) * (x() - 1) - x().pow(2);
        assert_eq!(e.expand(), Expr::integer(-1));
    }

    #[test]
    fn test_function_arguments_untouched() {
        let inner = (x() + 1) * (x() + 2);
        let e = inner.sin().unwrap();
        assert_eq!(e.expand(), e);
    }

    #[test]
    fn test_idempotent() {
        let e = ((x() + 1).pow(3) * (x() - 2)).sqrt() * (x() + Expr::symbol("y")).pow(2);
        let once = e.expand();
        assert_eq!(once.expand(), once);
    }

    #[test]
    fn test_term_limit_keeps_product() {
        let big = (x() + Expr::symbol("y")).pow(i64::try_from(MAX_EXPANSION_TERMS).unwrap());
        assert_eq!(big.expand(), big);
    }
}
