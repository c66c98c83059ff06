//! Parallel batch operations using Rayon
//!
//! Each expression is rewritten on its own rayon task; the tasks share
//! nothing but the symbol interner.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_cas = { version = "0.1", features = ["parallel"] }
//! ```

use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::expr::Expr;

/// Differentiate every expression with respect to `var`
///
/// Results keep the input order.
///
/// # Errors
/// The first error of [`Expr::diff`] encountered.
pub fn diff_batch(exprs: &[Expr], var: &Expr) -> Result<Vec<Expr>> {
    tracing::debug!(count = exprs.len(), "diff_batch");
    exprs.par_iter().map(|e| e.diff(var)).collect()
}

/// Expand every expression
pub fn expand_batch(exprs: &[Expr]) -> Vec<Expr> {
    tracing::debug!(count = exprs.len(), "expand_batch");
    exprs.par_iter().map(Expr::expand).collect()
}

/// Jacobian with one rayon task per row
///
/// # Errors
/// See [`crate::jacobian`].
pub fn jacobian_par(exprs: &[Expr], vars: &[&Expr]) -> Result<Vec<Vec<Expr>>> {
    exprs
        .par_iter()
        .map(|e| vars.iter().map(|v| e.diff(v)).collect())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_diff_batch_preserves_order() {
        let x = Expr::symbol("x");
        let exprs: Vec<Expr> = (1..=20_i64).map(|n| x.pow(n)).collect();
        let derivs = diff_batch(&exprs, &x).unwrap();
        for (n, d) in (1..=20_i64).zip(&derivs) {
            assert_eq!(*d, n * x.pow(n - 1));
        }
    }

    #[test]
    fn test_expand_batch() {
        let exprs = vec![parse("(x+1)^2").unwrap(), parse("(x-1)*(x+1)").unwrap()];
        assert_eq!(
            expand_batch(&exprs),
            vec![parse("x^2 + 2*x + 1").unwrap(), parse("x^2 - 1").unwrap()]
        );
    }

    #[test]
    fn test_jacobian_matches_sequential() {
        let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
        let exprs = vec![x.pow(2) * &y, x.sin().unwrap() + &y];
        assert_eq!(
            jacobian_par(&exprs, &[&x, &y]).unwrap(),
            crate::jacobian(&exprs, &[&x, &y]).unwrap()
        );
    }

    #[test]
    fn test_error_propagates() {
        let x = Expr::symbol("x");
        assert!(diff_batch(&[x.clone()], &Expr::integer(1)).is_err());
    }
}
