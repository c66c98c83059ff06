//! Symbolic differentiation
//!
//! [`Expr::diff`] applies the sum rule, the generalized product rule, the
//! power rule (with logarithmic differentiation for exponents that depend
//! on the variable) and the chain rule through the function table.
//! Subtrees whose derivative vanishes are dropped as soon as they are
//! found, so functions without a derivative rule only fail when their
//! argument actually depends on the variable.

mod engine;

use crate::core::error::{Result, SymError};
use crate::core::expr::{Expr, ExprKind};

impl Expr {
    /// Derivative with respect to the symbol `var`
    ///
    /// # Example
    /// ```
    /// use symb_cas::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let y = Expr::symbol("y");
    /// assert_eq!((&x * &x).diff(&x).unwrap(), 2 * &x);
    /// assert_eq!((&x * &y).diff(&x).unwrap(), y);
    /// ```
    ///
    /// # Errors
    /// - `SymError::Runtime` if `var` is not a symbol
    /// - `SymError::NotImplemented` for trigamma, zeta and dirichlet_eta of
    ///   an argument that depends on `var`
    pub fn diff(&self, var: &Expr) -> Result<Expr> {
        let ExprKind::Symbol(sym) = var.kind() else {
            return Err(SymError::runtime(format!(
                "can only differentiate with respect to a symbol, got {var}"
            )));
        };
        tracing::debug!(var = sym.name(), nodes = self.node_count(), "diff");
        engine::derive(self, sym)
    }

    /// `n`-th derivative with respect to `var`; `n = 0` returns `self`
    ///
    /// # Errors
    /// See [`Expr::diff`].
    pub fn diff_n(&self, var: &Expr, n: usize) -> Result<Expr> {
        let mut result = self.clone();
        for _ in 0..n {
            if result.is_zero() {
                break;
            }
            result = result.diff(var)?;
        }
        Ok(result)
    }
}
