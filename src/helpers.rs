//! Multi-variable differentiation helpers
//!
//! Gradient, Hessian and Jacobian over expressions, plus string wrappers
//! that parse the formula and render the results.

use crate::core::error::Result;
use crate::core::expr::Expr;
use crate::parser;

// ===== Expr-based API =====

/// Partial derivatives `[df/dx1, df/dx2, ...]`
///
/// # Example
/// ```
/// use symb_cas::{Expr, gradient};
///
/// let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
/// let f = x.pow(2) + y.pow(2);
/// assert_eq!(gradient(&f, &[&x, &y]).unwrap(), vec![2 * &x, 2 * &y]);
/// ```
///
/// # Errors
/// `SymError::Runtime` if a variable is not a symbol.
pub fn gradient(expr: &Expr, vars: &[&Expr]) -> Result<Vec<Expr>> {
    vars.iter().map(|var| expr.diff(var)).collect()
}

/// Second partial derivatives, `H[i][j] = d2f/dxi dxj`
///
/// # Errors
/// See [`gradient`].
pub fn hessian(expr: &Expr, vars: &[&Expr]) -> Result<Vec<Vec<Expr>>> {
    gradient(expr, vars)?
        .iter()
        .map(|partial| gradient(partial, vars))
        .collect()
}

/// `J[i][j] = dfi/dxj`
///
/// # Example
/// ```
/// use symb_cas::{Expr, jacobian};
///
/// let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
/// let jac = jacobian(&[x.pow(2) + &y, &x * &y], &[&x, &y]).unwrap();
/// assert_eq!(jac[0], vec![2 * &x, Expr::one()]);
/// assert_eq!(jac[1], vec![y.clone(), x.clone()]);
/// ```
///
/// # Errors
/// See [`gradient`].
pub fn jacobian(exprs: &[Expr], vars: &[&Expr]) -> Result<Vec<Vec<Expr>>> {
    exprs.iter().map(|e| gradient(e, vars)).collect()
}

// ===== String-based API =====

fn symbols(vars: &[&str]) -> Vec<Expr> {
    vars.iter().map(|v| Expr::symbol(v)).collect()
}

fn render(exprs: &[Expr]) -> Vec<String> {
    exprs.iter().map(ToString::to_string).collect()
}

/// Gradient of a formula string
///
/// # Example
/// ```
/// let grad = symb_cas::gradient_str("x^2 + y^2", &["x", "y"]).unwrap();
/// assert_eq!(grad, vec!["2*x", "2*y"]);
/// ```
///
/// # Errors
/// Parse errors of the formula.
pub fn gradient_str(formula: &str, vars: &[&str]) -> Result<Vec<String>> {
    let expr = parser::parse(formula)?;
    let vars = symbols(vars);
    let refs: Vec<&Expr> = vars.iter().collect();
    Ok(render(&gradient(&expr, &refs)?))
}

/// Hessian of a formula string
///
/// # Errors
/// Parse errors of the formula.
pub fn hessian_str(formula: &str, vars: &[&str]) -> Result<Vec<Vec<String>>> {
    let expr = parser::parse(formula)?;
    let vars = symbols(vars);
    let refs: Vec<&Expr> = vars.iter().collect();
    Ok(hessian(&expr, &refs)?.iter().map(|row| render(row)).collect())
}

/// Jacobian of several formula strings
///
/// # Errors
/// Parse errors of any formula.
pub fn jacobian_str(formulas: &[&str], vars: &[&str]) -> Result<Vec<Vec<String>>> {
    let exprs = formulas
        .iter()
        .map(|f| parser::parse(f))
        .collect::<Result<Vec<_>>>()?;
    let vars = symbols(vars);
    let refs: Vec<&Expr> = vars.iter().collect();
    Ok(jacobian(&exprs, &refs)?.iter().map(|row| render(row)).collect())
}
