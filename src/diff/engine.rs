//! Differentiation engine - applies calculus rules
//!
//! Every rule builds its result through the canonical constructors, so
//! `0 + x`, `1 * x` and like terms collapse while the derivative is being
//! assembled instead of in a separate simplification pass.

use std::sync::Arc;

use crate::core::error::Result;
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::core::symbol::InternedSymbol;

/// `log(b)` for the base of a power. A negative real approximation has no
/// real logarithm, so it takes the principal branch `log(|b|) + I*pi`.
fn log_of_base(base: &Expr) -> Result<Expr> {
    if let ExprKind::Number(Number::Real(b)) = base.kind()
        && *b < 0.0
    {
        let magnitude = Expr::real(-b).log()?;
        return Ok(magnitude + Expr::i() * Expr::pi());
    }
    base.log()
}

pub(super) fn derive(e: &Expr, var: &InternedSymbol) -> Result<Expr> {
    match e.kind() {
        // Base cases
        ExprKind::Number(_) | ExprKind::Constant(_) | ExprKind::CustomConstant(_) => Ok(Expr::zero()),

        ExprKind::Symbol(s) => Ok(if s == var { Expr::one() } else { Expr::zero() }),

        // Sum rule: (a + b + c + ...)' = a' + b' + c' + ...
        ExprKind::Sum(terms) => {
            let derivatives = terms
                .iter()
                .map(|t| derive(t, var))
                .filter(|d| d.as_ref().map_or(true, |d| !d.is_zero()))
                .collect::<Result<Vec<_>>>()?;
            Ok(Expr::sum(derivatives))
        }

        // N-ary product rule: (a * b * c)' = a' * b * c + a * b' * c + a * b * c'
        ExprKind::Product(factors) => {
            let mut result_terms: Vec<Arc<Expr>> = Vec::new();

            for (i, factor) in factors.iter().enumerate() {
                // The numeric coefficient only scales the other terms
                if factor.is_number() {
                    continue;
                }
                let factor_prime = derive(factor, var)?;
                if factor_prime.is_zero() {
                    continue;
                }

                // Collect all other factors using Arc::clone (just refcount increment)
                let mut all_factors: Vec<Arc<Expr>> = factors
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, f)| Arc::clone(f))
                    .collect();
                all_factors.push(Arc::new(factor_prime));
                result_terms.push(Arc::new(Expr::product_from_arcs(all_factors)));
            }

            Ok(Expr::sum_from_arcs(result_terms))
        }

        ExprKind::Pow(base, exp) => {
            let base_prime = derive(base, var)?;
            let exp_prime = derive(exp, var)?;

            if exp_prime.is_zero() {
                // Power rule: (u^n)' = n * u^(n-1) * u'
                if base_prime.is_zero() {
                    return Ok(Expr::zero());
                }
                let n_minus_1 = Expr::sub_expr(Expr::unwrap_arc(Arc::clone(exp)), Expr::one());
                return Ok(Expr::product_from_arcs(vec![
                    Arc::clone(exp),
                    Arc::new(Expr::pow_from_arcs(Arc::clone(base), Arc::new(n_minus_1))),
                    Arc::new(base_prime),
                ]));
            }

            // Logarithmic differentiation: (u^v)' = u^v * (v' * ln(u) + v * u'/u)
            let log_term = Expr::mul_expr(exp_prime, log_of_base(base)?);
            let base_term = if base_prime.is_zero() {
                Expr::zero()
            } else {
                Expr::product_from_arcs(vec![
                    Arc::clone(exp),
                    Arc::new(base_prime),
                    Arc::new(Expr::pow_from_arcs(Arc::clone(base), Arc::new(Expr::minus_one()))),
                ])
            };
            Ok(Expr::mul_expr(e.clone(), Expr::add_expr(log_term, base_term)))
        }

        // Chain rule: f(u)' = f'(u) * u'
        ExprKind::FunctionCall { func, arg } => {
            let arg_prime = derive(arg, var)?;
            if arg_prime.is_zero() {
                return Ok(Expr::zero());
            }
            let outer = Expr::function_derivative(*func, arg)?;
            Ok(Expr::mul_expr(outer, arg_prime))
        }
    }
}
