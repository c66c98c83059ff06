//! Derivative of every table function with respect to its argument
//!
//! References:
//! - Trigonometric and hyperbolic: DLMF §4.21, §4.35
//! - Inverse functions: DLMF §4.24, §4.38
//! - Error function: DLMF §7.10 (d/dx erf(x) = 2/√π e^(-x²))
//! - Gamma: DLMF §5.2.1 (Γ'(x) = Γ(x)ψ(x))
//! - Polygamma: DLMF §5.15 (ψ'(x) = ψ₁(x))
//! - Lambert W: Corless et al. (1996) (W'(x) = W(x)/(x(1+W(x))))

use super::Function;
use crate::core::error::{Result, SymError};
use crate::core::expr::Expr;

/// `1/sqrt(e)`
fn rsqrt(e: Expr) -> Expr {
    Expr::pow_expr(e, Expr::small_ratio(-1, 2))
}

fn recip(e: Expr) -> Expr {
    Expr::pow_expr(e, Expr::minus_one())
}

/// `f'(u)`; the caller multiplies by `u'`
pub(super) fn outer_derivative(func: Function, u: &Expr) -> Result<Expr> {
    let u2 = || u.pow(2);
    let inv_u2 = || u.pow(-2);
    let d = match func {
        Function::Sin => u.cos()?,
        Function::Cos => -u.sin()?,
        Function::Tan => u.sec()?.pow(2),
        Function::Csc => -(u.csc()? * u.cot()?),
        Function::Sec => u.sec()? * u.tan()?,
        Function::Cot => -u.csc()?.pow(2),

        Function::Asin => rsqrt(1 - u2()),
        Function::Acos => -rsqrt(1 - u2()),
        Function::Atan => recip(1 + u2()),
        Function::Acsc => -recip(u2() * (1 - inv_u2()).sqrt()),
        Function::Asec => recip(u2() * (1 - inv_u2()).sqrt()),
        Function::Acot => -recip(1 + u2()),

        Function::Sinh => u.cosh()?,
        Function::Cosh => u.sinh()?,
        Function::Tanh => u.sech()?.pow(2),
        Function::Csch => -(u.csch()? * u.coth()?),
        Function::Sech => -(u.sech()? * u.tanh()?),
        Function::Coth => -u.csch()?.pow(2),

        Function::Asinh => rsqrt(u2() + 1),
        Function::Acosh => rsqrt(u2() - 1),
        Function::Atanh | Function::Acoth => recip(1 - u2()),
        Function::Acsch => -recip(u2() * (1 + inv_u2()).sqrt()),
        Function::Asech => -recip(u * (1 - u2()).sqrt()),

        Function::Log => recip(u.clone()),
        Function::Abs => u * recip(u.abs()?),
        Function::Erf => 2 * rsqrt(Expr::pi()) * (-u2()).exp(),
        Function::Erfc => -2 * rsqrt(Expr::pi()) * (-u2()).exp(),

        Function::Gamma => u.gamma()? * u.digamma()?,
        Function::LogGamma => u.digamma()?,
        Function::Digamma => u.trigamma()?,
        Function::LambertW => {
            let w = u.lambertw()?;
            &w * recip(u * (1 + &w))
        }
        Function::Trigamma | Function::Zeta | Function::DirichletEta => {
            return Err(SymError::not_implemented(format!(
                "derivative of {func} with respect to its argument"
            )));
        }
    };
    Ok(d)
}
