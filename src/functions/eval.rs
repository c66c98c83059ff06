//! Automatic evaluation on function application
//!
//! Exact arguments only ever produce exact results (special values from the
//! tables below); real-approximation arguments go through [`crate::math`].

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::Function;
use crate::core::constants::Constant;
use crate::core::error::{Result, SymError};
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::math;

/// Largest argument for which gamma and zeta are evaluated exactly
const MAX_EXACT_INDEX: u64 = 200;

/// Bernoulli number `B_n` (with `B_1 = +1/2`), Akiyama–Tanigawa algorithm
pub(crate) fn bernoulli(n: usize) -> BigRational {
    let mut a: Vec<BigRational> = Vec::with_capacity(n + 1);
    for m in 0..=n {
        a.push(BigRational::new(BigInt::one(), BigInt::from(m + 1)));
        for j in (1..=m).rev() {
            let diff = &a[j - 1] - &a[j];
            a[j - 1] = diff * BigRational::from_integer(BigInt::from(j));
        }
    }
    a.swap_remove(0)
}

fn factorial(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

fn ratio(r: BigRational) -> Expr {
    Expr::number(Number::from_ratio(r))
}

/// Exact value of `func(arg)` if the tables know one
pub(super) fn exact_value(func: Function, arg: &Expr) -> Result<Option<Expr>> {
    if let ExprKind::Constant(Constant::NaN) = arg.kind() {
        return Ok(Some(Expr::nan()));
    }
    let value = match func {
        Function::Sin | Function::Cos | Function::Tan | Function::Csc | Function::Sec | Function::Cot => {
            trig_value(func, arg)
        }
        Function::Sinh | Function::Tanh | Function::Asinh | Function::Atanh | Function::Asin | Function::Atan
            if arg.is_zero() =>
        {
            Some(Expr::zero())
        }
        Function::Cosh | Function::Sech if arg.is_zero() => Some(Expr::one()),
        Function::Csch | Function::Coth if arg.is_zero() => Some(Expr::complex_infinity()),
        Function::Acosh | Function::Asech if arg.is_one() => Some(Expr::zero()),
        Function::Tanh => infinity_sign(arg).map(Expr::integer),
        Function::Asin | Function::Acos | Function::Atan | Function::Acot => inverse_trig_value(func, arg),
        Function::Log => log_value(arg),
        Function::Abs => abs_value(arg),
        Function::Erf => {
            if arg.is_zero() {
                Some(Expr::zero())
            } else {
                infinity_sign(arg).map(Expr::integer)
            }
        }
        Function::Erfc => {
            if arg.is_zero() {
                Some(Expr::one())
            } else {
                infinity_sign(arg).map(|s| Expr::integer(1 - s))
            }
        }
        Function::Gamma => gamma_value(arg),
        Function::LogGamma => match arg.as_number().and_then(Number::as_i64) {
            Some(1 | 2) => Some(Expr::zero()),
            Some(n) if n <= 0 => Some(Expr::infinity()),
            _ if is_constant(arg, Constant::Infinity) => Some(Expr::infinity()),
            _ => None,
        },
        Function::Digamma => match arg.as_number().and_then(Number::as_i64) {
            Some(1) => Some(Expr::constant(Constant::EulerGamma).negate()),
            Some(n) if n <= 0 => Some(Expr::complex_infinity()),
            _ => None,
        },
        Function::Trigamma => match arg.as_number().and_then(Number::as_i64) {
            Some(1) => Some(Expr::mul_expr(Expr::small_ratio(1, 6), Expr::pi().pow(2))),
            Some(n) if n <= 0 => Some(Expr::complex_infinity()),
            _ => None,
        },
        Function::Zeta => zeta_value(arg),
        Function::DirichletEta => eta_value(arg)?,
        Function::LambertW => lambertw_value(arg),
        _ => None,
    };
    Ok(value)
}

fn is_constant(e: &Expr, c: Constant) -> bool {
    matches!(e.kind(), ExprKind::Constant(k) if *k == c)
}

/// `1` for `oo`, `-1` for `-oo`
fn infinity_sign(arg: &Expr) -> Option<i64> {
    match arg.kind() {
        ExprKind::Constant(Constant::Infinity) => Some(1),
        ExprKind::Constant(Constant::NegInfinity) => Some(-1),
        _ => None,
    }
}

/// `c` when `arg` is `c*pi` for an exact rational `c` (0 counts)
fn pi_multiple(arg: &Expr) -> Option<BigRational> {
    match arg.kind() {
        ExprKind::Number(n) if n.is_exact_zero() => Some(BigRational::zero()),
        ExprKind::Constant(Constant::Pi) => Some(BigRational::one()),
        ExprKind::Product(factors) if factors.len() == 2 => match (factors[0].kind(), factors[1].kind()) {
            (ExprKind::Number(c), ExprKind::Constant(Constant::Pi)) => c.as_ratio(),
            _ => None,
        },
        _ => None,
    }
}

/// `sin(m*pi/12)` for the multiples of 30 and 45 degrees
fn sin_twelfths(m: i64) -> Option<Expr> {
    let m = m.rem_euclid(24);
    if m >= 12 {
        return sin_twelfths(m - 12).map(Expr::negate);
    }
    let m = if m > 6 { 12 - m } else { m };
    match m {
        0 => Some(Expr::zero()),
        2 => Some(Expr::small_ratio(1, 2)),
        3 => Some(Expr::mul_expr(Expr::small_ratio(1, 2), Expr::integer(2).sqrt())),
        4 => Some(Expr::mul_expr(Expr::small_ratio(1, 2), Expr::integer(3).sqrt())),
        6 => Some(Expr::one()),
        _ => None,
    }
}

fn trig_value(func: Function, arg: &Expr) -> Option<Expr> {
    let c = pi_multiple(arg)?;
    let twelfths = c * BigRational::from_integer(BigInt::from(12));
    if !twelfths.is_integer() {
        return None;
    }
    let m = twelfths.to_integer().mod_floor(&BigInt::from(24)).to_i64()?;
    let sin = || sin_twelfths(m);
    let cos = || sin_twelfths(m + 6);
    let recip = |v: Expr| Expr::pow_expr(v, Expr::minus_one());
    match func {
        Function::Sin => sin(),
        Function::Cos => cos(),
        Function::Tan => Some(Expr::mul_expr(sin()?, recip(cos()?))),
        Function::Csc => Some(recip(sin()?)),
        Function::Sec => Some(recip(cos()?)),
        Function::Cot => Some(Expr::mul_expr(cos()?, recip(sin()?))),
        _ => None,
    }
}

fn inverse_trig_value(func: Function, arg: &Expr) -> Option<Expr> {
    let pi_times = |p: i64, q: i64| Some(Expr::mul_expr(Expr::small_ratio(p, q), Expr::pi()));
    if let Some(s) = infinity_sign(arg) {
        return match func {
            Function::Atan => pi_times(s, 2),
            Function::Acot => Some(Expr::zero()),
            _ => None,
        };
    }
    let r = arg.as_number()?.as_ratio()?;
    let half = BigRational::new(BigInt::one(), BigInt::from(2));
    let is = |v: &BigRational| r == *v;
    match func {
        Function::Asin if r.is_one() => pi_times(1, 2),
        Function::Asin if is(&half) => pi_times(1, 6),
        Function::Acos if r.is_zero() => pi_times(1, 2),
        Function::Acos if r.is_one() => Some(Expr::zero()),
        Function::Acos if is(&-BigRational::one()) => Some(Expr::pi()),
        Function::Acos if is(&half) => pi_times(1, 3),
        Function::Acos if is(&-half.clone()) => pi_times(2, 3),
        Function::Atan | Function::Acot if r.is_one() => pi_times(1, 4),
        Function::Acot if r.is_zero() => pi_times(1, 2),
        _ => None,
    }
}

fn log_value(arg: &Expr) -> Option<Expr> {
    match arg.kind() {
        ExprKind::Number(n) if n.is_one() => Some(Expr::zero()),
        ExprKind::Number(n) if n.is_exact_zero() => Some(Expr::complex_infinity()),
        ExprKind::Number(n) if n.is_minus_one() => Some(Expr::mul_expr(Expr::i(), Expr::pi())),
        ExprKind::Number(n) if *n == Number::imaginary_unit() => Some(Expr::product(vec![
            Expr::small_ratio(1, 2),
            Expr::i(),
            Expr::pi(),
        ])),
        ExprKind::Constant(Constant::E) => Some(Expr::one()),
        ExprKind::Constant(Constant::Infinity | Constant::NegInfinity | Constant::ComplexInfinity) => {
            Some(Expr::infinity())
        }
        _ => None,
    }
}

fn abs_value(arg: &Expr) -> Option<Expr> {
    match arg.kind() {
        ExprKind::Number(n) => match n.abs_real() {
            Some(a) => Some(Expr::number(a)),
            None => {
                // |a + b*I| = sqrt(a² + b²)
                let (re, im) = (n.real_part(), n.imag_part());
                let norm = re.mul(&re).add(&im.mul(&im));
                Some(Expr::number(norm).sqrt())
            }
        },
        ExprKind::Constant(c) if c.is_positive_real() => Some(arg.clone()),
        ExprKind::Constant(Constant::Infinity | Constant::NegInfinity | Constant::ComplexInfinity) => {
            Some(Expr::infinity())
        }
        ExprKind::FunctionCall {
            func: Function::Abs, ..
        } => Some(arg.clone()),
        _ => None,
    }
}

fn gamma_value(arg: &Expr) -> Option<Expr> {
    if is_constant(arg, Constant::Infinity) {
        return Some(Expr::infinity());
    }
    let r = arg.as_number()?.as_ratio()?;
    if r.is_integer() {
        let n = r.to_integer();
        if !n.is_positive() {
            return Some(Expr::complex_infinity());
        }
        let n = n.to_u64().filter(|n| *n <= MAX_EXACT_INDEX)?;
        return Some(Expr::bigint(factorial(n - 1)));
    }
    if *r.denom() != BigInt::from(2) {
        return None;
    }
    let sqrt_pi = Expr::pi().sqrt();
    let k = r.numer();
    if k.is_positive() {
        // Γ(n + 1/2) = (2n)! / (4^n n!) √π
        let n = ((k - BigInt::one()) / BigInt::from(2)).to_u64().filter(|n| *n <= MAX_EXACT_INDEX)?;
        let coeff = BigRational::new(
            factorial(2 * n),
            num_traits::Pow::pow(BigInt::from(4), n) * factorial(n),
        );
        Some(Expr::mul_expr(ratio(coeff), sqrt_pi))
    } else {
        // Γ(1/2 - n) = (-4)^n n! / (2n)! √π
        let n = ((BigInt::one() - k) / BigInt::from(2)).to_u64().filter(|n| *n <= MAX_EXACT_INDEX)?;
        let coeff = BigRational::new(
            num_traits::Pow::pow(BigInt::from(-4), n) * factorial(n),
            factorial(2 * n),
        );
        Some(Expr::mul_expr(ratio(coeff), sqrt_pi))
    }
}

fn zeta_value(arg: &Expr) -> Option<Expr> {
    let s = arg.as_number()?.as_bigint()?.to_i64()?;
    match s {
        0 => Some(Expr::small_ratio(-1, 2)),
        1 => Some(Expr::complex_infinity()),
        s if s > 1 && s % 2 == 0 && s.unsigned_abs() <= MAX_EXACT_INDEX => {
            // ζ(2n) = (-1)^(n+1) B_2n (2π)^2n / (2 (2n)!)
            let two_n = s.unsigned_abs();
            let n = two_n / 2;
            let sign = if n % 2 == 1 { 1 } else { -1 };
            let b = bernoulli(usize::try_from(two_n).ok()?);
            let scale = BigRational::new(
                BigInt::from(sign) * num_traits::Pow::pow(BigInt::from(2), two_n),
                BigInt::from(2) * factorial(two_n),
            );
            Some(Expr::mul_expr(ratio(b * scale), Expr::pi().pow(Expr::bigint(BigInt::from(two_n)))))
        }
        s if s < 0 && s.unsigned_abs() < MAX_EXACT_INDEX => {
            // ζ(-n) = (-1)^n B_(n+1) / (n+1)
            let n = s.unsigned_abs();
            let b = bernoulli(usize::try_from(n + 1).ok()?);
            let sign = if n % 2 == 0 { 1 } else { -1 };
            Some(ratio(b * BigRational::new(BigInt::from(sign), BigInt::from(n + 1))))
        }
        _ => None,
    }
}

fn eta_value(arg: &Expr) -> Result<Option<Expr>> {
    let Some(s) = arg.as_number().and_then(Number::as_i64) else {
        return Ok(None);
    };
    match s {
        1 => Ok(Some(Expr::integer(2).log()?)),
        0 => Ok(Some(Expr::small_ratio(1, 2))),
        _ => Ok(zeta_value(arg).map(|z| {
            // η(s) = (1 - 2^(1-s)) ζ(s)
            let factor = Expr::sub_expr(Expr::one(), Expr::integer(2).pow(Expr::integer(1 - s)));
            Expr::mul_expr(factor, z)
        })),
    }
}

fn lambertw_value(arg: &Expr) -> Option<Expr> {
    if arg.is_zero() {
        return Some(Expr::zero());
    }
    if is_constant(arg, Constant::E) {
        return Some(Expr::one());
    }
    if is_constant(arg, Constant::Infinity) {
        return Some(Expr::infinity());
    }
    let minus_inv_e = Expr::pow_expr(Expr::e(), Expr::minus_one()).negate();
    (*arg == minus_inv_e).then(Expr::minus_one)
}

/// Numeric evaluation for a real-approximation argument
pub(super) fn eval_approx(func: Function, n: &Number) -> Result<Expr> {
    if let Number::Complex(re, im) = n {
        if func == Function::Abs {
            return Ok(Expr::real(re.to_f64().hypot(im.to_f64())));
        }
        return Err(SymError::not_implemented(format!(
            "{func} of a complex approximation"
        )));
    }
    let x = n.to_f64();
    let pole = || Ok(Expr::complex_infinity());
    let value = match func {
        Function::Sin => x.sin(),
        Function::Cos => x.cos(),
        Function::Tan => x.tan(),
        Function::Csc => x.sin().recip(),
        Function::Sec => x.cos().recip(),
        Function::Cot => x.tan().recip(),
        Function::Asin => x.asin(),
        Function::Acos => x.acos(),
        Function::Atan => x.atan(),
        Function::Acsc => x.recip().asin(),
        Function::Asec => x.recip().acos(),
        Function::Acot => x.recip().atan(),
        Function::Sinh => x.sinh(),
        Function::Cosh => x.cosh(),
        Function::Tanh => x.tanh(),
        Function::Csch => x.sinh().recip(),
        Function::Sech => x.cosh().recip(),
        Function::Coth => x.tanh().recip(),
        Function::Asinh => x.asinh(),
        Function::Acosh => x.acosh(),
        Function::Atanh => x.atanh(),
        Function::Acsch => x.recip().asinh(),
        Function::Asech => x.recip().acosh(),
        Function::Acoth => x.recip().atanh(),
        Function::Log => x.ln(),
        Function::Abs => x.abs(),
        Function::Erf => math::eval_erf(x),
        Function::Erfc => math::eval_erfc(x),
        Function::Gamma => match math::eval_gamma(x) {
            Some(v) => v,
            None => return pole(),
        },
        Function::LogGamma => match math::eval_loggamma(x) {
            Some(v) => v,
            None => return Ok(Expr::infinity()),
        },
        Function::Digamma => match math::eval_digamma(x) {
            Some(v) => v,
            None => return pole(),
        },
        Function::Trigamma => match math::eval_trigamma(x) {
            Some(v) => v,
            None => return pole(),
        },
        Function::Zeta => match math::eval_zeta(x) {
            Some(v) => v,
            None => return pole(),
        },
        Function::DirichletEta => match math::eval_dirichlet_eta(x) {
            Some(v) => v,
            None => return pole(),
        },
        Function::LambertW => match math::eval_lambert_w(x) {
            Some(v) => v,
            None => return Err(SymError::domain(format!("lambertw({x}) is not real"))),
        },
    };
    if value.is_nan() && !x.is_nan() {
        return Err(SymError::domain(format!("{func}({x}) is not real")));
    }
    Ok(Expr::real(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn r(p: i64, q: i64) -> BigRational {
        BigRational::new(BigInt::from(p), BigInt::from(q))
    }

    #[test]
    fn test_bernoulli() {
        assert_eq!(bernoulli(0), r(1, 1));
        assert_eq!(bernoulli(1), r(1, 2));
        assert_eq!(bernoulli(2), r(1, 6));
        assert_eq!(bernoulli(3), r(0, 1));
        assert_eq!(bernoulli(4), r(-1, 30));
        assert_eq!(bernoulli(12), r(-691, 2730));
    }

    #[test]
    fn test_trig_special_values() {
        let pi = Expr::pi();
        assert!(Expr::zero().sin().unwrap().is_zero());
        assert!(Expr::zero().cos().unwrap().is_one());
        assert!(pi.sin().unwrap().is_zero());
        assert_eq!(pi.cos().unwrap(), Expr::minus_one());
        let half_pi = Expr::mul_expr(Expr::small_ratio(1, 2), pi.clone());
        assert!(half_pi.sin().unwrap().is_one());
        assert_eq!(half_pi.tan().unwrap(), Expr::complex_infinity());
        let sixth = Expr::mul_expr(Expr::small_ratio(1, 6), pi.clone());
        assert_eq!(sixth.sin().unwrap(), Expr::small_ratio(1, 2));
        assert_eq!(sixth.csc().unwrap(), Expr::integer(2));
        let quarter = Expr::mul_expr(Expr::small_ratio(1, 4), pi.clone());
        assert!(quarter.tan().unwrap().is_one());
        let third = Expr::mul_expr(Expr::small_ratio(1, 3), pi);
        assert_eq!(third.tan().unwrap(), Expr::integer(3).sqrt());
    }

    #[test]
    fn test_log_and_inverse_values() {
        assert!(Expr::one().log().unwrap().is_zero());
        assert!(Expr::e().log().unwrap().is_one());
        assert_eq!(Expr::zero().log().unwrap(), Expr::complex_infinity());
        assert_eq!(
            Expr::minus_one().log().unwrap(),
            Expr::mul_expr(Expr::i(), Expr::pi())
        );
        let half_pi = Expr::mul_expr(Expr::small_ratio(1, 2), Expr::pi());
        assert_eq!(Expr::one().asin().unwrap(), half_pi);
        assert_eq!(Expr::zero().acos().unwrap(), half_pi);
        assert_eq!(Expr::minus_one().acos().unwrap(), Expr::pi());
        assert_eq!(
            Expr::minus_one().asin().unwrap(),
            half_pi.clone().negate()
        );
        assert_eq!(Expr::infinity().atan().unwrap(), half_pi);
    }

    #[test]
    fn test_abs_values() {
        assert_eq!(Expr::integer(-3).abs().unwrap(), Expr::integer(3));
        assert_eq!(Expr::integer_complex(3, 4).abs().unwrap(), Expr::integer(5));
        assert_eq!(Expr::pi().abs().unwrap(), Expr::pi());
        assert_eq!(
            Expr::constant(Constant::NegInfinity).abs().unwrap(),
            Expr::infinity()
        );
        let ax = Expr::symbol("x").abs().unwrap();
        assert_eq!(ax.abs().unwrap(), ax);
    }

    #[test]
    fn test_gamma_family_values() {
        assert_eq!(Expr::integer(5).gamma().unwrap(), Expr::integer(24));
        assert_eq!(Expr::small_ratio(1, 2).gamma().unwrap(), Expr::pi().sqrt());
        assert_eq!(
            Expr::small_ratio(3, 2).gamma().unwrap(),
            Expr::mul_expr(Expr::small_ratio(1, 2), Expr::pi().sqrt())
        );
        assert_eq!(
            Expr::small_ratio(-1, 2).gamma().unwrap(),
            Expr::mul_expr(Expr::integer(-2), Expr::pi().sqrt())
        );
        assert_eq!(Expr::integer(-2).gamma().unwrap(), Expr::complex_infinity());
        assert!(Expr::integer(2).loggamma().unwrap().is_zero());
        assert_eq!(
            Expr::one().digamma().unwrap(),
            Expr::constant(Constant::EulerGamma).negate()
        );
    }

    #[test]
    fn test_zeta_values() {
        assert_eq!(Expr::zero().zeta().unwrap(), Expr::small_ratio(-1, 2));
        assert_eq!(Expr::one().zeta().unwrap(), Expr::complex_infinity());
        assert_eq!(
            Expr::integer(2).zeta().unwrap(),
            Expr::mul_expr(Expr::small_ratio(1, 6), Expr::pi().pow(2))
        );
        assert_eq!(
            Expr::integer(4).zeta().unwrap(),
            Expr::mul_expr(Expr::small_ratio(1, 90), Expr::pi().pow(4))
        );
        assert_eq!(Expr::integer(-1).zeta().unwrap(), Expr::small_ratio(-1, 12));
        assert!(Expr::integer(-2).zeta().unwrap().is_zero());
        assert_eq!(
            Expr::one().dirichlet_eta().unwrap(),
            Expr::integer(2).log().unwrap()
        );
        assert_eq!(
            Expr::integer(2).dirichlet_eta().unwrap(),
            Expr::mul_expr(Expr::small_ratio(1, 12), Expr::pi().pow(2))
        );
    }

    #[test]
    fn test_lambertw_values() {
        assert!(Expr::zero().lambertw().unwrap().is_zero());
        assert!(Expr::e().lambertw().unwrap().is_one());
        let arg = Expr::pow_expr(Expr::e(), Expr::minus_one()).negate();
        assert_eq!(arg.lambertw().unwrap(), Expr::minus_one());
    }

    #[test]
    fn test_error_function_values() {
        assert!(Expr::zero().erf().unwrap().is_zero());
        assert!(Expr::zero().erfc().unwrap().is_one());
        assert!(Expr::infinity().erf().unwrap().is_one());
        assert!(Expr::infinity().erfc().unwrap().is_zero());
    }

    #[test]
    fn test_real_arguments_evaluate() {
        let v = Expr::real(0.0).cos().unwrap();
        assert_eq!(v, Expr::real(1.0));
        let g = Expr::real(5.0).gamma().unwrap();
        let n = g.as_number().unwrap().to_f64();
        assert!((n - 24.0).abs() < 1e-9);
        assert_eq!(Expr::real(1.0).zeta().unwrap(), Expr::complex_infinity());
    }

    #[test]
    fn test_real_zeta_family() {
        let value = |e: Expr| e.as_number().unwrap().to_f64();
        let pi2_6 = std::f64::consts::PI.powi(2) / 6.0;
        assert!((value(Expr::real(2.0).zeta().unwrap()) - pi2_6).abs() < 1e-12);
        assert!((value(Expr::real(2.0).dirichlet_eta().unwrap()) - pi2_6 / 2.0).abs() < 1e-12);
        let gamma = 0.577_215_664_901_532_9;
        assert!((value(Expr::real(1.0).digamma().unwrap()) + gamma).abs() < 1e-12);
    }

    #[test]
    fn test_real_domain_errors() {
        let err = Expr::real(2.0).asin().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        let err = Expr::real(-1.0).log().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        let err = Expr::complex(1.0, 1.0).sin().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }
}
