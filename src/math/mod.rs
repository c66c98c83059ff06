//! Numeric special functions
//!
//! Used when a function is applied to a real-approximation argument. Exact
//! arguments never reach this module.
//!
//! # Domain Validation
//!
//! Functions that can produce undefined results return `Option<T>`:
//!
//! - **Gamma family**: non-positive integers are poles
//! - **Zeta function**: s=1 is a pole
//! - **Lambert W**: x < -1/e has no real value

use crate::traits::MathScalar;

/// Error function. Power series near zero, continued fraction for |x| >= 2.
pub fn eval_erf<T: MathScalar>(x: T) -> T {
    if x.is_nan() {
        return x;
    }
    let two = T::lit(2.0);
    if x.abs() >= two {
        let tail = eval_erfc_tail(x.abs());
        return x.signum() * (T::one() - tail);
    }

    let coeff = two / T::PI().sqrt();
    let mut sum = T::zero();
    let mut factorial = T::one();
    let mut power = x;

    for n in 0..60 {
        let term = power / (factorial * T::lit(f64::from(2 * n + 1)));
        if n % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        factorial *= T::lit(f64::from(n + 1));
        power *= x * x;
        if term.abs() < T::epsilon() {
            break;
        }
    }
    coeff * sum
}

/// Complementary error function
pub fn eval_erfc<T: MathScalar>(x: T) -> T {
    if x >= T::lit(2.0) {
        eval_erfc_tail(x)
    } else {
        T::one() - eval_erf(x)
    }
}

/// erfc(x) for x >= 2 by backward evaluation of the Laplace continued fraction
fn eval_erfc_tail<T: MathScalar>(x: T) -> T {
    let mut t = x;
    for k in (1..=80).rev() {
        t = x + T::lit(f64::from(k) / 2.0) / t;
    }
    (-(x * x)).exp() / (T::PI().sqrt() * t)
}

/// Gamma function (Lanczos approximation, reflection below 1/2)
pub fn eval_gamma<T: MathScalar>(x: T) -> Option<T> {
    if x <= T::zero() && x.fract() == T::zero() {
        return None;
    }
    let g = T::lit(7.0);
    let c = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    let half = T::lit(0.5);
    let one = T::one();
    let pi = T::PI();

    if x < half {
        Some(pi / ((pi * x).sin() * eval_gamma(one - x)?))
    } else {
        let x = x - one;
        let mut ag = T::lit(c[0]);
        for (i, &coeff) in c.iter().enumerate().skip(1) {
            ag += T::lit(coeff) / (x + T::lit(i as f64));
        }
        let t = x + g + half;
        let two_pi_sqrt = (T::lit(2.0) * pi).sqrt();
        Some(two_pi_sqrt * t.powf(x + half) * (-t).exp() * ag)
    }
}

/// log(gamma(x)), real only where gamma(x) > 0
pub fn eval_loggamma<T: MathScalar>(x: T) -> Option<T> {
    let g = eval_gamma(x)?;
    if g > T::zero() { Some(g.ln()) } else { Some(T::nan()) }
}

/// Both polygamma functions shift the argument up to this value before
/// switching to the asymptotic series.
const POLYGAMMA_SHIFT: f64 = 10.0;

/// Digamma ψ(x): recurrence up to x >= 10, then asymptotic series
pub fn eval_digamma<T: MathScalar>(x: T) -> Option<T> {
    if x <= T::zero() && x.fract() == T::zero() {
        return None;
    }
    let half = T::lit(0.5);
    let one = T::one();
    let pi = T::PI();

    if x < half {
        return Some(eval_digamma(one - x)? - pi * (pi * x).cos() / (pi * x).sin());
    }
    let mut xv = x;
    let mut result = T::zero();
    let shift = T::lit(POLYGAMMA_SHIFT);
    while xv < shift {
        result -= one / xv;
        xv += one;
    }
    result += xv.ln() - half / xv;
    let x2 = xv * xv;
    let x4 = x2 * x2;

    // Bernoulli terms B_2k / (2k x^2k)
    let t1 = one / (T::lit(12.0) * x2);
    let t2 = one / (T::lit(120.0) * x4);
    let t3 = one / (T::lit(252.0) * x4 * x2);
    let t4 = one / (T::lit(240.0) * x4 * x4);
    let t5 = one / (T::lit(132.0) * x4 * x4 * x2);

    Some(result - t1 + t2 - t3 + t4 - t5)
}

/// Trigamma ψ₁(x)
pub fn eval_trigamma<T: MathScalar>(x: T) -> Option<T> {
    if x <= T::zero() && x.fract() == T::zero() {
        return None;
    }
    let one = T::one();
    let pi = T::PI();
    if x < T::lit(0.5) {
        // ψ₁(1-x) + ψ₁(x) = π² / sin²(πx)
        let s = (pi * x).sin();
        return Some(pi * pi / (s * s) - eval_trigamma(one - x)?);
    }
    let mut xv = x;
    let mut r = T::zero();
    let shift = T::lit(POLYGAMMA_SHIFT);

    while xv < shift {
        r += one / (xv * xv);
        xv += one;
    }
    let x2 = xv * xv;
    let x3 = x2 * xv;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;
    let half = T::lit(0.5);

    Some(
        r + one / xv + half / x2 + one / (T::lit(6.0) * x3) - one / (T::lit(30.0) * x5)
            + one / (T::lit(42.0) * x7)
            - one / (T::lit(30.0) * x9)
            + T::lit(5.0) / (T::lit(66.0) * x9 * x2),
    )
}

/// Dirichlet eta η(s) for s > 0 (Borwein's algorithm), via zeta otherwise
pub fn eval_dirichlet_eta<T: MathScalar>(s: T) -> Option<T> {
    let one = T::one();
    if s <= T::zero() {
        let factor = one - T::lit(2.0).powf(one - s);
        return Some(factor * eval_zeta(s)?);
    }
    let n: usize = 40;
    let nt = T::lit(n as f64);
    // d_k = n * Σ_{i<=k} (n+i-1)! 4^i / ((n-i)! (2i)!), starting from the
    // i = 0 term (n-1)!/n! = 1/n
    let mut d = Vec::with_capacity(n + 1);
    let mut term = one / nt;
    let mut acc = T::zero();
    for i in 0..=n {
        acc += term;
        d.push(nt * acc);
        let it = T::lit(i as f64);
        let two_i = T::lit(2.0) * it;
        term *= T::lit(4.0) * (nt + it) * (nt - it) / ((two_i + one) * (two_i + T::lit(2.0)));
    }
    let dn = d[n];
    let mut sum = T::zero();
    for (k, dk) in d.iter().take(n).enumerate() {
        let sign = if k % 2 == 0 { one } else { -one };
        sum += sign * (*dk - dn) / T::lit((k + 1) as f64).powf(s);
    }
    Some(-sum / dn)
}

/// Riemann zeta ζ(s); `None` at the pole s = 1
pub fn eval_zeta<T: MathScalar>(s: T) -> Option<T> {
    let one = T::one();
    if s == one {
        return None;
    }
    if s == T::zero() {
        return Some(T::lit(-0.5));
    }
    if s > T::zero() {
        let eta = eval_dirichlet_eta(s)?;
        return Some(eta / (one - T::lit(2.0).powf(one - s)));
    }
    // Reflection: ζ(s) = 2^s π^(s-1) sin(πs/2) Γ(1-s) ζ(1-s)
    let pi = T::PI();
    let two = T::lit(2.0);
    let gs = eval_gamma(one - s)?;
    let z = eval_zeta(one - s)?;
    Some(two.powf(s) * pi.powf(s - one) * (pi * s / two).sin() * gs * z)
}

/// Principal branch of the Lambert W function (Halley iteration)
pub fn eval_lambert_w<T: MathScalar>(x: T) -> Option<T> {
    let one = T::one();
    let e = T::E();
    let e_inv = one / e;

    if x < -e_inv {
        return None;
    }
    if x == T::zero() {
        return Some(T::zero());
    }
    if (x + e_inv).abs() < T::lit(1e-12) {
        return Some(-one);
    }

    let two = T::lit(2.0);
    let mut w = if x < T::lit(-0.3) {
        let p = (two * (e * x + one)).sqrt();
        -one + p - p * p / T::lit(3.0) + T::lit(11.0 / 72.0) * p * p * p
    } else if x < T::zero() {
        -one + (two * (e * x + one)).sqrt()
    } else if x < one {
        x * (one - x * (one - x * T::lit(1.5)))
    } else if x < T::lit(3.0) {
        let l = x.ln();
        l - l.ln().max(T::zero())
    } else {
        let l1 = x.ln();
        let l2 = l1.ln();
        l1 - l2 + l2 / l1
    };

    let tolerance = T::lit(1e-15);
    let half = T::lit(0.5);
    for _ in 0..50 {
        if w <= -one {
            w = T::lit(-0.99);
        }
        let ew = w.exp();
        let f = w * ew - x;
        let w1 = w + one;
        if w1.abs() < tolerance {
            break;
        }
        let fp = ew * w1;
        let fpp = ew * (w + two);
        let d = f * fp / (fp * fp - half * f * fpp);
        w -= d;
        if d.abs() < tolerance * (one + w.abs()) {
            break;
        }
    }
    Some(w)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn test_erf_values() {
        assert!(close(eval_erf(0.0), 0.0));
        assert!(close(eval_erf(0.5), 0.520_499_877_813_046_5));
        assert!(close(eval_erf(-1.0), -0.842_700_792_949_714_9));
        assert!(close(eval_erf(3.0), 0.999_977_909_503_001_4));
        assert!(close(eval_erfc(3.0), 2.209_049_699_858_544e-5));
    }

    #[test]
    fn test_gamma_values() {
        assert!(close(eval_gamma(5.0).unwrap(), 24.0));
        assert!(close(eval_gamma(0.5).unwrap(), std::f64::consts::PI.sqrt()));
        assert!(eval_gamma(-2.0).is_none());
        assert!(close(eval_loggamma(10.0).unwrap(), 362_880.0_f64.ln()));
    }

    #[test]
    fn test_polygamma_values() {
        // ψ(1) = -γ
        assert!(close(eval_digamma(1.0).unwrap(), -0.577_215_664_901_532_9));
        // ψ₁(1) = π²/6
        let pi2_6 = std::f64::consts::PI.powi(2) / 6.0;
        assert!(close(eval_trigamma(1.0).unwrap(), pi2_6));
        // ψ(1/2) = -γ - 2 ln 2
        let psi_half = -0.577_215_664_901_532_9 - 2.0 * std::f64::consts::LN_2;
        assert!(close(eval_digamma(0.5).unwrap(), psi_half));
        // ψ₁(1/2) = π²/2
        assert!(close(eval_trigamma(0.5).unwrap(), 3.0 * pi2_6));
    }

    #[test]
    fn test_zeta_values() {
        let pi2_6 = std::f64::consts::PI.powi(2) / 6.0;
        assert!(close(eval_zeta(2.0).unwrap(), pi2_6));
        assert!(close(eval_zeta(0.0).unwrap(), -0.5));
        assert!(close(eval_zeta(-1.0).unwrap(), -1.0 / 12.0));
        assert!(close(eval_zeta(0.5).unwrap(), -1.460_354_508_809_586_8));
        assert!(eval_zeta(1.0).is_none());
        assert!(close(eval_dirichlet_eta(1.0).unwrap(), std::f64::consts::LN_2));
        // η(2) = π²/12
        assert!(close(eval_dirichlet_eta(2.0).unwrap(), pi2_6 / 2.0));
        // ζ(4) = π⁴/90
        assert!(close(eval_zeta(4.0).unwrap(), std::f64::consts::PI.powi(4) / 90.0));
    }

    #[test]
    fn test_lambert_w_values() {
        assert!(close(eval_lambert_w(std::f64::consts::E).unwrap(), 1.0));
        assert!(close(eval_lambert_w(1.0).unwrap(), 0.567_143_290_409_783_8));
        assert!(eval_lambert_w(-1.0).is_none());
    }
}
