//! Numeric kernel: exact integers and rationals, real approximations and
//! complex numbers with real-number parts.
//!
//! Every constructor normalizes its result so that structurally equal values
//! have a single representation:
//! - a rational with denominator 1 is demoted to an integer
//! - `-0.0` is stored as `0.0`
//! - a complex number with exact-zero imaginary part is demoted to its real part
//! - if either part of a complex number is a real approximation, both are

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::core::error::{Result, SymError};

/// Leaf numeric value of an expression
#[derive(Debug, Clone)]
pub enum Number {
    /// Arbitrary precision integer
    Integer(BigInt),
    /// Rational in lowest terms with positive denominator, never integral
    Rational(BigRational),
    /// Double precision approximation
    Real(f64),
    /// `re + im*I`, both parts real
    Complex(Box<Number>, Box<Number>),
}

fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

impl Number {
    // ===== constructors =====

    pub fn integer(n: i64) -> Self {
        Number::Integer(BigInt::from(n))
    }

    pub fn zero() -> Self {
        Number::Integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Number::Integer(BigInt::one())
    }

    pub fn minus_one() -> Self {
        Number::integer(-1)
    }

    /// The imaginary unit
    pub fn imaginary_unit() -> Self {
        Number::Complex(Box::new(Number::zero()), Box::new(Number::one()))
    }

    /// `p/q` in lowest terms; a zero denominator is a domain error
    pub fn rational(p: BigInt, q: BigInt) -> Result<Self> {
        if q.is_zero() {
            return Err(SymError::domain("rational with zero denominator"));
        }
        Ok(Self::from_ratio(BigRational::new(p, q)))
    }

    /// Normalize a ratio (already reduced by `BigRational::new`)
    pub fn from_ratio(r: BigRational) -> Self {
        if r.is_integer() {
            Number::Integer(r.to_integer())
        } else {
            Number::Rational(r)
        }
    }

    pub fn real(x: f64) -> Self {
        Number::Real(if x == 0.0 { 0.0 } else { x })
    }

    /// `re + im*I` with normalization; both parts must be real numbers
    pub fn complex(re: Number, im: Number) -> Self {
        debug_assert!(re.is_real() && im.is_real());
        if im.is_exact() && im.is_zero() {
            return re;
        }
        match (&re, &im) {
            (Number::Real(_), _) | (_, Number::Real(_)) => Number::Complex(
                Box::new(Number::real(re.to_f64())),
                Box::new(Number::real(im.to_f64())),
            ),
            _ => Number::Complex(Box::new(re), Box::new(im)),
        }
    }

    // ===== predicates =====

    /// True for integers, rationals and exact complex numbers
    pub fn is_exact(&self) -> bool {
        match self {
            Number::Integer(_) | Number::Rational(_) => true,
            Number::Real(_) => false,
            Number::Complex(re, im) => re.is_exact() && im.is_exact(),
        }
    }

    pub fn is_real(&self) -> bool {
        !matches!(self, Number::Complex(..))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_zero(),
            Number::Rational(_) | Number::Complex(..) => false,
            Number::Real(x) => *x == 0.0,
        }
    }

    pub fn is_exact_zero(&self) -> bool {
        matches!(self, Number::Integer(n) if n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Number::Integer(n) if n.is_one())
    }

    pub fn is_minus_one(&self) -> bool {
        matches!(self, Number::Integer(n) if *n == BigInt::from(-1))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Strictly negative real value
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_negative(),
            Number::Rational(r) => r.is_negative(),
            Number::Real(x) => *x < 0.0,
            Number::Complex(..) => false,
        }
    }

    /// Strictly positive real value
    pub fn is_positive(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_positive(),
            Number::Rational(r) => r.is_positive(),
            Number::Real(x) => *x > 0.0,
            Number::Complex(..) => false,
        }
    }

    /// True when a printed form would start with a minus sign
    pub fn has_negative_sign(&self) -> bool {
        match self {
            Number::Complex(re, im) => {
                if re.is_zero() {
                    im.is_negative()
                } else {
                    re.is_negative()
                }
            }
            _ => self.is_negative(),
        }
    }

    pub fn is_nan(&self) -> bool {
        match self {
            Number::Real(x) => x.is_nan(),
            Number::Complex(re, im) => re.is_nan() || im.is_nan(),
            _ => false,
        }
    }

    // ===== accessors =====

    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Number::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_bigint().and_then(ToPrimitive::to_i64)
    }

    /// Exact value as a ratio (integers have denominator 1)
    pub fn as_ratio(&self) -> Option<BigRational> {
        match self {
            Number::Integer(n) => Some(BigRational::from_integer(n.clone())),
            Number::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// Real part approximated as `f64` (NaN for complex numbers)
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => n.to_f64().unwrap_or(f64::NAN),
            Number::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
            Number::Real(x) => *x,
            Number::Complex(..) => f64::NAN,
        }
    }

    pub fn real_part(&self) -> Number {
        match self {
            Number::Complex(re, _) => (**re).clone(),
            other => other.clone(),
        }
    }

    pub fn imag_part(&self) -> Number {
        match self {
            Number::Complex(_, im) => (**im).clone(),
            Number::Real(_) => Number::real(0.0),
            _ => Number::zero(),
        }
    }

    // ===== arithmetic =====

    pub fn neg(&self) -> Number {
        match self {
            Number::Integer(n) => Number::Integer(-n),
            Number::Rational(r) => Number::Rational(-r),
            Number::Real(x) => Number::real(-x),
            Number::Complex(re, im) => Number::complex(re.neg(), im.neg()),
        }
    }

    pub fn add(&self, other: &Number) -> Number {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a + b),
            (Number::Complex(..), _) | (_, Number::Complex(..)) => Number::complex(
                self.real_part().add(&other.real_part()),
                self.imag_part().add(&other.imag_part()),
            ),
            (Number::Real(_), _) | (_, Number::Real(_)) => {
                Number::real(self.to_f64() + other.to_f64())
            }
            _ => match (self.as_ratio(), other.as_ratio()) {
                (Some(a), Some(b)) => Number::from_ratio(a + b),
                _ => Number::real(f64::NAN),
            },
        }
    }

    pub fn sub(&self, other: &Number) -> Number {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Number) -> Number {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(a * b),
            (Number::Complex(..), _) | (_, Number::Complex(..)) => {
                let (a, b) = (self.real_part(), self.imag_part());
                let (c, d) = (other.real_part(), other.imag_part());
                Number::complex(a.mul(&c).sub(&b.mul(&d)), a.mul(&d).add(&b.mul(&c)))
            }
            (Number::Real(_), _) | (_, Number::Real(_)) => {
                Number::real(self.to_f64() * other.to_f64())
            }
            _ => match (self.as_ratio(), other.as_ratio()) {
                (Some(a), Some(b)) => Number::from_ratio(a * b),
                _ => Number::real(f64::NAN),
            },
        }
    }

    /// Multiplicative inverse; exact zero has none
    pub fn recip(&self) -> Result<Number> {
        match self {
            Number::Integer(n) if n.is_zero() => Err(SymError::DivideByZero),
            Number::Integer(n) => Ok(Number::from_ratio(BigRational::new(BigInt::one(), n.clone()))),
            Number::Rational(r) => Ok(Number::from_ratio(r.recip())),
            Number::Real(x) => Ok(Number::real(1.0 / x)),
            Number::Complex(re, im) => {
                // 1/(a+bi) = (a-bi)/(a²+b²)
                let denom = re.mul(re).add(&im.mul(im));
                let inv = denom.recip()?;
                Ok(Number::complex(re.mul(&inv), im.neg().mul(&inv)))
            }
        }
    }

    pub fn div(&self, other: &Number) -> Result<Number> {
        Ok(self.mul(&other.recip()?))
    }

    /// Power with an integer exponent, by repeated squaring
    pub fn pow_int(&self, exp: &BigInt) -> Result<Number> {
        if exp.is_negative() {
            return self.recip()?.pow_int(&-exp);
        }
        match self {
            Number::Integer(n) => match exp.to_u32() {
                Some(e) => Ok(Number::Integer(num_traits::Pow::pow(n, e))),
                None => Err(SymError::runtime("integer exponent too large")),
            },
            Number::Rational(r) => match exp.to_u32() {
                Some(e) => Ok(Number::from_ratio(BigRational::new(
                    num_traits::Pow::pow(r.numer(), e),
                    num_traits::Pow::pow(r.denom(), e),
                ))),
                None => Err(SymError::runtime("integer exponent too large")),
            },
            Number::Real(x) => Ok(Number::real(x.powf(exp.to_f64().unwrap_or(f64::NAN)))),
            Number::Complex(..) => {
                let mut result = Number::one();
                let mut base = self.clone();
                let mut e = exp.clone();
                let two = BigInt::from(2);
                while e.is_positive() {
                    if e.is_odd() {
                        result = result.mul(&base);
                    }
                    base = base.mul(&base);
                    e /= &two;
                }
                Ok(result)
            }
        }
    }

    /// Exact `q`-th root of a non-negative exact real, if it is itself exact
    pub fn exact_root(&self, q: u32) -> Option<Number> {
        let r = self.as_ratio()?;
        if r.is_negative() || q == 0 {
            return None;
        }
        let num_root = r.numer().nth_root(q);
        let den_root = r.denom().nth_root(q);
        let check_num: BigInt = num_traits::Pow::pow(&num_root, q);
        let check_den: BigInt = num_traits::Pow::pow(&den_root, q);
        if &check_num == r.numer() && &check_den == r.denom() {
            Some(Number::from_ratio(BigRational::new(num_root, den_root)))
        } else {
            None
        }
    }

    /// Absolute value of a real number; `None` for complex numbers
    pub fn abs_real(&self) -> Option<Number> {
        match self {
            Number::Integer(n) => Some(Number::Integer(n.abs())),
            Number::Rational(r) => Some(Number::Rational(r.abs())),
            Number::Real(x) => Some(Number::real(x.abs())),
            Number::Complex(..) => None,
        }
    }

    /// Number of bits of the integer parts, used to guard exact powers
    pub(crate) fn bit_size(&self) -> u64 {
        match self {
            Number::Integer(n) => n.bits(),
            Number::Rational(r) => r.numer().bits().max(r.denom().bits()),
            Number::Real(_) => 64,
            Number::Complex(re, im) => re.bit_size().max(im.bit_size()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Number::Integer(_) => 0,
            Number::Rational(_) => 1,
            Number::Real(_) => 2,
            Number::Complex(..) => 3,
        }
    }

    fn cmp_real(&self, other: &Number) -> Ordering {
        match (self.as_ratio(), other.as_ratio()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.to_f64().total_cmp(&other.to_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Rational(a), Number::Rational(b)) => a == b,
            (Number::Real(a), Number::Real(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Number::Complex(ar, ai), Number::Complex(br, bi)) => ar == br && ai == bi,
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind_rank().hash(state);
        match self {
            Number::Integer(n) => n.hash(state),
            Number::Rational(r) => {
                r.numer().hash(state);
                r.denom().hash(state);
            }
            Number::Real(x) => canonical_bits(*x).hash(state),
            Number::Complex(re, im) => {
                re.hash(state);
                im.hash(state);
            }
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order: by real part, then imaginary part, then representation
impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.real_part()
            .cmp_real(&other.real_part())
            .then_with(|| self.imag_part().cmp_real(&other.imag_part()))
            .then_with(|| self.kind_rank().cmp(&other.kind_rank()))
            .then_with(|| {
                if let (Number::Real(a), Number::Real(b)) = (self, other) {
                    canonical_bits(*a).cmp(&canonical_bits(*b))
                } else {
                    Ordering::Equal
                }
            })
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::integer(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::integer(i64::from(n))
    }
}

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::real(x)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    fn q(p: i64, d: i64) -> Number {
        Number::rational(BigInt::from(p), BigInt::from(d)).unwrap()
    }

    #[test]
    fn test_rational_normalization() {
        assert_eq!(q(4, 2), Number::integer(2));
        assert_eq!(q(2, -4), q(-1, 2));
        if let Number::Rational(r) = q(6, -9) {
            assert_eq!(*r.numer(), BigInt::from(-2));
            assert_eq!(*r.denom(), BigInt::from(3));
        } else {
            panic!("expected rational");
        }
    }

    #[test]
    fn test_zero_denominator_is_domain_error() {
        let err = Number::rational(BigInt::one(), BigInt::zero()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Domain);
    }

    #[test]
    fn test_exact_arithmetic() {
        assert_eq!(q(1, 2).add(&q(1, 3)), q(5, 6));
        assert_eq!(q(1, 2).add(&q(1, 2)), Number::one());
        assert_eq!(q(2, 3).mul(&Number::integer(3)), Number::integer(2));
        assert_eq!(Number::integer(1).div(&Number::integer(3)).unwrap(), q(1, 3));
        assert_eq!(
            Number::integer(1).div(&Number::zero()),
            Err(SymError::DivideByZero)
        );
    }

    #[test]
    fn test_big_integers_do_not_overflow() {
        let big = Number::integer(i64::MAX);
        let sq = big.mul(&big);
        let expected: BigInt = BigInt::from(i64::MAX) * BigInt::from(i64::MAX);
        assert_eq!(sq, Number::Integer(expected));
    }

    #[test]
    fn test_pow_int() {
        assert_eq!(
            Number::integer(2).pow_int(&BigInt::from(10)).unwrap(),
            Number::integer(1024)
        );
        assert_eq!(
            Number::integer(2).pow_int(&BigInt::from(-2)).unwrap(),
            q(1, 4)
        );
        assert_eq!(
            Number::zero().pow_int(&BigInt::from(-1)),
            Err(SymError::DivideByZero)
        );
        // I^2 = -1
        assert_eq!(
            Number::imaginary_unit().pow_int(&BigInt::from(2)).unwrap(),
            Number::minus_one()
        );
    }

    #[test]
    fn test_complex_normalization() {
        let c = Number::complex(Number::integer(3), Number::zero());
        assert_eq!(c, Number::integer(3));
        let mixed = Number::complex(Number::integer(1), Number::real(2.0));
        assert_eq!(
            mixed,
            Number::Complex(Box::new(Number::Real(1.0)), Box::new(Number::Real(2.0)))
        );
        // (1+2i)(1-2i) = 5
        let a = Number::complex(Number::integer(1), Number::integer(2));
        let b = Number::complex(Number::integer(1), Number::integer(-2));
        assert_eq!(a.mul(&b), Number::integer(5));
        // 1/I = -I
        assert_eq!(
            Number::imaginary_unit().recip().unwrap(),
            Number::imaginary_unit().neg()
        );
    }

    #[test]
    fn test_real_zero_normalized() {
        assert_eq!(Number::real(-0.0), Number::real(0.0));
        assert!(Number::real(0.0).is_zero());
        assert!(!Number::real(0.0).is_exact_zero());
        assert_ne!(Number::real(2.0), Number::integer(2));
    }

    #[test]
    fn test_exact_root() {
        assert_eq!(Number::integer(9).exact_root(2), Some(Number::integer(3)));
        assert_eq!(q(8, 27).exact_root(3), Some(q(2, 3)));
        assert_eq!(Number::integer(2).exact_root(2), None);
        assert_eq!(Number::integer(-4).exact_root(2), None);
    }

    #[test]
    fn test_total_order() {
        let mut nums = vec![Number::real(1.5), q(1, 2), Number::integer(-3), Number::integer(1)];
        nums.sort();
        assert_eq!(
            nums,
            vec![Number::integer(-3), q(1, 2), Number::integer(1), Number::real(1.5)]
        );
        assert!(Number::integer(2) < Number::real(2.0));
    }
}
