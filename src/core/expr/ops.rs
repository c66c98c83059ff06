//! Operator overloading for ergonomic expression building.
//!
//! `+`, `-`, `*` and unary `-` are total and return canonical nodes.
//! Division can fail on an exact-zero divisor, so it is the fallible
//! method [`Expr::div`] instead of `std::ops::Div`.

use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;

use super::Expr;
use crate::core::error::Result;
use crate::core::number::Number;

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::integer(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::integer(i64::from(n))
    }
}

impl From<f64> for Expr {
    fn from(x: f64) -> Self {
        Expr::real(x)
    }
}

impl From<BigInt> for Expr {
    fn from(n: BigInt) -> Self {
        Expr::bigint(n)
    }
}

impl From<Number> for Expr {
    fn from(n: Number) -> Self {
        Expr::number(n)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl Expr {
    /// `self ** exp`
    pub fn pow(&self, exp: impl Into<Expr>) -> Expr {
        Expr::pow_expr(self.clone(), exp.into())
    }

    /// `self / other`
    ///
    /// # Errors
    /// `SymError::DivideByZero` when `other` is exact zero.
    pub fn div(&self, other: impl Into<Expr>) -> Result<Expr> {
        Expr::div_expr(self.clone(), other.into())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $ctor:path) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(self, rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $ctor(self, rhs.clone())
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(self.clone(), rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $ctor(self.clone(), rhs.clone())
            }
        }

        impl $trait<i64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: i64) -> Expr {
                $ctor(self, Expr::integer(rhs))
            }
        }

        impl $trait<i64> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: i64) -> Expr {
                $ctor(self.clone(), Expr::integer(rhs))
            }
        }

        impl $trait<Expr> for i64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(Expr::integer(self), rhs)
            }
        }

        impl $trait<&Expr> for i64 {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $ctor(Expr::integer(self), rhs.clone())
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $ctor(self, Expr::real(rhs))
            }
        }

        impl $trait<f64> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $ctor(self.clone(), Expr::real(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, Expr::add_expr);
impl_binary_op!(Sub, sub, Expr::sub_expr);
impl_binary_op!(Mul, mul, Expr::mul_expr);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.negate()
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.clone().negate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    #[test]
    fn test_operators_are_canonical() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(&x + &y, &y + &x);
        assert_eq!(&x * &y, &y * &x);
        assert_eq!(&x * 1, x);
        assert_eq!(&x + 0, x);
        assert_eq!(&x + 0.0, x);
        assert!((&x - &x).is_zero());
        assert_eq!(&x - &x, &y - &y);
    }

    #[test]
    fn test_div_and_pow_methods() {
        let x = Expr::symbol("x");
        assert!(x.div(&x).unwrap().is_one());
        assert!(x.pow(0).is_one());
        assert_eq!(x.pow(1), x);
        assert!(x.div(0).is_err());
    }

    #[test]
    fn test_neg() {
        let x = Expr::symbol("x");
        assert_eq!(-(-&x), x);
        assert_eq!(-&x, &x * -1);
    }
}
