use num_traits::{Float, FloatConst, FromPrimitive};
use std::fmt::Debug;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Scalar type accepted by the numeric special functions in [`crate::math`].
///
/// This aggregates `num_traits::Float` (sin, cos, exp, ...), `FloatConst`
/// (PI, E) and the compound assignment operators.
pub trait MathScalar:
    Float + FloatConst + FromPrimitive + Debug + AddAssign + SubAssign + MulAssign + DivAssign + 'static
{
    /// Convert an `f64` literal, NaN if it is not representable
    fn lit(x: f64) -> Self {
        Self::from_f64(x).unwrap_or_else(Self::nan)
    }
}

impl<T> MathScalar for T where
    T: Float
        + FloatConst
        + FromPrimitive
        + Debug
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + 'static
{
}
