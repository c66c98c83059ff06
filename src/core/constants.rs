//! Predefined constants and the process-wide constant registry.
//!
//! `Constant` is the node payload for the non-numeric constants. The numeric
//! ones (`0`, `1`, `-1`, `I`) are plain numbers; [`NamedConstant`] covers
//! all thirteen for lookup by tag.

use std::sync::LazyLock;

use crate::core::expr::Expr;
use crate::core::number::Number;

/// Non-numeric predefined constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    Pi,
    E,
    EulerGamma,
    Catalan,
    GoldenRatio,
    Infinity,
    NegInfinity,
    ComplexInfinity,
    NaN,
}

impl Constant {
    /// Name used by the plain-text renderer and the parser
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "E",
            Constant::EulerGamma => "EulerGamma",
            Constant::Catalan => "Catalan",
            Constant::GoldenRatio => "GoldenRatio",
            Constant::Infinity => "oo",
            Constant::NegInfinity => "-oo",
            Constant::ComplexInfinity => "zoo",
            Constant::NaN => "nan",
        }
    }

    /// Floating point value; NaN for complex infinity
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::EulerGamma => 0.577_215_664_901_532_9,
            Constant::Catalan => 0.915_965_594_177_219,
            Constant::GoldenRatio => 1.618_033_988_749_895,
            Constant::Infinity => f64::INFINITY,
            Constant::NegInfinity => f64::NEG_INFINITY,
            Constant::ComplexInfinity | Constant::NaN => f64::NAN,
        }
    }

    /// Finite and strictly positive
    pub fn is_positive_real(self) -> bool {
        matches!(
            self,
            Constant::Pi | Constant::E | Constant::EulerGamma | Constant::Catalan | Constant::GoldenRatio
        )
    }
}

/// Tag for every predefined constant, numeric or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedConstant {
    Zero,
    One,
    MinusOne,
    I,
    Pi,
    E,
    EulerGamma,
    Catalan,
    GoldenRatio,
    Infinity,
    NegInfinity,
    ComplexInfinity,
    NaN,
}

impl NamedConstant {
    pub const ALL: [NamedConstant; 13] = [
        NamedConstant::Zero,
        NamedConstant::One,
        NamedConstant::MinusOne,
        NamedConstant::I,
        NamedConstant::Pi,
        NamedConstant::E,
        NamedConstant::EulerGamma,
        NamedConstant::Catalan,
        NamedConstant::GoldenRatio,
        NamedConstant::Infinity,
        NamedConstant::NegInfinity,
        NamedConstant::ComplexInfinity,
        NamedConstant::NaN,
    ];

    /// Look up a constant by the name the parser accepts
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "I" => NamedConstant::I,
            "pi" => NamedConstant::Pi,
            "E" | "e" => NamedConstant::E,
            "EulerGamma" => NamedConstant::EulerGamma,
            "Catalan" => NamedConstant::Catalan,
            "GoldenRatio" => NamedConstant::GoldenRatio,
            "oo" => NamedConstant::Infinity,
            "zoo" => NamedConstant::ComplexInfinity,
            "nan" => NamedConstant::NaN,
            _ => return None,
        })
    }

    fn build(self) -> Expr {
        match self {
            NamedConstant::Zero => Expr::zero(),
            NamedConstant::One => Expr::one(),
            NamedConstant::MinusOne => Expr::minus_one(),
            NamedConstant::I => Expr::number(Number::imaginary_unit()),
            NamedConstant::Pi => Expr::from_constant(Constant::Pi),
            NamedConstant::E => Expr::from_constant(Constant::E),
            NamedConstant::EulerGamma => Expr::from_constant(Constant::EulerGamma),
            NamedConstant::Catalan => Expr::from_constant(Constant::Catalan),
            NamedConstant::GoldenRatio => Expr::from_constant(Constant::GoldenRatio),
            NamedConstant::Infinity => Expr::from_constant(Constant::Infinity),
            NamedConstant::NegInfinity => Expr::from_constant(Constant::NegInfinity),
            NamedConstant::ComplexInfinity => Expr::from_constant(Constant::ComplexInfinity),
            NamedConstant::NaN => Expr::from_constant(Constant::NaN),
        }
    }
}

/// Built once on first use, never mutated
static REGISTRY: LazyLock<[Expr; 13]> = LazyLock::new(|| NamedConstant::ALL.map(NamedConstant::build));

impl Expr {
    /// The predefined constant `c`
    pub fn named(c: NamedConstant) -> Expr {
        REGISTRY[c as usize].clone()
    }

    pub fn constant(c: Constant) -> Expr {
        let tag = match c {
            Constant::Pi => NamedConstant::Pi,
            Constant::E => NamedConstant::E,
            Constant::EulerGamma => NamedConstant::EulerGamma,
            Constant::Catalan => NamedConstant::Catalan,
            Constant::GoldenRatio => NamedConstant::GoldenRatio,
            Constant::Infinity => NamedConstant::Infinity,
            Constant::NegInfinity => NamedConstant::NegInfinity,
            Constant::ComplexInfinity => NamedConstant::ComplexInfinity,
            Constant::NaN => NamedConstant::NaN,
        };
        Expr::named(tag)
    }

    pub fn pi() -> Expr {
        Expr::named(NamedConstant::Pi)
    }

    pub fn e() -> Expr {
        Expr::named(NamedConstant::E)
    }

    /// The imaginary unit
    pub fn i() -> Expr {
        Expr::named(NamedConstant::I)
    }

    pub fn infinity() -> Expr {
        Expr::named(NamedConstant::Infinity)
    }

    pub fn complex_infinity() -> Expr {
        Expr::named(NamedConstant::ComplexInfinity)
    }

    pub fn nan() -> Expr {
        Expr::named(NamedConstant::NaN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expr::ExprKind;

    #[test]
    fn test_registry_order_matches_tags() {
        for tag in NamedConstant::ALL {
            let a = Expr::named(tag);
            let b = tag.build();
            assert_eq!(a, b, "{tag:?}");
        }
    }

    #[test]
    fn test_registry_shares_nodes() {
        assert!(Expr::pi().same_node(&Expr::pi()));
        assert!(!Expr::pi().same_node(&Expr::from_constant(Constant::Pi)));
    }

    #[test]
    fn test_numeric_constants_are_numbers() {
        assert!(Expr::named(NamedConstant::Zero).is_zero());
        assert!(Expr::named(NamedConstant::One).is_one());
        assert!(matches!(Expr::i().kind(), ExprKind::Number(Number::Complex(..))));
        assert!(matches!(Expr::pi().kind(), ExprKind::Constant(Constant::Pi)));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(NamedConstant::from_name("pi"), Some(NamedConstant::Pi));
        assert_eq!(NamedConstant::from_name("zoo"), Some(NamedConstant::ComplexInfinity));
        assert_eq!(NamedConstant::from_name("x"), None);
    }
}
