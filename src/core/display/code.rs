//! C and JavaScript code printers
//!
//! Both reuse the infix layout of the plain-text printer. Complex values,
//! complex infinity and functions without a counterpart in the target
//! language's standard library make the whole rendering fail.

use super::{Dialect, PREC_ATOM, PREC_MUL, PREC_NEG, Rendered, real_text, render};
use crate::core::constants::Constant;
use crate::core::expr::Expr;
use crate::core::number::Number;
use crate::functions::Function;

/// Built-in call name, or a reciprocal identity `1/f(x)` / `f(1/x)`
enum Target {
    Call(&'static str),
    Recip(&'static str),
    OfRecip(&'static str),
}

fn real_literal(x: f64, inf: &str, nan: &str) -> Rendered {
    if x.is_nan() {
        Rendered::atom(nan)
    } else if x.is_infinite() {
        if x > 0.0 {
            Rendered::atom(inf)
        } else {
            Rendered::new(format!("-{inf}"), PREC_NEG)
        }
    } else {
        let prec = if x < 0.0 { PREC_NEG } else { PREC_ATOM };
        Rendered::new(real_text(x), prec)
    }
}

/// Literal for a constant without a named macro in the target language
fn constant_literal(c: Constant) -> Rendered {
    Rendered::atom(real_text(c.value()))
}

fn call_target(
    targets: fn(Function) -> Option<Target>,
    one: &str,
    func: Function,
    arg: String,
) -> Option<Rendered> {
    Some(match targets(func)? {
        Target::Call(name) => Rendered::atom(format!("{name}({arg})")),
        Target::Recip(name) => Rendered::new(format!("{one}/{name}({arg})"), PREC_MUL),
        Target::OfRecip(name) => Rendered::atom(format!("{name}({one}/({arg}))")),
    })
}

// =============================================================================
// C
// =============================================================================

struct CCode;

fn c_target(func: Function) -> Option<Target> {
    Some(match func {
        Function::Sin => Target::Call("sin"),
        Function::Cos => Target::Call("cos"),
        Function::Tan => Target::Call("tan"),
        Function::Csc => Target::Recip("sin"),
        Function::Sec => Target::Recip("cos"),
        Function::Cot => Target::Recip("tan"),
        Function::Asin => Target::Call("asin"),
        Function::Acos => Target::Call("acos"),
        Function::Atan => Target::Call("atan"),
        Function::Acsc => Target::OfRecip("asin"),
        Function::Asec => Target::OfRecip("acos"),
        Function::Acot => Target::OfRecip("atan"),
        Function::Sinh => Target::Call("sinh"),
        Function::Cosh => Target::Call("cosh"),
        Function::Tanh => Target::Call("tanh"),
        Function::Csch => Target::Recip("sinh"),
        Function::Sech => Target::Recip("cosh"),
        Function::Coth => Target::Recip("tanh"),
        Function::Asinh => Target::Call("asinh"),
        Function::Acosh => Target::Call("acosh"),
        Function::Atanh => Target::Call("atanh"),
        Function::Acsch => Target::OfRecip("asinh"),
        Function::Asech => Target::OfRecip("acosh"),
        Function::Acoth => Target::OfRecip("atanh"),
        Function::Log => Target::Call("log"),
        Function::Abs => Target::Call("fabs"),
        Function::Erf => Target::Call("erf"),
        Function::Erfc => Target::Call("erfc"),
        Function::Gamma => Target::Call("tgamma"),
        Function::LogGamma => Target::Call("lgamma"),
        Function::Digamma
        | Function::Trigamma
        | Function::Zeta
        | Function::DirichletEta
        | Function::LambertW => return None,
    })
}

impl Dialect for CCode {
    const ONE: &'static str = "1.0";

    fn number(&self, n: &Number) -> Option<Rendered> {
        let prec = if n.is_negative() { PREC_NEG } else { PREC_ATOM };
        match n {
            Number::Integer(i) => Some(Rendered::new(i.to_string(), prec)),
            // C integer division truncates, so rationals are printed as doubles
            Number::Rational(r) => Some(Rendered::new(
                format!("{}.0/{}.0", r.numer(), r.denom()),
                PREC_MUL,
            )),
            Number::Real(x) => Some(real_literal(*x, "INFINITY", "NAN")),
            Number::Complex(..) => None,
        }
    }

    fn constant(&self, c: Constant) -> Option<Rendered> {
        Some(match c {
            Constant::Pi => Rendered::atom("M_PI"),
            Constant::E => Rendered::atom("M_E"),
            Constant::Infinity => Rendered::atom("INFINITY"),
            Constant::NegInfinity => Rendered::new("-INFINITY", PREC_NEG),
            Constant::NaN => Rendered::atom("NAN"),
            Constant::ComplexInfinity => return None,
            Constant::EulerGamma | Constant::Catalan | Constant::GoldenRatio => constant_literal(c),
        })
    }

    fn function(&self, func: Function, arg: String) -> Option<Rendered> {
        call_target(c_target, Self::ONE, func, arg)
    }

    fn named_power(&self, name: &str, arg: String) -> Rendered {
        Rendered::atom(format!("{name}({arg})"))
    }

    fn power(&self, base: Rendered, exp: Rendered) -> Rendered {
        Rendered::atom(format!("pow({}, {})", base.text, exp.text))
    }
}

// =============================================================================
// JAVASCRIPT
// =============================================================================

struct JsCode;

fn js_target(func: Function) -> Option<Target> {
    Some(match func {
        Function::Sin => Target::Call("Math.sin"),
        Function::Cos => Target::Call("Math.cos"),
        Function::Tan => Target::Call("Math.tan"),
        Function::Csc => Target::Recip("Math.sin"),
        Function::Sec => Target::Recip("Math.cos"),
        Function::Cot => Target::Recip("Math.tan"),
        Function::Asin => Target::Call("Math.asin"),
        Function::Acos => Target::Call("Math.acos"),
        Function::Atan => Target::Call("Math.atan"),
        Function::Acsc => Target::OfRecip("Math.asin"),
        Function::Asec => Target::OfRecip("Math.acos"),
        Function::Acot => Target::OfRecip("Math.atan"),
        Function::Sinh => Target::Call("Math.sinh"),
        Function::Cosh => Target::Call("Math.cosh"),
        Function::Tanh => Target::Call("Math.tanh"),
        Function::Csch => Target::Recip("Math.sinh"),
        Function::Sech => Target::Recip("Math.cosh"),
        Function::Coth => Target::Recip("Math.tanh"),
        Function::Asinh => Target::Call("Math.asinh"),
        Function::Acosh => Target::Call("Math.acosh"),
        Function::Atanh => Target::Call("Math.atanh"),
        Function::Acsch => Target::OfRecip("Math.asinh"),
        Function::Asech => Target::OfRecip("Math.acosh"),
        Function::Acoth => Target::OfRecip("Math.atanh"),
        Function::Log => Target::Call("Math.log"),
        Function::Abs => Target::Call("Math.abs"),
        _ => return None,
    })
}

impl Dialect for JsCode {
    const ONE: &'static str = "1";

    fn number(&self, n: &Number) -> Option<Rendered> {
        let prec = if n.is_negative() { PREC_NEG } else { PREC_ATOM };
        match n {
            Number::Integer(i) => Some(Rendered::new(i.to_string(), prec)),
            Number::Rational(r) => Some(Rendered::new(
                format!("{}/{}", r.numer(), r.denom()),
                PREC_MUL,
            )),
            Number::Real(x) => Some(real_literal(*x, "Infinity", "NaN")),
            Number::Complex(..) => None,
        }
    }

    fn constant(&self, c: Constant) -> Option<Rendered> {
        Some(match c {
            Constant::Pi => Rendered::atom("Math.PI"),
            Constant::E => Rendered::atom("Math.E"),
            Constant::Infinity => Rendered::atom("Infinity"),
            Constant::NegInfinity => Rendered::new("-Infinity", PREC_NEG),
            Constant::NaN => Rendered::atom("NaN"),
            Constant::ComplexInfinity => return None,
            Constant::EulerGamma | Constant::Catalan | Constant::GoldenRatio => constant_literal(c),
        })
    }

    fn function(&self, func: Function, arg: String) -> Option<Rendered> {
        call_target(js_target, Self::ONE, func, arg)
    }

    fn named_power(&self, name: &str, arg: String) -> Rendered {
        Rendered::atom(format!("Math.{name}({arg})"))
    }

    fn power(&self, base: Rendered, exp: Rendered) -> Rendered {
        Rendered::atom(format!("Math.pow({}, {})", base.text, exp.text))
    }
}

impl Expr {
    /// C99 expression using `<math.h>`
    ///
    /// Returns `None` for complex values and for functions without a C
    /// library counterpart (digamma, trigamma, zeta, dirichlet_eta, lambertw).
    pub fn to_ccode(&self) -> Option<String> {
        render(&CCode, self).map(|r| r.text)
    }

    /// JavaScript expression using the `Math` object
    ///
    /// Returns `None` for complex values and for functions `Math` lacks.
    pub fn to_jscode(&self) -> Option<String> {
        render(&JsCode, self).map(|r| r.text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_ccode() {
        assert_eq!(x().pow(2).to_ccode().unwrap(), "pow(x, 2)");
        assert_eq!(x().pow(-1).to_ccode().unwrap(), "1.0/x");
        assert_eq!(
            (Expr::rational(1, 2).unwrap() * x()).to_ccode().unwrap(),
            "(1.0/2.0)*x"
        );
        assert_eq!((Expr::pi() * x()).sin().unwrap().to_ccode().unwrap(), "sin(M_PI*x)");
        assert_eq!(x().sqrt().to_ccode().unwrap(), "sqrt(x)");
        assert_eq!(x().exp().to_ccode().unwrap(), "exp(x)");
        assert_eq!(x().abs().unwrap().to_ccode().unwrap(), "fabs(x)");
        assert_eq!(x().csc().unwrap().to_ccode().unwrap(), "1.0/sin(x)");
        assert_eq!(x().acot().unwrap().to_ccode().unwrap(), "atan(1.0/(x))");
        assert_eq!(x().gamma().unwrap().to_ccode().unwrap(), "tgamma(x)");
        assert_eq!(Expr::infinity().to_ccode().unwrap(), "INFINITY");
    }

    #[test]
    fn test_ccode_unrenderable() {
        assert_eq!((Expr::i() * x()).to_ccode(), None);
        assert_eq!(Expr::complex_infinity().to_ccode(), None);
        assert_eq!(x().zeta().unwrap().to_ccode(), None);
    }

    #[test]
    fn test_jscode() {
        assert_eq!(x().pow(2).to_jscode().unwrap(), "Math.pow(x, 2)");
        assert_eq!(
            (x().sin().unwrap() + Expr::e()).to_jscode().unwrap(),
            "Math.E + Math.sin(x)"
        );
        assert_eq!(x().cbrt().to_jscode().unwrap(), "Math.cbrt(x)");
        assert_eq!(Expr::nan().to_jscode().unwrap(), "NaN");
        assert_eq!(x().erf().unwrap().to_jscode(), None);
        assert_eq!((Expr::i() + x()).to_jscode(), None);
    }
}
