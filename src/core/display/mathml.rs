//! Content MathML output
//!
//! Sums, products and powers become `<apply>` elements with `<plus/>`,
//! `<times/>` and `<power/>`. Square and cube roots use `<root/>`, powers of
//! `E` use `<exp/>`. Functions without a MathML element are applied as
//! `<ci>name</ci>`.

use crate::core::constants::Constant;
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::functions::Function;

use super::{is_e, root_index};

fn number_mathml(n: &Number, out: &mut String) {
    match n {
        Number::Integer(i) => out.push_str(&format!("<cn type=\"integer\">{i}</cn>")),
        Number::Rational(r) => out.push_str(&format!(
            "<cn type=\"rational\">{}<sep/>{}</cn>",
            r.numer(),
            r.denom()
        )),
        Number::Real(x) if x.is_nan() => out.push_str("<notanumber/>"),
        Number::Real(x) if x.is_infinite() => {
            if *x > 0.0 {
                out.push_str("<infinity/>");
            } else {
                out.push_str("<apply><minus/><infinity/></apply>");
            }
        }
        Number::Real(x) => out.push_str(&format!("<cn type=\"real\">{x}</cn>")),
        Number::Complex(re, im) => out.push_str(&format!(
            "<cn type=\"complex-cartesian\">{re}<sep/>{im}</cn>"
        )),
    }
}

fn constant_mathml(c: Constant) -> &'static str {
    match c {
        Constant::Pi => "<pi/>",
        Constant::E => "<exponentiale/>",
        Constant::EulerGamma => "<eulergamma/>",
        Constant::Catalan => "<ci>Catalan</ci>",
        Constant::GoldenRatio => "<ci>GoldenRatio</ci>",
        Constant::Infinity => "<infinity/>",
        Constant::NegInfinity => "<apply><minus/><infinity/></apply>",
        Constant::ComplexInfinity => "<ci>zoo</ci>",
        Constant::NaN => "<notanumber/>",
    }
}

/// Predefined MathML element for the function, if there is one
fn function_element(func: Function) -> Option<&'static str> {
    Some(match func {
        Function::Sin => "<sin/>",
        Function::Cos => "<cos/>",
        Function::Tan => "<tan/>",
        Function::Csc => "<csc/>",
        Function::Sec => "<sec/>",
        Function::Cot => "<cot/>",
        Function::Asin => "<arcsin/>",
        Function::Acos => "<arccos/>",
        Function::Atan => "<arctan/>",
        Function::Acsc => "<arccsc/>",
        Function::Asec => "<arcsec/>",
        Function::Acot => "<arccot/>",
        Function::Sinh => "<sinh/>",
        Function::Cosh => "<cosh/>",
        Function::Tanh => "<tanh/>",
        Function::Csch => "<csch/>",
        Function::Sech => "<sech/>",
        Function::Coth => "<coth/>",
        Function::Asinh => "<arcsinh/>",
        Function::Acosh => "<arccosh/>",
        Function::Atanh => "<arctanh/>",
        Function::Acsch => "<arccsch/>",
        Function::Asech => "<arcsech/>",
        Function::Acoth => "<arccoth/>",
        Function::Log => "<ln/>",
        Function::Abs => "<abs/>",
        _ => return None,
    })
}

fn mathml(e: &Expr, out: &mut String) {
    match e.kind() {
        ExprKind::Number(n) => number_mathml(n, out),
        ExprKind::Symbol(s) => out.push_str(&format!("<ci>{}</ci>", s.name())),
        ExprKind::CustomConstant(s) => out.push_str(&format!("<ci>{}</ci>", s.name())),
        ExprKind::Constant(c) => out.push_str(constant_mathml(*c)),
        ExprKind::Sum(terms) => {
            out.push_str("<apply><plus/>");
            terms.iter().for_each(|t| mathml(t, out));
            out.push_str("</apply>");
        }
        ExprKind::Product(factors) => {
            out.push_str("<apply><times/>");
            factors.iter().for_each(|f| mathml(f, out));
            out.push_str("</apply>");
        }
        ExprKind::Pow(base, exp) => {
            if is_e(base) {
                out.push_str("<apply><exp/>");
                mathml(exp, out);
            } else {
                match root_index(exp) {
                    Some(2) => out.push_str("<apply><root/>"),
                    Some(q) => out.push_str(&format!("<apply><root/><degree><cn type=\"integer\">{q}</cn></degree>")),
                    None => {
                        out.push_str("<apply><power/>");
                        mathml(base, out);
                        mathml(exp, out);
                        out.push_str("</apply>");
                        return;
                    }
                }
                mathml(base, out);
            }
            out.push_str("</apply>");
        }
        ExprKind::FunctionCall { func, arg } => {
            out.push_str("<apply>");
            match function_element(*func) {
                Some(el) => out.push_str(el),
                None => out.push_str(&format!("<ci>{}</ci>", func.name())),
            }
            mathml(arg, out);
            out.push_str("</apply>");
        }
    }
}

impl Expr {
    /// Content MathML rendering, or `None` if the expression holds a custom
    /// constant
    pub fn to_mathml(&self) -> Option<String> {
        if self.has_custom_constant() {
            return None;
        }
        let mut out = String::new();
        mathml(self, &mut out);
        Some(out)
    }
}
