//! Renderers for expressions.
//!
//! Five output formats:
//!
//! ## Plain text (`to_string()` / `{}`)
//! Re-parseable notation: `x**2 + 2*x`, `sqrt(x)`, `exp(x)`, `(1/2)*x`,
//! quotients as `cos(x)/x`.
//!
//! ## LaTeX (`to_latex()`) and MathML (`to_mathml()`)
//! See [`latex`] and [`mathml`]. Both return `None` when the expression
//! contains a custom constant.
//!
//! ## C and JavaScript (`to_ccode()`, `to_jscode()`)
//! See [`code`]. Both return `None` for complex values and for functions
//! the target language lacks.
//!
//! # Layout
//! The infix formats share one printer parameterized by a [`Dialect`].
//! Products are laid out as a signed quotient: factors with a negative
//! numeric exponent move to the denominator, so `Product([-1, cos(x), x**-1])`
//! prints as `-cos(x)/x`. Terms and factors keep their canonical order.

mod code;
mod latex;
mod mathml;

use std::fmt;
use std::sync::Arc;

use num_traits::{One, ToPrimitive};

use crate::core::constants::Constant;
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::functions::Function;

// =============================================================================
// PRECEDENCE
// =============================================================================

pub(crate) const PREC_ADD: u8 = 1;
pub(crate) const PREC_MUL: u8 = 2;
pub(crate) const PREC_NEG: u8 = 3;
pub(crate) const PREC_POW: u8 = 4;
pub(crate) const PREC_ATOM: u8 = 5;

/// Rendered text together with the precedence of its outermost operator
#[derive(Debug, Clone)]
pub(crate) struct Rendered {
    pub text: String,
    pub prec: u8,
}

impl Rendered {
    pub fn new(text: impl Into<String>, prec: u8) -> Self {
        Self {
            text: text.into(),
            prec,
        }
    }

    pub fn atom(text: impl Into<String>) -> Self {
        Self::new(text, PREC_ATOM)
    }

    /// Text, parenthesized when it binds looser than `min`
    pub fn wrap(self, min: u8) -> String {
        if self.prec < min {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

// =============================================================================
// SHARED LAYOUT HELPERS
// =============================================================================

/// True when the number prints with a leading minus that can be factored out
pub(crate) fn leading_minus(n: &Number) -> bool {
    match n {
        Number::Complex(re, im) => re.is_zero() && im.is_negative(),
        _ => n.is_negative(),
    }
}

/// Positive counterpart of a term that prints with a leading minus
pub(crate) fn extract_negative(term: &Expr) -> Option<Expr> {
    match term.kind() {
        ExprKind::Number(n) if leading_minus(n) => Some(Expr::number(n.neg())),
        ExprKind::Product(factors) => match factors.first().map(|f| f.kind()) {
            Some(ExprKind::Number(c)) if leading_minus(c) => Some(term.clone().negate()),
            _ => None,
        },
        _ => None,
    }
}

/// Exponent `1/q` for small `q`, used for `sqrt` and `cbrt`
pub(crate) fn root_index(exp: &Expr) -> Option<u32> {
    match exp.as_number() {
        Some(Number::Rational(r)) if r.numer().is_one() => r.denom().to_u32().filter(|q| *q == 2 || *q == 3),
        _ => None,
    }
}

pub(crate) fn is_e(e: &Expr) -> bool {
    matches!(e.kind(), ExprKind::Constant(Constant::E))
}

/// A product split into `sign * coeff * num / den`
pub(crate) struct Quotient {
    pub negative: bool,
    /// Non-negative coefficient (or complex with positive sign)
    pub coeff: Number,
    pub num: Vec<Arc<Expr>>,
    /// Denominator factors with their exponents already negated
    pub den: Vec<Expr>,
}

impl Quotient {
    pub fn split(factors: &[Arc<Expr>]) -> Self {
        let (coeff, rest) = match factors.first().map(|f| f.kind()) {
            Some(ExprKind::Number(n)) => (n.clone(), &factors[1..]),
            _ => (Number::one(), factors),
        };
        let negative = leading_minus(&coeff);
        let coeff = if negative { coeff.neg() } else { coeff };

        let mut num = Vec::with_capacity(rest.len());
        let mut den = Vec::new();
        for f in rest {
            match f.kind() {
                ExprKind::Pow(base, exp) if exp.as_number().is_some_and(Number::is_negative) => {
                    let positive = exp.as_number().map(Number::neg).unwrap_or_else(Number::one);
                    den.push(Expr::pow_from_arcs(
                        Arc::clone(base),
                        Arc::new(Expr::number(positive)),
                    ));
                }
                _ => num.push(Arc::clone(f)),
            }
        }
        Self {
            negative,
            coeff,
            num,
            den,
        }
    }
}

// =============================================================================
// INFIX PRINTER
// =============================================================================

/// Format-specific pieces of an infix language
pub(crate) trait Dialect {
    /// Numerator printed for a quotient without numerator factors
    const ONE: &'static str;

    fn number(&self, n: &Number) -> Option<Rendered>;

    fn constant(&self, c: Constant) -> Option<Rendered>;

    fn function(&self, func: Function, arg: String) -> Option<Rendered>;

    /// `sqrt`, `cbrt` or `exp` applied to `arg`
    fn named_power(&self, name: &str, arg: String) -> Rendered;

    fn power(&self, base: Rendered, exp: Rendered) -> Rendered;
}

pub(crate) fn render<D: Dialect>(d: &D, e: &Expr) -> Option<Rendered> {
    Some(match e.kind() {
        ExprKind::Number(n) => d.number(n)?,
        ExprKind::Symbol(s) | ExprKind::CustomConstant(s) => Rendered::atom(s.name()),
        ExprKind::Constant(c) => d.constant(*c)?,
        ExprKind::Sum(terms) => render_sum(d, terms)?,
        ExprKind::Product(factors) => render_product(d, factors)?,
        ExprKind::Pow(base, exp) => render_pow(d, e, base, exp)?,
        ExprKind::FunctionCall { func, arg } => d.function(*func, render(d, arg)?.text)?,
    })
}

fn render_sum<D: Dialect>(d: &D, terms: &[Arc<Expr>]) -> Option<Rendered> {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        match extract_negative(term) {
            Some(positive) => {
                out.push_str(if i == 0 { "-" } else { " - " });
                out.push_str(&render(d, &positive)?.wrap(PREC_MUL));
            }
            None => {
                if i > 0 {
                    out.push_str(" + ");
                }
                out.push_str(&render(d, term)?.text);
            }
        }
    }
    Some(Rendered::new(out, PREC_ADD))
}

fn render_product<D: Dialect>(d: &D, factors: &[Arc<Expr>]) -> Option<Rendered> {
    let q = Quotient::split(factors);
    let mut parts: Vec<String> = Vec::with_capacity(q.num.len() + 1);
    if !q.coeff.is_one() {
        let c = d.number(&q.coeff)?;
        if matches!(q.coeff, Number::Rational(_)) || c.prec < PREC_MUL {
            parts.push(format!("({})", c.text));
        } else {
            parts.push(c.text);
        }
    }
    for f in &q.num {
        parts.push(render(d, f)?.wrap(PREC_MUL));
    }
    let mut text = if parts.is_empty() {
        D::ONE.to_owned()
    } else {
        parts.join("*")
    };

    if let [single] = q.den.as_slice() {
        text.push('/');
        text.push_str(&render(d, single)?.wrap(PREC_NEG));
    } else if !q.den.is_empty() {
        let den = q
            .den
            .iter()
            .map(|f| render(d, f).map(|r| r.wrap(PREC_MUL)))
            .collect::<Option<Vec<_>>>()?;
        text.push_str(&format!("/({})", den.join("*")));
    }

    if q.negative {
        text.insert(0, '-');
    }
    Some(Rendered::new(text, PREC_MUL))
}

fn render_pow<D: Dialect>(d: &D, whole: &Expr, base: &Expr, exp: &Expr) -> Option<Rendered> {
    if is_e(base) {
        return Some(d.named_power("exp", render(d, exp)?.text));
    }
    if exp.as_number().is_some_and(Number::is_negative) {
        return render_product(d, &[Arc::new(whole.clone())]);
    }
    match root_index(exp) {
        Some(2) => return Some(d.named_power("sqrt", render(d, base)?.text)),
        Some(3) => return Some(d.named_power("cbrt", render(d, base)?.text)),
        _ => {}
    }
    Some(d.power(render(d, base)?, render(d, exp)?))
}

/// Real approximation with a decimal point, so it re-parses as a real
pub(crate) fn real_text(x: f64) -> String {
    let s = x.to_string();
    if s.contains(['.', 'e', 'i', 'N']) {
        s
    } else {
        format!("{s}.0")
    }
}

// =============================================================================
// PLAIN TEXT
// =============================================================================

struct Text;

impl Text {
    fn number_text(n: &Number) -> Rendered {
        match n {
            Number::Integer(i) => {
                let prec = if n.is_negative() { PREC_NEG } else { PREC_ATOM };
                Rendered::new(i.to_string(), prec)
            }
            Number::Rational(r) => Rendered::new(format!("{}/{}", r.numer(), r.denom()), PREC_MUL),
            Number::Real(x) if x.is_infinite() => {
                if *x > 0.0 {
                    Rendered::atom("oo")
                } else {
                    Rendered::new("-oo", PREC_NEG)
                }
            }
            Number::Real(x) if x.is_nan() => Rendered::atom("nan"),
            Number::Real(x) => {
                let prec = if *x < 0.0 { PREC_NEG } else { PREC_ATOM };
                Rendered::new(real_text(*x), prec)
            }
            Number::Complex(re, im) => {
                let imag = if im.is_one() {
                    Rendered::atom("I")
                } else if im.is_minus_one() {
                    Rendered::new("-I", PREC_NEG)
                } else {
                    let coeff = Self::number_text(im);
                    let prec = if im.is_negative() { PREC_NEG } else { PREC_MUL };
                    Rendered::new(format!("{}*I", coeff.wrap(PREC_NEG)), prec)
                };
                if re.is_zero() {
                    return imag;
                }
                let re_text = Self::number_text(re).text;
                let text = if im.is_negative() {
                    let abs = Self::number_text(&im.neg());
                    if im.is_minus_one() {
                        format!("{re_text} - I")
                    } else {
                        format!("{re_text} - {}*I", abs.wrap(PREC_NEG))
                    }
                } else {
                    format!("{re_text} + {}", imag.text)
                };
                Rendered::new(text, PREC_ADD)
            }
        }
    }
}

impl Dialect for Text {
    const ONE: &'static str = "1";

    fn number(&self, n: &Number) -> Option<Rendered> {
        Some(Self::number_text(n))
    }

    fn constant(&self, c: Constant) -> Option<Rendered> {
        let prec = if c == Constant::NegInfinity {
            PREC_NEG
        } else {
            PREC_ATOM
        };
        Some(Rendered::new(c.name(), prec))
    }

    fn function(&self, func: Function, arg: String) -> Option<Rendered> {
        Some(Rendered::atom(format!("{}({arg})", func.name())))
    }

    fn named_power(&self, name: &str, arg: String) -> Rendered {
        Rendered::atom(format!("{name}({arg})"))
    }

    fn power(&self, base: Rendered, exp: Rendered) -> Rendered {
        Rendered::new(
            format!("{}**{}", base.wrap(PREC_ATOM), exp.wrap(PREC_POW)),
            PREC_POW,
        )
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = render(&Text, self).ok_or(fmt::Error)?;
        f.write_str(&rendered.text)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Text::number_text(self).text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
