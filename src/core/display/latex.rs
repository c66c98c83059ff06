//! LaTeX output
//!
//! Examples:
//! - `x^{2} + 2 x` prints as `2 \cdot x + x^{2}`
//! - `\sin\left(x\right)`, `\frac{\cos\left(x\right)}{x}`, `\sqrt[3]{x}`
//! - Greek symbol names map to their commands (`alpha` -> `\alpha`)

use std::sync::Arc;

use super::{
    PREC_ADD, PREC_ATOM, PREC_MUL, PREC_NEG, PREC_POW, Quotient, Rendered, extract_negative, is_e,
    real_text, root_index,
};
use crate::core::constants::Constant;
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::functions::Function;

/// Greek letter names recognized in symbol names
static GREEK_LETTERS: &[(&str, &str)] = &[
    ("alpha", r"\alpha"),
    ("beta", r"\beta"),
    ("gamma", r"\gamma"),
    ("delta", r"\delta"),
    ("epsilon", r"\epsilon"),
    ("zeta", r"\zeta"),
    ("eta", r"\eta"),
    ("theta", r"\theta"),
    ("iota", r"\iota"),
    ("kappa", r"\kappa"),
    ("lambda", r"\lambda"),
    ("mu", r"\mu"),
    ("nu", r"\nu"),
    ("xi", r"\xi"),
    ("rho", r"\rho"),
    ("sigma", r"\sigma"),
    ("tau", r"\tau"),
    ("upsilon", r"\upsilon"),
    ("phi", r"\phi"),
    ("chi", r"\chi"),
    ("psi", r"\psi"),
    ("omega", r"\omega"),
    ("Gamma", r"\Gamma"),
    ("Delta", r"\Delta"),
    ("Theta", r"\Theta"),
    ("Lambda", r"\Lambda"),
    ("Xi", r"\Xi"),
    ("Sigma", r"\Sigma"),
    ("Phi", r"\Phi"),
    ("Psi", r"\Psi"),
    ("Omega", r"\Omega"),
    ("varepsilon", r"\varepsilon"),
    ("vartheta", r"\vartheta"),
    ("varphi", r"\varphi"),
];

fn greek_to_latex(name: &str) -> Option<&'static str> {
    GREEK_LETTERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, latex)| *latex)
}

/// `\left(..\right)` around text binding looser than `min`
fn paren(r: Rendered, min: u8) -> String {
    if r.prec < min {
        format!(r"\left({}\right)", r.text)
    } else {
        r.text
    }
}

fn symbol_latex(name: &str) -> String {
    if let Some(g) = greek_to_latex(name) {
        return g.to_owned();
    }
    // `x_1` style subscripts, with a Greek base where possible
    if let Some((base, sub)) = name.split_once('_')
        && !base.is_empty()
        && !sub.is_empty()
    {
        let base = greek_to_latex(base).map_or_else(|| base.to_owned(), str::to_owned);
        return format!("{base}_{{{sub}}}");
    }
    name.to_owned()
}

fn number_latex(n: &Number) -> Rendered {
    let sign_prec = |neg: bool| if neg { PREC_NEG } else { PREC_ATOM };
    match n {
        Number::Integer(i) => Rendered::new(i.to_string(), sign_prec(n.is_negative())),
        Number::Rational(r) => {
            let neg = n.is_negative();
            let num = if neg { -r.numer() } else { r.numer().clone() };
            let text = format!(r"\frac{{{num}}}{{{}}}", r.denom());
            if neg {
                Rendered::new(format!("-{text}"), PREC_NEG)
            } else {
                Rendered::atom(text)
            }
        }
        Number::Real(x) if x.is_nan() => Rendered::atom(r"\mathrm{NaN}"),
        Number::Real(x) if x.is_infinite() => {
            if *x > 0.0 {
                Rendered::atom(r"\infty")
            } else {
                Rendered::new(r"-\infty", PREC_NEG)
            }
        }
        Number::Real(x) => Rendered::new(real_text(*x), sign_prec(*x < 0.0)),
        Number::Complex(re, im) => {
            let imag = if im.is_one() {
                Rendered::atom("i")
            } else if im.is_minus_one() {
                Rendered::new("-i", PREC_NEG)
            } else {
                let c = number_latex(im);
                let prec = if im.is_negative() { PREC_NEG } else { PREC_MUL };
                Rendered::new(format!("{} i", c.text), prec)
            };
            if re.is_zero() {
                return imag;
            }
            let re_text = number_latex(re).text;
            let text = if im.is_negative() {
                let abs = im.neg();
                if abs.is_one() {
                    format!("{re_text} - i")
                } else {
                    format!("{re_text} - {} i", number_latex(&abs).text)
                }
            } else {
                format!("{re_text} + {}", imag.text)
            };
            Rendered::new(text, PREC_ADD)
        }
    }
}

fn constant_latex(c: Constant) -> Rendered {
    match c {
        Constant::Pi => Rendered::atom(r"\pi"),
        Constant::E => Rendered::atom("e"),
        Constant::EulerGamma => Rendered::atom(r"\gamma"),
        Constant::Catalan => Rendered::atom("G"),
        Constant::GoldenRatio => Rendered::atom(r"\phi"),
        Constant::Infinity => Rendered::atom(r"\infty"),
        Constant::NegInfinity => Rendered::new(r"-\infty", PREC_NEG),
        Constant::ComplexInfinity => Rendered::atom(r"\tilde{\infty}"),
        Constant::NaN => Rendered::atom(r"\mathrm{NaN}"),
    }
}

fn function_command(func: Function) -> &'static str {
    match func {
        Function::Sin => r"\sin",
        Function::Cos => r"\cos",
        Function::Tan => r"\tan",
        Function::Csc => r"\csc",
        Function::Sec => r"\sec",
        Function::Cot => r"\cot",
        Function::Asin => r"\arcsin",
        Function::Acos => r"\arccos",
        Function::Atan => r"\arctan",
        Function::Acsc => r"\operatorname{arccsc}",
        Function::Asec => r"\operatorname{arcsec}",
        Function::Acot => r"\operatorname{arccot}",
        Function::Sinh => r"\sinh",
        Function::Cosh => r"\cosh",
        Function::Tanh => r"\tanh",
        Function::Csch => r"\operatorname{csch}",
        Function::Sech => r"\operatorname{sech}",
        Function::Coth => r"\coth",
        Function::Asinh => r"\operatorname{arsinh}",
        Function::Acosh => r"\operatorname{arcosh}",
        Function::Atanh => r"\operatorname{artanh}",
        Function::Acsch => r"\operatorname{arcsch}",
        Function::Asech => r"\operatorname{arsech}",
        Function::Acoth => r"\operatorname{arcoth}",
        Function::Log => r"\log",
        Function::Abs => "",
        Function::Erf => r"\operatorname{erf}",
        Function::Erfc => r"\operatorname{erfc}",
        Function::Gamma => r"\Gamma",
        Function::LogGamma => r"\log\Gamma",
        Function::Digamma => r"\psi",
        Function::Trigamma => r"\psi_1",
        Function::Zeta => r"\zeta",
        Function::DirichletEta => r"\eta",
        Function::LambertW => "W",
    }
}

fn latex(e: &Expr) -> Rendered {
    match e.kind() {
        ExprKind::Number(n) => number_latex(n),
        ExprKind::Symbol(s) => Rendered::atom(symbol_latex(s.name())),
        ExprKind::CustomConstant(s) => Rendered::atom(s.name()),
        ExprKind::Constant(c) => constant_latex(*c),
        ExprKind::Sum(terms) => latex_sum(terms),
        ExprKind::Product(factors) => latex_product(factors),
        ExprKind::Pow(base, exp) => latex_pow(e, base, exp),
        ExprKind::FunctionCall { func, arg } => {
            let inner = latex(arg).text;
            if *func == Function::Abs {
                Rendered::atom(format!(r"\left|{inner}\right|"))
            } else {
                Rendered::atom(format!(r"{}\left({inner}\right)", function_command(*func)))
            }
        }
    }
}

fn latex_sum(terms: &[Arc<Expr>]) -> Rendered {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        match extract_negative(term) {
            Some(positive) => {
                out.push_str(if i == 0 { "-" } else { " - " });
                out.push_str(&paren(latex(&positive), PREC_MUL));
            }
            None => {
                if i > 0 {
                    out.push_str(" + ");
                }
                out.push_str(&latex(term).text);
            }
        }
    }
    Rendered::new(out, PREC_ADD)
}

fn latex_product(factors: &[Arc<Expr>]) -> Rendered {
    let q = Quotient::split(factors);
    let mut num: Vec<String> = Vec::with_capacity(q.num.len() + 1);
    if !q.coeff.is_one() {
        num.push(paren(number_latex(&q.coeff), PREC_MUL));
    }
    num.extend(q.num.iter().map(|f| paren(latex(f), PREC_MUL)));

    let mut text = if q.den.is_empty() {
        num.join(r" \cdot ")
    } else {
        let numer = if num.is_empty() {
            "1".to_owned()
        } else {
            num.join(r" \cdot ")
        };
        let den: Vec<String> = q.den.iter().map(|f| paren(latex(f), PREC_MUL)).collect();
        format!(r"\frac{{{numer}}}{{{}}}", den.join(r" \cdot "))
    };
    if q.negative {
        text.insert(0, '-');
    }
    Rendered::new(text, PREC_MUL)
}

fn latex_pow(whole: &Expr, base: &Expr, exp: &Expr) -> Rendered {
    if is_e(base) {
        return Rendered::new(format!("e^{{{}}}", latex(exp).text), PREC_POW);
    }
    if exp.as_number().is_some_and(Number::is_negative) {
        return latex_product(&[Arc::new(whole.clone())]);
    }
    match root_index(exp) {
        Some(2) => return Rendered::atom(format!(r"\sqrt{{{}}}", latex(base).text)),
        Some(3) => return Rendered::atom(format!(r"\sqrt[3]{{{}}}", latex(base).text)),
        _ => {}
    }
    Rendered::new(
        format!("{}^{{{}}}", paren(latex(base), PREC_ATOM), latex(exp).text),
        PREC_POW,
    )
}

impl Expr {
    /// LaTeX rendering, or `None` if the expression holds a custom constant
    pub fn to_latex(&self) -> Option<String> {
        if self.has_custom_constant() {
            return None;
        }
        Some(latex(self).text)
    }
}
