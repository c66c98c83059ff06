//! Renderer output across formats

use crate::{Expr, parse};

#[test]
fn test_plain_text_round_trip() {
    let samples = [
        "x**2 + 2*x + 1",
        "sin(x)*cos(y)",
        "(1/2)*x",
        "exp(-x**2)",
        "sqrt(x + 1)",
        "cbrt(x)/y",
        "-3*x - y",
        "x**(-y)",
        "(x**y)**z",
        "log(x)/(x*y)",
        "2.5*x",
        "1 - 2*I",
        "pi*x + E",
        "gamma(x)*lambertw(y)",
        "abs(x - 1)",
        "atan(1/x) + acosh(y)",
    ];
    for s in samples {
        let e = parse(s).unwrap();
        let text = e.to_string();
        assert_eq!(parse(&text).unwrap(), e, "{s} rendered as {text}");
    }
}

#[test]
fn test_reference_derivative_renders() {
    let x = Expr::symbol("x");
    let d = parse("3*y**2 - log(x)*cos(x)").unwrap().diff(&x).unwrap();
    assert_eq!(d.to_string(), "-cos(x)/x + sin(x)*log(x)");
    let latex = d.to_latex().unwrap();
    assert!(latex.contains(r"\frac"), "{latex}");
    assert!(latex.contains(r"\log"), "{latex}");
}

#[test]
fn test_custom_constants_block_markup() {
    let e = parse("x").unwrap() * Expr::custom_constant("k");
    assert_eq!(e.to_string(), "k*x");
    assert_eq!(e.to_latex(), None);
    assert_eq!(e.to_mathml(), None);
    assert!(e.to_ccode().is_some());
}

#[test]
fn test_code_targets() {
    let e = parse("sin(x)^2 + pi").unwrap();
    assert_eq!(e.to_ccode().unwrap(), "M_PI + pow(sin(x), 2)");
    assert_eq!(e.to_jscode().unwrap(), "Math.PI + Math.pow(Math.sin(x), 2)");
    assert_eq!(parse("2*I*x").unwrap().to_ccode(), None);
}
