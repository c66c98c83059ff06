//! Parser behavior through the public entry points

use crate::{Constant, ErrorKind, Expr, Parser, Span, parse};

fn x() -> Expr {
    Expr::symbol("x")
}

fn y() -> Expr {
    Expr::symbol("y")
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(parse("1 + 2*3").unwrap(), Expr::integer(7));
    assert_eq!(parse("2^3^2").unwrap(), Expr::integer(512));
    assert_eq!(parse("2**3**2").unwrap(), Expr::integer(512));
    assert_eq!(parse("(2^3)^2").unwrap(), Expr::integer(64));
    assert_eq!(parse("8/4/2").unwrap(), Expr::one());
    assert_eq!(parse("10 - 3 - 2").unwrap(), Expr::integer(5));
    assert_eq!(parse("-x^2").unwrap(), -x().pow(2));
    assert_eq!(parse("-2^2").unwrap(), Expr::integer(-4));
    assert_eq!(parse("+x").unwrap(), x());
    assert_eq!(parse("x^-1").unwrap(), x().pow(-1));
}

#[test]
fn test_implicit_multiplication() {
    assert_eq!(parse("2x").unwrap(), 2 * x());
    assert_eq!(parse("3x^2").unwrap(), 3 * x().pow(2));
    assert_eq!(parse("x y").unwrap(), x() * y());
    assert_eq!(parse("(x+1)(x-1)").unwrap(), (x() + 1) * (x() - 1));
    assert_eq!(parse("2(x+1)").unwrap(), 2 * (x() + 1));
    assert_eq!(parse("x (y)").unwrap(), x() * y());
    assert_eq!(parse("2 sin(x)").unwrap(), 2 * x().sin().unwrap());
    assert_eq!(parse("sin (x)").unwrap(), x().sin().unwrap());
    // adjacent letters form one identifier
    assert_eq!(parse("xy").unwrap(), Expr::symbol("xy"));
}

#[test]
fn test_names() {
    assert_eq!(parse("pi").unwrap(), Expr::pi());
    assert_eq!(parse("E").unwrap(), Expr::e());
    assert_eq!(parse("I^2").unwrap(), Expr::minus_one());
    assert_eq!(parse("oo").unwrap(), Expr::infinity());
    assert_eq!(parse("-oo").unwrap(), Expr::constant(Constant::NegInfinity));
    assert_eq!(parse("ln(x)").unwrap(), x().log().unwrap());
    assert_eq!(parse("exp(x)").unwrap(), x().exp());
    assert_eq!(parse("sqrt(4)").unwrap(), Expr::integer(2));
    assert_eq!(parse("x_1 + alpha").unwrap(), Expr::symbol("x_1") + Expr::symbol("alpha"));
}

#[test]
fn test_constant_names_are_reserved() {
    for (name, constant) in [("pi", Expr::pi()), ("e", Expr::e()), ("E", Expr::e()), ("oo", Expr::infinity())] {
        let shadowed = Expr::symbol(name);
        assert_eq!(shadowed.to_string(), name);
        let reread = parse(&shadowed.to_string()).unwrap();
        assert_ne!(reread, shadowed);
        assert_eq!(reread, constant);
    }
    // Longer names that merely start with a constant stay symbols
    assert_eq!(parse("pix").unwrap(), Expr::symbol("pix"));
    assert_eq!(parse("e1").unwrap(), Expr::symbol("e1"));
}

#[test]
fn test_numbers() {
    assert_eq!(parse("0.5").unwrap(), Expr::real(0.5));
    assert_eq!(parse("1e3").unwrap(), Expr::real(1000.0));
    assert_eq!(
        Parser::new().exact_decimals(true).parse("0.25").unwrap(),
        Expr::rational(1, 4).unwrap()
    );
    let big = parse("123456789012345678901234567890").unwrap();
    assert_eq!(big.to_string(), "123456789012345678901234567890");
}

#[test]
fn test_errors_carry_spans() {
    let err = parse("x $ y").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.span(), Some(Span::new(2, 3)));

    let err = parse("(x + 1").unwrap_err();
    assert_eq!(err.span(), Some(Span::new(0, 1)));

    let err = parse("x + 1)").unwrap_err();
    assert_eq!(err.span(), Some(Span::new(5, 6)));

    let err = parse("foo(x)").unwrap_err();
    assert_eq!(err.span(), Some(Span::new(0, 3)));
    assert!(err.to_string().contains("foo"));
}

#[test]
fn test_malformed_inputs() {
    for input in ["", "   ", "x +", "*x", "()", "sin()", "sin(x, y)", "sin x", "1.2.3", "x 2", "2 3"] {
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse, "{input:?}");
    }
}

#[test]
fn test_arithmetic_errors_surface() {
    assert_eq!(parse("1/0").unwrap_err().kind(), ErrorKind::DivideByZero);
    assert_eq!(parse("lambertw(-5.0)").unwrap_err().kind(), ErrorKind::Domain);
}

#[test]
fn test_limits() {
    let deep = format!("{}x{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(parse(&deep).unwrap(), x());
    assert!(Parser::new().max_depth(10).parse(&deep).is_err());

    let long = vec!["x"; 100].join(" + ");
    assert_eq!(parse(&long).unwrap(), 100 * x());
    assert!(Parser::new().max_nodes(50).parse(&long).is_err());

    assert!(Parser::new().implicit_mul(false).parse("2x").is_err());
}
