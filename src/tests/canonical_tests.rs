//! Equality and hashing under canonical form

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::{Expr, parse};

fn x() -> Expr {
    Expr::symbol("x")
}

fn y() -> Expr {
    Expr::symbol("y")
}

fn hash_of(e: &Expr) -> u64 {
    let mut h = FxHasher::default();
    e.hash(&mut h);
    h.finish()
}

#[test]
fn test_commutative_operators() {
    assert_eq!(x() + y(), y() + x());
    assert_eq!(hash_of(&(x() + y())), hash_of(&(y() + x())));
    assert_eq!(x() * y(), y() * x());
    assert_eq!(hash_of(&(x() * y())), hash_of(&(y() * x())));
}

#[test]
#[allow(clippy::eq_op, reason = "Identities on purpose")]
fn test_identities() {
    assert_eq!(x() - x(), Expr::zero());
    assert_eq!(x() - x(), y() - y());
    assert_eq!(x() + 0, x());
    assert_eq!(x() + 0.0, x());
    assert_eq!(x() * 1, x());
    assert_eq!(x().div(x()).unwrap(), Expr::one());
    assert_eq!(x().pow(0), Expr::one());
    assert_eq!(x().pow(1), x());
    assert_eq!(x() * x(), x().pow(2));
    assert_eq!((x() * x()).div(x().pow(2)).unwrap(), Expr::one());
    assert_eq!(2 * x(), x() + x());
    assert_eq!(x() * 0, Expr::zero());
}

#[test]
#[allow(clippy::eq_op, reason = "Identities on purpose")]
fn test_identities_on_compound_operands() {
    let compounds = [
        x() + y(),
        x() * y(),
        x().sin().unwrap(),
        parse("2*(x + 1)^2 - y/x").unwrap(),
    ];
    for e in &compounds {
        assert!((e - e).is_zero(), "{e} - {e}");
        assert_eq!(e + 0, *e);
        assert_eq!(e.div(e).unwrap(), Expr::one(), "{e} / {e}");
    }
    let s = x() + y();
    assert_eq!(2 * &s, 2 * x() + 2 * y());
    assert!((2 * &s - &s - &s).is_zero());
    assert!((-&s + &s).is_zero());
}

#[test]
fn test_distinct_expressions() {
    assert_ne!(x(), y());
    assert_ne!(x() - x(), x() + x());
    assert_ne!(x() - (x() + x()), x() - x() + x());
    assert_ne!(x().div(y()).unwrap(), y().div(x()).unwrap());
    assert_ne!(x().pow(y()), y().pow(x()));
}

#[test]
fn test_zero_to_the_zero() {
    assert_eq!(Expr::zero().pow(0), Expr::one());
}

#[test]
fn test_identity_versus_equality() {
    let a = Expr::symbol("x");
    let b = Expr::symbol("x");
    assert_eq!(a, b);
    assert!(!a.same_node(&b));
    let c = a.clone();
    assert!(a.same_node(&c));
}

#[test]
fn test_parsed_and_built_agree() {
    let built = x() * x();
    let parsed = parse("x^2").unwrap();
    assert_eq!(built, parsed);
    assert_eq!(hash_of(&built), hash_of(&parsed));

    let e = parse("y*x + 3 - x*y").unwrap();
    assert_eq!(e, Expr::integer(3));
}

#[test]
fn test_exact_arithmetic() {
    let third = Expr::rational(1, 3).unwrap();
    assert_eq!(&third + &third + &third, Expr::one());
    assert_eq!(Expr::rational(2, 4).unwrap(), Expr::rational(1, 2).unwrap());
    assert!(Expr::rational(1, 0).is_err());
    assert_eq!(Expr::integer(2).pow(-1), Expr::rational(1, 2).unwrap());
    assert_eq!(Expr::integer(4).sqrt(), Expr::integer(2));
}

#[test]
fn test_shared_subtrees_in_maps() {
    let mut set = rustc_hash::FxHashSet::default();
    set.insert(x() * y());
    set.insert(y() * x());
    set.insert(parse("x*y").unwrap());
    assert_eq!(set.len(), 1);
}
