//! Property-Based and Fuzz Testing
//!
//! Uses quickcheck for property-based testing of:
//! - Parser robustness (fuzz testing)
//! - Canonical form invariants over random expression trees

use std::hash::{Hash, Hasher};

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use rustc_hash::FxHasher;

use crate::{Expr, parse};

// ============================================================
// PART 1: EXPRESSION GENERATORS FOR PROPERTY TESTS
// ============================================================

/// A random expression over `x`, `y`, `z` and small integers
#[derive(Clone, Debug)]
struct ArbExpr(Expr);

impl Arbitrary for ArbExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(3); // Keep trees small enough to expand
        ArbExpr(gen_expr(g, depth))
    }
}

fn gen_leaf(g: &mut Gen) -> Expr {
    match u8::arbitrary(g) % 4 {
        0 => Expr::integer(i64::from(i8::arbitrary(g) % 6)),
        1 => Expr::symbol("x"),
        2 => Expr::symbol("y"),
        _ => Expr::symbol("z"),
    }
}

fn gen_expr(g: &mut Gen, depth: usize) -> Expr {
    if depth == 0 {
        return gen_leaf(g);
    }
    match u8::arbitrary(g) % 7 {
        0 | 1 => gen_expr(g, depth - 1) + gen_expr(g, depth - 1),
        2 | 3 => gen_expr(g, depth - 1) * gen_expr(g, depth - 1),
        4 => gen_expr(g, depth - 1).pow(i64::from(u8::arbitrary(g) % 4)),
        5 => {
            let arg = gen_expr(g, depth - 1);
            arg.sin().unwrap_or(arg)
        }
        _ => gen_leaf(g),
    }
}

fn hash_of(e: &Expr) -> u64 {
    let mut h = FxHasher::default();
    e.hash(&mut h);
    h.finish()
}

/// Random formula strings, valid or not
fn gen_formula(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        let atoms = ["x", "y", "2", "0.5", "pi", "I", "oo", "0", ")", "(", "*"];
        return atoms[usize::arbitrary(g) % atoms.len()].to_string();
    }
    let left = gen_formula(g, depth - 1);
    let right = gen_formula(g, depth - 1);
    match u8::arbitrary(g) % 6 {
        0 => {
            let ops = ["+", "-", "*", "/", "^", "**", " "];
            format!("{left}{}{right}", ops[usize::arbitrary(g) % ops.len()])
        }
        1 => {
            let fns = ["sin", "log", "sqrt", "gamma", "lambertw", "f"];
            format!("{}({left})", fns[usize::arbitrary(g) % fns.len()])
        }
        2 => format!("-({left})"),
        3 => format!("({left})({right})"),
        _ => left,
    }
}

// ============================================================
// PART 2: PARSER FUZZ TESTS
// ============================================================

/// Property: Parser should never panic on arbitrary input
#[test]
fn test_parser_never_panics_on_random_input() {
    fn prop_parser_no_panic(input: String) -> TestResult {
        // Either Ok or Err, never a panic
        let _ = parse(&input);
        TestResult::passed()
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .quickcheck(prop_parser_no_panic as fn(String) -> TestResult);
}

/// Property: Parser should never panic on formula-shaped input
#[test]
fn test_parser_never_panics_on_formulas() {
    let mut g = Gen::new(10);
    for _ in 0..500 {
        let formula = gen_formula(&mut g, 4);
        let _ = parse(&formula);
    }
}

/// Fuzz test with specifically crafted edge cases
#[test]
fn test_parser_edge_cases() {
    let edge_cases = [
        "", "   ", "()", "((()))", "+++", "---x", "1+", "+1", "sin()", "sin(x,y)", "1..2",
        "1e999999", "1e-999999", "x^y^z", "((((x))))", "sin(cos(tan(exp(ln(x)))))",
        "x+y*z^w/a-b", "1/0", "0/0", "(-0)", "0^-1", "0**0", "∞", "π", "2^99999999999",
        "zeta(1)", "gamma(0)", "log(0)",
    ];
    for case in &edge_cases {
        // Should not panic - may succeed or fail with error
        let _ = parse(case);
    }
}

// ============================================================
// PART 3: CANONICAL FORM PROPERTY TESTS
// ============================================================

#[test]
fn test_addition_commutes() {
    fn prop(a: ArbExpr, b: ArbExpr) -> bool {
        let (ab, ba) = (&a.0 + &b.0, &b.0 + &a.0);
        ab == ba && hash_of(&ab) == hash_of(&ba)
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbExpr, ArbExpr) -> bool);
}

#[test]
fn test_multiplication_commutes() {
    fn prop(a: ArbExpr, b: ArbExpr) -> bool {
        let (ab, ba) = (&a.0 * &b.0, &b.0 * &a.0);
        ab == ba && hash_of(&ab) == hash_of(&ba)
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbExpr, ArbExpr) -> bool);
}

#[test]
fn test_expand_is_idempotent() {
    fn prop(a: ArbExpr) -> bool {
        let once = a.0.expand();
        once.expand() == once
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(ArbExpr) -> bool);
}

#[test]
fn test_self_difference_expands_to_zero() {
    fn prop(a: ArbExpr) -> bool {
        (&a.0 - &a.0).expand().is_zero()
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(ArbExpr) -> bool);
}

#[test]
fn test_difference_with_itself_is_zero() {
    fn prop(a: ArbExpr) -> bool {
        (&a.0 - &a.0).is_zero()
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbExpr) -> bool);
}

#[test]
fn test_quotient_with_itself_is_one() {
    fn prop(a: ArbExpr) -> TestResult {
        if a.0.is_zero() {
            return TestResult::discard();
        }
        TestResult::from_bool(a.0.div(&a.0).is_ok_and(|q| q.is_one()))
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbExpr) -> TestResult);
}

#[test]
fn test_structural_copies_are_equal() {
    fn prop(a: ArbExpr) -> bool {
        let rebuilt = a.0.substitute(&Expr::symbol("x"), &Expr::symbol("x"));
        rebuilt.is_ok_and(|r| r == a.0 && hash_of(&r) == hash_of(&a.0))
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(ArbExpr) -> bool);
}
