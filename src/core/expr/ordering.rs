//! Canonical total order over expressions.
//!
//! Used to sort Sum terms and Product factors so that construction order
//! never shows up in the canonical form.
//!
//! Rules:
//! - numbers come first, in numeric order
//! - other terms compare by their factor lists with the coefficient stripped,
//!   so `x` sorts before `2*x**2` and `3*y`
//! - each factor compares by base, then exponent (implicit exponent 1)
//! - atoms compare by kind: Constant < CustomConstant < Symbol < FunctionCall < Sum
//! - symbols compare alphabetically
//! - the coefficient is the final tie-break

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::core::number::Number;

/// Compare two expressions for canonical ordering
pub fn expr_cmp(a: &Expr, b: &Expr) -> Ordering {
    match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => x.cmp(y),
        (ExprKind::Number(_), _) => Ordering::Less,
        (_, ExprKind::Number(_)) => Ordering::Greater,
        _ => {
            let (ca, fa) = term_parts(a);
            let (cb, fb) = term_parts(b);
            for i in 0..fa.len().min(fb.len()) {
                let ord = factor_cmp(fa.get(i), fb.get(i));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            fa.len().cmp(&fb.len()).then_with(|| match (ca, cb) {
                (Some(x), Some(y)) => x.cmp(y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
        }
    }
}

/// Non-numeric factors of a term
#[derive(Clone, Copy)]
enum Factors<'a> {
    One(&'a Expr),
    Many(&'a [Arc<Expr>]),
}

impl<'a> Factors<'a> {
    fn len(&self) -> usize {
        match self {
            Factors::One(_) => 1,
            Factors::Many(fs) => fs.len(),
        }
    }

    fn get(&self, i: usize) -> &'a Expr {
        match *self {
            Factors::One(e) => e,
            Factors::Many(fs) => &fs[i],
        }
    }
}

/// Coefficient (if any) and remaining factors of a term
fn term_parts(e: &Expr) -> (Option<&Number>, Factors<'_>) {
    match &e.kind {
        ExprKind::Product(factors) => match factors.first().map(|f| &f.kind) {
            Some(ExprKind::Number(n)) => (Some(n), Factors::Many(&factors[1..])),
            _ => (None, Factors::Many(factors)),
        },
        _ => (None, Factors::One(e)),
    }
}

fn factor_cmp(a: &Expr, b: &Expr) -> Ordering {
    let (ba, ea) = pow_parts(a);
    let (bb, eb) = pow_parts(b);
    base_cmp(ba, bb).then_with(|| match (ea, eb) {
        (Some(x), Some(y)) => expr_cmp(x, y),
        (Some(x), None) => exponent_vs_one(x),
        (None, Some(y)) => exponent_vs_one(y).reverse(),
        (None, None) => Ordering::Equal,
    })
}

fn exponent_vs_one(e: &Expr) -> Ordering {
    match &e.kind {
        ExprKind::Number(n) => n.cmp(&Number::one()),
        _ => Ordering::Greater,
    }
}

fn pow_parts(e: &Expr) -> (&Expr, Option<&Expr>) {
    match &e.kind {
        ExprKind::Pow(b, ex) => (b, Some(ex)),
        _ => (e, None),
    }
}

fn kind_rank(e: &Expr) -> u8 {
    match &e.kind {
        ExprKind::Number(_) => 0,
        ExprKind::Constant(_) => 1,
        ExprKind::CustomConstant(_) => 2,
        ExprKind::Symbol(_) => 3,
        ExprKind::FunctionCall { .. } => 4,
        ExprKind::Sum(_) => 5,
        ExprKind::Product(_) => 6,
        ExprKind::Pow(..) => 7,
    }
}

fn base_cmp(a: &Expr, b: &Expr) -> Ordering {
    let (ra, rb) = (kind_rank(a), kind_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => x.cmp(y),
        (ExprKind::Constant(x), ExprKind::Constant(y)) => x.cmp(y),
        (ExprKind::CustomConstant(x), ExprKind::CustomConstant(y))
        | (ExprKind::Symbol(x), ExprKind::Symbol(y)) => x.cmp(y),
        (
            ExprKind::FunctionCall { func: f1, arg: a1 },
            ExprKind::FunctionCall { func: f2, arg: a2 },
        ) => f1.cmp(f2).then_with(|| expr_cmp(a1, a2)),
        (ExprKind::Sum(t1), ExprKind::Sum(t2)) => slice_cmp(t1, t2),
        _ => expr_cmp(a, b),
    }
}

fn slice_cmp(a: &[Arc<Expr>], b: &[Arc<Expr>]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = expr_cmp(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
