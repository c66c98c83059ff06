//! Expression tree for symbolic mathematics.
//!
//! This module defines:
//! - `Expr` - the immutable expression node
//! - `ExprKind` - the node variants (Number, Symbol, Constant, Sum, ...)
//!
//! # Architecture
//!
//! ## Canonical form
//! Every constructor returns its result in canonical form, so structural
//! equality *is* mathematical equality up to commutativity and like-term
//! collection:
//! - `a + b + c` is `Sum([a, b, c])`, flattened and sorted, with like terms merged
//! - `a * b` is `Product([coeff?, a, b])`, with equal bases merged into powers
//! - subtraction is `a + (-1)*b`, division is `a * b^-1`
//! - a bare numeric coefficient distributes over a sum: `2*(a + b)` is `2*a + 2*b`
//!
//! ## Structural Hashing
//! Each `Expr` has a pre-computed `hash` field for O(1) equality rejection.
//! Sum and Product children are combined with a commutative hash so the
//! hash does not depend on construction order.
//!
//! ## Identity
//! `id` is unique per construction and survives cloning. It backs
//! [`Expr::same_node`] and never participates in `==` or `Hash`.
//!
//! # Usage
//!
//! ```
//! use symb_cas::Expr;
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! assert_eq!(&x * &y, &y * &x);
//! ```

mod constructors;
mod hash;
mod ops;
mod ordering;

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use crate::core::constants::Constant;
use crate::core::number::Number;
use crate::core::symbol::InternedSymbol;
use crate::functions::Function;

pub use hash::compute_expr_hash;
pub use ordering::expr_cmp;

// =============================================================================
// EXPRESSION ID COUNTER
// =============================================================================

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Placeholder swapped into `Pow`/`FunctionCall` slots during Drop
static DUMMY_ARC: LazyLock<Arc<Expr>> = LazyLock::new(|| {
    let kind = ExprKind::Number(Number::zero());
    Arc::new(Expr {
        id: 0,
        hash: compute_expr_hash(&kind),
        kind,
    })
});

// =============================================================================
// EXPR
// =============================================================================

/// A symbolic mathematical expression in canonical form.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Construction id; identity only, not used in equality
    pub(crate) id: u64,
    /// Structural hash for O(1) equality rejection
    pub(crate) hash: u64,
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

// =============================================================================
// EXPRKIND
// =============================================================================

/// The kind (structure) of an expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer, rational, real approximation or complex number
    Number(Number),

    /// Differentiable unknown
    Symbol(InternedSymbol),

    /// Predefined non-numeric constant (pi, E, oo, ...)
    Constant(Constant),

    /// User-named constant; derivative 0, no LaTeX/MathML rendering
    CustomConstant(InternedSymbol),

    /// N-ary sum, canonical: at most one leading number, like terms merged
    Sum(Vec<Arc<Expr>>),

    /// N-ary product, canonical: at most one leading coefficient, bases merged
    Product(Vec<Arc<Expr>>),

    /// `base ** exponent`
    Pow(Arc<Expr>, Arc<Expr>),

    /// Unary function application
    FunctionCall {
        func: Function,
        arg: Arc<Expr>,
    },
}

// =============================================================================
// DROP IMPLEMENTATION - Iterative drop to prevent stack overflow
// =============================================================================

impl Drop for Expr {
    fn drop(&mut self) {
        fn drain_children(kind: &mut ExprKind, queue: &mut Vec<Arc<Expr>>) {
            match kind {
                ExprKind::Sum(terms) | ExprKind::Product(terms) => {
                    queue.extend(std::mem::take(terms));
                }
                ExprKind::Pow(base, exp) => {
                    queue.push(std::mem::replace(base, Arc::clone(&DUMMY_ARC)));
                    queue.push(std::mem::replace(exp, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::FunctionCall { arg, .. } => {
                    queue.push(std::mem::replace(arg, Arc::clone(&DUMMY_ARC)));
                }
                ExprKind::Number(_)
                | ExprKind::Symbol(_)
                | ExprKind::Constant(_)
                | ExprKind::CustomConstant(_) => {}
            }
        }

        let mut work_queue = Vec::new();
        drain_children(&mut self.kind, &mut work_queue);

        while let Some(child_arc) = work_queue.pop() {
            if let Ok(mut child_expr) = Arc::try_unwrap(child_arc) {
                drain_children(&mut child_expr.kind, &mut work_queue);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    reason = "Standard test relaxations"
)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_flattening() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let z = Expr::symbol("z");

        let inner = Expr::sum(vec![x, y]);
        let outer = Expr::sum(vec![inner, z]);

        match &outer.kind {
            ExprKind::Sum(terms) => assert_eq!(terms.len(), 3),
            _ => panic!("Expected Sum"),
        }
    }

    #[test]
    fn test_product_flattening() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let c = Expr::symbol("c");

        let inner = Expr::product(vec![a, b]);
        let outer = Expr::product(vec![inner, c]);

        match &outer.kind {
            ExprKind::Product(factors) => assert_eq!(factors.len(), 3),
            _ => panic!("Expected Product"),
        }
    }

    #[test]
    fn test_subtraction_as_sum() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");

        // x - y = Sum([x, Product([-1, y])])
        let result = Expr::sub_expr(x, y);
        match &result.kind {
            ExprKind::Sum(terms) => {
                assert_eq!(terms.len(), 2);
                assert!(matches!(terms[1].kind, ExprKind::Product(_)));
            }
            _ => panic!("Expected Sum from subtraction"),
        }
    }

    #[test]
    fn test_identity_is_not_equality() {
        let a = Expr::symbol("x");
        let b = Expr::symbol("x");
        assert_eq!(a, b);
        assert!(!a.same_node(&b));
        let c = a.clone();
        assert!(a.same_node(&c));
    }

    #[test]
    fn test_deep_tree_drop() {
        let x = Expr::symbol("x");
        let mut e = x.clone();
        for _ in 0..50_000 {
            e = Expr::func(Function::Sin, e).unwrap();
        }
        drop(e);
    }
}
