use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::ExprKind;

/// Structural hash of a node kind
pub fn compute_expr_hash(kind: &ExprKind) -> u64 {
    let mut hasher = FxHasher::default();
    kind.hash(&mut hasher);
    hasher.finish()
}

impl Hash for ExprKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Number(n) => n.hash(state),
            Self::Symbol(s) | Self::CustomConstant(s) => s.hash(state),
            Self::Constant(c) => c.hash(state),
            Self::Sum(children) | Self::Product(children) => {
                // Commutative: independent of child order
                let mut acc: u64 = 0;
                for c in children {
                    acc = acc.wrapping_add(c.hash);
                }
                acc.hash(state);
                children.len().hash(state);
            }
            Self::Pow(base, exp) => {
                base.hash.hash(state);
                exp.hash.hash(state);
            }
            Self::FunctionCall { func, arg } => {
                func.hash(state);
                arg.hash.hash(state);
            }
        }
    }
}
