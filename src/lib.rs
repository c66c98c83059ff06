//! Symbolic Mathematics Engine
//!
//! Immutable expression trees kept in a canonical form, so structurally
//! equal inputs compare and hash equal no matter how they were built.
//!
//! # Features
//! - Exact integers and rationals, real approximations and complex numbers
//! - Canonical sums, products and powers: like terms and factors merge on
//!   construction
//! - A fixed table of unary functions with exact and numeric evaluation
//! - Formula parsing with implicit multiplication and byte-span errors
//! - Differentiation, polynomial expansion, substitution, coefficients
//! - Plain text, LaTeX, MathML, C and JavaScript rendering
//! - Dense symbolic matrices
//!
//! # Usage Examples
//!
//! ## Building expressions
//! ```
//! use symb_cas::Expr;
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! assert_eq!(&x + &y, &y + &x);
//! assert_eq!(&x * &x, x.pow(2));
//! assert_eq!(&x - &x, Expr::zero());
//! ```
//!
//! ## Parsing and differentiating
//! ```
//! use symb_cas::parse;
//!
//! let f = parse("3*y^2 - log(x)*cos(x)").unwrap();
//! let df = f.diff(&parse("x").unwrap()).unwrap();
//! assert_eq!(df.to_string(), "-cos(x)/x + sin(x)*log(x)");
//! ```
//!
//! ## Expanding
//! ```
//! use symb_cas::parse;
//!
//! let e = parse("(3x + 2)(x^2 - 7x + 9)(x - 1)").unwrap();
//! assert_eq!(e.expand(), parse("3x^4 - 22x^3 + 32x^2 + 5x - 18").unwrap());
//! ```

mod core;
mod diff;
mod expand;
pub mod functions;
mod helpers;
pub(crate) mod math;
mod matrix;
mod parser;
mod subs;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use crate::core::visitor;
pub use crate::core::{
    Constant, ErrorKind, Expr, ExprKind, ExprVisitor, InternedSymbol, NamedConstant, Number,
    Result, Span, SymError, expr_cmp, symbol_count, symbol_exists, walk_expr,
};
pub use functions::Function;
pub use helpers::{gradient, gradient_str, hessian, hessian_str, jacobian, jacobian_str};
pub use matrix::DenseMatrix;
pub use parser::{Parser, parse};

/// Default maximum nesting depth accepted by the parser
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum token count accepted by the parser
pub const DEFAULT_MAX_NODES: usize = 10_000;
/// Expansion keeps a product unexpanded past this many terms
pub const MAX_EXPANSION_TERMS: usize = 100_000;
/// Exact integer powers whose result would exceed this many bits stay
/// symbolic
pub const MAX_EXACT_POW_BITS: u64 = 1 << 20;
