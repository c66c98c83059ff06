//! Core types for symbolic mathematics
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - canonical expression tree
//! - `Number` - exact and approximate numeric leaves
//! - `Constant` / `NamedConstant` - predefined constants
//! - `InternedSymbol` - global symbol interner
//! - `SymError` - error types
//! - Renderers (to_string, to_latex, to_mathml, to_ccode, to_jscode)
//! - Visitor pattern for tree traversal

pub(crate) mod constants;
mod display; // Display implementations for Expr
pub(crate) mod error;
pub(crate) mod expr;
pub(crate) mod number;
pub(crate) mod symbol;
pub mod visitor; // Public visitor pattern

// Public re-exports (for external API)
pub use constants::{Constant, NamedConstant};
pub use error::{ErrorKind, Result, Span, SymError};
pub use expr::{Expr, ExprKind, expr_cmp};
pub use number::Number;
pub use symbol::{InternedSymbol, symbol_count, symbol_exists};
pub use visitor::{ExprVisitor, walk_expr};
