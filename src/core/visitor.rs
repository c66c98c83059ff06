//! Expression visitor pattern for tree traversal
//!
//! Provides a clean interface for walking the expression tree without
//! manually handling the recursive structure.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::constants::Constant;
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::functions::Function;

/// Trait for visiting expression nodes
///
/// Each method returns a boolean indicating whether to continue visiting
/// children. Leaf methods return whether the walk as a whole should go on.
///
/// # Example
/// ```
/// use symb_cas::{Expr, ExprVisitor, walk_expr};
///
/// struct PowCounter { count: usize }
///
/// impl ExprVisitor for PowCounter {
///     fn visit_pow(&mut self, _base: &Expr, _exp: &Expr) -> bool {
///         self.count += 1;
///         true
///     }
/// }
///
/// let x = Expr::symbol("x");
/// let mut counter = PowCounter { count: 0 };
/// walk_expr(&(x.pow(2) + x.pow(3)), &mut counter);
/// assert_eq!(counter.count, 2);
/// ```
pub trait ExprVisitor {
    fn visit_number(&mut self, _n: &Number) -> bool {
        true
    }

    fn visit_symbol(&mut self, _name: &str) -> bool {
        true
    }

    fn visit_constant(&mut self, _c: Constant) -> bool {
        true
    }

    fn visit_custom_constant(&mut self, _name: &str) -> bool {
        true
    }

    /// Visit a Sum (`"+"`) or Product (`"*"`), returns true to visit operands
    fn visit_nary(&mut self, _op: &str, _operands: &[Arc<Expr>]) -> bool {
        true
    }

    /// Returns true to visit base and exponent
    fn visit_pow(&mut self, _base: &Expr, _exp: &Expr) -> bool {
        true
    }

    /// Returns true to visit the argument
    fn visit_function(&mut self, _func: Function, _arg: &Expr) -> bool {
        true
    }
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children).
pub fn walk_expr<V: ExprVisitor>(expr: &Expr, visitor: &mut V) {
    walk(expr, visitor);
}

/// Returns false once the visitor asked to stop
fn walk<V: ExprVisitor>(expr: &Expr, visitor: &mut V) -> bool {
    match expr.kind() {
        ExprKind::Number(n) => visitor.visit_number(n),
        ExprKind::Symbol(s) => visitor.visit_symbol(s.name()),
        ExprKind::Constant(c) => visitor.visit_constant(*c),
        ExprKind::CustomConstant(s) => visitor.visit_custom_constant(s.name()),
        ExprKind::Sum(terms) => {
            !visitor.visit_nary("+", terms) || terms.iter().all(|t| walk(t, visitor))
        }
        ExprKind::Product(factors) => {
            !visitor.visit_nary("*", factors) || factors.iter().all(|f| walk(f, visitor))
        }
        ExprKind::Pow(base, exp) => {
            !visitor.visit_pow(base, exp) || (walk(base, visitor) && walk(exp, visitor))
        }
        ExprKind::FunctionCall { func, arg } => !visitor.visit_function(*func, arg) || walk(arg, visitor),
    }
}

/// A simple visitor that counts nodes
#[derive(Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit_number(&mut self, _n: &Number) -> bool {
        self.count += 1;
        true
    }

    fn visit_symbol(&mut self, _name: &str) -> bool {
        self.count += 1;
        true
    }

    fn visit_constant(&mut self, _c: Constant) -> bool {
        self.count += 1;
        true
    }

    fn visit_custom_constant(&mut self, _name: &str) -> bool {
        self.count += 1;
        true
    }

    fn visit_nary(&mut self, _op: &str, _operands: &[Arc<Expr>]) -> bool {
        self.count += 1;
        true
    }

    fn visit_pow(&mut self, _base: &Expr, _exp: &Expr) -> bool {
        self.count += 1;
        true
    }

    fn visit_function(&mut self, _func: Function, _arg: &Expr) -> bool {
        self.count += 1;
        true
    }
}

/// A visitor that collects all unique symbol names
#[derive(Default)]
pub struct SymbolCollector {
    pub symbols: BTreeSet<String>,
}

impl ExprVisitor for SymbolCollector {
    fn visit_symbol(&mut self, name: &str) -> bool {
        if !self.symbols.contains(name) {
            self.symbols.insert(name.to_owned());
        }
        true
    }
}

/// Stops at the first occurrence of a symbol
struct SymbolFinder<'a> {
    name: &'a str,
    found: bool,
}

impl ExprVisitor for SymbolFinder<'_> {
    fn visit_symbol(&mut self, name: &str) -> bool {
        self.found = name == self.name;
        !self.found
    }
}

/// Stops at the first custom constant
#[derive(Default)]
struct CustomConstantFinder {
    found: bool,
}

impl ExprVisitor for CustomConstantFinder {
    fn visit_custom_constant(&mut self, _name: &str) -> bool {
        self.found = true;
        false
    }
}

impl Expr {
    /// Names of all symbols in the expression, sorted
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut collector = SymbolCollector::default();
        walk_expr(self, &mut collector);
        collector.symbols
    }

    pub fn contains_symbol(&self, name: &str) -> bool {
        let mut finder = SymbolFinder { name, found: false };
        walk_expr(self, &mut finder);
        finder.found
    }

    /// True if a custom constant occurs anywhere in the tree
    pub fn has_custom_constant(&self) -> bool {
        let mut finder = CustomConstantFinder::default();
        walk_expr(self, &mut finder);
        finder.found
    }

    /// Number of nodes in the tree, counting shared nodes once per use
    pub fn node_count(&self) -> usize {
        let mut counter = NodeCounter::default();
        walk_expr(self, &mut counter);
        counter.count
    }

    /// Height of the tree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Expr, usize)> = vec![(self, 1)];
        while let Some((e, d)) = stack.pop() {
            max = max.max(d);
            match e.kind() {
                ExprKind::Sum(children) | ExprKind::Product(children) => {
                    stack.extend(children.iter().map(|c| (c.as_ref(), d + 1)));
                }
                ExprKind::Pow(b, x) => {
                    stack.push((b, d + 1));
                    stack.push((x, d + 1));
                }
                ExprKind::FunctionCall { arg, .. } => stack.push((arg, d + 1)),
                _ => {}
            }
        }
        max
    }
}
