//! Substitution and coefficient extraction
//!
//! Substitution rebuilds the tree bottom-up through the canonical
//! constructors. A Sum or Product target also matches any sum or product
//! that contains its operands as a sub-multiset, so `(x + y + z)` with
//! `x + y -> w` becomes `w + z`. Number targets match exact number leaves,
//! which covers the folded constant of a sum, the leading coefficient of a
//! product and numeric exponents: `x + 2` with `2 -> 3` is `x + 3`.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::core::constants::Constant;
use crate::core::error::{Result, SymError};
use crate::core::expr::{Expr, ExprKind, expr_cmp};

/// Substitution rules with the composite targets pre-sorted
struct Rules<'a, S> {
    map: &'a HashMap<Expr, Expr, S>,
    /// Sum and Product targets in canonical order, for sub-multiset matching
    composite: Vec<(&'a Expr, &'a Expr)>,
}

impl<'a, S: BuildHasher> Rules<'a, S> {
    fn new(map: &'a HashMap<Expr, Expr, S>) -> Self {
        let mut composite: Vec<(&Expr, &Expr)> = map
            .iter()
            .filter(|(k, _)| matches!(k.kind(), ExprKind::Sum(_) | ExprKind::Product(_)))
            .collect();
        composite.sort_by(|a, b| expr_cmp(a.0, b.0));
        Self { map, composite }
    }

    fn apply(&self, e: &Expr) -> Result<Expr> {
        if let Some(replacement) = self.map.get(e) {
            return Ok(replacement.clone());
        }
        match e.kind() {
            ExprKind::Sum(terms) => {
                let (matched, rest) = self.match_operands(terms, true);
                let mut out = self.apply_all(&rest)?;
                out.extend(matched);
                Ok(Expr::sum(out))
            }
            ExprKind::Product(factors) => {
                let (matched, rest) = self.match_operands(factors, false);
                let mut out = self.apply_all(&rest)?;
                out.extend(matched);
                Ok(Expr::product(out))
            }
            ExprKind::Pow(base, exp) => Ok(Expr::pow_expr(self.apply(base)?, self.apply(exp)?)),
            ExprKind::FunctionCall { func, arg } => func.apply(self.apply(arg)?),
            _ => Ok(e.clone()),
        }
    }

    fn apply_all(&self, operands: &[Arc<Expr>]) -> Result<Vec<Expr>> {
        operands.iter().map(|o| self.apply(o)).collect()
    }

    /// Replace composite targets whose operands all occur in `operands`.
    /// Returns the replacements and the operands left over.
    fn match_operands(&self, operands: &[Arc<Expr>], sum: bool) -> (Vec<Expr>, Vec<Arc<Expr>>) {
        let mut remaining: Vec<Arc<Expr>> = operands.to_vec();
        let mut matched = Vec::new();
        for (target, replacement) in &self.composite {
            let target_ops = match (target.kind(), sum) {
                (ExprKind::Sum(t), true) | (ExprKind::Product(t), false) => t,
                _ => continue,
            };
            if let Some(left) = remove_submultiset(&remaining, target_ops) {
                remaining = left;
                matched.push((*replacement).clone());
            }
        }
        (matched, remaining)
    }
}

/// `haystack` without one occurrence of each of `needles`, if all occur
fn remove_submultiset(haystack: &[Arc<Expr>], needles: &[Arc<Expr>]) -> Option<Vec<Arc<Expr>>> {
    if needles.len() > haystack.len() {
        return None;
    }
    let mut left: Vec<Arc<Expr>> = haystack.to_vec();
    for needle in needles {
        let pos = left.iter().position(|h| h == needle)?;
        left.remove(pos);
    }
    Some(left)
}

/// Exponent of `var` in a single factor, or `None` if the factor depends on
/// `var` other than as a power with a free exponent
fn var_exponent(factor: &Expr, var: &str) -> Option<Expr> {
    match factor.kind() {
        ExprKind::Symbol(s) if s.name() == var => Some(Expr::one()),
        ExprKind::Pow(base, exp) if base.as_symbol_name() == Some(var) && !exp.contains_symbol(var) => {
            Some(Expr::unwrap_arc(Arc::clone(exp)))
        }
        _ if factor.contains_symbol(var) => None,
        _ => Some(Expr::zero()),
    }
}

impl Expr {
    /// Replace every occurrence of `target` with `replacement`
    ///
    /// # Example
    /// ```
    /// use symb_cas::Expr;
    ///
    /// let (x, y, z, w) = (Expr::symbol("x"), Expr::symbol("y"), Expr::symbol("z"), Expr::symbol("w"));
    /// let e = &x + &y + &z;
    /// assert_eq!(e.substitute(&(&x + &y), &w).unwrap(), &w + &z);
    /// ```
    ///
    /// # Errors
    /// Errors of function application on the rebuilt arguments
    /// (`log(x)` with `x -> 0.0` is fine, `lambertw(x)` with `x -> -5.0`
    /// is a `Domain` error).
    pub fn substitute(&self, target: &Expr, replacement: &Expr) -> Result<Expr> {
        let mut map = HashMap::with_capacity(1);
        map.insert(target.clone(), replacement.clone());
        self.substitute_map(&map)
    }

    /// Simultaneous substitution of every key of `map` by its value
    ///
    /// Replacements are not substituted again, so `{x: y, y: x}` swaps.
    ///
    /// # Errors
    /// See [`Expr::substitute`].
    pub fn substitute_map<S: BuildHasher>(&self, map: &HashMap<Expr, Expr, S>) -> Result<Expr> {
        tracing::debug!(targets = map.len(), "substitute");
        Rules::new(map).apply(self)
    }

    /// Coefficient of `var ** degree` in the expanded expression
    ///
    /// Degree 0 collects the terms free of `var`. Terms where `var` occurs
    /// inside a function or a non-constant exponent never match.
    ///
    /// # Example
    /// ```
    /// use symb_cas::{Expr, parse};
    ///
    /// let e = parse("(x + 2)^2 + y*x").unwrap();
    /// let x = Expr::symbol("x");
    /// assert_eq!(e.coefficient(&x, 1).unwrap(), parse("4 + y").unwrap());
    /// assert_eq!(e.coefficient(&x, 0).unwrap(), Expr::integer(4));
    /// ```
    ///
    /// # Errors
    /// `SymError::Runtime` if `var` is not a symbol or `degree` is complex
    /// or NaN.
    pub fn coefficient(&self, var: &Expr, degree: impl Into<Expr>) -> Result<Expr> {
        let Some(name) = var.as_symbol_name() else {
            return Err(SymError::runtime(format!("coefficient variable must be a symbol, got {var}")));
        };
        let degree = degree.into();
        let invalid = match degree.kind() {
            ExprKind::Number(n) => !n.is_real() || n.is_nan(),
            ExprKind::Constant(c) => *c == Constant::NaN || *c == Constant::ComplexInfinity,
            _ => false,
        };
        if invalid {
            return Err(SymError::runtime(format!("invalid coefficient degree {degree}")));
        }

        let expanded = self.expand();
        let terms: Vec<Arc<Expr>> = match expanded.kind() {
            ExprKind::Sum(terms) => terms.clone(),
            _ => vec![Arc::new(expanded.clone())],
        };

        let mut coefficients = Vec::new();
        'terms: for term in &terms {
            let factors: Vec<Arc<Expr>> = match term.kind() {
                ExprKind::Product(factors) => factors.clone(),
                _ => vec![Arc::clone(term)],
            };
            let mut exponents = Vec::new();
            let mut rest = Vec::new();
            for f in factors {
                match var_exponent(&f, name) {
                    None => continue 'terms,
                    Some(e) if e.is_zero() => rest.push(f),
                    Some(e) => exponents.push(e),
                }
            }
            if Expr::sum(exponents) == degree {
                coefficients.push(Arc::new(Expr::product_from_arcs(rest)));
            }
        }
        Ok(Expr::sum_from_arcs(coefficients))
    }
}
