//! Parser module - converts strings to expressions
//!
//! Pipeline: lex -> limits -> implicit multiplication -> Pratt parse.
//! Every stage canonicalizes through the public constructors, so a parsed
//! expression is identical to the one built programmatically.
//!
//! # Reserved names
//! `pi`, `E`, `e`, `I`, `EulerGamma`, `Catalan`, `GoldenRatio`, `oo`, `zoo`
//! and `nan` always read as constants. A symbol built with one of these
//! names (`Expr::symbol("e")`) prints as that name and therefore parses
//! back as the constant, not as the symbol.
mod implicit_mul;
mod lexer;
mod pratt;
mod tokens;

use crate::core::error::{Result, Span, SymError};
use crate::core::expr::Expr;
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};

/// Parser configuration
///
/// # Example
/// ```
/// use symb_cas::{Expr, Parser};
///
/// let exact = Parser::new().exact_decimals(true).parse("0.5*x").unwrap();
/// assert_eq!(exact, Expr::rational(1, 2).unwrap() * Expr::symbol("x"));
///
/// assert!(Parser::new().implicit_mul(false).parse("2x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    max_depth: usize,
    max_nodes: usize,
    exact_decimals: bool,
    implicit_mul: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            exact_decimals: false,
            implicit_mul: true,
        }
    }
}

impl Parser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting of sub-expressions
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Maximum number of tokens in the input
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Parse decimal literals as exact rationals instead of real approximations
    pub fn exact_decimals(mut self, exact: bool) -> Self {
        self.exact_decimals = exact;
        self
    }

    /// Enable or disable implicit multiplication (`2x`, `x y`, `(a)(b)`)
    pub fn implicit_mul(mut self, enabled: bool) -> Self {
        self.implicit_mul = enabled;
        self
    }

    /// Parse a formula string into a canonical expression
    ///
    /// # Errors
    /// Returns `SymError::Parse` with a byte span if:
    /// - The input is empty
    /// - The input contains an invalid character or malformed number
    /// - Parentheses are unbalanced or an operator is dangling
    /// - A call names an unknown function or passes more than one argument
    /// - The input exceeds `max_nodes` tokens or `max_depth` nesting
    ///
    /// Function application and division may also surface `Domain` and
    /// `DivideByZero` errors (`lambertw(-5.0)`, `1/0`).
    pub fn parse(&self, input: &str) -> Result<Expr> {
        tracing::debug!(input, "parse");

        if input.trim().is_empty() {
            return Err(SymError::parse_at("empty formula", Span::new(0, input.len().max(1))));
        }

        let tokens = lexer::lex(input)?;
        if tokens.len() > self.max_nodes {
            return Err(SymError::parse_at(
                format!("formula exceeds maximum of {} tokens", self.max_nodes),
                Span::new(0, input.len()),
            ));
        }

        let tokens = if self.implicit_mul {
            implicit_mul::insert_implicit_multiplication(tokens)
        } else {
            tokens
        };
        tracing::trace!(count = tokens.len(), "tokens");

        pratt::parse_expression(&tokens, input.len(), self)
    }
}

/// Parse a formula string with default settings
///
/// Constant names are reserved, see the module docs.
///
/// # Example
/// ```
/// use symb_cas::{Expr, parse};
///
/// let x = Expr::symbol("x");
/// assert_eq!(parse("x^2 + 2x").unwrap(), x.pow(2) + 2 * &x);
/// ```
///
/// # Errors
/// See [`Parser::parse`].
pub fn parse(input: &str) -> Result<Expr> {
    Parser::new().parse(input)
}
