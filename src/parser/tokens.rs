use std::fmt;

use crate::core::error::Span;

/// Binary and unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// `^` or `**`
    Pow,
}

impl Operator {
    /// Binding power; unary minus sits between `Mul` and `Pow`
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 30,
        }
    }

    pub fn is_right_assoc(self) -> bool {
        matches!(self, Operator::Pow)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
        }
    }
}

pub(crate) const UNARY_PRECEDENCE: u8 = 25;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind<'src> {
    /// Digits only
    Integer(&'src str),
    /// Literal with a decimal point or exponent
    Decimal(&'src str),
    Identifier(&'src str),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
}

/// A token with its source location
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
    /// Whitespace separates this token from the previous one
    pub spaced: bool,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind<'src>, span: Span, spaced: bool) -> Self {
        Self { kind, span, spaced }
    }

    /// Token inserted by the parser, located at the start of `next`
    pub fn implicit_mul(next: &Token<'_>) -> Self {
        Self::new(
            TokenKind::Operator(Operator::Mul),
            Span::new(next.span.start, next.span.start),
            false,
        )
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(s) | TokenKind::Decimal(s) => write!(f, "number '{s}'"),
            TokenKind::Identifier(s) => write!(f, "identifier '{s}'"),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op.symbol()),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
        }
    }
}
