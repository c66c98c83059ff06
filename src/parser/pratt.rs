use num_bigint::BigInt;
use num_rational::BigRational;

use super::Parser;
use super::tokens::{Operator, Token, TokenKind, UNARY_PRECEDENCE};
use crate::core::constants::{Constant, NamedConstant};
use crate::core::error::{Result, Span, SymError};
use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;
use crate::functions::Function;

/// Decimal exponents beyond this are rejected when parsing exactly
const MAX_DECIMAL_EXPONENT: i64 = 10_000;

/// True for names that are parsed as calls: the function table plus the
/// `sqrt`, `cbrt` and `exp` constructors
pub(crate) fn is_call_name(name: &str) -> bool {
    matches!(name, "sqrt" | "cbrt" | "exp") || Function::from_name(name).is_some()
}

/// Parse tokens into an expression using the Pratt parsing algorithm
pub(crate) fn parse_expression(tokens: &[Token<'_>], input_len: usize, config: &Parser) -> Result<Expr> {
    let end = Span::at(input_len);
    if tokens.is_empty() {
        return Err(SymError::parse_at("unexpected end of input", end));
    }

    let mut parser = Pratt {
        tokens,
        pos: 0,
        depth: 0,
        end,
        config,
    };

    let expr = parser.parse_expr(0)?;
    match parser.current() {
        None => Ok(expr),
        Some(Token {
            kind: TokenKind::RightParen,
            span,
            ..
        }) => Err(SymError::parse_at("unbalanced parentheses: unmatched ')'", *span)),
        Some(token) => Err(SymError::parse_at(format!("unexpected {}", token.kind), token.span)),
    }
}

struct Pratt<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
    depth: usize,
    /// Location reported for errors at end of input
    end: Span,
    config: &'a Parser,
}

impl<'a, 'src> Pratt<'a, 'src> {
    fn current(&self) -> Option<&'a Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn current_span(&self) -> Span {
        self.current().map_or(self.end, |t| t.span)
    }

    fn peek_operator(&self) -> Option<Operator> {
        match self.current()?.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(SymError::parse_at(
                format!("expression nesting exceeds maximum depth of {}", self.config.max_depth),
                self.current_span(),
            ));
        }
        let result = self.parse_expr_inner(min_precedence);
        self.depth -= 1;
        result
    }

    fn parse_expr_inner(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut left = self.parse_prefix()?;

        while let Some(op) = self.peek_operator() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();
            left = self.parse_infix(left, op)?;
        }

        Ok(left)
    }

    /// Operand chains of equal precedence are collected and canonicalized
    /// once, so long sums stay linear in the number of terms
    fn parse_infix(&mut self, left: Expr, op: Operator) -> Result<Expr> {
        let precedence = op.precedence();
        if op.is_right_assoc() {
            let right = self.parse_expr(precedence)?;
            return Ok(left.pow(right));
        }

        let mut operands = vec![left];
        let mut op = op;
        loop {
            let right = self.parse_expr(precedence + 1)?;
            operands.push(chain_operand(op, right)?);
            match self.peek_operator() {
                Some(next) if next.precedence() == precedence && !next.is_right_assoc() => {
                    self.advance();
                    op = next;
                }
                _ => break,
            }
        }

        Ok(if precedence == Operator::Add.precedence() {
            Expr::sum(operands)
        } else {
            Expr::product(operands)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let Some(token) = self.current() else {
            return Err(SymError::parse_at("unexpected end of input", self.end));
        };

        match &token.kind {
            TokenKind::Integer(text) => {
                self.advance();
                let n: BigInt = text
                    .parse()
                    .map_err(|_| SymError::parse_at("malformed integer", token.span))?;
                Ok(Expr::bigint(n))
            }

            TokenKind::Decimal(text) => {
                self.advance();
                if self.config.exact_decimals {
                    exact_decimal(text, token.span).map(Expr::number)
                } else {
                    let x: f64 = text
                        .parse()
                        .map_err(|_| SymError::parse_at("malformed number", token.span))?;
                    Ok(Expr::real(x))
                }
            }

            TokenKind::Identifier(name) => {
                self.advance();
                if is_call_name(name) {
                    return self.parse_call(name, token.span);
                }
                if let Some(Token {
                    kind: TokenKind::LeftParen,
                    spaced: false,
                    ..
                }) = self.current()
                {
                    return Err(SymError::parse_at(format!("unknown function '{name}'"), token.span));
                }
                Ok(match NamedConstant::from_name(name) {
                    Some(c) => Expr::named(c),
                    None => Expr::symbol(name),
                })
            }

            // Unary minus binds tighter than `*` and looser than `^`: -x^2 = -(x^2)
            TokenKind::Operator(Operator::Sub) => {
                self.advance();
                let operand = self.parse_expr(UNARY_PRECEDENCE)?;
                Ok(match operand.kind() {
                    ExprKind::Constant(Constant::Infinity) => Expr::constant(Constant::NegInfinity),
                    _ => operand.negate(),
                })
            }

            TokenKind::Operator(Operator::Add) => {
                self.advance();
                self.parse_expr(UNARY_PRECEDENCE)
            }

            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expr(0)?;
                self.expect_right_paren(token.span)?;
                Ok(expr)
            }

            kind => Err(SymError::parse_at(format!("unexpected {kind}"), token.span)),
        }
    }

    /// `name(arg)` for a known function name; `name_span` locates the name
    fn parse_call(&mut self, name: &str, name_span: Span) -> Result<Expr> {
        let open = match self.current() {
            Some(Token {
                kind: TokenKind::LeftParen,
                span,
                ..
            }) => *span,
            _ => {
                return Err(SymError::parse_at(
                    format!("expected '(' after function '{name}'"),
                    name_span,
                ));
            }
        };
        self.advance();

        let arg = self.parse_expr(0)?;
        if let Some(Token {
            kind: TokenKind::Comma,
            span,
            ..
        }) = self.current()
        {
            return Err(SymError::parse_at(
                format!("function '{name}' takes exactly one argument"),
                *span,
            ));
        }
        self.expect_right_paren(open)?;

        match name {
            "sqrt" => Ok(arg.sqrt()),
            "cbrt" => Ok(arg.cbrt()),
            "exp" => Ok(arg.exp()),
            _ => match Function::from_name(name) {
                Some(func) => func.apply(arg),
                None => Err(SymError::parse_at(format!("unknown function '{name}'"), name_span)),
            },
        }
    }

    /// Consume `)` closing the parenthesis at `open`
    fn expect_right_paren(&mut self, open: Span) -> Result<()> {
        match self.current() {
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(SymError::parse_at(
                format!("expected ')' but found {}", token.kind),
                token.span,
            )),
            None => Err(SymError::parse_at("unbalanced parentheses: missing ')'", open)),
        }
    }
}

/// Exact value of a decimal literal such as `3.25` or `1e-3`
fn exact_decimal(text: &str, span: Span) -> Result<Number> {
    let malformed = || SymError::parse_at("malformed number", span);

    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], text[i + 1..].parse::<i64>().map_err(|_| malformed())?),
        None => (text, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits: BigInt = format!("{int_part}{frac_part}").parse().map_err(|_| malformed())?;

    let frac_len = i64::try_from(frac_part.len()).map_err(|_| malformed())?;
    let scale = exponent - frac_len;
    if scale.abs() > MAX_DECIMAL_EXPONENT {
        return Err(SymError::parse_at("decimal exponent too large for exact parsing", span));
    }
    let power = usize::try_from(scale.unsigned_abs()).map_err(|_| malformed())?;
    let ten_pow = num_traits::pow(BigInt::from(10), power);

    Ok(Number::from_ratio(if scale >= 0 {
        BigRational::from_integer(digits * ten_pow)
    } else {
        BigRational::new(digits, ten_pow)
    }))
}

/// Operand of a left associative chain, with `-` and `/` folded in
fn chain_operand(op: Operator, right: Expr) -> Result<Expr> {
    match op {
        Operator::Add | Operator::Mul => Ok(right),
        Operator::Sub => Ok(right.negate()),
        Operator::Div => Expr::div_expr(Expr::one(), right),
        Operator::Pow => Err(SymError::parse("'^' cannot join a left associative chain")),
    }
}
