//! Implicit multiplication insertion for natural notation
//!
//! Inserts `*` operators between tokens where multiplication is implied, e.g. `2x` → `2 * x`.

use super::pratt::is_call_name;
use super::tokens::{Token, TokenKind};

fn is_number(kind: &TokenKind<'_>) -> bool {
    matches!(kind, TokenKind::Integer(_) | TokenKind::Decimal(_))
}

/// Check if implicit multiplication should be inserted between two tokens
fn should_insert_mul(current: &Token<'_>, next: &Token<'_>) -> bool {
    match (&current.kind, &next.kind) {
        // 2x, 2 sin(x), 2(x+1)
        (a, TokenKind::Identifier(_) | TokenKind::LeftParen) if is_number(a) => true,

        // )x, )2, )(
        (TokenKind::RightParen, b) => {
            is_number(b) || matches!(b, TokenKind::Identifier(_) | TokenKind::LeftParen)
        }

        // `x y`; adjacent letters are already a single identifier
        (TokenKind::Identifier(_), TokenKind::Identifier(_)) => next.spaced,

        // `x (y)` multiplies, `sin(y)` and `sin (y)` are calls, `f(y)` is an error
        (TokenKind::Identifier(name), TokenKind::LeftParen) => next.spaced && !is_call_name(name),

        _ => false,
    }
}

/// Insert implicit multiplication operators between appropriate tokens
///
/// Rules:
/// - Number * Identifier: `2 x` → `2 * x`
/// - Number * (: `2(x)` → `2 * (x)`
/// - ) * Identifier/Number/(: `(a) x` → `(a) * x`
/// - Identifier * Identifier when separated by whitespace: `a x` → `a * x`
/// - Identifier * ( when separated by whitespace, unless it names a function
///
/// Identifier followed by number and two adjacent numbers are left alone
/// and rejected by the parser.
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    if tokens.is_empty() {
        return tokens;
    }

    // Check if any insertion is needed before allocating new vector
    let needs_insertion = tokens.windows(2).any(|w| should_insert_mul(&w[0], &w[1]));

    if !needs_insertion {
        return tokens;
    }

    #[allow(
        clippy::integer_division,
        reason = "Integer division for capacity estimation in token vector"
    )]
    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let mul = it
            .peek()
            .filter(|next| should_insert_mul(&current, next))
            .map(Token::implicit_mul);

        result.push(current);
        if let Some(mul) = mul {
            result.push(mul);
        }
    }

    result
}
