//! Tokenizer
//!
//! Single pass over the input bytes. Identifiers are `[A-Za-z_][A-Za-z0-9_]*`;
//! numerals are digit runs with an optional fraction and exponent
//! (`3`, `3.5`, `.5`, `1e-3`). Every token records its byte span and whether
//! whitespace preceded it.

use super::tokens::{Operator, Token, TokenKind};
use crate::core::error::{Result, Span, SymError};

pub(crate) fn lex(input: &str) -> Result<Vec<Token<'_>>> {
    let bytes = input.as_bytes();
    // Most formulas have roughly one token per two characters
    #[allow(
        clippy::integer_division,
        reason = "Integer division for capacity estimation in token vector"
    )]
    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    let mut pos = 0;
    let mut spaced = false;

    while pos < bytes.len() {
        let c = bytes[pos];
        if c.is_ascii_whitespace() {
            spaced = true;
            pos += 1;
            continue;
        }

        let start = pos;
        let kind = match c {
            b'+' => single(&mut pos, TokenKind::Operator(Operator::Add)),
            b'-' => single(&mut pos, TokenKind::Operator(Operator::Sub)),
            b'/' => single(&mut pos, TokenKind::Operator(Operator::Div)),
            b'^' => single(&mut pos, TokenKind::Operator(Operator::Pow)),
            b'(' => single(&mut pos, TokenKind::LeftParen),
            b')' => single(&mut pos, TokenKind::RightParen),
            b',' => single(&mut pos, TokenKind::Comma),
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    pos += 2;
                    TokenKind::Operator(Operator::Pow)
                } else {
                    pos += 1;
                    TokenKind::Operator(Operator::Mul)
                }
            }
            b'0'..=b'9' | b'.' => lex_number(input, &mut pos)?,
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                    pos += 1;
                }
                TokenKind::Identifier(&input[start..pos])
            }
            _ => {
                let ch = input[pos..].chars().next().unwrap_or('?');
                return Err(SymError::parse_at(
                    format!("invalid character '{ch}'"),
                    Span::new(pos, pos + ch.len_utf8()),
                ));
            }
        };

        tokens.push(Token::new(kind, Span::new(start, pos), spaced));
        spaced = false;
    }

    Ok(tokens)
}

fn single<'src>(pos: &mut usize, kind: TokenKind<'src>) -> TokenKind<'src> {
    *pos += 1;
    kind
}

fn skip_digits(bytes: &[u8], pos: &mut usize) -> usize {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    *pos - start
}

fn lex_number<'src>(input: &'src str, pos: &mut usize) -> Result<TokenKind<'src>> {
    let bytes = input.as_bytes();
    let start = *pos;
    let mut decimal = false;

    let int_digits = skip_digits(bytes, pos);
    let mut frac_digits = 0;
    if bytes.get(*pos) == Some(&b'.') {
        decimal = true;
        *pos += 1;
        frac_digits = skip_digits(bytes, pos);
    }
    if int_digits == 0 && frac_digits == 0 {
        return Err(SymError::parse_at("expected digits", Span::new(start, *pos)));
    }

    // Exponent only when a digit follows `e`, `e+` or `e-`; `2e` is `2*e`
    if matches!(bytes.get(*pos), Some(b'e' | b'E')) {
        let mut look = *pos + 1;
        if matches!(bytes.get(look), Some(b'+' | b'-')) {
            look += 1;
        }
        if bytes.get(look).is_some_and(u8::is_ascii_digit) {
            *pos = look;
            skip_digits(bytes, pos);
            decimal = true;
        }
    }

    if bytes.get(*pos) == Some(&b'.') {
        return Err(SymError::parse_at("malformed number", Span::new(start, *pos + 1)));
    }

    let text = &input[start..*pos];
    Ok(if decimal {
        TokenKind::Decimal(text)
    } else {
        TokenKind::Integer(text)
    })
}
