//! Tokenizer for the predicate expression language

use std::fmt;

use crate::decode::unit_multiplier;
use crate::error::{EvalError, Result};
use crate::value::Number;

/// A classified lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier (variable name)
    Ident(String),
    /// Numeric literal, unit suffix already applied
    Num(Number),
    /// Double-quoted string literal, quotes stripped
    Str(String),
    /// Reserved word `true` or `false`
    Bool(bool),
    /// Reserved word `in`
    In,
    /// Reserved word `subset`
    Subset,
    /// Reserved word `not` or the symbol `!`
    Not,
    /// Reserved word `and` or the symbol `&&`
    And,
    /// Reserved word `or` or the symbol `||`
    Or,
    /// `,`
    Comma,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Assign,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `;`
    Semi,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Num(n) => write!(f, "{}", n),
            TokenKind::Str(s) => write!(f, "\"{}\"", s),
            TokenKind::Bool(b) => write!(f, "{}", b),
            TokenKind::In => write!(f, "in"),
            TokenKind::Subset => write!(f, "subset"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::And => write!(f, "&&"),
            TokenKind::Or => write!(f, "||"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Eq => write!(f, "=="),
            TokenKind::Ne => write!(f, "!="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Le => write!(f, "<="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Ge => write!(f, ">="),
            TokenKind::Semi => write!(f, ";"),
        }
    }
}

/// A token together with its byte offset in the expression text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is
    pub kind: TokenKind,
    /// Byte offset of the token's first character
    pub pos: usize,
}

/// Map a reserved word to its token, case-insensitively.
fn reserved(word: &str) -> Option<TokenKind> {
    match word.to_ascii_lowercase().as_str() {
        "in" => Some(TokenKind::In),
        "true" => Some(TokenKind::Bool(true)),
        "false" => Some(TokenKind::Bool(false)),
        "not" => Some(TokenKind::Not),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "subset" => Some(TokenKind::Subset),
        _ => None,
    }
}

/// Lazy tokenizer over an expression string.
///
/// Yields tokens until the input is exhausted. An unrecognized
/// character yields one `LexicalError` and exhausts the iterator, so a
/// partially consumed statement sequence keeps the effects of the
/// statements that already ran.
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a tokenizer over an expression string.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            failed: false,
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn fail(&mut self) -> EvalError {
        self.failed = true;
        let ch = self.src[self.pos..].chars().next().unwrap_or('\0');
        EvalError::LexicalError { ch, pos: self.pos }
    }

    /// Lex an identifier or reserved word.
    fn lex_word(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(0), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        let word = &self.src[start..self.pos];
        reserved(word).unwrap_or_else(|| TokenKind::Ident(word.to_string()))
    }

    /// Lex a numeric literal: digits with an optional fraction, an
    /// optional exponent, and an optional binary-unit suffix.
    fn lex_number(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(0), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek(0) == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(0), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(0), Some(b'e') | Some(b'E')) {
            // only an exponent if digits (or a signed digit run) follow
            let mut ahead = 1;
            if matches!(self.peek(ahead), Some(b'+') | Some(b'-')) {
                ahead += 1;
            }
            if matches!(self.peek(ahead), Some(b) if b.is_ascii_digit()) {
                self.pos += ahead;
                while matches!(self.peek(0), Some(b) if b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let base = &self.src[start..self.pos];

        let mut multiplier = 1;
        if let (Some(a), Some(b)) = (self.peek(0), self.peek(1)) {
            let suffix = [a, b];
            if let Some(m) = unit_multiplier(std::str::from_utf8(&suffix).unwrap_or("")) {
                multiplier = m;
                self.pos += 2;
            }
        }

        let n = match base.parse::<i64>() {
            Ok(i) => Number::Int(i),
            // the scanned shape is always a valid float; fall back to 0
            // only for degenerate input like a lone "."
            Err(_) => Number::from_f64(base.parse::<f64>().unwrap_or(0.0)),
        };
        TokenKind::Num(n.scale(multiplier))
    }

    /// Lex a double-quoted string literal. No escape sequences; the
    /// literal ends at the next `"`.
    fn lex_string(&mut self) -> Result<TokenKind> {
        let open = self.pos;
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if b == b'"' {
                let text = self.src[start..self.pos].to_string();
                self.pos += 1;
                return Ok(TokenKind::Str(text));
            }
            self.pos += 1;
        }
        // unterminated literal
        self.pos = open;
        Err(self.fail())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while matches!(self.peek(0), Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            self.pos += 1;
        }
        let b = self.peek(0)?;
        let pos = self.pos;

        let kind = match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_word(),
            b'0'..=b'9' => self.lex_number(),
            b'.' if matches!(self.peek(1), Some(d) if d.is_ascii_digit()) => self.lex_number(),
            b'"' => match self.lex_string() {
                Ok(kind) => kind,
                Err(e) => return Some(Err(e)),
            },
            b'=' if self.peek(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Eq
            }
            b'!' if self.peek(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Ne
            }
            b'<' if self.peek(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Le
            }
            b'>' if self.peek(1) == Some(b'=') => {
                self.pos += 2;
                TokenKind::Ge
            }
            b'&' if self.peek(1) == Some(b'&') => {
                self.pos += 2;
                TokenKind::And
            }
            b'|' if self.peek(1) == Some(b'|') => {
                self.pos += 2;
                TokenKind::Or
            }
            _ => {
                let single = match b {
                    b'=' => Some(TokenKind::Assign),
                    b'!' => Some(TokenKind::Not),
                    b'<' => Some(TokenKind::Lt),
                    b'>' => Some(TokenKind::Gt),
                    b'+' => Some(TokenKind::Plus),
                    b'-' => Some(TokenKind::Minus),
                    b'*' => Some(TokenKind::Star),
                    b'/' => Some(TokenKind::Slash),
                    b',' => Some(TokenKind::Comma),
                    b'[' => Some(TokenKind::LBracket),
                    b']' => Some(TokenKind::RBracket),
                    b'(' => Some(TokenKind::LParen),
                    b')' => Some(TokenKind::RParen),
                    b';' => Some(TokenKind::Semi),
                    _ => None,
                };
                match single {
                    Some(kind) => {
                        self.pos += 1;
                        kind
                    }
                    None => return Some(Err(self.fail())),
                }
            }
        };

        Some(Ok(Token { kind, pos }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).map(|t| t.unwrap().kind).collect()
    }

    #[test]
    fn test_reserved_words_case_insensitive() {
        assert_eq!(
            kinds("NOT x In y SUBSET z"),
            vec![
                TokenKind::Not,
                TokenKind::Ident("x".into()),
                TokenKind::In,
                TokenKind::Ident("y".into()),
                TokenKind::Subset,
                TokenKind::Ident("z".into()),
            ]
        );
    }

    #[test]
    fn test_number_with_suffix() {
        assert_eq!(kinds("4kb"), vec![TokenKind::Num(Number::Int(4096))]);
        assert_eq!(kinds("2.5"), vec![TokenKind::Num(Number::Float(2.5))]);
        assert_eq!(kinds("1e3"), vec![TokenKind::Num(Number::Int(1000))]);
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= && ||"),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::And,
                TokenKind::Or,
            ]
        );
    }

    #[test]
    fn test_string_literal_strips_quotes() {
        assert_eq!(kinds(r#""node1""#), vec![TokenKind::Str("node1".into())]);
    }

    #[test]
    fn test_unrecognized_char_aborts() {
        let mut lexer = Lexer::new("1 @ 2");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert_eq!(
            lexer.next(),
            Some(Err(EvalError::LexicalError { ch: '@', pos: 2 }))
        );
        assert_eq!(lexer.next(), None);
    }
}
