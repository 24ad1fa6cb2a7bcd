//! Token definitions for nn-lang

use std::fmt;

use serde::Serialize;

use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact lexeme (string literals exclude their quotes)
    pub text: String,
    /// 1-based line at the start of the token
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            span,
        }
    }

    pub fn eof(line: usize, span: Span) -> Self {
        Self::new(TokenKind::Eof, "", line, span)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token< Type: {} Line: {} Value: {} >",
            self.kind, self.line, self.text
        )
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// End of file
    Eof,
    /// Run of whitespace (only when the lexer keeps whitespace)
    Whitespace,
    FloatLit,
    IntLit,
    /// String literal, quotes stripped
    StringLit,
    Keyword,
    Ident,
    Operator,
    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// ;
    Delimiter,
    /// Unknown/invalid character
    Illegal,
}

impl TokenKind {
    /// Human-readable name used in token dumps
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Whitespace => "WHITE SPACE",
            TokenKind::FloatLit => "FLOAT LITERAL",
            TokenKind::IntLit => "INTEGER LITERAL",
            TokenKind::StringLit => "STRING LITERAL",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::LParen => "OPEN PARENTHESIS",
            TokenKind::RParen => "CLOSE PARENTHESIS",
            TokenKind::LBrace => "OPEN BLOCK",
            TokenKind::RBrace => "CLOSE BLOCK",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Illegal => "ILLEGAL",
        }
    }

    /// Single-character punctuation that is matched before anything else
    pub fn punctuation(c: char) -> Option<TokenKind> {
        match c {
            ';' => Some(TokenKind::Delimiter),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved words. Membership is exact-match.
pub const KEYWORDS: &[&str] = &[
    "pkg", "pub", "type", "struct", "interface", "var", "func", "goto", "import",
    // control flow
    "if", "else", "elif", "for", "break", "continue", "return",
    // signed integers
    "int", "i8", "i16", "i32", "i64",
    // unsigned integers
    "uint", "u8", "u16", "u32", "u64",
    "byte", "rune",
    "f32", "f64",
    "str", "bool",
];

/// Operator lexemes. Several are prefixes of others, so the lexer must
/// take the longest match.
pub const OPERATORS: &[&str] = &[
    // arithmetic
    "+", "-", "*", "/", "%", "++", "--",
    // comparison
    "==", "!=", ">=", "<=", ">", "<",
    // logical
    "&&", "||", "!",
    // bitwise
    "&", "|", "^", "&^", "<<", ">>",
    // assignment
    "=", "+=", "-=", "*=", "/=", "%=", "|=", "&=", "^=", "<<=", ">>=", "&^=",
    // specials
    "::", "...", ".", ":",
];

/// Longest operator lexeme, bounds the lexer's lookahead
pub const MAX_OPERATOR_LEN: usize = 3;

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

pub fn is_operator(s: &str) -> bool {
    OPERATORS.contains(&s)
}

/// Binding power of a binary operator, Go's five levels.
/// Returns None if not a binary operator
pub fn binary_precedence(op: &str) -> Option<u8> {
    match op {
        "||" => Some(1),
        "&&" => Some(2),
        "==" | "!=" | "<" | "<=" | ">" | ">=" => Some(3),
        "+" | "-" | "|" | "^" => Some(4),
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => Some(5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let token = Token::new(TokenKind::Keyword, "pkg", 1, Span::new(0, 3));
        assert_eq!(token.to_string(), "Token< Type: KEYWORD Line: 1 Value: pkg >");

        let eof = Token::eof(7, Span::new(40, 40));
        assert_eq!(eof.to_string(), "Token< Type: EOF Line: 7 Value:  >");
    }

    #[test]
    fn test_json_shape() {
        let token = Token::new(TokenKind::IntLit, "42", 3, Span::new(10, 12));
        assert_eq!(
            serde_json::to_string(&token).unwrap(),
            r#"{"kind":"IntLit","text":"42","line":3,"span":{"start":10,"end":12}}"#
        );
    }

    #[test]
    fn test_keyword_membership_is_exact() {
        assert!(is_keyword("for"));
        assert!(!is_keyword("forall"));
        assert!(!is_keyword("fo"));
    }

    #[test]
    fn test_operator_table_fits_lookahead() {
        assert!(OPERATORS.iter().all(|op| op.chars().count() <= MAX_OPERATOR_LEN));
        assert!(is_operator("<<="));
        assert!(!is_operator("=>>"));
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(binary_precedence("*") > binary_precedence("+"));
        assert!(binary_precedence("+") > binary_precedence("<"));
        assert!(binary_precedence("<") > binary_precedence("&&"));
        assert!(binary_precedence("&&") > binary_precedence("||"));
        assert_eq!(binary_precedence("++"), None);
        assert_eq!(binary_precedence("="), None);
    }
}
