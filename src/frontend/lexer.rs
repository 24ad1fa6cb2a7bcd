//! Lexer for nn-lang
//!
//! Converts source code into a stream of tokens, one per call to
//! [`Lexer::next_token`]. The lexer never fails: anything it cannot
//! classify becomes an [`TokenKind::Illegal`] token so scanning always
//! reaches end of file.

use log::trace;

use crate::frontend::token::{is_keyword, is_operator, Token, TokenKind, MAX_OPERATOR_LEN};
use crate::utils::Span;

/// The lexer state
pub struct Lexer {
    /// Source code as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// Current line, 1-based
    line: usize,
    /// Emit whitespace runs as tokens instead of skipping them
    keep_whitespace: bool,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
            line: 1,
            keep_whitespace: false,
        }
    }

    /// Return whitespace runs as [`TokenKind::Whitespace`] tokens
    pub fn with_whitespace(mut self, keep: bool) -> Self {
        self.keep_whitespace = keep;
        self
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Advance to the next character, counting newlines
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
            }
        }
        c
    }

    /// Text from start to current position
    fn lexeme(&self) -> String {
        self.source[self.start..self.pos].iter().collect()
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Create a token whose text is the whole lexeme
    fn make_token(&self, kind: TokenKind, line: usize) -> Token {
        Token::new(kind, self.lexeme(), line, self.make_span())
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Read a string literal. The body is kept verbatim, escapes included.
    fn read_string(&mut self, line: usize) -> Token {
        self.advance(); // consume opening quote
        let body_start = self.pos;

        let body_end = loop {
            match self.peek() {
                // Unterminated string runs to end of input
                None => break self.pos,
                Some('"') => {
                    let end = self.pos;
                    self.advance(); // consume closing quote
                    break end;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        };

        let text: String = self.source[body_start..body_end].iter().collect();
        Token::new(TokenKind::StringLit, text, line, self.make_span())
    }

    /// Longest match against the operator table
    fn read_operator(&mut self, line: usize) -> Option<Token> {
        let available = self.source.len() - self.pos;
        for len in (1..=MAX_OPERATOR_LEN.min(available)).rev() {
            let candidate: String = self.source[self.pos..self.pos + len].iter().collect();
            if is_operator(&candidate) {
                for _ in 0..len {
                    self.advance();
                }
                return Some(Token::new(TokenKind::Operator, candidate, line, self.make_span()));
            }
        }
        None
    }

    /// Read a number literal (integer or float)
    fn read_number(&mut self, line: usize) -> Token {
        self.consume_digits();

        if self.peek() == Some('.') {
            self.advance(); // consume '.', trailing digits are optional
            self.consume_digits();
            return self.make_token(TokenKind::FloatLit, line);
        }

        self.make_token(TokenKind::IntLit, line)
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self, line: usize) -> Token {
        while let Some(c) = self.peek() {
            if c.is_alphabetic() || c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_keyword(&self.lexeme()) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.make_token(kind, line)
    }

    /// Get the next token
    ///
    /// Once the input is exhausted every further call returns another
    /// end-of-file token.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        trace!("{}", token);
        token
    }

    fn scan_token(&mut self) -> Token {
        if self.keep_whitespace {
            self.start = self.pos;
            let line = self.line;
            if self.peek().map_or(false, char::is_whitespace) {
                self.skip_whitespace();
                return self.make_token(TokenKind::Whitespace, line);
            }
        } else {
            self.skip_whitespace();
        }

        self.start = self.pos;
        let line = self.line;

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::eof(line, self.make_span()),
        };

        if let Some(kind) = TokenKind::punctuation(c) {
            self.advance();
            return self.make_token(kind, line);
        }

        if c == '"' {
            return self.read_string(line);
        }

        if let Some(token) = self.read_operator(line) {
            return token;
        }

        if c.is_ascii_digit() {
            return self.read_number(line);
        }

        if c.is_alphabetic() {
            return self.read_identifier(line);
        }

        self.advance();
        self.make_token(TokenKind::Illegal, line)
    }

    /// Tokenize the entire source, including the final end-of-file token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Yields tokens up to, but not including, end of file
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn single(source: &str) -> Token {
        let tokens = Lexer::new(source).tokenize();
        assert_eq!(tokens.len(), 2, "expected one token plus EOF for {:?}", source);
        tokens[0].clone()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("func main() { }");
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "func");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "main");
        assert_eq!(tokens[2].kind, TokenKind::LParen);
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
        assert_eq!(tokens[5].kind, TokenKind::RBrace);
        assert_eq!(tokens[6].kind, TokenKind::Eof);
        assert_eq!(tokens[6].text, "");
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        let token = lexer.next_token();
        assert!(token.is_eof());
        assert_eq!(token.line, 1);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn test_longest_match() {
        let token = single("<<=");
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::Operator, "<<="));

        let token = single("<<");
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::Operator, "<<"));

        let token = single("<");
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::Operator, "<"));

        assert_eq!(single("&^=").text, "&^=");
        assert_eq!(single("...").text, "...");
        assert_eq!(single(">>=").text, ">>=");
    }

    #[test]
    fn test_adjacent_operators() {
        assert_eq!(
            kinds_and_texts("i++<=j"),
            vec![
                (TokenKind::Ident, "i".to_string()),
                (TokenKind::Operator, "++".to_string()),
                (TokenKind::Operator, "<=".to_string()),
                (TokenKind::Ident, "j".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(single("for").kind, TokenKind::Keyword);
        assert_eq!(single("forall").kind, TokenKind::Ident);
        assert_eq!(single("i32").kind, TokenKind::Keyword);
        assert_eq!(single("a1b2").kind, TokenKind::Ident);
        assert_eq!(single("break").kind, TokenKind::Keyword);
    }

    #[test]
    fn test_numbers() {
        let token = single("42");
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::IntLit, "42"));

        let token = single("3.14");
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::FloatLit, "3.14"));

        let token = single("3.");
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::FloatLit, "3."));
    }

    #[test]
    fn test_leading_dot_is_operator() {
        assert_eq!(
            kinds_and_texts(".5"),
            vec![
                (TokenKind::Operator, ".".to_string()),
                (TokenKind::IntLit, "5".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_strings() {
        let token = single(r#""hello world""#);
        assert_eq!(token.kind, TokenKind::StringLit);
        assert_eq!(token.text, "hello world");
        assert_eq!(token.span, Span::new(0, 13));

        let token = single(r#""say \"hi\"""#);
        assert_eq!(token.text, r#"say \"hi\""#);
    }

    #[test]
    fn test_unterminated_string() {
        let token = single("\"abc");
        assert_eq!(token.kind, TokenKind::StringLit);
        assert_eq!(token.text, "abc");
    }

    #[test]
    fn test_illegal_characters() {
        assert_eq!(
            kinds_and_texts("a # b"),
            vec![
                (TokenKind::Ident, "a".to_string()),
                (TokenKind::Illegal, "#".to_string()),
                (TokenKind::Ident, "b".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
        assert_eq!(single("_").kind, TokenKind::Illegal);
    }

    #[test]
    fn test_line_tracking() {
        let tokens = Lexer::new("a\nb\nc").tokenize();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].text, "c");
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_line_after_multiline_string() {
        let tokens = Lexer::new("\"one\ntwo\" x").tokenize();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_whitespace_tokens() {
        let tokens = Lexer::new("pkg  main;\n").with_whitespace(true).tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Delimiter,
                TokenKind::Whitespace,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].text, "  ");
        assert_eq!(tokens[5].line, 2);
    }

    #[test]
    fn test_totality_spans_cover_input() {
        let inputs = [
            "",
            "pkg main;",
            "var: i32 a = 100;\nvar: bool b = a >= 10;",
            "for i = 0; i < 200; i++ { if true { break; } }",
            "\"unterminated",
            "@@ ~ $ 3. 4.5.6 <<=<<<",
            "ünïcödé 名前 λ",
        ];

        for input in inputs {
            let tokens = Lexer::new(input).with_whitespace(true).tokenize();
            let mut expected_start = 0;
            for token in &tokens {
                assert_eq!(token.span.start, expected_start, "gap before {} in {:?}", token, input);
                if !token.is_eof() {
                    assert!(!token.span.is_empty(), "no progress at {} in {:?}", token, input);
                }
                expected_start = token.span.end;
            }
            assert_eq!(expected_start, input.chars().count());
            assert!(tokens.last().map_or(false, Token::is_eof));
        }
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        let texts: Vec<String> = Lexer::new("pkg main;").map(|t| t.text).collect();
        assert_eq!(texts, vec!["pkg", "main", ";"]);
    }

    #[test]
    fn test_token_dump_format() {
        let lines: Vec<String> = Lexer::new("pkg main;")
            .tokenize()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "Token< Type: KEYWORD Line: 1 Value: pkg >",
                "Token< Type: IDENTIFIER Line: 1 Value: main >",
                "Token< Type: DELIMITER Line: 1 Value: ; >",
                "Token< Type: EOF Line: 1 Value:  >",
            ]
        );
    }
}
