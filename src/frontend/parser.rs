//! Parser for nn-lang
//!
//! Recursive descent for statements, precedence climbing for expressions.
//! Stops at the first syntax error.

use log::debug;

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{binary_precedence, Token, TokenKind};
use crate::utils::{Error, Result};

/// Deepest allowed nesting of blocks and prefix operators
pub const MAX_NESTING: usize = 256;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Open blocks plus pending prefix operators
    depth: usize,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer) -> Self {
        Self::from_tokens(lexer.tokenize())
    }

    /// Create a parser from pre-tokenized input. Whitespace tokens are dropped.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        tokens.retain(|t| t.kind != TokenKind::Whitespace);
        if !tokens.last().map_or(false, Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            let span = tokens.last().map(|t| t.span).unwrap_or_default();
            tokens.push(Token::eof(line, span));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        // from_tokens guarantees a trailing EOF, so the index is clamped to it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn check_text(&self, kind: TokenKind, text: &str) -> bool {
        self.check(kind) && self.current().text == text
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(expected))
        }
    }

    fn expect_text(&mut self, kind: TokenKind, text: &str) -> Result<Token> {
        if self.check_text(kind, text) {
            Ok(self.advance())
        } else {
            Err(self.error_here(&format!("'{}'", text)))
        }
    }

    fn expect_semicolon(&mut self) -> Result<Token> {
        self.expect_text(TokenKind::Delimiter, ";")
    }

    /// Reserve one nesting level for the construct opened on `line`.
    /// The caller releases it with `depth -= 1`.
    fn enter_nested(&mut self, line: usize) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING,
                line,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Build the error for an unexpected current token
    fn error_here(&self, expected: &str) -> Error {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => Error::UnexpectedEof {
                expected: expected.to_string(),
                line: token.line,
            },
            TokenKind::Illegal => Error::IllegalCharacter {
                ch: token.text.clone(),
                line: token.line,
            },
            _ => Error::UnexpectedToken {
                expected: expected.to_string(),
                got: describe(token),
                line: token.line,
            },
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            if self.check(TokenKind::Delimiter) {
                self.advance(); // empty statement
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }

        debug!("parsed {} top-level statements", stmts.len());
        Ok(Program { stmts })
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        let token = self.current().clone();
        match (token.kind, token.text.as_str()) {
            (TokenKind::Keyword, "pkg") => self.parse_package(),
            (TokenKind::Keyword, "var") | (TokenKind::Ident, _) => {
                let decl = self.parse_declaration()?;
                self.expect_semicolon()?;
                Ok(decl)
            }
            (TokenKind::Keyword, "if") => self.parse_if(),
            (TokenKind::Keyword, "for") => self.parse_for(),
            (TokenKind::Keyword, "break" | "continue" | "return") => {
                let keyword = self.advance();
                self.expect_semicolon()?;
                Ok(Stmt::Keyword(keyword.text))
            }
            (TokenKind::LBrace, _) => Ok(Stmt::Block(self.parse_block()?)),
            _ => Err(self.error_here("statement")),
        }
    }

    /// pkg name;
    fn parse_package(&mut self) -> Result<Stmt> {
        self.expect_text(TokenKind::Keyword, "pkg")?;
        let name = self.expect(TokenKind::Ident, "package name")?;
        self.expect_semicolon()?;
        Ok(Stmt::Package(Ident::new(name.text)))
    }

    /// [var [: type]] name = literal
    fn parse_declaration(&mut self) -> Result<Stmt> {
        if self.check_text(TokenKind::Keyword, "var") {
            self.advance();
            if self.check_text(TokenKind::Operator, ":") {
                self.advance();
                let ty = self.parse_type()?;
                debug!("line {}: type annotation '{}' left to inference", ty.line, ty.text);
            }
        }

        let name = self.expect(TokenKind::Ident, "identifier")?;
        self.expect_text(TokenKind::Operator, "=")?;
        let value = self.parse_literal()?;

        Ok(Stmt::Declaration {
            ident: Ident::new(name.text),
            value,
        })
    }

    fn parse_type(&mut self) -> Result<Token> {
        match self.current().kind {
            TokenKind::Keyword | TokenKind::Ident => Ok(self.advance()),
            _ => Err(self.error_here("type")),
        }
    }

    /// Initializer literal: number, string, name, or negated number
    fn parse_literal(&mut self) -> Result<String> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::IntLit | TokenKind::FloatLit | TokenKind::Ident => {
                self.advance();
                Ok(token.text)
            }
            TokenKind::StringLit => {
                self.advance();
                Ok(quote(&token.text))
            }
            TokenKind::Operator if token.text == "-" => {
                self.advance();
                let number = self.current().clone();
                match number.kind {
                    TokenKind::IntLit | TokenKind::FloatLit => {
                        self.advance();
                        Ok(format!("-{}", number.text))
                    }
                    _ => Err(self.error_here("number")),
                }
            }
            _ => Err(self.error_here("literal")),
        }
    }

    /// if cond { ... }
    fn parse_if(&mut self) -> Result<Stmt> {
        self.expect_text(TokenKind::Keyword, "if")?;
        let condition = self.parse_expr()?;
        let block = self.parse_block()?;
        Ok(Stmt::If { condition, block })
    }

    /// for init; cond; update { ... }
    fn parse_for(&mut self) -> Result<Stmt> {
        self.expect_text(TokenKind::Keyword, "for")?;
        let init = self.parse_declaration()?;
        self.expect_semicolon()?;
        let condition = self.parse_expr()?;
        self.expect_semicolon()?;
        let update = self.parse_expr()?;
        let block = self.parse_block()?;

        Ok(Stmt::For {
            init: Box::new(init),
            condition,
            update,
            block,
        })
    }

    /// Parse a block
    fn parse_block(&mut self) -> Result<Block> {
        let open = self.expect(TokenKind::LBrace, "'{'")?;
        self.enter_nested(open.line)?;
        let stmts = self.parse_block_body();
        self.depth -= 1;
        Ok(Block { stmts: stmts? })
    }

    /// Statements up to and including the closing '}'
    fn parse_block_body(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(self.error_here("'}'"));
            }
            if self.check(TokenKind::Delimiter) {
                self.advance();
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }
        self.advance(); // consume '}'

        Ok(stmts)
    }

    // ==================== Expressions ====================

    /// Parse an expression
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let prec = match binary_precedence(&self.current().text) {
                Some(prec) if self.check(TokenKind::Operator) && prec >= min_prec => prec,
                _ => break,
            };
            let op = self.advance().text;
            let right = self.parse_binary(prec + 1)?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.check(TokenKind::Operator) && is_prefix_operator(&self.current().text) {
            let Token { text: op, line, .. } = self.advance();
            // "- -x" would print as the decrement token "--x"
            if op == "-" && self.check_text(TokenKind::Operator, "-") {
                return Err(self.error_here("operand"));
            }
            self.enter_nested(line)?;
            let operand = self.parse_unary();
            self.depth -= 1;
            return Ok(Expr::unary(op, operand?));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        while self.check_text(TokenKind::Operator, "++") || self.check_text(TokenKind::Operator, "--") {
            let op = self.advance().text;
            expr = Expr::unary(op, expr);
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::IntLit | TokenKind::FloatLit | TokenKind::Ident => {
                self.advance();
                Ok(Expr::Literal(token.text))
            }
            TokenKind::StringLit => {
                self.advance();
                Ok(Expr::Literal(quote(&token.text)))
            }
            TokenKind::Eof | TokenKind::Illegal => Err(self.error_here("expression")),
            _ => Err(Error::ExpectedExpr {
                got: describe(&token),
                line: token.line,
            }),
        }
    }
}

/// Parse a whole source file
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(Lexer::new(source)).parse_program()
}

/// String literal bodies are stored unquoted by the lexer
fn quote(body: &str) -> String {
    format!("\"{}\"", body)
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of file".to_string(),
        TokenKind::StringLit => format!("{} {}", token.kind, quote(&token.text)),
        _ => format!("{} '{}'", token.kind, token.text),
    }
}
