//! Abstract Syntax Tree definitions for nn-lang
//!
//! Every node is owned by its parent; the tree is built once (by the
//! parser or by hand) and only read afterwards.

/// A complete source file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// An identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// pkg name
    Package(Ident),
    /// Bare keyword such as `break`
    Keyword(String),
    /// { stmts }
    Block(Block),
    /// var name = literal
    Declaration {
        ident: Ident,
        /// Initializer, kept as literal source text
        value: String,
    },
    /// if cond { ... }
    If {
        condition: Expr,
        block: Block,
    },
    /// for init; cond; update { ... }
    For {
        init: Box<Stmt>,
        condition: Expr,
        update: Expr,
        block: Block,
    },
}

impl Stmt {
    pub fn package(name: impl Into<String>) -> Self {
        Stmt::Package(Ident::new(name))
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        Stmt::Keyword(text.into())
    }

    pub fn declaration(name: impl Into<String>, value: impl Into<String>) -> Self {
        Stmt::Declaration {
            ident: Ident::new(name),
            value: value.into(),
        }
    }

    pub fn if_stmt(condition: Expr, block: Block) -> Self {
        Stmt::If { condition, block }
    }

    pub fn for_stmt(init: Stmt, condition: Expr, update: Expr, block: Block) -> Self {
        Stmt::For {
            init: Box::new(init),
            condition,
            update,
            block,
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal or name, kept as source text
    Literal(String),
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn unary(op: impl Into<String>, operand: Expr) -> Self {
        Expr::Unary {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: impl Into<String>, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }
}

/// Unary operators written before their operand; everything else
/// (`++`, `--`) is written after it.
pub fn is_prefix_operator(op: &str) -> bool {
    matches!(op, "!" | "-")
}

/// Borrowed view of any renderable node
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Block(&'a Block),
    Expr(&'a Expr),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Node::Stmt(stmt)
    }
}

impl<'a> From<&'a Block> for Node<'a> {
    fn from(block: &'a Block) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expr(expr)
    }
}
