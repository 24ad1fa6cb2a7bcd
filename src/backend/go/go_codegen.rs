//! Go Code Generator
//!
//! Renders AST nodes to Go source text. Rendering is a pure function of
//! the node and the indentation depth; the depth is passed down by value
//! so a block can never leave it skewed for its siblings.

use log::debug;

use crate::backend::codegen::CodeGen;
use crate::frontend::ast::*;

/// One tab per nesting level, as gofmt does
pub const DEFAULT_INDENT: &str = "\t";

/// Go code generator
#[derive(Debug, Clone)]
pub struct GoCodeGen {
    indent_unit: String,
}

impl GoCodeGen {
    pub fn new() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT.to_string(),
        }
    }

    /// Use `unit` for each indentation level instead of a tab
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Render any node at depth zero
    pub fn render<'a>(&self, node: impl Into<Node<'a>>) -> String {
        match node.into() {
            Node::Program(program) => self.render_program(program),
            Node::Stmt(stmt) => self.render_stmt(stmt, 0),
            Node::Block(block) => self.render_block(block, 0),
            Node::Expr(expr) => self.render_expr(expr),
        }
    }

    fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }

    /// Render `stmt` one level deeper than `depth`, prefixed with that
    /// level's indentation
    fn with_indent(&self, stmt: &Stmt, depth: usize) -> String {
        let inner = depth + 1;
        format!("{}{}", self.indent(inner), self.render_stmt(stmt, inner))
    }

    fn render_program(&self, program: &Program) -> String {
        debug!("rendering {} top-level statements", program.stmts.len());
        let mut output = String::new();
        for stmt in &program.stmts {
            output.push_str(&self.render_stmt(stmt, 0));
            output.push('\n');
        }
        output
    }

    fn render_stmt(&self, stmt: &Stmt, depth: usize) -> String {
        match stmt {
            Stmt::Package(ident) => format!("package {}", ident.name),
            Stmt::Keyword(text) => text.clone(),
            Stmt::Block(block) => self.render_block(block, depth),
            Stmt::Declaration { ident, value } => format!("{} := {}", ident.name, value),
            Stmt::If { condition, block } => format!(
                "if {} {}",
                self.render_expr(condition),
                self.render_block(block, depth)
            ),
            Stmt::For {
                init,
                condition,
                update,
                block,
            } => format!(
                "for {}; {}; {} {}",
                self.render_stmt(init, depth),
                self.render_expr(condition),
                self.render_expr(update),
                self.render_block(block, depth)
            ),
        }
    }

    fn render_block(&self, block: &Block, depth: usize) -> String {
        let mut output = String::from("{\n");
        for stmt in &block.stmts {
            output.push_str(&self.with_indent(stmt, depth));
            output.push('\n');
        }
        output.push_str(&self.indent(depth));
        output.push('}');
        output
    }

    fn render_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(text) => text.clone(),
            Expr::Unary { op, operand } => {
                let operand = self.render_expr(operand);
                if is_prefix_operator(op) {
                    format!("{}{}", op, operand)
                } else {
                    format!("{}{}", operand, op)
                }
            }
            Expr::Binary { left, op, right } => format!(
                "{} {} {}",
                self.render_expr(left),
                op,
                self.render_expr(right)
            ),
        }
    }
}

impl Default for GoCodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen for GoCodeGen {
    fn generate(&self, program: &Program) -> String {
        self.render(program)
    }

    fn name(&self) -> &str {
        "go"
    }

    fn file_extension(&self) -> &str {
        "go"
    }
}
