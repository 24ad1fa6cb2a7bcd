//! Go Backend - Generate Go source from the nn-lang AST

mod go_codegen;

pub use go_codegen::{GoCodeGen, DEFAULT_INDENT};
