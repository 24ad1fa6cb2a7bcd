//! Code Generation trait - Backend abstraction
//!
//! Lets the driver stay agnostic of the target language.

use crate::frontend::ast::Program;

/// Code generation backend trait
pub trait CodeGen {
    /// Generate target source text for a whole program
    fn generate(&self, program: &Program) -> String;

    /// Get the backend name
    fn name(&self) -> &str;

    /// Extension for generated files, without the dot
    fn file_extension(&self) -> &str;
}
