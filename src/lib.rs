//! nn-lang
//!
//! Front half of a `.nn` to Go translator:
//! - `frontend::lexer` turns source text into tokens, one per call.
//! - `frontend::parser` builds the AST from the token stream.
//! - `backend::go` renders AST nodes back out as Go source.

use std::path::Path;

pub mod backend;
pub mod frontend;
pub mod utils;

pub use backend::{CodeGen, GoCodeGen};
pub use frontend::lexer::Lexer;
pub use frontend::parser::{parse, Parser};
pub use frontend::token::{Token, TokenKind};
pub use utils::{Error, Result, Span};

/// Read a whole source file into memory
pub fn read_source(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Translate `.nn` source to Go with the default generator
pub fn transpile(source: &str) -> Result<String> {
    let program = parse(source)?;
    Ok(GoCodeGen::new().generate(&program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transpile_sample() {
        let source = "\
pkg main;

var: i32 limit = 200;
for var i = 0; i < limit; i++ {
    if i % 7 == 0 && !skip {
        continue;
    }
    if i >= 100 {
        break;
    }
}
";
        let expected = "\
package main
limit := 200
for i := 0; i < limit; i++ {
\tif i % 7 == 0 && !skip {
\t\tcontinue
\t}
\tif i >= 100 {
\t\tbreak
\t}
}
";
        assert_eq!(transpile(source).unwrap(), expected);
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("does/not/exist.nn")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_transpile_reports_line() {
        let err = transpile("pkg main;\n\nvar x = ;").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_transpile_rejects_deep_nesting() {
        let err = transpile(&format!("if {}x {{ }}", "!".repeat(10_000))).unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { line: 1, .. }), "{:?}", err);
    }
}
