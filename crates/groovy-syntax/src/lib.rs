//! Groovy syntax: lexer, lossless CST, resilient parser and typed AST for a Groovy subset.
//!
//! # Example
//!
//! ```
//! use groovy_syntax::ast::Statement;
//!
//! let parsed = groovy_syntax::parse("def x = foo(1)").expect("out of fuel");
//! assert!(parsed.diagnostics.is_empty());
//! let first = parsed.root.statements().next();
//! assert!(first.is_some());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod cst;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod printer;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod test_utils;

pub use cst::{GroovyLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenSet};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter};
pub use lexer::{is_keyword, single_token};
pub use parser::{ParseResult, Parser};
pub use printer::CstPrinter;

/// Default operation budget for one parse.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;

/// Default nesting budget for one parse.
pub const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// Fatal parse errors. Syntax problems are diagnostics, not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `source` with the default fuel limits.
pub fn parse(source: &str) -> Result<ParseResult> {
    Parser::new(source, lexer::lex(source))
        .with_exec_fuel(Some(DEFAULT_EXEC_FUEL))
        .with_recursion_fuel(Some(DEFAULT_RECURSION_FUEL))
        .parse()
}
