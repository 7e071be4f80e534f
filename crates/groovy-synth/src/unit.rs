//! Ephemeral parse units and the grammar they are parsed with.

use groovy_syntax::ast::SourceFile;
use groovy_syntax::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, SyntaxNode};

use crate::error::ParseFailure;

/// Synthetic file name of an ephemeral unit, e.g. `DUMMY__3.groovy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitName(String);

impl UnitName {
    pub fn new(prefix: &str, serial: u64) -> Self {
        Self(format!("{prefix}{serial}.groovy"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parser collaborator.
///
/// Implementations must not keep state between calls: every unit is parsed
/// from scratch.
pub trait Grammar {
    fn parse(
        &self,
        text: &str,
        unit: &UnitName,
        physical: bool,
    ) -> Result<SourceFile, ParseFailure>;
}

/// [`Grammar`] backed by the `groovy-syntax` parser.
///
/// Any error diagnostic rejects the unit; a tree with recovered errors is
/// never handed to the locator.
#[derive(Debug, Clone, Copy)]
pub struct GroovyGrammar {
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl Default for GroovyGrammar {
    fn default() -> Self {
        Self {
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }
}

impl GroovyGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }
}

impl Grammar for GroovyGrammar {
    fn parse(
        &self,
        text: &str,
        unit: &UnitName,
        _physical: bool,
    ) -> Result<SourceFile, ParseFailure> {
        let parsed = groovy_syntax::Parser::new(text, groovy_syntax::lexer::lex(text))
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel)
            .parse()?;

        if parsed.diagnostics.has_errors() {
            log::debug!(
                "{unit}: {} syntax error(s)\n{}",
                parsed.diagnostics.len(),
                parsed.diagnostics.printer(text).path(unit.as_str()).render()
            );
            return Err(ParseFailure::Syntax(parsed.diagnostics));
        }
        Ok(parsed.root)
    }
}

/// A parsed, non-persisted compilation unit.
///
/// Lives for one request. The context node is only carried along for later
/// name resolution on the extracted node; it is never modified.
#[derive(Debug, Clone)]
pub struct EphemeralUnit {
    pub name: UnitName,
    pub text: String,
    pub root: SourceFile,
    pub physical: bool,
    pub context: Option<SyntaxNode>,
}
