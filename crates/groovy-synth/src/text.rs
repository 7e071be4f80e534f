//! Canonical text rules.
//!
//! Pure functions that turn semantic values (modifier lists, identifier
//! lists, types, initializers, string contents) into the source text the
//! scaffolds are built from.

use groovy_syntax::ast::{ApplicationStatement, Expr};
use groovy_syntax::is_keyword;

use crate::error::{Result, SynthError};
use crate::request::Initializer;

/// Keyword that makes the parser take the declaration production.
pub const DEF_MARKER: &str = "def";

/// Modifiers separated by single spaces. No modifiers yield an empty string.
pub fn join_modifiers(modifiers: &[&str]) -> String {
    modifiers.join(" ")
}

/// `a, b, c`. At least one non-blank identifier is required.
pub fn join_identifiers(names: &[&str]) -> Result<String> {
    if names.is_empty() {
        return Err(SynthError::EmptyInput {
            what: "identifier list",
        });
    }
    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(SynthError::EmptyInput { what: "identifier" });
    }
    Ok(names.join(", "))
}

/// A type as known to the caller: canonical qualified text when available,
/// presentable text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    canonical: Option<String>,
    presentable: String,
}

const BOXED_PRIMITIVES: &[(&str, &str)] = &[
    ("java.lang.Boolean", "boolean"),
    ("java.lang.Byte", "byte"),
    ("java.lang.Character", "char"),
    ("java.lang.Short", "short"),
    ("java.lang.Integer", "int"),
    ("java.lang.Long", "long"),
    ("java.lang.Float", "float"),
    ("java.lang.Double", "double"),
];

impl TypeDescriptor {
    /// A type with known canonical text, e.g. `java.util.List<java.lang.String>`.
    pub fn canonical(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            presentable: text.clone(),
            canonical: Some(text),
        }
    }

    /// A type that only has presentable text, e.g. `List<String>`.
    pub fn presentable(text: impl Into<String>) -> Self {
        Self {
            canonical: None,
            presentable: text.into(),
        }
    }

    pub fn with_presentable(mut self, text: impl Into<String>) -> Self {
        self.presentable = text.into();
        self
    }

    /// Canonical text, falling back to presentable text.
    pub fn text(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.presentable)
    }

    /// Rightmost dot-separated segment, ignoring type arguments and array brackets.
    pub fn simple_name(&self) -> &str {
        simple_name(self.text())
    }

    /// Whether the simple name is spelled like a primitive (lowercase first letter).
    pub fn is_primitive_like(&self) -> bool {
        starts_lowercase(self.simple_name())
    }

    pub fn needs_def_marker(&self) -> bool {
        needs_def_marker(self.text())
    }

    /// Wrapper classes of `java.lang` become their primitive spelling.
    pub fn unboxed(&self) -> TypeDescriptor {
        let text = self.text();
        match BOXED_PRIMITIVES.iter().find(|(boxed, _)| *boxed == text) {
            Some((_, primitive)) => TypeDescriptor::canonical(*primitive),
            None => self.clone(),
        }
    }
}

fn simple_name(type_text: &str) -> &str {
    let base = type_text
        .split(['<', '['])
        .next()
        .unwrap_or(type_text)
        .trim();
    base.rsplit('.').next().unwrap_or(base)
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

/// Whether a declaration of this type needs a leading `def`.
///
/// Heuristic: a lowercase simple name that is not a keyword is taken for a
/// class the parser would not recognize as a type on its own. Primitive
/// keywords are types already; capitalized names are types by convention.
pub fn needs_def_marker(type_text: &str) -> bool {
    let simple = simple_name(type_text);
    starts_lowercase(simple) && !is_keyword(simple)
}

/// Quotes `content` as a single-quoted literal. Every escape written here is
/// one `unescape_string_literal` reads back.
pub fn escape_string_literal(content: &str) -> String {
    let mut result = String::with_capacity(content.len() + 2);
    result.push('\'');
    for c in content.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{8}' => result.push_str("\\b"),
            '\u{c}' => result.push_str("\\f"),
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            c => result.push(c),
        }
    }
    result.push('\'');
    result
}

/// Strips redundant parentheses: `((a))` → `a`.
pub fn unparenthesized(expr: Expr) -> Expr {
    let mut current = expr;
    while let Expr::Parenthesized(paren) = &current {
        let Some(inner) = paren.inner() else {
            break;
        };
        current = inner;
    }
    current
}

/// Call syntax for a command call: `foo a, (b)` → `foo(a, b)`.
pub fn application_call_text(app: &ApplicationStatement) -> Option<String> {
    let callee = app.callee()?;
    let arguments: Vec<String> = app
        .arguments()
        .into_iter()
        .map(|arg| unparenthesized(arg).text())
        .collect();
    Some(format!("{}({})", callee.text(), arguments.join(", ")))
}

/// Text embedded after `=` in a declaration.
pub fn initializer_text(initializer: &Initializer) -> String {
    match initializer {
        Initializer::Expr(expr) => expr.text(),
        Initializer::Application(app) => {
            application_call_text(app).unwrap_or_else(|| app.text())
        }
    }
}

/// `a, b` from expression texts.
pub fn join_expressions(expressions: &[Expr]) -> String {
    expressions
        .iter()
        .map(Expr::text)
        .collect::<Vec<_>>()
        .join(", ")
}
