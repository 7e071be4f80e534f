//! Failure taxonomy for synthesis requests.

use groovy_syntax::{Diagnostics, SyntaxKind};

use crate::locate::Step;

/// Who wrote the text that was handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextOrigin {
    /// Free text passed through from the caller.
    Caller,
    /// Scaffold composed by the renderer.
    Rendered,
}

impl std::fmt::Display for TextOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextOrigin::Caller => write!(f, "caller-supplied"),
            TextOrigin::Rendered => write!(f, "rendered"),
        }
    }
}

/// Why the grammar refused a unit.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseFailure {
    #[error("{}", summarize(.0))]
    Syntax(Diagnostics),

    #[error(transparent)]
    Fatal(#[from] groovy_syntax::Error),
}

fn summarize(diagnostics: &Diagnostics) -> String {
    let Some(first) = diagnostics.iter().next() else {
        return "no error reported".to_string();
    };
    match diagnostics.len() {
        1 => first.to_string(),
        n => format!("{first} (and {} more)", n - 1),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthError {
    /// A required part of the request is missing.
    #[error("empty input: {what}")]
    EmptyInput { what: &'static str },

    /// The grammar could not parse the unit at all.
    #[error("{origin} text `{text}` was rejected by the parser: {failure}")]
    ParseRejected {
        text: String,
        origin: TextOrigin,
        failure: ParseFailure,
    },

    /// The unit parsed, but the extraction path ended somewhere else.
    #[error("{origin} text `{text}` has no {expected}, found {}", describe(.found))]
    UnexpectedShape {
        text: String,
        origin: TextOrigin,
        expected: Step,
        found: Option<SyntaxKind>,
    },

    /// The request names something the grammar has no production for.
    #[error("cannot synthesize {construct}: {reason}")]
    UnsupportedConstruct {
        construct: &'static str,
        reason: String,
    },
}

fn describe(found: &Option<SyntaxKind>) -> String {
    match found {
        Some(kind) => format!("{kind:?}"),
        None => "nothing".to_string(),
    }
}

impl SynthError {
    /// Whether the caller should fix the request rather than the renderer.
    ///
    /// Shape and parse failures count against the caller only when the
    /// parsed text was passed through from the caller unchanged.
    pub fn is_caller_fault(&self) -> bool {
        self.origin().is_none_or(|origin| origin == TextOrigin::Caller)
    }

    pub fn origin(&self) -> Option<TextOrigin> {
        match self {
            SynthError::ParseRejected { origin, .. }
            | SynthError::UnexpectedShape { origin, .. } => Some(*origin),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
