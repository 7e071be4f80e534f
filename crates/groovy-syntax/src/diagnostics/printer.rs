//! Renders diagnostics against their source with annotate-snippets.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        let limit = self.source.len();

        let mut out = String::new();
        for (i, diag) in self.diagnostics.iter().enumerate() {
            // The title carries the message; only related spans get labels.
            let mut snippet = Snippet::source(self.source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(adjust_range(diag.range, limit)));

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.range, limit))
                        .label(&related.message),
                );
            }

            let report: Vec<Group> = vec![Level::ERROR.primary_title(&diag.message).element(snippet)];

            if i > 0 {
                out.push('\n');
            }
            write!(out, "{}", renderer.render(&report)).expect("String write never fails");
        }
        out
    }
}

/// Widens an empty range to one byte so the caret has something to point at.
fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl Diagnostics {
    pub fn printer<'s>(&self, source: &'s str) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter {
            diagnostics: self,
            source,
            path: None,
            colored: false,
        }
    }
}
