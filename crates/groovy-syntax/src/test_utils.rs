//! Test helpers for parser snapshots.

use crate::ast::SourceFile;
use crate::printer::CstPrinter;

impl SourceFile {
    /// Parses `src`, panicking with rendered diagnostics if it has errors.
    #[track_caller]
    pub fn expect_valid(src: &str) -> SourceFile {
        let parsed = crate::parse(src).expect("fuel exhausted");
        if parsed.diagnostics.has_errors() {
            panic!(
                "Expected valid source, got error:\n{}",
                parsed.diagnostics.render(src)
            );
        }
        parsed.root
    }

    /// CST dump without trivia.
    #[track_caller]
    pub fn expect_valid_cst(src: &str) -> String {
        let root = Self::expect_valid(src);
        CstPrinter::new(root.syntax().clone()).dump()
    }

    /// CST dump with trivia tokens.
    #[track_caller]
    pub fn expect_valid_cst_full(src: &str) -> String {
        let root = Self::expect_valid(src);
        CstPrinter::new(root.syntax().clone()).with_trivia(true).dump()
    }

    /// Rendered diagnostics, panicking if the source parses cleanly.
    #[track_caller]
    pub fn expect_invalid(src: &str) -> String {
        let parsed = crate::parse(src).expect("fuel exhausted");
        if !parsed.diagnostics.has_errors() {
            panic!("Expected errors, got valid source:\n{src}");
        }
        assert_eq!(
            parsed.root.text(),
            src,
            "tree must stay lossless on invalid input"
        );
        parsed.diagnostics.render(src)
    }
}
