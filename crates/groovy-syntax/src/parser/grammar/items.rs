use super::declarations::DeclarationStart;
use crate::cst::SyntaxKind;
use crate::cst::token_sets::MEMBER_RECOVERY;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;

impl Parser<'_> {
    pub(crate) fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SourceFile);
        self.parse_statements(None);
        self.eat_trivia();
        self.finish_node();
    }

    /// `package a.b.c`
    pub(crate) fn parse_package(&mut self) {
        self.assert_current(SyntaxKind::KwPackage);
        self.start_node(SyntaxKind::PackageDefinition);
        self.bump();
        if self.currently_is(SyntaxKind::Id) {
            self.parse_code_reference(false);
        } else {
            self.error_msg(DiagnosticKind::ExpectedName, "package name");
        }
        self.finish_node();
    }

    /// `import [static] a.b.C[.*] [as Alias]`
    pub(crate) fn parse_import(&mut self) {
        self.assert_current(SyntaxKind::KwImport);
        self.start_node(SyntaxKind::ImportStatement);
        self.bump();
        self.eat_token(SyntaxKind::KwStatic);

        if self.currently_is(SyntaxKind::Id) {
            self.parse_code_reference(false);
        } else {
            self.error_msg(DiagnosticKind::ExpectedName, "imported name");
        }

        if self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Star) {
            self.bump();
            self.bump();
        } else if self.eat_token(SyntaxKind::KwAs) && !self.eat_token(SyntaxKind::Id) {
            self.error_msg(DiagnosticKind::ExpectedName, "alias after `as`");
        }
        self.finish_node();
    }

    /// `[modifiers] class Name [extends A] [implements B, C] { members }`
    pub(crate) fn parse_type_definition(&mut self) {
        self.start_node(SyntaxKind::TypeDefinition);
        self.parse_modifiers();

        if !self.eat_token(SyntaxKind::KwClass) && !self.eat_token(SyntaxKind::KwInterface) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `class` or `interface`");
        }
        if !self.eat_token(SyntaxKind::Id) {
            self.error_msg(DiagnosticKind::ExpectedName, "type name");
        }

        if self.currently_is(SyntaxKind::KwExtends) {
            self.parse_type_clause(SyntaxKind::ExtendsClause);
        }
        if self.currently_is(SyntaxKind::KwImplements) {
            self.parse_type_clause(SyntaxKind::ImplementsClause);
        }

        self.parse_class_body();
        self.finish_node();
    }

    fn parse_type_clause(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump(); // consume 'extends' / 'implements'
        loop {
            if !self.parse_type() || !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_class_body(&mut self) {
        self.start_node(SyntaxKind::ClassBody);
        if !self.currently_is(SyntaxKind::BraceOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{` to open the type body");
            self.finish_node();
            return;
        }

        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // consume '{'

        loop {
            while self.eat_token(SyntaxKind::Semicolon) {}
            if self.should_stop() || self.currently_is(SyntaxKind::BraceClose) {
                break;
            }

            let start = self.pos;
            self.parse_member();
            if self.pos == start {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "not a class member");
                continue;
            }

            if !self.should_stop()
                && !self.currently_is(SyntaxKind::Semicolon)
                && !self.currently_is(SyntaxKind::BraceClose)
                && !self.newline_before_current()
            {
                self.error_recover(
                    DiagnosticKind::ExpectedStatementEnd,
                    "between members",
                    MEMBER_RECOVERY,
                );
            }
        }

        self.close_delimiter(SyntaxKind::BraceClose);
        self.finish_node();
    }

    fn parse_member(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        match self.at_declaration() {
            Some(DeclarationStart::TypeDefinition) => self.parse_type_definition(),
            Some(DeclarationStart::Method) => self.parse_method(),
            Some(DeclarationStart::Variable) => self.parse_variable_declaration(),
            None => self.error_recover(
                DiagnosticKind::ExpectedMember,
                "statements belong inside methods",
                MEMBER_RECOVERY,
            ),
        }
        self.exit_recursion();
    }
}
