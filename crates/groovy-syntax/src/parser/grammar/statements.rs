use super::declarations::DeclarationStart;
use crate::cst::SyntaxKind;
use crate::cst::token_sets::{COMMAND_ARG_FIRST, EXPR_FIRST, STATEMENT_RECOVERY};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;

impl Parser<'_> {
    /// Newline- or `;`-separated statements up to `until` (exclusive) or EOF.
    pub(crate) fn parse_statements(&mut self, until: Option<SyntaxKind>) {
        loop {
            while self.eat_token(SyntaxKind::Semicolon) {}
            if self.should_stop() {
                break;
            }
            let current = self.current();
            if Some(current) == until {
                break;
            }
            if current == SyntaxKind::Garbage {
                self.error_and_bump(DiagnosticKind::UnknownCharacters);
                continue;
            }

            let start = self.pos;
            self.parse_statement();
            if self.pos == start {
                self.error_and_bump_msg(DiagnosticKind::ExpectedExpression, "statement");
                continue;
            }

            if !self.should_stop()
                && !self.currently_is(SyntaxKind::Semicolon)
                && Some(self.current()) != until
                && !self.newline_before_current()
            {
                self.error_recover(
                    DiagnosticKind::ExpectedStatementEnd,
                    "found more tokens on the same line",
                    STATEMENT_RECOVERY,
                );
            }
        }
    }

    pub(crate) fn parse_statement(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            SyntaxKind::KwPackage => self.parse_package(),
            SyntaxKind::KwImport => self.parse_import(),
            SyntaxKind::KwWhile => self.parse_while(),
            SyntaxKind::KwIf => self.parse_if(),
            SyntaxKind::KwReturn => self.parse_return(),
            _ => match self.at_declaration() {
                Some(DeclarationStart::TypeDefinition) => self.parse_type_definition(),
                Some(DeclarationStart::Method) => self.parse_method(),
                Some(DeclarationStart::Variable) => self.parse_variable_declaration(),
                None => self.parse_expression_statement(),
            },
        }

        self.exit_recursion();
    }

    /// An expression, or a command call `callee arg, arg` without parentheses.
    fn parse_expression_statement(&mut self) {
        let checkpoint = self.checkpoint();
        let Some(kind) = self.parse_expr() else {
            self.error(DiagnosticKind::ExpectedExpression);
            return;
        };

        if kind != SyntaxKind::ReferenceExpression
            || self.newline_before_current()
            || !self.currently_is_one_of(COMMAND_ARG_FIRST)
        {
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::ApplicationStatement);
        self.start_node(SyntaxKind::CommandArguments);
        loop {
            if self.parse_expr().is_none() {
                self.error_msg(DiagnosticKind::ExpectedExpression, "command argument");
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
        self.finish_node();
    }

    /// `while (cond) body`
    fn parse_while(&mut self) {
        self.start_node(SyntaxKind::WhileStatement);
        self.bump(); // consume 'while'
        self.parse_condition();
        self.parse_branch_body("loop body");
        self.finish_node();
    }

    /// `if (cond) body [else body]`
    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IfStatement);
        self.bump(); // consume 'if'
        self.parse_condition();
        self.parse_branch_body("`if` branch");
        if self.eat_token(SyntaxKind::KwElse) {
            self.parse_branch_body("`else` branch");
        }
        self.finish_node();
    }

    /// `return [expr]`: the value must start on the same line.
    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::ReturnStatement);
        self.bump(); // consume 'return'
        if !self.newline_before_current() && self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        }
        self.finish_node();
    }

    fn parse_condition(&mut self) {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(` before condition");
            return;
        }
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // consume '('
        if self.parse_expr().is_none() {
            self.error_msg(DiagnosticKind::ExpectedExpression, "condition");
        }
        self.close_delimiter(SyntaxKind::ParenClose);
    }

    /// A `{` here opens a block statement, not a closure.
    fn parse_branch_body(&mut self, what: &str) {
        if self.should_stop() {
            self.error_msg(DiagnosticKind::ExpectedExpression, what);
            return;
        }
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.start_node(SyntaxKind::BlockStatement);
            self.parse_open_block();
            self.finish_node();
            return;
        }
        let start = self.pos;
        self.parse_statement();
        if self.pos == start {
            self.error_msg(DiagnosticKind::ExpectedExpression, what);
        }
    }

    /// `{ statements }` of a method body or block statement.
    pub(crate) fn parse_open_block(&mut self) {
        self.start_node(SyntaxKind::OpenBlock);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // consume '{'
        self.parse_statements(Some(SyntaxKind::BraceClose));
        self.close_delimiter(SyntaxKind::BraceClose);
        self.finish_node();
    }
}
