use super::types::scan_type;
use crate::cst::SyntaxKind;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;

/// What a statement starting at the current token declares, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclarationStart {
    TypeDefinition,
    Method,
    Variable,
}

impl Parser<'_> {
    /// Declaration detection by lookahead.
    ///
    /// A statement is a declaration when it starts with modifiers (`def`
    /// included), or with a primitive type or a type whose simple name is
    /// capitalized followed by a name on the same line. A `(` right after
    /// the name makes it a method.
    pub(super) fn at_declaration(&mut self) -> Option<DeclarationStart> {
        self.skip_trivia_to_buffer();
        let mut scan = self.scan();

        let mut has_modifiers = false;
        while scan.peek().is_modifier() {
            scan.bump();
            has_modifiers = true;
        }

        if matches!(scan.peek(), SyntaxKind::KwClass | SyntaxKind::KwInterface) {
            return Some(DeclarationStart::TypeDefinition);
        }

        let mut after_type = scan.clone();
        let typed = match scan_type(&mut after_type) {
            Some(ty) if after_type.at(SyntaxKind::Id) && !after_type.newline_before() => {
                has_modifiers || ty.primitive || ty.capitalized
            }
            Some(ty) if after_type.at(SyntaxKind::StringLiteral) && !after_type.newline_before() => {
                (has_modifiers || ty.primitive || ty.capitalized)
                    && after_type.nth(1) == SyntaxKind::ParenOpen
            }
            _ => false,
        };

        if typed {
            scan = after_type;
        } else if !has_modifiers {
            return None;
        }

        if !scan.at(SyntaxKind::Id) && !scan.at(SyntaxKind::StringLiteral) {
            return Some(DeclarationStart::Variable);
        }
        scan.bump();

        if scan.at(SyntaxKind::ParenOpen) && !scan.newline_before() {
            Some(DeclarationStart::Method)
        } else {
            Some(DeclarationStart::Variable)
        }
    }

    /// Modifier keywords, `def` included. Always produces a (possibly empty) node.
    pub(crate) fn parse_modifiers(&mut self) {
        self.start_node(SyntaxKind::Modifiers);
        while self.current().is_modifier() {
            self.bump();
        }
        self.finish_node();
    }

    /// `def a = 1, b` | `final String s` | `int[] xs = []`
    pub(crate) fn parse_variable_declaration(&mut self) {
        self.start_node(SyntaxKind::VariableDeclaration);
        self.parse_modifiers();
        if self.at_typed_name() {
            self.parse_type();
        }

        loop {
            self.start_node(SyntaxKind::Variable);
            if !self.eat_token(SyntaxKind::Id) {
                self.error_msg(DiagnosticKind::ExpectedName, "variable name");
            }
            if self.eat_token(SyntaxKind::Eq) && self.parse_expr().is_none() {
                self.error_msg(DiagnosticKind::ExpectedExpression, "initializer after `=`");
            }
            self.finish_node();

            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.finish_node();
    }

    /// `def foo(int a, b = 1) { ... }` | `abstract String name()`
    pub(crate) fn parse_method(&mut self) {
        self.start_node(SyntaxKind::MethodDefinition);
        self.parse_modifiers();
        if self.at_typed_name() || self.at_typed_string_name() {
            self.parse_type();
        }

        if !self.eat_token(SyntaxKind::Id) && !self.eat_token(SyntaxKind::StringLiteral) {
            self.error_msg(DiagnosticKind::ExpectedName, "method name");
        }

        self.parse_parameter_list();

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_open_block();
        }

        self.finish_node();
    }

    /// `String 'quoted name'(...)`: a type before a string method name.
    fn at_typed_string_name(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let mut scan = self.scan();
        scan_type(&mut scan).is_some()
            && scan.at(SyntaxKind::StringLiteral)
            && !scan.newline_before()
    }

    /// `( param, param )`
    pub(crate) fn parse_parameter_list(&mut self) {
        self.start_node(SyntaxKind::ParameterList);
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(` before parameters");
            self.finish_node();
            return;
        }

        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // consume '('
        while !self.currently_is(SyntaxKind::ParenClose) && !self.should_stop() {
            self.parse_parameter();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// Closure parameters between `{` and `->`, without parentheses.
    pub(crate) fn parse_closure_parameters(&mut self) {
        self.start_node(SyntaxKind::ParameterList);
        while !self.currently_is(SyntaxKind::Arrow) && !self.should_stop() {
            self.parse_parameter();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    /// `final int a = 1` | `String s` | `x`
    fn parse_parameter(&mut self) {
        self.start_node(SyntaxKind::Parameter);
        self.parse_modifiers();
        if self.at_typed_name() {
            self.parse_type();
        }
        if !self.eat_token(SyntaxKind::Id) {
            self.error_msg(DiagnosticKind::ExpectedName, "parameter name");
        }
        if self.eat_token(SyntaxKind::Eq) && self.parse_expr().is_none() {
            self.error_msg(DiagnosticKind::ExpectedExpression, "default value after `=`");
        }
        self.finish_node();
    }
}
