use super::types::scan_type;
use crate::cst::SyntaxKind;
use crate::cst::token_sets::{
    ASSIGNMENT_OPERATORS, CAST_OPERAND_FIRST, CLOSURE_PARAM_TOKENS, DOTS, PREFIX_OPERATORS,
};
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;

/// Binding power of an infix operator. Higher binds tighter.
fn infix_precedence(kind: SyntaxKind) -> Option<u8> {
    let precedence = match kind {
        SyntaxKind::OrOr => 1,
        SyntaxKind::AndAnd => 2,
        SyntaxKind::EqEq | SyntaxKind::NotEq => 3,
        SyntaxKind::Lt | SyntaxKind::Gt | SyntaxKind::LtEq | SyntaxKind::GtEq => 4,
        SyntaxKind::Plus | SyntaxKind::Minus => 5,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 6,
        _ => return None,
    };
    Some(precedence)
}

impl Parser<'_> {
    /// Parses one expression. Returns the kind of the outermost node built,
    /// or `None` (nothing consumed) if no expression starts here.
    pub(crate) fn parse_expr(&mut self) -> Option<SyntaxKind> {
        if !self.enter_recursion() {
            return None;
        }
        let kind = self.parse_assignment();
        self.exit_recursion();
        kind
    }

    /// Right-associative: `a = b = c`.
    fn parse_assignment(&mut self) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let lhs = self.parse_binary(1)?;

        if !self.currently_is_one_of(ASSIGNMENT_OPERATORS) || self.newline_before_current() {
            return Some(lhs);
        }

        self.start_node_at(checkpoint, SyntaxKind::AssignmentExpression);
        self.bump(); // consume operator
        if self.parse_expr().is_none() {
            self.error_msg(DiagnosticKind::ExpectedExpression, "right side of assignment");
        }
        self.finish_node();
        Some(SyntaxKind::AssignmentExpression)
    }

    /// Precedence climbing. A line break before an operator ends the expression.
    fn parse_binary(&mut self, min_precedence: u8) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let mut kind = self.parse_unary()?;

        loop {
            let Some(precedence) = infix_precedence(self.current()) else {
                break;
            };
            if precedence < min_precedence || self.newline_before_current() {
                break;
            }

            self.start_node_at(checkpoint, SyntaxKind::BinaryExpression);
            self.bump(); // consume operator
            if self.parse_binary(precedence + 1).is_none() {
                self.error_msg(DiagnosticKind::ExpectedExpression, "right operand");
            }
            self.finish_node();
            kind = SyntaxKind::BinaryExpression;
        }

        Some(kind)
    }

    fn parse_unary(&mut self) -> Option<SyntaxKind> {
        if self.currently_is_one_of(PREFIX_OPERATORS) {
            self.start_node(SyntaxKind::UnaryExpression);
            self.bump(); // consume operator
            if self.enter_recursion() {
                if self.parse_unary().is_none() {
                    self.error_msg(DiagnosticKind::ExpectedExpression, "operand");
                }
                self.exit_recursion();
            }
            self.finish_node();
            return Some(SyntaxKind::UnaryExpression);
        }

        if self.currently_is(SyntaxKind::ParenOpen) && self.at_cast() {
            return Some(self.parse_cast());
        }

        self.parse_postfix()
    }

    /// `(Type) operand` as opposed to `(expr)`.
    fn at_cast(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let mut scan = self.scan();
        scan.bump(); // '('
        if scan_type(&mut scan).is_none() || !scan.eat(SyntaxKind::ParenClose) {
            return false;
        }
        !scan.newline_before() && CAST_OPERAND_FIRST.contains(scan.peek())
    }

    fn parse_cast(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::TypeCastExpression);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // consume '('
        self.parse_type();
        self.close_delimiter(SyntaxKind::ParenClose);
        if self.enter_recursion() {
            if self.parse_unary().is_none() {
                self.error_msg(DiagnosticKind::ExpectedExpression, "cast operand");
            }
            self.exit_recursion();
        }
        self.finish_node();
        SyntaxKind::TypeCastExpression
    }

    /// Member access, calls, trailing closures and indexing wrap the primary.
    fn parse_postfix(&mut self) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let mut kind = self.parse_primary()?;

        loop {
            let current = self.current();
            if DOTS.contains(current) {
                self.start_node_at(checkpoint, SyntaxKind::ReferenceExpression);
                self.bump(); // consume dot
                let name = self.current();
                if name == SyntaxKind::Id || name == SyntaxKind::StringLiteral || name.is_keyword() {
                    self.bump();
                } else {
                    self.error_msg(DiagnosticKind::ExpectedName, "member name after `.`");
                }
                self.finish_node();
                kind = SyntaxKind::ReferenceExpression;
                continue;
            }

            if self.newline_before_current() {
                break;
            }

            match current {
                SyntaxKind::ParenOpen => {
                    self.start_node_at(checkpoint, SyntaxKind::MethodCallExpression);
                    self.parse_argument_list();
                    if self.currently_is(SyntaxKind::BraceOpen) && !self.newline_before_current() {
                        self.parse_closure();
                    }
                    self.finish_node();
                    kind = SyntaxKind::MethodCallExpression;
                }
                SyntaxKind::BraceOpen if kind == SyntaxKind::ReferenceExpression => {
                    self.start_node_at(checkpoint, SyntaxKind::MethodCallExpression);
                    self.parse_closure();
                    self.finish_node();
                    kind = SyntaxKind::MethodCallExpression;
                }
                SyntaxKind::BracketOpen => {
                    self.start_node_at(checkpoint, SyntaxKind::IndexExpression);
                    self.parse_bracketed_expressions();
                    self.finish_node();
                    kind = SyntaxKind::IndexExpression;
                }
                _ => break,
            }
        }

        Some(kind)
    }

    fn parse_primary(&mut self) -> Option<SyntaxKind> {
        match self.current() {
            SyntaxKind::Id | SyntaxKind::KwThis | SyntaxKind::KwSuper => {
                self.start_node(SyntaxKind::ReferenceExpression);
                self.bump();
                self.finish_node();
                Some(SyntaxKind::ReferenceExpression)
            }
            SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::KwTrue
            | SyntaxKind::KwFalse
            | SyntaxKind::KwNull => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
                Some(SyntaxKind::Literal)
            }
            SyntaxKind::ParenOpen => {
                self.start_node(SyntaxKind::ParenthesizedExpression);
                self.push_delimiter(SyntaxKind::ParenOpen);
                self.bump(); // consume '('
                if self.parse_expr().is_none() {
                    self.error(DiagnosticKind::ExpectedExpression);
                }
                self.close_delimiter(SyntaxKind::ParenClose);
                self.finish_node();
                Some(SyntaxKind::ParenthesizedExpression)
            }
            SyntaxKind::BracketOpen => {
                self.start_node(SyntaxKind::ListExpression);
                self.parse_bracketed_expressions();
                self.finish_node();
                Some(SyntaxKind::ListExpression)
            }
            SyntaxKind::BraceOpen => {
                self.parse_closure();
                Some(SyntaxKind::ClosableBlock)
            }
            SyntaxKind::KwNew => {
                self.parse_new();
                Some(SyntaxKind::NewExpression)
            }
            _ => None,
        }
    }

    /// `[a, b]` for list literals and index arguments.
    fn parse_bracketed_expressions(&mut self) {
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump(); // consume '['
        while !self.currently_is(SyntaxKind::BracketClose) && !self.should_stop() {
            if self.parse_expr().is_none() {
                self.error(DiagnosticKind::ExpectedExpression);
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter(SyntaxKind::BracketClose);
    }

    /// `(a, b)` call arguments.
    pub(crate) fn parse_argument_list(&mut self) {
        self.start_node(SyntaxKind::ArgumentList);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // consume '('
        while !self.currently_is(SyntaxKind::ParenClose) && !self.should_stop() {
            if self.parse_expr().is_none() {
                self.error_msg(DiagnosticKind::ExpectedExpression, "argument");
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// `new a.b.C(args)` | `new int[n]`
    fn parse_new(&mut self) {
        self.start_node(SyntaxKind::NewExpression);
        self.bump(); // consume 'new'

        let current = self.current();
        if current == SyntaxKind::Id {
            self.parse_code_reference(true);
        } else if current.is_primitive_type() {
            self.bump();
        } else {
            self.error_msg(DiagnosticKind::ExpectedType, "type after `new`");
        }

        if self.currently_is(SyntaxKind::ParenOpen) && !self.newline_before_current() {
            self.parse_argument_list();
        } else {
            while self.currently_is(SyntaxKind::BracketOpen) && !self.newline_before_current() {
                self.push_delimiter(SyntaxKind::BracketOpen);
                self.bump(); // consume '['
                if !self.currently_is(SyntaxKind::BracketClose) && self.parse_expr().is_none() {
                    self.error_msg(DiagnosticKind::ExpectedExpression, "array size");
                }
                self.close_delimiter(SyntaxKind::BracketClose);
            }
        }

        self.finish_node();
    }

    /// `{ [params ->] statements }`
    pub(crate) fn parse_closure(&mut self) {
        let has_parameters = self.at_closure_parameters();
        self.start_node(SyntaxKind::ClosableBlock);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // consume '{'

        if has_parameters {
            self.parse_closure_parameters();
            self.expect(SyntaxKind::Arrow, "`->` after closure parameters");
        }

        self.parse_statements(Some(SyntaxKind::BraceClose));
        self.close_delimiter(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// Scans from `{` for a `->` reachable through parameter-like tokens only.
    fn at_closure_parameters(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let mut scan = self.scan();
        scan.bump(); // '{'
        loop {
            let kind = scan.peek();
            if kind == SyntaxKind::Arrow {
                return true;
            }
            if !CLOSURE_PARAM_TOKENS.contains(kind) {
                return false;
            }
            scan.bump();
        }
    }
}
