use crate::cst::SyntaxKind;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::core::Scan;

/// Shape of a type seen by a lookahead scan.
#[derive(Debug, Clone, Copy)]
pub(super) struct ScannedType {
    pub primitive: bool,
    /// Last name segment starts with an uppercase letter: `java.util.List`.
    pub capitalized: bool,
}

/// Skips over `int`, `a.b.C`, `List<String>`, `C[][]` without building anything.
pub(super) fn scan_type(scan: &mut Scan<'_>) -> Option<ScannedType> {
    let mut ty = ScannedType {
        primitive: false,
        capitalized: false,
    };

    let first = scan.peek();
    if first.is_primitive_type() {
        ty.primitive = true;
        scan.bump();
    } else if first == SyntaxKind::Id {
        let mut last = scan.text();
        scan.bump();
        while scan.at(SyntaxKind::Dot) && scan.nth(1) == SyntaxKind::Id {
            scan.bump();
            last = scan.text();
            scan.bump();
        }
        ty.capitalized = last.starts_with(|c: char| c.is_ascii_uppercase());
        if scan.at(SyntaxKind::Lt) && !scan_type_arguments(scan) {
            return None;
        }
    } else {
        return None;
    }

    while scan.at(SyntaxKind::BracketOpen) && scan.nth(1) == SyntaxKind::BracketClose {
        scan.bump();
        scan.bump();
    }
    Some(ty)
}

fn scan_type_arguments(scan: &mut Scan<'_>) -> bool {
    scan.bump(); // consume '<'
    let mut depth = 1u32;
    while depth > 0 {
        match scan.peek() {
            SyntaxKind::Lt => depth += 1,
            SyntaxKind::Gt => depth -= 1,
            SyntaxKind::Id
            | SyntaxKind::Dot
            | SyntaxKind::Comma
            | SyntaxKind::Question
            | SyntaxKind::KwExtends
            | SyntaxKind::KwSuper
            | SyntaxKind::BracketOpen
            | SyntaxKind::BracketClose => {}
            kind if kind.is_primitive_type() => {}
            _ => return false,
        }
        scan.bump();
    }
    true
}

impl Parser<'_> {
    /// Whether a type followed by a name on the same line starts here.
    ///
    /// Used after modifiers, where any type spelling is accepted.
    pub(crate) fn at_typed_name(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let mut scan = self.scan();
        scan_type(&mut scan).is_some() && scan.at(SyntaxKind::Id) && !scan.newline_before()
    }

    /// `int` | `a.b.C<T>` | any of those followed by `[]` pairs.
    pub(crate) fn parse_type(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        match self.current() {
            kind if kind.is_primitive_type() => {
                self.start_node(SyntaxKind::PrimitiveTypeElement);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::ClassTypeElement);
                self.parse_code_reference(true);
                self.finish_node();
            }
            _ => {
                self.error(DiagnosticKind::ExpectedType);
                return false;
            }
        }

        while self.currently_is(SyntaxKind::BracketOpen) && self.next_is(SyntaxKind::BracketClose) {
            self.start_node_at(checkpoint, SyntaxKind::ArrayTypeElement);
            self.bump();
            self.bump();
            self.finish_node();
        }
        true
    }

    /// Dotted name: `java.util.List`, optionally with `<...>` type arguments.
    pub(crate) fn parse_code_reference(&mut self, with_type_arguments: bool) {
        self.start_node(SyntaxKind::CodeReference);
        if !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedName);
        }
        while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Id) {
            self.bump();
            self.bump();
        }
        if with_type_arguments && self.currently_is(SyntaxKind::Lt) {
            self.parse_type_arguments();
        }
        self.finish_node();
    }

    fn parse_type_arguments(&mut self) {
        self.start_node(SyntaxKind::TypeArgumentList);
        self.bump(); // consume '<'
        loop {
            if self.eat_token(SyntaxKind::Question) {
                if self.eat_token(SyntaxKind::KwExtends) || self.eat_token(SyntaxKind::KwSuper) {
                    self.parse_type();
                }
            } else if !self.parse_type() {
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Gt, "`>` after type arguments");
        self.finish_node();
    }
}
