use groovy_syntax::ast::SourceFile;
use groovy_syntax::{SyntaxElement, SyntaxKind};
use rowan::NodeOrToken;

use crate::locate::{Mismatch, Shape, Step, locate};

fn text(element: &SyntaxElement) -> String {
    match element {
        NodeOrToken::Node(n) => n.text().to_string(),
        NodeOrToken::Token(t) => t.text().to_string(),
    }
}

fn root(src: &str) -> SourceFile {
    let parsed = groovy_syntax::parse(src).expect("fuel");
    assert!(!parsed.diagnostics.has_errors(), "{src}");
    parsed.root
}

#[test]
fn empty_path_is_the_root() {
    let file = root("a");
    let found = locate(file.syntax(), &[]).unwrap();
    assert_eq!(found.kind(), SyntaxKind::SourceFile);
}

#[test]
fn walks_to_a_cast_type_reference() {
    let file = root("(java.util.List )x");
    let found = locate(
        file.syntax(),
        &[
            Step::First(Shape::Kind(SyntaxKind::TypeCastExpression)),
            Step::Child(Shape::Kind(SyntaxKind::ClassTypeElement)),
            Step::Child(Shape::Kind(SyntaxKind::CodeReference)),
        ],
    )
    .unwrap();
    assert_eq!(found.kind(), SyntaxKind::CodeReference);
    assert_eq!(text(&found), "java.util.List");
}

#[test]
fn first_skips_leading_doc_comment() {
    let file = root("/** doc */\ndef foo() {}");
    let found = locate(file.syntax(), &[Step::First(Shape::Statement)]).unwrap();
    assert_eq!(found.kind(), SyntaxKind::MethodDefinition);
}

#[test]
fn first_reports_the_kind_it_found() {
    let file = root("foo");
    let err = locate(
        file.syntax(),
        &[Step::First(Shape::Kind(SyntaxKind::ClosableBlock))],
    )
    .unwrap_err();
    assert_eq!(
        err,
        Mismatch {
            step: Step::First(Shape::Kind(SyntaxKind::ClosableBlock)),
            found: Some(SyntaxKind::ReferenceExpression),
        }
    );
}

#[test]
fn first_on_empty_unit_finds_nothing() {
    let file = root("  ");
    let err = locate(file.syntax(), &[Step::First(Shape::Expr)]).unwrap_err();
    assert_eq!(err.found, None);
}

#[test]
fn missing_child_stops_the_walk() {
    let file = root("(a) + 1");
    let err = locate(
        file.syntax(),
        &[
            Step::First(Shape::Expr),
            Step::Child(Shape::Kind(SyntaxKind::ClassTypeElement)),
        ],
    )
    .unwrap_err();
    assert_eq!(err.step, Step::Child(Shape::Kind(SyntaxKind::ClassTypeElement)));
    assert_eq!(err.found, None);
}

#[test]
fn cannot_step_below_a_token() {
    let file = root(" ");
    let err = locate(
        file.syntax(),
        &[Step::Token(SyntaxKind::Whitespace), Step::Name],
    )
    .unwrap_err();
    assert_eq!(err.step, Step::Name);
    assert_eq!(err.found, Some(SyntaxKind::Whitespace));
}

#[test]
fn name_is_the_last_name_token() {
    let file = root("a.b.'c d'");
    let found = locate(
        file.syntax(),
        &[Step::First(Shape::Kind(SyntaxKind::ReferenceExpression)), Step::Name],
    )
    .unwrap();
    assert_eq!(found.kind(), SyntaxKind::StringLiteral);
    assert_eq!(text(&found), "'c d'");

    let file = root("a.class");
    let found = locate(
        file.syntax(),
        &[Step::First(Shape::Kind(SyntaxKind::ReferenceExpression)), Step::Name],
    )
    .unwrap();
    assert_eq!(found.kind(), SyntaxKind::KwClass);
}

#[test]
fn modifier_must_be_a_modifier_keyword() {
    let file = root("static def foo() {}");
    let path = [
        Step::First(Shape::Kind(SyntaxKind::MethodDefinition)),
        Step::Child(Shape::Kind(SyntaxKind::Modifiers)),
        Step::Modifier,
    ];
    let found = locate(file.syntax(), &path).unwrap();
    assert_eq!(found.kind(), SyntaxKind::KwStatic);
}

#[test]
fn member_name_follows_the_hash() {
    let file = root("/** @see A#run */");
    let found = locate(
        file.syntax(),
        &[
            Step::Child(Shape::Kind(SyntaxKind::DocComment)),
            Step::Child(Shape::Kind(SyntaxKind::DocTag)),
            Step::Child(Shape::Kind(SyntaxKind::DocMemberReference)),
            Step::MemberName,
        ],
    )
    .unwrap();
    assert_eq!(text(&found), "run");
}

#[test]
fn type_element_shape_accepts_arrays() {
    let file = root("def int[] xs");
    let found = locate(
        file.syntax(),
        &[
            Step::First(Shape::Kind(SyntaxKind::VariableDeclaration)),
            Step::Child(Shape::TypeElement),
        ],
    )
    .unwrap();
    assert_eq!(found.kind(), SyntaxKind::ArrayTypeElement);
}

#[test]
fn steps_describe_themselves() {
    assert_eq!(
        Step::First(Shape::Kind(SyntaxKind::ClosableBlock)).to_string(),
        "leading ClosableBlock"
    );
    assert_eq!(Step::Child(Shape::TypeElement).to_string(), "type element child");
    assert_eq!(Step::Modifier.to_string(), "modifier keyword");
}
