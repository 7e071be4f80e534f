use crate::cst::{GroovyLang, SyntaxKind::*, TokenSet};
use rowan::Language;

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[ParenOpen, ParenClose, Id]);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(ParenClose));
    assert!(set.contains(Id));
    assert!(!set.contains(Plus));
    assert!(!set.contains(SourceFile));
}

#[test]
fn token_set_union() {
    let a = TokenSet::new(&[ParenOpen, ParenClose]);
    let b = TokenSet::single(StringLiteral);
    let c = a.union(b);
    assert!(c.contains(ParenOpen));
    assert!(c.contains(StringLiteral));
    assert!(!c.contains(Comma));
}

#[test]
fn token_set_debug() {
    let set = TokenSet::new(&[Comma, Semicolon]);
    assert_eq!(format!("{set:?}"), "{Comma, Semicolon}");
}

#[test]
fn syntax_kind_count_under_128() {
    assert!(
        (__LAST as u16) < 128,
        "SyntaxKind has {} variants, exceeds TokenSet capacity of 128",
        __LAST as u16
    );
}

#[test]
fn trivia() {
    assert!(Whitespace.is_trivia());
    assert!(Newline.is_trivia());
    assert!(LineComment.is_trivia());
    assert!(DocCommentRaw.is_trivia());
    assert!(!Semicolon.is_trivia());
    assert!(!Error.is_trivia());
}

#[test]
fn keyword_ranges() {
    assert!(KwPackage.is_keyword());
    assert!(KwDef.is_keyword());
    assert!(KwVoid.is_keyword());
    assert!(!Id.is_keyword());

    assert!(KwDef.is_modifier());
    assert!(KwStrictfp.is_modifier());
    assert!(!KwClass.is_modifier());
    assert!(!KwInt.is_modifier());

    assert!(KwInt.is_primitive_type());
    assert!(KwVoid.is_primitive_type());
    assert!(!KwDef.is_primitive_type());
}

#[test]
fn tokens_precede_nodes() {
    assert!(Error.is_token());
    assert!(!SourceFile.is_token());
    assert!(!DocMemberReference.is_token());
    assert!(ClassTypeElement.is_type_element());
    assert!(!CodeReference.is_type_element());
}

#[test]
fn raw_kind_round_trip() {
    for kind in [ParenOpen, KwDef, Id, SourceFile, DocMemberReference] {
        let raw = GroovyLang::kind_to_raw(kind);
        assert_eq!(GroovyLang::kind_from_raw(raw), kind);
    }
}
