use groovy_synth::{ConstructionRequest, ElementFactory, Initializer, SynthError};

use super::synth::{SynthInput, build_request, render};

fn dump(input: SynthInput) -> String {
    let factory = ElementFactory::new();
    let request = build_request(&factory, &input).unwrap();
    render(&factory.synthesize(&request).unwrap(), false, false)
}

#[test]
fn command_call_initializer_is_kept_as_application() {
    let factory = ElementFactory::new();
    let input = SynthInput::Declaration {
        field: false,
        modifiers: vec![],
        ty: None,
        names: vec!["x".into()],
        init: Some("foo a, b".into()),
    };
    let ConstructionRequest::VariableDeclaration { initializer, .. } =
        build_request(&factory, &input).unwrap()
    else {
        panic!("expected a variable declaration request");
    };
    assert!(matches!(initializer, Some(Initializer::Application(_))));
}

#[test]
fn declaration_type_is_unboxed() {
    let out = dump(SynthInput::Declaration {
        field: false,
        modifiers: vec!["final".into()],
        ty: Some("java.lang.Integer".into()),
        names: vec!["i".into()],
        init: None,
    });
    insta::assert_snapshot!(out, @r#"
    VariableDeclaration
      Modifiers
        KwFinal "final"
      PrimitiveTypeElement
        KwInt "int"
      Variable
        Id "i"
    "#);
}

#[test]
fn import_tree() {
    let out = dump(SynthInput::Import {
        qualified_name: "x.y.List".into(),
        is_static: false,
        is_on_demand: true,
        alias: None,
    });
    insta::assert_snapshot!(out, @r#"
    ImportStatement
      KwImport "import"
      CodeReference
        Id "x"
        Dot "."
        Id "y"
        Dot "."
        Id "List"
      Dot "."
      Star "*"
    "#);
}

#[test]
fn tokens_print_as_single_lines() {
    insta::assert_snapshot!(dump(SynthInput::Space), @r#"Whitespace " ""#);
    insta::assert_snapshot!(dump(SynthInput::Modifier { name: "static".into() }), @r#"KwStatic "static""#);
}

#[test]
fn bad_operand_fails_before_synthesis() {
    let factory = ElementFactory::new();
    let input = SynthInput::Arguments {
        expressions: vec!["a".into(), "b +".into()],
    };
    let err = build_request(&factory, &input).unwrap_err();
    assert!(matches!(err, SynthError::ParseRejected { .. }));
    assert!(err.is_caller_fault());
}

#[test]
fn declaration_in_block_is_not_an_initializer() {
    let factory = ElementFactory::new();
    let input = SynthInput::Declaration {
        field: false,
        modifiers: vec![],
        ty: None,
        names: vec!["x".into()],
        init: Some("def y".into()),
    };
    let err = build_request(&factory, &input).unwrap_err();
    assert!(matches!(
        err,
        SynthError::UnsupportedConstruct {
            construct: "initializer",
            ..
        }
    ));
}
