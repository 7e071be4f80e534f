//! Tests for CLI dispatch: subcommand args land in the right request fields
//! and the global output flags work after any subcommand.

use log::LevelFilter;

use super::*;
use crate::commands::synth::SynthInput;

fn params(argv: &[&str]) -> SynthParams {
    let m = build_cli()
        .try_get_matches_from(argv)
        .unwrap_or_else(|e| panic!("{argv:?} should parse: {e}"));
    let (name, sub) = m.subcommand().expect("subcommand");
    SynthParams::from_matches(name, sub).expect("known subcommand")
}

#[test]
fn declare_collects_modifiers_and_names() {
    let p = params(&[
        "groovy-synth", "declare", "-m", "private", "-m", "final", "-t", "String", "a", "b",
    ]);
    assert_eq!(
        p.input,
        SynthInput::Declaration {
            field: false,
            modifiers: vec!["private".into(), "final".into()],
            ty: Some("String".into()),
            names: vec!["a".into(), "b".into()],
            init: None,
        }
    );
}

#[test]
fn field_is_a_declaration_in_a_class() {
    let p = params(&["groovy-synth", "field", "count", "--init", "0"]);
    let SynthInput::Declaration {
        field, names, init, ..
    } = p.input
    else {
        panic!("expected a declaration");
    };
    assert!(field);
    assert_eq!(names, ["count"]);
    assert_eq!(init.as_deref(), Some("0"));
}

#[test]
fn declare_requires_a_name() {
    let result = build_cli().try_get_matches_from(["groovy-synth", "declare", "-m", "final"]);
    assert!(result.is_err());
}

#[test]
fn import_flags() {
    let p = params(&[
        "groovy-synth", "import", "java.lang.Math.max", "--static", "--alias", "mx",
    ]);
    assert_eq!(
        p.input,
        SynthInput::Import {
            qualified_name: "java.lang.Math.max".into(),
            is_static: true,
            is_on_demand: false,
            alias: Some("mx".into()),
        }
    );
}

#[test]
fn call_takes_trailing_arguments() {
    let p = params(&["groovy-synth", "call", "println", "x + 1", "y"]);
    assert_eq!(
        p.input,
        SynthInput::Call {
            callee: "println".into(),
            arguments: vec!["x + 1".into(), "y".into()],
        }
    );

    let p = params(&["groovy-synth", "args"]);
    assert_eq!(p.input, SynthInput::Arguments { expressions: vec![] });
}

#[test]
fn newline_count_defaults_to_one() {
    assert_eq!(params(&["groovy-synth", "newline"]).input, SynthInput::Newline { count: 1 });
    assert_eq!(
        params(&["groovy-synth", "newline", "-n", "3"]).input,
        SynthInput::Newline { count: 3 }
    );
    assert!(
        build_cli()
            .try_get_matches_from(["groovy-synth", "newline", "-n", "many"])
            .is_err()
    );
}

#[test]
fn output_flags_are_global() {
    let p = params(&["groovy-synth", "space", "--trivia", "--spans", "--color", "never"]);
    assert!(p.trivia);
    assert!(p.spans);
    assert_eq!(p.color, ColorChoice::Never);

    let p = params(&["groovy-synth", "--color", "always", "space"]);
    assert_eq!(p.color, ColorChoice::Always);
    assert!(!p.trivia);
}

#[test]
fn verbosity_selects_log_level() {
    let level = |argv: &[&str]| {
        let m = build_cli().try_get_matches_from(argv).unwrap();
        let (_, sub) = m.subcommand().unwrap();
        log_level(sub)
    };
    assert_eq!(level(&["groovy-synth", "space"]), None);
    assert_eq!(level(&["groovy-synth", "space", "-v"]), Some(LevelFilter::Debug));
    assert_eq!(level(&["groovy-synth", "-vv", "space"]), Some(LevelFilter::Trace));
}

#[test]
fn unknown_subcommand_has_no_params() {
    let m = build_cli().try_get_matches_from(["groovy-synth", "space"]).unwrap();
    let (_, sub) = m.subcommand().unwrap();
    assert!(SynthParams::from_matches("nope", sub).is_none());
}

#[test]
fn color_choice_is_explicit_when_forced() {
    assert!(ColorChoice::Always.should_colorize());
    assert!(!ColorChoice::Never.should_colorize());
}
