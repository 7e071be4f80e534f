use groovy_syntax::ast::{Expr, SourceFile, Statement, TopStatement, TypeElement, unescape_string_literal};
use groovy_syntax::{CstPrinter, SyntaxKind, SyntaxNode};
use rowan::NodeOrToken;

use crate::error::{ParseFailure, SynthError, TextOrigin};
use crate::factory::{ElementFactory, FactoryConfig};
use crate::locate::{Shape, Step};
use crate::request::{ConstructionRequest, TypeSource};
use crate::text::TypeDescriptor;
use crate::unit::{Grammar, UnitName};

fn statement(src: &str) -> Statement {
    let parsed = groovy_syntax::parse(src).expect("fuel");
    match parsed.root.statements().next() {
        Some(TopStatement::Statement(s)) => s,
        other => panic!("expected a statement, got {other:?}"),
    }
}

fn expr(src: &str) -> Expr {
    match statement(src) {
        Statement::Expr(e) => e,
        other => panic!("expected an expression, got {other:?}"),
    }
}

#[test]
fn untyped_declaration_keeps_names_and_modifiers() {
    let factory = ElementFactory::new();
    let decl = factory
        .variable_declaration(&["private", "final"], None, &["a", "b", "c"], None)
        .unwrap();

    assert_eq!(decl.names(), ["a", "b", "c"]);
    assert_eq!(decl.modifier_names(), ["private", "final"]);
    assert!(decl.has_def_marker());
    assert!(decl.type_element().is_none());
    assert!(decl.variables().all(|v| v.initializer().is_none()));
}

#[test]
fn typed_declaration_with_initializer() {
    let factory = ElementFactory::new();
    let ty = TypeDescriptor::canonical("java.lang.String");
    let init = expr("'x'").into();
    let decl = factory
        .variable_declaration(&["final"], Some(&ty), &["s"], Some(&init))
        .unwrap();

    assert_eq!(decl.text(), "final java.lang.String s = 'x'");
    assert!(!decl.has_def_marker());
    let Some(TypeElement::Class(class)) = decl.type_element() else {
        panic!("expected a class type");
    };
    assert_eq!(class.reference().unwrap().qualified_name(), "java.lang.String");

    let variable = decl.variables().next().unwrap();
    let Some(Expr::Literal(literal)) = variable.initializer() else {
        panic!("expected a literal initializer");
    };
    assert_eq!(literal.string_value().as_deref(), Some("x"));
}

#[test]
fn boxed_types_declare_primitives() {
    let factory = ElementFactory::new();
    let ty = TypeDescriptor::canonical("java.lang.Integer");
    let decl = factory.variable_declaration(&[], Some(&ty), &["i"], None).unwrap();
    assert!(matches!(decl.type_element(), Some(TypeElement::Primitive(_))));
    assert_eq!(decl.text(), "int i");
}

#[test]
fn lowercase_type_gets_def_marker() {
    let factory = ElementFactory::new();
    let ty = TypeDescriptor::canonical("my.pkg.thing");
    let decl = factory.variable_declaration(&[], Some(&ty), &["t"], None).unwrap();
    assert!(decl.has_def_marker());
    assert!(decl.modifier_names().is_empty());
    assert_eq!(decl.type_element().unwrap().text(), "my.pkg.thing");
}

#[test]
fn command_call_initializer_becomes_a_call() {
    let factory = ElementFactory::new();
    let Statement::Application(app) = statement("foo a, (b)") else {
        panic!("expected a command call");
    };
    let init = app.into();
    let decl = factory.variable_declaration(&[], None, &["x"], Some(&init)).unwrap();

    let variable = decl.variables().next().unwrap();
    let Some(Expr::MethodCall(call)) = variable.initializer() else {
        panic!("expected a call initializer");
    };
    assert_eq!(call.text(), "foo(a, b)");
    assert_eq!(call.arguments().len(), 2);
}

#[test]
fn declaration_without_names_is_rejected() {
    let factory = ElementFactory::new();
    let err = factory.variable_declaration(&["final"], None, &[], None).unwrap_err();
    assert!(matches!(err, SynthError::EmptyInput { what: "identifier list" }));
}

#[test]
fn field_declaration_lives_in_a_class_body() {
    let factory = ElementFactory::new();
    let field = factory
        .field_declaration(&["static"], None, &["count"], None)
        .unwrap();
    assert_eq!(field.names(), ["count"]);
    assert_eq!(field.modifier_names(), ["static"]);
    assert_eq!(
        field.syntax().parent().map(|p| p.kind()),
        Some(SyntaxKind::ClassBody)
    );
}

#[test]
fn simple_field_declaration() {
    let factory = ElementFactory::new();
    let field = factory.simple_field_declaration("name", "String").unwrap();
    assert_eq!(field.text(), "String name");
    assert!(!field.has_def_marker());

    let field = factory.simple_field_declaration("raw", "thing").unwrap();
    assert!(field.has_def_marker());
    assert_eq!(field.type_element().unwrap().text(), "thing");
}

#[test]
fn typed_parameter() {
    let factory = ElementFactory::new();
    let param = factory.parameter("p", Some("x.y.Z"), None).unwrap();
    assert_eq!(param.name().unwrap().text(), "p");
    assert_eq!(param.type_element().unwrap().text(), "x.y.Z");

    insta::assert_snapshot!(CstPrinter::new(param.syntax().clone()).dump(), @r#"
    Parameter
      Modifiers
      ClassTypeElement
        CodeReference
          Id "x"
          Dot "."
          Id "y"
          Dot "."
          Id "Z"
      Id "p"
    "#);
}

#[test]
fn untyped_parameter_carries_context() {
    let factory = ElementFactory::new();
    let context: SyntaxNode = groovy_syntax::parse("def ctx = 1")
        .expect("fuel")
        .root
        .syntax()
        .clone();

    let param = factory.parameter("p", None, Some(&context)).unwrap();
    assert_eq!(param.name().unwrap().text(), "p");
    assert!(param.type_element().is_none());
    assert_eq!(param.context(), Some(&context));
}

#[test]
fn type_reference_from_cast() {
    let factory = ElementFactory::new();
    let reference = factory.type_reference("java.util.Map<K, V>").unwrap();
    assert_eq!(reference.qualified_name(), "java.util.Map");
    assert_eq!(reference.reference_name().as_deref(), Some("Map"));
    assert_eq!(reference.type_arguments().unwrap().types().count(), 2);
}

#[test]
fn type_or_package_reference() {
    let factory = ElementFactory::new();
    let reference = factory.type_or_package_reference("java.util").unwrap();
    assert_eq!(reference.qualified_name(), "java.util");
}

#[test]
fn type_elements() {
    let factory = ElementFactory::new();
    let array = factory.type_element("int[]").unwrap();
    assert!(matches!(*array, TypeElement::Array(_)));

    let class = factory
        .type_element_for(&TypeDescriptor::presentable("List<String>"))
        .unwrap();
    assert!(matches!(*class, TypeElement::Class(_)));
    assert_eq!(class.text(), "List<String>");
}

#[test]
fn expression_and_statement() {
    let factory = ElementFactory::new();
    let e = factory.expression("a + b * c").unwrap();
    let Expr::Binary(binary) = &*e else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.operator().unwrap().text(), "+");

    let s = factory.statement("foo bar").unwrap();
    assert!(matches!(*s, Statement::Application(_)));

    let t = factory.top_statement("package a.b").unwrap();
    assert!(matches!(*t, TopStatement::Package(_)));

    let r = factory.reference_expression("a?.b").unwrap();
    assert_eq!(r.reference_name().as_deref(), Some("b"));
}

#[test]
fn command_call_is_not_an_expression() {
    let factory = ElementFactory::new();
    let err = factory.expression("foo bar").unwrap_err();
    assert!(matches!(
        err,
        SynthError::UnexpectedShape {
            origin: TextOrigin::Caller,
            found: Some(SyntaxKind::ApplicationStatement),
            ..
        }
    ));
    assert!(err.is_caller_fault());
}

#[test]
fn malformed_expression_is_rejected() {
    let factory = ElementFactory::new();
    let err = factory.expression("a +").unwrap_err();
    let SynthError::ParseRejected {
        origin, failure, ..
    } = &err
    else {
        panic!("expected a parse rejection, got {err:?}");
    };
    assert_eq!(*origin, TextOrigin::Caller);
    assert!(matches!(failure, ParseFailure::Syntax(d) if d.has_errors()));
    assert!(err.is_caller_fault());
}

#[test]
fn closure() {
    let factory = ElementFactory::new();
    let closure = factory.closure("{ it * 2 }").unwrap();
    assert_eq!(closure.syntax().kind(), SyntaxKind::ClosableBlock);
    assert_eq!(closure.statements().count(), 1);

    let closure = factory.closure("{ a, b -> a + b }").unwrap();
    assert_eq!(closure.parameters().len(), 2);
}

#[test]
fn non_closure_text_has_wrong_shape() {
    let factory = ElementFactory::new();
    let err = factory.closure("foo").unwrap_err();
    insta::assert_snapshot!(err, @"caller-supplied text `foo` has no leading ClosableBlock, found ReferenceExpression");
}

#[test]
fn imports() {
    let factory = ElementFactory::new();
    let import = factory.import("x.y.List", false, true, None).unwrap();
    assert_eq!(import.text(), "import x.y.List.*");
    assert!(import.is_on_demand());
    assert!(!import.is_static());
    assert!(import.alias_name().is_none());
    assert_eq!(import.qualified_name().as_deref(), Some("x.y.List"));

    let import = factory
        .import("java.lang.Math.max", true, false, Some("mx"))
        .unwrap();
    assert!(import.is_static());
    assert_eq!(import.alias_name().unwrap().text(), "mx");

    let import = factory.import_from_text("import a.B as C").unwrap();
    assert_eq!(import.alias_name().unwrap().text(), "C");
}

#[test]
fn package_reference() {
    let factory = ElementFactory::new();
    let reference = factory.package_reference("org.example.app").unwrap();
    assert_eq!(reference.qualified_name(), "org.example.app");
}

#[test]
fn argument_lists() {
    let factory = ElementFactory::new();
    let list = factory.argument_list(&[expr("a"), expr("b")]).unwrap();
    let texts: Vec<String> = list.expressions().map(|e| e.text()).collect();
    assert_eq!(texts, ["a", "b"]);
    assert_eq!(list.text(), "(a, b)");

    let empty = factory.argument_list(&[]).unwrap();
    assert_eq!(empty.expressions().count(), 0);
    assert_eq!(empty.text(), "()");
}

#[test]
fn method_calls() {
    let factory = ElementFactory::new();
    let call = factory.method_call("list.add", &[expr("1")]).unwrap();
    assert_eq!(call.callee().unwrap().text(), "list.add");
    assert_eq!(call.arguments().len(), 1);

    let Statement::Application(app) = statement("println x, ((y))") else {
        panic!("expected a command call");
    };
    let call = factory.method_call_from_application(&app).unwrap();
    assert_eq!(call.text(), "println(x, y)");

    assert!(matches!(
        factory.method_call(" ", &[]),
        Err(SynthError::EmptyInput { what: "callee" })
    ));
}

#[test]
fn parenthesized() {
    let factory = ElementFactory::new();
    let paren = factory.parenthesized(&expr("a + b")).unwrap();
    assert_eq!(paren.text(), "(a + b)");
    assert!(matches!(paren.inner(), Some(Expr::Binary(_))));
}

#[test]
fn block_statement() {
    let factory = ElementFactory::new();
    let block = factory
        .block_statement(&[statement("x = 1"), statement("println x")])
        .unwrap();
    let statements: Vec<Statement> = block.block().unwrap().statements().collect();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].text(), "x = 1");
    assert!(matches!(statements[1], Statement::Application(_)));
}

#[test]
fn string_literals_round_trip() {
    let factory = ElementFactory::new();
    for content in ["plain", "", "it's", r"C:\dir", "two\nlines", "tab\there"] {
        let literal = factory.string_literal(content).unwrap();
        assert_eq!(literal.kind(), SyntaxKind::StringLiteral);
        assert_eq!(unescape_string_literal(literal.text()).as_deref(), Some(content));
    }
}

#[test]
fn names_and_tokens() {
    let factory = ElementFactory::new();
    let name = factory.reference_name("size").unwrap();
    assert_eq!((name.kind(), name.text()), (SyntaxKind::Id, "size"));

    let member = factory.doc_member_reference_name("run").unwrap();
    assert_eq!(member.text(), "run");

    let modifier = factory.modifier("static").unwrap();
    assert_eq!(modifier.kind(), SyntaxKind::KwStatic);

    let dot = factory.dot_token("?.").unwrap();
    assert_eq!(dot.kind(), SyntaxKind::SafeDot);

    assert!(matches!(
        factory.modifier("fancy"),
        Err(SynthError::UnsupportedConstruct { .. })
    ));
}

#[test]
fn trivia_tokens() {
    let factory = ElementFactory::new();
    let space = factory.whitespace().unwrap();
    assert_eq!((space.kind(), space.text()), (SyntaxKind::Whitespace, " "));

    assert_eq!(factory.line_terminator(0).unwrap().text(), "\n");
    assert_eq!(factory.line_terminator(1).unwrap().text(), "\n");
    let three = factory.line_terminator(3).unwrap();
    assert_eq!((three.kind(), three.text()), (SyntaxKind::Newline, "\n\n\n"));

    let err = factory.line_terminator(usize::MAX).unwrap_err();
    assert!(matches!(err, SynthError::UnsupportedConstruct { .. }));
    assert!(err.is_caller_fault());
}

#[test]
fn methods_and_bodies() {
    let factory = ElementFactory::new();
    let method = factory.method("def foo(a) { a }").unwrap();
    assert_eq!(method.name().unwrap().text(), "foo");
    assert_eq!(method.parameters().len(), 1);

    let err = factory.method("x = 1").unwrap_err();
    assert!(matches!(err, SynthError::UnexpectedShape { .. }));

    let body = factory.method_body("return 1").unwrap();
    assert!(matches!(body.statements().next(), Some(Statement::Return(_))));
}

#[test]
fn type_definitions() {
    let factory = ElementFactory::new();
    let class = factory.type_definition("class A { int x }").unwrap();
    assert_eq!(class.name().unwrap().text(), "A");

    let err = factory.type_definition("class A {}\nclass B {}").unwrap_err();
    assert!(matches!(
        err,
        SynthError::UnexpectedShape {
            found: Some(SyntaxKind::TypeDefinition),
            ..
        }
    ));

    let err = factory.type_definition("def x").unwrap_err();
    assert!(matches!(err, SynthError::UnexpectedShape { found: None, .. }));
}

#[test]
fn raw_fragments() {
    let factory = ElementFactory::new();
    let node = factory
        .raw_fragment("x = 1", SyntaxKind::AssignmentExpression)
        .unwrap();
    assert_eq!(node.kind(), SyntaxKind::AssignmentExpression);

    let err = factory.raw_fragment("x", SyntaxKind::Id).unwrap_err();
    assert!(matches!(err, SynthError::UnsupportedConstruct { .. }));
}

#[test]
fn whole_file() {
    let factory = ElementFactory::new();
    let file = factory.file("a\nb", true, None).unwrap();
    assert!(file.is_physical());
    assert_eq!(file.statements().count(), 2);
}

#[test]
fn unit_names_do_not_collide() {
    let factory = ElementFactory::with_config(FactoryConfig::default().with_unit_prefix("tmp_"));
    let first = factory.whitespace().unwrap();
    let second = factory.whitespace().unwrap();
    assert_eq!(first.unit().as_str(), "tmp_0.groovy");
    assert_eq!(second.unit().as_str(), "tmp_1.groovy");
    assert!(!first.is_physical());
}

#[test]
fn physical_units_on_request() {
    let factory = ElementFactory::with_config(FactoryConfig::default().with_physical(true));
    assert!(factory.whitespace().unwrap().is_physical());
}

#[test]
fn recursion_limit_rejects_the_unit() {
    let factory = ElementFactory::with_config(FactoryConfig::default().with_recursion_fuel(Some(4)));
    let err = factory.expression("((((((a))))))").unwrap_err();
    assert!(matches!(
        err,
        SynthError::ParseRejected {
            failure: ParseFailure::Fatal(groovy_syntax::Error::RecursionLimitExceeded),
            ..
        }
    ));
}

#[test]
fn synthesize_dispatches_requests() {
    let factory = ElementFactory::new();

    let import = factory
        .synthesize(&ConstructionRequest::Import {
            qualified_name: "a.B".to_string(),
            is_static: false,
            is_on_demand: false,
            alias: None,
        })
        .unwrap();
    assert_eq!(import.kind(), SyntaxKind::ImportStatement);

    let newline = factory
        .synthesize(&ConstructionRequest::LineTerminator { count: 2 })
        .unwrap();
    let NodeOrToken::Token(token) = newline.node() else {
        panic!("expected a token");
    };
    assert_eq!(token.text(), "\n\n");

    let ty = factory
        .synthesize(&ConstructionRequest::TypeElement(TypeSource::Text("int".to_string())))
        .unwrap();
    assert_eq!(ty.kind(), SyntaxKind::PrimitiveTypeElement);

    let err = factory
        .synthesize(&ConstructionRequest::VariableDeclaration {
            modifiers: vec![],
            ty: None,
            names: vec![],
            initializer: None,
        })
        .unwrap_err();
    assert!(err.is_caller_fault());
}

/// Parses every unit as the same fixed text, whatever it was asked for.
struct FixedGrammar(&'static str);

impl Grammar for FixedGrammar {
    fn parse(
        &self,
        _text: &str,
        _unit: &UnitName,
        _physical: bool,
    ) -> Result<SourceFile, ParseFailure> {
        Ok(groovy_syntax::parse(self.0)?.root)
    }
}

#[test]
fn rendered_shape_mismatch_is_a_renderer_defect() {
    let factory = ElementFactory::with_grammar(FixedGrammar("foo"), FactoryConfig::default());
    let err = factory.argument_list(&[]).unwrap_err();
    assert!(matches!(
        &err,
        SynthError::UnexpectedShape {
            origin: TextOrigin::Rendered,
            expected: Step::First(Shape::Kind(SyntaxKind::MethodCallExpression)),
            ..
        }
    ));
    assert!(!err.is_caller_fault());
}
