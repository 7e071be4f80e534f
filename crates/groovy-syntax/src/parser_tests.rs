use indoc::indoc;

use crate::ast::SourceFile;
use crate::diagnostics::DiagnosticKind;
use crate::lexer::lex;
use crate::{Error, Parser};

fn diagnostic_kinds(src: &str) -> Vec<DiagnosticKind> {
    let parsed = crate::parse(src).expect("fuel exhausted");
    assert_eq!(parsed.root.text(), src);
    parsed.diagnostics.iter().map(|d| d.kind()).collect()
}

#[test]
fn variable_declaration() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("def x = 1"), @r#"
    SourceFile
      VariableDeclaration
        Modifiers
          KwDef "def"
        Variable
          Id "x"
          Eq "="
          Literal
            IntLiteral "1"
    "#);
}

#[test]
fn typed_declaration_with_several_variables() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("final int a, b = 2"), @r#"
    SourceFile
      VariableDeclaration
        Modifiers
          KwFinal "final"
        PrimitiveTypeElement
          KwInt "int"
        Variable
          Id "a"
        Comma ","
        Variable
          Id "b"
          Eq "="
          Literal
            IntLiteral "2"
    "#);
}

#[test]
fn capitalized_type_starts_declaration() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("java.util.List<String>[] xs"), @r#"
    SourceFile
      VariableDeclaration
        Modifiers
        ArrayTypeElement
          ClassTypeElement
            CodeReference
              Id "java"
              Dot "."
              Id "util"
              Dot "."
              Id "List"
              TypeArgumentList
                Lt "<"
                ClassTypeElement
                  CodeReference
                    Id "String"
                Gt ">"
          BracketOpen "["
          BracketClose "]"
        Variable
          Id "xs"
    "#);
}

#[test]
fn lowercase_type_is_a_command_call() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("foo bar"), @r#"
    SourceFile
      ApplicationStatement
        ReferenceExpression
          Id "foo"
        CommandArguments
          ReferenceExpression
            Id "bar"
    "#);
}

#[test]
fn method_definition() {
    let input = indoc! {r#"
    def foo(String a, b = 2) {
      println a
    }
    "#};

    insta::assert_snapshot!(SourceFile::expect_valid_cst(input), @r#"
    SourceFile
      MethodDefinition
        Modifiers
          KwDef "def"
        Id "foo"
        ParameterList
          ParenOpen "("
          Parameter
            Modifiers
            ClassTypeElement
              CodeReference
                Id "String"
            Id "a"
          Comma ","
          Parameter
            Modifiers
            Id "b"
            Eq "="
            Literal
              IntLiteral "2"
          ParenClose ")"
        OpenBlock
          BraceOpen "{"
          ApplicationStatement
            ReferenceExpression
              Id "println"
            CommandArguments
              ReferenceExpression
                Id "a"
          BraceClose "}"
    "#);
}

#[test]
fn class_definition() {
    let input = indoc! {r#"
    class A extends B implements C, D {
      private int x = 1
      def foo() {}
    }
    "#};

    insta::assert_snapshot!(SourceFile::expect_valid_cst(input), @r#"
    SourceFile
      TypeDefinition
        Modifiers
        KwClass "class"
        Id "A"
        ExtendsClause
          KwExtends "extends"
          ClassTypeElement
            CodeReference
              Id "B"
        ImplementsClause
          KwImplements "implements"
          ClassTypeElement
            CodeReference
              Id "C"
          Comma ","
          ClassTypeElement
            CodeReference
              Id "D"
        ClassBody
          BraceOpen "{"
          VariableDeclaration
            Modifiers
              KwPrivate "private"
            PrimitiveTypeElement
              KwInt "int"
            Variable
              Id "x"
              Eq "="
              Literal
                IntLiteral "1"
          MethodDefinition
            Modifiers
              KwDef "def"
            Id "foo"
            ParameterList
              ParenOpen "("
              ParenClose ")"
            OpenBlock
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn package_and_imports() {
    let input = indoc! {r#"
    package a.b
    import static java.util.Collections.sort as s
    import x.y.List.*
    "#};

    insta::assert_snapshot!(SourceFile::expect_valid_cst(input), @r#"
    SourceFile
      PackageDefinition
        KwPackage "package"
        CodeReference
          Id "a"
          Dot "."
          Id "b"
      ImportStatement
        KwImport "import"
        KwStatic "static"
        CodeReference
          Id "java"
          Dot "."
          Id "util"
          Dot "."
          Id "Collections"
          Dot "."
          Id "sort"
        KwAs "as"
        Id "s"
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
fn cast_expression() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("(x.y.Z )x"), @r#"
    SourceFile
      TypeCastExpression
        ParenOpen "("
        ClassTypeElement
          CodeReference
            Id "x"
            Dot "."
            Id "y"
            Dot "."
            Id "Z"
        ParenClose ")"
        ReferenceExpression
          Id "x"
    "#);
}

#[test]
fn parenthesized_is_not_a_cast() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("(a) + 1"), @r#"
    SourceFile
      BinaryExpression
        ParenthesizedExpression
          ParenOpen "("
          ReferenceExpression
            Id "a"
          ParenClose ")"
        Plus "+"
        Literal
          IntLiteral "1"
    "#);
}

#[test]
fn closure_with_parameters() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("{ a, b -> a + b }"), @r#"
    SourceFile
      ClosableBlock
        BraceOpen "{"
        ParameterList
          Parameter
            Modifiers
            Id "a"
          Comma ","
          Parameter
            Modifiers
            Id "b"
        Arrow "->"
        BinaryExpression
          ReferenceExpression
            Id "a"
          Plus "+"
          ReferenceExpression
            Id "b"
        BraceClose "}"
    "#);
}

#[test]
fn call_with_trailing_closure() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("list.each(1) { it }"), @r#"
    SourceFile
      MethodCallExpression
        ReferenceExpression
          ReferenceExpression
            Id "list"
          Dot "."
          Id "each"
        ArgumentList
          ParenOpen "("
          Literal
            IntLiteral "1"
          ParenClose ")"
        ClosableBlock
          BraceOpen "{"
          ReferenceExpression
            Id "it"
          BraceClose "}"
    "#);
}

#[test]
fn while_body_is_a_block_statement() {
    let input = indoc! {r#"
    while (true) {
    foo()
    }
    "#};

    insta::assert_snapshot!(SourceFile::expect_valid_cst(input), @r#"
    SourceFile
      WhileStatement
        KwWhile "while"
        ParenOpen "("
        Literal
          KwTrue "true"
        ParenClose ")"
        BlockStatement
          OpenBlock
            BraceOpen "{"
            MethodCallExpression
              ReferenceExpression
                Id "foo"
              ArgumentList
                ParenOpen "("
                ParenClose ")"
            BraceClose "}"
    "#);
}

#[test]
fn if_else() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("if (a) return 1 else b = 2"), @r#"
    SourceFile
      IfStatement
        KwIf "if"
        ParenOpen "("
        ReferenceExpression
          Id "a"
        ParenClose ")"
        ReturnStatement
          KwReturn "return"
          Literal
            IntLiteral "1"
        KwElse "else"
        AssignmentExpression
          ReferenceExpression
            Id "b"
          Eq "="
          Literal
            IntLiteral "2"
    "#);
}

#[test]
fn newline_ends_expression() {
    let input = indoc! {r#"
    a
    -1
    "#};

    insta::assert_snapshot!(SourceFile::expect_valid_cst(input), @r#"
    SourceFile
      ReferenceExpression
        Id "a"
      UnaryExpression
        Minus "-"
        Literal
          IntLiteral "1"
    "#);
}

#[test]
fn precedence_and_associativity() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("x = y = a + b * c"), @r#"
    SourceFile
      AssignmentExpression
        ReferenceExpression
          Id "x"
        Eq "="
        AssignmentExpression
          ReferenceExpression
            Id "y"
          Eq "="
          BinaryExpression
            ReferenceExpression
              Id "a"
            Plus "+"
            BinaryExpression
              ReferenceExpression
                Id "b"
              Star "*"
              ReferenceExpression
                Id "c"
    "#);
}

#[test]
fn string_member_name() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst("a.'my name'"), @r#"
    SourceFile
      ReferenceExpression
        ReferenceExpression
          Id "a"
        Dot "."
        StringLiteral "'my name'"
    "#);
}

#[test]
fn doc_comment_expands() {
    let input = indoc! {r#"
    /** @see A#foo */
    x
    "#};

    insta::assert_snapshot!(SourceFile::expect_valid_cst(input), @r##"
    SourceFile
      DocComment
        DocCommentStart "/**"
        DocTag
          DocTagName "@see"
          DocMemberReference
            Id "A"
            Hash "#"
            Id "foo"
        DocCommentEnd "*/"
      ReferenceExpression
        Id "x"
    "##);
}

#[test]
fn trivia_is_kept() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst_full("a // c\n"), @r#"
    SourceFile
      ReferenceExpression
        Id "a"
      Whitespace " "
      LineComment "// c"
      Newline "\n"
    "#);
}

#[test]
fn tree_is_lossless() {
    let input = indoc! {r#"
    package p

    /** docs */
    class A {
      def m(int x) { while (x) { x = x - 1 } }
    }
    println 'done', 2
    "#};

    let root = SourceFile::expect_valid(input);
    assert_eq!(root.text(), input);
}

#[test]
fn empty_and_blank_sources() {
    insta::assert_snapshot!(SourceFile::expect_valid_cst(""), @"SourceFile");
    insta::assert_snapshot!(SourceFile::expect_valid_cst_full(" "), @r#"
    SourceFile
      Whitespace " "
    "#);
}

#[test]
fn unclosed_paren() {
    assert_eq!(diagnostic_kinds("foo(1"), vec![DiagnosticKind::UnclosedParen]);
}

#[test]
fn missing_variable_name() {
    assert_eq!(
        diagnostic_kinds("def = 1")[0],
        DiagnosticKind::ExpectedName
    );
}

#[test]
fn missing_initializer() {
    assert_eq!(
        diagnostic_kinds("x ="),
        vec![DiagnosticKind::ExpectedExpression]
    );
}

#[test]
fn tokens_after_statement() {
    assert_eq!(
        diagnostic_kinds("a b c"),
        vec![DiagnosticKind::ExpectedStatementEnd]
    );
}

#[test]
fn statement_in_class_body() {
    assert_eq!(
        diagnostic_kinds("class A {\n  println 1\n}"),
        vec![DiagnosticKind::ExpectedMember]
    );
}

#[test]
fn unknown_characters() {
    assert_eq!(
        diagnostic_kinds("a\n§\nb"),
        vec![DiagnosticKind::UnknownCharacters]
    );
}

#[test]
fn stray_closing_brace() {
    let kinds = diagnostic_kinds("}");
    assert_eq!(kinds, vec![DiagnosticKind::ExpectedExpression]);
}

#[test]
fn recursion_limit() {
    let src = "((((((((((1))))))))))";
    let result = Parser::new(src, lex(src)).with_recursion_fuel(Some(8)).parse();
    assert_eq!(result.err(), Some(Error::RecursionLimitExceeded));
}

#[test]
fn exec_fuel() {
    let src = "a b c d e";
    let result = Parser::new(src, lex(src)).with_exec_fuel(Some(3)).parse();
    assert_eq!(result.err(), Some(Error::ExecFuelExhausted));
}

#[test]
fn exec_fuel_is_reported() {
    let src = "a";
    let result = Parser::new(src, lex(src))
        .with_exec_fuel(Some(10))
        .parse()
        .unwrap();
    assert_eq!(result.exec_fuel_consumed, 1);
}
