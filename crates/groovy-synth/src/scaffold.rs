//! Scaffold renderer.
//!
//! Each construct gets the smallest source text that forces the parser into
//! the production for it, paired with the path that leads from the unit root
//! to the construct. Bare type names are ambiguous as statements, so types
//! are embedded in a cast or a `def` declaration; modifiers ride on a method;
//! names hang off a qualified reference.

use groovy_syntax::SyntaxKind;
use groovy_syntax::ast::{ApplicationStatement, Expr, Statement};
use groovy_syntax::single_token;

use crate::error::{Result, SynthError, TextOrigin};
use crate::locate::{Shape, Step};
use crate::request::Initializer;
use crate::text::{
    DEF_MARKER, TypeDescriptor, application_call_text, escape_string_literal, initializer_text,
    join_expressions, join_identifiers, join_modifiers, needs_def_marker,
};

use SyntaxKind::*;

/// Source text for one ephemeral unit and the path to the target inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub text: String,
    pub origin: TextOrigin,
    pub path: Vec<Step>,
}

impl Scaffold {
    fn new(text: impl Into<String>, origin: TextOrigin, path: &[Step]) -> Self {
        Self {
            text: text.into(),
            origin,
            path: path.to_vec(),
        }
    }

    /// Caller text parsed as it is.
    pub fn raw(text: &str, path: &[Step]) -> Self {
        Self::new(text, TextOrigin::Caller, path)
    }
}

fn require<'a>(value: &'a str, what: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SynthError::EmptyInput { what });
    }
    Ok(trimmed)
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

const FIRST_REFERENCE: Step = Step::First(Shape::Kind(ReferenceExpression));
const FIRST_DECLARATION: Step = Step::First(Shape::Kind(VariableDeclaration));
const FIRST_METHOD: Step = Step::First(Shape::Kind(MethodDefinition));
const FIRST_CALL: Step = Step::First(Shape::Kind(MethodCallExpression));

/// `a.<name>`
pub fn reference_name(name: &str) -> Result<Scaffold> {
    let name = require(name, "reference name")?;
    Ok(Scaffold::new(
        format!("a.{name}"),
        TextOrigin::Caller,
        &[FIRST_REFERENCE, Step::Name],
    ))
}

/// `a.'<escaped content>'`
pub fn string_literal(content: &str) -> Scaffold {
    Scaffold::new(
        format!("a.{}", escape_string_literal(content)),
        TextOrigin::Rendered,
        &[FIRST_REFERENCE, Step::Token(StringLiteral)],
    )
}

/// `/** @see A#<id> */`
pub fn doc_member_reference_name(id: &str) -> Result<Scaffold> {
    let id = require(id, "member name")?;
    Ok(Scaffold::new(
        format!("/** @see A#{id} */"),
        TextOrigin::Caller,
        &[
            Step::Child(Shape::Kind(DocComment)),
            Step::Child(Shape::Kind(DocTag)),
            Step::Child(Shape::Kind(DocMemberReference)),
            Step::MemberName,
        ],
    ))
}

/// `(<text> )x`: a cast is the one place a bare type is never read as an expression.
pub fn type_reference(text: &str) -> Result<Scaffold> {
    let text = require(text, "type reference")?;
    Ok(Scaffold::new(
        format!("({text} )x"),
        TextOrigin::Caller,
        &[
            Step::First(Shape::Kind(TypeCastExpression)),
            Step::Child(Shape::Kind(ClassTypeElement)),
            Step::Child(Shape::Kind(CodeReference)),
        ],
    ))
}

/// `def <qualified name> i`
pub fn type_or_package_reference(qualified_name: &str) -> Result<Scaffold> {
    let qualified_name = require(qualified_name, "qualified name")?;
    Ok(Scaffold::new(
        format!("{DEF_MARKER} {qualified_name} i"),
        TextOrigin::Caller,
        &[
            FIRST_DECLARATION,
            Step::Child(Shape::Kind(ClassTypeElement)),
            Step::Child(Shape::Kind(CodeReference)),
        ],
    ))
}

/// `def <text> someVar`
pub fn type_element(text: &str) -> Result<Scaffold> {
    let text = require(text, "type text")?;
    Ok(Scaffold::new(
        format!("{DEF_MARKER} {text} someVar"),
        TextOrigin::Caller,
        &[FIRST_DECLARATION, Step::Child(Shape::TypeElement)],
    ))
}

/// `[modifiers ][def ]<type> <a, b>[ = <initializer>]`
pub fn declaration_text(
    modifiers: &[&str],
    ty: Option<&TypeDescriptor>,
    names: &[&str],
    initializer: Option<&Initializer>,
) -> Result<String> {
    let names = join_identifiers(names)?;

    let mut text = join_modifiers(modifiers);
    if !text.is_empty() {
        text.push(' ');
    }

    let ty = ty
        .map(TypeDescriptor::unboxed)
        .filter(|ty| !ty.text().trim().is_empty());
    match ty {
        Some(ty) => {
            if ty.needs_def_marker() {
                text.push_str(DEF_MARKER);
                text.push(' ');
            }
            text.push_str(ty.text().trim());
            text.push(' ');
        }
        None => {
            text.push_str(DEF_MARKER);
            text.push(' ');
        }
    }

    text.push_str(&names);
    if let Some(initializer) = initializer {
        text.push_str(" = ");
        text.push_str(&initializer_text(initializer));
    }
    Ok(text)
}

pub fn variable_declaration(
    modifiers: &[&str],
    ty: Option<&TypeDescriptor>,
    names: &[&str],
    initializer: Option<&Initializer>,
) -> Result<Scaffold> {
    let text = declaration_text(modifiers, ty, names, initializer)?;
    Ok(Scaffold::new(text, TextOrigin::Caller, &[FIRST_DECLARATION]))
}

const FIRST_FIELD: &[Step] = &[
    Step::First(Shape::Kind(TypeDefinition)),
    Step::Child(Shape::Kind(ClassBody)),
    FIRST_DECLARATION,
];

/// The declaration inside `class A { ... }`.
pub fn field_declaration(
    modifiers: &[&str],
    ty: Option<&TypeDescriptor>,
    names: &[&str],
    initializer: Option<&Initializer>,
) -> Result<Scaffold> {
    let declaration = declaration_text(modifiers, ty, names, initializer)?;
    Ok(Scaffold::new(
        format!("class A {{ {declaration}}}"),
        TextOrigin::Caller,
        FIRST_FIELD,
    ))
}

/// `class A { [def ]<type> <name>}`
pub fn simple_field_declaration(name: &str, type_text: &str) -> Result<Scaffold> {
    let name = require(name, "field name")?;
    let type_text = require(type_text, "type text")?;
    let marker = if needs_def_marker(type_text) {
        "def "
    } else {
        ""
    };
    Ok(Scaffold::new(
        format!("class A {{ {marker}{type_text} {name}}}"),
        TextOrigin::Caller,
        FIRST_FIELD,
    ))
}

/// `def foo(<type> <name>) {}`. A blank type makes an untyped parameter.
pub fn parameter(name: &str, type_text: Option<&str>) -> Result<Scaffold> {
    let name = require(name, "parameter name")?;
    let text = match blank_to_none(type_text) {
        Some(ty) => format!("{DEF_MARKER} foo({ty} {name}) {{}}"),
        None => format!("{DEF_MARKER} foo({name}) {{}}"),
    };
    Ok(Scaffold::new(
        text,
        TextOrigin::Caller,
        &[
            FIRST_METHOD,
            Step::Child(Shape::Kind(ParameterList)),
            Step::First(Shape::Kind(Parameter)),
        ],
    ))
}

/// `import [static ]<name>[.*][ as <alias>]`. A blank alias counts as none.
pub fn import(
    qualified_name: &str,
    is_static: bool,
    is_on_demand: bool,
    alias: Option<&str>,
) -> Result<Scaffold> {
    let qualified_name = require(qualified_name, "imported name")?;
    let mut text = String::from("import ");
    if is_static {
        text.push_str("static ");
    }
    text.push_str(qualified_name);
    if is_on_demand {
        text.push_str(".*");
    }
    if let Some(alias) = blank_to_none(alias) {
        text.push_str(" as ");
        text.push_str(alias);
    }
    Ok(Scaffold::new(text, TextOrigin::Caller, IMPORT_PATH))
}

pub const IMPORT_PATH: &[Step] = &[Step::First(Shape::Kind(ImportStatement))];

/// `package <name>`
pub fn package_reference(qualified_name: &str) -> Result<Scaffold> {
    let qualified_name = require(qualified_name, "package name")?;
    Ok(Scaffold::new(
        format!("package {qualified_name}"),
        TextOrigin::Caller,
        &[
            Step::First(Shape::Kind(PackageDefinition)),
            Step::Child(Shape::Kind(CodeReference)),
        ],
    ))
}

/// `foo(<a>, <b>)`. No expressions make `foo()`.
pub fn argument_list(expressions: &[Expr]) -> Scaffold {
    Scaffold::new(
        format!("foo({})", join_expressions(expressions)),
        TextOrigin::Rendered,
        &[FIRST_CALL, Step::Child(Shape::Kind(ArgumentList))],
    )
}

/// `<callee>(<a>, <b>)`
pub fn method_call(callee: &str, arguments: &[Expr]) -> Result<Scaffold> {
    let callee = require(callee, "callee")?;
    Ok(Scaffold::new(
        format!("{callee}({})", join_expressions(arguments)),
        TextOrigin::Caller,
        &[FIRST_CALL],
    ))
}

/// `foo a, (b)` rewritten to `foo(a, b)`.
pub fn method_call_from_application(app: &ApplicationStatement) -> Result<Scaffold> {
    let text = application_call_text(app).ok_or(SynthError::EmptyInput {
        what: "command call callee",
    })?;
    Ok(Scaffold::new(text, TextOrigin::Rendered, &[FIRST_CALL]))
}

/// `(<expr>)`
pub fn parenthesized(expr: &Expr) -> Scaffold {
    Scaffold::new(
        format!("({})", expr.text()),
        TextOrigin::Rendered,
        &[Step::First(Shape::Kind(ParenthesizedExpression))],
    )
}

/// `while (true) {` with one statement per line, then `}`.
pub fn block_statement(statements: &[Statement]) -> Scaffold {
    let mut text = String::from("while (true) {\n");
    for statement in statements {
        text.push_str(&statement.text());
        text.push('\n');
    }
    text.push('}');
    Scaffold::new(
        text,
        TextOrigin::Rendered,
        &[
            Step::First(Shape::Kind(WhileStatement)),
            Step::Child(Shape::Kind(BlockStatement)),
        ],
    )
}

/// `def foo () {<text>}`
pub fn method_body(text: &str) -> Scaffold {
    Scaffold::new(
        format!("{DEF_MARKER} foo () {{{text}}}"),
        TextOrigin::Caller,
        &[FIRST_METHOD, Step::Child(Shape::Kind(OpenBlock))],
    )
}

/// `<name> def foo () {}`. Only modifier keywords are accepted.
pub fn modifier(name: &str) -> Result<Scaffold> {
    let name = require(name, "modifier")?;
    if !single_token(name).is_some_and(SyntaxKind::is_modifier) {
        return Err(SynthError::UnsupportedConstruct {
            construct: "modifier",
            reason: format!("`{name}` is not a modifier keyword"),
        });
    }
    Ok(Scaffold::new(
        format!("{name} {DEF_MARKER} foo () {{}}"),
        TextOrigin::Rendered,
        &[
            FIRST_METHOD,
            Step::Child(Shape::Kind(Modifiers)),
            Step::Modifier,
        ],
    ))
}

/// `a<dot>b` for `.`, `?.` and `*.`.
pub fn dot_token(dot: &str) -> Result<Scaffold> {
    let dot = require(dot, "dot")?;
    let kind = match single_token(dot) {
        Some(kind @ (Dot | SafeDot | SpreadDot)) => kind,
        _ => {
            return Err(SynthError::UnsupportedConstruct {
                construct: "dot token",
                reason: format!("`{dot}` is not a member access operator"),
            });
        }
    };
    Ok(Scaffold::new(
        format!("a{dot}b"),
        TextOrigin::Rendered,
        &[FIRST_REFERENCE, Step::Token(kind)],
    ))
}

pub fn whitespace() -> Scaffold {
    Scaffold::new(" ", TextOrigin::Rendered, &[Step::Token(Whitespace)])
}

/// Longest newline run a single line terminator token may carry.
pub const MAX_LINE_TERMINATORS: usize = 1024;

/// `count` line breaks; zero still yields one.
pub fn line_terminator(count: usize) -> Result<Scaffold> {
    if count > MAX_LINE_TERMINATORS {
        return Err(SynthError::UnsupportedConstruct {
            construct: "line terminator",
            reason: format!("{count} line breaks exceed the limit of {MAX_LINE_TERMINATORS}"),
        });
    }
    Ok(Scaffold::new(
        "\n".repeat(count.max(1)),
        TextOrigin::Rendered,
        &[Step::Token(Newline)],
    ))
}

/// Caller text that must open with a node of `expected` kind.
pub fn raw_fragment(text: &str, expected: SyntaxKind) -> Result<Scaffold> {
    if expected.is_token() || expected.is_trivia() || expected == SourceFile {
        return Err(SynthError::UnsupportedConstruct {
            construct: "raw fragment",
            reason: format!("{expected:?} is not a statement-level node kind"),
        });
    }
    Ok(Scaffold::raw(text, &[Step::First(Shape::Kind(expected))]))
}
