//! Build one fragment and print its tree.

use groovy_syntax::ast::Expr;
use groovy_syntax::{CstPrinter, SyntaxElement};
use groovy_synth::{
    ConstructionRequest, ElementFactory, Initializer, ParseFailure, Result, SynthError,
    Synthesized, TypeDescriptor, TypeSource,
};

/// A request as typed on the command line. Expression and statement
/// operands are still text; they are parsed by the factory first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthInput {
    Declaration {
        field: bool,
        modifiers: Vec<String>,
        ty: Option<String>,
        names: Vec<String>,
        init: Option<String>,
    },
    Parameter {
        name: String,
        ty: Option<String>,
    },
    TypeReference {
        qualified_name: String,
    },
    TypeElement {
        text: String,
    },
    Call {
        callee: String,
        arguments: Vec<String>,
    },
    Closure {
        text: String,
    },
    Import {
        qualified_name: String,
        is_static: bool,
        is_on_demand: bool,
        alias: Option<String>,
    },
    Package {
        qualified_name: String,
    },
    Block {
        statements: Vec<String>,
    },
    Arguments {
        expressions: Vec<String>,
    },
    StringLiteral {
        content: String,
    },
    Modifier {
        name: String,
    },
    Newline {
        count: usize,
    },
    Space,
}

pub struct SynthArgs {
    pub input: SynthInput,
    pub trivia: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: SynthArgs) {
    let factory = ElementFactory::new();

    let synthesized = build_request(&factory, &args.input)
        .and_then(|request| factory.synthesize(&request));

    match synthesized {
        Ok(element) => print!("{}", render(&element, args.trivia, args.spans)),
        Err(err) => {
            report(&err, args.color);
            std::process::exit(if err.is_caller_fault() { 1 } else { 2 });
        }
    }
}

pub fn render(element: &Synthesized<SyntaxElement>, trivia: bool, spans: bool) -> String {
    log::info!("extracted from {}", element.unit());
    CstPrinter::new(element.node().clone())
        .with_trivia(trivia)
        .with_spans(spans)
        .dump()
}

fn report(err: &SynthError, color: bool) {
    eprintln!("error: {err}");
    if let SynthError::ParseRejected {
        text,
        failure: ParseFailure::Syntax(diagnostics),
        ..
    } = err
    {
        eprint!(
            "{}",
            diagnostics
                .printer(text)
                .path("<scaffold>")
                .colored(color)
                .render()
        );
    }
}

/// Turns command-line text into a request, parsing operands with `factory`.
pub fn build_request(factory: &ElementFactory, input: &SynthInput) -> Result<ConstructionRequest> {
    let request = match input {
        SynthInput::Declaration {
            field,
            modifiers,
            ty,
            names,
            init,
        } => {
            let ty = ty.as_deref().map(TypeDescriptor::canonical);
            let initializer = init
                .as_deref()
                .map(|text| initializer(factory, text))
                .transpose()?;
            let (modifiers, names) = (modifiers.clone(), names.clone());
            if *field {
                ConstructionRequest::FieldDeclaration {
                    modifiers,
                    ty,
                    names,
                    initializer,
                }
            } else {
                ConstructionRequest::VariableDeclaration {
                    modifiers,
                    ty,
                    names,
                    initializer,
                }
            }
        }
        SynthInput::Parameter { name, ty } => ConstructionRequest::Parameter {
            name: name.clone(),
            type_text: ty.clone(),
            context: None,
        },
        SynthInput::TypeReference { qualified_name } => ConstructionRequest::TypeReference {
            qualified_name: qualified_name.clone(),
        },
        SynthInput::TypeElement { text } => {
            ConstructionRequest::TypeElement(TypeSource::Text(text.clone()))
        }
        SynthInput::Call { callee, arguments } => ConstructionRequest::MethodCall {
            callee: callee.clone(),
            arguments: expressions(factory, arguments)?,
        },
        SynthInput::Closure { text } => ConstructionRequest::Closure { text: text.clone() },
        SynthInput::Import {
            qualified_name,
            is_static,
            is_on_demand,
            alias,
        } => ConstructionRequest::Import {
            qualified_name: qualified_name.clone(),
            is_static: *is_static,
            is_on_demand: *is_on_demand,
            alias: alias.clone(),
        },
        SynthInput::Package { qualified_name } => ConstructionRequest::PackageReference {
            qualified_name: qualified_name.clone(),
        },
        SynthInput::Block { statements } => ConstructionRequest::BlockStatement {
            statements: statements
                .iter()
                .map(|text| factory.statement(text).map(Synthesized::into_inner))
                .collect::<Result<_>>()?,
        },
        SynthInput::Arguments { expressions: texts } => ConstructionRequest::ArgumentList {
            expressions: expressions(factory, texts)?,
        },
        SynthInput::StringLiteral { content } => ConstructionRequest::StringLiteral {
            content: content.clone(),
        },
        SynthInput::Modifier { name } => ConstructionRequest::Modifier { name: name.clone() },
        SynthInput::Newline { count } => ConstructionRequest::LineTerminator { count: *count },
        SynthInput::Space => ConstructionRequest::Whitespace,
    };
    log::debug!("built {} request", request.category());
    Ok(request)
}

fn expressions(factory: &ElementFactory, texts: &[String]) -> Result<Vec<Expr>> {
    texts
        .iter()
        .map(|text| factory.expression(text).map(Synthesized::into_inner))
        .collect()
}

/// An initializer may be an expression or a command call (`foo a, b`).
fn initializer(factory: &ElementFactory, text: &str) -> Result<Initializer> {
    let statement = factory.statement(text)?;
    Initializer::cast(statement.syntax().clone()).ok_or_else(|| SynthError::UnsupportedConstruct {
        construct: "initializer",
        reason: format!("`{text}` is neither an expression nor a command call"),
    })
}
