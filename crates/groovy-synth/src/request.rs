//! Construction requests: one variant per construct category.

use groovy_syntax::SyntaxKind;
use groovy_syntax::SyntaxNode;
use groovy_syntax::ast::{ApplicationStatement, Expr, Statement};

use crate::text::TypeDescriptor;

/// Initial value of a declared variable.
///
/// Command calls (`foo a, b`) are not expressions, so they get their own
/// variant and are rewritten to call syntax before embedding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Initializer {
    Expr(Expr),
    Application(ApplicationStatement),
}

impl Initializer {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match ApplicationStatement::cast(node.clone()) {
            Some(app) => Some(Initializer::Application(app)),
            None => Expr::cast(node).map(Initializer::Expr),
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Initializer::Expr(e) => e.syntax(),
            Initializer::Application(a) => a.syntax(),
        }
    }
}

impl From<Expr> for Initializer {
    fn from(expr: Expr) -> Self {
        Initializer::Expr(expr)
    }
}

impl From<ApplicationStatement> for Initializer {
    fn from(app: ApplicationStatement) -> Self {
        Initializer::Application(app)
    }
}

/// Type of a type element request: free text or a resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSource {
    Text(String),
    Descriptor(TypeDescriptor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionRequest {
    VariableDeclaration {
        modifiers: Vec<String>,
        ty: Option<TypeDescriptor>,
        names: Vec<String>,
        initializer: Option<Initializer>,
    },
    /// Same as a variable declaration, placed in the body of a throwaway class.
    FieldDeclaration {
        modifiers: Vec<String>,
        ty: Option<TypeDescriptor>,
        names: Vec<String>,
        initializer: Option<Initializer>,
    },
    Parameter {
        name: String,
        type_text: Option<String>,
        context: Option<SyntaxNode>,
    },
    TypeReference {
        qualified_name: String,
    },
    TypeElement(TypeSource),
    MethodCall {
        callee: String,
        arguments: Vec<Expr>,
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
    BlockStatement {
        statements: Vec<Statement>,
    },
    ArgumentList {
        expressions: Vec<Expr>,
    },
    StringLiteral {
        content: String,
    },
    Modifier {
        name: String,
    },
    PackageReference {
        qualified_name: String,
    },
    LineTerminator {
        count: usize,
    },
    Whitespace,
    /// Caller text expected to parse into one leading node of `expected` kind.
    RawFragment {
        text: String,
        expected: SyntaxKind,
    },
}

impl ConstructionRequest {
    /// Short category name, used in logs and errors.
    pub fn category(&self) -> &'static str {
        match self {
            ConstructionRequest::VariableDeclaration { .. } => "variable declaration",
            ConstructionRequest::FieldDeclaration { .. } => "field declaration",
            ConstructionRequest::Parameter { .. } => "parameter",
            ConstructionRequest::TypeReference { .. } => "type reference",
            ConstructionRequest::TypeElement(_) => "type element",
            ConstructionRequest::MethodCall { .. } => "method call",
            ConstructionRequest::Closure { .. } => "closure",
            ConstructionRequest::Import { .. } => "import",
            ConstructionRequest::BlockStatement { .. } => "block statement",
            ConstructionRequest::ArgumentList { .. } => "argument list",
            ConstructionRequest::StringLiteral { .. } => "string literal",
            ConstructionRequest::Modifier { .. } => "modifier",
            ConstructionRequest::PackageReference { .. } => "package reference",
            ConstructionRequest::LineTerminator { .. } => "line terminator",
            ConstructionRequest::Whitespace => "whitespace",
            ConstructionRequest::RawFragment { .. } => "raw fragment",
        }
    }
}
