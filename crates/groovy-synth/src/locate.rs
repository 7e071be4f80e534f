//! Node locator: walks a fixed structural path from a unit root.
//!
//! Every step is checked as it is taken, so a scaffold that parsed into an
//! unexpected tree stops at the first step that cannot be satisfied instead
//! of handing back a node of the wrong kind.

use groovy_syntax::ast::{Expr, Statement, TopStatement};
use groovy_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::NodeOrToken;

/// Category a located node must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Kind(SyntaxKind),
    Expr,
    Statement,
    TopStatement,
    TypeElement,
}

impl Shape {
    pub fn accepts(self, node: &SyntaxNode) -> bool {
        match self {
            Shape::Kind(kind) => node.kind() == kind,
            Shape::Expr => Expr::cast(node.clone()).is_some(),
            Shape::Statement => Statement::cast(node.clone()).is_some(),
            Shape::TopStatement => TopStatement::cast(node.clone()).is_some(),
            Shape::TypeElement => node.kind().is_type_element(),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Kind(kind) => write!(f, "{kind:?}"),
            Shape::Expr => write!(f, "expression"),
            Shape::Statement => write!(f, "statement"),
            Shape::TopStatement => write!(f, "top-level statement"),
            Shape::TypeElement => write!(f, "type element"),
        }
    }
}

/// One move down the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// The first non-trivia child node, which must have the shape.
    First(Shape),
    /// The first child node with the shape.
    Child(Shape),
    /// The first child token of the kind.
    Token(SyntaxKind),
    /// The last identifier, keyword or string literal token: the name of a reference.
    Name,
    /// The first non-trivia token, which must be a modifier keyword.
    Modifier,
    /// The identifier after `#` in a doc member reference.
    MemberName,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::First(shape) => write!(f, "leading {shape}"),
            Step::Child(shape) => write!(f, "{shape} child"),
            Step::Token(kind) => write!(f, "{kind:?} token"),
            Step::Name => write!(f, "reference name"),
            Step::Modifier => write!(f, "modifier keyword"),
            Step::MemberName => write!(f, "member name after `#`"),
        }
    }
}

/// Where a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub step: Step,
    /// Kind of the element the step landed on, if it landed anywhere.
    pub found: Option<SyntaxKind>,
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    node.children_with_tokens().filter_map(|it| it.into_token())
}

fn is_name(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Id || kind == SyntaxKind::StringLiteral || kind.is_keyword()
}

impl Step {
    /// Takes this step from `node`.
    pub fn take(self, node: &SyntaxNode) -> Result<SyntaxElement, Mismatch> {
        let miss = |found: Option<SyntaxKind>| Mismatch { step: self, found };
        match self {
            Step::First(shape) => {
                let first = node.children().find(|n| !n.kind().is_trivia());
                match first {
                    Some(n) if shape.accepts(&n) => Ok(n.into()),
                    other => Err(miss(other.map(|n| n.kind()))),
                }
            }
            Step::Child(shape) => node
                .children()
                .find(|n| shape.accepts(n))
                .map(SyntaxElement::from)
                .ok_or(miss(None)),
            Step::Token(kind) => tokens(node)
                .find(|t| t.kind() == kind)
                .map(SyntaxElement::from)
                .ok_or(miss(None)),
            Step::Name => tokens(node)
                .filter(|t| is_name(t.kind()))
                .last()
                .map(SyntaxElement::from)
                .ok_or(miss(None)),
            Step::Modifier => match tokens(node).find(|t| !t.kind().is_trivia()) {
                Some(t) if t.kind().is_modifier() => Ok(t.into()),
                other => Err(miss(other.map(|t| t.kind()))),
            },
            Step::MemberName => tokens(node)
                .skip_while(|t| t.kind() != SyntaxKind::Hash)
                .find(|t| t.kind() == SyntaxKind::Id)
                .map(SyntaxElement::from)
                .ok_or(miss(None)),
        }
    }
}

/// Follows `path` from `root`. An empty path yields the root itself.
pub fn locate(root: &SyntaxNode, path: &[Step]) -> Result<SyntaxElement, Mismatch> {
    let mut current = SyntaxElement::from(root.clone());
    for (i, step) in path.iter().enumerate() {
        let node = match &current {
            NodeOrToken::Node(node) => node.clone(),
            NodeOrToken::Token(token) => {
                return Err(Mismatch {
                    step: *step,
                    found: Some(token.kind()),
                });
            }
        };
        current = step.take(&node)?;
        log::trace!("step {i} ({step}) landed on {:?}", current.kind());
    }
    Ok(current)
}
