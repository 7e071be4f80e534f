//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! `cast` never panics: a kind mismatch yields `None`.

use crate::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub const KIND: SyntaxKind = SyntaxKind::$kind;

            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn syntax(&self) -> &SyntaxNode {
                &self.0
            }

            /// Source text covered by the node, trivia included.
            pub fn text(&self) -> String {
                self.0.text().to_string()
            }
        }
    };
}

ast_node!(SourceFile, SourceFile);
ast_node!(PackageDefinition, PackageDefinition);
ast_node!(ImportStatement, ImportStatement);
ast_node!(TypeDefinition, TypeDefinition);
ast_node!(ClassBody, ClassBody);
ast_node!(MethodDefinition, MethodDefinition);
ast_node!(Modifiers, Modifiers);
ast_node!(ParameterList, ParameterList);
ast_node!(Parameter, Parameter);
ast_node!(OpenBlock, OpenBlock);
ast_node!(VariableDeclaration, VariableDeclaration);
ast_node!(Variable, Variable);
ast_node!(ClassTypeElement, ClassTypeElement);
ast_node!(PrimitiveTypeElement, PrimitiveTypeElement);
ast_node!(ArrayTypeElement, ArrayTypeElement);
ast_node!(CodeReference, CodeReference);
ast_node!(TypeArgumentList, TypeArgumentList);
ast_node!(WhileStatement, WhileStatement);
ast_node!(IfStatement, IfStatement);
ast_node!(ReturnStatement, ReturnStatement);
ast_node!(BlockStatement, BlockStatement);
ast_node!(ApplicationStatement, ApplicationStatement);
ast_node!(CommandArguments, CommandArguments);
ast_node!(AssignmentExpression, AssignmentExpression);
ast_node!(BinaryExpression, BinaryExpression);
ast_node!(UnaryExpression, UnaryExpression);
ast_node!(TypeCastExpression, TypeCastExpression);
ast_node!(MethodCallExpression, MethodCallExpression);
ast_node!(ArgumentList, ArgumentList);
ast_node!(ReferenceExpression, ReferenceExpression);
ast_node!(IndexExpression, IndexExpression);
ast_node!(NewExpression, NewExpression);
ast_node!(ListExpression, ListExpression);
ast_node!(ParenthesizedExpression, ParenthesizedExpression);
ast_node!(ClosableBlock, ClosableBlock);
ast_node!(Literal, Literal);
ast_node!(DocComment, DocComment);
ast_node!(DocTag, DocTag);
ast_node!(DocMemberReference, DocMemberReference);

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Assignment(AssignmentExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    TypeCast(TypeCastExpression),
    MethodCall(MethodCallExpression),
    Reference(ReferenceExpression),
    Index(IndexExpression),
    New(NewExpression),
    List(ListExpression),
    Parenthesized(ParenthesizedExpression),
    Closure(ClosableBlock),
    Literal(Literal),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::AssignmentExpression => {
                AssignmentExpression::cast(node).map(Expr::Assignment)
            }
            SyntaxKind::BinaryExpression => BinaryExpression::cast(node).map(Expr::Binary),
            SyntaxKind::UnaryExpression => UnaryExpression::cast(node).map(Expr::Unary),
            SyntaxKind::TypeCastExpression => TypeCastExpression::cast(node).map(Expr::TypeCast),
            SyntaxKind::MethodCallExpression => {
                MethodCallExpression::cast(node).map(Expr::MethodCall)
            }
            SyntaxKind::ReferenceExpression => {
                ReferenceExpression::cast(node).map(Expr::Reference)
            }
            SyntaxKind::IndexExpression => IndexExpression::cast(node).map(Expr::Index),
            SyntaxKind::NewExpression => NewExpression::cast(node).map(Expr::New),
            SyntaxKind::ListExpression => ListExpression::cast(node).map(Expr::List),
            SyntaxKind::ParenthesizedExpression => {
                ParenthesizedExpression::cast(node).map(Expr::Parenthesized)
            }
            SyntaxKind::ClosableBlock => ClosableBlock::cast(node).map(Expr::Closure),
            SyntaxKind::Literal => Literal::cast(node).map(Expr::Literal),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Assignment(n) => n.syntax(),
            Expr::Binary(n) => n.syntax(),
            Expr::Unary(n) => n.syntax(),
            Expr::TypeCast(n) => n.syntax(),
            Expr::MethodCall(n) => n.syntax(),
            Expr::Reference(n) => n.syntax(),
            Expr::Index(n) => n.syntax(),
            Expr::New(n) => n.syntax(),
            Expr::List(n) => n.syntax(),
            Expr::Parenthesized(n) => n.syntax(),
            Expr::Closure(n) => n.syntax(),
            Expr::Literal(n) => n.syntax(),
        }
    }

    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// Anything that may appear in a statement list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Expr(Expr),
    Application(ApplicationStatement),
    VariableDeclaration(VariableDeclaration),
    While(WhileStatement),
    If(IfStatement),
    Return(ReturnStatement),
    Block(BlockStatement),
    Method(MethodDefinition),
    TypeDefinition(TypeDefinition),
}

impl Statement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ApplicationStatement => {
                ApplicationStatement::cast(node).map(Statement::Application)
            }
            SyntaxKind::VariableDeclaration => {
                VariableDeclaration::cast(node).map(Statement::VariableDeclaration)
            }
            SyntaxKind::WhileStatement => WhileStatement::cast(node).map(Statement::While),
            SyntaxKind::IfStatement => IfStatement::cast(node).map(Statement::If),
            SyntaxKind::ReturnStatement => ReturnStatement::cast(node).map(Statement::Return),
            SyntaxKind::BlockStatement => BlockStatement::cast(node).map(Statement::Block),
            SyntaxKind::MethodDefinition => MethodDefinition::cast(node).map(Statement::Method),
            SyntaxKind::TypeDefinition => {
                TypeDefinition::cast(node).map(Statement::TypeDefinition)
            }
            _ => Expr::cast(node).map(Statement::Expr),
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Statement::Expr(n) => n.syntax(),
            Statement::Application(n) => n.syntax(),
            Statement::VariableDeclaration(n) => n.syntax(),
            Statement::While(n) => n.syntax(),
            Statement::If(n) => n.syntax(),
            Statement::Return(n) => n.syntax(),
            Statement::Block(n) => n.syntax(),
            Statement::Method(n) => n.syntax(),
            Statement::TypeDefinition(n) => n.syntax(),
        }
    }

    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// A statement of a source file: statements plus `package` and `import`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TopStatement {
    Package(PackageDefinition),
    Import(ImportStatement),
    Statement(Statement),
}

impl TopStatement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PackageDefinition => {
                PackageDefinition::cast(node).map(TopStatement::Package)
            }
            SyntaxKind::ImportStatement => ImportStatement::cast(node).map(TopStatement::Import),
            _ => Statement::cast(node).map(TopStatement::Statement),
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            TopStatement::Package(n) => n.syntax(),
            TopStatement::Import(n) => n.syntax(),
            TopStatement::Statement(n) => n.syntax(),
        }
    }
}

/// Declared type of a variable, parameter, method or cast.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeElement {
    Class(ClassTypeElement),
    Primitive(PrimitiveTypeElement),
    Array(ArrayTypeElement),
}

impl TypeElement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ClassTypeElement => ClassTypeElement::cast(node).map(TypeElement::Class),
            SyntaxKind::PrimitiveTypeElement => {
                PrimitiveTypeElement::cast(node).map(TypeElement::Primitive)
            }
            SyntaxKind::ArrayTypeElement => ArrayTypeElement::cast(node).map(TypeElement::Array),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            TypeElement::Class(n) => n.syntax(),
            TypeElement::Primitive(n) => n.syntax(),
            TypeElement::Array(n) => n.syntax(),
        }
    }

    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// A declaration inside a class body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(VariableDeclaration),
    Method(MethodDefinition),
    TypeDefinition(TypeDefinition),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::VariableDeclaration => VariableDeclaration::cast(node).map(Member::Field),
            SyntaxKind::MethodDefinition => MethodDefinition::cast(node).map(Member::Method),
            SyntaxKind::TypeDefinition => TypeDefinition::cast(node).map(Member::TypeDefinition),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Member::Field(n) => n.syntax(),
            Member::Method(n) => n.syntax(),
            Member::TypeDefinition(n) => n.syntax(),
        }
    }
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    node.children_with_tokens().filter_map(|it| it.into_token())
}

fn token_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = TopStatement> + '_ {
        self.0.children().filter_map(TopStatement::cast)
    }

    pub fn package(&self) -> Option<PackageDefinition> {
        self.0.children().find_map(PackageDefinition::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportStatement> + '_ {
        self.0.children().filter_map(ImportStatement::cast)
    }

    pub fn type_definitions(&self) -> impl Iterator<Item = TypeDefinition> + '_ {
        self.0.children().filter_map(TypeDefinition::cast)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDefinition> + '_ {
        self.0.children().filter_map(MethodDefinition::cast)
    }

    pub fn doc_comments(&self) -> impl Iterator<Item = DocComment> + '_ {
        self.0.descendants().filter_map(DocComment::cast)
    }
}

impl PackageDefinition {
    pub fn reference(&self) -> Option<CodeReference> {
        self.0.children().find_map(CodeReference::cast)
    }

    pub fn qualified_name(&self) -> Option<String> {
        self.reference().map(|r| r.qualified_name())
    }
}

impl ImportStatement {
    pub fn is_static(&self) -> bool {
        token_of_kind(&self.0, SyntaxKind::KwStatic).is_some()
    }

    /// `import a.b.*`
    pub fn is_on_demand(&self) -> bool {
        token_of_kind(&self.0, SyntaxKind::Star).is_some()
    }

    pub fn reference(&self) -> Option<CodeReference> {
        self.0.children().find_map(CodeReference::cast)
    }

    pub fn qualified_name(&self) -> Option<String> {
        self.reference().map(|r| r.qualified_name())
    }

    /// Name after `as`. Reference segments live inside the `CodeReference`,
    /// so the only direct identifier child is the alias.
    pub fn alias_name(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::Id)
    }
}

impl TypeDefinition {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.0.children().find_map(Modifiers::cast)
    }

    pub fn is_interface(&self) -> bool {
        token_of_kind(&self.0, SyntaxKind::KwInterface).is_some()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::Id)
    }

    pub fn body(&self) -> Option<ClassBody> {
        self.0.children().find_map(ClassBody::cast)
    }

    pub fn super_types(&self) -> impl Iterator<Item = TypeElement> + '_ {
        self.0
            .children()
            .filter(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::ExtendsClause | SyntaxKind::ImplementsClause
                )
            })
            .flat_map(|clause| clause.children().filter_map(TypeElement::cast))
    }
}

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

impl Modifiers {
    /// Modifier keywords in source order, without the `def` marker.
    pub fn keywords(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        tokens(&self.0).filter(|t| t.kind().is_modifier() && t.kind() != SyntaxKind::KwDef)
    }

    pub fn names(&self) -> Vec<String> {
        self.keywords().map(|t| t.text().to_string()).collect()
    }

    pub fn has_def_marker(&self) -> bool {
        token_of_kind(&self.0, SyntaxKind::KwDef).is_some()
    }

    pub fn has(&self, name: &str) -> bool {
        self.keywords().any(|t| t.text() == name)
    }

    pub fn is_empty(&self) -> bool {
        tokens(&self.0).all(|t| t.kind().is_trivia())
    }
}

impl MethodDefinition {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.0.children().find_map(Modifiers::cast)
    }

    pub fn return_type(&self) -> Option<TypeElement> {
        self.0.children().find_map(TypeElement::cast)
    }

    /// Identifier or string-literal name token.
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::StringLiteral))
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        self.0.children().find_map(ParameterList::cast)
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        self.parameter_list()
            .map(|list| list.parameters().collect())
            .unwrap_or_default()
    }

    pub fn block(&self) -> Option<OpenBlock> {
        self.0.children().find_map(OpenBlock::cast)
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.0.children().filter_map(Parameter::cast)
    }
}

impl Parameter {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.0.children().find_map(Modifiers::cast)
    }

    pub fn type_element(&self) -> Option<TypeElement> {
        self.0.children().find_map(TypeElement::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::Id)
    }

    pub fn default_value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl OpenBlock {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

impl VariableDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.0.children().find_map(Modifiers::cast)
    }

    /// Modifier names without the `def` marker.
    pub fn modifier_names(&self) -> Vec<String> {
        self.modifiers().map(|m| m.names()).unwrap_or_default()
    }

    pub fn has_def_marker(&self) -> bool {
        self.modifiers().is_some_and(|m| m.has_def_marker())
    }

    pub fn type_element(&self) -> Option<TypeElement> {
        self.0.children().find_map(TypeElement::cast)
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.children().filter_map(Variable::cast)
    }

    pub fn names(&self) -> Vec<String> {
        self.variables()
            .filter_map(|v| v.name())
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl Variable {
    pub fn name(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::Id)
    }

    pub fn initializer(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ClassTypeElement {
    pub fn reference(&self) -> Option<CodeReference> {
        self.0.children().find_map(CodeReference::cast)
    }
}

impl PrimitiveTypeElement {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_primitive_type())
    }
}

impl ArrayTypeElement {
    pub fn component(&self) -> Option<TypeElement> {
        self.0.children().find_map(TypeElement::cast)
    }
}

impl CodeReference {
    /// Identifier segments of the dotted name.
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id)
    }

    /// The rightmost segment.
    pub fn reference_name_element(&self) -> Option<SyntaxToken> {
        self.segments().last()
    }

    pub fn reference_name(&self) -> Option<String> {
        self.reference_name_element().map(|t| t.text().to_string())
    }

    /// Segments joined by `.`, without type arguments or trivia.
    pub fn qualified_name(&self) -> String {
        self.segments()
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn type_arguments(&self) -> Option<TypeArgumentList> {
        self.0.children().find_map(TypeArgumentList::cast)
    }
}

impl TypeArgumentList {
    pub fn types(&self) -> impl Iterator<Item = TypeElement> + '_ {
        self.0.children().filter_map(TypeElement::cast)
    }
}

impl WhileStatement {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The statement after the condition.
    pub fn body(&self) -> Option<Statement> {
        self.0.children().filter_map(Statement::cast).nth(1)
    }
}

impl IfStatement {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn then_branch(&self) -> Option<Statement> {
        self.0.children().filter_map(Statement::cast).nth(1)
    }

    pub fn else_branch(&self) -> Option<Statement> {
        self.0.children().filter_map(Statement::cast).nth(2)
    }
}

impl ReturnStatement {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl BlockStatement {
    pub fn block(&self) -> Option<OpenBlock> {
        self.0.children().find_map(OpenBlock::cast)
    }
}

impl ApplicationStatement {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn command_arguments(&self) -> Option<CommandArguments> {
        self.0.children().find_map(CommandArguments::cast)
    }

    pub fn arguments(&self) -> Vec<Expr> {
        self.command_arguments()
            .map(|args| args.expressions().collect())
            .unwrap_or_default()
    }
}

impl CommandArguments {
    pub fn expressions(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl AssignmentExpression {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }
}

impl BinaryExpression {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }
}

impl UnaryExpression {
    pub fn operator(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl TypeCastExpression {
    pub fn type_element(&self) -> Option<TypeElement> {
        self.0.children().find_map(TypeElement::cast)
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl MethodCallExpression {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.0.children().find_map(ArgumentList::cast)
    }

    pub fn arguments(&self) -> Vec<Expr> {
        self.argument_list()
            .map(|args| args.expressions().collect())
            .unwrap_or_default()
    }

    /// Closures written after the argument list: `foo(a) { ... }`.
    pub fn closure_arguments(&self) -> Vec<ClosableBlock> {
        self.0
            .children()
            .filter_map(Expr::cast)
            .skip(1)
            .filter_map(|e| match e {
                Expr::Closure(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}

impl ArgumentList {
    pub fn expressions(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl ReferenceExpression {
    /// `a` in `a.b`; `None` for a plain name.
    pub fn qualifier(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn dot_token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::Dot | SyntaxKind::SafeDot | SyntaxKind::SpreadDot
            )
        })
    }

    /// The name token: identifier, keyword, or string literal after a dot.
    pub fn reference_name_element(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .filter(|t| {
                let kind = t.kind();
                kind == SyntaxKind::Id || kind == SyntaxKind::StringLiteral || kind.is_keyword()
            })
            .last()
    }

    /// Name with string-literal quoting removed.
    pub fn reference_name(&self) -> Option<String> {
        let element = self.reference_name_element()?;
        if element.kind() == SyntaxKind::StringLiteral {
            return unescape_string_literal(element.text());
        }
        Some(element.text().to_string())
    }
}

impl IndexExpression {
    pub fn target(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast).skip(1)
    }
}

impl NewExpression {
    pub fn reference(&self) -> Option<CodeReference> {
        self.0.children().find_map(CodeReference::cast)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.0.children().find_map(ArgumentList::cast)
    }
}

impl ListExpression {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl ParenthesizedExpression {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ClosableBlock {
    pub fn parameter_list(&self) -> Option<ParameterList> {
        self.0.children().find_map(ParameterList::cast)
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        self.parameter_list()
            .map(|list| list.parameters().collect())
            .unwrap_or_default()
    }

    pub fn arrow(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::Arrow)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn is_string(&self) -> bool {
        self.token()
            .is_some_and(|t| t.kind() == SyntaxKind::StringLiteral)
    }

    /// Content of a string literal with quotes stripped and escapes resolved.
    pub fn string_value(&self) -> Option<String> {
        let token = self.token()?;
        if token.kind() != SyntaxKind::StringLiteral {
            return None;
        }
        unescape_string_literal(token.text())
    }
}

impl DocComment {
    pub fn tags(&self) -> impl Iterator<Item = DocTag> + '_ {
        self.0.children().filter_map(DocTag::cast)
    }
}

impl DocTag {
    /// Tag name including `@`.
    pub fn name(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.0, SyntaxKind::DocTagName)
    }

    pub fn member_reference(&self) -> Option<DocMemberReference> {
        self.0.children().find_map(DocMemberReference::cast)
    }
}

impl DocMemberReference {
    /// Class part before `#`, if present.
    pub fn class_name(&self) -> Option<String> {
        let segments: Vec<String> = tokens(&self.0)
            .take_while(|t| t.kind() != SyntaxKind::Hash)
            .filter(|t| t.kind() == SyntaxKind::Id)
            .map(|t| t.text().to_string())
            .collect();
        (!segments.is_empty()).then(|| segments.join("."))
    }

    /// The member name after `#`.
    pub fn reference_name_element(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .skip_while(|t| t.kind() != SyntaxKind::Hash)
            .find(|t| t.kind() == SyntaxKind::Id)
    }
}

/// Strips the quotes of a `'...'` or `"..."` literal and resolves backslash escapes.
///
/// Unknown escapes keep the escaped character. Returns `None` if `text` is not quoted.
pub fn unescape_string_literal(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = text
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Some(out)
}
