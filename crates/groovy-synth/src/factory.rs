//! Element factory: the public operation catalog.
//!
//! Every operation renders a scaffold, parses it into a fresh ephemeral
//! unit, walks the scaffold's path and casts the node it lands on. Nothing
//! is cached between calls.

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

use groovy_syntax::ast::{
    ApplicationStatement, ArgumentList, BlockStatement, ClosableBlock, CodeReference, Expr,
    ImportStatement, MethodCallExpression, MethodDefinition, OpenBlock, Parameter,
    ParenthesizedExpression, ReferenceExpression, SourceFile, Statement, TopStatement,
    TypeDefinition, TypeElement, VariableDeclaration,
};
use groovy_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::NodeOrToken;

use crate::error::{Result, SynthError, TextOrigin};
use crate::locate::{Shape, Step, locate};
use crate::request::{ConstructionRequest, Initializer, TypeSource};
use crate::scaffold::{self, IMPORT_PATH, Scaffold};
use crate::text::TypeDescriptor;
use crate::unit::{EphemeralUnit, Grammar, GroovyGrammar, UnitName};

/// Factory settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryConfig {
    pub exec_fuel: Option<u32>,
    pub recursion_fuel: Option<u32>,
    /// Request persisted units instead of ephemeral ones.
    pub physical: bool,
    pub unit_prefix: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            exec_fuel: Some(groovy_syntax::DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(groovy_syntax::DEFAULT_RECURSION_FUEL),
            physical: false,
            unit_prefix: "DUMMY__".to_string(),
        }
    }
}

impl FactoryConfig {
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn with_physical(mut self, physical: bool) -> Self {
        self.physical = physical;
        self
    }

    pub fn with_unit_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unit_prefix = prefix.into();
        self
    }
}

/// A synthesized node together with the unit it was extracted from.
///
/// The node keeps its tree alive; dropping the last handle frees the unit.
#[derive(Debug, Clone)]
pub struct Synthesized<N> {
    node: N,
    unit: UnitName,
    physical: bool,
    context: Option<SyntaxNode>,
}

impl<N> Synthesized<N> {
    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn into_inner(self) -> N {
        self.node
    }

    pub fn unit(&self) -> &UnitName {
        &self.unit
    }

    pub fn is_physical(&self) -> bool {
        self.physical
    }

    /// The context node attached by the caller, untouched.
    pub fn context(&self) -> Option<&SyntaxNode> {
        self.context.as_ref()
    }

    pub fn map<M>(self, f: impl FnOnce(N) -> M) -> Synthesized<M> {
        Synthesized {
            node: f(self.node),
            unit: self.unit,
            physical: self.physical,
            context: self.context,
        }
    }
}

impl<N> Deref for Synthesized<N> {
    type Target = N;

    fn deref(&self) -> &N {
        &self.node
    }
}

fn node(element: SyntaxElement) -> Option<SyntaxNode> {
    element.into_node()
}

fn token(element: SyntaxElement) -> Option<SyntaxToken> {
    element.into_token()
}

/// Builds syntax fragments from semantic inputs.
///
/// Generic over the [`Grammar`] so the parser can be swapped out; the default
/// is `groovy-syntax`.
pub struct ElementFactory<G: Grammar = GroovyGrammar> {
    grammar: G,
    config: FactoryConfig,
    serial: AtomicU64,
}

impl ElementFactory<GroovyGrammar> {
    pub fn new() -> Self {
        Self::with_config(FactoryConfig::default())
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        let grammar = GroovyGrammar::new()
            .with_exec_fuel(config.exec_fuel)
            .with_recursion_fuel(config.recursion_fuel);
        Self::with_grammar(grammar, config)
    }
}

impl Default for ElementFactory<GroovyGrammar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Grammar> ElementFactory<G> {
    pub fn with_grammar(grammar: G, config: FactoryConfig) -> Self {
        Self {
            grammar,
            config,
            serial: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    fn next_unit_name(&self) -> UnitName {
        let serial = self.serial.fetch_add(1, Ordering::Relaxed);
        UnitName::new(&self.config.unit_prefix, serial)
    }

    fn open_unit(
        &self,
        text: &str,
        origin: TextOrigin,
        physical: bool,
        context: Option<&SyntaxNode>,
    ) -> Result<EphemeralUnit> {
        let name = self.next_unit_name();
        log::debug!("{name}: {origin} scaffold {text:?}");

        let root = self
            .grammar
            .parse(text, &name, physical)
            .map_err(|failure| SynthError::ParseRejected {
                text: text.to_string(),
                origin,
                failure,
            })?;

        Ok(EphemeralUnit {
            name,
            text: text.to_string(),
            root,
            physical,
            context: context.cloned(),
        })
    }

    fn extract<N>(
        &self,
        scaffold: Scaffold,
        context: Option<&SyntaxNode>,
        cast: impl FnOnce(SyntaxElement) -> Option<N>,
    ) -> Result<Synthesized<N>> {
        let unit = self.open_unit(&scaffold.text, scaffold.origin, self.config.physical, context)?;

        let shape_error = |expected: Step, found: Option<SyntaxKind>| {
            if scaffold.origin == TextOrigin::Rendered {
                log::warn!(
                    "{}: rendered scaffold {:?} has no {expected}, found {found:?}",
                    unit.name,
                    scaffold.text
                );
            }
            SynthError::UnexpectedShape {
                text: scaffold.text.clone(),
                origin: scaffold.origin,
                expected,
                found,
            }
        };

        let element = locate(unit.root.syntax(), &scaffold.path)
            .map_err(|mismatch| shape_error(mismatch.step, mismatch.found))?;

        let kind = element.kind();
        let Some(node) = cast(element) else {
            let last = scaffold.path.last().copied().unwrap_or(Step::First(Shape::TopStatement));
            return Err(shape_error(last, Some(kind)));
        };

        Ok(Synthesized {
            node,
            unit: unit.name,
            physical: unit.physical,
            context: unit.context,
        })
    }

    /// The name element of `a.<name>`.
    pub fn reference_name(&self, name: &str) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::reference_name(name)?, None, token)
    }

    pub fn reference_expression(&self, text: &str) -> Result<Synthesized<ReferenceExpression>> {
        let path = [Step::First(Shape::Kind(SyntaxKind::ReferenceExpression))];
        let scaffold = Scaffold::raw(text, &path);
        self.extract(scaffold, None, |el| node(el).and_then(ReferenceExpression::cast))
    }

    pub fn expression(&self, text: &str) -> Result<Synthesized<Expr>> {
        let scaffold = Scaffold::raw(text, &[Step::First(Shape::Expr)]);
        self.extract(scaffold, None, |el| node(el).and_then(Expr::cast))
    }

    pub fn statement(&self, text: &str) -> Result<Synthesized<Statement>> {
        let scaffold = Scaffold::raw(text, &[Step::First(Shape::Statement)]);
        self.extract(scaffold, None, |el| node(el).and_then(Statement::cast))
    }

    pub fn top_statement(&self, text: &str) -> Result<Synthesized<TopStatement>> {
        let scaffold = Scaffold::raw(text, &[Step::First(Shape::TopStatement)]);
        self.extract(scaffold, None, |el| node(el).and_then(TopStatement::cast))
    }

    pub fn doc_member_reference_name(&self, id: &str) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::doc_member_reference_name(id)?, None, token)
    }

    /// The code reference of `(<text> )x`.
    pub fn type_reference(&self, text: &str) -> Result<Synthesized<CodeReference>> {
        self.extract(scaffold::type_reference(text)?, None, |el| {
            node(el).and_then(CodeReference::cast)
        })
    }

    pub fn type_or_package_reference(
        &self,
        qualified_name: &str,
    ) -> Result<Synthesized<CodeReference>> {
        self.extract(scaffold::type_or_package_reference(qualified_name)?, None, |el| {
            node(el).and_then(CodeReference::cast)
        })
    }

    pub fn variable_declaration(
        &self,
        modifiers: &[&str],
        ty: Option<&TypeDescriptor>,
        names: &[&str],
        initializer: Option<&Initializer>,
    ) -> Result<Synthesized<VariableDeclaration>> {
        let scaffold = scaffold::variable_declaration(modifiers, ty, names, initializer)?;
        self.extract(scaffold, None, |el| node(el).and_then(VariableDeclaration::cast))
    }

    /// A declaration as a member of a class body.
    pub fn field_declaration(
        &self,
        modifiers: &[&str],
        ty: Option<&TypeDescriptor>,
        names: &[&str],
        initializer: Option<&Initializer>,
    ) -> Result<Synthesized<VariableDeclaration>> {
        let scaffold = scaffold::field_declaration(modifiers, ty, names, initializer)?;
        self.extract(scaffold, None, |el| node(el).and_then(VariableDeclaration::cast))
    }

    pub fn simple_field_declaration(
        &self,
        name: &str,
        type_text: &str,
    ) -> Result<Synthesized<VariableDeclaration>> {
        let scaffold = scaffold::simple_field_declaration(name, type_text)?;
        self.extract(scaffold, None, |el| node(el).and_then(VariableDeclaration::cast))
    }

    /// `context` is attached to the unit for later name resolution.
    pub fn parameter(
        &self,
        name: &str,
        type_text: Option<&str>,
        context: Option<&SyntaxNode>,
    ) -> Result<Synthesized<Parameter>> {
        self.extract(scaffold::parameter(name, type_text)?, context, |el| {
            node(el).and_then(Parameter::cast)
        })
    }

    pub fn type_element(&self, text: &str) -> Result<Synthesized<TypeElement>> {
        self.extract(scaffold::type_element(text)?, None, |el| {
            node(el).and_then(TypeElement::cast)
        })
    }

    /// Type element for a resolved type: canonical text, else presentable text.
    pub fn type_element_for(&self, ty: &TypeDescriptor) -> Result<Synthesized<TypeElement>> {
        self.type_element(ty.text())
    }

    pub fn type_definition(&self, text: &str) -> Result<Synthesized<TypeDefinition>> {
        let unit = self.open_unit(text, TextOrigin::Caller, self.config.physical, None)?;
        let definitions: Vec<TypeDefinition> = unit.root.type_definitions().collect();
        let [definition] = definitions.as_slice() else {
            return Err(SynthError::UnexpectedShape {
                text: text.to_string(),
                origin: TextOrigin::Caller,
                expected: Step::Child(Shape::Kind(SyntaxKind::TypeDefinition)),
                found: definitions.get(1).map(|d| d.syntax().kind()),
            });
        };
        Ok(Synthesized {
            node: definition.clone(),
            unit: unit.name,
            physical: unit.physical,
            context: None,
        })
    }

    pub fn method(&self, text: &str) -> Result<Synthesized<MethodDefinition>> {
        let path = [Step::First(Shape::Kind(SyntaxKind::MethodDefinition))];
        let scaffold = Scaffold::raw(text, &path);
        self.extract(scaffold, None, |el| node(el).and_then(MethodDefinition::cast))
    }

    /// The block of `def foo () {<text>}`.
    pub fn method_body(&self, text: &str) -> Result<Synthesized<OpenBlock>> {
        self.extract(scaffold::method_body(text), None, |el| {
            node(el).and_then(OpenBlock::cast)
        })
    }

    pub fn method_call(
        &self,
        callee: &str,
        arguments: &[Expr],
    ) -> Result<Synthesized<MethodCallExpression>> {
        self.extract(scaffold::method_call(callee, arguments)?, None, |el| {
            node(el).and_then(MethodCallExpression::cast)
        })
    }

    /// `foo a, b` as `foo(a, b)`.
    pub fn method_call_from_application(
        &self,
        app: &ApplicationStatement,
    ) -> Result<Synthesized<MethodCallExpression>> {
        self.extract(scaffold::method_call_from_application(app)?, None, |el| {
            node(el).and_then(MethodCallExpression::cast)
        })
    }

    pub fn argument_list(&self, expressions: &[Expr]) -> Result<Synthesized<ArgumentList>> {
        self.extract(scaffold::argument_list(expressions), None, |el| {
            node(el).and_then(ArgumentList::cast)
        })
    }

    pub fn closure(&self, text: &str) -> Result<Synthesized<ClosableBlock>> {
        let scaffold = Scaffold::raw(text, &[Step::First(Shape::Kind(SyntaxKind::ClosableBlock))]);
        self.extract(scaffold, None, |el| node(el).and_then(ClosableBlock::cast))
    }

    pub fn parenthesized(&self, expr: &Expr) -> Result<Synthesized<ParenthesizedExpression>> {
        self.extract(scaffold::parenthesized(expr), None, |el| {
            node(el).and_then(ParenthesizedExpression::cast)
        })
    }

    pub fn import(
        &self,
        qualified_name: &str,
        is_static: bool,
        is_on_demand: bool,
        alias: Option<&str>,
    ) -> Result<Synthesized<ImportStatement>> {
        let scaffold = scaffold::import(qualified_name, is_static, is_on_demand, alias)?;
        self.extract(scaffold, None, |el| node(el).and_then(ImportStatement::cast))
    }

    pub fn import_from_text(&self, text: &str) -> Result<Synthesized<ImportStatement>> {
        self.extract(Scaffold::raw(text, IMPORT_PATH), None, |el| {
            node(el).and_then(ImportStatement::cast)
        })
    }

    pub fn package_reference(&self, qualified_name: &str) -> Result<Synthesized<CodeReference>> {
        self.extract(scaffold::package_reference(qualified_name)?, None, |el| {
            node(el).and_then(CodeReference::cast)
        })
    }

    /// The body of `while (true) { ... }` holding `statements`, one per line.
    pub fn block_statement(&self, statements: &[Statement]) -> Result<Synthesized<BlockStatement>> {
        self.extract(scaffold::block_statement(statements), None, |el| {
            node(el).and_then(BlockStatement::cast)
        })
    }

    /// A single-quoted literal whose value is exactly `content`.
    pub fn string_literal(&self, content: &str) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::string_literal(content), None, token)
    }

    pub fn modifier(&self, name: &str) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::modifier(name)?, None, token)
    }

    pub fn dot_token(&self, dot: &str) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::dot_token(dot)?, None, token)
    }

    pub fn whitespace(&self) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::whitespace(), None, token)
    }

    /// `count` newlines in one token; zero yields one newline.
    pub fn line_terminator(&self, count: usize) -> Result<Synthesized<SyntaxToken>> {
        self.extract(scaffold::line_terminator(count)?, None, token)
    }

    pub fn raw_fragment(
        &self,
        text: &str,
        expected: SyntaxKind,
    ) -> Result<Synthesized<SyntaxNode>> {
        self.extract(scaffold::raw_fragment(text, expected)?, None, node)
    }

    /// The whole unit for `text`.
    pub fn file(
        &self,
        text: &str,
        physical: bool,
        context: Option<&SyntaxNode>,
    ) -> Result<Synthesized<SourceFile>> {
        let unit = self.open_unit(text, TextOrigin::Caller, physical, context)?;
        Ok(Synthesized {
            node: unit.root,
            unit: unit.name,
            physical: unit.physical,
            context: unit.context,
        })
    }

    /// Dispatches a request to its operation.
    pub fn synthesize(&self, request: &ConstructionRequest) -> Result<Synthesized<SyntaxElement>> {
        fn strs(values: &[String]) -> Vec<&str> {
            values.iter().map(String::as_str).collect()
        }
        fn element<N: Into<SyntaxElement>>(s: Synthesized<N>) -> Synthesized<SyntaxElement> {
            s.map(Into::into)
        }
        fn syntax<N>(
            s: Synthesized<N>,
            f: impl FnOnce(&N) -> &SyntaxNode,
        ) -> Synthesized<SyntaxElement> {
            s.map(|n| NodeOrToken::Node(f(&n).clone()))
        }

        log::debug!("synthesizing {}", request.category());
        let result = match request {
            ConstructionRequest::VariableDeclaration {
                modifiers,
                ty,
                names,
                initializer,
            } => syntax(
                self.variable_declaration(
                    &strs(modifiers),
                    ty.as_ref(),
                    &strs(names),
                    initializer.as_ref(),
                )?,
                VariableDeclaration::syntax,
            ),
            ConstructionRequest::FieldDeclaration {
                modifiers,
                ty,
                names,
                initializer,
            } => syntax(
                self.field_declaration(
                    &strs(modifiers),
                    ty.as_ref(),
                    &strs(names),
                    initializer.as_ref(),
                )?,
                VariableDeclaration::syntax,
            ),
            ConstructionRequest::Parameter {
                name,
                type_text,
                context,
            } => syntax(
                self.parameter(name, type_text.as_deref(), context.as_ref())?,
                Parameter::syntax,
            ),
            ConstructionRequest::TypeReference { qualified_name } => {
                syntax(self.type_reference(qualified_name)?, CodeReference::syntax)
            }
            ConstructionRequest::TypeElement(TypeSource::Text(text)) => {
                syntax(self.type_element(text)?, TypeElement::syntax)
            }
            ConstructionRequest::TypeElement(TypeSource::Descriptor(ty)) => {
                syntax(self.type_element_for(ty)?, TypeElement::syntax)
            }
            ConstructionRequest::MethodCall { callee, arguments } => syntax(
                self.method_call(callee, arguments)?,
                MethodCallExpression::syntax,
            ),
            ConstructionRequest::Closure { text } => {
                syntax(self.closure(text)?, ClosableBlock::syntax)
            }
            ConstructionRequest::Import {
                qualified_name,
                is_static,
                is_on_demand,
                alias,
            } => syntax(
                self.import(qualified_name, *is_static, *is_on_demand, alias.as_deref())?,
                ImportStatement::syntax,
            ),
            ConstructionRequest::BlockStatement { statements } => {
                syntax(self.block_statement(statements)?, BlockStatement::syntax)
            }
            ConstructionRequest::ArgumentList { expressions } => {
                syntax(self.argument_list(expressions)?, ArgumentList::syntax)
            }
            ConstructionRequest::StringLiteral { content } => {
                element(self.string_literal(content)?)
            }
            ConstructionRequest::Modifier { name } => element(self.modifier(name)?),
            ConstructionRequest::PackageReference { qualified_name } => {
                syntax(self.package_reference(qualified_name)?, CodeReference::syntax)
            }
            ConstructionRequest::LineTerminator { count } => {
                element(self.line_terminator(*count)?)
            }
            ConstructionRequest::Whitespace => element(self.whitespace()?),
            ConstructionRequest::RawFragment { text, expected } => {
                element(self.raw_fragment(text, *expected)?)
            }
        };
        Ok(result)
    }
}
