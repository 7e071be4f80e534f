//! Syntax kinds for the Groovy subset.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `GroovyLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,

    /// Safe navigation `?.`
    #[token("?.")]
    SafeDot,

    /// Spread-dot `*.`
    #[token("*.")]
    SpreadDot,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    /// Closure parameter separator.
    #[token("->")]
    Arrow,

    #[token("=")]
    Eq,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    NotEq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    /// Member separator inside doc references: `A#member`.
    #[token("#")]
    Hash,

    #[token("package")]
    KwPackage,

    #[token("import")]
    KwImport,

    #[token("as")]
    KwAs,

    #[token("class")]
    KwClass,

    #[token("interface")]
    KwInterface,

    #[token("extends")]
    KwExtends,

    #[token("implements")]
    KwImplements,

    #[token("while")]
    KwWhile,

    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("return")]
    KwReturn,

    #[token("new")]
    KwNew,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("null")]
    KwNull,

    #[token("this")]
    KwThis,

    #[token("super")]
    KwSuper,

    /// Type-inference marker. Lives in modifier lists.
    #[token("def")]
    KwDef,

    #[token("public")]
    KwPublic,

    #[token("protected")]
    KwProtected,

    #[token("private")]
    KwPrivate,

    #[token("static")]
    KwStatic,

    #[token("abstract")]
    KwAbstract,

    #[token("final")]
    KwFinal,

    #[token("synchronized")]
    KwSynchronized,

    #[token("transient")]
    KwTransient,

    #[token("volatile")]
    KwVolatile,

    #[token("native")]
    KwNative,

    #[token("strictfp")]
    KwStrictfp,

    #[token("boolean")]
    KwBoolean,

    #[token("byte")]
    KwByte,

    #[token("char")]
    KwChar,

    #[token("short")]
    KwShort,

    #[token("int")]
    KwInt,

    #[token("long")]
    KwLong,

    #[token("float")]
    KwFloat,

    #[token("double")]
    KwDouble,

    #[token("void")]
    KwVoid,

    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Id,

    #[regex(r"[0-9]+")]
    IntLiteral,

    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLiteral,

    /// Single- or double-quoted, backslash escapes. Kept as one token.
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    StringLiteral,

    #[regex(r"[ \t\f]+")]
    Whitespace,

    /// A run of line breaks is one token.
    #[regex(r"(?:\r?\n)+")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// `/** ... */` reclassified from `BlockComment` by the lexer. Lexer-internal:
    /// the parser expands it into a `DocComment` subtree.
    #[doc(hidden)]
    DocCommentRaw,

    DocCommentStart,
    DocCommentEnd,
    /// `@see`, `@param`, ...
    DocTagName,
    /// Free text inside a doc comment.
    DocText,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    SourceFile,
    PackageDefinition,
    ImportStatement,
    TypeDefinition,
    ExtendsClause,
    ImplementsClause,
    ClassBody,
    MethodDefinition,
    Modifiers,
    ParameterList,
    Parameter,
    OpenBlock,
    VariableDeclaration,
    Variable,
    ClassTypeElement,
    PrimitiveTypeElement,
    ArrayTypeElement,
    CodeReference,
    TypeArgumentList,
    WhileStatement,
    IfStatement,
    ReturnStatement,
    BlockStatement,
    ApplicationStatement,
    CommandArguments,
    AssignmentExpression,
    BinaryExpression,
    UnaryExpression,
    TypeCastExpression,
    MethodCallExpression,
    ArgumentList,
    ReferenceExpression,
    IndexExpression,
    NewExpression,
    ListExpression,
    ParenthesizedExpression,
    ClosableBlock,
    Literal,
    DocComment,
    DocTag,
    DocMemberReference,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | Newline | LineComment | BlockComment | DocCommentRaw | DocComment
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// True for token kinds, false for node kinds.
    #[inline]
    pub fn is_token(self) -> bool {
        self < SourceFile
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (KwPackage as u16..=KwVoid as u16).contains(&(self as u16))
    }

    /// Modifier keywords, including the `def` marker.
    #[inline]
    pub fn is_modifier(self) -> bool {
        (KwDef as u16..=KwStrictfp as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_primitive_type(self) -> bool {
        (KwBoolean as u16..=KwVoid as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_type_element(self) -> bool {
        matches!(
            self,
            ClassTypeElement | PrimitiveTypeElement | ArrayTypeElement
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroovyLang {}

impl Language for GroovyLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<GroovyLang>;
pub type SyntaxToken = rowan::SyntaxToken<GroovyLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Tokens that can start a primary expression.
    pub const PRIMARY_FIRST: TokenSet = TokenSet::new(&[
        Id,
        KwThis,
        KwSuper,
        IntLiteral,
        FloatLiteral,
        StringLiteral,
        KwTrue,
        KwFalse,
        KwNull,
        ParenOpen,
        BracketOpen,
        BraceOpen,
        KwNew,
    ]);

    pub const PREFIX_OPERATORS: TokenSet = TokenSet::new(&[Bang, Minus, Plus]);

    pub const EXPR_FIRST: TokenSet = PRIMARY_FIRST.union(PREFIX_OPERATORS);

    /// First token of a command argument in `callee arg, arg`.
    /// Excludes tokens that would also continue the callee (`(`, `[`, `{`, operators).
    pub const COMMAND_ARG_FIRST: TokenSet = TokenSet::new(&[
        Id,
        KwThis,
        KwSuper,
        IntLiteral,
        FloatLiteral,
        StringLiteral,
        KwTrue,
        KwFalse,
        KwNull,
        KwNew,
    ]);

    /// What may follow `(Type)` for the parenthesized text to count as a cast.
    pub const CAST_OPERAND_FIRST: TokenSet = TokenSet::new(&[
        Id,
        KwThis,
        KwSuper,
        IntLiteral,
        FloatLiteral,
        StringLiteral,
        KwTrue,
        KwFalse,
        KwNull,
        ParenOpen,
        KwNew,
        Bang,
    ]);

    pub const ASSIGNMENT_OPERATORS: TokenSet = TokenSet::new(&[Eq, PlusEq, MinusEq]);

    pub const DOTS: TokenSet = TokenSet::new(&[Dot, SafeDot, SpreadDot]);

    /// Tokens allowed between `{` and `->` of a closure parameter list.
    pub const CLOSURE_PARAM_TOKENS: TokenSet = TokenSet::new(&[
        Id, Comma, Dot, Lt, Gt, Question, BracketOpen, BracketClose, KwDef, KwFinal, KwBoolean,
        KwByte, KwChar, KwShort, KwInt, KwLong, KwFloat, KwDouble, Eq, IntLiteral,
        StringLiteral,
    ]);

    pub const TRIVIA: TokenSet =
        TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment, DocCommentRaw]);

    pub const STATEMENT_RECOVERY: TokenSet = TokenSet::new(&[Semicolon, BraceClose]);

    pub const MEMBER_RECOVERY: TokenSet = TokenSet::new(&[Semicolon, BraceClose]);
}
