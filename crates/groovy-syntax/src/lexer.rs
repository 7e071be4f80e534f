//! Lexer for the Groovy subset.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character. This keeps the token stream manageable for malformed input.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Post-processes the Logos output:
/// - Coalesces consecutive lexer errors into single `Garbage` tokens
/// - Reclassifies `/** ... */` block comments as doc comments
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                let span = lexer.span();
                let kind = if kind == SyntaxKind::BlockComment && is_doc_comment(lexer.slice()) {
                    SyntaxKind::DocCommentRaw
                } else {
                    kind
                };
                tokens.push(Token::new(kind, range_to_text_range(span)));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// `/**/` is an empty block comment, not a doc comment.
fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && text.len() > 4
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Kind of the single token spelled by `text`, or `None` if `text` lexes to
/// anything other than exactly one token.
pub fn single_token(text: &str) -> Option<SyntaxKind> {
    match lex(text).as_slice() {
        [token] if usize::from(token.span.len()) == text.len() => Some(token.kind),
        _ => None,
    }
}

/// Whether `text` is exactly one reserved word of the grammar.
pub fn is_keyword(text: &str) -> bool {
    single_token(text).is_some_and(SyntaxKind::is_keyword)
}

/// Tokens inside a doc comment. Lexed separately when the parser expands a
/// `DocCommentRaw` token into a `DocComment` subtree.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DocToken {
    #[token("/**")]
    Start,

    #[token("*/")]
    End,

    #[regex(r"@[a-zA-Z]+")]
    TagName,

    #[token("#")]
    Hash,

    #[token(".")]
    Dot,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[ \t\f]+")]
    Space,

    #[regex(r"(?:\r?\n)+")]
    Newline,
}

/// Splits doc comment text into `(kind, text)` pieces covering it entirely.
///
/// Unrecognized characters (leading asterisks, punctuation) coalesce into `DocText`.
pub(crate) fn lex_doc_comment(text: &str) -> Vec<(SyntaxKind, &str)> {
    let mut pieces: Vec<(SyntaxKind, Range<usize>)> = Vec::new();
    let mut lexer = DocToken::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(DocToken::Start) => SyntaxKind::DocCommentStart,
            Ok(DocToken::End) => SyntaxKind::DocCommentEnd,
            Ok(DocToken::TagName) => SyntaxKind::DocTagName,
            Ok(DocToken::Hash) => SyntaxKind::Hash,
            Ok(DocToken::Dot) => SyntaxKind::Dot,
            Ok(DocToken::Ident) => SyntaxKind::Id,
            Ok(DocToken::Space) => SyntaxKind::Whitespace,
            Ok(DocToken::Newline) => SyntaxKind::Newline,
            Err(()) => SyntaxKind::DocText,
        };

        match pieces.last_mut() {
            Some((SyntaxKind::DocText, prev)) if kind == SyntaxKind::DocText => {
                prev.end = span.end;
            }
            _ => pieces.push((kind, span)),
        }
    }

    pieces
        .into_iter()
        .map(|(kind, span)| (kind, &text[span]))
        .collect()
}
