//! Parser state machine and low-level operations.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use crate::Error;
use crate::ast::SourceFile;
use crate::cst::{SyntaxKind, SyntaxNode, TokenSet};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Token, lex_doc_comment, token_text};

#[derive(Debug)]
pub struct ParseResult {
    pub root: SourceFile,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// Trivia tokens are buffered and flushed when starting a new node.
pub struct Parser<'src> {
    pub(crate) source: &'src str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) trivia_buffer: Vec<Token>,
    pub(crate) builder: GreenNodeBuilder<'static>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) depth: u32,
    pub(crate) last_diagnostic_pos: Option<TextSize>,
    pub(crate) delimiter_stack: Vec<OpenDelimiter>,
    pub(crate) debug_fuel: std::cell::Cell<u32>,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: std::cell::Cell::new(256),
            exec_fuel_initial: None,
            exec_fuel_remaining: None,
            recursion_fuel_limit: None,
            fatal_error: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_initial = limit;
        self.exec_fuel_remaining = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_source_file();
        let (cst, diagnostics, exec_fuel_consumed) = self.finish()?;
        let root =
            SourceFile::cast(SyntaxNode::new_root(cst)).expect("parser always produces SourceFile");
        Ok(ParseResult {
            root,
            diagnostics,
            exec_fuel_consumed,
        })
    }

    fn finish(mut self) -> Result<(GreenNode, Diagnostics, u32), Error> {
        self.drain_trivia();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        let exec_fuel_consumed = match (self.exec_fuel_initial, self.exec_fuel_remaining) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        };
        Ok((self.builder.finish(), self.diagnostics, exec_fuel_consumed))
    }

    pub(crate) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(crate) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.nth_raw(0)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(crate) fn nth_raw(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::ExecFuelExhausted);
                }
                return;
            }
            *remaining -= 1;
        }
    }

    pub(crate) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(crate) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// EOF after skipping trivia.
    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        self.eof()
    }

    pub(crate) fn should_stop(&mut self) -> bool {
        self.at_end() || self.has_fatal_error()
    }

    pub(crate) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// LL(k) lookahead past trivia.
    pub(crate) fn peek_nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.scan().nth(n)
    }

    pub(crate) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.peek_nth(1) == kind
    }

    /// Whether a line break separates the current token from the previous one.
    ///
    /// Newlines end statements, so postfix and infix parsing stops at them.
    pub(crate) fn newline_before_current(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        self.tokens[..self.pos]
            .iter()
            .rev()
            .take_while(|t| t.kind.is_trivia())
            .any(|t| t.kind == SyntaxKind::Newline)
    }

    /// Cursor for unbounded lookahead that never touches the tree.
    pub(crate) fn scan(&self) -> Scan<'_> {
        Scan {
            source: self.source,
            tokens: &self.tokens,
            pos: self.pos,
        }
    }

    pub(crate) fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.trivia_buffer.push(self.tokens[self.pos]);
            self.pos += 1;
        }
    }

    pub(crate) fn drain_trivia(&mut self) {
        let buffered = std::mem::take(&mut self.trivia_buffer);
        for token in &buffered {
            let text = token_text(self.source, token);
            if token.kind == SyntaxKind::DocCommentRaw {
                self.build_doc_comment(text);
            } else {
                self.builder.token(token.kind.into(), text);
            }
        }
        self.trivia_buffer = buffered;
        self.trivia_buffer.clear();
    }

    pub(crate) fn eat_trivia(&mut self) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();

        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
        self.pos += 1;
    }

    pub(crate) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error_msg(
            DiagnosticKind::UnexpectedToken,
            format!("expected {}", what),
        );
        false
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    fn bump_as_error(&mut self) {
        if !self.at_end() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    pub(crate) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).emit();
    }

    pub(crate) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).message(message).emit();
    }

    pub(crate) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.bump_as_error();
    }

    pub(crate) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        self.bump_as_error();
    }

    /// Reports, then swallows tokens into one `Error` node until a recovery
    /// token or a line break.
    pub(crate) fn error_recover(
        &mut self,
        kind: DiagnosticKind,
        message: &str,
        recovery: TokenSet,
    ) {
        if self.currently_is_one_of(recovery) || self.should_stop() {
            self.error_msg(kind, message);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error_msg(kind, message);
        self.bump();
        while !self.should_stop()
            && !self.currently_is_one_of(recovery)
            && !self.newline_before_current()
        {
            self.bump();
        }
        self.finish_node();
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    pub(crate) fn push_delimiter(&mut self, kind: SyntaxKind) {
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { kind, span });
    }

    pub(crate) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Pops the innermost delimiter and consumes its closing token,
    /// reporting an unclosed delimiter if it is absent.
    pub(crate) fn close_delimiter(&mut self, close: SyntaxKind) -> bool {
        let open = self.pop_delimiter();
        if self.eat_token(close) {
            return true;
        }
        let Some(open) = open else {
            return self.expect(close, "closing delimiter");
        };
        let (kind, construct) = match open.kind {
            SyntaxKind::ParenOpen => (DiagnosticKind::UnclosedParen, "`(`"),
            SyntaxKind::BracketOpen => (DiagnosticKind::UnclosedBracket, "`[`"),
            _ => (DiagnosticKind::UnclosedBrace, "`{`"),
        };
        let found = format!("found {:?}", self.current());
        self.error_unclosed_delimiter(
            kind,
            found,
            format!("{construct} opened here"),
            open.span,
        );
        false
    }

    pub(crate) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        // Use full range for easier downstream error suppression
        let full_range = TextRange::new(open_range.start(), current.end());
        self.diagnostics
            .report(kind, full_range)
            .message(message)
            .related_to(related_msg, open_range)
            .emit();
    }

    /// Expands a raw `/** ... */` token into `DocComment` / `DocTag` / `DocMemberReference`.
    ///
    /// Builds directly on the green builder: this runs while trivia is being
    /// drained, so going through `start_node` would recurse.
    fn build_doc_comment(&mut self, text: &str) {
        let pieces = lex_doc_comment(text);
        self.builder.start_node(SyntaxKind::DocComment.into());

        let mut in_tag = false;
        let mut i = 0;
        while i < pieces.len() {
            let (kind, piece) = pieces[i];
            match kind {
                SyntaxKind::DocTagName => {
                    if in_tag {
                        self.builder.finish_node();
                    }
                    self.builder.start_node(SyntaxKind::DocTag.into());
                    in_tag = true;
                    self.builder.token(kind.into(), piece);
                    i += 1;

                    while i < pieces.len() && pieces[i].0 == SyntaxKind::Whitespace {
                        self.builder.token(pieces[i].0.into(), pieces[i].1);
                        i += 1;
                    }

                    let len = member_reference_len(&pieces[i..]);
                    if len > 0 {
                        self.builder
                            .start_node(SyntaxKind::DocMemberReference.into());
                        for &(k, t) in &pieces[i..i + len] {
                            self.builder.token(k.into(), t);
                        }
                        self.builder.finish_node();
                        i += len;
                    }
                }
                SyntaxKind::DocCommentEnd => {
                    if in_tag {
                        self.builder.finish_node();
                        in_tag = false;
                    }
                    self.builder.token(kind.into(), piece);
                    i += 1;
                }
                _ => {
                    self.builder.token(kind.into(), piece);
                    i += 1;
                }
            }
        }

        if in_tag {
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }
}

/// Length of a `Type#member` / `#member` / `a.b.Type#member` run, or 0.
fn member_reference_len(pieces: &[(SyntaxKind, &str)]) -> usize {
    let mut i = 0;
    if pieces.first().is_some_and(|(k, _)| *k == SyntaxKind::Id) {
        i += 1;
        while pieces.get(i).is_some_and(|(k, _)| *k == SyntaxKind::Dot)
            && pieces.get(i + 1).is_some_and(|(k, _)| *k == SyntaxKind::Id)
        {
            i += 2;
        }
    }
    let hash = pieces.get(i).is_some_and(|(k, _)| *k == SyntaxKind::Hash);
    let member = pieces.get(i + 1).is_some_and(|(k, _)| *k == SyntaxKind::Id);
    if hash && member { i + 2 } else { 0 }
}

/// Read-only cursor over the token stream, skipping trivia.
#[derive(Clone)]
pub(crate) struct Scan<'p> {
    source: &'p str,
    tokens: &'p [Token],
    pos: usize,
}

impl<'p> Scan<'p> {
    fn skip_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.pos += 1;
        }
    }

    pub(crate) fn peek(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.tokens
            .get(self.pos)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(crate) fn nth(&mut self, n: usize) -> SyntaxKind {
        let mut ahead = self.clone();
        for _ in 0..n {
            ahead.bump();
        }
        ahead.peek()
    }

    pub(crate) fn bump(&mut self) {
        self.skip_trivia();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn text(&mut self) -> &'p str {
        self.skip_trivia();
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            return true;
        }
        false
    }

    pub(crate) fn newline_before(&mut self) -> bool {
        self.skip_trivia();
        self.tokens[..self.pos]
            .iter()
            .rev()
            .take_while(|t| t.kind.is_trivia())
            .any(|t| t.kind == SyntaxKind::Newline)
    }
}
