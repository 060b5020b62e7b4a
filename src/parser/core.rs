//! Core Parser state and cursor helpers.
//!
//! The parser is split into focused modules:
//!   - declarations.rs: external declarations, specifiers, the
//!     identifier-role lookahead, initializers
//!   - declarators.rs: C declarator syntax (pointers, arrays, function
//!     suffixes, bit-fields)
//!   - types.rs: type names and the parenthesized type-or-expression
//!     ambiguity
//!   - expressions.rs: precedence climbing (comma through primary)
//!   - statements.rs: all statement types + inline assembly
//!
//! Each module adds methods to the `Parser` struct via `impl Parser`
//! blocks; methods are `pub(super)` so they can be called across
//! modules within the parser.
//!
//! Failure is two-tiered: recoverable failures surface as `Ok(None)` /
//! `Ok(false)` and are handled by per-construct recovery; fatal
//! failures (`ParseError`) unwind the whole parse via `?` and no tree
//! is returned.

use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsSink};
use crate::lexer::LexError;
use crate::syntax::node::{NodeId, SyntaxNode};
use crate::syntax::tree::SyntaxTree;
use crate::tokens::{Token, TokenIdx, TokenKind};

/// Nesting bound for expressions; exceeding it is fatal.
pub(super) const MAX_EXPR_DEPTH: u32 = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("maximum expression depth ({MAX_EXPR_DEPTH}) exceeded")]
    ExpressionDepthExceeded,
    #[error(transparent)]
    Lex(#[from] LexError),
}

pub(super) type ParseResult<T> = Result<T, ParseError>;

/// A saved cursor position plus the deferred-diagnostics watermark.
/// Must be handed back to exactly one of `Parser::backtrack` or
/// `Parser::commit`; move semantics make reuse impossible.
pub(super) struct Backtracker {
    pos: usize,
    deferred_mark: usize,
}

/// Recursive-descent parser for C.
pub struct Parser<'s> {
    pub(super) tree: SyntaxTree,
    pub(super) pos: usize,
    sink: &'s mut dyn DiagnosticsSink,
    /// Depth of `parse_expression` entries; rechecked in the n-ary loop.
    pub(super) expr_depth: u32,
    /// Non-zero while inside a speculative (backtrackable) parse.
    speculating: u32,
    /// Reports buffered during speculation; dropped on backtrack,
    /// flushed on commit.
    deferred: Vec<Diagnostic>,
}

impl<'s> Parser<'s> {
    pub fn new(tree: SyntaxTree, sink: &'s mut dyn DiagnosticsSink) -> Parser<'s> {
        Parser { tree, pos: 0, sink, expr_depth: 0, speculating: 0, deferred: Vec::new() }
    }

    /// Runs the parse and returns the populated tree. Diagnostics were
    /// delivered to the sink; a tree is returned even when the input
    /// was malformed. Only fatal conditions return `Err`.
    pub fn parse(mut self) -> ParseResult<SyntaxTree> {
        let root = self.parse_translation_unit()?;
        self.tree.set_root(root);
        Ok(self.tree)
    }

    // === Token access ===

    /// 1-indexed lookahead: `peek(1)` is the current token.
    pub(super) fn peek(&self, k: usize) -> &Token {
        let idx = self.pos + k - 1;
        let tokens = self.tree.tokens();
        if idx < tokens.len() {
            &tokens[idx]
        } else {
            tokens.last().expect("token stream holds at least Eof")
        }
    }

    pub(super) fn peek_kind(&self, k: usize) -> TokenKind {
        self.peek(k).kind
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind(1) == kind
    }

    pub(super) fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// The index of the current token (anchor for diagnostics).
    pub(super) fn cursor(&self) -> TokenIdx {
        let last = self.tree.tokens().len().saturating_sub(1);
        TokenIdx(self.pos.min(last) as u32)
    }

    /// Consumes the current token, returning its index; the invalid
    /// sentinel at end-of-file.
    pub(super) fn consume(&mut self) -> TokenIdx {
        if self.at_eof() {
            return TokenIdx::INVALID;
        }
        let idx = TokenIdx(self.pos as u32);
        self.pos += 1;
        idx
    }

    /// If the current token has `kind`, consume it into `slot` and
    /// return true; otherwise report "expected <kind>" and return
    /// false without advancing.
    pub(super) fn match_tk(&mut self, kind: TokenKind, slot: &mut TokenIdx) -> bool {
        if self.at(kind) {
            *slot = self.consume();
            true
        } else {
            let at = self.cursor();
            self.report(at, DiagnosticKind::ExpectedToken(kind));
            false
        }
    }

    /// Like `match_tk`, but on mismatch scans forward to `kind` (or a
    /// balancing delimiter) and consumes it if found.
    pub(super) fn match_or_skip_to(&mut self, kind: TokenKind, slot: &mut TokenIdx) -> bool {
        if self.match_tk(kind, slot) {
            return true;
        }
        self.skip_to(kind);
        if self.at(kind) {
            *slot = self.consume();
            return true;
        }
        false
    }

    /// Advances until `kind` is current (not consuming it), respecting
    /// nesting: an unbalanced closing delimiter also stops the scan.
    pub(super) fn skip_to(&mut self, kind: TokenKind) {
        let mut parens = 0i32;
        let mut brackets = 0i32;
        let mut braces = 0i32;
        loop {
            let cur = self.peek_kind(1);
            if cur == TokenKind::Eof {
                return;
            }
            if cur == kind && parens <= 0 && brackets <= 0 && braces <= 0 {
                return;
            }
            match cur {
                TokenKind::OpenParen => parens += 1,
                TokenKind::OpenBracket => brackets += 1,
                TokenKind::OpenBrace => braces += 1,
                TokenKind::CloseParen => {
                    if parens == 0 {
                        return;
                    }
                    parens -= 1;
                }
                TokenKind::CloseBracket => {
                    if brackets == 0 {
                        return;
                    }
                    brackets -= 1;
                }
                TokenKind::CloseBrace => {
                    if braces == 0 {
                        return;
                    }
                    braces -= 1;
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    // === Backtracking ===

    pub(super) fn start_speculation(&mut self) -> Backtracker {
        self.speculating += 1;
        Backtracker { pos: self.pos, deferred_mark: self.deferred.len() }
    }

    /// Restores the cursor and drops any reports of the abandoned
    /// attempt. The arena is not rolled back; abandoned subtrees stay
    /// as inert garbage.
    pub(super) fn backtrack(&mut self, bt: Backtracker) {
        self.speculating -= 1;
        self.pos = bt.pos;
        self.deferred.truncate(bt.deferred_mark);
    }

    /// Keeps the speculative parse; its buffered reports reach the
    /// sink once the outermost speculation commits.
    pub(super) fn commit(&mut self, bt: Backtracker) {
        let _ = bt.pos;
        self.speculating -= 1;
        if self.speculating == 0 {
            for d in self.deferred.drain(..) {
                self.sink.report(d);
            }
        }
    }

    // === Diagnostics ===

    pub(super) fn report(&mut self, at: TokenIdx, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { kind, token: at };
        if self.speculating > 0 {
            self.deferred.push(diagnostic);
        } else {
            self.sink.report(diagnostic);
        }
    }

    pub(super) fn report_here(&mut self, kind: DiagnosticKind) {
        let at = self.cursor();
        self.report(at, kind);
    }

    // === Node access ===

    pub(super) fn alloc(&mut self, node: SyntaxNode) -> NodeId {
        self.tree.alloc(node)
    }

    pub(super) fn node(&self, id: NodeId) -> &SyntaxNode {
        self.tree.node(id)
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        self.tree.node_mut(id)
    }

    // === Error recovery ===

    /// Skips to the next plausible declaration start: past a top-level
    /// `;` or `}`, or up to (not past) a token that can begin a
    /// declaration at brace depth zero.
    pub(super) fn ignore_declaration_or_definition(&mut self) {
        let mut depth = 0i32;
        let mut skipped = false;
        loop {
            let cur = self.peek_kind(1);
            match cur {
                TokenKind::Eof => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.pos += 1;
                    return;
                }
                TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBrace => {
                    if depth <= 1 {
                        self.pos += 1;
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::CloseParen | TokenKind::CloseBracket => depth -= 1,
                _ if depth == 0 && skipped && cur.starts_declaration() => return,
                _ => {}
            }
            self.pos += 1;
            skipped = true;
        }
    }

    /// Skips to the next struct/enum member: past a `;`, or up to the
    /// enclosing `}`.
    pub(super) fn ignore_member_declaration(&mut self) {
        let mut depth = 0i32;
        loop {
            match self.peek_kind(1) {
                TokenKind::Eof => return,
                TokenKind::Semicolon | TokenKind::Comma if depth == 0 => {
                    self.pos += 1;
                    return;
                }
                TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBrace if depth == 0 => return,
                TokenKind::CloseBrace | TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth -= 1
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Skips the remainder of a damaged declarator, stopping before
    /// whatever can continue the enclosing declaration.
    pub(super) fn ignore_declarator(&mut self) {
        let mut depth = 0i32;
        loop {
            match self.peek_kind(1) {
                TokenKind::Eof => return,
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::OpenBrace if depth == 0 => {
                    return
                }
                TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::CloseBrace => return,
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Skips to the next statement: past a `;`, or up to the enclosing
    /// `}`.
    pub(super) fn ignore_statement(&mut self) {
        let mut depth = 0i32;
        loop {
            match self.peek_kind(1) {
                TokenKind::Eof => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.pos += 1;
                    return;
                }
                TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBrace if depth == 0 => return,
                TokenKind::CloseBrace | TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth -= 1
                }
                _ => {}
            }
            self.pos += 1;
        }
    }
}

#[cfg(test)]
impl<'s> Parser<'s> {
    /// Hands the (possibly partially built) tree to tests.
    pub(crate) fn into_tree(self) -> SyntaxTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticList;
    use crate::options::LanguageExtensions;

    fn parser_over<'s>(source: &str, sink: &'s mut DiagnosticList) -> Parser<'s> {
        let (tokens, interner) = crate::lexer::lex(source).expect("lexes");
        let tree =
            SyntaxTree::new(tokens, interner, Default::default(), LanguageExtensions::all());
        Parser::new(tree, sink)
    }

    #[test]
    fn peek_is_one_indexed_and_clamps_at_eof() {
        let mut sink = DiagnosticList::new();
        let p = parser_over("a b", &mut sink);
        assert_eq!(p.peek_kind(1), TokenKind::Identifier);
        assert_eq!(p.peek_kind(2), TokenKind::Identifier);
        assert_eq!(p.peek_kind(3), TokenKind::Eof);
        assert_eq!(p.peek_kind(17), TokenKind::Eof);
    }

    #[test]
    fn consume_returns_indices_and_stops_at_eof() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("a b", &mut sink);
        assert_eq!(p.consume(), TokenIdx(0));
        assert_eq!(p.consume(), TokenIdx(1));
        assert_eq!(p.consume(), TokenIdx::INVALID);
        assert_eq!(p.consume(), TokenIdx::INVALID);
    }

    #[test]
    fn match_tk_reports_on_mismatch_without_advancing() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("a", &mut sink);
        let mut slot = TokenIdx::INVALID;
        assert!(!p.match_tk(TokenKind::Semicolon, &mut slot));
        assert!(!slot.is_valid());
        assert_eq!(p.pos, 0);
        assert_eq!(sink.diagnostics.len(), 1);
        assert_eq!(
            sink.diagnostics[0].kind,
            DiagnosticKind::ExpectedToken(TokenKind::Semicolon)
        );
    }

    #[test]
    fn skip_to_respects_nesting() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("( ; ) ;", &mut sink);
        p.skip_to(TokenKind::Semicolon);
        // The `;` inside the parens does not count.
        assert_eq!(p.pos, 3);
    }

    #[test]
    fn backtracker_restores_position_and_drops_deferred_reports() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("a b c", &mut sink);
        p.consume();

        let bt = p.start_speculation();
        p.consume();
        p.report_here(DiagnosticKind::ExpectedTypeSpecifier);
        p.backtrack(bt);

        assert_eq!(p.pos, 1);
        assert!(sink.diagnostics.is_empty());
    }

    #[test]
    fn commit_flushes_deferred_reports_in_order() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("a b c", &mut sink);

        let bt = p.start_speculation();
        p.report_here(DiagnosticKind::ExpectedTypeSpecifier);
        p.consume();
        p.report_here(DiagnosticKind::ExpectedFirstOfExpression);
        p.commit(bt);

        assert_eq!(sink.diagnostics.len(), 2);
        assert_eq!(sink.diagnostics[0].kind, DiagnosticKind::ExpectedTypeSpecifier);
        assert_eq!(sink.diagnostics[0].token, TokenIdx(0));
        assert_eq!(sink.diagnostics[1].kind, DiagnosticKind::ExpectedFirstOfExpression);
        assert_eq!(sink.diagnostics[1].token, TokenIdx(1));
    }

    #[test]
    fn ignore_declaration_skips_past_top_level_semicolon() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("a { ; } ; int", &mut sink);
        p.ignore_declaration_or_definition();
        // Stops after the brace-balanced block's closing `}`.
        assert_eq!(p.peek_kind(1), TokenKind::Semicolon);
        p.ignore_declaration_or_definition();
        assert_eq!(p.peek_kind(1), TokenKind::KwInt);
    }

    #[test]
    fn ignore_declaration_stops_before_declaration_start() {
        let mut sink = DiagnosticList::new();
        let mut p = parser_over("a b static int x", &mut sink);
        p.ignore_declaration_or_definition();
        assert_eq!(p.peek_kind(1), TokenKind::KwStatic);
    }
}
