//! A resilient recursive-descent parser for C (ISO C11 plus
//! widely-used GNU extensions and quantified/template-type
//! extensions), producing a concrete syntax tree that preserves every
//! source token index.
//!
//! The parser always produces a tree when the token stream is intact:
//! malformed input is reported through the injected [`DiagnosticsSink`]
//! and recovered from construct by construct. Only an unrecoverable
//! token stream or pathological expression nesting aborts a parse.
//!
//! ```no_run
//! use cparse::{parse_source, DiagnosticList, LanguageDialect, LanguageExtensions};
//!
//! let mut diagnostics = DiagnosticList::new();
//! let tree = parse_source(
//!     "typedef int T; T x;",
//!     LanguageDialect::default(),
//!     LanguageExtensions::default(),
//!     &mut diagnostics,
//! )?;
//! assert!(tree.root().is_some());
//! # Ok::<(), cparse::ParseError>(())
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod options;
pub mod syntax;
pub mod tokens;

mod parser;

pub use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticList, DiagnosticsSink};
pub use crate::lexer::{lex, Interner, LexError};
pub use crate::options::{LanguageDialect, LanguageExtensions, StandardVersion};
pub use crate::parser::{ParseError, Parser};
pub use crate::syntax::kind::SyntaxKind;
pub use crate::syntax::node::{NodeId, SyntaxNode};
pub use crate::syntax::tree::SyntaxTree;
pub use crate::tokens::{Token, TokenIdx, TokenKind};

/// Parse an already-lexed token sequence. The stream is normalized to
/// end in an `Eof` token.
pub fn parse_tokens(
    mut tokens: Vec<Token>,
    interner: Interner,
    dialect: LanguageDialect,
    extensions: LanguageExtensions,
    sink: &mut dyn DiagnosticsSink,
) -> Result<SyntaxTree, ParseError> {
    if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
        tokens.push(Token::punct(TokenKind::Eof));
    }
    let tree = SyntaxTree::new(tokens, interner, dialect, extensions);
    Parser::new(tree, sink).parse()
}

/// Lex and parse a source string.
pub fn parse_source(
    source: &str,
    dialect: LanguageDialect,
    extensions: LanguageExtensions,
    sink: &mut dyn DiagnosticsSink,
) -> Result<SyntaxTree, ParseError> {
    let (tokens, interner) = lexer::lex(source)?;
    parse_tokens(tokens, interner, dialect, extensions, sink)
}
