//! Structured parser diagnostics.
//!
//! The parser never formats text. Every report is a `Diagnostic` value:
//! a kind from a closed set plus the index of the token the report is
//! anchored at. The sink is an injected collaborator with one named
//! method per report kind, so downstream consumers (IDEs, test
//! harnesses) stay fully machine-readable.

use crate::tokens::{TokenCategory, TokenIdx, TokenKind};

/// The closed set of report kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    ExpectedToken(TokenKind),
    ExpectedTokenWithin(Vec<TokenKind>),
    ExpectedTokenOfCategory(TokenCategory),
    /// An extension construct was used while its flag is disabled.
    ExpectedFeature(&'static str),

    ExpectedTypeSpecifier,
    ExpectedFirstOfExpression,
    ExpectedFirstOfEnumerationConstant,
    ExpectedFirstOfDirectDeclarator,
    ExpectedFirstOfSpecifierQualifier,
    ExpectedFollowOfDeclarator,
    ExpectedFollowOfInitializedDeclarator,
    ExpectedFollowOfStructOrUnionOrEnum,
    ExpectedFollowOfDesignatedInitializer,

    ExpectedBraceEnclosedInitializerList,
    ExpectedFieldDesignator,
    ExpectedFieldName,
    NamedParameterBeforeEllipsis,
    UnexpectedInitializerOfDeclarator,
    UnexpectedPointerInArrayDeclarator,
    UnexpectedStaticOrTypeQualifierInArrayDeclarator,
}

/// One structured report, anchored at a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub token: TokenIdx,
}

/// The append-only diagnostics sink.
///
/// `report` is the single required method; the named methods mirror the
/// report kinds and are what the parser calls.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn expected_token(&mut self, at: TokenIdx, kind: TokenKind) {
        self.report(Diagnostic { kind: DiagnosticKind::ExpectedToken(kind), token: at });
    }

    fn expected_token_within(&mut self, at: TokenIdx, kinds: &[TokenKind]) {
        self.report(Diagnostic {
            kind: DiagnosticKind::ExpectedTokenWithin(kinds.to_vec()),
            token: at,
        });
    }

    fn expected_token_of_category(&mut self, at: TokenIdx, category: TokenCategory) {
        self.report(Diagnostic { kind: DiagnosticKind::ExpectedTokenOfCategory(category), token: at });
    }

    fn expected_feature(&mut self, at: TokenIdx, feature: &'static str) {
        self.report(Diagnostic { kind: DiagnosticKind::ExpectedFeature(feature), token: at });
    }
}

/// The default sink: an in-memory, append-only list.
#[derive(Debug, Default)]
pub struct DiagnosticList {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &DiagnosticKind> {
        self.diagnostics.iter().map(|d| &d.kind)
    }
}

impl DiagnosticsSink for DiagnosticList {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
