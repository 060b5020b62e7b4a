//! C declarator syntax: pointer chains, direct declarators, array and
//! function suffixes, bit-fields, and abstract declarators.

use log::trace;

use crate::diagnostics::DiagnosticKind;
use crate::options::StandardVersion;
use crate::parser::core::{ParseResult, Parser};
use crate::parser::declarations::DeclarationScope;
use crate::syntax::kind::SyntaxKind;
use crate::syntax::node::*;
use crate::tokens::{TokenIdx, TokenKind};

/// Whether a declarator names the entity or omits the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclaratorVariety {
    Named,
    Abstract,
}

impl<'s> Parser<'s> {
    pub(super) fn parse_declarator(
        &mut self,
        scope: DeclarationScope,
    ) -> ParseResult<Option<NodeId>> {
        self.parse_declarator_with(scope, DeclaratorVariety::Named)
    }

    pub(super) fn parse_abstract_declarator(&mut self) -> ParseResult<Option<NodeId>> {
        self.parse_declarator_with(DeclarationScope::FunctionPrototype, DeclaratorVariety::Abstract)
    }

    /// declarator: pointer? direct-declarator
    fn parse_declarator_with(
        &mut self,
        scope: DeclarationScope,
        variety: DeclaratorVariety,
    ) -> ParseResult<Option<NodeId>> {
        trace!("parse_declarator");

        let mut attrs = Vec::new();
        if self.at(TokenKind::KwGnuAttribute)
            && !self.parse_attribute_specifier_list_at_first(&mut attrs)?
        {
            return Ok(None);
        }

        if self.at(TokenKind::Asterisk) {
            let asterisk_tk = self.consume();
            let mut quals_and_attrs = Vec::new();
            if !self.parse_type_qualifiers_and_attributes(&mut quals_and_attrs)? {
                return Ok(None);
            }
            let Some(inner) = self.parse_declarator_with(scope, variety)? else {
                return Ok(None);
            };
            return Ok(Some(self.alloc(SyntaxNode::PointerDeclarator(PointerDeclaratorSyntax {
                attrs,
                asterisk_tk,
                quals_and_attrs,
                inner: Some(inner),
                equals_tk: TokenIdx::INVALID,
                init: None,
            }))));
        }

        self.parse_direct_declarator(scope, variety, attrs)
    }

    /// direct-declarator:
    ///     identifier | `(` declarator `)` | (empty, abstract only)
    /// followed by any number of `( ... )` / `[ ... ]` suffixes.
    fn parse_direct_declarator(
        &mut self,
        scope: DeclarationScope,
        variety: DeclaratorVariety,
        attrs: Vec<NodeId>,
    ) -> ParseResult<Option<NodeId>> {
        let mut decltor: Option<NodeId>;

        match self.peek_kind(1) {
            TokenKind::Identifier => {
                if variety == DeclaratorVariety::Abstract {
                    return Ok(None);
                }

                let ident_tk = self.consume();
                let ident = self.alloc(SyntaxNode::IdentifierDeclarator(
                    IdentifierDeclaratorSyntax {
                        ident_tk,
                        attrs1: attrs,
                        attrs2: Vec::new(),
                        equals_tk: TokenIdx::INVALID,
                        init: None,
                    },
                ));

                decltor = Some(ident);
                if !self.parse_direct_declarator_suffix(
                    &mut decltor,
                    scope,
                    variety,
                    Vec::new(),
                    Some(ident),
                )? {
                    return Ok(None);
                }

                // Asm label and/or attributes after the identifier
                // attach to its second attribute slot.
                let mut attrs2 = Vec::new();
                match self.peek_kind(1) {
                    TokenKind::KwGnuAsm => {
                        let Some(label) = self.parse_asm_label_at_first()? else {
                            return Ok(None);
                        };
                        attrs2.push(label);
                        if self.at(TokenKind::KwGnuAttribute)
                            && !self.parse_attribute_specifier_list_at_first(&mut attrs2)?
                        {
                            return Ok(None);
                        }
                    }
                    TokenKind::KwGnuAttribute => {
                        if !self.parse_attribute_specifier_list_at_first(&mut attrs2)? {
                            return Ok(None);
                        }
                    }
                    _ => {}
                }
                if !attrs2.is_empty() {
                    if let SyntaxNode::IdentifierDeclarator(n) = self.node_mut(ident) {
                        n.attrs2 = attrs2;
                    }
                }
            }

            TokenKind::OpenParen => {
                if variety == DeclaratorVariety::Abstract {
                    return self.parse_abstract_direct_declarator_at_paren(scope, attrs);
                }

                let open_paren_tk = self.consume();
                let Some(inner) = self.parse_declarator_with(scope, variety)? else {
                    return Ok(None);
                };
                let mut close_paren_tk = TokenIdx::INVALID;
                if !self.match_tk(TokenKind::CloseParen, &mut close_paren_tk) {
                    return Ok(None);
                }
                let paren = self.alloc(SyntaxNode::ParenthesizedDeclarator(
                    ParenthesizedDeclaratorSyntax {
                        open_paren_tk,
                        inner: Some(inner),
                        close_paren_tk,
                    },
                ));

                decltor = None;
                if !self.parse_direct_declarator_suffix(
                    &mut decltor,
                    scope,
                    variety,
                    attrs,
                    Some(paren),
                )? {
                    return Ok(None);
                }
                if decltor.is_none() {
                    decltor = Some(paren);
                }
            }

            TokenKind::OpenBracket => {
                if variety == DeclaratorVariety::Abstract {
                    decltor = None;
                    if !self.parse_direct_declarator_suffix(
                        &mut decltor, scope, variety, attrs, None,
                    )? {
                        return Ok(None);
                    }
                } else {
                    self.report_here(DiagnosticKind::ExpectedFirstOfDirectDeclarator);
                    return Ok(None);
                }
            }

            // A bare `:` opens an anonymous bit-field.
            TokenKind::Colon
                if variety == DeclaratorVariety::Named && scope == DeclarationScope::Block =>
            {
                let colon_tk = self.consume();
                let Some(expr) = self.parse_expression_with_precedence_conditional()? else {
                    return Ok(None);
                };
                return Ok(Some(self.alloc(SyntaxNode::BitfieldDeclarator(
                    BitfieldDeclaratorSyntax {
                        inner: None,
                        colon_tk,
                        expr: Some(expr),
                        attrs: Vec::new(),
                    },
                ))));
            }

            _ => {
                if variety == DeclaratorVariety::Abstract {
                    return Ok(Some(self.alloc(SyntaxNode::AbstractDeclarator(
                        AbstractDeclaratorSyntax { attrs },
                    ))));
                }
                self.report_here(DiagnosticKind::ExpectedFirstOfDirectDeclarator);
                return Ok(None);
            }
        }

        // `decl : width` bit-field at member scope.
        if self.at(TokenKind::Colon)
            && variety == DeclaratorVariety::Named
            && scope == DeclarationScope::Block
        {
            let colon_tk = self.consume();
            let Some(expr) = self.parse_expression_with_precedence_conditional()? else {
                return Ok(None);
            };
            let mut bf = BitfieldDeclaratorSyntax {
                inner: decltor,
                colon_tk,
                expr: Some(expr),
                attrs: Vec::new(),
            };
            if self.at(TokenKind::KwGnuAttribute)
                && !self.parse_attribute_specifier_list_at_first(&mut bf.attrs)?
            {
                return Ok(None);
            }
            return Ok(Some(self.alloc(SyntaxNode::BitfieldDeclarator(bf))));
        }

        Ok(decltor)
    }

    /// Abstract-declarator `(`: either a parameter suffix right away,
    /// or a parenthesized inner abstract declarator, disambiguated by
    /// bounded backtracking.
    fn parse_abstract_direct_declarator_at_paren(
        &mut self,
        scope: DeclarationScope,
        attrs: Vec<NodeId>,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenParen));

        if self.peek_kind(2) == TokenKind::CloseParen {
            let mut decltor = None;
            if !self.parse_direct_declarator_suffix(
                &mut decltor,
                scope,
                DeclaratorVariety::Abstract,
                attrs,
                None,
            )? {
                return Ok(None);
            }
            return Ok(decltor);
        }

        let bt = self.start_speculation();
        let open_paren_tk = self.consume();
        let inner = self.parse_abstract_declarator()?;
        match inner {
            Some(inner) if self.at(TokenKind::CloseParen) => {
                self.commit(bt);
                let close_paren_tk = self.consume();
                let paren = self.alloc(SyntaxNode::ParenthesizedDeclarator(
                    ParenthesizedDeclaratorSyntax {
                        open_paren_tk,
                        inner: Some(inner),
                        close_paren_tk,
                    },
                ));
                let mut decltor = Some(paren);
                if !self.parse_direct_declarator_suffix(
                    &mut decltor,
                    scope,
                    DeclaratorVariety::Abstract,
                    attrs,
                    Some(paren),
                )? {
                    return Ok(None);
                }
                Ok(decltor)
            }

            _ => {
                // Not a nested declarator after all; the paren begins
                // a parameter suffix of the empty abstract declarator.
                self.backtrack(bt);
                let abs = self
                    .alloc(SyntaxNode::AbstractDeclarator(AbstractDeclaratorSyntax { attrs }));
                let mut decltor = Some(abs);
                if !self.parse_direct_declarator_suffix(
                    &mut decltor,
                    scope,
                    DeclaratorVariety::Abstract,
                    Vec::new(),
                    Some(abs),
                )? {
                    return Ok(None);
                }
                Ok(decltor)
            }
        }
    }

    /// Zero or more `( ... )` / `[ ... ]` suffixes applied left to
    /// right; each new suffix wraps the declarator built so far as its
    /// inner declarator. Leaves `decltor` untouched when no suffix is
    /// present.
    fn parse_direct_declarator_suffix(
        &mut self,
        decltor: &mut Option<NodeId>,
        scope: DeclarationScope,
        variety: DeclaratorVariety,
        attrs1: Vec<NodeId>,
        inner: Option<NodeId>,
    ) -> ParseResult<bool> {
        let (kind, suffix) = match self.peek_kind(1) {
            TokenKind::OpenParen => {
                let mut sfx = ParameterSuffixSyntax {
                    open_paren_tk: self.consume(),
                    decls: Vec::new(),
                    ellipsis_tk: TokenIdx::INVALID,
                    close_paren_tk: TokenIdx::INVALID,
                    omission_tk: TokenIdx::INVALID,
                };
                if !self.parse_parameter_declaration_list_and_or_ellipsis(&mut sfx)? {
                    return Ok(false);
                }
                if !self.match_tk(TokenKind::CloseParen, &mut sfx.close_paren_tk) {
                    return Ok(false);
                }
                if self.at(TokenKind::KwOmission) {
                    sfx.omission_tk = self.consume();
                }
                (SyntaxKind::FunctionDeclarator, self.alloc(SyntaxNode::ParameterSuffix(sfx)))
            }

            TokenKind::OpenBracket => {
                let Some(sfx) = self.parse_subscript_suffix_at_first(scope)? else {
                    return Ok(false);
                };
                (SyntaxKind::ArrayDeclarator, sfx)
            }

            _ => return Ok(true),
        };

        let aof = self.alloc(SyntaxNode::ArrayOrFunctionDeclarator(
            ArrayOrFunctionDeclaratorSyntax {
                kind,
                attrs1,
                inner,
                suffix,
                attrs2: Vec::new(),
                equals_tk: TokenIdx::INVALID,
                init: None,
            },
        ));
        *decltor = Some(aof);

        // Asm label and/or attributes after the suffix.
        let mut attrs2 = Vec::new();
        match self.peek_kind(1) {
            TokenKind::KwGnuAsm => {
                let Some(label) = self.parse_asm_label_at_first()? else {
                    return Ok(false);
                };
                attrs2.push(label);
                if self.at(TokenKind::KwGnuAttribute)
                    && !self.parse_attribute_specifier_list_at_first(&mut attrs2)?
                {
                    return Ok(false);
                }
            }
            TokenKind::KwGnuAttribute => {
                if !self.parse_attribute_specifier_list_at_first(&mut attrs2)? {
                    return Ok(false);
                }
            }
            _ => {}
        }
        if !attrs2.is_empty() {
            if let SyntaxNode::ArrayOrFunctionDeclarator(n) = self.node_mut(aof) {
                n.attrs2 = attrs2;
            }
        }

        match self.peek_kind(1) {
            TokenKind::OpenParen | TokenKind::OpenBracket => {
                self.parse_direct_declarator_suffix(decltor, scope, variety, Vec::new(), Some(aof))
            }
            _ => Ok(true),
        }
    }

    /// `[ ]`, `[*]`, `[static quals? expr]`, `[quals static? expr?]`,
    /// or `[expr]`. The `*`, `static`, and qualifier forms are legal
    /// only inside function-prototype scope.
    fn parse_subscript_suffix_at_first(
        &mut self,
        scope: DeclarationScope,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenBracket));

        let mut sfx = SubscriptSuffixSyntax {
            open_bracket_tk: self.consume(),
            asterisk_tk: TokenIdx::INVALID,
            static_kw_tk: TokenIdx::INVALID,
            quals_and_attrs1: Vec::new(),
            quals_and_attrs2: Vec::new(),
            expr: None,
            close_bracket_tk: TokenIdx::INVALID,
        };

        let kind = self.peek_kind(1);
        match kind {
            TokenKind::CloseBracket => {}

            TokenKind::Asterisk => {
                self.check_array_declarator_dialect();
                if !self.validate_prototype_context(
                    scope,
                    DiagnosticKind::UnexpectedPointerInArrayDeclarator,
                ) {
                    return Ok(None);
                }
                sfx.asterisk_tk = self.consume();
            }

            _ if kind.is_type_qualifier()
                || kind == TokenKind::KwGnuAttribute
                || kind == TokenKind::KwStatic =>
            {
                self.check_array_declarator_dialect();
                if !self.validate_prototype_context(
                    scope,
                    DiagnosticKind::UnexpectedStaticOrTypeQualifierInArrayDeclarator,
                ) {
                    return Ok(None);
                }

                if kind != TokenKind::KwStatic {
                    if !self.parse_type_qualifiers_and_attributes(&mut sfx.quals_and_attrs1)? {
                        self.skip_to(TokenKind::CloseBracket);
                        return Ok(None);
                    }
                }

                match self.peek_kind(1) {
                    TokenKind::Asterisk => sfx.asterisk_tk = self.consume(),

                    TokenKind::KwStatic => {
                        sfx.static_kw_tk = self.consume();
                        let next = self.peek_kind(1);
                        if next.is_type_qualifier() || next == TokenKind::KwGnuAttribute {
                            if !self
                                .parse_type_qualifiers_and_attributes(&mut sfx.quals_and_attrs2)?
                            {
                                self.skip_to(TokenKind::CloseBracket);
                                return Ok(None);
                            }
                        }
                        sfx.expr = self.parse_expression_with_precedence_assignment()?;
                        if sfx.expr.is_none() {
                            self.skip_to(TokenKind::CloseBracket);
                            return Ok(None);
                        }
                    }

                    TokenKind::CloseBracket => {}

                    _ => {
                        sfx.expr = self.parse_expression_with_precedence_assignment()?;
                        if sfx.expr.is_none() {
                            self.skip_to(TokenKind::CloseBracket);
                            return Ok(None);
                        }
                    }
                }
            }

            _ => {
                sfx.expr = self.parse_expression_with_precedence_assignment()?;
                if sfx.expr.is_none() {
                    self.skip_to(TokenKind::CloseBracket);
                    return Ok(None);
                }
            }
        }

        if !self.match_or_skip_to(TokenKind::CloseBracket, &mut sfx.close_bracket_tk) {
            return Ok(None);
        }
        Ok(Some(self.alloc(SyntaxNode::SubscriptSuffix(sfx))))
    }

    fn check_array_declarator_dialect(&mut self) {
        if self.tree.dialect().std < StandardVersion::C99 {
            self.report_here(DiagnosticKind::ExpectedFeature(
                "C99 array declarators with `*', `static', and type-qualifiers \
                 within function parameters",
            ));
        }
    }

    /// Reports and discards the bracket contents outside prototype
    /// scope.
    fn validate_prototype_context(
        &mut self,
        scope: DeclarationScope,
        report: DiagnosticKind,
    ) -> bool {
        if scope != DeclarationScope::FunctionPrototype {
            self.report_here(report);
            self.skip_to(TokenKind::CloseBracket);
            return false;
        }
        true
    }
}
