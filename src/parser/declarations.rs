//! External declarations, specifier lists, the identifier-role
//! lookahead, and initializers.

use log::trace;

use crate::diagnostics::DiagnosticKind;
use crate::options::StandardVersion;
use crate::parser::core::{ParseResult, Parser};
use crate::syntax::kind::SyntaxKind;
use crate::syntax::node::*;
use crate::syntax::utils::{inner_declarator, stripped_declarator};
use crate::tokens::{TokenIdx, TokenKind};

/// Where a declaration appears; drives declarator validation and the
/// identifier-role consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclarationScope {
    File,
    Block,
    FunctionPrototype,
}

/// The verdict of the identifier-role lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum IdentifierRole {
    AsTypedefName,
    AsDeclarator,
}

type SpecifierParserFn<'s> =
    fn(&mut Parser<'s>, &mut Option<NodeId>, &mut Vec<NodeId>, bool) -> ParseResult<bool>;
type AtFollowParserFn<'s> = fn(&mut Parser<'s>, Vec<NodeId>) -> ParseResult<Option<NodeId>>;
type MemberParserFn<'s> = fn(&mut Parser<'s>) -> ParseResult<Option<NodeId>>;
type DesignatorParserFn<'s> = fn(&mut Parser<'s>) -> ParseResult<Option<NodeId>>;

impl<'s> Parser<'s> {
    /// Parse a translation-unit: external declarations until
    /// end-of-file, resynchronizing after every failure.
    pub(super) fn parse_translation_unit(&mut self) -> ParseResult<NodeId> {
        trace!("parse_translation_unit");

        let mut decls = Vec::new();
        loop {
            match self.peek_kind(1) {
                TokenKind::Eof => break,

                TokenKind::KwGnuExtension => {
                    let ext_kw = self.consume();
                    match self.parse_external_declaration()? {
                        Some(decl) => {
                            self.set_declaration_ext_kw(decl, ext_kw);
                            decls.push(decl);
                        }
                        None => self.ignore_declaration_or_definition(),
                    }
                }

                _ => match self.parse_external_declaration()? {
                    Some(decl) => decls.push(decl),
                    None => self.ignore_declaration_or_definition(),
                },
            }
        }

        Ok(self.alloc(SyntaxNode::TranslationUnit(TranslationUnitSyntax { decls })))
    }

    /// external-declaration: function-definition | declaration
    pub(super) fn parse_external_declaration(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_external_declaration");

        match self.peek_kind(1) {
            TokenKind::Semicolon => Ok(Some(self.parse_incomplete_declaration_at_first(Vec::new()))),
            TokenKind::KwStaticAssert => self.parse_static_assert_declaration_at_first(),
            TokenKind::KwGnuAsm => self.parse_asm_declaration_at_first(),
            TokenKind::KwTemplate => self.parse_template_declaration_at_first(),
            _ => self.parse_declaration_or_function_definition(),
        }
    }

    /// A lone `;`, or specifiers with no declarators.
    fn parse_incomplete_declaration_at_first(&mut self, specs: Vec<NodeId>) -> NodeId {
        debug_assert!(self.at(TokenKind::Semicolon));

        let semicolon_tk = self.consume();
        self.alloc(SyntaxNode::IncompleteDeclaration(IncompleteDeclarationSyntax {
            ext_kw_tk: TokenIdx::INVALID,
            specs,
            semicolon_tk,
        }))
    }

    /// static_assert-declaration:
    ///     `_Static_assert ( constant-expression , string-literal ) ;`
    fn parse_static_assert_declaration_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwStaticAssert));

        let mut n = StaticAssertDeclarationSyntax {
            ext_kw_tk: TokenIdx::INVALID,
            static_assert_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            expr: None,
            comma_tk: TokenIdx::INVALID,
            string_lit: None,
            close_paren_tk: TokenIdx::INVALID,
            semicolon_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && {
                n.expr = self.parse_expression_with_precedence_conditional()?;
                n.expr.is_some()
            }
            && self.match_tk(TokenKind::Comma, &mut n.comma_tk)
            && {
                n.string_lit = self.parse_string_literal()?;
                n.string_lit.is_some()
            }
            && self.match_tk(TokenKind::CloseParen, &mut n.close_paren_tk)
            && self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::StaticAssertDeclaration(n))))
        } else {
            self.skip_to(TokenKind::Semicolon);
            Ok(None)
        }
    }

    /// File-scope GNU assembly: `__asm__ ( string-literal ) ;`
    fn parse_asm_declaration_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwGnuAsm));

        if !self.tree.extensions().gnu_asm {
            self.report_here(DiagnosticKind::ExpectedFeature("GNU assembly in C"));
        }

        let mut n = AsmDeclarationSyntax {
            ext_kw_tk: TokenIdx::INVALID,
            asm_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            string_lit: None,
            close_paren_tk: TokenIdx::INVALID,
            semicolon_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && {
                n.string_lit = self.parse_string_literal()?;
                n.string_lit.is_some()
            }
            && self.match_tk(TokenKind::CloseParen, &mut n.close_paren_tk);

        if !ok {
            self.skip_to(TokenKind::CloseParen);
            return Ok(None);
        }
        // The trailing semicolon is optional in practice.
        if self.at(TokenKind::Semicolon) {
            n.semicolon_tk = self.consume();
        }
        Ok(Some(self.alloc(SyntaxNode::AsmDeclaration(n))))
    }

    /// `_Template` wrapper around a declaration (project extension).
    fn parse_template_declaration_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwTemplate));

        if !self.tree.extensions().template_declarations {
            self.report_here(DiagnosticKind::ExpectedFeature("template declarations"));
        }

        let template_kw_tk = self.consume();
        let decl = self.parse_declaration_or_function_definition()?;
        Ok(Some(self.alloc(SyntaxNode::TemplateDeclaration(TemplateDeclarationSyntax {
            template_kw_tk,
            decl,
        }))))
    }

    /// The shared declaration engine: a specifier prefix, then either a
    /// bare `;`, or whatever the `at_follow` continuation recognizes.
    fn parse_declaration_with(
        &mut self,
        parse_specifiers: SpecifierParserFn<'s>,
        parse_at_follow: AtFollowParserFn<'s>,
        scope: DeclarationScope,
    ) -> ParseResult<Option<NodeId>> {
        let mut decl: Option<NodeId> = None;
        let mut specs: Vec<NodeId> = Vec::new();
        if !parse_specifiers(self, &mut decl, &mut specs, scope != DeclarationScope::Block)? {
            return Ok(None);
        }

        if self.at(TokenKind::Semicolon) {
            return match decl {
                // A tagged type with a body: the `;` belongs to the
                // tag declaration itself.
                Some(decl) => {
                    let semicolon_tk = self.consume();
                    if let SyntaxNode::TypeDeclaration(n) = self.node_mut(decl) {
                        n.semicolon_tk = semicolon_tk;
                    }
                    Ok(Some(decl))
                }
                None => Ok(Some(self.parse_incomplete_declaration_at_first(specs))),
            };
        }

        // Declarators follow an inline tag declaration: lift the tag
        // into the specifier list.
        if let Some(type_decl) = decl {
            let tag_spec = match self.node(type_decl) {
                SyntaxNode::TypeDeclaration(n) => n.type_spec,
                _ => unreachable!("inline declaration is always a type declaration"),
            };
            let wrapper = self.alloc(SyntaxNode::TypeDeclarationAsSpecifier(
                TypeDeclarationAsSpecifierSyntax { type_decl },
            ));
            match specs.iter_mut().find(|s| **s == tag_spec) {
                Some(slot) => *slot = wrapper,
                None => specs.push(wrapper),
            }
        }

        if specs.is_empty() {
            match scope {
                DeclarationScope::File => self.report_here(DiagnosticKind::ExpectedTypeSpecifier),
                DeclarationScope::Block => {
                    self.report_here(DiagnosticKind::ExpectedFirstOfSpecifierQualifier)
                }
                DeclarationScope::FunctionPrototype => {}
            }
        }

        parse_at_follow(self, specs)
    }

    /// declaration: declaration-specifiers init-declarator-list? `;`
    /// function-definition: declaration-specifiers declarator compound-statement
    pub(super) fn parse_declaration_or_function_definition(
        &mut self,
    ) -> ParseResult<Option<NodeId>> {
        trace!("parse_declaration_or_function_definition");

        self.parse_declaration_with(
            Parser::parse_declaration_specifiers,
            Parser::parse_declaration_or_function_definition_at_follow_of_specifiers,
            DeclarationScope::File,
        )
    }

    fn parse_declaration_or_function_definition_at_follow_of_specifiers(
        &mut self,
        specs: Vec<NodeId>,
    ) -> ParseResult<Option<NodeId>> {
        let mut decltors: Vec<ListElem> = Vec::new();

        loop {
            let Some(decltor) = self.parse_declarator(DeclarationScope::File)? else {
                return Ok(None);
            };
            decltors.push(ListElem::new(decltor));

            let mut had_init = false;
            if self.at(TokenKind::Equals) {
                if !self.attach_initializer(decltor)? {
                    return Ok(None);
                }
                had_init = true;
            }

            match self.peek_kind(1) {
                TokenKind::Comma => {
                    decltors.last_mut().expect("just pushed").delim_tk = self.consume();
                }

                TokenKind::Semicolon => {
                    let semicolon_tk = self.consume();
                    return Ok(Some(self.alloc(SyntaxNode::VariableAndOrFunctionDeclaration(
                        VariableAndOrFunctionDeclarationSyntax {
                            ext_kw_tk: TokenIdx::INVALID,
                            specs,
                            decltors,
                            semicolon_tk,
                        },
                    ))));
                }

                TokenKind::OpenBrace
                    if decltors.len() == 1 && self.declares_function_of_identifier(decltor) =>
                {
                    let body = self.parse_compound_statement_at_first()?;
                    return Ok(Some(self.alloc(SyntaxNode::FunctionDefinition(
                        FunctionDefinitionSyntax {
                            ext_kw_tk: TokenIdx::INVALID,
                            specs,
                            decltor,
                            body,
                        },
                    ))));
                }

                _ => {
                    if had_init {
                        self.report_here(DiagnosticKind::ExpectedFollowOfInitializedDeclarator);
                    } else {
                        self.report_here(DiagnosticKind::ExpectedFollowOfDeclarator);
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// True when the outermost non-parenthesized shape of `decltor` is
    /// a function declarator wrapping an identifier (so a following `{`
    /// begins a function definition).
    fn declares_function_of_identifier(&self, decltor: NodeId) -> bool {
        let mut outer = stripped_declarator(&self.tree, decltor);
        let mut prev = None;
        loop {
            let inner = inner_declarator(&self.tree, outer);
            if inner == outer {
                break;
            }
            prev = Some(outer);
            outer = stripped_declarator(&self.tree, inner);
        }
        matches!(
            (prev.map(|p| self.node(p).kind()), self.node(outer).kind()),
            (Some(SyntaxKind::FunctionDeclarator), SyntaxKind::IdentifierDeclarator)
        )
    }

    /// At `=`: attach the equals token and initializer to the innermost
    /// non-qualifier declarator shape that may carry one.
    fn attach_initializer(&mut self, decltor: NodeId) -> ParseResult<bool> {
        debug_assert!(self.at(TokenKind::Equals));

        let stripped = stripped_declarator(&self.tree, decltor);
        let target = match self.node(stripped) {
            SyntaxNode::IdentifierDeclarator(_) | SyntaxNode::PointerDeclarator(_) => {
                Some(stripped)
            }
            SyntaxNode::ArrayOrFunctionDeclarator(n) => match n.kind {
                SyntaxKind::ArrayDeclarator => Some(stripped),
                // A function declarator takes an initializer only when
                // it is really a function pointer.
                _ => match n.inner {
                    Some(inner) => {
                        let inner = stripped_declarator(&self.tree, inner);
                        matches!(self.node(inner), SyntaxNode::PointerDeclarator(_))
                            .then_some(stripped)
                    }
                    None => None,
                },
            },
            _ => None,
        };

        let Some(target) = target else {
            self.report_here(DiagnosticKind::UnexpectedInitializerOfDeclarator);
            self.ignore_declarator();
            return Ok(false);
        };

        let equals_tk = self.consume();
        let Some(init) = self.parse_initializer()? else {
            return Ok(false);
        };
        match self.node_mut(target) {
            SyntaxNode::IdentifierDeclarator(n) => {
                n.equals_tk = equals_tk;
                n.init = Some(init);
            }
            SyntaxNode::PointerDeclarator(n) => {
                n.equals_tk = equals_tk;
                n.init = Some(init);
            }
            SyntaxNode::ArrayOrFunctionDeclarator(n) => {
                n.equals_tk = equals_tk;
                n.init = Some(init);
            }
            _ => unreachable!("initializer target is a declarator"),
        }
        Ok(true)
    }

    // === Identifier-role lookahead ===

    /// Standing on an `Identifier` in a declaration-specifier context,
    /// decide whether it plays the role of a typedef-name or of a
    /// declarator. Scans from LA(2) with a parenthesis depth and the
    /// seen-type flag; no cursor side effects.
    pub(super) fn determine_identifier_role(&self, mut seen_type: bool) -> IdentifierRole {
        let mut paren_count = 0i32;
        let mut la = 2usize;
        loop {
            let kind = self.peek_kind(la);
            match kind {
                TokenKind::Identifier => {
                    if seen_type {
                        return IdentifierRole::AsDeclarator;
                    }
                    if paren_count == 0 {
                        return IdentifierRole::AsTypedefName;
                    }
                    seen_type = true;
                }

                _ if kind.is_builtin_type_specifier()
                    || matches!(
                        kind,
                        TokenKind::KwStruct | TokenKind::KwUnion | TokenKind::KwEnum
                    ) =>
                {
                    if seen_type {
                        return IdentifierRole::AsDeclarator;
                    }
                    seen_type = true;
                }

                _ if kind.is_storage_class()
                    || kind.is_type_qualifier()
                    || kind.is_function_specifier()
                    || kind == TokenKind::KwAlignas => {}

                TokenKind::KwGnuAttribute => {
                    if paren_count == 0 {
                        return IdentifierRole::AsTypedefName;
                    }
                }

                TokenKind::Asterisk => {}

                TokenKind::OpenParen => paren_count += 1,

                TokenKind::CloseParen => {
                    paren_count -= 1;
                    if paren_count == 0 {
                        return if seen_type {
                            IdentifierRole::AsTypedefName
                        } else {
                            IdentifierRole::AsDeclarator
                        };
                    }
                }

                _ => return IdentifierRole::AsDeclarator,
            }
            la += 1;
        }
    }

    // === Struct members and enumerators ===

    /// struct-declaration: specifier-qualifier-list struct-declarator-list? `;`
    pub(super) fn parse_struct_declaration(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_struct_declaration");

        match self.peek_kind(1) {
            TokenKind::KwStaticAssert => self.parse_static_assert_declaration_at_first(),

            TokenKind::KwGnuExtension => {
                let ext_kw = self.consume();
                let decl = self.parse_declaration_with(
                    Parser::parse_specifier_qualifier_list,
                    Parser::parse_struct_declaration_at_follow_of_specifier_qualifiers,
                    DeclarationScope::Block,
                )?;
                if let Some(decl) = decl {
                    self.set_declaration_ext_kw(decl, ext_kw);
                    Ok(Some(decl))
                } else {
                    Ok(None)
                }
            }

            _ => self.parse_declaration_with(
                Parser::parse_specifier_qualifier_list,
                Parser::parse_struct_declaration_at_follow_of_specifier_qualifiers,
                DeclarationScope::Block,
            ),
        }
    }

    fn parse_struct_declaration_at_follow_of_specifier_qualifiers(
        &mut self,
        specs: Vec<NodeId>,
    ) -> ParseResult<Option<NodeId>> {
        let mut decltors: Vec<ListElem> = Vec::new();

        loop {
            let Some(decltor) = self.parse_declarator(DeclarationScope::Block)? else {
                return Ok(None);
            };
            decltors.push(ListElem::new(decltor));

            match self.peek_kind(1) {
                TokenKind::Comma => {
                    decltors.last_mut().expect("just pushed").delim_tk = self.consume();
                }

                TokenKind::Semicolon => {
                    let semicolon_tk = self.consume();
                    return Ok(Some(self.alloc(SyntaxNode::FieldDeclaration(
                        FieldDeclarationSyntax {
                            ext_kw_tk: TokenIdx::INVALID,
                            specs,
                            decltors,
                            semicolon_tk,
                        },
                    ))));
                }

                _ => {
                    self.report_here(DiagnosticKind::ExpectedFollowOfDeclarator);
                    return Ok(None);
                }
            }
        }
    }

    /// enumerator: enumeration-constant (`= constant-expression`)?
    pub(super) fn parse_enumerator(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_enumerator");

        if !self.at(TokenKind::Identifier) {
            self.report_here(DiagnosticKind::ExpectedFirstOfEnumerationConstant);
            return Ok(None);
        }

        let mut n = EnumMemberDeclarationSyntax {
            ident_tk: self.consume(),
            attrs: Vec::new(),
            equals_tk: TokenIdx::INVALID,
            expr: None,
            comma_tk: TokenIdx::INVALID,
        };

        if self.at(TokenKind::KwGnuAttribute) && !self.parse_attribute_specifier_list_at_first(&mut n.attrs)? {
            return Ok(None);
        }

        if self.at(TokenKind::Equals) {
            n.equals_tk = self.consume();
            n.expr = self.parse_expression_with_precedence_conditional()?;
            if n.expr.is_none() {
                return Ok(None);
            }
        }
        // Enum members sit in a plain list; the delimiter stays on the
        // member itself.
        if self.at(TokenKind::Comma) {
            n.comma_tk = self.consume();
        }

        Ok(Some(self.alloc(SyntaxNode::EnumMemberDeclaration(n))))
    }

    // === Parameters ===

    /// parameter-type-list: parameter-list (`, ...`)?
    pub(super) fn parse_parameter_declaration_list_and_or_ellipsis(
        &mut self,
        sfx: &mut ParameterSuffixSyntax,
    ) -> ParseResult<bool> {
        trace!("parse_parameter_declaration_list_and_or_ellipsis");

        match self.peek_kind(1) {
            TokenKind::CloseParen => Ok(true),

            TokenKind::Ellipsis => {
                if sfx.decls.is_empty() {
                    self.report_here(DiagnosticKind::NamedParameterBeforeEllipsis);
                }
                sfx.ellipsis_tk = self.consume();
                Ok(true)
            }

            _ => {
                if !self.parse_parameter_declaration_list(&mut sfx.decls)? {
                    return Ok(false);
                }
                if self.at(TokenKind::Ellipsis) {
                    sfx.ellipsis_tk = self.consume();
                }
                Ok(true)
            }
        }
    }

    fn parse_parameter_declaration_list(&mut self, decls: &mut Vec<ListElem>) -> ParseResult<bool> {
        let Some(first) = self.parse_parameter_declaration()? else {
            return Ok(false);
        };
        decls.push(ListElem::new(first));

        while self.at(TokenKind::Comma) {
            decls.last_mut().expect("just pushed").delim_tk = self.consume();
            if self.at(TokenKind::Ellipsis) {
                return Ok(true);
            }
            let Some(param) = self.parse_parameter_declaration()? else {
                return Ok(false);
            };
            decls.push(ListElem::new(param));
        }
        Ok(true)
    }

    /// parameter-declaration:
    ///     declaration-specifiers declarator
    ///     declaration-specifiers abstract-declarator?
    fn parse_parameter_declaration(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_parameter_declaration");

        let mut decl: Option<NodeId> = None;
        let mut specs: Vec<NodeId> = Vec::new();
        if !self.parse_declaration_specifiers(&mut decl, &mut specs, false)? {
            return Ok(None);
        }
        if specs.is_empty() {
            self.report_here(DiagnosticKind::ExpectedTypeSpecifier);
        }

        // A named parameter declarator is tried first; on failure the
        // cursor rewinds and an abstract declarator is accepted.
        let bt = self.start_speculation();
        let decltor = match self.parse_declarator(DeclarationScope::FunctionPrototype)? {
            Some(decltor) => {
                self.commit(bt);
                Some(decltor)
            }
            None => {
                self.backtrack(bt);
                let Some(decltor) = self.parse_abstract_declarator()? else {
                    return Ok(None);
                };
                Some(decltor)
            }
        };

        Ok(Some(self.alloc(SyntaxNode::ParameterDeclaration(ParameterDeclarationSyntax {
            specs,
            decltor,
        }))))
    }

    // === Specifiers ===

    /// declaration-specifiers: storage classes, type specifiers, type
    /// qualifiers, function specifiers, alignment specifiers,
    /// attributes, typeof, and quantified-type specifiers, in any
    /// order. Returns with the cursor at the first non-specifier.
    pub(super) fn parse_declaration_specifiers(
        &mut self,
        decl: &mut Option<NodeId>,
        specs: &mut Vec<NodeId>,
        take_identifier_as_declarator: bool,
    ) -> ParseResult<bool> {
        trace!("parse_declaration_specifiers");

        let mut seen_type = false;
        loop {
            let kind = self.peek_kind(1);
            let spec = match kind {
                // storage-class-specifier
                TokenKind::KwTypedef => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::TypedefStorageClass)
                }
                TokenKind::KwExtern => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::ExternStorageClass)
                }
                TokenKind::KwStatic => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::StaticStorageClass)
                }
                TokenKind::KwAuto => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::AutoStorageClass)
                }
                TokenKind::KwRegister => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::RegisterStorageClass)
                }
                TokenKind::KwThreadLocal | TokenKind::KwGnuThread => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::ThreadLocalStorageClass)
                }

                // type-qualifier
                TokenKind::KwConst => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::ConstQualifier)
                }
                TokenKind::KwVolatile => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::VolatileQualifier)
                }
                TokenKind::KwRestrict => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::RestrictQualifier)
                }

                // `_Atomic` `(` is a type specifier; bare `_Atomic` a
                // qualifier.
                TokenKind::KwAtomic => {
                    if self.peek_kind(2) == TokenKind::OpenParen {
                        match self.parse_atomic_type_specifier_at_first()? {
                            Some(spec) => spec,
                            None => return Ok(false),
                        }
                    } else {
                        self.parse_trivial_specifier_at_first(SyntaxKind::AtomicQualifier)
                    }
                }

                // function-specifier
                TokenKind::KwInline => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::InlineSpecifier)
                }
                TokenKind::KwNoreturn => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::NoReturnSpecifier)
                }

                // builtin type-specifier
                _ if kind.is_builtin_type_specifier() => {
                    seen_type = true;
                    self.parse_trivial_specifier_at_first(SyntaxKind::BuiltinTypeSpecifier)
                }

                TokenKind::KwStruct => {
                    seen_type = true;
                    match self.parse_tagged_type_specifier_at_first(
                        decl,
                        SyntaxKind::StructDeclaration,
                        SyntaxKind::StructTypeSpecifier,
                        Parser::parse_struct_declaration,
                    )? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }
                TokenKind::KwUnion => {
                    seen_type = true;
                    match self.parse_tagged_type_specifier_at_first(
                        decl,
                        SyntaxKind::UnionDeclaration,
                        SyntaxKind::UnionTypeSpecifier,
                        Parser::parse_struct_declaration,
                    )? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }
                TokenKind::KwEnum => {
                    seen_type = true;
                    match self.parse_tagged_type_specifier_at_first(
                        decl,
                        SyntaxKind::EnumDeclaration,
                        SyntaxKind::EnumTypeSpecifier,
                        Parser::parse_enumerator,
                    )? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }

                // typedef-name
                TokenKind::Identifier => {
                    if seen_type {
                        return Ok(true);
                    }
                    if take_identifier_as_declarator
                        && self.determine_identifier_role(seen_type) == IdentifierRole::AsDeclarator
                    {
                        return Ok(true);
                    }
                    seen_type = true;
                    self.parse_typedef_name_at_first()
                }

                TokenKind::KwAlignas => match self.parse_alignment_specifier_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                TokenKind::KwGnuAttribute => match self.parse_attribute_specifier_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                TokenKind::KwGnuTypeof => match self.parse_typeof_specifier_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                TokenKind::KwExists | TokenKind::KwForall => {
                    match self.parse_quantified_type_specifier_at_first()? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }

                _ => return Ok(true),
            };

            specs.push(spec);

            // After an inline tag declaration only qualifiers and
            // attributes may extend the specifier list.
            if decl.is_some() {
                return self.parse_type_qualifiers_and_attributes(specs);
            }
        }
    }

    /// specifier-qualifier-list: type specifiers and type qualifiers
    /// only (struct members, type names).
    pub(super) fn parse_specifier_qualifier_list(
        &mut self,
        decl: &mut Option<NodeId>,
        specs: &mut Vec<NodeId>,
        take_identifier_as_declarator: bool,
    ) -> ParseResult<bool> {
        trace!("parse_specifier_qualifier_list");

        let mut seen_type = false;
        loop {
            let kind = self.peek_kind(1);
            let spec = match kind {
                TokenKind::KwConst => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::ConstQualifier)
                }
                TokenKind::KwVolatile => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::VolatileQualifier)
                }
                TokenKind::KwRestrict => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::RestrictQualifier)
                }

                TokenKind::KwAtomic => {
                    if self.peek_kind(2) == TokenKind::OpenParen {
                        match self.parse_atomic_type_specifier_at_first()? {
                            Some(spec) => spec,
                            None => return Ok(false),
                        }
                    } else {
                        self.parse_trivial_specifier_at_first(SyntaxKind::AtomicQualifier)
                    }
                }

                _ if kind.is_builtin_type_specifier() => {
                    seen_type = true;
                    self.parse_trivial_specifier_at_first(SyntaxKind::BuiltinTypeSpecifier)
                }

                TokenKind::KwStruct => {
                    seen_type = true;
                    match self.parse_tagged_type_specifier_at_first(
                        decl,
                        SyntaxKind::StructDeclaration,
                        SyntaxKind::StructTypeSpecifier,
                        Parser::parse_struct_declaration,
                    )? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }
                TokenKind::KwUnion => {
                    seen_type = true;
                    match self.parse_tagged_type_specifier_at_first(
                        decl,
                        SyntaxKind::UnionDeclaration,
                        SyntaxKind::UnionTypeSpecifier,
                        Parser::parse_struct_declaration,
                    )? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }
                TokenKind::KwEnum => {
                    seen_type = true;
                    match self.parse_tagged_type_specifier_at_first(
                        decl,
                        SyntaxKind::EnumDeclaration,
                        SyntaxKind::EnumTypeSpecifier,
                        Parser::parse_enumerator,
                    )? {
                        Some(spec) => spec,
                        None => return Ok(false),
                    }
                }

                TokenKind::Identifier => {
                    if seen_type {
                        return Ok(true);
                    }
                    if take_identifier_as_declarator
                        && self.determine_identifier_role(seen_type) == IdentifierRole::AsDeclarator
                    {
                        return Ok(true);
                    }
                    seen_type = true;
                    self.parse_typedef_name_at_first()
                }

                TokenKind::KwAlignas => match self.parse_alignment_specifier_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                TokenKind::KwGnuAttribute => match self.parse_attribute_specifier_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                TokenKind::KwGnuTypeof => match self.parse_typeof_specifier_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                _ => {
                    if specs.is_empty() {
                        self.report_here(DiagnosticKind::ExpectedFirstOfSpecifierQualifier);
                        return Ok(false);
                    }
                    return Ok(true);
                }
            };

            specs.push(spec);

            if decl.is_some() {
                return self.parse_type_qualifiers_and_attributes(specs);
            }
        }
    }

    /// A single-keyword specifier: storage class, builtin type,
    /// qualifier, function specifier, or asm qualifier.
    pub(super) fn parse_trivial_specifier_at_first(&mut self, kind: SyntaxKind) -> NodeId {
        let spec_tk = self.consume();
        self.alloc(SyntaxNode::TrivialSpecifier(TrivialSpecifierSyntax { kind, spec_tk }))
    }

    /// alignment-specifier: `_Alignas ( type-name | constant-expression )`
    fn parse_alignment_specifier_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwAlignas));

        if self.tree.dialect().std < StandardVersion::C11 && !self.tree.extensions().gnu_alignment {
            self.report_here(DiagnosticKind::ExpectedFeature("C11 alignment specifiers"));
        }

        let alignas_kw_tk = self.consume();
        let Some(type_ref) = self.parse_parenthesized_type_name_or_expression()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::AlignmentSpecifier(AlignmentSpecifierSyntax {
            alignas_kw_tk,
            type_ref: Some(type_ref),
        }))))
    }

    /// GNU `typeof` specifier.
    fn parse_typeof_specifier_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwGnuTypeof));

        let typeof_kw_tk = self.consume();
        let Some(type_ref) = self.parse_parenthesized_type_name_or_expression()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::TypeofSpecifier(TypeofSpecifierSyntax {
            typeof_kw_tk,
            type_ref: Some(type_ref),
        }))))
    }

    /// typedef-name specifier: the identifier plays the type role.
    fn parse_typedef_name_at_first(&mut self) -> NodeId {
        debug_assert!(self.at(TokenKind::Identifier));

        let ident_tk = self.consume();
        self.alloc(SyntaxNode::TypedefName(TypedefNameSyntax { ident_tk }))
    }

    /// atomic-type-specifier: `_Atomic ( type-name )`
    fn parse_atomic_type_specifier_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwAtomic));

        let mut n = AtomicTypeSpecifierSyntax {
            atomic_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            type_name: None,
            close_paren_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && {
                n.type_name = self.parse_type_name()?;
                n.type_name.is_some()
            }
            && self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::AtomicTypeSpecifier(n))))
        } else {
            Ok(None)
        }
    }

    /// struct-or-union-specifier / enum-specifier: the member parsing
    /// is parameterized; both shapes share this routine.
    fn parse_tagged_type_specifier_at_first(
        &mut self,
        decl: &mut Option<NodeId>,
        decl_kind: SyntaxKind,
        spec_kind: SyntaxKind,
        parse_member: MemberParserFn<'s>,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(matches!(
            self.peek_kind(1),
            TokenKind::KwStruct | TokenKind::KwUnion | TokenKind::KwEnum
        ));

        let mut n = TaggedTypeSpecifierSyntax {
            kind: spec_kind,
            tag_kw_tk: self.consume(),
            attrs1: Vec::new(),
            ident_tk: TokenIdx::INVALID,
            open_brace_tk: TokenIdx::INVALID,
            member_decls: Vec::new(),
            close_brace_tk: TokenIdx::INVALID,
            attrs2: Vec::new(),
        };

        if self.at(TokenKind::KwGnuAttribute)
            && !self.parse_attribute_specifier_list_at_first(&mut n.attrs1)?
        {
            return Ok(None);
        }

        match self.peek_kind(1) {
            TokenKind::OpenBrace => n.open_brace_tk = self.consume(),

            TokenKind::Identifier => {
                n.ident_tk = self.consume();
                if !self.at(TokenKind::OpenBrace) {
                    // Elaborated reference to a (possibly forward)
                    // declared tag.
                    return Ok(Some(self.alloc(SyntaxNode::TaggedTypeSpecifier(n))));
                }
                n.open_brace_tk = self.consume();
            }

            _ => {
                self.report_here(DiagnosticKind::ExpectedFollowOfStructOrUnionOrEnum);
                return Ok(None);
            }
        }

        loop {
            match self.peek_kind(1) {
                TokenKind::CloseBrace => {
                    n.close_brace_tk = self.consume();
                    break;
                }

                _ => match parse_member(self)? {
                    Some(member) => n.member_decls.push(member),
                    None => {
                        self.ignore_member_declaration();
                        if self.at_eof() {
                            return Ok(None);
                        }
                    }
                },
            }
        }

        if self.at(TokenKind::KwGnuAttribute)
            && !self.parse_attribute_specifier_list_at_first(&mut n.attrs2)?
        {
            return Ok(None);
        }

        let spec = self.alloc(SyntaxNode::TaggedTypeSpecifier(n));

        // A tag with a body is itself a declaration (6.7.2.1-8 and
        // 6.7.2.3-6).
        *decl = Some(self.alloc(SyntaxNode::TypeDeclaration(TypeDeclarationSyntax {
            kind: decl_kind,
            ext_kw_tk: TokenIdx::INVALID,
            type_spec: spec,
            semicolon_tk: TokenIdx::INVALID,
        })));

        Ok(Some(spec))
    }

    // === GNU attribute specifiers and asm labels ===

    pub(super) fn parse_attribute_specifier_list_at_first(
        &mut self,
        specs: &mut Vec<NodeId>,
    ) -> ParseResult<bool> {
        debug_assert!(self.at(TokenKind::KwGnuAttribute));

        while self.at(TokenKind::KwGnuAttribute) {
            let Some(spec) = self.parse_attribute_specifier_at_first()? else {
                return Ok(false);
            };
            specs.push(spec);
        }
        Ok(true)
    }

    /// `__attribute__ ( ( attribute-list ) )`
    fn parse_attribute_specifier_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwGnuAttribute));

        let mut n = AttributeSpecifierSyntax {
            attr_kw_tk: self.consume(),
            open_outer_paren_tk: TokenIdx::INVALID,
            open_inner_paren_tk: TokenIdx::INVALID,
            attrs: Vec::new(),
            close_inner_paren_tk: TokenIdx::INVALID,
            close_outer_paren_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_outer_paren_tk)
            && self.match_tk(TokenKind::OpenParen, &mut n.open_inner_paren_tk)
            && self.parse_attribute_list(&mut n.attrs)?
            && self.match_tk(TokenKind::CloseParen, &mut n.close_inner_paren_tk)
            && self.match_tk(TokenKind::CloseParen, &mut n.close_outer_paren_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::AttributeSpecifier(n))))
        } else {
            self.skip_to(TokenKind::CloseParen);
            Ok(None)
        }
    }

    fn parse_attribute_list(&mut self, attrs: &mut Vec<ListElem>) -> ParseResult<bool> {
        loop {
            let Some(attr) = self.parse_attribute()? else {
                return Ok(false);
            };
            attrs.push(ListElem::new(attr));

            match self.peek_kind(1) {
                TokenKind::Comma => {
                    attrs.last_mut().expect("just pushed").delim_tk = self.consume();
                }
                TokenKind::CloseParen => return Ok(true),
                _ => {
                    self.report_here(DiagnosticKind::ExpectedTokenWithin(vec![
                        TokenKind::Comma,
                        TokenKind::CloseParen,
                    ]));
                    return Ok(false);
                }
            }
        }
    }

    fn parse_attribute(&mut self) -> ParseResult<Option<NodeId>> {
        let mut n = AttributeSyntax {
            kw_or_ident_tk: TokenIdx::INVALID,
            open_paren_tk: TokenIdx::INVALID,
            exprs: Vec::new(),
            close_paren_tk: TokenIdx::INVALID,
        };

        match self.peek_kind(1) {
            TokenKind::Identifier | TokenKind::KwConst => n.kw_or_ident_tk = self.consume(),

            // An empty attribute is valid.
            TokenKind::Comma | TokenKind::CloseParen => {
                return Ok(Some(self.alloc(SyntaxNode::Attribute(n))));
            }

            _ => {
                self.report_here(DiagnosticKind::ExpectedTokenWithin(vec![
                    TokenKind::Identifier,
                    TokenKind::KwConst,
                    TokenKind::Comma,
                    TokenKind::CloseParen,
                ]));
                return Ok(None);
            }
        }

        if !self.at(TokenKind::OpenParen) {
            return Ok(Some(self.alloc(SyntaxNode::Attribute(n))));
        }
        n.open_paren_tk = self.consume();

        // LLVM's `availability` argument needs version-clause handling
        // the plain expression-list form cannot give.
        let is_availability =
            self.tree.identifier_text(n.kw_or_ident_tk).is_some_and(|t| t == "availability");
        let ok = if is_availability {
            self.parse_attribute_arguments_llvm(&mut n.exprs)?
        } else {
            self.parse_call_arguments(&mut n.exprs)?
        };

        if ok && self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk) {
            Ok(Some(self.alloc(SyntaxNode::Attribute(n))))
        } else {
            Ok(None)
        }
    }

    /// Arguments of LLVM's `availability` attribute: clauses such as
    /// `introduced=10.12.1`, whose version tuple is not an expression.
    fn parse_attribute_arguments_llvm(&mut self, exprs: &mut Vec<ListElem>) -> ParseResult<bool> {
        if !self.tree.extensions().gnu_attributes_llvm {
            self.report_here(DiagnosticKind::ExpectedFeature("GNU attributes of LLVM"));
        }

        let Some(platform) = self.parse_primary_expression()? else {
            return Ok(false);
        };
        exprs.push(ListElem::new(platform));

        while self.at(TokenKind::Comma) {
            exprs.last_mut().expect("non-empty").delim_tk = self.consume();

            let Some(mut expr) = self.parse_primary_expression()? else {
                return Ok(false);
            };

            if self.at(TokenKind::Equals) {
                let equals_tk = self.consume();
                let version = if self.peek_kind(1).is_string_literal() {
                    self.parse_string_literal_at_first()
                } else {
                    let Some(version) = self
                        .parse_constant_of_category(SyntaxKind::FloatingConstantExpression)?
                    else {
                        return Ok(false);
                    };
                    // Discard the "patch" component of a three-part
                    // version; it does not form a floating constant.
                    if self.at(TokenKind::IntegerConstant) {
                        self.consume();
                    }
                    version
                };

                expr = self.alloc(SyntaxNode::AssignmentExpression(AssignmentExpressionSyntax {
                    kind: SyntaxKind::BasicAssignmentExpression,
                    left: expr,
                    op_tk: equals_tk,
                    right: version,
                }));
            }
            exprs.push(ListElem::new(expr));
        }

        Ok(true)
    }

    /// `__asm__ ( string-literal )` label attached to a declarator.
    pub(super) fn parse_asm_label_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwGnuAsm));

        let mut n = AsmLabelSyntax {
            asm_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            string_lit: None,
            close_paren_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && {
                n.string_lit = self.parse_string_literal()?;
                n.string_lit.is_some()
            }
            && self.match_tk(TokenKind::CloseParen, &mut n.close_paren_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::AsmLabel(n))))
        } else {
            Ok(None)
        }
    }

    /// `_Exists ( identifier )` / `_Forall ( identifier )`
    fn parse_quantified_type_specifier_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(matches!(self.peek_kind(1), TokenKind::KwExists | TokenKind::KwForall));

        if !self.tree.extensions().quantified_types {
            self.report_here(DiagnosticKind::ExpectedFeature("quantified type specifiers"));
        }

        let mut n = QuantifiedTypeSpecifierSyntax {
            quantifier_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            ident_tk: TokenIdx::INVALID,
            close_paren_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && self.match_tk(TokenKind::Identifier, &mut n.ident_tk)
            && self.match_tk(TokenKind::CloseParen, &mut n.close_paren_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::QuantifiedTypeSpecifier(n))))
        } else {
            Ok(None)
        }
    }

    /// The qualifier/attribute groups of a pointer declarator, and the
    /// tail of a specifier list closed by an inline tag declaration.
    pub(super) fn parse_type_qualifiers_and_attributes(
        &mut self,
        specs: &mut Vec<NodeId>,
    ) -> ParseResult<bool> {
        loop {
            let spec = match self.peek_kind(1) {
                TokenKind::KwGnuAttribute => {
                    return self.parse_attribute_specifier_list_at_first(specs);
                }

                TokenKind::KwGnuAsm => match self.parse_asm_label_at_first()? {
                    Some(spec) => spec,
                    None => return Ok(false),
                },

                TokenKind::KwConst => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::ConstQualifier)
                }
                TokenKind::KwVolatile => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::VolatileQualifier)
                }
                TokenKind::KwRestrict => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::RestrictQualifier)
                }
                TokenKind::KwAtomic => {
                    self.parse_trivial_specifier_at_first(SyntaxKind::AtomicQualifier)
                }

                _ => return Ok(true),
            };
            specs.push(spec);
        }
    }

    // === Initializers ===

    /// initializer: assignment-expression | brace-enclosed list
    pub(super) fn parse_initializer(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_initializer");

        match self.peek_kind(1) {
            TokenKind::OpenBrace => self.parse_brace_enclosed_initializer_at_first(),
            _ => self.parse_expression_initializer(),
        }
    }

    fn parse_expression_initializer(&mut self) -> ParseResult<Option<NodeId>> {
        let Some(expr) = self.parse_expression_with_precedence_assignment()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::ExpressionInitializer(ExpressionInitializerSyntax {
            expr,
        }))))
    }

    /// `{ initializer-list }` with an optional trailing comma.
    pub(super) fn parse_brace_enclosed_initializer_at_first(
        &mut self,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenBrace));

        let mut n = BraceEnclosedInitializerSyntax {
            open_brace_tk: self.consume(),
            inits: Vec::new(),
            close_brace_tk: TokenIdx::INVALID,
        };

        if self.at(TokenKind::CloseBrace) {
            self.report_here(DiagnosticKind::ExpectedBraceEnclosedInitializerList);
            n.close_brace_tk = self.consume();
            return Ok(Some(self.alloc(SyntaxNode::BraceEnclosedInitializer(n))));
        }

        if !self.parse_initializer_list(&mut n.inits)? {
            self.skip_to(TokenKind::CloseBrace);
            self.consume();
            return Ok(None);
        }

        if self.match_or_skip_to(TokenKind::CloseBrace, &mut n.close_brace_tk) {
            Ok(Some(self.alloc(SyntaxNode::BraceEnclosedInitializer(n))))
        } else {
            Ok(None)
        }
    }

    fn parse_initializer_list(&mut self, inits: &mut Vec<ListElem>) -> ParseResult<bool> {
        loop {
            match self.peek_kind(1) {
                TokenKind::CloseBrace => return Ok(true),

                TokenKind::Comma => {
                    self.report_here(DiagnosticKind::ExpectedFirstOfExpression);
                    return Ok(false);
                }

                _ => {}
            }

            let Some(init) = self.parse_initializer_list_item()? else {
                return Ok(false);
            };
            inits.push(ListElem::new(init));

            if !self.at(TokenKind::Comma) {
                return Ok(true);
            }
            // A trailing comma before `}` still belongs to the last
            // element's delimiter slot.
            inits.last_mut().expect("just pushed").delim_tk = self.consume();
            if self.at(TokenKind::CloseBrace) {
                return Ok(true);
            }
        }
    }

    fn parse_initializer_list_item(&mut self) -> ParseResult<Option<NodeId>> {
        match self.peek_kind(1) {
            TokenKind::Dot => {
                self.parse_designated_initializer_at_first(Parser::parse_field_designator_at_first)
            }
            TokenKind::OpenBracket => {
                self.parse_designated_initializer_at_first(Parser::parse_array_designator_at_first)
            }
            TokenKind::OpenBrace => self.parse_brace_enclosed_initializer_at_first(),
            _ => self.parse_expression_initializer(),
        }
    }

    fn parse_designated_initializer_at_first(
        &mut self,
        parse_designator: DesignatorParserFn<'s>,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(matches!(self.peek_kind(1), TokenKind::Dot | TokenKind::OpenBracket));

        if self.tree.dialect().std < StandardVersion::C99
            && !self.tree.extensions().gnu_designated_initializers
        {
            self.report_here(DiagnosticKind::ExpectedFeature("GNU/C99 designated initializers"));
        }

        let mut desigs = Vec::new();
        if !self.parse_designator_list_at_first(&mut desigs, parse_designator)? {
            return Ok(None);
        }

        let mut n = DesignatedInitializerSyntax {
            desigs,
            equals_tk: TokenIdx::INVALID,
            init: None,
        };

        // A missing `=` is reported but tolerated; the initializer is
        // parsed either way and the equals slot keeps the sentinel.
        if self.at(TokenKind::Equals) {
            n.equals_tk = self.consume();
        } else {
            self.report_here(DiagnosticKind::ExpectedFollowOfDesignatedInitializer);
        }

        let Some(init) = self.parse_initializer()? else {
            return Ok(None);
        };
        n.init = Some(init);
        Ok(Some(self.alloc(SyntaxNode::DesignatedInitializer(n))))
    }

    fn parse_designator_list_at_first(
        &mut self,
        desigs: &mut Vec<NodeId>,
        mut parse_designator: DesignatorParserFn<'s>,
    ) -> ParseResult<bool> {
        loop {
            let Some(desig) = parse_designator(self)? else {
                return Ok(false);
            };
            desigs.push(desig);

            parse_designator = match self.peek_kind(1) {
                TokenKind::Dot => Parser::parse_field_designator_at_first,
                TokenKind::OpenBracket => Parser::parse_array_designator_at_first,
                _ => return Ok(true),
            };
        }
    }

    fn parse_field_designator_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::Dot));

        let dot_tk = self.consume();
        if self.at(TokenKind::Identifier) {
            let ident_tk = self.consume();
            return Ok(Some(
                self.alloc(SyntaxNode::FieldDesignator(FieldDesignatorSyntax { dot_tk, ident_tk })),
            ));
        }

        self.report_here(DiagnosticKind::ExpectedFieldDesignator);
        Ok(None)
    }

    fn parse_array_designator_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenBracket));

        let mut n = ArrayDesignatorSyntax {
            open_bracket_tk: self.consume(),
            expr: None,
            close_bracket_tk: TokenIdx::INVALID,
        };

        n.expr = self.parse_expression_with_precedence_conditional()?;
        if n.expr.is_some()
            && self.match_or_skip_to(TokenKind::CloseBracket, &mut n.close_bracket_tk)
        {
            Ok(Some(self.alloc(SyntaxNode::ArrayDesignator(n))))
        } else {
            Ok(None)
        }
    }

    // === Shared helpers ===

    pub(super) fn set_declaration_ext_kw(&mut self, decl: NodeId, ext_kw: TokenIdx) {
        match self.node_mut(decl) {
            SyntaxNode::IncompleteDeclaration(n) => n.ext_kw_tk = ext_kw,
            SyntaxNode::StaticAssertDeclaration(n) => n.ext_kw_tk = ext_kw,
            SyntaxNode::AsmDeclaration(n) => n.ext_kw_tk = ext_kw,
            SyntaxNode::TypeDeclaration(n) => n.ext_kw_tk = ext_kw,
            SyntaxNode::VariableAndOrFunctionDeclaration(n) => n.ext_kw_tk = ext_kw,
            SyntaxNode::FieldDeclaration(n) => n.ext_kw_tk = ext_kw,
            SyntaxNode::FunctionDefinition(n) => n.ext_kw_tk = ext_kw,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticList;
    use crate::options::LanguageExtensions;
    use crate::parser::testing::{parse, reachable_of_kind};
    use crate::syntax::tree::SyntaxTree;

    fn first_decl(tree: &SyntaxTree) -> NodeId {
        let root = tree.root().expect("root is populated");
        let SyntaxNode::TranslationUnit(tu) = tree.node(root) else {
            panic!("root is a translation unit");
        };
        tu.decls[0]
    }

    fn decls(tree: &SyntaxTree) -> Vec<NodeId> {
        let root = tree.root().expect("root is populated");
        let SyntaxNode::TranslationUnit(tu) = tree.node(root) else {
            panic!("root is a translation unit");
        };
        tu.decls.clone()
    }

    fn role_of(source: &str) -> IdentifierRole {
        let (tokens, interner) = crate::lexer::lex(source).expect("lexes");
        let tree = SyntaxTree::new(
            tokens,
            interner,
            Default::default(),
            LanguageExtensions::all(),
        );
        let mut sink = DiagnosticList::new();
        let parser = Parser::new(tree, &mut sink);
        assert!(parser.at(TokenKind::Identifier));
        parser.determine_identifier_role(false)
    }

    #[test]
    fn identifier_role_lookahead() {
        assert_eq!(role_of("T x;"), IdentifierRole::AsTypedefName);
        assert_eq!(role_of("T * x;"), IdentifierRole::AsTypedefName);
        assert_eq!(role_of("T (x);"), IdentifierRole::AsTypedefName);
        assert_eq!(role_of("T const x;"), IdentifierRole::AsTypedefName);
        assert_eq!(role_of("x;"), IdentifierRole::AsDeclarator);
        assert_eq!(role_of("x = 1;"), IdentifierRole::AsDeclarator);
        assert_eq!(role_of("f(1);"), IdentifierRole::AsDeclarator);
        assert_eq!(role_of("x[2];"), IdentifierRole::AsDeclarator);
    }

    #[test]
    fn typedef_then_use() {
        let (tree, diags) = parse("typedef int T; T x;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let decls = decls(&tree);
        assert_eq!(decls.len(), 2);

        let SyntaxNode::VariableAndOrFunctionDeclaration(first) = tree.node(decls[0]) else {
            panic!("first declaration kind");
        };
        assert_eq!(first.specs.len(), 2);
        assert_eq!(tree.node(first.specs[0]).kind(), SyntaxKind::TypedefStorageClass);
        assert_eq!(tree.node(first.specs[1]).kind(), SyntaxKind::BuiltinTypeSpecifier);
        let SyntaxNode::IdentifierDeclarator(d) = tree.node(first.decltors[0].node) else {
            panic!("declarator of T");
        };
        assert_eq!(tree.identifier_text(d.ident_tk), Some("T"));

        let SyntaxNode::VariableAndOrFunctionDeclaration(second) = tree.node(decls[1]) else {
            panic!("second declaration kind");
        };
        assert_eq!(second.specs.len(), 1);
        let SyntaxNode::TypedefName(tn) = tree.node(second.specs[0]) else {
            panic!("typedef-name specifier");
        };
        assert_eq!(tree.identifier_text(tn.ident_tk), Some("T"));
        let SyntaxNode::IdentifierDeclarator(d) = tree.node(second.decltors[0].node) else {
            panic!("declarator of x");
        };
        assert_eq!(tree.identifier_text(d.ident_tk), Some("x"));
    }

    #[test]
    fn pointer_declaration_from_lookahead() {
        let (tree, diags) = parse("T * x;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        assert_eq!(tree.node(decl.specs[0]).kind(), SyntaxKind::TypedefName);
        let SyntaxNode::PointerDeclarator(ptr) = tree.node(decl.decltors[0].node) else {
            panic!("pointer declarator");
        };
        let SyntaxNode::IdentifierDeclarator(inner) = tree.node(ptr.inner.unwrap()) else {
            panic!("inner identifier declarator");
        };
        assert_eq!(tree.identifier_text(inner.ident_tk), Some("x"));
    }

    #[test]
    fn function_definition() {
        let (tree, diags) = parse("int f(void) { return 0; }");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let SyntaxNode::FunctionDefinition(def) = tree.node(first_decl(&tree)) else {
            panic!("function definition");
        };
        assert_eq!(tree.node(def.specs[0]).kind(), SyntaxKind::BuiltinTypeSpecifier);

        let SyntaxNode::ArrayOrFunctionDeclarator(func) = tree.node(def.decltor) else {
            panic!("function declarator");
        };
        assert_eq!(func.kind, SyntaxKind::FunctionDeclarator);
        let SyntaxNode::IdentifierDeclarator(name) = tree.node(func.inner.unwrap()) else {
            panic!("named function");
        };
        assert_eq!(tree.identifier_text(name.ident_tk), Some("f"));

        let SyntaxNode::ParameterSuffix(sfx) = tree.node(func.suffix) else {
            panic!("parameter suffix");
        };
        assert_eq!(sfx.decls.len(), 1);
        let SyntaxNode::ParameterDeclaration(param) = tree.node(sfx.decls[0].node) else {
            panic!("parameter");
        };
        assert_eq!(tree.node(param.specs[0]).kind(), SyntaxKind::BuiltinTypeSpecifier);
        assert_eq!(
            tree.node(param.decltor.unwrap()).kind(),
            SyntaxKind::AbstractDeclarator
        );

        let SyntaxNode::CompoundStatement(body) = tree.node(def.body.unwrap()) else {
            panic!("body");
        };
        assert_eq!(body.stmts.len(), 1);
        assert_eq!(tree.node(body.stmts[0]).kind(), SyntaxKind::ReturnStatement);
    }

    #[test]
    fn designated_initializer_with_trailing_comma() {
        let (tree, diags) = parse("struct S s = { .a = 1, [2] = 3, };");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        let SyntaxNode::IdentifierDeclarator(d) = tree.node(decl.decltors[0].node) else {
            panic!("declarator of s");
        };
        let SyntaxNode::BraceEnclosedInitializer(init) = tree.node(d.init.unwrap()) else {
            panic!("brace initializer");
        };
        assert_eq!(init.inits.len(), 2);

        let SyntaxNode::DesignatedInitializer(first) = tree.node(init.inits[0].node) else {
            panic!("first designated");
        };
        assert_eq!(tree.node(first.desigs[0]).kind(), SyntaxKind::FieldDesignator);
        assert!(first.equals_tk.is_valid());

        let SyntaxNode::DesignatedInitializer(second) = tree.node(init.inits[1].node) else {
            panic!("second designated");
        };
        assert_eq!(tree.node(second.desigs[0]).kind(), SyntaxKind::ArrayDesignator);

        // The trailing comma is recorded on the last element.
        let trailing = init.inits[1].delim_tk;
        assert!(trailing.is_valid());
        assert_eq!(tree.token(trailing).kind, TokenKind::Comma);
    }

    #[test]
    fn designated_initializer_missing_equals() {
        // Tolerated: reported, but the initializer still parses with
        // the equals slot left at the sentinel.
        let (tree, diags) = parse("struct S s = { .a 1 };");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::ExpectedFollowOfDesignatedInitializer));

        let desig = reachable_of_kind(&tree, SyntaxKind::DesignatedInitializer);
        assert_eq!(desig.len(), 1);
        let SyntaxNode::DesignatedInitializer(n) = tree.node(desig[0]) else {
            unreachable!();
        };
        assert!(!n.equals_tk.is_valid());
        assert!(n.init.is_some());
    }

    #[test]
    fn recovers_at_file_scope() {
        let (tree, diags) = parse("int @ ; int y ;");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::ExpectedFirstOfDirectDeclarator));

        // The damaged declaration is dropped; `y` survives.
        let decls = decls(&tree);
        assert_eq!(decls.len(), 1);
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(decls[0]) else {
            panic!("recovered declaration");
        };
        let SyntaxNode::IdentifierDeclarator(d) = tree.node(decl.decltors[0].node) else {
            panic!("declarator of y");
        };
        assert_eq!(tree.identifier_text(d.ident_tk), Some("y"));
    }

    #[test]
    fn incomplete_declaration_from_lone_semicolon() {
        let (tree, diags) = parse(";");
        assert!(diags.is_empty());
        assert_eq!(tree.node(first_decl(&tree)).kind(), SyntaxKind::IncompleteDeclaration);
    }

    #[test]
    fn static_assert_declaration() {
        let (tree, diags) = parse("_Static_assert(1, \"msg\");");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::StaticAssertDeclaration(n) = tree.node(first_decl(&tree)) else {
            panic!("static assert");
        };
        assert!(n.expr.is_some());
        assert_eq!(tree.node(n.string_lit.unwrap()).kind(), SyntaxKind::StringLiteralExpression);
    }

    #[test]
    fn file_scope_asm_declaration() {
        let (tree, diags) = parse("__asm__(\"nop\");");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        assert_eq!(tree.node(first_decl(&tree)).kind(), SyntaxKind::AsmDeclaration);
    }

    #[test]
    fn extension_keyword_attaches_to_declaration() {
        let (tree, diags) = parse("__extension__ int x;");
        assert!(diags.is_empty());
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        assert!(decl.ext_kw_tk.is_valid());
        assert_eq!(tree.token(decl.ext_kw_tk).kind, TokenKind::KwGnuExtension);
    }

    #[test]
    fn tag_declaration_standalone_keeps_semicolon() {
        let (tree, diags) = parse("struct S { int x; };");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::TypeDeclaration(decl) = tree.node(first_decl(&tree)) else {
            panic!("type declaration");
        };
        assert_eq!(decl.kind, SyntaxKind::StructDeclaration);
        assert!(decl.semicolon_tk.is_valid());

        let SyntaxNode::TaggedTypeSpecifier(spec) = tree.node(decl.type_spec) else {
            panic!("tagged specifier");
        };
        assert_eq!(spec.member_decls.len(), 1);
        assert_eq!(tree.node(spec.member_decls[0]).kind(), SyntaxKind::FieldDeclaration);
    }

    #[test]
    fn tag_declaration_lifted_into_specifier_list() {
        let (tree, diags) = parse("struct S { int x; } s;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        let SyntaxNode::TypeDeclarationAsSpecifier(wrapper) = tree.node(decl.specs[0]) else {
            panic!("lifted tag specifier");
        };
        assert_eq!(tree.node(wrapper.type_decl).kind(), SyntaxKind::StructDeclaration);
    }

    #[test]
    fn enum_with_initializers_and_comma_on_member() {
        let (tree, diags) = parse("enum E { A = 1, B };");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::TypeDeclaration(decl) = tree.node(first_decl(&tree)) else {
            panic!("enum declaration");
        };
        assert_eq!(decl.kind, SyntaxKind::EnumDeclaration);
        let SyntaxNode::TaggedTypeSpecifier(spec) = tree.node(decl.type_spec) else {
            panic!("enum specifier");
        };
        assert_eq!(spec.member_decls.len(), 2);

        let SyntaxNode::EnumMemberDeclaration(a) = tree.node(spec.member_decls[0]) else {
            panic!("first enumerator");
        };
        assert!(a.equals_tk.is_valid());
        assert!(a.expr.is_some());
        assert!(a.comma_tk.is_valid());

        let SyntaxNode::EnumMemberDeclaration(b) = tree.node(spec.member_decls[1]) else {
            panic!("second enumerator");
        };
        assert!(!b.comma_tk.is_valid());
    }

    #[test]
    fn bitfield_declarators() {
        let (tree, diags) = parse("struct S { int x : 3; unsigned : 0; };");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let bitfields = reachable_of_kind(&tree, SyntaxKind::BitfieldDeclarator);
        assert_eq!(bitfields.len(), 2);
        let SyntaxNode::BitfieldDeclarator(named) = tree.node(bitfields[0]) else {
            unreachable!();
        };
        assert!(named.inner.is_some());
        let SyntaxNode::BitfieldDeclarator(anon) = tree.node(bitfields[1]) else {
            unreachable!();
        };
        assert!(anon.inner.is_none());
    }

    #[test]
    fn attributes_attach_after_identifier() {
        let (tree, diags) = parse("int x __attribute__((aligned(8)));");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        let SyntaxNode::IdentifierDeclarator(d) = tree.node(decl.decltors[0].node) else {
            panic!("declarator of x");
        };
        assert_eq!(d.attrs2.len(), 1);
        assert_eq!(tree.node(d.attrs2[0]).kind(), SyntaxKind::AttributeSpecifier);
    }

    #[test]
    fn asm_label_attaches_after_function_suffix() {
        let (tree, diags) = parse("int f(void) __asm__(\"F\");");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let funcs = reachable_of_kind(&tree, SyntaxKind::FunctionDeclarator);
        assert_eq!(funcs.len(), 1);
        let SyntaxNode::ArrayOrFunctionDeclarator(func) = tree.node(funcs[0]) else {
            unreachable!();
        };
        assert_eq!(tree.node(func.attrs2[0]).kind(), SyntaxKind::AsmLabel);
    }

    #[test]
    fn atomic_specifier_vs_qualifier() {
        let (tree, diags) = parse("_Atomic(int) a; _Atomic int b;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let decls = decls(&tree);

        let SyntaxNode::VariableAndOrFunctionDeclaration(a) = tree.node(decls[0]) else {
            panic!("first declaration");
        };
        assert_eq!(tree.node(a.specs[0]).kind(), SyntaxKind::AtomicTypeSpecifier);

        let SyntaxNode::VariableAndOrFunctionDeclaration(b) = tree.node(decls[1]) else {
            panic!("second declaration");
        };
        assert_eq!(tree.node(b.specs[0]).kind(), SyntaxKind::AtomicQualifier);
        assert_eq!(tree.node(b.specs[1]).kind(), SyntaxKind::BuiltinTypeSpecifier);
    }

    #[test]
    fn parameter_list_with_ellipsis() {
        let (tree, diags) = parse("int f(int x, ...);");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let suffixes = reachable_of_kind(&tree, SyntaxKind::ParameterSuffix);
        let SyntaxNode::ParameterSuffix(sfx) = tree.node(suffixes[0]) else {
            unreachable!();
        };
        assert_eq!(sfx.decls.len(), 1);
        assert!(sfx.ellipsis_tk.is_valid());
        // The comma before the ellipsis stays on the last parameter.
        let delim = sfx.decls[0].delim_tk;
        assert!(delim.is_valid());
        assert_eq!(tree.token(delim).kind, TokenKind::Comma);
    }

    #[test]
    fn ellipsis_without_parameter_is_reported() {
        let (tree, diags) = parse("int f(...);");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::NamedParameterBeforeEllipsis));
        // Best-effort tree is kept.
        assert_eq!(
            tree.node(first_decl(&tree)).kind(),
            SyntaxKind::VariableAndOrFunctionDeclaration
        );
    }

    #[test]
    fn array_qualifiers_allowed_only_in_prototypes() {
        let (_, diags) = parse("int f(int a[static 10]);");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let (_, diags) = parse("int b[*];");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnexpectedPointerInArrayDeclarator));

        let (_, diags) = parse("int c[static 4];");
        assert!(diags
            .iter()
            .any(|d| d.kind
                == DiagnosticKind::UnexpectedStaticOrTypeQualifierInArrayDeclarator));
    }

    #[test]
    fn initializer_on_function_declarator_is_rejected() {
        let (_, diags) = parse("int f(void) = 1;");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnexpectedInitializerOfDeclarator));
    }

    #[test]
    fn function_pointer_declarator_takes_initializer() {
        let (tree, diags) = parse("int (*fp)(void) = 0;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let funcs = reachable_of_kind(&tree, SyntaxKind::FunctionDeclarator);
        let SyntaxNode::ArrayOrFunctionDeclarator(func) = tree.node(funcs[0]) else {
            unreachable!();
        };
        assert!(func.equals_tk.is_valid());
        assert!(func.init.is_some());
    }

    #[test]
    fn empty_initializer_list_is_reported() {
        let (_, diags) = parse("int x[2] = {};");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::ExpectedBraceEnclosedInitializerList));
    }

    #[test]
    fn member_recovery_inside_struct_body() {
        let (tree, diags) = parse("struct S { int @; int y; };");
        assert!(!diags.is_empty());
        let SyntaxNode::TypeDeclaration(decl) = tree.node(first_decl(&tree)) else {
            panic!("struct declaration survives");
        };
        let SyntaxNode::TaggedTypeSpecifier(spec) = tree.node(decl.type_spec) else {
            panic!("tagged specifier");
        };
        // The damaged member is dropped, the next one is kept.
        assert_eq!(spec.member_decls.len(), 1);
    }

    #[test]
    fn quantified_type_specifier() {
        let (tree, diags) = parse("_Exists(T) x;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        assert_eq!(tree.node(decl.specs[0]).kind(), SyntaxKind::QuantifiedTypeSpecifier);
    }

    #[test]
    fn quantified_type_reported_when_disabled() {
        let (_, diags) = crate::parser::testing::parse_with(
            "_Exists(T) x;",
            Default::default(),
            LanguageExtensions::default(),
        );
        assert!(diags
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::ExpectedFeature(_))));
    }

    #[test]
    fn template_declaration_wrapper() {
        let (tree, diags) = parse("_Template int f(void);");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::TemplateDeclaration(n) = tree.node(first_decl(&tree)) else {
            panic!("template declaration");
        };
        assert!(n.decl.is_some());
    }

    #[test]
    fn typeof_specifier() {
        let (tree, diags) = parse("typeof(x) y;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = tree.node(first_decl(&tree))
        else {
            panic!("declaration kind");
        };
        assert_eq!(tree.node(decl.specs[0]).kind(), SyntaxKind::TypeofSpecifier);
    }

    #[test]
    fn llvm_availability_attribute_builds_version_clauses() {
        let (tree, diags) = parse(
            "__attribute__((availability(macos, introduced=10.12.1))) void f(void);",
        );
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let specs = reachable_of_kind(&tree, SyntaxKind::AttributeSpecifier);
        assert_eq!(specs.len(), 1);
        let SyntaxNode::AttributeSpecifier(spec) = tree.node(specs[0]) else {
            unreachable!();
        };
        let SyntaxNode::Attribute(attr) = tree.node(spec.attrs[0].node) else {
            panic!("attribute");
        };
        assert_eq!(tree.identifier_text(attr.kw_or_ident_tk), Some("availability"));
        assert_eq!(attr.exprs.len(), 2);

        // The platform name is a plain identifier argument.
        assert_eq!(
            tree.node(attr.exprs[0].node).kind(),
            SyntaxKind::IdentifierExpression
        );

        // `introduced=10.12.1` is the version-clause shape: an
        // assignment whose right side is classified as a floating
        // version constant, not a plain call argument.
        let SyntaxNode::AssignmentExpression(clause) = tree.node(attr.exprs[1].node) else {
            panic!(
                "version clause is an assignment, got {:?}",
                tree.node(attr.exprs[1].node).kind()
            );
        };
        assert_eq!(clause.kind, SyntaxKind::BasicAssignmentExpression);
        let SyntaxNode::IdentifierExpression(kw) = tree.node(clause.left) else {
            panic!("clause keyword");
        };
        assert_eq!(tree.identifier_text(kw.ident_tk), Some("introduced"));
        let SyntaxNode::ConstantExpression(version) = tree.node(clause.right) else {
            panic!("version constant");
        };
        assert_eq!(version.kind, SyntaxKind::FloatingConstantExpression);
    }

    #[test]
    fn llvm_availability_reported_when_disabled() {
        let (_, diags) = crate::parser::testing::parse_with(
            "__attribute__((availability(macos, introduced=10.12.1))) void f(void);",
            Default::default(),
            LanguageExtensions::default(),
        );
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::ExpectedFeature("GNU attributes of LLVM")));
    }
}
