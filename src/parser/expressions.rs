//! Expression parsing: dedicated primary, postfix, unary, and cast
//! tiers underneath a single n-ary precedence climber that handles
//! everything from multiplicative through comma.
//!
//! The precedence-named entry points (conditional, assignment, comma)
//! invoke the climber with the corresponding cutoff. A method named
//! after a precedence level returns whatever expression that level
//! subsumes, not necessarily a node of the same-named kind.

use log::trace;

use crate::diagnostics::DiagnosticKind;
use crate::options::StandardVersion;
use crate::parser::core::{ParseError, ParseResult, Parser, MAX_EXPR_DEPTH};
use crate::syntax::kind::SyntaxKind;
use crate::syntax::node::*;
use crate::tokens::{TokenCategory, TokenIdx, TokenKind};

/// N-ary operator precedence, loosest to tightest binding.
mod precedence {
    pub(super) const UNDEFINED: u8 = 0;
    pub(super) const SEQUENCING: u8 = 1;
    pub(super) const ASSIGNMENT: u8 = 2;
    pub(super) const CONDITIONAL: u8 = 3;
    pub(super) const LOGICAL_OR: u8 = 4;
    pub(super) const LOGICAL_AND: u8 = 5;
    pub(super) const BITWISE_OR: u8 = 6;
    pub(super) const BITWISE_XOR: u8 = 7;
    pub(super) const BITWISE_AND: u8 = 8;
    pub(super) const EQUALITY: u8 = 9;
    pub(super) const RELATIONAL: u8 = 10;
    pub(super) const SHIFT: u8 = 11;
    pub(super) const ADDITIVE: u8 = 12;
    pub(super) const MULTIPLICATIVE: u8 = 13;
}

fn precedence_of(tk: TokenKind) -> u8 {
    use TokenKind::*;
    match tk {
        Comma => precedence::SEQUENCING,
        Equals | PlusEquals | MinusEquals | AsteriskEquals | SlashEquals | PercentEquals
        | LessLessEquals | GreaterGreaterEquals | AmpersandEquals | CaretEquals | BarEquals => {
            precedence::ASSIGNMENT
        }
        Question => precedence::CONDITIONAL,
        BarBar => precedence::LOGICAL_OR,
        AmpersandAmpersand => precedence::LOGICAL_AND,
        Bar => precedence::BITWISE_OR,
        Caret => precedence::BITWISE_XOR,
        Ampersand => precedence::BITWISE_AND,
        EqualsEquals | ExclamationEquals => precedence::EQUALITY,
        Less | Greater | LessEquals | GreaterEquals => precedence::RELATIONAL,
        LessLess | GreaterGreater => precedence::SHIFT,
        Plus | Minus => precedence::ADDITIVE,
        Asterisk | Slash | Percent => precedence::MULTIPLICATIVE,
        _ => precedence::UNDEFINED,
    }
}

fn is_right_associative(tk: TokenKind) -> bool {
    let prec = precedence_of(tk);
    prec == precedence::CONDITIONAL || prec == precedence::ASSIGNMENT
}

fn is_first_of_unary_expression(tk: TokenKind) -> bool {
    use TokenKind::*;
    tk.is_constant()
        || tk.is_string_literal()
        || matches!(
            tk,
            PlusPlus
                | MinusMinus
                | Ampersand
                | Asterisk
                | Plus
                | Minus
                | Tilde
                | Exclamation
                | KwSizeof
                | KwAlignof
                | Identifier
                | KwGeneric
        )
}

impl<'s> Parser<'s> {
    /// expression: assignment-expression (`,` assignment-expression)*
    ///
    /// The only stateful guard in the expression parser lives here:
    /// the depth counter, incremented per entry and rechecked inside
    /// the n-ary loop.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_expression");

        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPR_DEPTH {
            self.expr_depth -= 1;
            return Err(ParseError::ExpressionDepthExceeded);
        }
        let result = self.parse_expression_with_precedence_comma();
        self.expr_depth -= 1;
        result
    }

    // === Primary ===

    fn parse_identifier_expression_at_first(&mut self) -> NodeId {
        debug_assert!(self.at(TokenKind::Identifier));

        let ident_tk = self.consume();
        self.alloc(SyntaxNode::IdentifierExpression(IdentifierExpressionSyntax { ident_tk }))
    }

    pub(super) fn parse_constant_of_category(
        &mut self,
        kind: SyntaxKind,
    ) -> ParseResult<Option<NodeId>> {
        if !self.peek_kind(1).is_constant() {
            self.report_here(DiagnosticKind::ExpectedTokenOfCategory(TokenCategory::Constant));
            return Ok(None);
        }
        Ok(Some(self.parse_constant_at_first(kind)))
    }

    fn parse_constant_at_first(&mut self, kind: SyntaxKind) -> NodeId {
        let constant_tk = self.consume();
        self.alloc(SyntaxNode::ConstantExpression(ConstantExpressionSyntax { kind, constant_tk }))
    }

    /// A string literal; adjacent literals fold into a chain on one
    /// node, regardless of their encoding prefixes (checking prefix
    /// compatibility belongs to a later phase).
    pub(super) fn parse_string_literal(&mut self) -> ParseResult<Option<NodeId>> {
        if !self.peek_kind(1).is_string_literal() {
            self.report_here(DiagnosticKind::ExpectedTokenOfCategory(TokenCategory::StringLiteral));
            return Ok(None);
        }
        Ok(Some(self.parse_string_literal_at_first()))
    }

    pub(super) fn parse_string_literal_at_first(&mut self) -> NodeId {
        debug_assert!(self.peek_kind(1).is_string_literal());

        let lit_tk = self.consume();
        let adjacent = if self.peek_kind(1).is_string_literal() {
            Some(self.parse_string_literal_at_first())
        } else {
            None
        };
        self.alloc(SyntaxNode::StringLiteralExpression(StringLiteralExpressionSyntax {
            lit_tk,
            adjacent,
        }))
    }

    fn parse_parenthesized_expression_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenParen));

        let open_paren_tk = self.consume();
        let Some(expr) = self.parse_expression()? else {
            return Ok(None);
        };
        let mut close_paren_tk = TokenIdx::INVALID;
        if !self.match_or_skip_to(TokenKind::CloseParen, &mut close_paren_tk) {
            return Ok(None);
        }
        Ok(Some(self.alloc(SyntaxNode::ParenthesizedExpression(ParenthesizedExpressionSyntax {
            open_paren_tk,
            expr: Some(expr),
            close_paren_tk,
        }))))
    }

    /// GNU statement expression: `( { ... } )`.
    fn parse_statement_expression_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(
            self.at(TokenKind::OpenParen) && self.peek_kind(2) == TokenKind::OpenBrace
        );

        if !self.tree.extensions().gnu_statement_expressions {
            self.report_here(DiagnosticKind::ExpectedFeature("GNU statement expressions"));
        }

        let open_paren_tk = self.consume();
        let stmt = self.parse_compound_statement_at_first()?;
        let mut close_paren_tk = TokenIdx::INVALID;
        if !self.match_or_skip_to(TokenKind::CloseParen, &mut close_paren_tk) {
            return Ok(None);
        }
        Ok(Some(self.alloc(SyntaxNode::StatementExpression(StatementExpressionSyntax {
            open_paren_tk,
            stmt,
            close_paren_tk,
        }))))
    }

    /// primary-expression: identifier, constant, string-literal,
    /// parenthesized expression, or generic-selection.
    pub(super) fn parse_primary_expression(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_primary_expression");

        let kind = self.peek_kind(1);
        let expr = match kind {
            TokenKind::Identifier => self.parse_identifier_expression_at_first(),

            TokenKind::IntegerConstant => {
                self.parse_constant_at_first(SyntaxKind::IntegerConstantExpression)
            }
            TokenKind::FloatingConstant => {
                self.parse_constant_at_first(SyntaxKind::FloatingConstantExpression)
            }
            TokenKind::CharacterConstant
            | TokenKind::CharacterConstantL
            | TokenKind::CharacterConstantU16
            | TokenKind::CharacterConstantU32 => {
                self.parse_constant_at_first(SyntaxKind::CharacterConstantExpression)
            }
            TokenKind::KwTrue | TokenKind::KwFalse => {
                self.parse_constant_at_first(SyntaxKind::BooleanConstantExpression)
            }
            TokenKind::KwNull | TokenKind::KwNullptr => {
                self.parse_constant_at_first(SyntaxKind::NullConstantExpression)
            }

            _ if kind.is_string_literal() => self.parse_string_literal_at_first(),

            TokenKind::OpenParen => {
                if self.peek_kind(2) == TokenKind::OpenBrace {
                    return self.parse_statement_expression_at_first();
                }
                return self.parse_parenthesized_expression_at_first();
            }

            TokenKind::KwGeneric => return self.parse_generic_selection_expression_at_first(),

            _ => {
                self.report_here(DiagnosticKind::ExpectedFirstOfExpression);
                return Ok(None);
            }
        };

        Ok(Some(expr))
    }

    /// generic-selection:
    ///     `_Generic ( assignment-expression , generic-assoc-list )`
    fn parse_generic_selection_expression_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwGeneric));

        let mut n = GenericSelectionExpressionSyntax {
            generic_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            expr: None,
            comma_tk: TokenIdx::INVALID,
            assocs: Vec::new(),
            close_paren_tk: TokenIdx::INVALID,
        };

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && {
                n.expr = self.parse_expression_with_precedence_assignment()?;
                n.expr.is_some()
            }
            && self.match_tk(TokenKind::Comma, &mut n.comma_tk)
            && self.parse_generic_association_list(&mut n.assocs)?
            && self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::GenericSelectionExpression(n))))
        } else {
            Ok(None)
        }
    }

    fn parse_generic_association_list(&mut self, assocs: &mut Vec<ListElem>) -> ParseResult<bool> {
        loop {
            let Some(assoc) = self.parse_generic_association()? else {
                return Ok(false);
            };
            assocs.push(ListElem::new(assoc));

            if self.at(TokenKind::Comma) {
                assocs.last_mut().expect("just pushed").delim_tk = self.consume();
            } else {
                return Ok(true);
            }
        }
    }

    /// generic-association: `type-name :` or `default :` followed by an
    /// assignment-expression.
    fn parse_generic_association(&mut self) -> ParseResult<Option<NodeId>> {
        let mut n = GenericAssociationSyntax {
            kind: SyntaxKind::TypedGenericAssociation,
            type_name: None,
            default_kw_tk: TokenIdx::INVALID,
            colon_tk: TokenIdx::INVALID,
            expr: None,
        };

        match self.peek_kind(1) {
            TokenKind::KwDefault => {
                n.kind = SyntaxKind::DefaultGenericAssociation;
                n.default_kw_tk = self.consume();
            }
            _ => {
                let Some(type_name) = self.parse_type_name()? else {
                    return Ok(None);
                };
                n.type_name = Some(type_name);
            }
        }

        let ok = self.match_tk(TokenKind::Colon, &mut n.colon_tk) && {
            n.expr = self.parse_expression_with_precedence_assignment()?;
            n.expr.is_some()
        };

        if ok {
            Ok(Some(self.alloc(SyntaxNode::GenericAssociation(n))))
        } else {
            Ok(None)
        }
    }

    // === Postfix ===

    /// postfix-expression, or a compound literal recognized by
    /// speculating on the token after `(`.
    fn parse_expression_with_precedence_postfix(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_expression_with_precedence_postfix");

        if self.at(TokenKind::OpenParen) {
            let k2 = self.peek_kind(2);
            if k2.starts_unambiguous_type_name() {
                return self.parse_compound_literal_at_open_paren();
            }
            if k2 == TokenKind::Identifier {
                let bt = self.start_speculation();
                let open_paren_tk = self.consume();
                match self.parse_type_name()? {
                    Some(type_name)
                        if self.at(TokenKind::CloseParen)
                            && self.peek_kind(2) == TokenKind::OpenBrace =>
                    {
                        self.commit(bt);
                        let close_paren_tk = self.consume();
                        return self.parse_compound_literal_at_open_brace(
                            open_paren_tk,
                            type_name,
                            close_paren_tk,
                        );
                    }
                    _ => self.backtrack(bt),
                }
            }
        }

        let Some(mut expr) = self.parse_primary_expression()? else {
            return Ok(None);
        };
        if !self.parse_postfix_expression_at_follow(&mut expr)? {
            return Ok(None);
        }
        Ok(Some(expr))
    }

    /// Any sequence of `[ ]`, `( )`, `.`, `->`, `++`, `--` applied to
    /// an already-parsed expression.
    pub(super) fn parse_postfix_expression_at_follow(
        &mut self,
        expr: &mut NodeId,
    ) -> ParseResult<bool> {
        loop {
            match self.peek_kind(1) {
                TokenKind::OpenBracket => {
                    let mut n = ArraySubscriptExpressionSyntax {
                        expr: *expr,
                        open_bracket_tk: self.consume(),
                        arg: None,
                        close_bracket_tk: TokenIdx::INVALID,
                    };
                    n.arg = self.parse_expression()?;
                    if n.arg.is_none()
                        || !self
                            .match_or_skip_to(TokenKind::CloseBracket, &mut n.close_bracket_tk)
                    {
                        return Ok(false);
                    }
                    *expr = self.alloc(SyntaxNode::ArraySubscriptExpression(n));
                }

                TokenKind::OpenParen => {
                    let mut n = CallExpressionSyntax {
                        expr: *expr,
                        open_paren_tk: self.consume(),
                        args: Vec::new(),
                        close_paren_tk: TokenIdx::INVALID,
                    };
                    if self.at(TokenKind::CloseParen) {
                        n.close_paren_tk = self.consume();
                    } else if !self.parse_call_arguments(&mut n.args)?
                        || !self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk)
                    {
                        return Ok(false);
                    }
                    *expr = self.alloc(SyntaxNode::CallExpression(n));
                }

                tk @ (TokenKind::Dot | TokenKind::Arrow) => {
                    let kind = if tk == TokenKind::Dot {
                        SyntaxKind::DirectMemberAccessExpression
                    } else {
                        SyntaxKind::IndirectMemberAccessExpression
                    };
                    let op_tk = self.consume();
                    if !self.at(TokenKind::Identifier) {
                        self.report_here(DiagnosticKind::ExpectedFieldName);
                        return Ok(false);
                    }
                    let member = self.parse_identifier_expression_at_first();
                    *expr = self.alloc(SyntaxNode::MemberAccessExpression(
                        MemberAccessExpressionSyntax {
                            kind,
                            expr: *expr,
                            op_tk,
                            member: Some(member),
                        },
                    ));
                }

                tk @ (TokenKind::PlusPlus | TokenKind::MinusMinus) => {
                    let kind = if tk == TokenKind::PlusPlus {
                        SyntaxKind::PostIncrementExpression
                    } else {
                        SyntaxKind::PostDecrementExpression
                    };
                    let op_tk = self.consume();
                    *expr = self.alloc(SyntaxNode::PostfixUnaryExpression(
                        PostfixUnaryExpressionSyntax { kind, expr: *expr, op_tk },
                    ));
                }

                _ => return Ok(true),
            }
        }
    }

    /// argument-expression-list: assignment-expressions separated by
    /// commas.
    pub(super) fn parse_call_arguments(&mut self, args: &mut Vec<ListElem>) -> ParseResult<bool> {
        loop {
            let Some(arg) = self.parse_expression_with_precedence_assignment()? else {
                return Ok(false);
            };
            args.push(ListElem::new(arg));

            if self.at(TokenKind::Comma) {
                args.last_mut().expect("just pushed").delim_tk = self.consume();
            } else {
                return Ok(true);
            }
        }
    }

    /// `( type-name ) { ... }` with the `(` as the current token.
    fn parse_compound_literal_at_open_paren(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenParen));

        let open_paren_tk = self.consume();
        let Some(type_name) = self.parse_type_name()? else {
            return Ok(None);
        };
        let mut close_paren_tk = TokenIdx::INVALID;
        if !self.match_tk(TokenKind::CloseParen, &mut close_paren_tk) {
            return Ok(None);
        }
        if !self.at(TokenKind::OpenBrace) {
            self.report_here(DiagnosticKind::ExpectedToken(TokenKind::OpenBrace));
            return Ok(None);
        }
        self.parse_compound_literal_at_open_brace(open_paren_tk, type_name, close_paren_tk)
    }

    /// The `{ initializer-list }` tail of a compound literal, followed
    /// by any postfix operators.
    fn parse_compound_literal_at_open_brace(
        &mut self,
        open_paren_tk: TokenIdx,
        type_name: NodeId,
        close_paren_tk: TokenIdx,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenBrace));

        if self.tree.dialect().std < StandardVersion::C99
            && !self.tree.extensions().gnu_compound_literals
        {
            self.report_here(DiagnosticKind::ExpectedFeature("GNU/C99 compound literals"));
        }

        let Some(init) = self.parse_initializer()? else {
            return Ok(None);
        };
        let mut expr = self.alloc(SyntaxNode::CompoundLiteralExpression(
            CompoundLiteralExpressionSyntax {
                open_paren_tk,
                type_name,
                close_paren_tk,
                init: Some(init),
            },
        ));
        if !self.parse_postfix_expression_at_follow(&mut expr)? {
            return Ok(None);
        }
        Ok(Some(expr))
    }

    // === Unary ===

    /// unary-expression, dispatching prefix operators and the type
    /// traits.
    pub(super) fn parse_expression_with_precedence_unary(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_expression_with_precedence_unary");

        match self.peek_kind(1) {
            TokenKind::PlusPlus => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::PreIncrementExpression,
                Parser::parse_expression_with_precedence_unary,
            ),
            TokenKind::MinusMinus => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::PreDecrementExpression,
                Parser::parse_expression_with_precedence_unary,
            ),
            TokenKind::Ampersand => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::AddressOfExpression,
                Parser::parse_expression_with_precedence_cast,
            ),
            TokenKind::Asterisk => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::PointerIndirectionExpression,
                Parser::parse_expression_with_precedence_cast,
            ),
            TokenKind::Plus => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::UnaryPlusExpression,
                Parser::parse_expression_with_precedence_cast,
            ),
            TokenKind::Minus => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::UnaryMinusExpression,
                Parser::parse_expression_with_precedence_cast,
            ),
            TokenKind::Tilde => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::BitwiseNotExpression,
                Parser::parse_expression_with_precedence_cast,
            ),
            TokenKind::Exclamation => self.parse_prefix_unary_expression_at_first(
                SyntaxKind::LogicalNotExpression,
                Parser::parse_expression_with_precedence_cast,
            ),

            TokenKind::KwSizeof => {
                self.parse_type_trait_expression_at_first(SyntaxKind::SizeofExpression)
            }
            TokenKind::KwAlignof => {
                self.parse_type_trait_expression_at_first(SyntaxKind::AlignofExpression)
            }

            _ => self.parse_expression_with_precedence_postfix(),
        }
    }

    fn parse_prefix_unary_expression_at_first(
        &mut self,
        kind: SyntaxKind,
        parse_operand: fn(&mut Parser<'s>) -> ParseResult<Option<NodeId>>,
    ) -> ParseResult<Option<NodeId>> {
        let op_tk = self.consume();
        let Some(operand) = parse_operand(self)? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::PrefixUnaryExpression(PrefixUnaryExpressionSyntax {
            kind,
            op_tk,
            expr: Some(operand),
        }))))
    }

    /// `sizeof` / `_Alignof` over a parenthesized type name or an
    /// expression.
    fn parse_type_trait_expression_at_first(
        &mut self,
        kind: SyntaxKind,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(matches!(self.peek_kind(1), TokenKind::KwSizeof | TokenKind::KwAlignof));

        let op_tk = self.consume();
        let Some(type_ref) = self.parse_parenthesized_type_name_or_expression()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::TypeTraitExpression(TypeTraitExpressionSyntax {
            kind,
            op_tk,
            type_ref: Some(type_ref),
        }))))
    }

    // === Cast ===

    /// cast-expression: `( type-name ) cast-expression` or whatever
    /// unary-expression subsumes. On `(` followed by an identifier the
    /// parse speculates and may produce an ambiguity node.
    pub(super) fn parse_expression_with_precedence_cast(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_expression_with_precedence_cast");

        let kind = self.peek_kind(1);
        match kind {
            TokenKind::OpenParen => {
                let k2 = self.peek_kind(2);
                if k2.starts_unambiguous_type_name() {
                    return self.parse_compound_literal_or_cast_expression_at_first();
                }
                if k2 == TokenKind::Identifier {
                    let bt = self.start_speculation();
                    match self.parse_compound_literal_or_cast_expression_at_first()? {
                        Some(mut expr) => {
                            self.commit(bt);
                            if self.node(expr).kind() == SyntaxKind::CastExpression {
                                self.maybe_ambiguate_cast_expression(&mut expr);
                            }
                            return Ok(Some(expr));
                        }
                        None => {
                            self.backtrack(bt);
                            return self.parse_expression_with_precedence_unary();
                        }
                    }
                }
                self.parse_expression_with_precedence_unary()
            }

            TokenKind::KwGnuExtension => {
                let ext_kw_tk = self.consume();
                let Some(expr) = self.parse_expression_with_precedence_cast()? else {
                    return Ok(None);
                };
                Ok(Some(self.alloc(SyntaxNode::ExtensionExpression(ExtensionExpressionSyntax {
                    ext_kw_tk,
                    expr: Some(expr),
                }))))
            }

            _ if is_first_of_unary_expression(kind) => {
                self.parse_expression_with_precedence_unary()
            }

            _ => {
                self.report_here(DiagnosticKind::ExpectedFirstOfExpression);
                Ok(None)
            }
        }
    }

    fn parse_compound_literal_or_cast_expression_at_first(
        &mut self,
    ) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::OpenParen));

        let open_paren_tk = self.consume();
        let Some(type_name) = self.parse_type_name()? else {
            return Ok(None);
        };
        let mut close_paren_tk = TokenIdx::INVALID;
        if !self.match_tk(TokenKind::CloseParen, &mut close_paren_tk) {
            return Ok(None);
        }

        if self.at(TokenKind::OpenBrace) {
            return self.parse_compound_literal_at_open_brace(
                open_paren_tk,
                type_name,
                close_paren_tk,
            );
        }

        let Some(operand) = self.parse_expression_with_precedence_cast()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::CastExpression(CastExpressionSyntax {
            open_paren_tk,
            type_name,
            close_paren_tk,
            expr: Some(operand),
        }))))
    }

    /// `(T) * y` and friends: a successfully parsed cast whose operand
    /// is `&`, `*`, `+`, or `-` over a lone typedef-name type is still
    /// ambiguous with a binary expression. Both interpretations are
    /// built in full; a later pass picks one with symbol-table
    /// evidence.
    fn maybe_ambiguate_cast_expression(&mut self, expr: &mut NodeId) {
        let SyntaxNode::CastExpression(cast) = self.node(*expr) else {
            return;
        };
        let (open_paren_tk, close_paren_tk, cast_type_name) =
            (cast.open_paren_tk, cast.close_paren_tk, cast.type_name);

        let Some(operand) = cast.expr else { return };
        let SyntaxNode::PrefixUnaryExpression(prefix) = self.node(operand) else {
            return;
        };
        let bin_kind = match prefix.kind {
            SyntaxKind::AddressOfExpression => SyntaxKind::BitwiseAndExpression,
            SyntaxKind::PointerIndirectionExpression => SyntaxKind::MultiplyExpression,
            SyntaxKind::UnaryPlusExpression => SyntaxKind::AddExpression,
            SyntaxKind::UnaryMinusExpression => SyntaxKind::SubtractExpression,
            _ => return,
        };
        let op_tk = prefix.op_tk;
        let Some(bin_right) = prefix.expr else { return };

        // The type must be a lone typedef-name with an empty abstract
        // declarator.
        let SyntaxNode::TypeName(type_name) = self.node(cast_type_name) else {
            return;
        };
        if type_name.specs.len() != 1 {
            return;
        }
        let SyntaxNode::TypedefName(typedef_name) = self.node(type_name.specs[0]) else {
            return;
        };
        let ident_tk = typedef_name.ident_tk;
        match type_name.decltor {
            Some(decltor) if self.node(decltor).kind() == SyntaxKind::AbstractDeclarator => {}
            _ => return,
        }

        // The binary interpretation allocates its own subtree; the two
        // alternatives share token indices but no nodes.
        let name_expr =
            self.alloc(SyntaxNode::IdentifierExpression(IdentifierExpressionSyntax { ident_tk }));
        let paren_expr = self.alloc(SyntaxNode::ParenthesizedExpression(
            ParenthesizedExpressionSyntax { open_paren_tk, expr: Some(name_expr), close_paren_tk },
        ));
        let bin_expr = self.alloc(SyntaxNode::BinaryExpression(BinaryExpressionSyntax {
            kind: bin_kind,
            left: paren_expr,
            op_tk,
            right: bin_right,
        }));

        *expr = self.alloc(SyntaxNode::AmbiguousCastOrBinaryExpression(
            AmbiguousCastOrBinaryExpressionSyntax { cast_expr: *expr, bin_expr },
        ));
    }

    // === N-ary ===

    pub(super) fn parse_expression_with_precedence_comma(&mut self) -> ParseResult<Option<NodeId>> {
        self.parse_nary_expression(precedence::SEQUENCING)
    }

    pub(super) fn parse_expression_with_precedence_assignment(
        &mut self,
    ) -> ParseResult<Option<NodeId>> {
        self.parse_nary_expression(precedence::ASSIGNMENT)
    }

    pub(super) fn parse_expression_with_precedence_conditional(
        &mut self,
    ) -> ParseResult<Option<NodeId>> {
        self.parse_nary_expression(precedence::CONDITIONAL)
    }

    /// One engine for every infix level: parse a cast-expression, then
    /// climb while operators at or above the cutoff follow.
    fn parse_nary_expression(&mut self, cutoff: u8) -> ParseResult<Option<NodeId>> {
        trace!("parse_nary_expression");

        let Some(mut expr) = self.parse_expression_with_precedence_cast()? else {
            return Ok(None);
        };
        if !self.parse_nary_expression_at_operator(&mut expr, cutoff)? {
            return Ok(None);
        }
        Ok(Some(expr))
    }

    fn parse_nary_expression_at_operator(
        &mut self,
        base: &mut NodeId,
        cutoff: u8,
    ) -> ParseResult<bool> {
        let mut cur_depth = self.expr_depth;

        while precedence_of(self.peek_kind(1)) >= cutoff {
            cur_depth += 1;
            if cur_depth > MAX_EXPR_DEPTH {
                return Err(ParseError::ExpressionDepthExceeded);
            }

            let op_kind = self.peek_kind(1);
            let expr_kind = SyntaxKind::for_nary_operator(op_kind).expect("operator token");
            let op_tk = self.consume();

            // `? :` is handled inline, with the GNU allowance for an
            // elided middle operand.
            let mut conditional: Option<(Option<NodeId>, TokenIdx)> = None;
            if op_kind == TokenKind::Question {
                let when_true = if self.at(TokenKind::Colon) {
                    if !self.tree.extensions().gnu_statement_expressions {
                        self.report_here(DiagnosticKind::ExpectedFeature("GNU conditionals"));
                    }
                    None
                } else {
                    let Some(e) = self.parse_expression()? else {
                        return Ok(false);
                    };
                    Some(e)
                };
                let mut colon_tk = TokenIdx::INVALID;
                self.match_tk(TokenKind::Colon, &mut colon_tk);
                conditional = Some((when_true, colon_tk));
            }

            let Some(mut next) = self.parse_expression_with_precedence_cast()? else {
                return Ok(false);
            };

            // Re-climb for higher precedence or right associativity.
            let ref_prec = precedence_of(op_kind);
            loop {
                let cur = self.peek_kind(1);
                let next_prec = precedence_of(cur);
                if next_prec > ref_prec || (next_prec == ref_prec && is_right_associative(cur)) {
                    if !self.parse_nary_expression_at_operator(&mut next, next_prec)? {
                        return Ok(false);
                    }
                } else {
                    break;
                }
            }

            *base = match conditional {
                Some((when_true, colon_tk)) => {
                    self.alloc(SyntaxNode::ConditionalExpression(ConditionalExpressionSyntax {
                        cond: *base,
                        question_tk: op_tk,
                        when_true,
                        colon_tk,
                        when_false: Some(next),
                    }))
                }
                None if expr_kind.is_assignment_expression() => {
                    self.alloc(SyntaxNode::AssignmentExpression(AssignmentExpressionSyntax {
                        kind: expr_kind,
                        left: *base,
                        op_tk,
                        right: next,
                    }))
                }
                None if expr_kind.is_binary_expression() => {
                    self.alloc(SyntaxNode::BinaryExpression(BinaryExpressionSyntax {
                        kind: expr_kind,
                        left: *base,
                        op_tk,
                        right: next,
                    }))
                }
                None => self.alloc(SyntaxNode::SequencingExpression(SequencingExpressionSyntax {
                    left: *base,
                    comma_tk: op_tk,
                    right: next,
                })),
            };
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, DiagnosticList};
    use crate::options::LanguageExtensions;
    use crate::syntax::tree::SyntaxTree;

    fn try_expr(source: &str) -> (SyntaxTree, Option<NodeId>, Vec<Diagnostic>) {
        let (tokens, interner) = crate::lexer::lex(source).expect("lexes");
        let mut sink = DiagnosticList::new();
        let tree =
            SyntaxTree::new(tokens, interner, Default::default(), LanguageExtensions::all());
        let mut parser = Parser::new(tree, &mut sink);
        let id = parser.parse_expression().expect("not fatal");
        (parser.into_tree(), id, sink.diagnostics)
    }

    fn expr(source: &str) -> (SyntaxTree, NodeId) {
        let (tree, id, diags) = try_expr(source);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        (tree, id.expect("expression parses"))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (tree, id) = expr("a + b * c");
        let SyntaxNode::BinaryExpression(add) = tree.node(id) else {
            panic!("additive root");
        };
        assert_eq!(add.kind, SyntaxKind::AddExpression);
        assert_eq!(tree.node(add.left).kind(), SyntaxKind::IdentifierExpression);
        assert_eq!(tree.node(add.right).kind(), SyntaxKind::MultiplyExpression);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let (tree, id) = expr("a - b - c");
        let SyntaxNode::BinaryExpression(outer) = tree.node(id) else {
            panic!("subtract root");
        };
        assert_eq!(outer.kind, SyntaxKind::SubtractExpression);
        assert_eq!(tree.node(outer.left).kind(), SyntaxKind::SubtractExpression);
        assert_eq!(tree.node(outer.right).kind(), SyntaxKind::IdentifierExpression);
    }

    #[test]
    fn assignment_is_right_associative() {
        let (tree, id) = expr("a = b = c");
        let SyntaxNode::AssignmentExpression(outer) = tree.node(id) else {
            panic!("assignment root");
        };
        assert_eq!(outer.kind, SyntaxKind::BasicAssignmentExpression);
        assert_eq!(tree.node(outer.left).kind(), SyntaxKind::IdentifierExpression);
        assert_eq!(tree.node(outer.right).kind(), SyntaxKind::BasicAssignmentExpression);
    }

    #[test]
    fn conditional_nests_to_the_right() {
        let (tree, id) = expr("a ? b : c ? d : e");
        let SyntaxNode::ConditionalExpression(outer) = tree.node(id) else {
            panic!("conditional root");
        };
        assert_eq!(tree.node(outer.when_false.unwrap()).kind(), SyntaxKind::ConditionalExpression);
    }

    #[test]
    fn gnu_conditional_with_elided_middle() {
        let (tree, id) = expr("a ? : b");
        let SyntaxNode::ConditionalExpression(cond) = tree.node(id) else {
            panic!("conditional root");
        };
        assert!(cond.when_true.is_none());
        assert!(cond.colon_tk.is_valid());
    }

    #[test]
    fn comma_builds_sequencing_expression() {
        let (tree, id) = expr("a, b");
        assert_eq!(tree.node(id).kind(), SyntaxKind::SequencingExpression);
    }

    #[test]
    fn compound_assignment_kinds() {
        let (tree, id) = expr("a += b");
        assert_eq!(tree.node(id).kind(), SyntaxKind::AddAssignmentExpression);
        let (tree, id) = expr("a <<= b");
        assert_eq!(tree.node(id).kind(), SyntaxKind::LeftShiftAssignmentExpression);
    }

    #[test]
    fn cast_of_builtin_type_is_unambiguous() {
        let (tree, id) = expr("(int)x");
        let SyntaxNode::CastExpression(cast) = tree.node(id) else {
            panic!("cast root");
        };
        assert_eq!(tree.node(cast.type_name).kind(), SyntaxKind::TypeName);
        assert_eq!(tree.node(cast.expr.unwrap()).kind(), SyntaxKind::IdentifierExpression);
    }

    #[test]
    fn cast_of_deref_over_builtin_stays_a_cast() {
        let (tree, id) = expr("(int) * y");
        assert_eq!(tree.node(id).kind(), SyntaxKind::CastExpression);
    }

    #[test]
    fn cast_or_binary_ambiguity() {
        // `(T) * y`: cast of `*y` to `T`, or `T` multiplied by `y`.
        let (tree, id) = expr("(T) * y");
        let SyntaxNode::AmbiguousCastOrBinaryExpression(ambi) = tree.node(id) else {
            panic!("ambiguity root, got {:?}", tree.node(id).kind());
        };

        let SyntaxNode::CastExpression(cast) = tree.node(ambi.cast_expr) else {
            panic!("cast alternative");
        };
        assert_eq!(
            tree.node(cast.expr.unwrap()).kind(),
            SyntaxKind::PointerIndirectionExpression
        );

        let SyntaxNode::BinaryExpression(bin) = tree.node(ambi.bin_expr) else {
            panic!("binary alternative");
        };
        assert_eq!(bin.kind, SyntaxKind::MultiplyExpression);
        assert_eq!(tree.node(bin.left).kind(), SyntaxKind::ParenthesizedExpression);
        assert_eq!(tree.node(bin.right).kind(), SyntaxKind::IdentifierExpression);
    }

    #[test]
    fn cast_or_binary_ambiguity_covers_all_four_operators() {
        for (source, kind) in [
            ("(T) & y", SyntaxKind::BitwiseAndExpression),
            ("(T) * y", SyntaxKind::MultiplyExpression),
            ("(T) + y", SyntaxKind::AddExpression),
            ("(T) - y", SyntaxKind::SubtractExpression),
        ] {
            let (tree, id) = expr(source);
            let SyntaxNode::AmbiguousCastOrBinaryExpression(ambi) = tree.node(id) else {
                panic!("{source}: expected ambiguity");
            };
            assert_eq!(tree.node(ambi.bin_expr).kind(), kind, "{source}");
        }
    }

    #[test]
    fn parenthesized_expression_fallback_from_cast_speculation() {
        let (tree, id) = expr("(x + 1) * 2");
        let SyntaxNode::BinaryExpression(mul) = tree.node(id) else {
            panic!("multiply root");
        };
        assert_eq!(mul.kind, SyntaxKind::MultiplyExpression);
        assert_eq!(tree.node(mul.left).kind(), SyntaxKind::ParenthesizedExpression);
    }

    #[test]
    fn compound_literal_with_tag_type() {
        let (tree, id) = expr("(struct S){ 1, 2 }");
        let SyntaxNode::CompoundLiteralExpression(lit) = tree.node(id) else {
            panic!("compound literal root");
        };
        let SyntaxNode::BraceEnclosedInitializer(init) = tree.node(lit.init.unwrap()) else {
            panic!("initializer");
        };
        assert_eq!(init.inits.len(), 2);
        assert!(init.inits[0].delim_tk.is_valid());
        assert!(!init.inits[1].delim_tk.is_valid());
    }

    #[test]
    fn compound_literal_with_typedef_name_type() {
        let (tree, id) = expr("(T){ 1 }");
        assert_eq!(tree.node(id).kind(), SyntaxKind::CompoundLiteralExpression);
    }

    #[test]
    fn compound_literal_takes_postfix_operators() {
        let (tree, id) = expr("(struct S){ 1 }.x");
        assert_eq!(tree.node(id).kind(), SyntaxKind::DirectMemberAccessExpression);
    }

    #[test]
    fn postfix_chain() {
        let (tree, id) = expr("f(a, b)[1].m->n++");
        let SyntaxNode::PostfixUnaryExpression(inc) = tree.node(id) else {
            panic!("post-increment root");
        };
        assert_eq!(inc.kind, SyntaxKind::PostIncrementExpression);
        let SyntaxNode::MemberAccessExpression(arrow) = tree.node(inc.expr) else {
            panic!("arrow access");
        };
        assert_eq!(arrow.kind, SyntaxKind::IndirectMemberAccessExpression);
        let SyntaxNode::MemberAccessExpression(dot) = tree.node(arrow.expr) else {
            panic!("dot access");
        };
        assert_eq!(dot.kind, SyntaxKind::DirectMemberAccessExpression);
        let SyntaxNode::ArraySubscriptExpression(sub) = tree.node(dot.expr) else {
            panic!("subscript");
        };
        let SyntaxNode::CallExpression(call) = tree.node(sub.expr) else {
            panic!("call");
        };
        assert_eq!(call.args.len(), 2);
        assert!(call.args[0].delim_tk.is_valid());
        assert!(!call.args[1].delim_tk.is_valid());
    }

    #[test]
    fn adjacent_string_literals_fold_into_a_chain() {
        let (tree, id) = expr("\"a\" \"b\" \"c\"");
        let SyntaxNode::StringLiteralExpression(first) = tree.node(id) else {
            panic!("string literal root");
        };
        let SyntaxNode::StringLiteralExpression(second) = tree.node(first.adjacent.unwrap())
        else {
            panic!("second link");
        };
        let SyntaxNode::StringLiteralExpression(third) = tree.node(second.adjacent.unwrap())
        else {
            panic!("third link");
        };
        assert!(third.adjacent.is_none());
    }

    #[test]
    fn string_concatenation_mixed_prefixes() {
        // Differing encoding prefixes still chain; compatibility is a
        // later phase's concern.
        let (tree, id, diags) = try_expr("L\"a\" \"b\"");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        let SyntaxNode::StringLiteralExpression(first) = tree.node(id.unwrap()) else {
            panic!("string literal root");
        };
        assert!(first.adjacent.is_some());
    }

    #[test]
    fn sizeof_over_identifier_defers_to_ambiguity_node() {
        let (tree, id) = expr("sizeof (x)");
        let SyntaxNode::TypeTraitExpression(trait_expr) = tree.node(id) else {
            panic!("type trait root");
        };
        assert_eq!(trait_expr.kind, SyntaxKind::SizeofExpression);
        let SyntaxNode::AmbiguousTypeNameOrExpression(ambi) =
            tree.node(trait_expr.type_ref.unwrap())
        else {
            panic!("ambiguous operand");
        };
        assert_eq!(
            tree.node(ambi.type_name_ref).kind(),
            SyntaxKind::TypeNameAsTypeReference
        );
        assert_eq!(tree.node(ambi.expr_ref).kind(), SyntaxKind::ExpressionAsTypeReference);
    }

    #[test]
    fn sizeof_over_builtin_type_and_plain_expression() {
        let (tree, id) = expr("sizeof (int)");
        let SyntaxNode::TypeTraitExpression(n) = tree.node(id) else {
            panic!("type trait root");
        };
        assert_eq!(
            tree.node(n.type_ref.unwrap()).kind(),
            SyntaxKind::TypeNameAsTypeReference
        );

        let (tree, id) = expr("sizeof x");
        let SyntaxNode::TypeTraitExpression(n) = tree.node(id) else {
            panic!("type trait root");
        };
        assert_eq!(
            tree.node(n.type_ref.unwrap()).kind(),
            SyntaxKind::ExpressionAsTypeReference
        );
    }

    #[test]
    fn sizeof_of_pointer_type_commits_to_type_name() {
        let (tree, id) = expr("sizeof (T *)");
        let SyntaxNode::TypeTraitExpression(n) = tree.node(id) else {
            panic!("type trait root");
        };
        assert_eq!(
            tree.node(n.type_ref.unwrap()).kind(),
            SyntaxKind::TypeNameAsTypeReference
        );
    }

    #[test]
    fn alignof_expression() {
        let (tree, id) = expr("_Alignof (int)");
        assert_eq!(tree.node(id).kind(), SyntaxKind::AlignofExpression);
    }

    #[test]
    fn generic_selection() {
        let (tree, id) = expr("_Generic(x, int: 1, default: 0)");
        let SyntaxNode::GenericSelectionExpression(sel) = tree.node(id) else {
            panic!("generic selection root");
        };
        assert_eq!(sel.assocs.len(), 2);
        assert_eq!(
            tree.node(sel.assocs[0].node).kind(),
            SyntaxKind::TypedGenericAssociation
        );
        let SyntaxNode::GenericAssociation(dflt) = tree.node(sel.assocs[1].node) else {
            panic!("default association");
        };
        assert_eq!(dflt.kind, SyntaxKind::DefaultGenericAssociation);
        assert!(dflt.default_kw_tk.is_valid());
        assert!(dflt.type_name.is_none());
    }

    #[test]
    fn statement_expression_requires_the_feature() {
        let (tree, id) = expr("({ 1; })");
        assert_eq!(tree.node(id).kind(), SyntaxKind::StatementExpression);

        let (tokens, interner) = crate::lexer::lex("({ 1; })").expect("lexes");
        let mut sink = DiagnosticList::new();
        let tree =
            SyntaxTree::new(tokens, interner, Default::default(), LanguageExtensions::none());
        let mut parser = Parser::new(tree, &mut sink);
        parser.parse_expression().expect("not fatal");
        assert!(sink
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::ExpectedFeature("GNU statement expressions")));
    }

    #[test]
    fn extension_keyword_wraps_cast_level_expression() {
        let (tree, id) = expr("__extension__ (int)x");
        let SyntaxNode::ExtensionExpression(ext) = tree.node(id) else {
            panic!("extension wrapper root");
        };
        assert_eq!(tree.node(ext.expr.unwrap()).kind(), SyntaxKind::CastExpression);
    }

    #[test]
    fn garbage_reports_first_of_expression() {
        let (_, id, diags) = try_expr(";");
        assert!(id.is_none());
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::ExpectedFirstOfExpression));
    }

    #[test]
    fn expression_depth_is_bounded() {
        let source = format!("int x = {}1{};", "(".repeat(600), ")".repeat(600));
        let mut sink = DiagnosticList::new();
        let result = crate::parse_source(
            &source,
            Default::default(),
            LanguageExtensions::all(),
            &mut sink,
        );
        assert!(matches!(result, Err(ParseError::ExpressionDepthExceeded)));
    }
}
