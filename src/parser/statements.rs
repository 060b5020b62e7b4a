//! Statement parsing: the standard C statement set plus GNU inline
//! assembly, and the declaration-vs-expression statement
//! disambiguation.

use log::trace;

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::{ParseResult, Parser};
use crate::parser::declarations::IdentifierRole;
use crate::syntax::kind::SyntaxKind;
use crate::syntax::node::*;
use crate::syntax::utils::stripped_declarator;
use crate::tokens::{TokenIdx, TokenKind};

impl<'s> Parser<'s> {
    /// compound-statement: `{ block-item* }`, resynchronizing after
    /// every failed item.
    pub(super) fn parse_compound_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_compound_statement_at_first");
        debug_assert!(self.at(TokenKind::OpenBrace));

        let mut n = CompoundStatementSyntax {
            open_brace_tk: self.consume(),
            stmts: Vec::new(),
            close_brace_tk: TokenIdx::INVALID,
        };

        while !self.at(TokenKind::CloseBrace) && !self.at_eof() {
            match self.parse_statement()? {
                Some(stmt) => n.stmts.push(stmt),
                None => self.ignore_statement(),
            }
        }

        self.match_or_skip_to(TokenKind::CloseBrace, &mut n.close_brace_tk);
        Ok(Some(self.alloc(SyntaxNode::CompoundStatement(n))))
    }

    pub(super) fn parse_statement(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_statement");

        let kind = self.peek_kind(1);
        match kind {
            TokenKind::OpenBrace => self.parse_compound_statement_at_first(),

            TokenKind::Semicolon => {
                let semicolon_tk = self.consume();
                Ok(Some(self.alloc(SyntaxNode::ExpressionStatement(ExpressionStatementSyntax {
                    expr: None,
                    semicolon_tk,
                }))))
            }

            TokenKind::KwIf => self.parse_if_statement_at_first(),
            TokenKind::KwSwitch => self.parse_switch_statement_at_first(),
            TokenKind::KwWhile => self.parse_while_statement_at_first(),
            TokenKind::KwDo => self.parse_do_statement_at_first(),
            TokenKind::KwFor => self.parse_for_statement_at_first(),
            TokenKind::KwGoto => self.parse_goto_statement_at_first(),

            TokenKind::KwContinue => {
                Ok(self.parse_jump_statement_at_first(SyntaxKind::ContinueStatement))
            }
            TokenKind::KwBreak => {
                Ok(self.parse_jump_statement_at_first(SyntaxKind::BreakStatement))
            }
            TokenKind::KwReturn => self.parse_return_statement_at_first(),

            TokenKind::KwCase => {
                self.parse_labeled_statement_at_first(SyntaxKind::CaseLabelStatement)
            }
            TokenKind::KwDefault => {
                self.parse_labeled_statement_at_first(SyntaxKind::DefaultLabelStatement)
            }

            TokenKind::KwGnuAsm => self.parse_asm_statement_at_first(),

            TokenKind::KwGnuExtension => {
                let ext_kw = self.consume();
                let Some(decl) = self.parse_external_declaration()? else {
                    return Ok(None);
                };
                self.set_declaration_ext_kw(decl, ext_kw);
                Ok(Some(
                    self.alloc(SyntaxNode::DeclarationStatement(DeclarationStatementSyntax {
                        decl,
                    })),
                ))
            }

            TokenKind::Identifier => {
                if self.peek_kind(2) == TokenKind::Colon {
                    return self
                        .parse_labeled_statement_at_first(SyntaxKind::IdentifierLabelStatement);
                }
                self.parse_expression_or_declaration_statement()
            }

            _ if kind.starts_declaration() => self.parse_declaration_statement(),

            _ => self.parse_expression_statement(),
        }
    }

    fn parse_declaration_statement(&mut self) -> ParseResult<Option<NodeId>> {
        let Some(decl) = self.parse_external_declaration()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::DeclarationStatement(DeclarationStatementSyntax { decl }))))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Option<NodeId>> {
        let Some(expr) = self.parse_expression()? else {
            return Ok(None);
        };
        let mut n = ExpressionStatementSyntax { expr: Some(expr), semicolon_tk: TokenIdx::INVALID };
        // A missing `;` is reported; the statement is kept with the
        // sentinel in its slot.
        self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);
        Ok(Some(self.alloc(SyntaxNode::ExpressionStatement(n))))
    }

    /// Statement starting with an identifier: the identifier-role
    /// lookahead decides between expression and declaration; where the
    /// declaration's shape is also a valid expression, both
    /// interpretations are built.
    fn parse_expression_or_declaration_statement(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_expression_or_declaration_statement");
        debug_assert!(self.at(TokenKind::Identifier));

        if self.determine_identifier_role(false) == IdentifierRole::AsDeclarator {
            return self.parse_expression_statement();
        }

        let bt = self.start_speculation();
        match self.parse_declaration_statement()? {
            Some(decl_stmt) if self.declaration_statement_reads_as_expression(decl_stmt) => {
                let end_pos = self.pos;
                self.backtrack(bt);

                let Some(expr_stmt) = self.parse_expression_statement()? else {
                    // Both readings failing here cannot happen for the
                    // shapes that qualify; resynchronize regardless.
                    self.pos = end_pos;
                    return Ok(None);
                };
                debug_assert_eq!(self.pos, end_pos);

                Ok(Some(self.alloc(SyntaxNode::AmbiguousExpressionOrDeclarationStatement(
                    AmbiguousExpressionOrDeclarationStatementSyntax { expr_stmt, decl_stmt },
                ))))
            }

            Some(decl_stmt) => {
                self.commit(bt);
                Ok(Some(decl_stmt))
            }

            None => {
                self.backtrack(bt);
                self.parse_expression_statement()
            }
        }
    }

    /// True for declaration statements of the shape
    /// `typedef-name pointer*/paren* identifier ;` with no
    /// initializer, which read equally well as `x * y;` / `x (y);`
    /// expressions.
    fn declaration_statement_reads_as_expression(&self, decl_stmt: NodeId) -> bool {
        let SyntaxNode::DeclarationStatement(stmt) = self.node(decl_stmt) else {
            return false;
        };
        let SyntaxNode::VariableAndOrFunctionDeclaration(decl) = self.node(stmt.decl) else {
            return false;
        };
        if decl.specs.len() != 1
            || !matches!(self.node(decl.specs[0]), SyntaxNode::TypedefName(_))
            || decl.decltors.len() != 1
        {
            return false;
        }
        // A bare identifier declarator (`T x;`) has no expression
        // reading; only pointer/paren shapes are ambiguous.
        let decltor = decl.decltors[0].node;
        matches!(
            self.node(decltor),
            SyntaxNode::PointerDeclarator(_) | SyntaxNode::ParenthesizedDeclarator(_)
        ) && self.declarator_reads_as_expression(decltor)
    }

    fn declarator_reads_as_expression(&self, decltor: NodeId) -> bool {
        match self.node(decltor) {
            SyntaxNode::IdentifierDeclarator(n) => n.init.is_none() && n.attrs2.is_empty(),
            SyntaxNode::PointerDeclarator(n) => {
                n.init.is_none()
                    && n.quals_and_attrs.is_empty()
                    && n.inner.is_some_and(|inner| self.declarator_reads_as_expression(inner))
            }
            SyntaxNode::ParenthesizedDeclarator(_) => {
                let inner = stripped_declarator(&self.tree, decltor);
                inner != decltor && self.declarator_reads_as_expression(inner)
            }
            _ => false,
        }
    }

    // === Selection and iteration ===

    fn parse_if_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwIf));

        let mut n = IfStatementSyntax {
            if_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            cond: None,
            close_paren_tk: TokenIdx::INVALID,
            stmt: None,
            else_kw_tk: TokenIdx::INVALID,
            else_stmt: None,
        };

        if !self.parse_parenthesized_condition(
            &mut n.open_paren_tk,
            &mut n.cond,
            &mut n.close_paren_tk,
        )? {
            return Ok(None);
        }

        let Some(stmt) = self.parse_statement()? else {
            return Ok(None);
        };
        n.stmt = Some(stmt);

        if self.at(TokenKind::KwElse) {
            n.else_kw_tk = self.consume();
            let Some(else_stmt) = self.parse_statement()? else {
                return Ok(None);
            };
            n.else_stmt = Some(else_stmt);
        }

        Ok(Some(self.alloc(SyntaxNode::IfStatement(n))))
    }

    fn parse_switch_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwSwitch));

        let mut n = SwitchStatementSyntax {
            switch_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            cond: None,
            close_paren_tk: TokenIdx::INVALID,
            stmt: None,
        };

        if !self.parse_parenthesized_condition(
            &mut n.open_paren_tk,
            &mut n.cond,
            &mut n.close_paren_tk,
        )? {
            return Ok(None);
        }
        let Some(stmt) = self.parse_statement()? else {
            return Ok(None);
        };
        n.stmt = Some(stmt);
        Ok(Some(self.alloc(SyntaxNode::SwitchStatement(n))))
    }

    fn parse_while_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwWhile));

        let mut n = WhileStatementSyntax {
            while_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            cond: None,
            close_paren_tk: TokenIdx::INVALID,
            stmt: None,
        };

        if !self.parse_parenthesized_condition(
            &mut n.open_paren_tk,
            &mut n.cond,
            &mut n.close_paren_tk,
        )? {
            return Ok(None);
        }
        let Some(stmt) = self.parse_statement()? else {
            return Ok(None);
        };
        n.stmt = Some(stmt);
        Ok(Some(self.alloc(SyntaxNode::WhileStatement(n))))
    }

    fn parse_do_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwDo));

        let mut n = DoStatementSyntax {
            do_kw_tk: self.consume(),
            stmt: None,
            while_kw_tk: TokenIdx::INVALID,
            open_paren_tk: TokenIdx::INVALID,
            cond: None,
            close_paren_tk: TokenIdx::INVALID,
            semicolon_tk: TokenIdx::INVALID,
        };

        let Some(stmt) = self.parse_statement()? else {
            return Ok(None);
        };
        n.stmt = Some(stmt);

        if !self.match_tk(TokenKind::KwWhile, &mut n.while_kw_tk) {
            return Ok(None);
        }
        if !self.parse_parenthesized_condition(
            &mut n.open_paren_tk,
            &mut n.cond,
            &mut n.close_paren_tk,
        )? {
            return Ok(None);
        }
        self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);
        Ok(Some(self.alloc(SyntaxNode::DoStatement(n))))
    }

    /// `( expression )` of if/switch/while/do; on a damaged condition
    /// the scan resumes at the closing paren.
    fn parse_parenthesized_condition(
        &mut self,
        open_slot: &mut TokenIdx,
        cond_slot: &mut Option<NodeId>,
        close_slot: &mut TokenIdx,
    ) -> ParseResult<bool> {
        if !self.match_tk(TokenKind::OpenParen, open_slot) {
            return Ok(false);
        }
        *cond_slot = self.parse_expression()?;
        if cond_slot.is_none() {
            self.skip_to(TokenKind::CloseParen);
        }
        Ok(self.match_or_skip_to(TokenKind::CloseParen, close_slot))
    }

    fn parse_for_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwFor));

        let mut n = ForStatementSyntax {
            for_kw_tk: self.consume(),
            open_paren_tk: TokenIdx::INVALID,
            init: None,
            cond: None,
            semicolon_tk: TokenIdx::INVALID,
            step: None,
            close_paren_tk: TokenIdx::INVALID,
            stmt: None,
        };

        if !self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk) {
            return Ok(None);
        }

        // The init clause is a whole statement (it owns the first
        // `;`): empty, a declaration, or an expression statement.
        let init_kind = self.peek_kind(1);
        n.init = if init_kind == TokenKind::Semicolon {
            let semicolon_tk = self.consume();
            Some(self.alloc(SyntaxNode::ExpressionStatement(ExpressionStatementSyntax {
                expr: None,
                semicolon_tk,
            })))
        } else if init_kind.starts_declaration()
            || (init_kind == TokenKind::Identifier
                && self.determine_identifier_role(false) == IdentifierRole::AsTypedefName)
        {
            match self.parse_declaration_statement()? {
                Some(stmt) => Some(stmt),
                None => {
                    self.skip_to(TokenKind::CloseParen);
                    None
                }
            }
        } else {
            match self.parse_expression_statement()? {
                Some(stmt) => Some(stmt),
                None => {
                    self.skip_to(TokenKind::CloseParen);
                    None
                }
            }
        };

        if !self.at(TokenKind::CloseParen) {
            if !self.at(TokenKind::Semicolon) {
                n.cond = self.parse_expression()?;
                if n.cond.is_none() {
                    self.skip_to(TokenKind::CloseParen);
                }
            }
            self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);

            if !self.at(TokenKind::CloseParen) {
                n.step = self.parse_expression()?;
                if n.step.is_none() {
                    self.skip_to(TokenKind::CloseParen);
                }
            }
        }

        if !self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk) {
            return Ok(None);
        }
        let Some(stmt) = self.parse_statement()? else {
            return Ok(None);
        };
        n.stmt = Some(stmt);
        Ok(Some(self.alloc(SyntaxNode::ForStatement(n))))
    }

    // === Jumps and labels ===

    fn parse_goto_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwGoto));

        let mut n = GotoStatementSyntax {
            goto_kw_tk: self.consume(),
            ident_tk: TokenIdx::INVALID,
            semicolon_tk: TokenIdx::INVALID,
        };

        if !self.match_tk(TokenKind::Identifier, &mut n.ident_tk) {
            return Ok(None);
        }
        self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);
        Ok(Some(self.alloc(SyntaxNode::GotoStatement(n))))
    }

    fn parse_jump_statement_at_first(&mut self, kind: SyntaxKind) -> Option<NodeId> {
        let mut n = JumpStatementSyntax {
            kind,
            kw_tk: self.consume(),
            semicolon_tk: TokenIdx::INVALID,
        };
        self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);
        Some(self.alloc(SyntaxNode::JumpStatement(n)))
    }

    fn parse_return_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        debug_assert!(self.at(TokenKind::KwReturn));

        let mut n = ReturnStatementSyntax {
            return_kw_tk: self.consume(),
            expr: None,
            semicolon_tk: TokenIdx::INVALID,
        };

        if !self.at(TokenKind::Semicolon) {
            n.expr = self.parse_expression()?;
            if n.expr.is_none() {
                return Ok(None);
            }
        }
        self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);
        Ok(Some(self.alloc(SyntaxNode::ReturnStatement(n))))
    }

    /// `ident :`, `case expr :`, or `default :` ahead of a statement.
    fn parse_labeled_statement_at_first(&mut self, kind: SyntaxKind) -> ParseResult<Option<NodeId>> {
        let mut n = LabeledStatementSyntax {
            kind,
            label_tk: self.consume(),
            expr: None,
            colon_tk: TokenIdx::INVALID,
            stmt: None,
        };

        if kind == SyntaxKind::CaseLabelStatement {
            n.expr = self.parse_expression_with_precedence_conditional()?;
            if n.expr.is_none() {
                return Ok(None);
            }
        }

        if !self.match_tk(TokenKind::Colon, &mut n.colon_tk) {
            return Ok(None);
        }
        let Some(stmt) = self.parse_statement()? else {
            return Ok(None);
        };
        n.stmt = Some(stmt);
        Ok(Some(self.alloc(SyntaxNode::LabeledStatement(n))))
    }

    // === Inline assembly ===

    /// GNU asm statement:
    /// `__asm__ quals? ( template : outputs : inputs : clobbers : labels ) ;`
    fn parse_asm_statement_at_first(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_asm_statement_at_first");
        debug_assert!(self.at(TokenKind::KwGnuAsm));

        if !self.tree.extensions().gnu_asm {
            self.report_here(DiagnosticKind::ExpectedFeature("GNU assembly in C"));
        }

        let mut n = AsmStatementSyntax {
            asm_kw_tk: self.consume(),
            quals: Vec::new(),
            open_paren_tk: TokenIdx::INVALID,
            template: None,
            colon1_tk: TokenIdx::INVALID,
            outputs: Vec::new(),
            colon2_tk: TokenIdx::INVALID,
            inputs: Vec::new(),
            colon3_tk: TokenIdx::INVALID,
            clobbers: Vec::new(),
            colon4_tk: TokenIdx::INVALID,
            labels: Vec::new(),
            close_paren_tk: TokenIdx::INVALID,
            semicolon_tk: TokenIdx::INVALID,
        };

        loop {
            let kind = match self.peek_kind(1) {
                TokenKind::KwVolatile => SyntaxKind::AsmVolatileQualifier,
                TokenKind::KwInline => SyntaxKind::AsmInlineQualifier,
                TokenKind::KwGoto => SyntaxKind::AsmGotoQualifier,
                _ => break,
            };
            let qual = self.parse_trivial_specifier_at_first(kind);
            n.quals.push(qual);
        }

        if !self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk) {
            return Ok(None);
        }
        n.template = self.parse_string_literal()?;
        if n.template.is_none() {
            self.skip_to(TokenKind::CloseParen);
            return Ok(None);
        }

        if self.at(TokenKind::Colon) {
            n.colon1_tk = self.consume();
            if !self.parse_asm_operand_list(SyntaxKind::AsmOutputOperand, &mut n.outputs)? {
                return Ok(None);
            }
            if self.at(TokenKind::Colon) {
                n.colon2_tk = self.consume();
                if !self.parse_asm_operand_list(SyntaxKind::AsmInputOperand, &mut n.inputs)? {
                    return Ok(None);
                }
                if self.at(TokenKind::Colon) {
                    n.colon3_tk = self.consume();
                    if !self.parse_asm_clobber_list(&mut n.clobbers)? {
                        return Ok(None);
                    }
                    if self.at(TokenKind::Colon) {
                        n.colon4_tk = self.consume();
                        if !self.parse_asm_goto_label_list(&mut n.labels)? {
                            return Ok(None);
                        }
                    }
                }
            }
        }

        if !self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk) {
            return Ok(None);
        }
        self.match_tk(TokenKind::Semicolon, &mut n.semicolon_tk);
        Ok(Some(self.alloc(SyntaxNode::AsmStatement(n))))
    }

    fn parse_asm_operand_list(
        &mut self,
        kind: SyntaxKind,
        operands: &mut Vec<ListElem>,
    ) -> ParseResult<bool> {
        if matches!(self.peek_kind(1), TokenKind::Colon | TokenKind::CloseParen) {
            return Ok(true);
        }
        loop {
            let Some(operand) = self.parse_asm_operand(kind)? else {
                return Ok(false);
            };
            operands.push(ListElem::new(operand));

            if self.at(TokenKind::Comma) {
                operands.last_mut().expect("just pushed").delim_tk = self.consume();
            } else {
                return Ok(true);
            }
        }
    }

    /// One asm operand: `[name]? "constraint" ( expression )`.
    fn parse_asm_operand(&mut self, kind: SyntaxKind) -> ParseResult<Option<NodeId>> {
        let mut n = AsmOperandSyntax {
            kind,
            open_bracket_tk: TokenIdx::INVALID,
            ident_tk: TokenIdx::INVALID,
            close_bracket_tk: TokenIdx::INVALID,
            constraint: None,
            open_paren_tk: TokenIdx::INVALID,
            expr: None,
            close_paren_tk: TokenIdx::INVALID,
        };

        if self.at(TokenKind::OpenBracket) {
            n.open_bracket_tk = self.consume();
            if !self.match_tk(TokenKind::Identifier, &mut n.ident_tk)
                || !self.match_tk(TokenKind::CloseBracket, &mut n.close_bracket_tk)
            {
                return Ok(None);
            }
        }

        n.constraint = self.parse_string_literal()?;
        if n.constraint.is_none() {
            return Ok(None);
        }

        let ok = self.match_tk(TokenKind::OpenParen, &mut n.open_paren_tk)
            && {
                n.expr = self.parse_expression()?;
                n.expr.is_some()
            }
            && self.match_or_skip_to(TokenKind::CloseParen, &mut n.close_paren_tk);

        if ok {
            Ok(Some(self.alloc(SyntaxNode::AsmOperand(n))))
        } else {
            Ok(None)
        }
    }

    fn parse_asm_clobber_list(&mut self, clobbers: &mut Vec<ListElem>) -> ParseResult<bool> {
        if matches!(self.peek_kind(1), TokenKind::Colon | TokenKind::CloseParen) {
            return Ok(true);
        }
        loop {
            let Some(clobber) = self.parse_string_literal()? else {
                return Ok(false);
            };
            clobbers.push(ListElem::new(clobber));

            if self.at(TokenKind::Comma) {
                clobbers.last_mut().expect("just pushed").delim_tk = self.consume();
            } else {
                return Ok(true);
            }
        }
    }

    fn parse_asm_goto_label_list(&mut self, labels: &mut Vec<ListElem>) -> ParseResult<bool> {
        if self.at(TokenKind::CloseParen) {
            return Ok(true);
        }
        loop {
            if !self.at(TokenKind::Identifier) {
                self.report_here(DiagnosticKind::ExpectedTokenOfCategory(
                    crate::tokens::TokenCategory::Identifier,
                ));
                return Ok(false);
            }
            let ident_tk = self.consume();
            let label = self
                .alloc(SyntaxNode::IdentifierExpression(IdentifierExpressionSyntax { ident_tk }));
            labels.push(ListElem::new(label));

            if self.at(TokenKind::Comma) {
                labels.last_mut().expect("just pushed").delim_tk = self.consume();
            } else {
                return Ok(true);
            }
        }
    }
}
