//! Type names and the parenthesized type-name-or-expression ambiguity
//! shared by `sizeof`, `_Alignof`, `_Alignas`, and `typeof`.

use log::trace;

use crate::parser::core::{ParseResult, Parser};
use crate::syntax::node::*;
use crate::tokens::{TokenIdx, TokenKind};

impl<'s> Parser<'s> {
    /// type-name: specifier-qualifier-list abstract-declarator?
    pub(super) fn parse_type_name(&mut self) -> ParseResult<Option<NodeId>> {
        trace!("parse_type_name");

        let mut decl: Option<NodeId> = None;
        let mut specs: Vec<NodeId> = Vec::new();
        if !self.parse_specifier_qualifier_list(&mut decl, &mut specs, false)? {
            return Ok(None);
        }

        // An anonymous tag defined inside a type name (a GNU-ism in
        // casts) is lifted into the specifier list the same way a
        // declaration lifts it.
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

        let Some(decltor) = self.parse_abstract_declarator()? else {
            return Ok(None);
        };

        Ok(Some(self.alloc(SyntaxNode::TypeName(TypeNameSyntax { specs, decltor: Some(decltor) }))))
    }

    /// The operand of `sizeof`, `_Alignof`, `_Alignas`, and `typeof`:
    /// either a parenthesized type name, or an expression. The two
    /// productions overlap on identifier-only contents, where both
    /// complete interpretations are built and selection is deferred.
    pub(super) fn parse_parenthesized_type_name_or_expression(
        &mut self,
    ) -> ParseResult<Option<NodeId>> {
        trace!("parse_parenthesized_type_name_or_expression");

        if !self.at(TokenKind::OpenParen) {
            // `sizeof expr` without parentheses.
            let Some(expr) = self.parse_expression_with_precedence_unary()? else {
                return Ok(None);
            };
            return Ok(Some(self.alloc(SyntaxNode::ExpressionAsTypeReference(
                ExpressionAsTypeReferenceSyntax { expr },
            ))));
        }

        let k2 = self.peek_kind(2);
        if k2.starts_unambiguous_type_name() {
            let open_paren_tk = self.consume();
            let Some(type_name) = self.parse_type_name()? else {
                return Ok(None);
            };
            let mut close_paren_tk = TokenIdx::INVALID;
            if !self.match_or_skip_to(TokenKind::CloseParen, &mut close_paren_tk) {
                return Ok(None);
            }
            return Ok(Some(self.alloc(SyntaxNode::TypeNameAsTypeReference(
                TypeNameAsTypeReferenceSyntax { open_paren_tk, type_name, close_paren_tk },
            ))));
        }

        if k2 == TokenKind::Identifier {
            if self.peek_kind(3) == TokenKind::CloseParen {
                return Ok(Some(self.parse_ambiguous_type_name_or_expression_at_first()));
            }

            // More than a lone identifier: a type name either parses
            // through the closing paren or it was an expression.
            let bt = self.start_speculation();
            let open_paren_tk = self.consume();
            match self.parse_type_name()? {
                Some(type_name) if self.at(TokenKind::CloseParen) => {
                    self.commit(bt);
                    let close_paren_tk = self.consume();
                    return Ok(Some(self.alloc(SyntaxNode::TypeNameAsTypeReference(
                        TypeNameAsTypeReferenceSyntax { open_paren_tk, type_name, close_paren_tk },
                    ))));
                }
                _ => self.backtrack(bt),
            }
        }

        let Some(expr) = self.parse_expression_with_precedence_unary()? else {
            return Ok(None);
        };
        Ok(Some(self.alloc(SyntaxNode::ExpressionAsTypeReference(
            ExpressionAsTypeReferenceSyntax { expr },
        ))))
    }

    /// `( identifier )`: both interpretations are complete subtrees of
    /// their own; neither shares nodes with the other.
    fn parse_ambiguous_type_name_or_expression_at_first(&mut self) -> NodeId {
        debug_assert!(self.at(TokenKind::OpenParen));

        let open_paren_tk = self.consume();
        let ident_tk = self.consume();
        let close_paren_tk = self.consume();

        let typedef_name = self.alloc(SyntaxNode::TypedefName(TypedefNameSyntax { ident_tk }));
        let abs = self
            .alloc(SyntaxNode::AbstractDeclarator(AbstractDeclaratorSyntax { attrs: Vec::new() }));
        let type_name = self.alloc(SyntaxNode::TypeName(TypeNameSyntax {
            specs: vec![typedef_name],
            decltor: Some(abs),
        }));
        let type_name_ref = self.alloc(SyntaxNode::TypeNameAsTypeReference(
            TypeNameAsTypeReferenceSyntax { open_paren_tk, type_name, close_paren_tk },
        ));

        let ident_expr =
            self.alloc(SyntaxNode::IdentifierExpression(IdentifierExpressionSyntax { ident_tk }));
        let paren_expr = self.alloc(SyntaxNode::ParenthesizedExpression(
            ParenthesizedExpressionSyntax { open_paren_tk, expr: Some(ident_expr), close_paren_tk },
        ));
        let expr_ref = self.alloc(SyntaxNode::ExpressionAsTypeReference(
            ExpressionAsTypeReferenceSyntax { expr: paren_expr },
        ));

        self.alloc(SyntaxNode::AmbiguousTypeNameOrExpression(AmbiguousTypeNameOrExpressionSyntax {
            type_name_ref,
            expr_ref,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, DiagnosticList};
    use crate::options::LanguageExtensions;
    use crate::syntax::kind::SyntaxKind;
    use crate::syntax::tree::SyntaxTree;

    fn parser_over<'s>(
        source: &str,
        sink: &'s mut DiagnosticList,
    ) -> crate::parser::Parser<'s> {
        let (tokens, interner) = crate::lexer::lex(source).expect("lexes");
        let tree =
            SyntaxTree::new(tokens, interner, Default::default(), LanguageExtensions::all());
        crate::parser::Parser::new(tree, sink)
    }

    fn type_ref_of(source: &str) -> (SyntaxTree, NodeId, Vec<Diagnostic>) {
        let mut sink = DiagnosticList::new();
        let mut parser = parser_over(source, &mut sink);
        let id = parser
            .parse_parenthesized_type_name_or_expression()
            .expect("not fatal")
            .expect("a type reference parses");
        (parser.into_tree(), id, sink.diagnostics)
    }

    #[test]
    fn builtin_contents_commit_to_a_type_name() {
        let (tree, id, diags) = type_ref_of("(int)");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let SyntaxNode::TypeNameAsTypeReference(type_ref) = tree.node(id) else {
            panic!("type-name reference, got {:?}", tree.node(id).kind());
        };
        let SyntaxNode::TypeName(type_name) = tree.node(type_ref.type_name) else {
            panic!("type name");
        };
        assert_eq!(tree.node(type_name.specs[0]).kind(), SyntaxKind::BuiltinTypeSpecifier);
        assert_eq!(
            tree.node(type_name.decltor.unwrap()).kind(),
            SyntaxKind::AbstractDeclarator
        );
    }

    #[test]
    fn lone_identifier_contents_are_ambiguous() {
        let (tree, id, diags) = type_ref_of("(x)");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let SyntaxNode::AmbiguousTypeNameOrExpression(ambi) = tree.node(id) else {
            panic!("ambiguity node, got {:?}", tree.node(id).kind());
        };
        assert_ne!(ambi.type_name_ref, ambi.expr_ref);

        // Both alternatives are complete and anchor the identifier at
        // the same token index without sharing nodes.
        let SyntaxNode::TypeNameAsTypeReference(ty_alt) = tree.node(ambi.type_name_ref) else {
            panic!("type-name alternative");
        };
        let SyntaxNode::TypeName(type_name) = tree.node(ty_alt.type_name) else {
            panic!("type name");
        };
        let SyntaxNode::TypedefName(typedef_name) = tree.node(type_name.specs[0]) else {
            panic!("typedef-name specifier");
        };

        let SyntaxNode::ExpressionAsTypeReference(expr_alt) = tree.node(ambi.expr_ref) else {
            panic!("expression alternative");
        };
        let SyntaxNode::ParenthesizedExpression(paren) = tree.node(expr_alt.expr) else {
            panic!("parenthesized expression");
        };
        let SyntaxNode::IdentifierExpression(ident) = tree.node(paren.expr.unwrap()) else {
            panic!("identifier expression");
        };
        assert_eq!(typedef_name.ident_tk, ident.ident_tk);
    }

    #[test]
    fn pointer_contents_commit_to_a_type_name() {
        let (tree, id, diags) = type_ref_of("(x *)");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        assert_eq!(tree.node(id).kind(), SyntaxKind::TypeNameAsTypeReference);
    }

    #[test]
    fn expression_contents_fall_back_without_reports() {
        let (tree, id, diags) = type_ref_of("(x + 1)");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let SyntaxNode::ExpressionAsTypeReference(expr_ref) = tree.node(id) else {
            panic!("expression reference, got {:?}", tree.node(id).kind());
        };
        assert_eq!(tree.node(expr_ref.expr).kind(), SyntaxKind::ParenthesizedExpression);
    }

    #[test]
    fn unparenthesized_operand_is_an_expression() {
        let (tree, id, diags) = type_ref_of("x");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        assert_eq!(tree.node(id).kind(), SyntaxKind::ExpressionAsTypeReference);
    }

    #[test]
    fn anonymous_tag_lifts_into_the_specifier_list() {
        let mut sink = DiagnosticList::new();
        let mut parser = parser_over("struct { int x; }", &mut sink);
        let id = parser.parse_type_name().expect("not fatal").expect("type name parses");
        let tree = parser.into_tree();
        assert!(sink.diagnostics.is_empty(), "unexpected diagnostics: {:?}", sink.diagnostics);

        let SyntaxNode::TypeName(type_name) = tree.node(id) else {
            panic!("type name");
        };
        let SyntaxNode::TypeDeclarationAsSpecifier(wrapper) = tree.node(type_name.specs[0])
        else {
            panic!("lifted tag specifier, got {:?}", tree.node(type_name.specs[0]).kind());
        };
        assert_eq!(tree.node(wrapper.type_decl).kind(), SyntaxKind::StructDeclaration);
    }
}
