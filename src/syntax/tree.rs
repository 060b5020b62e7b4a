//! The syntax tree: token buffer, node arena, options, and root.

use la_arena::Arena;

use crate::lexer::Interner;
use crate::options::{LanguageDialect, LanguageExtensions};
use crate::syntax::node::{NodeId, SyntaxNode};
use crate::tokens::{InternId, Token, TokenIdx, TokenKind};

/// Owns everything produced by a parse. The arena owns every node;
/// node-to-node references are indices, so the tree is freed as one
/// unit and nodes never outlive it. After parsing the tree is
/// immutable; later phases annotate via side tables keyed on `NodeId`.
#[derive(Debug)]
pub struct SyntaxTree {
    tokens: Vec<Token>,
    interner: Interner,
    dialect: LanguageDialect,
    extensions: LanguageExtensions,
    arena: Arena<SyntaxNode>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    pub(crate) fn new(
        tokens: Vec<Token>,
        interner: Interner,
        dialect: LanguageDialect,
        extensions: LanguageExtensions,
    ) -> SyntaxTree {
        SyntaxTree {
            tokens,
            interner,
            dialect,
            extensions,
            arena: Arena::default(),
            root: None,
        }
    }

    pub fn dialect(&self) -> LanguageDialect {
        self.dialect
    }

    pub fn extensions(&self) -> &LanguageExtensions {
        &self.extensions
    }

    /// The `TranslationUnit` node, populated exactly once by the parse.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        debug_assert!(self.root.is_none());
        self.root = Some(root);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// The token at `idx`. An invalid index resolves to the trailing
    /// end-of-file token, mirroring cursor behavior past the end.
    pub fn token(&self, idx: TokenIdx) -> &Token {
        if idx.is_valid() && idx.index() < self.tokens.len() {
            &self.tokens[idx.index()]
        } else {
            self.tokens.last().expect("token stream holds at least Eof")
        }
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.arena[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        &mut self.arena[id]
    }

    /// The node factory: allocates from the tree's arena and returns a
    /// non-owning reference. Never reclaims during parsing.
    pub(crate) fn alloc(&mut self, node: SyntaxNode) -> NodeId {
        self.arena.alloc(node)
    }

    /// Iterate every allocated node, including subtrees abandoned by
    /// backtracking (inert garbage within the arena).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.arena.iter()
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn intern_text(&self, id: InternId) -> &str {
        self.interner.text(id)
    }

    /// Text of an identifier token, if `idx` names one.
    pub fn identifier_text(&self, idx: TokenIdx) -> Option<&str> {
        if !idx.is_valid() {
            return None;
        }
        let tok = self.token(idx);
        if tok.kind != TokenKind::Identifier {
            return None;
        }
        tok.ident.map(|id| self.interner.text(id))
    }

    /// Structural equality of the produced trees, ignoring the
    /// interner's internals.
    pub fn structurally_equal(&self, other: &SyntaxTree) -> bool {
        self.root == other.root && self.arena == other.arena && self.tokens == other.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::testing::{parse, reachable, reachable_of_kind};
    use crate::syntax::dump::dump_node;
    use crate::syntax::kind::SyntaxKind;

    const SAMPLE: &str = r#"
typedef unsigned long word;
struct point { int x, y; unsigned flags : 4; };
enum color { RED = 1, GREEN, BLUE };
static const char *names[] = { "red", "green", [2] = "blue", };
int add(int a, int b);
int add(int a, int b) {
    int total = a + b * 2;
    for (int i = 0; i < 3; i++) {
        total += i;
    }
    if (total > 10)
        total = (int)total - 1;
    else
        total++;
    while (total % 2)
        total--;
    switch (total) {
    case 0:
        break;
    default:
        total = sizeof(struct point);
    }
    return total;
}
"#;

    fn slot_kind(tree: &SyntaxTree, idx: TokenIdx) -> Option<TokenKind> {
        idx.is_valid().then(|| tree.token(idx).kind)
    }

    fn assert_slot(tree: &SyntaxTree, idx: TokenIdx, expected: TokenKind) {
        if let Some(kind) = slot_kind(tree, idx) {
            assert_eq!(kind, expected, "token slot {idx:?}");
        }
    }

    #[test]
    fn token_index_soundness() {
        let (tree, diags) = parse(SAMPLE);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        for (_, node) in tree.nodes() {
            for tk in node.token_slots() {
                assert!(
                    !tk.is_valid() || tk.index() < tree.token_count(),
                    "token index out of range in {:?}",
                    node.kind()
                );
            }
            match node {
                SyntaxNode::ParenthesizedExpression(n) => {
                    assert_slot(&tree, n.open_paren_tk, TokenKind::OpenParen);
                    assert_slot(&tree, n.close_paren_tk, TokenKind::CloseParen);
                }
                SyntaxNode::BraceEnclosedInitializer(n) => {
                    assert_slot(&tree, n.open_brace_tk, TokenKind::OpenBrace);
                    assert_slot(&tree, n.close_brace_tk, TokenKind::CloseBrace);
                }
                SyntaxNode::CompoundStatement(n) => {
                    assert_slot(&tree, n.open_brace_tk, TokenKind::OpenBrace);
                    assert_slot(&tree, n.close_brace_tk, TokenKind::CloseBrace);
                }
                SyntaxNode::ExpressionStatement(n) => {
                    assert_slot(&tree, n.semicolon_tk, TokenKind::Semicolon);
                }
                SyntaxNode::VariableAndOrFunctionDeclaration(n) => {
                    assert_slot(&tree, n.semicolon_tk, TokenKind::Semicolon);
                }
                SyntaxNode::SubscriptSuffix(n) => {
                    assert_slot(&tree, n.open_bracket_tk, TokenKind::OpenBracket);
                    assert_slot(&tree, n.close_bracket_tk, TokenKind::CloseBracket);
                }
                SyntaxNode::ParameterSuffix(n) => {
                    assert_slot(&tree, n.open_paren_tk, TokenKind::OpenParen);
                    assert_slot(&tree, n.close_paren_tk, TokenKind::CloseParen);
                    assert_slot(&tree, n.ellipsis_tk, TokenKind::Ellipsis);
                }
                SyntaxNode::CastExpression(n) => {
                    assert_slot(&tree, n.open_paren_tk, TokenKind::OpenParen);
                    assert_slot(&tree, n.close_paren_tk, TokenKind::CloseParen);
                }
                SyntaxNode::FieldDesignator(n) => {
                    assert_slot(&tree, n.dot_tk, TokenKind::Dot);
                    assert_slot(&tree, n.ident_tk, TokenKind::Identifier);
                }
                SyntaxNode::TypedefName(n) => {
                    assert_slot(&tree, n.ident_tk, TokenKind::Identifier);
                }
                SyntaxNode::IdentifierExpression(n) => {
                    assert_slot(&tree, n.ident_tk, TokenKind::Identifier);
                }
                SyntaxNode::IdentifierDeclarator(n) => {
                    assert_slot(&tree, n.ident_tk, TokenKind::Identifier);
                    assert_slot(&tree, n.equals_tk, TokenKind::Equals);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn structural_totality_on_malformed_inputs() {
        for source in [
            "",
            "@@@",
            "int",
            "struct {",
            "int f( { ; }",
            "}}}",
            "int x = ;;;",
            "typedef",
        ] {
            let (tree, _) = parse(source);
            let root = tree.root().expect("a tree is always produced");
            assert_eq!(tree.node(root).kind(), SyntaxKind::TranslationUnit, "{source:?}");
        }
    }

    #[test]
    fn list_separator_discipline() {
        let (tree, _) = parse(SAMPLE);
        for (_, node) in tree.nodes() {
            let lists: Vec<&[crate::syntax::node::ListElem]> = match node {
                SyntaxNode::VariableAndOrFunctionDeclaration(n) => vec![&n.decltors],
                SyntaxNode::FieldDeclaration(n) => vec![&n.decltors],
                SyntaxNode::ParameterSuffix(n) => vec![&n.decls],
                SyntaxNode::BraceEnclosedInitializer(n) => vec![&n.inits],
                SyntaxNode::CallExpression(n) => vec![&n.args],
                SyntaxNode::AttributeSpecifier(n) => vec![&n.attrs],
                SyntaxNode::GenericSelectionExpression(n) => vec![&n.assocs],
                SyntaxNode::AsmStatement(n) => {
                    vec![&n.outputs, &n.inputs, &n.clobbers, &n.labels]
                }
                _ => continue,
            };
            for list in lists {
                for elem in list {
                    if let Some(kind) = slot_kind(&tree, elem.delim_tk) {
                        assert_eq!(kind, TokenKind::Comma, "in {:?}", node.kind());
                    }
                }
            }
        }
    }

    #[test]
    fn ambiguity_nodes_carry_two_complete_alternatives() {
        let (tree, diags) = parse("void f(void) { x * y; g = sizeof (t) + (u) * v; }");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        let stmt_ambis =
            reachable_of_kind(&tree, SyntaxKind::AmbiguousExpressionOrDeclarationStatement);
        assert_eq!(stmt_ambis.len(), 1);
        let SyntaxNode::AmbiguousExpressionOrDeclarationStatement(n) = tree.node(stmt_ambis[0])
        else {
            unreachable!();
        };
        assert_ne!(n.expr_stmt, n.decl_stmt);
        assert_eq!(tree.node(n.expr_stmt).kind(), SyntaxKind::ExpressionStatement);
        assert_eq!(tree.node(n.decl_stmt).kind(), SyntaxKind::DeclarationStatement);

        let ty_ambis =
            reachable_of_kind(&tree, SyntaxKind::AmbiguousTypeNameOrExpressionAsTypeReference);
        assert_eq!(ty_ambis.len(), 1);
        let SyntaxNode::AmbiguousTypeNameOrExpression(n) = tree.node(ty_ambis[0]) else {
            unreachable!();
        };
        assert_eq!(tree.node(n.type_name_ref).kind(), SyntaxKind::TypeNameAsTypeReference);
        assert_eq!(tree.node(n.expr_ref).kind(), SyntaxKind::ExpressionAsTypeReference);

        let cast_ambis = reachable_of_kind(&tree, SyntaxKind::AmbiguousCastOrBinaryExpression);
        assert_eq!(cast_ambis.len(), 1);
        let SyntaxNode::AmbiguousCastOrBinaryExpression(n) = tree.node(cast_ambis[0]) else {
            unreachable!();
        };
        assert_eq!(tree.node(n.cast_expr).kind(), SyntaxKind::CastExpression);
        assert_eq!(tree.node(n.bin_expr).kind(), SyntaxKind::MultiplyExpression);
    }

    #[test]
    fn specifier_and_declarator_roles_never_share_an_identifier() {
        let (tree, diags) = parse("typedef int T; T x; T * p; int T2, *q;");
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        for id in reachable(&tree) {
            let SyntaxNode::VariableAndOrFunctionDeclaration(_) = tree.node(id) else {
                continue;
            };
            let mut typedef_names = Vec::new();
            let mut declared_names = Vec::new();
            let mut stack = vec![id];
            while let Some(cur) = stack.pop() {
                match tree.node(cur) {
                    SyntaxNode::TypedefName(n) => typedef_names.push(n.ident_tk),
                    SyntaxNode::IdentifierDeclarator(n) => declared_names.push(n.ident_tk),
                    _ => {}
                }
                stack.extend(tree.node(cur).child_nodes());
            }
            for tk in &typedef_names {
                assert!(!declared_names.contains(tk), "identifier used in both roles");
            }
        }
    }

    #[test]
    fn parsing_is_deterministic() {
        for source in [SAMPLE, "int @ ; int y ;", "void f(void) { x * y; }"] {
            let (tree_a, diags_a) = parse(source);
            let (tree_b, diags_b) = parse(source);
            assert!(tree_a.structurally_equal(&tree_b), "{source:?}");
            assert_eq!(diags_a, diags_b, "{source:?}");
        }
    }

    #[test]
    fn root_covers_every_token_up_to_eof() {
        let (tree, diags) = parse(SAMPLE);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

        // Every token except Eof is referenced from some reachable
        // node on a clean parse of this sample.
        let mut referenced = vec![false; tree.token_count()];
        for id in reachable(&tree) {
            for tk in tree.node(id).token_slots() {
                if tk.is_valid() {
                    referenced[tk.index()] = true;
                }
            }
        }
        let missing: Vec<usize> = referenced
            .iter()
            .enumerate()
            .filter(|&(i, &seen)| !seen && tree.tokens()[i].kind != TokenKind::Eof)
            .map(|(i, _)| i)
            .collect();
        assert!(missing.is_empty(), "tokens not covered by the tree: {missing:?}");
    }

    #[test]
    fn dump_renders_the_tree() {
        let (tree, _) = parse("int main(void) { return 0; }");
        let text = dump_node(&tree, tree.root().unwrap());
        assert!(text.contains("TranslationUnit"));
        assert!(text.contains("FunctionDefinition"));
        assert!(text.contains("ReturnStatement"));
    }
}
