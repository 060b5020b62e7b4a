//! Indented text rendering of a syntax (sub)tree, for the demo driver
//! and debugging.

use std::fmt::Write;

use crate::syntax::node::NodeId;
use crate::syntax::tree::SyntaxTree;
use crate::tokens::TokenKind;

/// Renders `root` and its subtree, one node per line:
/// kind, then the node's valid token slots as `kind@index` pairs
/// (identifier text inline when available).
pub fn dump_node(tree: &SyntaxTree, root: NodeId) -> String {
    let mut out = String::new();
    dump_rec(tree, root, 0, &mut out);
    out
}

fn dump_rec(tree: &SyntaxTree, id: NodeId, level: usize, out: &mut String) {
    let node = tree.node(id);
    let _ = write!(out, "{}{:?}", "  ".repeat(level), node.kind());
    for tk in node.token_slots() {
        if !tk.is_valid() {
            continue;
        }
        let token = tree.token(tk);
        match token.kind {
            TokenKind::Identifier => {
                let text = tree.identifier_text(tk).unwrap_or("?");
                let _ = write!(out, " `{}`@{}", text, tk.0);
            }
            kind => {
                let _ = write!(out, " {:?}@{}", kind, tk.0);
            }
        }
    }
    out.push('\n');
    for child in node.child_nodes() {
        dump_rec(tree, child, level + 1, out);
    }
}
