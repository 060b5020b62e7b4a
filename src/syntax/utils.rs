//! Declarator-shape helpers used by the declaration parser.

use crate::syntax::node::{NodeId, SyntaxNode};
use crate::syntax::tree::SyntaxTree;

/// Unwraps parenthesized-declarator layers: `(((x)))` -> `x`.
pub fn stripped_declarator(tree: &SyntaxTree, mut decltor: NodeId) -> NodeId {
    loop {
        match tree.node(decltor) {
            SyntaxNode::ParenthesizedDeclarator(p) => match p.inner {
                Some(inner) => decltor = inner,
                None => return decltor,
            },
            _ => return decltor,
        }
    }
}

/// The declarator a pointer/array/function/bit-field declarator wraps;
/// the declarator itself when it wraps nothing.
pub fn inner_declarator(tree: &SyntaxTree, decltor: NodeId) -> NodeId {
    match tree.node(decltor) {
        SyntaxNode::PointerDeclarator(p) => p.inner.unwrap_or(decltor),
        SyntaxNode::ArrayOrFunctionDeclarator(a) => a.inner.unwrap_or(decltor),
        SyntaxNode::BitfieldDeclarator(b) => b.inner.unwrap_or(decltor),
        _ => decltor,
    }
}

/// Walks to the innermost declarator: the identifier (or abstract
/// placeholder) the whole declarator chain ultimately names.
pub fn innermost_declarator(tree: &SyntaxTree, decltor: NodeId) -> NodeId {
    let mut outer = stripped_declarator(tree, decltor);
    loop {
        let inner = inner_declarator(tree, outer);
        if inner == outer {
            return outer;
        }
        outer = stripped_declarator(tree, inner);
    }
}
