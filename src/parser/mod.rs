//! The recursive-descent parser.

mod core;
mod declarations;
mod declarators;
mod expressions;
mod statements;
mod types;

pub use self::core::{ParseError, Parser};

#[cfg(test)]
pub(crate) mod testing {
    use crate::diagnostics::{Diagnostic, DiagnosticList};
    use crate::options::{LanguageDialect, LanguageExtensions};
    use crate::syntax::kind::SyntaxKind;
    use crate::syntax::node::NodeId;
    use crate::syntax::tree::SyntaxTree;

    /// Parse with C11 and every extension enabled; fatal errors fail
    /// the test.
    pub(crate) fn parse(source: &str) -> (SyntaxTree, Vec<Diagnostic>) {
        parse_with(source, LanguageDialect::default(), LanguageExtensions::all())
    }

    pub(crate) fn parse_with(
        source: &str,
        dialect: LanguageDialect,
        extensions: LanguageExtensions,
    ) -> (SyntaxTree, Vec<Diagnostic>) {
        let mut sink = DiagnosticList::new();
        let tree =
            crate::parse_source(source, dialect, extensions, &mut sink).expect("parse is not fatal");
        (tree, sink.diagnostics)
    }

    /// The set of nodes reachable from the root, in preorder.
    pub(crate) fn reachable(tree: &SyntaxTree) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = tree.root().into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = tree.node(id).child_nodes();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    pub(crate) fn reachable_of_kind(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<NodeId> {
        reachable(tree).into_iter().filter(|&id| tree.node(id).kind() == kind).collect()
    }
}
