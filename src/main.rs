//! Demo driver: lex and parse a C file, print the diagnostics and a
//! tree dump.

use std::process::ExitCode;

use cparse::syntax::dump::dump_node;
use cparse::{parse_source, DiagnosticList, LanguageDialect, LanguageExtensions};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: cparse <file.c>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cparse: cannot read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut diagnostics = DiagnosticList::new();
    let tree = match parse_source(
        &source,
        LanguageDialect::default(),
        LanguageExtensions::all(),
        &mut diagnostics,
    ) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("cparse: {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &diagnostics.diagnostics {
        eprintln!("{}: token {}: {:?}", path, diagnostic.token.0, diagnostic.kind);
    }

    if let Some(root) = tree.root() {
        print!("{}", dump_node(&tree, root));
    }

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
