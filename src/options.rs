//! Language dialect and extension configuration.
//!
//! The parser consults a single options object reachable from the tree;
//! there is no mutable global state.

/// The language standard the parser targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum StandardVersion {
    C89,
    C99,
    #[default]
    C11,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDialect {
    pub std: StandardVersion,
}

impl LanguageDialect {
    pub fn new(std: StandardVersion) -> Self {
        Self { std }
    }
}

/// Feature flags for the recognized extensions.
///
/// Disabled extensions still parse; the parser reports
/// `ExpectedFeature` and continues, so a tree is always produced.
#[derive(Debug, Clone, Copy)]
pub struct LanguageExtensions {
    /// GNU `__asm__` statements and file-scope asm declarations.
    pub gnu_asm: bool,
    /// GNU `({ ... })` statement expressions (also gates the GNU
    /// conditional with elided middle operand).
    pub gnu_statement_expressions: bool,
    /// Designated initializers before C99.
    pub gnu_designated_initializers: bool,
    /// Compound literals before C99.
    pub gnu_compound_literals: bool,
    /// The LLVM `availability` attribute argument form.
    pub gnu_attributes_llvm: bool,
    /// GNU alignment-specifier forms.
    pub gnu_alignment: bool,
    /// `_Exists` / `_Forall` quantified-type specifiers.
    pub quantified_types: bool,
    /// `_Template` declarations.
    pub template_declarations: bool,
}

impl Default for LanguageExtensions {
    fn default() -> Self {
        Self {
            gnu_asm: true,
            gnu_statement_expressions: true,
            gnu_designated_initializers: true,
            gnu_compound_literals: true,
            gnu_attributes_llvm: false,
            gnu_alignment: true,
            quantified_types: false,
            template_declarations: false,
        }
    }
}

impl LanguageExtensions {
    /// Every extension enabled; used by tooling that wants the largest
    /// accepted surface.
    pub fn all() -> Self {
        Self {
            gnu_asm: true,
            gnu_statement_expressions: true,
            gnu_designated_initializers: true,
            gnu_compound_literals: true,
            gnu_attributes_llvm: true,
            gnu_alignment: true,
            quantified_types: true,
            template_declarations: true,
        }
    }

    pub fn none() -> Self {
        Self {
            gnu_asm: false,
            gnu_statement_expressions: false,
            gnu_designated_initializers: false,
            gnu_compound_literals: false,
            gnu_attributes_llvm: false,
            gnu_alignment: false,
            quantified_types: false,
            template_declarations: false,
        }
    }
}
