//! Concrete syntax tree nodes.
//!
//! Every node is a tagged record with a fixed set of token-index slots
//! and child-node slots. Token slots hold `TokenIdx::INVALID` when the
//! corresponding syntax is absent; child slots are `Option<NodeId>`.
//! Separated lists keep the delimiter token on each element, so the
//! original token sequence can be reconstructed slot by slot.

use la_arena::Idx;

use crate::syntax::kind::SyntaxKind;
use crate::tokens::TokenIdx;

/// Non-owning reference to a node in the tree's arena.
pub type NodeId = Idx<SyntaxNode>;

/// One element of a separated (comma- or ellipsis-delimited) list.
/// `delim_tk` is the delimiter *following* the element, or the invalid
/// sentinel on the last element (unless a trailing delimiter was
/// actually written, as in `{1, 2, }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListElem {
    pub node: NodeId,
    pub delim_tk: TokenIdx,
}

impl ListElem {
    pub fn new(node: NodeId) -> ListElem {
        ListElem { node, delim_tk: TokenIdx::INVALID }
    }
}

// ---------------------------------------------------------------- nodes

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnitSyntax {
    pub decls: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteDeclarationSyntax {
    pub ext_kw_tk: TokenIdx,
    pub specs: Vec<NodeId>,
    pub semicolon_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAssertDeclarationSyntax {
    pub ext_kw_tk: TokenIdx,
    pub static_assert_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub comma_tk: TokenIdx,
    pub string_lit: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub semicolon_tk: TokenIdx,
}

/// File-scope `__asm__("...")` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmDeclarationSyntax {
    pub ext_kw_tk: TokenIdx,
    pub asm_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub string_lit: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub semicolon_tk: TokenIdx,
}

/// Declaration formed by a tagged type specifier with a body
/// (`struct S { ... };`). `kind` is one of Struct/Union/EnumDeclaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclarationSyntax {
    pub kind: SyntaxKind,
    pub ext_kw_tk: TokenIdx,
    pub type_spec: NodeId,
    pub semicolon_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMemberDeclarationSyntax {
    pub ident_tk: TokenIdx,
    pub attrs: Vec<NodeId>,
    pub equals_tk: TokenIdx,
    pub expr: Option<NodeId>,
    /// Enum members live in a plain list; the delimiter stays on the
    /// member itself.
    pub comma_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableAndOrFunctionDeclarationSyntax {
    pub ext_kw_tk: TokenIdx,
    pub specs: Vec<NodeId>,
    pub decltors: Vec<ListElem>,
    pub semicolon_tk: TokenIdx,
}

/// Struct/union member declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclarationSyntax {
    pub ext_kw_tk: TokenIdx,
    pub specs: Vec<NodeId>,
    pub decltors: Vec<ListElem>,
    pub semicolon_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclarationSyntax {
    pub specs: Vec<NodeId>,
    pub decltor: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinitionSyntax {
    pub ext_kw_tk: TokenIdx,
    pub specs: Vec<NodeId>,
    pub decltor: NodeId,
    pub body: Option<NodeId>,
}

/// `_Template` declaration wrapper (project extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDeclarationSyntax {
    pub template_kw_tk: TokenIdx,
    pub decl: Option<NodeId>,
}

// ------------------------------------------------------------ specifiers

/// Storage class, builtin type specifier, type qualifier, function
/// specifier, or asm qualifier: a single keyword token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrivialSpecifierSyntax {
    pub kind: SyntaxKind,
    pub spec_tk: TokenIdx,
}

/// `struct`/`union`/`enum`, either elaborated (no body) or defining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTypeSpecifierSyntax {
    pub kind: SyntaxKind,
    pub tag_kw_tk: TokenIdx,
    pub attrs1: Vec<NodeId>,
    pub ident_tk: TokenIdx,
    pub open_brace_tk: TokenIdx,
    pub member_decls: Vec<NodeId>,
    pub close_brace_tk: TokenIdx,
    pub attrs2: Vec<NodeId>,
}

/// Wrapper placed in a specifier list when an inline tag declaration
/// also declares declarators (`struct S { int x; } s;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclarationAsSpecifierSyntax {
    pub type_decl: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicTypeSpecifierSyntax {
    pub atomic_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub type_name: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentSpecifierSyntax {
    pub alignas_kw_tk: TokenIdx,
    pub type_ref: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedefNameSyntax {
    pub ident_tk: TokenIdx,
}

/// GNU `__typeof__(...)` specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeofSpecifierSyntax {
    pub typeof_kw_tk: TokenIdx,
    pub type_ref: Option<NodeId>,
}

/// GNU `__attribute__((...))` specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpecifierSyntax {
    pub attr_kw_tk: TokenIdx,
    pub open_outer_paren_tk: TokenIdx,
    pub open_inner_paren_tk: TokenIdx,
    pub attrs: Vec<ListElem>,
    pub close_inner_paren_tk: TokenIdx,
    pub close_outer_paren_tk: TokenIdx,
}

/// One attribute inside `__attribute__((...))`; possibly empty,
/// possibly with an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSyntax {
    pub kw_or_ident_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub exprs: Vec<ListElem>,
    pub close_paren_tk: TokenIdx,
}

/// GNU `__asm__("label")` attached to a declarator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmLabelSyntax {
    pub asm_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub string_lit: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
}

/// `_Exists(T)` / `_Forall(T)` quantified type specifier (project
/// extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantifiedTypeSpecifierSyntax {
    pub quantifier_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub ident_tk: TokenIdx,
    pub close_paren_tk: TokenIdx,
}

// ------------------------------------------------------------ declarators

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierDeclaratorSyntax {
    pub ident_tk: TokenIdx,
    /// Attributes written before the declarator.
    pub attrs1: Vec<NodeId>,
    /// Asm label and/or attributes written after the identifier.
    pub attrs2: Vec<NodeId>,
    pub equals_tk: TokenIdx,
    pub init: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedDeclaratorSyntax {
    pub open_paren_tk: TokenIdx,
    pub inner: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerDeclaratorSyntax {
    pub attrs: Vec<NodeId>,
    pub asterisk_tk: TokenIdx,
    pub quals_and_attrs: Vec<NodeId>,
    pub inner: Option<NodeId>,
    pub equals_tk: TokenIdx,
    pub init: Option<NodeId>,
}

/// The empty declarator of an abstract declaration site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractDeclaratorSyntax {
    pub attrs: Vec<NodeId>,
}

/// Array or function declarator: an inner declarator plus one suffix.
/// A declarator with several suffixes nests through `inner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayOrFunctionDeclaratorSyntax {
    pub kind: SyntaxKind,
    pub attrs1: Vec<NodeId>,
    pub inner: Option<NodeId>,
    pub suffix: NodeId,
    /// Asm label and/or attributes following the suffix.
    pub attrs2: Vec<NodeId>,
    pub equals_tk: TokenIdx,
    pub init: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitfieldDeclaratorSyntax {
    pub inner: Option<NodeId>,
    pub colon_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub attrs: Vec<NodeId>,
}

/// `[ ... ]` declarator suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptSuffixSyntax {
    pub open_bracket_tk: TokenIdx,
    pub asterisk_tk: TokenIdx,
    pub static_kw_tk: TokenIdx,
    pub quals_and_attrs1: Vec<NodeId>,
    pub quals_and_attrs2: Vec<NodeId>,
    pub expr: Option<NodeId>,
    pub close_bracket_tk: TokenIdx,
}

/// `( parameter-list )` declarator suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSuffixSyntax {
    pub open_paren_tk: TokenIdx,
    pub decls: Vec<ListElem>,
    pub ellipsis_tk: TokenIdx,
    pub close_paren_tk: TokenIdx,
    /// Project-extension omission marker after the closing paren.
    pub omission_tk: TokenIdx,
}

// ------------------------------------------- initializers and designators

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionInitializerSyntax {
    pub expr: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BraceEnclosedInitializerSyntax {
    pub open_brace_tk: TokenIdx,
    pub inits: Vec<ListElem>,
    pub close_brace_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignatedInitializerSyntax {
    pub desigs: Vec<NodeId>,
    pub equals_tk: TokenIdx,
    pub init: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesignatorSyntax {
    pub dot_tk: TokenIdx,
    pub ident_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDesignatorSyntax {
    pub open_bracket_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub close_bracket_tk: TokenIdx,
}

// ------------------------------------------------------------ expressions

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierExpressionSyntax {
    pub ident_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantExpressionSyntax {
    pub kind: SyntaxKind,
    pub constant_tk: TokenIdx,
}

/// A string literal; adjacent literals chain through `adjacent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteralExpressionSyntax {
    pub lit_tk: TokenIdx,
    pub adjacent: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedExpressionSyntax {
    pub open_paren_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericSelectionExpressionSyntax {
    pub generic_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub comma_tk: TokenIdx,
    pub assocs: Vec<ListElem>,
    pub close_paren_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericAssociationSyntax {
    pub kind: SyntaxKind,
    /// The type name (typed association) — `None` for `default`.
    pub type_name: Option<NodeId>,
    pub default_kw_tk: TokenIdx,
    pub colon_tk: TokenIdx,
    pub expr: Option<NodeId>,
}

/// GNU `({ ... })` statement expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementExpressionSyntax {
    pub open_paren_tk: TokenIdx,
    pub stmt: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
}

/// `__extension__` applied to a cast-level expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionExpressionSyntax {
    pub ext_kw_tk: TokenIdx,
    pub expr: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixUnaryExpressionSyntax {
    pub kind: SyntaxKind,
    pub op_tk: TokenIdx,
    pub expr: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostfixUnaryExpressionSyntax {
    pub kind: SyntaxKind,
    pub expr: NodeId,
    pub op_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccessExpressionSyntax {
    pub kind: SyntaxKind,
    pub expr: NodeId,
    pub op_tk: TokenIdx,
    pub member: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySubscriptExpressionSyntax {
    pub expr: NodeId,
    pub open_bracket_tk: TokenIdx,
    pub arg: Option<NodeId>,
    pub close_bracket_tk: TokenIdx,
}

/// `sizeof` / `_Alignof`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTraitExpressionSyntax {
    pub kind: SyntaxKind,
    pub op_tk: TokenIdx,
    pub type_ref: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpressionSyntax {
    pub expr: NodeId,
    pub open_paren_tk: TokenIdx,
    pub args: Vec<ListElem>,
    pub close_paren_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundLiteralExpressionSyntax {
    pub open_paren_tk: TokenIdx,
    pub type_name: NodeId,
    pub close_paren_tk: TokenIdx,
    pub init: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastExpressionSyntax {
    pub open_paren_tk: TokenIdx,
    pub type_name: NodeId,
    pub close_paren_tk: TokenIdx,
    pub expr: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpressionSyntax {
    pub kind: SyntaxKind,
    pub left: NodeId,
    pub op_tk: TokenIdx,
    pub right: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalExpressionSyntax {
    pub cond: NodeId,
    pub question_tk: TokenIdx,
    /// `None` for the GNU elided middle operand (`a ? : b`).
    pub when_true: Option<NodeId>,
    pub colon_tk: TokenIdx,
    pub when_false: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpressionSyntax {
    pub kind: SyntaxKind,
    pub left: NodeId,
    pub op_tk: TokenIdx,
    pub right: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencingExpressionSyntax {
    pub left: NodeId,
    pub comma_tk: TokenIdx,
    pub right: NodeId,
}

// ------------------------------------------------------------- statements

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundStatementSyntax {
    pub open_brace_tk: TokenIdx,
    pub stmts: Vec<NodeId>,
    pub close_brace_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationStatementSyntax {
    pub decl: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatementSyntax {
    pub expr: Option<NodeId>,
    pub semicolon_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledStatementSyntax {
    pub kind: SyntaxKind,
    /// The label identifier, `case`, or `default` token.
    pub label_tk: TokenIdx,
    /// The `case` expression.
    pub expr: Option<NodeId>,
    pub colon_tk: TokenIdx,
    pub stmt: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatementSyntax {
    pub if_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub cond: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub stmt: Option<NodeId>,
    pub else_kw_tk: TokenIdx,
    pub else_stmt: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStatementSyntax {
    pub switch_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub cond: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub stmt: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatementSyntax {
    pub while_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub cond: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub stmt: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoStatementSyntax {
    pub do_kw_tk: TokenIdx,
    pub stmt: Option<NodeId>,
    pub while_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub cond: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub semicolon_tk: TokenIdx,
}

/// `for (init cond; step) body`; `init` is a declaration statement or
/// expression statement carrying the first semicolon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStatementSyntax {
    pub for_kw_tk: TokenIdx,
    pub open_paren_tk: TokenIdx,
    pub init: Option<NodeId>,
    pub cond: Option<NodeId>,
    pub semicolon_tk: TokenIdx,
    pub step: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
    pub stmt: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoStatementSyntax {
    pub goto_kw_tk: TokenIdx,
    pub ident_tk: TokenIdx,
    pub semicolon_tk: TokenIdx,
}

/// `continue;` / `break;` — the kind distinguishes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpStatementSyntax {
    pub kind: SyntaxKind,
    pub kw_tk: TokenIdx,
    pub semicolon_tk: TokenIdx,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatementSyntax {
    pub return_kw_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub semicolon_tk: TokenIdx,
}

/// GNU inline assembly statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmStatementSyntax {
    pub asm_kw_tk: TokenIdx,
    pub quals: Vec<NodeId>,
    pub open_paren_tk: TokenIdx,
    pub template: Option<NodeId>,
    pub colon1_tk: TokenIdx,
    pub outputs: Vec<ListElem>,
    pub colon2_tk: TokenIdx,
    pub inputs: Vec<ListElem>,
    pub colon3_tk: TokenIdx,
    pub clobbers: Vec<ListElem>,
    pub colon4_tk: TokenIdx,
    pub labels: Vec<ListElem>,
    pub close_paren_tk: TokenIdx,
    pub semicolon_tk: TokenIdx,
}

/// One asm output/input operand: `[name] "constraint" (expr)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmOperandSyntax {
    pub kind: SyntaxKind,
    pub open_bracket_tk: TokenIdx,
    pub ident_tk: TokenIdx,
    pub close_bracket_tk: TokenIdx,
    pub constraint: Option<NodeId>,
    pub open_paren_tk: TokenIdx,
    pub expr: Option<NodeId>,
    pub close_paren_tk: TokenIdx,
}

// -------------------------------------------- type names and references

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameSyntax {
    pub specs: Vec<NodeId>,
    pub decltor: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionAsTypeReferenceSyntax {
    pub expr: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameAsTypeReferenceSyntax {
    pub open_paren_tk: TokenIdx,
    pub type_name: NodeId,
    pub close_paren_tk: TokenIdx,
}

// ------------------------------------------------------------ ambiguities

/// `sizeof (x)` and friends: `x` may be a type or an expression. Both
/// complete interpretations are kept; selection is deferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousTypeNameOrExpressionSyntax {
    pub type_name_ref: NodeId,
    pub expr_ref: NodeId,
}

/// `(T) * y`: a cast of `*y` to `T`, or `(T)` times `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousCastOrBinaryExpressionSyntax {
    pub cast_expr: NodeId,
    pub bin_expr: NodeId,
}

/// `x * y;` at block scope: a declaration of `y` or an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousExpressionOrDeclarationStatementSyntax {
    pub expr_stmt: NodeId,
    pub decl_stmt: NodeId,
}

// ---------------------------------------------------------------- union

/// The tagged union over every node variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    TranslationUnit(TranslationUnitSyntax),
    IncompleteDeclaration(IncompleteDeclarationSyntax),
    StaticAssertDeclaration(StaticAssertDeclarationSyntax),
    AsmDeclaration(AsmDeclarationSyntax),
    TypeDeclaration(TypeDeclarationSyntax),
    EnumMemberDeclaration(EnumMemberDeclarationSyntax),
    VariableAndOrFunctionDeclaration(VariableAndOrFunctionDeclarationSyntax),
    FieldDeclaration(FieldDeclarationSyntax),
    ParameterDeclaration(ParameterDeclarationSyntax),
    FunctionDefinition(FunctionDefinitionSyntax),
    TemplateDeclaration(TemplateDeclarationSyntax),

    TrivialSpecifier(TrivialSpecifierSyntax),
    TaggedTypeSpecifier(TaggedTypeSpecifierSyntax),
    TypeDeclarationAsSpecifier(TypeDeclarationAsSpecifierSyntax),
    AtomicTypeSpecifier(AtomicTypeSpecifierSyntax),
    AlignmentSpecifier(AlignmentSpecifierSyntax),
    TypedefName(TypedefNameSyntax),
    TypeofSpecifier(TypeofSpecifierSyntax),
    AttributeSpecifier(AttributeSpecifierSyntax),
    Attribute(AttributeSyntax),
    AsmLabel(AsmLabelSyntax),
    QuantifiedTypeSpecifier(QuantifiedTypeSpecifierSyntax),

    IdentifierDeclarator(IdentifierDeclaratorSyntax),
    ParenthesizedDeclarator(ParenthesizedDeclaratorSyntax),
    PointerDeclarator(PointerDeclaratorSyntax),
    AbstractDeclarator(AbstractDeclaratorSyntax),
    ArrayOrFunctionDeclarator(ArrayOrFunctionDeclaratorSyntax),
    BitfieldDeclarator(BitfieldDeclaratorSyntax),
    SubscriptSuffix(SubscriptSuffixSyntax),
    ParameterSuffix(ParameterSuffixSyntax),

    ExpressionInitializer(ExpressionInitializerSyntax),
    BraceEnclosedInitializer(BraceEnclosedInitializerSyntax),
    DesignatedInitializer(DesignatedInitializerSyntax),
    FieldDesignator(FieldDesignatorSyntax),
    ArrayDesignator(ArrayDesignatorSyntax),

    IdentifierExpression(IdentifierExpressionSyntax),
    ConstantExpression(ConstantExpressionSyntax),
    StringLiteralExpression(StringLiteralExpressionSyntax),
    ParenthesizedExpression(ParenthesizedExpressionSyntax),
    GenericSelectionExpression(GenericSelectionExpressionSyntax),
    GenericAssociation(GenericAssociationSyntax),
    StatementExpression(StatementExpressionSyntax),
    ExtensionExpression(ExtensionExpressionSyntax),
    PrefixUnaryExpression(PrefixUnaryExpressionSyntax),
    PostfixUnaryExpression(PostfixUnaryExpressionSyntax),
    MemberAccessExpression(MemberAccessExpressionSyntax),
    ArraySubscriptExpression(ArraySubscriptExpressionSyntax),
    TypeTraitExpression(TypeTraitExpressionSyntax),
    CallExpression(CallExpressionSyntax),
    CompoundLiteralExpression(CompoundLiteralExpressionSyntax),
    CastExpression(CastExpressionSyntax),
    BinaryExpression(BinaryExpressionSyntax),
    ConditionalExpression(ConditionalExpressionSyntax),
    AssignmentExpression(AssignmentExpressionSyntax),
    SequencingExpression(SequencingExpressionSyntax),

    CompoundStatement(CompoundStatementSyntax),
    DeclarationStatement(DeclarationStatementSyntax),
    ExpressionStatement(ExpressionStatementSyntax),
    LabeledStatement(LabeledStatementSyntax),
    IfStatement(IfStatementSyntax),
    SwitchStatement(SwitchStatementSyntax),
    WhileStatement(WhileStatementSyntax),
    DoStatement(DoStatementSyntax),
    ForStatement(ForStatementSyntax),
    GotoStatement(GotoStatementSyntax),
    JumpStatement(JumpStatementSyntax),
    ReturnStatement(ReturnStatementSyntax),
    AsmStatement(AsmStatementSyntax),
    AsmOperand(AsmOperandSyntax),

    TypeName(TypeNameSyntax),
    ExpressionAsTypeReference(ExpressionAsTypeReferenceSyntax),
    TypeNameAsTypeReference(TypeNameAsTypeReferenceSyntax),

    AmbiguousTypeNameOrExpression(AmbiguousTypeNameOrExpressionSyntax),
    AmbiguousCastOrBinaryExpression(AmbiguousCastOrBinaryExpressionSyntax),
    AmbiguousExpressionOrDeclarationStatement(AmbiguousExpressionOrDeclarationStatementSyntax),
}

impl SyntaxNode {
    pub fn kind(&self) -> SyntaxKind {
        use SyntaxNode::*;
        match self {
            TranslationUnit(_) => SyntaxKind::TranslationUnit,
            IncompleteDeclaration(_) => SyntaxKind::IncompleteDeclaration,
            StaticAssertDeclaration(_) => SyntaxKind::StaticAssertDeclaration,
            AsmDeclaration(_) => SyntaxKind::AsmDeclaration,
            TypeDeclaration(n) => n.kind,
            EnumMemberDeclaration(_) => SyntaxKind::EnumMemberDeclaration,
            VariableAndOrFunctionDeclaration(_) => SyntaxKind::VariableAndOrFunctionDeclaration,
            FieldDeclaration(_) => SyntaxKind::FieldDeclaration,
            ParameterDeclaration(_) => SyntaxKind::ParameterDeclaration,
            FunctionDefinition(_) => SyntaxKind::FunctionDefinition,
            TemplateDeclaration(_) => SyntaxKind::TemplateDeclaration,
            TrivialSpecifier(n) => n.kind,
            TaggedTypeSpecifier(n) => n.kind,
            TypeDeclarationAsSpecifier(_) => SyntaxKind::TypeDeclarationAsSpecifier,
            AtomicTypeSpecifier(_) => SyntaxKind::AtomicTypeSpecifier,
            AlignmentSpecifier(_) => SyntaxKind::AlignmentSpecifier,
            TypedefName(_) => SyntaxKind::TypedefName,
            TypeofSpecifier(_) => SyntaxKind::TypeofSpecifier,
            AttributeSpecifier(_) => SyntaxKind::AttributeSpecifier,
            Attribute(_) => SyntaxKind::Attribute,
            AsmLabel(_) => SyntaxKind::AsmLabel,
            QuantifiedTypeSpecifier(_) => SyntaxKind::QuantifiedTypeSpecifier,
            IdentifierDeclarator(_) => SyntaxKind::IdentifierDeclarator,
            ParenthesizedDeclarator(_) => SyntaxKind::ParenthesizedDeclarator,
            PointerDeclarator(_) => SyntaxKind::PointerDeclarator,
            AbstractDeclarator(_) => SyntaxKind::AbstractDeclarator,
            ArrayOrFunctionDeclarator(n) => n.kind,
            BitfieldDeclarator(_) => SyntaxKind::BitfieldDeclarator,
            SubscriptSuffix(_) => SyntaxKind::SubscriptSuffix,
            ParameterSuffix(_) => SyntaxKind::ParameterSuffix,
            ExpressionInitializer(_) => SyntaxKind::ExpressionInitializer,
            BraceEnclosedInitializer(_) => SyntaxKind::BraceEnclosedInitializer,
            DesignatedInitializer(_) => SyntaxKind::DesignatedInitializer,
            FieldDesignator(_) => SyntaxKind::FieldDesignator,
            ArrayDesignator(_) => SyntaxKind::ArrayDesignator,
            IdentifierExpression(_) => SyntaxKind::IdentifierExpression,
            ConstantExpression(n) => n.kind,
            StringLiteralExpression(_) => SyntaxKind::StringLiteralExpression,
            ParenthesizedExpression(_) => SyntaxKind::ParenthesizedExpression,
            GenericSelectionExpression(_) => SyntaxKind::GenericSelectionExpression,
            GenericAssociation(n) => n.kind,
            StatementExpression(_) => SyntaxKind::StatementExpression,
            ExtensionExpression(_) => SyntaxKind::ExtensionExpression,
            PrefixUnaryExpression(n) => n.kind,
            PostfixUnaryExpression(n) => n.kind,
            MemberAccessExpression(n) => n.kind,
            ArraySubscriptExpression(_) => SyntaxKind::ElementAccessExpression,
            TypeTraitExpression(n) => n.kind,
            CallExpression(_) => SyntaxKind::CallExpression,
            CompoundLiteralExpression(_) => SyntaxKind::CompoundLiteralExpression,
            CastExpression(_) => SyntaxKind::CastExpression,
            BinaryExpression(n) => n.kind,
            ConditionalExpression(_) => SyntaxKind::ConditionalExpression,
            AssignmentExpression(n) => n.kind,
            SequencingExpression(_) => SyntaxKind::SequencingExpression,
            CompoundStatement(_) => SyntaxKind::CompoundStatement,
            DeclarationStatement(_) => SyntaxKind::DeclarationStatement,
            ExpressionStatement(_) => SyntaxKind::ExpressionStatement,
            LabeledStatement(n) => n.kind,
            IfStatement(_) => SyntaxKind::IfStatement,
            SwitchStatement(_) => SyntaxKind::SwitchStatement,
            WhileStatement(_) => SyntaxKind::WhileStatement,
            DoStatement(_) => SyntaxKind::DoStatement,
            ForStatement(_) => SyntaxKind::ForStatement,
            GotoStatement(_) => SyntaxKind::GotoStatement,
            JumpStatement(n) => n.kind,
            ReturnStatement(_) => SyntaxKind::ReturnStatement,
            AsmStatement(_) => SyntaxKind::AsmStatement,
            AsmOperand(n) => n.kind,
            TypeName(_) => SyntaxKind::TypeName,
            ExpressionAsTypeReference(_) => SyntaxKind::ExpressionAsTypeReference,
            TypeNameAsTypeReference(_) => SyntaxKind::TypeNameAsTypeReference,
            AmbiguousTypeNameOrExpression(_) => {
                SyntaxKind::AmbiguousTypeNameOrExpressionAsTypeReference
            }
            AmbiguousCastOrBinaryExpression(_) => SyntaxKind::AmbiguousCastOrBinaryExpression,
            AmbiguousExpressionOrDeclarationStatement(_) => {
                SyntaxKind::AmbiguousExpressionOrDeclarationStatement
            }
        }
    }

    /// All child-node references, in source order.
    pub fn child_nodes(&self) -> Vec<NodeId> {
        use SyntaxNode::*;
        let mut out = Vec::new();
        let push = |id: &Option<NodeId>, out: &mut Vec<NodeId>| {
            if let Some(id) = id {
                out.push(*id);
            }
        };
        match self {
            TranslationUnit(n) => out.extend(&n.decls),
            IncompleteDeclaration(n) => out.extend(&n.specs),
            StaticAssertDeclaration(n) => {
                push(&n.expr, &mut out);
                push(&n.string_lit, &mut out);
            }
            AsmDeclaration(n) => push(&n.string_lit, &mut out),
            TypeDeclaration(n) => out.push(n.type_spec),
            EnumMemberDeclaration(n) => {
                out.extend(&n.attrs);
                push(&n.expr, &mut out);
            }
            VariableAndOrFunctionDeclaration(n) => {
                out.extend(&n.specs);
                out.extend(n.decltors.iter().map(|e| e.node));
            }
            FieldDeclaration(n) => {
                out.extend(&n.specs);
                out.extend(n.decltors.iter().map(|e| e.node));
            }
            ParameterDeclaration(n) => {
                out.extend(&n.specs);
                push(&n.decltor, &mut out);
            }
            FunctionDefinition(n) => {
                out.extend(&n.specs);
                out.push(n.decltor);
                push(&n.body, &mut out);
            }
            TemplateDeclaration(n) => push(&n.decl, &mut out),
            TrivialSpecifier(_) | TypedefName(_) | QuantifiedTypeSpecifier(_) => {}
            TaggedTypeSpecifier(n) => {
                out.extend(&n.attrs1);
                out.extend(&n.member_decls);
                out.extend(&n.attrs2);
            }
            TypeDeclarationAsSpecifier(n) => out.push(n.type_decl),
            AtomicTypeSpecifier(n) => push(&n.type_name, &mut out),
            AlignmentSpecifier(n) => push(&n.type_ref, &mut out),
            TypeofSpecifier(n) => push(&n.type_ref, &mut out),
            AttributeSpecifier(n) => out.extend(n.attrs.iter().map(|e| e.node)),
            Attribute(n) => out.extend(n.exprs.iter().map(|e| e.node)),
            AsmLabel(n) => push(&n.string_lit, &mut out),
            IdentifierDeclarator(n) => {
                out.extend(&n.attrs1);
                out.extend(&n.attrs2);
                push(&n.init, &mut out);
            }
            ParenthesizedDeclarator(n) => push(&n.inner, &mut out),
            PointerDeclarator(n) => {
                out.extend(&n.attrs);
                out.extend(&n.quals_and_attrs);
                push(&n.inner, &mut out);
                push(&n.init, &mut out);
            }
            AbstractDeclarator(n) => out.extend(&n.attrs),
            ArrayOrFunctionDeclarator(n) => {
                out.extend(&n.attrs1);
                push(&n.inner, &mut out);
                out.push(n.suffix);
                out.extend(&n.attrs2);
                push(&n.init, &mut out);
            }
            BitfieldDeclarator(n) => {
                push(&n.inner, &mut out);
                push(&n.expr, &mut out);
                out.extend(&n.attrs);
            }
            SubscriptSuffix(n) => {
                out.extend(&n.quals_and_attrs1);
                out.extend(&n.quals_and_attrs2);
                push(&n.expr, &mut out);
            }
            ParameterSuffix(n) => out.extend(n.decls.iter().map(|e| e.node)),
            ExpressionInitializer(n) => out.push(n.expr),
            BraceEnclosedInitializer(n) => out.extend(n.inits.iter().map(|e| e.node)),
            DesignatedInitializer(n) => {
                out.extend(&n.desigs);
                push(&n.init, &mut out);
            }
            FieldDesignator(_) => {}
            ArrayDesignator(n) => push(&n.expr, &mut out),
            IdentifierExpression(_) | ConstantExpression(_) => {}
            StringLiteralExpression(n) => push(&n.adjacent, &mut out),
            ParenthesizedExpression(n) => push(&n.expr, &mut out),
            GenericSelectionExpression(n) => {
                push(&n.expr, &mut out);
                out.extend(n.assocs.iter().map(|e| e.node));
            }
            GenericAssociation(n) => {
                push(&n.type_name, &mut out);
                push(&n.expr, &mut out);
            }
            StatementExpression(n) => push(&n.stmt, &mut out),
            ExtensionExpression(n) => push(&n.expr, &mut out),
            PrefixUnaryExpression(n) => push(&n.expr, &mut out),
            PostfixUnaryExpression(n) => out.push(n.expr),
            MemberAccessExpression(n) => {
                out.push(n.expr);
                push(&n.member, &mut out);
            }
            ArraySubscriptExpression(n) => {
                out.push(n.expr);
                push(&n.arg, &mut out);
            }
            TypeTraitExpression(n) => push(&n.type_ref, &mut out),
            CallExpression(n) => {
                out.push(n.expr);
                out.extend(n.args.iter().map(|e| e.node));
            }
            CompoundLiteralExpression(n) => {
                out.push(n.type_name);
                push(&n.init, &mut out);
            }
            CastExpression(n) => {
                out.push(n.type_name);
                push(&n.expr, &mut out);
            }
            BinaryExpression(n) => {
                out.push(n.left);
                out.push(n.right);
            }
            ConditionalExpression(n) => {
                out.push(n.cond);
                push(&n.when_true, &mut out);
                push(&n.when_false, &mut out);
            }
            AssignmentExpression(n) => {
                out.push(n.left);
                out.push(n.right);
            }
            SequencingExpression(n) => {
                out.push(n.left);
                out.push(n.right);
            }
            CompoundStatement(n) => out.extend(&n.stmts),
            DeclarationStatement(n) => out.push(n.decl),
            ExpressionStatement(n) => push(&n.expr, &mut out),
            LabeledStatement(n) => {
                push(&n.expr, &mut out);
                push(&n.stmt, &mut out);
            }
            IfStatement(n) => {
                push(&n.cond, &mut out);
                push(&n.stmt, &mut out);
                push(&n.else_stmt, &mut out);
            }
            SwitchStatement(n) => {
                push(&n.cond, &mut out);
                push(&n.stmt, &mut out);
            }
            WhileStatement(n) => {
                push(&n.cond, &mut out);
                push(&n.stmt, &mut out);
            }
            DoStatement(n) => {
                push(&n.stmt, &mut out);
                push(&n.cond, &mut out);
            }
            ForStatement(n) => {
                push(&n.init, &mut out);
                push(&n.cond, &mut out);
                push(&n.step, &mut out);
                push(&n.stmt, &mut out);
            }
            GotoStatement(_) => {}
            JumpStatement(_) => {}
            ReturnStatement(n) => push(&n.expr, &mut out),
            AsmStatement(n) => {
                out.extend(&n.quals);
                push(&n.template, &mut out);
                out.extend(n.outputs.iter().map(|e| e.node));
                out.extend(n.inputs.iter().map(|e| e.node));
                out.extend(n.clobbers.iter().map(|e| e.node));
                out.extend(n.labels.iter().map(|e| e.node));
            }
            AsmOperand(n) => {
                push(&n.constraint, &mut out);
                push(&n.expr, &mut out);
            }
            TypeName(n) => {
                out.extend(&n.specs);
                push(&n.decltor, &mut out);
            }
            ExpressionAsTypeReference(n) => out.push(n.expr),
            TypeNameAsTypeReference(n) => out.push(n.type_name),
            AmbiguousTypeNameOrExpression(n) => {
                out.push(n.type_name_ref);
                out.push(n.expr_ref);
            }
            AmbiguousCastOrBinaryExpression(n) => {
                out.push(n.cast_expr);
                out.push(n.bin_expr);
            }
            AmbiguousExpressionOrDeclarationStatement(n) => {
                out.push(n.expr_stmt);
                out.push(n.decl_stmt);
            }
        }
        out
    }

    /// All token-index slots of this node (filled or sentinel), in
    /// declaration order. Used by the tree dump and invariant checks.
    pub fn token_slots(&self) -> Vec<TokenIdx> {
        use SyntaxNode::*;
        let elems = |l: &[ListElem], out: &mut Vec<TokenIdx>| {
            out.extend(l.iter().map(|e| e.delim_tk));
        };
        let mut out = Vec::new();
        match self {
            TranslationUnit(_) => {}
            IncompleteDeclaration(n) => out.extend([n.ext_kw_tk, n.semicolon_tk]),
            StaticAssertDeclaration(n) => out.extend([
                n.ext_kw_tk,
                n.static_assert_kw_tk,
                n.open_paren_tk,
                n.comma_tk,
                n.close_paren_tk,
                n.semicolon_tk,
            ]),
            AsmDeclaration(n) => out.extend([
                n.ext_kw_tk,
                n.asm_kw_tk,
                n.open_paren_tk,
                n.close_paren_tk,
                n.semicolon_tk,
            ]),
            TypeDeclaration(n) => out.extend([n.ext_kw_tk, n.semicolon_tk]),
            EnumMemberDeclaration(n) => out.extend([n.ident_tk, n.equals_tk, n.comma_tk]),
            VariableAndOrFunctionDeclaration(n) => {
                out.extend([n.ext_kw_tk, n.semicolon_tk]);
                elems(&n.decltors, &mut out);
            }
            FieldDeclaration(n) => {
                out.extend([n.ext_kw_tk, n.semicolon_tk]);
                elems(&n.decltors, &mut out);
            }
            ParameterDeclaration(_) => {}
            FunctionDefinition(n) => out.push(n.ext_kw_tk),
            TemplateDeclaration(n) => out.push(n.template_kw_tk),
            TrivialSpecifier(n) => out.push(n.spec_tk),
            TaggedTypeSpecifier(n) => {
                out.extend([n.tag_kw_tk, n.ident_tk, n.open_brace_tk, n.close_brace_tk])
            }
            TypeDeclarationAsSpecifier(_) => {}
            AtomicTypeSpecifier(n) => {
                out.extend([n.atomic_kw_tk, n.open_paren_tk, n.close_paren_tk])
            }
            AlignmentSpecifier(n) => out.push(n.alignas_kw_tk),
            TypedefName(n) => out.push(n.ident_tk),
            TypeofSpecifier(n) => out.push(n.typeof_kw_tk),
            AttributeSpecifier(n) => {
                out.extend([
                    n.attr_kw_tk,
                    n.open_outer_paren_tk,
                    n.open_inner_paren_tk,
                    n.close_inner_paren_tk,
                    n.close_outer_paren_tk,
                ]);
                elems(&n.attrs, &mut out);
            }
            Attribute(n) => {
                out.extend([n.kw_or_ident_tk, n.open_paren_tk, n.close_paren_tk]);
                elems(&n.exprs, &mut out);
            }
            AsmLabel(n) => out.extend([n.asm_kw_tk, n.open_paren_tk, n.close_paren_tk]),
            QuantifiedTypeSpecifier(n) => {
                out.extend([n.quantifier_tk, n.open_paren_tk, n.ident_tk, n.close_paren_tk])
            }
            IdentifierDeclarator(n) => out.extend([n.ident_tk, n.equals_tk]),
            ParenthesizedDeclarator(n) => out.extend([n.open_paren_tk, n.close_paren_tk]),
            PointerDeclarator(n) => out.extend([n.asterisk_tk, n.equals_tk]),
            AbstractDeclarator(_) => {}
            ArrayOrFunctionDeclarator(n) => out.push(n.equals_tk),
            BitfieldDeclarator(n) => out.push(n.colon_tk),
            SubscriptSuffix(n) => out.extend([
                n.open_bracket_tk,
                n.asterisk_tk,
                n.static_kw_tk,
                n.close_bracket_tk,
            ]),
            ParameterSuffix(n) => {
                out.extend([n.open_paren_tk, n.ellipsis_tk, n.close_paren_tk, n.omission_tk]);
                elems(&n.decls, &mut out);
            }
            ExpressionInitializer(_) => {}
            BraceEnclosedInitializer(n) => {
                out.extend([n.open_brace_tk, n.close_brace_tk]);
                elems(&n.inits, &mut out);
            }
            DesignatedInitializer(n) => out.push(n.equals_tk),
            FieldDesignator(n) => out.extend([n.dot_tk, n.ident_tk]),
            ArrayDesignator(n) => out.extend([n.open_bracket_tk, n.close_bracket_tk]),
            IdentifierExpression(n) => out.push(n.ident_tk),
            ConstantExpression(n) => out.push(n.constant_tk),
            StringLiteralExpression(n) => out.push(n.lit_tk),
            ParenthesizedExpression(n) => out.extend([n.open_paren_tk, n.close_paren_tk]),
            GenericSelectionExpression(n) => {
                out.extend([n.generic_kw_tk, n.open_paren_tk, n.comma_tk, n.close_paren_tk]);
                elems(&n.assocs, &mut out);
            }
            GenericAssociation(n) => out.extend([n.default_kw_tk, n.colon_tk]),
            StatementExpression(n) => out.extend([n.open_paren_tk, n.close_paren_tk]),
            ExtensionExpression(n) => out.push(n.ext_kw_tk),
            PrefixUnaryExpression(n) => out.push(n.op_tk),
            PostfixUnaryExpression(n) => out.push(n.op_tk),
            MemberAccessExpression(n) => out.push(n.op_tk),
            ArraySubscriptExpression(n) => out.extend([n.open_bracket_tk, n.close_bracket_tk]),
            TypeTraitExpression(n) => out.push(n.op_tk),
            CallExpression(n) => {
                out.extend([n.open_paren_tk, n.close_paren_tk]);
                elems(&n.args, &mut out);
            }
            CompoundLiteralExpression(n) => out.extend([n.open_paren_tk, n.close_paren_tk]),
            CastExpression(n) => out.extend([n.open_paren_tk, n.close_paren_tk]),
            BinaryExpression(n) => out.push(n.op_tk),
            ConditionalExpression(n) => out.extend([n.question_tk, n.colon_tk]),
            AssignmentExpression(n) => out.push(n.op_tk),
            SequencingExpression(n) => out.push(n.comma_tk),
            CompoundStatement(n) => out.extend([n.open_brace_tk, n.close_brace_tk]),
            DeclarationStatement(_) => {}
            ExpressionStatement(n) => out.push(n.semicolon_tk),
            LabeledStatement(n) => out.extend([n.label_tk, n.colon_tk]),
            IfStatement(n) => {
                out.extend([n.if_kw_tk, n.open_paren_tk, n.close_paren_tk, n.else_kw_tk])
            }
            SwitchStatement(n) => {
                out.extend([n.switch_kw_tk, n.open_paren_tk, n.close_paren_tk])
            }
            WhileStatement(n) => out.extend([n.while_kw_tk, n.open_paren_tk, n.close_paren_tk]),
            DoStatement(n) => out.extend([
                n.do_kw_tk,
                n.while_kw_tk,
                n.open_paren_tk,
                n.close_paren_tk,
                n.semicolon_tk,
            ]),
            ForStatement(n) => out.extend([
                n.for_kw_tk,
                n.open_paren_tk,
                n.semicolon_tk,
                n.close_paren_tk,
            ]),
            GotoStatement(n) => out.extend([n.goto_kw_tk, n.ident_tk, n.semicolon_tk]),
            JumpStatement(n) => out.extend([n.kw_tk, n.semicolon_tk]),
            ReturnStatement(n) => out.extend([n.return_kw_tk, n.semicolon_tk]),
            AsmStatement(n) => {
                out.extend([
                    n.asm_kw_tk,
                    n.open_paren_tk,
                    n.colon1_tk,
                    n.colon2_tk,
                    n.colon3_tk,
                    n.colon4_tk,
                    n.close_paren_tk,
                    n.semicolon_tk,
                ]);
                elems(&n.outputs, &mut out);
                elems(&n.inputs, &mut out);
                elems(&n.clobbers, &mut out);
                elems(&n.labels, &mut out);
            }
            AsmOperand(n) => out.extend([
                n.open_bracket_tk,
                n.ident_tk,
                n.close_bracket_tk,
                n.open_paren_tk,
                n.close_paren_tk,
            ]),
            TypeName(_) => {}
            ExpressionAsTypeReference(_) => {}
            TypeNameAsTypeReference(n) => out.extend([n.open_paren_tk, n.close_paren_tk]),
            AmbiguousTypeNameOrExpression(_) => {}
            AmbiguousCastOrBinaryExpression(_) => {}
            AmbiguousExpressionOrDeclarationStatement(_) => {}
        }
        out
    }
}
