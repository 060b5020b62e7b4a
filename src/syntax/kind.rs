//! The closed set of syntax-node kinds, partitioned into families.

use crate::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Declarations.
    TranslationUnit,
    IncompleteDeclaration,
    StaticAssertDeclaration,
    AsmDeclaration,
    StructDeclaration,
    UnionDeclaration,
    EnumDeclaration,
    EnumMemberDeclaration,
    VariableAndOrFunctionDeclaration,
    FieldDeclaration,
    ParameterDeclaration,
    FunctionDefinition,
    TemplateDeclaration,

    // Specifiers.
    TypedefStorageClass,
    ExternStorageClass,
    StaticStorageClass,
    AutoStorageClass,
    RegisterStorageClass,
    ThreadLocalStorageClass,
    BuiltinTypeSpecifier,
    StructTypeSpecifier,
    UnionTypeSpecifier,
    EnumTypeSpecifier,
    TypeDeclarationAsSpecifier,
    AtomicTypeSpecifier,
    ConstQualifier,
    VolatileQualifier,
    RestrictQualifier,
    AtomicQualifier,
    InlineSpecifier,
    NoReturnSpecifier,
    AlignmentSpecifier,
    TypedefName,
    TypeofSpecifier,
    AttributeSpecifier,
    Attribute,
    AsmLabel,
    QuantifiedTypeSpecifier,
    AsmVolatileQualifier,
    AsmInlineQualifier,
    AsmGotoQualifier,

    // Declarators.
    IdentifierDeclarator,
    ParenthesizedDeclarator,
    PointerDeclarator,
    AbstractDeclarator,
    ArrayDeclarator,
    FunctionDeclarator,
    BitfieldDeclarator,
    SubscriptSuffix,
    ParameterSuffix,

    // Initializers and designators.
    ExpressionInitializer,
    BraceEnclosedInitializer,
    DesignatedInitializer,
    FieldDesignator,
    ArrayDesignator,

    // Expressions.
    IdentifierExpression,
    IntegerConstantExpression,
    FloatingConstantExpression,
    CharacterConstantExpression,
    BooleanConstantExpression,
    NullConstantExpression,
    StringLiteralExpression,
    ParenthesizedExpression,
    GenericSelectionExpression,
    TypedGenericAssociation,
    DefaultGenericAssociation,
    StatementExpression,
    ExtensionExpression,
    PreIncrementExpression,
    PreDecrementExpression,
    AddressOfExpression,
    PointerIndirectionExpression,
    UnaryPlusExpression,
    UnaryMinusExpression,
    BitwiseNotExpression,
    LogicalNotExpression,
    PostIncrementExpression,
    PostDecrementExpression,
    DirectMemberAccessExpression,
    IndirectMemberAccessExpression,
    ElementAccessExpression,
    SizeofExpression,
    AlignofExpression,
    CallExpression,
    CompoundLiteralExpression,
    CastExpression,
    MultiplyExpression,
    DivideExpression,
    ModuloExpression,
    AddExpression,
    SubtractExpression,
    LeftShiftExpression,
    RightShiftExpression,
    LessThanExpression,
    GreaterThanExpression,
    LessThanOrEqualExpression,
    GreaterThanOrEqualExpression,
    EqualsExpression,
    NotEqualsExpression,
    BitwiseAndExpression,
    BitwiseXorExpression,
    BitwiseOrExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    ConditionalExpression,
    BasicAssignmentExpression,
    MultiplyAssignmentExpression,
    DivideAssignmentExpression,
    ModuloAssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    LeftShiftAssignmentExpression,
    RightShiftAssignmentExpression,
    AndAssignmentExpression,
    XorAssignmentExpression,
    OrAssignmentExpression,
    SequencingExpression,

    // Statements.
    CompoundStatement,
    DeclarationStatement,
    ExpressionStatement,
    IdentifierLabelStatement,
    CaseLabelStatement,
    DefaultLabelStatement,
    IfStatement,
    SwitchStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    GotoStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    AsmStatement,
    AsmOutputOperand,
    AsmInputOperand,

    // Type names and type references.
    TypeName,
    ExpressionAsTypeReference,
    TypeNameAsTypeReference,

    // Ambiguities.
    AmbiguousTypeNameOrExpressionAsTypeReference,
    AmbiguousCastOrBinaryExpression,
    AmbiguousExpressionOrDeclarationStatement,
}

impl SyntaxKind {
    pub fn is_binary_expression(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            MultiplyExpression
                | DivideExpression
                | ModuloExpression
                | AddExpression
                | SubtractExpression
                | LeftShiftExpression
                | RightShiftExpression
                | LessThanExpression
                | GreaterThanExpression
                | LessThanOrEqualExpression
                | GreaterThanOrEqualExpression
                | EqualsExpression
                | NotEqualsExpression
                | BitwiseAndExpression
                | BitwiseXorExpression
                | BitwiseOrExpression
                | LogicalAndExpression
                | LogicalOrExpression
        )
    }

    pub fn is_assignment_expression(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            BasicAssignmentExpression
                | MultiplyAssignmentExpression
                | DivideAssignmentExpression
                | ModuloAssignmentExpression
                | AddAssignmentExpression
                | SubtractAssignmentExpression
                | LeftShiftAssignmentExpression
                | RightShiftAssignmentExpression
                | AndAssignmentExpression
                | XorAssignmentExpression
                | OrAssignmentExpression
        )
    }

    pub fn is_ambiguity(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            AmbiguousTypeNameOrExpressionAsTypeReference
                | AmbiguousCastOrBinaryExpression
                | AmbiguousExpressionOrDeclarationStatement
        )
    }

    /// The n-ary node kind built for an infix operator token, or `None`
    /// for tokens that are not n-ary operators.
    pub fn for_nary_operator(tk: TokenKind) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        Some(match tk {
            TokenKind::Comma => SequencingExpression,
            TokenKind::Equals => BasicAssignmentExpression,
            TokenKind::AsteriskEquals => MultiplyAssignmentExpression,
            TokenKind::SlashEquals => DivideAssignmentExpression,
            TokenKind::PercentEquals => ModuloAssignmentExpression,
            TokenKind::PlusEquals => AddAssignmentExpression,
            TokenKind::MinusEquals => SubtractAssignmentExpression,
            TokenKind::LessLessEquals => LeftShiftAssignmentExpression,
            TokenKind::GreaterGreaterEquals => RightShiftAssignmentExpression,
            TokenKind::AmpersandEquals => AndAssignmentExpression,
            TokenKind::CaretEquals => XorAssignmentExpression,
            TokenKind::BarEquals => OrAssignmentExpression,
            TokenKind::Question => ConditionalExpression,
            TokenKind::BarBar => LogicalOrExpression,
            TokenKind::AmpersandAmpersand => LogicalAndExpression,
            TokenKind::Bar => BitwiseOrExpression,
            TokenKind::Caret => BitwiseXorExpression,
            TokenKind::Ampersand => BitwiseAndExpression,
            TokenKind::EqualsEquals => EqualsExpression,
            TokenKind::ExclamationEquals => NotEqualsExpression,
            TokenKind::Less => LessThanExpression,
            TokenKind::Greater => GreaterThanExpression,
            TokenKind::LessEquals => LessThanOrEqualExpression,
            TokenKind::GreaterEquals => GreaterThanOrEqualExpression,
            TokenKind::LessLess => LeftShiftExpression,
            TokenKind::GreaterGreater => RightShiftExpression,
            TokenKind::Plus => AddExpression,
            TokenKind::Minus => SubtractExpression,
            TokenKind::Asterisk => MultiplyExpression,
            TokenKind::Slash => DivideExpression,
            TokenKind::Percent => ModuloExpression,
            _ => return None,
        })
    }
}
