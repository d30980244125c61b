//! Token kinds for the C declaration scanner.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    CharacterLiteral,
    StringLiteral,
    Identifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    ColonToken,
    QuestionToken,
    DotToken,
    DotDotDotToken,
    MinusGreaterThanToken,

    // Operators
    AsteriskToken,
    PlusToken,
    MinusToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,
    ExclamationToken,
    AmpersandAmpersandToken,
    BarBarToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,

    // Assignment
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,

    // Keywords: storage classes
    TypedefKeyword,
    ExternKeyword,
    StaticKeyword,
    AutoKeyword,
    RegisterKeyword,
    InlineKeyword,

    // Keywords: qualifiers
    ConstKeyword,
    VolatileKeyword,
    RestrictKeyword,

    // Keywords: type specifiers
    VoidKeyword,
    CharKeyword,
    ShortKeyword,
    IntKeyword,
    LongKeyword,
    FloatKeyword,
    DoubleKeyword,
    SignedKeyword,
    UnsignedKeyword,
    BoolKeyword,
    StructKeyword,
    UnionKeyword,
    EnumKeyword,

    // Keywords: statements
    ReturnKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    DoKeyword,
    ForKeyword,
    SwitchKeyword,
    CaseKeyword,
    DefaultKeyword,
    BreakKeyword,
    ContinueKeyword,
    GotoKeyword,
    SizeofKeyword,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("typedef", SyntaxKind::TypedefKeyword),
    ("extern", SyntaxKind::ExternKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("auto", SyntaxKind::AutoKeyword),
    ("register", SyntaxKind::RegisterKeyword),
    ("inline", SyntaxKind::InlineKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("volatile", SyntaxKind::VolatileKeyword),
    ("restrict", SyntaxKind::RestrictKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("char", SyntaxKind::CharKeyword),
    ("short", SyntaxKind::ShortKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("long", SyntaxKind::LongKeyword),
    ("float", SyntaxKind::FloatKeyword),
    ("double", SyntaxKind::DoubleKeyword),
    ("signed", SyntaxKind::SignedKeyword),
    ("unsigned", SyntaxKind::UnsignedKeyword),
    ("_Bool", SyntaxKind::BoolKeyword),
    ("struct", SyntaxKind::StructKeyword),
    ("union", SyntaxKind::UnionKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("goto", SyntaxKind::GotoKeyword),
    ("sizeof", SyntaxKind::SizeofKeyword),
];

/// Look up the keyword kind for an identifier-shaped word.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|&(_, kind)| kind)
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|&(word, _)| word)
}

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    keyword_to_text(kind).is_some()
}

/// Storage-class specifiers (`typedef` counts as one, as in the C grammar).
pub fn token_is_storage_class(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::TypedefKeyword
            | SyntaxKind::ExternKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::AutoKeyword
            | SyntaxKind::RegisterKeyword
            | SyntaxKind::InlineKeyword
    )
}

pub fn token_is_type_qualifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ConstKeyword | SyntaxKind::VolatileKeyword | SyntaxKind::RestrictKeyword
    )
}

/// Builtin type-specifier keywords whose text becomes a qualifier token.
pub fn token_is_primitive_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VoidKeyword
            | SyntaxKind::CharKeyword
            | SyntaxKind::ShortKeyword
            | SyntaxKind::IntKeyword
            | SyntaxKind::LongKeyword
            | SyntaxKind::FloatKeyword
            | SyntaxKind::DoubleKeyword
            | SyntaxKind::SignedKeyword
            | SyntaxKind::UnsignedKeyword
            | SyntaxKind::BoolKeyword
    )
}

pub fn token_is_aggregate_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::StructKeyword | SyntaxKind::UnionKeyword | SyntaxKind::EnumKeyword
    )
}

/// Tokens that can begin declaration specifiers, not counting typedef names.
pub fn token_starts_declaration(kind: SyntaxKind) -> bool {
    token_is_storage_class(kind)
        || token_is_type_qualifier(kind)
        || token_is_primitive_type(kind)
        || token_is_aggregate_keyword(kind)
}

pub fn token_is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::NumericLiteral | SyntaxKind::CharacterLiteral | SyntaxKind::StringLiteral
    )
}
