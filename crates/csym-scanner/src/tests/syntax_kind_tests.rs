//! Tests for syntax_kind.rs

use super::*;

#[test]
fn test_text_to_keyword() {
    assert_eq!(text_to_keyword("typedef"), Some(SyntaxKind::TypedefKeyword));
    assert_eq!(text_to_keyword("struct"), Some(SyntaxKind::StructKeyword));
    assert_eq!(text_to_keyword("_Bool"), Some(SyntaxKind::BoolKeyword));
    assert_eq!(text_to_keyword("foobar"), None);
    assert_eq!(text_to_keyword("Int"), None);
}

#[test]
fn test_keyword_to_text() {
    assert_eq!(keyword_to_text(SyntaxKind::UnsignedKeyword), Some("unsigned"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
}

#[test]
fn test_token_starts_declaration() {
    assert!(token_starts_declaration(SyntaxKind::IntKeyword));
    assert!(token_starts_declaration(SyntaxKind::TypedefKeyword));
    assert!(token_starts_declaration(SyntaxKind::ConstKeyword));
    assert!(token_starts_declaration(SyntaxKind::StructKeyword));
    assert!(!token_starts_declaration(SyntaxKind::ReturnKeyword));
    assert!(!token_starts_declaration(SyntaxKind::Identifier));
}

#[test]
fn test_token_classes_are_disjoint() {
    assert!(token_is_primitive_type(SyntaxKind::LongKeyword));
    assert!(!token_is_type_qualifier(SyntaxKind::LongKeyword));
    assert!(token_is_type_qualifier(SyntaxKind::VolatileKeyword));
    assert!(!token_is_storage_class(SyntaxKind::VolatileKeyword));
    assert!(token_is_literal(SyntaxKind::CharacterLiteral));
    assert!(!token_is_keyword(SyntaxKind::SemicolonToken));
}
