use csym_scanner::{ScanError, ScannerState, SyntaxKind};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    scanner
        .scan_all()
        .expect("scan should succeed")
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_scan_simple_declaration() {
    assert_eq!(
        kinds("int q[100];"),
        vec![
            SyntaxKind::IntKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_scan_token_text() {
    let source = "struct foobar * fb;";
    let mut scanner = ScannerState::new(source);
    let tokens = scanner.scan_all().unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text(source)).collect();
    assert_eq!(texts, vec!["struct", "foobar", "*", "fb", ";", ""]);
}

#[test]
fn test_scan_skips_comments_and_preprocessor_lines() {
    let source = "#include <stdio.h>\n#define N \\\n  10\n/* block\n comment */ int // trailing\n x;";
    assert_eq!(
        kinds(source),
        vec![
            SyntaxKind::IntKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_hash_mid_line_is_an_error() {
    let mut scanner = ScannerState::new("int # x;");
    let err = scanner.scan_all().unwrap_err();
    assert!(matches!(err, ScanError::UnexpectedCharacter { ch: '#', .. }));
    assert_eq!(err.span().start, 4);
}

#[test]
fn test_scan_longest_punctuator() {
    assert_eq!(
        kinds("a >>= b->c ... ++"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::MinusGreaterThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::PlusPlusToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_scan_numeric_forms() {
    let source = "0x1F 1.5e-3 10UL .5f 0x1p+4";
    let mut scanner = ScannerState::new(source);
    let tokens = scanner.scan_all().unwrap();
    let texts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == SyntaxKind::NumericLiteral)
        .map(|t| t.text(source))
        .collect();
    assert_eq!(texts, vec!["0x1F", "1.5e-3", "10UL", ".5f", "0x1p+4"]);
}

#[test]
fn test_scan_string_and_char_literals() {
    assert_eq!(
        kinds(r#"'a' '\'' "x\"y""#),
        vec![
            SyntaxKind::CharacterLiteral,
            SyntaxKind::CharacterLiteral,
            SyntaxKind::StringLiteral,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_unterminated_comment_is_an_error() {
    let mut scanner = ScannerState::new("int x; /* never closed");
    assert!(matches!(
        scanner.scan_all(),
        Err(ScanError::UnterminatedComment { .. })
    ));
}

#[test]
fn test_unterminated_string_is_an_error() {
    let mut scanner = ScannerState::new("\"abc\nint x;");
    assert!(matches!(
        scanner.scan_all(),
        Err(ScanError::UnterminatedLiteral { what: "string", .. })
    ));
}
