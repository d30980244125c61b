use super::*;

#[test]
fn test_span_slice_and_len() {
    let source = "int q[100];";
    let span = Span::new(4, 5);
    assert_eq!(span.slice(source), Some("q"));
    assert_eq!(span.len(), 1);
    assert!(!span.is_empty());
    assert!(Span::at(3).is_empty());
    assert_eq!(Span::new(0, 99).slice(source), None);
}

#[test]
fn test_span_merge() {
    let merged = Span::new(4, 6).merge(Span::new(1, 5));
    assert_eq!(merged, Span::new(1, 6));
}

#[test]
fn test_span_line_col() {
    let source = "int a;\nint b;\n  int c;";
    assert_eq!(Span::at(0).line_col(source), (1, 1));
    assert_eq!(Span::at(11).line_col(source), (2, 5));
    assert_eq!(Span::at(16).line_col(source), (3, 3));
}
