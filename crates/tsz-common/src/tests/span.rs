use super::*;

#[test]
fn test_span_basics() {
    let span = Span::new(10, 20);
    assert_eq!(span.start, 10);
    assert_eq!(span.end, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
}

#[test]
fn test_span_dummy() {
    let dummy = Span::dummy();
    assert!(dummy.is_dummy());

    let normal = Span::new(0, 10);
    assert!(!normal.is_dummy());
}

#[test]
fn test_span_display() {
    let span = Span::new(10, 20);
    assert_eq!(format!("{}", span), "10..20");
    assert_eq!(format!("{}", Span::dummy()), "<synthetic>");
}

#[test]
fn test_span_equality_ignores_nothing_itself() {
    // Span has no provenance of its own to ignore; this just pins down
    // that two spans built the same way compare equal, since `Type`
    // equality (in tsz-types) relies on that.
    assert_eq!(Span::new(1, 2), Span::new(1, 2));
    assert_ne!(Span::new(1, 2), Span::new(1, 3));
}
