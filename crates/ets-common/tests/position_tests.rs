use super::*;

#[test]
fn test_line_map_simple() {
    let source = "line1\nline2\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    assert_eq!(map.offset_to_position(4, source), Position::new(0, 4));
    assert_eq!(map.offset_to_position(6, source), Position::new(1, 0));
    assert_eq!(map.offset_to_position(12, source), Position::new(2, 0));
}

#[test]
fn test_line_map_windows_line_endings() {
    let source = "line1\r\nline2\r\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(7, source), Position::new(1, 0));
}

#[test]
fn test_position_to_offset_roundtrip() {
    let source = "const x = 1;\nlet y = 2;\nvar z = 3;";
    let map = LineMap::build(source);

    for offset in 0..source.len() as u32 {
        let pos = map.offset_to_position(offset, source);
        let back = map.position_to_offset(pos, source).unwrap();
        assert_eq!(offset, back, "roundtrip failed for offset {}", offset);
    }
}

#[test]
fn test_utf16_columns() {
    let source = "A \u{1F680} B";
    let map = LineMap::build(source);

    assert_eq!(map.offset_to_position(2, source).character, 2);
    assert_eq!(map.offset_to_position(7, source).character, 5);
    assert_eq!(
        map.position_to_offset(Position::new(0, 5), source),
        Some(7)
    );
}

#[test]
fn test_line_start_and_same_line() {
    let source = "class C {}\n  foo();\n";
    let map = LineMap::build(source);

    assert_eq!(map.line_start_for_offset(15), 11);
    assert_eq!(map.line_start_for_offset(3), 0);
    assert!(map.on_same_line(0, 9));
    assert!(!map.on_same_line(9, 13));
}

#[test]
fn test_text_range_helpers() {
    let range = TextRange::new(4, 9);
    assert_eq!(range.len(), 5);
    assert!(range.contains(4));
    assert!(!range.contains(9));
    assert_eq!(range.to_span(), TextSpan::new(4, 5));

    let empty = TextRange::empty(3);
    assert!(empty.is_empty());
    assert_eq!(empty.to_span().end(), 3);
}

#[test]
fn test_text_span_serializes_with_start_and_length() {
    let json = serde_json::to_string(&TextSpan::new(2, 3)).unwrap();
    assert_eq!(json, r#"{"start":2,"length":3}"#);
}
