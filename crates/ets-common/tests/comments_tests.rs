use super::*;

#[test]
fn skip_trivia_stops_after_line_break() {
    let source = "a;   // note\n  b;";
    assert_eq!(skip_trivia(source, 2, true, false), 13);
    assert_eq!(skip_trivia(source, 2, false, false), 15);
    assert_eq!(skip_trivia(source, 2, true, true), 5);
}

#[test]
fn skip_trivia_handles_crlf_and_block_comments() {
    let source = "x /* a */\r\ny";
    assert_eq!(skip_trivia(source, 1, true, false), 11);
    assert_eq!(skip_trivia(source, 1, false, false), 11);
}

#[test]
fn trailing_comments_stay_on_the_same_line() {
    let source = "let a = 1; /* one */ // two\n// three\n";
    let comments = get_trailing_comment_ranges(source, 10);
    assert_eq!(comments.len(), 2);
    assert!(comments[0].is_multi_line);
    assert_eq!(comments[1].get_text(source), "// two");
    assert!(has_comments_before_line_break(source, 10));
    assert!(!has_comments_before_line_break(source, 36));
}

#[test]
fn header_comment_end_skips_shebang_and_license() {
    let source = "#!/usr/bin/env node\n/* Copyright */\nimport a from \"a\";\n";
    assert_eq!(shebang_end(source), 19);
    assert_eq!(header_comment_end(source), 35);
    assert_eq!(header_comment_end("import a from \"a\";"), 0);
}

#[test]
fn jsdoc_detection() {
    let source = "/** doc */ /*** not */";
    let comments = get_leading_comment_ranges(source, 0);
    assert_eq!(comments.len(), 2);
    assert!(is_jsdoc_comment(&comments[0], source));
    assert!(!is_jsdoc_comment(&comments[1], source));
}
