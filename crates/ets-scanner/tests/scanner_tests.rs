use super::*;
use crate::syntax_kind::token_to_string;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source.to_string());
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn scans_class_header() {
    assert_eq!(
        scan_all("class A extends B implements C {}"),
        vec![
            SyntaxKind::ClassKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::ExtendsKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::ImplementsKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
        ]
    );
}

#[test]
fn token_positions_exclude_trivia() {
    let mut scanner = ScannerState::new("  /* c */ foo // tail\n bar".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_full_start(), 0);
    assert_eq!(scanner.token_pos(), 10);
    assert_eq!(scanner.token_end(), 13);
    assert_eq!(scanner.token_value(), "foo");
    assert!(!scanner.has_preceding_line_break());

    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "bar");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn scans_multi_char_operators() {
    assert_eq!(
        scan_all("a === b !== c ?? d?.e ... =>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::EqualsGreaterThanToken,
        ]
    );
}

#[test]
fn keeps_greater_than_tokens_separate() {
    assert_eq!(
        scan_all("Array<Array<number>>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::NumberKeyword,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
        ]
    );
}

#[test]
fn string_values_are_cooked() {
    let mut scanner = ScannerState::new(r#"'a\'b' "x\ny" `t`"#.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a'b");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "x\ny");
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.token_value(), "t");
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn numbers() {
    let mut scanner = ScannerState::new("0x1F 1_000 3.14e-2 .5 10n".to_string());
    let mut values = Vec::new();
    while scanner.scan() == SyntaxKind::NumericLiteral {
        values.push(scanner.token_value().to_string());
    }
    assert_eq!(values, vec!["0x1F", "1_000", "3.14e-2", ".5", "10n"]);
}

#[test]
fn unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("'abc\nx".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        ets_common::diagnostics::diagnostic_codes::UNTERMINATED_STRING_LITERAL
    );
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn unterminated_block_comment_reports_diagnostic() {
    let mut scanner = ScannerState::new("let /* open\nx".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!((diagnostics[0].pos, diagnostics[0].length), (4, 9));
    assert_eq!(
        diagnostics[0].code,
        ets_common::diagnostics::diagnostic_codes::ASTERISK_SLASH_EXPECTED
    );
}

#[test]
fn block_comment_line_breaks_count_as_preceding() {
    let mut scanner = ScannerState::new("a /* one\ntwo */ b /* same */ c".to_string());
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(!scanner.has_preceding_line_break());
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn look_ahead_rewinds() {
    let mut scanner = ScannerState::new("a b c".to_string());
    scanner.scan();
    let next = scanner.look_ahead(|s| {
        s.scan();
        s.scan()
    });
    assert_eq!(next, SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "a");
    scanner.scan();
    assert_eq!(scanner.token_value(), "b");
}

#[test]
fn shebang_is_skipped() {
    let mut scanner = ScannerState::new("#!/usr/bin/env node\nlet x".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert_eq!(scanner.token_pos(), 20);
}

#[test]
fn keyword_round_trip_text() {
    assert_eq!(text_to_keyword("override"), Some(SyntaxKind::OverrideKeyword));
    assert_eq!(text_to_keyword("overrides"), None);
    assert_eq!(token_to_string(SyntaxKind::StructKeyword), Some("struct"));
    assert_eq!(token_to_string(SyntaxKind::EqualsEqualsEqualsToken), Some("==="));
    assert_eq!(token_to_string(SyntaxKind::Identifier), None);
}

#[test]
fn reset_to_rescans_from_offset() {
    let mut scanner = ScannerState::new("let a = 1, b;");
    scanner.reset_to(9);
    assert_eq!(scanner.scan(), SyntaxKind::CommaToken);
    assert_eq!(scanner.token_pos(), 9);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "b");
}
