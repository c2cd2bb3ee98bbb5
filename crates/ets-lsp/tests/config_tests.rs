use super::*;

#[test]
fn test_defaults_fill_missing_keys() {
    let settings = FormatCodeSettings::from_json(r#"{ "indentSize": 2 }"#).expect("parse");
    assert_eq!(settings.indent_size, 2);
    assert_eq!(settings.tab_size, 4);
    assert_eq!(settings.new_line_character, "\n");
    assert_eq!(settings.semicolons, SemicolonPreference::Ignore);
}

#[test]
fn test_invalid_settings_report_error() {
    let err = FormatCodeSettings::from_json(r#"{ "indentSize": "wide" }"#).unwrap_err();
    assert!(err.starts_with("invalid format settings"), "{err}");
}

#[test]
fn test_indent_string_with_tabs() {
    let settings = FormatCodeSettings {
        convert_tabs_to_spaces: false,
        ..FormatCodeSettings::default()
    };
    assert_eq!(settings.indent_string(4), "\t");
    assert_eq!(settings.indent_string(6), "\t  ");
    assert_eq!(FormatCodeSettings::default().indent_string(2), "  ");
}

#[test]
fn test_semicolons_and_quotes() {
    let settings = FormatCodeSettings::from_json(r#"{ "semicolons": "remove" }"#).expect("parse");
    assert_eq!(settings.statement_terminator(), "");
    let prefs = UserPreferences::from_json(r#"{ "quotePreference": "single" }"#).expect("parse");
    assert_eq!(prefs.quote_char(), '\'');
    assert_eq!(UserPreferences::default().quote_char(), '"');
}
