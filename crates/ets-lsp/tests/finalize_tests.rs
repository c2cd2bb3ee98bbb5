use super::*;
use crate::project::Project;
use crate::text_changes::{ChangeTracker, TextChangesContext};
use ets_common::position::TextSpan;
use ets_parser::syntax_kind_ext::VARIABLE_STATEMENT;

fn change(start: u32, length: u32, text: &str) -> TextChange {
    TextChange {
        span: TextSpan::new(start, length),
        new_text: text.to_string(),
    }
}

#[test]
fn test_apply_text_changes_in_any_order() {
    let text = "let a = 1;";
    let changes = vec![change(4, 1, "b"), change(8, 1, "2"), change(0, 3, "var")];
    assert_eq!(apply_text_changes(text, &changes), "var b = 2;");
}

#[test]
fn test_apply_text_changes_replace_before_insert_at_same_start() {
    let text = "abc";
    let changes = vec![change(1, 0, "X"), change(1, 1, "Y")];
    assert_eq!(apply_text_changes(text, &changes), "aXYc");
}

#[test]
fn test_apply_text_changes_clamps_out_of_range() {
    let changes = vec![change(10, 5, "!")];
    assert_eq!(apply_text_changes("abc", &changes), "abc!");
}

#[test]
fn test_changes_grouped_per_file_in_insertion_order() {
    let mut project = Project::new();
    project.set_file("a.ets".to_string(), "let a = 1;\n".to_string());
    project.set_file("b.ets".to_string(), "let b = 2;\n".to_string());
    let a = project.file("a.ets").expect("a.ets");
    let b = project.file("b.ets").expect("b.ets");
    let settings = FormatCodeSettings::default();
    let preferences = UserPreferences::default();
    let context = TextChangesContext::new(&settings, &preferences);

    let changes = ChangeTracker::with(&context, |tracker| {
        tracker.insert_text(a, 0, "1");
        tracker.insert_text(b, 0, "x");
        tracker.insert_text(a, 3, "2");
        tracker.insert_text(b, 1, "y");
        tracker.insert_text(a, 5, "3");
    });

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].file_name, "a.ets");
    assert_eq!(changes[1].file_name, "b.ets");
    let texts = |i: usize| -> Vec<&str> { changes[i].text_changes.iter().map(|c| c.new_text.as_str()).collect() };
    assert_eq!(texts(0), vec!["1", "2", "3"]);
    assert_eq!(texts(1), vec!["x", "y"]);
    let starts: Vec<u32> = changes[0].text_changes.iter().map(|c| c.span.start).collect();
    assert_eq!(starts, vec![0, 3, 5]);
    assert!(changes.iter().all(|c| !c.is_new_file));
}

#[test]
fn test_new_file_copies_header_comment() {
    let mut project = Project::new();
    project.set_file("old.ets".to_string(), "// Copyright\n\nlet a = 1;\n".to_string());
    let old = project.file("old.ets").expect("old.ets");
    let settings = FormatCodeSettings::default();
    let preferences = UserPreferences::default();
    let context = TextChangesContext::new(&settings, &preferences);

    let changes = ChangeTracker::with(&context, |tracker| {
        tracker.create_new_file(
            Some(old),
            "new.ets",
            vec![
                SynthNode::raw(VARIABLE_STATEMENT, "export const x = 1;"),
                SynthNode::raw(VARIABLE_STATEMENT, "export const y = 2;"),
            ],
        );
    });

    assert_eq!(changes.len(), 1);
    let new_file = &changes[0];
    assert!(new_file.is_new_file);
    assert_eq!(new_file.file_name, "new.ets");
    assert_eq!(new_file.text_changes.len(), 1);
    assert_eq!(new_file.text_changes[0].span, TextSpan::new(0, 0));
    assert_eq!(
        new_file.text_changes[0].new_text,
        "// Copyright\nexport const x = 1;\nexport const y = 2;\n"
    );
}

#[test]
fn test_new_file_follows_edited_files() {
    let mut project = Project::new();
    project.set_file("a.ets".to_string(), "let a = 1;\n".to_string());
    let a = project.file("a.ets").expect("a.ets");
    let settings = FormatCodeSettings::default();
    let preferences = UserPreferences::default();
    let context = TextChangesContext::new(&settings, &preferences);

    let changes = ChangeTracker::with(&context, |tracker| {
        tracker.create_new_file(None, "fresh.ets", vec![SynthNode::raw(VARIABLE_STATEMENT, "let z = 0;")]);
        tracker.insert_text(a, 0, "// edited\n");
    });

    let names: Vec<&str> = changes.iter().map(|c| c.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.ets", "fresh.ets"]);
    assert_eq!(changes[1].text_changes[0].new_text, "let z = 0;\n");
}

#[test]
fn test_crlf_settings_drive_inserted_line_breaks() {
    let mut project = Project::new();
    project.set_file("a.ets".to_string(), "class C {}\r\n".to_string());
    let file = project.file("a.ets").expect("a.ets");
    let class = file.statements().and_then(|s| s.first()).expect("class");
    let settings = FormatCodeSettings {
        new_line_character: "\r\n".to_string(),
        ..FormatCodeSettings::default()
    };
    let preferences = UserPreferences::default();
    let context = TextChangesContext::new(&settings, &preferences);

    let changes = ChangeTracker::with(&context, |tracker| {
        tracker.insert_member_at_start(
            file,
            class,
            SynthNode::PropertyDeclaration {
                modifiers: Vec::new(),
                name: "x".to_string(),
                question: false,
                type_node: None,
                initializer: None,
            },
        );
    });
    let text = apply_text_changes(file.source_text(), &changes[0].text_changes);
    assert_eq!(text, "class C {\r\n    x;\r\n}\r\n");
}

#[test]
fn test_file_text_changes_serialize_camel_case() {
    let changes = FileTextChanges {
        file_name: "a.ets".to_string(),
        text_changes: vec![change(1, 2, "x")],
        is_new_file: false,
    };
    let json = serde_json::to_value(&changes).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "fileName": "a.ets",
            "textChanges": [{ "span": { "start": 1, "length": 2 }, "newText": "x" }]
        })
    );
}
