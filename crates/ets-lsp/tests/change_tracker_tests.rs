use super::*;
use crate::project::FileId;
use ets_parser::syntax::find_touching_node;

struct Fixture {
    file: ProjectFile,
    settings: FormatCodeSettings,
    preferences: UserPreferences,
}

impl Fixture {
    fn new(text: &str) -> Self {
        Fixture {
            file: ProjectFile::new(FileId(0), "test.ets".to_string(), text.to_string()),
            settings: FormatCodeSettings::default(),
            preferences: UserPreferences::default(),
        }
    }

    fn changes(&self, edit: impl for<'t> FnOnce(&mut ChangeTracker<'t>, &'t ProjectFile)) -> Vec<FileTextChanges> {
        let context = TextChangesContext::new(&self.settings, &self.preferences);
        ChangeTracker::with(&context, |tracker| edit(tracker, &self.file))
    }

    fn apply(&self, edit: impl for<'t> FnOnce(&mut ChangeTracker<'t>, &'t ProjectFile)) -> String {
        let edits: Vec<_> = self
            .changes(edit)
            .into_iter()
            .flat_map(|changes| changes.text_changes)
            .collect();
        finalize::apply_text_changes(self.file.source_text(), &edits)
    }

    fn statements(&self) -> Vec<NodeIndex> {
        self.file.statements().map(|s| s.iter().collect()).unwrap_or_default()
    }

    /// Innermost node touching the first occurrence of `needle`.
    fn token(&self, needle: &str) -> NodeIndex {
        let pos = self.file.source_text().find(needle).expect("needle in source") as u32;
        find_touching_node(self.file.arena(), pos)
    }

    fn ancestor(&self, needle: &str, kind: u16) -> NodeIndex {
        let found = self.file.arena().find_ancestor(self.token(needle), |k| k == kind);
        assert!(found.is_some(), "no ancestor of kind {kind} for {needle:?}");
        found
    }
}

fn log_call() -> SynthNode {
    SynthNode::expression_statement(SynthNode::call(SynthNode::identifier("log"), Vec::new()))
}

fn number_property(name: &str) -> SynthNode {
    SynthNode::PropertyDeclaration {
        modifiers: Vec::new(),
        name: name.to_string(),
        question: false,
        type_node: Some(Box::new(SynthNode::type_reference("number"))),
        initializer: None,
    }
}

const THREE_LETS: &str = "let a = 1;\nlet b = 2;\nlet c = 3;\n";

// =============================================================================
// Missing input
// =============================================================================

#[test]
fn test_operations_on_missing_nodes_record_nothing() {
    let fixture = Fixture::new(THREE_LETS);
    let changes = fixture.changes(|tracker, file| {
        let missing = NodeIndex(9_999);
        for node in [NodeIndex::NONE, missing] {
            tracker.delete_node(file, node, None);
            tracker.delete_modifier(file, node);
            tracker.delete(file, NodeOrNodes::Node(node));
            tracker.replace_node(file, node, log_call(), ChangeNodeOptions::default());
            tracker.replace_node_with_text(file, node, "x");
            tracker.insert_node_before(file, node, log_call(), false, ConfigurableStartEnd::default());
            tracker.insert_node_after(file, node, log_call());
            tracker.insert_modifier_before(file, SyntaxKind::ExportKeyword, node);
            tracker.insert_member_at_start(file, node, number_property("x"));
            tracker.insert_node_in_list_after(file, node, SynthNode::identifier("x"));
            tracker.insert_node_at_constructor_start(file, node, log_call());
        }
        tracker.delete(file, NodeOrNodes::List(Vec::new()));
        tracker.replace_range_with_nodes(
            file,
            TextRange::empty(0),
            Vec::new(),
            ReplaceWithMultipleNodesOptions::default(),
        );
        assert!(tracker.change_list().is_empty());
    });
    assert!(changes.is_empty());
}

#[test]
fn test_member_insert_rejects_non_container_and_non_member() {
    let fixture = Fixture::new("class C {}\nlet v = 1;\n");
    let statements = fixture.statements();
    let changes = fixture.changes(|tracker, file| {
        tracker.insert_member_at_start(file, statements[1], number_property("x"));
        tracker.insert_member_at_start(file, statements[0], log_call());
    });
    assert!(changes.is_empty());
}

// =============================================================================
// Session isolation
// =============================================================================

#[test]
fn test_fresh_session_returns_no_changes() {
    let fixture = Fixture::new(THREE_LETS);
    let changes = fixture.changes(|_, _| {});
    assert!(changes.is_empty());
}

#[test]
fn test_sessions_do_not_share_changes() {
    let fixture = Fixture::new(THREE_LETS);
    let statements = fixture.statements();
    let first = fixture.changes(|tracker, file| tracker.delete_node(file, statements[0], None));
    let second = fixture.changes(|tracker, file| {
        assert!(tracker.change_list().is_empty());
        tracker.insert_text(file, 0, "// hi\n");
    });

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].text_changes.len(), 1);
    assert_eq!(first[0].text_changes[0].new_text, "");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].text_changes.len(), 1);
    assert_eq!(second[0].text_changes[0].new_text, "// hi\n");
}

// =============================================================================
// Deletion
// =============================================================================

#[test]
fn test_delete_node_records_one_remove_over_adjusted_range() {
    let fixture = Fixture::new(THREE_LETS);
    let b = fixture.statements()[1];
    fixture.changes(|tracker, file| {
        tracker.delete_node(file, b, None);
        let list = tracker.change_list();
        assert_eq!(list.len(), 1);
        assert!(matches!(list[0], Change::RemoveNode { .. }));
        // Whole line, including its line break.
        assert_eq!(list[0].range(), TextRange::new(11, 22));
    });
}

#[test]
fn test_delete_node_leaves_neighbours_intact() {
    let fixture = Fixture::new(THREE_LETS);
    let b = fixture.statements()[1];
    let text = fixture.apply(|tracker, file| tracker.delete_node(file, b, None));
    assert_eq!(text, "let a = 1;\nlet c = 3;\n");
}

#[test]
fn test_delete_node_non_adjusted_keeps_trivia() {
    let fixture = Fixture::new(THREE_LETS);
    let b = fixture.statements()[1];
    fixture.changes(|tracker, file| {
        tracker.delete_node(file, b, Some(ConfigurableStartEnd::non_adjusted()));
        assert_eq!(tracker.change_list()[0].range(), TextRange::new(11, 21));
    });
}

#[test]
fn test_delete_node_range_spans_both_nodes() {
    let fixture = Fixture::new(THREE_LETS);
    let statements = fixture.statements();
    let text = fixture.apply(|tracker, file| tracker.delete_node_range(file, statements[0], statements[1], None));
    assert_eq!(text, "let c = 3;\n");
}

#[test]
fn test_delete_node_range_excluding_end_stops_at_next_node() {
    let fixture = Fixture::new(THREE_LETS);
    let statements = fixture.statements();
    let text = fixture.apply(|tracker, file| {
        tracker.delete_node_range_excluding_end(file, statements[0], statements[2], None)
    });
    assert_eq!(text, "let c = 3;\n");
}

#[test]
fn test_delete_node_range_excluding_end_to_end_of_file() {
    let fixture = Fixture::new(THREE_LETS);
    let b = fixture.statements()[1];
    let text = fixture.apply(|tracker, file| {
        tracker.delete_node_range_excluding_end(file, b, NodeIndex::NONE, None)
    });
    assert_eq!(text, "let a = 1;\n");
}

#[test]
fn test_delete_modifier_takes_following_space() {
    let fixture = Fixture::new("export function f() {}\n");
    let function = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| {
        let modifier = file.arena().find_modifier(function, SyntaxKind::ExportKeyword);
        tracker.delete_modifier(file, modifier);
    });
    assert_eq!(text, "function f() {}\n");
}

#[test]
fn test_deferred_delete_resolves_at_finalization() {
    let fixture = Fixture::new(THREE_LETS);
    let statements = fixture.statements();
    let text = fixture.apply(|tracker, file| {
        tracker.delete(file, NodeOrNodes::Node(statements[0]));
        tracker.delete(file, NodeOrNodes::List(vec![statements[1], statements[2]]));
        assert!(tracker.change_list().is_empty());
    });
    assert_eq!(text, "");
}

// =============================================================================
// Replacement
// =============================================================================

#[test]
fn test_replace_node_uses_raw_range() {
    let fixture = Fixture::new("let a = 1;\n");
    let one = fixture.token("1");
    let text = fixture.apply(|tracker, file| {
        tracker.replace_node(file, one, SynthNode::identifier("two"), ChangeNodeOptions::default())
    });
    assert_eq!(text, "let a = two;\n");
}

#[test]
fn test_replace_node_with_text_and_range_with_text() {
    let fixture = Fixture::new("let a = 1;\n");
    let one = fixture.token("1");
    let text = fixture.apply(|tracker, file| {
        tracker.replace_node_with_text(file, one, "42");
        tracker.replace_range_with_text(file, TextRange::new(0, 3), "var");
    });
    assert_eq!(text, "var a = 42;\n");
}

#[test]
fn test_replace_node_with_nodes_joins_with_new_line() {
    let fixture = Fixture::new("log();\n");
    let statement = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| {
        tracker.replace_node_with_nodes(
            file,
            statement,
            vec![log_call(), SynthNode::expression_statement(SynthNode::identifier("done"))],
            ChangeNodeOptions::default(),
        )
    });
    assert_eq!(text, "log();\ndone;\n");
}

#[test]
fn test_replace_property_assignment_adds_separator_only_without_comma() {
    let fixture = Fixture::new("let o = { a: 1, b: 2 };\n");
    let a = fixture.ancestor("a: 1", PROPERTY_ASSIGNMENT);
    let b = fixture.ancestor("b: 2", PROPERTY_ASSIGNMENT);
    fixture.changes(|tracker, file| {
        let value = || SynthNode::raw(SyntaxKind::NumericLiteral as u16, "0");
        tracker.replace_property_assignment(
            file,
            a,
            SynthNode::PropertyAssignment {
                name: "a".to_string(),
                initializer: Box::new(value()),
            },
        );
        tracker.replace_property_assignment(
            file,
            b,
            SynthNode::PropertyAssignment {
                name: "b".to_string(),
                initializer: Box::new(value()),
            },
        );
        let suffixes: Vec<String> = tracker
            .change_list()
            .iter()
            .map(|change| match change {
                Change::ReplaceWithSingleNode { options, .. } => options.suffix.clone(),
                other => panic!("unexpected change {other:?}"),
            })
            .collect();
        assert_eq!(suffixes, vec![String::new(), ",\n".to_string()]);
    });
}

// =============================================================================
// Insert before / after
// =============================================================================

fn insert_before_suffix(blank_line_between: bool) -> String {
    let fixture = Fixture::new(THREE_LETS);
    let b = fixture.statements()[1];
    let mut suffix = String::new();
    fixture.changes(|tracker, file| {
        tracker.insert_node_before(file, b, log_call(), blank_line_between, ConfigurableStartEnd::default());
        if let Change::ReplaceWithSingleNode { options, .. } = &tracker.change_list()[0] {
            suffix = options.suffix.clone();
        }
    });
    suffix
}

#[test]
fn test_insert_before_statement_suffix_table() {
    assert_eq!(insert_before_suffix(false), "\n");
    assert_eq!(insert_before_suffix(true), "\n\n");
}

#[test]
fn test_insert_node_before_statement() {
    let fixture = Fixture::new("let a = 1;\nlet b = 2;\n");
    let b = fixture.statements()[1];
    let plain = fixture.apply(|tracker, file| {
        tracker.insert_node_before(file, b, log_call(), false, ConfigurableStartEnd::default())
    });
    assert_eq!(plain, "let a = 1;\nlog();\nlet b = 2;\n");

    let blank = fixture.apply(|tracker, file| {
        tracker.insert_node_before(file, b, log_call(), true, ConfigurableStartEnd::default())
    });
    assert_eq!(blank, "let a = 1;\nlog();\n\nlet b = 2;\n");
}

#[test]
fn test_insert_node_before_declarator_uses_comma() {
    let fixture = Fixture::new("let b = 2;\n");
    let declaration = fixture.ancestor("b", VARIABLE_DECLARATION);
    let text = fixture.apply(|tracker, file| {
        tracker.insert_node_before(
            file,
            declaration,
            SynthNode::raw(VARIABLE_DECLARATION, "a = 1"),
            false,
            ConfigurableStartEnd::default(),
        )
    });
    assert_eq!(text, "let a = 1, b = 2;\n");
}

#[test]
fn test_insert_node_after_statement() {
    let fixture = Fixture::new("let a = 1;\nlet b = 2;\n");
    let a = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_node_after(file, a, log_call()));
    assert_eq!(text, "let a = 1;\nlog();\nlet b = 2;\n");
}

#[test]
fn test_insert_node_after_adds_missing_semicolon() {
    let fixture = Fixture::new("let a = 1\nlet b = 2\n");
    let a = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_node_after(file, a, log_call()));
    assert_eq!(text, "let a = 1;\nlog();\nlet b = 2\n");
}

#[test]
fn test_insert_node_after_last_statement_without_line_break() {
    let fixture = Fixture::new("let a = 1;");
    let a = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_node_after(file, a, log_call()));
    assert_eq!(text, "let a = 1;\nlog();\n");
}

#[test]
fn test_insert_modifier_before_and_export_modifier() {
    let fixture = Fixture::new("class C {\n    x: number;\n}\nfunction f() {}\n");
    let property = fixture.ancestor("x:", PROPERTY_DECLARATION);
    let function = fixture.statements()[1];
    let text = fixture.apply(|tracker, file| {
        tracker.insert_modifier_before(file, SyntaxKind::DeclareKeyword, property);
        tracker.insert_export_modifier(file, function);
    });
    assert_eq!(text, "class C {\n    declare x: number;\n}\nexport function f() {}\n");
}

// =============================================================================
// Top of file
// =============================================================================

fn top_of_file_prefix(text: &str, blank_line_between: bool) -> String {
    let fixture = Fixture::new(text);
    let mut prefix = None;
    fixture.changes(|tracker, file| {
        tracker.insert_node_at_top_of_file(file, log_call(), blank_line_between);
        if let Change::ReplaceWithSingleNode { range, options, .. } = &tracker.change_list()[0] {
            assert_eq!(range.pos, 0);
            prefix = Some(options.prefix.clone());
        }
    });
    prefix.expect("insertion recorded")
}

#[test]
fn test_top_of_file_at_position_zero_has_no_prefix() {
    for blank_line_between in [false, true] {
        assert_eq!(top_of_file_prefix("", blank_line_between), "");
        assert_eq!(top_of_file_prefix("let a = 1;\n", blank_line_between), "");
    }
}

#[test]
fn test_top_of_file_insertion_text() {
    let fixture = Fixture::new("let a = 1;\n");
    let plain = fixture.apply(|tracker, file| tracker.insert_node_at_top_of_file(file, log_call(), false));
    assert_eq!(plain, "log();\nlet a = 1;\n");
    let blank = fixture.apply(|tracker, file| tracker.insert_node_at_top_of_file(file, log_call(), true));
    assert_eq!(blank, "log();\n\nlet a = 1;\n");
}

#[test]
fn test_top_of_file_skips_header_comment() {
    let fixture = Fixture::new("// Copyright\n\nlet a = 1;\n");
    let text = fixture.apply(|tracker, file| tracker.insert_node_at_top_of_file(file, log_call(), false));
    assert_eq!(text, "// Copyright\n\nlog();\nlet a = 1;\n");
}

#[test]
fn test_top_of_file_skips_prologue_directive() {
    let fixture = Fixture::new("\"use strict\";\nlet a = 1;\n");
    let text = fixture.apply(|tracker, file| tracker.insert_node_at_top_of_file(file, log_call(), false));
    assert_eq!(text, "\"use strict\";\n\nlog();\nlet a = 1;\n");
}

// =============================================================================
// Constructors
// =============================================================================

#[test]
fn test_constructor_start_in_multi_line_body() {
    let fixture = Fixture::new("class B extends A {\n    constructor() {\n        this.x = 1;\n    }\n}\n");
    let ctor = fixture.ancestor("constructor", CONSTRUCTOR);
    let super_call = SynthNode::expression_statement(SynthNode::call(
        SynthNode::token(SyntaxKind::SuperKeyword),
        Vec::new(),
    ));
    let text = fixture.apply(|tracker, file| tracker.insert_node_at_constructor_start(file, ctor, super_call));
    assert_eq!(
        text,
        "class B extends A {\n    constructor() {\n        super();\n        this.x = 1;\n    }\n}\n"
    );
}

#[test]
fn test_constructor_start_in_empty_body_rewrites_block() {
    let fixture = Fixture::new("class B extends A {\n    constructor() {}\n}\n");
    let ctor = fixture.ancestor("constructor", CONSTRUCTOR);
    let super_call = SynthNode::expression_statement(SynthNode::call(
        SynthNode::token(SyntaxKind::SuperKeyword),
        Vec::new(),
    ));
    let text = fixture.apply(|tracker, file| tracker.insert_node_at_constructor_start(file, ctor, super_call));
    assert_eq!(text, "class B extends A {\n    constructor() {\n        super();\n    }\n}\n");
}

// =============================================================================
// Container inserts
// =============================================================================

#[test]
fn test_member_insert_into_empty_single_line_class() {
    let fixture = Fixture::new("class C {}\n");
    let class = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_member_at_start(file, class, number_property("x")));
    assert_eq!(text, "class C {\n    x: number;\n}\n");
}

#[test]
fn test_member_insert_into_padded_empty_class() {
    let fixture = Fixture::new("class C { }\n");
    let class = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_member_at_start(file, class, number_property("x")));
    assert_eq!(text, "class C {\n    x: number;\n}\n");
}

#[test]
fn test_member_insert_into_single_line_class_with_member() {
    let fixture = Fixture::new("class C { x: number; }\n");
    let class = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_member_at_start(file, class, number_property("a")));
    assert_eq!(text, "class C { x: number;\n    a: number;\n}\n");
}

#[test]
fn test_member_insert_into_single_line_class_without_padding() {
    let fixture = Fixture::new("class C {x: number;}\n");
    let class = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| tracker.insert_member_at_start(file, class, number_property("a")));
    assert_eq!(text, "class C {x: number;\n    a: number;\n}\n");
}

#[test]
fn test_member_insert_appends_after_last_member() {
    let fixture = Fixture::new("class C {\n    a = 1;\n}\n");
    let class = fixture.statements()[0];
    let text = fixture.apply(|tracker, file| {
        tracker.insert_member_at_start(file, class, number_property("x"));
        tracker.insert_member_at_start(file, class, number_property("y"));
    });
    assert_eq!(text, "class C {\n    a = 1;\n    x: number;\n    y: number;\n}\n");
}

#[test]
fn test_container_recorded_once_per_session() {
    let fixture = Fixture::new("class C {}\n");
    let class = fixture.statements()[0];
    let changes = fixture.changes(|tracker, file| {
        tracker.insert_member_at_start(file, class, number_property("x"));
        tracker.insert_member_at_start(file, class, number_property("y"));
    });
    // Two members plus a single line break before `}`.
    assert_eq!(changes[0].text_changes.len(), 3);
}

#[test]
fn test_member_insert_into_empty_interface_ends_with_semicolon() {
    let fixture = Fixture::new("interface I {}\n");
    let iface = fixture.statements()[0];
    let member = SynthNode::PropertySignature {
        name: "x".to_string(),
        question: true,
        type_node: Some(Box::new(SynthNode::type_reference("string"))),
    };
    let text = fixture.apply(|tracker, file| tracker.insert_member_at_start(file, iface, member));
    assert_eq!(text, "interface I {\n    x?: string;\n}\n");
}

#[test]
fn test_object_insert_separates_with_commas() {
    let fixture = Fixture::new("let o = {\n    a: 1\n};\n");
    let object = fixture.ancestor("{", OBJECT_LITERAL_EXPRESSION);
    let property = SynthNode::PropertyAssignment {
        name: "b".to_string(),
        initializer: Box::new(SynthNode::raw(SyntaxKind::NumericLiteral as u16, "2")),
    };
    let text = fixture.apply(|tracker, file| tracker.insert_node_at_object_start(file, object, property));
    assert_eq!(text, "let o = {\n    a: 1,\n    b: 2,\n};\n");
}

#[test]
fn test_object_inserts_into_empty_literal_get_single_commas() {
    let fixture = Fixture::new("let o = {};\n");
    let object = fixture.ancestor("{", OBJECT_LITERAL_EXPRESSION);
    let property = |name: &str, value: &str| SynthNode::PropertyAssignment {
        name: name.to_string(),
        initializer: Box::new(SynthNode::raw(SyntaxKind::NumericLiteral as u16, value)),
    };
    let text = fixture.apply(|tracker, file| {
        tracker.insert_node_at_object_start(file, object, property("a", "1"));
        tracker.insert_node_at_object_start(file, object, property("b", "2"));
    });
    assert_eq!(text, "let o = {\n    a: 1,\n    b: 2,\n};\n");
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn test_list_insert_before_next_element() {
    let fixture = Fixture::new("foo(a, b);\n");
    let a = fixture.token("a");
    let text = fixture.apply(|tracker, file| tracker.insert_node_in_list_after(file, a, SynthNode::identifier("x")));
    assert_eq!(text, "foo(a, x, b);\n");
}

#[test]
fn test_list_insert_after_last_single_line() {
    let fixture = Fixture::new("foo(a, b);\n");
    let b = fixture.token("b");
    let text = fixture.apply(|tracker, file| tracker.insert_node_in_list_after(file, b, SynthNode::identifier("x")));
    assert_eq!(text, "foo(a, b, x);\n");
}

#[test]
fn test_list_insert_after_last_multi_line() {
    let fixture = Fixture::new("foo(\n    a,\n    b\n);\n");
    let b = fixture.token("b");
    let text = fixture.apply(|tracker, file| tracker.insert_node_in_list_after(file, b, SynthNode::identifier("x")));
    assert_eq!(text, "foo(\n    a,\n    b,\n    x\n);\n");
}

#[test]
fn test_containing_list_and_next_comma() {
    let fixture = Fixture::new("foo(a, b);\n");
    let a = fixture.token("a");
    let b = fixture.token("b");
    fixture.changes(|tracker, file| {
        let list = tracker.containing_list(file, a).expect("argument list");
        assert_eq!(list.len(), 2);
        assert_eq!(list.position_of(b), Some(1));
        let comma = tracker.next_comma_token(file, a).expect("comma after a");
        assert_eq!((comma.pos, comma.end), (5, 6));
        assert!(tracker.next_comma_token(file, b).is_none());
    });
}

#[test]
fn test_insert_node_at_end_of_list() {
    let fixture = Fixture::new("foo(a, b);\n");
    let a = fixture.token("a");
    let text = fixture.apply(|tracker, file| {
        let list = tracker.containing_list(file, a).expect("argument list");
        tracker.insert_node_at_end_of_list(file, list, SynthNode::identifier("c"));
    });
    assert_eq!(text, "foo(a, b, c);\n");
}

// =============================================================================
// Equal-position inserts
// =============================================================================

#[test]
fn test_inserts_at_same_position_keep_call_order() {
    let fixture = Fixture::new("x;\n");
    let text = fixture.apply(|tracker, file| {
        tracker.insert_text(file, 0, "a");
        tracker.insert_text(file, 0, "b");
        tracker.insert_text(file, 0, "c");
    });
    assert_eq!(text, "abcx;\n");
}
