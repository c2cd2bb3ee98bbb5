use super::*;
use crate::parser::state::ParserState;
use crate::parser::syntax_kind_ext;
use crate::parser::{NodeArena, NodeIndex};
use ets_scanner::SyntaxKind;
use std::sync::Arc;

fn parse(source: &str) -> NodeArena {
    let mut parser = ParserState::new("utils.ets".to_string(), source.to_string());
    parser.parse_source_file();
    parser.into_arena()
}

#[test]
fn test_find_node_at_offset_returns_deepest_node() {
    let source = "class Foo extends Bar {}";
    let arena = parse(source);
    let offset = source.find("Bar").unwrap() as u32 + 1;
    let node = find_node_at_offset(&arena, offset);
    assert!(arena.is_kind(node, SyntaxKind::Identifier as u16));
    assert_eq!(arena.get_identifier_text(node), Some("Bar"));

    let class_idx = arena.find_ancestor(node, |k| k == syntax_kind_ext::CLASS_DECLARATION);
    assert_eq!(arena.get_declaration_name_text(class_idx), Some("Foo"));
}

#[test]
fn test_find_node_at_offset_out_of_range() {
    let source = "let a = 1;";
    let arena = parse(source);
    assert!(find_node_at_offset(&arena, 100).is_none());
    assert!(find_node_at_offset(&NodeArena::new(), 0).is_none());
}

#[test]
fn test_touching_node_accepts_end_offset() {
    let source = "foo;";
    let arena = parse(source);
    // `;` starts at 3, but `foo` ends there
    assert!(arena.is_kind(find_node_at_offset(&arena, 3), syntax_kind_ext::EXPRESSION_STATEMENT));
    let touching = find_touching_node(&arena, 3);
    assert_eq!(arena.get_identifier_text(touching), Some("foo"));
}

#[test]
fn test_containing_list_of_argument() {
    let source = "call(a, b, c);";
    let arena = parse(source);
    let b = find_node_at_offset(&arena, source.find('b').unwrap() as u32);
    let list = get_containing_list(&arena, b).expect("argument list");
    assert_eq!(list.len(), 3);
    assert_eq!(list.position_of(b), Some(1));

    let root = arena.source_file_root();
    assert!(get_containing_list(&arena, root).is_none());
}

#[test]
fn test_containing_list_of_statement() {
    let source = "let a = 1;\nlet b = 2;";
    let arena = parse(source);
    let root = arena.source_file_root();
    let second = arena
        .get_source_file_at(root)
        .and_then(|sf| sf.statements.last())
        .expect("statement");
    let list = get_containing_list(&arena, second).expect("statement list");
    assert_eq!(list.position_of(second), Some(1));
    assert_eq!(child_lists(&arena, NodeIndex::NONE).len(), 0);
}

#[test]
fn test_scan_token_at_skips_trivia() {
    let text: Arc<str> = Arc::from("a  /* c */ , b");
    let token = scan_token_at(&text, 1);
    assert_eq!(token.kind, SyntaxKind::CommaToken);
    assert_eq!(token.pos, 11);
    assert_eq!(token.end, 12);
}
