use crate::parser::state::ParserState;
use crate::parser::syntax_kind_ext;
use crate::parser::{NodeArena, NodeIndex};
use ets_scanner::SyntaxKind;

/// Parse `source` as a single expression statement and return its expression.
fn parse_expression(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("expr.ets".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let stmt = arena
        .get_source_file_at(root)
        .and_then(|sf| sf.statements.first())
        .expect("statement");
    let expr = arena
        .get(stmt)
        .and_then(|n| arena.get_expr_statement(n))
        .map(|s| s.expression)
        .expect("expression statement");
    (arena, expr)
}

fn text(arena: &NodeArena, idx: NodeIndex) -> String {
    arena.get_node_text(idx).to_string()
}

#[test]
fn test_binary_precedence() {
    let (arena, expr) = parse_expression("a + b * c === d || e;");
    let top = arena.get(expr).and_then(|n| arena.get_binary_expr(n)).expect("binary");
    assert_eq!(top.operator_token, SyntaxKind::BarBarToken as u16);
    let eq = arena.get(top.left).and_then(|n| arena.get_binary_expr(n)).expect("===");
    assert_eq!(eq.operator_token, SyntaxKind::EqualsEqualsEqualsToken as u16);
    let add = arena.get(eq.left).and_then(|n| arena.get_binary_expr(n)).expect("+");
    assert_eq!(add.operator_token, SyntaxKind::PlusToken as u16);
    assert_eq!(text(&arena, add.right), "b * c");
}

#[test]
fn test_assignment_is_right_associative() {
    let (arena, expr) = parse_expression("a = b = c;");
    let outer = arena.get(expr).and_then(|n| arena.get_binary_expr(n)).expect("outer");
    assert_eq!(text(&arena, outer.left), "a");
    assert_eq!(text(&arena, outer.right), "b = c");
}

#[test]
fn test_call_member_chain_and_non_null() {
    let (arena, expr) = parse_expression("this.items[0]!.render(x, ...rest);");
    let node = arena.get(expr).expect("call");
    assert_eq!(node.kind, syntax_kind_ext::CALL_EXPRESSION);
    let call = arena.get_call_expr(node).expect("call data");
    assert_eq!(call.arguments.as_ref().map(|a| a.len()), Some(2));
    let callee = arena.get(call.expression).expect("callee");
    assert_eq!(callee.kind, syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION);
    let access = arena.get_access_expr(callee).expect("access");
    assert!(arena.is_kind(access.expression, syntax_kind_ext::NON_NULL_EXPRESSION));
    let spread = call.arguments.as_ref().and_then(|a| a.last()).expect("spread");
    assert!(arena.is_kind(spread, syntax_kind_ext::SPREAD_ELEMENT));
}

#[test]
fn test_less_than_is_not_type_arguments() {
    let (arena, expr) = parse_expression("a < b;");
    assert!(arena.is_kind(expr, syntax_kind_ext::BINARY_EXPRESSION));

    let (arena, expr) = parse_expression("make<string>(1);");
    let call = arena.get(expr).and_then(|n| arena.get_call_expr(n)).expect("call");
    assert_eq!(call.type_arguments.as_ref().map(|t| t.len()), Some(1));
}

#[test]
fn test_arrow_functions() {
    let (arena, expr) = parse_expression("(a: number, b) => a + b;");
    let arrow = arena.get(expr).expect("arrow");
    assert_eq!(arrow.kind, syntax_kind_ext::ARROW_FUNCTION);
    let data = arena.get_function(arrow).expect("function data");
    assert_eq!(data.parameters.len(), 2);
    assert!(data.equals_greater_than_token);

    let (arena, expr) = parse_expression("async x => { await x; };");
    let data = arena.get(expr).and_then(|n| arena.get_function(n)).expect("async arrow");
    assert!(data.is_async);
    assert!(arena.is_kind(data.body, syntax_kind_ext::BLOCK));

    let (arena, expr) = parse_expression("(a + b) * c;");
    assert!(arena.is_kind(expr, syntax_kind_ext::BINARY_EXPRESSION));
}

#[test]
fn test_object_literal_elements_and_multi_line() {
    let source = "({\n    a: 1,\n    b,\n    ...rest,\n    m() {},\n    get g() { return 1; },\n});";
    let (arena, expr) = parse_expression(source);
    let inner = arena
        .get(expr)
        .and_then(|n| arena.get_parenthesized(n))
        .map(|p| p.expression)
        .expect("parenthesized");
    let node = arena.get(inner).expect("object");
    let literal = arena.get_literal_expr(node).expect("literal");
    assert!(literal.multi_line);
    assert!(literal.elements.has_trailing_comma);
    let kinds: Vec<u16> = literal.elements.iter().filter_map(|e| arena.kind_of(e)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::PROPERTY_ASSIGNMENT,
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            syntax_kind_ext::SPREAD_ASSIGNMENT,
            syntax_kind_ext::METHOD_DECLARATION,
            syntax_kind_ext::GET_ACCESSOR,
        ]
    );

    let (arena, expr) = parse_expression("({ a: 1 });");
    let inner = arena
        .get(expr)
        .and_then(|n| arena.get_parenthesized(n))
        .map(|p| p.expression)
        .expect("parenthesized");
    let single = arena.get(inner).and_then(|n| arena.get_literal_expr(n)).expect("object");
    assert!(!single.multi_line);
}

#[test]
fn test_nan_comparison_shape() {
    let (arena, expr) = parse_expression("x !== NaN;");
    let binary = arena.get(expr).and_then(|n| arena.get_binary_expr(n)).expect("binary");
    assert_eq!(binary.operator_token, SyntaxKind::ExclamationEqualsEqualsToken as u16);
    assert_eq!(arena.get_identifier_text(binary.right), Some("NaN"));
}

#[test]
fn test_type_annotations() {
    let source = "let v: Array<Map<string, number>> | string[] | { a: 1 } | (() => void);";
    let mut parser = ParserState::new("types.ets".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let union = arena
        .nodes
        .iter()
        .position(|n| n.kind == syntax_kind_ext::UNION_TYPE)
        .map(|i| NodeIndex(i as u32))
        .expect("union");
    let types = arena
        .get(union)
        .and_then(|n| arena.get_composite_type(n))
        .map(|c| c.types.len());
    assert_eq!(types, Some(4));
    assert!(arena.get_source_file_at(root).is_some());
}
