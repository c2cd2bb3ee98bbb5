use crate::parser::node_flags;
use crate::parser::state::ParserState;
use crate::parser::syntax_kind_ext;
use crate::parser::{NodeArena, NodeIndex};
use ets_scanner::SyntaxKind;

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ets".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    arena
        .get_source_file_at(root)
        .map(|sf| sf.statements.iter().collect())
        .unwrap_or_default()
}

fn member_names(arena: &NodeArena, decl: NodeIndex) -> Vec<String> {
    arena
        .get_members(decl)
        .map(|members| {
            members
                .iter()
                .map(|m| arena.get_declaration_name_text(m).unwrap_or("").to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_class_with_heritage_and_members() {
    let source = "class Dog extends Animal implements Pet, Named {\n    name: string = \"rex\";\n    constructor() { super(); }\n    bark(times: number): void {}\n    get age() { return 1; }\n    static create() { return new Dog(); }\n}\n";
    let (parser, root) = parse(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();

    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 1);
    let class_idx = stmts[0];
    assert!(arena.is_kind(class_idx, syntax_kind_ext::CLASS_DECLARATION));
    assert_eq!(arena.get_declaration_name_text(class_idx), Some("Dog"));

    let clauses = arena.get_heritage_clauses(class_idx).expect("heritage clauses");
    assert_eq!(clauses.len(), 2);
    let implements = arena
        .get(clauses.nodes[1])
        .and_then(|n| arena.get_heritage_clause(n))
        .expect("implements clause");
    assert_eq!(implements.token, SyntaxKind::ImplementsKeyword as u16);
    assert_eq!(implements.types.len(), 2);

    let kinds: Vec<u16> = arena
        .get_members(class_idx)
        .expect("members")
        .iter()
        .filter_map(|m| arena.kind_of(m))
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::CONSTRUCTOR,
            syntax_kind_ext::METHOD_DECLARATION,
            syntax_kind_ext::GET_ACCESSOR,
            syntax_kind_ext::METHOD_DECLARATION,
        ]
    );
    assert_eq!(member_names(arena, class_idx), vec!["name", "", "bark", "age", "create"]);

    let create = arena.get_members(class_idx).and_then(|m| m.last()).expect("create");
    assert!(arena.has_modifier(create, SyntaxKind::StaticKeyword));
}

#[test]
fn test_node_positions_exclude_leading_trivia() {
    let source = "// header\nconst x = 1;\n\n/** doc */\nfunction f() {}\n";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 2);

    let var_stmt = arena.get(stmts[0]).expect("variable statement");
    assert_eq!(var_stmt.pos, source.find("const").unwrap() as u32);
    assert_eq!(var_stmt.end, source.find(";").unwrap() as u32 + 1);
    assert_eq!(arena.full_start_of(stmts[0]), 0);

    let func = arena.get(stmts[1]).expect("function");
    assert_eq!(func.pos, source.find("function").unwrap() as u32);
    assert_eq!(func.end, source.rfind('}').unwrap() as u32 + 1);
    // trivia of the function starts right after the previous `;`
    assert_eq!(arena.full_start_of(stmts[1]), var_stmt.end);
}

#[test]
fn test_variable_declaration_list_flags() {
    let source = "let a = 1, b: string;\nconst c = 2;\nvar d;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 3);

    let list_of = |stmt: NodeIndex| {
        let node = arena.get(stmt).expect("statement");
        arena.get_variable(node).and_then(|v| v.declarations.first()).expect("list")
    };
    let flags = |idx: NodeIndex| arena.get(idx).map(|n| n.flags).unwrap_or(0);

    let let_list = list_of(stmts[0]);
    assert_ne!(flags(let_list) & node_flags::LET, 0);
    let declarators = arena
        .get(let_list)
        .and_then(|n| arena.get_variable(n))
        .map(|v| v.declarations.len());
    assert_eq!(declarators, Some(2));

    assert_ne!(flags(list_of(stmts[1])) & node_flags::CONST, 0);
    assert_eq!(flags(list_of(stmts[2])) & (node_flags::LET | node_flags::CONST), 0);
}

#[test]
fn test_interface_members_include_separator() {
    let source = "interface Shape extends Base {\n    area(): number;\n    name?: string,\n    sides: number\n}";
    let (parser, root) = parse(source);
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let iface = statements(arena, root)[0];
    assert!(arena.is_kind(iface, syntax_kind_ext::INTERFACE_DECLARATION));
    assert_eq!(member_names(arena, iface), vec!["area", "name", "sides"]);

    let members = arena.get_members(iface).expect("members");
    let area = arena.get(members.nodes[0]).expect("area");
    assert_eq!(area.kind, syntax_kind_ext::METHOD_SIGNATURE);
    assert_eq!(&source[area.pos as usize..area.end as usize], "area(): number;");
    let name = arena.get(members.nodes[1]).expect("name");
    assert_eq!(&source[name.pos as usize..name.end as usize], "name?: string,");
}

#[test]
fn test_import_and_export_declarations() {
    let source = "import Default, { a, b as c, type T } from \"./mod\";\nimport * as ns from \"./ns\";\nexport { a, c as d };\nexport default foo;\n";
    let (parser, root) = parse(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    let kinds: Vec<u16> = stmts.iter().filter_map(|&s| arena.kind_of(s)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::IMPORT_DECLARATION,
            syntax_kind_ext::IMPORT_DECLARATION,
            syntax_kind_ext::EXPORT_DECLARATION,
            syntax_kind_ext::EXPORT_ASSIGNMENT,
        ]
    );

    let import = arena
        .get(stmts[0])
        .and_then(|n| arena.get_import_decl(n))
        .expect("import");
    let clause = arena
        .get(import.import_clause)
        .and_then(|n| arena.get_import_clause(n))
        .expect("clause");
    assert_eq!(arena.get_identifier_text(clause.name), Some("Default"));
    let named = arena
        .get(clause.named_bindings)
        .and_then(|n| arena.get_named_imports(n))
        .expect("named imports");
    let names: Vec<&str> = named
        .elements
        .iter()
        .filter_map(|s| arena.get_declaration_name_text(s))
        .collect();
    assert_eq!(names, vec!["a", "c", "T"]);
    let type_only = arena
        .get(named.elements.nodes[2])
        .and_then(|n| arena.get_specifier(n))
        .is_some_and(|s| s.is_type_only);
    assert!(type_only);
}

#[test]
fn test_struct_and_decorators() {
    let source = "@Entry\n@Component\nstruct Index {\n    @State message: string = 'Hello';\n    build() {}\n}";
    let (parser, root) = parse(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let decl = statements(arena, root)[0];
    assert!(arena.is_kind(decl, syntax_kind_ext::STRUCT_DECLARATION));
    assert_eq!(arena.get_declaration_name_text(decl), Some("Index"));
    assert_eq!(arena.get_modifiers(decl).map(|m| m.len()), Some(2));
    assert_eq!(member_names(arena, decl), vec!["message", "build"]);
}

#[test]
fn test_export_modifier_and_namespace() {
    let source = "export abstract class Base {}\nnamespace NS {\n    export interface I {}\n}\ndeclare const enum E { A = 1, B }";
    let (parser, root) = parse(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 3);
    assert!(arena.has_modifier(stmts[0], SyntaxKind::ExportKeyword));
    assert!(arena.has_modifier(stmts[0], SyntaxKind::AbstractKeyword));
    assert!(arena.is_kind(stmts[1], syntax_kind_ext::MODULE_DECLARATION));
    assert!(arena.is_kind(stmts[2], syntax_kind_ext::ENUM_DECLARATION));
    assert!(arena.has_modifier(stmts[2], SyntaxKind::ConstKeyword));
    assert_eq!(member_names(arena, stmts[2]), vec!["A", "B"]);
}

#[test]
fn test_parent_links() {
    let source = "class A { m() { return this.x; } }";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let class_idx = statements(arena, root)[0];
    let method = arena.get_members(class_idx).and_then(|m| m.first()).expect("method");
    assert_eq!(arena.parent_of(method), class_idx);
    assert_eq!(arena.parent_of(class_idx), root);
    let ancestors: Vec<NodeIndex> = arena.ancestors(method).collect();
    assert_eq!(ancestors, vec![class_idx, root]);
}

#[test]
fn test_recovers_from_missing_tokens() {
    let source = "class A {\n    x: number\n    y = ;\n}\nlet ok = 1;";
    let (parser, root) = parse(source);
    assert!(!parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(stmts.len(), 2);
    assert!(arena.is_kind(stmts[1], syntax_kind_ext::VARIABLE_STATEMENT));
}

#[test]
fn test_semicolon_in_object_literal_is_reported() {
    let source = "const o = { a: 1; b: 2 };";
    let (parser, root) = parse(source);
    let diags = parser.get_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, 1005);
    assert_eq!(diags[0].start, source.find(';').unwrap() as u32);

    let arena = parser.get_arena();
    let object = arena
        .nodes
        .iter()
        .position(|n| n.kind == syntax_kind_ext::OBJECT_LITERAL_EXPRESSION)
        .map(|i| NodeIndex(i as u32))
        .expect("object literal");
    assert_eq!(arena.get_members(object).map(|m| m.len()), Some(2));
    assert_eq!(statements(arena, root).len(), 1);
}

#[test]
fn test_parse_diagnostics_serialize() {
    let (parser, _root) = parse("let = 1;");
    let json = serde_json::to_value(parser.get_diagnostics()).expect("serialize");
    assert_eq!(json[0]["code"], 1003);
    assert_eq!(json[0]["start"], 4);
    let diag = parser.get_diagnostics()[0].to_diagnostic(parser.file_name());
    assert_eq!(diag.file, "test.ets");
}
