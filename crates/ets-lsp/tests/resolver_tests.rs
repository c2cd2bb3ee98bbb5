use super::*;
use ets_parser::syntax::find_touching_node;

fn project(files: &[(&str, &str)]) -> Project {
    let mut project = Project::new();
    for (name, text) in files {
        project.set_file(name.to_string(), text.to_string());
    }
    project
}

/// Resolve the identifier at the last occurrence of `needle` in `file_name`.
fn resolve(project: &Project, file_name: &str, needle: &str) -> Option<DeclRef> {
    let file = project.file(file_name).expect("file");
    let pos = file.source_text().rfind(needle).expect("needle") as u32;
    let ident = find_touching_node(file.arena(), pos);
    declaration_from_identifier(project, file, ident)
}

fn decl_text(project: &Project, decl: DeclRef) -> String {
    let file = project.file_by_id(decl.file).expect("file");
    file.arena().get_node_text(decl.node).to_string()
}

#[test]
fn test_resolves_top_level_class_in_same_file() {
    let project = project(&[("a.ets", "class A {}\nclass B extends A {}\n")]);
    let decl = resolve(&project, "a.ets", "A {}").expect("resolved");
    assert_eq!(decl.file, FileId(0));
    assert_eq!(decl_text(&project, decl), "class A {}");
}

#[test]
fn test_resolves_parameter() {
    let project = project(&[("a.ets", "function f(x: number) { return x; }\n")]);
    let decl = resolve(&project, "a.ets", "x;").expect("resolved");
    assert_eq!(project.file("a.ets").and_then(|f| f.arena().kind_of(decl.node)), Some(PARAMETER));
}

#[test]
fn test_inner_block_declaration_shadows_outer() {
    let project = project(&[("a.ets", "let v = 1;\nfunction f() { let v = 2; v; }\n")]);
    let decl = resolve(&project, "a.ets", "v;").expect("resolved");
    assert_eq!(decl_text(&project, decl), "v = 2");
}

#[test]
fn test_resolves_across_files_in_project_order() {
    let project = project(&[
        ("base.ets", "export class Base {}\n"),
        ("other.ets", "export class Base { x = 1; }\n"),
        ("main.ets", "class D extends Base {}\n"),
    ]);
    let decl = resolve(&project, "main.ets", "Base").expect("resolved");
    assert_eq!(decl.file, FileId(0));
}

#[test]
fn test_resolves_renamed_import_to_exported_name() {
    let project = project(&[
        ("shapes.ets", "export interface Shape { area(): number; }\n"),
        ("main.ets", "import { Shape as S } from './shapes';\nclass Square implements S {}\n"),
    ]);
    let decl = resolve(&project, "main.ets", "S {}").expect("resolved");
    assert_eq!(decl.file, FileId(0));
    let file = project.file_by_id(decl.file).expect("file");
    assert_eq!(file.arena().get_declaration_name_text(decl.node), Some("Shape"));
}

#[test]
fn test_unresolved_name_is_none() {
    let project = project(&[("a.ets", "class B extends Missing {}\n")]);
    assert!(resolve(&project, "a.ets", "Missing").is_none());
}

#[test]
fn test_variable_declarations_of_statement() {
    let project = project(&[("a.ets", "let a = 1, b = 2;\n")]);
    let file = project.file("a.ets").expect("file");
    let statement = file.statements().and_then(|s| s.first()).expect("statement");
    let names: Vec<&str> = variable_declarations(file.arena(), statement)
        .into_iter()
        .filter_map(|d| file.arena().get_declaration_name_text(d))
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}
