use super::*;

const DIAMOND: &str = "\
interface IA {}
interface IB extends IA {}
interface IC extends IA {}
interface ID extends IB, IC {}
class A implements ID {}
class B extends A {}
class C extends B {}
";

fn project(text: &str) -> Project {
    let mut project = Project::new();
    project.set_file("a.ets".to_string(), text.to_string());
    project
}

/// Top-level declaration named `name`.
fn decl(project: &Project, name: &str) -> DeclRef {
    all_hierarchy_declarations(project)
        .into_iter()
        .find(|&d| decl_name(project, d) == Some(name))
        .expect("declaration")
}

fn names(project: &Project, decls: Vec<DeclRef>) -> Vec<&str> {
    decls.into_iter().filter_map(|d| decl_name(project, d)).collect()
}

#[test]
fn test_class_super_and_sub_classes() {
    let project = project(DIAMOND);
    assert_eq!(names(&project, get_class_super_classes(&project, decl(&project, "C"))), vec!["B", "A"]);
    assert_eq!(names(&project, get_class_sub_classes(&project, decl(&project, "A"))), vec!["B", "C"]);
    assert!(get_class_super_classes(&project, decl(&project, "A")).is_empty());
}

#[test]
fn test_interface_diamond_visits_shared_base_once() {
    let project = project(DIAMOND);
    assert_eq!(
        names(&project, get_interface_super_interfaces(&project, decl(&project, "ID"))),
        vec!["IB", "IC", "IA"]
    );
    assert_eq!(
        names(&project, get_interface_sub_interfaces(&project, decl(&project, "IA"))),
        vec!["IB", "IC", "ID"]
    );
}

#[test]
fn test_class_implemented_interfaces_through_ancestors() {
    let project = project(DIAMOND);
    assert_eq!(
        names(&project, get_class_implemented_interfaces(&project, decl(&project, "C"))),
        vec!["ID", "IB", "IC", "IA"]
    );
}

#[test]
fn test_interface_implementing_classes_through_sub_interfaces_and_subclasses() {
    let project = project(DIAMOND);
    assert_eq!(
        names(&project, get_interface_implementing_classes(&project, decl(&project, "IA"))),
        vec!["A", "B", "C"]
    );
}

#[test]
fn test_inheritance_cycle_terminates() {
    let project = project("class X extends Y {}\nclass Y extends X {}\n");
    assert_eq!(names(&project, get_class_super_classes(&project, decl(&project, "X"))), vec!["Y"]);
    assert_eq!(names(&project, get_class_sub_classes(&project, decl(&project, "X"))), vec!["Y"]);
}

#[test]
fn test_heritage_lookups_check_declaration_kind() {
    let project = project(DIAMOND);
    let ia = decl(&project, "IA");
    let a = decl(&project, "A");
    assert!(get_effective_base_type_node(&project, ia).is_none());
    assert!(get_effective_implements_type_nodes(&project, ia).is_empty());
    assert!(get_interface_extends_heritage_elements(&project, a).is_empty());
    assert_eq!(
        names(&project, get_effective_implements_type_nodes(&project, a)),
        vec!["ID"]
    );
}

#[test]
fn test_heritage_through_namespace_member() {
    let project = project("namespace shapes {\n    export class Base {}\n}\nclass Square extends shapes.Base {}\n");
    let square = decl(&project, "Square");
    let base = get_effective_base_type_node(&project, square).expect("base class");
    assert_eq!(decl_name(&project, base), Some("Base"));
}

#[test]
fn test_target_declaration_by_position() {
    let text = "class A {\n    m() {}\n}\nlet x = 1;\n";
    let project = project(text);
    let inside = text.find("m()").expect("method") as u32;
    let found = get_target_declaration_node_by_position(&project, "a.ets", inside).expect("class");
    assert_eq!(decl_name(&project, found), Some("A"));
    assert_eq!(decl_name_pos(&project, found), 6);

    let outside = text.find("x =").expect("variable") as u32;
    assert!(get_target_declaration_node_by_position(&project, "a.ets", outside).is_none());
    assert!(get_target_declaration_node_by_position(&project, "a.ets", 10_000).is_none());
    assert!(get_target_declaration_node_by_position(&project, "missing.ets", 0).is_none());
}

#[test]
fn test_declarations_across_files_in_project_order() {
    let mut project = Project::new();
    project.set_file("b.ets".to_string(), "class B extends A {}\n".to_string());
    project.set_file("a.ets".to_string(), "class A {}\ninterface I {}\n".to_string());
    let all = all_hierarchy_declarations(&project);
    assert_eq!(names(&project, all), vec!["B", "A", "I"]);
    let b = decl(&project, "B");
    let a = get_effective_base_type_node(&project, b).expect("base");
    assert_eq!(a.file, project.file("a.ets").expect("a.ets").id());
}
