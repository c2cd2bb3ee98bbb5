//! Heritage lookups and frontier traversals shared by the class and type
//! hierarchy queries.
//!
//! Declarations are addressed by `DeclRef` so that a declaration reached
//! through different files or paths is recognized as the same one.

use ets_parser::syntax::find_touching_node;
use ets_parser::syntax_kind_ext::*;
use ets_parser::{Node, NodeIndex};
use ets_scanner::SyntaxKind;
use rustc_hash::FxHashSet;

use crate::project::{Project, ProjectFile};
use crate::resolver::{DeclRef, declaration_from_identifier, find_in_statements};

pub(crate) fn is_class_kind(kind: u16) -> bool {
    matches!(kind, CLASS_DECLARATION | STRUCT_DECLARATION)
}

pub(crate) fn is_hierarchy_decl_kind(kind: u16) -> bool {
    is_class_kind(kind) || kind == INTERFACE_DECLARATION
}

/// File and node behind a `DeclRef`.
pub(crate) fn decl_node(project: &Project, decl: DeclRef) -> Option<(&ProjectFile, &Node)> {
    let file = project.file_by_id(decl.file)?;
    let node = file.arena().get(decl.node)?;
    Some((file, node))
}

pub(crate) fn decl_kind(project: &Project, decl: DeclRef) -> Option<u16> {
    decl_node(project, decl).map(|(_, node)| node.kind)
}

/// Declared name of a class or interface.
pub(crate) fn decl_name(project: &Project, decl: DeclRef) -> Option<&str> {
    let file = project.file_by_id(decl.file)?;
    file.arena().get_declaration_name_text(decl.node)
}

/// Offset reported for a declaration: the start of its name.
pub(crate) fn decl_name_pos(project: &Project, decl: DeclRef) -> u32 {
    let Some((file, node)) = decl_node(project, decl) else {
        return 0;
    };
    let name = file.arena().get_declaration_name(decl.node);
    file.arena().get(name).map_or(node.pos, |n| n.pos)
}

/// The class, struct or interface declaration enclosing the token at `pos`.
pub fn get_target_declaration_node_by_position(project: &Project, file_name: &str, pos: u32) -> Option<DeclRef> {
    let file = project.file(file_name)?;
    let arena = file.arena();
    let touching = find_touching_node(arena, pos);
    if touching.is_none() {
        return None;
    }
    let decl = arena.find_ancestor(touching, is_hierarchy_decl_kind);
    decl.is_some().then(|| DeclRef::new(file.id(), decl))
}

/// Resolve a heritage entry (`Base`, `ns.Base<T>`) to its declaration.
pub(crate) fn resolve_heritage_type(project: &Project, file: &ProjectFile, expr_with_type_args: NodeIndex) -> Option<DeclRef> {
    let arena = file.arena();
    let data = arena.get(expr_with_type_args).and_then(|n| arena.get_expr_type_args(n))?;
    resolve_entity_name(project, file, data.expression)
}

fn resolve_entity_name(project: &Project, file: &ProjectFile, expr: NodeIndex) -> Option<DeclRef> {
    let arena = file.arena();
    let node = arena.get(expr)?;
    if node.kind == SyntaxKind::Identifier as u16 {
        return declaration_from_identifier(project, file, expr);
    }
    let access = arena.get_access_expr(node)?;
    let namespace = resolve_entity_name(project, file, access.expression)?;
    let (ns_file, ns_node) = decl_node(project, namespace)?;
    let ns_arena = ns_file.arena();
    let body = ns_arena.get_module(ns_node)?.body;
    let block = ns_arena.get(body).and_then(|n| ns_arena.get_module_block(n))?;
    let member = arena.get_name_text(access.name_or_argument)?;
    find_in_statements(ns_arena, &block.statements, member).map(|node| DeclRef::new(namespace.file, node))
}

/// Resolved heritage entries of `decl` introduced by `keyword`, in
/// declaration order, keeping only declarations accepted by `accept`.
fn heritage_targets(project: &Project, decl: DeclRef, keyword: SyntaxKind, accept: fn(u16) -> bool) -> Vec<DeclRef> {
    let Some(file) = project.file_by_id(decl.file) else {
        return Vec::new();
    };
    let arena = file.arena();
    let Some(clauses) = arena.get_heritage_clauses(decl.node) else {
        return Vec::new();
    };
    clauses
        .iter()
        .filter_map(|clause| arena.get(clause).and_then(|n| arena.get_heritage_clause(n)))
        .filter(|clause| clause.token == keyword as u16)
        .flat_map(|clause| clause.types.iter())
        .filter_map(|ty| resolve_heritage_type(project, file, ty))
        .filter(|target| decl_kind(project, *target).is_some_and(accept))
        .collect()
}

/// Superclass declaration of a class (its `extends` entry), if resolvable.
pub fn get_effective_base_type_node(project: &Project, decl: DeclRef) -> Option<DeclRef> {
    if !decl_kind(project, decl).is_some_and(is_class_kind) {
        return None;
    }
    heritage_targets(project, decl, SyntaxKind::ExtendsKeyword, is_class_kind)
        .into_iter()
        .next()
}

/// Interfaces named in a class's `implements` clause.
pub fn get_effective_implements_type_nodes(project: &Project, decl: DeclRef) -> Vec<DeclRef> {
    if !decl_kind(project, decl).is_some_and(is_class_kind) {
        return Vec::new();
    }
    heritage_targets(project, decl, SyntaxKind::ImplementsKeyword, |k| k == INTERFACE_DECLARATION)
}

/// Interfaces named in an interface's `extends` clause.
pub fn get_interface_extends_heritage_elements(project: &Project, decl: DeclRef) -> Vec<DeclRef> {
    if decl_kind(project, decl) != Some(INTERFACE_DECLARATION) {
        return Vec::new();
    }
    heritage_targets(project, decl, SyntaxKind::ExtendsKeyword, |k| k == INTERFACE_DECLARATION)
}

/// Top-level classes, structs and interfaces of every file, in project order.
pub(crate) fn all_hierarchy_declarations(project: &Project) -> Vec<DeclRef> {
    let mut out = Vec::new();
    for file in project.files() {
        let Some(statements) = file.statements() else {
            continue;
        };
        out.extend(
            statements
                .iter()
                .filter(|&s| file.arena().kind_of(s).is_some_and(is_hierarchy_decl_kind))
                .map(|s| DeclRef::new(file.id(), s)),
        );
    }
    out
}

fn direct_sub_classes(project: &Project, decl: DeclRef) -> Vec<DeclRef> {
    all_hierarchy_declarations(project)
        .into_iter()
        .filter(|&candidate| get_effective_base_type_node(project, candidate) == Some(decl))
        .collect()
}

fn direct_sub_interfaces(project: &Project, decl: DeclRef) -> Vec<DeclRef> {
    all_hierarchy_declarations(project)
        .into_iter()
        .filter(|&candidate| get_interface_extends_heritage_elements(project, candidate).contains(&decl))
        .collect()
}

fn direct_implementing_classes(project: &Project, decl: DeclRef) -> Vec<DeclRef> {
    all_hierarchy_declarations(project)
        .into_iter()
        .filter(|&candidate| get_effective_implements_type_nodes(project, candidate).contains(&decl))
        .collect()
}

/// Accumulated traversal result with a "gotten" set for each frontier.
#[derive(Default)]
struct Frontier {
    result: Vec<DeclRef>,
    seen: FxHashSet<DeclRef>,
    gotten: FxHashSet<DeclRef>,
}

impl Frontier {
    fn add(&mut self, decl: DeclRef, next: &mut Vec<DeclRef>) {
        if self.seen.insert(decl) {
            self.result.push(decl);
            next.push(decl);
        }
    }

    /// Expand each not-yet-expanded member of `frontier` with `step`.
    fn expand(&mut self, frontier: &[DeclRef], mut step: impl FnMut(DeclRef) -> Vec<DeclRef>) -> Vec<DeclRef> {
        let mut next = Vec::new();
        for &decl in frontier {
            if !self.gotten.insert(decl) {
                continue;
            }
            for found in step(decl) {
                self.add(found, &mut next);
            }
        }
        next
    }
}

fn single_frontier(start: DeclRef, mut step: impl FnMut(DeclRef) -> Vec<DeclRef>) -> Vec<DeclRef> {
    let mut traversal = Frontier::default();
    traversal.seen.insert(start);
    let mut frontier = vec![start];
    while !frontier.is_empty() {
        frontier = traversal.expand(&frontier, &mut step);
    }
    traversal.result
}

/// All ancestors of a class, nearest first.
pub fn get_class_super_classes(project: &Project, class: DeclRef) -> Vec<DeclRef> {
    single_frontier(class, |c| get_effective_base_type_node(project, c).into_iter().collect())
}

/// All descendants of a class, breadth first.
pub fn get_class_sub_classes(project: &Project, class: DeclRef) -> Vec<DeclRef> {
    single_frontier(class, |c| direct_sub_classes(project, c))
}

/// All interfaces a class implements, directly, through its ancestors, or
/// through interface inheritance.
pub fn get_class_implemented_interfaces(project: &Project, class: DeclRef) -> Vec<DeclRef> {
    let mut classes = Frontier::default();
    let mut interfaces = Frontier::default();
    classes.seen.insert(class);
    let mut class_frontier = vec![class];
    let mut interface_frontier = Vec::new();
    while !class_frontier.is_empty() || !interface_frontier.is_empty() {
        let mut found_interfaces = Vec::new();
        let next_classes = classes.expand(&class_frontier, |c| {
            found_interfaces.extend(get_effective_implements_type_nodes(project, c));
            get_effective_base_type_node(project, c).into_iter().collect()
        });
        let mut next_interfaces =
            interfaces.expand(&interface_frontier, |i| get_interface_extends_heritage_elements(project, i));
        for iface in found_interfaces {
            interfaces.add(iface, &mut next_interfaces);
        }
        class_frontier = next_classes;
        interface_frontier = next_interfaces;
    }
    interfaces.result
}

/// All interfaces an interface extends, transitively.
pub fn get_interface_super_interfaces(project: &Project, iface: DeclRef) -> Vec<DeclRef> {
    single_frontier(iface, |i| get_interface_extends_heritage_elements(project, i))
}

/// All interfaces that extend an interface, transitively.
pub fn get_interface_sub_interfaces(project: &Project, iface: DeclRef) -> Vec<DeclRef> {
    single_frontier(iface, |i| direct_sub_interfaces(project, i))
}

/// All classes implementing an interface: directly, through a
/// sub-interface, or by inheriting from an implementing class.
pub fn get_interface_implementing_classes(project: &Project, iface: DeclRef) -> Vec<DeclRef> {
    let mut interfaces = Frontier::default();
    let mut classes = Frontier::default();
    interfaces.seen.insert(iface);
    let mut interface_frontier = vec![iface];
    let mut class_frontier = Vec::new();
    while !class_frontier.is_empty() || !interface_frontier.is_empty() {
        let mut found_classes = Vec::new();
        let next_interfaces = interfaces.expand(&interface_frontier, |i| {
            found_classes.extend(direct_implementing_classes(project, i));
            direct_sub_interfaces(project, i)
        });
        let mut next_classes = classes.expand(&class_frontier, |c| direct_sub_classes(project, c));
        for class in found_classes {
            classes.add(class, &mut next_classes);
        }
        interface_frontier = next_interfaces;
        class_frontier = next_classes;
    }
    classes.result
}

#[cfg(test)]
#[path = "../tests/hierarchy_utils_tests.rs"]
mod hierarchy_utils_tests;
