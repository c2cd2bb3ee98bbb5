//! Type hierarchy queries.
//!
//! For the class or interface at a position this builds two trees:
//! - `super_hierarchies`: base class, implemented interfaces and extended
//!   interfaces, recursively
//! - `sub_hierarchies`: every project declaration that extends or implements
//!   it, recursively
//!
//! Supertype branches each get their own copy of the visited set, so a
//! diamond shows up once per branch. The subtype walk shares one visited set
//! keyed by `{file_name, name, kind, pos}`.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::hierarchy_utils::{
    all_hierarchy_declarations, decl_kind, decl_name, decl_name_pos, get_effective_base_type_node,
    get_effective_implements_type_nodes, get_interface_extends_heritage_elements,
    get_target_declaration_node_by_position, is_class_kind,
};
use crate::project::Project;
use crate::resolver::DeclRef;

use ets_parser::syntax_kind_ext::INTERFACE_DECLARATION;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HierarchyType {
    #[default]
    Others,
    Interface,
    Class,
}

impl HierarchyType {
    fn of_kind(kind: Option<u16>) -> Self {
        match kind {
            Some(k) if is_class_kind(k) => HierarchyType::Class,
            Some(INTERFACE_DECLARATION) => HierarchyType::Interface,
            _ => HierarchyType::Others,
        }
    }
}

/// One node of a super- or sub-type tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHierarchies {
    pub file_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HierarchyType,
    pub pos: u32,
    pub sub_or_super: Vec<TypeHierarchies>,
}

impl TypeHierarchies {
    fn key(&self) -> HierarchyKey {
        HierarchyKey {
            file_name: self.file_name.clone(),
            name: self.name.clone(),
            kind: self.kind,
            pos: self.pos,
        }
    }
}

/// Result of a type hierarchy query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHierarchiesInfo {
    pub file_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HierarchyType,
    pub pos: u32,
    pub super_hierarchies: TypeHierarchies,
    pub sub_hierarchies: TypeHierarchies,
}

/// Identity of a declaration in the visited sets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HierarchyKey {
    pub file_name: String,
    pub name: String,
    pub kind: HierarchyType,
    pub pos: u32,
}

/// Tree node for a declaration, without children.
fn hierarchy_node(project: &Project, decl: DeclRef) -> TypeHierarchies {
    TypeHierarchies {
        file_name: project
            .file_by_id(decl.file)
            .map(|f| f.file_name().to_string())
            .unwrap_or_default(),
        name: decl_name(project, decl).unwrap_or_default().to_string(),
        kind: HierarchyType::of_kind(decl_kind(project, decl)),
        pos: decl_name_pos(project, decl),
        sub_or_super: Vec::new(),
    }
}

/// Direct supertypes in query order: base class, implemented interfaces,
/// extended interfaces.
fn direct_super_types(project: &Project, decl: DeclRef) -> Vec<DeclRef> {
    let mut parents: Vec<DeclRef> = get_effective_base_type_node(project, decl).into_iter().collect();
    parents.extend(get_effective_implements_type_nodes(project, decl));
    parents.extend(get_interface_extends_heritage_elements(project, decl));
    parents
}

/// Fill `out.sub_or_super` with the supertype tree of `decl`.
pub fn get_super_type_hierarchies(
    project: &Project,
    decl: DeclRef,
    out: &mut TypeHierarchies,
    visited: &mut BTreeSet<HierarchyKey>,
) {
    visited.insert(hierarchy_node(project, decl).key());
    for parent in direct_super_types(project, decl) {
        let mut child = hierarchy_node(project, parent);
        if visited.contains(&child.key()) {
            continue;
        }
        let mut branch_visited = visited.clone();
        get_super_type_hierarchies(project, parent, &mut child, &mut branch_visited);
        out.sub_or_super.push(child);
    }
}

/// Whether `candidate` directly extends or implements the declaration
/// described by `node`.
pub fn is_child_node(project: &Project, candidate: DeclRef, node: &TypeHierarchies) -> bool {
    direct_super_types(project, candidate).into_iter().any(|parent| {
        parent_matches(project, parent, node)
    })
}

fn parent_matches(project: &Project, parent: DeclRef, node: &TypeHierarchies) -> bool {
    decl_name(project, parent) == Some(node.name.as_str())
        && decl_name_pos(project, parent) == node.pos
        && project
            .file_by_id(parent.file)
            .is_some_and(|f| f.file_name() == node.file_name)
}

/// Fill `out.sub_or_super` with the subtype tree of `decl`.
pub fn get_sub_type_hierarchies(
    project: &Project,
    decl: DeclRef,
    out: &mut TypeHierarchies,
    visited: &mut BTreeSet<HierarchyKey>,
) {
    let node = hierarchy_node(project, decl);
    visited.insert(node.key());
    for candidate in all_hierarchy_declarations(project) {
        if !is_child_node(project, candidate, &node) {
            continue;
        }
        let mut child = hierarchy_node(project, candidate);
        if !visited.insert(child.key()) {
            continue;
        }
        get_sub_type_hierarchies(project, candidate, &mut child, visited);
        out.sub_or_super.push(child);
    }
}

/// Super and sub hierarchies of the class or interface at `pos`.
///
/// Returns the default (empty) info when `pos` is not inside a class or
/// interface declaration.
pub fn get_type_hierarchies_impl(project: &Project, file_name: &str, pos: u32) -> TypeHierarchiesInfo {
    let Some(decl) = get_target_declaration_node_by_position(project, file_name, pos) else {
        return TypeHierarchiesInfo::default();
    };
    let root = hierarchy_node(project, decl);

    let mut super_hierarchies = root.clone();
    get_super_type_hierarchies(project, decl, &mut super_hierarchies, &mut BTreeSet::new());

    let mut sub_hierarchies = root.clone();
    get_sub_type_hierarchies(project, decl, &mut sub_hierarchies, &mut BTreeSet::new());

    debug!(
        name = %root.name,
        supers = super_hierarchies.sub_or_super.len(),
        subs = sub_hierarchies.sub_or_super.len(),
        "type hierarchy"
    );

    TypeHierarchiesInfo {
        file_name: root.file_name,
        name: root.name,
        kind: root.kind,
        pos: root.pos,
        super_hierarchies,
        sub_hierarchies,
    }
}

#[cfg(test)]
#[path = "../tests/type_hierarchy_tests.rs"]
mod type_hierarchy_tests;
