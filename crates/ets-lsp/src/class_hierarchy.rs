//! Class hierarchy queries.
//!
//! For the class or interface at a position, report every related
//! declaration (ancestors, implemented interfaces, descendants) together
//! with the member pairs through which they relate. Members match by name
//! only.

use ets_parser::NodeIndex;
use ets_parser::syntax_kind_ext::*;
use ets_scanner::SyntaxKind;
use serde::Serialize;
use tracing::debug;

use crate::hierarchy_utils::{
    decl_kind, decl_name, decl_name_pos, get_class_implemented_interfaces, get_class_sub_classes,
    get_class_super_classes, get_interface_implementing_classes, get_interface_sub_interfaces,
    get_interface_super_interfaces, get_target_declaration_node_by_position, is_class_kind,
};
use crate::project::Project;
use crate::resolver::DeclRef;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ClassRelationKind {
    #[default]
    Unknown,
    Interface,
    Class,
    Field,
    Method,
    Property,
}

/// A declaration or member somewhere in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRelationDetails {
    pub file_name: String,
    pub pos: u32,
    pub kind: ClassRelationKind,
}

/// One declaration related to the queried class or interface.
///
/// The member lists hold both sides of each matched pair: for an ancestor,
/// `overridden` has the ancestor's members and `overriding` the queried
/// declaration's; for a descendant the sides swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassHierarchyItemInfo {
    pub pos: u32,
    pub kind: ClassRelationKind,
    /// Declaration name.
    pub description: String,
    pub overridden: Vec<ClassRelationDetails>,
    pub overriding: Vec<ClassRelationDetails>,
    pub implemented: Vec<ClassRelationDetails>,
    pub implementing: Vec<ClassRelationDetails>,
}

impl ClassHierarchyItemInfo {
    fn for_declaration(project: &Project, decl: DeclRef) -> Self {
        let kind = match decl_kind(project, decl) {
            Some(kind) if is_class_kind(kind) => ClassRelationKind::Class,
            Some(INTERFACE_DECLARATION) => ClassRelationKind::Interface,
            _ => ClassRelationKind::Unknown,
        };
        Self {
            pos: decl_name_pos(project, decl),
            kind,
            description: decl_name(project, decl).unwrap_or_default().to_string(),
            overridden: Vec::new(),
            overriding: Vec::new(),
            implemented: Vec::new(),
            implementing: Vec::new(),
        }
    }
}

struct Member {
    name: String,
    details: ClassRelationDetails,
}

/// Public, non-static members that take part in overriding: properties,
/// methods and accessors of classes, signatures of interfaces.
fn eligible_members(project: &Project, decl: DeclRef) -> Vec<Member> {
    let Some(file) = project.file_by_id(decl.file) else {
        return Vec::new();
    };
    let arena = file.arena();
    let Some(members) = arena.get_members(decl.node) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for member in members.iter() {
        let Some(kind) = arena.kind_of(member) else {
            continue;
        };
        let relation = match kind {
            PROPERTY_DECLARATION => ClassRelationKind::Field,
            METHOD_DECLARATION | METHOD_SIGNATURE => ClassRelationKind::Method,
            GET_ACCESSOR | SET_ACCESSOR | PROPERTY_SIGNATURE => ClassRelationKind::Property,
            _ => continue,
        };
        if is_excluded_member(project, decl, member) {
            continue;
        }
        let name = arena.get_declaration_name(member);
        let (Some(name_text), Some(name_node)) = (arena.get_name_text(name), arena.get(name)) else {
            continue;
        };
        out.push(Member {
            name: name_text.to_string(),
            details: ClassRelationDetails {
                file_name: file.file_name().to_string(),
                pos: name_node.pos,
                kind: relation,
            },
        });
    }
    out
}

fn is_excluded_member(project: &Project, decl: DeclRef, member: NodeIndex) -> bool {
    let Some(file) = project.file_by_id(decl.file) else {
        return true;
    };
    let arena = file.arena();
    arena.has_modifier(member, SyntaxKind::StaticKeyword)
        || arena.has_modifier(member, SyntaxKind::PrivateKeyword)
        || arena.has_modifier(member, SyntaxKind::ProtectedKeyword)
        || arena.is_kind(arena.get_declaration_name(member), SyntaxKind::PrivateIdentifier as u16)
}

#[derive(Clone, Copy)]
enum Relation {
    Override,
    Implement,
}

/// Record every name match between `upper` members and the `lower` members
/// that override or implement them.
fn relate(item: &mut ClassHierarchyItemInfo, lower: &[Member], upper: &[Member], relation: Relation) {
    for low in lower {
        for high in upper.iter().filter(|high| high.name == low.name) {
            let (upper_list, lower_list) = match relation {
                Relation::Override => (&mut item.overridden, &mut item.overriding),
                Relation::Implement => (&mut item.implemented, &mut item.implementing),
            };
            upper_list.push(high.details.clone());
            lower_list.push(low.details.clone());
        }
    }
}

/// Declarations related to the class or interface at `pos`, in the order
/// ancestors, implemented interfaces, descendants (for interfaces:
/// super-interfaces, sub-interfaces, implementing classes).
pub fn get_class_hierarchies_impl(project: &Project, file_name: &str, pos: u32) -> Vec<ClassHierarchyItemInfo> {
    let Some(decl) = get_target_declaration_node_by_position(project, file_name, pos) else {
        return Vec::new();
    };
    let current = eligible_members(project, decl);
    let mut items = Vec::new();
    let mut add = |related: Vec<DeclRef>, relation: Relation, current_is_lower: bool| {
        for other in related {
            let mut item = ClassHierarchyItemInfo::for_declaration(project, other);
            let members = eligible_members(project, other);
            if current_is_lower {
                relate(&mut item, &current, &members, relation);
            } else {
                relate(&mut item, &members, &current, relation);
            }
            items.push(item);
        }
    };

    if decl_kind(project, decl).is_some_and(is_class_kind) {
        add(get_class_super_classes(project, decl), Relation::Override, true);
        add(get_class_implemented_interfaces(project, decl), Relation::Implement, true);
        add(get_class_sub_classes(project, decl), Relation::Override, false);
    } else {
        add(get_interface_super_interfaces(project, decl), Relation::Override, true);
        add(get_interface_sub_interfaces(project, decl), Relation::Override, false);
        add(get_interface_implementing_classes(project, decl), Relation::Implement, false);
    }

    debug!(file = file_name, pos, items = items.len(), "class hierarchy");
    items
}

#[cfg(test)]
#[path = "../tests/class_hierarchy_tests.rs"]
mod class_hierarchy_tests;
