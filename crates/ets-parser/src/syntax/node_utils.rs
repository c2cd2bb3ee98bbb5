//! Position lookups over the thin-node tree.
//!
//! Nodes store `pos` at the first token (trivia excluded) and `end` after the
//! last token, so a lookup descends through children whose `[pos, end)`
//! covers the offset.

use crate::parser::{NodeArena, NodeIndex, NodeList, syntax_kind_ext::*};
use ets_scanner::{ScannerState, SyntaxKind};
use std::sync::Arc;

/// Deepest node whose `[pos, end)` contains `offset`.
///
/// Returns `NodeIndex::NONE` when the arena has no source file or the offset
/// is past the end of the text.
pub fn find_node_at_offset(arena: &NodeArena, offset: u32) -> NodeIndex {
    let root = arena.source_file_root();
    let Some(root_node) = arena.get(root) else {
        return NodeIndex::NONE;
    };
    if offset >= root_node.end {
        return NodeIndex::NONE;
    }
    descend(arena, root, offset, false)
}

/// Deepest node touching `offset`: like [`find_node_at_offset`], but a node
/// that ends exactly at `offset` also counts (a cursor right after `foo`).
pub fn find_touching_node(arena: &NodeArena, offset: u32) -> NodeIndex {
    let root = arena.source_file_root();
    if arena.get(root).is_none() {
        return NodeIndex::NONE;
    }
    descend(arena, root, offset, true)
}

fn descend(arena: &NodeArena, root: NodeIndex, offset: u32, include_end: bool) -> NodeIndex {
    let mut current = root;
    'outer: loop {
        let children = arena.get_children(current);
        let mut touching_end = NodeIndex::NONE;
        for child in children {
            let Some(node) = arena.get(child) else {
                continue;
            };
            if node.pos == node.end {
                continue;
            }
            if node.pos <= offset && offset < node.end {
                current = child;
                continue 'outer;
            }
            if include_end && node.end == offset {
                touching_end = child;
            }
        }
        if touching_end.is_some() {
            current = touching_end;
            continue;
        }
        return current;
    }
}

/// Every list-valued child slot of a node, in source order.
pub fn child_lists(arena: &NodeArena, index: NodeIndex) -> Vec<&NodeList> {
    let mut lists = Vec::new();
    let Some(node) = arena.get(index) else {
        return lists;
    };
    match node.kind {
        SOURCE_FILE => lists.extend(arena.get_source_file(node).map(|d| &d.statements)),
        BLOCK => lists.extend(arena.get_block(node).map(|d| &d.statements)),
        MODULE_BLOCK => lists.extend(arena.get_module_block(node).map(|d| &d.statements)),
        CLASS_DECLARATION | STRUCT_DECLARATION => {
            if let Some(d) = arena.get_class(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.extend(d.heritage_clauses.as_ref());
                lists.push(&d.members);
            }
        }
        INTERFACE_DECLARATION => {
            if let Some(d) = arena.get_interface(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.extend(d.heritage_clauses.as_ref());
                lists.push(&d.members);
            }
        }
        TYPE_ALIAS_DECLARATION => {
            if let Some(d) = arena.get_type_alias(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
            }
        }
        ENUM_DECLARATION => {
            if let Some(d) = arena.get_enum(node) {
                lists.extend(d.modifiers.as_ref());
                lists.push(&d.members);
            }
        }
        MODULE_DECLARATION => lists.extend(arena.get_module(node).and_then(|d| d.modifiers.as_ref())),
        FUNCTION_DECLARATION | FUNCTION_EXPRESSION | ARROW_FUNCTION => {
            if let Some(d) = arena.get_function(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.push(&d.parameters);
            }
        }
        METHOD_DECLARATION => {
            if let Some(d) = arena.get_method_decl(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.push(&d.parameters);
            }
        }
        CONSTRUCTOR => {
            if let Some(d) = arena.get_constructor(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.push(&d.parameters);
            }
        }
        GET_ACCESSOR | SET_ACCESSOR => {
            if let Some(d) = arena.get_accessor(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.push(&d.parameters);
            }
        }
        PROPERTY_SIGNATURE | METHOD_SIGNATURE => {
            if let Some(d) = arena.get_signature(node) {
                lists.extend(d.modifiers.as_ref());
                lists.extend(d.type_parameters.as_ref());
                lists.extend(d.parameters.as_ref());
            }
        }
        INDEX_SIGNATURE => {
            if let Some(d) = arena.get_index_signature(node) {
                lists.extend(d.modifiers.as_ref());
                lists.push(&d.parameters);
            }
        }
        PROPERTY_DECLARATION => lists.extend(arena.get_property_decl(node).and_then(|d| d.modifiers.as_ref())),
        PARAMETER => lists.extend(arena.get_parameter(node).and_then(|d| d.modifiers.as_ref())),
        VARIABLE_STATEMENT | VARIABLE_DECLARATION_LIST => {
            if let Some(d) = arena.get_variable(node) {
                lists.extend(d.modifiers.as_ref());
                lists.push(&d.declarations);
            }
        }
        CALL_EXPRESSION | NEW_EXPRESSION => {
            if let Some(d) = arena.get_call_expr(node) {
                lists.extend(d.type_arguments.as_ref());
                lists.extend(d.arguments.as_ref());
            }
        }
        ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => {
            lists.extend(arena.get_literal_expr(node).map(|d| &d.elements));
        }
        TYPE_LITERAL => lists.extend(arena.get_type_literal(node).map(|d| &d.members)),
        TYPE_REFERENCE => lists.extend(arena.get_type_ref(node).and_then(|d| d.type_arguments.as_ref())),
        EXPRESSION_WITH_TYPE_ARGUMENTS => {
            lists.extend(arena.get_expr_type_args(node).and_then(|d| d.type_arguments.as_ref()));
        }
        FUNCTION_TYPE => {
            if let Some(d) = arena.get_function_type(node) {
                lists.extend(d.type_parameters.as_ref());
                lists.push(&d.parameters);
            }
        }
        TUPLE_TYPE | UNION_TYPE | INTERSECTION_TYPE => {
            lists.extend(arena.get_composite_type(node).map(|d| &d.types));
        }
        HERITAGE_CLAUSE => lists.extend(arena.get_heritage_clause(node).map(|d| &d.types)),
        NAMED_IMPORTS | NAMED_EXPORTS => lists.extend(arena.get_named_imports(node).map(|d| &d.elements)),
        IMPORT_DECLARATION => lists.extend(arena.get_import_decl(node).and_then(|d| d.modifiers.as_ref())),
        EXPORT_DECLARATION => lists.extend(arena.get_export_decl(node).and_then(|d| d.modifiers.as_ref())),
        EXPORT_ASSIGNMENT => lists.extend(arena.get_export_assignment(node).and_then(|d| d.modifiers.as_ref())),
        _ => {}
    }
    lists
}

/// The list in the parent of `index` that contains it, if any.
pub fn get_containing_list(arena: &NodeArena, index: NodeIndex) -> Option<&NodeList> {
    let parent = arena.parent_of(index);
    if parent.is_none() {
        return None;
    }
    child_lists(arena, parent)
        .into_iter()
        .find(|list| list.position_of(index).is_some())
}

/// One token read directly from source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
}

/// Scan the first token at or after `pos`, skipping trivia.
pub fn scan_token_at(text: &Arc<str>, pos: u32) -> TokenInfo {
    let mut scanner = ScannerState::new(Arc::clone(text));
    scanner.reset_to(pos);
    let kind = scanner.scan();
    TokenInfo {
        kind,
        pos: scanner.token_pos(),
        end: scanner.token_end(),
    }
}
