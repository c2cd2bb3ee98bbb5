//! Name resolution from an identifier to its declaration.
//!
//! Lookup is purely syntactic: enclosing scopes of the identifier first,
//! then the names brought in by the file's named imports, then the
//! top-level declarations of every other project file in project order.

use ets_parser::syntax_kind_ext::*;
use ets_parser::{NodeArena, NodeIndex, NodeList};
use tracing::trace;

use crate::project::{FileId, Project, ProjectFile};

/// A declaration node together with the file that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclRef {
    pub file: FileId,
    pub node: NodeIndex,
}

impl DeclRef {
    pub fn new(file: FileId, node: NodeIndex) -> Self {
        Self { file, node }
    }
}

/// Resolve `ident` (an identifier node in `file`) to its declaration.
pub fn declaration_from_identifier(project: &Project, file: &ProjectFile, ident: NodeIndex) -> Option<DeclRef> {
    let arena = file.arena();
    let name = arena.get_identifier_text(ident)?;

    for scope in arena.ancestors(ident) {
        if let Some(found) = find_in_scope(arena, scope, name) {
            return Some(DeclRef::new(file.id(), found));
        }
    }

    let lookup_name = imported_name(file, name).unwrap_or(name);
    let found = project
        .files()
        .filter(|other| other.id() != file.id())
        .find_map(|other| {
            let statements = other.statements()?;
            find_in_statements(other.arena(), statements, lookup_name).map(|node| DeclRef::new(other.id(), node))
        });
    if found.is_none() {
        trace!(name, file = file.file_name(), "unresolved identifier");
    }
    found
}

/// Declaration named `name` directly inside `scope`.
fn find_in_scope(arena: &NodeArena, scope: NodeIndex, name: &str) -> Option<NodeIndex> {
    let node = arena.get(scope)?;
    match node.kind {
        SOURCE_FILE => find_in_statements(arena, &arena.get_source_file(node)?.statements, name),
        BLOCK => find_in_statements(arena, &arena.get_block(node)?.statements, name),
        MODULE_BLOCK => find_in_statements(arena, &arena.get_module_block(node)?.statements, name),
        FUNCTION_DECLARATION | FUNCTION_EXPRESSION | ARROW_FUNCTION => {
            find_parameter(arena, &arena.get_function(node)?.parameters, name)
        }
        METHOD_DECLARATION => find_parameter(arena, &arena.get_method_decl(node)?.parameters, name),
        CONSTRUCTOR => find_parameter(arena, &arena.get_constructor(node)?.parameters, name),
        GET_ACCESSOR | SET_ACCESSOR => find_parameter(arena, &arena.get_accessor(node)?.parameters, name),
        _ => None,
    }
}

fn find_parameter(arena: &NodeArena, parameters: &NodeList, name: &str) -> Option<NodeIndex> {
    parameters
        .iter()
        .find(|&param| arena.get_declaration_name_text(param) == Some(name))
}

/// A class, struct, interface, function, type alias, enum, namespace or
/// variable declared by one of `statements`.
pub(crate) fn find_in_statements(arena: &NodeArena, statements: &NodeList, name: &str) -> Option<NodeIndex> {
    for statement in statements.iter() {
        let Some(node) = arena.get(statement) else {
            continue;
        };
        match node.kind {
            CLASS_DECLARATION | STRUCT_DECLARATION | INTERFACE_DECLARATION | FUNCTION_DECLARATION
            | TYPE_ALIAS_DECLARATION | ENUM_DECLARATION | MODULE_DECLARATION => {
                if arena.get_declaration_name_text(statement) == Some(name) {
                    return Some(statement);
                }
            }
            VARIABLE_STATEMENT => {
                if let Some(decl) = variable_declarations(arena, statement)
                    .into_iter()
                    .find(|&d| arena.get_declaration_name_text(d) == Some(name))
                {
                    return Some(decl);
                }
            }
            _ => {}
        }
    }
    None
}

/// Declarators of a variable statement (`let a = 1, b;` -> `a`, `b`).
pub(crate) fn variable_declarations(arena: &NodeArena, statement: NodeIndex) -> Vec<NodeIndex> {
    let Some(variable) = arena.get(statement).and_then(|n| arena.get_variable(n)) else {
        return Vec::new();
    };
    variable
        .declarations
        .iter()
        .filter_map(|list| arena.get(list).and_then(|n| arena.get_variable(n)))
        .flat_map(|list| list.declarations.iter())
        .collect()
}

/// The exported name behind a local import binding (`import { A as B }`
/// maps `B` to `A`).
fn imported_name<'f>(file: &'f ProjectFile, local: &str) -> Option<&'f str> {
    let arena = file.arena();
    for statement in file.statements()?.iter() {
        let Some(import) = arena.get(statement).and_then(|n| arena.get_import_decl(n)) else {
            continue;
        };
        let Some(clause) = arena.get(import.import_clause).and_then(|n| arena.get_import_clause(n)) else {
            continue;
        };
        let Some(named) = arena
            .get(clause.named_bindings)
            .filter(|n| n.kind == NAMED_IMPORTS)
            .and_then(|n| arena.get_named_imports(n))
        else {
            continue;
        };
        for element in named.elements.iter() {
            let Some(specifier) = arena.get(element).and_then(|n| arena.get_specifier(n)) else {
                continue;
            };
            if arena.get_name_text(specifier.name) != Some(local) {
                continue;
            }
            return if specifier.property_name.is_some() {
                arena.get_name_text(specifier.property_name)
            } else {
                arena.get_name_text(specifier.name)
            };
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
