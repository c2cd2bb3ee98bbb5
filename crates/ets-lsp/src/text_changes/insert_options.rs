//! Separator rules for inserting a node next to an existing one.

use ets_parser::syntax_kind_ext::*;
use ets_parser::{NodeArena, NodeIndex};
use ets_scanner::SyntaxKind;

use super::types::InsertNodeOptions;
use crate::project::ProjectFile;

const IDENTIFIER: u16 = SyntaxKind::Identifier as u16;
const STRING_LITERAL: u16 = SyntaxKind::StringLiteral as u16;
const EXPORT_KEYWORD: u16 = SyntaxKind::ExportKeyword as u16;

/// Options for inserting a node of `inserted_kind` before `before`.
pub(crate) fn options_for_insert_before(
    arena: &NodeArena,
    before: NodeIndex,
    inserted_kind: u16,
    blank_line_between: bool,
    new_line: &str,
) -> InsertNodeOptions {
    let Some(kind) = arena.kind_of(before) else {
        return InsertNodeOptions::default();
    };
    match kind {
        k if is_statement(k) || is_class_element(k) => {
            let suffix = if blank_line_between {
                format!("{new_line}{new_line}")
            } else {
                new_line.to_string()
            };
            InsertNodeOptions::suffix(suffix)
        }
        VARIABLE_DECLARATION => InsertNodeOptions::suffix(", "),
        PARAMETER | TYPE_PARAMETER if inserted_kind == kind => InsertNodeOptions::suffix(", "),
        PARAMETER | TYPE_PARAMETER => InsertNodeOptions::default(),
        STRING_LITERAL if arena.is_kind(arena.parent_of(before), IMPORT_DECLARATION) => {
            InsertNodeOptions::suffix(", ")
        }
        NAMED_IMPORTS => InsertNodeOptions::suffix(", "),
        IMPORT_SPECIFIER => {
            let space = if blank_line_between { new_line } else { " " };
            InsertNodeOptions::suffix(format!(",{space}"))
        }
        _ => InsertNodeOptions::default(),
    }
}

/// Options for inserting a node after `after`.
///
/// A statement that ends the file gets an extra line break in front, since
/// there is no trailing line break to reuse.
pub(crate) fn options_for_insert_after(file: &ProjectFile, after: NodeIndex, new_line: &str) -> InsertNodeOptions {
    let arena = file.arena();
    let Some(node) = arena.get(after) else {
        return InsertNodeOptions::default();
    };
    let mut options = match node.kind {
        CLASS_DECLARATION | STRUCT_DECLARATION | MODULE_DECLARATION => {
            InsertNodeOptions::with_prefix_and_suffix(new_line, new_line)
        }
        VARIABLE_DECLARATION | STRING_LITERAL | IDENTIFIER | EXPORT_SPECIFIER => InsertNodeOptions::prefix(", "),
        PROPERTY_ASSIGNMENT => InsertNodeOptions::suffix(format!(",{new_line}")),
        EXPORT_KEYWORD => InsertNodeOptions::prefix(" "),
        PARAMETER | TYPE_PARAMETER => InsertNodeOptions::default(),
        _ => InsertNodeOptions::suffix(new_line),
    };
    if node.end as usize == file.source_text().len() && is_statement(node.kind) {
        options.prefix = format!("{new_line}{}", options.prefix);
    }
    options
}

/// Statements that do not declare anything: expression statements, `if`,
/// `return` and the like.
pub(crate) fn is_statement_but_not_declaration(kind: u16) -> bool {
    is_statement(kind)
        && !matches!(
            kind,
            FUNCTION_DECLARATION
                | CLASS_DECLARATION
                | STRUCT_DECLARATION
                | INTERFACE_DECLARATION
                | TYPE_ALIAS_DECLARATION
                | ENUM_DECLARATION
                | MODULE_DECLARATION
                | IMPORT_DECLARATION
                | EXPORT_DECLARATION
                | EXPORT_ASSIGNMENT
        )
}

/// Whether `a` needs a `;` before `b` can follow it without changing how
/// the text parses.
pub(crate) fn need_semicolon_between(a_kind: u16, b_kind: u16) -> bool {
    let a_is_property = matches!(a_kind, PROPERTY_DECLARATION | PROPERTY_SIGNATURE);
    let b_is_member = is_class_element(b_kind) || is_type_element(b_kind);
    (a_is_property && b_is_member)
        || (is_statement_but_not_declaration(a_kind) && is_statement_but_not_declaration(b_kind))
}
