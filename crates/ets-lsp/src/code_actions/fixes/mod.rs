//! Built-in code fixes.

use ets_parser::NodeIndex;
use ets_parser::syntax::find_touching_node;

use super::{CodeFixAction, CodeFixContext};
use crate::project::ProjectFile;
use crate::text_changes::ChangeTracker;

pub mod add_missing_declare_property;
pub mod convert_const_to_let;
pub mod derived_super_call;
pub mod expected_comma;
pub mod implement_interface;
pub mod nan_equality;
pub mod override_modifier;
pub mod unused_identifier;

/// Names and descriptions shared by the single and fix-all forms of a fix.
#[derive(Debug, Clone, Copy)]
pub struct FixDescriptor {
    pub fix_name: &'static str,
    pub fix_id: &'static str,
    pub description: &'static str,
    pub fix_all_description: &'static str,
}

/// Deepest node touching `pos`.
pub(crate) fn touching_node(file: &ProjectFile, pos: u32) -> NodeIndex {
    find_touching_node(file.arena(), pos)
}

/// Run `edit` in a fresh session and wrap the result as one action.
///
/// Yields no action when `edit` records nothing.
pub(crate) fn single_action<'a>(
    context: &CodeFixContext<'a>,
    fix: &FixDescriptor,
    description: impl Into<String>,
    edit: impl FnOnce(&mut ChangeTracker<'a>),
) -> Vec<CodeFixAction> {
    let changes = ChangeTracker::with(&context.text_changes_context(), edit);
    if changes.is_empty() {
        return Vec::new();
    }
    vec![CodeFixAction::new(
        fix.fix_name,
        changes,
        description,
        fix.fix_id,
        fix.fix_all_description,
    )]
}
