//! Property re-declarations that would overwrite a base property: prefix
//! them with `declare`.

use ets_common::diagnostics::diagnostic_codes;
use ets_parser::NodeIndex;
use ets_parser::syntax_kind_ext::PROPERTY_DECLARATION;
use ets_scanner::SyntaxKind;
use rustc_hash::FxHashSet;

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::ProjectFile;
use crate::text_changes::ChangeTracker;

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "addMissingDeclareProperty",
    fix_id: "addMissingDeclareProperty",
    description: "Prefix with 'declare'",
    fix_all_description: "Prefix all incorrect property declarations with 'declare'",
};

const ERROR_CODES: &[u32] = &[diagnostic_codes::PROPERTY_WILL_OVERWRITE_BASE_PROPERTY];

/// The property declaration named by the identifier at `pos`.
fn get_info(file: &ProjectFile, pos: u32) -> Option<NodeIndex> {
    let arena = file.arena();
    let token = touching_node(file, pos);
    if !arena.is_kind(token, SyntaxKind::Identifier as u16) {
        return None;
    }
    let declaration = arena.parent_of(token);
    arena.is_kind(declaration, PROPERTY_DECLARATION).then_some(declaration)
}

fn do_change<'a>(tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile, declaration: NodeIndex) {
    tracker.insert_modifier_before(file, SyntaxKind::DeclareKeyword, declaration);
}

pub struct AddMissingDeclareProperty;

impl CodeFixProvider for AddMissingDeclareProperty {
    fn error_codes(&self) -> &'static [u32] {
        ERROR_CODES
    }

    fn fix_ids(&self) -> &'static [&'static str] {
        &[FIX.fix_id]
    }

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let Some(file) = context.file() else {
            return Vec::new();
        };
        let Some(declaration) = get_info(file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &FIX, FIX.description, |tracker| {
            do_change(tracker, file, declaration)
        })
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        let mut fixed = FxHashSet::default();
        CodeFixRegistry::code_fix_all(context, ERROR_CODES, |tracker, file, diagnostic| {
            if let Some(declaration) = get_info(file, diagnostic.start) {
                if fixed.insert(declaration) {
                    do_change(tracker, file, declaration);
                }
            }
        })
    }
}
