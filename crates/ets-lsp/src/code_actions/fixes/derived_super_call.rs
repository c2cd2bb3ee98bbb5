//! Constructors of derived classes must call `super()`: add the call as the
//! first statement.

use ets_common::diagnostics::diagnostic_codes;
use ets_parser::NodeIndex;
use ets_parser::syntax_kind_ext::CONSTRUCTOR;
use ets_scanner::SyntaxKind;
use rustc_hash::FxHashSet;

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::ProjectFile;
use crate::text_changes::{ChangeTracker, SynthNode};

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "fixConstructorForDerivedNeedSuperCall",
    fix_id: "fixConstructorForDerivedNeedSuperCall",
    description: "Add missing 'super()' call",
    fix_all_description: "Add all missing super calls",
};

const ERROR_CODES: &[u32] = &[diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_SUPER_CALL];

fn get_node(file: &ProjectFile, pos: u32) -> Option<NodeIndex> {
    let ctor = file.arena().find_ancestor(touching_node(file, pos), |k| k == CONSTRUCTOR);
    ctor.is_some().then_some(ctor)
}

fn do_change<'a>(tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile, ctor: NodeIndex) {
    let super_call = SynthNode::expression_statement(SynthNode::call(
        SynthNode::token(SyntaxKind::SuperKeyword),
        Vec::new(),
    ));
    tracker.insert_node_at_constructor_start(file, ctor, super_call);
}

pub struct DerivedSuperCall;

impl CodeFixProvider for DerivedSuperCall {
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
        let Some(ctor) = get_node(file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &FIX, FIX.description, |tracker| do_change(tracker, file, ctor))
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        let mut seen = FxHashSet::default();
        CodeFixRegistry::code_fix_all(context, ERROR_CODES, |tracker, file, diagnostic| {
            if let Some(ctor) = get_node(file, diagnostic.start) {
                if seen.insert(ctor) {
                    do_change(tracker, file, ctor);
                }
            }
        })
    }
}
