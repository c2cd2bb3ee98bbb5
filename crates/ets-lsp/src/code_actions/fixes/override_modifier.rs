//! Adding a missing `override` modifier and removing one that has nothing
//! to override.

use ets_common::comments::skip_trivia;
use ets_common::diagnostics::diagnostic_codes;
use ets_parser::NodeIndex;
use ets_parser::syntax_kind_ext::{DECORATOR, is_class_element};
use ets_scanner::SyntaxKind;
use rustc_hash::FxHashSet;

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::ProjectFile;
use crate::text_changes::{ChangeTracker, InsertNodeOptions};

const FIX_NAME: &str = "fixOverrideModifier";

const ADD: FixDescriptor = FixDescriptor {
    fix_name: FIX_NAME,
    fix_id: "fixAddOverrideModifier",
    description: "Add 'override' modifier",
    fix_all_description: "Add all missing 'override' modifiers",
};

const REMOVE: FixDescriptor = FixDescriptor {
    fix_name: FIX_NAME,
    fix_id: "fixRemoveOverrideModifier",
    description: "Remove 'override' modifier",
    fix_all_description: "Remove all unnecessary 'override' modifiers",
};

const ADD_CODES: &[u32] = &[
    diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE,
    diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE_ABSTRACT,
];

const REMOVE_CODES: &[u32] = &[
    diagnostic_codes::OVERRIDE_WITHOUT_BASE_CLASS,
    diagnostic_codes::OVERRIDE_NOT_IN_BASE_CLASS,
];

/// The class member containing `pos`.
fn class_element_at(file: &ProjectFile, pos: u32) -> Option<NodeIndex> {
    let element = file.arena().find_ancestor(touching_node(file, pos), is_class_element);
    element.is_some().then_some(element)
}

fn is_accessibility_modifier(kind: u16) -> bool {
    kind == SyntaxKind::PublicKeyword as u16
        || kind == SyntaxKind::PrivateKeyword as u16
        || kind == SyntaxKind::ProtectedKeyword as u16
}

/// `override` goes after `abstract`, `static` or an accessibility modifier,
/// whichever comes first in that order of preference, else after the
/// decorators.
fn add_override<'a>(tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile, element: NodeIndex) {
    let arena = file.arena();
    if arena.has_modifier(element, SyntaxKind::OverrideKeyword) {
        return;
    }
    let Some(node) = arena.get(element) else {
        return;
    };
    let modifiers: Vec<NodeIndex> = arena.get_modifiers(element).map(|m| m.iter().collect()).unwrap_or_default();
    let find = |pred: &dyn Fn(u16) -> bool| {
        modifiers
            .iter()
            .copied()
            .find(|&m| arena.kind_of(m).is_some_and(pred))
            .and_then(|m| arena.get(m))
    };
    let abstract_modifier = find(&|k| k == SyntaxKind::AbstractKeyword as u16);
    let static_modifier = find(&|k| k == SyntaxKind::StaticKeyword as u16);
    let accessibility_modifier = find(&is_accessibility_modifier);
    let last_decorator = modifiers
        .iter()
        .rev()
        .copied()
        .find(|&m| arena.is_kind(m, DECORATOR))
        .and_then(|m| arena.get(m));

    let anchor = abstract_modifier.or(static_modifier).or(accessibility_modifier);
    let (pos, options) = match (anchor, last_decorator) {
        (Some(modifier), _) => (modifier.end, InsertNodeOptions::prefix(" ")),
        (None, Some(decorator)) => (
            skip_trivia(file.source_text(), decorator.end, false, false),
            InsertNodeOptions::suffix(" "),
        ),
        (None, None) => (node.pos, InsertNodeOptions::suffix(" ")),
    };
    tracker.insert_modifier_at(file, pos, SyntaxKind::OverrideKeyword, options);
}

fn remove_override<'a>(tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile, element: NodeIndex) {
    let modifier = file.arena().find_modifier(element, SyntaxKind::OverrideKeyword);
    if modifier.is_some() {
        tracker.delete_modifier(file, modifier);
    }
}

fn fix_all(
    context: &CodeFixAllContext<'_>,
    codes: &[u32],
    change: for<'a> fn(&mut ChangeTracker<'a>, &'a ProjectFile, NodeIndex),
) -> CombinedCodeActions {
    let mut fixed = FxHashSet::default();
    CodeFixRegistry::code_fix_all(context, codes, |tracker, file, diagnostic| {
        if let Some(element) = class_element_at(file, diagnostic.start) {
            if fixed.insert(element) {
                change(tracker, file, element);
            }
        }
    })
}

pub struct AddOverrideModifier;

impl CodeFixProvider for AddOverrideModifier {
    fn error_codes(&self) -> &'static [u32] {
        ADD_CODES
    }

    fn fix_ids(&self) -> &'static [&'static str] {
        &[ADD.fix_id]
    }

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let Some(file) = context.file() else {
            return Vec::new();
        };
        let Some(element) = class_element_at(file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &ADD, ADD.description, |tracker| add_override(tracker, file, element))
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        fix_all(context, ADD_CODES, add_override)
    }
}

pub struct RemoveOverrideModifier;

impl CodeFixProvider for RemoveOverrideModifier {
    fn error_codes(&self) -> &'static [u32] {
        REMOVE_CODES
    }

    fn fix_ids(&self) -> &'static [&'static str] {
        &[REMOVE.fix_id]
    }

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let Some(file) = context.file() else {
            return Vec::new();
        };
        let Some(element) = class_element_at(file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &REMOVE, REMOVE.description, |tracker| {
            remove_override(tracker, file, element)
        })
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        fix_all(context, REMOVE_CODES, remove_override)
    }
}
