//! `x === NaN` is always false: compare with `Number.isNaN(x)` instead.

use ets_common::diagnostics::diagnostic_codes;
use ets_parser::NodeIndex;
use ets_parser::syntax_kind_ext::{BINARY_EXPRESSION, PROPERTY_ACCESS_EXPRESSION};
use ets_scanner::SyntaxKind;

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::ProjectFile;
use crate::text_changes::{ChangeNodeOptions, ChangeTracker, SynthNode};

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "fixNaNEquality",
    fix_id: "fixNaNEquality",
    description: "Use Number.isNaN()",
    fix_all_description: "Use Number.isNaN() in all comparisons",
};

const ERROR_CODES: &[u32] = &[diagnostic_codes::CONDITION_ALWAYS_RETURNS];

struct Info {
    binary: NodeIndex,
    /// The operand that is not `NaN`.
    expression: NodeIndex,
    negated: bool,
}

fn get_info(file: &ProjectFile, pos: u32) -> Option<Info> {
    let arena = file.arena();
    let token = touching_node(file, pos);
    let binary = arena.find_ancestor(token, |k| k == BINARY_EXPRESSION);
    let data = arena.get(binary).and_then(|n| arena.get_binary_expr(n))?;
    let negated = match data.operator_token {
        op if op == SyntaxKind::EqualsEqualsEqualsToken as u16 || op == SyntaxKind::EqualsEqualsToken as u16 => false,
        op if op == SyntaxKind::ExclamationEqualsEqualsToken as u16
            || op == SyntaxKind::ExclamationEqualsToken as u16 =>
        {
            true
        }
        _ => return None,
    };
    let expression = if is_nan(file, data.right) {
        data.left
    } else if is_nan(file, data.left) {
        data.right
    } else {
        return None;
    };
    Some(Info {
        binary,
        expression,
        negated,
    })
}

/// `NaN` or `Number.NaN`.
fn is_nan(file: &ProjectFile, expr: NodeIndex) -> bool {
    let arena = file.arena();
    let Some(node) = arena.get(expr) else {
        return false;
    };
    if node.kind == SyntaxKind::Identifier as u16 {
        return arena.get_identifier_text(expr) == Some("NaN");
    }
    if node.kind != PROPERTY_ACCESS_EXPRESSION {
        return false;
    }
    arena.get_access_expr(node).is_some_and(|access| {
        arena.get_identifier_text(access.expression) == Some("Number")
            && arena.get_name_text(access.name_or_argument) == Some("NaN")
    })
}

fn do_change<'a>(tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile, info: &Info) {
    let Some(operand) = SynthNode::reuse(file, info.expression) else {
        return;
    };
    let call = SynthNode::call(
        SynthNode::property_access(SynthNode::identifier("Number"), "isNaN"),
        vec![operand],
    );
    let replacement = if info.negated {
        SynthNode::prefix_unary(SyntaxKind::ExclamationToken, call)
    } else {
        call
    };
    tracker.replace_node(file, info.binary, replacement, ChangeNodeOptions::default());
}

pub struct FixNaNEquality;

impl CodeFixProvider for FixNaNEquality {
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
        let Some(info) = get_info(file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &FIX, FIX.description, |tracker| do_change(tracker, file, &info))
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        CodeFixRegistry::code_fix_all(context, ERROR_CODES, |tracker, file, diagnostic| {
            if let Some(info) = get_info(file, diagnostic.start) {
                do_change(tracker, file, &info);
            }
        })
    }
}
