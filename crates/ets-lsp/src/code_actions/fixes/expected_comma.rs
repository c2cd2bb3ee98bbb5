//! `;` between the elements of an object or array literal: change it to `,`.

use ets_common::diagnostics::diagnostic_codes;
use ets_common::position::TextRange;
use ets_parser::syntax::{find_node_at_offset, scan_token_at};
use ets_parser::syntax_kind_ext::{ARRAY_LITERAL_EXPRESSION, OBJECT_LITERAL_EXPRESSION};
use ets_scanner::SyntaxKind;

use super::{FixDescriptor, single_action};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::ProjectFile;
use crate::text_changes::{ChangeTracker, InsertNodeOptions, SynthNode};

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "fixExpectedComma",
    fix_id: "fixExpectedComma",
    description: "Change ';' to ','",
    fix_all_description: "Change ';' to ','",
};

const ERROR_CODES: &[u32] = &[diagnostic_codes::EXPECTED];

/// Range of the `;` at `pos`, when it separates literal elements.
fn get_info(file: &ProjectFile, pos: u32) -> Option<TextRange> {
    let token = scan_token_at(file.shared_text(), pos);
    if token.kind != SyntaxKind::SemicolonToken || token.pos != pos {
        return None;
    }
    let container = find_node_at_offset(file.arena(), pos);
    let kind = file.arena().kind_of(container)?;
    matches!(kind, OBJECT_LITERAL_EXPRESSION | ARRAY_LITERAL_EXPRESSION).then(|| TextRange::new(token.pos, token.end))
}

fn do_change<'a>(tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile, semicolon: TextRange) {
    tracker.replace_range(
        file,
        semicolon,
        SynthNode::token(SyntaxKind::CommaToken),
        InsertNodeOptions::default(),
    );
}

pub struct ExpectedComma;

impl CodeFixProvider for ExpectedComma {
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
        let Some(semicolon) = get_info(file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &FIX, FIX.description, |tracker| do_change(tracker, file, semicolon))
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        CodeFixRegistry::code_fix_all(context, ERROR_CODES, |tracker, file, diagnostic| {
            if let Some(semicolon) = get_info(file, diagnostic.start) {
                do_change(tracker, file, semicolon);
            }
        })
    }
}
