//! Assignment to a `const`: turn the declaration into `let`.

use ets_common::diagnostics::diagnostic_codes;
use ets_common::position::TextRange;
use ets_parser::node_flags;
use ets_parser::syntax_kind_ext::{VARIABLE_DECLARATION, VARIABLE_DECLARATION_LIST};
use ets_scanner::SyntaxKind;
use rustc_hash::FxHashSet;

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::{Project, ProjectFile};
use crate::resolver::{DeclRef, declaration_from_identifier};
use crate::text_changes::{ChangeTracker, InsertNodeOptions, SynthNode};

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "convertConstToLet",
    fix_id: "convertConstToLet",
    description: "Convert 'const' to 'let'",
    fix_all_description: "Convert all 'const' to 'let'",
};

const ERROR_CODES: &[u32] = &[diagnostic_codes::CANNOT_ASSIGN_TO_CONST];

const CONST_KEYWORD: &str = "const";

/// The `const` declaration list behind the identifier at `pos`, and the
/// range of its keyword.
struct Info<'p> {
    list: DeclRef,
    file: &'p ProjectFile,
    keyword: TextRange,
}

fn get_info<'p>(project: &'p Project, file: &'p ProjectFile, pos: u32) -> Option<Info<'p>> {
    let token = touching_node(file, pos);
    if !file.arena().is_kind(token, SyntaxKind::Identifier as u16) {
        return None;
    }
    let declaration = declaration_from_identifier(project, file, token)?;
    let decl_file = project.file_by_id(declaration.file)?;
    let arena = decl_file.arena();
    if !arena.is_kind(declaration.node, VARIABLE_DECLARATION) {
        return None;
    }
    let list = arena.parent_of(declaration.node);
    let list_node = arena.get(list).filter(|n| n.kind == VARIABLE_DECLARATION_LIST)?;
    if list_node.flags & node_flags::CONST == 0 {
        return None;
    }
    let keyword = TextRange::new(list_node.pos, list_node.pos + CONST_KEYWORD.len() as u32);
    if decl_file.source_text().get(keyword.pos as usize..keyword.end as usize) != Some(CONST_KEYWORD) {
        return None;
    }
    Some(Info {
        list: DeclRef::new(declaration.file, list),
        file: decl_file,
        keyword,
    })
}

fn do_change<'a>(tracker: &mut ChangeTracker<'a>, info: &Info<'a>) {
    tracker.replace_range(
        info.file,
        info.keyword,
        SynthNode::token(SyntaxKind::LetKeyword),
        InsertNodeOptions::default(),
    );
}

pub struct ConvertConstToLet;

impl CodeFixProvider for ConvertConstToLet {
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
        let Some(info) = get_info(context.project, file, context.span.start) else {
            return Vec::new();
        };
        single_action(context, &FIX, FIX.description, |tracker| do_change(tracker, &info))
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        let project = context.project;
        let mut seen = FxHashSet::default();
        CodeFixRegistry::code_fix_all(context, ERROR_CODES, |tracker, file, diagnostic| {
            let Some(info) = get_info(project, file, diagnostic.start) else {
                return;
            };
            if seen.insert(info.list) {
                do_change(tracker, &info);
            }
        })
    }
}
