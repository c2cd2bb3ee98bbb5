//! Registry of code-fix providers by error code and fix id.

use ets_common::diagnostics::Diagnostic;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::fixes;
use super::{CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CombinedCodeActions};
use crate::project::ProjectFile;
use crate::text_changes::ChangeTracker;

/// Explicit provider registry. Error codes are keyed by their decimal
/// string form, as they arrive over the wire.
#[derive(Default)]
pub struct CodeFixRegistry {
    providers: Vec<Box<dyn CodeFixProvider>>,
    by_error_code: FxHashMap<String, Vec<usize>>,
    by_fix_id: FxHashMap<&'static str, usize>,
}

impl CodeFixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in fix.
    pub fn with_default_fixes() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(fixes::nan_equality::FixNaNEquality));
        registry.register(Box::new(fixes::add_missing_declare_property::AddMissingDeclareProperty));
        registry.register(Box::new(fixes::override_modifier::AddOverrideModifier));
        registry.register(Box::new(fixes::override_modifier::RemoveOverrideModifier));
        registry.register(Box::new(fixes::convert_const_to_let::ConvertConstToLet));
        registry.register(Box::new(fixes::unused_identifier::UnusedIdentifier));
        registry.register(Box::new(fixes::derived_super_call::DerivedSuperCall));
        registry.register(Box::new(fixes::implement_interface::ImplementInterface));
        registry.register(Box::new(fixes::expected_comma::ExpectedComma));
        registry
    }

    pub fn register(&mut self, provider: Box<dyn CodeFixProvider>) {
        let index = self.providers.len();
        for code in provider.error_codes() {
            self.by_error_code.entry(code.to_string()).or_default().push(index);
        }
        for &fix_id in provider.fix_ids() {
            self.by_fix_id.insert(fix_id, index);
        }
        self.providers.push(provider);
    }

    /// Actions of every provider registered for the context's error code.
    pub fn get_fixes(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let Some(indices) = self.by_error_code.get(&context.error_code.to_string()) else {
            return Vec::new();
        };
        let actions: Vec<CodeFixAction> = indices
            .iter()
            .flat_map(|&i| self.providers[i].get_code_actions(context))
            .collect();
        debug!(
            file = context.file_name,
            code = context.error_code,
            actions = actions.len(),
            "get code fixes"
        );
        actions
    }

    /// Error codes with at least one provider, in numeric order.
    pub fn get_supported_error_codes(&self) -> Vec<String> {
        let mut codes: Vec<&String> = self.by_error_code.keys().collect();
        codes.sort_by_key(|code| code.parse::<u32>().unwrap_or(u32::MAX));
        codes.into_iter().cloned().collect()
    }

    /// Combined edits of the provider owning `context.fix_id`.
    pub fn get_all_fixes(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        let Some(&index) = self.by_fix_id.get(context.fix_id) else {
            debug!(fix_id = context.fix_id, "unknown fix id");
            return CombinedCodeActions::default();
        };
        self.providers[index].get_all_code_actions(context)
    }

    /// Run `apply` once for every diagnostic of the context's file whose code
    /// is in `error_codes`, all inside one tracker session.
    pub fn code_fix_all<'a, F>(context: &CodeFixAllContext<'a>, error_codes: &[u32], mut apply: F) -> CombinedCodeActions
    where
        F: FnMut(&mut ChangeTracker<'a>, &'a ProjectFile, &Diagnostic),
    {
        let Some(file) = context.file() else {
            return CombinedCodeActions::default();
        };
        let diagnostics = Self::matching_diagnostics(context, error_codes);
        let changes = ChangeTracker::with(&context.text_changes_context(), |tracker| {
            for diagnostic in diagnostics {
                apply(tracker, file, diagnostic);
            }
        });
        CombinedCodeActions {
            changes,
            commands: Vec::new(),
        }
    }

    /// Diagnostics of the context's file whose code is in `error_codes`.
    pub fn matching_diagnostics<'d>(
        context: &CodeFixAllContext<'d>,
        error_codes: &'d [u32],
    ) -> impl Iterator<Item = &'d Diagnostic> {
        let file_name = context.file_name;
        context
            .diagnostics
            .iter()
            .filter(move |d| d.file == file_name && error_codes.contains(&d.code))
    }
}
