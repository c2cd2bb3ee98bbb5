//! Code fixes: quick fixes keyed by diagnostic error code.
//!
//! Each fix is a `CodeFixProvider` registered with a `CodeFixRegistry`. A
//! provider turns a diagnostic position into edits recorded through one
//! `ChangeTracker` session per action.

use ets_common::diagnostics::Diagnostic;
use ets_common::position::TextSpan;
use serde::Serialize;

use crate::config::{FormatCodeSettings, UserPreferences};
use crate::project::{Project, ProjectFile};
use crate::text_changes::{FileTextChanges, TextChangesContext};

pub mod fixes;
mod registry;

pub use registry::CodeFixRegistry;

/// One quick fix offered for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixAction {
    /// Internal name of the fix (e.g. "unusedIdentifier").
    pub fix_name: String,
    pub description: String,
    pub changes: Vec<FileTextChanges>,
    /// Commands to run after applying the fix.
    pub commands: Vec<serde_json::Value>,
    /// Identifier for fix-all support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_all_description: Option<String>,
}

impl CodeFixAction {
    /// An action that supports fix-all under `fix_id`.
    pub fn new(
        fix_name: &str,
        changes: Vec<FileTextChanges>,
        description: impl Into<String>,
        fix_id: &str,
        fix_all_description: &str,
    ) -> Self {
        Self {
            fix_name: fix_name.to_string(),
            description: description.into(),
            changes,
            commands: Vec::new(),
            fix_id: Some(fix_id.to_string()),
            fix_all_description: Some(fix_all_description.to_string()),
        }
    }
}

/// Edits of a fix-all request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedCodeActions {
    pub changes: Vec<FileTextChanges>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<serde_json::Value>,
}

/// A request for the fixes of one diagnostic.
#[derive(Clone, Copy)]
pub struct CodeFixContext<'a> {
    pub project: &'a Project,
    pub file_name: &'a str,
    pub error_code: u32,
    pub span: TextSpan,
    pub format_settings: &'a FormatCodeSettings,
    pub preferences: &'a UserPreferences,
}

impl<'a> CodeFixContext<'a> {
    pub fn file(&self) -> Option<&'a ProjectFile> {
        self.project.file(self.file_name)
    }

    pub fn text_changes_context(&self) -> TextChangesContext<'a> {
        TextChangesContext::new(self.format_settings, self.preferences)
    }
}

/// A request to apply one fix to every matching diagnostic of a file.
#[derive(Clone, Copy)]
pub struct CodeFixAllContext<'a> {
    pub project: &'a Project,
    pub file_name: &'a str,
    pub fix_id: &'a str,
    pub diagnostics: &'a [Diagnostic],
    pub format_settings: &'a FormatCodeSettings,
    pub preferences: &'a UserPreferences,
}

impl<'a> CodeFixAllContext<'a> {
    pub fn file(&self) -> Option<&'a ProjectFile> {
        self.project.file(self.file_name)
    }

    pub fn text_changes_context(&self) -> TextChangesContext<'a> {
        TextChangesContext::new(self.format_settings, self.preferences)
    }
}

pub trait CodeFixProvider {
    /// Diagnostic codes this provider answers.
    fn error_codes(&self) -> &'static [u32];

    /// Fix-all identifiers this provider answers.
    fn fix_ids(&self) -> &'static [&'static str];

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction>;

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions;
}

#[cfg(test)]
#[path = "../../tests/code_actions_tests.rs"]
mod code_actions_tests;
