//! Runs one `ets-query` command against files on disk and returns the JSON
//! it prints.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ets_common::diagnostics::Diagnostic;
use ets_common::position::TextSpan;
use ets_lsp::{
    CodeFixAllContext, CodeFixContext, CodeFixRegistry, FormatCodeSettings, Project, UserPreferences,
    get_class_hierarchies_impl, get_type_hierarchies_impl, to_line_column_offset,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::args::{CliArgs, Command, FilesArgs};

/// Loaded sources plus the settings fixes run under.
pub struct Session {
    pub project: Project,
    pub settings: FormatCodeSettings,
    pub preferences: UserPreferences,
    /// Project key of the queried file.
    pub file_name: String,
}

impl Session {
    pub fn load(args: &CliArgs, files: &FilesArgs) -> Result<Self> {
        let project = load_project(&files.files)?;
        let file_name = target_file(&project, files)?;
        Ok(Self {
            project,
            settings: load_settings(args.settings.as_deref())?,
            preferences: load_preferences(args.preferences.as_deref())?,
            file_name,
        })
    }
}

/// Project key for a path on disk.
pub fn file_key(path: &Path) -> String {
    path.display().to_string()
}

pub fn load_project(files: &[PathBuf]) -> Result<Project> {
    let mut project = Project::new();
    for path in files {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        project.set_file(file_key(path), text);
    }
    debug!(files = project.file_count(), "loaded project");
    Ok(project)
}

fn target_file(project: &Project, files: &FilesArgs) -> Result<String> {
    let Some(path) = files.file.as_ref().or(files.files.first()) else {
        bail!("no input files");
    };
    let key = file_key(path);
    if project.file(&key).is_none() {
        bail!("{key} is not one of the loaded files");
    }
    Ok(key)
}

pub fn load_settings(path: Option<&Path>) -> Result<FormatCodeSettings> {
    let Some(path) = path else {
        return Ok(FormatCodeSettings::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read settings {}", path.display()))?;
    FormatCodeSettings::from_json(&text)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("in {}", path.display()))
}

pub fn load_preferences(path: Option<&Path>) -> Result<UserPreferences> {
    let Some(path) = path else {
        return Ok(UserPreferences::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read preferences {}", path.display()))?;
    UserPreferences::from_json(&text)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("in {}", path.display()))
}

fn load_diagnostics(path: &Path) -> Result<Vec<Diagnostic>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read diagnostics {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid diagnostics in {}", path.display()))
}

fn parse_diagnostics(project: &Project, only: Option<&str>) -> Vec<Diagnostic> {
    project
        .files()
        .filter(|file| only.is_none_or(|name| file.file_name() == name))
        .flat_map(|file| {
            file.parse_diagnostics()
                .iter()
                .map(|d| d.to_diagnostic(file.file_name()))
        })
        .collect()
}

fn to_json(value: impl Serialize) -> Result<Value> {
    serde_json::to_value(value).context("failed to serialize result")
}

/// Execute the parsed command.
pub fn run(args: &CliArgs) -> Result<Value> {
    match &args.command {
        Command::TypeHierarchy(query) => {
            let session = Session::load(args, &query.files)?;
            info!(file = %session.file_name, pos = query.pos, "type hierarchy");
            to_json(get_type_hierarchies_impl(&session.project, &session.file_name, query.pos))
        }
        Command::ClassHierarchy(query) => {
            let session = Session::load(args, &query.files)?;
            info!(file = %session.file_name, pos = query.pos, "class hierarchy");
            to_json(get_class_hierarchies_impl(&session.project, &session.file_name, query.pos))
        }
        Command::Position(query) => {
            let session = Session::load(args, &query.files)?;
            to_json(to_line_column_offset(&session.project, &session.file_name, query.pos))
        }
        Command::Fixes(fix) => {
            let session = Session::load(args, &fix.query.files)?;
            let context = CodeFixContext {
                project: &session.project,
                file_name: &session.file_name,
                error_code: fix.code,
                span: TextSpan::new(fix.query.pos, fix.length),
                format_settings: &session.settings,
                preferences: &session.preferences,
            };
            let actions = CodeFixRegistry::with_default_fixes().get_fixes(&context);
            info!(file = %session.file_name, code = fix.code, actions = actions.len(), "code fixes");
            to_json(actions)
        }
        Command::FixAll(fix_all) => {
            let session = Session::load(args, &fix_all.files)?;
            let diagnostics = match &fix_all.diagnostics {
                Some(path) => load_diagnostics(path)?,
                None => parse_diagnostics(&session.project, Some(&session.file_name)),
            };
            let context = CodeFixAllContext {
                project: &session.project,
                file_name: &session.file_name,
                fix_id: &fix_all.fix_id,
                diagnostics: &diagnostics,
                format_settings: &session.settings,
                preferences: &session.preferences,
            };
            let combined = CodeFixRegistry::with_default_fixes().get_all_fixes(&context);
            info!(
                file = %session.file_name,
                fix_id = %fix_all.fix_id,
                diagnostics = diagnostics.len(),
                "fix all"
            );
            to_json(combined)
        }
        Command::Diagnostics(files) => {
            let project = load_project(&files.files)?;
            let only = match &files.file {
                Some(_) => Some(target_file(&project, files)?),
                None => None,
            };
            to_json(parse_diagnostics(&project, only.as_deref()))
        }
        Command::Codes => to_json(CodeFixRegistry::with_default_fixes().get_supported_error_codes()),
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
