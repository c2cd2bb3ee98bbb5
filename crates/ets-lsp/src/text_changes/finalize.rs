//! Turning recorded changes into `FileTextChanges`.

use ets_common::comments::header_comment_end;
use ets_common::position::TextRange;
use indexmap::IndexMap;

use super::factory::SynthNode;
use super::printer::NodePrinter;
use super::trivia::line_indentation;
use super::types::{Change, FileTextChanges, InsertNodeOptions, NewFile, TextChange};
use crate::config::{FormatCodeSettings, UserPreferences};
use crate::project::ProjectFile;

pub(crate) struct Finalizer<'s> {
    pub settings: &'s FormatCodeSettings,
    pub preferences: &'s UserPreferences,
    pub printer: &'s dyn NodePrinter,
    pub new_line: &'s str,
}

impl Finalizer<'_> {
    /// Group changes by file, keeping first-seen file order and call order
    /// within a file.
    pub(crate) fn changes_to_text(&self, changes: &[Change<'_>]) -> Vec<FileTextChanges> {
        let mut by_file: IndexMap<&str, Vec<TextChange>> = IndexMap::new();
        for change in changes {
            let text = self.change_text(change);
            by_file
                .entry(change.file().file_name())
                .or_default()
                .push(TextChange::new(change.range(), text));
        }
        by_file
            .into_iter()
            .map(|(file_name, text_changes)| FileTextChanges {
                file_name: file_name.to_string(),
                text_changes,
                is_new_file: false,
            })
            .collect()
    }

    fn change_text(&self, change: &Change<'_>) -> String {
        match change {
            Change::RemoveNode { .. } => String::new(),
            Change::Text { text, .. } => text.clone(),
            Change::ReplaceWithSingleNode {
                file,
                range,
                node,
                options,
            } => {
                let printed = self.print(node);
                let body = self.indent_node_text(file, range.pos, &printed, options, true);
                wrap(options, body)
            }
            Change::ReplaceWithMultipleNodes {
                file,
                range,
                nodes,
                options,
            } => {
                let joiner = options.joiner.as_deref().unwrap_or(self.new_line);
                let indent_after_joiner = joiner.ends_with('\n');
                let mut body = String::new();
                for (i, node) in nodes.iter().enumerate() {
                    let printed = self.print(node);
                    let printed = printed.strip_suffix(self.new_line).unwrap_or(&printed);
                    if i > 0 {
                        body.push_str(joiner);
                    }
                    let indent_first = i == 0 || indent_after_joiner;
                    body.push_str(&self.indent_node_text(file, range.pos, printed, &options.insert, indent_first));
                }
                wrap(&options.insert, body)
            }
        }
    }

    fn print(&self, node: &SynthNode) -> String {
        self.printer.print(node, self.settings, self.preferences)
    }

    /// Indent printed node text for insertion at `pos`.
    ///
    /// The first line is indented only when the insertion starts a line or
    /// the options pin an indentation; following lines always are.
    fn indent_node_text(
        &self,
        file: &ProjectFile,
        pos: u32,
        text: &str,
        options: &InsertNodeOptions,
        may_indent_first: bool,
    ) -> String {
        let at_line_start = file.line_map().line_start_for_offset(pos) == pos;
        let base = options
            .indentation
            .unwrap_or_else(|| guess_indentation(file, pos, self.settings));
        let rest = (base as i64 + i64::from(options.delta.unwrap_or(0))).max(0) as u32;
        let indent_first = may_indent_first && (options.indentation.is_some() || at_line_start);

        let first_indent = self.settings.indent_string(base);
        let rest_indent = self.settings.indent_string(rest);
        let mut out = String::with_capacity(text.len());
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let content = line.strip_suffix('\r').unwrap_or(line);
            if !content.is_empty() {
                if i == 0 {
                    if indent_first {
                        out.push_str(&first_indent);
                    }
                } else {
                    out.push_str(&rest_indent);
                }
            }
            out.push_str(line);
        }
        out
    }

    /// The created file: the old file's header comment, then the statements.
    pub(crate) fn new_file_changes(&self, new_file: &NewFile<'_>) -> FileTextChanges {
        let mut text = String::new();
        if let Some(old_file) = new_file.old_file {
            let source = old_file.source_text();
            let header = source.get(..header_comment_end(source) as usize).unwrap_or("");
            if !header.trim().is_empty() {
                text.push_str(header.trim_end());
                text.push_str(self.new_line);
            }
        }
        let statements: Vec<String> = new_file
            .statements
            .iter()
            .map(|statement| {
                let printed = self.print(statement);
                printed.strip_suffix(self.new_line).unwrap_or(&printed).to_string()
            })
            .collect();
        text.push_str(&statements.join(self.new_line));
        text.push_str(self.new_line);
        FileTextChanges {
            file_name: new_file.file_name.clone(),
            text_changes: vec![TextChange::new(TextRange::empty(0), text)],
            is_new_file: true,
        }
    }
}

fn wrap(options: &InsertNodeOptions, body: String) -> String {
    let mut out = String::with_capacity(options.prefix.len() + body.len() + options.suffix.len());
    out.push_str(&options.prefix);
    out.push_str(&body);
    if !options.suffix.is_empty() && !body.ends_with(options.suffix.as_str()) {
        out.push_str(&options.suffix);
    }
    out
}

/// Indentation (in columns) for text inserted at `pos` without an explicit
/// indentation.
fn guess_indentation(file: &ProjectFile, pos: u32, settings: &FormatCodeSettings) -> u32 {
    let source = file.source_text();
    let line_map = file.line_map();
    let line_start = line_map.line_start_for_offset(pos);
    let line = current_line(source, line_start);

    let before = source.get(line_start as usize..pos as usize).unwrap_or("");
    if !before.trim().is_empty() {
        return line_indentation(file, pos, settings.tab_size);
    }
    let trimmed = line.trim_start();
    if !trimmed.is_empty() && !trimmed.starts_with('}') {
        return line_indentation(file, pos, settings.tab_size);
    }

    // Blank line or closing brace: follow the previous non-blank line.
    let mut line_index = line_map.line_of(pos);
    while line_index > 0 {
        line_index -= 1;
        let Some(start) = line_map.line_start(line_index) else {
            break;
        };
        let previous = current_line(source, start);
        if previous.trim().is_empty() {
            continue;
        }
        let indentation = line_indentation(file, start, settings.tab_size);
        return if previous.trim_end().ends_with('{') {
            indentation + settings.indent_size
        } else {
            indentation
        };
    }
    0
}

fn current_line(source: &str, line_start: u32) -> &str {
    let rest = source.get(line_start as usize..).unwrap_or("");
    let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    &rest[..end]
}

/// Apply `changes` to `text`.
///
/// Changes are applied from the end of the text backwards. At equal starts
/// the longer change goes first, and among equal ranges the later-recorded
/// change goes first so earlier-recorded insertions end up in front.
pub fn apply_text_changes(text: &str, changes: &[TextChange]) -> String {
    let mut order: Vec<usize> = (0..changes.len()).collect();
    order.sort_by(|&a, &b| {
        let (ca, cb) = (&changes[a], &changes[b]);
        cb.span
            .start
            .cmp(&ca.span.start)
            .then(cb.span.length.cmp(&ca.span.length))
            .then(b.cmp(&a))
    });
    let mut result = text.to_string();
    for index in order {
        let change = &changes[index];
        let start = (change.span.start as usize).min(result.len());
        let end = (change.span.end() as usize).min(result.len()).max(start);
        if result.is_char_boundary(start) && result.is_char_boundary(end) {
            result.replace_range(start..end, &change.new_text);
        }
    }
    result
}

#[cfg(test)]
#[path = "../../tests/finalize_tests.rs"]
mod finalize_tests;
