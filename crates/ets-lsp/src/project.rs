//! Project container for multi-file language service operations.
//!
//! Holds the parsed files, their line maps and stable file ids. File order is
//! the order files were added, which is the order every whole-project walk
//! (sub-type search, cross-file name resolution) visits them in.

use std::sync::Arc;

use ets_common::position::LineMap;
use ets_parser::parser::ParseDiagnostic;
use ets_parser::{NodeArena, NodeIndex, NodeList, ParserState};
use indexmap::IndexMap;
use tracing::debug;

/// Stable identity of a file inside one `Project`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct FileId(pub u32);

/// Parsed file state used by language service features.
pub struct ProjectFile {
    pub(crate) id: FileId,
    pub(crate) file_name: String,
    pub(crate) root: NodeIndex,
    pub(crate) arena: NodeArena,
    pub(crate) text: Arc<str>,
    pub(crate) line_map: LineMap,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
}

impl ProjectFile {
    /// Parse a single source file.
    pub fn new(id: FileId, file_name: String, source_text: String) -> Self {
        let mut parser = ParserState::new(file_name.clone(), source_text);
        let root = parser.parse_source_file();
        let parse_diagnostics = parser.get_diagnostics().to_vec();
        let arena = parser.into_arena();
        let text = arena
            .get_source_file_at(root)
            .map(|sf| Arc::clone(&sf.text))
            .unwrap_or_else(|| Arc::from(""));
        let line_map = LineMap::build(&text);

        Self {
            id,
            file_name,
            root,
            arena,
            text,
            line_map,
            parse_diagnostics,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    /// File name used in results.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Root node of the parsed source file.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Arena containing parsed nodes.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Line map for offset <-> position conversions.
    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Original source text for this file.
    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub(crate) fn shared_text(&self) -> &Arc<str> {
        &self.text
    }

    /// Syntax errors reported while parsing.
    pub fn parse_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    /// Top-level statements of the file.
    pub fn statements(&self) -> Option<&NodeList> {
        self.arena.get_source_file_at(self.root).map(|sf| &sf.statements)
    }

    /// Whether the node exists in this file's arena.
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.arena.get(node).is_some()
    }
}

/// Multi-file container for language service operations.
#[derive(Default)]
pub struct Project {
    pub(crate) files: IndexMap<String, ProjectFile>,
}

impl Project {
    /// Create a new empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of files tracked by the project.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Add or replace a file, re-parsing its contents.
    ///
    /// A replaced file keeps its id and its place in the file order.
    pub fn set_file(&mut self, file_name: String, source_text: String) -> FileId {
        let id = match self.files.get_index_of(&file_name) {
            Some(index) => FileId(index as u32),
            None => FileId(self.files.len() as u32),
        };
        let file = ProjectFile::new(id, file_name.clone(), source_text);
        debug!(file = %file_name, id = id.0, "set project file");
        self.files.insert(file_name, file);
        id
    }

    /// Fetch a file by name.
    pub fn file(&self, file_name: &str) -> Option<&ProjectFile> {
        self.files.get(file_name)
    }

    /// Fetch a file by id.
    pub fn file_by_id(&self, id: FileId) -> Option<&ProjectFile> {
        self.files.get_index(id.0 as usize).map(|(_, file)| file)
    }

    /// Files in the order they were added.
    pub fn files(&self) -> impl Iterator<Item = &ProjectFile> {
        self.files.values()
    }
}
