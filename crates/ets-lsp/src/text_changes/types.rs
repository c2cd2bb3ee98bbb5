//! Change records accumulated by a `ChangeTracker` session.

use ets_common::position::{TextRange, TextSpan};
use ets_parser::NodeIndex;
use serde::Serialize;

use super::factory::SynthNode;
use crate::project::ProjectFile;

/// How much of a node's leading trivia an edit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingTriviaOption {
    /// Start at the node's first token.
    Exclude,
    /// Start at the node's full start when it shares a line with the token.
    IncludeAll,
    /// Start at the line of the node's JSDoc comment, if it has one.
    JSDoc,
    /// Start at the beginning of the node's first line.
    StartLine,
}

/// How much of a node's trailing trivia an edit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingTriviaOption {
    Exclude,
    /// Include trailing comments but not the whitespace after them.
    ExcludeWhitespace,
    Include,
}

/// Trivia policy for the start and end of an adjusted range.
///
/// `None` selects the line-based default: trivia is swallowed up to (and
/// including) the line break when the node owns the rest of its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigurableStartEnd {
    pub leading_trivia_option: Option<LeadingTriviaOption>,
    pub trailing_trivia_option: Option<TrailingTriviaOption>,
}

impl ConfigurableStartEnd {
    pub const fn new(leading: LeadingTriviaOption, trailing: TrailingTriviaOption) -> Self {
        Self {
            leading_trivia_option: Some(leading),
            trailing_trivia_option: Some(trailing),
        }
    }

    /// Raw `[start, end)` of the node, no trivia.
    pub const fn non_adjusted() -> Self {
        Self::new(LeadingTriviaOption::Exclude, TrailingTriviaOption::Exclude)
    }

    pub const fn leading(leading: LeadingTriviaOption) -> Self {
        Self {
            leading_trivia_option: Some(leading),
            trailing_trivia_option: None,
        }
    }
}

/// Whitespace and separators wrapped around an inserted node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertNodeOptions {
    /// Text inserted before the node.
    pub prefix: String,
    /// Text inserted after the node, skipped if the node text already ends with it.
    pub suffix: String,
    /// Indentation in columns for the node's lines.
    pub indentation: Option<u32>,
    /// Extra indentation in columns for every line after the first.
    pub delta: Option<i32>,
}

impl InsertNodeOptions {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    pub fn with_prefix_and_suffix(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceWithMultipleNodesOptions {
    pub insert: InsertNodeOptions,
    /// Separator between nodes, the session's newline when unset.
    pub joiner: Option<String>,
}

/// Trivia policy plus insertion options for node replacements.
///
/// The default covers the raw node range and adds no surrounding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNodeOptions {
    pub range: ConfigurableStartEnd,
    pub insert: InsertNodeOptions,
}

impl Default for ChangeNodeOptions {
    fn default() -> Self {
        Self {
            range: ConfigurableStartEnd::non_adjusted(),
            insert: InsertNodeOptions::default(),
        }
    }
}

/// One recorded edit.
#[derive(Clone)]
pub enum Change<'a> {
    Text {
        file: &'a ProjectFile,
        range: TextRange,
        text: String,
    },
    ReplaceWithSingleNode {
        file: &'a ProjectFile,
        range: TextRange,
        node: SynthNode,
        options: InsertNodeOptions,
    },
    ReplaceWithMultipleNodes {
        file: &'a ProjectFile,
        range: TextRange,
        nodes: Vec<SynthNode>,
        options: ReplaceWithMultipleNodesOptions,
    },
    RemoveNode {
        file: &'a ProjectFile,
        range: TextRange,
    },
}

impl<'a> Change<'a> {
    pub fn file(&self) -> &'a ProjectFile {
        match self {
            Change::Text { file, .. }
            | Change::ReplaceWithSingleNode { file, .. }
            | Change::ReplaceWithMultipleNodes { file, .. }
            | Change::RemoveNode { file, .. } => file,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Change::Text { range, .. }
            | Change::ReplaceWithSingleNode { range, .. }
            | Change::ReplaceWithMultipleNodes { range, .. }
            | Change::RemoveNode { range, .. } => *range,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Change::Text { .. } => "Text",
            Change::ReplaceWithSingleNode { .. } => "ReplaceWithSingleNode",
            Change::ReplaceWithMultipleNodes { .. } => "ReplaceWithMultipleNodes",
            Change::RemoveNode { .. } => "RemoveNode",
        }
    }
}

impl std::fmt::Debug for Change<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.kind_name())
            .field("file", &self.file().file_name())
            .field("range", &self.range())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOrNodes {
    Node(NodeIndex),
    List(Vec<NodeIndex>),
}

/// A deletion by node identity, resolved into ranges at finalization.
#[derive(Clone)]
pub struct DeletedNode<'a> {
    pub file: &'a ProjectFile,
    pub node: NodeOrNodes,
}

/// A file to be created when the session is finalized.
#[derive(Clone)]
pub struct NewFile<'a> {
    /// File whose header comment is copied into the new file.
    pub old_file: Option<&'a ProjectFile>,
    pub file_name: String,
    pub statements: Vec<SynthNode>,
}

/// A container that received insert-at-start edits.
#[derive(Clone, Copy)]
pub struct ClassInsertInfo<'a> {
    pub node: NodeIndex,
    pub file: &'a ProjectFile,
}

/// Stable identity of a container node: its file and start offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerKey {
    pub file_name: String,
    pub pos: u32,
}

/// Text edits for one file, in tsserver's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTextChanges {
    pub file_name: String,
    pub text_changes: Vec<TextChange>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_new_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextChange {
    pub fn new(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            span: range.to_span(),
            new_text: new_text.into(),
        }
    }
}
