//! Language service core for the ets language tooling.
//!
//! This crate provides the editor-facing features that work over a parsed
//! project:
//! - Text changes: the `ChangeTracker` edit session and its finalization
//! - Type hierarchy and class hierarchy queries
//! - Code fixes keyed by diagnostic error code
//! - Offset to line/column conversion

// Parsed files and their ids
pub mod project;
pub use project::{FileId, Project, ProjectFile};

// Formatting settings and user preferences
pub mod config;
pub use config::{FormatCodeSettings, UserPreferences};

// Syntactic name resolution
pub mod resolver;
pub use resolver::{DeclRef, declaration_from_identifier};

pub mod text_changes;
pub use text_changes::{ChangeTracker, FileTextChanges, SynthNode, TextChange, TextChangesContext};

pub mod hierarchy_utils;

pub mod type_hierarchy;
pub use type_hierarchy::{HierarchyType, TypeHierarchies, TypeHierarchiesInfo, get_type_hierarchies_impl};

pub mod class_hierarchy;
pub use class_hierarchy::{ClassHierarchyItemInfo, ClassRelationDetails, ClassRelationKind, get_class_hierarchies_impl};

pub mod code_actions;
pub use code_actions::{CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixRegistry, CombinedCodeActions};

pub mod position;
pub use position::{LineAndCharacter, to_line_column_offset};
