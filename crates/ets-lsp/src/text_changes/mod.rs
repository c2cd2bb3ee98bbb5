//! Text-change engine.
//!
//! A `ChangeTracker` session records structural edits (insert, replace,
//! delete, new file) against parsed files and flattens them into per-file
//! text edits. The parse tree is never modified.

mod change_tracker;
mod factory;
mod finalize;
mod insert_options;
mod printer;
mod trivia;
mod types;

pub use change_tracker::{ChangeTracker, TextChangesContext};
pub use factory::SynthNode;
pub use finalize::apply_text_changes;
pub use printer::{NodePrinter, TextPrinter};
pub use types::{
    Change, ChangeNodeOptions, ClassInsertInfo, ConfigurableStartEnd, ContainerKey, DeletedNode,
    FileTextChanges, InsertNodeOptions, LeadingTriviaOption, NewFile, NodeOrNodes,
    ReplaceWithMultipleNodesOptions, TextChange, TrailingTriviaOption,
};
