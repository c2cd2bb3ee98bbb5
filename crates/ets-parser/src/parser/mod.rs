//! Thin-node AST and parser state.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::*;

pub mod syntax_kind_ext;
pub mod node_flags;

mod node_access;
mod node_arena;

pub mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_expressions;
mod state_statements;
mod state_statements_class_members;
mod state_types;

#[cfg(test)]
#[path = "../../tests/state_statement_tests.rs"]
mod state_statement_tests;

#[cfg(test)]
#[path = "../../tests/state_expression_tests.rs"]
mod state_expression_tests;
