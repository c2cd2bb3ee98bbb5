//! Common types and utilities for the ets language tooling.
//!
//! This crate provides foundational types used across all ets crates:
//! - Position/Range types for line/column source locations
//! - Offset ranges (`TextRange`) and wire spans (`TextSpan`)
//! - Diagnostic records and the error codes the code fixes react to

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Location, Position, Range, TextRange, TextSpan};

// Diagnostics produced by the parser and consumed by code fixes
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Comment and trivia scanning utilities
pub mod comments;
pub use comments::{CommentRange, skip_trivia};
