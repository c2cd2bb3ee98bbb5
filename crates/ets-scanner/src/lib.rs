//! Scanner/tokenizer for the ets language tooling.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, token_to_string};

pub mod scanner_impl;
pub use scanner_impl::ScannerState;
