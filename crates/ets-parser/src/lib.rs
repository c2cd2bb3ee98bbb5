//! Parser and AST types for the ets language tooling.
//!
//! - `parser` - thin-node arena (`NodeArena`, `NodeIndex`, typed data pools)
//!   and the recursive-descent `ParserState`
//! - `syntax` - tree queries used by the language service (touching node,
//!   containing list, declaration names)

pub mod parser;
pub use parser::{Node, NodeArena, NodeIndex, NodeList, ParserState, node_flags, syntax_kind_ext};

pub mod syntax;
