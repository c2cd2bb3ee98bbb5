//! Flags stored in `Node::flags`.

pub const NONE: u16 = 0;
/// `let` declaration list.
pub const LET: u16 = 1 << 0;
/// `const` declaration list.
pub const CONST: u16 = 1 << 1;
/// Node was produced by error recovery and spans no real source.
pub const MISSING: u16 = 1 << 2;
/// Parse errors were reported inside this node.
pub const THIS_NODE_HAS_ERROR: u16 = 1 << 3;

pub const BLOCK_SCOPED: u16 = LET | CONST;
