//! Tree queries shared by the language service.

pub mod node_utils;
pub use node_utils::{
    TokenInfo, child_lists, find_node_at_offset, find_touching_node, get_containing_list, scan_token_at,
};

#[cfg(test)]
#[path = "../../tests/node_utils_tests.rs"]
mod node_utils_tests;
