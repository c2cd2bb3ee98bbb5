//! Offset to line/column conversion for project files.

use ets_common::position::Position;

use crate::project::Project;

/// `{line, character}` of an offset, both 0-based.
pub type LineAndCharacter = Position;

/// Convert `position` in `file_name` to a line and UTF-16 column.
///
/// Offset 0 is always `{0, 0}` and is answered without looking at the file.
/// An unknown file also yields `{0, 0}`.
pub fn to_line_column_offset(project: &Project, file_name: &str, position: u32) -> LineAndCharacter {
    if position == 0 {
        return Position::new(0, 0);
    }
    match project.file(file_name) {
        Some(file) => file.line_map().offset_to_position(position, file.source_text()),
        None => Position::default(),
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
