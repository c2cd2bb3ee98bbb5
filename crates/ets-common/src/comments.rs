//! Comment and trivia scanning.
//!
//! Comments are not part of the parse tree, so the text-change engine asks
//! these helpers about the raw text around a node: where trivia ends, which
//! comments trail a token on the same line, and where a file's header
//! comment block stops.

use memchr::memmem;
use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// Create a new comment range.
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

#[inline]
pub fn is_line_break(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

#[inline]
pub fn is_white_space_single_line(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | 0x0B | 0x0C)
}

/// Scan one comment starting at `pos`, if there is one.
pub fn scan_comment_at(source: &str, pos: usize) -> Option<CommentRange> {
    let bytes = source.as_bytes();
    if bytes.get(pos) != Some(&b'/') {
        return None;
    }
    match bytes.get(pos + 1) {
        Some(b'/') => {
            let mut end = pos + 2;
            while end < bytes.len() && !is_line_break(bytes[end]) {
                end += 1;
            }
            Some(CommentRange::new(
                pos as u32,
                end as u32,
                false,
                end < bytes.len(),
            ))
        }
        Some(b'*') => {
            // Unclosed comment runs to the end of the file
            let end = memmem::find(&bytes[pos + 2..], b"*/")
                .map(|i| pos + 2 + i + 2)
                .unwrap_or(bytes.len());
            let has_trailing_new_line = bytes.get(end).is_some_and(|b| is_line_break(*b));
            Some(CommentRange::new(
                pos as u32,
                end as u32,
                true,
                has_trailing_new_line,
            ))
        }
        _ => None,
    }
}

/// Skip whitespace, line breaks and (unless `stop_at_comments`) comments.
///
/// With `stop_after_line_break` the scan stops right after the first line
/// break it consumes.
pub fn skip_trivia(source: &str, pos: u32, stop_after_line_break: bool, stop_at_comments: bool) -> u32 {
    let bytes = source.as_bytes();
    let mut pos = pos as usize;
    while pos < bytes.len() {
        let ch = bytes[pos];
        if ch == b'\r' || ch == b'\n' {
            pos += 1;
            if ch == b'\r' && bytes.get(pos) == Some(&b'\n') {
                pos += 1;
            }
            if stop_after_line_break {
                return pos as u32;
            }
            continue;
        }
        if is_white_space_single_line(ch) {
            pos += 1;
            continue;
        }
        if ch == b'/' && !stop_at_comments {
            if let Some(comment) = scan_comment_at(source, pos) {
                pos = comment.end as usize;
                continue;
            }
        }
        break;
    }
    pos.min(bytes.len()) as u32
}

/// Skip spaces, tabs and line breaks, but not comments.
pub fn skip_whitespaces_and_line_breaks(source: &str, pos: u32) -> u32 {
    let bytes = source.as_bytes();
    let mut pos = pos as usize;
    while pos < bytes.len() && (is_white_space_single_line(bytes[pos]) || is_line_break(bytes[pos])) {
        pos += 1;
    }
    pos as u32
}

/// Comments that start after `pos` on the same line (before the next line break).
pub fn get_trailing_comment_ranges(source: &str, pos: u32) -> Vec<CommentRange> {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut cursor = pos as usize;
    while cursor < bytes.len() {
        let ch = bytes[cursor];
        if is_white_space_single_line(ch) {
            cursor += 1;
            continue;
        }
        if is_line_break(ch) {
            break;
        }
        match scan_comment_at(source, cursor) {
            Some(comment) => {
                cursor = comment.end as usize;
                let single_line = !comment.is_multi_line;
                comments.push(comment);
                if single_line {
                    break;
                }
            }
            None => break,
        }
    }
    comments
}

/// Whether a comment trails `pos` before the next line break.
pub fn has_comments_before_line_break(source: &str, pos: u32) -> bool {
    !get_trailing_comment_ranges(source, pos).is_empty()
}

/// Comments in the trivia that starts at `full_start` and ends at the next token.
pub fn get_leading_comment_ranges(source: &str, full_start: u32) -> Vec<CommentRange> {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut cursor = full_start as usize;
    while cursor < bytes.len() {
        let ch = bytes[cursor];
        if is_white_space_single_line(ch) || is_line_break(ch) {
            cursor += 1;
            continue;
        }
        match scan_comment_at(source, cursor) {
            Some(comment) => {
                cursor = comment.end as usize;
                comments.push(comment);
            }
            None => break,
        }
    }
    comments
}

/// Check if a comment is a JSDoc comment.
pub fn is_jsdoc_comment(comment: &CommentRange, source: &str) -> bool {
    let text = comment.get_text(source);
    text.starts_with("/**") && !text.starts_with("/***")
}

/// Length of a leading `#!` line, including its line break.
pub fn shebang_end(source: &str) -> u32 {
    if !source.starts_with("#!") {
        return 0;
    }
    let bytes = source.as_bytes();
    let mut end = 2;
    while end < bytes.len() && !is_line_break(bytes[end]) {
        end += 1;
    }
    end as u32
}

/// End offset of the header comment block (shebang plus leading comments).
///
/// Returns 0 when the file does not start with trivia of that kind. The
/// returned offset points at the line break following the last header
/// comment, so text inserted there lands on the next line.
pub fn header_comment_end(source: &str) -> u32 {
    let mut end = shebang_end(source);
    for comment in get_leading_comment_ranges(source, end) {
        if !comment.has_trailing_new_line {
            break;
        }
        end = comment.end;
    }
    end
}

#[cfg(test)]
#[path = "../tests/comments_tests.rs"]
mod comments_tests;
