//! Trivia-adjusted start and end offsets for node edits.
//!
//! A node's `pos` skips its leading trivia and `end` stops at its last token.
//! Deleting exactly that range leaves blank lines and dangling comments
//! behind, so edits widen the range according to `ConfigurableStartEnd`.

use ets_common::comments::{
    get_leading_comment_ranges, get_trailing_comment_ranges, is_jsdoc_comment, is_line_break,
    skip_trivia, skip_whitespaces_and_line_breaks,
};
use ets_common::position::TextRange;
use ets_parser::NodeIndex;

use super::types::{ConfigurableStartEnd, LeadingTriviaOption, TrailingTriviaOption};
use crate::project::ProjectFile;

/// Offsets of one node: trivia start, first token, end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeSpan {
    pub full_start: u32,
    pub start: u32,
    pub end: u32,
}

impl NodeSpan {
    pub(crate) fn of(file: &ProjectFile, node: NodeIndex) -> Option<NodeSpan> {
        let data = file.arena().get(node)?;
        Some(NodeSpan {
            full_start: file.arena().full_start_of(node).min(data.pos),
            start: data.pos,
            end: data.end,
        })
    }
}

pub(crate) fn adjusted_range(
    file: &ProjectFile,
    start_node: NodeSpan,
    end_node: NodeSpan,
    options: ConfigurableStartEnd,
) -> TextRange {
    let pos = adjusted_start(file, start_node, options, false);
    let end = adjusted_end(file, end_node, options);
    TextRange::new(pos, end.max(pos))
}

pub(crate) fn adjusted_start(
    file: &ProjectFile,
    node: NodeSpan,
    options: ConfigurableStartEnd,
    has_trailing_comment: bool,
) -> u32 {
    let text = file.source_text();
    let line_map = file.line_map();
    let NodeSpan {
        full_start, start, ..
    } = node;

    match options.leading_trivia_option {
        Some(LeadingTriviaOption::Exclude) => return start,
        Some(LeadingTriviaOption::StartLine) => {
            let line_start = line_map.line_start_for_offset(start);
            return if line_start >= full_start {
                line_start
            } else {
                start
            };
        }
        Some(LeadingTriviaOption::JSDoc) => {
            let jsdoc = get_leading_comment_ranges(text, full_start)
                .into_iter()
                .find(|comment| comment.pos < start && is_jsdoc_comment(comment, text));
            if let Some(comment) = jsdoc {
                return line_map.line_start_for_offset(comment.pos);
            }
        }
        Some(LeadingTriviaOption::IncludeAll) | None => {}
    }

    if full_start == start {
        return start;
    }
    let full_start_line = line_map.line_of(full_start);
    if full_start_line == line_map.line_of(start) {
        return if options.leading_trivia_option == Some(LeadingTriviaOption::IncludeAll) {
            full_start
        } else {
            start
        };
    }

    if has_trailing_comment {
        let comment = get_leading_comment_ranges(text, full_start)
            .into_iter()
            .next()
            .or_else(|| get_trailing_comment_ranges(text, full_start).into_iter().next());
        if let Some(comment) = comment {
            return skip_trivia(text, comment.end, true, true);
        }
    }

    // Skip the rest of the previous token's line, then blank lines.
    let next_line = if full_start > 0 {
        full_start_line + 1
    } else {
        full_start_line
    };
    let next_line_start = line_map.line_start(next_line).unwrap_or(start);
    let first_content = skip_whitespaces_and_line_breaks(text, next_line_start).min(start);
    line_map.line_start_for_offset(first_content)
}

pub(crate) fn adjusted_end(file: &ProjectFile, node: NodeSpan, options: ConfigurableStartEnd) -> u32 {
    let text = file.source_text();
    let end = node.end;

    match options.trailing_trivia_option {
        Some(TrailingTriviaOption::Exclude) => return end,
        Some(TrailingTriviaOption::ExcludeWhitespace) => {
            let mut comments = get_trailing_comment_ranges(text, end);
            comments.extend(get_leading_comment_ranges(text, end));
            return comments.last().map_or(end, |comment| comment.end.max(end));
        }
        Some(TrailingTriviaOption::Include) | None => {}
    }

    if let Some(multi_line_end) = multi_line_trailing_comment_end(file, node, options) {
        return multi_line_end;
    }

    let new_end = skip_trivia(text, end, true, false);
    let ends_line = new_end > 0
        && text
            .as_bytes()
            .get(new_end as usize - 1)
            .is_some_and(|&b| is_line_break(b));
    if new_end != end
        && (options.trailing_trivia_option == Some(TrailingTriviaOption::Include) || ends_line)
    {
        new_end
    } else {
        end
    }
}

/// End of a block comment that trails the node and runs onto later lines.
fn multi_line_trailing_comment_end(
    file: &ProjectFile,
    node: NodeSpan,
    options: ConfigurableStartEnd,
) -> Option<u32> {
    if options.trailing_trivia_option != Some(TrailingTriviaOption::Include) {
        return None;
    }
    let text = file.source_text();
    let line_map = file.line_map();
    let node_end_line = line_map.line_of(node.end);
    for comment in get_trailing_comment_ranges(text, node.end) {
        if !comment.is_multi_line || line_map.line_of(comment.pos) > node_end_line {
            break;
        }
        if line_map.line_of(comment.end) > node_end_line {
            return Some(skip_trivia(text, comment.end, true, true));
        }
    }
    None
}

/// Width in columns of the whitespace that starts the line containing `pos`.
pub(crate) fn line_indentation(file: &ProjectFile, pos: u32, tab_size: u32) -> u32 {
    let text = file.source_text().as_bytes();
    let line_start = file.line_map().line_start_for_offset(pos) as usize;
    let mut column = 0;
    for &byte in text.iter().skip(line_start) {
        match byte {
            b' ' => column += 1,
            b'\t' => column += tab_size.max(1) - column % tab_size.max(1),
            _ => break,
        }
    }
    column
}
