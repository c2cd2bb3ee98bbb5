//! Parser state: token cursor, diagnostics and shared helpers.
//!
//! The grammar itself lives in the `state_*` modules. Every parse function
//! records the start of its first token with `token_pos()` and ends the node
//! at `last_token_end()`, the end of the last token it consumed.

use super::base::{NodeIndex, NodeList};
use super::node::{IdentifierData, NodeArena, SourceFileData};
use super::node_flags;
use super::syntax_kind_ext;
use ets_common::diagnostics::{Diagnostic, diagnostic_codes};
use ets_scanner::{ScannerState, SyntaxKind, scanner_impl::ScannerSnapshot, token_to_string};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// A syntax error reported while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

impl ParseDiagnostic {
    pub fn to_diagnostic(&self, file_name: &str) -> Diagnostic {
        Diagnostic::error(file_name, self.start, self.length, self.message.clone(), self.code)
    }
}

/// Saved parser position for speculative parsing.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    last_token_end: u32,
    diagnostics_len: usize,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) diagnostics: Vec<ParseDiagnostic>,
    /// End offsets of every consumed token, ascending
    pub(crate) token_ends: Vec<u32>,
    pub(crate) last_token_end: u32,
    /// Set while parsing a `for (... in ...)` initializer
    pub(crate) disallow_in: bool,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> ParserState {
        let estimated_nodes = source.len() / 4;
        ParserState {
            scanner: ScannerState::new(source),
            arena: NodeArena::with_capacity(estimated_nodes),
            file_name,
            diagnostics: Vec::new(),
            token_ends: Vec::new(),
            last_token_end: 0,
            disallow_in: false,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Parse the whole file and return the `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        trace!(file = %self.file_name, "parse_source_file");
        self.next_token();
        let statements = self.parse_statement_list(|parser| parser.is_token(SyntaxKind::EndOfFileToken));

        let eof_pos = self.token_pos();
        let end_of_file_token = self
            .arena
            .add_token(SyntaxKind::EndOfFileToken as u16, eof_pos, eof_pos);

        for diag in self.scanner.take_diagnostics() {
            self.diagnostics.push(ParseDiagnostic {
                start: diag.pos,
                length: diag.length,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.diagnostics.sort_by_key(|d| d.start);

        let text: Arc<str> = self.scanner.shared_text();
        let end = text.len() as u32;
        let root = self.arena.add_source_file(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end,
            SourceFileData {
                statements,
                end_of_file_token,
                file_name: self.file_name.clone(),
                text,
            },
        );
        self.arena.set_full_starts(&self.token_ends);
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );
        root
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    /// End of the last consumed token; node ends are taken from here.
    #[inline]
    pub(crate) fn last_token_end(&self) -> u32 {
        self.last_token_end
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        if self.token() != SyntaxKind::Unknown || self.token_end() > self.token_pos() {
            let end = self.token_end();
            self.last_token_end = end;
            if self.token_ends.last().is_none_or(|&last| last < end) {
                self.token_ends.push(end);
            }
        }
        self.scanner.scan()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." at the current token.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = token_to_string(kind).unwrap_or("token");
        self.parse_error_at_current_token(&format!("'{text}' expected."), diagnostic_codes::EXPECTED);
        false
    }

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        // One error per position keeps recovery from cascading
        if self.diagnostics.last().is_some_and(|d| d.start == start) {
            return;
        }
        trace!(pos = start, code, message, "parse_error");
        self.diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    /// A statement may end here: `;`, `}`, end of file, or a line break before the next token.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn save_state(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            last_token_end: self.last_token_end,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub(crate) fn restore_state(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.last_token_end = snapshot.last_token_end;
        self.diagnostics.truncate(snapshot.diagnostics_len);
        let end = self.last_token_end;
        let keep = self.token_ends.partition_point(|&e| e <= end);
        self.token_ends.truncate(keep);
    }

    /// Run `f` and rewind to the current token afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.save_state();
        let result = f(self);
        self.restore_state(snapshot);
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|parser| parser.next_token())
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    #[inline]
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.token().is_identifier_or_keyword()
    }

    /// Identifier usable in a binding or reference position.
    #[inline]
    pub(crate) fn is_identifier(&self) -> bool {
        self.token().is_identifier_like()
    }

    fn create_identifier_from_current(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let end = self.token_end();
        let text = self.scanner.token_value().to_string();
        let kind = if self.is_token(SyntaxKind::PrivateIdentifier) {
            SyntaxKind::PrivateIdentifier
        } else {
            SyntaxKind::Identifier
        };
        self.next_token();
        self.arena
            .add_identifier(kind as u16, start, end, IdentifierData { escaped_text: text })
    }

    /// Zero-width identifier used for error recovery.
    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.last_token_end();
        let idx = self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            pos,
            IdentifierData {
                escaped_text: String::new(),
            },
        );
        self.arena.set_flags(idx, node_flags::MISSING);
        idx
    }

    /// Parse an identifier in a binding or reference position.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.create_identifier_from_current();
        }
        self.parse_error_at_current_token("Identifier expected.", diagnostic_codes::IDENTIFIER_EXPECTED);
        self.create_missing_identifier()
    }

    /// Parse an identifier where reserved words are allowed (property names).
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() || self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.create_identifier_from_current();
        }
        self.parse_error_at_current_token("Identifier expected.", diagnostic_codes::IDENTIFIER_EXPECTED);
        self.create_missing_identifier()
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Parse `element (, element)*` up to `is_end`, allowing a trailing comma.
    pub(crate) fn parse_delimited_list(
        &mut self,
        is_end: impl Fn(&ParserState) -> bool,
        mut parse_element: impl FnMut(&mut ParserState) -> NodeIndex,
    ) -> NodeList {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        let mut has_trailing_comma = false;
        while !is_end(self) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            nodes.push(parse_element(self));
            has_trailing_comma = false;
            if self.parse_optional(SyntaxKind::CommaToken) {
                has_trailing_comma = true;
                continue;
            }
            if is_end(self) {
                break;
            }
            self.parse_expected(SyntaxKind::CommaToken);
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                // `;` used where `,` belongs: keep going as if it were a comma
                continue;
            }
            if self.token_pos() == before {
                // no progress: drop the offending token
                self.next_token();
            }
        }
        let end = if nodes.is_empty() { pos } else { self.last_token_end() };
        NodeList {
            nodes,
            pos,
            end,
            has_trailing_comma,
        }
    }

    /// Parse statements until `is_end` holds (the closing token is not consumed).
    pub(crate) fn parse_statement_list(&mut self, is_end: impl Fn(&ParserState) -> bool) -> NodeList {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while !is_end(self) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                nodes.push(statement);
            }
            if self.token_pos() == before && !is_end(self) {
                self.parse_error_at_current_token(
                    "Declaration or statement expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        let end = if nodes.is_empty() { pos } else { self.last_token_end() };
        NodeList::new(nodes, pos, end)
    }
}
