//! Scanner state machine.
//!
//! Produces one token per `scan()` call, skipping trivia. Node offsets in the
//! parse tree are taken from `token_pos()` (start of the token, trivia
//! excluded) and `token_end()`.

use crate::char_codes::{is_digit, is_identifier_part, is_identifier_start};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use ets_common::comments::{scan_comment_at, shebang_end};
use ets_common::diagnostics::diagnostic_codes;
use std::sync::Arc;

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: u32,
    pub length: u32,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let start = shebang_end(&text) as usize;
        ScannerState {
            text,
            pos: start,
            full_start: start,
            token_start: start,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the scanned text.
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn into_text(self) -> Arc<str> {
        self.text
    }

    /// Move the scanner to `pos` without scanning. The next `scan()` starts there.
    pub fn reset_to(&mut self, pos: u32) {
        let pos = (pos as usize).min(self.text.len());
        self.pos = pos;
        self.full_start = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.preceding_line_break = false;
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Identifier text or the cooked value of a literal.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    /// Run `f` and rewind the scanner afterwards.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ScannerState) -> T) -> T {
        let snapshot = self.save_state();
        let result = f(self);
        self.restore_state(snapshot);
        result
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset..)?.chars().next()
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: pos as u32,
            length: length as u32,
            message,
            code,
        });
    }

    /// Skip trivia, then scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.preceding_line_break = false;
        self.token_value.clear();

        loop {
            let bytes = self.text.as_bytes();
            let Some(&byte) = bytes.get(self.pos) else {
                self.token_start = self.pos;
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };
            match byte {
                b'\n' | b'\r' => {
                    self.preceding_line_break = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if matches!(bytes.get(self.pos + 1), Some(b'/') | Some(b'*')) => {
                    if let Some(comment) = scan_comment_at(&self.text, self.pos) {
                        if comment.is_multi_line {
                            let body = comment.get_text(&self.text);
                            let unterminated = !body.ends_with("*/") || body.len() < 4;
                            let has_line_break = body.contains(['\n', '\r']);
                            if unterminated {
                                self.error(
                                    comment.pos as usize,
                                    (comment.end - comment.pos) as usize,
                                    "'*/' expected.",
                                    diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                                );
                            }
                            if has_line_break {
                                self.preceding_line_break = true;
                            }
                        }
                        self.pos = comment.end as usize;
                    }
                }
                _ => break,
            }
        }

        self.token_start = self.pos;
        self.token = self.scan_token();
        self.token
    }

    fn scan_token(&mut self) -> SyntaxKind {
        let Some(ch) = self.peek_char(0) else {
            return SyntaxKind::EndOfFileToken;
        };

        if is_identifier_start(ch) {
            return self.scan_identifier();
        }
        if is_digit(ch) || (ch == '.' && self.peek_char(1).is_some_and(is_digit)) {
            return self.scan_number();
        }

        let next = self.peek_char(1);
        let next2 = self.peek_char(2);
        let (kind, len) = match ch {
            '"' | '\'' => return self.scan_string(ch, SyntaxKind::StringLiteral),
            '`' => return self.scan_string('`', SyntaxKind::NoSubstitutionTemplateLiteral),
            '#' if next.is_some_and(is_identifier_start) => {
                self.pos += 1;
                self.scan_identifier();
                return SyntaxKind::PrivateIdentifier;
            }
            '{' => (SyntaxKind::OpenBraceToken, 1),
            '}' => (SyntaxKind::CloseBraceToken, 1),
            '(' => (SyntaxKind::OpenParenToken, 1),
            ')' => (SyntaxKind::CloseParenToken, 1),
            '[' => (SyntaxKind::OpenBracketToken, 1),
            ']' => (SyntaxKind::CloseBracketToken, 1),
            ';' => (SyntaxKind::SemicolonToken, 1),
            ',' => (SyntaxKind::CommaToken, 1),
            '@' => (SyntaxKind::AtToken, 1),
            ':' => (SyntaxKind::ColonToken, 1),
            '~' => (SyntaxKind::TildeToken, 1),
            '^' => (SyntaxKind::CaretToken, 1),
            '%' => (SyntaxKind::PercentToken, 1),
            '.' => match (next, next2) {
                (Some('.'), Some('.')) => (SyntaxKind::DotDotDotToken, 3),
                _ => (SyntaxKind::DotToken, 1),
            },
            '?' => match next {
                Some('.') if !next2.is_some_and(is_digit) => (SyntaxKind::QuestionDotToken, 2),
                Some('?') => (SyntaxKind::QuestionQuestionToken, 2),
                _ => (SyntaxKind::QuestionToken, 1),
            },
            '<' => match next {
                Some('=') => (SyntaxKind::LessThanEqualsToken, 2),
                _ => (SyntaxKind::LessThanToken, 1),
            },
            // `>>` is left as two tokens so nested type arguments close cleanly
            '>' => match next {
                Some('=') => (SyntaxKind::GreaterThanEqualsToken, 2),
                _ => (SyntaxKind::GreaterThanToken, 1),
            },
            '=' => match (next, next2) {
                (Some('='), Some('=')) => (SyntaxKind::EqualsEqualsEqualsToken, 3),
                (Some('='), _) => (SyntaxKind::EqualsEqualsToken, 2),
                (Some('>'), _) => (SyntaxKind::EqualsGreaterThanToken, 2),
                _ => (SyntaxKind::EqualsToken, 1),
            },
            '!' => match (next, next2) {
                (Some('='), Some('=')) => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
                (Some('='), _) => (SyntaxKind::ExclamationEqualsToken, 2),
                _ => (SyntaxKind::ExclamationToken, 1),
            },
            '+' => match next {
                Some('+') => (SyntaxKind::PlusPlusToken, 2),
                Some('=') => (SyntaxKind::PlusEqualsToken, 2),
                _ => (SyntaxKind::PlusToken, 1),
            },
            '-' => match next {
                Some('-') => (SyntaxKind::MinusMinusToken, 2),
                Some('=') => (SyntaxKind::MinusEqualsToken, 2),
                _ => (SyntaxKind::MinusToken, 1),
            },
            '*' => match next {
                Some('=') => (SyntaxKind::AsteriskEqualsToken, 2),
                _ => (SyntaxKind::AsteriskToken, 1),
            },
            '/' => match next {
                Some('=') => (SyntaxKind::SlashEqualsToken, 2),
                _ => (SyntaxKind::SlashToken, 1),
            },
            '&' => match next {
                Some('&') => (SyntaxKind::AmpersandAmpersandToken, 2),
                _ => (SyntaxKind::AmpersandToken, 1),
            },
            '|' => match next {
                Some('|') => (SyntaxKind::BarBarToken, 2),
                _ => (SyntaxKind::BarToken, 1),
            },
            other => {
                let len = other.len_utf8();
                self.error(
                    self.pos,
                    len,
                    "Invalid character.",
                    diagnostic_codes::INVALID_CHARACTER,
                );
                self.pos += len;
                return SyntaxKind::Unknown;
            }
        };
        self.pos += len;
        kind
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.peek_char(0) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut end = self.pos;
        if bytes.get(end) == Some(&b'0')
            && matches!(bytes.get(end + 1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O'))
        {
            end += 2;
            while end < bytes.len() && (bytes[end].is_ascii_hexdigit() || bytes[end] == b'_') {
                end += 1;
            }
        } else {
            while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'_') {
                end += 1;
            }
            if bytes.get(end) == Some(&b'.') {
                end += 1;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
            if matches!(bytes.get(end), Some(b'e' | b'E')) {
                let mut exp = end + 1;
                if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                    exp += 1;
                }
                if bytes.get(exp).is_some_and(|b| b.is_ascii_digit()) {
                    end = exp;
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                }
            }
        }
        if bytes.get(end) == Some(&b'n') {
            end += 1;
        }
        self.pos = end;
        self.token_value.push_str(&self.text[start..end]);
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: char, kind: SyntaxKind) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek_char(0) else {
                self.error(
                    start,
                    self.pos - start,
                    "Unterminated string literal.",
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if (ch == '\n' || ch == '\r') && quote != '`' {
                self.error(
                    start,
                    self.pos - start,
                    "Unterminated string literal.",
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                if let Some(escaped) = self.peek_char(0) {
                    self.pos += escaped.len_utf8();
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        other => other,
                    });
                }
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        kind
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
