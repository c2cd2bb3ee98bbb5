//! Diagnostic records.
//!
//! The parser reports syntax errors through these types, and the code-fix
//! layer receives diagnostics (from whatever checker the host runs) in the
//! same shape.

use serde::{Deserialize, Serialize};

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic message attached to a span of one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(file: impl Into<String>, start: u32, length: u32, message: impl Into<String>, code: u32) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
        }
    }

    pub fn end(&self) -> u32 {
        self.start + self.length
    }
}

/// Error codes referenced by the parser and by the code fixes.
pub mod diagnostic_codes {
    pub const EXPECTED: u32 = 1005;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const INVALID_CHARACTER: u32 = 1127;

    pub const CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_SUPER_CALL: u32 = 2377;
    pub const CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE: u32 = 2420;
    pub const CANNOT_ASSIGN_TO_CONST: u32 = 2588;
    pub const PROPERTY_WILL_OVERWRITE_BASE_PROPERTY: u32 = 2612;
    pub const CONDITION_ALWAYS_RETURNS: u32 = 2845;
    pub const OVERRIDE_WITHOUT_BASE_CLASS: u32 = 4112;
    pub const OVERRIDE_NOT_IN_BASE_CLASS: u32 = 4113;
    pub const MEMBER_MUST_HAVE_OVERRIDE: u32 = 4114;
    pub const MEMBER_MUST_HAVE_OVERRIDE_ABSTRACT: u32 = 4116;
    pub const DECLARED_BUT_NEVER_READ: u32 = 6133;
    pub const DECLARED_BUT_NEVER_USED: u32 = 6196;
}
