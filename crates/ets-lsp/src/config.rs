//! Editor settings consumed by the text-change engine and the code fixes.
//!
//! Both structs deserialize from the tsserver-style camelCase JSON shape and
//! fall back to defaults for every missing key.

use serde::{Deserialize, Serialize};

/// How generated statements end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemicolonPreference {
    /// Keep whatever the printer produces (semicolons on).
    #[default]
    Ignore,
    Insert,
    Remove,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotePreference {
    #[default]
    Auto,
    Double,
    Single,
}

/// Formatting settings captured by a change-tracker session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatCodeSettings {
    /// Indentation width in columns.
    pub indent_size: u32,
    pub tab_size: u32,
    /// Line terminator used for every inserted line break.
    pub new_line_character: String,
    pub convert_tabs_to_spaces: bool,
    pub insert_space_after_comma_delimiter: bool,
    pub semicolons: SemicolonPreference,
}

impl Default for FormatCodeSettings {
    fn default() -> Self {
        Self {
            indent_size: 4,
            tab_size: 4,
            new_line_character: "\n".to_string(),
            convert_tabs_to_spaces: true,
            insert_space_after_comma_delimiter: true,
            semicolons: SemicolonPreference::Ignore,
        }
    }
}

impl FormatCodeSettings {
    /// Parse settings from JSON, filling missing keys with defaults.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid format settings: {e}"))
    }

    /// Whitespace for `columns` of indentation under these settings.
    pub fn indent_string(&self, columns: u32) -> String {
        if self.convert_tabs_to_spaces || self.tab_size == 0 {
            return " ".repeat(columns as usize);
        }
        let tabs = columns / self.tab_size;
        let spaces = columns % self.tab_size;
        let mut out = "\t".repeat(tabs as usize);
        out.push_str(&" ".repeat(spaces as usize));
        out
    }

    /// Statement terminator for generated code.
    pub fn statement_terminator(&self) -> &'static str {
        match self.semicolons {
            SemicolonPreference::Remove => "",
            SemicolonPreference::Ignore | SemicolonPreference::Insert => ";",
        }
    }

    pub fn comma_separator(&self) -> &'static str {
        if self.insert_space_after_comma_delimiter { ", " } else { "," }
    }
}

/// User preferences that influence generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub quote_preference: QuotePreference,
}

impl UserPreferences {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid user preferences: {e}"))
    }

    /// Quote character for generated string literals.
    pub fn quote_char(&self) -> char {
        match self.quote_preference {
            QuotePreference::Single => '\'',
            QuotePreference::Auto | QuotePreference::Double => '"',
        }
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
