#![warn(missing_docs)]
//! `codeview-lang` - data-driven language configuration for codeview.
//!
//! This crate intentionally stays lightweight and does **not** depend on the tokeniser. It
//! provides small serde-friendly structs describing the lexical surface of a language
//! (comments, literals, identifiers, keywords); `codeview-highlight` turns them into a token
//! dictionary.
//!
//! Configurations are either built in ([`LanguageConfiguration::swift`],
//! [`LanguageConfiguration::haskell`], [`LanguageConfiguration::none`]) or loaded from YAML:
//!
//! ```rust
//! use codeview_lang::LanguageConfiguration;
//!
//! let yaml = r##"
//! name: Mini
//! comments:
//!   line: "#"
//! identifier_regex: "[a-z]+"
//! reserved_identifiers: [let, in]
//! "##;
//!
//! let config = LanguageConfiguration::from_yaml_str(yaml).unwrap();
//! assert_eq!(config.comments.line.as_deref(), Some("#"));
//! assert!(!config.comments.has_block());
//! ```

mod error;

pub use error::LanguageConfigError;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Comment tokens for a given language.
///
/// Block comments nest: every `block_start` inside a block comment opens a further level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `--`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`, `{-`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`, `-}`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            line: None,
            block_start: Some(start.into()),
            block_end: Some(end.into()),
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Lexical description of a programming language.
///
/// Regex fields use the `regex` crate syntax and must match within a single line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfiguration {
    /// Display name.
    pub name: String,
    /// Comment tokens.
    pub comments: CommentConfig,
    /// String literals.
    pub string_regex: Option<String>,
    /// Character literals.
    pub character_regex: Option<String>,
    /// Number literals.
    pub number_regex: Option<String>,
    /// Identifiers.
    pub identifier_regex: Option<String>,
    /// Identifiers highlighted as keywords (matched at word boundaries).
    pub reserved_identifiers: Vec<String>,
}

impl LanguageConfiguration {
    /// Plain text: brackets only.
    pub fn none() -> Self {
        Self {
            name: "Text".to_string(),
            ..Self::default()
        }
    }

    /// Swift.
    pub fn swift() -> Self {
        Self {
            name: "Swift".to_string(),
            comments: CommentConfig::line_and_block("//", "/*", "*/"),
            string_regex: Some(r#""(?:\\.|[^"\\\r\n])*""#.to_string()),
            character_regex: None,
            number_regex: Some(
                r"(?:0b[01_]+|0o[0-7_]+|0x[0-9A-Fa-f_]+|[0-9][0-9_]*(?:\.[0-9][0-9_]*)?(?:[eE][+-]?[0-9][0-9_]*)?)"
                    .to_string(),
            ),
            identifier_regex: Some(r"[A-Za-z_][A-Za-z0-9_]*".to_string()),
            reserved_identifiers: words(&[
                "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
                "import", "init", "inout", "internal", "let", "open", "operator", "private",
                "protocol", "public", "rethrows", "static", "struct", "subscript", "typealias",
                "var", "break", "case", "continue", "default", "defer", "do", "else",
                "fallthrough", "for", "guard", "if", "in", "repeat", "return", "switch", "where",
                "while", "as", "Any", "catch", "false", "is", "nil", "super", "self", "Self",
                "throw", "throws", "true", "try",
            ]),
        }
    }

    /// Haskell.
    pub fn haskell() -> Self {
        Self {
            name: "Haskell".to_string(),
            comments: CommentConfig::line_and_block("--", "{-", "-}"),
            string_regex: Some(r#""(?:\\.|[^"\\\r\n])*""#.to_string()),
            character_regex: Some(r"'(?:\\.|[^'\\\r\n])'".to_string()),
            number_regex: Some(
                r"(?:0[xX][0-9A-Fa-f]+|0[oO][0-7]+|[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)"
                    .to_string(),
            ),
            identifier_regex: Some(r"[A-Za-z_][A-Za-z0-9_']*".to_string()),
            reserved_identifiers: words(&[
                "case", "class", "data", "default", "deriving", "do", "else", "foreign", "if",
                "import", "in", "infix", "infixl", "infixr", "instance", "let", "module",
                "newtype", "of", "then", "type", "where",
            ]),
        }
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LanguageConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LanguageConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, LanguageConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| word.to_string()).collect()
}
