//! Supported submission languages.

use serde::{Deserialize, Serialize};

/// Languages the builtin catalogs know about.
///
/// Plugins declare the languages they support; a plugin declaring none is
/// language-agnostic and runs for every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Sql,
}

impl Language {
    /// Parse a language from its lowercase identifier.
    pub fn parse_str(s: &str) -> Option<Language> {
        match s {
            "typescript" => Some(Language::TypeScript),
            "javascript" => Some(Language::JavaScript),
            "python" => Some(Language::Python),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }

    /// Lowercase identifier used in storage and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Sql => "sql",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Sql => "SQL",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
