//! Declarative TOML pattern definitions — user-extensible without recompiling.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use vigil_core::errors::PatternError;
use vigil_core::types::{IssueCategory, Language, Severity};

use super::repository::PatternRepository;
use super::types::CompiledPattern;

/// A TOML-defined pattern definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlPatternDef {
    pub id: String,
    pub pattern: String,
    pub severity: String,
    pub category: String,
    pub description: Option<String>,
    pub suggestion: Option<String>,
    pub anchor: Option<String>,
    #[serde(default)]
    pub cwe_ids: Vec<u32>,
    /// Target languages; empty means language-agnostic.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A collection of TOML pattern definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlPatternFile {
    #[serde(default)]
    pub patterns: Vec<TomlPatternDef>,
}

/// A compiled user pattern plus the languages it targets.
pub struct LoadedPattern {
    /// Empty means language-agnostic.
    pub languages: Vec<Language>,
    pub pattern: CompiledPattern,
}

/// Loader for TOML pattern definitions.
pub struct TomlPatternLoader;

impl TomlPatternLoader {
    /// Load patterns from a TOML string.
    pub fn load_from_str(toml_str: &str) -> Result<Vec<LoadedPattern>, PatternError> {
        let file: TomlPatternFile = toml::from_str(toml_str)
            .map_err(|e| PatternError::InvalidPattern(format!("TOML parse error: {e}")))?;

        let mut loaded = Vec::new();
        for def in file.patterns {
            if def.enabled == Some(false) {
                continue;
            }
            loaded.push(Self::compile(def)?);
        }
        Ok(loaded)
    }

    /// Load patterns from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Vec<LoadedPattern>, PatternError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PatternError::InvalidPattern(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::load_from_str(&content)
    }

    /// Install loaded patterns into a repository.
    pub fn apply(
        repo: &mut PatternRepository,
        loaded: Vec<LoadedPattern>,
    ) -> Result<(), PatternError> {
        for entry in loaded {
            if entry.languages.is_empty() {
                repo.extend_agnostic(vec![entry.pattern])?;
            } else {
                for language in &entry.languages {
                    repo.extend_language(*language, vec![entry.pattern.clone()])?;
                }
            }
        }
        Ok(())
    }

    /// Compile a single pattern definition.
    fn compile(def: TomlPatternDef) -> Result<LoadedPattern, PatternError> {
        if def.id.is_empty() {
            return Err(PatternError::InvalidPattern("pattern id is empty".to_string()));
        }
        let severity = Severity::parse_str(&def.severity).ok_or_else(|| {
            PatternError::InvalidPattern(format!(
                "unknown severity '{}' in pattern '{}'",
                def.severity, def.id
            ))
        })?;
        let category = IssueCategory::parse_str(&def.category).ok_or_else(|| {
            PatternError::InvalidPattern(format!(
                "unknown category '{}' in pattern '{}'",
                def.category, def.id
            ))
        })?;
        let mut languages = Vec::new();
        for name in &def.languages {
            languages.push(Language::parse_str(name).ok_or_else(|| {
                PatternError::InvalidPattern(format!(
                    "unknown language '{name}' in pattern '{}'",
                    def.id
                ))
            })?);
        }

        let regex = regex::Regex::new(&def.pattern).map_err(|e| {
            PatternError::CompileFailed(format!("regex error in pattern '{}': {e}", def.id))
        })?;

        let mut cwe_ids = SmallVec::new();
        for id in &def.cwe_ids {
            cwe_ids.push(*id);
        }

        Ok(LoadedPattern {
            languages,
            pattern: CompiledPattern {
                id: def.id,
                regex,
                anchor: def.anchor,
                severity,
                category,
                description: def.description.unwrap_or_default(),
                suggestion: def.suggestion,
                cwe_ids,
            },
        })
    }
}
