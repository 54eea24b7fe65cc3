//! Pattern definitions and their compiled form.

use regex::Regex;
use smallvec::SmallVec;

use vigil_core::errors::PatternError;
use vigil_core::types::{IssueCategory, Severity};

/// A declarative detection rule. The builtin catalogs are tables of these.
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub id: &'static str,
    /// Regex source, matched line-wise.
    pub pattern: &'static str,
    /// Literal guaranteed to occur in any match; drives the aho-corasick
    /// prefilter. `None` means the regex always runs.
    pub anchor: Option<&'static str>,
    pub severity: Severity,
    pub category: IssueCategory,
    pub description: &'static str,
    pub suggestion: Option<&'static str>,
    pub cwe_ids: &'static [u32],
}

/// A rule compiled and ready for matching. Immutable after construction.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub id: String,
    pub regex: Regex,
    pub anchor: Option<String>,
    pub severity: Severity,
    pub category: IssueCategory,
    pub description: String,
    pub suggestion: Option<String>,
    pub cwe_ids: SmallVec<[u32; 2]>,
}

impl CompiledPattern {
    /// Compile a builtin definition.
    pub fn from_def(def: &PatternDef) -> Result<Self, PatternError> {
        let regex = Regex::new(def.pattern).map_err(|e| {
            PatternError::CompileFailed(format!("rule '{}': {e}", def.id))
        })?;
        Ok(Self {
            id: def.id.to_string(),
            regex,
            anchor: def.anchor.map(str::to_string),
            severity: def.severity,
            category: def.category,
            description: def.description.to_string(),
            suggestion: def.suggestion.map(str::to_string),
            cwe_ids: def.cwe_ids.iter().copied().collect(),
        })
    }
}
