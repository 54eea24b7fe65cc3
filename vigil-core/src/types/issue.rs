//! Issues — one detected problem instance per pattern match.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Issue severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn parse_str(s: &str) -> Option<Severity> {
        match s {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// The dimension an issue counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Security,
    Quality,
    Performance,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Security => "security",
            IssueCategory::Quality => "quality",
            IssueCategory::Performance => "performance",
        }
    }

    pub fn parse_str(s: &str) -> Option<IssueCategory> {
        match s {
            "security" => Some(IssueCategory::Security),
            "quality" => Some(IssueCategory::Quality),
            "performance" => Some(IssueCategory::Performance),
            _ => None,
        }
    }
}

/// One detected problem instance.
///
/// Ephemeral per analysis run until persisted as part of an [`Analysis`].
///
/// [`Analysis`]: crate::types::Analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Identifier of the pattern that produced this issue.
    pub rule_id: String,
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    pub column: Option<u32>,
    /// The matched source line, trimmed.
    pub snippet: String,
    pub suggestion: Option<String>,
    /// CWE identifiers carried over from the pattern, if any.
    #[serde(default)]
    pub cwe_ids: SmallVec<[u32; 2]>,
}
