//! Complexity analyzer — language-agnostic size and branching metrics.
//!
//! Heuristic by design: decision points are counted lexically, not parsed.

use vigil_core::errors::AnalyzeError;
use vigil_core::traits::Cancellable;
use vigil_core::types::{Issue, IssueCategory, Language, Metrics, Severity};

use super::traits::{AnalysisRequest, AnalyzerPlugin, PluginOutput};

const CATEGORIES: &[IssueCategory] = &[IssueCategory::Quality];

/// Keywords that open a branch in the languages the engine sees.
const DECISION_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "case", "when", "catch", "except", "and", "or",
];

/// Tokens that begin a function definition.
const FUNCTION_MARKERS: &[&str] = &["function", "def", "fn", "proc"];

pub struct ComplexityAnalyzer;

impl AnalyzerPlugin for ComplexityAnalyzer {
    fn name(&self) -> &str {
        "complexity"
    }

    fn languages(&self) -> &[Language] {
        // Language-agnostic.
        &[]
    }

    fn categories(&self) -> &[IssueCategory] {
        CATEGORIES
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<PluginOutput, AnalyzeError> {
        let text = request.text(self.name())?;
        if request.cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }

        let mut lines_of_code = 0u32;
        let mut comment_lines = 0u32;
        let mut functions = 0u32;
        let mut decision_points = 0u32;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            lines_of_code += 1;
            if is_comment(trimmed) {
                comment_lines += 1;
                continue;
            }
            decision_points += count_operators(trimmed);
            for word in words(trimmed) {
                if FUNCTION_MARKERS.contains(&word) {
                    functions += 1;
                } else if DECISION_KEYWORDS.contains(&word) {
                    decision_points += 1;
                }
            }
        }

        let complexity = if lines_of_code == 0 {
            0.0
        } else {
            1.0 + decision_points as f64 / functions.max(1) as f64
        };
        let comment_ratio = if lines_of_code == 0 {
            0.0
        } else {
            comment_lines as f64 / lines_of_code as f64
        };

        let mut issues = Vec::new();
        let threshold = request.config.effective_max_complexity();
        if complexity > threshold {
            issues.push(Issue {
                rule_id: "complexity-over-threshold".to_string(),
                severity: Severity::Medium,
                category: IssueCategory::Quality,
                message: format!(
                    "Average branch complexity {complexity:.1} exceeds threshold {threshold:.1}"
                ),
                file: request.filename.to_string(),
                line: 1,
                column: None,
                snippet: String::new(),
                suggestion: Some("Extract smaller functions".to_string()),
                cwe_ids: Default::default(),
            });
        }

        let mut metrics = Metrics::default();
        metrics.insert("complexity".to_string(), complexity);
        metrics.insert("functions".to_string(), functions as f64);
        metrics.insert("lines_of_code".to_string(), lines_of_code as f64);
        metrics.insert("comment_ratio".to_string(), comment_ratio);

        Ok(PluginOutput { issues, metrics })
    }
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.starts_with("--")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}

fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
}

fn count_operators(line: &str) -> u32 {
    (line.matches("&&").count() + line.matches("||").count()) as u32
}
