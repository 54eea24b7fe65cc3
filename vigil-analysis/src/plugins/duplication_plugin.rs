//! Duplication analyzer — xxh3 line-window hashing over normalized source.

use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_64;

use vigil_core::errors::AnalyzeError;
use vigil_core::traits::Cancellable;
use vigil_core::types::{Issue, IssueCategory, Language, Metrics, Severity};

use super::traits::{AnalysisRequest, AnalyzerPlugin, PluginOutput};

const CATEGORIES: &[IssueCategory] = &[IssueCategory::Quality];

/// Consecutive significant lines hashed together.
const WINDOW: usize = 3;

pub struct DuplicationAnalyzer;

impl AnalyzerPlugin for DuplicationAnalyzer {
    fn name(&self) -> &str {
        "duplication"
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

        // Significant lines only: trimmed, non-blank, non-comment.
        let significant: Vec<(u32, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| ((i + 1) as u32, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !is_comment(l))
            .collect();

        let mut issues = Vec::new();
        let mut first_seen: FxHashMap<u64, u32> = FxHashMap::default();
        let mut total_windows = 0u32;
        let mut duplicated_windows = 0u32;

        for window in significant.windows(WINDOW) {
            total_windows += 1;
            let mut buf = String::new();
            for (_, line) in window {
                buf.push_str(line);
                buf.push('\n');
            }
            let hash = xxh3_64(buf.as_bytes());
            let line_no = window[0].0;

            match first_seen.get(&hash) {
                None => {
                    first_seen.insert(hash, line_no);
                }
                Some(&original) => {
                    duplicated_windows += 1;
                    issues.push(Issue {
                        rule_id: "duplicate-block".to_string(),
                        severity: Severity::Low,
                        category: IssueCategory::Quality,
                        message: format!(
                            "Duplicated block of {WINDOW} lines (first seen at line {original})"
                        ),
                        file: request.filename.to_string(),
                        line: line_no,
                        column: None,
                        snippet: window[0].1.to_string(),
                        suggestion: Some("Extract the repeated block".to_string()),
                        cwe_ids: Default::default(),
                    });
                }
            }
        }

        let ratio = if total_windows == 0 {
            0.0
        } else {
            duplicated_windows as f64 / total_windows as f64
        };

        let mut metrics = Metrics::default();
        metrics.insert("duplication_ratio".to_string(), ratio);
        metrics.insert("duplicate_blocks".to_string(), duplicated_windows as f64);

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
