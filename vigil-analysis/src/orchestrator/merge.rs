//! Merging plugin outputs into one deterministic result.

use vigil_core::types::{Issue, Metrics};

use crate::plugins::PluginOutput;

/// Concatenate issues and merge metric maps from successful plugins.
///
/// Metric collisions keep the maximum value, so no plugin can mask another's
/// worse measurement.
pub fn merge_outputs(outputs: Vec<PluginOutput>) -> (Vec<Issue>, Metrics) {
    let mut issues = Vec::new();
    let mut metrics = Metrics::default();

    for output in outputs {
        issues.extend(output.issues);
        for (key, value) in output.metrics {
            metrics
                .entry(key)
                .and_modify(|existing| {
                    if value > *existing {
                        *existing = value;
                    }
                })
                .or_insert(value);
        }
    }

    (issues, metrics)
}

/// Deterministic issue order: (file, line, severity descending).
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(b.severity.cmp(&a.severity))
            .then(a.rule_id.cmp(&b.rule_id))
    });
}

/// Distinct suggestions in issue order.
pub fn collect_suggestions(issues: &[Issue]) -> Vec<String> {
    let mut suggestions = Vec::new();
    for issue in issues {
        if let Some(s) = &issue.suggestion {
            if !suggestions.iter().any(|existing| existing == s) {
                suggestions.push(s.clone());
            }
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::types::{IssueCategory, Severity};

    fn issue(file: &str, line: u32, severity: Severity) -> Issue {
        Issue {
            rule_id: format!("r-{file}-{line}-{severity:?}"),
            severity,
            category: IssueCategory::Security,
            message: String::new(),
            file: file.to_string(),
            line,
            column: None,
            snippet: String::new(),
            suggestion: None,
            cwe_ids: Default::default(),
        }
    }

    #[test]
    fn metric_collisions_keep_maximum() {
        let mut a = PluginOutput::empty();
        a.metrics.insert("complexity".to_string(), 3.0);
        let mut b = PluginOutput::empty();
        b.metrics.insert("complexity".to_string(), 7.0);

        let (_, merged) = merge_outputs(vec![a, b]);
        assert_eq!(merged.get("complexity"), Some(&7.0));
    }

    #[test]
    fn issues_sort_by_file_line_severity_desc() {
        let mut issues = vec![
            issue("b.ts", 1, Severity::Low),
            issue("a.ts", 9, Severity::Low),
            issue("a.ts", 2, Severity::Low),
            issue("a.ts", 2, Severity::Critical),
        ];
        sort_issues(&mut issues);

        assert_eq!(issues[0].file, "a.ts");
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[1].severity, Severity::Low);
        assert_eq!(issues[2].line, 9);
        assert_eq!(issues[3].file, "b.ts");
    }

    #[test]
    fn suggestions_deduplicate_in_order() {
        let mut first = issue("a.ts", 1, Severity::Low);
        first.suggestion = Some("fix A".to_string());
        let mut second = issue("a.ts", 2, Severity::Low);
        second.suggestion = Some("fix B".to_string());
        let mut third = issue("a.ts", 3, Severity::Low);
        third.suggestion = Some("fix A".to_string());

        let suggestions = collect_suggestions(&[first, second, third]);
        assert_eq!(suggestions, vec!["fix A".to_string(), "fix B".to_string()]);
    }
}
