//! Scoring engine — pure, total, deterministic functions of (issues, metrics).
//!
//! Security, complexity, and performance are on a 0–10 scale; quality is 0–1.
//! Empty input yields the maximum of every score, and adding an issue never
//! raises the score of its category.

use vigil_core::types::{Issue, IssueCategory, Metrics, Severity};

/// Per-issue penalty, weighted by severity.
pub const WEIGHT_CRITICAL: f64 = 4.0;
pub const WEIGHT_HIGH: f64 = 2.5;
pub const WEIGHT_MEDIUM: f64 = 1.0;
pub const WEIGHT_LOW: f64 = 0.3;

/// Fixed weights of the global score.
const GLOBAL_SECURITY: f64 = 0.4;
const GLOBAL_QUALITY: f64 = 0.3;
const GLOBAL_COMPLEXITY: f64 = 0.2;
const GLOBAL_PERFORMANCE: f64 = 0.1;

/// All five scores of one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSet {
    pub security: f64,
    pub complexity: f64,
    pub performance: f64,
    /// 0–1 scale.
    pub quality: f64,
    pub global: f64,
}

/// Severity penalty weight.
pub fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => WEIGHT_CRITICAL,
        Severity::High => WEIGHT_HIGH,
        Severity::Medium => WEIGHT_MEDIUM,
        Severity::Low => WEIGHT_LOW,
    }
}

/// Security score: 10 minus the weighted penalty of security issues,
/// floored at 0.
pub fn security_score(issues: &[Issue]) -> f64 {
    category_score(issues, IssueCategory::Security)
}

/// Performance score, analogous to the security score.
pub fn performance_score(issues: &[Issue]) -> f64 {
    category_score(issues, IssueCategory::Performance)
}

fn category_score(issues: &[Issue], category: IssueCategory) -> f64 {
    let penalty: f64 = issues
        .iter()
        .filter(|i| i.category == category)
        .map(|i| severity_weight(i.severity))
        .sum();
    (10.0 - penalty).max(0.0)
}

/// Complexity score: inverse of the raw complexity metric, clipped to [0, 10].
/// A missing metric means nothing was measured and scores maximum.
pub fn complexity_score(metrics: &Metrics) -> f64 {
    let raw = metrics.get("complexity").copied().unwrap_or(0.0);
    (10.0 - raw).clamp(0.0, 10.0)
}

/// Quality score on a 0–1 scale.
///
/// Penalties: duplication ratio (up to 0.4), quality-issue density with an
/// exponential falloff (up to 0.4), and a low comment ratio (up to 0.2, only
/// when the metric was measured).
pub fn quality_score(issues: &[Issue], metrics: &Metrics) -> f64 {
    let duplication = metrics
        .get("duplication_ratio")
        .copied()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let quality_issues = issues
        .iter()
        .filter(|i| i.category == IssueCategory::Quality)
        .count() as f64;

    let duplication_penalty = 0.4 * duplication;
    let density_penalty = 0.4 * (1.0 - (-0.05 * quality_issues).exp());
    let comment_penalty = match metrics.get("comment_ratio") {
        Some(ratio) => 0.2 * (1.0 - (ratio / 0.1).clamp(0.0, 1.0)),
        None => 0.0,
    };

    (1.0 - duplication_penalty - density_penalty - comment_penalty).clamp(0.0, 1.0)
}

/// Global score: fixed-weight average of the four sub-scores, quality scaled
/// onto the common 0–10 range.
pub fn global_score(security: f64, quality: f64, complexity: f64, performance: f64) -> f64 {
    GLOBAL_SECURITY * security
        + GLOBAL_QUALITY * (quality * 10.0)
        + GLOBAL_COMPLEXITY * complexity
        + GLOBAL_PERFORMANCE * performance
}

/// Compute all five scores from merged issues and metrics.
pub fn score(issues: &[Issue], metrics: &Metrics) -> ScoreSet {
    let security = security_score(issues);
    let complexity = complexity_score(metrics);
    let performance = performance_score(issues);
    let quality = quality_score(issues, metrics);
    let global = global_score(security, quality, complexity, performance);
    ScoreSet {
        security,
        complexity,
        performance,
        quality,
        global,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::types::Severity;

    fn issue(category: IssueCategory, severity: Severity) -> Issue {
        Issue {
            rule_id: "r".to_string(),
            severity,
            category,
            message: String::new(),
            file: "f".to_string(),
            line: 1,
            column: None,
            snippet: String::new(),
            suggestion: None,
            cwe_ids: Default::default(),
        }
    }

    #[test]
    fn empty_input_scores_maximum() {
        let scores = score(&[], &Metrics::default());
        assert_eq!(scores.security, 10.0);
        assert_eq!(scores.complexity, 10.0);
        assert_eq!(scores.performance, 10.0);
        assert_eq!(scores.quality, 1.0);
        assert_eq!(scores.global, 10.0);
    }

    #[test]
    fn one_high_security_issue_costs_its_weight() {
        let issues = vec![issue(IssueCategory::Security, Severity::High)];
        assert_eq!(security_score(&issues), 7.5);
    }

    #[test]
    fn security_score_floors_at_zero() {
        let issues: Vec<Issue> = (0..10)
            .map(|_| issue(IssueCategory::Security, Severity::Critical))
            .collect();
        assert_eq!(security_score(&issues), 0.0);
    }

    #[test]
    fn other_categories_do_not_touch_security() {
        let issues = vec![
            issue(IssueCategory::Quality, Severity::Critical),
            issue(IssueCategory::Performance, Severity::Critical),
        ];
        assert_eq!(security_score(&issues), 10.0);
    }

    #[test]
    fn complexity_score_is_clipped_inverse() {
        let mut metrics = Metrics::default();
        metrics.insert("complexity".to_string(), 3.0);
        assert_eq!(complexity_score(&metrics), 7.0);

        metrics.insert("complexity".to_string(), 25.0);
        assert_eq!(complexity_score(&metrics), 0.0);
    }

    #[test]
    fn quality_penalizes_duplication() {
        let mut metrics = Metrics::default();
        metrics.insert("duplication_ratio".to_string(), 0.5);
        let q = quality_score(&[], &metrics);
        assert!((q - 0.8).abs() < 1e-12);
    }

    #[test]
    fn comment_penalty_applies_only_when_measured() {
        // No comment_ratio key: no penalty.
        assert_eq!(quality_score(&[], &Metrics::default()), 1.0);

        // Measured at zero: full 0.2 penalty.
        let mut metrics = Metrics::default();
        metrics.insert("comment_ratio".to_string(), 0.0);
        assert!((quality_score(&[], &metrics) - 0.8).abs() < 1e-12);

        // Healthy ratio: no penalty.
        metrics.insert("comment_ratio".to_string(), 0.2);
        assert_eq!(quality_score(&[], &metrics), 1.0);
    }

    #[test]
    fn global_score_weights_sum_as_documented() {
        // security 7.5, everything else at maximum
        let g = global_score(7.5, 1.0, 10.0, 10.0);
        assert!((g - 9.0).abs() < 1e-12);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let issues = vec![
            issue(IssueCategory::Security, Severity::High),
            issue(IssueCategory::Quality, Severity::Low),
            issue(IssueCategory::Performance, Severity::Medium),
        ];
        let mut metrics = Metrics::default();
        metrics.insert("complexity".to_string(), 4.2);
        metrics.insert("duplication_ratio".to_string(), 0.1);

        let a = score(&issues, &metrics);
        let b = score(&issues, &metrics);
        assert_eq!(a, b);
    }
}
