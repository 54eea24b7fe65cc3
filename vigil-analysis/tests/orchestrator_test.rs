//! End-to-end orchestrator tests: state machine, fault semantics, scoring.

use std::sync::Arc;

use vigil_analysis::plugins::{AnalysisRequest, AnalyzerPlugin, PluginOutput, PluginRegistry};
use vigil_analysis::{Engine, SubmissionOverrides};
use vigil_core::config::EngineConfig;
use vigil_core::errors::{AnalyzeError, EngineError, StorageError};
use vigil_core::events::EventDispatcher;
use vigil_core::types::{
    AnalysisStatus, Issue, IssueCategory, Language, Metrics, Severity,
};
use vigil_storage::{DatabaseManager, SqliteStats, SqliteStore};

fn engine_with(registry: PluginRegistry, config: EngineConfig) -> Engine {
    let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
    Engine::new(
        Arc::new(registry),
        Arc::new(SqliteStore::new(db.clone())),
        Arc::new(SqliteStats::new(db)),
        Arc::new(EventDispatcher::new()),
        config,
    )
}

fn engine() -> Engine {
    engine_with(PluginRegistry::bootstrap().unwrap(), EngineConfig::default())
}

fn patterns_only() -> Option<SubmissionOverrides> {
    Some(SubmissionOverrides {
        plugins: vec!["patterns".to_string()],
        ..Default::default()
    })
}

/// A plugin that analyzes anything, even binary input.
struct BinaryTolerantPlugin;

impl AnalyzerPlugin for BinaryTolerantPlugin {
    fn name(&self) -> &str {
        "tolerant"
    }
    fn languages(&self) -> &[Language] {
        &[]
    }
    fn categories(&self) -> &[IssueCategory] {
        &[IssueCategory::Quality]
    }
    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<PluginOutput, AnalyzeError> {
        Ok(PluginOutput {
            issues: vec![Issue {
                rule_id: "tolerant-marker".to_string(),
                severity: Severity::Low,
                category: IssueCategory::Quality,
                message: "saw the submission".to_string(),
                file: request.filename.to_string(),
                line: 1,
                column: None,
                snippet: String::new(),
                suggestion: None,
                cwe_ids: Default::default(),
            }],
            metrics: Metrics::default(),
        })
    }
}

/// A plugin that panics on every submission.
struct PanickingPlugin;

impl AnalyzerPlugin for PanickingPlugin {
    fn name(&self) -> &str {
        "panicky"
    }
    fn languages(&self) -> &[Language] {
        &[]
    }
    fn categories(&self) -> &[IssueCategory] {
        &[IssueCategory::Quality]
    }
    fn analyze(&self, _request: &AnalysisRequest<'_>) -> Result<PluginOutput, AnalyzeError> {
        panic!("synthetic plugin failure");
    }
}

/// A plugin that sleeps past any reasonable deadline.
struct SlowPlugin;

impl AnalyzerPlugin for SlowPlugin {
    fn name(&self) -> &str {
        "slow"
    }
    fn languages(&self) -> &[Language] {
        &[]
    }
    fn categories(&self) -> &[IssueCategory] {
        &[IssueCategory::Quality]
    }
    fn analyze(&self, _request: &AnalysisRequest<'_>) -> Result<PluginOutput, AnalyzeError> {
        std::thread::sleep(std::time::Duration::from_millis(2_000));
        Ok(PluginOutput::empty())
    }
}

#[test]
fn eval_user_input_end_to_end() {
    let engine = engine();
    let id = engine
        .submit(
            b"eval(userInput)\n",
            Language::TypeScript,
            "user-1",
            patterns_only(),
        )
        .unwrap();

    let analysis = engine.get_result(id).unwrap();
    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert_eq!(analysis.issues.len(), 1);

    let issue = &analysis.issues[0];
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.category, IssueCategory::Security);
    assert_eq!(issue.cwe_ids.as_slice(), &[95]);

    // One high security issue: 10 - 2.5, and the global weighted average
    // drops proportionally.
    assert!((analysis.security_score - 7.5).abs() < 1e-12);
    assert!((analysis.global_score - 9.0).abs() < 1e-12);
}

#[test]
fn zero_match_submission_scores_maximum() {
    let engine = engine();
    let id = engine
        .submit(
            b"const total: number = 1;\n",
            Language::TypeScript,
            "user-1",
            patterns_only(),
        )
        .unwrap();

    let analysis = engine.get_result(id).unwrap();
    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert!(analysis.issues.is_empty());
    assert_eq!(analysis.security_score, 10.0);
    assert_eq!(analysis.performance_score, 10.0);
    assert_eq!(analysis.quality_score, 1.0);
    assert_eq!(analysis.global_score, 10.0);
}

#[test]
fn status_report_reflects_terminal_state() {
    let engine = engine();
    let id = engine
        .submit(b"x = 1\n", Language::Python, "user-1", None)
        .unwrap();

    let report = engine.get_status(id).unwrap();
    assert_eq!(report.status, AnalysisStatus::Completed);
    assert_eq!(report.progress, 1.0);
}

#[test]
fn unknown_analysis_id_is_not_found() {
    let engine = engine();
    match engine.get_result(99_999) {
        Err(EngineError::Storage(StorageError::NotFound { id })) => assert_eq!(id, 99_999),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn unsupported_input_skips_plugin_but_keeps_others() {
    let registry = PluginRegistry::bootstrap().unwrap();
    registry.register(Arc::new(BinaryTolerantPlugin)).unwrap();
    let engine = engine_with(registry, EngineConfig::default());

    // Binary payload: every builtin plugin reports UnsupportedInput, the
    // tolerant plugin still contributes its issue.
    let id = engine
        .submit(b"\x00\x01\x02\x03", Language::Python, "user-1", None)
        .unwrap();

    let analysis = engine.get_result(id).unwrap();
    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert_eq!(analysis.issues.len(), 1);
    assert_eq!(analysis.issues[0].rule_id, "tolerant-marker");
}

#[test]
fn plugin_fault_fails_submission_and_discards_issues() {
    let registry = PluginRegistry::bootstrap().unwrap();
    registry.register(Arc::new(PanickingPlugin)).unwrap();
    let engine = engine_with(registry, EngineConfig::default());

    // The source would produce pattern issues, but the fault wins.
    let id = engine
        .submit(b"eval(userInput)\n", Language::TypeScript, "user-1", None)
        .unwrap();

    let analysis = engine.get_result(id).unwrap();
    assert_eq!(analysis.status, AnalysisStatus::Failed);
    assert!(analysis.issues.is_empty(), "partial issues must be discarded");
    let failure = analysis.failure.expect("failure description persisted");
    assert!(failure.contains("panicky"));
    assert!(failure.contains("synthetic plugin failure"));

    let usage = engine.get_usage_stats().unwrap();
    assert_eq!(usage.errors, 1);
    assert_eq!(usage.by_analyzer.get("panicky"), Some(&1));
}

#[test]
fn timeout_fails_submission_distinctly() {
    let registry = PluginRegistry::bootstrap().unwrap();
    registry.register(Arc::new(SlowPlugin)).unwrap();
    let engine = engine_with(registry, EngineConfig::default());

    let id = engine
        .submit(
            b"x = 1\n",
            Language::Python,
            "user-1",
            Some(SubmissionOverrides {
                timeout_ms: Some(50),
                ..Default::default()
            }),
        )
        .unwrap();

    let analysis = engine.get_result(id).unwrap();
    assert_eq!(analysis.status, AnalysisStatus::Failed);
    assert!(analysis.failure.unwrap().contains("timed out"));

    let history = engine.get_history(Some(1)).unwrap();
    assert_eq!(history[0].analyzer, "timeout");
}

#[test]
fn failed_submissions_never_leave_partial_stats() {
    let registry = PluginRegistry::bootstrap().unwrap();
    registry.register(Arc::new(PanickingPlugin)).unwrap();
    let engine = engine_with(registry, EngineConfig::default());

    engine
        .submit(b"x = 1\n", Language::Python, "user-1", None)
        .unwrap();

    // Exactly one history record and one counted analysis: the append and
    // the counter bump land together or not at all.
    let history = engine.get_history(None).unwrap();
    let usage = engine.get_usage_stats().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(usage.total_analyses, 1);
    assert_eq!(usage.errors, 1);
}

#[test]
fn filename_override_lands_in_history() {
    let engine = engine();
    engine
        .submit(
            b"x = 1\n",
            Language::Python,
            "user-1",
            Some(SubmissionOverrides {
                filename: Some("service/main.py".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();

    let history = engine.get_history(Some(1)).unwrap();
    assert_eq!(history[0].filename, "service/main.py");
}

#[test]
fn completed_run_merges_metrics_from_all_plugins() {
    let engine = engine();
    let id = engine
        .submit(
            b"def f(x):\n    if x:\n        return 1\n    return 0\n",
            Language::Python,
            "user-1",
            None,
        )
        .unwrap();

    let analysis = engine.get_result(id).unwrap();
    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert!(analysis.metrics.contains_key("complexity"));
    assert!(analysis.metrics.contains_key("duplication_ratio"));
    assert!(analysis.metrics.contains_key("pattern_matches"));
}
